use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the vehicle directory service. The empty
/// string is the "unselected" value and is never a valid directory id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn is_unselected(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VehicleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory record for a selectable vehicle. Read-only in this workflow;
/// the directory service owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// Closed set of inspection points. The configured checklist draws from this
/// set only; it is not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckItemKey {
    Tyres,
    Brakes,
    Lights,
    Oil,
    Coolant,
}

impl CheckItemKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tyres => "TYRES",
            Self::Brakes => "BRAKES",
            Self::Lights => "LIGHTS",
            Self::Oil => "OIL",
            Self::Coolant => "COOLANT",
        }
    }
}

impl fmt::Display for CheckItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown checklist key '{0}'")]
pub struct UnknownCheckItemKey(pub String);

impl FromStr for CheckItemKey {
    type Err = UnknownCheckItemKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TYRES" => Ok(Self::Tyres),
            "BRAKES" => Ok(Self::Brakes),
            "LIGHTS" => Ok(Self::Lights),
            "OIL" => Ok(Self::Oil),
            "COOLANT" => Ok(Self::Coolant),
            other => Err(UnknownCheckItemKey(other.to_string())),
        }
    }
}

/// Two-valued inspection outcome. The tagged enum is the canonical
/// representation; checkbox-style booleans are a presentation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckItemStatus {
    Ok,
    Fail,
}

impl CheckItemStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// One checklist line: an inspection point and its recorded outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    pub key: CheckItemKey,
    pub status: CheckItemStatus,
}

impl CheckItem {
    pub fn ok(key: CheckItemKey) -> Self {
        Self {
            key,
            status: CheckItemStatus::Ok,
        }
    }
}
