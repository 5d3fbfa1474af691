use std::{collections::HashMap, fs};

use client_core::checklist::DEFAULT_CHECK_ITEM_KEYS;
use shared::domain::CheckItemKey;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub checklist_keys: Vec<CheckItemKey>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".into(),
            checklist_keys: DEFAULT_CHECK_ITEM_KEYS.to_vec(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("inspector.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("checklist") {
                apply_checklist(&mut settings, v);
            }
        }
    }

    if let Ok(v) = std::env::var("INSPECTOR_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__CHECKLIST") {
        apply_checklist(&mut settings, &v);
    }

    settings
}

fn apply_checklist(settings: &mut Settings, raw: &str) {
    let keys = parse_checklist_keys(raw);
    if keys.is_empty() {
        warn!("configured checklist resolved to no keys; keeping the previous set");
        return;
    }
    settings.checklist_keys = keys;
}

/// Parse a comma-separated key list. Unknown names are skipped with a
/// warning; the caller decides what an empty result means.
pub fn parse_checklist_keys(raw: &str) -> Vec<CheckItemKey> {
    let mut keys = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<CheckItemKey>() {
            Ok(key) => keys.push(key),
            Err(err) => warn!(error = %err, "skipping unrecognized checklist key"),
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_keys_case_insensitively() {
        assert_eq!(
            parse_checklist_keys("tyres, BRAKES ,Lights"),
            vec![
                CheckItemKey::Tyres,
                CheckItemKey::Brakes,
                CheckItemKey::Lights
            ]
        );
    }

    #[test]
    fn skips_unknown_keys_and_empty_segments() {
        assert_eq!(
            parse_checklist_keys("TYRES,,WINDSCREEN,OIL"),
            vec![CheckItemKey::Tyres, CheckItemKey::Oil]
        );
    }

    #[test]
    fn empty_input_parses_to_no_keys() {
        assert!(parse_checklist_keys("").is_empty());
        assert!(parse_checklist_keys(" , ").is_empty());
    }

    #[test]
    fn empty_checklist_configuration_keeps_the_previous_set() {
        let mut settings = Settings::default();
        apply_checklist(&mut settings, "WINDSCREEN");
        assert_eq!(settings.checklist_keys, DEFAULT_CHECK_ITEM_KEYS.to_vec());

        apply_checklist(&mut settings, "COOLANT,TYRES");
        assert_eq!(
            settings.checklist_keys,
            vec![CheckItemKey::Coolant, CheckItemKey::Tyres]
        );
    }
}
