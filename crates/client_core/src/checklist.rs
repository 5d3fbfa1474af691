use shared::domain::{CheckItem, CheckItemKey};

/// Inspection points covered by default, in display order.
pub const DEFAULT_CHECK_ITEM_KEYS: [CheckItemKey; 5] = [
    CheckItemKey::Tyres,
    CheckItemKey::Brakes,
    CheckItemKey::Lights,
    CheckItemKey::Oil,
    CheckItemKey::Coolant,
];

/// The configured checklist: which inspection points a check covers and in
/// what order. The set is closed over [`CheckItemKey`] and fixed for the
/// lifetime of a deployment; duplicates collapse to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistConfig {
    keys: Vec<CheckItemKey>,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_ITEM_KEYS)
    }
}

impl ChecklistConfig {
    pub fn new(keys: impl IntoIterator<Item = CheckItemKey>) -> Self {
        let mut deduped = Vec::new();
        for key in keys {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        Self { keys: deduped }
    }

    pub fn keys(&self) -> &[CheckItemKey] {
        &self.keys
    }

    pub fn contains(&self, key: CheckItemKey) -> bool {
        self.keys.contains(&key)
    }

    /// One item per configured key, in configured order, every status OK.
    pub fn default_checklist(&self) -> Vec<CheckItem> {
        self.keys.iter().copied().map(CheckItem::ok).collect()
    }
}

#[cfg(test)]
#[path = "tests/checklist_tests.rs"]
mod tests;
