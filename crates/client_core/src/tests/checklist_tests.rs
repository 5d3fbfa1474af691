use shared::domain::CheckItemStatus;

use super::*;

#[test]
fn default_config_covers_the_five_keys_in_display_order() {
    let config = ChecklistConfig::default();
    assert_eq!(config.keys(), DEFAULT_CHECK_ITEM_KEYS);
}

#[test]
fn default_checklist_has_one_ok_item_per_configured_key() {
    let config = ChecklistConfig::default();
    let items = config.default_checklist();

    assert_eq!(items.len(), config.keys().len());
    for (item, key) in items.iter().zip(config.keys()) {
        assert_eq!(item.key, *key);
        assert_eq!(item.status, CheckItemStatus::Ok);
    }
}

#[test]
fn default_checklist_is_deterministic() {
    let config = ChecklistConfig::new([CheckItemKey::Lights, CheckItemKey::Tyres]);
    assert_eq!(config.default_checklist(), config.default_checklist());
}

#[test]
fn custom_config_preserves_given_order() {
    let config = ChecklistConfig::new([
        CheckItemKey::Coolant,
        CheckItemKey::Tyres,
        CheckItemKey::Brakes,
    ]);
    assert_eq!(
        config.keys(),
        [
            CheckItemKey::Coolant,
            CheckItemKey::Tyres,
            CheckItemKey::Brakes
        ]
    );
    assert!(config.contains(CheckItemKey::Tyres));
    assert!(!config.contains(CheckItemKey::Oil));
}

#[test]
fn duplicate_keys_collapse_to_first_occurrence() {
    let config = ChecklistConfig::new([
        CheckItemKey::Tyres,
        CheckItemKey::Brakes,
        CheckItemKey::Tyres,
        CheckItemKey::Brakes,
    ]);
    assert_eq!(config.keys(), [CheckItemKey::Tyres, CheckItemKey::Brakes]);
    assert_eq!(config.default_checklist().len(), 2);
}
