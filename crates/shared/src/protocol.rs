use serde::{Deserialize, Serialize};

use crate::domain::{CheckItem, VehicleId};

/// Payload for the check-persistence service's "create check" operation.
///
/// Field names follow the service's wire contract. `odometer_km` carries
/// whatever the odometer text parsed to; a non-finite sentinel is rendered
/// as JSON `null` and left for the server to reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckRequest {
    pub vehicle_id: VehicleId,
    pub odometer_km: f64,
    pub items: Vec<CheckItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::domain::{CheckItemKey, CheckItemStatus};

    use super::*;

    fn request(odometer_km: f64, note: Option<&str>) -> CreateCheckRequest {
        CreateCheckRequest {
            vehicle_id: VehicleId::from("v1"),
            odometer_km,
            items: vec![
                CheckItem::ok(CheckItemKey::Tyres),
                CheckItem {
                    key: CheckItemKey::Brakes,
                    status: CheckItemStatus::Fail,
                },
            ],
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn serializes_camel_case_fields_and_upper_case_items() {
        let value = serde_json::to_value(request(12000.0, Some("rear left worn"))).expect("json");
        assert_eq!(value["vehicleId"], "v1");
        assert_eq!(value["odometerKm"], 12000.0);
        assert_eq!(value["items"][0]["key"], "TYRES");
        assert_eq!(value["items"][0]["status"], "OK");
        assert_eq!(value["items"][1]["status"], "FAIL");
        assert_eq!(value["note"], "rear left worn");
    }

    #[test]
    fn omits_absent_note_entirely() {
        let value = serde_json::to_value(request(100.0, None)).expect("json");
        assert!(value.get("note").is_none());
    }

    #[test]
    fn non_finite_odometer_serializes_as_null() {
        let value = serde_json::to_value(request(f64::NAN, None)).expect("json");
        assert!(value["odometerKm"].is_null());
    }
}
