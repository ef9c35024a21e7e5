// Storage hierarchy and box records as served by the storage API.
// Ownership is strictly downward; upward lookups go through `Warehouse::locate`.

use serde::{Deserialize, Serialize};

pub type WarehouseId = u32;
pub type RackId = u32;
pub type LevelId = u32;
pub type SlotId = u32;
pub type BoxId = u32;

/// Root of the storage tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub racks: Vec<Rack>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: RackId,
    pub code: String,
    #[serde(default)]
    pub levels: Vec<RackLevel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackLevel {
    pub id: LevelId,
    pub level_number: i32,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: SlotId,
    pub code: String,
}

/// A box sitting in at most one slot. `slot_id == None` means not shelved yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxRecord {
    pub id: BoxId,
    pub box_code: String,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i32,
    #[serde(default)]
    pub slot_id: Option<SlotId>,
}

/// Body of a create-box request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBox {
    pub slot_id: SlotId,
    pub product_name: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_code: Option<String>,
}

/// Body of an update-box request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxUpdate {
    pub product_name: String,
    pub quantity: i32,
}

/// Borrowed path from the root down to one slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotLocation<'a> {
    pub rack: &'a Rack,
    pub level: &'a RackLevel,
    pub slot: &'a Slot,
}

impl Warehouse {
    /// Code if present, otherwise the display name.
    pub fn label(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.name)
    }

    pub fn slot_count(&self) -> usize {
        self.racks
            .iter()
            .flat_map(|rack| &rack.levels)
            .map(|level| level.slots.len())
            .sum()
    }

    /// Finds the rack and level owning `slot_id`.
    pub fn locate(&self, slot_id: SlotId) -> Option<SlotLocation<'_>> {
        self.racks.iter().find_map(|rack| {
            rack.levels.iter().find_map(|level| {
                level
                    .slots
                    .iter()
                    .find(|slot| slot.id == slot_id)
                    .map(|slot| SlotLocation { rack, level, slot })
            })
        })
    }

    pub fn contains_slot(&self, slot_id: SlotId) -> bool {
        self.locate(slot_id).is_some()
    }
}

impl RackLevel {
    /// Levels of a rack sorted by level number; ties keep hierarchy order.
    pub fn sorted(levels: &[RackLevel]) -> Vec<&RackLevel> {
        let mut sorted: Vec<&RackLevel> = levels.iter().collect();
        sorted.sort_by_key(|level| level.level_number);
        sorted
    }
}

impl BoxRecord {
    pub fn product_label(&self) -> &str {
        self.product_name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAREHOUSE_JSON: &str = r#"{
        "id": 1,
        "name": "Merkez Depo",
        "code": "DEP-A",
        "address": null,
        "racks": [{
            "id": 7,
            "code": "R1",
            "warehouseId": 1,
            "levels": [{
                "id": 3,
                "levelNumber": 1,
                "rackId": 7,
                "slots": [{ "id": 11, "code": "DEP-A-R01-L01-S01", "rackLevelId": 3, "boxes": [] }]
            }]
        }]
    }"#;

    #[test]
    fn deserializes_api_warehouse_ignoring_back_references() {
        let warehouse: Warehouse = serde_json::from_str(WAREHOUSE_JSON).unwrap();
        assert_eq!(warehouse.label(), "DEP-A");
        assert_eq!(warehouse.slot_count(), 1);
        assert_eq!(warehouse.racks[0].levels[0].level_number, 1);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let warehouse: Warehouse = serde_json::from_str(r#"{"id": 2, "name": "Bare"}"#).unwrap();
        assert!(warehouse.racks.is_empty());
        assert_eq!(warehouse.label(), "Bare");
    }

    #[test]
    fn locate_returns_owning_rack_and_level() {
        let warehouse: Warehouse = serde_json::from_str(WAREHOUSE_JSON).unwrap();
        let location = warehouse.locate(11).expect("slot 11 exists");
        assert_eq!(location.rack.code, "R1");
        assert_eq!(location.level.level_number, 1);
        assert!(warehouse.locate(99).is_none());
    }

    #[test]
    fn box_without_slot_deserializes() {
        let json = r#"{"id": 5, "boxCode": "BOX-1", "quantity": 3, "slotId": null, "slot": null}"#;
        let record: BoxRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.slot_id, None);
        assert_eq!(record.product_label(), "");
    }

    #[test]
    fn new_box_omits_missing_code() {
        let draft = NewBox {
            slot_id: 4,
            product_name: "Widget".into(),
            quantity: 2,
            box_code: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["slotId"], 4);
        assert!(json.get("boxCode").is_none());
    }
}
