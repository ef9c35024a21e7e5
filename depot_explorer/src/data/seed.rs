//! Generated demo warehouse used by the offline backend.

use crate::data::model::{Rack, RackLevel, Slot, Warehouse};

pub const SEED_RACKS: u32 = 5;
pub const SEED_LEVELS: u32 = 4;
pub const SEED_SLOTS_PER_LEVEL: u32 = 5;

/// Builds `racks × levels × slots_per_level` slots with sequential ids.
///
/// Rack codes are `R<r>`, slot codes `<WH>-R<rr>-L<ll>-S<ss>`, all 1-based.
pub fn seed_warehouse(racks: u32, levels: u32, slots_per_level: u32) -> Warehouse {
    let code = "DEP-A";
    let mut next_level_id = 1;
    let mut next_slot_id = 1;

    let racks = (1..=racks)
        .map(|r| {
            let levels = (1..=levels)
                .map(|l| {
                    let slots = (1..=slots_per_level)
                        .map(|s| {
                            let slot = Slot {
                                id: next_slot_id,
                                code: format!("{code}-R{r:02}-L{l:02}-S{s:02}"),
                            };
                            next_slot_id += 1;
                            slot
                        })
                        .collect();
                    let level = RackLevel {
                        id: next_level_id,
                        level_number: l as i32,
                        slots,
                    };
                    next_level_id += 1;
                    level
                })
                .collect();
            Rack {
                id: r,
                code: format!("R{r}"),
                levels,
            }
        })
        .collect();

    Warehouse {
        id: 1,
        name: "Merkez Depo".to_string(),
        code: Some(code.to_string()),
        address: Some("Merkez depo adresi".to_string()),
        racks,
    }
}

pub fn default_seed() -> Warehouse {
    seed_warehouse(SEED_RACKS, SEED_LEVELS, SEED_SLOTS_PER_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_has_expected_shape() {
        let warehouse = default_seed();
        assert_eq!(warehouse.racks.len(), 5);
        assert_eq!(warehouse.slot_count(), 100);
        assert_eq!(warehouse.racks[1].levels[2].slots[3].code, "DEP-A-R02-L03-S04");
    }

    #[test]
    fn slot_ids_are_unique_and_sequential() {
        let warehouse = seed_warehouse(2, 2, 3);
        let ids: Vec<u32> = warehouse
            .racks
            .iter()
            .flat_map(|r| &r.levels)
            .flat_map(|l| &l.slots)
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }
}
