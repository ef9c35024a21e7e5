use std::collections::HashSet;

use bevy::math::Vec3;
use depot_explorer::data::seed::seed_warehouse;
use depot_explorer::data::{BoxRecord, Rack, RackLevel, Slot, Warehouse};
use depot_explorer::layout::{build_placements, LayoutSettings};

fn record(id: u32, slot_id: Option<u32>) -> BoxRecord {
    BoxRecord {
        id,
        box_code: format!("BOX-{id:08X}"),
        product_name: Some("Widget".into()),
        quantity: 1,
        slot_id,
    }
}

fn two_slot_warehouse() -> Warehouse {
    Warehouse {
        id: 1,
        name: "Test".into(),
        code: None,
        address: None,
        racks: vec![Rack {
            id: 1,
            code: "R1".into(),
            levels: vec![RackLevel {
                id: 1,
                level_number: 1,
                slots: vec![
                    Slot {
                        id: 10,
                        code: "S1".into(),
                    },
                    Slot {
                        id: 11,
                        code: "S2".into(),
                    },
                ],
            }],
        }],
    }
}

#[test]
fn identical_input_yields_identical_layout() {
    let warehouse = seed_warehouse(3, 4, 5);
    let boxes: Vec<BoxRecord> = (1..=20).map(|i| record(i, Some(i * 3))).collect();
    let settings = LayoutSettings::default();

    let first = build_placements(&warehouse, &boxes, &settings);
    let second = build_placements(&warehouse, &boxes, &settings);

    assert_eq!(first, second);
}

#[test]
fn one_placement_per_slot_whatever_the_boxes() {
    let warehouse = seed_warehouse(2, 3, 4);
    let settings = LayoutSettings::default();
    let box_sets = [
        Vec::new(),
        vec![record(1, Some(1)), record(2, None), record(3, Some(9_999))],
        (1..=200).map(|i| record(i, Some(i % 30))).collect(),
    ];

    for boxes in box_sets {
        let placements = build_placements(&warehouse, &boxes, &settings);
        assert_eq!(placements.len(), warehouse.slot_count());
        let ids: HashSet<u32> = placements.iter().map(|p| p.slot_id).collect();
        assert_eq!(ids.len(), placements.len());
        assert!(ids.iter().all(|&id| warehouse.contains_slot(id)));
    }
}

#[test]
fn a_box_lands_in_at_most_one_placement() {
    let warehouse = two_slot_warehouse();
    let boxes = vec![record(1, Some(10)), record(2, Some(10)), record(3, Some(11))];

    let placements = build_placements(&warehouse, &boxes, &LayoutSettings::default());

    let mut seen = HashSet::new();
    for occupant in placements.iter().filter_map(|p| p.occupant.as_ref()) {
        assert!(seen.insert(occupant.id));
    }
    assert_eq!(placements[0].occupant.as_ref().map(|b| b.id), Some(1));
    assert!(!seen.contains(&2));
}

#[test]
fn repeated_slot_id_is_placed_once() {
    let mut warehouse = two_slot_warehouse();
    warehouse.racks[0].levels[0].slots.push(Slot {
        id: 10,
        code: "S1-again".into(),
    });
    let boxes = vec![record(1, Some(10))];

    let placements = build_placements(&warehouse, &boxes, &LayoutSettings::default());

    assert_eq!(placements.len(), 2);
    let ids: HashSet<u32> = placements.iter().map(|p| p.slot_id).collect();
    assert_eq!(ids.len(), placements.len());
    assert_eq!(placements[0].slot_code, "S1");
    let holders = placements
        .iter()
        .filter(|p| p.occupant.as_ref().is_some_and(|b| b.id == 1))
        .count();
    assert_eq!(holders, 1);
}

#[test]
fn default_grid_spacing() {
    let placements = build_placements(&two_slot_warehouse(), &[], &LayoutSettings::default());

    assert!(placements[0].position.abs_diff_eq(Vec3::new(0.5, 0.25, 0.0), 1e-6));
    assert!(placements[1].position.abs_diff_eq(Vec3::new(1.7, 0.25, 0.0), 1e-6));
}

#[test]
fn levels_stack_by_number_and_racks_step_back() {
    let mut warehouse = seed_warehouse(2, 2, 1);
    warehouse.racks[0].levels.reverse();
    let settings = LayoutSettings::default();

    let placements = build_placements(&warehouse, &[], &settings);

    assert_eq!(placements[0].level_number, 1);
    assert!((placements[0].position.y - 0.25).abs() < 1e-6);
    assert!((placements[1].position.y - 1.15).abs() < 1e-6);
    assert!((placements[2].position.z - 2.5).abs() < 1e-6);
}
