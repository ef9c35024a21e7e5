//! Layout engine: turns the storage hierarchy into a regular 3D grid of slots.
//!
//! Racks are spread along Z in hierarchy order, levels stack along Y sorted
//! by level number, slots run along X in hierarchy order. Positions depend
//! only on indices, so the same input always produces the same placements.

use std::collections::{HashMap, HashSet};

use bevy::math::Vec3;
use tracing::warn;

use crate::data::{BoxRecord, RackLevel, SlotId, Warehouse};

/// Unit slot dimensions and the gaps between slots, levels and racks.
#[derive(bevy::prelude::Resource, Clone, Debug, PartialEq)]
pub struct LayoutSettings {
    pub box_width: f32,
    pub box_height: f32,
    pub box_depth: f32,
    pub slot_gap: f32,
    pub level_gap: f32,
    pub rack_gap: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            box_width: 1.0,
            box_height: 0.5,
            box_depth: 0.5,
            slot_gap: 0.2,
            level_gap: 0.4,
            rack_gap: 2.0,
        }
    }
}

impl LayoutSettings {
    pub fn box_size(&self) -> Vec3 {
        Vec3::new(self.box_width, self.box_height, self.box_depth)
    }

    /// Center of slot `slot_index` on level `level_index` of rack `rack_index`.
    pub fn position(&self, rack_index: usize, level_index: usize, slot_index: usize) -> Vec3 {
        let x = slot_index as f32 * (self.box_width + self.slot_gap) + self.box_width / 2.0;
        let y = level_index as f32 * (self.box_height + self.level_gap) + self.box_height / 2.0;
        let z = rack_index as f32 * (self.box_depth + self.rack_gap);
        Vec3::new(x, y, z)
    }
}

/// One slot placed in the scene, with its occupant if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub slot_id: SlotId,
    pub slot_code: String,
    pub rack_code: String,
    pub level_number: i32,
    pub position: Vec3,
    pub occupant: Option<BoxRecord>,
}

impl Placement {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Computes one placement per slot of `warehouse`.
///
/// Boxes whose slot id is missing or unknown are ignored; when several boxes
/// claim the same slot the first one in `boxes` wins. A slot id listed more
/// than once in the hierarchy is placed only at its first occurrence.
pub fn build_placements(
    warehouse: &Warehouse,
    boxes: &[BoxRecord],
    settings: &LayoutSettings,
) -> Vec<Placement> {
    let mut by_slot: HashMap<SlotId, &BoxRecord> = HashMap::with_capacity(boxes.len());
    for record in boxes {
        if let Some(slot_id) = record.slot_id {
            by_slot.entry(slot_id).or_insert(record);
        }
    }

    let mut placed: HashSet<SlotId> = HashSet::with_capacity(warehouse.slot_count());
    let mut placements = Vec::with_capacity(warehouse.slot_count());
    for (rack_index, rack) in warehouse.racks.iter().enumerate() {
        let levels = RackLevel::sorted(&rack.levels);
        for (level_index, level) in levels.into_iter().enumerate() {
            for (slot_index, slot) in level.slots.iter().enumerate() {
                if !placed.insert(slot.id) {
                    warn!("layout: duplicate slot id {} skipped", slot.id);
                    continue;
                }
                placements.push(Placement {
                    slot_id: slot.id,
                    slot_code: slot.code.clone(),
                    rack_code: rack.code.clone(),
                    level_number: level.level_number,
                    position: settings.position(rack_index, level_index, slot_index),
                    occupant: by_slot.get(&slot.id).map(|record| (*record).clone()),
                });
            }
        }
    }
    placements
}

/// Admin slot-picker entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotOption {
    pub id: SlotId,
    pub label: String,
}

/// Slot picker labels in layout order: `WH / rack / Level n / slot`.
pub fn slot_options(warehouse: &Warehouse) -> Vec<SlotOption> {
    let mut options = Vec::with_capacity(warehouse.slot_count());
    for rack in &warehouse.racks {
        for level in RackLevel::sorted(&rack.levels) {
            for slot in &level.slots {
                options.push(SlotOption {
                    id: slot.id,
                    label: format!(
                        "{} / {} / Level {} / {}",
                        warehouse.label(),
                        rack.code,
                        level.level_number,
                        slot.code
                    ),
                });
            }
        }
    }
    options
}

/// Current placements, rebuilt when the inventory revision moves.
#[derive(bevy::prelude::Resource, Debug, Default)]
pub struct SlotLayout {
    placements: Vec<Placement>,
    revision: u64,
    source_revision: Option<u64>,
}

impl SlotLayout {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Identity of the current placement sequence.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, slot_id: SlotId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.slot_id == slot_id)
    }

    pub fn is_current(&self, inventory_revision: u64) -> bool {
        self.source_revision == Some(inventory_revision)
    }

    /// Replaces the placements and records which inventory they came from.
    pub fn replace(&mut self, placements: Vec<Placement>, inventory_revision: u64) {
        self.placements = placements;
        self.source_revision = Some(inventory_revision);
        self.revision += 1;
    }

    pub fn occupied_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_occupied()).count()
    }
}
