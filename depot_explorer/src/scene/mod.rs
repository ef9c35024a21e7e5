mod materials;
pub(crate) mod picking;
mod slots;

use bevy::prelude::*;

use crate::selection::apply_slot_picks;

pub use materials::SlotPalette;
pub use picking::click_pick_system;
pub use slots::{
    ingest_inventory, rebuild_layout, setup_scene, spawn_slot_entities, tint_slots, CodeGlyph,
    SlotCube,
};

/// Inventory ingestion, layout, slot entities and picking.
pub fn scene_plugin(app: &mut App) {
    app.add_systems(Startup, setup_scene).add_systems(
        Update,
        (
            ingest_inventory,
            rebuild_layout,
            spawn_slot_entities,
            click_pick_system.before(apply_slot_picks),
            tint_slots.after(apply_slot_picks),
        )
            .chain(),
    );
}
