//! Shared selection: the one slot (and its box) every viewer highlights.

use bevy::prelude::*;

use crate::data::{BoxRecord, SlotId};
use crate::layout::{Placement, SlotLayout};

// #22c55e, #d2b48c, #e5e7eb
const SELECTED_COLOR: Color = Color::srgb(0.133, 0.773, 0.369);
const OCCUPIED_COLOR: Color = Color::srgb(0.824, 0.706, 0.549);
const EMPTY_COLOR: Color = Color::srgb(0.898, 0.906, 0.922);

/// Currently selected slot and its occupant at the time of selection.
///
/// Both fields are always written together; a selected empty slot has no box.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Selection {
    slot_id: Option<SlotId>,
    occupant: Option<BoxRecord>,
}

impl Selection {
    pub fn slot_id(&self) -> Option<SlotId> {
        self.slot_id
    }

    pub fn occupant(&self) -> Option<&BoxRecord> {
        self.occupant.as_ref()
    }

    pub fn is_selected(&self, slot_id: SlotId) -> bool {
        self.slot_id == Some(slot_id)
    }

    pub fn select(&mut self, placement: &Placement) {
        self.select_slot(placement.slot_id, placement.occupant.clone());
    }

    pub fn select_slot(&mut self, slot_id: SlotId, occupant: Option<BoxRecord>) {
        self.slot_id = Some(slot_id);
        self.occupant = occupant;
    }

    pub fn clear(&mut self) {
        self.slot_id = None;
        self.occupant = None;
    }

    /// Re-resolves the occupant against a rebuilt layout. A slot that vanished
    /// clears the selection. Returns true if anything changed.
    pub fn refresh(&mut self, layout: &SlotLayout) -> bool {
        let Some(slot_id) = self.slot_id else {
            return false;
        };
        let before = self.clone();
        match layout.get(slot_id) {
            Some(placement) => self.select(placement),
            None => self.clear(),
        }
        *self != before
    }
}

/// Pointer pick on a slot volume or its code glyph.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotPicked {
    pub slot_id: SlotId,
}

/// Which color rule a placement falls under this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    Selected,
    Occupied,
    Empty,
}

impl Highlight {
    pub fn of(placement: &Placement, selection: &Selection) -> Self {
        if selection.is_selected(placement.slot_id) {
            Self::Selected
        } else if placement.is_occupied() {
            Self::Occupied
        } else {
            Self::Empty
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Selected => SELECTED_COLOR,
            Self::Occupied => OCCUPIED_COLOR,
            Self::Empty => EMPTY_COLOR,
        }
    }
}

pub fn selection_plugin(app: &mut App) {
    app.init_resource::<Selection>()
        .add_event::<SlotPicked>()
        .add_systems(Update, (apply_slot_picks, dismiss_selection_system));
}

/// Applies the last pick of the frame. Picks on unknown slots are dropped.
pub fn apply_slot_picks(
    mut picks: EventReader<SlotPicked>,
    layout: Res<SlotLayout>,
    mut selection: ResMut<Selection>,
) {
    let Some(pick) = picks.read().last() else {
        return;
    };
    match layout.get(pick.slot_id) {
        Some(placement) => {
            debug!("selection: slot {}", placement.slot_code);
            selection.select(placement);
        }
        None => debug!("selection: ignoring pick on unknown slot {}", pick.slot_id),
    }
}

fn dismiss_selection_system(keys: Res<ButtonInput<KeyCode>>, mut selection: ResMut<Selection>) {
    if keys.just_pressed(KeyCode::Escape) && selection.slot_id().is_some() {
        selection.clear();
    }
}
