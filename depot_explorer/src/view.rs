//! Top-level view mode and which input the UI is currently consuming.

use bevy::prelude::*;

/// Which viewer is on screen. Selection persists across switches.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    List,
    #[default]
    Overview,
    Walk,
    Admin,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::List,
        ViewMode::Overview,
        ViewMode::Walk,
        ViewMode::Admin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::List => "List",
            ViewMode::Overview => "3D",
            ViewMode::Walk => "Walk",
            ViewMode::Admin => "Admin",
        }
    }

    /// Whether the 3D scene is visible and takes pointer input.
    pub fn shows_scene(self) -> bool {
        matches!(self, ViewMode::Overview | ViewMode::Walk)
    }
}

/// Set each frame by the UI layer when egui wants the pointer or keyboard,
/// so scene systems leave that input alone.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct InputCapture {
    pub pointer: bool,
    pub keyboard: bool,
}

pub fn view_plugin(app: &mut App) {
    app.init_resource::<ViewMode>()
        .init_resource::<InputCapture>();
}
