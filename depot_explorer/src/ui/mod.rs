mod admin;
mod hud;
mod inspector;
mod list;
mod style;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::view::InputCapture;

pub use admin::admin_plugin;
pub use hud::hud_plugin;
pub use inspector::inspector_plugin;
pub use list::list_plugin;

/// egui draws edge panels before the central panel; these sets keep that
/// order across independently added UI plugins.
#[derive(SystemSet, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiPass {
    Capture,
    Bars,
    Side,
    Central,
}

/// egui setup shared by the viewer plugins; add it once, before them.
pub fn ui_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<InputCapture>()
        .configure_sets(
            Update,
            (UiPass::Capture, UiPass::Bars, UiPass::Side, UiPass::Central).chain(),
        )
        .add_systems(Update, update_input_capture.in_set(UiPass::Capture));
}

fn update_input_capture(mut contexts: EguiContexts, mut capture: ResMut<InputCapture>) {
    let ctx = contexts.ctx_mut();
    let next = InputCapture {
        pointer: ctx.is_pointer_over_area() || ctx.wants_pointer_input(),
        keyboard: ctx.wants_keyboard_input(),
    };
    if capture.pointer != next.pointer || capture.keyboard != next.keyboard {
        *capture = next;
    }
}
