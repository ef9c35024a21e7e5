//! Navigation bar and status HUD: view switch, warehouse, counts, FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::walk::StepOutcome;
use crate::camera::CameraRig;
use crate::data::Inventory;
use crate::layout::SlotLayout;
use crate::ui::style;
use crate::ui::UiPass;
use crate::view::ViewMode;

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
        app.add_plugins(FrameTimeDiagnosticsPlugin);
    }
    app.add_systems(
        Update,
        (nav_bar_system, status_overlay_system)
            .chain()
            .in_set(UiPass::Bars),
    );
}

fn nav_bar_system(
    mut contexts: EguiContexts,
    mut mode: ResMut<ViewMode>,
    inventory: Res<Inventory>,
) {
    let title = inventory
        .warehouse()
        .map(|w| match &w.code {
            Some(code) => format!("{} ({code})", w.name),
            None => w.name.clone(),
        })
        .unwrap_or_else(|| "Loading warehouse...".to_string());

    egui::TopBottomPanel::top("nav")
        .frame(style::panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            style::apply_panel_style(ui);
            ui.horizontal(|ui| {
                style::heading(ui, title);
                ui.separator();
                for candidate in ViewMode::ALL {
                    let active = *mode == candidate;
                    if ui.selectable_label(active, candidate.label()).clicked() && !active {
                        *mode = candidate;
                    }
                }
            });
            if let Some(address) = inventory.warehouse().and_then(|w| w.address.as_deref()) {
                style::hint(ui, address);
            }
        });
}

fn status_overlay_system(
    mut contexts: EguiContexts,
    mode: Res<ViewMode>,
    inventory: Res<Inventory>,
    layout: Res<SlotLayout>,
    rig: Option<Res<CameraRig>>,
    diagnostics: Res<DiagnosticsStore>,
) {
    if !mode.shows_scene() {
        return;
    }
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("status")
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(style::panel_frame().corner_radius(egui::CornerRadius::same(6)))
        .show(contexts.ctx_mut(), |ui| {
            style::apply_panel_style(ui);

            if let Some(error) = inventory.error() {
                ui.label(egui::RichText::new(format!("Fetch failed: {error}")).color(style::ERROR));
            } else if !inventory.is_loaded() {
                ui.label("Waiting for storage...");
            }

            ui.label(format!(
                "Slots {}  occupied {}",
                layout.placements().len(),
                layout.occupied_count()
            ));
            if *mode == ViewMode::Walk {
                let blocked = rig.is_some_and(|r| r.last_outcome == StepOutcome::Blocked);
                ui.label(if blocked { "Walk  blocked" } else { "Walk  WASD / arrows" });
            } else {
                style::hint(ui, "drag to orbit, right-drag to pan, wheel to zoom");
            }
            ui.label(format!("FPS  {fps:.0}"));
        });
}
