//! Selection inspector: location of the selected slot, its box and payload.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::Inventory;
use crate::layout::SlotLayout;
use crate::payload::identity_payload;
use crate::selection::Selection;
use crate::ui::style;
use crate::ui::UiPass;
use crate::view::ViewMode;

pub fn inspector_plugin(app: &mut App) {
    app.add_systems(Update, inspector_panel_system.in_set(UiPass::Side));
}

fn inspector_panel_system(
    mut contexts: EguiContexts,
    mode: Res<ViewMode>,
    selection: Res<Selection>,
    layout: Res<SlotLayout>,
    inventory: Res<Inventory>,
) {
    if *mode == ViewMode::Admin {
        return;
    }
    let Some(slot_id) = selection.slot_id() else {
        return;
    };
    let placement = layout.get(slot_id);
    let location = inventory.warehouse().and_then(|w| w.locate(slot_id));

    egui::SidePanel::right("inspector")
        .default_width(280.0)
        .frame(style::panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            style::apply_panel_style(ui);

            let code = placement.map_or("?", |p| p.slot_code.as_str());
            style::heading(ui, format!("Slot {code}"));
            ui.add_space(6.0);

            if let Some(location) = location {
                ui.label(format!("Rack   {}", location.rack.code));
                ui.label(format!("Level  {}", location.level.level_number));
            }
            if let Some(placement) = placement {
                let p = placement.position;
                ui.label(format!("Pos    {:.2}, {:.2}, {:.2}", p.x, p.y, p.z));
            }
            ui.add_space(8.0);

            match selection.occupant() {
                Some(record) => {
                    ui.label(
                        egui::RichText::new(format!("Box {}", record.box_code))
                            .color(style::OCCUPIED),
                    );
                    ui.label(format!("Product  {}", record.product_label()));
                    ui.label(format!("Qty      {}", record.quantity));
                    ui.add_space(6.0);
                    ui.label("Code payload");
                    ui.label(
                        egui::RichText::new(identity_payload(record))
                            .size(11.0)
                            .color(style::MUTED),
                    );
                }
                None => {
                    ui.label("Empty slot");
                }
            }

            ui.add_space(12.0);
            style::hint(ui, "Esc to dismiss");
        });
}
