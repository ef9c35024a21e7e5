//! Tabular view of the hierarchy: racks, levels (sorted), slot buttons.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::{Inventory, RackLevel, SlotId};
use crate::layout::SlotLayout;
use crate::selection::Selection;
use crate::ui::style;
use crate::ui::UiPass;
use crate::view::ViewMode;

pub fn list_plugin(app: &mut App) {
    app.add_systems(Update, list_view_system.in_set(UiPass::Central));
}

/// Selects an occupied slot picked in the list and jumps to the 3D view.
/// Empty slots are not selectable from the list.
pub fn select_from_list(
    slot_id: SlotId,
    layout: &SlotLayout,
    selection: &mut Selection,
    mode: &mut ViewMode,
) -> bool {
    let Some(placement) = layout.get(slot_id).filter(|p| p.is_occupied()) else {
        return false;
    };
    selection.select(placement);
    *mode = ViewMode::Overview;
    true
}

fn list_view_system(
    mut contexts: EguiContexts,
    mut mode: ResMut<ViewMode>,
    mut selection: ResMut<Selection>,
    inventory: Res<Inventory>,
    layout: Res<SlotLayout>,
) {
    if *mode != ViewMode::List {
        return;
    }
    let mut clicked = None;

    egui::CentralPanel::default()
        .frame(style::panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            style::apply_panel_style(ui);
            let Some(warehouse) = inventory.warehouse() else {
                ui.label(inventory.error().unwrap_or("Waiting for storage..."));
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                for rack in &warehouse.racks {
                    style::heading(ui, format!("Rack {}", rack.code));
                    for level in RackLevel::sorted(&rack.levels) {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(format!("L{:<3}", level.level_number));
                            for slot in &level.slots {
                                let occupant = inventory.occupant(slot.id);
                                let text = match occupant {
                                    Some(record) => format!("{}\n{}", slot.code, record.box_code),
                                    None => format!("{}\n-", slot.code),
                                };
                                let fill = if selection.is_selected(slot.id) {
                                    style::ACCENT
                                } else if occupant.is_some() {
                                    style::OCCUPIED
                                } else {
                                    style::EMPTY
                                };
                                let button = egui::Button::new(
                                    egui::RichText::new(text).color(egui::Color32::BLACK),
                                )
                                .fill(fill);
                                let response = ui.add_enabled(occupant.is_some(), button);
                                if response.clicked() {
                                    clicked = Some(slot.id);
                                }
                            }
                        });
                    }
                    ui.add_space(8.0);
                }
            });
        });

    if let Some(slot_id) = clicked {
        select_from_list(slot_id, &layout, &mut selection, &mut mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BoxRecord;
    use crate::layout::Placement;

    fn layout() -> SlotLayout {
        let placement = |slot_id, occupant: Option<BoxRecord>| Placement {
            slot_id,
            slot_code: format!("S{slot_id}"),
            rack_code: "R1".into(),
            level_number: 1,
            position: Vec3::ZERO,
            occupant,
        };
        let mut layout = SlotLayout::default();
        layout.replace(
            vec![
                placement(1, None),
                placement(
                    2,
                    Some(BoxRecord {
                        id: 5,
                        box_code: "BOX-00000005".into(),
                        product_name: None,
                        quantity: 1,
                        slot_id: Some(2),
                    }),
                ),
            ],
            1,
        );
        layout
    }

    #[test]
    fn filled_slot_selects_and_switches_to_overview() {
        let layout = layout();
        let mut selection = Selection::default();
        let mut mode = ViewMode::List;

        assert!(select_from_list(2, &layout, &mut selection, &mut mode));
        assert_eq!(selection.slot_id(), Some(2));
        assert_eq!(selection.occupant().map(|b| b.id), Some(5));
        assert_eq!(mode, ViewMode::Overview);
    }

    #[test]
    fn empty_slot_is_ignored() {
        let layout = layout();
        let mut selection = Selection::default();
        let mut mode = ViewMode::List;

        assert!(!select_from_list(1, &layout, &mut selection, &mut mode));
        assert_eq!(selection, Selection::default());
        assert_eq!(mode, ViewMode::List);
    }
}
