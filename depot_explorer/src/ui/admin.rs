//! Login-gated admin view: box table with edit/delete and a create form.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AdminCredentials;
use crate::data::{BoxId, BoxRecord, BoxUpdate, DraftError, Inventory, InventoryChannel, SlotId};
use crate::layout::{slot_options, SlotOption};
use crate::ui::style;
use crate::ui::UiPass;
use crate::view::ViewMode;

/// Create-form fields.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxDraft {
    pub slot_id: Option<SlotId>,
    pub product_name: String,
    pub quantity: i32,
}

impl Default for BoxDraft {
    fn default() -> Self {
        Self {
            slot_id: None,
            product_name: String::new(),
            quantity: 1,
        }
    }
}

/// Row being edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxEdit {
    pub id: BoxId,
    pub product_name: String,
    pub quantity: i32,
}

#[derive(Resource, Debug, Default)]
pub struct AdminPanel {
    authenticated: bool,
    pub username: String,
    pub password: String,
    login_error: Option<String>,
    pub draft: BoxDraft,
    draft_error: Option<String>,
    pub editing: Option<BoxEdit>,
    pending_delete: Option<BoxId>,
}

impl AdminPanel {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn log_in(&mut self, credentials: &AdminCredentials) -> bool {
        self.authenticated = credentials.accepts(&self.username, &self.password);
        self.password.clear();
        self.login_error = (!self.authenticated).then(|| "wrong username or password".to_string());
        if self.authenticated {
            info!("admin: {} logged in", self.username.trim());
        }
        self.authenticated
    }

    pub fn log_out(&mut self) {
        *self = Self::default();
    }

    /// Validates the create form and queues the request. The form resets on
    /// success.
    pub fn submit_draft(
        &mut self,
        inventory: &Inventory,
        channel: &InventoryChannel,
    ) -> Result<(), DraftError> {
        let result = inventory.draft_box(
            self.draft.slot_id,
            &self.draft.product_name,
            self.draft.quantity,
        );
        match result {
            Ok(draft) => {
                channel.create_box(draft);
                self.draft = BoxDraft::default();
                self.draft_error = None;
                Ok(())
            }
            Err(err) => {
                self.draft_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn begin_edit(&mut self, record: &BoxRecord) {
        self.editing = Some(BoxEdit {
            id: record.id,
            product_name: record.product_label().to_string(),
            quantity: record.quantity,
        });
        self.pending_delete = None;
    }

    pub fn commit_edit(&mut self, channel: &InventoryChannel) -> Result<(), DraftError> {
        let Some(edit) = &self.editing else {
            return Ok(());
        };
        let update = validate_update(&edit.product_name, edit.quantity)?;
        channel.update_box(edit.id, update);
        self.editing = None;
        Ok(())
    }

    /// First call arms the row, second call sends the delete.
    pub fn request_delete(&mut self, id: BoxId, channel: &InventoryChannel) -> bool {
        if self.pending_delete == Some(id) {
            channel.delete_box(id);
            self.pending_delete = None;
            true
        } else {
            self.pending_delete = Some(id);
            false
        }
    }
}

pub fn validate_update(product_name: &str, quantity: i32) -> Result<BoxUpdate, DraftError> {
    let product_name = product_name.trim();
    if product_name.is_empty() {
        return Err(DraftError::EmptyProduct);
    }
    if quantity <= 0 {
        return Err(DraftError::NonPositiveQuantity);
    }
    Ok(BoxUpdate {
        product_name: product_name.to_string(),
        quantity,
    })
}

pub fn admin_plugin(app: &mut App) {
    app.init_resource::<AdminPanel>()
        .init_resource::<AdminCredentials>()
        .add_systems(Update, admin_view_system.in_set(UiPass::Central));
}

fn admin_view_system(
    mut contexts: EguiContexts,
    mode: Res<ViewMode>,
    credentials: Res<AdminCredentials>,
    mut panel: ResMut<AdminPanel>,
    mut inventory: ResMut<Inventory>,
    channel: Option<Res<InventoryChannel>>,
) {
    if *mode != ViewMode::Admin {
        return;
    }

    egui::CentralPanel::default()
        .frame(style::panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            style::apply_panel_style(ui);
            if !panel.is_authenticated() {
                login_form(ui, &mut panel, &credentials);
                return;
            }
            let Some(channel) = channel.as_deref() else {
                ui.label("Storage is not connected.");
                return;
            };

            ui.horizontal(|ui| {
                style::heading(ui, "Boxes");
                if ui.button("Log out").clicked() {
                    panel.log_out();
                }
            });
            if let Some(notice) = inventory.notice().map(str::to_string) {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(notice).color(style::ERROR));
                    if ui.small_button("x").clicked() {
                        inventory.dismiss_notice();
                    }
                });
            }
            ui.add_space(6.0);

            let options = inventory.warehouse().map(slot_options).unwrap_or_default();
            create_form(ui, &mut panel, &inventory, channel, &options);
            ui.separator();
            box_table(ui, &mut panel, &inventory, channel, &options);
        });
}

fn login_form(ui: &mut egui::Ui, panel: &mut AdminPanel, credentials: &AdminCredentials) {
    style::heading(ui, "Admin login");
    ui.add_space(6.0);
    egui::Grid::new("login").num_columns(2).show(ui, |ui| {
        ui.label("Username");
        ui.text_edit_singleline(&mut panel.username);
        ui.end_row();
        ui.label("Password");
        let response = ui.add(egui::TextEdit::singleline(&mut panel.password).password(true));
        ui.end_row();
        let submit = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Log in").clicked() || submit {
            panel.log_in(credentials);
        }
        ui.end_row();
    });
    if let Some(error) = &panel.login_error {
        ui.label(egui::RichText::new(error).color(style::ERROR));
    }
}

fn create_form(
    ui: &mut egui::Ui,
    panel: &mut AdminPanel,
    inventory: &Inventory,
    channel: &InventoryChannel,
    options: &[SlotOption],
) {
    ui.label("New box");
    ui.horizontal(|ui| {
        let selected = panel
            .draft
            .slot_id
            .and_then(|id| options.iter().find(|o| o.id == id))
            .map_or("choose slot", |o| o.label.as_str())
            .to_string();
        egui::ComboBox::from_id_salt("slot")
            .selected_text(selected)
            .width(320.0)
            .show_ui(ui, |ui| {
                for option in options {
                    let taken = inventory.occupant(option.id).is_some();
                    let label = if taken {
                        format!("{} (full)", option.label)
                    } else {
                        option.label.clone()
                    };
                    ui.selectable_value(&mut panel.draft.slot_id, Some(option.id), label);
                }
            });
        ui.add(egui::TextEdit::singleline(&mut panel.draft.product_name).hint_text("product"));
        ui.add(egui::DragValue::new(&mut panel.draft.quantity).range(0..=100_000));
        if ui.button("Create").clicked() {
            let _ = panel.submit_draft(inventory, channel);
        }
    });
    if let Some(error) = &panel.draft_error {
        ui.label(egui::RichText::new(error).color(style::ERROR));
    }
}

fn box_table(
    ui: &mut egui::Ui,
    panel: &mut AdminPanel,
    inventory: &Inventory,
    channel: &InventoryChannel,
    options: &[SlotOption],
) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("boxes")
            .num_columns(5)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Code");
                ui.label("Slot");
                ui.label("Product");
                ui.label("Qty");
                ui.label("");
                ui.end_row();

                for record in inventory.boxes() {
                    let slot = record
                        .slot_id
                        .and_then(|id| options.iter().find(|o| o.id == id))
                        .map_or("-", |o| o.label.as_str());
                    ui.label(&record.box_code);
                    ui.label(slot);

                    let editing = panel.editing.as_ref().is_some_and(|e| e.id == record.id);
                    if editing {
                        edit_row(ui, panel, channel);
                    } else {
                        ui.label(record.product_label());
                        ui.label(record.quantity.to_string());
                        ui.horizontal(|ui| {
                            if ui.small_button("Edit").clicked() {
                                panel.begin_edit(record);
                            }
                            let armed = panel.pending_delete == Some(record.id);
                            let text = if armed { "Confirm delete" } else { "Delete" };
                            if ui.small_button(text).clicked() {
                                panel.request_delete(record.id, channel);
                            }
                        });
                    }
                    ui.end_row();
                }
            });
    });
}

fn edit_row(ui: &mut egui::Ui, panel: &mut AdminPanel, channel: &InventoryChannel) {
    let mut commit = false;
    let mut cancel = false;
    if let Some(edit) = panel.editing.as_mut() {
        ui.text_edit_singleline(&mut edit.product_name);
        ui.add(egui::DragValue::new(&mut edit.quantity).range(0..=100_000));
        ui.horizontal(|ui| {
            commit = ui.small_button("Save").clicked();
            cancel = ui.small_button("Cancel").clicked();
        });
    }
    if commit {
        if let Err(err) = panel.commit_edit(channel) {
            panel.draft_error = Some(err.to_string());
        }
    } else if cancel {
        panel.editing = None;
    }
}
