//! Last-received inventory, with per-kind response sequencing.

use thiserror::Error;
use tracing::{debug, warn};

use crate::data::channel::{Mutation, StorageEvent};
use crate::data::model::{BoxRecord, NewBox, SlotId, Warehouse};

/// Why an admin form could not be turned into a request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("choose a slot first")]
    NoSlot,
    #[error("slot {0} does not exist in this warehouse")]
    UnknownSlot(SlotId),
    #[error("product name is required")]
    EmptyProduct,
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    #[error("slot {0} already holds a box")]
    SlotOccupied(String),
}

/// What applying one storage event did to the mirror.
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// Hierarchy or box list replaced; layout must be rebuilt.
    Changed,
    /// Response older than one already applied; dropped.
    Stale,
    /// Fetch failed; error recorded.
    Failed,
    /// Mutation went through; caller should refresh.
    Mutated(Mutation),
    /// Mutation was refused; notice recorded.
    Rejected,
}

/// Bevy resource mirroring what the storage backend last reported.
#[derive(bevy::prelude::Resource, Debug, Default)]
pub struct Inventory {
    warehouse: Option<Warehouse>,
    boxes: Vec<BoxRecord>,
    error: Option<String>,
    notice: Option<String>,
    warehouse_seq: Option<u64>,
    boxes_seq: Option<u64>,
    revision: u64,
}

impl Inventory {
    pub fn warehouse(&self) -> Option<&Warehouse> {
        self.warehouse.as_ref()
    }

    pub fn boxes(&self) -> &[BoxRecord] {
        &self.boxes
    }

    /// Display-only fetch error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Result of the last refused mutation, shown by the admin panel.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Bumped every time the hierarchy or box list is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_loaded(&self) -> bool {
        self.warehouse.is_some()
    }

    pub fn apply(&mut self, event: StorageEvent) -> Applied {
        match event {
            StorageEvent::Warehouse { seq, warehouse } => {
                if is_stale(self.warehouse_seq, seq) {
                    debug!("inventory: dropping stale warehouse response {seq}");
                    return Applied::Stale;
                }
                self.warehouse_seq = Some(seq);
                self.warehouse = Some(warehouse);
                self.error = None;
                self.revision += 1;
                Applied::Changed
            }
            StorageEvent::Boxes { seq, boxes } => {
                if is_stale(self.boxes_seq, seq) {
                    debug!("inventory: dropping stale box response {seq}");
                    return Applied::Stale;
                }
                self.boxes_seq = Some(seq);
                self.boxes = boxes;
                self.revision += 1;
                Applied::Changed
            }
            StorageEvent::FetchFailed { seq, error } => {
                let newest = self.warehouse_seq.max(self.boxes_seq);
                if is_stale(newest, seq) {
                    return Applied::Stale;
                }
                warn!("inventory: fetch {seq} failed: {error}");
                self.error = Some(error.to_string());
                Applied::Failed
            }
            StorageEvent::Mutated(mutation) => {
                self.notice = None;
                Applied::Mutated(mutation)
            }
            StorageEvent::MutationFailed { action, error } => {
                self.notice = Some(format!("{action} failed: {error}"));
                Applied::Rejected
            }
        }
    }

    /// Box occupying `slot_id`, first in list order.
    pub fn occupant(&self, slot_id: SlotId) -> Option<&BoxRecord> {
        self.boxes.iter().find(|b| b.slot_id == Some(slot_id))
    }

    /// Validates the admin create form against the current mirror.
    pub fn draft_box(
        &self,
        slot_id: Option<SlotId>,
        product_name: &str,
        quantity: i32,
    ) -> Result<NewBox, DraftError> {
        let slot_id = slot_id.ok_or(DraftError::NoSlot)?;
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(DraftError::EmptyProduct);
        }
        if quantity <= 0 {
            return Err(DraftError::NonPositiveQuantity);
        }
        let location = self
            .warehouse
            .as_ref()
            .and_then(|w| w.locate(slot_id))
            .ok_or(DraftError::UnknownSlot(slot_id))?;
        if self.occupant(slot_id).is_some() {
            return Err(DraftError::SlotOccupied(location.slot.code.clone()));
        }
        Ok(NewBox {
            slot_id,
            product_name: product_name.to_string(),
            quantity,
            box_code: None,
        })
    }
}

fn is_stale(last_applied: Option<u64>, seq: u64) -> bool {
    last_applied.is_some_and(|last| seq < last)
}
