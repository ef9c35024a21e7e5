//! In-memory storage backend: serves a fixture or seeded warehouse and applies
//! mutations locally with the same rules as the storage API.

use std::path::Path;
use std::thread;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::channel::{serve_requests, Mutation, StorageEvent, StorageRequest};
use crate::data::error::StorageError;
use crate::data::model::{BoxId, BoxRecord, BoxUpdate, NewBox, Warehouse};
use crate::data::seed::default_seed;
use crate::data::{InventoryChannel, StorageBackend};

const EVENT_CAPACITY: usize = 64;

/// On-disk fixture layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Fixture {
    pub warehouse: Option<Warehouse>,
    #[serde(default)]
    pub boxes: Vec<BoxRecord>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path).map_err(|source| StorageError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn seeded() -> Self {
        Self {
            warehouse: Some(default_seed()),
            boxes: Vec::new(),
        }
    }
}

/// Storage backend holding the whole inventory in memory.
pub struct FixtureStorage {
    warehouse: Option<Warehouse>,
    boxes: Vec<BoxRecord>,
    next_id: BoxId,
}

impl FixtureStorage {
    pub fn new(fixture: Fixture) -> Self {
        let next_id = fixture.boxes.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            warehouse: fixture.warehouse,
            boxes: fixture.boxes,
            next_id,
        }
    }

    /// Applies one request synchronously and returns the events it produces.
    pub fn handle(&mut self, request: StorageRequest) -> Vec<StorageEvent> {
        match request {
            StorageRequest::Refresh { seq } => {
                let warehouse = match &self.warehouse {
                    Some(warehouse) => StorageEvent::Warehouse {
                        seq,
                        warehouse: warehouse.clone(),
                    },
                    None => StorageEvent::FetchFailed {
                        seq,
                        error: StorageError::WarehouseNotFound(0),
                    },
                };
                let boxes = StorageEvent::Boxes {
                    seq,
                    boxes: self.boxes.clone(),
                };
                vec![warehouse, boxes]
            }
            StorageRequest::CreateBox(draft) => vec![match self.create_box(draft) {
                Ok(record) => StorageEvent::Mutated(Mutation::Created(record)),
                Err(error) => StorageEvent::MutationFailed {
                    action: "create",
                    error,
                },
            }],
            StorageRequest::UpdateBox { id, update } => vec![match self.update_box(id, update) {
                Ok(()) => StorageEvent::Mutated(Mutation::Updated(id)),
                Err(error) => StorageEvent::MutationFailed {
                    action: "update",
                    error,
                },
            }],
            StorageRequest::DeleteBox(id) => vec![match self.delete_box(id) {
                Ok(()) => StorageEvent::Mutated(Mutation::Deleted(id)),
                Err(error) => StorageEvent::MutationFailed {
                    action: "delete",
                    error,
                },
            }],
        }
    }

    fn create_box(&mut self, draft: NewBox) -> Result<BoxRecord, StorageError> {
        let slot_known = self
            .warehouse
            .as_ref()
            .is_some_and(|w| w.contains_slot(draft.slot_id));
        if !slot_known {
            return Err(StorageError::SlotNotFound(draft.slot_id));
        }

        let box_code = match draft.box_code {
            Some(code) if !code.trim().is_empty() => code,
            _ => generate_box_code(),
        };
        if self.boxes.iter().any(|b| b.box_code == box_code) {
            return Err(StorageError::DuplicateCode(box_code));
        }

        let record = BoxRecord {
            id: self.next_id,
            box_code,
            product_name: Some(draft.product_name),
            quantity: draft.quantity,
            slot_id: Some(draft.slot_id),
        };
        self.next_id += 1;
        self.boxes.push(record.clone());
        Ok(record)
    }

    fn update_box(&mut self, id: BoxId, update: BoxUpdate) -> Result<(), StorageError> {
        let record = self
            .boxes
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StorageError::BoxNotFound(id))?;
        record.product_name = Some(update.product_name);
        record.quantity = update.quantity;
        Ok(())
    }

    fn delete_box(&mut self, id: BoxId) -> Result<(), StorageError> {
        let index = self
            .boxes
            .iter()
            .position(|b| b.id == id)
            .ok_or(StorageError::BoxNotFound(id))?;
        self.boxes.remove(index);
        Ok(())
    }
}

impl StorageBackend for FixtureStorage {
    fn spawn(mut self) -> InventoryChannel {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (evt_tx, evt_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);

        thread::spawn(move || {
            info!("storage: serving fixture with {} boxes", self.boxes.len());
            serve_requests(req_rx, evt_tx, |request| self.handle(request));
        });

        InventoryChannel::new(req_tx, evt_rx)
    }
}

/// `BOX-` followed by eight uppercase hex digits.
pub fn generate_box_code() -> String {
    let value: u32 = rand::thread_rng().gen();
    format!("BOX-{value:08X}")
}
