mod channel;
mod error;
pub mod fixture;
pub mod http;
pub mod inventory;
mod model;
pub mod seed;

use url::Url;

pub use channel::{InventoryChannel, Mutation, StorageEvent, StorageRequest};
pub use error::StorageError;
pub use inventory::{DraftError, Inventory};
pub use model::{
    BoxId, BoxRecord, BoxUpdate, LevelId, NewBox, Rack, RackId, RackLevel, Slot, SlotId,
    SlotLocation, Warehouse, WarehouseId,
};

/// Where the HTTP backend finds the storage API.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub api_url: Url,
    pub warehouse_id: WarehouseId,
}

/// Interface for storage workers. Each backend owns one thread and answers
/// `StorageRequest`s with `StorageEvent`s through the returned channel.
pub trait StorageBackend: Send + 'static {
    fn spawn(self) -> InventoryChannel;
}
