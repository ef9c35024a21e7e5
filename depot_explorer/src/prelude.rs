//! Minimal prelude for SDK consumers.

pub use crate::camera::walk::WalkSettings;
pub use crate::config::{ExplorerConfig, StorageSource};
pub use crate::data::{BoxRecord, StorageBackend, StorageConfig, Warehouse};
pub use crate::layout::LayoutSettings;
pub use crate::render::{CubesRenderer, SlotRenderer};
pub use crate::sdk::DepotExplorerBuilder;
pub use crate::view::ViewMode;
pub use crate::scene::SlotPalette;
