//! Depot explorer: a warehouse's racks, levels and slots as a navigable 3D
//! scene, with a shared selection, a collision-checked walk mode and a
//! login-gated admin view.
//!
//! Library root: data layer, pure layout/collision/walk engine, Bevy plugins
//! and the SDK builder.

pub mod camera;
pub mod collider;
pub mod config;
pub mod data;
pub mod layout;
pub mod payload;
pub mod render;
mod scene;
pub mod selection;
mod ui;
pub mod view;

pub mod prelude;
pub mod sdk;

pub use data::fixture::{Fixture, FixtureStorage};
pub use data::http::HttpStorage;
pub use data::{BoxRecord, InventoryChannel, StorageBackend, StorageConfig, Warehouse};
pub use scene::{CodeGlyph, SlotCube, SlotPalette};
