//! SDK entry points and builder for composing the depot explorer app.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::camera::walk::WalkSettings;
use crate::camera::{camera_plugin, CameraSettings};
use crate::config::{ExplorerConfig, StorageSource};
use crate::data::fixture::{Fixture, FixtureStorage};
use crate::data::http::HttpStorage;
use crate::data::{Inventory, InventoryChannel, StorageBackend, StorageConfig, StorageError};
use crate::layout::{LayoutSettings, SlotLayout};
use crate::render::{CubesRenderer, RendererResource, SlotRenderer};
use crate::scene::scene_plugin;
use crate::selection::selection_plugin;
use crate::ui::{admin_plugin, hud_plugin, inspector_plugin, list_plugin, ui_plugin};
use crate::view::{view_plugin, ViewMode};

/// Builder for constructing a depot explorer app with customizable plugins.
pub struct DepotExplorerBuilder {
    config: Option<ExplorerConfig>,
    channel: Option<InventoryChannel>,
    renderer: Option<Box<dyn SlotRenderer>>,
    layout: LayoutSettings,
    camera: CameraSettings,
    initial_mode: ViewMode,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_camera: bool,
    enable_hud: bool,
    enable_inspector: bool,
    enable_list: bool,
    enable_admin: bool,
}

impl Default for DepotExplorerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            channel: None,
            renderer: None,
            layout: LayoutSettings::default(),
            camera: CameraSettings::default(),
            initial_mode: ViewMode::default(),
            window_title: "Depot Explorer".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.94, 0.95, 0.97),
            enable_camera: true,
            enable_hud: true,
            enable_inspector: true,
            enable_list: true,
            enable_admin: true,
        }
    }
}

impl DepotExplorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of reading the environment.
    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from `DEPOT_*` environment variables.
    pub fn env_config(mut self) -> Self {
        self.config = Some(ExplorerConfig::from_env());
        self
    }

    /// Talk to the storage API at `storage`.
    pub fn http(mut self, storage: StorageConfig) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.storage = storage;
        config.source = StorageSource::Http;
        self.config = Some(config);
        self
    }

    /// Serve inventory from a JSON fixture file.
    pub fn fixture(mut self, path: impl Into<PathBuf>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.source = StorageSource::Fixture(path.into());
        self.config = Some(config);
        self
    }

    /// Serve the generated seed warehouse from memory.
    pub fn offline(mut self) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.source = StorageSource::Offline;
        self.config = Some(config);
        self
    }

    /// Use an already running storage worker.
    pub fn backend(mut self, backend: impl StorageBackend) -> Self {
        self.channel = Some(backend.spawn());
        self
    }

    /// Provide a custom slot renderer implementation.
    pub fn renderer(mut self, renderer: impl SlotRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn walk(mut self, walk: WalkSettings) -> Self {
        self.camera.walk = walk;
        self
    }

    pub fn camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    pub fn initial_mode(mut self, mode: ViewMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_camera(mut self) -> Self {
        self.enable_camera = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    pub fn disable_list(mut self) -> Self {
        self.enable_list = false;
        self
    }

    pub fn disable_admin(mut self) -> Self {
        self.enable_admin = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_else(ExplorerConfig::from_env);
        let mut issues = config.issues.clone();
        let mut channel = match self.channel {
            Some(channel) => channel,
            None => spawn_backend(&config.source, &config.storage).unwrap_or_else(|err| {
                issues.push(format!("{err}, serving the seed warehouse instead"));
                FixtureStorage::new(Fixture::seeded()).spawn()
            }),
        };
        channel.refresh();

        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(CubesRenderer::default()));

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(self.initial_mode)
        .insert_resource(self.layout)
        .insert_resource(self.camera)
        .insert_resource(config.admin)
        .insert_resource(channel)
        .init_resource::<Inventory>()
        .init_resource::<SlotLayout>()
        .add_plugins((view_plugin, selection_plugin, scene_plugin))
        .add_systems(Startup, move || {
            for issue in &issues {
                warn!("config: {issue}");
            }
        });

        renderer.setup(&mut app);
        app.insert_resource(RendererResource(renderer));

        if self.enable_camera {
            app.add_plugins(camera_plugin);
        }

        let any_ui = self.enable_hud || self.enable_inspector || self.enable_list || self.enable_admin;
        if any_ui {
            app.add_plugins(ui_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }
        if self.enable_list {
            app.add_plugins(list_plugin);
        }
        if self.enable_admin {
            app.add_plugins(admin_plugin);
        }

        app
    }
}

/// Starts the worker `source` asks for.
pub fn spawn_backend(
    source: &StorageSource,
    storage: &StorageConfig,
) -> Result<InventoryChannel, StorageError> {
    let channel = match source {
        StorageSource::Http => HttpStorage::new(storage.clone()).spawn(),
        StorageSource::Offline => FixtureStorage::new(Fixture::seeded()).spawn(),
        StorageSource::Fixture(path) => FixtureStorage::new(Fixture::load(path)?).spawn(),
    };
    Ok(channel)
}
