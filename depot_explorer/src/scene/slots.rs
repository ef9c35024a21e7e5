//! Slot volumes: inventory ingestion, layout rebuilds, entity spawn and tint.

use bevy::prelude::*;

use crate::camera::{CameraSettings, ViewCamera};
use crate::data::inventory::Applied;
use crate::data::{Inventory, InventoryChannel, SlotId};
use crate::layout::{build_placements, LayoutSettings, SlotLayout};
use crate::render::RendererResource;
use crate::scene::SlotPalette;
use crate::selection::{Highlight, Selection};
use crate::view::ViewMode;

const MAX_EVENTS_PER_FRAME: usize = 8;
const GROUND_SIZE: f32 = 40.0;

/// Solid volume drawn for a slot.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotCube {
    pub slot_id: SlotId,
}

/// Code plate drawn on an occupied slot.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct CodeGlyph {
    pub slot_id: SlotId,
    pub payload: String,
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mode: Option<Res<ViewMode>>,
    settings: Option<Res<CameraSettings>>,
) {
    let mode = mode.map(|m| *m).unwrap_or_default();
    let settings = settings.map(|s| s.clone()).unwrap_or_default();
    let home = settings.home(mode);

    commands.insert_resource(SlotPalette::new(&mut materials));
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees(mode).to_radians(),
            ..default()
        }),
        Transform::from_translation(home.eye).looking_at(home.target, Vec3::Y),
        ViewCamera,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.95, 0.95),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Drains storage events into the inventory mirror. A successful mutation
/// triggers a fresh fetch of both resources.
pub fn ingest_inventory(mut channel: ResMut<InventoryChannel>, mut inventory: ResMut<Inventory>) {
    let mut received = 0usize;
    while received < MAX_EVENTS_PER_FRAME {
        let Some(event) = channel.try_recv() else {
            break;
        };
        received += 1;
        match inventory.apply(event) {
            Applied::Mutated(mutation) => {
                debug!("scene: {mutation:?} applied, refetching");
                channel.refresh();
            }
            Applied::Stale => debug!("scene: dropped stale storage response"),
            Applied::Changed | Applied::Failed | Applied::Rejected => {}
        }
    }
}

/// Recomputes placements when the mirror moved, then re-resolves the
/// selected box against them.
pub fn rebuild_layout(
    inventory: Res<Inventory>,
    settings: Res<LayoutSettings>,
    mut layout: ResMut<SlotLayout>,
    mut selection: ResMut<Selection>,
) {
    if layout.is_current(inventory.revision()) && !settings.is_changed() {
        return;
    }
    let placements = match inventory.warehouse() {
        Some(warehouse) => build_placements(warehouse, inventory.boxes(), &settings),
        None => Vec::new(),
    };
    debug!("scene: layout rebuilt with {} placements", placements.len());
    layout.replace(placements, inventory.revision());
    selection.refresh(&layout);
}

/// Replaces every slot entity after a layout rebuild.
#[allow(clippy::too_many_arguments)]
pub fn spawn_slot_entities(
    mut commands: Commands,
    layout: Res<SlotLayout>,
    settings: Res<LayoutSettings>,
    renderer: Res<RendererResource>,
    palette: Res<SlotPalette>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    existing: Query<Entity, Or<(With<SlotCube>, With<CodeGlyph>)>>,
    mut spawned_from: Local<Option<u64>>,
) {
    if *spawned_from == Some(layout.revision()) {
        return;
    }
    *spawned_from = Some(layout.revision());

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    for placement in layout.placements() {
        renderer.0.spawn_slot(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut images,
            &palette,
            placement,
            &settings,
        );
    }
}

/// Applies the highlight rule to every slot cube. Runs on selection or
/// layout change and whenever new cubes appear.
pub fn tint_slots(
    layout: Res<SlotLayout>,
    selection: Res<Selection>,
    palette: Res<SlotPalette>,
    mut cubes: Query<(Ref<SlotCube>, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let force = selection.is_changed() || layout.is_changed();
    for (cube, mut material) in &mut cubes {
        if !force && !cube.is_added() {
            continue;
        }
        let Some(placement) = layout.get(cube.slot_id) else {
            continue;
        };
        let handle = palette.handle(Highlight::of(placement, &selection));
        if material.0 != handle {
            material.0 = handle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{seed, BoxRecord, StorageEvent};

    fn layout_app() -> App {
        let mut app = App::new();
        app.init_resource::<Inventory>()
            .init_resource::<LayoutSettings>()
            .init_resource::<SlotLayout>()
            .init_resource::<Selection>()
            .add_systems(Update, rebuild_layout);
        app
    }

    #[test]
    fn layout_follows_inventory() {
        let mut app = layout_app();
        app.update();
        assert!(app.world().resource::<SlotLayout>().placements().is_empty());

        app.world_mut()
            .resource_mut::<Inventory>()
            .apply(StorageEvent::Warehouse {
                seq: 1,
                warehouse: seed::seed_warehouse(1, 1, 3),
            });
        app.update();

        let layout = app.world().resource::<SlotLayout>();
        assert_eq!(layout.placements().len(), 3);
        assert_eq!(layout.occupied_count(), 0);
    }

    #[test]
    fn rebuild_refreshes_selected_box() {
        let mut app = layout_app();
        let warehouse = seed::seed_warehouse(1, 1, 2);
        let slot_id = warehouse.racks[0].levels[0].slots[0].id;
        {
            let mut inventory = app.world_mut().resource_mut::<Inventory>();
            inventory.apply(StorageEvent::Warehouse { seq: 1, warehouse });
        }
        app.update();
        let placement = app.world().resource::<SlotLayout>().get(slot_id).cloned().unwrap();
        app.world_mut().resource_mut::<Selection>().select(&placement);

        app.world_mut().resource_mut::<Inventory>().apply(StorageEvent::Boxes {
            seq: 1,
            boxes: vec![BoxRecord {
                id: 11,
                box_code: "BOX-0000000B".into(),
                product_name: Some("Bolt".into()),
                quantity: 3,
                slot_id: Some(slot_id),
            }],
        });
        app.update();

        let selection = app.world().resource::<Selection>();
        assert_eq!(selection.slot_id(), Some(slot_id));
        assert_eq!(selection.occupant().map(|b| b.id), Some(11));
    }

    #[test]
    fn setup_scene_spawns_camera_light_and_palette() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Startup, setup_scene);
        app.update();

        assert!(app.world().get_resource::<SlotPalette>().is_some());
        let world = app.world_mut();
        assert_eq!(world.query::<&ViewCamera>().iter(world).count(), 1);
        assert!(world.query::<&DirectionalLight>().iter(world).count() >= 1);
    }
}
