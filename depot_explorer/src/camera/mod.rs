//! Camera rig: orbit look for the overview, orbit look plus collision-checked
//! walking for walk mode.

pub mod orbit;
pub mod walk;

use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowFocused;

use crate::collider::ColliderCache;
use crate::layout::{LayoutSettings, SlotLayout};
use crate::view::{InputCapture, ViewMode};

use orbit::{constrain, CameraPose, OrbitLimits};
use walk::{MoveIntent, StepOutcome, WalkSettings};

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.9;
const PIXELS_PER_LINE: f32 = 100.0;

/// Marker for the single scene camera.
#[derive(Component)]
pub struct ViewCamera;

/// Per-mode camera tuning.
#[derive(Resource, Clone, Debug)]
pub struct CameraSettings {
    pub walk: WalkSettings,
    pub overview_home: CameraPose,
    pub walk_home: CameraPose,
    pub overview_fov_degrees: f32,
    pub walk_fov_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            walk: WalkSettings::default(),
            overview_home: CameraPose::new(Vec3::new(12.0, 8.0, 20.0), Vec3::ZERO),
            walk_home: CameraPose::new(Vec3::new(4.0, 1.6, 15.0), Vec3::ZERO),
            overview_fov_degrees: 50.0,
            walk_fov_degrees: 75.0,
        }
    }
}

impl CameraSettings {
    pub fn home(&self, mode: ViewMode) -> CameraPose {
        match mode {
            ViewMode::Walk => constrain(self.walk_home, &OrbitLimits::walk()),
            _ => self.overview_home,
        }
    }

    pub fn limits(&self, mode: ViewMode) -> OrbitLimits {
        match mode {
            ViewMode::Walk => OrbitLimits::walk(),
            _ => OrbitLimits::overview(),
        }
    }

    pub fn fov_degrees(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Walk => self.walk_fov_degrees,
            _ => self.overview_fov_degrees,
        }
    }
}

/// Live camera state shared by the input and step systems.
#[derive(Resource, Clone, Debug)]
pub struct CameraRig {
    pub pose: CameraPose,
    pub limits: OrbitLimits,
    pub intent: MoveIntent,
    pub last_outcome: StepOutcome,
}

impl CameraRig {
    pub fn for_mode(settings: &CameraSettings, mode: ViewMode) -> Self {
        Self {
            pose: settings.home(mode),
            limits: settings.limits(mode),
            intent: MoveIntent::default(),
            last_outcome: StepOutcome::Idle,
        }
    }
}

pub fn camera_plugin(app: &mut App) {
    let settings = app
        .world()
        .get_resource::<CameraSettings>()
        .cloned()
        .unwrap_or_default();
    let mode = app
        .world()
        .get_resource::<ViewMode>()
        .copied()
        .unwrap_or_default();

    app.insert_resource(CameraRig::for_mode(&settings, mode))
        .insert_resource(settings)
        .init_resource::<ColliderCache>()
        .add_systems(
            Update,
            (
                reset_rig_on_mode_change,
                track_move_keys,
                orbit_input_system,
                walk_step_system,
                apply_camera_pose,
            )
                .chain(),
        );
}

/// Puts the camera at the new mode's home pose and drops any held movement.
pub fn reset_rig_on_mode_change(
    mode: Res<ViewMode>,
    settings: Res<CameraSettings>,
    mut rig: ResMut<CameraRig>,
    mut colliders: ResMut<ColliderCache>,
    mut projections: Query<&mut Projection, With<ViewCamera>>,
) {
    if !mode.is_changed() {
        return;
    }
    *rig = CameraRig::for_mode(&settings, *mode);
    if *mode != ViewMode::Walk {
        colliders.clear();
    }
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.fov = settings.fov_degrees(*mode).to_radians();
        }
    }
    debug!("camera: switched to {} view", mode.label());
}

/// Edge-triggered movement flags. Focus loss clears everything.
pub fn track_move_keys(
    mut keys: EventReader<KeyboardInput>,
    mut focus: EventReader<WindowFocused>,
    capture: Option<Res<InputCapture>>,
    mut rig: ResMut<CameraRig>,
) {
    let keyboard_captured = capture.is_some_and(|c| c.keyboard);
    for event in keys.read() {
        let pressed = event.state.is_pressed();
        // Releases always go through so a key held into a text field cannot stick.
        if pressed && keyboard_captured {
            continue;
        }
        rig.intent.apply_key(event.key_code, pressed);
    }
    if focus.read().any(|event| !event.focused) {
        rig.intent.clear();
    }
}

/// Left-drag rotates, right-drag pans (overview only), wheel zooms.
/// Never collision-checked.
pub fn orbit_input_system(
    mode: Res<ViewMode>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    capture: Option<Res<InputCapture>>,
    mut rig: ResMut<CameraRig>,
) {
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / PIXELS_PER_LINE,
        })
        .sum();

    if !mode.shows_scene() || capture.is_some_and(|c| c.pointer) {
        return;
    }

    let limits = rig.limits;
    let mut pose = rig.pose;
    if mouse.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        pose = orbit::orbit(
            pose,
            -drag.x * ROTATE_SENSITIVITY,
            -drag.y * ROTATE_SENSITIVITY,
            &limits,
        );
    }
    if mouse.pressed(MouseButton::Right) && drag != Vec2::ZERO {
        pose = orbit::pan(pose, drag, &limits);
    }
    if scroll != 0.0 {
        pose = orbit::zoom(pose, ZOOM_STEP.powf(scroll), &limits);
    }
    if pose != rig.pose {
        rig.pose = pose;
    }
}

/// Runs one walk-controller step per frame in walk mode.
pub fn walk_step_system(
    mode: Res<ViewMode>,
    time: Res<Time>,
    layout: Res<SlotLayout>,
    layout_settings: Res<LayoutSettings>,
    settings: Res<CameraSettings>,
    mut colliders: ResMut<ColliderCache>,
    mut rig: ResMut<CameraRig>,
) {
    if *mode != ViewMode::Walk {
        return;
    }
    let volumes = colliders.sync(&layout, layout_settings.box_size());
    let result = walk::step(
        rig.pose,
        &rig.intent,
        time.delta_secs(),
        volumes,
        &settings.walk,
    );
    if result.outcome != rig.last_outcome {
        rig.last_outcome = result.outcome;
    }
    if result.outcome == StepOutcome::Moved {
        rig.pose = result.pose;
    }
}

/// Copies the rig pose onto the camera transform.
pub fn apply_camera_pose(
    rig: Res<CameraRig>,
    mut cameras: Query<&mut Transform, With<ViewCamera>>,
) {
    if !rig.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(rig.pose.eye).looking_at(rig.pose.target, Vec3::Y);
    }
}
