//! First-person walk controller.
//!
//! `step` is a pure function of the current pose, the movement intent and the
//! frame time. Translation is tested against the static colliders as a point
//! with clearance; a move that would end inside any of them is dropped whole
//! for that frame.

use bevy::input::keyboard::KeyCode;
use bevy::math::Vec3;

use crate::camera::orbit::CameraPose;
use crate::collider::{is_blocked, Collider};

/// Logical movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    /// WASD and their arrow-key aliases.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Self::Forward),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Self::Backward),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Self::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// Movement flags, set on key-down and cleared on key-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    /// Applies a raw key edge; returns false for keys that do not move.
    pub fn apply_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match MoveKey::from_key_code(code) {
            Some(key) => {
                self.set(key, pressed);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    pub fn forward_sign(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward))
    }

    pub fn strafe_sign(&self) -> f32 {
        f32::from(u8::from(self.right)) - f32::from(u8::from(self.left))
    }
}

/// Walking speed in units per second and the camera's collision radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkSettings {
    pub speed: f32,
    pub clearance: f32,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            speed: 6.0,
            clearance: 0.15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Idle,
    Moved,
    Blocked,
}

/// Result of one controller step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub pose: CameraPose,
    pub outcome: StepOutcome,
}

/// Forward and right unit vectors on the walking plane. Zero when looking straight down.
pub fn horizontal_basis(pose: &CameraPose) -> (Vec3, Vec3) {
    let mut forward = pose.target - pose.eye;
    forward.y = 0.0;
    let forward = forward.normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Advances the walk controller by `dt` seconds.
pub fn step(
    pose: CameraPose,
    intent: &MoveIntent,
    dt: f32,
    colliders: &[Collider],
    settings: &WalkSettings,
) -> Step {
    let idle = Step {
        pose,
        outcome: StepOutcome::Idle,
    };
    if intent.is_idle() {
        return idle;
    }

    let (forward, right) = horizontal_basis(&pose);
    let raw = forward * intent.forward_sign() + right * intent.strafe_sign();
    if raw.length_squared() == 0.0 {
        return idle;
    }
    let delta = raw.normalize() * settings.speed * dt;

    let candidate = pose.eye + delta;
    if is_blocked(colliders, candidate, settings.clearance) {
        return Step {
            pose,
            outcome: StepOutcome::Blocked,
        };
    }

    Step {
        pose: pose.translated(delta),
        outcome: StepOutcome::Moved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 1.6, 10.0), Vec3::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn arrow_keys_alias_wasd() {
        let mut intent = MoveIntent::default();
        assert!(intent.apply_key(KeyCode::ArrowUp, true));
        assert!(intent.forward);
        assert!(intent.apply_key(KeyCode::KeyW, false));
        assert!(intent.is_idle());
        assert!(!intent.apply_key(KeyCode::Space, true));
        assert!(intent.is_idle());
    }

    #[test]
    fn opposite_keys_cancel() {
        let intent = MoveIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };
        let result = step(pose(), &intent, 0.1, &[], &WalkSettings::default());
        assert_eq!(result.outcome, StepOutcome::Idle);
        assert_eq!(result.pose, pose());
    }

    #[test]
    fn forward_ignores_pitch() {
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        let result = step(pose(), &intent, 0.5, &[], &WalkSettings::default());
        assert_eq!(result.outcome, StepOutcome::Moved);
        assert!((result.pose.eye.y - 1.6).abs() < 1e-6);
        assert!((result.pose.eye.z - 7.0).abs() < 1e-5);
    }

    #[test]
    fn strafe_right_follows_cross_product() {
        let intent = MoveIntent {
            right: true,
            ..Default::default()
        };
        // Looking toward -Z, forward × up points to +X.
        let result = step(pose(), &intent, 1.0, &[], &WalkSettings::default());
        assert!((result.pose.eye.x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn diagonal_is_normalized() {
        let intent = MoveIntent {
            forward: true,
            left: true,
            ..Default::default()
        };
        let result = step(pose(), &intent, 1.0, &[], &WalkSettings::default());
        let moved = result.pose.eye - pose().eye;
        assert!((moved.length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn looking_straight_down_does_not_move() {
        let down = CameraPose::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        let intent = MoveIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let result = step(down, &intent, 1.0, &[], &WalkSettings::default());
        assert_eq!(result.outcome, StepOutcome::Idle);
    }
}
