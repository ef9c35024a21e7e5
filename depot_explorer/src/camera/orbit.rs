//! Orbit look control: rotate and zoom the eye around a look target.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use bevy::math::{Vec2, Vec3};

const PAN_SCALE: f32 = 0.002;
const POLAR_EPSILON: f32 = 1e-3;

/// Camera eye and the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    pub fn look_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Moves eye and target together.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            eye: self.eye + delta,
            target: self.target + delta,
        }
    }
}

/// Bounds on the orbit: polar angle from +Y, eye distance, and whether panning is allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub allow_pan: bool,
}

impl OrbitLimits {
    /// Free orbit with pan, used by the overview.
    pub fn overview() -> Self {
        Self {
            min_polar: POLAR_EPSILON,
            max_polar: PI - POLAR_EPSILON,
            min_distance: 2.0,
            max_distance: 80.0,
            allow_pan: true,
        }
    }

    /// Eye-level orbit for walking: never below the target, never steeper than 45°.
    pub fn walk() -> Self {
        Self {
            min_polar: FRAC_PI_4,
            max_polar: FRAC_PI_2,
            min_distance: 1.0,
            max_distance: 40.0,
            allow_pan: false,
        }
    }
}

/// Rotates the eye around the target by `yaw` (about +Y) and `pitch` (polar angle).
pub fn orbit(pose: CameraPose, yaw: f32, pitch: f32, limits: &OrbitLimits) -> CameraPose {
    let offset = pose.eye - pose.target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return pose;
    }
    let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
    let azimuth = offset.x.atan2(offset.z);

    let polar = (polar + pitch).clamp(limits.min_polar, limits.max_polar);
    let azimuth = azimuth + yaw;

    CameraPose {
        eye: pose.target + spherical(radius, polar, azimuth),
        target: pose.target,
    }
}

/// Scales the eye distance by `factor`, clamped to the limits.
pub fn zoom(pose: CameraPose, factor: f32, limits: &OrbitLimits) -> CameraPose {
    let offset = pose.eye - pose.target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return pose;
    }
    let radius = (radius * factor).clamp(limits.min_distance, limits.max_distance);
    CameraPose {
        eye: pose.target + offset.normalize() * radius,
        target: pose.target,
    }
}

/// Slides eye and target across the view plane. No-op when panning is disabled.
pub fn pan(pose: CameraPose, drag: Vec2, limits: &OrbitLimits) -> CameraPose {
    if !limits.allow_pan {
        return pose;
    }
    let forward = pose.look_direction();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    let up = right.cross(forward).normalize_or_zero();
    let scale = pose.distance() * PAN_SCALE;
    pose.translated((-drag.x * right + drag.y * up) * scale)
}

/// Clamps an arbitrary pose into the limits without changing its azimuth.
pub fn constrain(pose: CameraPose, limits: &OrbitLimits) -> CameraPose {
    zoom(orbit(pose, 0.0, 0.0, limits), 1.0, limits)
}

fn spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    Vec3::new(
        radius * sin_polar * sin_az,
        radius * cos_polar,
        radius * sin_polar * cos_az,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn orbit_preserves_distance_and_target() {
        let pose = CameraPose::new(Vec3::new(0.0, 3.0, 4.0), Vec3::ZERO);
        let turned = orbit(pose, 0.7, 0.1, &OrbitLimits::overview());
        assert!((turned.distance() - 5.0).abs() < 1e-4);
        assert_eq!(turned.target, Vec3::ZERO);
    }

    #[test]
    fn walk_limits_keep_eye_at_or_above_target() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let lowered = orbit(pose, 0.0, 1.0, &OrbitLimits::walk());
        assert!(lowered.eye.y >= -1e-4);

        let raised = orbit(pose, 0.0, -3.0, &OrbitLimits::walk());
        let polar = ((raised.eye.y) / raised.distance()).acos();
        assert!((polar - FRAC_PI_4).abs() < 1e-4);
    }

    #[test]
    fn quarter_turn_yaw_moves_eye_to_side() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let turned = orbit(pose, FRAC_PI_2, 0.0, &OrbitLimits::walk());
        assert!(approx(turned.eye, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn zoom_is_clamped() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let limits = OrbitLimits::walk();
        assert!((zoom(pose, 0.01, &limits).distance() - limits.min_distance).abs() < 1e-4);
        assert!((zoom(pose, 100.0, &limits).distance() - limits.max_distance).abs() < 1e-4);
        assert!((zoom(pose, 0.5, &limits).distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_rigidly_and_respects_limits() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let panned = pan(pose, Vec2::new(100.0, 0.0), &OrbitLimits::overview());
        assert!(approx(panned.eye - panned.target, pose.eye - pose.target));
        assert!(panned.target.x.abs() > 0.0);

        let unmoved = pan(pose, Vec2::new(100.0, 0.0), &OrbitLimits::walk());
        assert_eq!(unmoved, pose);
    }
}
