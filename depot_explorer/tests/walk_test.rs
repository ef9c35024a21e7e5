use bevy::math::Vec3;
use depot_explorer::camera::orbit::CameraPose;
use depot_explorer::camera::walk::{step, MoveIntent, StepOutcome, WalkSettings};
use depot_explorer::collider::{build_colliders, is_blocked, Collider};
use depot_explorer::data::seed::seed_warehouse;
use depot_explorer::layout::{build_placements, LayoutSettings};

fn origin_box() -> Vec<Collider> {
    vec![Collider::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.5))]
}

#[test]
fn clearance_rejects_inside_and_accepts_outside() {
    let colliders = origin_box();
    assert!(is_blocked(&colliders, Vec3::ZERO, 0.15));
    assert!(!is_blocked(&colliders, Vec3::new(2.0, 0.0, 0.0), 0.15));
}

#[test]
fn move_into_a_box_is_rejected_whole() {
    let settings = WalkSettings::default();
    // One 0.1s step forward at speed 6 covers 0.6 units, ending inside the
    // box's clearance shell.
    let pose = CameraPose::new(Vec3::new(0.0, 0.0, 0.95), Vec3::new(0.0, 0.0, -5.0));
    let intent = MoveIntent {
        forward: true,
        ..Default::default()
    };

    let result = step(pose, &intent, 0.1, &origin_box(), &settings);

    assert_eq!(result.outcome, StepOutcome::Blocked);
    assert_eq!(result.pose, pose);
}

#[test]
fn free_move_translates_eye_and_target_together() {
    let settings = WalkSettings::default();
    let pose = CameraPose::new(Vec3::new(0.0, 1.6, 10.0), Vec3::new(0.0, 1.6, 0.0));
    let intent = MoveIntent {
        forward: true,
        right: true,
        ..Default::default()
    };

    let result = step(pose, &intent, 0.5, &origin_box(), &settings);

    assert_eq!(result.outcome, StepOutcome::Moved);
    let moved = result.pose.eye - pose.eye;
    assert!((moved.length() - 3.0).abs() < 1e-5);
    assert!(moved.y.abs() < 1e-6);
    assert!((result.pose.target - pose.target).abs_diff_eq(moved, 1e-5));
}

#[test]
fn idle_controller_never_moves() {
    let warehouse = seed_warehouse(5, 4, 5);
    let settings = LayoutSettings::default();
    let colliders = build_colliders(
        &build_placements(&warehouse, &[], &settings),
        settings.box_size(),
    );
    let mut pose = CameraPose::new(Vec3::new(4.0, 1.6, 15.0), Vec3::ZERO);
    let start = pose;

    for _ in 0..600 {
        let result = step(pose, &MoveIntent::default(), 1.0 / 60.0, &colliders, &WalkSettings::default());
        assert_eq!(result.outcome, StepOutcome::Idle);
        pose = result.pose;
    }

    assert_eq!(pose, start);
}

#[test]
fn opposite_keys_cancel_out() {
    let pose = CameraPose::new(Vec3::new(0.0, 1.6, 10.0), Vec3::ZERO);
    let intent = MoveIntent {
        forward: true,
        backward: true,
        ..Default::default()
    };

    let result = step(pose, &intent, 0.1, &[], &WalkSettings::default());

    assert_eq!(result.pose, pose);
    assert_ne!(result.outcome, StepOutcome::Moved);
}
