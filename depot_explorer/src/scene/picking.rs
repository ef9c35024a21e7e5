//! Pointer picking against slot volumes and code glyphs.
//!
//! Uses manual ray-AABB tests over the current layout instead of mesh
//! picking, so egui keeps its own pointer handling.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::ViewCamera;
use crate::collider::Collider;
use crate::data::SlotId;
use crate::layout::{LayoutSettings, SlotLayout};
use crate::render::RendererResource;
use crate::selection::SlotPicked;
use crate::view::{InputCapture, ViewMode};

/// Cursor travel (px) between press and release beyond which the gesture
/// counts as a drag, not a click.
const CLICK_SLOP: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickKind {
    Slot,
    Glyph,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickCandidate {
    pub slot_id: SlotId,
    pub bounds: Collider,
    pub kind: PickKind,
}

pub fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = 1.0 / dir;
    let t1 = (aabb_min - origin) * inv_dir;
    let t2 = (aabb_max - origin) * inv_dir;
    let t_min = t1.min(t2);
    let t_max = t1.max(t2);
    let t_enter = t_min.x.max(t_min.y).max(t_min.z);
    let t_exit = t_max.x.min(t_max.y).min(t_max.z);
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}

/// Nearest hit along the ray. A glyph wins a tie with a slot volume.
pub fn pick_slot(origin: Vec3, dir: Vec3, candidates: &[PickCandidate]) -> Option<SlotId> {
    let mut best: Option<(SlotId, f32)> = None;

    for candidate in candidates.iter().filter(|c| c.kind == PickKind::Slot) {
        if let Some(dist) = ray_aabb_intersect(origin, dir, candidate.bounds.min, candidate.bounds.max) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((candidate.slot_id, dist));
            }
        }
    }

    for candidate in candidates.iter().filter(|c| c.kind == PickKind::Glyph) {
        if let Some(dist) = ray_aabb_intersect(origin, dir, candidate.bounds.min, candidate.bounds.max) {
            if best.is_none_or(|(_, d)| dist <= d) {
                best = Some((candidate.slot_id, dist));
            }
        }
    }

    best.map(|(slot_id, _)| slot_id)
}

/// Slot volumes plus whatever glyph bounds the renderer reports.
pub fn pick_candidates(
    layout: &SlotLayout,
    settings: &LayoutSettings,
    renderer: Option<&RendererResource>,
) -> Vec<PickCandidate> {
    let size = settings.box_size();
    let mut candidates = Vec::with_capacity(layout.placements().len() * 2);
    for placement in layout.placements() {
        candidates.push(PickCandidate {
            slot_id: placement.slot_id,
            bounds: Collider::from_center_size(placement.position, size),
            kind: PickKind::Slot,
        });
        if let Some(bounds) = renderer.and_then(|r| r.0.glyph_bounds(placement, settings)) {
            candidates.push(PickCandidate {
                slot_id: placement.slot_id,
                bounds,
                kind: PickKind::Glyph,
            });
        }
    }
    candidates
}

#[allow(clippy::too_many_arguments)]
pub fn click_pick_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mode: Res<ViewMode>,
    capture: Option<Res<InputCapture>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ViewCamera>>,
    layout: Res<SlotLayout>,
    settings: Res<LayoutSettings>,
    renderer: Option<Res<RendererResource>>,
    mut pressed_at: Local<Option<Vec2>>,
    mut picks: EventWriter<SlotPicked>,
) {
    if !mode.shows_scene() {
        *pressed_at = None;
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left) {
        *pressed_at = if capture.is_some_and(|c| c.pointer) {
            None
        } else {
            cursor
        };
    }
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let (Some(start), Some(cursor)) = (pressed_at.take(), cursor) else {
        return;
    };
    if start.distance(cursor) > CLICK_SLOP {
        return;
    }

    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, cursor) else {
        return;
    };

    let candidates = pick_candidates(&layout, &settings, renderer.as_deref());
    if let Some(slot_id) = pick_slot(ray.origin, *ray.direction, &candidates) {
        picks.send(SlotPicked { slot_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(slot_id: SlotId, center: Vec3) -> PickCandidate {
        PickCandidate {
            slot_id,
            bounds: Collider::from_center_size(center, Vec3::new(1.0, 0.5, 0.5)),
            kind: PickKind::Slot,
        }
    }

    #[test]
    fn ray_hits_box_in_front_and_misses_behind() {
        let hit = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-0.5), Vec3::splat(0.5));
        assert!((hit.unwrap() - 4.5).abs() < 1e-5);
        let miss = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::splat(-0.5), Vec3::splat(0.5));
        assert!(miss.is_none());
    }

    #[test]
    fn nearest_slot_wins() {
        let candidates = [slot(1, Vec3::new(0.0, 0.0, 0.0)), slot(2, Vec3::new(0.0, 0.0, 2.0))];
        let picked = pick_slot(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, &candidates);
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn glyph_wins_tie_with_slot() {
        let glyph = PickCandidate {
            slot_id: 9,
            bounds: Collider {
                min: Vec3::new(-0.2, -0.2, 0.25),
                max: Vec3::new(0.2, 0.2, 0.27),
            },
            kind: PickKind::Glyph,
        };
        let mut behind = slot(3, Vec3::ZERO);
        behind.bounds.max.z = 0.27;
        let picked = pick_slot(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, &[glyph, behind]);
        assert_eq!(picked, Some(9));
    }

    #[test]
    fn empty_scene_picks_nothing() {
        assert_eq!(pick_slot(Vec3::ZERO, Vec3::NEG_Z, &[]), None);
    }
}
