//! Static axis-aligned obstacles derived from slot placements.

use bevy::math::Vec3;

use crate::layout::{Placement, SlotLayout};

/// Axis-aligned box volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub min: Vec3,
    pub max: Vec3,
}

impl Collider {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Grows every face outward by `margin`.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// One collider per placement, sized `box_size`.
pub fn build_colliders(placements: &[Placement], box_size: Vec3) -> Vec<Collider> {
    placements
        .iter()
        .map(|p| Collider::from_center_size(p.position, box_size))
        .collect()
}

/// True if `point`, treated as a sphere of radius `clearance`, touches any collider.
pub fn is_blocked(colliders: &[Collider], point: Vec3, clearance: f32) -> bool {
    colliders
        .iter()
        .any(|collider| collider.expanded(clearance).contains(point))
}

/// Colliders memoized on the layout revision they were built from.
#[derive(bevy::prelude::Resource, Debug, Default)]
pub struct ColliderCache {
    volumes: Vec<Collider>,
    built_from: Option<u64>,
}

impl ColliderCache {
    /// Returns the colliders for `layout`, rebuilding only if its revision moved.
    pub fn sync(&mut self, layout: &SlotLayout, box_size: Vec3) -> &[Collider] {
        if self.built_from != Some(layout.revision()) {
            self.volumes = build_colliders(layout.placements(), box_size);
            self.built_from = Some(layout.revision());
        }
        &self.volumes
    }

    pub fn volumes(&self) -> &[Collider] {
        &self.volumes
    }

    pub fn built_from(&self) -> Option<u64> {
        self.built_from
    }

    /// Drops the volumes, e.g. when leaving walk mode.
    pub fn clear(&mut self) {
        self.volumes.clear();
        self.built_from = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_faces() {
        let collider = Collider::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.5));
        assert!(collider.contains(Vec3::new(0.5, 0.0, 0.0)));
        assert!(!collider.contains(Vec3::new(0.51, 0.0, 0.0)));
    }

    #[test]
    fn clearance_expands_every_axis() {
        let collider = Collider::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.5));
        let colliders = [collider];
        assert!(is_blocked(&colliders, Vec3::new(0.6, 0.0, 0.0), 0.15));
        assert!(is_blocked(&colliders, Vec3::new(0.0, 0.35, 0.0), 0.15));
        assert!(!is_blocked(&colliders, Vec3::new(0.0, 0.0, 0.45), 0.15));
    }

    #[test]
    fn cache_rebuilds_only_on_new_revision() {
        let mut layout = SlotLayout::default();
        let mut cache = ColliderCache::default();
        let size = Vec3::ONE;

        layout.replace(Vec::new(), 1);
        assert!(cache.sync(&layout, size).is_empty());
        assert_eq!(cache.built_from(), Some(1));

        let placement = Placement {
            slot_id: 1,
            slot_code: "S1".into(),
            rack_code: "R1".into(),
            level_number: 1,
            position: Vec3::ZERO,
            occupant: None,
        };
        layout.replace(vec![placement], 2);
        assert_eq!(cache.sync(&layout, size).len(), 1);
        assert_eq!(cache.built_from(), Some(2));

        cache.clear();
        assert!(cache.volumes().is_empty());
    }
}
