use bevy::prelude::*;

use crate::collider::Collider;
use crate::layout::{LayoutSettings, Placement};
use crate::payload::placement_payload;
use crate::render::glyph::glyph_image;
use crate::render::SlotRenderer;
use crate::scene::{CodeGlyph, SlotCube, SlotPalette};
use crate::selection::Highlight;

#[derive(Clone, Debug)]
pub struct GlyphSettings {
    /// Glyph side as a fraction of the smaller face dimension.
    pub coverage: f32,
    /// Gap between the box face and the glyph plate.
    pub offset: f32,
    /// Depth of the glyph's pick volume.
    pub pick_depth: f32,
}

#[derive(Clone, Debug)]
pub struct CubeRenderSettings {
    pub glyph: GlyphSettings,
    pub draw_glyphs: bool,
}

impl Default for CubeRenderSettings {
    fn default() -> Self {
        Self {
            glyph: GlyphSettings {
                coverage: 0.8,
                offset: 0.002,
                pick_depth: 0.02,
            },
            draw_glyphs: true,
        }
    }
}

/// Draws every slot as a solid cuboid and each labelled box as a code glyph
/// plate on the cuboid's front (+Z) face.
#[derive(Default)]
pub struct CubesRenderer {
    pub settings: CubeRenderSettings,
}

impl CubesRenderer {
    fn glyph_side(&self, layout: &LayoutSettings) -> f32 {
        layout.box_width.min(layout.box_height) * self.settings.glyph.coverage
    }

    fn glyph_center(&self, placement: &Placement, layout: &LayoutSettings) -> Vec3 {
        placement.position + Vec3::Z * (layout.box_depth / 2.0 + self.settings.glyph.offset)
    }

    fn glyph_payload(&self, placement: &Placement) -> Option<String> {
        if !self.settings.draw_glyphs {
            return None;
        }
        let occupant = placement.occupant.as_ref()?;
        if occupant.box_code.trim().is_empty() {
            return None;
        }
        placement_payload(placement)
    }
}

impl SlotRenderer for CubesRenderer {
    fn spawn_slot(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        images: &mut Assets<Image>,
        palette: &SlotPalette,
        placement: &Placement,
        layout: &LayoutSettings,
    ) {
        let size = layout.box_size();
        let initial = if placement.is_occupied() {
            Highlight::Occupied
        } else {
            Highlight::Empty
        };

        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(palette.handle(initial)),
            Transform::from_translation(placement.position),
            Visibility::Visible,
            SlotCube {
                slot_id: placement.slot_id,
            },
        ));

        let Some(payload) = self.glyph_payload(placement) else {
            return;
        };
        let image = match glyph_image(&payload) {
            Ok(image) => image,
            Err(error) => {
                warn!("render: no code glyph for slot {}: {error}", placement.slot_id);
                return;
            }
        };
        let side = self.glyph_side(layout);
        let texture = images.add(image);
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(meshes.add(Rectangle::new(side, side))),
            MeshMaterial3d(material),
            Transform::from_translation(self.glyph_center(placement, layout)),
            Visibility::Visible,
            CodeGlyph {
                slot_id: placement.slot_id,
                payload,
            },
        ));
    }

    fn glyph_bounds(&self, placement: &Placement, layout: &LayoutSettings) -> Option<Collider> {
        self.glyph_payload(placement)?;
        let side = self.glyph_side(layout);
        Some(Collider::from_center_size(
            self.glyph_center(placement, layout),
            Vec3::new(side, side, self.settings.glyph.pick_depth),
        ))
    }
}
