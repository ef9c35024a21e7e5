//! Renderer traits and default implementations.

mod cubes;
pub mod glyph;

use bevy::prelude::*;

use crate::collider::Collider;
use crate::layout::{LayoutSettings, Placement};
use crate::scene::SlotPalette;

pub use cubes::{CubeRenderSettings, CubesRenderer, GlyphSettings};

/// Turns one placement into scene entities. The scene despawns everything
/// tagged `SlotCube`/`CodeGlyph` before a rebuild, so implementations must
/// tag what they spawn.
pub trait SlotRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}

    #[allow(clippy::too_many_arguments)]
    fn spawn_slot(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        images: &mut Assets<Image>,
        palette: &SlotPalette,
        placement: &Placement,
        layout: &LayoutSettings,
    );

    /// World-space bounds of the code glyph, if this renderer draws one for
    /// the placement. Used for picking.
    fn glyph_bounds(&self, _placement: &Placement, _layout: &LayoutSettings) -> Option<Collider> {
        None
    }
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn SlotRenderer>);

impl RendererResource {
    pub fn new(renderer: impl SlotRenderer) -> Self {
        Self(Box::new(renderer))
    }
}
