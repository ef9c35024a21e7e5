//! Shared highlight materials for slot volumes.

use bevy::prelude::*;

use crate::selection::Highlight;

/// One material per highlight rule, shared by every slot cube so retinting
/// is a handle swap.
#[derive(Resource, Clone, Debug, Default)]
pub struct SlotPalette {
    pub selected: Handle<StandardMaterial>,
    pub occupied: Handle<StandardMaterial>,
    pub empty: Handle<StandardMaterial>,
}

impl SlotPalette {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            selected: materials.add(highlight_material(Highlight::Selected)),
            occupied: materials.add(highlight_material(Highlight::Occupied)),
            empty: materials.add(highlight_material(Highlight::Empty)),
        }
    }

    pub fn handle(&self, highlight: Highlight) -> Handle<StandardMaterial> {
        match highlight {
            Highlight::Selected => self.selected.clone(),
            Highlight::Occupied => self.occupied.clone(),
            Highlight::Empty => self.empty.clone(),
        }
    }
}

fn highlight_material(highlight: Highlight) -> StandardMaterial {
    let emissive = match highlight {
        Highlight::Selected => {
            let lin = highlight.color().to_linear();
            LinearRgba::rgb(lin.red * 0.4, lin.green * 0.4, lin.blue * 0.4)
        }
        _ => LinearRgba::BLACK,
    };
    StandardMaterial {
        base_color: highlight.color(),
        emissive,
        perceptual_roughness: 0.8,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_keeps_one_handle_per_rule() {
        let mut materials = Assets::<StandardMaterial>::default();
        let palette = SlotPalette::new(&mut materials);

        assert_eq!(materials.len(), 3);
        assert_ne!(palette.handle(Highlight::Selected), palette.handle(Highlight::Empty));
        let occupied = materials.get(&palette.handle(Highlight::Occupied)).unwrap();
        assert_eq!(occupied.base_color, Highlight::Occupied.color());
    }
}
