//! Map layers
//!
//! The map is a stack of same-sized grids. Each layer decides what its
//! cells become: tiles with a graphic and group membership, or enemy
//! spawn points.

mod layer;

use std::path::Path;
use crate::asset::{GameSprites, Image};
use crate::game::components::{Groups, TileKind};

use layer::load_layer;
pub use layer::{LayerError, Layout};

/// Cell value that places nothing
pub const EMPTY_CELL: i32 = -1;

/// Entity layer code for the player start. The player always spawns at the
/// configured point, so this marker is skipped.
pub const PLAYER_MARKER: i32 = 394;

/// How a tile layer picks its graphic
#[derive(Debug, Clone)]
pub enum TileGraphic {
    /// No image; the tile only blocks
    Invisible,
    /// Uniformly random choice per tile
    Random(Vec<Image>),
    /// Cell value indexes the sequence
    Indexed(Vec<Image>),
}

#[derive(Debug, Clone)]
pub enum LayerRole {
    Tiles { kind: TileKind, graphic: TileGraphic, groups: Groups },
    /// Cells are enemy species codes
    Entities,
}

#[derive(Debug, Clone)]
pub struct LayerDefinition {
    pub name: String,
    pub layout: Layout,
    pub role: LayerRole,
}

impl LayerDefinition {
    /// Check every non-empty cell resolves to something placeable
    pub fn validate(&self) -> Result<(), LayerError> {
        let LayerRole::Tiles { graphic, .. } = &self.role else { return Ok(()) };
        let TileGraphic::Indexed(images) = graphic else { return Ok(()) };

        for (row, cells) in self.layout.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == EMPTY_CELL {
                    continue;
                }
                if value < 0 || value as usize >= images.len() {
                    return Err(LayerError::GraphicIndex {
                        layer: self.name.clone(),
                        row,
                        col,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// The game's layer stack, read from `<map_dir>/map_*.csv`.
/// The entities layer is optional; the rest are required.
pub fn standard_layers(map_dir: &Path, sprites: &GameSprites) -> Result<Vec<LayerDefinition>, LayerError> {
    let mut layers = vec![
        LayerDefinition {
            name: "boundary".to_string(),
            layout: load_layer(map_dir.join("map_FloorBlocks.csv"))?,
            role: LayerRole::Tiles {
                kind: TileKind::Boundary,
                graphic: TileGraphic::Invisible,
                groups: Groups::OBSTACLE,
            },
        },
        LayerDefinition {
            name: "grass".to_string(),
            layout: load_layer(map_dir.join("map_Grass.csv"))?,
            role: LayerRole::Tiles {
                kind: TileKind::Grass,
                graphic: TileGraphic::Random(sprites.grass.clone()),
                groups: Groups::VISIBLE_OBSTACLE,
            },
        },
        LayerDefinition {
            name: "object".to_string(),
            layout: load_layer(map_dir.join("map_Objects.csv"))?,
            role: LayerRole::Tiles {
                kind: TileKind::Object,
                graphic: TileGraphic::Indexed(sprites.objects.clone()),
                groups: Groups::VISIBLE_OBSTACLE,
            },
        },
    ];

    let entities = map_dir.join("map_Entities.csv");
    if entities.is_file() {
        layers.push(LayerDefinition {
            name: "entities".to_string(),
            layout: load_layer(&entities)?,
            role: LayerRole::Entities,
        });
    } else {
        println!("[map] no {}, level has no enemies", entities.display());
    }

    for layer in &layers {
        let cells = layer.layout.iter().flatten().filter(|&&v| v != EMPTY_CELL).count();
        println!("[map] {}: {} cells", layer.name, cells);
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use crate::asset::ImageBank;
    use crate::asset::sprites::tests::blank_sprites;

    fn indexed(layout: Layout, images: usize) -> LayerDefinition {
        let mut bank = ImageBank::new();
        LayerDefinition {
            name: "object".to_string(),
            layout,
            role: LayerRole::Tiles {
                kind: TileKind::Object,
                graphic: TileGraphic::Indexed((0..images).map(|_| bank.insert_blank(1, 1)).collect()),
                groups: Groups::VISIBLE_OBSTACLE,
            },
        }
    }

    #[test]
    fn test_validate_index_range() {
        assert!(indexed(vec![vec![-1, 0, 2]], 3).validate().is_ok());
        let err = indexed(vec![vec![-1, -1], vec![0, 3]], 3).validate().unwrap_err();
        assert!(matches!(err, LayerError::GraphicIndex { row: 1, col: 1, value: 3, .. }));
    }

    #[test]
    fn test_negative_index_other_than_empty() {
        let err = indexed(vec![vec![-2]], 3).validate().unwrap_err();
        assert!(matches!(err, LayerError::GraphicIndex { value: -2, .. }));
    }

    #[test]
    fn test_standard_layers_from_disk() {
        let dir = TempDir::new().unwrap();
        for name in ["map_FloorBlocks.csv", "map_Grass.csv", "map_Objects.csv"] {
            std::fs::write(dir.path().join(name), "-1,0\n0,-1\n").unwrap();
        }
        let mut bank = ImageBank::new();
        let sprites = blank_sprites(&mut bank);

        let layers = standard_layers(dir.path(), &sprites).unwrap();
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["boundary", "grass", "object"]);

        std::fs::write(dir.path().join("map_Entities.csv"), "390,-1\n-1,394\n").unwrap();
        let layers = standard_layers(dir.path(), &sprites).unwrap();
        assert!(matches!(layers[3].role, LayerRole::Entities));
    }

    #[test]
    fn test_required_layer_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("map_FloorBlocks.csv"), "-1\n").unwrap();
        let mut bank = ImageBank::new();
        let sprites = blank_sprites(&mut bank);
        assert!(matches!(standard_layers(dir.path(), &sprites), Err(LayerError::Io { .. })));
    }
}
