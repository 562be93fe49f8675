//! Every image the game needs, loaded up front

use std::path::Path;
use crate::game::animation::{AnimationSet, Facing};
use crate::game::combat::{SpellEffect, SPELLS, WEAPONS};
use crate::game::components::Species;
use super::images::{AssetError, Image, ImageBank};

/// Graphics root, relative to the assets directory
pub const GRAPHICS_DIR: &str = "graphics";

#[derive(Debug, Clone)]
pub struct WeaponSprites {
    /// Held sprite per facing, indexed by `Facing::slot`
    pub directional: [Image; 4],
    /// Inventory picture shown in the HUD
    pub full: Image,
}

#[derive(Debug, Clone)]
pub struct GameSprites {
    pub player: AnimationSet,
    /// Indexed by `Species::slot`
    pub monsters: Vec<AnimationSet>,
    /// Same order as `WEAPONS`
    pub weapons: Vec<WeaponSprites>,
    /// Same order as `SPELLS`
    pub spell_icons: Vec<Image>,
    pub ground: Image,
    pub grass: Vec<Image>,
    pub objects: Vec<Image>,
}

impl GameSprites {
    pub fn load(bank: &mut ImageBank, graphics: &Path) -> Result<Self, AssetError> {
        let player = AnimationSet::load_directional(bank, &graphics.join("player"))?;

        let monsters = Species::ALL
            .iter()
            .map(|s| AnimationSet::load_uniform(bank, &graphics.join("monsters").join(s.name())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut weapons = Vec::with_capacity(WEAPONS.len());
        for weapon in &WEAPONS {
            let dir = graphics.join("weapons").join(weapon.name);
            let mut held = |facing: Facing| {
                bank.load_single_image(&dir.join(format!("{}.png", facing.name())))
            };
            // Slot order
            let directional = [
                held(Facing::Up)?,
                held(Facing::Down)?,
                held(Facing::Left)?,
                held(Facing::Right)?,
            ];
            weapons.push(WeaponSprites {
                directional,
                full: bank.load_single_image(&dir.join("full.png"))?,
            });
        }

        let spell_icons = SPELLS
            .iter()
            .map(|spell| bank.load_single_image(&graphics.join(spell_icon_path(spell.effect))))
            .collect::<Result<Vec<_>, _>>()?;

        let sprites = Self {
            player,
            monsters,
            weapons,
            spell_icons,
            ground: bank.load_single_image(&graphics.join("tilemap").join("ground.png"))?,
            grass: bank.load_image_sequence(&graphics.join("grass"))?,
            objects: bank.load_image_sequence(&graphics.join("objects"))?,
        };
        println!(
            "[assets] loaded {} images ({} grass variants, {} objects)",
            bank.len(),
            sprites.grass.len(),
            sprites.objects.len()
        );
        Ok(sprites)
    }

    pub fn monster(&self, species: Species) -> &AnimationSet {
        &self.monsters[species.slot()]
    }

    pub fn weapon(&self, index: usize, facing: Facing) -> Image {
        self.weapons[index].directional[facing.slot()]
    }
}

fn spell_icon_path(effect: SpellEffect) -> &'static str {
    match effect {
        SpellEffect::Flame => "particles/flame/fire.png",
        SpellEffect::Heal => "particles/heal/heal.png",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;
    use crate::game::animation::ActionState;
    use crate::asset::images::tests::write_png;

    /// In-memory sprites with distinct sizes, no files involved
    pub(crate) fn blank_sprites(bank: &mut ImageBank) -> GameSprites {
        let anim = |bank: &mut ImageBank, w: u16| {
            AnimationSet::try_from_fn(|_, _| Ok(vec![bank.insert_blank(w, 64), bank.insert_blank(w, 64)]))
                .unwrap()
        };
        let player = anim(bank, 64);
        let monsters = Species::ALL.iter().map(|_| anim(bank, 60)).collect();
        let weapons = WEAPONS
            .iter()
            .map(|_| WeaponSprites {
                directional: [
                    bank.insert_blank(16, 40),
                    bank.insert_blank(16, 40),
                    bank.insert_blank(40, 16),
                    bank.insert_blank(40, 16),
                ],
                full: bank.insert_blank(30, 30),
            })
            .collect();
        GameSprites {
            player,
            monsters,
            weapons,
            spell_icons: SPELLS.iter().map(|_| bank.insert_blank(20, 20)).collect(),
            ground: bank.insert_blank(128, 128),
            grass: vec![bank.insert_blank(64, 64), bank.insert_blank(64, 64)],
            objects: vec![bank.insert_blank(64, 128), bank.insert_blank(64, 128)],
        }
    }

    fn write_sequence(dir: &Path, count: usize) {
        std::fs::create_dir_all(dir).unwrap();
        for i in 0..count {
            write_png(&dir.join(format!("{}.png", i)), 4, 4);
        }
    }

    fn write_graphics(root: &Path) {
        for facing in Facing::ALL {
            for action in ActionState::ALL {
                write_sequence(&root.join("player").join(format!("{}{}", facing.name(), action.suffix())), 2);
            }
        }
        for species in Species::ALL {
            for action in ActionState::ALL {
                write_sequence(&root.join("monsters").join(species.name()).join(action.name()), 1);
            }
        }
        for weapon in &WEAPONS {
            let dir = root.join("weapons").join(weapon.name);
            std::fs::create_dir_all(&dir).unwrap();
            for name in ["up", "down", "left", "right", "full"] {
                write_png(&dir.join(format!("{}.png", name)), 8, 8);
            }
        }
        for spell in &SPELLS {
            let path = root.join(spell_icon_path(spell.effect));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            write_png(&path, 8, 8);
        }
        std::fs::create_dir_all(root.join("tilemap")).unwrap();
        write_png(&root.join("tilemap").join("ground.png"), 16, 16);
        write_sequence(&root.join("grass"), 3);
        write_sequence(&root.join("objects"), 4);
    }

    #[test]
    fn test_load_full_graphics_tree() {
        let dir = TempDir::new().unwrap();
        write_graphics(dir.path());

        let mut bank = ImageBank::new();
        let sprites = GameSprites::load(&mut bank, dir.path()).unwrap();
        assert_eq!(sprites.monsters.len(), Species::ALL.len());
        assert_eq!(sprites.weapons.len(), WEAPONS.len());
        assert_eq!(sprites.spell_icons.len(), SPELLS.len());
        assert_eq!(sprites.grass.len(), 3);
        assert_eq!(sprites.objects.len(), 4);
        assert_eq!(sprites.player.sequence(Facing::Left, ActionState::Attacking).len(), 2);
        assert_eq!(sprites.ground.width, 16.0);
    }

    #[test]
    fn test_missing_weapon_image_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_graphics(dir.path());
        std::fs::remove_file(dir.path().join("weapons").join("axe").join("left.png")).unwrap();

        let mut bank = ImageBank::new();
        let err = GameSprites::load(&mut bank, dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Missing(p) if p.ends_with("axe/left.png")));
    }
}
