//! Block kinds and their properties
//!
//! Solidity, mining health and color all come from one lookup table so
//! collision and mining share a single data-driven rule.

use serde::{Deserialize, Serialize};

/// Sky color drawn behind `Air`
pub const SKY_COLOR: u32 = 0x87CEEB;

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockKind {
    #[default]
    Air = 0,
    Dirt = 1,
    Grass = 2,
    Stone = 3,
    Lava = 4,
    Wood = 5,
    Leaves = 6,
    Bedrock = 7,
}

/// How many ticks of mining a block takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hardness {
    /// Nothing to mine
    Empty,
    Ticks(u32),
    Unbreakable,
}

/// Static per-kind properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProps {
    /// Blocks entity movement
    pub solid: bool,
    pub hardness: Hardness,
    /// 0xRRGGBB
    pub color: u32,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Air,
        BlockKind::Dirt,
        BlockKind::Grass,
        BlockKind::Stone,
        BlockKind::Lava,
        BlockKind::Wood,
        BlockKind::Leaves,
        BlockKind::Bedrock,
    ];

    pub fn props(self) -> BlockProps {
        use BlockKind::*;
        let (solid, hardness, color) = match self {
            Air => (false, Hardness::Empty, SKY_COLOR),
            Dirt => (true, Hardness::Ticks(20), 0x8B4513),
            Grass => (true, Hardness::Ticks(20), 0x228B22),
            Stone => (true, Hardness::Ticks(60), 0x808080),
            // Lava and leaves are visible and minable but passable
            Lava => (false, Hardness::Ticks(10), 0xFF4500),
            Wood => (true, Hardness::Ticks(40), 0x8B5A2B),
            Leaves => (false, Hardness::Ticks(5), 0x2E8B57),
            Bedrock => (true, Hardness::Unbreakable, 0x1A1A1A),
        };
        BlockProps {
            solid,
            hardness,
            color,
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.props().solid
    }

    #[inline]
    pub fn color(self) -> u32 {
        self.props().color
    }

    /// Ticks needed to mine this block, `None` if it can't be mined
    pub fn mining_health(self) -> Option<u32> {
        match self.props().hardness {
            Hardness::Ticks(ticks) => Some(ticks),
            Hardness::Empty | Hardness::Unbreakable => None,
        }
    }

    /// Counts as ground when searching for the surface
    pub fn is_ground(self) -> bool {
        self.is_solid() && self != BlockKind::Wood
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Air => "Air",
            BlockKind::Dirt => "Dirt",
            BlockKind::Grass => "Grass",
            BlockKind::Stone => "Stone",
            BlockKind::Lava => "Lava",
            BlockKind::Wood => "Wood",
            BlockKind::Leaves => "Leaves",
            BlockKind::Bedrock => "Bedrock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().to_lowercase() == lower)
    }

    /// Hotbar palette, in key order
    pub fn placeable() -> &'static [BlockKind] {
        &[
            BlockKind::Dirt,
            BlockKind::Stone,
            BlockKind::Lava,
            BlockKind::Wood,
            BlockKind::Leaves,
            BlockKind::Grass,
        ]
    }

    /// Hotbar slot (1-based key) to block
    pub fn from_hotbar(slot: usize) -> Option<Self> {
        slot.checked_sub(1)
            .and_then(|i| Self::placeable().get(i))
            .copied()
    }

    /// One character for text dumps
    pub fn glyph(self) -> char {
        match self {
            BlockKind::Air => ' ',
            BlockKind::Dirt => '#',
            BlockKind::Grass => '"',
            BlockKind::Stone => '%',
            BlockKind::Lava => '~',
            BlockKind::Wood => '|',
            BlockKind::Leaves => '*',
            BlockKind::Bedrock => '=',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passability() {
        for kind in [BlockKind::Air, BlockKind::Leaves, BlockKind::Lava] {
            assert!(!kind.is_solid(), "{:?} should be passable", kind);
        }
        for kind in [
            BlockKind::Dirt,
            BlockKind::Grass,
            BlockKind::Stone,
            BlockKind::Wood,
            BlockKind::Bedrock,
        ] {
            assert!(kind.is_solid(), "{:?} should be solid", kind);
        }
    }

    #[test]
    fn test_mining_health() {
        assert_eq!(BlockKind::Stone.mining_health(), Some(60));
        assert_eq!(BlockKind::Bedrock.mining_health(), None);
        assert_eq!(BlockKind::Air.mining_health(), None);
        assert!(BlockKind::Leaves.mining_health().is_some());
    }

    #[test]
    fn test_id_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(BlockKind::from_id(200), None);
    }

    #[test]
    fn test_hotbar() {
        assert_eq!(BlockKind::from_hotbar(1), Some(BlockKind::Dirt));
        assert_eq!(BlockKind::from_hotbar(2), Some(BlockKind::Stone));
        assert_eq!(BlockKind::from_hotbar(3), Some(BlockKind::Lava));
        assert_eq!(BlockKind::from_hotbar(0), None);
        assert_eq!(BlockKind::from_hotbar(42), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(BlockKind::from_str("stone"), Some(BlockKind::Stone));
        assert_eq!(BlockKind::from_str("BEDROCK"), Some(BlockKind::Bedrock));
        assert_eq!(BlockKind::from_str("obsidian"), None);
    }
}
