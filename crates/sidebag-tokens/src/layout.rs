//! Page layouts: which token name belongs to which detected position.
//!
//! Names are assigned purely by reading order inside a column, so a missed
//! or spurious detection shifts every later name in that column. Circles
//! beyond the end of a list get `unknown_<side>_<index>`.

use serde::{Deserialize, Serialize};
use sidebag_tokens_core::{Circle, Columns, Side};

const PAGE1_LEFT: &[&str] = &[
    "ale",
    "anti_rad",
    "bandages",
    "bomb",
    "brimstone_ash",
    "dark_stone_shiv",
    "dynamite",
    "exotic_herbs",
    "fine_cigar",
    "fire_sake",
    "flash",
    "hatchet",
    "hellfire_sake",
    "herbs",
    "holy_water",
    "junk_bomb",
];

const PAGE1_RIGHT: &[&str] = &[
    "javelin",
    "lantern_oil",
    "magik_tonic",
    "meat_cooked",
    "meat_raw",
    "nectar",
    "potion",
    "rum",
    "sake",
    "salt",
    "shatter",
    "spice",
    "stake",
    "strong_sake",
    "swamp_fungus",
];

// Consumables first, then status effects.
const PAGE2_LEFT: &[&str] = &[
    "tea",
    "tequila",
    "throwing_axe",
    "tonic",
    "void_sake",
    "whiskey",
    "wine",
    "bleeding",
    "burning",
    "death_mark",
    "ensnared",
    "noise",
    "poison",
];

// The four pendants are large and often missed by the detector.
const PAGE2_RIGHT: &[&str] = &[
    "amulet_of_light",
    "elixer_of_fortitude",
    "elixer_of_purity",
    "elixer_of_vitality",
    "potent_poison",
    "shaken",
    "stone",
    "stunned",
    "traumatized",
    "void_venom",
    "webbed",
];

/// Ordered token names for the two columns of one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number; also selects `page-<N>.png` and `debug_page<N>.png`.
    pub page: u32,
    /// Names for the left column in reading order.
    #[serde(default)]
    pub left: Vec<String>,
    /// Names for the right column in reading order.
    #[serde(default)]
    pub right: Vec<String>,
}

/// A detected circle with the name it was given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCircle {
    pub name: String,
    pub side: Side,
    /// Position inside its column, zero-based.
    pub index: usize,
    pub circle: Circle,
}

impl PageLayout {
    pub fn new(page: u32, left: &[&str], right: &[&str]) -> Self {
        Self {
            page,
            left: left.iter().map(|s| s.to_string()).collect(),
            right: right.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Layout of one of the two reference pages (`1` or `2`).
    pub fn builtin(page: u32) -> Option<Self> {
        match page {
            1 => Some(Self::new(1, PAGE1_LEFT, PAGE1_RIGHT)),
            2 => Some(Self::new(2, PAGE2_LEFT, PAGE2_RIGHT)),
            _ => None,
        }
    }

    /// Both reference pages, in processing order.
    pub fn builtin_pages() -> Vec<Self> {
        (1..=2).filter_map(Self::builtin).collect()
    }

    pub fn names(&self, side: Side) -> &[String] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Name of the `index`-th circle of a column.
    pub fn token_name(&self, side: Side, index: usize) -> String {
        self.names(side)
            .get(index)
            .cloned()
            .unwrap_or_else(|| fallback_name(side, index))
    }

    /// Name every circle: the left column first, then the right one.
    pub fn assign_names(&self, columns: &Columns) -> Vec<NamedCircle> {
        let mut out = Vec::with_capacity(columns.len());
        for side in [Side::Left, Side::Right] {
            for (index, circle) in columns.side(side).iter().enumerate() {
                out.push(NamedCircle {
                    name: self.token_name(side, index),
                    side,
                    index,
                    circle: *circle,
                });
            }
        }
        out
    }
}

/// Placeholder for circles past the end of a column's name list.
pub fn fallback_name(side: Side, index: usize) -> String {
    format!("unknown_{side}_{index}")
}
