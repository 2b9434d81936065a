use super::arena::Arena;
use super::math::{manhattan, negate, normalize, sub};
use super::types::Cell;
use std::ops::BitOr;

/// Orientation of a body segment relative to its neighbours, as a bit set of
/// compass flags plus the straight/vertical markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Arrangement(u8);

impl Arrangement {
    pub const NONE: Arrangement = Arrangement(0);
    pub const N: Arrangement = Arrangement(0x1);
    pub const E: Arrangement = Arrangement(0x2);
    pub const S: Arrangement = Arrangement(0x4);
    pub const W: Arrangement = Arrangement(0x8);
    pub const NE: Arrangement = Arrangement(0x1 | 0x2);
    pub const NW: Arrangement = Arrangement(0x1 | 0x8);
    pub const SE: Arrangement = Arrangement(0x4 | 0x2);
    pub const SW: Arrangement = Arrangement(0x4 | 0x8);
    pub const STRAIGHT: Arrangement = Arrangement(0x10);
    pub const VERTICAL: Arrangement = Arrangement(0x20);

    pub fn contains(self, other: Arrangement) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_straight(self) -> bool {
        self.contains(Arrangement::STRAIGHT)
    }

    pub fn is_vertical(self) -> bool {
        self.contains(Arrangement::VERTICAL)
    }

    /// Compass bits only.
    pub fn turn(self) -> Arrangement {
        Arrangement(self.0 & 0xf)
    }
}

impl BitOr for Arrangement {
    type Output = Arrangement;

    fn bitor(self, rhs: Arrangement) -> Arrangement {
        Arrangement(self.0 | rhs.0)
    }
}

pub fn direction_flag(vector: Cell) -> Option<Arrangement> {
    match (vector.x, vector.y) {
        (0, -1) => Some(Arrangement::N),
        (1, 0) => Some(Arrangement::E),
        (0, 1) => Some(Arrangement::S),
        (-1, 0) => Some(Arrangement::W),
        _ => None,
    }
}

fn adjacent_portal(arena: &impl Arena, cell: Cell) -> Option<Cell> {
    arena
        .portals()
        .iter()
        .copied()
        .find(|portal| manhattan(*portal, cell) == 1)
}

/// Classifies the interior segment at `index`, taking wrap-around and portals
/// into account. Returns `None` for the head, the tail, or an out-of-range
/// index.
pub fn arrangement(body: &[Cell], index: usize, arena: &impl Arena) -> Option<Arrangement> {
    if index == 0 || index + 1 >= body.len() {
        return None;
    }

    let mut a = body[index - 1];
    let b = body[index];
    let mut c = body[index + 1];

    let mut ba = sub(a, b);
    let mut bc = sub(c, b);

    if manhattan(a, b) > 1 {
        if arena.on_edge(a) {
            ba = normalize(ba);
        }
        if let Some(portal) = adjacent_portal(arena, b) {
            a = portal;
            ba = sub(a, b);
        }
    }

    if manhattan(c, b) > 1 {
        if arena.on_edge(c) {
            bc = normalize(negate(bc));
        }
        if let Some(portal) = adjacent_portal(arena, b) {
            c = portal;
            bc = sub(c, b);
        }
    }

    if a.x == b.x && b.x == c.x {
        return Some(Arrangement::VERTICAL | Arrangement::STRAIGHT);
    }
    if a.y == b.y && b.y == c.y {
        return Some(Arrangement::STRAIGHT);
    }

    let from_a = direction_flag(ba).unwrap_or(Arrangement::NONE);
    let from_c = direction_flag(bc).unwrap_or(Arrangement::NONE);
    Some(from_a | from_c)
}
