use super::arena::Arena;
use super::arrangement::{arrangement, direction_flag, Arrangement};
use super::constants::SPRITE_CELL_SIZE;
use super::math::{is_zero, normalize, sub};
use super::types::Cell;
use serde::Serialize;

/// Source rectangle on a skin sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteRegion {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRegion {
    /// Region covering the sheet cell at (`column`, `row`).
    const fn cell(column: i32, row: i32) -> Self {
        Self {
            x: column * SPRITE_CELL_SIZE,
            y: row * SPRITE_CELL_SIZE,
            w: SPRITE_CELL_SIZE,
            h: SPRITE_CELL_SIZE,
        }
    }
}

pub const STRAIGHT1_V: SpriteRegion = SpriteRegion::cell(2, 2);
pub const STRAIGHT1_H: SpriteRegion = SpriteRegion::cell(2, 3);
pub const STRAIGHT2_V: SpriteRegion = SpriteRegion::cell(3, 2);
pub const STRAIGHT2_H: SpriteRegion = SpriteRegion::cell(3, 3);

/// Paints one sheet region of `skin` onto a grid cell.
pub trait Renderer {
    fn draw(&mut self, skin: &str, cell: Cell, region: SpriteRegion);
}

fn head_region(flag: Arrangement) -> SpriteRegion {
    match flag {
        Arrangement::N => SpriteRegion::cell(0, 0),
        Arrangement::S => SpriteRegion::cell(1, 1),
        Arrangement::E => SpriteRegion::cell(1, 0),
        _ => SpriteRegion::cell(0, 1),
    }
}

fn tail_region(flag: Arrangement) -> SpriteRegion {
    match flag {
        Arrangement::N => SpriteRegion::cell(2, 0),
        Arrangement::S => SpriteRegion::cell(3, 1),
        Arrangement::E => SpriteRegion::cell(3, 0),
        _ => SpriteRegion::cell(2, 1),
    }
}

fn turn_region(flag: Arrangement) -> Option<SpriteRegion> {
    match flag {
        Arrangement::SE => Some(SpriteRegion::cell(0, 2)),
        Arrangement::SW => Some(SpriteRegion::cell(1, 2)),
        Arrangement::NE => Some(SpriteRegion::cell(0, 3)),
        Arrangement::NW => Some(SpriteRegion::cell(1, 3)),
        _ => None,
    }
}

fn straight_region(index: usize, vertical: bool) -> SpriteRegion {
    match (vertical, index % 2 == 1) {
        (true, true) => STRAIGHT1_V,
        (true, false) => STRAIGHT2_V,
        (false, true) => STRAIGHT1_H,
        (false, false) => STRAIGHT2_H,
    }
}

/// Picks the sheet region for the body cell at `index`. Head and tail face
/// west when the snake has no heading yet.
pub fn segment_region(
    body: &[Cell],
    index: usize,
    heading: Cell,
    arena: &impl Arena,
) -> SpriteRegion {
    let last = body.len().saturating_sub(1);
    let has_heading = !is_zero(heading);

    if index == 0 || last == 0 {
        let flag = has_heading
            .then(|| direction_flag(heading))
            .flatten()
            .unwrap_or(Arrangement::W);
        return head_region(flag);
    }

    if index >= last {
        let flag = has_heading
            .then(|| direction_flag(normalize(sub(body[last - 1], body[last]))))
            .flatten()
            .unwrap_or(Arrangement::W);
        return tail_region(flag);
    }

    let Some(argm) = arrangement(body, index, arena) else {
        return straight_region(index, false);
    };
    if argm.is_straight() {
        return straight_region(index, argm.is_vertical());
    }
    // A gap with neither a wrap nor a portal leaves a partial turn; draw it straight.
    turn_region(argm.turn()).unwrap_or_else(|| straight_region(index, false))
}
