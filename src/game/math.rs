use super::types::Cell;

pub const ZERO: Cell = Cell { x: 0, y: 0 };
pub const UP: Cell = Cell { x: 0, y: -1 };
pub const DOWN: Cell = Cell { x: 0, y: 1 };
pub const LEFT: Cell = Cell { x: -1, y: 0 };
pub const RIGHT: Cell = Cell { x: 1, y: 0 };

pub fn add(a: Cell, b: Cell) -> Cell {
  Cell {
    x: a.x + b.x,
    y: a.y + b.y,
  }
}

pub fn sub(a: Cell, b: Cell) -> Cell {
  Cell {
    x: a.x - b.x,
    y: a.y - b.y,
  }
}

/// Collapses each axis to its sign, so axis-aligned vectors become unit steps.
pub fn normalize(v: Cell) -> Cell {
  Cell {
    x: v.x.signum(),
    y: v.y.signum(),
  }
}

pub fn negate(v: Cell) -> Cell {
  Cell { x: -v.x, y: -v.y }
}

pub fn manhattan(a: Cell, b: Cell) -> i32 {
  (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn is_zero(v: Cell) -> bool {
  v == ZERO
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_keeps_zero_and_shrinks_long_steps() {
    assert_eq!(normalize(ZERO), ZERO);
    assert_eq!(normalize(Cell { x: -9, y: 0 }), LEFT);
    assert_eq!(normalize(Cell { x: 0, y: 4 }), DOWN);
  }

  #[test]
  fn manhattan_sums_both_axes() {
    assert_eq!(manhattan(Cell { x: 1, y: 1 }, Cell { x: 4, y: -1 }), 5);
    assert_eq!(manhattan(Cell { x: 2, y: 2 }, Cell { x: 2, y: 2 }), 0);
  }
}
