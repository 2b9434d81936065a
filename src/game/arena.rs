use super::types::Cell;
use thiserror::Error;

/// What the snake needs to know about the map it lives on.
pub trait Arena {
    /// Wraps a cell back into bounds, re-entering from the opposite edge.
    fn toroidal(&self, cell: Cell) -> Cell;
    fn on_edge(&self, cell: Cell) -> bool;
    /// Portal cells in registration order. Lookups take the first match.
    fn portals(&self) -> &[Cell];
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena dimensions must be positive, got {width}x{height}")]
    EmptyDimension { width: i32, height: i32 },
}

#[derive(Debug, Clone)]
pub struct GridArena {
    width: i32,
    height: i32,
    portals: Vec<Cell>,
}

impl GridArena {
    pub fn new(width: i32, height: i32) -> Result<Self, ArenaError> {
        if width <= 0 || height <= 0 {
            return Err(ArenaError::EmptyDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            portals: Vec::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn add_portal(&mut self, cell: Cell) {
        if !self.is_portal(cell) {
            self.portals.push(cell);
        }
    }

    pub fn add_portal_pair(&mut self, entry: Cell, exit: Cell) {
        self.add_portal(entry);
        self.add_portal(exit);
    }

    pub fn is_portal(&self, cell: Cell) -> bool {
        self.portals.contains(&cell)
    }
}

impl Arena for GridArena {
    fn toroidal(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.width),
            y: cell.y.rem_euclid(self.height),
        }
    }

    fn on_edge(&self, cell: Cell) -> bool {
        cell.x == 0 || cell.y == 0 || cell.x == self.width - 1 || cell.y == self.height - 1
    }

    fn portals(&self) -> &[Cell] {
        &self.portals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toroidal_wraps_both_directions() {
        let arena = GridArena::new(10, 8).expect("arena");
        assert_eq!(arena.toroidal(Cell::new(10, 3)), Cell::new(0, 3));
        assert_eq!(arena.toroidal(Cell::new(-1, -1)), Cell::new(9, 7));
        assert_eq!(arena.toroidal(Cell::new(4, 4)), Cell::new(4, 4));
    }

    #[test]
    fn on_edge_is_the_outer_ring() {
        let arena = GridArena::new(10, 8).expect("arena");
        assert!(arena.on_edge(Cell::new(0, 4)));
        assert!(arena.on_edge(Cell::new(9, 4)));
        assert!(arena.on_edge(Cell::new(4, 7)));
        assert!(!arena.on_edge(Cell::new(4, 4)));
    }

    #[test]
    fn portals_keep_insertion_order_without_duplicates() {
        let mut arena = GridArena::new(10, 10).expect("arena");
        arena.add_portal_pair(Cell::new(5, 5), Cell::new(1, 1));
        arena.add_portal(Cell::new(5, 5));
        arena.add_portal(Cell::new(7, 2));
        assert_eq!(
            arena.portals(),
            &[Cell::new(5, 5), Cell::new(1, 1), Cell::new(7, 2)]
        );
    }

    #[test]
    fn zero_sized_arena_is_rejected() {
        assert_eq!(
            GridArena::new(0, 4).err(),
            Some(ArenaError::EmptyDimension { width: 0, height: 4 })
        );
    }
}
