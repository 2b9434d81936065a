use super::math::{DOWN, LEFT, RIGHT, UP};
use serde::{Deserialize, Serialize};

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
  pub x: i32,
  pub y: i32,
}

impl Cell {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

impl From<(i32, i32)> for Cell {
  fn from((x, y): (i32, i32)) -> Self {
    Self { x, y }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

  pub fn vector(self) -> Cell {
    match self {
      Direction::Up => UP,
      Direction::Down => DOWN,
      Direction::Left => LEFT,
      Direction::Right => RIGHT,
    }
  }

  pub fn opposite(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnakeSnapshot {
  pub id: PlayerId,
  pub body: Vec<Cell>,
  pub heading: Cell,
  pub hitpoints: i32,
  pub speed: f64,
  #[serde(rename = "speedBonus")]
  pub speed_bonus: f64,
  #[serde(rename = "growthPending")]
  pub growth_pending: i32,
  pub alive: bool,
  pub visible: bool,
  pub invincible: bool,
  pub moving: bool,
}
