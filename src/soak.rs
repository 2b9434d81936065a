use crate::game::arena::{Arena, GridArena};
use crate::game::config::SnakeConfig;
use crate::game::constants::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, SPRITE_CELL_SIZE};
use crate::game::math::ZERO;
use crate::game::snake::{DamageEffects, Snake};
use crate::game::sprite::{Renderer, SpriteRegion, STRAIGHT1_V, STRAIGHT2_V};
use crate::game::types::{Cell, Direction, PlayerId, SnakeSnapshot};
use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cell::Cell as CountCell;
use std::env;
use std::rc::Rc;

const SNAKE_ID: PlayerId = 1;
const TURN_CHANCE: f64 = 0.05;
const GROW_CHANCE: f64 = 0.02;
const HIT_CHANCE: f64 = 0.02;
const PICKUP_CHANCE: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct SoakConfig {
  pub seed: u64,
  pub frames: u32,
  pub delta_time: f64,
  pub arena_width: i32,
  pub arena_height: i32,
}

impl SoakConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    let config = Self {
      seed: env::var("SOAK_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(7),
      frames: env::var("SOAK_FRAMES")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(5_000),
      delta_time: env::var("SOAK_DT")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(1.0 / 60.0),
      arena_width: env::var("ARENA_WIDTH")
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(DEFAULT_ARENA_WIDTH),
      arena_height: env::var("ARENA_HEIGHT")
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(DEFAULT_ARENA_HEIGHT),
    };
    if !(config.delta_time > 0.0) {
      bail!("SOAK_DT must be positive");
    }
    Ok(config)
  }
}

#[derive(Debug, Serialize)]
pub struct SoakReport {
  pub frames: u32,
  pub steps: u32,
  pub deaths: u32,
  pub draws: usize,
  #[serde(rename = "finalFrame")]
  pub final_frame: Vec<String>,
  pub snake: SnakeSnapshot,
}

/// Paints body cells as characters so a run can be eyeballed.
struct TextRenderer {
  width: i32,
  height: i32,
  rows: Vec<Vec<char>>,
  draws: usize,
}

impl TextRenderer {
  fn new(width: i32, height: i32) -> Self {
    Self {
      width,
      height,
      rows: vec![vec!['.'; width as usize]; height as usize],
      draws: 0,
    }
  }

  fn clear(&mut self) {
    for row in &mut self.rows {
      row.fill('.');
    }
  }

  fn lines(&self) -> Vec<String> {
    self.rows.iter().map(|row| row.iter().collect()).collect()
  }
}

fn region_glyph(region: SpriteRegion) -> char {
  let column = region.x / SPRITE_CELL_SIZE;
  let row = region.y / SPRITE_CELL_SIZE;
  match (row, column) {
    (0..=1, 0..=1) => '@',
    (0..=1, _) => 'o',
    (_, 0..=1) => '+',
    _ if region == STRAIGHT1_V || region == STRAIGHT2_V => '|',
    _ => '-',
  }
}

impl Renderer for TextRenderer {
  fn draw(&mut self, _skin: &str, cell: Cell, region: SpriteRegion) {
    self.draws += 1;
    let x = cell.x.rem_euclid(self.width) as usize;
    let y = cell.y.rem_euclid(self.height) as usize;
    self.rows[y][x] = region_glyph(region);
  }
}

fn random_cell(rng: &mut StdRng, arena: &GridArena) -> Cell {
  // Leave room for the second spawn cell to the right.
  Cell::new(
    rng.gen_range(0..(arena.width() - 1).max(1)),
    rng.gen_range(0..arena.height()),
  )
}

fn random_turn(rng: &mut StdRng, heading: Cell) -> Cell {
  loop {
    let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    if heading == ZERO || direction.opposite().vector() != heading {
      return direction.vector();
    }
  }
}

fn random_hit(rng: &mut StdRng) -> DamageEffects {
  DamageEffects {
    setback: rng.gen_bool(0.3),
    invincibility: rng.gen_bool(0.5).then(|| rng.gen_range(0.5..2.0)),
    shrink: rng.gen_range(0..4),
    slowdown: rng.gen_range(0.0..2.0),
  }
}

/// Takes the head through a portal pair when it lands on one end.
fn portal_jump(snake: &mut Snake, entry: Cell, exit: Cell) {
  if snake.head() == entry {
    snake[0] = exit;
  } else if snake.head() == exit {
    snake[0] = entry;
  }
}

fn check_invariants(snake: &Snake, config: &SnakeConfig, frame: u32) -> anyhow::Result<()> {
  let body = snake.body();
  if body.len() < 2 {
    tracing::warn!(frame, len = body.len(), "body too short");
    bail!("frame {frame}: body length {} below 2", body.len());
  }
  if !(0..=config.max_hitpoints).contains(&snake.hitpoints()) {
    tracing::warn!(frame, hitpoints = snake.hitpoints(), "hitpoints out of range");
    bail!("frame {frame}: hitpoints {} out of range", snake.hitpoints());
  }
  if !(config.min_speed..=config.max_speed).contains(&snake.speed()) {
    tracing::warn!(frame, speed = snake.speed(), "speed out of range");
    bail!("frame {frame}: speed {} out of range", snake.speed());
  }
  if snake.previous_body().len() < 2 {
    tracing::warn!(frame, len = snake.previous_body().len(), "setback body too short");
    bail!("frame {frame}: previous body length {} below 2", snake.previous_body().len());
  }
  if snake.is_invincible() != snake.state().is_invincible() {
    tracing::warn!(frame, state = snake.state().name(), "invincible flag out of sync");
    bail!("frame {frame}: invincible flag disagrees with {} state", snake.state().name());
  }
  // Leaving the invincible state must restore visibility.
  if !snake.is_invincible() && !snake.is_visible() {
    tracing::warn!(frame, "hidden outside invincibility");
    bail!("frame {frame}: snake hidden while not invincible");
  }
  if snake.elapsed_time() < 0.0 {
    tracing::warn!(frame, elapsed = snake.elapsed_time(), "negative step accumulator");
    bail!("frame {frame}: step accumulator {} is negative", snake.elapsed_time());
  }
  if snake.is_alive() && !snake.is_moving() {
    tracing::warn!(frame, "live snake stopped");
    bail!("frame {frame}: live snake is not moving");
  }
  Ok(())
}

pub fn run(soak: &SoakConfig, config: SnakeConfig) -> anyhow::Result<SoakReport> {
  let mut arena = GridArena::new(soak.arena_width, soak.arena_height)
    .context("failed to build soak arena")?;
  let entry = Cell::new(soak.arena_width / 4, soak.arena_height / 2);
  let exit = Cell::new(soak.arena_width * 3 / 4, soak.arena_height / 2);
  arena.add_portal_pair(entry, exit);

  let mut rng = StdRng::seed_from_u64(soak.seed);
  let deaths = Rc::new(CountCell::new(0u32));
  let death_counter = Rc::clone(&deaths);
  let spawn = random_cell(&mut rng, &arena);
  let mut snake = Snake::new(
    SNAKE_ID,
    spawn,
    "soak",
    config,
    Box::new(move |attacker: PlayerId| {
      tracing::debug!(attacker, "soak snake died");
      death_counter.set(death_counter.get() + 1);
    }),
  );
  snake.set_heading(random_turn(&mut rng, ZERO));
  snake.set_moving(true);
  tracing::info!(body = %snake.body_tag(), head = %snake.head_tag(), "soak snake spawned");

  let mut renderer = TextRenderer::new(arena.width(), arena.height());
  let mut steps = 0u32;

  for frame in 0..soak.frames {
    if !snake.is_alive() {
      let pos = random_cell(&mut rng, &arena);
      snake.respawn(pos);
      snake.set_heading(random_turn(&mut rng, ZERO));
      snake.set_moving(true);
    }

    if rng.gen_bool(TURN_CHANCE) {
      let heading = random_turn(&mut rng, snake.heading());
      snake.set_heading(heading);
      tracing::trace!(frame, from = ?snake.previous_heading(), to = ?snake.heading(), "turn");
    }
    if rng.gen_bool(GROW_CHANCE) {
      snake.grow(rng.gen_range(-2..=3));
      tracing::debug!(frame, len = snake.len(), pending = snake.growth_pending(), "growth queued");
    }
    if rng.gen_bool(PICKUP_CHANCE) {
      snake.gain_hitpoints(rng.gen_range(1..=10));
      snake.set_speed_bonus(rng.gen_range(-3.0..3.0));
    }
    if rng.gen_bool(HIT_CHANCE) {
      let damage = rng.gen_range(1..=config.max_hitpoints.max(1) / 2 + 1);
      let attacker = rng.gen_range(2..=5);
      let effects = random_hit(&mut rng);
      snake.take_damage(damage, attacker, effects);
    }

    if snake.update(soak.delta_time, &arena) {
      steps += 1;
      let head = arena.toroidal(snake.head());
      snake[0] = head;
      portal_jump(&mut snake, entry, exit);
    }

    renderer.clear();
    snake.draw(&arena, &mut renderer);
    check_invariants(&snake, &config, frame)?;
  }

  tracing::info!(
    frames = soak.frames,
    steps,
    deaths = deaths.get(),
    draws = renderer.draws,
    "soak finished"
  );

  Ok(SoakReport {
    frames: soak.frames,
    steps,
    deaths: deaths.get(),
    draws: renderer.draws,
    final_frame: renderer.lines(),
    snake: snake.snapshot(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn small_soak(seed: u64) -> SoakConfig {
    SoakConfig {
      seed,
      frames: 2_000,
      delta_time: 1.0 / 30.0,
      arena_width: 12,
      arena_height: 9,
    }
  }

  #[test]
  fn soak_run_keeps_invariants_and_moves() {
    let report = run(&small_soak(3), SnakeConfig::default()).expect("soak should pass");
    assert_eq!(report.frames, 2_000);
    assert!(report.steps > 0);
    assert_eq!(report.final_frame.len(), 9);
    assert!(report.final_frame.iter().all(|row| row.chars().count() == 12));
  }

  #[test]
  fn soak_run_is_deterministic_per_seed() {
    let first = run(&small_soak(11), SnakeConfig::default()).expect("first run");
    let second = run(&small_soak(11), SnakeConfig::default()).expect("second run");
    assert_eq!(first.steps, second.steps);
    assert_eq!(first.deaths, second.deaths);
    assert_eq!(first.snake.body, second.snake.body);
  }

  #[test]
  fn invariant_check_follows_the_invincibility_lifecycle() {
    let config = SnakeConfig::default();
    let arena = GridArena::new(12, 9).expect("arena");
    let mut snake = Snake::new(SNAKE_ID, Cell::new(3, 3), "soak", config, Box::new(|_: PlayerId| {}));
    snake.set_heading(Direction::Right.vector());
    snake.set_moving(true);
    assert!(snake.state().is_invincible());
    check_invariants(&snake, &config, 0).expect("spawn state is consistent");

    // Run past the spawn invincibility while blinking.
    let mut frame = 1;
    while snake.state().is_invincible() {
      snake.update(1.0 / 30.0, &arena);
      check_invariants(&snake, &config, frame).expect("blinking state is consistent");
      frame += 1;
    }
    assert!(!snake.is_invincible());
    assert!(snake.is_visible());

    snake.set_moving(false);
    assert!(check_invariants(&snake, &config, frame).is_err());
  }

  #[test]
  fn region_glyphs_cover_each_sheet_area() {
    let cell = |column: i32, row: i32| SpriteRegion {
      x: column * SPRITE_CELL_SIZE,
      y: row * SPRITE_CELL_SIZE,
      w: SPRITE_CELL_SIZE,
      h: SPRITE_CELL_SIZE,
    };
    assert_eq!(region_glyph(cell(1, 0)), '@');
    assert_eq!(region_glyph(cell(3, 1)), 'o');
    assert_eq!(region_glyph(cell(0, 3)), '+');
    assert_eq!(region_glyph(STRAIGHT2_V), '|');
    assert_eq!(region_glyph(cell(2, 3)), '-');
  }
}
