use super::arena::Arena;
use super::config::SnakeConfig;
use super::constants::MIN_BODY_LENGTH;
use super::math::{add, is_zero, normalize, RIGHT, ZERO};
use super::sprite::{segment_region, Renderer};
use super::state::{MovementState, StatusFlags};
use super::types::{Cell, PlayerId, SnakeSnapshot};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Called with the attacker's id when a snake's hitpoints run out.
pub type KilledHandler = Box<dyn FnMut(PlayerId)>;

/// Side effects of a hit, on top of the raw damage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageEffects {
    /// Put the snake back where it was before its last step, facing back.
    pub setback: bool,
    /// Grant invincibility for this many seconds unless already invincible.
    pub invincibility: Option<f64>,
    /// Tail cells to remove.
    pub shrink: usize,
    pub slowdown: f64,
}

pub struct Snake {
    id: PlayerId,
    skin: String,
    config: SnakeConfig,
    body: Vec<Cell>,
    previous_body: Vec<Cell>,
    heading: Cell,
    previous_heading: Cell,
    hitpoints: i32,
    speed: f64,
    speed_bonus: f64,
    elapsed_time: f64,
    growth_pending: i32,
    alive: bool,
    moving: bool,
    status: StatusFlags,
    state: MovementState,
    killed_handler: KilledHandler,
}

impl fmt::Debug for Snake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snake")
            .field("id", &self.id)
            .field("body", &self.body)
            .field("heading", &self.heading)
            .field("hitpoints", &self.hitpoints)
            .field("speed", &self.speed)
            .field("growth_pending", &self.growth_pending)
            .field("alive", &self.alive)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn spawn_body(pos: Cell) -> Vec<Cell> {
    vec![pos, add(pos, RIGHT)]
}

/// Pops up to `count` cells off the tail without going below the minimum length.
fn trim_tail(body: &mut Vec<Cell>, count: usize) {
    let keep = body.len().saturating_sub(count).max(MIN_BODY_LENGTH);
    body.truncate(keep);
}

impl Snake {
    pub fn new(
        id: PlayerId,
        pos: Cell,
        skin: impl Into<String>,
        config: SnakeConfig,
        killed_handler: KilledHandler,
    ) -> Self {
        let body = spawn_body(pos);
        let mut snake = Self {
            id,
            skin: skin.into(),
            config,
            previous_body: body.clone(),
            body,
            heading: ZERO,
            previous_heading: ZERO,
            hitpoints: config.max_hitpoints,
            speed: config.init_speed,
            speed_bonus: 0.0,
            elapsed_time: 0.0,
            growth_pending: 0,
            alive: true,
            moving: false,
            status: StatusFlags::default(),
            state: MovementState::Normal,
            killed_handler,
        };
        snake.change_state(MovementState::invincible(config.spawn_invincibility));
        snake
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn previous_body(&self) -> &[Cell] {
        &self.previous_body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn heading(&self) -> Cell {
        self.heading
    }

    pub fn previous_heading(&self) -> Cell {
        self.previous_heading
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn growth_pending(&self) -> i32 {
        self.growth_pending
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_visible(&self) -> bool {
        self.status.visible
    }

    pub fn is_invincible(&self) -> bool {
        self.status.invincible
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn body_tag(&self) -> String {
        format!("#p{}-body", self.id)
    }

    pub fn head_tag(&self) -> String {
        format!("#p{}-head", self.id)
    }

    pub fn set_hitpoints(&mut self, value: i32) {
        self.hitpoints = value.clamp(0, self.config.max_hitpoints);
    }

    pub fn gain_hitpoints(&mut self, delta: i32) {
        self.set_hitpoints(self.hitpoints.saturating_add(delta));
    }

    pub fn set_speed(&mut self, value: f64) {
        self.speed = value.clamp(self.config.min_speed, self.config.max_speed);
    }

    pub fn gain_speed(&mut self, delta: f64) {
        self.set_speed(self.speed + delta);
    }

    pub fn set_speed_bonus(&mut self, value: f64) {
        self.speed_bonus = value;
    }

    /// Positive values grow the snake one cell per step, negative ones shrink it
    /// on the next step.
    pub fn grow(&mut self, delta: i32) {
        self.growth_pending = self.growth_pending.saturating_add(delta);
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn set_heading(&mut self, heading: Cell) {
        self.previous_heading = self.heading;
        self.heading = if is_zero(heading) {
            heading
        } else {
            normalize(heading)
        };
    }

    /// Seconds per step. The effective speed never drops below the configured
    /// minimum, however negative the bonus.
    pub fn cadence(&self) -> f64 {
        1.0 / (self.speed + self.speed_bonus).max(self.config.min_speed)
    }

    pub fn change_state(&mut self, next: MovementState) {
        tracing::debug!(
            snake = self.id,
            from = self.state.name(),
            to = next.name(),
            "movement state change"
        );
        self.state.leave(&mut self.status);
        self.state = next;
        self.state.enter(&mut self.status);
    }

    /// Runs one frame. Returns whether the body advanced a cell.
    pub fn update(&mut self, delta_time: f64, arena: &impl Arena) -> bool {
        if !self.alive {
            return false;
        }

        if self.moving {
            self.elapsed_time += delta_time;
        }

        let blink_rate = self.config.blink_rate;
        if let Some(next) = self.state.update(delta_time, blink_rate, &mut self.status) {
            self.change_state(next);
        }

        self.step(arena)
    }

    /// Advances the body by at most one cell if enough time has accumulated.
    /// Returns whether a step was taken.
    pub fn step(&mut self, arena: &impl Arena) -> bool {
        if !self.moving {
            return false;
        }

        self.body[0] = arena.toroidal(self.body[0]);

        if is_zero(self.heading) {
            return false;
        }

        let cadence = self.cadence();
        if self.elapsed_time < cadence {
            return false;
        }

        self.previous_body.clone_from(&self.body);
        self.elapsed_time -= cadence;
        let head = add(self.body[0], self.heading);
        self.body.insert(0, head);

        match self.growth_pending {
            0 => {
                self.body.pop();
            }
            pending if pending > 0 => {
                self.growth_pending -= 1;
            }
            pending => {
                trim_tail(&mut self.body, pending.unsigned_abs() as usize + 1);
                self.growth_pending = 0;
            }
        }

        tracing::trace!(snake = self.id, head = ?self.body[0], len = self.body.len(), "step");
        true
    }

    pub fn take_damage(&mut self, damage: i32, dealt_by: PlayerId, effects: DamageEffects) {
        if !self.status.invincible {
            self.set_hitpoints(self.hitpoints.saturating_sub(damage));
            if effects.setback {
                trim_tail(&mut self.previous_body, effects.shrink);
            } else {
                trim_tail(&mut self.body, effects.shrink);
            }
            self.gain_speed(-effects.slowdown);
        }

        if effects.setback {
            self.body.clone_from(&self.previous_body);
            let offset = Cell {
                x: (self.body[0].x - self.body[1].x).signum(),
                y: (self.body[0].y - self.body[1].y).signum(),
            };
            self.set_heading(offset);
            self.previous_heading = offset;
        }

        if let Some(lifetime) = effects.invincibility {
            if !self.status.invincible {
                self.change_state(MovementState::invincible(lifetime));
            }
        }

        if self.hitpoints <= 0 && self.alive {
            self.alive = false;
            tracing::info!(snake = self.id, killed_by = dealt_by, "snake killed");
            (self.killed_handler)(dealt_by);
        }
    }

    pub fn respawn(&mut self, pos: Cell) {
        self.body = spawn_body(pos);
        self.previous_body.clone_from(&self.body);
        self.speed = self.config.init_speed;
        self.heading = ZERO;
        self.previous_heading = ZERO;
        self.moving = false;
        self.alive = true;
        self.hitpoints = self.config.max_hitpoints;
        self.growth_pending = 0;
        self.elapsed_time = 0.0;
        self.change_state(MovementState::invincible(self.config.respawn_invincibility));
        tracing::info!(snake = self.id, pos = ?pos, "snake respawned");
    }

    /// Paints every body cell unless the snake is dead or blinked out.
    pub fn draw(&self, arena: &impl Arena, renderer: &mut impl Renderer) {
        if !self.alive || !self.status.visible {
            return;
        }
        for (index, cell) in self.body.iter().enumerate() {
            let region = segment_region(&self.body, index, self.heading, arena);
            renderer.draw(&self.skin, *cell, region);
        }
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            id: self.id,
            body: self.body.clone(),
            heading: self.heading,
            hitpoints: self.hitpoints,
            speed: self.speed,
            speed_bonus: self.speed_bonus,
            growth_pending: self.growth_pending,
            alive: self.alive,
            visible: self.status.visible,
            invincible: self.status.invincible,
            moving: self.moving,
        }
    }
}

impl Index<usize> for Snake {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.body[index]
    }
}

/// Direct cell access, used to teleport the head through a portal.
impl IndexMut<usize> for Snake {
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.body[index]
    }
}
