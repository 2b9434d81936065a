/// Flags on the snake that the active movement state is allowed to write.
/// `visible` is toggled while blinking, `invincible` mirrors whether the
/// invincible state is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlags {
    pub visible: bool,
    pub invincible: bool,
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self {
            visible: true,
            invincible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvincibleTimers {
    pub lifetime: f64,
    pub elapsed_lifetime: f64,
    pub elapsed_blink: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementState {
    Normal,
    Invincible(InvincibleTimers),
}

impl MovementState {
    pub fn invincible(lifetime: f64) -> Self {
        MovementState::Invincible(InvincibleTimers {
            lifetime,
            elapsed_lifetime: 0.0,
            elapsed_blink: 0.0,
        })
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self, MovementState::Invincible(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            MovementState::Normal => "normal",
            MovementState::Invincible(_) => "invincible",
        }
    }

    pub fn enter(&self, status: &mut StatusFlags) {
        if let MovementState::Invincible(_) = self {
            status.invincible = true;
        }
    }

    pub fn leave(&self, status: &mut StatusFlags) {
        if let MovementState::Invincible(_) = self {
            status.invincible = false;
            status.visible = true;
        }
    }

    /// Advances timers and returns the state to switch to, if any. The caller
    /// still runs the movement step on the frame a transition is requested.
    pub fn update(
        &mut self,
        delta_time: f64,
        blink_rate: f64,
        status: &mut StatusFlags,
    ) -> Option<MovementState> {
        let MovementState::Invincible(timers) = self else {
            return None;
        };

        timers.elapsed_lifetime += delta_time;
        timers.elapsed_blink += delta_time;

        if timers.elapsed_blink >= blink_rate {
            timers.elapsed_blink -= blink_rate;
            status.visible = !status.visible;
        }

        if timers.elapsed_lifetime >= timers.lifetime {
            return Some(MovementState::Normal);
        }
        None
    }
}
