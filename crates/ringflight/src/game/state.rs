/// Phase of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Logo on screen, player hovering, waiting for the first tap.
    Intro,
    Playing,
    /// Terminal for the session; only a replacement session leaves it.
    Dead,
}

/// What a tap means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Intro → Playing.
    Begin,
    /// Impulse while playing.
    Flap,
    /// Dead: build a new session.
    Restart,
}

/// Owns the session's `GameState` and the only legal transitions.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: GameState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: GameState::Intro,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn is_dead(&self) -> bool {
        self.state == GameState::Dead
    }

    /// Classify a tap and apply the transition it implies.
    /// A restart does not change this machine; the owner replaces the session.
    pub fn on_tap(&mut self) -> TapAction {
        match self.state {
            GameState::Intro => {
                self.state = GameState::Playing;
                TapAction::Begin
            }
            GameState::Playing => TapAction::Flap,
            GameState::Dead => TapAction::Restart,
        }
    }

    /// Playing → Dead. Returns false (and changes nothing) from any other state.
    pub fn on_death_trigger(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.state = GameState::Dead;
        true
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
