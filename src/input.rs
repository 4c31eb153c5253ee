//! Pressed-key input state
//!
//! The platform loop records key presses and releases here; the simulation
//! samples the result once per tick. There is no event queue: a key pressed
//! and released between ticks can be missed, which is fine for tile-at-a-time
//! movement. The most recently pressed held key wins.

use crate::sim::actor::Direction;

/// Currently-held directional input plus the sprint modifier.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Held cardinals in press order; the last entry is the active one
    held: Vec<Direction>,
    sprint: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Non-cardinal values are ignored; re-pressing a
    /// held key moves it to the top.
    pub fn press(&mut self, direction: Direction) {
        if !direction.is_cardinal() {
            return;
        }
        self.held.retain(|&d| d != direction);
        self.held.push(direction);
    }

    /// Record a key release
    pub fn release(&mut self, direction: Direction) {
        self.held.retain(|&d| d != direction);
    }

    pub fn set_sprint(&mut self, on: bool) {
        self.sprint = on;
    }

    /// The direction the player is currently steering, `None` if idle
    pub fn direction(&self) -> Direction {
        self.held.last().copied().unwrap_or(Direction::None)
    }

    pub fn sprint_requested(&self) -> bool {
        self.sprint
    }

    /// Whether any key is held at all, used for the restart check
    pub fn any_active(&self) -> bool {
        !self.held.is_empty() || self.sprint
    }

    /// Drop all held state. Called by the orchestrator on game over,
    /// victory and level transitions.
    pub fn clear(&mut self) {
        self.held.clear();
        self.sprint = false;
    }
}
