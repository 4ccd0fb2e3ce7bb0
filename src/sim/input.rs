//! Discrete player commands and keyboard mapping
//!
//! Input arrives between ticks. Commands are queued in arrival order and the
//! whole queue is applied at the start of the next tick, so the latest value
//! of each setting wins.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A command delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Replace the player's velocity
    SetVelocity(f64),
    /// Add to the player's facing angle (radians)
    Rotate(f64),
    /// Open or close the top-down map view
    ToggleMapView,
}

/// Commands waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending command, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Keyboard bindings: `w`/`s` walk, `a`/`d` turn, `m` toggles the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Speed applied by the walk keys
    pub move_speed: f64,
    /// Angle applied per turn key press (radians)
    pub turn_step: f64,
}

impl KeyBindings {
    pub fn new(move_speed: f64, turn_step: f64) -> Self {
        Self {
            move_speed,
            turn_step,
        }
    }

    /// Translate a key event into a command, if the key is bound
    pub fn command(&self, key: char, action: KeyAction) -> Option<Command> {
        match (key.to_ascii_lowercase(), action) {
            ('w', KeyAction::Press) => Some(Command::SetVelocity(-self.move_speed)),
            ('s', KeyAction::Press) => Some(Command::SetVelocity(self.move_speed)),
            ('w' | 's', KeyAction::Release) => Some(Command::SetVelocity(0.0)),
            ('a', KeyAction::Press) => Some(Command::Rotate(-self.turn_step)),
            ('d', KeyAction::Press) => Some(Command::Rotate(self.turn_step)),
            ('m', KeyAction::Press) => Some(Command::ToggleMapView),
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(crate::consts::MOVE_SPEED, crate::consts::TURN_STEP)
    }
}
