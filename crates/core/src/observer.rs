//! Observer module - notifications pushed from the engine to its host
//!
//! The engine calls exactly one observer method per state transition and never waits
//! on the host. A host either implements [`GameObserver`] directly or keeps an
//! [`EventLog`] and drains it after each call.

use crate::game::GameState;

/// Receiver of engine notifications. All methods are required.
pub trait GameObserver {
    /// A new round started
    fn game_did_begin(&mut self, state: &GameState);

    /// The round is over; score and level are already back at their initial values
    fn game_did_end(&mut self, state: &GameState);

    /// The falling piece became part of the grid
    fn game_shape_did_land(&mut self, state: &GameState);

    /// The falling piece moved or rotated
    fn game_shape_did_move(&mut self, state: &GameState);

    /// The falling piece was hard-dropped to its resting row (before it settles)
    fn game_shape_did_drop(&mut self, state: &GameState);

    /// The level went up while clearing lines
    fn game_did_level_up(&mut self, state: &GameState);
}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn game_did_begin(&mut self, state: &GameState) {
        (**self).game_did_begin(state)
    }

    fn game_did_end(&mut self, state: &GameState) {
        (**self).game_did_end(state)
    }

    fn game_shape_did_land(&mut self, state: &GameState) {
        (**self).game_shape_did_land(state)
    }

    fn game_shape_did_move(&mut self, state: &GameState) {
        (**self).game_shape_did_move(state)
    }

    fn game_shape_did_drop(&mut self, state: &GameState) {
        (**self).game_shape_did_drop(state)
    }

    fn game_did_level_up(&mut self, state: &GameState) {
        (**self).game_did_level_up(state)
    }
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn game_did_begin(&mut self, _state: &GameState) {}
    fn game_did_end(&mut self, _state: &GameState) {}
    fn game_shape_did_land(&mut self, _state: &GameState) {}
    fn game_shape_did_move(&mut self, _state: &GameState) {}
    fn game_shape_did_drop(&mut self, _state: &GameState) {}
    fn game_did_level_up(&mut self, _state: &GameState) {}
}

/// Engine notification as a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Began,
    Ended,
    ShapeLanded,
    ShapeMoved,
    ShapeDropped,
    LeveledUp { level: u32 },
}

/// Observer that queues every notification as a [`GameEvent`]
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn push(&mut self, event: GameEvent) {
        log::trace!("event {event:?}");
        self.events.push(event);
    }
}

impl GameObserver for EventLog {
    fn game_did_begin(&mut self, _state: &GameState) {
        self.push(GameEvent::Began);
    }

    fn game_did_end(&mut self, _state: &GameState) {
        self.push(GameEvent::Ended);
    }

    fn game_shape_did_land(&mut self, _state: &GameState) {
        self.push(GameEvent::ShapeLanded);
    }

    fn game_shape_did_move(&mut self, _state: &GameState) {
        self.push(GameEvent::ShapeMoved);
    }

    fn game_shape_did_drop(&mut self, _state: &GameState) {
        self.push(GameEvent::ShapeDropped);
    }

    fn game_did_level_up(&mut self, state: &GameState) {
        self.push(GameEvent::LeveledUp {
            level: state.level(),
        });
    }
}
