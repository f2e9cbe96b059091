/*
 * Game State Module
 *
 * A plain holder for the current game phase. Transitions are method calls;
 * the app decides what a restart re-seeds.
 */

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitingToStart,
    Playing,
    GameOver,
}

pub struct GameState {
    phase: GamePhase,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::WaitingToStart,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        info!("game started");
    }

    pub fn end(&mut self) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            info!("game over");
        }
    }

    /// Back to playing; the app re-seeds the aquarium around this call.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        info!("game restarted");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_transition_in_order() {
        let mut game = GameState::new();
        assert_eq!(game.phase(), GamePhase::WaitingToStart);
        assert!(!game.is_playing());

        game.start();
        assert!(game.is_playing());

        game.end();
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.restart();
        assert!(game.is_playing());
    }

    #[test]
    fn ending_twice_stays_game_over() {
        let mut game = GameState::new();
        game.start();
        game.end();
        game.end();
        assert_eq!(game.phase(), GamePhase::GameOver);
    }
}
