use duel_arena::{ArenaConfig, ArenaError, GameEngine, Result as ArenaResult};

use crate::config::DuelConfig;
use crate::duel::Match;
use crate::error::Result;
use crate::state::MatchState;
use crate::types::PlayerInput;

/// Game engine that drives a two player match from the arena loop
pub struct MatchEngine {
    duel: Match,
}

impl MatchEngine {
    pub fn new(config: DuelConfig) -> Result<Self> {
        Ok(Self {
            duel: Match::new(config)?,
        })
    }

    pub fn duel(&self) -> &Match {
        &self.duel
    }

    /// Arena timing matching the match configuration
    pub fn arena_config(&self) -> ArenaConfig {
        let config = self.duel.config();
        ArenaConfig::new()
            .with_tick_interval_ms(config.auto_drop_interval_ms)
            .with_frame_interval_ms(config.frame_interval_ms())
    }
}

impl GameEngine for MatchEngine {
    type Action = PlayerInput;
    type State = MatchState;

    fn process_action(&mut self, input: Self::Action) -> ArenaResult<Self::State> {
        self.duel
            .apply_action(input.player, input.action)
            .map_err(|e| ArenaError::Engine(e.to_string()))?;
        Ok(self.duel.state())
    }

    fn tick(&mut self) -> Self::State {
        self.duel.tick();
        self.duel.state()
    }

    fn toggle_pause(&mut self) -> Self::State {
        self.duel.toggle_pause();
        self.duel.state()
    }

    fn reset(&mut self) -> Self::State {
        self.duel.reset();
        self.duel.state()
    }

    fn current_state(&self) -> Self::State {
        self.duel.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, PlayerId};
    use duel_arena::{Arena, ArenaCommand, StepResult};

    fn engine() -> MatchEngine {
        MatchEngine::new(DuelConfig::default().with_seed(Some(99))).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine();
        let state = engine.current_state();
        assert_eq!(state.player1.board.cols(), 10);
        assert_eq!(state.player1.board.rows(), 20);
        assert_eq!(engine.arena_config().tick_interval_ms, 500);
        assert_eq!(engine.arena_config().frame_interval_ms, 33);
    }

    #[test]
    fn test_invalid_player_is_engine_error() {
        let mut engine = engine();
        let result = engine.process_action(PlayerInput::new(0, Action::Rotate));
        assert!(matches!(result, Err(ArenaError::Engine(_))));
    }

    #[test]
    fn test_tick_and_pause() {
        let mut engine = engine();
        let y0 = engine.duel().session(PlayerId::One).piece().origin().y;
        let paused = engine.toggle_pause();
        assert!(paused.paused);
        engine.tick();
        assert_eq!(engine.duel().session(PlayerId::One).piece().origin().y, y0);
        engine.toggle_pause();
        engine.tick();
        assert_eq!(engine.duel().session(PlayerId::One).piece().origin().y, y0 + 1);
    }

    #[tokio::test]
    async fn test_engine_in_arena() {
        let engine = engine();
        let config = engine.arena_config().with_tick_interval_ms(60_000);
        let mut arena = Arena::new(config, engine).unwrap();
        let sender = arena.sender();
        sender
            .send(ArenaCommand::GameAction((PlayerId::Two, Action::SoftDrop).into()))
            .unwrap();
        let StepResult::GameState(state) = arena.step().await.unwrap() else {
            panic!("Expected GameState");
        };
        assert_eq!(state.player2.piece.unwrap().origin.y, 1);
        assert_eq!(state.player1.piece.unwrap().origin.y, 0);

        sender.send(ArenaCommand::Stop).unwrap();
        assert_eq!(arena.step().await.unwrap(), StepResult::Stop);
    }
}
