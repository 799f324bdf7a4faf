/// Arena loop module
use tokio::time::{Duration, Instant, MissedTickBehavior};

use crate::config::ArenaConfig;
use crate::engine::GameEngine;
use crate::error::Result;

/// Commands that can be sent to the arena
#[derive(Debug, Clone)]
pub enum ArenaCommand<A> {
    /// Process a game engine action
    GameAction(A),
    /// Pause or resume the game
    Pause,
    /// Restart the game
    Reset,
    /// Stop the arena's run loop
    Stop,
}

/// Result of one step() call
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult<S> {
    /// The game changed during this frame
    GameState(S),
    /// The frame elapsed without any change
    Timeout,
    /// A Stop command was received
    Stop,
}

/// Single-owner control loop around a game engine
///
/// Commands arrive over a channel from any number of input collaborators, the
/// engine is ticked on a fixed interval, and step() hands back one snapshot per frame.
pub struct Arena<E: GameEngine> {
    /// Arena configuration
    config: ArenaConfig,

    /// Game engine, only touched from step()
    engine: E,

    /// Receiver for commands from the application
    command_rx: flume::Receiver<ArenaCommand<E::Action>>,

    /// Sender for commands from the application
    command_tx: flume::Sender<ArenaCommand<E::Action>>,

    /// Engine tick timer
    tick_timer: tokio::time::Interval,

    /// Latest game state
    game_state: E::State,

    /// Set once a sender was handed out, the loop stops when all of them are gone
    has_collaborators: bool,

    stopped: bool,
}

impl<E: GameEngine> Arena<E> {
    /// Create a new arena. Must be called from within a tokio runtime.
    pub fn new(config: ArenaConfig, engine: E) -> Result<Self> {
        config.validate()?;
        let (command_tx, command_rx) = flume::unbounded();
        let period = Duration::from_millis(config.tick_interval_ms);
        let mut tick_timer = tokio::time::interval_at(Instant::now() + period, period);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let game_state = engine.current_state();
        tracing::info!(
            "Arena started (tick {} ms, frame {} ms)",
            config.tick_interval_ms,
            config.frame_interval_ms
        );
        Ok(Self {
            config,
            engine,
            command_rx,
            command_tx,
            tick_timer,
            game_state,
            has_collaborators: false,
            stopped: false,
        })
    }

    /// Get a sender for sending commands to this arena.
    ///
    /// Once every sender obtained here is dropped and the queued commands are
    /// drained, step() returns Stop.
    pub fn sender(&mut self) -> flume::Sender<ArenaCommand<E::Action>> {
        self.has_collaborators = true;
        self.command_tx.clone()
    }

    /// All external senders are gone and nothing is left to process
    fn collaborators_gone(&self) -> bool {
        // The arena's own sender is always alive
        self.has_collaborators
            && self.command_rx.sender_count() <= 1
            && self.command_rx.is_empty()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Latest game state
    pub fn game_state(&self) -> &E::State {
        &self.game_state
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Execute one frame of the arena loop
    ///
    /// Processes commands and ticks until the frame interval elapses, then returns:
    /// - GameState if the engine produced a new state during the frame
    /// - Timeout if nothing changed
    /// - Stop as soon as a Stop command is received or every sender handed out by
    ///   sender() is gone (and on every later call)
    pub async fn step(&mut self) -> Result<StepResult<E::State>> {
        if self.stopped {
            return Ok(StepResult::Stop);
        }
        if self.collaborators_gone() {
            tracing::info!("Arena command senders dropped, exiting");
            self.stopped = true;
            return Ok(StepResult::Stop);
        }

        let frame = tokio::time::sleep(Duration::from_millis(self.config.frame_interval_ms));
        tokio::pin!(frame);
        let mut changed = false;

        while tokio::select! {
            // Frame elapsed
            () = &mut frame => {
                false
            }
            // Engine tick
            _ = self.tick_timer.tick() => {
                self.game_state = self.engine.tick();
                changed = true;
                true
            }
            // Command received
            result = self.command_rx.recv_async() => match result {
                Err(_) => {
                    tracing::info!("Arena command channel closed");
                    self.stopped = true;
                    return Ok(StepResult::Stop);
                }
                Ok(ArenaCommand::Stop) => {
                    tracing::info!("Arena received Stop command, exiting");
                    self.stopped = true;
                    return Ok(StepResult::Stop);
                }
                Ok(ArenaCommand::Pause) => {
                    self.game_state = self.engine.toggle_pause();
                    changed = true;
                    true
                }
                Ok(ArenaCommand::Reset) => {
                    tracing::info!("Arena received Reset command");
                    self.game_state = self.engine.reset();
                    changed = true;
                    true
                }
                Ok(ArenaCommand::GameAction(action)) => {
                    match self.engine.process_action(action) {
                        Ok(state) => {
                            self.game_state = state;
                            changed = true;
                        }
                        Err(e) => {
                            tracing::warn!("Arena rejected action: {}", e);
                        }
                    }
                    true
                }
            }
        } {}

        if changed {
            Ok(StepResult::GameState(self.game_state.clone()))
        } else {
            Ok(StepResult::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArenaError;

    // Simple test engine for testing purposes
    #[derive(Debug, Default)]
    struct TestEngine {
        total: i64,
        ticks: u64,
        paused: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TestState {
        total: i64,
        ticks: u64,
        paused: bool,
    }

    impl GameEngine for TestEngine {
        type Action = i64;
        type State = TestState;

        fn process_action(&mut self, action: i64) -> Result<TestState> {
            if action < 0 {
                return Err(ArenaError::Engine(format!("negative action {}", action)));
            }
            self.total += action;
            Ok(self.current_state())
        }

        fn tick(&mut self) -> TestState {
            if !self.paused {
                self.ticks += 1;
            }
            self.current_state()
        }

        fn toggle_pause(&mut self) -> TestState {
            self.paused = !self.paused;
            self.current_state()
        }

        fn reset(&mut self) -> TestState {
            *self = TestEngine::default();
            self.current_state()
        }

        fn current_state(&self) -> TestState {
            TestState {
                total: self.total,
                ticks: self.ticks,
                paused: self.paused,
            }
        }
    }

    fn slow_ticks() -> ArenaConfig {
        ArenaConfig::new()
            .with_tick_interval_ms(60_000)
            .with_frame_interval_ms(20)
    }

    #[test]
    fn test_config_validation() {
        assert!(ArenaConfig::default().validate().is_ok());
        assert!(ArenaConfig::new().with_tick_interval_ms(0).validate().is_err());
        assert!(ArenaConfig::new().with_frame_interval_ms(0).validate().is_err());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let config = ArenaConfig::new().with_frame_interval_ms(0);
        let result = Arena::new(config, TestEngine::default());
        assert!(matches!(result, Err(ArenaError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_actions_are_batched_per_frame() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        let sender = arena.sender();
        sender.send(ArenaCommand::GameAction(2)).unwrap();
        sender.send(ArenaCommand::GameAction(3)).unwrap();

        let result = arena.step().await.unwrap();
        assert_eq!(
            result,
            StepResult::GameState(TestState {
                total: 5,
                ticks: 0,
                paused: false
            })
        );
        assert_eq!(arena.step().await.unwrap(), StepResult::Timeout);
    }

    #[tokio::test]
    async fn test_rejected_action_is_not_a_change() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        arena.sender().send(ArenaCommand::GameAction(-1)).unwrap();
        assert_eq!(arena.step().await.unwrap(), StepResult::Timeout);
        assert_eq!(arena.game_state().total, 0);
    }

    #[tokio::test]
    async fn test_timer_ticks_engine() {
        let config = ArenaConfig::new()
            .with_tick_interval_ms(5)
            .with_frame_interval_ms(100);
        let mut arena = Arena::new(config, TestEngine::default()).unwrap();
        match arena.step().await.unwrap() {
            StepResult::GameState(state) => assert!(state.ticks >= 1),
            other => panic!("Expected GameState, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pause_and_reset_commands() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        let sender = arena.sender();
        sender.send(ArenaCommand::GameAction(4)).unwrap();
        sender.send(ArenaCommand::Pause).unwrap();
        let StepResult::GameState(state) = arena.step().await.unwrap() else {
            panic!("Expected GameState");
        };
        assert!(state.paused);
        assert_eq!(state.total, 4);

        sender.send(ArenaCommand::Reset).unwrap();
        let StepResult::GameState(state) = arena.step().await.unwrap() else {
            panic!("Expected GameState");
        };
        assert_eq!(state.total, 0);
        assert!(!state.paused);
        assert_eq!(arena.engine().total, 0);
    }

    #[tokio::test]
    async fn test_stop_is_final() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        let sender = arena.sender();
        sender.send(ArenaCommand::Stop).unwrap();
        sender.send(ArenaCommand::GameAction(1)).unwrap();
        assert_eq!(arena.step().await.unwrap(), StepResult::Stop);
        assert!(arena.is_stopped());
        assert_eq!(arena.step().await.unwrap(), StepResult::Stop);
        assert_eq!(arena.game_state().total, 0);
    }

    #[tokio::test]
    async fn test_dropped_senders_stop_the_arena() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        let sender = arena.sender();
        sender.send(ArenaCommand::GameAction(7)).unwrap();
        drop(sender);

        // Commands queued before the disconnect are still applied
        let StepResult::GameState(state) = arena.step().await.unwrap() else {
            panic!("Expected GameState");
        };
        assert_eq!(state.total, 7);
        assert_eq!(arena.step().await.unwrap(), StepResult::Stop);
        assert!(arena.is_stopped());
    }

    #[tokio::test]
    async fn test_one_remaining_sender_keeps_arena_running() {
        let mut arena = Arena::new(slow_ticks(), TestEngine::default()).unwrap();
        let keyboard = arena.sender();
        let gestures = arena.sender();
        drop(gestures);
        assert_eq!(arena.step().await.unwrap(), StepResult::Timeout);
        drop(keyboard);
        assert_eq!(arena.step().await.unwrap(), StepResult::Stop);
    }
}
