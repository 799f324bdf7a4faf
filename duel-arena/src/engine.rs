use crate::error::Result;

/// Trait for game engine integration
///
/// The engine is owned by the arena loop and is only ever touched from it,
/// so implementations need no interior synchronization.
pub trait GameEngine {
    /// Action type from the input collaborators
    type Action: Send;

    /// Snapshot handed to the renderer
    type State: Clone + Send;

    /// Process an action and return new state.
    /// An error means the action violated the input contract, the game is unchanged
    fn process_action(&mut self, action: Self::Action) -> Result<Self::State>;

    /// Timer-driven update
    fn tick(&mut self) -> Self::State;

    /// Pause or resume the game
    fn toggle_pause(&mut self) -> Self::State;

    /// Restart the game
    fn reset(&mut self) -> Self::State;

    /// Get current state
    fn current_state(&self) -> Self::State;
}
