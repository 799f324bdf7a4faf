use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::DuelConfig;
use crate::error::{DuelError, Result};
use crate::session::{DropResult, PlayerSession};
use crate::state::MatchState;
use crate::types::{Action, PlayerId};

/// Garbage sent for a lock that cleared `lines_cleared` rows, and the sender's new
/// back-to-back flag.
///
/// - no clear: nothing sent, flag unchanged
/// - four lines: 4 rows, plus one if the previous clear was also four lines
/// - one to three lines: one row less than cleared
pub fn garbage_for_clear(lines_cleared: usize, back_to_back: bool) -> (usize, bool) {
    match lines_cleared {
        0 => (0, back_to_back),
        4 => (4 + usize::from(back_to_back), true),
        n => (n - 1, false),
    }
}

/// Two player sessions coupled by garbage exchange, plus the pause flag
pub struct Match {
    config: DuelConfig,
    sessions: [PlayerSession; 2],
    paused: bool,
    rng: StdRng,
}

impl Match {
    pub fn new(config: DuelConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            "New match {}x{} (seed {})",
            config.rows,
            config.cols,
            seed
        );
        let mut rng = StdRng::seed_from_u64(seed);
        let player1 = PlayerSession::new(PlayerId::One, config.rows, config.cols, &mut rng)?;
        let player2 = PlayerSession::new(PlayerId::Two, config.rows, config.cols, &mut rng)?;
        Ok(Match {
            config,
            sessions: [player1, player2],
            paused: false,
            rng,
        })
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn session(&self, player: PlayerId) -> &PlayerSession {
        &self.sessions[player.index()]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag and return the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::info!("Match {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// True once both sessions are over
    pub fn is_finished(&self) -> bool {
        self.sessions.iter().all(PlayerSession::is_game_over)
    }

    /// Route a player action. Ids and tags coming from collaborators are validated
    /// first, then the action is discarded if the match is paused.
    pub fn apply_action<P, A>(&mut self, player: P, action: A) -> Result<()>
    where
        P: TryInto<PlayerId>,
        P::Error: Into<DuelError>,
        A: TryInto<Action>,
        A::Error: Into<DuelError>,
    {
        let player = player.try_into().map_err(Into::into)?;
        let action = action.try_into().map_err(Into::into)?;
        if self.paused {
            tracing::debug!("{} {:?} discarded while paused", player, action);
            return Ok(());
        }
        match action {
            Action::MoveLeft | Action::MoveRight => {
                self.move_piece(player, action.delta_x());
            }
            Action::Rotate => {
                self.rotate(player);
            }
            Action::SoftDrop => {
                self.soft_drop(player);
            }
        }
        Ok(())
    }

    pub fn move_piece(&mut self, player: PlayerId, delta_x: isize) -> bool {
        if self.paused {
            return false;
        }
        self.sessions[player.index()].move_horizontal(delta_x)
    }

    pub fn rotate(&mut self, player: PlayerId) -> bool {
        if self.paused {
            return false;
        }
        self.sessions[player.index()].rotate()
    }

    pub fn spawn(&mut self, player: PlayerId) -> bool {
        if self.paused {
            return false;
        }
        self.sessions[player.index()].spawn(&mut self.rng)
    }

    /// One gravity step for `player`. A lock that clears rows sends garbage to the
    /// opponent before this returns.
    pub fn soft_drop(&mut self, player: PlayerId) -> DropResult {
        if self.paused {
            return DropResult::Ignored;
        }
        let [player1, player2] = &mut self.sessions;
        let (own, other) = match player {
            PlayerId::One => (player1, player2),
            PlayerId::Two => (player2, player1),
        };
        let result = own.soft_drop_or_lock(&mut self.rng);
        if let DropResult::Locked {
            lines_cleared,
            game_over,
        } = result
        {
            let (garbage, back_to_back) = garbage_for_clear(lines_cleared, own.back_to_back());
            own.set_back_to_back(back_to_back);
            if garbage > 0 {
                tracing::debug!(
                    "{} cleared {} line(s), sending {} garbage row(s) to {}",
                    player,
                    lines_cleared,
                    garbage,
                    player.opponent()
                );
                other.receive_garbage(garbage, &mut self.rng);
            }
            if game_over {
                tracing::info!("{} is out", player);
            }
        }
        result
    }

    /// Timer-driven gravity for every live session, player 1 first so that garbage it
    /// sends is already in place when player 2 falls
    pub fn tick(&mut self) -> [DropResult; 2] {
        let mut results = [DropResult::Ignored; 2];
        if self.paused {
            return results;
        }
        for player in PlayerId::ALL {
            if !self.sessions[player.index()].is_game_over() {
                results[player.index()] = self.soft_drop(player);
            }
        }
        results
    }

    /// Restart both sessions and unpause
    pub fn reset(&mut self) {
        for session in &mut self.sessions {
            session.reset(&mut self.rng);
        }
        self.paused = false;
    }

    pub fn state(&self) -> MatchState {
        MatchState {
            player1: self.sessions[0].state(),
            player2: self.sessions[1].state(),
            paused: self.paused,
        }
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self, player: PlayerId) -> &mut PlayerSession {
        &mut self.sessions[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::piece::ActivePiece;
    use crate::shapes::{CellType, Shape, all_shapes};

    fn new_match(seed: u64) -> Match {
        Match::new(DuelConfig::default().with_seed(Some(seed))).unwrap()
    }

    fn o_piece(x: isize, y: isize) -> ActivePiece {
        ActivePiece::new(all_shapes()[6].clone(), Position::new(x, y))
    }

    /// Fill the bottom `lines` rows except the two leftmost columns and hold an O
    /// piece right above the gap, so the next lock clears `lines` rows (1 or 2)
    fn prepare_clear(m: &mut Match, player: PlayerId, lines: usize) {
        let rows = vec![vec![1u8; 8]; lines];
        let filler = Shape::from_rows(&rows).unwrap();
        let session = m.session_mut(player);
        session.board_mut().merge(&filler, Position::new(2, 20 - lines as isize));
        assert!(session.spawn_piece(o_piece(0, 18)));
    }

    /// Bottom four rows full except column 0, with a vertical I above the well
    fn prepare_tetris(m: &mut Match, player: PlayerId) {
        let filler = Shape::from_rows(&vec![vec![1u8; 9]; 4]).unwrap();
        let session = m.session_mut(player);
        session.board_mut().merge(&filler, Position::new(1, 16));
        let vertical_i = all_shapes()[5].rotate_clockwise();
        assert!(session.spawn_piece(ActivePiece::new(vertical_i, Position::new(0, 16))));
    }

    fn lock(m: &mut Match, player: PlayerId) -> DropResult {
        loop {
            match m.soft_drop(player) {
                DropResult::Fell => continue,
                other => return other,
            }
        }
    }

    fn garbage_rows(m: &Match, player: PlayerId) -> usize {
        let board = m.session(player).board();
        (0..board.rows())
            .filter(|&y| board.row(y).unwrap().iter().filter(|c| c.is_empty()).count() == 1)
            .filter(|&y| board.row(y).unwrap().iter().all(|c| c.is_empty() || *c == CellType::GARBAGE))
            .count()
    }

    #[test]
    fn test_garbage_table() {
        assert_eq!(garbage_for_clear(0, false), (0, false));
        assert_eq!(garbage_for_clear(0, true), (0, true));
        assert_eq!(garbage_for_clear(1, true), (0, false));
        assert_eq!(garbage_for_clear(2, false), (1, false));
        assert_eq!(garbage_for_clear(3, true), (2, false));
        assert_eq!(garbage_for_clear(4, false), (4, true));
        assert_eq!(garbage_for_clear(4, true), (5, true));
    }

    #[test]
    fn test_single_line_sends_nothing() {
        let mut m = new_match(1);
        m.session_mut(PlayerId::One).set_back_to_back(true);
        prepare_clear(&mut m, PlayerId::One, 1);
        assert!(matches!(
            lock(&mut m, PlayerId::One),
            DropResult::Locked { lines_cleared: 1, .. }
        ));
        assert!(!m.session(PlayerId::One).back_to_back());
        assert!(m.session(PlayerId::Two).board().is_empty());
    }

    #[test]
    fn test_double_sends_one_row_to_opponent() {
        let mut m = new_match(2);
        prepare_clear(&mut m, PlayerId::Two, 2);
        assert!(matches!(
            lock(&mut m, PlayerId::Two),
            DropResult::Locked { lines_cleared: 2, .. }
        ));
        assert_eq!(garbage_rows(&m, PlayerId::One), 1);
        assert!(m.session(PlayerId::Two).board().is_empty());
    }

    #[test]
    fn test_back_to_back_tetris_bonus() {
        let mut m = new_match(3);
        prepare_tetris(&mut m, PlayerId::One);
        assert!(matches!(
            lock(&mut m, PlayerId::One),
            DropResult::Locked { lines_cleared: 4, .. }
        ));
        assert!(m.session(PlayerId::One).back_to_back());
        assert_eq!(garbage_rows(&m, PlayerId::Two), 4);

        prepare_tetris(&mut m, PlayerId::One);
        lock(&mut m, PlayerId::One);
        assert!(m.session(PlayerId::One).back_to_back());
        assert_eq!(garbage_rows(&m, PlayerId::Two), 9);
        assert_eq!(m.session(PlayerId::Two).board().rows(), 20);
    }

    #[test]
    fn test_lock_without_clear_keeps_back_to_back() {
        let mut m = new_match(4);
        m.session_mut(PlayerId::One).set_back_to_back(true);
        assert!(m.session_mut(PlayerId::One).spawn_piece(o_piece(0, 0)));
        assert!(matches!(
            lock(&mut m, PlayerId::One),
            DropResult::Locked { lines_cleared: 0, .. }
        ));
        assert!(m.session(PlayerId::One).back_to_back());
        assert!(m.session(PlayerId::Two).board().is_empty());
    }

    #[test]
    fn test_apply_action_routes_to_player() {
        let mut m = new_match(5);
        assert!(m.session_mut(PlayerId::Two).spawn_piece(o_piece(4, 0)));
        let p1_before = m.session(PlayerId::One).piece().clone();
        m.apply_action(PlayerId::Two, Action::MoveLeft).unwrap();
        m.apply_action(2u8, "down").unwrap();
        assert_eq!(m.session(PlayerId::Two).piece().origin(), Position::new(3, 1));
        assert_eq!(m.session(PlayerId::One).piece(), &p1_before);
    }

    #[test]
    fn test_apply_action_rejects_contract_violations() {
        let mut m = new_match(6);
        let before = m.state();
        assert_eq!(
            m.apply_action(3u8, Action::Rotate),
            Err(DuelError::InvalidPlayer(3))
        );
        assert!(matches!(
            m.apply_action(PlayerId::One, "hard_drop"),
            Err(DuelError::UnknownAction(_))
        ));
        assert!(matches!(
            m.apply_action(1u8, 7u8),
            Err(DuelError::UnknownAction(_))
        ));
        assert_eq!(m.state(), before);
    }

    #[test]
    fn test_pause_discards_actions_and_ticks() {
        let mut m = new_match(7);
        assert!(m.toggle_pause());
        let before = m.state();
        for action in [Action::MoveLeft, Action::MoveRight, Action::Rotate, Action::SoftDrop] {
            m.apply_action(PlayerId::One, action).unwrap();
            m.apply_action(PlayerId::Two, action).unwrap();
        }
        assert_eq!(m.tick(), [DropResult::Ignored; 2]);
        assert!(!m.spawn(PlayerId::One));
        assert_eq!(m.state(), before);
        assert!(m.state().paused);

        assert!(!m.toggle_pause());
        assert_eq!(m.tick(), [DropResult::Fell; 2]);
    }

    #[test]
    fn test_tick_applies_player_one_garbage_first() {
        let mut m = new_match(8);
        prepare_clear(&mut m, PlayerId::One, 2);
        // Player 2 rests one row above the floor of an empty board
        assert!(m.session_mut(PlayerId::Two).spawn_piece(o_piece(4, 17)));

        let [r1, r2] = m.tick();
        assert!(matches!(r1, DropResult::Locked { lines_cleared: 2, .. }));
        // The garbage row arrived before player 2 fell, so the O locked where it was
        assert_eq!(
            r2,
            DropResult::Locked {
                lines_cleared: 0,
                game_over: false
            }
        );
        let board = m.session(PlayerId::Two).board();
        assert_eq!(board.get_cell(4, 17), CellType::Cyan);
        assert_eq!(board.get_cell(5, 18), CellType::Cyan);
    }

    #[test]
    fn test_garbage_may_overlap_falling_piece() {
        let mut m = new_match(9);
        assert!(m.session_mut(PlayerId::Two).spawn_piece(o_piece(4, 18)));
        prepare_tetris(&mut m, PlayerId::One);
        lock(&mut m, PlayerId::One);
        // The opponent's piece is not moved, it now overlaps garbage
        let p2 = m.session(PlayerId::Two);
        assert_eq!(p2.piece().origin(), Position::new(4, 18));
        assert!(p2.piece().collides(p2.board()));
    }

    #[test]
    fn test_game_over_freezes_one_side_only() {
        let mut m = new_match(10);
        let wall = Shape::from_rows(&vec![vec![1u8; 10]; 2]).unwrap();
        m.session_mut(PlayerId::One).board_mut().merge(&wall, Position::new(0, 0));
        assert!(!m.spawn(PlayerId::One));
        assert!(m.session(PlayerId::One).is_game_over());

        let frozen = m.state().player1;
        for action in [Action::MoveLeft, Action::MoveRight, Action::Rotate, Action::SoftDrop] {
            m.apply_action(PlayerId::One, action).unwrap();
        }
        let [r1, r2] = m.tick();
        assert_eq!(r1, DropResult::Ignored);
        assert_eq!(r2, DropResult::Fell);
        assert_eq!(m.state().player1, frozen);
        assert!(!m.is_finished());
        assert_eq!(m.state().overlay(), vec!["P1 Game Over"]);
    }

    #[test]
    fn test_reset_restores_both_sessions() {
        let mut m = new_match(11);
        prepare_tetris(&mut m, PlayerId::One);
        lock(&mut m, PlayerId::One);
        m.toggle_pause();
        m.reset();
        assert!(!m.is_paused());
        for player in PlayerId::ALL {
            assert!(m.session(player).board().is_empty());
            assert!(!m.session(player).back_to_back());
            assert!(!m.session(player).is_game_over());
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = new_match(12);
        let mut b = new_match(12);
        for step in 0..200 {
            let player = if step % 3 == 0 { PlayerId::Two } else { PlayerId::One };
            let action = [Action::MoveLeft, Action::Rotate, Action::MoveRight][step % 3];
            a.apply_action(player, action).unwrap();
            b.apply_action(player, action).unwrap();
            a.tick();
            b.tick();
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_state_json_snapshot() {
        let m = new_match(13);
        let json = m.state().to_json().unwrap();
        let state = MatchState::from_json(&json).unwrap();
        assert_eq!(state, m.state());
        assert!(state.player1.piece.is_some());
        assert_eq!(state.player2.well.occupied(), 4);
        assert!(MatchState::from_json("{").is_err());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = DuelConfig::default().with_size(2, 10);
        assert!(matches!(Match::new(config), Err(DuelError::InvalidConfig(_))));
    }
}
