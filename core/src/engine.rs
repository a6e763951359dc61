use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::*;

/// How long both faces stay up before a pair is judged.
pub const RESOLVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    OneSelected,
    Resolving,
    Completed,
}

impl EngineState {
    pub const fn accepts_selection(self) -> bool {
        matches!(self, Self::Idle | Self::OneSelected)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

/// Proof that a resolution was scheduled for a specific session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveTicket {
    session: SessionId,
}

impl ResolveTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    pub moves: Count,
    pub matched_pairs: Count,
    pub active: bool,
    pub completed: bool,
}

impl GameSession {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            moves: 0,
            matched_pairs: 0,
            active: true,
            completed: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    MovesChanged(Count),
    MatchedPairsChanged(Count),
    Completed { moves: Count },
}

pub type Selection = SmallVec<[TileId; 2]>;

#[derive(Clone, Debug)]
pub struct MatchEngine<G = RandomDeckGenerator> {
    generator: G,
    config: BoardConfig,
    board: Board,
    selection: Selection,
    session: GameSession,
    state: EngineState,
    next_session: u64,
    events: VecDeque<EngineEvent>,
}

impl<G: DeckGenerator> MatchEngine<G> {
    pub fn new(config: BoardConfig, mut generator: G) -> Result<Self> {
        let board = generator.generate(config.grid, config.theme.symbols())?;
        Ok(Self::with_board(board, config.theme, generator))
    }

    /// Starts from an already dealt board; later resets go through `generator`.
    pub fn with_board(board: Board, theme: Theme, generator: G) -> Self {
        let config = BoardConfig::new(board.grid(), theme);
        let mut engine = Self {
            generator,
            config,
            board,
            selection: SmallVec::new(),
            session: GameSession::new(SessionId(0)),
            state: EngineState::Idle,
            next_session: 1,
            events: VecDeque::new(),
        };
        engine.announce_counters();
        engine
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile(&self, id: TileId) -> Result<&Tile> {
        self.board.tile(id)
    }

    pub fn selection(&self) -> &[TileId] {
        &self.selection
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn moves(&self) -> Count {
        self.session.moves
    }

    pub fn matched_pairs(&self) -> Count {
        self.session.matched_pairs
    }

    pub fn pair_count(&self) -> usize {
        self.config.pair_count()
    }

    /// Share of found pairs, rounded half up to a whole percent.
    pub fn progress_percent(&self) -> u8 {
        let pairs = self.pair_count() as u64;
        let matched = u64::from(self.session.matched_pairs);
        ((matched * 200 + pairs) / (pairs * 2)) as u8
    }

    /// Ticket of the pair currently waiting to be judged.
    pub fn pending_ticket(&self) -> Option<ResolveTicket> {
        matches!(self.state, EngineState::Resolving).then_some(ResolveTicket {
            session: self.session.id,
        })
    }

    pub fn can_select(&self, id: TileId) -> bool {
        self.state.accepts_selection()
            && self
                .board
                .tile(id)
                .is_ok_and(|tile| !tile.is_matched() && !self.selection.contains(&id))
    }

    pub fn select_tile(&mut self, id: TileId) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let id = self.board.validate_id(id)?;
        if !self.can_select(id) {
            log::trace!("ignored selection of tile {} in {:?}", id, self.state);
            return Ok(Ignored);
        }

        self.board.tile_mut(id).reveal();
        self.selection.push(id);

        Ok(match self.selection.len() {
            1 => {
                self.state = EngineState::OneSelected;
                Revealed
            }
            _ => {
                self.state = EngineState::Resolving;
                AwaitingResolution(ResolveTicket {
                    session: self.session.id,
                })
            }
        })
    }

    /// Judges the pending pair. Tickets from a replaced session are ignored.
    pub fn resolve(&mut self, ticket: ResolveTicket) -> ResolveOutcome {
        if ticket.session != self.session.id || self.state != EngineState::Resolving {
            log::debug!("dropping stale resolution for {:?}", ticket.session);
            return ResolveOutcome::Stale;
        }

        let (first, second) = match self.selection.as_slice() {
            &[first, second] => (first, second),
            other => {
                log::warn!("resolving with selection {:?}", other);
                return ResolveOutcome::Stale;
            }
        };

        let matched = self.board[first].symbol() == self.board[second].symbol();
        if matched {
            self.board.tile_mut(first).mark_matched();
            self.board.tile_mut(second).mark_matched();
            self.session.matched_pairs += 1;
            self.events
                .push_back(EngineEvent::MatchedPairsChanged(self.session.matched_pairs));
        } else {
            self.board.tile_mut(first).hide();
            self.board.tile_mut(second).hide();
        }

        self.session.moves += 1;
        self.events
            .push_back(EngineEvent::MovesChanged(self.session.moves));
        self.selection.clear();

        if matched && self.session.matched_pairs as usize == self.pair_count() {
            self.state = EngineState::Completed;
            self.session.active = false;
            self.session.completed = true;
            self.events.push_back(EngineEvent::Completed {
                moves: self.session.moves,
            });
            log::debug!("board cleared in {} moves", self.session.moves);
            return ResolveOutcome::Completed;
        }

        self.state = EngineState::Idle;
        if matched {
            ResolveOutcome::Matched
        } else {
            ResolveOutcome::Mismatch
        }
    }

    /// Resolves the pending pair right away, for callers without a display delay.
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        match self.pending_ticket() {
            Some(ticket) => self.resolve(ticket),
            None => ResolveOutcome::Stale,
        }
    }

    /// Deals a new board for `config`. On error the current game is left untouched.
    pub fn reset(&mut self, config: BoardConfig) -> Result<()> {
        let board = self
            .generator
            .generate(config.grid, config.theme.symbols())?;

        let id = SessionId(self.next_session);
        self.next_session += 1;

        self.config = config;
        self.board = board;
        self.selection.clear();
        self.session = GameSession::new(id);
        self.state = EngineState::Idle;
        self.announce_counters();
        log::debug!("new {} {} session {:?}", config.grid, config.theme, id);
        Ok(())
    }

    pub fn restart(&mut self) -> Result<()> {
        self.reset(self.config)
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain(..)
    }

    fn announce_counters(&mut self) {
        self.events.push_back(EngineEvent::MovesChanged(0));
        self.events.push_back(EngineEvent::MatchedPairsChanged(0));
    }
}
