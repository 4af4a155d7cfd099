//! Headless turn state machine.
//!
//! The player (White) activates tiles: the first activation selects an own
//! piece and highlights its destinations, a later activation of a highlighted
//! tile plays the move. The configured engine then answers for Zombie and
//! control returns to the player, unless the game has ended.

use tracing::{debug, info, warn};

use crate::controller::events::{ControllerEvent, TileActivated};
use crate::engines::engine_trait::{Engine, SearchParams};
use crate::game_state::board::Board;
use crate::game_state::board_errors::{BoardError, SnapshotError};
use crate::game_state::chess_rules::GameStatus;
use crate::game_state::chess_types::{Coordinate, Faction, PieceId};
use crate::game_state::snapshot_store::SnapshotStore;
use crate::move_generation::destination_generator::piece_destinations;
use crate::move_generation::move_list::has_legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::game_record::{GameRecord, RecordEntry};
use crate::utils::layout_generator::generate_layout;

/// Manual checkpoint slots owned by the controller.
pub const DEFAULT_SAVE_SLOTS: usize = 10;

const PLAYER: Faction = Faction::White;
const OPPONENT: Faction = Faction::Zombie;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("engine failed: {0}")]
    Engine(String),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the player to pick one of their pieces.
    SelectPiece,
    /// A piece is picked and its destinations are highlighted.
    PieceSelected(PieceId),
    /// The engine is choosing Zombie's reply.
    OpponentTurn,
    GameOver(GameStatus),
}

impl TurnPhase {
    pub fn accepts_input(self) -> bool {
        matches!(self, TurnPhase::SelectPiece | TurnPhase::PieceSelected(_))
    }
}

pub struct TurnController {
    board: Board,
    phase: TurnPhase,
    engine: Box<dyn Engine>,
    params: SearchParams,
    store: SnapshotStore,
    highlights: Vec<Coordinate>,
    overlay: bool,
    last_scores: Vec<Move>,
    record: GameRecord,
}

impl TurnController {
    pub fn new(board: Board, engine: Box<dyn Engine>) -> Self {
        Self::with_slots(board, engine, DEFAULT_SAVE_SLOTS)
    }

    pub fn with_slots(board: Board, engine: Box<dyn Engine>, slots: usize) -> Self {
        let mut record = GameRecord::new(&generate_layout(&board));
        record.set_header("Zombie", engine.name());
        let mut controller = Self {
            board,
            phase: TurnPhase::SelectPiece,
            engine,
            params: SearchParams::default(),
            store: SnapshotStore::new(slots),
            highlights: Vec::new(),
            overlay: false,
            last_scores: Vec::new(),
            record,
        };
        controller.phase = controller.resting_phase();
        controller
    }

    pub fn set_search_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn highlights(&self) -> &[Coordinate] {
        &self.highlights
    }

    pub fn overlay_enabled(&self) -> bool {
        self.overlay
    }

    /// Root move scores from the engine's last turn.
    pub fn last_scores(&self) -> &[Move] {
        &self.last_scores
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn on_tile_activated(
        &mut self,
        activated: impl Into<TileActivated>,
    ) -> ControllerResult<Vec<ControllerEvent>> {
        let at = activated.into().coordinate;
        let mut events = Vec::new();

        match self.phase {
            TurnPhase::SelectPiece => {
                if let Some(piece) = self.own_piece_on(at) {
                    self.select(piece, &mut events);
                }
            }
            TurnPhase::PieceSelected(selected) => {
                if let Some(piece) = self.own_piece_on(at) {
                    self.clear_selection(&mut events);
                    self.select(piece, &mut events);
                } else if self.highlights.contains(&at) {
                    self.clear_selection(&mut events);
                    let (board, record) = (self.board.clone(), self.record.clone());
                    self.play(PLAYER, Move::new(selected, at), &mut events)?;
                    if !self.check_game_over(OPPONENT, &mut events) {
                        self.phase = TurnPhase::OpponentTurn;
                        if let Err(e) = self.play_opponent_turn(&mut events) {
                            // Hand the turn back with the player's move undone.
                            warn!(%e, "opponent turn failed, rolling back");
                            self.board = board;
                            self.record = record;
                            self.phase = self.resting_phase();
                            return Err(e);
                        }
                    }
                }
            }
            TurnPhase::OpponentTurn | TurnPhase::GameOver(_) => {
                debug!(%at, phase = ?self.phase, "tile activation ignored");
            }
        }

        Ok(events)
    }

    pub fn toggle_overlay(&mut self) -> ControllerEvent {
        self.overlay = !self.overlay;
        ControllerEvent::OverlayToggled(self.overlay)
    }

    pub fn save_state(&mut self, slot: usize) -> ControllerResult<ControllerEvent> {
        self.store.save(&self.board, slot)?;
        self.record.note(format!("saved slot {slot}"));
        info!(slot, "board state saved");
        Ok(ControllerEvent::StateSaved(slot))
    }

    /// Restores a checkpoint. Any selection is dropped and the turn returns
    /// to the player unless the restored position is already decided.
    pub fn load_state(&mut self, slot: usize) -> ControllerResult<Vec<ControllerEvent>> {
        self.store.load(&mut self.board, slot)?;

        let mut events = Vec::new();
        if !self.highlights.is_empty() {
            self.clear_selection(&mut events);
        }
        self.record.note(format!("loaded slot {slot}"));
        info!(slot, "board state loaded");
        events.push(ControllerEvent::StateLoaded(slot));

        self.phase = self.resting_phase();
        if let TurnPhase::GameOver(status) = self.phase {
            events.push(ControllerEvent::GameOver(status));
        }
        Ok(events)
    }

    fn own_piece_on(&self, at: Coordinate) -> Option<PieceId> {
        self.board
            .occupant(at)
            .filter(|(_, piece)| piece.faction() == PLAYER)
            .map(|(id, _)| id)
    }

    fn select(&mut self, piece: PieceId, events: &mut Vec<ControllerEvent>) {
        self.highlights = piece_destinations(&self.board, piece);
        self.phase = TurnPhase::PieceSelected(piece);
        events.push(ControllerEvent::PieceSelected {
            piece,
            highlights: self.highlights.clone(),
        });
    }

    fn clear_selection(&mut self, events: &mut Vec<ControllerEvent>) {
        self.highlights.clear();
        self.phase = TurnPhase::SelectPiece;
        events.push(ControllerEvent::SelectionCleared);
    }

    fn play(
        &mut self,
        faction: Faction,
        mv: Move,
        events: &mut Vec<ControllerEvent>,
    ) -> ControllerResult<()> {
        let piece = self
            .board
            .piece(mv.piece)
            .ok_or(BoardError::UnknownPiece(mv.piece))?;
        let (kind, from) = (piece.kind(), piece.coordinate());

        let captured = self.board.execute_move(&mv, true)?;
        let captured_kind = captured
            .and_then(|id| self.board.piece(id))
            .map(|piece| piece.kind());

        info!(%faction, %kind, %from, to = %mv.destination, "move played");
        self.record.push(RecordEntry::Move {
            faction,
            kind,
            from,
            to: mv.destination,
            captured: captured_kind,
        });
        events.push(ControllerEvent::MovePlayed {
            faction,
            mv,
            from,
            captured,
        });
        Ok(())
    }

    fn play_opponent_turn(&mut self, events: &mut Vec<ControllerEvent>) -> ControllerResult<()> {
        let out = self
            .engine
            .choose_move(&mut self.board, OPPONENT, &self.params)
            .map_err(ControllerError::Engine)?;
        for line in &out.info_lines {
            debug!(engine = self.engine.name(), "{line}");
        }
        self.last_scores = out.root_moves;

        match out.best_move {
            Some(reply) => {
                self.play(OPPONENT, reply, events)?;
                if !self.check_game_over(PLAYER, events) {
                    self.phase = TurnPhase::SelectPiece;
                }
            }
            None => {
                self.end_game(GameStatus::Won(PLAYER), Some(OPPONENT), events);
            }
        }
        Ok(())
    }

    /// Ends the game when it is decided or `to_move` cannot move.
    fn check_game_over(&mut self, to_move: Faction, events: &mut Vec<ControllerEvent>) -> bool {
        let status = self.board.status();
        if status.is_over() {
            self.end_game(status, None, events);
            return true;
        }
        if !has_legal_moves(&self.board, to_move) {
            let winner = to_move.opponent().unwrap_or(PLAYER);
            self.end_game(GameStatus::Won(winner), Some(to_move), events);
            return true;
        }
        false
    }

    fn end_game(
        &mut self,
        status: GameStatus,
        stuck: Option<Faction>,
        events: &mut Vec<ControllerEvent>,
    ) {
        if let Some(faction) = stuck {
            events.push(ControllerEvent::NoLegalMoves(faction));
        }
        info!(?status, "game over");
        self.record.finish(status);
        self.phase = TurnPhase::GameOver(status);
        events.push(ControllerEvent::GameOver(status));
    }

    fn resting_phase(&self) -> TurnPhase {
        let status = self.board.status();
        if status.is_over() {
            return TurnPhase::GameOver(status);
        }
        if !has_legal_moves(&self.board, PLAYER) {
            return TurnPhase::GameOver(GameStatus::Won(OPPONENT));
        }
        TurnPhase::SelectPiece
    }
}
