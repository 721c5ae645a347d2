use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    Shown,
}

impl RevealState {
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Shown,
            Self::Shown => Self::Hidden,
        }
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What happens to the player's picks when the differences are hidden again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HidePolicy {
    KeepSelection,
    ClearSelection,
}

impl Default for HidePolicy {
    fn default() -> Self {
        Self::KeepSelection
    }
}

/// Presentation state of a single right-grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    Plain,
    Selected,
    Revealed,
    CorrectPick,
}

impl CellMark {
    pub const fn has_border(self) -> bool {
        !matches!(self, Self::Plain)
    }

    /// Marked cells are raised so their border is not clipped by neighbors.
    pub const fn z_index(self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::Selected => 1,
            Self::Revealed => 1,
            Self::CorrectPick => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Picks that are true differences.
    pub correct: CellCount,
    pub selected: CellCount,
    /// Differences on the board.
    pub total: CellCount,
}

impl Score {
    pub const fn is_perfect(&self) -> bool {
        self.correct == self.total
    }

    pub const fn missed(&self) -> CellCount {
        self.total - self.correct
    }

    pub const fn wrong(&self) -> CellCount {
        self.selected - self.correct
    }
}

/// Selection and reveal state for the current board.
///
/// The player picks cells on the right grid, at most as many as there are differences. Revealing
/// marks every true difference; hiding clears those marks again. Replacing the board always goes
/// through [`PlayEngine::replace_board`] so the new grids never pair with stale picks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayEngineRepr")]
pub struct PlayEngine {
    board: Board,
    selection: BTreeSet<CellIndex>,
    state: RevealState,
    revealed: BTreeSet<CellIndex>,
    policy: HidePolicy,
}

#[derive(Deserialize)]
struct PlayEngineRepr {
    board: Board,
    selection: BTreeSet<CellIndex>,
    state: RevealState,
    revealed: BTreeSet<CellIndex>,
    policy: HidePolicy,
}

impl TryFrom<PlayEngineRepr> for PlayEngine {
    type Error = GameError;

    /// Picks must be on the board and within the cap, and the revealed cells must match `state`.
    fn try_from(repr: PlayEngineRepr) -> Result<Self> {
        let PlayEngineRepr {
            board,
            selection,
            state,
            revealed,
            policy,
        } = repr;

        for &index in &selection {
            board.validate_index(index)?;
        }
        if selection.len() > usize::from(board.difference_count()) {
            return Err(GameError::InconsistentState);
        }
        let expected = match state {
            RevealState::Hidden => BTreeSet::new(),
            RevealState::Shown => board.difference_indices(),
        };
        if revealed != expected {
            return Err(GameError::InconsistentState);
        }

        Ok(Self {
            board,
            selection,
            state,
            revealed,
            policy,
        })
    }
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        Self::with_policy(board, HidePolicy::default())
    }

    pub fn with_policy(board: Board, policy: HidePolicy) -> Self {
        Self {
            board,
            selection: BTreeSet::new(),
            state: Default::default(),
            revealed: BTreeSet::new(),
            policy,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    /// Maximum number of simultaneous picks.
    pub fn cap(&self) -> CellCount {
        self.board.difference_count()
    }

    pub fn policy(&self) -> HidePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: HidePolicy) {
        self.policy = policy;
    }

    pub fn selection(&self) -> &BTreeSet<CellIndex> {
        &self.selection
    }

    pub fn is_selected(&self, index: CellIndex) -> bool {
        self.selection.contains(&index)
    }

    pub fn is_full(&self) -> bool {
        self.selection.len() >= usize::from(self.cap())
    }

    pub fn reveal_state(&self) -> RevealState {
        self.state
    }

    /// Indices of every difference while shown, empty while hidden.
    pub fn correct_set(&self) -> &BTreeSet<CellIndex> {
        &self.revealed
    }

    /// Picks that turned out to be differences, empty while hidden.
    pub fn correct_picks(&self) -> BTreeSet<CellIndex> {
        self.selection
            .intersection(&self.revealed)
            .copied()
            .collect()
    }

    pub fn mark_at(&self, index: CellIndex) -> CellMark {
        match (self.is_selected(index), self.revealed.contains(&index)) {
            (true, true) => CellMark::CorrectPick,
            (false, true) => CellMark::Revealed,
            (true, false) => CellMark::Selected,
            (false, false) => CellMark::Plain,
        }
    }

    /// Tally of the player's picks against the revealed differences, only while shown.
    pub fn score(&self) -> Option<Score> {
        self.state.is_shown().then(|| self.tally())
    }

    /// Adds or removes `index` from the picks. Adding to a full selection is a silent no-op.
    pub fn toggle_select(&mut self, index: CellIndex) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let index = self.board.validate_index(index)?;

        Ok(if self.selection.remove(&index) {
            Deselected
        } else if self.is_full() {
            log::debug!("Selection full at {}, ignoring pick {}", self.cap(), index);
            NoChange
        } else {
            self.selection.insert(index);
            Selected
        })
    }

    pub fn toggle_select_at(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.toggle_select(linear_index(coords, self.size()))
    }

    pub fn toggle_reveal(&mut self) -> RevealState {
        match self.state {
            RevealState::Hidden => {
                self.revealed = self.board.difference_indices();
                let score = self.tally();
                log::debug!("Revealed differences, {}/{} correct", score.correct, score.total);
            }
            RevealState::Shown => {
                self.revealed.clear();
                if matches!(self.policy, HidePolicy::ClearSelection) {
                    self.selection.clear();
                }
            }
        }
        self.state = self.state.toggled();
        self.state
    }

    pub fn reset(&mut self) {
        self.selection.clear();
        self.revealed.clear();
        self.state = RevealState::Hidden;
    }

    /// Swaps in `board` and resets every piece of state tied to the old one.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.reset();
    }

    /// Generates a new board for `config`; on error the current board stays untouched.
    pub fn regenerate<G: BoardGenerator>(&mut self, generator: G, config: BoardConfig) -> Result<()> {
        let config = config.validate()?;
        self.replace_board(generator.generate(config));
        Ok(())
    }

    pub fn regenerate_with<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
        size: Coord,
        differences: CellCount,
    ) -> Result<()> {
        let board = generate_board(size, differences, source)?;
        self.replace_board(board);
        Ok(())
    }

    fn tally(&self) -> Score {
        // both sets are bounded by the cap
        Score {
            correct: self.selection.intersection(&self.revealed).count() as CellCount,
            selected: self.selection.len() as CellCount,
            total: self.cap(),
        }
    }
}
