//! # Scoring
//!
//! Point values for letter tiles. A tile scores the rarity tier of its letter,
//! plus a bonus of one when it sits at the crossing of two words, never more
//! than [`MAX_TILE_SCORE`]. The same rule applies to the player's board and to
//! the solution, so the two totals are directly comparable.
//!
//! Every transform here is pure and shape-preserving: scoring a scored board
//! changes nothing, and unscoring a scored board restores the board that was
//! scored.

use serde::{Deserialize, Serialize};

use crate::{
	board::{Board, LetterGrid, SolutionBoard, TileState, GRID_SIZE},
	validator::{crossings, extract_words}
};

/// The highest score any single tile can earn.
pub const MAX_TILE_SCORE: u32 = 4;

/// Answer the rarity tier of a letter: 1 for the commonest letters, up to 4
/// for the rarest. Non-letters are worth nothing.
///
/// # Arguments
///
/// * `letter` - The letter, in either case.
///
/// # Returns
///
/// The tier.
#[must_use]
pub fn letter_tier(letter: char) -> u32
{
	match letter.to_ascii_uppercase()
	{
		'E' | 'A' | 'I' | 'O' | 'N' | 'R' | 'T' | 'L' | 'S' | 'U' => 1,
		'D' | 'G' | 'B' | 'C' | 'M' | 'P' | 'H' => 2,
		'F' | 'K' | 'V' | 'W' | 'Y' => 3,
		'J' | 'Q' | 'X' | 'Z' => 4,
		_ => 0
	}
}

/// Compute the score of one tile.
///
/// # Arguments
///
/// * `letter` - The letter on the tile.
/// * `crossing` - The number of words that include the tile.
/// * `state` - The validity annotation of the tile.
#[inline]
#[must_use]
fn tile_score(letter: char, crossing: usize, state: TileState) -> u32
{
	let tier = letter_tier(letter);
	match state
	{
		TileState::Invalid | TileState::Incorrect => 0,
		TileState::Mixed => tier,
		TileState::Idle | TileState::Valid =>
			(tier + u32::from(crossing >= 2)).min(MAX_TILE_SCORE)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Player boards.                               //
////////////////////////////////////////////////////////////////////////////////

/// Attach a score to every occupied tile of the board. Empty tiles carry no
/// score. The score depends only on the letters and their annotations, which
/// are preserved, so the transform is idempotent.
///
/// # Arguments
///
/// * `board` - The board to score, normally freshly validated.
///
/// # Returns
///
/// The scored board.
pub fn create_scored_board(board: &Board) -> Board
{
	let counts = crossings(&extract_words(board));
	let mut scored = board.clone();
	for tile in scored.tiles.iter_mut().flatten()
	{
		tile.score = tile.letter
			.map(|l| tile_score(l.letter, counts[tile.row][tile.col], tile.state));
	}
	scored
}

/// Strip every score from the board. Nothing else changes.
pub fn create_unscored_board(board: &Board) -> Board
{
	let mut unscored = board.clone();
	for tile in unscored.tiles.iter_mut().flatten()
	{
		tile.score = None;
	}
	unscored
}

/// Sum the scores of a scored board. Unscored tiles contribute nothing.
#[must_use]
pub fn count_board_score(board: &Board) -> u32
{
	board.iter().filter_map(|t| t.score).sum()
}

////////////////////////////////////////////////////////////////////////////////
//                                 Solutions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// A letter of the solution, with its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoredSolutionTile
{
	pub letter: char,
	pub score: u32
}

/// The solution, with a score on every letter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub struct ScoredSolutionBoard
{
	pub tiles: [[Option<ScoredSolutionTile>; GRID_SIZE]; GRID_SIZE]
}

impl LetterGrid for ScoredSolutionBoard
{
	#[inline]
	fn letter_at(&self, row: usize, col: usize) -> Option<char>
	{
		self.tiles[row][col].map(|t| t.letter)
	}
}

impl ScoredSolutionBoard
{
	/// Recover the plain solution.
	pub fn unscored(&self) -> SolutionBoard
	{
		let mut solution = SolutionBoard::empty();
		for row in 0 .. GRID_SIZE
		{
			for col in 0 .. GRID_SIZE
			{
				solution.set(row, col, self.letter_at(row, col));
			}
		}
		solution
	}
}

/// Score the solution. Every word of the solution is valid, so every letter
/// earns its tier plus any crossing bonus.
///
/// # Arguments
///
/// * `solution` - The solution to score.
///
/// # Returns
///
/// The scored solution.
pub fn create_scored_solution_board(
	solution: &SolutionBoard
) -> ScoredSolutionBoard
{
	let counts = crossings(&extract_words(solution));
	let mut scored = ScoredSolutionBoard::default();
	for (row, col) in solution.occupied()
	{
		scored.tiles[row][col] = solution.letter_at(row, col).map(|letter| {
			ScoredSolutionTile {
				letter,
				score: tile_score(letter, counts[row][col], TileState::Valid)
			}
		});
	}
	scored
}

/// Sum the scores of a scored solution.
#[must_use]
pub fn count_solution_board_score(solution: &ScoredSolutionBoard) -> u32
{
	solution.tiles.iter().flatten().flatten().map(|t| t.score).sum()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
