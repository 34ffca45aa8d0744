//! # Board
//!
//! The player's 6×6 board: the tile grid, the typing cursor, and the pure
//! operations that move the cursor, place and remove letters, and shift every
//! placed letter around the grid. Every operation answers a fresh [`Board`],
//! leaving the receiver untouched, so a caller always holds a consistent
//! snapshot.
//!
//! Also herein is the [`SolutionBoard`], the plain-character grid of the
//! canonical daily answer, and the [`LetterGrid`] abstraction shared by both
//! boards so that word extraction, connectivity, and scoring can run against
//! either.

use std::{
	collections::HashSet,
	error::Error,
	fmt::{self, Display, Formatter}
};

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                 Constants.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The number of rows (and columns) of the board.
pub const GRID_SIZE: usize = 6;

/// The number of letters in the daily tray. Every one of them must be placed
/// before the puzzle can be submitted.
pub const MAX_LETTERS: usize = 20;

////////////////////////////////////////////////////////////////////////////////
//                                  Letters.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The identity of a tray letter. Distinguishes duplicate letters, e.g., two
/// `E` tiles, and joins the tray to the board.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
	Serialize, Deserialize
)]
pub struct LetterId(pub u8);

/// A tray letter. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letter
{
	/// The unique identity of the letter.
	pub id: LetterId,

	/// The uppercase character.
	pub letter: char
}

impl Letter
{
	/// Construct a letter, uppercasing the character.
	#[inline]
	pub fn new(id: u8, letter: char) -> Self
	{
		Self { id: LetterId(id), letter: letter.to_ascii_uppercase() }
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tiles.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The validity annotation of a tile. This is derived state, never puzzle
/// truth: it is recomputed by validation and discarded by every edit.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize
)]
pub enum TileState
{
	/// Not yet evaluated.
	#[default]
	Idle,

	/// Belongs only to dictionary words.
	Valid,

	/// Belongs only to words absent from the dictionary.
	Invalid,

	/// Belongs to one valid and one invalid word.
	Mixed,

	/// After a hard-mode submission, the letter differs from the solution.
	Incorrect
}

impl TileState
{
	/// Classify a tile from the outcomes of the words that cross it.
	///
	/// # Arguments
	///
	/// * `valid` - The number of crossing words found in the dictionary.
	/// * `invalid` - The number of crossing words absent from the dictionary.
	///
	/// # Returns
	///
	/// The classification, or `None` if no word crosses the tile.
	#[inline]
	#[must_use]
	pub fn classify(valid: usize, invalid: usize) -> Option<Self>
	{
		match (valid, invalid)
		{
			(0, 0) => None,
			(_, 0) => Some(Self::Valid),
			(0, _) => Some(Self::Invalid),
			_ => Some(Self::Mixed)
		}
	}
}

/// Why a tile's content last changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileChangeReason
{
	/// A letter was typed onto the tile.
	Letter,

	/// The letter arrived by shifting the whole board.
	Moved
}

/// A single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile
{
	/// The identity of the cell. Stable for the lifetime of the board.
	pub id: u8,

	/// The row of the cell.
	pub row: usize,

	/// The column of the cell.
	pub col: usize,

	/// The letter occupying the cell, if any.
	pub letter: Option<Letter>,

	/// The validity annotation.
	pub state: TileState,

	/// Why the content last changed, if it changed at all.
	pub change_reason: Option<TileChangeReason>,

	/// Whether the cell is pinned (hard mode) and therefore cannot be edited.
	pub is_locked: bool,

	/// The point value, present only on a scored board.
	pub score: Option<u32>
}

impl Tile
{
	/// Construct an empty tile at the given position.
	fn empty(row: usize, col: usize) -> Self
	{
		Self {
			id: (row * GRID_SIZE + col) as u8,
			row,
			col,
			letter: None,
			state: TileState::Idle,
			change_reason: None,
			is_locked: false,
			score: None
		}
	}

	/// Remove the letter, and with it any annotation.
	fn clear(&mut self)
	{
		self.letter = None;
		self.state = TileState::Idle;
		self.change_reason = None;
		self.score = None;
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Cursor.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The typing direction of the cursor.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize
)]
pub enum CursorDirection
{
	#[default]
	LeftToRight,
	TopToBottom
}

impl CursorDirection
{
	/// Answer the other direction.
	#[inline]
	#[must_use]
	pub fn flipped(self) -> Self
	{
		match self
		{
			Self::LeftToRight => Self::TopToBottom,
			Self::TopToBottom => Self::LeftToRight
		}
	}
}

/// A compass direction, for arrow navigation and board shifting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction
{
	Up,
	Down,
	Left,
	Right
}

impl Direction
{
	/// All directions.
	pub const ALL: [Direction; 4] =
		[Direction::Up, Direction::Down, Direction::Left, Direction::Right];

	/// Answer the opposite direction.
	#[inline]
	#[must_use]
	pub fn opposite(self) -> Self
	{
		match self
		{
			Self::Up => Self::Down,
			Self::Down => Self::Up,
			Self::Left => Self::Right,
			Self::Right => Self::Left
		}
	}

	/// Answer the `(row, column)` delta of a single step.
	#[inline]
	#[must_use]
	fn delta(self) -> (isize, isize)
	{
		match self
		{
			Self::Up => (-1, 0),
			Self::Down => (1, 0),
			Self::Left => (0, -1),
			Self::Right => (0, 1)
		}
	}
}

/// The selected tile plus the typing direction.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize
)]
pub struct Cursor
{
	pub row: usize,
	pub col: usize,
	pub direction: CursorDirection
}

/// Step a coordinate, wrapping toroidally at the grid boundary.
#[inline]
#[must_use]
fn wrap(index: usize, delta: isize) -> usize
{
	(index as isize + delta).rem_euclid(GRID_SIZE as isize) as usize
}

////////////////////////////////////////////////////////////////////////////////
//                                   Board.                                   //
////////////////////////////////////////////////////////////////////////////////

/// Read-only access to the letters of a square grid, so that the same
/// algorithms serve the player's board and the solution.
pub trait LetterGrid
{
	/// Answer the letter at the given position, if any.
	fn letter_at(&self, row: usize, col: usize) -> Option<char>;

	/// Answer the positions of every occupied cell, in row-major order.
	fn occupied(&self) -> Vec<(usize, usize)>
	{
		(0 .. GRID_SIZE)
			.flat_map(|row| (0 .. GRID_SIZE).map(move |col| (row, col)))
			.filter(|&(row, col)| self.letter_at(row, col).is_some())
			.collect()
	}
}

/// The player's board. The single mutable aggregate of a session, persisted
/// wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Board
{
	/// The cursor.
	pub cursor: Cursor,

	/// The tiles, indexed by row and then column. Every tile's coordinates
	/// match its position here.
	pub tiles: [[Tile; GRID_SIZE]; GRID_SIZE]
}

impl Default for Board
{
	fn default() -> Self { Self::new() }
}

impl LetterGrid for Board
{
	#[inline]
	fn letter_at(&self, row: usize, col: usize) -> Option<char>
	{
		self.tiles[row][col].letter.map(|l| l.letter)
	}
}

// Queries.
impl Board
{
	/// Construct an empty board with the cursor at the origin, typing left to
	/// right.
	pub fn new() -> Self
	{
		Self {
			cursor: Cursor::default(),
			tiles: std::array::from_fn(|row| {
				std::array::from_fn(|col| Tile::empty(row, col))
			})
		}
	}

	/// Get the tile at the given position.
	///
	/// # Panics
	///
	/// If the position is out of range.
	#[inline]
	#[must_use]
	pub fn tile(&self, row: usize, col: usize) -> &Tile
	{
		&self.tiles[row][col]
	}

	/// Get an iterator over every tile, in row-major order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_
	{
		self.tiles.iter().flatten()
	}

	/// Get the tile under the cursor.
	#[inline]
	#[must_use]
	pub fn tile_at_cursor(&self) -> &Tile
	{
		self.tile(self.cursor.row, self.cursor.col)
	}

	/// Answer the identities of every letter on the board.
	#[must_use]
	pub fn letter_ids(&self) -> HashSet<LetterId>
	{
		self.iter().filter_map(|t| t.letter.map(|l| l.id)).collect()
	}

	/// Answer the number of occupied tiles.
	#[must_use]
	pub fn letter_count(&self) -> usize
	{
		self.iter().filter(|t| t.letter.is_some()).count()
	}

	/// Check whether any tile carries a score.
	#[must_use]
	pub fn is_scored(&self) -> bool
	{
		self.iter().any(|t| t.score.is_some())
	}

	/// Compute the cursor that follows the current one in the typing
	/// direction, wrapping around to the start of the row or column.
	///
	/// # Returns
	///
	/// The advanced cursor.
	#[must_use]
	pub fn increment_cursor(&self) -> Cursor
	{
		self.step_cursor(1)
	}

	/// Compute the cursor that precedes the current one in the typing
	/// direction, wrapping around to the end of the row or column. This is
	/// the exact inverse of [`increment_cursor`](Self::increment_cursor).
	///
	/// # Returns
	///
	/// The retreated cursor.
	#[must_use]
	pub fn decrement_cursor(&self) -> Cursor
	{
		self.step_cursor(-1)
	}

	fn step_cursor(&self, delta: isize) -> Cursor
	{
		let Cursor { row, col, direction } = self.cursor;
		match direction
		{
			CursorDirection::LeftToRight =>
				Cursor { row, col: wrap(col, delta), direction },
			CursorDirection::TopToBottom =>
				Cursor { row: wrap(row, delta), col, direction }
		}
	}
}

// Operations. None of these mutate the receiver.
impl Board
{
	/// Move the cursor one cell in the given direction, as the arrow keys do.
	/// The typing direction never changes.
	///
	/// # Arguments
	///
	/// * `direction` - Where to move.
	///
	/// # Returns
	///
	/// The board with the moved cursor.
	pub fn update_cursor_in_direction(&self, direction: Direction) -> Self
	{
		let (dr, dc) = direction.delta();
		let mut board = self.clone();
		board.cursor.row = wrap(self.cursor.row, dr);
		board.cursor.col = wrap(self.cursor.col, dc);
		board
	}

	/// Select a tile. Selecting the tile already under the cursor flips the
	/// typing direction instead.
	///
	/// # Arguments
	///
	/// * `row` - The row of the selected tile.
	/// * `col` - The column of the selected tile.
	///
	/// # Returns
	///
	/// The board with the updated cursor.
	pub fn update_cursor(&self, row: usize, col: usize) -> Self
	{
		assert!(row < GRID_SIZE && col < GRID_SIZE);
		if self.cursor.row == row && self.cursor.col == col
		{
			return self.flip_cursor_direction()
		}
		let mut board = self.clone();
		board.cursor.row = row;
		board.cursor.col = col;
		board
	}

	/// Flip the typing direction.
	pub fn flip_cursor_direction(&self) -> Self
	{
		let mut board = self.clone();
		board.cursor.direction = self.cursor.direction.flipped();
		board
	}

	/// Shift every placed letter one cell in the given direction. Letters that
	/// would leave the grid reappear at the opposite edge, so no progress is
	/// ever lost. Locked tiles travel with their letters. The cursor stays
	/// where it is.
	///
	/// # Arguments
	///
	/// * `direction` - Where to shift.
	///
	/// # Returns
	///
	/// The shifted board, with every tile back in the idle state.
	pub fn move_board(&self, direction: Direction) -> Self
	{
		let (dr, dc) = direction.delta();
		let mut board = self.clone();
		for tile in self.iter()
		{
			let target =
				&mut board.tiles[wrap(tile.row, dr)][wrap(tile.col, dc)];
			target.letter = tile.letter;
			target.is_locked = tile.is_locked;
			target.state = TileState::Idle;
			target.score = None;
			target.change_reason =
				tile.letter.map(|_| TileChangeReason::Moved);
		}
		board
	}

	/// Place a letter on the tile under the cursor, then advance the cursor.
	/// If the letter already sits elsewhere on the board, it moves. Every tile
	/// returns to the idle state, since stale validity must not survive an
	/// edit.
	///
	/// # Arguments
	///
	/// * `letter` - The tray letter to place.
	///
	/// # Returns
	///
	/// The updated board.
	///
	/// # Errors
	///
	/// [`EditError::Locked`] if either the target tile or the tile currently
	/// holding `letter` is locked. The board is unchanged.
	pub fn set_letter(&self, letter: Letter) -> Result<Self, EditError>
	{
		let Cursor { row, col, .. } = self.cursor;
		self.ensure_unlocked(row, col)?;
		let mut board = self.reset_tile_states();
		let previous = self.iter()
			.find(|t| {
				(t.row, t.col) != (row, col)
					&& t.letter.map(|l| l.id) == Some(letter.id)
			})
			.map(|t| (t.row, t.col));
		if let Some((r, c)) = previous
		{
			self.ensure_unlocked(r, c)?;
			board.tiles[r][c].clear();
		}
		let tile = &mut board.tiles[row][col];
		tile.letter = Some(letter);
		tile.state = TileState::Idle;
		tile.change_reason = Some(TileChangeReason::Letter);
		board.cursor = self.increment_cursor();
		Ok(board)
	}

	/// Delete a letter. If the tile under the cursor holds a letter, clear it
	/// in place. Otherwise step the cursor back first, then clear whatever is
	/// found there.
	///
	/// # Returns
	///
	/// The updated board.
	///
	/// # Errors
	///
	/// [`EditError::Locked`] if the tile to clear is locked. The board is
	/// unchanged, including the cursor.
	pub fn backspace(&self) -> Result<Self, EditError>
	{
		let cursor =
			if self.tile_at_cursor().letter.is_some() { self.cursor }
			else { self.decrement_cursor() };
		self.ensure_unlocked(cursor.row, cursor.col)?;
		let mut board = self.reset_tile_states();
		board.tiles[cursor.row][cursor.col].clear();
		board.cursor = cursor;
		Ok(board)
	}

	/// Remove every unlocked letter.
	pub fn reset(&self) -> Self
	{
		let mut board = self.reset_tile_states();
		board.tiles.iter_mut().flatten()
			.filter(|t| !t.is_locked)
			.for_each(Tile::clear);
		board
	}

	/// Return every tile to the idle state and drop any scores.
	pub fn reset_tile_states(&self) -> Self
	{
		let mut board = self.clone();
		for tile in board.tiles.iter_mut().flatten()
		{
			tile.state = TileState::Idle;
			tile.score = None;
		}
		board
	}

	/// Pin a letter to a tile. Used to seed hard-mode boards.
	///
	/// # Arguments
	///
	/// * `row` - The row of the tile.
	/// * `col` - The column of the tile.
	/// * `letter` - The letter to pin.
	pub fn lock_letter(&self, row: usize, col: usize, letter: Letter) -> Self
	{
		let mut board = self.clone();
		let tile = &mut board.tiles[row][col];
		tile.letter = Some(letter);
		tile.is_locked = true;
		tile.change_reason = None;
		board
	}

	/// Check that a tile may be edited.
	#[inline]
	fn ensure_unlocked(&self, row: usize, col: usize) -> Result<(), EditError>
	{
		if self.tiles[row][col].is_locked
		{
			Err(EditError::Locked { row, col })
		}
		else
		{
			Ok(())
		}
	}
}

/// The complete enumeration of rejected board edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditError
{
	/// The tile is pinned and cannot be edited.
	Locked {
		row: usize,
		col: usize
	}
}

impl Display for EditError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Locked { row, col } =>
				write!(f, "tile at row {}, column {} is locked", row, col)
		}
	}
}

impl Error for EditError {}

////////////////////////////////////////////////////////////////////////////////
//                              Solution board.                               //
////////////////////////////////////////////////////////////////////////////////

/// The canonical answer: plain uppercase characters, or nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub struct SolutionBoard
{
	cells: [[Option<char>; GRID_SIZE]; GRID_SIZE]
}

impl LetterGrid for SolutionBoard
{
	#[inline]
	fn letter_at(&self, row: usize, col: usize) -> Option<char>
	{
		self.cells[row][col]
	}
}

impl SolutionBoard
{
	/// Construct an empty solution board.
	#[inline]
	pub fn empty() -> Self { Default::default() }

	/// Parse a solution from its rows. Each row must hold exactly
	/// [`GRID_SIZE`] characters, each either a letter or `.` for an empty cell.
	///
	/// # Arguments
	///
	/// * `rows` - The rows, top to bottom.
	///
	/// # Returns
	///
	/// The solution board, or `None` if the rows are malformed.
	pub fn from_rows<T: AsRef<str>>(rows: &[T]) -> Option<Self>
	{
		if rows.len() != GRID_SIZE
		{
			return None
		}
		let mut board = Self::empty();
		for (row, text) in rows.iter().enumerate()
		{
			let chars = text.as_ref().chars().collect::<Vec<_>>();
			if chars.len() != GRID_SIZE
			{
				return None
			}
			for (col, c) in chars.into_iter().enumerate()
			{
				board.cells[row][col] = match c
				{
					'.' => None,
					c if c.is_ascii_alphabetic() =>
						Some(c.to_ascii_uppercase()),
					_ => return None
				};
			}
		}
		Some(board)
	}

	/// Set the content of a cell.
	#[inline]
	pub fn set(&mut self, row: usize, col: usize, letter: Option<char>)
	{
		self.cells[row][col] = letter.map(|c| c.to_ascii_uppercase());
	}

	/// Answer the number of occupied cells.
	#[must_use]
	pub fn letter_count(&self) -> usize
	{
		self.cells.iter().flatten().filter(|c| c.is_some()).count()
	}
}

impl Display for SolutionBoard
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		for (index, row) in self.cells.iter().enumerate()
		{
			if index > 0
			{
				writeln!(f)?;
			}
			for cell in row
			{
				write!(f, "{}", cell.unwrap_or('.'))?;
			}
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::board::*;

	/// Build a board holding `word` from the cursor onwards.
	fn typed(board: &Board, word: &str, first_id: u8) -> Board
	{
		word.chars().enumerate().fold(board.clone(), |board, (i, c)| {
			board.set_letter(Letter::new(first_id + i as u8, c)).unwrap()
		})
	}

	/// Answer the letters of a board, as rows of text.
	fn letters(board: &Board) -> Vec<String>
	{
		(0 .. GRID_SIZE)
			.map(|r| {
				(0 .. GRID_SIZE)
					.map(|c| board.letter_at(r, c).unwrap_or('.'))
					.collect()
			})
			.collect()
	}

	/// Ensure that every tile knows its own coordinates.
	#[test]
	fn test_new()
	{
		let board = Board::new();
		for (row, tiles) in board.tiles.iter().enumerate()
		{
			for (col, tile) in tiles.iter().enumerate()
			{
				assert_eq!((tile.row, tile.col), (row, col));
				assert_eq!(tile.state, TileState::Idle);
				assert!(tile.letter.is_none());
			}
		}
		assert_eq!(board.cursor, Cursor::default());
		assert_eq!(board.letter_count(), 0);
	}

	/// Ensure that decrementing undoes incrementing everywhere, and that the
	/// four corners wrap within their row or column.
	#[test]
	fn test_increment_decrement()
	{
		for direction in [CursorDirection::LeftToRight, CursorDirection::TopToBottom]
		{
			for row in 0 .. GRID_SIZE
			{
				for col in 0 .. GRID_SIZE
				{
					let mut board = Board::new();
					board.cursor = Cursor { row, col, direction };
					let mut next = board.clone();
					next.cursor = board.increment_cursor();
					assert_eq!(next.decrement_cursor(), board.cursor);
					let mut previous = board.clone();
					previous.cursor = board.decrement_cursor();
					assert_eq!(previous.increment_cursor(), board.cursor);
				}
			}
		}
		// Each case is a tuple of the starting cursor and the expected cursor
		// after incrementing and decrementing, respectively.
		let h = CursorDirection::LeftToRight;
		let v = CursorDirection::TopToBottom;
		let cases = [
			((0, 0, h), (0, 1), (0, 5)),
			((0, 5, h), (0, 0), (0, 4)),
			((5, 0, h), (5, 1), (5, 5)),
			((5, 5, h), (5, 0), (5, 4)),
			((0, 0, v), (1, 0), (5, 0)),
			((0, 5, v), (1, 5), (5, 5)),
			((5, 0, v), (0, 0), (4, 0)),
			((5, 5, v), (0, 5), (4, 5))
		];
		for ((row, col, direction), inc, dec) in cases
		{
			let mut board = Board::new();
			board.cursor = Cursor { row, col, direction };
			let next = board.increment_cursor();
			assert_eq!((next.row, next.col), inc, "increment {:?}", board.cursor);
			assert_eq!(next.direction, direction);
			let previous = board.decrement_cursor();
			assert_eq!((previous.row, previous.col), dec, "decrement {:?}", board.cursor);
		}
	}

	/// Ensure that arrow navigation wraps and never changes the typing
	/// direction.
	#[test]
	fn test_update_cursor_in_direction()
	{
		let mut board = Board::new();
		board.cursor.direction = CursorDirection::TopToBottom;
		let up = board.update_cursor_in_direction(Direction::Up);
		assert_eq!((up.cursor.row, up.cursor.col), (5, 0));
		assert_eq!(up.cursor.direction, CursorDirection::TopToBottom);
		let right = board.update_cursor_in_direction(Direction::Right);
		assert_eq!((right.cursor.row, right.cursor.col), (0, 1));
		assert_eq!(right.cursor.direction, CursorDirection::TopToBottom);
		let left = board.update_cursor_in_direction(Direction::Left);
		assert_eq!((left.cursor.row, left.cursor.col), (0, 5));
		let down = board.update_cursor_in_direction(Direction::Down);
		assert_eq!((down.cursor.row, down.cursor.col), (1, 0));
	}

	/// Ensure that selecting the current tile flips the direction, while
	/// selecting another tile moves the cursor.
	#[test]
	fn test_update_cursor()
	{
		let board = Board::new();
		let flipped = board.update_cursor(0, 0);
		assert_eq!(flipped.cursor.direction, CursorDirection::TopToBottom);
		let moved = flipped.update_cursor(3, 4);
		assert_eq!(moved.cursor.row, 3);
		assert_eq!(moved.cursor.col, 4);
		assert_eq!(moved.cursor.direction, CursorDirection::TopToBottom);
		assert_eq!(
			moved.flip_cursor_direction().cursor.direction,
			CursorDirection::LeftToRight
		);
	}

	/// Ensure that placing letters writes at the cursor and advances it.
	#[test]
	fn test_set_letter()
	{
		let board = typed(&Board::new(), "CAT", 0);
		assert_eq!(letters(&board)[0], "CAT...");
		assert_eq!((board.cursor.row, board.cursor.col), (0, 3));
		let tile = board.tile(0, 2);
		assert_eq!(tile.change_reason, Some(TileChangeReason::Letter));
		assert_eq!(tile.state, TileState::Idle);
		assert_eq!(board.letter_count(), 3);
		assert_eq!(board.letter_ids().len(), 3);
	}

	/// Ensure that placing a letter clears stale validity everywhere.
	#[test]
	fn test_set_letter_resets_states()
	{
		let mut board = typed(&Board::new(), "CAT", 0);
		board.tiles[0][0].state = TileState::Valid;
		board.tiles[0][1].state = TileState::Invalid;
		let board = board.set_letter(Letter::new(3, 'S')).unwrap();
		assert!(board.iter().all(|t| t.state == TileState::Idle));
	}

	/// Ensure that a letter identity never occupies two tiles.
	#[test]
	fn test_set_letter_moves_duplicate_identity()
	{
		let board = typed(&Board::new(), "CAT", 0);
		let board = board.update_cursor(2, 2);
		let board = board.set_letter(Letter::new(0, 'C')).unwrap();
		assert_eq!(board.letter_at(0, 0), None);
		assert_eq!(board.letter_at(2, 2), Some('C'));
		assert_eq!(board.letter_count(), 3);
	}

	/// Ensure that locked tiles refuse placement.
	#[test]
	fn test_set_letter_locked()
	{
		let board = Board::new().lock_letter(0, 0, Letter::new(9, 'Q'));
		assert_eq!(
			board.set_letter(Letter::new(0, 'A')),
			Err(EditError::Locked { row: 0, col: 0 })
		);
		assert_eq!(board.tile(0, 0).letter, Some(Letter::new(9, 'Q')));
		// Nor may a pinned letter be dragged elsewhere.
		let board = board.update_cursor(1, 1);
		assert!(board.set_letter(Letter::new(9, 'Q')).is_err());
	}

	/// Ensure that backspace clears in place when the tile has a letter, and
	/// steps back first when it does not.
	#[test]
	fn test_backspace()
	{
		let board = typed(&Board::new(), "CAT", 0);
		// The cursor sits on the empty tile after "CAT".
		let board = board.backspace().unwrap();
		assert_eq!(letters(&board)[0], "CA....");
		assert_eq!((board.cursor.row, board.cursor.col), (0, 2));
		// Now move onto the "A" and delete it without moving.
		let board = board.update_cursor_in_direction(Direction::Left);
		let board = board.backspace().unwrap();
		assert_eq!(letters(&board)[0], "C.....");
		assert_eq!((board.cursor.row, board.cursor.col), (0, 1));
		assert_eq!(board.tile(0, 1).change_reason, None);
	}

	/// Ensure that locked tiles refuse deletion, leaving the cursor alone.
	#[test]
	fn test_backspace_locked()
	{
		let board = Board::new()
			.lock_letter(0, 0, Letter::new(0, 'A'))
			.update_cursor(0, 1);
		assert_eq!(board.backspace(), Err(EditError::Locked { row: 0, col: 0 }));
		let board = board.update_cursor(0, 0);
		assert!(board.backspace().is_err());
	}

	/// Ensure that shifting wraps toroidally and is undone by the opposite
	/// shift.
	#[test]
	fn test_move_board()
	{
		let board = typed(&Board::new(), "CATS", 0);
		let board = board.update_cursor(4, 5).flip_cursor_direction();
		let board = typed(&board, "ON", 4);
		let right = board.move_board(Direction::Right);
		assert_eq!(letters(&right)[0], ".CATS.");
		assert_eq!(letters(&right)[4], "O.....");
		assert_eq!(letters(&right)[5], "N.....");
		let up = board.move_board(Direction::Up);
		assert_eq!(letters(&up)[0], "......");
		assert_eq!(letters(&up)[3], ".....O");
		assert_eq!(letters(&up)[4], ".....N");
		assert_eq!(letters(&up)[5], "CATS..");
		assert_eq!(up.tile(5, 0).change_reason, Some(TileChangeReason::Moved));
		assert_eq!(up.tile(0, 0).change_reason, None);
		for direction in Direction::ALL
		{
			let restored = board
				.move_board(direction)
				.move_board(direction.opposite());
			assert_eq!(letters(&restored), letters(&board), "{:?}", direction);
			// Six shifts in one direction is also the identity.
			let around = (0 .. GRID_SIZE)
				.fold(board.clone(), |b, _| b.move_board(direction));
			assert_eq!(letters(&around), letters(&board), "{:?}", direction);
		}
	}

	/// Ensure that locked tiles travel with the board.
	#[test]
	fn test_move_board_locked()
	{
		let board = Board::new().lock_letter(0, 5, Letter::new(0, 'Z'));
		let moved = board.move_board(Direction::Right);
		assert!(moved.tile(0, 0).is_locked);
		assert_eq!(moved.letter_at(0, 0), Some('Z'));
		assert!(!moved.tile(0, 5).is_locked);
		assert_eq!(moved.letter_at(0, 5), None);
	}

	/// Ensure that resetting keeps only pinned letters.
	#[test]
	fn test_reset()
	{
		let board = Board::new().lock_letter(3, 3, Letter::new(19, 'E'));
		let board = typed(&board, "DOG", 0);
		let board = board.reset();
		assert_eq!(board.letter_count(), 1);
		assert_eq!(board.letter_at(3, 3), Some('E'));
	}

	/// Ensure that tile classification covers every combination.
	#[test]
	fn test_classify()
	{
		assert_eq!(TileState::classify(0, 0), None);
		assert_eq!(TileState::classify(1, 0), Some(TileState::Valid));
		assert_eq!(TileState::classify(2, 0), Some(TileState::Valid));
		assert_eq!(TileState::classify(0, 1), Some(TileState::Invalid));
		assert_eq!(TileState::classify(0, 2), Some(TileState::Invalid));
		assert_eq!(TileState::classify(1, 1), Some(TileState::Mixed));
	}

	/// Ensure that solutions parse and print symmetrically.
	#[test]
	fn test_solution_from_rows()
	{
		let rows = ["cat...", "a.....", "r.....", "......", "......", "......"];
		let solution = SolutionBoard::from_rows(&rows).unwrap();
		assert_eq!(solution.letter_at(0, 0), Some('C'));
		assert_eq!(solution.letter_at(0, 3), None);
		assert_eq!(solution.letter_count(), 5);
		assert_eq!(solution.occupied()[..3], [(0, 0), (0, 1), (0, 2)]);
		assert!(solution.to_string().starts_with("CAT...\nA....."));
		assert!(SolutionBoard::from_rows(&rows[..5]).is_none());
		assert!(SolutionBoard::from_rows(&["cat..", "", "", "", "", ""]).is_none());
		assert!(SolutionBoard::from_rows(&["ca7...", "......", "......", "......", "......", "......"]).is_none());
	}
}
