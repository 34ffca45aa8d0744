//! # Validator
//!
//! Word extraction and dictionary validation. A word is any maximal run of two
//! or more occupied cells, read left to right along a row or top to bottom
//! along a column. A tile's state is the union of the outcomes of the words
//! that cross it; single letters that belong to no word are never invalid on
//! their own (connectivity is checked separately, by the
//! [island](crate::island) module).

use std::fmt::{self, Display, Formatter};

use fixedstr::str8;
use log::{debug, trace};

use crate::{
	board::{Board, LetterGrid, TileState, GRID_SIZE},
	dictionary::Dictionary
};

////////////////////////////////////////////////////////////////////////////////
//                                Extraction.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The reading direction of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis
{
	/// Left to right, along a row.
	Horizontal,

	/// Top to bottom, along a column.
	Vertical
}

/// A candidate word: a maximal run of at least two occupied cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word
{
	/// The letters of the run, uppercase.
	pub text: str8,

	/// The reading direction.
	pub axis: Axis,

	/// The `(row, column)` positions of the letters, in reading order.
	pub cells: Vec<(usize, usize)>
}

impl Display for Word
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}", self.text)
	}
}

/// Extract every candidate word from the grid: first the rows, top to bottom,
/// then the columns, left to right.
///
/// # Arguments
///
/// * `grid` - The grid to scan.
///
/// # Returns
///
/// The candidate words.
pub fn extract_words<G: LetterGrid + ?Sized>(grid: &G) -> Vec<Word>
{
	let mut words = Vec::new();
	for line in 0 .. GRID_SIZE
	{
		scan_line(grid, Axis::Horizontal, line, &mut words);
	}
	for line in 0 .. GRID_SIZE
	{
		scan_line(grid, Axis::Vertical, line, &mut words);
	}
	words
}

/// Scan a single row or column for runs.
fn scan_line<G: LetterGrid + ?Sized>(
	grid: &G,
	axis: Axis,
	line: usize,
	words: &mut Vec<Word>
) {
	let position = |i: usize| match axis
	{
		Axis::Horizontal => (line, i),
		Axis::Vertical => (i, line)
	};
	let mut run = Vec::<(usize, usize)>::new();
	// One extra step past the edge flushes a run that touches the boundary.
	for i in 0 ..= GRID_SIZE
	{
		let cell = (i < GRID_SIZE).then(|| position(i));
		match cell
		{
			Some((row, col)) if grid.letter_at(row, col).is_some() =>
				run.push((row, col)),
			_ =>
			{
				if run.len() >= 2
				{
					let mut text = str8::new();
					for &(row, col) in &run
					{
						if let Some(c) = grid.letter_at(row, col)
						{
							text.push_char(c);
						}
					}
					words.push(Word { text, axis, cells: run.clone() });
				}
				run.clear();
			}
		}
	}
}

/// Count, for every cell, the number of candidate words that cross it.
///
/// # Arguments
///
/// * `words` - The candidate words of a grid.
///
/// # Returns
///
/// The crossing counts, indexed by row and then column. Each count is 0, 1,
/// or 2.
#[must_use]
pub fn crossings(words: &[Word]) -> [[usize; GRID_SIZE]; GRID_SIZE]
{
	let mut counts = [[0; GRID_SIZE]; GRID_SIZE];
	for &(row, col) in words.iter().flat_map(|w| w.cells.iter())
	{
		counts[row][col] += 1;
	}
	counts
}

////////////////////////////////////////////////////////////////////////////////
//                                Validation.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Validate the board against the dictionary.
///
/// # Arguments
///
/// * `board` - The board to validate.
/// * `dictionary` - The dictionary of valid words.
///
/// # Returns
///
/// A 2-tuple comprising the annotated board and whether every candidate word
/// is in the dictionary, respectively. Tiles crossed by no word come back
/// [idle](TileState::Idle).
pub fn validate_board(board: &Board, dictionary: &Dictionary) -> (Board, bool)
{
	let words = extract_words(board);
	let mut valid = [[0usize; GRID_SIZE]; GRID_SIZE];
	let mut invalid = [[0usize; GRID_SIZE]; GRID_SIZE];
	let mut all_valid = true;
	for word in &words
	{
		let is_valid = dictionary.contains(word.text.as_str());
		trace!("candidate {:?} {}: {}", word.axis, word.text, is_valid);
		let counts = if is_valid { &mut valid } else { &mut invalid };
		for &(row, col) in &word.cells
		{
			counts[row][col] += 1;
		}
		all_valid &= is_valid;
	}
	let mut annotated = board.clone();
	for tile in annotated.tiles.iter_mut().flatten()
	{
		let (row, col) = (tile.row, tile.col);
		tile.state = TileState::classify(valid[row][col], invalid[row][col])
			.unwrap_or(TileState::Idle);
	}
	debug!(
		"validated {} candidate words: {}",
		words.len(),
		if all_valid { "all valid" } else { "some invalid" }
	);
	(annotated, all_valid)
}

/// Check whether every candidate word of the grid is in the dictionary.
#[must_use]
pub fn all_words_valid<G: LetterGrid + ?Sized>(
	grid: &G,
	dictionary: &Dictionary
) -> bool
{
	extract_words(grid).iter()
		.all(|w| dictionary.contains(w.text.as_str()))
}

/// Answer the candidate words that are in the dictionary, in extraction
/// order.
#[must_use]
pub fn valid_words<G: LetterGrid + ?Sized>(
	grid: &G,
	dictionary: &Dictionary
) -> Vec<String>
{
	extract_words(grid).into_iter()
		.filter(|w| dictionary.contains(w.text.as_str()))
		.map(|w| w.text.to_string())
		.collect()
}

/// Answer the candidate words that are absent from the dictionary, in
/// extraction order.
#[must_use]
pub fn invalid_words<G: LetterGrid + ?Sized>(
	grid: &G,
	dictionary: &Dictionary
) -> Vec<String>
{
	extract_words(grid).into_iter()
		.filter(|w| !dictionary.contains(w.text.as_str()))
		.map(|w| w.text.to_string())
		.collect()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		board::{Board, Letter, SolutionBoard, TileState},
		dictionary::Dictionary,
		validator::*
	};

	/// Build a board from rows of text, '.' marking empty cells.
	fn board(rows: [&str; 6]) -> Board
	{
		let mut board = Board::new();
		let mut id = 0;
		for (row, text) in rows.iter().enumerate()
		{
			for (col, c) in text.chars().enumerate()
			{
				if c != '.'
				{
					board.tiles[row][col].letter = Some(Letter::new(id, c));
					id += 1;
				}
			}
		}
		board
	}

	fn dictionary() -> Dictionary
	{
		Dictionary::from_iter(["cat", "cats", "at", "to", "tea"])
	}

	/// Ensure that a run touching the edge is extracted, and that single
	/// letters are not words.
	#[test]
	fn test_extract_words()
	{
		let b = board([
			"CAT..X",
			"......",
			"...DOG",
			"......",
			"......",
			"Z....."
		]);
		let words = extract_words(&b);
		let texts = words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
		assert_eq!(texts, ["CAT", "DOG"]);
		assert_eq!(words[0].axis, Axis::Horizontal);
		assert_eq!(words[0].cells, [(0, 0), (0, 1), (0, 2)]);
		assert_eq!(words[1].cells, [(2, 3), (2, 4), (2, 5)]);
	}

	/// Ensure that vertical runs are read top to bottom.
	#[test]
	fn test_extract_vertical()
	{
		let b = board([
			".....T",
			".....E",
			".....A",
			"......",
			"......",
			"......"
		]);
		let words = extract_words(&b);
		assert_eq!(words.len(), 1);
		assert_eq!(words[0].text.as_str(), "TEA");
		assert_eq!(words[0].axis, Axis::Vertical);
		let counts = crossings(&words);
		assert_eq!(counts[1][5], 1);
		assert_eq!(counts[0][0], 0);
	}

	/// Ensure that a valid word marks its tiles valid.
	#[test]
	fn test_validate_valid_word()
	{
		let b = board([
			"CAT...",
			"......",
			"......",
			"......",
			"......",
			"......"
		]);
		let (annotated, all_valid) = validate_board(&b, &dictionary());
		assert!(all_valid);
		for col in 0 .. 3
		{
			assert_eq!(annotated.tile(0, col).state, TileState::Valid);
		}
		assert_eq!(annotated.tile(0, 3).state, TileState::Idle);
	}

	/// Ensure that an unknown word marks its tiles invalid.
	#[test]
	fn test_validate_invalid_word()
	{
		let b = board([
			"CAT...",
			"......",
			"......",
			"......",
			"......",
			"......"
		]);
		let (annotated, all_valid) =
			validate_board(&b, &Dictionary::from_iter(["dog"]));
		assert!(!all_valid);
		for col in 0 .. 3
		{
			assert_eq!(annotated.tile(0, col).state, TileState::Invalid);
		}
	}

	/// Ensure that a tile on a valid word and an invalid word is mixed, and
	/// that a lone letter is untouched.
	#[test]
	fn test_validate_mixed()
	{
		let b = board([
			"CAT...",
			".X....",
			"......",
			"......",
			"....Q.",
			"......"
		]);
		let (annotated, all_valid) = validate_board(&b, &dictionary());
		assert!(!all_valid);
		assert_eq!(annotated.tile(0, 0).state, TileState::Valid);
		assert_eq!(annotated.tile(0, 1).state, TileState::Mixed);
		assert_eq!(annotated.tile(1, 1).state, TileState::Invalid);
		assert_eq!(annotated.tile(4, 4).state, TileState::Idle);
		assert_eq!(valid_words(&b, &dictionary()), ["CAT"]);
		assert_eq!(invalid_words(&b, &dictionary()), ["AX"]);
	}

	/// Ensure that stale annotations are cleared from tiles outside any word.
	#[test]
	fn test_validate_clears_stale_state()
	{
		let mut b = board([
			"C.....",
			"......",
			"......",
			"......",
			"......",
			"......"
		]);
		b.tiles[0][0].state = TileState::Invalid;
		let (annotated, all_valid) = validate_board(&b, &dictionary());
		assert!(all_valid);
		assert_eq!(annotated.tile(0, 0).state, TileState::Idle);
	}

	/// Ensure that solution boards validate through the same extraction.
	#[test]
	fn test_solution_words()
	{
		let solution = SolutionBoard::from_rows(&[
			"CATS..",
			".T....",
			"......",
			"......",
			"......",
			"......"
		]).unwrap();
		assert!(all_words_valid(&solution, &dictionary()));
		assert_eq!(valid_words(&solution, &dictionary()), ["CATS", "AT"]);
	}
}
