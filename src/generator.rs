//! # Generator
//!
//! The daily puzzle. A [`Generator`] builds a crossword-style layout of
//! exactly [`MAX_LETTERS`] letters on the grid, in which every maximal run is
//! a dictionary word, from nothing but a numeric seed and the dictionary. The
//! pseudo-random source is [`ChaCha8Rng`], whose output is fixed across
//! platforms and releases, so every player with the same seed and dictionary
//! gets the same puzzle.
//!
//! The search is bounded. When it comes up empty, the seed selects one of the
//! precomputed [fallback](FALLBACK) layouts instead.

use std::collections::HashSet;

use log::{debug, error, trace, warn};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
	board::{Letter, LetterGrid, LetterId, SolutionBoard, GRID_SIZE, MAX_LETTERS},
	dictionary::Dictionary,
	validator::{all_words_valid, Axis}
};

////////////////////////////////////////////////////////////////////////////////
//                                 Constants.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The number of fresh layouts attempted before falling back.
pub const MAX_ATTEMPTS: usize = 64;

/// The number of consecutive word picks with no legal placement that abandon
/// a layout.
pub const MAX_STALLS: usize = 400;

/// The number of letters pinned to the board in hard mode.
pub const PIN_COUNT: usize = 4;

/// The shortest word the generator will place.
const MIN_WORD_LENGTH: usize = 2;

/// The shortest word that may open a layout.
const MIN_OPENING_LENGTH: usize = 4;

/// Known-good layouts, valid under the bundled word list, for seeds that
/// defeat the search.
pub const FALLBACK: [[&str; GRID_SIZE]; 3] = [
	["STARES", "L...A.", "EAGER.", "E...N.", "PLANS.", "......"],
	["CLOUD.", "A...R.", "MANIA.", "E...W.", "LEMONS", "......"],
	["...A..", "PLANET", "A.L..O", "S.S..Y", "STORES", ".O...."]
];

////////////////////////////////////////////////////////////////////////////////
//                                  Puzzles.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A day's puzzle: the solution, the tray, and the hard-mode pins.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Puzzle
{
	/// The seed that produced the puzzle.
	pub seed: u32,

	/// The canonical answer.
	pub solution: SolutionBoard,

	/// The tray, in scrambled order. The identity of each letter is the
	/// row-major index of its cell among the occupied cells of the solution.
	pub letters: Vec<Letter>,

	/// The cells whose letters are pinned in hard mode, in row-major order.
	pub pins: Vec<(usize, usize)>
}

impl Puzzle
{
	/// Parse a puzzle from the rows of its solution. The tray order and the
	/// pins are derived from the seed.
	///
	/// # Arguments
	///
	/// * `seed` - The seed.
	/// * `rows` - The rows of the solution, top to bottom, `.` marking empty
	///   cells.
	///
	/// # Returns
	///
	/// The puzzle, or `None` if the rows are malformed or do not hold exactly
	/// [`MAX_LETTERS`] letters.
	pub fn from_rows<T: AsRef<str>>(seed: u32, rows: &[T]) -> Option<Self>
	{
		let solution = SolutionBoard::from_rows(rows)?;
		if solution.letter_count() != MAX_LETTERS
		{
			return None
		}
		let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
		Some(Self::assemble(seed, solution, &mut rng))
	}

	/// Derive the tray and the pins of a finished layout.
	fn assemble(seed: u32, solution: SolutionBoard, rng: &mut ChaCha8Rng) -> Self
	{
		let occupied = solution.occupied();
		let mut letters = occupied.iter()
			.enumerate()
			.filter_map(|(id, &(row, col))| {
				solution.letter_at(row, col).map(|c| Letter::new(id as u8, c))
			})
			.collect::<Vec<_>>();
		let mut pins = occupied
			.choose_multiple(rng, PIN_COUNT)
			.copied()
			.collect::<Vec<_>>();
		pins.sort_unstable();
		letters.shuffle(rng);
		Self { seed, solution, letters, pins }
	}

	/// Answer the tray letter with the given identity.
	#[must_use]
	pub fn letter(&self, id: LetterId) -> Option<Letter>
	{
		self.letters.iter().find(|l| l.id == id).copied()
	}

	/// Answer the solution cell of the given letter.
	#[must_use]
	pub fn position_of(&self, id: LetterId) -> Option<(usize, usize)>
	{
		self.solution.occupied().get(usize::from(id.0)).copied()
	}

	/// Answer the pinned letters, with their cells.
	#[must_use]
	pub fn pinned_letters(&self) -> Vec<(usize, usize, Letter)>
	{
		let occupied = self.solution.occupied();
		self.pins.iter()
			.filter_map(|&cell| {
				let id = occupied.iter().position(|&c| c == cell)?;
				let letter = self.letter(LetterId(id as u8))?;
				Some((cell.0, cell.1, letter))
			})
			.collect()
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Generator.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Where a word might go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placement
{
	row: usize,
	col: usize,
	axis: Axis
}

impl Placement
{
	/// Answer the cell of the `index`th letter.
	#[inline]
	fn cell(&self, index: usize) -> (usize, usize)
	{
		match self.axis
		{
			Axis::Horizontal => (self.row, self.col + index),
			Axis::Vertical => (self.row + index, self.col)
		}
	}
}

/// The puzzle generator.
#[derive(Debug)]
pub struct Generator<'a>
{
	/// The dictionary, for validating candidate layouts.
	dictionary: &'a Dictionary,

	/// The placeable words, uppercase.
	words: Vec<Vec<char>>,

	/// The indices of the words long enough to open a layout.
	openers: Vec<usize>
}

impl<'a> Generator<'a>
{
	/// Construct a generator over the given dictionary. Only words that fit
	/// on the grid are candidates.
	pub fn new(dictionary: &'a Dictionary) -> Self
	{
		let words = dictionary.words()
			.filter(|w| (MIN_WORD_LENGTH ..= GRID_SIZE).contains(&w.len()))
			.map(|w| w.chars().map(|c| c.to_ascii_uppercase()).collect())
			.collect::<Vec<Vec<char>>>();
		let openers = words.iter()
			.enumerate()
			.filter(|(_, w)| w.len() >= MIN_OPENING_LENGTH)
			.map(|(i, _)| i)
			.collect();
		Self { dictionary, words, openers }
	}

	/// Generate the puzzle for the given seed.
	///
	/// # Arguments
	///
	/// * `seed` - The seed, normally derived from the date.
	///
	/// # Returns
	///
	/// The puzzle. Never fails: when the search is exhausted, a fallback
	/// layout is used.
	pub fn generate(&self, seed: u32) -> Puzzle
	{
		let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
		for attempt in 0 .. MAX_ATTEMPTS
		{
			if let Some(solution) = self.attempt(&mut rng)
			{
				debug!("seed {}: layout found on attempt {}", seed, attempt + 1);
				return Puzzle::assemble(seed, solution, &mut rng)
			}
			trace!("seed {}: attempt {} abandoned", seed, attempt + 1);
		}
		warn!(
			"seed {}: no layout after {} attempts, using fallback",
			seed,
			MAX_ATTEMPTS
		);
		fallback(seed)
	}

	/// Attempt a single layout.
	fn attempt(&self, rng: &mut ChaCha8Rng) -> Option<SolutionBoard>
	{
		let opener = &self.words[*self.openers.choose(rng)?];
		let mut grid = SolutionBoard::empty();
		let row = rng.gen_range(0 .. GRID_SIZE);
		let col = rng.gen_range(0 ..= GRID_SIZE - opener.len());
		self.place(
			&mut grid,
			opener,
			Placement { row, col, axis: Axis::Horizontal }
		);
		let mut count = opener.len();
		let mut stalls = 0;
		while count < MAX_LETTERS
		{
			if stalls >= MAX_STALLS
			{
				return None
			}
			let word = self.words.choose(rng)?;
			let placements = self.placements(&grid, count, word);
			match placements.choose(rng)
			{
				Some(&placement) =>
				{
					self.place(&mut grid, word, placement);
					count = grid.letter_count();
					stalls = 0;
				},
				None => stalls += 1
			}
		}
		Some(grid)
	}

	/// Enumerate the legal placements of a word. A legal placement crosses at
	/// least one placed letter, agrees with every letter it overlaps, adds at
	/// least one letter without exceeding [`MAX_LETTERS`], and leaves every
	/// maximal run of the grid a dictionary word.
	fn placements(
		&self,
		grid: &SolutionBoard,
		count: usize,
		word: &[char]
	) -> Vec<Placement>
	{
		let mut legal = Vec::new();
		let span = GRID_SIZE - word.len();
		for axis in [Axis::Horizontal, Axis::Vertical]
		{
			for line in 0 .. GRID_SIZE
			{
				for offset in 0 ..= span
				{
					let placement = match axis
					{
						Axis::Horizontal =>
							Placement { row: line, col: offset, axis },
						Axis::Vertical =>
							Placement { row: offset, col: line, axis }
					};
					if self.is_legal(grid, count, word, placement)
					{
						legal.push(placement);
					}
				}
			}
		}
		legal
	}

	fn is_legal(
		&self,
		grid: &SolutionBoard,
		count: usize,
		word: &[char],
		placement: Placement
	) -> bool
	{
		let mut overlaps = 0;
		let mut added = 0;
		for (index, &c) in word.iter().enumerate()
		{
			let (row, col) = placement.cell(index);
			match grid.letter_at(row, col)
			{
				Some(existing) if existing == c => overlaps += 1,
				Some(_) => return false,
				None => added += 1
			}
		}
		if overlaps == 0 || added == 0 || count + added > MAX_LETTERS
		{
			return false
		}
		let mut candidate = grid.clone();
		self.place(&mut candidate, word, placement);
		all_words_valid(&candidate, self.dictionary)
	}

	fn place(&self, grid: &mut SolutionBoard, word: &[char], placement: Placement)
	{
		for (index, &c) in word.iter().enumerate()
		{
			let (row, col) = placement.cell(index);
			grid.set(row, col, Some(c));
		}
	}
}

/// Answer the fallback puzzle for the given seed. The seed selects the
/// layout; should that layout be malformed, the next well-formed one serves.
pub fn fallback(seed: u32) -> Puzzle
{
	let start = seed as usize % FALLBACK.len();
	FALLBACK.iter()
		.cycle()
		.skip(start)
		.take(FALLBACK.len())
		.find_map(|rows| Puzzle::from_rows(seed, &rows[..]))
		.unwrap_or_else(|| {
			error!("seed {}: no well-formed fallback layout", seed);
			let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
			Puzzle::assemble(seed, SolutionBoard::empty(), &mut rng)
		})
}

/// Check that the tray holds exactly the letters of the solution, each with
/// a distinct identity.
#[must_use]
pub fn tray_matches_solution(puzzle: &Puzzle) -> bool
{
	let ids = puzzle.letters.iter().map(|l| l.id).collect::<HashSet<_>>();
	if ids.len() != puzzle.letters.len()
		|| puzzle.letters.len() != puzzle.solution.letter_count()
	{
		return false
	}
	puzzle.letters.iter().all(|l| {
		puzzle.position_of(l.id)
			.and_then(|(row, col)| puzzle.solution.letter_at(row, col))
			== Some(l.letter)
	})
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::HashSet;

	use crate::{
		board::{LetterGrid, SolutionBoard, MAX_LETTERS},
		dictionary::Dictionary,
		generator::*,
		island::validate_word_island,
		validator::all_words_valid
	};

	fn dictionary() -> Dictionary
	{
		Dictionary::read_from_file("dict/english.txt").unwrap()
	}

	/// Ensure that the same seed always yields the same puzzle.
	#[test]
	fn test_deterministic()
	{
		let dictionary = dictionary();
		let generator = Generator::new(&dictionary);
		let first = generator.generate(20240315);
		let second = Generator::new(&dictionary).generate(20240315);
		assert_eq!(first, second);
		let distinct = (20240316 .. 20240321)
			.map(|seed| generator.generate(seed).solution.to_string())
			.collect::<HashSet<_>>();
		assert!(distinct.len() > 1);
	}

	/// Ensure that generated puzzles satisfy every structural requirement.
	#[test]
	fn test_invariants()
	{
		let dictionary = dictionary();
		let generator = Generator::new(&dictionary);
		for seed in 20240101 .. 20240113
		{
			let puzzle = generator.generate(seed);
			let solution = &puzzle.solution;
			assert_eq!(puzzle.seed, seed);
			assert_eq!(solution.letter_count(), MAX_LETTERS, "\n{}", solution);
			assert!(all_words_valid(solution, &dictionary), "\n{}", solution);
			assert!(validate_word_island(solution), "\n{}", solution);
			assert_eq!(puzzle.letters.len(), MAX_LETTERS);
			assert!(tray_matches_solution(&puzzle));
			let pins = puzzle.pins.iter().collect::<HashSet<_>>();
			assert_eq!(pins.len(), PIN_COUNT);
			assert!(puzzle.pins.iter().all(|&(r, c)| solution.letter_at(r, c).is_some()));
			assert_eq!(puzzle.pinned_letters().len(), PIN_COUNT);
		}
	}

	/// Ensure that every fallback layout is itself a valid puzzle.
	#[test]
	fn test_fallback()
	{
		let dictionary = dictionary();
		for seed in 0 .. FALLBACK.len() as u32
		{
			let puzzle = fallback(seed);
			assert_eq!(puzzle.solution.letter_count(), MAX_LETTERS);
			assert!(all_words_valid(&puzzle.solution, &dictionary), "\n{}", puzzle.solution);
			assert!(validate_word_island(&puzzle.solution));
			assert!(tray_matches_solution(&puzzle));
			assert_eq!(
				Puzzle::from_rows(seed, &FALLBACK[seed as usize]),
				Some(puzzle)
			);
		}
	}

	/// Ensure that every seed selects its fallback layout by remainder.
	#[test]
	fn test_fallback_selection()
	{
		for seed in 0 .. 3 * FALLBACK.len() as u32
		{
			let rows = &FALLBACK[seed as usize % FALLBACK.len()];
			let expected = SolutionBoard::from_rows(&rows[..]).unwrap();
			let puzzle = fallback(seed);
			assert_eq!(puzzle.seed, seed);
			assert_eq!(puzzle.solution, expected);
			assert!(tray_matches_solution(&puzzle));
		}
	}

	/// Ensure that a dictionary with nothing to place falls back rather than
	/// failing.
	#[test]
	fn test_empty_dictionary()
	{
		let dictionary = Dictionary::new();
		let puzzle = Generator::new(&dictionary).generate(4);
		assert_eq!(puzzle, fallback(4));
	}

	/// Ensure that layouts with the wrong number of letters are rejected.
	#[test]
	fn test_from_rows()
	{
		let rows = ["CAT...", "......", "......", "......", "......", "......"];
		assert!(Puzzle::from_rows(1, &rows).is_none());
		let puzzle = Puzzle::from_rows(1, &FALLBACK[1]).unwrap();
		assert_eq!(puzzle.position_of(LetterId(0)), Some((0, 0)));
		assert_eq!(puzzle.letter(LetterId(0)).map(|l| l.letter), Some('C'));
		assert_eq!(puzzle.position_of(LetterId(20)), None);
	}
}
