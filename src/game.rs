//! # Game
//!
//! The state holder for a single day's play: the board, the tray, the
//! settings, and the game-over flag, together with the rules that tie them
//! together. Every mutator runs to completion and leaves the game consistent;
//! a rejected operation changes nothing and says why.

use std::{
	collections::HashSet,
	error::Error,
	fmt::{self, Display, Formatter},
	rc::Rc
};

use log::{debug, trace, warn};
use rand::{seq::SliceRandom, thread_rng};

use crate::{
	board::{
		Board, Direction, EditError, Letter, LetterGrid, LetterId,
		SolutionBoard, TileState, MAX_LETTERS
	},
	dictionary::Dictionary,
	generator::Puzzle,
	island::validate_word_island,
	scoring::{
		count_board_score, count_solution_board_score, create_scored_board,
		create_scored_solution_board, create_unscored_board
	},
	validator::{self, invalid_words, valid_words, validate_board}
};

////////////////////////////////////////////////////////////////////////////////
//                                 Settings.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The player's choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings
{
	/// Pin some letters, forbid shifting, and accept invalid words on the one
	/// and only submission.
	pub hard_mode: bool,

	/// Show a point value on every tile after submission.
	pub score_mode: bool,

	/// Show the play timer.
	pub show_timer: bool
}

/// Why validation runs. Both modes classify tiles identically; only a hard
/// submission goes on to compare the board against the solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode
{
	/// Live feedback, before submission.
	Check,

	/// The final submission.
	Submit
}

/// The first reason, in priority order, that the board cannot be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishBlocker
{
	/// Some tray letters are not on the board.
	UnusedLetters(usize),

	/// Some words are not in the dictionary. Never reported in hard mode.
	InvalidWords,

	/// The letters do not form a single island.
	Disconnected
}

////////////////////////////////////////////////////////////////////////////////
//                                   Game.                                    //
////////////////////////////////////////////////////////////////////////////////

/// A day's game.
#[derive(Clone, Debug)]
pub struct Game
{
	/// The dictionary, for validation.
	dictionary: Rc<Dictionary>,

	/// The day's puzzle.
	puzzle: Puzzle,

	/// The number of the day's puzzle.
	puzzle_number: u32,

	/// The player's choices.
	settings: Settings,

	/// The player's board.
	board: Board,

	/// The tray, in display order.
	letters: Vec<Letter>,

	/// Whether the board has been submitted.
	is_game_over: bool,

	/// The number of times the tray has been shuffled.
	shuffle_position: usize
}

// Construction and queries.
impl Game
{
	/// Start a game of the given puzzle. In hard mode, the pinned letters are
	/// placed and locked.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary.
	/// * `puzzle` - The day's puzzle.
	/// * `puzzle_number` - The number of the day's puzzle.
	/// * `settings` - The player's choices.
	#[must_use]
	pub fn new(
		dictionary: Rc<Dictionary>,
		puzzle: Puzzle,
		puzzle_number: u32,
		settings: Settings
	) -> Self
	{
		let letters = puzzle.letters.clone();
		let board = starting_board(&puzzle, settings.hard_mode);
		Self {
			dictionary,
			puzzle,
			puzzle_number,
			settings,
			board,
			letters,
			is_game_over: false,
			shuffle_position: 0
		}
	}

	/// Resume a game from saved state. Saved state that does not belong to
	/// this puzzle is discarded with a warning.
	///
	/// # Arguments
	///
	/// * `board` - The saved board, if any.
	/// * `letters` - The saved tray order, if any.
	/// * `is_game_over` - Whether the board was already submitted.
	pub fn restore(
		&mut self,
		board: Option<Board>,
		letters: Option<Vec<Letter>>,
		is_game_over: bool
	)
	{
		if let Some(letters) = letters
		{
			if self.is_tray(&letters)
			{
				self.letters = letters;
			}
			else
			{
				warn!("saved tray does not match puzzle {}", self.puzzle.seed);
			}
		}
		if let Some(board) = board
		{
			if self.is_board_of_tray(&board)
			{
				self.board = board;
				self.is_game_over = is_game_over;
			}
			else
			{
				warn!("saved board does not match puzzle {}", self.puzzle.seed);
			}
		}
	}

	/// Check that the letters are a reordering of the puzzle's tray.
	fn is_tray(&self, letters: &[Letter]) -> bool
	{
		let mut saved = letters.to_vec();
		let mut expected = self.puzzle.letters.clone();
		saved.sort_by_key(|l| l.id);
		expected.sort_by_key(|l| l.id);
		saved == expected
	}

	/// Check that every letter on the board comes from the puzzle's tray,
	/// once.
	fn is_board_of_tray(&self, board: &Board) -> bool
	{
		let placed = board.iter().filter_map(|t| t.letter).collect::<Vec<_>>();
		placed.len() == board.letter_ids().len()
			&& placed.iter().all(|l| self.puzzle.letter(l.id) == Some(*l))
	}

	/// Answer the board.
	#[inline]
	#[must_use]
	pub fn board(&self) -> &Board { &self.board }

	/// Answer the tray, in display order.
	#[inline]
	#[must_use]
	pub fn letters(&self) -> &[Letter] { &self.letters }

	/// Answer the settings.
	#[inline]
	#[must_use]
	pub fn settings(&self) -> Settings { self.settings }

	/// Answer the number of the puzzle.
	#[inline]
	#[must_use]
	pub fn puzzle_number(&self) -> u32 { self.puzzle_number }

	/// Answer the seed of the puzzle.
	#[inline]
	#[must_use]
	pub fn seed(&self) -> u32 { self.puzzle.seed }

	/// Check whether the board has been submitted.
	#[inline]
	#[must_use]
	pub fn is_game_over(&self) -> bool { self.is_game_over }

	/// Answer how many times the tray has been shuffled.
	#[inline]
	#[must_use]
	pub fn shuffle_position(&self) -> usize { self.shuffle_position }

	/// Answer the solution, but only once the game is over.
	#[must_use]
	pub fn solution(&self) -> Option<&SolutionBoard>
	{
		self.is_game_over.then_some(&self.puzzle.solution)
	}

	/// Answer the identities of the letters on the board.
	#[must_use]
	pub fn board_letter_ids(&self) -> HashSet<LetterId>
	{
		self.board.letter_ids()
	}

	/// Answer the tray letters not on the board, in display order.
	#[must_use]
	pub fn unused_letters(&self) -> Vec<Letter>
	{
		let placed = self.board_letter_ids();
		self.letters.iter()
			.filter(|l| !placed.contains(&l.id))
			.copied()
			.collect()
	}

	/// Check whether the player has placed anything. Pinned letters do not
	/// count.
	#[must_use]
	pub fn has_started(&self) -> bool
	{
		self.board.iter().any(|t| t.letter.is_some() && !t.is_locked)
	}

	/// Check whether the placed letters form a single island.
	#[must_use]
	pub fn tiles_are_connected(&self) -> bool
	{
		validate_word_island(&self.board)
	}

	/// Check whether every word on the board is in the dictionary.
	#[must_use]
	pub fn all_words_valid(&self) -> bool
	{
		validator::all_words_valid(&self.board, &self.dictionary)
	}

	/// Answer the first reason, if any, that the board cannot be submitted.
	/// Unused letters outrank invalid words, which outrank disconnection.
	#[must_use]
	pub fn finish_blocker(&self) -> Option<FinishBlocker>
	{
		let placed = self.board_letter_ids().len();
		if placed < MAX_LETTERS
		{
			return Some(FinishBlocker::UnusedLetters(MAX_LETTERS - placed))
		}
		if !self.settings.hard_mode && !self.all_words_valid()
		{
			return Some(FinishBlocker::InvalidWords)
		}
		if !self.tiles_are_connected()
		{
			return Some(FinishBlocker::Disconnected)
		}
		None
	}

	/// Check whether the board can be submitted.
	#[inline]
	#[must_use]
	pub fn can_finish(&self) -> bool { self.finish_blocker().is_none() }

	/// Answer the result of the submission, once the game is over.
	#[must_use]
	pub fn submission(&self) -> Option<Submission>
	{
		self.is_game_over.then(|| self.build_submission())
	}

	fn build_submission(&self) -> Submission
	{
		let score = count_board_score(&create_scored_board(&self.board));
		let best_score = count_solution_board_score(
			&create_scored_solution_board(&self.puzzle.solution)
		);
		Submission {
			puzzle_number: self.puzzle_number,
			hard_mode: self.settings.hard_mode,
			score_mode: self.settings.score_mode,
			board: self.board.clone(),
			score,
			best_score,
			valid_words: valid_words(&self.board, &self.dictionary),
			invalid_words: invalid_words(&self.board, &self.dictionary)
		}
	}
}

// Mutators.
impl Game
{
	/// Place the first unused tray letter matching the key.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::LetterUnavailable`] if no unused letter matches.
	/// * [`GameError::Locked`] if the tile under the cursor is pinned.
	pub fn type_letter(&mut self, key: char) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		let key = key.to_ascii_uppercase();
		let letter = self.unused_letters()
			.into_iter()
			.find(|l| l.letter == key)
			.ok_or(GameError::LetterUnavailable(key))?;
		self.place(letter)
	}

	/// Place a specific tray letter under the cursor. A letter already on the
	/// board moves.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::UnknownLetter`] if the tray has no such letter.
	/// * [`GameError::Locked`] if either tile involved is pinned.
	pub fn set_letter_on_board(&mut self, id: LetterId) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		let letter = self.letters.iter()
			.find(|l| l.id == id)
			.copied()
			.ok_or(GameError::UnknownLetter(id))?;
		self.place(letter)
	}

	fn place(&mut self, letter: Letter) -> Result<(), GameError>
	{
		self.board = self.board.set_letter(letter)?;
		trace!("placed {} ({})", letter.letter, letter.id.0);
		Ok(())
	}

	/// Delete a letter, as the backspace key does.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::Locked`] if the tile to clear is pinned.
	pub fn backspace(&mut self) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		self.board = self.board.backspace()?;
		Ok(())
	}

	/// Shift every letter one cell, wrapping at the edges.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::ShiftForbidden`] in hard mode.
	pub fn shift_board(&mut self, direction: Direction) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		if self.settings.hard_mode
		{
			return Err(GameError::ShiftForbidden)
		}
		self.board = self.board.move_board(direction);
		Ok(())
	}

	/// Move the cursor one cell, as the arrow keys do.
	///
	/// # Errors
	///
	/// [`GameError::GameOver`] after submission.
	pub fn move_cursor(&mut self, direction: Direction) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		self.board = self.board.update_cursor_in_direction(direction);
		Ok(())
	}

	/// Flip the typing direction.
	///
	/// # Errors
	///
	/// [`GameError::GameOver`] after submission.
	pub fn flip_cursor(&mut self) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		self.board = self.board.flip_cursor_direction();
		Ok(())
	}

	/// Select a tile; selecting the current tile flips the typing direction.
	///
	/// # Errors
	///
	/// [`GameError::GameOver`] after submission.
	pub fn update_cursor(&mut self, row: usize, col: usize)
		-> Result<(), GameError>
	{
		self.ensure_playing()?;
		self.board = self.board.update_cursor(row, col);
		Ok(())
	}

	/// Remove every unpinned letter from the board.
	///
	/// # Errors
	///
	/// [`GameError::GameOver`] after submission.
	pub fn clear_board(&mut self) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		self.board = self.board.reset();
		Ok(())
	}

	/// Reorder the tray. Membership never changes.
	pub fn shuffle_letters(&mut self)
	{
		self.letters.shuffle(&mut thread_rng());
		self.shuffle_position += 1;
	}

	/// Validate the board for live feedback, annotating every tile.
	///
	/// # Returns
	///
	/// `true` if every word is in the dictionary.
	///
	/// # Errors
	///
	/// [`GameError::GameOver`] after submission.
	pub fn check(&mut self) -> Result<bool, GameError>
	{
		self.ensure_playing()?;
		let (board, all_valid) = self.validate(ValidationMode::Check);
		self.board = board;
		Ok(all_valid)
	}

	/// Submit the board. There is exactly one submission per game.
	///
	/// # Returns
	///
	/// The result of the submission.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::CannotFinish`] if the board is not ready, with the
	///   reason.
	pub fn request_finish(&mut self) -> Result<Submission, GameError>
	{
		self.ensure_playing()?;
		if let Some(blocker) = self.finish_blocker()
		{
			debug!("submission refused: {:?}", blocker);
			return Err(GameError::CannotFinish(blocker))
		}
		let (board, _) = self.validate(ValidationMode::Submit);
		self.board =
			if self.settings.score_mode { create_scored_board(&board) }
			else { board };
		self.is_game_over = true;
		let submission = self.build_submission();
		debug!(
			"puzzle {} submitted: {} words, score {}/{}",
			self.puzzle_number,
			submission.valid_words.len(),
			submission.score,
			submission.best_score
		);
		Ok(submission)
	}

	/// Change the score mode. A finished board gains or loses its scores to
	/// match.
	pub fn update_board_with_new_score_mode(&mut self, score_mode: bool)
	{
		self.settings.score_mode = score_mode;
		if !self.is_game_over
		{
			return
		}
		if score_mode && !self.board.is_scored()
		{
			self.board = create_scored_board(&self.board);
		}
		else if !score_mode && self.board.is_scored()
		{
			self.board = create_unscored_board(&self.board);
		}
	}

	/// Change whether the timer is shown.
	pub fn set_show_timer(&mut self, show_timer: bool)
	{
		self.settings.show_timer = show_timer;
	}

	/// Change hard mode. Only possible before the player places anything, as
	/// the board restarts with or without its pinned letters.
	///
	/// # Errors
	///
	/// * [`GameError::GameOver`] after submission.
	/// * [`GameError::AlreadyStarted`] once a letter has been placed.
	pub fn set_hard_mode(&mut self, hard_mode: bool) -> Result<(), GameError>
	{
		self.ensure_playing()?;
		if hard_mode == self.settings.hard_mode
		{
			return Ok(())
		}
		if self.has_started()
		{
			return Err(GameError::AlreadyStarted)
		}
		self.settings.hard_mode = hard_mode;
		self.board = starting_board(&self.puzzle, hard_mode);
		Ok(())
	}

	#[inline]
	fn ensure_playing(&self) -> Result<(), GameError>
	{
		if self.is_game_over { Err(GameError::GameOver) } else { Ok(()) }
	}

	/// Run the validator. A hard submission also marks every letter that
	/// differs from the solution.
	fn validate(&self, mode: ValidationMode) -> (Board, bool)
	{
		let (mut board, all_valid) = validate_board(&self.board, &self.dictionary);
		if mode == ValidationMode::Submit && self.settings.hard_mode
		{
			let solution = &self.puzzle.solution;
			for tile in board.tiles.iter_mut().flatten()
			{
				if let Some(letter) = tile.letter
				{
					if solution.letter_at(tile.row, tile.col) != Some(letter.letter)
					{
						tile.state = TileState::Incorrect;
					}
				}
			}
		}
		(board, all_valid)
	}
}

/// Answer the board a game starts with: empty, or holding the locked pins in
/// hard mode.
fn starting_board(puzzle: &Puzzle, hard_mode: bool) -> Board
{
	let board = Board::new();
	if !hard_mode
	{
		return board
	}
	puzzle.pinned_letters()
		.into_iter()
		.fold(board, |board, (row, col, letter)| {
			board.lock_letter(row, col, letter)
		})
}

////////////////////////////////////////////////////////////////////////////////
//                                Submission.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The outcome of a submitted game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission
{
	/// The number of the puzzle.
	pub puzzle_number: u32,

	/// Whether the game was played in hard mode.
	pub hard_mode: bool,

	/// Whether scores are shown.
	pub score_mode: bool,

	/// The final, annotated board.
	pub board: Board,

	/// The score of the board.
	pub score: u32,

	/// The score of the solution.
	pub best_score: u32,

	/// The words found in the dictionary.
	pub valid_words: Vec<String>,

	/// The words absent from the dictionary.
	pub invalid_words: Vec<String>
}

impl Submission
{
	/// Render a spoiler-free summary, suitable for sharing.
	#[must_use]
	pub fn share_text(&self) -> String
	{
		let mut text = format!(
			"Scrambled #{}{}\n",
			self.puzzle_number,
			if self.hard_mode { "*" } else { "" }
		);
		for row in &self.board.tiles
		{
			for tile in row
			{
				text.push(match (tile.letter, tile.state)
				{
					(None, _) => '⬜',
					(Some(_), TileState::Mixed) => '🟨',
					(Some(_), TileState::Invalid) => '🟥',
					(Some(_), TileState::Incorrect) => '🟧',
					(Some(_), _) => '🟩'
				});
			}
			text.push('\n');
		}
		text.push_str(&format!("{} words", self.valid_words.len()));
		if self.score_mode
		{
			text.push_str(&format!(", {}/{} points", self.score, self.best_score));
		}
		text
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of rejected game operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError
{
	/// The tile is pinned.
	Locked {
		row: usize,
		col: usize
	},

	/// The board has been submitted.
	GameOver,

	/// Shifting is not allowed in hard mode.
	ShiftForbidden,

	/// Hard mode cannot change once letters are placed.
	AlreadyStarted,

	/// The board is not ready for submission.
	CannotFinish(FinishBlocker),

	/// No unused tray letter matches the key.
	LetterUnavailable(char),

	/// The tray has no letter with the identity.
	UnknownLetter(LetterId)
}

impl Display for GameError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Locked { row, col } =>
				write!(f, "tile at row {}, column {} is locked", row, col),
			Self::GameOver => write!(f, "the game is over"),
			Self::ShiftForbidden =>
				write!(f, "the board cannot shift in hard mode"),
			Self::AlreadyStarted =>
				write!(f, "hard mode cannot change after the game starts"),
			Self::CannotFinish(blocker) =>
				write!(f, "the board cannot be submitted: {:?}", blocker),
			Self::LetterUnavailable(c) => write!(f, "no unused {} in the tray", c),
			Self::UnknownLetter(id) => write!(f, "no letter {} in the tray", id.0)
		}
	}
}

impl Error for GameError {}

impl From<EditError> for GameError
{
	fn from(e: EditError) -> Self
	{
		match e
		{
			EditError::Locked { row, col } => Self::Locked { row, col }
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
