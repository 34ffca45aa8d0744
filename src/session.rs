//! # Session
//!
//! A day's game, bound to its storage, timer, and statistics. The session is
//! the caller's single handle: it restores today's state on load, persists
//! after every successful mutation, and records the statistics on
//! submission. Storage failures are logged and otherwise ignored, so play
//! continues in memory whatever happens to the disk.

use std::{rc::Rc, time::Instant};

use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
	board::{Board, Direction, Letter, LetterId},
	calendar::DateSeed,
	dictionary::Dictionary,
	game::{Game, GameError, Settings, Submission},
	generator::Generator,
	stats::Statistics,
	storage::{clean, load, store, PersistedState, Storage},
	timer::Timer
};

/// Settings requested on the command line, taking precedence over stored
/// settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides
{
	pub hard_mode: Option<bool>,
	pub score_mode: Option<bool>,
	pub show_timer: Option<bool>
}

/// A day's session.
pub struct Session
{
	/// Where state is persisted.
	storage: Box<dyn Storage>,

	/// The day whose puzzle is played.
	seed: DateSeed,

	/// The game.
	game: Game,

	/// The play timer.
	timer: Timer,

	/// The long-lived statistics.
	statistics: Statistics,

	/// Whether the player has yet to dismiss the instructions.
	first_time: bool
}

impl Session
{
	/// Load the session of the given day. State saved on any day but `today`
	/// is removed first, so playing another day's puzzle never disturbs
	/// today's. If the day's state was saved, play resumes from it; otherwise
	/// the puzzle is generated afresh.
	///
	/// # Arguments
	///
	/// * `storage` - Where state is persisted.
	/// * `dictionary` - The dictionary.
	/// * `seed` - The day whose puzzle is played.
	/// * `today` - The local calendar date, which decides what is stale.
	/// * `overrides` - Settings requested on the command line.
	///
	/// # Returns
	///
	/// The session.
	pub fn load(
		mut storage: Box<dyn Storage>,
		dictionary: Rc<Dictionary>,
		seed: DateSeed,
		today: DateSeed,
		overrides: Overrides
	) -> Self
	{
		let removed = clean(storage.as_mut(), today);
		if removed > 0
		{
			info!("removed {} stale keys", removed);
		}
		let storage_ref = storage.as_ref();
		let stored_hard_mode =
			read(storage_ref, PersistedState::HardMode, seed).unwrap_or(false);
		let settings = Settings {
			hard_mode: stored_hard_mode,
			score_mode: overrides.score_mode
				.or_else(|| read(storage_ref, PersistedState::ScoreMode, seed))
				.unwrap_or(false),
			show_timer: overrides.show_timer
				.or_else(|| read(storage_ref, PersistedState::ShowTimer, seed))
				.unwrap_or(true)
		};
		let puzzle = Generator::new(&dictionary).generate(seed.value());
		let mut game =
			Game::new(dictionary, puzzle, seed.puzzle_number(), settings);
		let board: Option<Board> = read(storage_ref, PersistedState::Board, seed);
		let letters: Option<Vec<Letter>> =
			read(storage_ref, PersistedState::Letters, seed);
		let game_over = read(storage_ref, PersistedState::GameOver, seed)
			.unwrap_or(false);
		debug!(
			"puzzle {} (seed {}): saved board {}, game over {}",
			seed.puzzle_number(),
			seed,
			board.is_some(),
			game_over
		);
		game.restore(board, letters, game_over);
		game.update_board_with_new_score_mode(settings.score_mode);
		if let Some(hard_mode) = overrides.hard_mode
		{
			if let Err(e) = game.set_hard_mode(hard_mode)
			{
				warn!("cannot change hard mode: {}", e);
			}
		}
		let mut timer = Timer::new(
			read(storage_ref, PersistedState::Timer, seed).unwrap_or(0)
		);
		if game.is_game_over()
		{
			timer.set_solved(true, Instant::now());
		}
		let statistics =
			read(storage_ref, PersistedState::Statistics, seed).unwrap_or_default();
		let first_time =
			read(storage_ref, PersistedState::FirstTime, seed).unwrap_or(true);
		let mut session = Self {
			storage,
			seed,
			game,
			timer,
			statistics,
			first_time
		};
		session.persist_settings();
		session.persist_game();
		session
	}

	/// Give up the session, answering its storage.
	#[must_use]
	pub fn into_storage(self) -> Box<dyn Storage> { self.storage }

	#[inline]
	#[must_use]
	pub fn game(&self) -> &Game { &self.game }

	#[inline]
	#[must_use]
	pub fn timer(&self) -> &Timer { &self.timer }

	#[inline]
	#[must_use]
	pub fn statistics(&self) -> &Statistics { &self.statistics }

	#[inline]
	#[must_use]
	pub fn seed(&self) -> DateSeed { self.seed }

	/// Check whether the player has yet to dismiss the instructions.
	#[inline]
	#[must_use]
	pub fn is_first_time(&self) -> bool { self.first_time }

	/// Record that the instructions have been seen.
	pub fn dismiss_first_time(&mut self)
	{
		self.first_time = false;
		self.write(PersistedState::FirstTime, &false);
	}
}

// Play. Each of these persists the game after a successful change.
impl Session
{
	fn apply<F>(&mut self, f: F) -> Result<(), GameError>
	where
		F: FnOnce(&mut Game) -> Result<(), GameError>
	{
		f(&mut self.game)?;
		self.persist_game();
		Ok(())
	}

	/// See [`Game::type_letter`].
	pub fn type_letter(&mut self, key: char) -> Result<(), GameError>
	{
		self.apply(|g| g.type_letter(key))
	}

	/// See [`Game::set_letter_on_board`].
	pub fn set_letter_on_board(&mut self, id: LetterId) -> Result<(), GameError>
	{
		self.apply(|g| g.set_letter_on_board(id))
	}

	/// See [`Game::backspace`].
	pub fn backspace(&mut self) -> Result<(), GameError>
	{
		self.apply(Game::backspace)
	}

	/// See [`Game::shift_board`].
	pub fn shift_board(&mut self, direction: Direction) -> Result<(), GameError>
	{
		self.apply(|g| g.shift_board(direction))
	}

	/// See [`Game::move_cursor`].
	pub fn move_cursor(&mut self, direction: Direction) -> Result<(), GameError>
	{
		self.apply(|g| g.move_cursor(direction))
	}

	/// See [`Game::flip_cursor`].
	pub fn flip_cursor(&mut self) -> Result<(), GameError>
	{
		self.apply(Game::flip_cursor)
	}

	/// See [`Game::update_cursor`].
	pub fn update_cursor(&mut self, row: usize, col: usize)
		-> Result<(), GameError>
	{
		self.apply(|g| g.update_cursor(row, col))
	}

	/// See [`Game::clear_board`].
	pub fn clear_board(&mut self) -> Result<(), GameError>
	{
		self.apply(Game::clear_board)
	}

	/// See [`Game::shuffle_letters`].
	pub fn shuffle_letters(&mut self)
	{
		self.game.shuffle_letters();
		self.persist_game();
	}

	/// See [`Game::check`].
	pub fn check(&mut self) -> Result<bool, GameError>
	{
		let all_valid = self.game.check()?;
		self.persist_game();
		Ok(all_valid)
	}

	/// Submit the board, stop the timer, and record the statistics.
	///
	/// # Arguments
	///
	/// * `now` - The current instant, for the timer.
	///
	/// # Errors
	///
	/// As for [`Game::request_finish`].
	pub fn submit(&mut self, now: Instant) -> Result<Submission, GameError>
	{
		let submission = self.game.request_finish()?;
		self.timer.set_solved(true, now);
		self.statistics.record(
			submission.puzzle_number,
			u32::try_from(submission.valid_words.len()).unwrap_or(u32::MAX),
			submission.score,
			self.timer.elapsed()
		);
		self.persist_game();
		self.write(PersistedState::Timer, &self.timer.elapsed());
		self.write(PersistedState::Statistics, &self.statistics.clone());
		Ok(submission)
	}
}

// Settings and time.
impl Session
{
	/// Change the score mode.
	pub fn set_score_mode(&mut self, score_mode: bool)
	{
		self.game.update_board_with_new_score_mode(score_mode);
		self.persist_settings();
		self.persist_game();
	}

	/// Change whether the timer is shown.
	pub fn set_show_timer(&mut self, show_timer: bool)
	{
		self.game.set_show_timer(show_timer);
		self.persist_settings();
	}

	/// Change hard mode. See [`Game::set_hard_mode`].
	pub fn set_hard_mode(&mut self, hard_mode: bool) -> Result<(), GameError>
	{
		self.game.set_hard_mode(hard_mode)?;
		self.persist_settings();
		self.persist_game();
		Ok(())
	}

	/// Advance the timer, persisting any newly counted seconds.
	pub fn tick(&mut self, now: Instant) -> u64
	{
		let before = self.timer.elapsed();
		let elapsed = self.timer.tick(now);
		if elapsed != before
		{
			self.write(PersistedState::Timer, &elapsed);
		}
		elapsed
	}

	/// Record a change of terminal focus.
	pub fn set_focused(&mut self, focused: bool, now: Instant)
	{
		self.timer.set_focused(focused, now);
		self.write(PersistedState::Timer, &self.timer.elapsed());
	}

	/// Record whether the puzzle view is showing.
	pub fn set_active(&mut self, active: bool, now: Instant)
	{
		self.timer.set_active(active, now);
		self.write(PersistedState::Timer, &self.timer.elapsed());
	}
}

// Persistence.
impl Session
{
	fn persist_settings(&mut self)
	{
		let settings = self.game.settings();
		self.write(PersistedState::HardMode, &settings.hard_mode);
		self.write(PersistedState::ScoreMode, &settings.score_mode);
		self.write(PersistedState::ShowTimer, &settings.show_timer);
		let first_time = self.first_time;
		self.write(PersistedState::FirstTime, &first_time);
	}

	fn persist_game(&mut self)
	{
		let board = self.game.board().clone();
		let letters = self.game.letters().to_vec();
		let game_over = self.game.is_game_over();
		self.write(PersistedState::Board, &board);
		self.write(PersistedState::Letters, &letters);
		self.write(PersistedState::GameOver, &game_over);
	}

	fn write<T: Serialize + ?Sized>(&mut self, state: PersistedState, value: &T)
	{
		let key = state.key(self.seed);
		if let Err(e) = store(self.storage.as_mut(), &key, value)
		{
			warn!("failed to persist {:?}: {}", state, e);
		}
	}
}

/// Read a persisted value, treating anything unreadable as absent.
fn read<T: DeserializeOwned>(
	storage: &dyn Storage,
	state: PersistedState,
	seed: DateSeed
) -> Option<T>
{
	load(storage, &state.key(seed)).unwrap_or_else(|e| {
		warn!("ignoring stored {:?}: {}", state, e);
		None
	})
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
