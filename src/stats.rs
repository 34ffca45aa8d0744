//! # Statistics
//!
//! The player's long-lived record, updated once per completed puzzle.

use log::debug;
use serde::{Deserialize, Serialize};

/// The player's statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics
{
	/// The number of consecutive daily puzzles completed, ending with the
	/// last one completed.
	pub streak: u32,

	/// The longest streak ever.
	pub highest_streak: u32,

	/// The number of puzzles completed.
	pub total_completions: u32,

	/// The number of valid words submitted, across all puzzles.
	pub total_words: u32,

	/// The number of points scored, across all puzzles.
	pub total_points: u32,

	/// The best score of a single puzzle.
	pub highest_score: u32,

	/// The most valid words submitted for a single puzzle.
	pub most_words_in_a_puzzle: u32,

	/// The quickest completion, in seconds.
	pub fastest_completion: Option<u64>,

	/// The number of the last puzzle completed.
	pub last_completed_puzzle: Option<u32>
}

impl Statistics
{
	/// Record a completed puzzle. Recording the same puzzle again changes
	/// nothing. A puzzle older than the last one completed counts toward the
	/// totals, but not toward the streak.
	///
	/// # Arguments
	///
	/// * `puzzle` - The puzzle number.
	/// * `words` - The number of valid words submitted.
	/// * `score` - The score.
	/// * `seconds` - The play time.
	///
	/// # Returns
	///
	/// `true` if the completion was recorded, `false` if it was already known.
	pub fn record(&mut self, puzzle: u32, words: u32, score: u32, seconds: u64)
		-> bool
	{
		if self.last_completed_puzzle == Some(puzzle)
		{
			return false
		}
		self.total_completions += 1;
		self.total_words += words;
		self.total_points += score;
		self.highest_score = self.highest_score.max(score);
		self.most_words_in_a_puzzle = self.most_words_in_a_puzzle.max(words);
		self.fastest_completion = Some(
			self.fastest_completion.map_or(seconds, |best| best.min(seconds))
		);
		if self.last_completed_puzzle.is_some_and(|last| puzzle < last)
		{
			debug!("recorded archive puzzle {}: streak unchanged", puzzle);
			return true
		}
		let continues = puzzle.checked_sub(1)
			.is_some_and(|previous| self.last_completed_puzzle == Some(previous));
		self.streak = if continues { self.streak + 1 } else { 1 };
		self.highest_streak = self.highest_streak.max(self.streak);
		self.last_completed_puzzle = Some(puzzle);
		debug!("recorded puzzle {}: streak {}", puzzle, self.streak);
		true
	}

	/// Answer the streak as it stands on the given puzzle: a streak survives
	/// until a whole day passes without a completion.
	#[must_use]
	pub fn current_streak(&self, puzzle: u32) -> u32
	{
		match self.last_completed_puzzle
		{
			Some(last) if last + 1 >= puzzle => self.streak,
			_ => 0
		}
	}

	/// Answer the mean number of words per completed puzzle.
	#[must_use]
	pub fn average_words(&self) -> f64
	{
		if self.total_completions == 0
		{
			0.0
		}
		else
		{
			f64::from(self.total_words) / f64::from(self.total_completions)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
