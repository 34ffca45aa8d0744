//! # Calendar
//!
//! Dates, seeds, and puzzle numbers. Every player on the same local calendar
//! day shares a seed, and therefore a puzzle.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	str::FromStr
};

use chrono::{Datelike, Local, NaiveDate};

/// The day count, from the common era, of the first puzzle: 2024-01-01.
const FIRST_PUZZLE_DAY: i32 = 738_886;

/// The seed of a day's puzzle: the local calendar date, read as the number
/// `yyyymmdd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateSeed(NaiveDate);

impl DateSeed
{
	/// Construct the seed for the given date.
	#[inline]
	#[must_use]
	pub fn new(date: NaiveDate) -> Self { Self(date) }

	/// Construct the seed for the current local date.
	#[must_use]
	pub fn today() -> Self { Self(Local::now().date_naive()) }

	/// Answer the date.
	#[inline]
	#[must_use]
	pub fn date(&self) -> NaiveDate { self.0 }

	/// Answer the numeric seed, `yyyymmdd`. Years before the common era
	/// contribute nothing.
	#[must_use]
	pub fn value(&self) -> u32
	{
		let year = u32::try_from(self.0.year()).unwrap_or(0);
		year * 10_000 + self.0.month() * 100 + self.0.day()
	}

	/// Answer the puzzle number: 1 for 2024-01-01, counting up one per day.
	/// Earlier dates are puzzle 0.
	#[must_use]
	pub fn puzzle_number(&self) -> u32
	{
		let days = self.0.num_days_from_ce() - FIRST_PUZZLE_DAY + 1;
		u32::try_from(days).unwrap_or(0)
	}
}

impl Display for DateSeed
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}", self.value())
	}
}

impl FromStr for DateSeed
{
	type Err = SeedError;

	/// Parse a date, either as `YYYY-MM-DD` or as the numeric seed `yyyymmdd`.
	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		let s = s.trim();
		NaiveDate::parse_from_str(s, "%Y-%m-%d")
			.or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
			.map(Self)
			.map_err(|_| SeedError::Malformed(s.to_string()))
	}
}

/// The complete enumeration of seed parsing errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedError
{
	/// The text is not a recognizable date.
	Malformed(String)
}

impl Display for SeedError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Malformed(s) => write!(f, "not a date (YYYY-MM-DD): {}", s)
		}
	}
}

impl Error for SeedError {}

/// Format elapsed play time as `HH:MM:SS`. Hours do not wrap.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String
{
	format!(
		"{:02}:{:02}:{:02}",
		seconds / 3600,
		seconds / 60 % 60,
		seconds % 60
	)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
