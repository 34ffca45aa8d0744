//! # Timer
//!
//! Elapsed play time, counted in whole seconds. The timer runs only while the
//! player can actually play: the terminal has focus, the puzzle is unsolved,
//! and the puzzle view is showing. Whenever any of these stops holding, the
//! seconds counted so far are kept and the partial second is dropped.

use std::time::{Duration, Instant};

use log::trace;

/// The play timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer
{
	/// The whole seconds counted so far.
	elapsed: u64,

	/// Whether the terminal has focus.
	focused: bool,

	/// Whether the puzzle has been submitted.
	solved: bool,

	/// Whether the puzzle view is showing.
	active: bool,

	/// The instant from which the next whole second is measured, present only
	/// while running.
	anchor: Option<Instant>
}

impl Timer
{
	/// Construct a stopped timer that resumes from the given count. The timer
	/// starts once the puzzle view is [activated](Self::set_active).
	///
	/// # Arguments
	///
	/// * `elapsed` - The seconds already played, e.g., restored from storage.
	#[must_use]
	pub fn new(elapsed: u64) -> Self
	{
		Self {
			elapsed,
			focused: true,
			solved: false,
			active: false,
			anchor: None
		}
	}

	/// Answer the whole seconds counted so far.
	#[inline]
	#[must_use]
	pub fn elapsed(&self) -> u64 { self.elapsed }

	/// Check whether the timer is counting.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool { self.anchor.is_some() }

	/// Count every whole second that has passed since the last tick. The
	/// remainder carries over to the next tick.
	///
	/// # Arguments
	///
	/// * `now` - The current instant.
	///
	/// # Returns
	///
	/// The updated count.
	pub fn tick(&mut self, now: Instant) -> u64
	{
		if let Some(anchor) = self.anchor
		{
			let whole = now.saturating_duration_since(anchor).as_secs();
			if whole > 0
			{
				self.elapsed += whole;
				self.anchor = Some(anchor + Duration::from_secs(whole));
			}
		}
		self.elapsed
	}

	/// Record a change of terminal focus.
	pub fn set_focused(&mut self, focused: bool, now: Instant)
	{
		self.focused = focused;
		self.sync(now);
	}

	/// Record whether the puzzle has been submitted.
	pub fn set_solved(&mut self, solved: bool, now: Instant)
	{
		self.solved = solved;
		self.sync(now);
	}

	/// Record whether the puzzle view is showing.
	pub fn set_active(&mut self, active: bool, now: Instant)
	{
		self.active = active;
		self.sync(now);
	}

	/// Start or stop the timer to match the conditions.
	fn sync(&mut self, now: Instant)
	{
		let should_run = self.focused && !self.solved && self.active;
		match (should_run, self.anchor)
		{
			(true, None) =>
			{
				trace!("timer resumed at {}s", self.elapsed);
				self.anchor = Some(now);
			},
			(false, Some(_)) =>
			{
				self.tick(now);
				self.anchor = None;
				trace!("timer paused at {}s", self.elapsed);
			},
			_ => {}
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::time::{Duration, Instant};

	use crate::timer::Timer;

	fn ms(n: u64) -> Duration { Duration::from_millis(n) }

	/// Ensure that only whole seconds count, and that the remainder carries.
	#[test]
	fn test_tick()
	{
		let start = Instant::now();
		let mut timer = Timer::new(10);
		assert_eq!(timer.tick(start + ms(5000)), 10);
		timer.set_active(true, start);
		assert!(timer.is_running());
		assert_eq!(timer.tick(start + ms(1500)), 11);
		assert_eq!(timer.tick(start + ms(1900)), 11);
		assert_eq!(timer.tick(start + ms(2000)), 12);
		assert_eq!(timer.tick(start + ms(4999)), 14);
	}

	/// Ensure that losing focus pauses, discarding the partial second, and
	/// that regaining focus resumes.
	#[test]
	fn test_focus()
	{
		let start = Instant::now();
		let mut timer = Timer::new(0);
		timer.set_active(true, start);
		timer.set_focused(false, start + ms(2700));
		assert!(!timer.is_running());
		assert_eq!(timer.elapsed(), 2);
		assert_eq!(timer.tick(start + ms(60_000)), 2);
		timer.set_focused(true, start + ms(60_000));
		assert_eq!(timer.tick(start + ms(61_000)), 3);
	}

	/// Ensure that a solved puzzle never counts, even with focus.
	#[test]
	fn test_solved()
	{
		let start = Instant::now();
		let mut timer = Timer::new(0);
		timer.set_active(true, start);
		timer.set_solved(true, start + ms(1200));
		assert_eq!(timer.elapsed(), 1);
		timer.set_focused(false, start + ms(2000));
		timer.set_focused(true, start + ms(3000));
		assert!(!timer.is_running());
		assert_eq!(timer.tick(start + ms(9000)), 1);
		timer.set_active(false, start + ms(9000));
		timer.set_active(true, start + ms(9000));
		assert!(!timer.is_running());
	}
}
