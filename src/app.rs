//! # Application
//!
//! The application state and logic, including the text-based user interface
//! (TUI). The application owns the day's [session](Session) and translates
//! terminal events into game operations, and game outcomes into toasts.

use std::{io, iter, time::{Duration, Instant}};

use crossterm::event::{
	poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers
};
use log::{debug, warn};
use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Modifier, Style, Stylize},
	text::{Line, Span},
	widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
	Frame
};
use scrambled::{
	board::{self, CursorDirection, Tile, TileState, GRID_SIZE},
	calendar::format_elapsed,
	game::{FinishBlocker, GameError, Submission},
	session::Session
};

use crate::tui::Tui;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// How long to wait for an event before ticking the timer again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The rules, as shown on first launch and on request.
const INSTRUCTIONS: &str = "\
	Place all 20 letters on the grid.\n\
	\n\
	Every horizontal or vertical run of two or more letters must be a word, \
	and all of the letters must connect into a single island.\n\
	\n\
	Type a letter to place it under the cursor. The cursor then advances in \
	the typing direction, which Space flips. Shift and an arrow key slide the \
	whole board.\n\
	\n\
	Hard mode pins four letters in their solution positions, forbids sliding, \
	and gives you a single attempt.";

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// What the application is doing.
	state: ExecutionState,

	/// The day's session.
	session: Session,

	/// The current notification, if any.
	toast: Option<Toast>
}

// Public interface.
impl App
{
	/// Create a new application state. A finished puzzle opens straight onto
	/// its results, and a first launch opens onto the instructions.
	///
	/// # Arguments
	///
	/// * `session` - The day's session.
	///
	/// # Returns
	///
	/// The new application state.
	pub fn new(session: Session) -> Self
	{
		let state = match session.game().submission()
		{
			Some(submission) => ExecutionState::Finished { submission },
			None if session.is_first_time() => ExecutionState::Instructions,
			None => ExecutionState::Playing
		};
		let mut app = Self { state: ExecutionState::Exiting, session, toast: None };
		app.enter(state, Instant::now());
		app
	}

	/// Run the application. This amounts to:
	///
	/// * Advancing the timer and expiring old toasts.
	/// * Rendering the application frame.
	/// * Processing events.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The submission, if the puzzle is finished.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Option<Submission>>
	{
		while self.is_running()
		{
			self.process_systems(Instant::now());
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		Ok(self.session.game().submission())
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		!matches!(self.state, ExecutionState::Exiting)
	}
}

// Private implementation details.
impl App
{
	/// Switch to the given state. The timer runs only while the puzzle is
	/// showing.
	fn enter(&mut self, state: ExecutionState, now: Instant)
	{
		self.session.set_active(matches!(state, ExecutionState::Playing), now);
		self.state = state;
	}

	/// Show a toast.
	fn notify<T: Into<String>>(&mut self, message: T, color: Color, now: Instant)
	{
		let message = message.into();
		debug!("toast: {}", message);
		self.toast = Some(Toast { message, color, until: now + TOAST_DURATION });
	}

	/// Report a rejected operation, if it was rejected.
	fn report(&mut self, result: Result<(), GameError>, now: Instant)
	{
		if let Err(e) = result
		{
			self.notify(error_message(e), Color::Red, now);
		}
	}

	/// Advance the timer and expire the toast.
	fn process_systems(&mut self, now: Instant)
	{
		self.session.tick(now);
		if self.toast.as_ref().is_some_and(|toast| toast.until <= now)
		{
			self.toast = None;
		}
	}

	/// Process events. Block only briefly, so that the timer keeps ticking.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(POLL_INTERVAL)?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				Event::FocusGained =>
					self.session.set_focused(true, Instant::now()),
				Event::FocusLost =>
					self.session.set_focused(false, Instant::now()),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event according to the current state.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		let now = Instant::now();
		if event.code == KeyCode::Char('c')
			&& event.modifiers.contains(KeyModifiers::CONTROL)
		{
			self.exit(now);
			return
		}
		match self.state
		{
			ExecutionState::Instructions =>
				self.process_key_event_instructions(event, now),
			ExecutionState::Playing =>
				self.process_key_event_playing(event, now),
			ExecutionState::Finished { .. } =>
				self.process_key_event_finished(event, now),
			ExecutionState::Exiting => {}
		}
	}

	/// Process a key event while showing the
	/// [instructions](ExecutionState::Instructions):
	///
	/// * Escape - Exit the application.
	/// * Any other key - Start playing.
	fn process_key_event_instructions(&mut self, event: KeyEvent, now: Instant)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(now),
			_ =>
			{
				self.session.dismiss_first_time();
				self.enter(ExecutionState::Playing, now);
			}
		}
	}

	/// Process a key event while [playing](ExecutionState::Playing):
	///
	/// * Escape - Exit the application.
	/// * A-Z - Place the letter under the cursor.
	/// * Space - Flip the typing direction.
	/// * Backspace - Delete a letter.
	/// * Delete - Clear the board.
	/// * Arrows - Move the cursor.
	/// * Shift+Arrows - Slide the board.
	/// * Tab - Shuffle the tray.
	/// * Enter - Submit.
	/// * F1 - Show the instructions.
	/// * F2 - Toggle score mode.
	/// * F3 - Toggle the timer.
	/// * F4 - Toggle hard mode.
	fn process_key_event_playing(&mut self, event: KeyEvent, now: Instant)
	{
		let shift = event.modifiers.contains(KeyModifiers::SHIFT);
		match event.code
		{
			KeyCode::Esc => self.exit(now),
			KeyCode::Up => self.arrow(board::Direction::Up, shift, now),
			KeyCode::Down => self.arrow(board::Direction::Down, shift, now),
			KeyCode::Left => self.arrow(board::Direction::Left, shift, now),
			KeyCode::Right => self.arrow(board::Direction::Right, shift, now),
			KeyCode::Char(' ') =>
			{
				let result = self.session.flip_cursor();
				self.report(result, now);
			},
			KeyCode::Char(c) if c.is_ascii_alphabetic() =>
			{
				let result = self.session.type_letter(c);
				self.report(result, now);
			},
			KeyCode::Backspace =>
			{
				let result = self.session.backspace();
				self.report(result, now);
			},
			KeyCode::Delete =>
			{
				let result = self.session.clear_board();
				self.report(result, now);
			},
			KeyCode::Tab => self.session.shuffle_letters(),
			KeyCode::Enter => self.submit(now),
			KeyCode::F(1) => self.enter(ExecutionState::Instructions, now),
			KeyCode::F(2) => self.toggle_score_mode(),
			KeyCode::F(3) => self.toggle_show_timer(),
			KeyCode::F(4) => self.toggle_hard_mode(now),
			_ => {}
		}
	}

	/// Process a key event while reviewing the
	/// [results](ExecutionState::Finished):
	///
	/// * Escape - Exit the application.
	/// * F2 - Toggle score mode.
	fn process_key_event_finished(&mut self, event: KeyEvent, now: Instant)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(now),
			KeyCode::F(2) =>
			{
				self.toggle_score_mode();
				if let Some(submission) = self.session.game().submission()
				{
					self.state = ExecutionState::Finished { submission };
				}
			},
			_ => {}
		}
	}

	/// Move the cursor, or with `shift`, slide the board.
	fn arrow(&mut self, direction: board::Direction, shift: bool, now: Instant)
	{
		let result =
			if shift { self.session.shift_board(direction) }
			else { self.session.move_cursor(direction) };
		self.report(result, now);
	}

	/// Submit the board. If the dictionary rejects some words, annotate the
	/// board so that the player can see which.
	fn submit(&mut self, now: Instant)
	{
		match self.session.submit(now)
		{
			Ok(submission) =>
			{
				self.notify(compliment(&submission), Color::Green, now);
				self.enter(ExecutionState::Finished { submission }, now);
			},
			Err(GameError::CannotFinish(blocker)) =>
			{
				if blocker == FinishBlocker::InvalidWords
				{
					if let Err(e) = self.session.check()
					{
						warn!("check failed: {}", e);
					}
				}
				self.notify(blocker_message(blocker), Color::Red, now);
			},
			Err(e) => self.notify(error_message(e), Color::Red, now)
		}
	}

	fn toggle_score_mode(&mut self)
	{
		let score_mode = self.session.game().settings().score_mode;
		self.session.set_score_mode(!score_mode);
	}

	fn toggle_show_timer(&mut self)
	{
		let show_timer = self.session.game().settings().show_timer;
		self.session.set_show_timer(!show_timer);
	}

	fn toggle_hard_mode(&mut self, now: Instant)
	{
		let hard_mode = !self.session.game().settings().hard_mode;
		match self.session.set_hard_mode(hard_mode)
		{
			Ok(()) if hard_mode =>
				self.notify("Hard mode: four letters are pinned", Color::Yellow, now),
			Ok(()) => self.notify("Hard mode off", Color::Yellow, now),
			Err(e) => self.notify(error_message(e), Color::Red, now)
		}
	}

	/// Mark the application for exit. The application will exit after the next
	/// iteration of the main loop.
	fn exit(&mut self, now: Instant)
	{
		self.enter(ExecutionState::Exiting, now);
	}

	/// Render the application frame.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.area());
	}

	/// Render the frame common to every state, answering the inner area.
	fn render_outline(&self, area: Rect, buf: &mut Buffer) -> Rect
	{
		let game = self.session.game();
		let title = format!(
			"Scrambled #{}{}",
			game.puzzle_number(),
			if game.settings().hard_mode { " (hard)" } else { "" }
		);
		let mut block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title_top(Line::from(title).centered())
			.title_top(Line::from("⎋ – exit".yellow().bold()).left_aligned());
		if let ExecutionState::Playing = self.state
		{
			block = block
				.title_top(Line::from("↵ – submit".green().bold()).right_aligned())
				.title_bottom(
					Line::from(
						"\
							A-Z - place \
							␣ - flip \
							←↑↓→ - move \
							⇧←↑↓→ - slide \
							⌫ - delete \
							⌦ - clear \
							F1 - help\
						".cyan()
					).centered()
				);
		}
		let inner = block.inner(area);
		block.render(area, buf);
		inner
	}

	/// Render the [instructions](ExecutionState::Instructions).
	fn render_instructions(&self, area: Rect, buf: &mut Buffer)
	{
		let area = self.render_outline(area, buf);
		let [_, middle, _] = Layout::default()
			.direction(Direction::Vertical)
			.margin(1)
			.constraints([
				Constraint::Min(0),
				Constraint::Length(16),
				Constraint::Min(0)
			])
			.areas(area);
		Paragraph::new(INSTRUCTIONS)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.border_type(BorderType::Rounded)
					.title_top(Line::from("How to play").centered())
					.title_bottom(
						Line::from("any key – start".green().bold()).centered()
					)
			)
			.wrap(Wrap { trim: true })
			.render(middle, buf);
	}

	/// Render the puzzle, with the side panel appropriate to the state.
	fn render_puzzle(
		&self,
		area: Rect,
		buf: &mut Buffer,
		submission: Option<&Submission>
	)
	{
		let area = self.render_outline(area, buf);
		// Split the screen into two parts: the board and the side panel.
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(50), Constraint::Min(30)])
			.split(area);
		self.render_board(outer[0], buf, submission.is_none());
		match submission
		{
			Some(submission) => self.render_results(outer[1], buf, submission),
			None => self.render_side_panel(outer[1], buf)
		}
	}

	/// Render the 6×6 board.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `show_cursor` - Whether to highlight the cursor.
	fn render_board(&self, area: Rect, buf: &mut Buffer, show_cursor: bool)
	{
		let board = self.session.game().board();
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.constraints(
				iter::once(Constraint::Min(0))
					.chain(iter::repeat(Constraint::Length(3)).take(GRID_SIZE))
					.chain(iter::once(Constraint::Min(0)))
			)
			.split(area);
		for (row, tiles) in board.tiles.iter().enumerate()
		{
			let cols = Layout::default()
				.direction(Direction::Horizontal)
				.constraints(
					iter::once(Constraint::Min(0))
						.chain(iter::repeat(Constraint::Length(5)).take(GRID_SIZE))
						.chain(iter::once(Constraint::Min(0)))
				)
				.split(rows[row + 1]);
			for (col, tile) in tiles.iter().enumerate()
			{
				let cursor = show_cursor
					&& board.cursor.row == row
					&& board.cursor.col == col;
				let content = match tile.letter
				{
					Some(letter) => letter.letter.to_string(),
					None if cursor => match board.cursor.direction
					{
						CursorDirection::LeftToRight => "→".to_string(),
						CursorDirection::TopToBottom => "↓".to_string()
					},
					None => String::new()
				};
				tile_widget(tile, content, cursor).render(cols[col + 1], buf);
			}
		}
	}

	/// Render the timer, the tray, and either the toast or the settings.
	fn render_side_panel(&self, area: Rect, buf: &mut Buffer)
	{
		let game = self.session.game();
		let settings = game.settings();
		let panel = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(if settings.show_timer { 3 } else { 0 }),
				Constraint::Length(4),
				Constraint::Min(6)
			])
			.split(area);
		if settings.show_timer
		{
			Paragraph::new(format_elapsed(self.session.timer().elapsed()))
				.alignment(Alignment::Center)
				.block(titled_block("Time"))
				.render(panel[0], buf);
		}
		let tray = game.unused_letters().iter()
			.map(|l| l.letter.to_string())
			.collect::<Vec<_>>()
			.join(" ");
		Paragraph::new(tray)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true })
			.block(
				titled_block("Letters")
					.title_bottom(Line::from("⇥ – shuffle".cyan()).centered())
			)
			.render(panel[1], buf);
		let lines = match self.toast
		{
			Some(ref toast) => vec![
				Line::from(Span::styled(
					toast.message.clone(),
					Style::default().fg(toast.color).add_modifier(Modifier::BOLD)
				))
			],
			None => vec![
				Line::from(format!("F2 - score mode: {}", on_off(settings.score_mode))),
				Line::from(format!("F3 - timer: {}", on_off(settings.show_timer))),
				Line::from(format!("F4 - hard mode: {}", on_off(settings.hard_mode)))
			]
		};
		Paragraph::new(lines)
			.wrap(Wrap { trim: true })
			.block(titled_block("Status"))
			.render(panel[2], buf);
	}

	/// Render the results of a finished puzzle: the shareable summary, the
	/// solution, and the statistics.
	fn render_results(&self, area: Rect, buf: &mut Buffer, submission: &Submission)
	{
		let panel = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(GRID_SIZE as u16 + 4),
				Constraint::Length(GRID_SIZE as u16 + 2),
				Constraint::Min(7)
			])
			.split(area);
		let mut summary = self.toast.as_ref()
			.map(|toast| Line::from(Span::styled(
				toast.message.clone(),
				Style::default().fg(toast.color).add_modifier(Modifier::BOLD)
			)))
			.into_iter()
			.collect::<Vec<_>>();
		summary.extend(submission.share_text().lines().map(|l| Line::from(l.to_string())));
		Paragraph::new(summary)
			.block(titled_block("Result"))
			.render(panel[0], buf);
		if let Some(solution) = self.session.game().solution()
		{
			Paragraph::new(solution.to_string())
				.alignment(Alignment::Center)
				.block(titled_block("Solution"))
				.render(panel[1], buf);
		}
		let stats = self.session.statistics();
		let fastest = stats.fastest_completion
			.map_or_else(|| "–".to_string(), format_elapsed);
		let lines = vec![
			Line::from(format!(
				"Streak: {}",
				stats.current_streak(submission.puzzle_number)
			)),
			Line::from(format!("Best streak: {}", stats.highest_streak)),
			Line::from(format!("Completed: {}", stats.total_completions)),
			Line::from(format!("Words per puzzle: {:.1}", stats.average_words())),
			Line::from(format!("Highest score: {}", stats.highest_score)),
			Line::from(format!("Fastest: {}", fastest))
		];
		Paragraph::new(lines)
			.block(
				titled_block("Statistics")
					.title_bottom(Line::from("F2 – scores".cyan()).centered())
			)
			.render(panel[2], buf);
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Instructions => self.render_instructions(area, buf),
			ExecutionState::Playing => self.render_puzzle(area, buf, None),
			ExecutionState::Finished { ref submission } =>
				self.render_puzzle(area, buf, Some(submission)),
			ExecutionState::Exiting => {}
		}
	}
}

/// The execution state of the application.
#[derive(Clone, Debug)]
enum ExecutionState
{
	/// The rules are showing.
	Instructions,

	/// The player is arranging letters.
	Playing,

	/// The puzzle is finished, and the player is reviewing the results.
	Finished {
		/// The result of the submission.
		submission: Submission
	},

	/// The application is exiting.
	Exiting
}

/// A transient notification.
#[derive(Clone, Debug)]
struct Toast
{
	message: String,
	color: Color,

	/// When the toast disappears.
	until: Instant
}

////////////////////////////////////////////////////////////////////////////////
//                                 Rendering.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Build a bordered block with a centered title.
fn titled_block(title: &str) -> Block<'_>
{
	Block::default()
		.borders(Borders::ALL)
		.border_type(BorderType::Rounded)
		.title_top(Line::from(title).centered())
}

/// Build the widget for a single tile. Pinned tiles get a double border, and
/// scored tiles show their points on the bottom border.
fn tile_widget(tile: &Tile, content: String, cursor: bool) -> Paragraph<'static>
{
	let border_color = match tile.state
	{
		TileState::Idle => Color::White,
		TileState::Valid => Color::Green,
		TileState::Invalid => Color::Red,
		TileState::Mixed => Color::Yellow,
		TileState::Incorrect => Color::Magenta
	};
	let mut block = Block::new()
		.border_type(
			if tile.is_locked { BorderType::Double } else { BorderType::Rounded }
		)
		.borders(Borders::ALL)
		.border_style(Style::default().fg(border_color));
	if let Some(score) = tile.score
	{
		block = block.title_bottom(Line::from(score.to_string()).right_aligned());
	}
	let style =
		if cursor { Style::default().fg(Color::Black).bg(Color::Cyan) }
		else if tile.is_locked { Style::default().add_modifier(Modifier::BOLD) }
		else { Style::default() };
	Paragraph::new(content)
		.block(block)
		.alignment(Alignment::Center)
		.style(style)
}

#[inline]
fn on_off(flag: bool) -> &'static str { if flag { "on" } else { "off" } }

////////////////////////////////////////////////////////////////////////////////
//                                 Messages.                                  //
////////////////////////////////////////////////////////////////////////////////

/// Explain a rejected operation.
fn error_message(error: GameError) -> String
{
	match error
	{
		GameError::Locked { .. } => "That letter is pinned".to_string(),
		GameError::GameOver => "Today's puzzle is finished".to_string(),
		GameError::ShiftForbidden => "No sliding in hard mode".to_string(),
		GameError::AlreadyStarted =>
			"Clear the board to change hard mode".to_string(),
		GameError::CannotFinish(blocker) => blocker_message(blocker),
		GameError::LetterUnavailable(c) => format!("No {} left to place", c),
		GameError::UnknownLetter(_) => error.to_string()
	}
}

/// Explain why the board cannot be submitted.
fn blocker_message(blocker: FinishBlocker) -> String
{
	match blocker
	{
		FinishBlocker::UnusedLetters(1) => "1 letter left to place".to_string(),
		FinishBlocker::UnusedLetters(n) => format!("{} letters left to place", n),
		FinishBlocker::InvalidWords =>
			"Some words are not in the dictionary".to_string(),
		FinishBlocker::Disconnected => "All letters must connect".to_string()
	}
}

/// Congratulate the player.
fn compliment(submission: &Submission) -> &'static str
{
	const COMPLIMENTS: [&str; 4] = ["Nice!", "Great!", "Superb!", "Brilliant!"];
	if submission.invalid_words.is_empty()
		&& submission.score >= submission.best_score
	{
		"Perfect!"
	}
	else
	{
		COMPLIMENTS[submission.valid_words.len() % COMPLIMENTS.len()]
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::rc::Rc;

	use chrono::NaiveDate;
	use scrambled::{
		board::LetterGrid,
		calendar::DateSeed,
		dictionary::Dictionary,
		session::Overrides,
		storage::MemoryStorage
	};

	use super::*;

	fn app() -> App
	{
		let dictionary = Rc::new(Dictionary::from_iter([
			"stares", "sleep", "eager", "earns", "plans"
		]));
		let seed = DateSeed::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
		let session = Session::load(
			Box::new(MemoryStorage::new()),
			dictionary,
			seed,
			seed,
			Overrides::default()
		);
		App::new(session)
	}

	/// Create an application that is past the instructions.
	fn playing() -> App
	{
		let mut app = app();
		app.process_key_event(KeyCode::Enter.into());
		app
	}

	/// Ensure that the application exits when the escape key is pressed.
	#[test]
	fn test_handle_exit()
	{
		let mut app = app();
		assert!(app.is_running());
		app.process_key_event(KeyCode::Esc.into());
		assert!(!app.is_running());
		let mut app = playing();
		app.process_key_event(
			KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
		);
		assert!(!app.is_running());
	}

	/// Ensure that the instructions show on first launch only, and that the
	/// timer waits for them to be dismissed.
	#[test]
	fn test_handle_instructions()
	{
		let mut app = app();
		assert!(matches!(app.state, ExecutionState::Instructions));
		assert!(!app.session.timer().is_running());
		app.process_key_event(KeyCode::Char('x').into());
		assert!(matches!(app.state, ExecutionState::Playing));
		assert!(!app.session.is_first_time());
		assert!(app.session.timer().is_running());
		// Nothing was typed by the dismissal.
		assert_eq!(app.session.game().board().letter_count(), 0);
		app.process_key_event(KeyCode::F(1).into());
		assert!(matches!(app.state, ExecutionState::Instructions));
		assert!(!app.session.timer().is_running());
	}

	/// Ensure that typing places tray letters, and that a missing letter
	/// raises a toast instead.
	#[test]
	fn test_handle_typing()
	{
		let mut app = playing();
		let letters = app.session.game().letters().to_vec();
		let first = letters[0].letter;
		app.process_key_event(KeyCode::Char(first.to_ascii_lowercase()).into());
		assert_eq!(app.session.game().board().letter_at(0, 0), Some(first));
		assert!(app.toast.is_none());
		let missing = ('A' ..= 'Z')
			.find(|c| letters.iter().all(|l| l.letter != *c))
			.unwrap();
		app.process_key_event(KeyCode::Char(missing).into());
		assert_eq!(app.session.game().board().letter_count(), 1);
		let toast = app.toast.as_ref().unwrap();
		assert_eq!(toast.message, format!("No {} left to place", missing));
		app.process_key_event(KeyCode::Backspace.into());
		assert_eq!(app.session.game().board().letter_count(), 0);
	}

	/// Ensure that the arrows move the cursor, and with shift, slide the
	/// board.
	#[test]
	fn test_handle_arrows()
	{
		let mut app = playing();
		let first = app.session.game().letters()[0].letter;
		app.process_key_event(KeyCode::Char(first).into());
		app.process_key_event(KeyCode::Down.into());
		let cursor = app.session.game().board().cursor;
		assert_eq!((cursor.row, cursor.col), (1, 1));
		app.process_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
		let board = app.session.game().board();
		assert_eq!(board.letter_at(0, 0), None);
		assert_eq!(board.letter_at(0, 1), Some(first));
		app.process_key_event(KeyCode::Char(' ').into());
		assert_eq!(
			app.session.game().board().cursor.direction,
			CursorDirection::TopToBottom
		);
	}

	/// Ensure that an incomplete submission explains itself.
	#[test]
	fn test_handle_submit_incomplete()
	{
		let mut app = playing();
		app.process_key_event(KeyCode::Enter.into());
		assert!(matches!(app.state, ExecutionState::Playing));
		assert_eq!(
			app.toast.as_ref().map(|t| t.message.as_str()),
			Some("20 letters left to place")
		);
	}

	/// Ensure that the settings toggle from the keyboard.
	#[test]
	fn test_handle_settings()
	{
		let mut app = playing();
		let before = app.session.game().settings();
		app.process_key_event(KeyCode::F(2).into());
		app.process_key_event(KeyCode::F(3).into());
		app.process_key_event(KeyCode::F(4).into());
		let after = app.session.game().settings();
		assert_eq!(after.score_mode, !before.score_mode);
		assert_eq!(after.show_timer, !before.show_timer);
		assert!(after.hard_mode);
		assert_eq!(app.session.game().board().letter_count(), 4);
		app.process_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
		assert_eq!(
			app.toast.as_ref().map(|t| t.message.as_str()),
			Some("No sliding in hard mode")
		);
	}

	/// Ensure that the puzzle renders with its number.
	#[test]
	fn test_render()
	{
		let app = playing();
		let area = Rect::new(0, 0, 100, 30);
		let mut buf = Buffer::empty(area);
		(&app).render(area, &mut buf);
		let text = buf.content().iter().map(|c| c.symbol()).collect::<String>();
		assert!(text.contains("Scrambled #153"));
		assert!(text.contains("Letters"));
	}
}
