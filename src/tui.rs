//! # Text-based user interface (TUI)
//!
//! Terminal setup and teardown for the game. Besides the alternate screen and
//! raw mode, the game asks the terminal to report focus changes, because the
//! play timer only runs while the terminal has focus.

use std::{
	io::{self, stdout, Stdout},
	panic::{self, PanicHookInfo},
	sync::{Arc, Mutex, PoisonError},
	thread
};

use crossterm::{
	event::{DisableFocusChange, EnableFocusChange},
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use log::trace;
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The terminal the game draws on.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A panic hook, as installed by [`panic::set_hook`].
type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Take over the terminal for the duration of `f`, then give it back. A panic
/// on the calling thread gives the terminal back before the panic message is
/// printed, so that the message stays readable.
///
/// # Arguments
///
/// * `f` - What to do with the terminal.
///
/// # Returns
///
/// The answer of `f`.
///
/// # Errors
///
/// Any error from `f`, or from preparing or restoring the terminal.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	let saved_hook = install_panic_hook();
	// Setup may fail halfway, so restore regardless.
	let result = tui_init().and_then(|mut terminal| f(&mut terminal));
	// Reinstate the saved hook before restoring, so that a panic while
	// restoring cannot restore again.
	let saved = saved_hook.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.take();
	if let Some(hook) = saved
	{
		panic::set_hook(hook);
	}
	tui_restore()?;
	result
}

/// Replace the panic hook with one that restores the terminal, but only for
/// panics on the current thread, and then defers to the replaced hook.
///
/// # Returns
///
/// The replaced hook, shared with the new one.
fn install_panic_hook() -> Arc<Mutex<Option<PanicHook>>>
{
	let saved = Arc::new(Mutex::new(Some(panic::take_hook())));
	let hook_saved = Arc::clone(&saved);
	let ui_thread = thread::current().id();
	panic::set_hook(Box::new(move |info| {
		if thread::current().id() == ui_thread
		{
			// Already panicking, so a failure here changes nothing.
			let _ = tui_restore();
		}
		// The saved hook stays in place, as it may run more than once.
		let saved = hook_saved.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(hook) = saved.as_ref()
		{
			hook(info);
		}
	}));
	saved
}

/// Enter the alternate screen and raw mode, and ask for focus events.
///
/// # Errors
///
/// Any error from the terminal.
fn tui_init() -> io::Result<Tui>
{
	let mut out = stdout();
	execute!(out, EnterAlternateScreen, EnableFocusChange)?;
	enable_raw_mode()?;
	trace!("terminal initialized");
	Terminal::new(CrosstermBackend::new(out))
}

/// Undo [`tui_init`], and show the cursor again.
///
/// # Errors
///
/// Any error from the terminal.
fn tui_restore() -> io::Result<()>
{
	let mut out = stdout();
	execute!(out, DisableFocusChange, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	trace!("terminal restored");
	CrosstermBackend::new(out).show_cursor()
}
