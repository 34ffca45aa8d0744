//! # Scrambled
//!
//! Scrambled is a daily word-placement puzzle. Everyone receives the same 20
//! letters each day, and must arrange all of them on a 6×6 grid so that every
//! horizontal and vertical run of letters is a word, and so that the letters
//! form a single connected island.
//!
//! Via command line options, the user can specify the dictionary and the file
//! that holds the game state. Then the user plays the day's puzzle via a
//! text-based user interface (TUI). Progress is saved after every move, so
//! the puzzle resumes where it was left for the rest of the day.

mod app;
mod tui;

use std::{error::Error, fs::File, path::{Path, PathBuf}, rc::Rc};

use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::{debug, trace, warn};

use app::App;
use scrambled::{
	calendar::DateSeed,
	dictionary::Dictionary,
	generator::Generator,
	scoring::{count_solution_board_score, create_scored_solution_board},
	session::{Overrides, Session},
	storage::{delete_ephemeral_data, FileStorage, MemoryStorage, Storage}
};
use tui::tui;

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for playing Scrambled puzzles.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0")]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "english")]
	dictionary: String,

	/// The file that holds the game state between runs.
	#[arg(short = 's', long, default_value = "scrambled.state")]
	state: PathBuf,

	/// Write log messages to this file. The filter comes from `RUST_LOG`.
	#[arg(long)]
	log: Option<PathBuf>,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary dictionary and exit.
	Generate,

	/// Open the text-based user interface (TUI) to play the day's puzzle. The
	/// shareable result is written to standard output once the puzzle is
	/// finished.
	Play {
		/// Play in hard mode. Only possible before any letter is placed.
		#[arg(long, num_args = 0..=1, default_missing_value = "true")]
		hard: Option<bool>,

		/// Show points on the board after submission.
		#[arg(long, num_args = 0..=1, default_missing_value = "true")]
		score: Option<bool>,

		/// Show the play timer.
		#[arg(long, num_args = 0..=1, default_missing_value = "true")]
		timer: Option<bool>,

		/// Play the puzzle of another day, as `YYYY-MM-DD`.
		#[arg(long)]
		date: Option<DateSeed>
	},

	/// Print the solution of the day's puzzle and its score.
	Solution {
		/// Reveal the puzzle of another day, as `YYYY-MM-DD`.
		#[arg(long)]
		date: Option<DateSeed>
	},

	/// Delete every saved board, tray, timer, and game-over flag. Settings
	/// and statistics survive.
	Reset
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
///
/// # Errors
///
/// Any error that occurs while opening the dictionary or driving the TUI.
fn main() -> Result<(), Box<dyn Error>>
{
	// Parse the command line options.
	let opts = Opts::parse();
	init_logging(&opts)?;
	debug!("Command line options: {:?}", opts);

	// Open the dictionary, creating the binary dictionary if necessary.
	let dictionary = Dictionary::open(&opts.directory, &opts.dictionary)
		.map_err(|e| format!(
			"Failed to open dictionary: {}/{}.dict or {0}/{1}.txt: {}",
			opts.directory,
			opts.dictionary,
			e
		))?;

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary dictionary");
		},
		Command::Play { hard, score, timer, date } =>
		{
			let today = DateSeed::today();
			let seed = date.unwrap_or(today);
			let overrides = Overrides {
				hard_mode: hard,
				score_mode: score,
				show_timer: timer
			};
			let session = Session::load(
				open_storage(&opts.state),
				Rc::new(dictionary),
				seed,
				today,
				overrides
			);
			trace!("Opening TUI");
			let submission = tui(|tui| App::new(session).run(tui))?;
			if let Some(submission) = submission
			{
				println!("{}", submission.share_text());
			}
		},
		Command::Solution { date } =>
		{
			let seed = date.unwrap_or_else(DateSeed::today);
			let puzzle = Generator::new(&dictionary).generate(seed.value());
			let best_score = count_solution_board_score(
				&create_scored_solution_board(&puzzle.solution)
			);
			println!("Scrambled #{} ({})", seed.puzzle_number(), seed.date());
			println!("{}", puzzle.solution);
			println!("Best score: {}", best_score);
		},
		Command::Reset =>
		{
			let mut storage = open_storage(&opts.state);
			let removed = delete_ephemeral_data(storage.as_mut());
			println!("Removed {} saved entries", removed);
		}
	}
	Ok(())
}

/// Initialize logging. The TUI owns the terminal, so logging goes to a file
/// or, outside the TUI, to standard error.
///
/// # Errors
///
/// Any error that occurs while creating the log file.
fn init_logging(opts: &Opts) -> Result<(), Box<dyn Error>>
{
	let mut builder =
		env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	match opts.log
	{
		Some(ref path) =>
		{
			builder.target(Target::Pipe(Box::new(File::create(path)?)));
		},
		None if matches!(opts.command, Command::Play { .. }) => return Ok(()),
		None =>
		{
			builder.target(Target::Stderr);
		}
	}
	builder.try_init()?;
	Ok(())
}

/// Open the state file. If it cannot be opened, play continues without
/// persistence.
fn open_storage(path: &Path) -> Box<dyn Storage>
{
	match FileStorage::open(path)
	{
		Ok(storage) => Box::new(storage),
		Err(e) =>
		{
			warn!("cannot open {}: {}", path.display(), e);
			eprintln!(
				"Cannot open {}: {}. Progress will not be saved.",
				path.display(),
				e
			);
			Box::new(MemoryStorage::new())
		}
	}
}
