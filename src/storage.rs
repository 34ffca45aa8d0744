//! # Storage
//!
//! Persistence of game state as a flat key-value store. Keys come in two
//! kinds:
//!
//! * _Ephemeral_ keys belong to a single day. Each is prefixed by the day's
//!   seed and a divider, followed by the game's stamp, so that yesterday's
//!   state can be recognized and [cleaned](clean) away.
//! * _Durable_ keys carry only the stamp. They hold settings and statistics,
//!   and are never removed automatically.
//!
//! Values are encoded with [`bincode`]. Storage is never essential: callers
//! log failures and carry on with in-memory state.

use std::{
	collections::BTreeMap,
	error::Error,
	fmt::{self, Display, Formatter},
	fs::File,
	io::{self, BufReader, ErrorKind, Read, Write},
	path::{Path, PathBuf}
};

use log::{debug, trace, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::calendar::DateSeed;

////////////////////////////////////////////////////////////////////////////////
//                                   Keys.                                    //
////////////////////////////////////////////////////////////////////////////////

/// Marks every key that belongs to this game.
pub const STAMP: &str = "_scrambled-game__";

/// Separates the seed from the rest of an ephemeral key.
pub const SEED_DIVIDER: &str = "_.-sEeD-dIvIdEr-._";

/// Everything that the game persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PersistedState
{
	/// Whether today's puzzle has been submitted.
	GameOver,

	/// Today's board.
	Board,

	/// Today's tray, in display order.
	Letters,

	/// Today's elapsed play time, in seconds.
	Timer,

	/// Whether the player has yet to see the instructions.
	FirstTime,

	/// Whether hard mode is enabled.
	HardMode,

	/// Whether score mode is enabled.
	ScoreMode,

	/// Whether the timer is shown.
	ShowTimer,

	/// The long-lived statistics.
	Statistics
}

impl PersistedState
{
	/// Check whether the state belongs to a single day.
	#[inline]
	#[must_use]
	pub fn is_ephemeral(self) -> bool
	{
		matches!(self, Self::GameOver | Self::Board | Self::Letters | Self::Timer)
	}

	fn name(self) -> &'static str
	{
		match self
		{
			Self::GameOver => "game-over",
			Self::Board => "todays-board",
			Self::Letters => "todays-letters",
			Self::Timer => "timer",
			Self::FirstTime => "first-time",
			Self::HardMode => "hard-mode",
			Self::ScoreMode => "score-mode",
			Self::ShowTimer => "show-timer",
			Self::Statistics => "statistics"
		}
	}

	/// Answer the storage key of the state on the given day. Durable states
	/// ignore the day.
	#[must_use]
	pub fn key(self, seed: DateSeed) -> String
	{
		if self.is_ephemeral()
		{
			format!("{}{}{}{}", seed, SEED_DIVIDER, STAMP, self.name())
		}
		else
		{
			format!("{}{}", STAMP, self.name())
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Storage.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A flat key-value store of raw bytes.
pub trait Storage
{
	/// Answer every key, in no particular order.
	fn keys(&self) -> Vec<String>;

	/// Answer the value of the given key, if any.
	fn get_raw(&self, key: &str) -> Option<Vec<u8>>;

	/// Set the value of the given key.
	///
	/// # Errors
	///
	/// [`StorageError::Io`] if the value could not be made durable.
	fn set_raw(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Remove the given key. Removing an absent key is not an error.
	///
	/// # Errors
	///
	/// [`StorageError::Io`] if the removal could not be made durable.
	fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Load and decode a value.
///
/// # Arguments
///
/// * `storage` - The store.
/// * `key` - The key.
///
/// # Returns
///
/// The decoded value, or `None` if the key is absent.
///
/// # Errors
///
/// [`StorageError::Encoding`] if the stored bytes do not decode as `T`.
pub fn load<T, S>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
	T: DeserializeOwned,
	S: Storage + ?Sized
{
	storage.get_raw(key)
		.map(|bytes| bincode::deserialize(&bytes))
		.transpose()
		.map_err(StorageError::Encoding)
}

/// Encode and store a value.
///
/// # Arguments
///
/// * `storage` - The store.
/// * `key` - The key.
/// * `value` - The value.
///
/// # Errors
///
/// * [`StorageError::Encoding`] if the value cannot be encoded.
/// * [`StorageError::Io`] if the store cannot be written.
pub fn store<T, S>(storage: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
	T: Serialize + ?Sized,
	S: Storage + ?Sized
{
	let bytes = bincode::serialize(value).map_err(StorageError::Encoding)?;
	storage.set_raw(key, bytes)
}

/// Check whether a key is ephemeral, i.e., carries both the stamp and the
/// seed divider.
#[inline]
#[must_use]
fn is_ephemeral_key(key: &str) -> bool
{
	key.contains(STAMP) && key.contains(SEED_DIVIDER)
}

/// Remove every ephemeral key that does not belong to the given day. Safe to
/// repeat.
///
/// # Arguments
///
/// * `storage` - The store.
/// * `today` - The current day.
///
/// # Returns
///
/// The number of keys removed.
pub fn clean<S: Storage + ?Sized>(storage: &mut S, today: DateSeed) -> usize
{
	let today = today.to_string();
	let stale = storage.keys()
		.into_iter()
		.filter(|key| is_ephemeral_key(key))
		.filter(|key| key.split(SEED_DIVIDER).next() != Some(today.as_str()))
		.collect::<Vec<_>>();
	remove_all(storage, &stale)
}

/// Remove every ephemeral key, whatever the day.
///
/// # Returns
///
/// The number of keys removed.
pub fn delete_ephemeral_data<S: Storage + ?Sized>(storage: &mut S) -> usize
{
	let ephemeral = storage.keys()
		.into_iter()
		.filter(|key| is_ephemeral_key(key))
		.collect::<Vec<_>>();
	remove_all(storage, &ephemeral)
}

fn remove_all<S: Storage + ?Sized>(storage: &mut S, keys: &[String]) -> usize
{
	let mut removed = 0;
	for key in keys
	{
		match storage.remove(key)
		{
			Ok(()) =>
			{
				trace!("removed stale key: {}", key);
				removed += 1;
			},
			Err(e) => warn!("failed to remove key {}: {}", key, e)
		}
	}
	removed
}

////////////////////////////////////////////////////////////////////////////////
//                              Implementations.                              //
////////////////////////////////////////////////////////////////////////////////

/// Volatile storage. Also what a session falls back to when nothing durable
/// is available.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage
{
	entries: BTreeMap<String, Vec<u8>>
}

impl MemoryStorage
{
	#[inline]
	#[must_use]
	pub fn new() -> Self { Default::default() }
}

impl Storage for MemoryStorage
{
	fn keys(&self) -> Vec<String> { self.entries.keys().cloned().collect() }

	fn get_raw(&self, key: &str) -> Option<Vec<u8>>
	{
		self.entries.get(key).cloned()
	}

	fn set_raw(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError>
	{
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), StorageError>
	{
		self.entries.remove(key);
		Ok(())
	}
}

/// Storage backed by a single file, holding every entry as one
/// [`bincode`]-encoded map. The file is rewritten on every change.
#[derive(Clone, Debug)]
pub struct FileStorage
{
	/// The backing file.
	path: PathBuf,

	/// The entries, as last written.
	entries: BTreeMap<String, Vec<u8>>
}

impl FileStorage
{
	/// Open the store at the given path. A missing file is an empty store;
	/// the file is created on the first write.
	///
	/// # Arguments
	///
	/// * `path` - The backing file.
	///
	/// # Errors
	///
	/// * [`StorageError::Io`] if the file exists but cannot be read.
	/// * [`StorageError::Encoding`] if the file does not hold a store.
	pub fn open<T: AsRef<Path>>(path: T) -> Result<Self, StorageError>
	{
		let path = path.as_ref().to_path_buf();
		let entries = match File::open(&path)
		{
			Ok(file) =>
			{
				let mut reader = BufReader::new(file);
				let mut content = Vec::new();
				reader.read_to_end(&mut content)?;
				bincode::deserialize(&content).map_err(StorageError::Encoding)?
			},
			Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
			Err(e) => return Err(e.into())
		};
		debug!("opened storage: {} ({} keys)", path.display(), entries.len());
		Ok(Self { path, entries })
	}

	/// Answer the backing file.
	#[inline]
	#[must_use]
	pub fn path(&self) -> &Path { &self.path }

	fn flush(&self) -> Result<(), StorageError>
	{
		let content =
			bincode::serialize(&self.entries).map_err(StorageError::Encoding)?;
		let mut file = File::create(&self.path)?;
		file.write_all(&content)?;
		Ok(())
	}
}

impl Storage for FileStorage
{
	fn keys(&self) -> Vec<String> { self.entries.keys().cloned().collect() }

	fn get_raw(&self, key: &str) -> Option<Vec<u8>>
	{
		self.entries.get(key).cloned()
	}

	fn set_raw(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError>
	{
		self.entries.insert(key.to_string(), value);
		self.flush()
	}

	fn remove(&mut self, key: &str) -> Result<(), StorageError>
	{
		if self.entries.remove(key).is_some()
		{
			self.flush()?;
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of storage errors.
#[derive(Debug)]
pub enum StorageError
{
	/// The backing store could not be read or written.
	Io(io::Error),

	/// A value could not be encoded or decoded.
	Encoding(bincode::Error)
}

impl Display for StorageError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Io(e) => write!(f, "storage unavailable: {}", e),
			Self::Encoding(e) => write!(f, "malformed stored value: {}", e)
		}
	}
}

impl Error for StorageError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Io(e) => Some(e),
			Self::Encoding(e) => Some(e.as_ref())
		}
	}
}

impl From<io::Error> for StorageError
{
	fn from(e: io::Error) -> Self { Self::Io(e) }
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
