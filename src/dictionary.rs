//! # Dictionary
//!
//! Herein is support for dictionary construction and manipulation. Every
//! validity check performed against the board, and every candidate word
//! considered by the puzzle generator, comes from a [`Dictionary`]: a prefix
//! tree of lowercase words, accompanied by the sorted word list so that words
//! can be enumerated.

use std::{
	fs::File,
	io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write},
	path::Path
};

use log::{trace, warn};
use pfx::PrefixTreeSet;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A dictionary is a [`PrefixTreeSet`] of lowercase words, plus the same words
/// in sorted order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Dictionary
{
	/// The words, for membership tests.
	tree: PrefixTreeSet<String>,

	/// The words, sorted and deduplicated, for enumeration.
	words: Vec<String>
}

impl Dictionary
{
	/// Construct an empty dictionary. Same as [`Default::default`].
	///
	/// # Returns
	///
	/// An empty dictionary.
	#[inline]
	pub fn new() -> Self { Default::default() }

	/// Check if the dictionary is empty.
	///
	/// # Returns
	///
	/// `true` if the dictionary is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words.is_empty() }

	/// Answer the number of words in the dictionary.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.words.len() }

	/// Check if the dictionary contains the given word. The check is
	/// case-insensitive, since board letters are uppercase but the dictionary
	/// is stored in lowercase.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains the word, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		if word.bytes().any(|b| b.is_ascii_uppercase())
		{
			self.tree.contains(word.to_ascii_lowercase().as_str())
		}
		else
		{
			self.tree.contains(word)
		}
	}

	/// Get an iterator over the words of the dictionary, in sorted order.
	///
	/// # Returns
	///
	/// An iterator over the lowercase words.
	#[inline]
	pub fn words(&self) -> impl Iterator<Item = &str> + '_
	{
		self.words.iter().map(String::as_str)
	}

	/// Populate the dictionary with the given words. Words are lowercased;
	/// blank entries and entries containing anything other than ASCII letters
	/// are skipped.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T])
	{
		for word in words
		{
			let word = word.as_ref().trim();
			if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphabetic())
			{
				continue
			}
			let word = word.to_ascii_lowercase();
			self.tree.insert(word.clone());
			self.words.push(word);
		}
		self.words.sort_unstable();
		self.words.dedup();
	}

	/// Open the dictionary called `name` in `dir`. The word list lives in
	/// `<name>.txt`, one word per line; a bincode cache of the parsed
	/// dictionary lives beside it in `<name>.dict`. The cache is used when it
	/// is newer than the word list, and rebuilt from the word list otherwise.
	/// Failure to rebuild the cache is logged but not fatal.
	///
	/// # Arguments
	///
	/// * `dir` - The directory holding both files.
	/// * `name` - The shared stem of the file names.
	///
	/// # Errors
	///
	/// * Any I/O error from reading whichever file is chosen.
	/// * [`ErrorKind::InvalidData`] if the cache is chosen but undecodable.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let cache = dir.as_ref().join(format!("{}.dict", name));
		let list = dir.as_ref().join(format!("{}.txt", name));
		if is_newer(&cache, &list)
		{
			trace!("Reading cached dictionary: {}", cache.display());
			return Self::deserialize_from_file(&cache)
		}
		let dictionary = Self::read_from_file(&list)?;
		trace!("Read {} words from {}", dictionary.len(), list.display());
		if let Err(e) = dictionary.serialize_to_file(&cache)
		{
			warn!("Cannot cache dictionary at {}: {}", cache.display(), e);
		}
		Ok(dictionary)
	}

	/// Read a word list, one word per line.
	///
	/// # Errors
	///
	/// Any I/O error from opening or reading the file, including invalid
	/// UTF-8.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		BufReader::new(File::open(path)?)
			.lines()
			.collect::<Result<Self, _>>()
	}

	/// Decode a dictionary previously written by
	/// [`serialize_to_file`](Self::serialize_to_file).
	///
	/// # Errors
	///
	/// * Any I/O error from opening the file.
	/// * [`ErrorKind::InvalidData`] if the content is not a bincode-encoded
	///   dictionary.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let reader = BufReader::new(File::open(path)?);
		bincode::deserialize_from(reader)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
	}

	/// Encode the dictionary to the given file with bincode, replacing any
	/// previous content.
	///
	/// # Errors
	///
	/// Any I/O or encoding error. Encoding errors surface as
	/// [`ErrorKind::InvalidData`].
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let mut writer = BufWriter::new(File::create(path)?);
		bincode::serialize_into(&mut writer, self)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		writer.flush()
	}
}

/// Check whether `path` was modified after `other`. Anything that prevents
/// the comparison counts as `false`.
fn is_newer(path: &Path, other: &Path) -> bool
{
	let modified = |p: &Path| p.metadata().and_then(|m| m.modified());
	match (modified(path), modified(other))
	{
		(Ok(mine), Ok(theirs)) => mine > theirs,
		_ => false
	}
}

impl<T: AsRef<str>> FromIterator<T> for Dictionary
{
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self
	{
		let words = iter.into_iter().collect::<Vec<_>>();
		let mut dictionary = Self::new();
		dictionary.populate(&words);
		dictionary
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::dictionary::Dictionary;
	use tempfile::{NamedTempFile, TempDir};

	/// The path to the dictionary file.
	#[inline]
	#[must_use]
	const fn test_path() -> &'static str { "dict/english.txt" }

	/// Test basic functionality of [`Dictionary`]:
	///
	/// * [`Dictionary::new`]
	/// * [`Dictionary::is_empty`]
	/// * [`Dictionary::populate`]
	/// * [`Dictionary::contains`]
	#[test]
	fn test_populate()
	{
		let mut dictionary = Dictionary::new();
		assert!(dictionary.is_empty());
		assert!(!dictionary.contains("hello"));
		assert!(!dictionary.contains("world"));
		dictionary.populate(&["hello", "World", "", "it's", "hello"]);
		assert_eq!(dictionary.len(), 2);
		assert!(dictionary.contains("hello"));
		assert!(dictionary.contains("world"));
		assert!(dictionary.contains("HELLO"));
		assert!(!dictionary.contains("it's"));
		assert_eq!(dictionary.words().collect::<Vec<_>>(), ["hello", "world"]);
	}

	/// Test that unsorted input, spread over several calls, still yields a
	/// sorted word list without duplicates.
	///
	/// * [`Dictionary::populate`]
	/// * [`Dictionary::words`]
	#[test]
	fn test_populate_unsorted()
	{
		let mut dictionary = Dictionary::new();
		dictionary.populate(&["pear", "apple", "Fig", "apple", "banana"]);
		dictionary.populate(&["fig", "cherry", "PEAR", "date"]);
		assert_eq!(dictionary.len(), 6);
		assert_eq!(
			dictionary.words().collect::<Vec<_>>(),
			["apple", "banana", "cherry", "date", "fig", "pear"]
		);
		assert!(dictionary.contains("Cherry"));
		let reversed = Dictionary::from_iter(["zebra", "yak", "yak", "ant"]);
		assert_eq!(reversed.words().collect::<Vec<_>>(), ["ant", "yak", "zebra"]);
	}

	/// Test reading a dictionary from a file:
	///
	/// * [`Dictionary::read_from_file`]
	#[test]
	fn test_read_from_file()
	{
		let dictionary = Dictionary::read_from_file(test_path()).unwrap();
		assert!(!dictionary.is_empty());
		assert!(dictionary.contains("hello"));
		assert!(dictionary.contains("world"));
		assert!(dictionary.contains("CAT"));
		let words = dictionary.words().collect::<Vec<_>>();
		assert!(words.windows(2).all(|pair| pair[0] < pair[1]));
	}

	/// Test serializing and deserializing a dictionary:
	///
	/// * [`Dictionary::serialize_to_file`]
	/// * [`Dictionary::deserialize_from_file`]
	#[test]
	fn test_serialize_to_file()
	{
		let dictionary = Dictionary::read_from_file(test_path()).unwrap();
		let file = NamedTempFile::new().unwrap();
		dictionary.serialize_to_file(file.path()).unwrap();
		let deserialized =
			Dictionary::deserialize_from_file(file.path()).unwrap();
		assert_eq!(dictionary, deserialized);
	}

	/// Test that opening a dictionary writes the binary cache beside the text
	/// file, and that the cache is preferred thereafter.
	///
	/// * [`Dictionary::open`]
	#[test]
	fn test_open_writes_binary()
	{
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("tiny.txt"), "cat\ndog\n").unwrap();
		let dictionary = Dictionary::open(dir.path(), "tiny").unwrap();
		assert!(dictionary.contains("cat"));
		assert!(dir.path().join("tiny.dict").exists());
		let reopened = Dictionary::open(dir.path(), "tiny").unwrap();
		assert_eq!(dictionary, reopened);
	}

	/// Test that a missing dictionary is reported rather than fabricated.
	#[test]
	fn test_open_missing()
	{
		let dir = TempDir::new().unwrap();
		assert!(Dictionary::open(dir.path(), "missing").is_err());
	}
}
