//! # Scrambled
//!
//! Scrambled is a daily word-placement puzzle. Every day, the player receives
//! the same 20 letters as everyone else, and must arrange all of them on a 6×6
//! grid so that every horizontal and vertical run of two or more letters is a
//! dictionary word, and so that the letters form a single connected island.
//! The day's letters are drawn from a solution laid out by a deterministic
//! generator, so a solution is always known to exist.
//!
//! The library holds the engine: the board and its cursor, the validator, the
//! connectivity check, scoring, the generator, and the persistence of a day's
//! session. The `scrambled` binary drives the engine from a text-based user
//! interface (TUI).

pub mod board;
pub mod calendar;
pub mod dictionary;
pub mod game;
pub mod generator;
pub mod island;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod validator;
