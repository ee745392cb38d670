//! Library half of the `vodsearch` binary.
//!
//! Holds the argument definitions, command implementations and terminal output so they can
//! be unit tested; `main.rs` only parses arguments and dispatches.

#![warn(missing_docs)]

pub mod cli;
