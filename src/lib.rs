//! A small interactive shell whose command words live in a prefix trie.
//!
//! The [`trie`] module is the core: an arena of nodes linked by index that
//! supports registering words, resolving a typed line to a command id, and
//! extending a typed prefix as far as it is unambiguous. The rest of the crate
//! wires it to a fixed table of built-in commands and a line editor.
//!
//! The main entry point is [`Interpreter`], which dispatches lines to commands
//! resolved through the trie and runs the interactive loop.

pub mod buffer;
mod builtin;
pub mod command;
mod completion;
pub mod config;
pub mod env;
pub mod error;
mod interpreter;
pub mod registry;
pub mod trie;

/// Just a convenient re-export of the interactive shell.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
