use anyhow::{bail, Result};
use argh::FromArgs;

use crate::trie::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_WORD_LEN};

/// Input line buffer size, terminator included.
pub const DEFAULT_BUFFER_LEN: usize = 64;

/// Lines kept for Up-arrow recall.
pub const DEFAULT_HISTORY_SIZE: usize = 1;

pub const DEFAULT_PROMPT: &str = "--> ";

/// Tunables for the shell and its command trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Capacity of the line buffer completion works in, terminator included.
    pub buffer_len: usize,
    /// Longest command word plus terminator; also caps completion listing depth.
    pub max_word_len: usize,
    /// Trie nodes reserved up front; the arena doubles from there.
    pub initial_capacity: usize,
    pub history_size: usize,
    pub prompt: String,
    /// Print the help text before the first prompt.
    pub greeting: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            buffer_len: DEFAULT_BUFFER_LEN,
            max_word_len: DEFAULT_MAX_WORD_LEN,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            history_size: DEFAULT_HISTORY_SIZE,
            prompt: DEFAULT_PROMPT.to_string(),
            greeting: true,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<()> {
        if self.buffer_len < 2 {
            bail!("buffer length must be at least 2, got {}", self.buffer_len);
        }
        if self.max_word_len < 2 {
            bail!("maximum word length must be at least 2, got {}", self.max_word_len);
        }
        if self.initial_capacity == 0 {
            bail!("initial trie capacity must be positive");
        }
        Ok(())
    }
}

#[derive(FromArgs, Debug)]
/// Interactive command shell with trie-based tab completion.
pub struct CliArgs {
    #[argh(option)]
    /// size of the input line buffer, terminator included (default 64).
    pub buffer_len: Option<usize>,

    #[argh(option)]
    /// longest accepted command word plus terminator (default 256).
    pub max_word_len: Option<usize>,

    #[argh(option)]
    /// trie nodes to reserve before the first growth (default 16).
    pub initial_capacity: Option<usize>,

    #[argh(option)]
    /// number of lines kept for recall with the Up key (default 1).
    pub history_size: Option<usize>,

    #[argh(option)]
    /// prompt printed before each line.
    pub prompt: Option<String>,

    #[argh(switch, short = 'q')]
    /// do not print the help text at startup.
    pub quiet: bool,
}

impl CliArgs {
    /// Overlay the given options on the defaults.
    pub fn into_config(self) -> ShellConfig {
        let defaults = ShellConfig::default();
        ShellConfig {
            buffer_len: self.buffer_len.unwrap_or(defaults.buffer_len),
            max_word_len: self.max_word_len.unwrap_or(defaults.max_word_len),
            initial_capacity: self.initial_capacity.unwrap_or(defaults.initial_capacity),
            history_size: self.history_size.unwrap_or(defaults.history_size),
            prompt: self.prompt.unwrap_or(defaults.prompt),
            greeting: !self.quiet,
        }
    }
}
