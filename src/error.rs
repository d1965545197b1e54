use std::fmt;
use std::io;

/// Failures reported by [`Trie`](crate::trie::Trie) operations.
///
/// A query that simply has no match is not an error: lookups report it as
/// `Ok(None)`.
#[derive(Debug)]
pub enum TrieError {
    /// The trie has already been torn down with [`destroy`](crate::trie::Trie::destroy).
    Destroyed,
    /// The operation needs at least one registered command.
    EmptyTrie,
    /// The text or buffer holds no characters.
    EmptyInput,
    /// A byte outside the printable ASCII range was found.
    NonPrintable { position: usize, byte: u8 },
    /// The buffer has no null terminator within its capacity.
    Unterminated,
    /// The buffer has no room at all, not even for a terminator.
    ZeroCapacity,
    /// The text does not fit in the maximum word length.
    TooLong { len: usize, max: usize },
    /// The command id collides with the "no command" sentinel.
    ReservedCommandId,
    /// Writing the completion listing failed.
    Io(io::Error),
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieError::Destroyed => write!(f, "the trie has already been destroyed"),
            TrieError::EmptyTrie => write!(f, "the trie is empty"),
            TrieError::EmptyInput => write!(f, "empty input"),
            TrieError::NonPrintable { position, byte } => {
                write!(f, "non-printable byte {:#04x} at position {}", byte, position)
            }
            TrieError::Unterminated => write!(f, "the buffer is not null-terminated"),
            TrieError::ZeroCapacity => write!(f, "the buffer has zero capacity"),
            TrieError::TooLong { len, max } => {
                write!(f, "text of length {} exceeds the maximum of {}", len, max)
            }
            TrieError::ReservedCommandId => write!(f, "command id is reserved"),
            TrieError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for TrieError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrieError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TrieError {
    fn from(e: io::Error) -> Self {
        TrieError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, TrieError>;
