use crate::buffer::LineBuffer;
use crate::registry::Registry;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};
use std::rc::Rc;

/// Line-editor helper completing the command word from the registry's trie.
pub struct CommandHelper {
    registry: Rc<Registry>,
    buffer_len: usize,
}

impl CommandHelper {
    pub fn new(registry: Rc<Registry>, buffer_len: usize) -> Self {
        Self {
            registry,
            buffer_len,
        }
    }

    /// Candidates replacing `line[..pos]`.
    ///
    /// Ambiguous prefixes yield every alternative the trie lists, which the
    /// editor extends to their common prefix and shows on the first Tab. An
    /// unambiguous prefix yields the single extended word. Anything past the
    /// command word is not completed.
    fn candidates(&self, line: &str, pos: usize) -> Vec<Pair> {
        let prefix = &line[..pos];
        if prefix.is_empty() || prefix.contains(char::is_whitespace) {
            return Vec::new();
        }
        let Some(mut buf) = LineBuffer::from_text(prefix, self.buffer_len) else {
            return Vec::new();
        };

        let mut listing = Vec::new();
        let trie = self.registry.trie();
        let Ok(appended) = trie.autocomplete(buf.as_mut_bytes(), &mut listing) else {
            return Vec::new();
        };
        let alternatives: Vec<String> = String::from_utf8_lossy(&listing)
            .lines()
            .map(str::to_string)
            .collect();

        if alternatives.len() > 1 {
            alternatives.into_iter().map(pair).collect()
        } else if appended > 0 {
            vec![pair(buf.text().into_owned())]
        } else {
            Vec::new()
        }
    }
}

fn pair(word: String) -> Pair {
    Pair {
        display: word.clone(),
        replacement: word,
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(line, pos)))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
