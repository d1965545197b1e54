use super::{terminated_text, validate_text, NodeId, Trie};
use crate::error::{Result, TrieError};
use std::io::Write;

/// Outcome of completing a prefix in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Characters appended to the buffer.
    pub appended: usize,
    /// Every registered word below the point where extension stopped, in
    /// trie order. Empty when the completion was unambiguous.
    pub alternatives: Vec<String>,
}

impl Trie {
    /// Extend the null-terminated prefix in `buffer` as far as it is
    /// unambiguous, writing any remaining alternatives to `out`, one per line.
    ///
    /// Returns the number of characters appended. The buffer is always left
    /// null-terminated and never grows past `buffer.len() - 1` characters.
    pub fn autocomplete(&self, buffer: &mut [u8], out: &mut dyn Write) -> Result<usize> {
        let completion = self.complete(buffer)?;
        for word in &completion.alternatives {
            writeln!(out, "{}", word)?;
        }
        Ok(completion.appended)
    }

    /// Extend the null-terminated prefix in `buffer` in place.
    ///
    /// Extension follows single children and stops at the first level with
    /// more than one alternative, when the path ends, or when the buffer is
    /// full. A registered word on the way does not stop it. Whatever is left
    /// below the stopping point is collected into
    /// [`Completion::alternatives`]. A buffer that is already full is left
    /// alone and nothing is listed.
    pub fn complete(&self, buffer: &mut [u8]) -> Result<Completion> {
        self.ensure_alive()?;
        if self.is_empty() {
            return Err(TrieError::EmptyTrie);
        }
        let start = terminated_text(buffer)?.len();
        validate_text(&buffer[..start])?;

        let Some(typed) = self.walk(&buffer[..start]) else {
            return Ok(Completion::default());
        };
        let room = buffer.len() - 1;
        if start >= room {
            return Ok(Completion::default());
        }

        let mut len = start;
        let mut next = self.nodes[typed.index()].first_child();
        while let Some(id) = next {
            if len >= room {
                break;
            }
            let node = &self.nodes[id.index()];
            if node.next_sibling().is_some() {
                break;
            }
            buffer[len] = node.ch;
            len += 1;
            next = node.first_child();
        }
        buffer[len] = 0;

        let mut alternatives = Vec::new();
        if let Some(id) = next {
            let mut word = buffer[..len].to_vec();
            self.collect_words(id, &mut word, &mut alternatives);
        }

        Ok(Completion {
            appended: len - start,
            alternatives,
        })
    }

    /// Pre-order walk over the level starting at `first`: each node, then its
    /// children, then its next sibling. `word` holds the path above `first`.
    fn collect_words(&self, first: NodeId, word: &mut Vec<u8>, found: &mut Vec<String>) {
        if word.len() + 1 >= self.max_word_len {
            return;
        }
        let mut next = Some(first);
        while let Some(id) = next {
            let node = &self.nodes[id.index()];
            word.push(node.ch);
            if node.command().is_some() {
                found.push(word.iter().map(|&b| b as char).collect());
            }
            if let Some(child) = node.first_child() {
                self.collect_words(child, word, found);
            }
            word.pop();
            next = node.next_sibling();
        }
    }
}
