use super::{validate_text, CommandId, NodeId, Trie, NIL};
use crate::error::{Result, TrieError};

impl Trie {
    /// Register `text` under `command`.
    ///
    /// Returns the id previously registered for the same text, which is
    /// replaced (last write wins). On error nothing is modified.
    ///
    /// ```
    /// use trie_shell::trie::Trie;
    /// let mut trie = Trie::new();
    /// assert_eq!(trie.insert(0, "exit").unwrap(), None);
    /// assert_eq!(trie.insert(1, "exit").unwrap(), Some(0));
    /// assert_eq!(trie.get("exit").unwrap(), Some(1));
    /// ```
    pub fn insert(&mut self, command: CommandId, text: &str) -> Result<Option<CommandId>> {
        self.ensure_alive()?;
        if command == NIL {
            return Err(TrieError::ReservedCommandId);
        }
        let text = text.as_bytes();
        validate_text(text)?;
        if text.len() >= self.max_word_len {
            return Err(TrieError::TooLong {
                len: text.len(),
                max: self.max_word_len - 1,
            });
        }

        if self.is_empty() {
            let root = self.allocate_node(text[0]);
            let last = self.append_chain(root, &text[1..]);
            self.set_command(last, command);
            return Ok(None);
        }

        let mut level = NodeId::ROOT;
        let mut pos = 0;
        loop {
            match self.find_in_level(level, text[pos]) {
                Ok(found) => {
                    pos += 1;
                    if pos == text.len() {
                        return Ok(self.set_command(found, command));
                    }
                    match self.nodes[found.index()].first_child() {
                        Some(child) => level = child,
                        None => {
                            let last = self.append_chain(found, &text[pos..]);
                            self.set_command(last, command);
                            return Ok(None);
                        }
                    }
                }
                Err(last_sibling) => {
                    debug_assert!(self.nodes[last_sibling.index()].next_sibling().is_none());
                    let branch = self.allocate_node(text[pos]);
                    self.set_sibling(last_sibling, branch);
                    let last = self.append_chain(branch, &text[pos + 1..]);
                    self.set_command(last, command);
                    return Ok(None);
                }
            }
        }
    }

    /// Hang one node per byte of `rest` below `from`, each the first child
    /// of the previous, and return the deepest.
    fn append_chain(&mut self, from: NodeId, rest: &[u8]) -> NodeId {
        let mut parent = from;
        for &ch in rest {
            let child = self.allocate_node(ch);
            self.set_child(parent, child);
            parent = child;
        }
        parent
    }
}
