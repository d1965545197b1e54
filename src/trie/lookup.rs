use super::{terminated_text, validate_text, CommandId, NodeId, Trie};
use crate::error::Result;

impl Trie {
    /// Resolve the null-terminated text in `buffer` to its command.
    ///
    /// `Ok(None)` means no command is registered for the text, including the
    /// case where the text is only a proper prefix of registered words. An
    /// empty trie resolves nothing.
    pub fn lookup(&self, buffer: &[u8]) -> Result<Option<CommandId>> {
        self.ensure_alive()?;
        let text = terminated_text(buffer)?;
        validate_text(text)?;
        Ok(self.resolve(text))
    }

    /// Like [`lookup`](Self::lookup) for text that is already delimited.
    pub fn get(&self, text: &str) -> Result<Option<CommandId>> {
        self.ensure_alive()?;
        validate_text(text.as_bytes())?;
        Ok(self.resolve(text.as_bytes()))
    }

    fn resolve(&self, text: &[u8]) -> Option<CommandId> {
        self.walk(text)
            .and_then(|id| self.nodes[id.index()].command())
    }

    /// Follow `text` down from the root and return the node matching its last
    /// byte.
    pub(crate) fn walk(&self, text: &[u8]) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }
        let (last, init) = text.split_last()?;
        let mut level = NodeId::ROOT;
        for &ch in init {
            let found = self.find_in_level(level, ch).ok()?;
            level = self.nodes[found.index()].first_child()?;
        }
        self.find_in_level(level, *last).ok()
    }
}
