//! Prefix trie over command words, stored in a single growable node arena.
//!
//! Nodes never hold references to each other. Links are [`NodeId`]s, plain
//! indices into the arena, so growing the arena moves the nodes in memory
//! but never renumbers them. Every algorithm addresses nodes by index and
//! re-reads the arena after anything that may allocate.
//!
//! The root is not a node: it is the sibling chain starting at index 0,
//! present once the first string has been inserted.

mod complete;
mod insert;
mod lookup;
#[cfg(test)]
mod proptests;

pub use complete::Completion;

use crate::error::{Result, TrieError};
use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::io::{self, Write};

/// Identifier attached to the node that terminates a registered string.
pub type CommandId = u32;

/// Number of node slots reserved by [`Trie::new`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Longest supported word, terminator included.
pub const DEFAULT_MAX_WORD_LEN: usize = 256;

const NIL: u32 = u32::MAX;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// First node of the top-level sibling chain.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_raw(raw: u32) -> Option<NodeId> {
        (raw != NIL).then_some(NodeId(raw))
    }
}

/// One character position in some registered string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    ch: u8,
    command: u32,
    next_sibling: u32,
    first_child: u32,
}

impl Node {
    fn new(ch: u8) -> Self {
        Self {
            ch,
            command: NIL,
            next_sibling: NIL,
            first_child: NIL,
        }
    }

    pub fn ch(&self) -> u8 {
        self.ch
    }

    /// Command registered for the string ending here, if any.
    pub fn command(&self) -> Option<CommandId> {
        (self.command != NIL).then_some(self.command)
    }

    /// Next alternative character at the same depth.
    pub fn next_sibling(&self) -> Option<NodeId> {
        NodeId::from_raw(self.next_sibling)
    }

    /// First node of the level that continues through this one.
    pub fn first_child(&self) -> Option<NodeId> {
        NodeId::from_raw(self.first_child)
    }
}

/// Arena-backed prefix trie mapping printable ASCII words to [`CommandId`]s.
///
/// Built once, then queried, by a single owner. The interpreter shares it
/// through an `Rc`, which keeps it on one thread.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
    capacity: usize,
    max_word_len: usize,
    destroyed: bool,
}

impl Trie {
    /// Create an empty trie with the default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_WORD_LEN)
    }

    /// Create an empty trie reserving `initial_capacity` nodes and accepting
    /// words shorter than `max_word_len` bytes.
    ///
    /// Both limits are raised to the smallest usable value when zero (one
    /// node, and room for a one-byte word plus its terminator).
    pub fn with_limits(initial_capacity: usize, max_word_len: usize) -> Self {
        let capacity = initial_capacity.max(1);
        let mut nodes = Vec::new();
        reserve_or_abort(&mut nodes, capacity);
        Self {
            nodes,
            capacity,
            max_word_len: max_word_len.max(2),
            destroyed: false,
        }
    }

    /// Number of nodes in use.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of node slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Append an unlinked node for `ch` and return its index.
    ///
    /// Doubles the arena first when it is full. Aborts the process when
    /// memory runs out.
    pub(crate) fn allocate_node(&mut self, ch: u8) -> NodeId {
        debug_assert!(!self.destroyed, "allocating in a destroyed trie");
        debug_assert!(is_printable(ch));

        let index = self.nodes.len();
        if index >= self.capacity {
            let new_capacity = self.capacity.max(1) * 2;
            reserve_or_abort(&mut self.nodes, new_capacity);
            self.capacity = new_capacity;
        }
        let Ok(raw) = u32::try_from(index) else {
            handle_alloc_error(Layout::new::<Node>());
        };
        if raw == NIL {
            handle_alloc_error(Layout::new::<Node>());
        }

        self.nodes.push(Node::new(ch));
        NodeId(raw)
    }

    pub(crate) fn set_command(&mut self, id: NodeId, command: CommandId) -> Option<CommandId> {
        let node = &mut self.nodes[id.index()];
        let previous = node.command();
        node.command = command;
        previous
    }

    pub(crate) fn set_sibling(&mut self, id: NodeId, sibling: NodeId) {
        self.nodes[id.index()].next_sibling = sibling.0;
    }

    pub(crate) fn set_child(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id.index()].first_child = child.0;
    }

    /// Scan the sibling chain starting at `first` for `ch`.
    ///
    /// Returns `Ok` with the matching node, or `Err` with the last node of the
    /// chain when nothing matches.
    pub(crate) fn find_in_level(&self, first: NodeId, ch: u8) -> std::result::Result<NodeId, NodeId> {
        let mut current = first;
        loop {
            let node = &self.nodes[current.index()];
            if node.ch == ch {
                return Ok(current);
            }
            match node.next_sibling() {
                Some(next) => current = next,
                None => return Err(current),
            }
        }
    }

    /// Release the node storage.
    ///
    /// The trie is unusable afterwards; every operation, a second `destroy`
    /// included, reports [`TrieError::Destroyed`].
    pub fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(TrieError::Destroyed);
        }
        self.nodes = Vec::new();
        self.capacity = 0;
        self.destroyed = true;
        Ok(())
    }

    pub(crate) fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(TrieError::Destroyed)
        } else {
            Ok(())
        }
    }

    /// Write a table of every node's fields, for debugging.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.destroyed {
            return writeln!(out, "The trie has been destroyed.");
        }
        if self.nodes.is_empty() {
            return writeln!(out, "The trie is empty.");
        }

        writeln!(out, "Capacity: {}", self.capacity)?;
        writeln!(out, "Size    : {}", self.nodes.len())?;
        writeln!(out, "idx        | ch | cmd        | nextSibling | firstChild")?;
        for (i, node) in self.nodes.iter().enumerate() {
            writeln!(
                out,
                "{:>10} | {:>2} | {:>10} | {:>11} | {:>10}",
                i,
                node.ch as char,
                display_opt(node.command()),
                display_opt(node.next_sibling().map(NodeId::index)),
                display_opt(node.first_child().map(NodeId::index)),
            )?;
        }
        Ok(())
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.dump(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Grow `nodes` so it can hold `capacity` entries, aborting on failure.
fn reserve_or_abort(nodes: &mut Vec<Node>, capacity: usize) {
    let additional = capacity.saturating_sub(nodes.len());
    if nodes.try_reserve_exact(additional).is_err() {
        handle_alloc_error(Layout::array::<Node>(capacity).unwrap_or(Layout::new::<Node>()));
    }
}

/// Printable ASCII, space included.
pub fn is_printable(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_graphic()
}

/// Check that `text` is non-empty and printable.
pub(crate) fn validate_text(text: &[u8]) -> Result<()> {
    if text.is_empty() {
        return Err(TrieError::EmptyInput);
    }
    match text.iter().position(|&b| !is_printable(b)) {
        Some(position) => Err(TrieError::NonPrintable {
            position,
            byte: text[position],
        }),
        None => Ok(()),
    }
}

/// Split a null-terminated region into the text before the terminator.
pub(crate) fn terminated_text(buffer: &[u8]) -> Result<&[u8]> {
    if buffer.is_empty() {
        return Err(TrieError::ZeroCapacity);
    }
    let end = buffer
        .iter()
        .position(|&b| b == 0)
        .ok_or(TrieError::Unterminated)?;
    Ok(&buffer[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trie_is_empty() {
        let trie = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.capacity(), DEFAULT_INITIAL_CAPACITY);
        assert_eq!(trie.max_word_len(), DEFAULT_MAX_WORD_LEN);
    }

    #[test]
    fn test_allocate_node_is_unlinked() {
        let mut trie = Trie::new();
        let id = trie.allocate_node(b'a');
        assert_eq!(id, NodeId::ROOT);

        let node = trie.node(id).unwrap();
        assert_eq!(node.ch(), b'a');
        assert_eq!(node.command(), None);
        assert_eq!(node.next_sibling(), None);
        assert_eq!(node.first_child(), None);
    }

    #[test]
    fn test_growth_doubles_and_keeps_indices() {
        let mut trie = Trie::with_limits(2, DEFAULT_MAX_WORD_LEN);
        let ids: Vec<NodeId> = (0..5).map(|i| trie.allocate_node(b'a' + i)).collect();

        assert_eq!(trie.len(), 5);
        assert_eq!(trie.capacity(), 8);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(trie.node(*id).unwrap().ch(), b'a' + i as u8);
        }
    }

    #[test]
    fn test_zero_initial_capacity_still_allocates() {
        let mut trie = Trie::with_limits(0, 0);
        assert_eq!(trie.capacity(), 1);
        trie.allocate_node(b'x');
        trie.allocate_node(b'y');
        assert_eq!(trie.capacity(), 2);
    }

    #[test]
    fn test_destroy_twice_reports_error() {
        let mut trie = Trie::new();
        trie.insert(0, "exit").unwrap();

        assert!(trie.destroy().is_ok());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.capacity(), 0);
        assert!(matches!(trie.destroy(), Err(TrieError::Destroyed)));
    }

    #[test]
    fn test_operations_after_destroy_are_rejected() {
        let mut trie = Trie::new();
        trie.insert(0, "exit").unwrap();
        trie.destroy().unwrap();

        assert!(matches!(trie.insert(1, "help"), Err(TrieError::Destroyed)));
        assert!(matches!(trie.get("exit"), Err(TrieError::Destroyed)));
        let mut buf = *b"ex\0\0\0\0";
        assert!(matches!(trie.complete(&mut buf), Err(TrieError::Destroyed)));
    }

    #[test]
    fn test_dump_lists_every_node() {
        let mut trie = Trie::new();
        trie.insert(3, "ab").unwrap();
        trie.insert(4, "c").unwrap();

        let mut out = Vec::new();
        trie.dump(&mut out).unwrap();
        let s = String::from_utf8(out).unwrap();

        assert!(s.starts_with("Capacity: 16\nSize    : 3\n"));
        assert!(s.contains("         0 |  a |          - |           2 |          1\n"));
        assert!(s.contains("         1 |  b |          3 |           - |          -\n"));
        assert!(s.contains("         2 |  c |          4 |           - |          -\n"));
        assert_eq!(s, trie.to_string());
    }

    #[test]
    fn test_dump_empty_trie() {
        let mut out = Vec::new();
        Trie::new().dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "The trie is empty.\n");
    }

    #[test]
    fn test_terminated_text() {
        assert_eq!(terminated_text(b"abc\0zz").unwrap(), b"abc");
        assert!(matches!(terminated_text(b"abc"), Err(TrieError::Unterminated)));
        assert!(matches!(terminated_text(b""), Err(TrieError::ZeroCapacity)));
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text(b"hello world").is_ok());
        assert!(matches!(validate_text(b""), Err(TrieError::EmptyInput)));
        assert!(matches!(
            validate_text(b"he\tllo"),
            Err(TrieError::NonPrintable { position: 2, byte: b'\t' })
        ));
        assert!(matches!(
            validate_text(&[b'a', 0xc3]),
            Err(TrieError::NonPrintable { position: 1, .. })
        ));
    }
}
