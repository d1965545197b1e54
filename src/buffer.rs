use crate::trie::is_printable;
use std::borrow::Cow;

/// Fixed-capacity, null-terminated line of user input.
///
/// The whole region is `capacity` bytes; the text ends at the first null byte,
/// so at most `capacity - 1` characters fit. This is the region that
/// [`Trie::lookup`](crate::trie::Trie::lookup) and
/// [`Trie::autocomplete`](crate::trie::Trie::autocomplete) read and extend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Box<[u8]>,
}

impl LineBuffer {
    /// Create an empty buffer. A zero capacity is raised to one byte, the
    /// terminator alone.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(1)].into_boxed_slice(),
        }
    }

    /// Create a buffer holding `text`, or `None` if it does not fit or is not
    /// printable ASCII.
    pub fn from_text(text: &str, capacity: usize) -> Option<Self> {
        let mut buf = Self::with_capacity(capacity);
        for &b in text.as_bytes() {
            if !buf.push(b) {
                return None;
            }
        }
        Some(buf)
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Characters before the terminator.
    pub fn len(&self) -> usize {
        self.bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.bytes[0] == 0
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes[..self.len()])
    }

    /// The whole region, terminator and trailing bytes included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Append a printable byte. Returns `false` when it is not printable or
    /// there is no room left before the terminator.
    pub fn push(&mut self, byte: u8) -> bool {
        let len = self.len();
        if !is_printable(byte) || len + 1 >= self.bytes.len() {
            return false;
        }
        self.bytes[len] = byte;
        self.bytes[len + 1] = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::LineBuffer;

    #[test]
    fn test_push_stops_before_terminator() {
        let mut buf = LineBuffer::with_capacity(4);
        assert!(buf.push(b'a'));
        assert!(buf.push(b'b'));
        assert!(buf.push(b'c'));
        assert!(!buf.push(b'd'));

        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.as_bytes(), b"abc\0");
    }

    #[test]
    fn test_push_rejects_control_bytes() {
        let mut buf = LineBuffer::with_capacity(8);
        assert!(!buf.push(b'\t'));
        assert!(!buf.push(0));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_that_does_not_fit() {
        assert!(LineBuffer::from_text("hello", 5).is_none());
        assert!(LineBuffer::from_text("hell", 5).is_some());
        assert!(LineBuffer::from_text("h\u{e9}", 8).is_none());
    }

    #[test]
    fn test_zero_capacity_holds_only_terminator() {
        let mut buf = LineBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        assert!(!buf.push(b'x'));
        assert_eq!(buf.as_bytes(), b"\0");
    }
}
