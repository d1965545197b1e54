use super::*;
use crate::buffer::LineBuffer;

use proptest::prelude::*;
use std::collections::HashMap;

/// Walk every reachable node once and check the links stay inside the arena.
fn validate_links(t: &Trie) {
    let mut seen = vec![false; t.len()];
    let mut stack = Vec::new();
    if !t.is_empty() {
        stack.push(NodeId::ROOT);
    }
    while let Some(id) = stack.pop() {
        assert!(id.index() < t.len(), "link {} outside arena", id.index());
        assert!(!seen[id.index()], "node {} reachable twice", id.index());
        seen[id.index()] = true;

        let node = t.node(id).unwrap();
        assert!(is_printable(node.ch()));
        stack.extend(node.next_sibling());
        stack.extend(node.first_child());
    }
    assert!(seen.iter().all(|&s| s), "unreachable node in arena");
}

fn word() -> impl Strategy<Value = String> {
    "[a-e ]{1,12}"
}

proptest! {
    #[test]
    fn prop_lookup_returns_last_inserted_id(
        entries in prop::collection::vec((0u32..1000, word()), 1..40)
    ) {
        let mut trie = Trie::with_limits(1, DEFAULT_MAX_WORD_LEN);
        let mut model = HashMap::new();
        for (id, text) in &entries {
            let previous = trie.insert(*id, text).unwrap();
            prop_assert_eq!(previous, model.insert(text.clone(), *id));
        }

        validate_links(&trie);
        for (text, id) in &model {
            let buf = LineBuffer::from_text(text, 64).unwrap();
            prop_assert_eq!(trie.lookup(buf.as_bytes()).unwrap(), Some(*id));
        }
        prop_assert!(trie.len() <= entries.iter().map(|(_, t)| t.len()).sum::<usize>());
    }

    #[test]
    fn prop_completion_stays_in_bounds(
        words in prop::collection::vec(word(), 1..20),
        prefix in "[a-e]{1,4}",
        capacity in 2usize..16,
    ) {
        let mut trie = Trie::new();
        for (id, text) in words.iter().enumerate() {
            trie.insert(id as u32, text).unwrap();
        }
        let Some(mut buf) = LineBuffer::from_text(&prefix, capacity) else {
            return Ok(());
        };
        let before = buf.len();

        let completion = trie.complete(buf.as_mut_bytes()).unwrap();

        prop_assert!(buf.len() < capacity);
        prop_assert_eq!(buf.len(), before + completion.appended);
        prop_assert!(buf.text().starts_with(prefix.as_str()));
        for alt in &completion.alternatives {
            prop_assert!(alt.starts_with(&*buf.text()));
            prop_assert!(words.contains(alt));
        }
        if completion.appended > 0 || !completion.alternatives.is_empty() {
            prop_assert!(words.iter().any(|w| w.starts_with(&*buf.text())));
        }
    }
}
