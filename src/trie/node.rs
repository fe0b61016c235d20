use super::entry::IndexEntry;
use crate::compute::geohash::ALPHABET;

pub(crate) const FANOUT: usize = ALPHABET.len();

/// One trie node. Children are owned, so dropping a slot frees the whole
/// subtree below it.
#[derive(Debug)]
pub(crate) struct TrieNode {
    pub(crate) children: [Option<Box<TrieNode>>; FANOUT],
    /// Distinct codes whose path runs through this node. Unused on the root.
    pub(crate) pass_count: usize,
    /// Present iff a code ends here.
    pub(crate) entry: Option<IndexEntry>,
}

impl TrieNode {
    pub(crate) fn is_terminal(&self) -> bool {
        self.entry.is_some()
    }

    pub(crate) fn child(&self, index: u8) -> Option<&TrieNode> {
        self.children[usize::from(index)].as_deref()
    }

    pub(crate) fn child_mut(&mut self, index: u8) -> Option<&mut TrieNode> {
        self.children[usize::from(index)].as_deref_mut()
    }

    /// Occupied children in ascending alphabet order.
    pub(crate) fn occupied(&self) -> impl DoubleEndedIterator<Item = &TrieNode> {
        self.children.iter().filter_map(|slot| slot.as_deref())
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self {
            children: [const { None }; FANOUT],
            pass_count: 0,
            entry: None,
        }
    }
}
