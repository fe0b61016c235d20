//! Reference-counted prefix trie over geohash codes.
//!
//! Every inserted code spells a root-to-leaf path of
//! [`CODE_LENGTH`](crate::CODE_LENGTH) nodes.
//! Each node counts how many distinct codes run through it; deleting a code
//! decrements those counts from the root down and unlinks the first node that
//! reaches zero, which drops the rest of that code's path with it.
//!
//! ```text
//! root
//! ├─ '9' (2)
//! │  └─ 'Q' (2)
//! │     ├─ '8' (1) ─ ... ─ 'Y' (1) [9Q8YYK8Y: 1 point]
//! │     └─ '9' (1) ─ ... ─ '2' (1) [9Q9P3V72: 3 points]
//! └─ 'D' (1) ─ ... ─ 'W' (1)       [DR5REGW0: 1 point]
//! ```
//!
//! [`PrefixTrie`] does no locking of its own. [`crate::GeoIndex`] wraps it in a
//! reader/writer lock for shared use.

mod entry;
mod node;

pub use entry::IndexEntry;

use crate::compute::geohash;
use crate::config::IndexStats;
use crate::error::{GeoTrieError, Result};
use geo::Point;
use node::TrieNode;

/// Single-threaded geohash prefix trie.
///
/// # Examples
///
/// ```rust
/// use geotrie::{Point, PrefixTrie};
///
/// let mut trie = PrefixTrie::new();
/// let code = trie.insert(Point::new(-122.4194, 37.7749))?;
///
/// assert_eq!(trie.lookup(&code)?.len(), 1);
/// assert_eq!(trie.prefix_search("9Q")?.len(), 1);
///
/// trie.delete(&code)?;
/// assert!(trie.is_empty());
/// # Ok::<(), geotrie::GeoTrieError>(())
/// ```
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    codes: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct codes currently stored.
    pub fn len(&self) -> usize {
        self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes == 0
    }

    /// Encode `point` and store it, returning its code.
    ///
    /// A point whose code is already present is appended to the existing
    /// entry; pass counts only change the first time a code is stored.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::OutOfRange`] if the point has invalid coordinates. The
    /// trie is left untouched.
    pub fn insert(&mut self, point: Point) -> Result<String> {
        let code = geohash::encode(&point)?;
        self.insert_encoded(code, point)
    }

    /// Store `point` under a code the caller already computed with
    /// [`geohash::encode`].
    pub(crate) fn insert_encoded(&mut self, code: String, point: Point) -> Result<String> {
        let path = geohash::decode_path(&code)?;

        if let Some(entry) = self.node_mut(&path).and_then(|node| node.entry.as_mut()) {
            entry.push(point);
            return Ok(code);
        }

        let mut node = &mut self.root;
        for &index in &path {
            let child: &mut TrieNode =
                node.children[usize::from(index)].get_or_insert_with(Box::default);
            child.pass_count += 1;
            node = child;
        }
        node.entry = Some(IndexEntry::new(code.clone(), point));
        self.codes += 1;

        log::trace!("stored new code {}", code);
        Ok(code)
    }

    /// Points stored under exactly `code`, oldest first.
    ///
    /// A well-formed code that is not stored yields an empty slice, as does a
    /// prefix that only names an interior node.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidHash`] if `code` contains a symbol outside the
    /// alphabet.
    pub fn lookup(&self, code: &str) -> Result<&[Point]> {
        let path = geohash::decode_path(code)?;
        Ok(self
            .node(&path)
            .and_then(|node| node.entry.as_ref())
            .map(IndexEntry::points)
            .unwrap_or_default())
    }

    /// Remove `code` and every point stored under it.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidHash`] if `code` is malformed or has no live
    /// entry. Nothing is modified in that case.
    pub fn delete(&mut self, code: &str) -> Result<()> {
        let path = geohash::decode_path(code)?;
        if !self.node(&path).is_some_and(TrieNode::is_terminal) {
            return Err(GeoTrieError::InvalidHash(code.to_string()));
        }

        let mut node = &mut self.root;
        for (depth, &index) in path.iter().enumerate() {
            let remaining = match node.child_mut(index) {
                Some(child) => {
                    child.pass_count -= 1;
                    child.pass_count
                }
                None => return Err(GeoTrieError::InvalidHash(code.to_string())),
            };

            if remaining == 0 {
                // only this code ran through here, so the rest of its path
                // goes with the slot
                node.children[usize::from(index)] = None;
                self.codes -= 1;
                log::trace!("deleted code {} (pruned at depth {})", code, depth + 1);
                return Ok(());
            }

            node = match node.child_mut(index) {
                Some(child) => child,
                None => return Err(GeoTrieError::InvalidHash(code.to_string())),
            };
        }

        // the final node is still shared; only the entry goes
        node.entry = None;
        self.codes -= 1;
        log::trace!("deleted code {} (shared path kept)", code);
        Ok(())
    }

    /// All entries whose code starts with `prefix`.
    ///
    /// Results come from a pre-order walk of the matching subtree: a node's
    /// own entry first, then its children in alphabet order. The empty prefix
    /// returns every entry. An unknown but well-formed prefix returns nothing.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidHash`] if `prefix` contains a symbol outside the
    /// alphabet.
    pub fn prefix_search(&self, prefix: &str) -> Result<Vec<&IndexEntry>> {
        let path = geohash::decode_path(prefix)?;
        let mut entries = Vec::new();
        if let Some(start) = self.node(&path) {
            collect_entries(start, &mut entries);
        }
        Ok(entries)
    }

    /// Drop every code.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.codes = 0;
    }

    /// Count codes, points and nodes by walking the whole trie.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        let mut stack: Vec<&TrieNode> = self.root.occupied().collect();
        while let Some(node) = stack.pop() {
            stats.nodes += 1;
            if let Some(entry) = &node.entry {
                stats.codes += 1;
                stats.points += entry.point_count();
            }
            stack.extend(node.occupied());
        }
        stats
    }

    fn node(&self, path: &[u8]) -> Option<&TrieNode> {
        path.iter()
            .try_fold(&self.root, |node, &index| node.child(index))
    }

    fn node_mut(&mut self, path: &[u8]) -> Option<&mut TrieNode> {
        let mut node = &mut self.root;
        for &index in path {
            node = node.child_mut(index)?;
        }
        Some(node)
    }
}

/// Pre-order collection with an explicit stack; children are pushed in
/// reverse so they pop in ascending order.
fn collect_entries<'a>(start: &'a TrieNode, out: &mut Vec<&'a IndexEntry>) {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if let Some(entry) = &node.entry {
            out.push(entry);
        }
        stack.extend(node.occupied().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::geohash::CODE_LENGTH;

    /// Checks the structural rules on every node: counts match the number of
    /// codes below, no zero-count node is linked, the root has no entry.
    fn assert_consistent(trie: &PrefixTrie) {
        fn codes_below(node: &TrieNode, depth: usize) -> usize {
            let own = usize::from(node.is_terminal());
            if let Some(entry) = &node.entry {
                assert!(entry.point_count() > 0);
                assert_eq!(entry.code().len(), depth);
            }
            let below: usize = node.occupied().map(|c| codes_below(c, depth + 1)).sum();
            for child in node.occupied() {
                assert!(child.pass_count > 0, "zero-count node left linked");
            }
            let total = own + below;
            if depth > 0 {
                assert_eq!(node.pass_count, total);
            }
            total
        }

        assert!(trie.root.entry.is_none());
        assert_eq!(codes_below(&trie.root, 0), trie.len());
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut trie = PrefixTrie::new();
        let sf = p(-122.4194, 37.7749);
        let code = trie.insert(sf).unwrap();

        assert_eq!(code, "9Q8YYK8Y");
        assert_eq!(trie.lookup(&code).unwrap(), &[sf]);
        assert_eq!(trie.len(), 1);
        assert_consistent(&trie);
    }

    #[test]
    fn test_collisions_accumulate_in_order() {
        let mut trie = PrefixTrie::new();
        let a = p(-122.4194, 37.7749);
        let b = p(-122.41940001, 37.77490001);
        let c = p(-122.4194, 37.7749);

        let code = trie.insert(a).unwrap();
        assert_eq!(trie.insert(b).unwrap(), code);
        assert_eq!(trie.insert(c).unwrap(), code);

        assert_eq!(trie.lookup(&code).unwrap(), &[a, b, c]);
        assert_eq!(trie.len(), 1);
        let stats = trie.stats();
        assert_eq!(stats.points, 3);
        assert_eq!(stats.nodes, CODE_LENGTH);
        assert_consistent(&trie);
    }

    #[test]
    fn test_duplicate_insert_keeps_pass_counts() {
        let mut trie = PrefixTrie::new();
        let code = trie.insert(p(10.0, 10.0)).unwrap();
        trie.insert(p(10.0, 10.0)).unwrap();

        let first = trie.root.child(geohash::decode_path(&code).unwrap()[0]).unwrap();
        assert_eq!(first.pass_count, 1);
    }

    #[test]
    fn test_lookup_missing_and_partial() {
        let mut trie = PrefixTrie::new();
        let code = trie.insert(p(-122.4194, 37.7749)).unwrap();

        assert!(trie.lookup("DR5REGW0").unwrap().is_empty());
        assert!(trie.lookup(&code[..4]).unwrap().is_empty());
        assert!(trie.lookup("").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_invalid_symbol() {
        let trie = PrefixTrie::new();
        assert_eq!(
            trie.lookup("9Q8YYKAY"),
            Err(GeoTrieError::InvalidHash("9Q8YYKAY".into()))
        );
    }

    #[test]
    fn test_delete_only_code_prunes_everything() {
        let mut trie = PrefixTrie::new();
        let code = trie.insert(p(-122.4194, 37.7749)).unwrap();
        trie.delete(&code).unwrap();

        assert!(trie.is_empty());
        assert!(trie.root.occupied().next().is_none());
        assert!(trie.lookup(&code).unwrap().is_empty());
        for len in 0..=CODE_LENGTH {
            assert!(trie.prefix_search(&code[..len]).unwrap().is_empty());
        }
        assert_eq!(trie.stats(), IndexStats::default());
    }

    #[test]
    fn test_delete_keeps_sibling_with_shared_prefix() {
        let mut trie = PrefixTrie::new();
        // neighbouring cells: same first seven symbols
        let a = trie.insert(p(-122.4194, 37.7749)).unwrap();
        let b_point = p(-122.4194 + 0.0004, 37.7749);
        let b = trie.insert(b_point).unwrap();
        assert_ne!(a, b);
        let shared = common_prefix(&a, &b);
        assert!(!shared.is_empty());

        trie.delete(&a).unwrap();

        assert!(trie.lookup(&a).unwrap().is_empty());
        assert_eq!(trie.lookup(&b).unwrap(), &[b_point]);
        let under = trie.prefix_search(shared).unwrap();
        assert_eq!(under.len(), 1);
        assert_eq!(under[0].code(), b);
        assert_consistent(&trie);
    }

    #[test]
    fn test_delete_prunes_at_divergence() {
        let mut trie = PrefixTrie::new();
        let a = trie.insert(p(-122.4194, 37.7749)).unwrap();
        let b = trie.insert(p(-122.2711, 37.8044)).unwrap();
        let shared = common_prefix(&a, &b).len();
        assert_eq!(trie.stats().nodes, shared + 2 * (CODE_LENGTH - shared));

        trie.delete(&b).unwrap();
        assert_eq!(trie.stats().nodes, CODE_LENGTH);
        assert_consistent(&trie);
    }

    #[test]
    fn test_delete_missing_is_rejected_without_changes() {
        let mut trie = PrefixTrie::new();
        let code = trie.insert(p(-122.4194, 37.7749)).unwrap();
        let before = trie.stats();

        assert!(matches!(trie.delete("DR5REGW0"), Err(GeoTrieError::InvalidHash(_))));
        assert!(matches!(trie.delete(&code[..5]), Err(GeoTrieError::InvalidHash(_))));
        assert!(matches!(trie.delete(""), Err(GeoTrieError::InvalidHash(_))));
        assert!(matches!(trie.delete("9Q8YYK8I"), Err(GeoTrieError::InvalidHash(_))));

        assert_eq!(trie.stats(), before);
        assert_consistent(&trie);
    }

    #[test]
    fn test_delete_twice() {
        let mut trie = PrefixTrie::new();
        let code = trie.insert(p(1.0, 1.0)).unwrap();
        trie.delete(&code).unwrap();
        assert!(trie.delete(&code).is_err());
    }

    #[test]
    fn test_reinsert_after_delete() {
        let mut trie = PrefixTrie::new();
        let point = p(151.2093, -33.8688);
        let code = trie.insert(point).unwrap();
        trie.insert(point).unwrap();
        trie.delete(&code).unwrap();

        trie.insert(point).unwrap();
        assert_eq!(trie.lookup(&code).unwrap(), &[point]);
        assert_consistent(&trie);
    }

    #[test]
    fn test_prefix_search_pre_order() {
        let mut trie = PrefixTrie::new();
        let points = [
            p(-74.0060, 40.7128),
            p(-122.4194, 37.7749),
            p(139.6917, 35.6895),
            p(-0.1278, 51.5074),
            p(-122.2711, 37.8044),
        ];
        for point in points {
            trie.insert(point).unwrap();
        }

        let all = trie.prefix_search("").unwrap();
        let codes: Vec<&str> = all.iter().map(|e| e.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort_by_key(|code| geohash::decode_path(code).unwrap());
        // all codes share a length, so pre-order equals alphabet order
        assert_eq!(codes, sorted);
        assert_eq!(all.len(), points.len());
    }

    #[test]
    fn test_prefix_search_cell() {
        let mut trie = PrefixTrie::new();
        trie.insert(p(-122.4194, 37.7749)).unwrap();
        trie.insert(p(-122.2711, 37.8044)).unwrap();
        trie.insert(p(-74.0060, 40.7128)).unwrap();

        let bay_area = trie.prefix_search("9Q").unwrap();
        assert_eq!(bay_area.len(), 2);
        assert!(bay_area.iter().all(|e| e.code().starts_with("9Q")));

        assert!(trie.prefix_search("ZZ").unwrap().is_empty());
        assert!(trie.prefix_search("9Q8YYK8Y0").unwrap().is_empty());
        assert!(matches!(
            trie.prefix_search("9q"),
            Err(GeoTrieError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_insert_out_of_range_leaves_trie_untouched() {
        let mut trie = PrefixTrie::new();
        assert!(matches!(
            trie.insert(p(200.0, 0.0)),
            Err(GeoTrieError::OutOfRange { .. })
        ));
        assert!(trie.is_empty());
        assert_eq!(trie.stats().nodes, 0);
    }

    #[test]
    fn test_clear() {
        let mut trie = PrefixTrie::new();
        trie.insert(p(1.0, 2.0)).unwrap();
        trie.insert(p(3.0, 4.0)).unwrap();
        trie.clear();
        assert!(trie.is_empty());
        assert!(trie.prefix_search("").unwrap().is_empty());
    }

    #[test]
    fn test_many_codes_stay_consistent() {
        let mut trie = PrefixTrie::new();
        let mut codes = Vec::new();
        for i in 0..500 {
            let lon = -10.0 + (i % 25) as f64 * 0.013;
            let lat = 50.0 + (i / 25) as f64 * 0.007;
            codes.push(trie.insert(p(lon, lat)).unwrap());
        }
        codes.sort();
        codes.dedup();
        assert_eq!(trie.len(), codes.len());
        assert_consistent(&trie);

        for code in codes.iter().step_by(2) {
            trie.delete(code).unwrap();
        }
        assert_consistent(&trie);
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(trie.lookup(code).unwrap().is_empty(), i % 2 == 0);
        }
    }

    fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
        let len = a
            .bytes()
            .zip(b.bytes())
            .take_while(|(x, y)| x == y)
            .count();
        &a[..len]
    }
}
