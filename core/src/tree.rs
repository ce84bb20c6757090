//! Tree index (component D): a read-only, memory-mapped trie over syllable
//! sequences, stored as fixed 8-byte records (`spec.md` §3, §6).
//!
//! Record layout: `key` (u16 BE); then, branching on `key == 0`, either
//! (`child.begin`, `child.end`) or (`phrase.offset`, `phrase.freq`), each a
//! 24-bit BE field. Record 0 is the root sentinel and is always structurally
//! interior: its `key` field carries the leaf count for the integrity check
//! in §4.D rather than following the `key == 0` branch rule (see
//! `DESIGN.md` for the resolution of the §9 open question on what "count"
//! means here).

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::EngineError;
use crate::phone::Phone;

const RECORD_SIZE: usize = 8;

/// A zero-copy, bounds-checked view over a memory-mapped phrase tree file.
pub struct Tree {
    mmap: Mmap,
    record_count: u32,
}

impl Tree {
    /// Maps `path` and verifies the record count and the root's declared
    /// leaf count against an actual scan (`spec.md` §4.D integrity check).
    pub fn open(path: &Path) -> Result<Tree, EngineError> {
        let file = File::open(path).map_err(|_| EngineError::MissingDataFile { path: path.to_path_buf() })?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() % RECORD_SIZE != 0 || mmap.len() < RECORD_SIZE {
            return Err(EngineError::CorruptDictionary {
                detail: format!("tree file length {} is not a positive multiple of {RECORD_SIZE}", mmap.len()),
            });
        }
        let record_count = (mmap.len() / RECORD_SIZE) as u32;

        let tree = Tree { mmap, record_count };
        tree.check_integrity()?;
        Ok(tree)
    }

    fn record(&self, idx: u32) -> &[u8] {
        debug_assert!(idx < self.record_count, "node index {idx} out of bounds");
        let start = idx as usize * RECORD_SIZE;
        &self.mmap[start..start + RECORD_SIZE]
    }

    fn try_record(&self, idx: u32) -> Result<&[u8], EngineError> {
        if idx >= self.record_count {
            return Err(EngineError::CorruptDictionary {
                detail: format!("node index {idx} exceeds record count {}", self.record_count),
            });
        }
        Ok(self.record(idx))
    }

    fn raw_key(&self, idx: u32) -> u16 {
        let r = self.record(idx);
        u16::from_be_bytes([r[0], r[1]])
    }

    fn raw_pair(&self, idx: u32) -> (u32, u32) {
        let r = self.record(idx);
        (read_u24_be(&r[2..5]), read_u24_be(&r[5..8]))
    }

    /// Number of 8-byte records mapped, including the root sentinel.
    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    /// True iff `idx` is a leaf (`key == 0` and not the root sentinel).
    pub fn is_leaf(&self, idx: u32) -> bool {
        idx != 0 && self.raw_key(idx) == 0
    }

    /// The phone key of an interior node; meaningless for leaves or the root.
    pub fn node_key(&self, idx: u32) -> Phone {
        Phone(self.raw_key(idx))
    }

    /// `(child.begin, child.end)` for an interior node, or the root.
    pub fn child_range(&self, idx: u32) -> Option<(u32, u32)> {
        if idx == 0 || !self.is_leaf(idx) {
            Some(self.raw_pair(idx))
        } else {
            None
        }
    }

    /// `(phrase.offset, phrase.freq)` for a leaf node.
    pub fn leaf_phrase(&self, idx: u32) -> Option<(u32, u32)> {
        if self.is_leaf(idx) {
            Some(self.raw_pair(idx))
        } else {
            None
        }
    }

    /// The root's child range, for starting a descent.
    pub fn root_children(&self) -> (u32, u32) {
        self.raw_pair(0)
    }

    /// Binary search over `parent`'s child range for an exact phone key
    /// (`spec.md` §4.D `lookup_child`). O(log fanout).
    pub fn lookup_child(&self, parent: (u32, u32), phone: Phone) -> Option<u32> {
        let (begin, end) = parent;
        if begin >= end {
            return None;
        }
        let mut lo = begin;
        let mut hi = end;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let key = self.raw_key(mid);
            match key.cmp(&phone.0) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        None
    }

    /// The first leaf child in `parent`'s range, if any (`spec.md` §4.D).
    /// Leaves sort first (key `0` is the minimum possible key), so this is
    /// simply the first element of the range when it is a leaf.
    pub fn first_phrase_child(&self, parent: (u32, u32)) -> Option<u32> {
        let (begin, end) = parent;
        if begin < end && self.is_leaf(begin) {
            Some(begin)
        } else {
            None
        }
    }

    /// Advances within a leaf run (`spec.md` §4.D). `end` is the parent's
    /// child range end (from `child_range`/`root_children`); without it, a
    /// single-leaf run immediately followed by an unrelated node's leaf
    /// would be walked into by mistake. Returns `None` ("End") once the run
    /// of same-parent leaves ends.
    pub fn next_sibling_leaf(&self, node: u32, end: u32) -> Option<u32> {
        let next = node + 1;
        if next < end && self.is_leaf(next) {
            Some(next)
        } else {
            None
        }
    }

    fn check_integrity(&self) -> Result<(), EngineError> {
        let declared = self.raw_key(0) as u32;
        let mut actual = 0u32;
        for idx in 1..self.record_count {
            if self.raw_key(idx) == 0 {
                actual += 1;
            }
        }
        if declared != actual {
            return Err(EngineError::CorruptDictionary {
                detail: format!("root declares {declared} leaves but {actual} were found"),
            });
        }
        let (begin, end) = self.root_children();
        if begin > end || end as usize > self.record_count as usize {
            return Err(EngineError::CorruptDictionary {
                detail: format!("root child range ({begin}, {end}) is out of bounds"),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn checked_leaf_phrase(&self, idx: u32) -> Result<Option<(u32, u32)>, EngineError> {
        self.try_record(idx)?;
        Ok(self.leaf_phrase(idx))
    }
}

fn read_u24_be(bytes: &[u8]) -> u32 {
    (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_u24_be(buf: &mut Vec<u8>, v: u32) {
        buf.push((v >> 16) as u8);
        buf.push((v >> 8) as u8);
        buf.push(v as u8);
    }

    fn write_record(buf: &mut Vec<u8>, key: u16, a: u32, b: u32) {
        buf.extend_from_slice(&key.to_be_bytes());
        write_u24_be(buf, a);
        write_u24_be(buf, b);
    }

    /// Builds a tiny tree: root -> [leaf(freq=5,offset=0), interior(key=9) -> [leaf(freq=10,offset=4)]]
    fn tiny_tree_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        // node 0: root, key = leaf count (2), children [1,3)
        write_record(&mut buf, 2, 1, 3);
        // node 1: leaf, offset=0, freq=5
        write_record(&mut buf, 0, 0, 5);
        // node 2: interior, key=9, children [3,4)... wait needs to come after node1
        write_record(&mut buf, 9, 3, 4);
        // node 3: leaf under node2, offset=4, freq=10
        write_record(&mut buf, 0, 4, 10);
        buf
    }

    fn write_temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_{}_{}", std::process::id(), name.len()));
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn opens_and_validates_integrity() {
        let path = write_temp_file("tree_ok", &tiny_tree_bytes());
        let tree = Tree::open(&path).unwrap();
        assert_eq!(tree.record_count(), 4);
        assert_eq!(tree.root_children(), (1, 3));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_mismatched_leaf_count() {
        let mut bytes = tiny_tree_bytes();
        // corrupt the declared leaf count in the root record.
        bytes[1] = 99;
        let path = write_temp_file("tree_bad", &bytes);
        assert!(Tree::open(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn tree_monotonic_and_lookup() {
        let path = write_temp_file("tree_lookup", &tiny_tree_bytes());
        let tree = Tree::open(&path).unwrap();
        let root = tree.root_children();
        assert_eq!(tree.first_phrase_child(root), Some(1));
        assert_eq!(tree.next_sibling_leaf(1, root.1), None);
        let child = tree.lookup_child(root, Phone(9)).unwrap();
        assert_eq!(child, 2);
        assert_eq!(tree.lookup_child(root, Phone(42)), None);
        let grandchild_range = tree.child_range(child).unwrap();
        assert_eq!(tree.first_phrase_child(grandchild_range), Some(3));
        assert_eq!(tree.leaf_phrase(3), Some((4, 10)));
        std::fs::remove_file(path).ok();
    }
}
