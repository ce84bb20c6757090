//! Phrase iterator (component F): a lazy, single-pass, non-restartable walk
//! over the leaf siblings of one tree node (`spec.md` §4.F).
//!
//! Ordering is not computed here: the on-disk leaf-ordering invariant
//! (descending `freq`, ties by ascending offset — `spec.md` §3, §8
//! invariant 4) is a property of the tree file itself. This iterator simply
//! walks `next_sibling_leaf` in file order and trusts it.

use crate::dict::PhraseDict;
use crate::error::EngineError;
use crate::tree::Tree;

/// One phrase candidate for a fixed syllable span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub phrase: String,
    pub freq: u32,
}

/// Borrows `tree` and `dict` for its lifetime; cannot outlive the engine
/// that owns the mapped files (`spec.md` §4.F).
pub struct PhraseIterator<'a> {
    tree: &'a Tree,
    dict: &'a PhraseDict,
    end: u32,
    next: Option<u32>,
}

impl<'a> PhraseIterator<'a> {
    /// Starts iteration at the first leaf child of `parent`, if any.
    pub fn new(tree: &'a Tree, dict: &'a PhraseDict, parent: (u32, u32)) -> Self {
        PhraseIterator { tree, dict, end: parent.1, next: tree.first_phrase_child(parent) }
    }
}

impl<'a> Iterator for PhraseIterator<'a> {
    type Item = Result<PhraseEntry, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let (offset, freq) = self.tree.leaf_phrase(idx)?;
        self.next = self.tree.next_sibling_leaf(idx, self.end);
        Some(self.dict.phrase_at(offset).map(|phrase| PhraseEntry { phrase: phrase.to_string(), freq }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
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

    fn write_temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_{}", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn iterates_leaf_siblings_in_file_order() {
        // root -> two leaves, higher freq first (already on-disk ordered).
        let first_phrase = "台灣";
        let second_offset = (first_phrase.len() + 1) as u32;
        let mut tree_bytes = Vec::new();
        write_record(&mut tree_bytes, 2, 1, 3); // root: count=2, children [1,3)
        write_record(&mut tree_bytes, 0, 0, 100); // leaf: offset 0, freq 100
        write_record(&mut tree_bytes, 0, second_offset, 10); // leaf: freq 10
        let tree_path = write_temp_file("iter_tree", &tree_bytes);

        let mut dict_bytes = Vec::new();
        dict_bytes.extend_from_slice(first_phrase.as_bytes());
        dict_bytes.push(0);
        dict_bytes.extend_from_slice("不知道".as_bytes());
        dict_bytes.push(0);
        let dict_path = write_temp_file("iter_dict", &dict_bytes);

        let tree = Tree::open(&tree_path).unwrap();
        let dict = PhraseDict::open(&dict_path).unwrap();
        let root = tree.root_children();
        let mut iter = PhraseIterator::new(&tree, &dict, root);
        let first = iter.next().unwrap().unwrap();
        assert_eq!(first.phrase, "台灣");
        assert_eq!(first.freq, 100);
        let second = iter.next().unwrap().unwrap();
        assert_eq!(second.phrase, "不知道");
        assert_eq!(second.freq, 10);
        assert!(iter.next().is_none());
        std::fs::remove_file(tree_path).ok();
        std::fs::remove_file(dict_path).ok();
    }
}
