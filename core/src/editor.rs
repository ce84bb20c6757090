//! Phonetic editor (component C): a per-layout state machine over a partial
//! syllable.

use crate::layout::{KeyBehavior, KeyboardLayoutCompat, LayoutScratch};
use crate::phone::Phone;

/// Lifecycle state of a [`PhoneticEditor`] (`spec.md` §4.C). `Committed` is
/// transient: `input()` returns `Commit` and the editor resets to `Empty` in
/// the same call, since the committed phone is consumed immediately by the
/// surrounding syllable buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Empty,
    Composing,
    Committed,
}

/// Per-layout state machine absorbing ASCII keys into a Bopomofo syllable.
///
/// Named after `internal/chewing_internal.h`'s `PhoneticEditor*` functions
/// (`PhoneticEditorInput`, `PhoneticEditorSyllable`,
/// `PhoneticEditorSyllableAlt`, `PhoneticEditorKeyseq`,
/// `PhoneticEditorRemoveLast`, `PhoneticEditorRemoveAll`,
/// `PhoneticEditorIsEntering`).
pub struct PhoneticEditor {
    layout: KeyboardLayoutCompat,
    scratch: LayoutScratch,
    state: EditorState,
    last_committed: Phone,
}

impl PhoneticEditor {
    pub fn new(layout: KeyboardLayoutCompat) -> Self {
        Self {
            layout,
            scratch: LayoutScratch::default(),
            state: EditorState::Empty,
            last_committed: Phone::EMPTY,
        }
    }

    pub fn kb_type(&self) -> KeyboardLayoutCompat {
        self.layout
    }

    /// Feeds one key, updating state per the layout's rules (`spec.md` §4.B,
    /// §4.C). A `Commit` result also resets the editor to `Empty`; the
    /// caller reads `current_phone()` (equivalently, the phone this call
    /// just committed) before issuing the next key.
    pub fn input(&mut self, key: char) -> KeyBehavior {
        let behavior = self.layout.layout().input(key, &mut self.scratch);
        match behavior {
            KeyBehavior::Commit => {
                // `Committed` is transient: the buffer above consumes the
                // phone in this same call, so we land straight back on
                // `Empty` rather than exposing an observable `Committed`.
                self.last_committed = self.scratch.current_phone();
                self.scratch = LayoutScratch::default();
                self.state = EditorState::Empty;
            }
            KeyBehavior::Absorb => {
                self.state = EditorState::Composing;
            }
            KeyBehavior::Ignore | KeyBehavior::NoWord | KeyBehavior::KeyError | KeyBehavior::Error => {}
        }
        behavior
    }

    /// The phone currently being assembled; zero if `Empty`. Immediately
    /// after a `Commit`, this is the phone that was just committed (the
    /// caller's natural place to read it, since `Committed` is transient).
    pub fn current_phone(&self) -> Phone {
        if self.state == EditorState::Empty && self.last_committed != Phone::EMPTY {
            let committed = self.last_committed;
            committed
        } else {
            self.scratch.current_phone()
        }
    }

    /// The deferred-disambiguation alternate, for Hsu-family layouts; zero
    /// otherwise.
    pub fn alternate_phone(&self) -> Phone {
        self.scratch.alternate.unwrap_or(Phone::EMPTY)
    }

    /// The buffered Latin spelling, for Pinyin layouts; empty otherwise.
    pub fn key_sequence(&self) -> &str {
        &self.scratch.key_sequence
    }

    /// Removes the most recently contributed slot; if all slots end up
    /// empty, the editor transitions to `Empty`.
    pub fn backspace(&mut self) {
        if !self.scratch.key_sequence.is_empty() {
            self.scratch.key_sequence.pop();
        } else if self.scratch.tone != 0 {
            self.scratch.tone = 0;
        } else if self.scratch.final_ != 0 {
            self.scratch.final_ = 0;
        } else if self.scratch.medial != 0 {
            self.scratch.medial = 0;
        } else if self.scratch.initial != 0 {
            self.scratch.initial = 0;
        }
        self.scratch.alternate = None;
        self.last_committed = Phone::EMPTY;
        if self.scratch.is_empty() {
            self.state = EditorState::Empty;
        }
    }

    /// Resets to `Empty`, discarding any partial syllable.
    pub fn clear(&mut self) {
        self.scratch = LayoutScratch::default();
        self.state = EditorState::Empty;
        self.last_committed = Phone::EMPTY;
    }

    /// True iff the editor holds a partial (not yet committed) syllable.
    pub fn is_entering(&self) -> bool {
        self.state == EditorState::Composing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_default_layout_commit() {
        let mut editor = PhoneticEditor::new(KeyboardLayoutCompat::Default);
        assert_eq!(editor.input('5'), KeyBehavior::Absorb);
        assert_eq!(editor.input('j'), KeyBehavior::Absorb);
        assert_eq!(editor.input('/'), KeyBehavior::Absorb);
        assert!(editor.is_entering());
        assert_eq!(editor.input('3'), KeyBehavior::Commit);
        assert!(!editor.is_entering());
        assert_eq!(editor.current_phone().decode(), (9, 2, 10, 3));
    }

    #[test]
    fn s4_tone_on_empty_is_noword() {
        let mut editor = PhoneticEditor::new(KeyboardLayoutCompat::Default);
        assert_eq!(editor.input('1'), KeyBehavior::NoWord);
        assert!(!editor.is_entering());
        assert_eq!(editor.current_phone(), Phone::EMPTY);
    }

    #[test]
    fn backspace_unwinds_slots_then_returns_to_empty() {
        let mut editor = PhoneticEditor::new(KeyboardLayoutCompat::Default);
        editor.input('5');
        editor.input('j');
        assert!(editor.is_entering());
        editor.backspace();
        assert!(editor.is_entering());
        editor.backspace();
        assert!(!editor.is_entering());
    }

    #[test]
    fn clear_discards_partial_syllable() {
        let mut editor = PhoneticEditor::new(KeyboardLayoutCompat::Default);
        editor.input('5');
        editor.clear();
        assert!(!editor.is_entering());
        assert_eq!(editor.current_phone(), Phone::EMPTY);
    }

    #[test]
    fn commit_ordering_guarantee_exactly_one_commit() {
        let mut editor = PhoneticEditor::new(KeyboardLayoutCompat::Default);
        let behaviors: Vec<_> = "5j/3".chars().map(|k| editor.input(k)).collect();
        let commits = behaviors.iter().filter(|b| **b == KeyBehavior::Commit).count();
        assert_eq!(commits, 1);
        assert_eq!(behaviors[3], KeyBehavior::Commit);
    }
}
