//! Keyboard layout tables (component B): a pure mapping from an ASCII key
//! plus partial-phone state to an updated state and a `KeyBehavior`.
//!
//! Every layout implements [`KeyboardLayout`]. Three mechanics cover all
//! thirteen layouts named in `spec.md` §4.B:
//!
//! - [`StandardLayout`]: one key → one slot, last write wins. Used by
//!   Default, IBM, GinYieh, Et, Dvorak, Carpalx.
//! - [`DeferredLayout`]: some keys are ambiguous between two slot
//!   interpretations; a later disambiguating key (or a tone key forcing
//!   commit) resolves which interpretation is current and which becomes the
//!   alternate. Used by Hsu, Et26, Dachen-CP26, Dvorak-Hsu.
//! - [`PinyinLayout`]: ASCII letters buffer into a Latin key sequence until
//!   a tone digit arrives, at which point the buffer is looked up as a whole
//!   syllable. Used by Hanyu Pinyin, THL Pinyin, MPS2 Pinyin.

mod tables;

use serde::{Deserialize, Serialize};

use crate::phone::Phone;

/// The result of feeding one key to a [`KeyboardLayout`] (`spec.md` §4.B, §7).
///
/// Named after `internal/chewing_internal.h`'s `KeyBehavior` enum; this
/// implementation does not expose `OpenSymbolTable`, which belongs to the
/// out-of-scope candidate-selection UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBehavior {
    /// Key absorbed into the partial phone; composition continues.
    Absorb,
    /// A committable phone was completed; the caller should read
    /// `current_phone()` and reset the editor.
    Commit,
    /// Key is outside this layout's vocabulary; no state change.
    Ignore,
    /// Key was meaningful for this layout but invalid in the current state
    /// (e.g. a tone key with nothing to commit, or an unmapped Pinyin
    /// buffer at tone time).
    NoWord,
    /// A tone/commit key arrived but the resulting phone would violate an
    /// internal invariant (should not occur in correctly built tables).
    KeyError,
    /// Reserved for invariant violations surfaced from lower layers.
    Error,
}

/// Every layout named in `spec.md` §4.B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayoutCompat {
    Default,
    Hsu,
    Ibm,
    GinYieh,
    Et,
    Et26,
    Dvorak,
    DvorakHsu,
    DachenCp26,
    HanyuPinyin,
    ThlPinyin,
    Mps2Pinyin,
    Carpalx,
}

impl KeyboardLayoutCompat {
    /// Returns the layout implementation for this kind.
    pub fn layout(self) -> &'static dyn KeyboardLayout {
        use KeyboardLayoutCompat::*;
        match self {
            Default => &tables::DEFAULT,
            Ibm => &tables::IBM,
            GinYieh => &tables::GIN_YIEH,
            Et => &tables::ET,
            Dvorak => &tables::DVORAK,
            Carpalx => &tables::CARPALX,
            Hsu => &tables::HSU,
            Et26 => &tables::ET26,
            DachenCp26 => &tables::DACHEN_CP26,
            DvorakHsu => &tables::DVORAK_HSU,
            HanyuPinyin => &tables::HANYU_PINYIN,
            ThlPinyin => &tables::THL_PINYIN,
            Mps2Pinyin => &tables::MPS2_PINYIN,
        }
    }
}

/// One slot of a partial phone, as addressed by a keyboard layout key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSlot {
    Initial(u8),
    Medial(u8),
    Final(u8),
    Tone(u8),
}

/// An ambiguous key for a [`DeferredLayout`]: `primary` is applied
/// immediately; `alternate` is recorded as the deferred choice. If a key in
/// `disambiguators` arrives next, the interpretations swap.
pub struct AmbiguousEntry {
    pub primary: LayoutSlot,
    pub alternate: LayoutSlot,
    pub disambiguators: &'static [char],
}

/// Mutable partial-phone state threaded through layout key processing.
/// Owned by the [`crate::editor::PhoneticEditor`]; layouts only read/write it.
#[derive(Debug, Default, Clone)]
pub struct LayoutScratch {
    pub initial: u8,
    pub medial: u8,
    pub final_: u8,
    pub tone: u8,
    /// Deferred-disambiguation alternate, for Hsu-family layouts.
    pub alternate: Option<Phone>,
    /// Buffered Latin spelling, for Pinyin-family layouts.
    pub key_sequence: String,
    /// Which field an ambiguous key last wrote to, so a later
    /// disambiguator can find and flip it.
    pending_ambiguity: Option<(LayoutSlot, LayoutSlot, &'static [char])>,
}

impl LayoutScratch {
    pub fn is_empty(&self) -> bool {
        self.initial == 0
            && self.medial == 0
            && self.final_ == 0
            && self.tone == 0
            && self.key_sequence.is_empty()
    }

    pub fn current_phone(&self) -> Phone {
        Phone::encode(self.initial, self.medial, self.final_, self.tone).unwrap_or(Phone::EMPTY)
    }

    fn apply_slot(&mut self, slot: LayoutSlot) {
        match slot {
            LayoutSlot::Initial(v) => self.initial = v,
            LayoutSlot::Medial(v) => self.medial = v,
            LayoutSlot::Final(v) => self.final_ = v,
            LayoutSlot::Tone(v) => self.tone = v,
        }
    }

    fn clear_slot_kind(&mut self, slot: LayoutSlot) {
        match slot {
            LayoutSlot::Initial(_) => self.initial = 0,
            LayoutSlot::Medial(_) => self.medial = 0,
            LayoutSlot::Final(_) => self.final_ = 0,
            LayoutSlot::Tone(_) => self.tone = 0,
        }
    }
}

/// A pure per-layout key-to-behavior mapping (`spec.md` §4.B).
pub trait KeyboardLayout: Sync {
    fn input(&self, key: char, scratch: &mut LayoutScratch) -> KeyBehavior;
}

/// One key, one slot; a later key to the same slot overwrites it.
pub struct StandardLayout {
    pub table: &'static phf::Map<char, LayoutSlot>,
}

impl KeyboardLayout for StandardLayout {
    fn input(&self, key: char, scratch: &mut LayoutScratch) -> KeyBehavior {
        match self.table.get(&key) {
            Some(LayoutSlot::Tone(t)) => {
                if scratch.initial == 0 && scratch.medial == 0 && scratch.final_ == 0 {
                    KeyBehavior::NoWord
                } else {
                    scratch.tone = *t;
                    KeyBehavior::Commit
                }
            }
            Some(slot) => {
                scratch.apply_slot(*slot);
                KeyBehavior::Absorb
            }
            None => KeyBehavior::Ignore,
        }
    }
}

/// Standard slots plus a table of ambiguous keys needing deferred
/// disambiguation (`spec.md` §4.B).
pub struct DeferredLayout {
    pub table: &'static phf::Map<char, LayoutSlot>,
    pub ambiguous: &'static phf::Map<char, AmbiguousEntry>,
}

impl KeyboardLayout for DeferredLayout {
    fn input(&self, key: char, scratch: &mut LayoutScratch) -> KeyBehavior {
        // A pending ambiguity resolves if this key is one of its
        // disambiguators: flip primary/alternate and keep both on record.
        if let Some((primary, alternate, disambiguators)) = scratch.pending_ambiguity {
            if disambiguators.contains(&key) {
                scratch.clear_slot_kind(primary);
                scratch.apply_slot(alternate);
                let mut alt_scratch = LayoutScratch::default();
                alt_scratch.apply_slot(primary);
                scratch.alternate = Some(alt_scratch.current_phone());
                scratch.pending_ambiguity = None;
                return KeyBehavior::Absorb;
            }
        }

        if let Some(entry) = self.ambiguous.get(&key) {
            scratch.apply_slot(entry.primary);
            let mut alt_scratch = LayoutScratch::default();
            alt_scratch.apply_slot(entry.alternate);
            scratch.alternate = Some(alt_scratch.current_phone());
            scratch.pending_ambiguity = Some((entry.primary, entry.alternate, entry.disambiguators));
            return KeyBehavior::Absorb;
        }

        match self.table.get(&key) {
            Some(LayoutSlot::Tone(t)) => {
                if scratch.initial == 0 && scratch.medial == 0 && scratch.final_ == 0 {
                    KeyBehavior::NoWord
                } else {
                    scratch.tone = *t;
                    KeyBehavior::Commit
                }
            }
            Some(slot) => {
                scratch.apply_slot(*slot);
                KeyBehavior::Absorb
            }
            None => KeyBehavior::Ignore,
        }
    }
}

/// Buffers ASCII letters as a Latin key sequence; a tone digit triggers a
/// whole-syllable table lookup (`spec.md` §4.B, Pinyin layouts).
pub struct PinyinLayout {
    pub syllables: &'static phf::Map<&'static str, (u8, u8, u8)>,
    pub tone_keys: &'static phf::Map<char, u8>,
}

impl KeyboardLayout for PinyinLayout {
    fn input(&self, key: char, scratch: &mut LayoutScratch) -> KeyBehavior {
        if let Some(tone) = self.tone_keys.get(&key) {
            if scratch.key_sequence.is_empty() {
                return KeyBehavior::NoWord;
            }
            match self.syllables.get(scratch.key_sequence.as_str()) {
                Some(&(initial, medial, final_)) => {
                    scratch.initial = initial;
                    scratch.medial = medial;
                    scratch.final_ = final_;
                    scratch.tone = *tone;
                    KeyBehavior::Commit
                }
                None => {
                    scratch.key_sequence.clear();
                    KeyBehavior::NoWord
                }
            }
        } else if key.is_ascii_alphabetic() {
            scratch.key_sequence.push(key);
            KeyBehavior::Absorb
        } else {
            KeyBehavior::Ignore
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_s1() {
        let layout = KeyboardLayoutCompat::Default.layout();
        let mut scratch = LayoutScratch::default();
        assert_eq!(layout.input('5', &mut scratch), KeyBehavior::Absorb);
        assert_eq!(layout.input('j', &mut scratch), KeyBehavior::Absorb);
        assert_eq!(layout.input('/', &mut scratch), KeyBehavior::Absorb);
        assert_eq!(scratch.current_phone().decode(), (9, 2, 10, 0));
        assert_eq!(layout.input('3', &mut scratch), KeyBehavior::Commit);
        assert_eq!(scratch.current_phone().decode(), (9, 2, 10, 3));
    }

    #[test]
    fn default_layout_s4_tone_on_empty_is_noword() {
        let layout = KeyboardLayoutCompat::Default.layout();
        let mut scratch = LayoutScratch::default();
        assert_eq!(layout.input('1', &mut scratch), KeyBehavior::NoWord);
        assert!(scratch.is_empty());
    }

    #[test]
    fn hsu_layout_s2_deferred_disambiguation() {
        let layout = KeyboardLayoutCompat::Hsu.layout();
        let mut scratch = LayoutScratch::default();
        assert_eq!(layout.input('j', &mut scratch), KeyBehavior::Absorb);
        let current_after_j = scratch.current_phone();
        let alternate_after_j = scratch.alternate.unwrap();
        assert_ne!(current_after_j, alternate_after_j);

        assert_eq!(layout.input('d', &mut scratch), KeyBehavior::Absorb);
        let current = scratch.current_phone();
        let alternate = scratch.alternate.unwrap();
        assert_ne!(current, alternate);
        // The disambiguating key flips which interpretation is current.
        assert_eq!(current, alternate_after_j);
    }

    #[test]
    fn hanyu_pinyin_s3() {
        let layout = KeyboardLayoutCompat::HanyuPinyin.layout();
        let mut scratch = LayoutScratch::default();
        for key in "zhong".chars() {
            assert_eq!(layout.input(key, &mut scratch), KeyBehavior::Absorb);
        }
        assert_eq!(scratch.key_sequence, "zhong");
        assert_eq!(layout.input('3', &mut scratch), KeyBehavior::Commit);
        assert_eq!(scratch.current_phone().decode(), (9, 2, 10, 3));
    }
}
