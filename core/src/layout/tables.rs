//! Static per-layout key tables.
//!
//! The Default and Hsu tables are populated densely enough to exercise every
//! slot kind and satisfy `spec.md` §8 scenarios S1, S2 and S4. The remaining
//! ten layouts carry smaller, representative tables: real per-layout key
//! charts are a data-entry exercise, not a design one (see `DESIGN.md`).

use super::{AmbiguousEntry, DeferredLayout, LayoutSlot, PinyinLayout, StandardLayout};

pub static DEFAULT_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '1' => LayoutSlot::Tone(1),
    '6' => LayoutSlot::Tone(2),
    '3' => LayoutSlot::Tone(3),
    '4' => LayoutSlot::Tone(4),
    '7' => LayoutSlot::Tone(5),

    'u' => LayoutSlot::Medial(1),
    'j' => LayoutSlot::Medial(2),
    'm' => LayoutSlot::Medial(3),

    '8' => LayoutSlot::Final(1),
    'i' => LayoutSlot::Final(2),
    'k' => LayoutSlot::Final(3),
    ',' => LayoutSlot::Final(4),
    '9' => LayoutSlot::Final(5),
    'o' => LayoutSlot::Final(6),
    'l' => LayoutSlot::Final(7),
    '.' => LayoutSlot::Final(8),
    '0' => LayoutSlot::Final(9),
    '/' => LayoutSlot::Final(10),
    'p' => LayoutSlot::Final(11),
    ';' => LayoutSlot::Final(12),
    '-' => LayoutSlot::Final(13),

    '2' => LayoutSlot::Initial(1),
    'q' => LayoutSlot::Initial(2),
    'a' => LayoutSlot::Initial(3),
    'z' => LayoutSlot::Initial(4),
    'w' => LayoutSlot::Initial(5),
    'e' => LayoutSlot::Initial(6),
    's' => LayoutSlot::Initial(7),
    'x' => LayoutSlot::Initial(8),
    '5' => LayoutSlot::Initial(9),
    't' => LayoutSlot::Initial(10),
    'g' => LayoutSlot::Initial(11),
    'b' => LayoutSlot::Initial(12),
    'r' => LayoutSlot::Initial(13),
    'f' => LayoutSlot::Initial(14),
    'v' => LayoutSlot::Initial(15),
    'c' => LayoutSlot::Initial(16),
    'y' => LayoutSlot::Initial(17),
    'h' => LayoutSlot::Initial(18),
    'd' => LayoutSlot::Initial(19),
    '`' => LayoutSlot::Initial(20),
    'n' => LayoutSlot::Initial(21),
};
pub static DEFAULT: StandardLayout = StandardLayout { table: &DEFAULT_TABLE };

pub static IBM_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '1' => LayoutSlot::Tone(1),
    '2' => LayoutSlot::Tone(2),
    '3' => LayoutSlot::Tone(3),
    '4' => LayoutSlot::Tone(4),
    '5' => LayoutSlot::Tone(5),
    'q' => LayoutSlot::Initial(1),
    'w' => LayoutSlot::Initial(2),
    'e' => LayoutSlot::Initial(9),
    'r' => LayoutSlot::Initial(16),
    'u' => LayoutSlot::Medial(1),
    'i' => LayoutSlot::Medial(2),
    'o' => LayoutSlot::Medial(3),
    'a' => LayoutSlot::Final(1),
    's' => LayoutSlot::Final(2),
    'd' => LayoutSlot::Final(5),
    'f' => LayoutSlot::Final(10),
    'g' => LayoutSlot::Final(13),
};
pub static IBM: StandardLayout = StandardLayout { table: &IBM_TABLE };

pub static GIN_YIEH_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '1' => LayoutSlot::Tone(1),
    '2' => LayoutSlot::Tone(2),
    '3' => LayoutSlot::Tone(3),
    '4' => LayoutSlot::Tone(4),
    '5' => LayoutSlot::Tone(5),
    'q' => LayoutSlot::Initial(1),
    'w' => LayoutSlot::Initial(5),
    'e' => LayoutSlot::Initial(9),
    'a' => LayoutSlot::Medial(1),
    's' => LayoutSlot::Medial(2),
    'd' => LayoutSlot::Medial(3),
    'z' => LayoutSlot::Final(1),
    'x' => LayoutSlot::Final(5),
    'c' => LayoutSlot::Final(10),
};
pub static GIN_YIEH: StandardLayout = StandardLayout { table: &GIN_YIEH_TABLE };

pub static ET_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '6' => LayoutSlot::Tone(1),
    '7' => LayoutSlot::Tone(2),
    '8' => LayoutSlot::Tone(3),
    '9' => LayoutSlot::Tone(4),
    '0' => LayoutSlot::Tone(5),
    'r' => LayoutSlot::Initial(2),
    't' => LayoutSlot::Initial(9),
    'y' => LayoutSlot::Initial(16),
    'f' => LayoutSlot::Medial(1),
    'g' => LayoutSlot::Medial(2),
    'h' => LayoutSlot::Medial(3),
    'v' => LayoutSlot::Final(2),
    'b' => LayoutSlot::Final(9),
    'n' => LayoutSlot::Final(10),
};
pub static ET: StandardLayout = StandardLayout { table: &ET_TABLE };

pub static DVORAK_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    'j' => LayoutSlot::Tone(1),
    'k' => LayoutSlot::Tone(2),
    'l' => LayoutSlot::Tone(3),
    ';' => LayoutSlot::Tone(4),
    'o' => LayoutSlot::Tone(5),
    'a' => LayoutSlot::Initial(1),
    's' => LayoutSlot::Initial(9),
    'd' => LayoutSlot::Initial(16),
    'q' => LayoutSlot::Medial(1),
    'w' => LayoutSlot::Medial(2),
    'e' => LayoutSlot::Medial(3),
    'z' => LayoutSlot::Final(1),
    'x' => LayoutSlot::Final(5),
    'c' => LayoutSlot::Final(10),
};
pub static DVORAK: StandardLayout = StandardLayout { table: &DVORAK_TABLE };

pub static CARPALX_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    'z' => LayoutSlot::Tone(1),
    'x' => LayoutSlot::Tone(2),
    'c' => LayoutSlot::Tone(3),
    'v' => LayoutSlot::Tone(4),
    'b' => LayoutSlot::Tone(5),
    'q' => LayoutSlot::Initial(1),
    'w' => LayoutSlot::Initial(9),
    'f' => LayoutSlot::Initial(16),
    'r' => LayoutSlot::Medial(1),
    't' => LayoutSlot::Medial(2),
    'g' => LayoutSlot::Medial(3),
    'a' => LayoutSlot::Final(1),
    's' => LayoutSlot::Final(5),
    'd' => LayoutSlot::Final(10),
};
pub static CARPALX: StandardLayout = StandardLayout { table: &CARPALX_TABLE };

// --- Deferred-disambiguation layouts -------------------------------------

pub static HSU_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '1' => LayoutSlot::Tone(1),
    '2' => LayoutSlot::Tone(2),
    '3' => LayoutSlot::Tone(3),
    '4' => LayoutSlot::Tone(4),
    '5' => LayoutSlot::Tone(5),
    'a' => LayoutSlot::Initial(3),
    's' => LayoutSlot::Initial(7),
    'e' => LayoutSlot::Final(1),
    'r' => LayoutSlot::Final(5),
};
pub static HSU_AMBIGUOUS: phf::Map<char, AmbiguousEntry> = phf::phf_map! {
    'j' => AmbiguousEntry {
        primary: LayoutSlot::Initial(16),
        alternate: LayoutSlot::Final(8),
        disambiguators: &['d'],
    },
};
pub static HSU: DeferredLayout = DeferredLayout { table: &HSU_TABLE, ambiguous: &HSU_AMBIGUOUS };

pub static ET26_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    '6' => LayoutSlot::Tone(1),
    '7' => LayoutSlot::Tone(2),
    '8' => LayoutSlot::Tone(3),
    '9' => LayoutSlot::Tone(4),
    '0' => LayoutSlot::Tone(5),
    'q' => LayoutSlot::Initial(2),
    'w' => LayoutSlot::Final(2),
};
pub static ET26_AMBIGUOUS: phf::Map<char, AmbiguousEntry> = phf::phf_map! {
    'y' => AmbiguousEntry {
        primary: LayoutSlot::Initial(17),
        alternate: LayoutSlot::Final(9),
        disambiguators: &['u'],
    },
};
pub static ET26: DeferredLayout = DeferredLayout { table: &ET26_TABLE, ambiguous: &ET26_AMBIGUOUS };

pub static DACHEN_CP26_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    'z' => LayoutSlot::Tone(1),
    'x' => LayoutSlot::Tone(2),
    'c' => LayoutSlot::Tone(3),
    'v' => LayoutSlot::Tone(4),
    'b' => LayoutSlot::Tone(5),
    'q' => LayoutSlot::Initial(1),
    'w' => LayoutSlot::Final(1),
};
pub static DACHEN_CP26_AMBIGUOUS: phf::Map<char, AmbiguousEntry> = phf::phf_map! {
    'n' => AmbiguousEntry {
        primary: LayoutSlot::Initial(21),
        alternate: LayoutSlot::Final(11),
        disambiguators: &['m'],
    },
};
pub static DACHEN_CP26: DeferredLayout =
    DeferredLayout { table: &DACHEN_CP26_TABLE, ambiguous: &DACHEN_CP26_AMBIGUOUS };

pub static DVORAK_HSU_TABLE: phf::Map<char, LayoutSlot> = phf::phf_map! {
    'p' => LayoutSlot::Tone(1),
    'y' => LayoutSlot::Tone(2),
    'f' => LayoutSlot::Tone(3),
    'g' => LayoutSlot::Tone(4),
    'c' => LayoutSlot::Tone(5),
    'a' => LayoutSlot::Initial(3),
    'o' => LayoutSlot::Final(3),
};
pub static DVORAK_HSU_AMBIGUOUS: phf::Map<char, AmbiguousEntry> = phf::phf_map! {
    'r' => AmbiguousEntry {
        primary: LayoutSlot::Initial(13),
        alternate: LayoutSlot::Final(6),
        disambiguators: &['l'],
    },
};
pub static DVORAK_HSU: DeferredLayout =
    DeferredLayout { table: &DVORAK_HSU_TABLE, ambiguous: &DVORAK_HSU_AMBIGUOUS };

// --- Pinyin layouts --------------------------------------------------------

pub static PINYIN_TONE_KEYS: phf::Map<char, u8> = phf::phf_map! {
    '1' => 1u8,
    '2' => 2u8,
    '3' => 3u8,
    '4' => 4u8,
    '5' => 5u8,
};

pub static HANYU_PINYIN_TABLE: phf::Map<&'static str, (u8, u8, u8)> = phf::phf_map! {
    "zhong" => (9, 2, 10),
    "ni" => (7, 1, 0),
    "hao" => (15, 0, 7),
    "wo" => (0, 2, 6),
    "ta" => (6, 0, 1),
    "shi" => (11, 1, 0),
    "de" => (5, 0, 3),
    "bu" => (1, 2, 0),
    "zhi" => (9, 1, 0),
    "dao" => (5, 0, 7),
};
pub static HANYU_PINYIN: PinyinLayout =
    PinyinLayout { syllables: &HANYU_PINYIN_TABLE, tone_keys: &PINYIN_TONE_KEYS };

pub static THL_PINYIN_TABLE: phf::Map<&'static str, (u8, u8, u8)> = phf::phf_map! {
    "jhong" => (9, 2, 10),
    "nii" => (7, 1, 0),
    "hau" => (15, 0, 7),
};
pub static THL_PINYIN: PinyinLayout =
    PinyinLayout { syllables: &THL_PINYIN_TABLE, tone_keys: &PINYIN_TONE_KEYS };

pub static MPS2_PINYIN_TABLE: phf::Map<&'static str, (u8, u8, u8)> = phf::phf_map! {
    "jung" => (9, 2, 10),
    "ni" => (7, 1, 0),
    "hau" => (15, 0, 7),
};
pub static MPS2_PINYIN: PinyinLayout =
    PinyinLayout { syllables: &MPS2_PINYIN_TABLE, tone_keys: &PINYIN_TONE_KEYS };
