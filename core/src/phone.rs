//! Phone codec (component A): packs a Bopomofo syllable into a 16-bit code
//! and renders it to/from its UTF-8 spelling.

use crate::error::MalformedPhoneError;

const INITIAL_SHIFT: u16 = 9;
const MEDIAL_SHIFT: u16 = 7;
const FINAL_SHIFT: u16 = 3;
const TONE_SHIFT: u16 = 0;

const INITIAL_MASK: u16 = 0x1F;
const MEDIAL_MASK: u16 = 0x3;
const FINAL_MASK: u16 = 0xF;
const TONE_MASK: u16 = 0x7;

const MAX_INITIAL: u8 = 21;
const MAX_MEDIAL: u8 = 3;
const MAX_FINAL: u8 = 13;
const MAX_TONE: u8 = 5;

/// Bopomofo character for each initial, indices 1..=21 (index 0 is "none").
const INITIAL_CHARS: [char; 22] = [
    '\0', 'ㄅ', 'ㄆ', 'ㄇ', 'ㄈ', 'ㄉ', 'ㄊ', 'ㄋ', 'ㄌ', 'ㄓ', 'ㄔ', 'ㄕ', 'ㄖ', 'ㄍ', 'ㄎ',
    'ㄏ', 'ㄐ', 'ㄑ', 'ㄒ', 'ㄗ', 'ㄘ', 'ㄙ',
];

/// Bopomofo character for each medial, indices 1..=3.
const MEDIAL_CHARS: [char; 4] = ['\0', 'ㄧ', 'ㄨ', 'ㄩ'];

/// Bopomofo character for each final, indices 1..=13.
const FINAL_CHARS: [char; 14] = [
    '\0', 'ㄚ', 'ㄛ', 'ㄜ', 'ㄝ', 'ㄞ', 'ㄟ', 'ㄠ', 'ㄡ', 'ㄢ', 'ㄥ', 'ㄣ', 'ㄤ', 'ㄦ',
];

/// Tone mark for each tone, indices 1..=5. Tone 1 (light) renders as empty.
const TONE_MARKS: [&str; 6] = ["", "", "ˊ", "ˇ", "ˋ", "˙"];

/// A packed Bopomofo syllable: initial (5 bits), medial (2 bits), final (4
/// bits), tone (3 bits), MSB to LSB within the low 14 bits of a `u16`.
///
/// `Phone(0)` denotes "no syllable". See `spec.md` §3 for field ranges and
/// the well-formed/committable invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phone(pub u16);

impl Phone {
    pub const EMPTY: Phone = Phone(0);

    /// Packs the four fields into a `Phone`, validating each against its
    /// declared range (§3). Does not validate well-formedness; a phone with
    /// all-zero initial/medial/final is a legal (if unusual) encoding.
    pub fn encode(initial: u8, medial: u8, final_: u8, tone: u8) -> Result<Phone, MalformedPhoneError> {
        if initial > MAX_INITIAL {
            return Err(MalformedPhoneError::InitialOutOfRange(initial));
        }
        if medial > MAX_MEDIAL {
            return Err(MalformedPhoneError::MedialOutOfRange(medial));
        }
        if final_ > MAX_FINAL {
            return Err(MalformedPhoneError::FinalOutOfRange(final_));
        }
        if tone > MAX_TONE {
            return Err(MalformedPhoneError::ToneOutOfRange(tone));
        }
        let bits = (initial as u16) << INITIAL_SHIFT
            | (medial as u16) << MEDIAL_SHIFT
            | (final_ as u16) << FINAL_SHIFT
            | (tone as u16) << TONE_SHIFT;
        Ok(Phone(bits))
    }

    /// Unpacks `(initial, medial, final, tone)`. Pure bit extraction; never
    /// fails, since any `u16` decodes to *some* field tuple even if it was
    /// never produced by `encode` (callers wanting validation should check
    /// the returned fields against the ranges in §3, or call `to_utf8`,
    /// which does validate against the rendering tables).
    pub fn decode(self) -> (u8, u8, u8, u8) {
        let initial = ((self.0 >> INITIAL_SHIFT) & INITIAL_MASK) as u8;
        let medial = ((self.0 >> MEDIAL_SHIFT) & MEDIAL_MASK) as u8;
        let final_ = ((self.0 >> FINAL_SHIFT) & FINAL_MASK) as u8;
        let tone = ((self.0 >> TONE_SHIFT) & TONE_MASK) as u8;
        (initial, medial, final_, tone)
    }

    /// True iff at least one of (initial, medial, final) is non-zero (§3).
    pub fn is_well_formed(self) -> bool {
        let (initial, medial, final_, _) = self.decode();
        initial != 0 || medial != 0 || final_ != 0
    }

    /// A well-formed phone whose tone is in 1..=5 (§3).
    pub fn is_committable(self) -> bool {
        let (_, _, _, tone) = self.decode();
        self.is_well_formed() && (1..=5).contains(&tone)
    }

    /// Renders the UTF-8 spelling: up to three phonetic characters followed
    /// by the tone mark (tone 1 renders as no mark).
    pub fn to_utf8(self) -> Result<String, MalformedPhoneError> {
        let (initial, medial, final_, tone) = self.decode();
        let mut s = String::with_capacity(4);
        if initial != 0 {
            let ch = *INITIAL_CHARS
                .get(initial as usize)
                .ok_or(MalformedPhoneError::InitialOutOfRange(initial))?;
            s.push(ch);
        }
        if medial != 0 {
            let ch = *MEDIAL_CHARS
                .get(medial as usize)
                .ok_or(MalformedPhoneError::MedialOutOfRange(medial))?;
            s.push(ch);
        }
        if final_ != 0 {
            let ch = *FINAL_CHARS
                .get(final_ as usize)
                .ok_or(MalformedPhoneError::FinalOutOfRange(final_))?;
            s.push(ch);
        }
        if tone != 0 {
            let mark = TONE_MARKS
                .get(tone as usize)
                .ok_or(MalformedPhoneError::ToneOutOfRange(tone))?;
            s.push_str(mark);
        }
        Ok(s)
    }

    /// Parses a UTF-8 Bopomofo spelling back into a `Phone`. A syllable with
    /// no tone mark and at least one phonetic character defaults to tone 1
    /// (the light tone), matching `to_utf8`'s empty rendering for tone 1.
    pub fn from_utf8(s: &str) -> Result<Phone, MalformedPhoneError> {
        let mut initial = 0u8;
        let mut medial = 0u8;
        let mut final_ = 0u8;
        let mut tone = 0u8;

        for ch in s.chars() {
            if let Some(idx) = INITIAL_CHARS.iter().position(|&c| c == ch) {
                initial = idx as u8;
                continue;
            }
            if let Some(idx) = MEDIAL_CHARS.iter().position(|&c| c == ch) {
                medial = idx as u8;
                continue;
            }
            if let Some(idx) = FINAL_CHARS.iter().position(|&c| c == ch) {
                final_ = idx as u8;
                continue;
            }
            if let Some(idx) = TONE_MARKS.iter().position(|&m| m == ch.to_string()) {
                tone = idx as u8;
                continue;
            }
            return Err(MalformedPhoneError::UnparseableUtf8);
        }

        if initial == 0 && medial == 0 && final_ == 0 {
            return Err(MalformedPhoneError::UnparseableUtf8);
        }
        if tone == 0 {
            tone = 1;
        }
        Phone::encode(initial, medial, final_, tone)
    }
}
