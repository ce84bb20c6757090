//! User dictionary collaborator boundary (component K).
//!
//! `spec.md` §1 places user-dictionary *persistence* out of scope; the
//! conversion core only needs a lookup boundary to merge externally-learned
//! phrases into the candidate set as pseudo-leaves (§4.G). `core` defines
//! the trait; persistence (a hash file, `redb`, or anything else) is the
//! caller's concern.

use crate::phone::Phone;

/// An external source of learned phrase/frequency pairs for an exact
/// syllable span. The conversion core treats matches as pseudo-leaves with
/// their own frequencies and does not know where they came from.
pub trait UserDictionary {
    /// Returns `(phrase, freq)` pairs exactly covering `syllables`.
    fn lookup(&self, syllables: &[Phone]) -> Vec<(String, u32)>;
}

/// A trivial in-memory `UserDictionary`, for tests and small embeddings.
/// Not a persistence mechanism: contents do not survive process exit.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserDict {
    entries: Vec<(Vec<Phone>, String, u32)>,
}

impl InMemoryUserDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn(&mut self, syllables: &[Phone], phrase: &str, freq: u32) {
        self.entries.push((syllables.to_vec(), phrase.to_string(), freq));
    }
}

impl UserDictionary for InMemoryUserDict {
    fn lookup(&self, syllables: &[Phone]) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .filter(|(key, _, _)| key.as_slice() == syllables)
            .map(|(_, phrase, freq)| (phrase.clone(), *freq))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learns_and_looks_up_exact_span() {
        let mut dict = InMemoryUserDict::new();
        let syllables = vec![Phone::encode(9, 2, 10, 3).unwrap()];
        dict.learn(&syllables, "種", 42);
        assert_eq!(dict.lookup(&syllables), vec![("種".to_string(), 42)]);
        assert!(dict.lookup(&[Phone::encode(1, 0, 0, 1).unwrap()]).is_empty());
    }
}
