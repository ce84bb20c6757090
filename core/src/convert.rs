//! Conversion core (component G): turns a syllable buffer into the
//! highest-scoring sequence of phrases via a Viterbi-style DP over the tree
//! index (`spec.md` §4.G, §8 invariants 5 and 6).
//!
//! Score of a phrase of length `n` and frequency `freq` is
//! `ln(freq) + length_bonus(n)`, with `length_bonus(n) = (n - 1) * step`
//! (`spec.md` §4.G open question, resolved in `DESIGN.md`). A position with
//! no tree or user-dictionary match of any length is still covered by a
//! synthetic single-syllable phrase of frequency 1, so segmentation always
//! succeeds (invariant 5).

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::dict::PhraseDict;
use crate::error::EngineError;
use crate::phone::Phone;
use crate::phrase_iter::PhraseIterator;
use crate::tree::Tree;
use crate::userdict::UserDictionary;

/// One phrase in a resolved segmentation, with the syllable span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub freq: u32,
}

/// A full segmentation of a syllable buffer: phrases in left-to-right order,
/// covering every syllable exactly once (`spec.md` §8 invariant 5).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub spans: Vec<PhraseSpan>,
}

/// One relaxation candidate considered for some `best[i + len]` cell.
struct Candidate {
    text: String,
    start: usize,
    len: usize,
    freq: u32,
    /// Enumeration order among same-span candidates from the same source.
    /// Tree leaves are already file-ordered by descending freq, ties by
    /// ascending offset (invariant 4), so this stands in for "lower offset"
    /// without threading raw offsets out of `PhraseIterator`. The synthetic
    /// fallback uses `usize::MAX` so it never outranks a real match.
    tie_rank: usize,
}

#[derive(Clone)]
struct BestCell {
    score: f64,
    phrase_count: usize,
    tie_rank: usize,
    came_from: usize,
    span: PhraseSpan,
}

const SCORE_EPS: f64 = 1e-9;

/// Drives the DP over `Tree`/`PhraseDict`, optionally merging in a
/// `UserDictionary`, and memoizes full segmentations by syllable sequence.
pub struct ConversionCore<'a> {
    tree: &'a Tree,
    dict: &'a PhraseDict,
    user_dict: Option<&'a dyn UserDictionary>,
    length_bonus_step: f64,
    cache: std::sync::Mutex<LruCache<Vec<u16>, Segmentation>>,
}

impl<'a> ConversionCore<'a> {
    pub fn new(
        tree: &'a Tree,
        dict: &'a PhraseDict,
        user_dict: Option<&'a dyn UserDictionary>,
        length_bonus_step: f64,
        cache_capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity.max(1)).unwrap();
        ConversionCore { tree, dict, user_dict, length_bonus_step, cache: std::sync::Mutex::new(LruCache::new(capacity)) }
    }

    fn length_bonus(&self, len: usize) -> f64 {
        (len as f64 - 1.0) * self.length_bonus_step
    }

    fn score(&self, len: usize, freq: u32) -> f64 {
        (freq.max(1) as f64).ln() + self.length_bonus(len)
    }

    /// Resolves `syllables` into its best-scoring segmentation (§4.G).
    /// Empty input yields an empty segmentation.
    pub fn convert(&self, syllables: &[Phone]) -> Result<Segmentation, EngineError> {
        if syllables.is_empty() {
            return Ok(Segmentation::default());
        }

        let key: Vec<u16> = syllables.iter().map(|p| p.0).collect();
        if let Some(hit) = self.cache.lock().unwrap().get(&key) {
            tracing::debug!(input_len = syllables.len(), spans = hit.spans.len(), cached = true, "converted");
            return Ok(hit.clone());
        }

        let segmentation = self.solve(syllables)?;
        tracing::debug!(input_len = syllables.len(), spans = segmentation.spans.len(), cached = false, "converted");
        self.cache.lock().unwrap().put(key, segmentation.clone());
        Ok(segmentation)
    }

    fn solve(&self, syllables: &[Phone]) -> Result<Segmentation, EngineError> {
        let len = syllables.len();
        let mut best: Vec<Option<BestCell>> = vec![None; len + 1];
        best[0] = Some(BestCell {
            score: 0.0,
            phrase_count: 0,
            tie_rank: 0,
            came_from: 0,
            span: PhraseSpan { text: String::new(), start: 0, end: 0, freq: 0 },
        });

        for i in 0..len {
            if best[i].is_none() {
                continue;
            }
            let candidates = self.candidates_from(syllables, i)?;
            for candidate in candidates {
                self.relax(&mut best, i, candidate);
            }
        }

        let mut spans = Vec::new();
        let mut cursor = len;
        while cursor != 0 {
            let cell = best[cursor].as_ref().expect("invariant 5: every position is reachable");
            spans.push(cell.span.clone());
            cursor = cell.came_from;
        }
        spans.reverse();
        Ok(Segmentation { spans })
    }

    fn relax(&self, best: &mut [Option<BestCell>], i: usize, candidate: Candidate) {
        let from = best[i].as_ref().expect("caller only relaxes from a reachable cell");
        let score = from.score + self.score(candidate.len, candidate.freq);
        let phrase_count = from.phrase_count + 1;
        let j = candidate.start + candidate.len;

        let replace = match &best[j] {
            None => true,
            Some(existing) => is_better(score, phrase_count, &candidate, existing),
        };

        if replace {
            best[j] = Some(BestCell {
                score,
                phrase_count,
                tie_rank: candidate.tie_rank,
                came_from: i,
                span: PhraseSpan { text: candidate.text, start: candidate.start, end: j, freq: candidate.freq },
            });
        }
    }

    /// All phrase candidates starting at `i`: tree matches, user-dictionary
    /// pseudo-leaves, and the synthetic single-syllable fallback
    /// (`spec.md` §4.G).
    fn candidates_from(&self, syllables: &[Phone], i: usize) -> Result<Vec<Candidate>, EngineError> {
        let mut out = Vec::new();
        let max_len = syllables.len() - i;

        let mut range = self.tree.root_children();
        for len in 1..=max_len {
            let phone = syllables[i + len - 1];
            let idx = match self.tree.lookup_child(range, phone) {
                Some(idx) => idx,
                None => break,
            };
            range = match self.tree.child_range(idx) {
                Some(r) => r,
                None => break,
            };
            for (rank, entry) in PhraseIterator::new(self.tree, self.dict, range).enumerate() {
                let entry = entry?;
                out.push(Candidate { text: entry.phrase, start: i, len, freq: entry.freq, tie_rank: rank });
            }

            if let Some(user_dict) = self.user_dict {
                for (rank, (phrase, freq)) in user_dict.lookup(&syllables[i..i + len]).into_iter().enumerate() {
                    out.push(Candidate { text: phrase, start: i, len, freq, tie_rank: rank });
                }
            }
        }

        let fallback_text = syllables[i].to_utf8().map_err(|e| EngineError::CorruptDictionary { detail: e.to_string() })?;
        out.push(Candidate { text: fallback_text, start: i, len: 1, freq: 1, tie_rank: usize::MAX });

        Ok(out)
    }
}

/// Tie-break order for two candidates landing on the same DP cell with the
/// same arrival score (`spec.md` §8 invariant 6): fewer total phrases wins,
/// then earlier start, then longer phrase, then higher frequency, then
/// lower tie rank (a proxy for on-disk offset).
fn is_better(score: f64, phrase_count: usize, candidate: &Candidate, existing: &BestCell) -> bool {
    if (score - existing.score).abs() > SCORE_EPS {
        return score > existing.score;
    }
    if phrase_count != existing.phrase_count {
        return phrase_count < existing.phrase_count;
    }
    if candidate.start != existing.span.start {
        return candidate.start < existing.span.start;
    }
    let existing_len = existing.span.end - existing.span.start;
    if candidate.len != existing_len {
        return candidate.len > existing_len;
    }
    if candidate.freq != existing.span.freq {
        return candidate.freq > existing.span.freq;
    }
    candidate.tie_rank < existing.tie_rank
}
