//! Bitap approximate string matching.
//!
//! Scores how well a pattern occurs in a text on a `0.0` (exact) to `1.0`
//! (no match) scale. The score combines the number of edit errors with how
//! far the match lies from the expected location:
//!
//! ```text
//! score = errors / pattern_len + |location - expected| / distance
//! ```
//!
//! A match is accepted when its score stays within the threshold. Patterns
//! longer than [`MAX_BITS`] characters are split into chunks; the result
//! matches if any chunk does and its score is the chunk average.

use std::collections::HashMap;

use super::SearchOptions;

/// Longest pattern handled in a single bit-parallel pass.
pub const MAX_BITS: usize = 32;

/// Scores below this are reported as this value, except for identity.
const MIN_SCORE: f64 = 0.001;

/// Outcome of matching one pattern against one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub is_match: bool,
    pub score: f64,
}

impl MatchResult {
    const NONE: Self = Self {
        is_match: false,
        score: 1.0,
    };
}

#[derive(Debug, Clone)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

/// A lowercased search pattern with its precomputed bit masks.
#[derive(Debug, Clone)]
pub struct BitapPattern {
    pattern: Vec<char>,
    chunks: Vec<Chunk>,
}

impl BitapPattern {
    /// Prepare `pattern` for matching. Matching is case-insensitive.
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        let mut chunks = Vec::new();
        let mut add_chunk = |slice: &[char], start_index: usize| {
            chunks.push(Chunk {
                pattern: slice.to_vec(),
                alphabet: alphabet(slice),
                start_index,
            });
        };

        let len = pattern.len();
        if len <= MAX_BITS {
            add_chunk(&pattern, 0);
        } else {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            for start in (0..end).step_by(MAX_BITS) {
                add_chunk(&pattern[start..start + MAX_BITS], start);
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                add_chunk(&pattern[start..], start);
            }
        }

        Self { pattern, chunks }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Match against `text`, which must already be lowercased.
    pub fn search_in(&self, text: &[char], options: &SearchOptions) -> MatchResult {
        if self.pattern.is_empty() {
            return MatchResult::NONE;
        }
        if self.pattern == text {
            return MatchResult {
                is_match: true,
                score: 0.0,
            };
        }

        let mut total = 0.0;
        let mut any = false;
        for chunk in &self.chunks {
            let result = search(
                text,
                &chunk.pattern,
                &chunk.alphabet,
                options.location + chunk.start_index,
                options,
            );
            any |= result.is_match;
            total += result.score;
        }

        if any {
            MatchResult {
                is_match: true,
                score: total / self.chunks.len() as f64,
            }
        } else {
            MatchResult::NONE
        }
    }
}

/// Bit mask per pattern character: bit `len - 1 - i` set for position `i`.
fn alphabet(pattern: &[char]) -> HashMap<char, u64> {
    let len = pattern.len();
    let mut masks = HashMap::with_capacity(len);
    for (i, ch) in pattern.iter().enumerate() {
        *masks.entry(*ch).or_insert(0) |= 1u64 << (len - i - 1);
    }
    masks
}

fn compute_score(
    pattern_len: usize,
    errors: usize,
    current: usize,
    expected: usize,
    distance: usize,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = current.abs_diff(expected);
    if distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }
    accuracy + proximity as f64 / distance as f64
}

/// First exact occurrence of `pattern` in `text` at or after `from`.
fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if from > text.len() || pattern.len() > text.len() - from {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| pos + from)
}

/// Single-chunk bitap search. `pattern` is at most [`MAX_BITS`] long.
fn search(
    text: &[char],
    pattern: &[char],
    alphabet: &HashMap<char, u64>,
    location: usize,
    options: &SearchOptions,
) -> MatchResult {
    let pattern_len = pattern.len();
    let text_len = text.len();
    let distance = options.distance;
    let expected = location.min(text_len);
    let mut threshold = options.threshold;

    // Exact occurrences tighten the threshold before the bit-parallel pass
    let mut from = expected;
    while let Some(index) = find_from(text, pattern, from) {
        let score = compute_score(pattern_len, 0, index, expected, distance);
        threshold = threshold.min(score);
        from = index + pattern_len;
    }

    let mut best: Option<usize> = None;
    let mut final_score = 1.0;
    let mut last_bits: Vec<u64> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let mask = 1u64 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // How far from the expected location a match with this many
        // errors may still lie
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(pattern_len, errors, expected + bin_mid, expected, distance);
            if score <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected + 1).saturating_sub(bin_mid).max(1);
        let finish = (expected + bin_mid).min(text_len) + pattern_len;

        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;
        let last = |k: usize| last_bits.get(k).copied().unwrap_or(0);

        let mut j = finish;
        while j >= start {
            let current = j - 1;
            let char_match = text
                .get(current)
                .and_then(|ch| alphabet.get(ch))
                .copied()
                .unwrap_or(0);

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                bits[j] |= ((last(j + 1) | last(j)) << 1) | 1 | last(j + 1);
            }

            if bits[j] & mask != 0 {
                let score = compute_score(pattern_len, errors, current, expected, distance);
                if score <= threshold {
                    threshold = score;
                    final_score = score;
                    best = Some(current);
                    if current <= expected {
                        break;
                    }
                    start = (2 * expected).saturating_sub(current).max(1);
                }
            }
            j -= 1;
        }

        // One more error could not beat what we already have
        let score = compute_score(pattern_len, errors + 1, expected, expected, distance);
        if score > threshold {
            break;
        }
        last_bits = bits;
    }

    match best {
        Some(_) => MatchResult {
            is_match: true,
            score: f64::max(MIN_SCORE, final_score),
        },
        None => MatchResult::NONE,
    }
}
