/*!
 * Passage segmentation for unit-level translation.
 *
 * Splits an input passage into ordered translation units that can be
 * translated independently and reassembled without losing the original
 * line/sentence boundaries. Splitting is a pure function of the input.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Sentence-terminal punctuation followed by whitespace. Lookbehind keeps the
// punctuation attached to the sentence it ends.
static SENTENCE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([.!?])\s+").unwrap()
});

/// Lines at or below this length are never split mid-sentence
const SENTENCE_SPLIT_THRESHOLD: usize = 100;

/// One ordered, atomic span of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Position in the original sequence
    pub index: usize,

    /// The span text
    pub text: String,
}

impl TranslationUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Split a passage into ordered translation units.
///
/// Lines are the primary unit; blank lines are dropped. A line longer than
/// the sentence threshold is further split at sentence-terminal punctuation
/// followed by whitespace.
pub fn segment(text: &str) -> Vec<TranslationUnit> {
    let mut units = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.chars().count() <= SENTENCE_SPLIT_THRESHOLD {
            units.push(TranslationUnit::new(units.len(), line));
            continue;
        }

        for sentence in split_into_sentences(line) {
            units.push(TranslationUnit::new(units.len(), sentence));
        }
    }

    units
}

/// Split a long line at sentence boundaries, keeping terminal punctuation
/// with its sentence. Empty fragments are dropped.
fn split_into_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for caps in SENTENCE_BOUNDARY_REGEX.captures_iter(line) {
        let punct = caps.get(1).unwrap();
        let fragment = line[last_end..punct.end()].trim();
        if !fragment.is_empty() {
            sentences.push(fragment.to_string());
        }
        last_end = caps.get(0).unwrap().end();
    }

    let tail = line[last_end..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Reassemble per-unit texts into a whole passage.
///
/// The join policy mirrors the shape of the original input: multi-line input
/// joins with a paragraph break, single-line input joins with a space. This
/// asymmetry preserves the visual fidelity of round-tripped multi-line text.
pub fn join_units(original: &str, parts: &[String]) -> String {
    if original.contains('\n') {
        parts.join("\n\n")
    } else {
        parts.join(" ")
    }
}
