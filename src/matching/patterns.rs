//! Pattern types emitted by the matchers.

use std::collections::BTreeMap;

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

/// A match of a known weak pattern against a span of the password.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Match {
    /// Which pattern produced the match, with pattern-specific details
    #[cfg_attr(feature = "ser", serde(flatten))]
    pub pattern: MatchPattern,
    /// Inclusive start of the span, in Unicode scalar values
    pub i: usize,
    /// Inclusive end of the span, in Unicode scalar values
    pub j: usize,
    /// The exact substring `password[i..=j]`
    pub token: String,
    /// Estimated guesses to crack this match; cached by the scorer on first
    /// estimation and never mutated afterwards
    pub guesses: Option<f64>,
}

impl Match {
    /// Order of magnitude of the cached guess estimate.
    pub fn guesses_log10(&self) -> Option<f64> {
        self.guesses.map(f64::log10)
    }

    pub(crate) fn is_bruteforce(&self) -> bool {
        matches!(self.pattern, MatchPattern::Bruteforce)
    }
}

/// The pattern kind, tagged with its specific metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "ser", serde(tag = "pattern", rename_all = "snake_case"))]
pub enum MatchPattern {
    Dictionary(DictionaryPattern),
    Spatial(SpatialPattern),
    Repeat(RepeatPattern),
    Sequence(SequencePattern),
    Regex(RegexPattern),
    Date(DatePattern),
    /// Synthetic filler generated by the scorer for spans no matcher claimed
    Bruteforce,
}

impl Default for MatchPattern {
    fn default() -> Self {
        MatchPattern::Bruteforce
    }
}

/// A word found in one of the ranked frequency dictionaries, possibly
/// reversed or obfuscated with l33t substitutions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct DictionaryPattern {
    /// The canonical lowercase word that was found
    pub matched_word: String,
    /// 1-based rank in the dictionary; smaller is more common
    pub rank: usize,
    /// Which dictionary the word came from
    pub dictionary_name: &'static str,
    /// Whether the token is the word spelled backwards
    pub reversed: bool,
    /// Whether l33t substitutions were undone to find the word
    pub l33t: bool,
    /// Substituted character back to the original letter, for l33t matches
    pub sub: Option<BTreeMap<char, char>>,
    /// Human-readable rendering of `sub`, e.g. "@ -> a, 0 -> o"
    pub sub_display: Option<String>,
    /// The rank, kept for display once the match has been estimated
    pub base_guesses: Option<f64>,
    pub uppercase_variations: Option<f64>,
    pub l33t_variations: Option<f64>,
}

/// A run of physically adjacent keys on one keyboard layout.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct SpatialPattern {
    /// Name of the adjacency graph the run was found on
    pub graph: &'static str,
    /// Number of direction changes in the walk
    pub turns: usize,
    /// Number of characters typed with shift held
    pub shifted_count: usize,
}

/// A token made of one unit repeated two or more times.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct RepeatPattern {
    /// The shortest repeating unit
    pub base_token: String,
    /// Result of running the full pipeline on `base_token`
    pub base_guesses: f64,
    /// `token.len() / base_token.len()`
    pub repeat_count: usize,
}

/// A run through an ordered alphabet, in either direction.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct SequencePattern {
    pub sequence_name: &'static str,
    /// Size of the underlying alphabet
    pub sequence_space: usize,
    pub ascending: bool,
}

/// A span matched by one of the named character-class or year regexes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct RegexPattern {
    pub regex_name: &'static str,
    /// The matched group texts; for `recent_year` the matched year digits
    pub regex_match: Vec<String>,
}

/// A calendar date, with or without separators.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "builder", derive(derive_builder::Builder), builder(default))]
pub struct DatePattern {
    /// Empty, or the single separator character used twice
    pub separator: String,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    /// True when the year was matched directly as four digits rather than
    /// promoted from a two-digit field
    pub has_full_year: bool,
}
