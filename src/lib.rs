//! A pattern-matching password strength estimator.
//!
//! `passmeter` decomposes a candidate password into the weak patterns an
//! attacker would try first (dictionary words, keyboard walks, repeats,
//! sequences, character classes, calendar dates), searches for the
//! decomposition with the lowest total guess count, and maps it to a coarse
//! 0-4 score, crack-time estimates, and verbal feedback.
//!
//! # Examples
//!
//! ```
//! use passmeter::analyze;
//!
//! let strength = analyze("correct horse battery staple", &[]);
//! assert_eq!(strength.score(), 4);
//!
//! let weak = analyze("p@ssw0rd", &[]);
//! assert_eq!(weak.score(), 0);
//! assert!(weak.guesses() < 1e3);
//! ```
//!
//! Strings the attacker plausibly knows about the user, such as names or
//! email fragments, can be passed alongside the password and are matched
//! like any other dictionary, at the highest priority:
//!
//! ```
//! use passmeter::analyze;
//!
//! let strength = analyze("Rhinoceros77", &["rhinoceros".into()]);
//! assert!(strength.score() <= 1);
//! ```

#[macro_use]
extern crate lazy_static;

use std::time::Instant;

use time::Duration;

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

mod adjacency_graphs;
pub mod feedback;
mod frequency_lists;
pub mod matching;
mod scoring;
pub mod time_estimates;

pub use crate::feedback::Feedback;
pub use crate::matching::patterns::{Match, MatchPattern};
pub use crate::time_estimates::{CrackTimeSeconds, CrackTimes};

/// A caller-supplied string the attacker may know: the user's name, email
/// fragments, a birthday year. Numbers and booleans are rendered to text the
/// way users type them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum UserInput {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl UserInput {
    fn normalized(&self) -> String {
        match self {
            UserInput::Text(text) => text.to_lowercase(),
            UserInput::Integer(int) => int.to_string(),
            UserInput::Boolean(boolean) => boolean.to_string(),
        }
    }
}

impl From<&str> for UserInput {
    fn from(text: &str) -> Self {
        UserInput::Text(text.to_string())
    }
}

impl From<String> for UserInput {
    fn from(text: String) -> Self {
        UserInput::Text(text)
    }
}

impl From<i64> for UserInput {
    fn from(int: i64) -> Self {
        UserInput::Integer(int)
    }
}

impl From<bool> for UserInput {
    fn from(boolean: bool) -> Self {
        UserInput::Boolean(boolean)
    }
}

/// The result of analyzing a single password.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Strength {
    password: String,
    guesses: f64,
    guesses_log10: f64,
    crack_times: CrackTimes,
    score: u8,
    feedback: Feedback,
    sequence: Vec<Match>,
    #[cfg_attr(feature = "ser", serde(skip, default = "zero_duration"))]
    calc_time: Duration,
}

#[cfg(feature = "ser")]
fn zero_duration() -> Duration {
    Duration::ZERO
}

impl Strength {
    /// The password that was analyzed.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Estimated number of guesses an attacker needs to crack the password.
    pub fn guesses(&self) -> f64 {
        self.guesses
    }

    /// Order of magnitude of [`guesses`](Self::guesses).
    pub fn guesses_log10(&self) -> f64 {
        self.guesses_log10
    }

    /// Estimated crack times under four attacker scenarios.
    pub fn crack_times(&self) -> CrackTimes {
        self.crack_times
    }

    /// Overall strength, 0 (too guessable) through 4 (very unguessable).
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Verbal feedback on the dominant weakness.
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// The optimal decomposition the guess count is based on. Spans are
    /// non-overlapping and cover the whole password.
    pub fn sequence(&self) -> &[Match] {
        &self.sequence
    }

    /// Wall time the analysis took.
    pub fn calc_time(&self) -> Duration {
        self.calc_time
    }
}

/// Estimates the strength of `password`, treating `user_inputs` as known to
/// the attacker. Never fails: unusual input shapes degrade to the trivial
/// result rather than erroring.
pub fn analyze(password: &str, user_inputs: &[UserInput]) -> Strength {
    let start = Instant::now();

    // user inputs are scoped to this call: the ranked dictionary is rebuilt
    // fresh each time, so concurrent analyses can't observe each other
    let sanitized: Vec<String> = user_inputs.iter().map(UserInput::normalized).collect();
    let user_dict = frequency_lists::build_ranked_dict(sanitized);

    let matches = matching::omnimatch(password, &user_dict);
    let result = scoring::most_guessable_match_sequence(password, &matches, false);
    let calc_time = Duration::try_from(start.elapsed()).unwrap_or(Duration::MAX);

    let (crack_times, score) = time_estimates::estimate_attack_times(result.guesses);
    let feedback = feedback::get_feedback(score, &result.sequence);

    Strength {
        password: password.to_string(),
        guesses: result.guesses,
        guesses_log10: result.guesses_log10,
        crack_times,
        score,
        feedback,
        sequence: result.sequence,
        calc_time,
    }
}
