//! Attack-time estimation and the 0..=4 strength banding.

use std::fmt;

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

/// Crack-time estimates under four attacker scenarios, derived from the
/// total guess count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct CrackTimes {
    guesses: f64,
}

impl CrackTimes {
    pub(crate) fn new(guesses: f64) -> Self {
        CrackTimes { guesses }
    }

    /// Online attack on a service that rate-limits password attempts.
    pub fn online_throttling_100_per_hour(self) -> CrackTimeSeconds {
        CrackTimeSeconds(self.guesses / (100.0 / 3600.0))
    }

    /// Online attack on a service without rate limiting.
    pub fn online_no_throttling_10_per_second(self) -> CrackTimeSeconds {
        CrackTimeSeconds(self.guesses / 1e2)
    }

    /// Offline attack, assuming a slow hash function like bcrypt, scrypt or
    /// PBKDF2.
    pub fn offline_slow_hashing_1e4_per_second(self) -> CrackTimeSeconds {
        CrackTimeSeconds(self.guesses / 1e4)
    }

    /// Offline attack with a fast hash and plenty of hardware.
    pub fn offline_fast_hashing_1e10_per_second(self) -> CrackTimeSeconds {
        CrackTimeSeconds(self.guesses / 1e10)
    }
}

/// A crack-time estimate in seconds. `Display` renders it stepwise in the
/// largest sensible unit, from "less than a second" up to "centuries".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct CrackTimeSeconds(f64);

impl CrackTimeSeconds {
    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for CrackTimeSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = MINUTE * 60.0;
        const DAY: f64 = HOUR * 24.0;
        const MONTH: f64 = DAY * 31.0;
        const YEAR: f64 = MONTH * 12.0;
        const CENTURY: f64 = YEAR * 100.0;

        let seconds = self.0;
        let (base, unit) = if seconds < 1.0 {
            return write!(f, "less than a second");
        } else if seconds < MINUTE {
            (seconds.round() as i64, "second")
        } else if seconds < HOUR {
            ((seconds / MINUTE).round() as i64, "minute")
        } else if seconds < DAY {
            ((seconds / HOUR).round() as i64, "hour")
        } else if seconds < MONTH {
            ((seconds / DAY).round() as i64, "day")
        } else if seconds < YEAR {
            ((seconds / MONTH).round() as i64, "month")
        } else if seconds < CENTURY {
            ((seconds / YEAR).round() as i64, "year")
        } else {
            return write!(f, "centuries");
        };
        if base == 1 {
            write!(f, "{} {}", base, unit)
        } else {
            write!(f, "{} {}s", base, unit)
        }
    }
}

pub(crate) fn estimate_attack_times(guesses: f64) -> (CrackTimes, u8) {
    (CrackTimes::new(guesses), guesses_to_score(guesses))
}

fn guesses_to_score(guesses: f64) -> u8 {
    const DELTA: f64 = 5.0;
    if guesses < 1e3 + DELTA {
        // risky password: "too guessable"
        0
    } else if guesses < 1e6 + DELTA {
        // modest protection from throttled online attacks: "very guessable"
        1
    } else if guesses < 1e8 + DELTA {
        // modest protection from unthrottled online attacks:
        // "somewhat guessable"
        2
    } else if guesses < 1e10 + DELTA {
        // modest protection from offline attacks, assuming a salted, slow
        // hash function: "safely unguessable"
        3
    } else {
        // strong protection under the same scenario: "very unguessable"
        4
    }
}
