//! Guess estimation and the optimal-decomposition search.
//!
//! Guess counts are `f64` throughout: products of factorials and
//! exponentials overflow any integer type for long passwords, and IEEE
//! infinity propagates through the search unchanged.

use std::collections::HashMap;

use regex::Regex;

use crate::adjacency_graphs;
use crate::matching::patterns::{
    DatePattern, DictionaryPattern, Match, MatchPattern, RegexPattern, RepeatPattern,
    SequencePattern, SpatialPattern,
};

#[derive(Debug, Clone)]
pub(crate) struct GuessCalculation {
    /// Estimated guesses needed to crack the password
    pub guesses: f64,
    /// Order of magnitude of `guesses`
    pub guesses_log10: f64,
    /// The list of patterns the guess calculation was based on
    pub sequence: Vec<Match>,
}

pub(crate) const REFERENCE_YEAR: i32 = 2000;
const MIN_YEAR_SPACE: i32 = 20;
const BRUTEFORCE_CARDINALITY: f64 = 10.0;
const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;
const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

/// Search for the non-overlapping sequence of matches covering the whole
/// password that minimizes
///
/// `l! * Prod(m.guesses for m in sequence) + MIN_GUESSES_BEFORE_GROWING_SEQUENCE^(l-1)`
///
/// where `l` is the sequence length. The factorial term is the attacker's
/// work to try all orderings of `l` parts; the additive term penalizes
/// needlessly long decompositions. Synthetic bruteforce matches fill the
/// spans no matcher claimed.
pub(crate) fn most_guessable_match_sequence(
    password: &str,
    matches: &[Match],
    exclude_additive: bool,
) -> GuessCalculation {
    let password_chars: Vec<char> = password.chars().collect();
    let n = password_chars.len();
    let mut matches: Vec<Match> = matches.to_vec();

    // optimal_product[k][l] holds the guess product of the best length-l
    // sequence covering the prefix ending at k; backpointers[k][l] holds the
    // final match of that sequence. Inner vectors grow on demand.
    let mut optimal_product: Vec<Vec<Option<f64>>> = vec![Vec::new(); n];
    let mut backpointers: Vec<Vec<Option<Match>>> = vec![Vec::new(); n];

    let mut max_l = 0;
    let mut optimal_l = 0;
    let mut optimal_score = f64::INFINITY;

    for k in 0..n {
        optimal_score = f64::INFINITY;

        for prev_l in 0..=max_l {
            // for each new k, the starting scenario to beat is a bruteforce
            // match involving the lowest possible l. three cases:
            //
            // 1. an all-bruteforce match (for length-1 sequences)
            // 2. extending a previous bruteforce match
            //    (when optimal[k-1][l] ends in one)
            // 3. starting a new single-char bruteforce match
            //    (when optimal[k-1][l] exists but does not end in one)
            let bruteforce_plan = if prev_l == 0 {
                Some((0, 1))
            } else if k == 0 {
                None
            } else {
                match backpointers[k - 1].get(prev_l).and_then(Option::as_ref) {
                    Some(last) if last.is_bruteforce() => Some((last.i, prev_l)),
                    Some(_) => Some((k, prev_l + 1)),
                    None => None,
                }
            };
            if let Some((bf_i, new_l)) = bruteforce_plan {
                let prev_product = if new_l > 1 {
                    bf_i.checked_sub(1)
                        .and_then(|prev_j| optimal_product[prev_j].get(new_l - 1).copied())
                        .flatten()
                } else {
                    Some(1.0)
                };
                if let Some(prev_product) = prev_product {
                    let mut bf_match = make_bruteforce_match(&password_chars, bf_i, k);
                    let candidate_product =
                        estimate_guesses(&mut bf_match, password) * prev_product;
                    let candidate_score = score(candidate_product, new_l, exclude_additive);
                    if candidate_score < optimal_score {
                        optimal_score = candidate_score;
                        insert_at(&mut optimal_product[k], new_l, candidate_product);
                        insert_at(&mut backpointers[k], new_l, bf_match);
                        optimal_l = new_l;
                        max_l = max_l.max(new_l);
                    }
                }
            }

            // now try beating the bruteforce scenarios: for each match m
            // ending at k, see if a length-(prev_l + 1) sequence ending in m
            // is better than the current optimum.
            for idx in 0..matches.len() {
                if matches[idx].j != k {
                    continue;
                }
                let i = matches[idx].i;
                let prev_product = if prev_l == 0 {
                    // a length-1 sequence must cover [0..k] entirely
                    if i != 0 {
                        continue;
                    }
                    1.0
                } else {
                    // requires an optimal length-prev_l sequence ending at i-1
                    if i == 0 {
                        continue;
                    }
                    match optimal_product[i - 1].get(prev_l).copied().flatten() {
                        Some(product) => product,
                        None => continue,
                    }
                };
                let candidate_product =
                    estimate_guesses(&mut matches[idx], password) * prev_product;
                let candidate_score = score(candidate_product, prev_l + 1, exclude_additive);
                if candidate_score < optimal_score {
                    optimal_score = candidate_score;
                    insert_at(&mut optimal_product[k], prev_l + 1, candidate_product);
                    insert_at(&mut backpointers[k], prev_l + 1, matches[idx].clone());
                    optimal_l = prev_l + 1;
                    max_l = max_l.max(prev_l + 1);
                }
            }
        }
    }

    // walk backwards and decode the optimal sequence
    let mut sequence = Vec::new();
    if n > 0 {
        let mut l = optimal_l;
        let mut k = n as isize - 1;
        while k >= 0 {
            let m = match backpointers[k as usize].get(l).and_then(Option::as_ref) {
                Some(m) => m.clone(),
                None => break,
            };
            k = m.i as isize - 1;
            l = l.saturating_sub(1);
            sequence.push(m);
        }
        sequence.reverse();
    }

    // corner: the empty password costs a single guess
    let guesses = if n == 0 { 1.0 } else { optimal_score };

    GuessCalculation {
        guesses,
        guesses_log10: guesses.log10(),
        sequence,
    }
}

fn score(guess_product: f64, sequence_length: usize, exclude_additive: bool) -> f64 {
    let mut result = factorial(sequence_length) * guess_product;
    if !exclude_additive {
        result += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi(sequence_length as i32 - 1);
    }
    result
}

fn make_bruteforce_match(password_chars: &[char], i: usize, j: usize) -> Match {
    Match {
        pattern: MatchPattern::Bruteforce,
        token: password_chars[i..=j].iter().collect(),
        i,
        j,
        guesses: None,
    }
}

fn insert_at<T>(row: &mut Vec<Option<T>>, index: usize, value: T) {
    if row.len() <= index {
        row.resize_with(index + 1, || None);
    }
    row[index] = Some(value);
}

fn factorial(n: usize) -> f64 {
    // unoptimized, called only on small n
    (2..=n).fold(1.0, |acc, x| acc * x as f64)
}

pub(crate) fn estimate_guesses(m: &mut Match, password: &str) -> f64 {
    if let Some(guesses) = m.guesses {
        // a match's guess estimate doesn't change. cache it.
        return guesses;
    }
    let token_len = m.token.chars().count();
    let min_guesses = if token_len < password.chars().count() {
        if token_len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };
    let guesses = match m.pattern {
        MatchPattern::Bruteforce => bruteforce_guesses(&m.token),
        MatchPattern::Dictionary(ref mut p) => p.estimate(&m.token),
        MatchPattern::Spatial(ref mut p) => p.estimate(&m.token),
        MatchPattern::Repeat(ref mut p) => p.estimate(&m.token),
        MatchPattern::Sequence(ref mut p) => p.estimate(&m.token),
        MatchPattern::Regex(ref mut p) => p.estimate(&m.token),
        MatchPattern::Date(ref mut p) => p.estimate(&m.token),
    };
    let guesses = guesses.max(min_guesses);
    m.guesses = Some(guesses);
    guesses
}

trait Estimator {
    fn estimate(&mut self, token: &str) -> f64;
}

fn bruteforce_guesses(token: &str) -> f64 {
    let len = token.chars().count();
    let guesses = BRUTEFORCE_CARDINALITY.powi(len as i32);
    // small detail: make bruteforce matches at minimum one guess bigger than
    // the smallest allowed submatch guesses, such that non-bruteforce
    // submatches over the same [i..j] take precedence.
    let min_guesses = if len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    guesses.max(min_guesses)
}

impl Estimator for DictionaryPattern {
    fn estimate(&mut self, token: &str) -> f64 {
        let base_guesses = self.rank as f64;
        let uppercase = uppercase_variations(token);
        let l33t = l33t_variations(self, token);
        self.base_guesses = Some(base_guesses);
        self.uppercase_variations = Some(uppercase);
        self.l33t_variations = Some(l33t);
        base_guesses * uppercase * l33t * if self.reversed { 2.0 } else { 1.0 }
    }
}

lazy_static! {
    pub(crate) static ref START_UPPER: Regex = Regex::new(r"^[A-Z][^A-Z]+$").unwrap();
    static ref END_UPPER: Regex = Regex::new(r"^[^A-Z]+[A-Z]$").unwrap();
    pub(crate) static ref ALL_UPPER: Regex = Regex::new(r"^[^a-z]+$").unwrap();
    static ref ALL_LOWER: Regex = Regex::new(r"^[^A-Z]+$").unwrap();
}

fn uppercase_variations(token: &str) -> f64 {
    if token.is_empty() || ALL_LOWER.is_match(token) {
        return 1.0;
    }
    // a capitalized word is the most common capitalization scheme,
    // so it only doubles the search space (uncapitalized + capitalized).
    // allcaps and end-capitalized are common enough too, underestimate as 2x
    // factor to be safe.
    for regex in [&*START_UPPER, &*END_UPPER, &*ALL_UPPER] {
        if regex.is_match(token) {
            return 2.0;
        }
    }
    // otherwise calculate the number of ways to capitalize U+L
    // uppercase+lowercase letters with U uppercase letters or less. or, if
    // there's more uppercase than lower (for eg. PASSwORD), the number of
    // ways to lowercase U+L letters with L lowercase letters or less.
    let upper = token.chars().filter(|c| c.is_ascii_uppercase()).count();
    let lower = token.chars().filter(|c| c.is_ascii_lowercase()).count();
    (1..=upper.min(lower))
        .map(|i| n_ck(upper + lower, i) as f64)
        .sum()
}

fn l33t_variations(pattern: &DictionaryPattern, token: &str) -> f64 {
    if !pattern.l33t {
        return 1.0;
    }
    let mut variations = 1.0;
    // lower-case the token before counting: capitalization shouldn't affect
    // the l33t calc.
    let token = token.to_lowercase();
    if let Some(sub) = &pattern.sub {
        for (&subbed, &unsubbed) in sub {
            let num_subbed = token.chars().filter(|&c| c == subbed).count();
            let num_unsubbed = token.chars().filter(|&c| c == unsubbed).count();
            if num_subbed == 0 || num_unsubbed == 0 {
                // for this sub, the token is either fully subbed (444) or
                // fully unsubbed (aaa). treat that as doubling the space
                // (attacker needs to try fully subbed chars in addition to
                // unsubbed.)
                variations *= 2.0;
            } else {
                // this case is similar to capitalization:
                // with aa44a, U = 3, S = 2, attacker needs to try unsubbed +
                // one sub + two subs
                let p = num_subbed.min(num_unsubbed);
                let possibilities: f64 = (1..=p)
                    .map(|i| n_ck(num_subbed + num_unsubbed, i) as f64)
                    .sum();
                variations *= possibilities;
            }
        }
    }
    variations
}

fn n_ck(n: usize, k: usize) -> u64 {
    // http://blog.plover.com/math/choose.html
    (if k > n {
        0
    } else if k == 0 {
        1
    } else {
        let mut r: usize = 1;
        let mut n = n;
        for d in 1..(k + 1) {
            r = match r.checked_mul(n) {
                Some(res) => res,
                None => {
                    return u64::MAX;
                }
            };
            r /= d;
            n -= 1;
        }
        r
    }) as u64
}

lazy_static! {
    static ref KEYBOARD_AVERAGE_DEGREE: usize = calc_average_degree(&adjacency_graphs::QWERTY);
    // slightly different for keypad/mac keypad, but close enough
    static ref KEYPAD_AVERAGE_DEGREE: usize = calc_average_degree(&adjacency_graphs::KEYPAD);
    static ref KEYBOARD_STARTING_POSITIONS: usize = adjacency_graphs::QWERTY.len();
    static ref KEYPAD_STARTING_POSITIONS: usize = adjacency_graphs::KEYPAD.len();
}

fn calc_average_degree(graph: &adjacency_graphs::AdjacencyGraph) -> usize {
    let sum: usize = graph
        .values()
        .map(|neighbors| neighbors.iter().filter(|n| n.is_some()).count())
        .sum();
    sum / graph.len()
}

impl Estimator for SpatialPattern {
    fn estimate(&mut self, token: &str) -> f64 {
        let (starts, degree) = if self.graph == "qwerty" || self.graph == "dvorak" {
            (*KEYBOARD_STARTING_POSITIONS, *KEYBOARD_AVERAGE_DEGREE)
        } else {
            (*KEYPAD_STARTING_POSITIONS, *KEYPAD_AVERAGE_DEGREE)
        };
        let mut guesses = 0.0;
        let len = token.chars().count();
        // estimate the number of possible patterns w/ length L or less with
        // t turns or less.
        for i in 2..=len {
            let possible_turns = self.turns.min(i - 1);
            for j in 1..=possible_turns {
                guesses +=
                    n_ck(i - 1, j - 1) as f64 * starts as f64 * (degree as f64).powi(j as i32);
            }
        }
        // add extra guesses for shifted keys. (% instead of 5, A instead of
        // a.) math is similar to extra guesses of l33t substitutions in
        // dictionary matches.
        if self.shifted_count > 0 {
            let shifted = self.shifted_count;
            let unshifted = len.saturating_sub(shifted);
            if unshifted == 0 {
                guesses *= 2.0;
            } else {
                let shifted_variations: f64 = (1..=shifted.min(unshifted))
                    .map(|i| n_ck(shifted + unshifted, i) as f64)
                    .sum();
                guesses *= shifted_variations;
            }
        }
        guesses
    }
}

impl Estimator for RepeatPattern {
    fn estimate(&mut self, _token: &str) -> f64 {
        self.base_guesses * self.repeat_count as f64
    }
}

impl Estimator for SequencePattern {
    fn estimate(&mut self, token: &str) -> f64 {
        let first_chr = token.chars().next();
        // lower guesses for obvious starting points
        let mut base_guesses = match first_chr {
            Some(c) if ['a', 'A', 'z', 'Z', '0', '1', '9'].contains(&c) => 4.0,
            Some(c) if c.is_ascii_digit() => 10.0,
            // could give a higher base for uppercase; assigning 26 to both
            // upper and lower sequences is more conservative.
            _ => 26.0,
        };
        if !self.ascending {
            // need to try a descending sequence in addition to every
            // ascending sequence -> 2x guesses
            base_guesses *= 2.0;
        }
        base_guesses * token.chars().count() as f64
    }
}

lazy_static! {
    static ref CHAR_CLASS_BASES: HashMap<&'static str, f64> = {
        let mut table = HashMap::with_capacity(6);
        table.insert("alpha_lower", 26.0);
        table.insert("alpha_upper", 26.0);
        table.insert("alpha", 52.0);
        table.insert("alphanumeric", 62.0);
        table.insert("digits", 10.0);
        table.insert("symbols", 33.0);
        table
    };
}

impl Estimator for RegexPattern {
    fn estimate(&mut self, token: &str) -> f64 {
        if let Some(base) = CHAR_CLASS_BASES.get(self.regex_name) {
            base.powi(token.chars().count() as i32)
        } else if self.regex_name == "recent_year" {
            // conservative estimate of year space: num years from
            // REFERENCE_YEAR. if the year is close to REFERENCE_YEAR, assume
            // a year space of MIN_YEAR_SPACE.
            let year = self
                .regex_match
                .first()
                .and_then(|s| s.parse::<i32>().ok())
                .unwrap_or(REFERENCE_YEAR);
            (year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE) as f64
        } else {
            unreachable!();
        }
    }
}

impl Estimator for DatePattern {
    fn estimate(&mut self, _token: &str) -> f64 {
        // base guesses: (year distance from REFERENCE_YEAR) * num_days *
        // num_months
        let year_space = (self.year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE) as f64;
        let mut guesses = year_space * 31.0 * 12.0;
        // double for four-digit years
        if self.has_full_year {
            guesses *= 2.0;
        }
        // add factor of 4 for separator selection (one of ~4 choices)
        if !self.separator.is_empty() {
            guesses *= 4.0;
        }
        guesses
    }
}
