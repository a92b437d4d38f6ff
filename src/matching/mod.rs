//! The pattern matchers.
//!
//! Each matcher independently scans the full password and emits candidate
//! [`Match`]es with exact spans; overlaps across matchers are expected and
//! resolved later by the scorer. Spans are indexed in Unicode scalar values.

use std::collections::{BTreeMap, HashMap};

use fancy_regex::Regex as FancyRegex;
use itertools::Itertools;
use regex::Regex;

use crate::adjacency_graphs::{self, AdjacencyGraph};
use crate::frequency_lists::{self, RankedDict};
use crate::scoring;

pub mod patterns;
pub use self::patterns::{
    DatePattern, DictionaryPattern, Match, MatchPattern, RegexPattern, RepeatPattern,
    SequencePattern, SpatialPattern,
};

const DATE_MAX_YEAR: i32 = 2050;
const DATE_MIN_YEAR: i32 = 1000;

const SEQUENCES: [(&str, &str); 3] = [
    ("lower", "abcdefghijklmnopqrstuvwxyz"),
    ("upper", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("digits", "0123456789"),
];

const SHIFTED_CHARS: &str = "~!@#$%^&*()_+QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?";

lazy_static! {
    static ref L33T_TABLE: BTreeMap<char, Vec<char>> = [
        ('a', vec!['4', '@']),
        ('b', vec!['8']),
        ('c', vec!['(', '{', '[', '<']),
        ('e', vec!['3']),
        ('g', vec!['6', '9']),
        ('i', vec!['1', '!', '|']),
        ('l', vec!['1', '|', '7']),
        ('o', vec!['0']),
        ('s', vec!['$', '5']),
        ('t', vec!['+', '7']),
        ('x', vec!['%']),
        ('z', vec!['2']),
    ]
    .into_iter()
    .collect();
    static ref REGEXEN: Vec<(&'static str, Regex)> = vec![
        ("alphanumeric", Regex::new("[a-zA-Z0-9]{2,}").unwrap()),
        ("alpha", Regex::new("[a-zA-Z]{2,}").unwrap()),
        ("alpha_lower", Regex::new("[a-z]{2,}").unwrap()),
        ("alpha_upper", Regex::new("[A-Z]{2,}").unwrap()),
        ("digits", Regex::new(r"\d{2,}").unwrap()),
        ("symbols", Regex::new(r"[\W_]{2,}").unwrap()),
        ("recent_year", Regex::new(r"19\d\d|200\d|201\d").unwrap()),
    ];
    static ref REPEAT_GREEDY: FancyRegex = FancyRegex::new(r"(.+)\1+").unwrap();
    static ref REPEAT_LAZY: FancyRegex = FancyRegex::new(r"(.+?)\1+").unwrap();
    static ref REPEAT_LAZY_ANCHORED: FancyRegex = FancyRegex::new(r"^(.+?)\1+$").unwrap();
    static ref DATE_WITH_SEPARATOR: FancyRegex =
        FancyRegex::new(r"^(\d{1,4})([\s/\\_.-])(\d{1,2})\2(\d{1,4})$").unwrap();
    static ref MATCHERS: [Box<dyn Matcher>; 8] = [
        Box::new(DictionaryMatch {}),
        Box::new(ReverseDictionaryMatch {}),
        Box::new(L33tMatch {}),
        Box::new(SpatialMatch {}),
        Box::new(RepeatMatch {}),
        Box::new(SequenceMatch {}),
        Box::new(RegexMatch {}),
        Box::new(DateMatch {}),
    ];
}

/// Runs every matcher and returns the combined candidates, sorted by span.
pub(crate) fn omnimatch(password: &str, user_inputs: &RankedDict) -> Vec<Match> {
    let mut matches: Vec<Match> = MATCHERS
        .iter()
        .flat_map(|matcher| matcher.get_matches(password, user_inputs))
        .collect();
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

trait Matcher: Sync + Send {
    fn get_matches(&self, password: &str, user_inputs: &RankedDict) -> Vec<Match>;
}

struct DictionaryMatch {}

impl Matcher for DictionaryMatch {
    fn get_matches(&self, password: &str, user_inputs: &RankedDict) -> Vec<Match> {
        dictionary_match(password, &default_dictionaries(user_inputs))
    }
}

struct ReverseDictionaryMatch {}

impl Matcher for ReverseDictionaryMatch {
    fn get_matches(&self, password: &str, user_inputs: &RankedDict) -> Vec<Match> {
        reverse_dictionary_match(password, &default_dictionaries(user_inputs))
    }
}

struct L33tMatch {}

impl Matcher for L33tMatch {
    fn get_matches(&self, password: &str, user_inputs: &RankedDict) -> Vec<Match> {
        l33t_match(password, &default_dictionaries(user_inputs), &L33T_TABLE)
    }
}

struct SpatialMatch {}

impl Matcher for SpatialMatch {
    fn get_matches(&self, password: &str, _user_inputs: &RankedDict) -> Vec<Match> {
        spatial_match(password)
    }
}

struct RepeatMatch {}

impl Matcher for RepeatMatch {
    fn get_matches(&self, password: &str, user_inputs: &RankedDict) -> Vec<Match> {
        repeat_match(password, user_inputs)
    }
}

struct SequenceMatch {}

impl Matcher for SequenceMatch {
    fn get_matches(&self, password: &str, _user_inputs: &RankedDict) -> Vec<Match> {
        sequence_match(password)
    }
}

struct RegexMatch {}

impl Matcher for RegexMatch {
    fn get_matches(&self, password: &str, _user_inputs: &RankedDict) -> Vec<Match> {
        regex_match(password)
    }
}

struct DateMatch {}

impl Matcher for DateMatch {
    fn get_matches(&self, password: &str, _user_inputs: &RankedDict) -> Vec<Match> {
        date_match(password)
    }
}

/// The five built-in dictionaries plus the per-call user-input dictionary.
fn default_dictionaries(user_inputs: &RankedDict) -> Vec<(&'static str, &RankedDict)> {
    let mut dicts: Vec<(&'static str, &RankedDict)> = frequency_lists::RANKED_DICTIONARIES
        .iter()
        .map(|(name, dict)| (*name, dict))
        .collect();
    dicts.push(("user_inputs", user_inputs));
    dicts
}

fn lower_chars(chars: &[char]) -> Vec<char> {
    // per-scalar lowercasing keeps indices aligned with the original
    chars
        .iter()
        .map(|&c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn char_index(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].chars().count()
}

fn modulo(n: isize, m: isize) -> isize {
    ((n % m) + m) % m
}

// #########################################################
// dictionary matching, forward and reversed
// #########################################################

fn dictionary_match(password: &str, dictionaries: &[(&'static str, &RankedDict)]) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let lower = lower_chars(&chars);
    let mut matches = Vec::new();

    for &(dictionary_name, ranked_dict) in dictionaries {
        for i in 0..chars.len() {
            for j in i..chars.len() {
                let word: String = lower[i..=j].iter().collect();
                if let Some(&rank) = ranked_dict.get(&word) {
                    matches.push(Match {
                        pattern: MatchPattern::Dictionary(DictionaryPattern {
                            matched_word: word,
                            rank,
                            dictionary_name,
                            ..DictionaryPattern::default()
                        }),
                        i,
                        j,
                        token: chars[i..=j].iter().collect(),
                        guesses: None,
                    });
                }
            }
        }
    }

    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

fn reverse_dictionary_match(
    password: &str,
    dictionaries: &[(&'static str, &RankedDict)],
) -> Vec<Match> {
    let reversed: String = password.chars().rev().collect();
    let n = password.chars().count();
    let mut matches = dictionary_match(&reversed, dictionaries);
    for m in &mut matches {
        m.token = m.token.chars().rev().collect();
        let (i, j) = (n - 1 - m.j, n - 1 - m.i);
        m.i = i;
        m.j = j;
        if let MatchPattern::Dictionary(ref mut p) = m.pattern {
            p.reversed = true;
        }
    }
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

// #########################################################
// dictionary matching with common l33t substitutions
// #########################################################

/// Drops table entries whose substitutes don't appear in the password.
fn relevant_l33t_subtable(
    password: &str,
    table: &BTreeMap<char, Vec<char>>,
) -> BTreeMap<char, Vec<char>> {
    let mut subtable = BTreeMap::new();
    for (&letter, subs) in table {
        let relevant: Vec<char> = subs
            .iter()
            .copied()
            .filter(|&sub| password.contains(sub))
            .collect();
        if !relevant.is_empty() {
            subtable.insert(letter, relevant);
        }
    }
    subtable
}

/// Enumerates the substitution sets a password might be employing. Each set
/// maps a substitute character back to at most one letter; conflicting
/// substitutes branch into keep/replace alternatives, and sets are deduped
/// by their canonical sorted form.
fn enumerate_l33t_subs(table: &BTreeMap<char, Vec<char>>) -> Vec<BTreeMap<char, char>> {
    let mut subs: Vec<Vec<(char, char)>> = vec![Vec::new()];

    for (&letter, l33t_chars) in table {
        let mut next_subs: Vec<Vec<(char, char)>> = Vec::new();
        for &l33t_chr in l33t_chars {
            for sub in &subs {
                match sub.iter().position(|&(s, _)| s == l33t_chr) {
                    None => {
                        let mut extension = sub.clone();
                        extension.push((l33t_chr, letter));
                        next_subs.push(extension);
                    }
                    Some(dup_index) => {
                        let mut alternative = sub.clone();
                        alternative.remove(dup_index);
                        alternative.push((l33t_chr, letter));
                        next_subs.push(sub.clone());
                        next_subs.push(alternative);
                    }
                }
            }
        }
        subs = next_subs
            .into_iter()
            .unique_by(|sub| {
                let mut label = sub.clone();
                label.sort_unstable();
                label
            })
            .collect();
    }

    subs.into_iter()
        .map(|sub| sub.into_iter().collect())
        .collect()
}

fn translate(chars: &[char], sub: &BTreeMap<char, char>) -> String {
    chars
        .iter()
        .map(|c| sub.get(c).copied().unwrap_or(*c))
        .collect()
}

fn l33t_match(
    password: &str,
    dictionaries: &[(&'static str, &RankedDict)],
    table: &BTreeMap<char, Vec<char>>,
) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();

    for sub in enumerate_l33t_subs(&relevant_l33t_subtable(password, table)) {
        if sub.is_empty() {
            break;
        }
        let subbed_password = translate(&chars, &sub);
        for m in dictionary_match(&subbed_password, dictionaries) {
            let pattern = match m.pattern {
                MatchPattern::Dictionary(p) => p,
                _ => continue,
            };
            let token: String = chars[m.i..=m.j].iter().collect();
            if token.to_lowercase() == pattern.matched_word {
                // no substitution actually occurred inside this span
                continue;
            }
            let match_sub: BTreeMap<char, char> = sub
                .iter()
                .filter(|(&subbed, _)| token.contains(subbed))
                .map(|(&subbed, &unsubbed)| (subbed, unsubbed))
                .collect();
            let sub_display = match_sub
                .iter()
                .map(|(subbed, unsubbed)| format!("{} -> {}", subbed, unsubbed))
                .join(", ");
            matches.push(Match {
                pattern: MatchPattern::Dictionary(DictionaryPattern {
                    l33t: true,
                    sub: Some(match_sub),
                    sub_display: Some(sub_display),
                    ..pattern
                }),
                i: m.i,
                j: m.j,
                token,
                guesses: None,
            });
        }
    }

    let mut matches: Vec<Match> = matches
        .into_iter()
        .filter(|m| m.token.chars().count() > 1)
        .collect();
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

// #########################################################
// spatial matching (qwerty/dvorak/keypad)
// #########################################################

fn spatial_match(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();
    for &(graph_name, graph) in adjacency_graphs::GRAPHS.iter() {
        matches.extend(spatial_match_helper(&chars, graph, graph_name));
    }
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

fn spatial_match_helper(
    chars: &[char],
    graph: &AdjacencyGraph,
    graph_name: &'static str,
) -> Vec<Match> {
    let mut matches = Vec::new();
    let is_keyboard = graph_name == "qwerty" || graph_name == "dvorak";
    let mut i = 0;
    while i + 1 < chars.len() {
        let mut j = i + 1;
        let mut last_direction: Option<isize> = None;
        let mut turns = 0;
        let mut shifted_count = usize::from(is_keyboard && SHIFTED_CHARS.contains(chars[i]));

        loop {
            let prev_char = chars[j - 1];
            let adjacents = graph.get(&prev_char).map(Vec::as_slice).unwrap_or(&[]);
            let mut found = false;
            // consider growing the pattern by one character if j hasn't gone
            // over the edge
            if j < chars.len() {
                let cur_char = chars[j];
                for (cur_direction, adj) in adjacents.iter().enumerate() {
                    let adj = match adj {
                        Some(adj) => adj,
                        None => continue,
                    };
                    let position = match adj.chars().position(|c| c == cur_char) {
                        Some(position) => position,
                        None => continue,
                    };
                    found = true;
                    if position == 1 {
                        // the shifted occupant of the neighboring key
                        shifted_count += 1;
                    }
                    if last_direction != Some(cur_direction as isize) {
                        turns += 1;
                        last_direction = Some(cur_direction as isize);
                    }
                    break;
                }
            }

            if found {
                j += 1;
            } else {
                if j - i > 2 {
                    matches.push(Match {
                        pattern: MatchPattern::Spatial(SpatialPattern {
                            graph: graph_name,
                            turns,
                            shifted_count,
                        }),
                        i,
                        j: j - 1,
                        token: chars[i..j].iter().collect(),
                        guesses: None,
                    });
                }
                i = j;
                break;
            }
        }
    }
    matches
}

// #########################################################
// repeats (aaa, abcabcabc)
// #########################################################

fn repeat_match(password: &str, user_inputs: &RankedDict) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();
    let mut last_index = 0;

    while last_index < chars.len() {
        let remaining: String = chars[last_index..].iter().collect();
        let greedy_caps = match REPEAT_GREEDY.captures(&remaining) {
            Ok(Some(caps)) => caps,
            _ => break,
        };
        let lazy_caps = match REPEAT_LAZY.captures(&remaining) {
            Ok(Some(caps)) => caps,
            _ => break,
        };
        let greedy_full = greedy_caps.get(0).unwrap();
        let lazy_full = lazy_caps.get(0).unwrap();

        let (full, base_token) = if greedy_full.as_str().chars().count()
            > lazy_full.as_str().chars().count()
        {
            // greedy beats lazy for e.g. 'aabaab': the greedy match is the
            // whole string, and the minimal repeating unit is recovered by an
            // anchored lazy re-match on it
            let base = match REPEAT_LAZY_ANCHORED.captures(greedy_full.as_str()) {
                Ok(Some(caps)) => caps
                    .get(1)
                    .map(|g| g.as_str().to_string())
                    .unwrap_or_default(),
                _ => greedy_full.as_str().to_string(),
            };
            (greedy_full, base)
        } else {
            // lazy beats greedy for e.g. 'aaaaa': the lazy capture is already
            // the minimal repeating unit
            let base = lazy_caps
                .get(1)
                .map(|g| g.as_str().to_string())
                .unwrap_or_default();
            (lazy_full, base)
        };
        if base_token.is_empty() {
            break;
        }

        let i = last_index + char_index(&remaining, full.start());
        let token: String = full.as_str().to_string();
        let token_len = token.chars().count();
        let j = i + token_len - 1;

        // run the full pipeline on the repeating unit to price the repeat
        let base_analysis = scoring::most_guessable_match_sequence(
            &base_token,
            &omnimatch(&base_token, user_inputs),
            false,
        );
        let repeat_count = token_len / base_token.chars().count();
        matches.push(Match {
            pattern: MatchPattern::Repeat(RepeatPattern {
                base_token,
                base_guesses: base_analysis.guesses,
                repeat_count,
            }),
            i,
            j,
            token,
            guesses: None,
        });
        last_index = j + 1;
    }
    matches
}

// #########################################################
// sequences (abcdef, 54321)
// #########################################################

fn sequence_match(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();

    for &(sequence_name, sequence) in &SEQUENCES {
        let alphabet: Vec<char> = sequence.chars().collect();
        for direction in [1isize, -1] {
            let mut i = 0;
            while i < chars.len() {
                let start_position = match alphabet.iter().position(|&c| c == chars[i]) {
                    Some(position) => position,
                    None => {
                        i += 1;
                        continue;
                    }
                };
                let mut j = i + 1;
                let mut sequence_position = start_position as isize;
                while j < chars.len() {
                    // the walk wraps around the alphabet, so xyzab still counts
                    let next_position =
                        modulo(sequence_position + direction, alphabet.len() as isize);
                    let found = alphabet
                        .iter()
                        .position(|&c| c == chars[j])
                        .map(|p| p as isize);
                    if found != Some(next_position) {
                        break;
                    }
                    j += 1;
                    sequence_position = next_position;
                }
                j -= 1;
                if j - i + 1 > 1 {
                    matches.push(Match {
                        pattern: MatchPattern::Sequence(SequencePattern {
                            sequence_name,
                            sequence_space: alphabet.len(),
                            ascending: direction == 1,
                        }),
                        i,
                        j,
                        token: chars[i..=j].iter().collect(),
                        guesses: None,
                    });
                }
                i = j + 1;
            }
        }
    }

    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

// #########################################################
// regex matching
// #########################################################

fn regex_precedence(regex_name: &str) -> i32 {
    match regex_name {
        "alphanumeric" => 0,
        "alpha" => 1,
        "alpha_lower" | "alpha_upper" | "digits" | "symbols" => 2,
        "recent_year" => 3,
        _ => -1,
    }
}

fn regex_match(password: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    for &(regex_name, ref regex) in REGEXEN.iter() {
        for rx_match in regex.find_iter(password) {
            let token = rx_match.as_str().to_string();
            let i = char_index(password, rx_match.start());
            let j = i + token.chars().count() - 1;
            matches.push(Match {
                pattern: MatchPattern::Regex(RegexPattern {
                    regex_name,
                    regex_match: vec![token.clone()],
                }),
                i,
                j,
                token,
                guesses: None,
            });
        }
    }

    // when several classes cover the same span, keep only the most specific
    let name_of = |m: &Match| match &m.pattern {
        MatchPattern::Regex(p) => p.regex_name,
        _ => "",
    };
    let mut highest: HashMap<(usize, usize), i32> = HashMap::new();
    for m in &matches {
        let precedence = regex_precedence(name_of(m));
        let entry = highest.entry((m.i, m.j)).or_insert(precedence);
        if *entry < precedence {
            *entry = precedence;
        }
    }
    let mut matches: Vec<Match> = matches
        .into_iter()
        .filter(|m| highest[&(m.i, m.j)] == regex_precedence(name_of(m)))
        .collect();
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

// #########################################################
// date matching
// #########################################################

struct Dmy {
    year: i32,
    month: i32,
    day: i32,
    has_full_year: bool,
}

/// Split points for no-separator dates, by token length. Each entry cuts the
/// token into three integer fields at the two given offsets.
fn date_splits(token_len: usize) -> &'static [(usize, usize)] {
    match token_len {
        4 => &[(1, 2), (2, 3)],         // 1 1 91 / 91 1 1
        5 => &[(1, 3), (2, 3)],         // 1 11 91 / 11 1 91
        6 => &[(1, 2), (2, 4), (4, 5)], // 1 1 1991 / 11 11 91 / 1991 1 1
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)], // 11 11 1991 / 1991 11 11
        _ => &[],
    }
}

fn to_int(digits: &str) -> i32 {
    digits.parse().unwrap_or(0)
}

fn date_match(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    let mut matches = Vec::new();

    // dates without separators are between length 4 '1985' and 8 '29051985'
    for i in 0..n.saturating_sub(3) {
        for j in (i + 3)..(i + 8) {
            if j >= n {
                break;
            }
            let token_chars = &chars[i..=j];
            if !token_chars.iter().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let token: String = token_chars.iter().collect();

            let candidates: Vec<Dmy> = date_splits(token.len())
                .iter()
                .filter_map(|&(k, l)| {
                    map_ints_to_dmy(&[
                        to_int(&token[..k]),
                        to_int(&token[k..l]),
                        to_int(&token[l..]),
                    ])
                })
                .collect();
            if candidates.is_empty() {
                continue;
            }

            // among the valid interpretations, pick the one whose year is
            // closest to REFERENCE_YEAR; ties go to the first in split order
            let mut best = &candidates[0];
            for candidate in &candidates[1..] {
                if (candidate.year - scoring::REFERENCE_YEAR).abs()
                    < (best.year - scoring::REFERENCE_YEAR).abs()
                {
                    best = candidate;
                }
            }
            matches.push(date_match_at(best, i, j, token, String::new()));
        }
    }

    // dates with separators are between length 6 '5/9/91' and 10 '05/29/1985'
    for i in 0..n.saturating_sub(5) {
        for j in (i + 5)..(i + 10) {
            if j >= n {
                break;
            }
            let token: String = chars[i..=j].iter().collect();
            let caps = match DATE_WITH_SEPARATOR.captures(&token) {
                Ok(Some(caps)) => caps,
                _ => continue,
            };
            let field = |idx: usize| caps.get(idx).map(|g| g.as_str()).unwrap_or("");
            let dmy = match map_ints_to_dmy(&[
                to_int(field(1)),
                to_int(field(3)),
                to_int(field(4)),
            ]) {
                Some(dmy) => dmy,
                None => continue,
            };
            let separator = field(2).to_string();
            matches.push(date_match_at(&dmy, i, j, token, separator));
        }
    }

    // a date strictly contained inside another is noise from the window scan
    let filtered: Vec<Match> = matches
        .iter()
        .enumerate()
        .filter(|(idx, m)| {
            !matches
                .iter()
                .enumerate()
                .any(|(other_idx, other)| other_idx != *idx && other.i <= m.i && other.j >= m.j)
        })
        .map(|(_, m)| m.clone())
        .collect();
    let mut matches = filtered;
    matches.sort_by_key(|m| (m.i, m.j));
    matches
}

fn date_match_at(dmy: &Dmy, i: usize, j: usize, token: String, separator: String) -> Match {
    Match {
        pattern: MatchPattern::Date(DatePattern {
            separator,
            year: dmy.year,
            month: dmy.month as u8,
            day: dmy.day as u8,
            has_full_year: dmy.has_full_year,
        }),
        i,
        j,
        token,
        guesses: None,
    }
}

fn map_ints_to_dmy(ints: &[i32; 3]) -> Option<Dmy> {
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }
    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let possible_year_splits = [
        (ints[2], [ints[0], ints[1]]), // year last
        (ints[0], [ints[1], ints[2]]), // year first
    ];
    for &(year, rest) in &possible_year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            // one endpoint is already a full year; the other two fields must
            // work as day/month or the whole candidate is rejected
            return map_ints_to_dm(rest).map(|(day, month)| Dmy {
                year,
                month,
                day,
                has_full_year: true,
            });
        }
    }
    for &(year, rest) in &possible_year_splits {
        if let Some((day, month)) = map_ints_to_dm(rest) {
            return Some(Dmy {
                year: two_to_four_digit_year(year),
                month,
                day,
                has_full_year: false,
            });
        }
    }
    None
}

fn map_ints_to_dm(ints: [i32; 2]) -> Option<(i32, i32)> {
    for (day, month) in [(ints[0], ints[1]), (ints[1], ints[0])] {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            return Some((day, month));
        }
    }
    None
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        // 87 -> 1987
        year + scoring::REFERENCE_YEAR - 100
    } else {
        // 15 -> 2015
        year + scoring::REFERENCE_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency_lists::build_ranked_dict;

    fn ranked(words: &[&str]) -> RankedDict {
        build_ranked_dict(words.iter().map(|s| s.to_string()))
    }

    fn dict_pattern(m: &Match) -> &DictionaryPattern {
        match &m.pattern {
            MatchPattern::Dictionary(p) => p,
            other => panic!("expected a dictionary match, got {:?}", other),
        }
    }

    fn spatial_pattern(m: &Match) -> &SpatialPattern {
        match &m.pattern {
            MatchPattern::Spatial(p) => p,
            other => panic!("expected a spatial match, got {:?}", other),
        }
    }

    fn repeat_pattern(m: &Match) -> &RepeatPattern {
        match &m.pattern {
            MatchPattern::Repeat(p) => p,
            other => panic!("expected a repeat match, got {:?}", other),
        }
    }

    fn sequence_pattern(m: &Match) -> &SequencePattern {
        match &m.pattern {
            MatchPattern::Sequence(p) => p,
            other => panic!("expected a sequence match, got {:?}", other),
        }
    }

    fn regex_pattern(m: &Match) -> &RegexPattern {
        match &m.pattern {
            MatchPattern::Regex(p) => p,
            other => panic!("expected a regex match, got {:?}", other),
        }
    }

    fn date_pattern(m: &Match) -> &DatePattern {
        match &m.pattern {
            MatchPattern::Date(p) => p,
            other => panic!("expected a date match, got {:?}", other),
        }
    }

    /// Generates `prefix + pattern + suffix` variants along with the span the
    /// embedded pattern should occupy.
    fn genpws(pattern: &str, prefixes: &[&str], suffixes: &[&str]) -> Vec<(String, usize, usize)> {
        let mut prefixes = prefixes.to_vec();
        let mut suffixes = suffixes.to_vec();
        if !prefixes.contains(&"") {
            prefixes.insert(0, "");
        }
        if !suffixes.contains(&"") {
            suffixes.insert(0, "");
        }
        let mut result = Vec::new();
        for &prefix in &prefixes {
            for &suffix in &suffixes {
                let i = prefix.chars().count();
                let j = i + pattern.chars().count() - 1;
                result.push((format!("{}{}{}", prefix, pattern, suffix), i, j));
            }
        }
        result
    }

    fn test_dicts() -> Vec<(&'static str, RankedDict)> {
        vec![
            ("d1", ranked(&["motherboard", "mother", "board", "abcd", "cdef"])),
            ("d2", ranked(&["z", "8", "99", "$", "asdf1234&*"])),
        ]
    }

    fn dict_refs<'a>(dicts: &'a [(&'static str, RankedDict)]) -> Vec<(&'static str, &'a RankedDict)> {
        dicts.iter().map(|(name, dict)| (*name, dict)).collect()
    }

    #[test]
    fn test_dictionary_matches_words_that_contain_other_words() {
        let dicts = test_dicts();
        let matches = dictionary_match("motherboard", &dict_refs(&dicts));
        let expected = [("mother", 0, 5, 2), ("motherboard", 0, 10, 1), ("board", 6, 10, 3)];
        assert_eq!(matches.len(), expected.len());
        for (m, &(word, i, j, rank)) in matches.iter().zip(&expected) {
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(m.token, word);
            assert_eq!(dict_pattern(m).matched_word, word);
            assert_eq!(dict_pattern(m).rank, rank);
            assert_eq!(dict_pattern(m).dictionary_name, "d1");
        }
    }

    #[test]
    fn test_dictionary_matches_overlapping_words() {
        let dicts = test_dicts();
        let matches = dictionary_match("abcdef", &dict_refs(&dicts));
        let expected = [("abcd", 0, 3, 4), ("cdef", 2, 5, 5)];
        assert_eq!(matches.len(), expected.len());
        for (m, &(word, i, j, rank)) in matches.iter().zip(&expected) {
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(dict_pattern(m).matched_word, word);
            assert_eq!(dict_pattern(m).rank, rank);
        }
    }

    #[test]
    fn test_dictionary_ignores_uppercasing() {
        let dicts = test_dicts();
        let matches = dictionary_match("BoaRdZ", &dict_refs(&dicts));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].token, "BoaRd");
        assert_eq!((matches[0].i, matches[0].j), (0, 4));
        assert_eq!(dict_pattern(&matches[0]).matched_word, "board");
        assert_eq!(dict_pattern(&matches[0]).rank, 3);
        assert_eq!(matches[1].token, "Z");
        assert_eq!((matches[1].i, matches[1].j), (5, 5));
        assert_eq!(dict_pattern(&matches[1]).matched_word, "z");
        assert_eq!(dict_pattern(&matches[1]).dictionary_name, "d2");
    }

    #[test]
    fn test_dictionary_identifies_words_surrounded_by_non_words() {
        let dicts = test_dicts();
        let word = "asdf1234&*";
        for (password, i, j) in genpws(word, &["q", "%%"], &["%", "qq"]) {
            let matches = dictionary_match(&password, &dict_refs(&dicts));
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!((matches[0].i, matches[0].j), (i, j));
            assert_eq!(dict_pattern(&matches[0]).matched_word, word);
            assert_eq!(dict_pattern(&matches[0]).rank, 5);
        }
    }

    #[test]
    fn test_dictionary_matches_against_all_words_in_provided_dictionaries() {
        let dicts = test_dicts();
        for (name, dict) in &dicts {
            for (word, &rank) in dict {
                if word == "motherboard" {
                    continue; // contains other words from the same dictionary
                }
                let matches = dictionary_match(word, &dict_refs(&dicts));
                let m = matches
                    .iter()
                    .find(|m| dict_pattern(m).dictionary_name == *name)
                    .unwrap();
                assert_eq!((m.i, m.j), (0, word.chars().count() - 1));
                assert_eq!(&dict_pattern(m).matched_word, word);
                assert_eq!(dict_pattern(m).rank, rank);
            }
        }
    }

    #[test]
    fn test_dictionary_default_dictionaries() {
        let user_inputs = RankedDict::new();
        let matches = dictionary_match("marysmith", &default_dictionaries(&user_inputs));
        assert_eq!(matches.len(), 2);
        assert_eq!(dict_pattern(&matches[0]).matched_word, "mary");
        assert_eq!(dict_pattern(&matches[0]).dictionary_name, "female_names");
        assert_eq!(dict_pattern(&matches[0]).rank, 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 3));
        assert_eq!(dict_pattern(&matches[1]).matched_word, "smith");
        assert_eq!(dict_pattern(&matches[1]).dictionary_name, "surnames");
        assert_eq!(dict_pattern(&matches[1]).rank, 1);
        assert_eq!((matches[1].i, matches[1].j), (4, 8));
    }

    #[test]
    fn test_dictionary_matches_user_input_dictionary() {
        let user_inputs = ranked(&["foo", "bar"]);
        let matches = dictionary_match("foobar", &default_dictionaries(&user_inputs));
        let matches: Vec<&Match> = matches
            .iter()
            .filter(|m| dict_pattern(m).dictionary_name == "user_inputs")
            .collect();
        assert_eq!(matches.len(), 2);
        assert_eq!(dict_pattern(matches[0]).matched_word, "foo");
        assert_eq!(dict_pattern(matches[0]).rank, 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 2));
        assert_eq!(dict_pattern(matches[1]).matched_word, "bar");
        assert_eq!(dict_pattern(matches[1]).rank, 2);
        assert_eq!((matches[1].i, matches[1].j), (3, 5));
    }

    #[test]
    fn test_reverse_dictionary_match() {
        let dicts = vec![("d1", ranked(&["123", "321", "456", "654"]))];
        let matches = reverse_dictionary_match("0123456789", &dict_refs(&dicts));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].token, "123");
        assert_eq!((matches[0].i, matches[0].j), (1, 3));
        assert_eq!(dict_pattern(&matches[0]).matched_word, "321");
        assert_eq!(dict_pattern(&matches[0]).rank, 2);
        assert!(dict_pattern(&matches[0]).reversed);
        assert_eq!(matches[1].token, "456");
        assert_eq!((matches[1].i, matches[1].j), (4, 6));
        assert_eq!(dict_pattern(&matches[1]).matched_word, "654");
        assert_eq!(dict_pattern(&matches[1]).rank, 4);
        assert!(dict_pattern(&matches[1]).reversed);
    }

    #[test]
    fn test_reverse_dictionary_round_trips_to_forward_indices() {
        let dicts = vec![("d1", ranked(&["123", "321"]))];
        let refs = dict_refs(&dicts);
        let password = "x321y";
        let reversed: String = password.chars().rev().collect();
        let n = password.chars().count();
        let forward = dictionary_match(&reversed, &refs);
        let remapped = reverse_dictionary_match(password, &refs);
        assert_eq!(forward.len(), remapped.len());
        for (f, r) in forward.iter().zip(&remapped) {
            assert_eq!((n - 1 - f.j, n - 1 - f.i), (r.i, r.j));
        }
    }

    fn l33t_test_table() -> BTreeMap<char, Vec<char>> {
        [
            ('a', vec!['4', '@']),
            ('c', vec!['(', '{', '[', '<']),
            ('g', vec!['6', '9']),
            ('o', vec!['0']),
        ]
        .into_iter()
        .collect()
    }

    fn l33t_test_dicts() -> Vec<(&'static str, RankedDict)> {
        vec![
            ("words", ranked(&["aac", "password", "paassword", "asdf0"])),
            ("words2", ranked(&["cgo"])),
        ]
    }

    #[test]
    fn test_relevant_l33t_subtable() {
        let table = l33t_test_table();
        let cases: Vec<(&str, BTreeMap<char, Vec<char>>)> = vec![
            ("", BTreeMap::new()),
            ("abcdefgo123578!#$&*)]}>", BTreeMap::new()),
            ("a", BTreeMap::new()),
            ("4", [('a', vec!['4'])].into_iter().collect()),
            ("4@", [('a', vec!['4', '@'])].into_iter().collect()),
            (
                "4({60",
                [
                    ('a', vec!['4']),
                    ('c', vec!['(', '{']),
                    ('g', vec!['6']),
                    ('o', vec!['0']),
                ]
                .into_iter()
                .collect(),
            ),
        ];
        for (password, expected) in cases {
            assert_eq!(
                relevant_l33t_subtable(password, &table),
                expected,
                "password {:?}",
                password
            );
        }
    }

    #[test]
    fn test_enumerate_l33t_subs() {
        let to_table = |entries: &[(char, &[char])]| -> BTreeMap<char, Vec<char>> {
            entries
                .iter()
                .map(|(letter, subs)| (*letter, subs.to_vec()))
                .collect()
        };
        let to_subs = |entries: &[&[(char, char)]]| -> Vec<BTreeMap<char, char>> {
            entries
                .iter()
                .map(|pairs| pairs.iter().copied().collect())
                .collect()
        };

        assert_eq!(
            enumerate_l33t_subs(&BTreeMap::new()),
            to_subs(&[&[]]),
            "empty table yields the empty substitution exactly once"
        );
        assert_eq!(
            enumerate_l33t_subs(&to_table(&[('a', &['@'])])),
            to_subs(&[&[('@', 'a')]])
        );
        assert_eq!(
            enumerate_l33t_subs(&to_table(&[('a', &['@', '4'])])),
            to_subs(&[&[('@', 'a')], &[('4', 'a')]])
        );
        assert_eq!(
            enumerate_l33t_subs(&to_table(&[('a', &['@', '4']), ('c', &['('])])),
            to_subs(&[&[('@', 'a'), ('(', 'c')], &[('4', 'a'), ('(', 'c')]])
        );
    }

    #[test]
    fn test_l33t_doesnt_match_empty_or_pure_dictionary_words() {
        let dicts = l33t_test_dicts();
        let table = l33t_test_table();
        assert!(l33t_match("", &dict_refs(&dicts), &table).is_empty());
        assert!(l33t_match("password", &dict_refs(&dicts), &table).is_empty());
    }

    #[test]
    fn test_l33t_matches_common_substitutions() {
        let dicts = l33t_test_dicts();
        let table = l33t_test_table();

        let matches = l33t_match("p@ssw0rd", &dict_refs(&dicts), &table);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "p@ssw0rd");
        assert_eq!((matches[0].i, matches[0].j), (0, 7));
        let p = dict_pattern(&matches[0]);
        assert!(p.l33t);
        assert_eq!(p.matched_word, "password");
        assert_eq!(p.rank, 3);
        assert_eq!(p.dictionary_name, "words");
        assert_eq!(
            p.sub,
            Some([('@', 'a'), ('0', 'o')].into_iter().collect())
        );
        assert_eq!(p.sub_display.as_deref(), Some("0 -> o, @ -> a"));

        let matches = l33t_match("aSdfO{G0asDfO", &dict_refs(&dicts), &table);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "{G0");
        assert_eq!((matches[0].i, matches[0].j), (5, 7));
        let p = dict_pattern(&matches[0]);
        assert_eq!(p.matched_word, "cgo");
        assert_eq!(p.rank, 1);
        assert_eq!(p.dictionary_name, "words2");
        assert_eq!(
            p.sub,
            Some([('{', 'c'), ('0', 'o')].into_iter().collect())
        );
    }

    #[test]
    fn test_l33t_matches_overlapping_patterns() {
        let dicts = l33t_test_dicts();
        let table = l33t_test_table();
        let matches = l33t_match("@a(go{G0", &dict_refs(&dicts), &table);
        let expected: Vec<(&str, usize, usize, &str, Vec<(char, char)>)> = vec![
            ("@a(", 0, 2, "aac", vec![('@', 'a'), ('(', 'c')]),
            ("(go", 2, 4, "cgo", vec![('(', 'c')]),
            ("{G0", 5, 7, "cgo", vec![('{', 'c'), ('0', 'o')]),
        ];
        assert_eq!(matches.len(), expected.len());
        for (m, (token, i, j, word, sub)) in matches.iter().zip(expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            let p = dict_pattern(m);
            assert!(p.l33t);
            assert_eq!(p.matched_word, word);
            assert_eq!(p.sub, Some(sub.into_iter().collect()));
        }
    }

    #[test]
    fn test_l33t_doesnt_match_conflicting_substitutions_for_the_same_letter() {
        let dicts = l33t_test_dicts();
        let table = l33t_test_table();
        assert!(l33t_match("p4@ssword", &dict_refs(&dicts), &table).is_empty());
    }

    #[test]
    fn test_l33t_doesnt_match_single_character_words() {
        let user_inputs = RankedDict::new();
        let matches = l33t_match("4 1 @", &default_dictionaries(&user_inputs), &L33T_TABLE);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_spatial_doesnt_match_short_patterns() {
        for password in ["", "/", "qw", "*/"] {
            assert!(
                spatial_match(password).is_empty(),
                "password {:?}",
                password
            );
        }
    }

    #[test]
    fn test_spatial_matches_pattern_surrounded_by_non_pattern() {
        let pattern = "6tfGHJ";
        let password = format!("rz!{}%z:", pattern);
        let chars: Vec<char> = password.chars().collect();
        let matches = spatial_match_helper(&chars, &adjacency_graphs::QWERTY, "qwerty");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, pattern);
        assert_eq!((matches[0].i, matches[0].j), (3, 3 + pattern.len() - 1));
        let p = spatial_pattern(&matches[0]);
        assert_eq!(p.graph, "qwerty");
        assert_eq!(p.turns, 2);
        assert_eq!(p.shifted_count, 3);
    }

    #[test]
    fn test_spatial_matches_across_graphs() {
        let cases: [(&str, &'static str, usize, usize); 14] = [
            ("12345", "qwerty", 1, 0),
            ("@WSX", "qwerty", 1, 4),
            ("6tfGHJ", "qwerty", 2, 3),
            ("hGFd", "qwerty", 1, 2),
            ("/;p09876yhn", "qwerty", 3, 0),
            ("Xdr%", "qwerty", 1, 2),
            ("159-", "keypad", 1, 0),
            ("*84", "keypad", 1, 0),
            ("/8520", "keypad", 1, 0),
            ("369", "keypad", 1, 0),
            ("/963.", "mac_keypad", 1, 0),
            ("*-632.0214", "mac_keypad", 9, 0),
            ("aoEP%yIxkjq:", "dvorak", 4, 5),
            (";qoaOQ:Aoq;a", "dvorak", 11, 4),
        ];
        for (password, graph_name, turns, shifted_count) in cases {
            let graph = adjacency_graphs::GRAPHS
                .iter()
                .find(|(name, _)| *name == graph_name)
                .map(|(_, graph)| *graph)
                .unwrap();
            let chars: Vec<char> = password.chars().collect();
            let matches = spatial_match_helper(&chars, graph, graph_name);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, password);
            assert_eq!((matches[0].i, matches[0].j), (0, chars.len() - 1));
            let p = spatial_pattern(&matches[0]);
            assert_eq!(p.turns, turns, "turns for {:?}", password);
            assert_eq!(
                p.shifted_count, shifted_count,
                "shifted_count for {:?}",
                password
            );
        }
    }

    #[test]
    fn test_sequence_doesnt_match_short_sequences() {
        for password in ["", "a", "1"] {
            assert!(sequence_match(password).is_empty());
        }
    }

    #[test]
    fn test_sequence_matches_overlapping_patterns() {
        let matches = sequence_match("abcbabc");
        let expected = [("abc", 0, 2, true), ("cba", 2, 4, false), ("abc", 4, 6, true)];
        assert_eq!(matches.len(), expected.len());
        for (m, &(token, i, j, ascending)) in matches.iter().zip(&expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(sequence_pattern(m).ascending, ascending);
        }
    }

    #[test]
    fn test_sequence_matches_wrapping_runs() {
        assert_eq!(sequence_match("xyzabc").len(), 1);
        assert_eq!(sequence_match("cbazyx").len(), 1);
    }

    #[test]
    fn test_sequence_matches_embedded_patterns() {
        let pattern = "jihg";
        for (password, i, j) in genpws(pattern, &["!", "22"], &["!", "22"]) {
            let matches = sequence_match(&password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, pattern);
            assert_eq!((matches[0].i, matches[0].j), (i, j));
            let p = sequence_pattern(&matches[0]);
            assert_eq!(p.sequence_name, "lower");
            assert!(!p.ascending);
        }
    }

    #[test]
    fn test_sequence_matches_all_alphabets_and_directions() {
        let cases = [
            ("ABC", "upper", true),
            ("CBA", "upper", false),
            ("PQR", "upper", true),
            ("RQP", "upper", false),
            ("XYZ", "upper", true),
            ("ZYX", "upper", false),
            ("abcd", "lower", true),
            ("dcba", "lower", false),
            ("jihg", "lower", false),
            ("wxyz", "lower", true),
            ("zyxw", "lower", false),
            ("01234", "digits", true),
            ("43210", "digits", false),
            ("67890", "digits", true),
            ("09876", "digits", false),
        ];
        for (password, sequence_name, ascending) in cases {
            let matches = sequence_match(password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, password);
            let p = sequence_pattern(&matches[0]);
            assert_eq!(p.sequence_name, sequence_name);
            assert_eq!(p.ascending, ascending);
        }
    }

    #[test]
    fn test_repeat_doesnt_match_short_repeats() {
        let user_inputs = RankedDict::new();
        for password in ["", "#"] {
            assert!(repeat_match(password, &user_inputs).is_empty());
        }
    }

    #[test]
    fn test_repeat_matches_embedded_repeats() {
        let user_inputs = RankedDict::new();
        let pattern = "&&&&&";
        for (password, i, j) in genpws(pattern, &["@", "y4@"], &["u", "u%7"]) {
            let matches = repeat_match(&password, &user_inputs);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, pattern);
            assert_eq!((matches[0].i, matches[0].j), (i, j));
            assert_eq!(repeat_pattern(&matches[0]).base_token, "&");
        }
    }

    #[test]
    fn test_repeat_matches_single_character_repeats() {
        let user_inputs = RankedDict::new();
        for length in [4, 13] {
            for c in ['a', 'Z', '4', '&'] {
                let password: String = std::iter::repeat(c).take(length).collect();
                let matches = repeat_match(&password, &user_inputs);
                assert_eq!(matches.len(), 1, "password {:?}", password);
                assert_eq!(matches[0].token, password);
                assert_eq!((matches[0].i, matches[0].j), (0, length - 1));
                assert_eq!(repeat_pattern(&matches[0]).base_token, c.to_string());
                assert_eq!(repeat_pattern(&matches[0]).repeat_count, length);
            }
        }
    }

    #[test]
    fn test_repeat_matches_multiple_adjacent_repeats() {
        let user_inputs = RankedDict::new();
        let matches = repeat_match("BBB1111aaaaa@@@@@@", &user_inputs);
        let expected = [
            ("BBB", 0, 2, "B"),
            ("1111", 3, 6, "1"),
            ("aaaaa", 7, 11, "a"),
            ("@@@@@@", 12, 17, "@"),
        ];
        assert_eq!(matches.len(), expected.len());
        for (m, &(token, i, j, base)) in matches.iter().zip(&expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(repeat_pattern(m).base_token, base);
        }
    }

    #[test]
    fn test_repeat_matches_repeats_with_non_repeats_in_between() {
        let user_inputs = RankedDict::new();
        let matches = repeat_match("2818BBBbzsdf1111@*&@!aaaaaEUDA@@@@@@1729", &user_inputs);
        let expected = [
            ("BBB", 4, 6, "B"),
            ("1111", 12, 15, "1"),
            ("aaaaa", 21, 25, "a"),
            ("@@@@@@", 30, 35, "@"),
        ];
        assert_eq!(matches.len(), expected.len());
        for (m, &(token, i, j, base)) in matches.iter().zip(&expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(repeat_pattern(m).base_token, base);
        }
    }

    #[test]
    fn test_repeat_matches_multi_character_repeats() {
        let user_inputs = RankedDict::new();

        let matches = repeat_match("abab", &user_inputs);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 3));
        assert_eq!(repeat_pattern(&matches[0]).base_token, "ab");
        assert_eq!(repeat_pattern(&matches[0]).repeat_count, 2);

        // the greedy match wins here: aabaab is aab twice, not just an aa prefix
        let matches = repeat_match("aabaab", &user_inputs);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 5));
        assert_eq!(repeat_pattern(&matches[0]).base_token, "aab");

        // the lazy match identifies the minimal unit: ab, not abab
        let matches = repeat_match("abababab", &user_inputs);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 7));
        assert_eq!(repeat_pattern(&matches[0]).base_token, "ab");
    }

    #[test]
    fn test_regex_matches_character_classes() {
        let cases = [
            ("aaa", "alpha_lower"),
            ("a7c8D9", "alphanumeric"),
            ("aAaA", "alpha"),
            ("1922", "recent_year"),
            ("&@*#", "symbols"),
            ("94113", "digits"),
        ];
        for (password, regex_name) in cases {
            let matches = regex_match(password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, password);
            assert_eq!(
                (matches[0].i, matches[0].j),
                (0, password.chars().count() - 1)
            );
            assert_eq!(regex_pattern(&matches[0]).regex_name, regex_name);
        }
    }

    #[test]
    fn test_regex_matches_multiple_overlapping_patterns() {
        let matches = regex_match("a7c8D9vvv2015");
        let expected = [
            ("a7c8D9vvv2015", 0, 12, "alphanumeric"),
            ("vvv", 6, 8, "alpha_lower"),
            ("2015", 9, 12, "recent_year"),
        ];
        assert_eq!(matches.len(), expected.len());
        for (m, &(token, i, j, regex_name)) in matches.iter().zip(&expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            assert_eq!(regex_pattern(m).regex_name, regex_name);
        }
    }

    #[test]
    fn test_date_matches_all_separators() {
        for sep in ["", " ", "-", "/", "\\", "_", "."] {
            let password = format!("13{}2{}1921", sep, sep);
            let matches = date_match(&password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(matches[0].token, password);
            let p = date_pattern(&matches[0]);
            assert_eq!(p.separator, sep);
            assert_eq!(p.year, 1921);
            assert_eq!(p.month, 2);
            assert_eq!(p.day, 13);
        }
    }

    #[test]
    fn test_date_matches_all_field_orders() {
        for order in ["mdy", "dmy", "ymd", "ydm"] {
            let password = order.replace('y', "88").replace('m', "8").replace('d', "8");
            let matches = date_match(&password);
            assert_eq!(matches.len(), 1, "order {:?}", order);
            let p = date_pattern(&matches[0]);
            assert_eq!(p.year, 1988);
            assert_eq!(p.month, 8);
            assert_eq!(p.day, 8);
        }
    }

    #[test]
    fn test_date_picks_year_closest_to_reference_year_when_ambiguous() {
        let matches = date_match("111504");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "111504");
        let p = date_pattern(&matches[0]);
        assert_eq!(p.year, 2004); // picked over 11/15/04 read as 1504
        assert_eq!(p.month, 11);
        assert_eq!(p.day, 15);
    }

    #[test]
    fn test_date_matches_various_full_dates() {
        for (day, month, year) in [(1, 1, 1999), (11, 8, 2000), (9, 12, 2005), (22, 11, 1551)] {
            let password = format!("{}{}{}", year, month, day);
            let matches = date_match(&password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(date_pattern(&matches[0]).year, year);
            assert_eq!(date_pattern(&matches[0]).separator, "");

            let password = format!("{}.{}.{}", year, month, day);
            let matches = date_match(&password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!(date_pattern(&matches[0]).year, year);
            assert_eq!(date_pattern(&matches[0]).separator, ".");
        }
    }

    #[test]
    fn test_date_matches_zero_padded_dates() {
        let matches = date_match("02/02/02");
        assert_eq!(matches.len(), 1);
        let p = date_pattern(&matches[0]);
        assert_eq!(p.year, 2002);
        assert_eq!(p.month, 2);
        assert_eq!(p.day, 2);
        assert!(!p.has_full_year);
    }

    #[test]
    fn test_date_matches_embedded_dates() {
        let pattern = "1/1/91";
        for (password, i, j) in genpws(pattern, &["a", "ab"], &["!"]) {
            let matches = date_match(&password);
            assert_eq!(matches.len(), 1, "password {:?}", password);
            assert_eq!((matches[0].i, matches[0].j), (i, j));
            let p = date_pattern(&matches[0]);
            assert_eq!(p.year, 1991);
            assert_eq!(p.month, 1);
            assert_eq!(p.day, 1);
        }
    }

    #[test]
    fn test_date_matches_overlapping_dates() {
        let matches = date_match("12/20/1991.12.20");
        let expected = [("12/20/1991", 0, 9, "/"), ("1991.12.20", 6, 15, ".")];
        assert_eq!(matches.len(), expected.len());
        for (m, &(token, i, j, sep)) in matches.iter().zip(&expected) {
            assert_eq!(m.token, token);
            assert_eq!((m.i, m.j), (i, j));
            let p = date_pattern(m);
            assert_eq!(p.separator, sep);
            assert_eq!(p.year, 1991);
            assert_eq!(p.month, 12);
            assert_eq!(p.day, 20);
            assert!(p.has_full_year);
        }
    }

    #[test]
    fn test_date_matches_dates_padded_by_non_ambiguous_digits() {
        let matches = date_match("912/20/919");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "12/20/91");
        assert_eq!((matches[0].i, matches[0].j), (1, 8));
        let p = date_pattern(&matches[0]);
        assert_eq!(p.separator, "/");
        assert_eq!(p.year, 1991);
        assert_eq!(p.month, 12);
        assert_eq!(p.day, 20);
        assert!(!p.has_full_year);
    }

    #[test]
    fn test_date_boundary_lengths() {
        assert!(date_match("159").is_empty());
        // the no-separator scan never claims more than 8 digits at once
        for m in date_match("1121998241") {
            assert!(m.token.chars().count() <= 8);
        }
    }

    #[test]
    fn test_omnimatch_output_is_sorted_and_in_bounds() {
        let user_inputs = RankedDict::new();
        let password = "p@ssword1991qwert";
        let n = password.chars().count();
        let matches = omnimatch(password, &user_inputs);
        assert!(!matches.is_empty());
        let mut last = (0, 0);
        for m in &matches {
            assert!(m.i <= m.j && m.j < n);
            let token: String = password.chars().skip(m.i).take(m.j - m.i + 1).collect();
            assert_eq!(m.token, token);
            assert!((m.i, m.j) >= last);
            last = (m.i, m.j);
        }
    }
}
