//! Ranked frequency dictionaries.
//!
//! Each list ships as plain text under `data/`, one lowercase word per line,
//! ordered by decreasing frequency. Ranks are 1-based in list order.

use std::collections::HashMap;

pub(crate) type RankedDict = HashMap<String, usize>;

lazy_static! {
    pub(crate) static ref RANKED_DICTIONARIES: Vec<(&'static str, RankedDict)> = vec![
        ("passwords", parse_frequency_list(include_str!("../data/passwords.txt"))),
        ("english", parse_frequency_list(include_str!("../data/english.txt"))),
        ("surnames", parse_frequency_list(include_str!("../data/surnames.txt"))),
        ("male_names", parse_frequency_list(include_str!("../data/male_names.txt"))),
        ("female_names", parse_frequency_list(include_str!("../data/female_names.txt"))),
    ];
}

fn parse_frequency_list(data: &str) -> RankedDict {
    build_ranked_dict(data.lines().map(str::to_owned))
}

/// Ranks words 1-based in iteration order. First occurrence wins.
pub(crate) fn build_ranked_dict<I>(ordered_words: I) -> RankedDict
where
    I: IntoIterator<Item = String>,
{
    let mut ranked = RankedDict::new();
    for (idx, word) in ordered_words.into_iter().enumerate() {
        ranked.entry(word).or_insert(idx + 1);
    }
    ranked
}
