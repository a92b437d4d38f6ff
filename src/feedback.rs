//! Verbal feedback: a warning about the weakest link plus suggestions.

use std::fmt;

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

use crate::matching::patterns::{DictionaryPattern, Match, MatchPattern};
use crate::scoring;

/// Actionable feedback derived from the final decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Feedback {
    warning: Option<Warning>,
    suggestions: Vec<Suggestion>,
}

impl Feedback {
    /// What went wrong with this password, if anything stands out.
    pub fn warning(&self) -> Option<Warning> {
        self.warning
    }

    /// How to do better next time.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }
}

/// A warning about the dominant weakness of the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum Warning {
    StraightRowsOfKeysAreEasyToGuess,
    ShortKeyboardPatternsAreEasyToGuess,
    RepeatsLikeAaaAreEasyToGuess,
    RepeatsLikeAbcabcabcAreOnlySlightlyHarderToGuessThanAbc,
    SequencesLikeAbcAreEasyToGuess,
    RecentYearsAreEasyToGuess,
    DatesAreOftenEasyToGuess,
    ThisIsATop10CommonPassword,
    ThisIsATop100CommonPassword,
    ThisIsAVeryCommonPassword,
    ThisIsSimilarToACommonlyUsedPassword,
    AWordByItselfIsEasyToGuess,
    NamesAndSurnamesByThemselvesAreEasyToGuess,
    CommonNamesAndSurnamesAreEasyToGuess,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Warning::StraightRowsOfKeysAreEasyToGuess => {
                "Straight rows of keys are easy to guess"
            }
            Warning::ShortKeyboardPatternsAreEasyToGuess => {
                "Short keyboard patterns are easy to guess"
            }
            Warning::RepeatsLikeAaaAreEasyToGuess => "Repeats like 'aaa' are easy to guess",
            Warning::RepeatsLikeAbcabcabcAreOnlySlightlyHarderToGuessThanAbc => {
                "Repeats like 'abcabcabc' are only slightly harder to guess than 'abc'"
            }
            Warning::SequencesLikeAbcAreEasyToGuess => {
                "Sequences like abc or 6543 are easy to guess"
            }
            Warning::RecentYearsAreEasyToGuess => "Recent years are easy to guess",
            Warning::DatesAreOftenEasyToGuess => "Dates are often easy to guess",
            Warning::ThisIsATop10CommonPassword => "This is a top-10 common password",
            Warning::ThisIsATop100CommonPassword => "This is a top-100 common password",
            Warning::ThisIsAVeryCommonPassword => "This is a very common password",
            Warning::ThisIsSimilarToACommonlyUsedPassword => {
                "This is similar to a commonly used password"
            }
            Warning::AWordByItselfIsEasyToGuess => "A word by itself is easy to guess",
            Warning::NamesAndSurnamesByThemselvesAreEasyToGuess => {
                "Names and surnames by themselves are easy to guess"
            }
            Warning::CommonNamesAndSurnamesAreEasyToGuess => {
                "Common names and surnames are easy to guess"
            }
        };
        f.write_str(text)
    }
}

/// A suggestion for picking a stronger password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum Suggestion {
    UseAFewWordsAvoidCommonPhrases,
    NoNeedForSymbolsDigitsOrUppercaseLetters,
    AddAnotherWordOrTwo,
    UseALongerKeyboardPatternWithMoreTurns,
    AvoidRepeatedWordsAndCharacters,
    AvoidSequences,
    AvoidRecentYears,
    AvoidYearsThatAreAssociatedWithYou,
    AvoidDatesAndYearsThatAreAssociatedWithYou,
    CapitalizationDoesntHelpVeryMuch,
    AllUppercaseIsAlmostAsEasyToGuessAsAllLowercase,
    ReversedWordsArentMuchHarderToGuess,
    PredictableSubstitutionsDontHelpVeryMuch,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Suggestion::UseAFewWordsAvoidCommonPhrases => {
                "Use a few words, avoid common phrases"
            }
            Suggestion::NoNeedForSymbolsDigitsOrUppercaseLetters => {
                "No need for symbols, digits, or uppercase letters"
            }
            Suggestion::AddAnotherWordOrTwo => {
                "Add another word or two. Uncommon words are better."
            }
            Suggestion::UseALongerKeyboardPatternWithMoreTurns => {
                "Use a longer keyboard pattern with more turns"
            }
            Suggestion::AvoidRepeatedWordsAndCharacters => {
                "Avoid repeated words and characters"
            }
            Suggestion::AvoidSequences => "Avoid sequences",
            Suggestion::AvoidRecentYears => "Avoid recent years",
            Suggestion::AvoidYearsThatAreAssociatedWithYou => {
                "Avoid years that are associated with you"
            }
            Suggestion::AvoidDatesAndYearsThatAreAssociatedWithYou => {
                "Avoid dates and years that are associated with you"
            }
            Suggestion::CapitalizationDoesntHelpVeryMuch => {
                "Capitalization doesn't help very much"
            }
            Suggestion::AllUppercaseIsAlmostAsEasyToGuessAsAllLowercase => {
                "All-uppercase is almost as easy to guess as all-lowercase"
            }
            Suggestion::ReversedWordsArentMuchHarderToGuess => {
                "Reversed words aren't much harder to guess"
            }
            Suggestion::PredictableSubstitutionsDontHelpVeryMuch => {
                "Predictable substitutions like '@' instead of 'a' don't help very much"
            }
        };
        f.write_str(text)
    }
}

pub(crate) fn get_feedback(score: u8, sequence: &[Match]) -> Feedback {
    if sequence.is_empty() {
        // starting feedback
        return Feedback {
            warning: None,
            suggestions: vec![
                Suggestion::UseAFewWordsAvoidCommonPhrases,
                Suggestion::NoNeedForSymbolsDigitsOrUppercaseLetters,
            ],
        };
    }

    // no feedback if the score is good or great
    if score > 2 {
        return Feedback::default();
    }

    // tie feedback to the longest match for longer sequences
    let longest_match = sequence.iter().skip(1).fold(&sequence[0], |longest, m| {
        if m.token.chars().count() > longest.token.chars().count() {
            m
        } else {
            longest
        }
    });

    let extra_feedback = Suggestion::AddAnotherWordOrTwo;
    match match_feedback(longest_match, sequence.len() == 1) {
        Some(mut feedback) => {
            let insert_at = feedback.suggestions.len().min(1);
            feedback.suggestions.insert(insert_at, extra_feedback);
            feedback
        }
        None => Feedback {
            warning: None,
            suggestions: vec![extra_feedback],
        },
    }
}

fn match_feedback(m: &Match, is_sole_match: bool) -> Option<Feedback> {
    match &m.pattern {
        MatchPattern::Dictionary(pattern) => {
            Some(dictionary_match_feedback(pattern, m, is_sole_match))
        }
        MatchPattern::Spatial(pattern) => Some(Feedback {
            warning: Some(if pattern.turns == 1 {
                Warning::StraightRowsOfKeysAreEasyToGuess
            } else {
                Warning::ShortKeyboardPatternsAreEasyToGuess
            }),
            suggestions: vec![Suggestion::UseALongerKeyboardPatternWithMoreTurns],
        }),
        MatchPattern::Repeat(pattern) => Some(Feedback {
            warning: Some(if pattern.base_token.chars().count() == 1 {
                Warning::RepeatsLikeAaaAreEasyToGuess
            } else {
                Warning::RepeatsLikeAbcabcabcAreOnlySlightlyHarderToGuessThanAbc
            }),
            suggestions: vec![Suggestion::AvoidRepeatedWordsAndCharacters],
        }),
        MatchPattern::Sequence(_) => Some(Feedback {
            warning: Some(Warning::SequencesLikeAbcAreEasyToGuess),
            suggestions: vec![Suggestion::AvoidSequences],
        }),
        MatchPattern::Regex(pattern) if pattern.regex_name == "recent_year" => Some(Feedback {
            warning: Some(Warning::RecentYearsAreEasyToGuess),
            suggestions: vec![
                Suggestion::AvoidRecentYears,
                Suggestion::AvoidYearsThatAreAssociatedWithYou,
            ],
        }),
        MatchPattern::Date(_) => Some(Feedback {
            warning: Some(Warning::DatesAreOftenEasyToGuess),
            suggestions: vec![Suggestion::AvoidDatesAndYearsThatAreAssociatedWithYou],
        }),
        _ => None,
    }
}

fn dictionary_match_feedback(
    pattern: &DictionaryPattern,
    m: &Match,
    is_sole_match: bool,
) -> Feedback {
    let warning = match pattern.dictionary_name {
        "passwords" => {
            if is_sole_match && !pattern.l33t && !pattern.reversed {
                if pattern.rank <= 10 {
                    Some(Warning::ThisIsATop10CommonPassword)
                } else if pattern.rank <= 100 {
                    Some(Warning::ThisIsATop100CommonPassword)
                } else {
                    Some(Warning::ThisIsAVeryCommonPassword)
                }
            } else if m.guesses_log10().map_or(false, |log10| log10 <= 4.0) {
                Some(Warning::ThisIsSimilarToACommonlyUsedPassword)
            } else {
                None
            }
        }
        "english" => {
            if is_sole_match {
                Some(Warning::AWordByItselfIsEasyToGuess)
            } else {
                None
            }
        }
        "surnames" | "male_names" | "female_names" => {
            if is_sole_match {
                Some(Warning::NamesAndSurnamesByThemselvesAreEasyToGuess)
            } else {
                Some(Warning::CommonNamesAndSurnamesAreEasyToGuess)
            }
        }
        _ => None,
    };

    let mut suggestions = Vec::new();
    if scoring::START_UPPER.is_match(&m.token) {
        suggestions.push(Suggestion::CapitalizationDoesntHelpVeryMuch);
    } else if scoring::ALL_UPPER.is_match(&m.token) {
        suggestions.push(Suggestion::AllUppercaseIsAlmostAsEasyToGuessAsAllLowercase);
    }
    if pattern.reversed && m.token.chars().count() >= 4 {
        suggestions.push(Suggestion::ReversedWordsArentMuchHarderToGuess);
    }
    if pattern.l33t {
        suggestions.push(Suggestion::PredictableSubstitutionsDontHelpVeryMuch);
    }

    Feedback {
        warning,
        suggestions,
    }
}
