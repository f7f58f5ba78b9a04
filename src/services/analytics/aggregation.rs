//! Per-Question Aggregation
//!
//! One function per question type. Each takes the answers given to a single
//! question by completed responses and is independent of their order.

use std::collections::{BTreeMap, HashMap};

use persona_survey_core::{Answer, RatingScale};

use crate::models::analytics::{
    percentage, ChoiceStats, OptionCount, RatingStats, TextStats, WordCount,
};

/// Number of frequent words reported for text questions
pub const COMMON_WORD_LIMIT: usize = 10;

/// Words must be longer than this (in characters) to be counted
const MIN_WORD_CHARS: usize = 2;

const CJK_PUNCTUATION: &str = "。，、！？；：「」『』（）《》…";

// ============================================================================
// Choice questions
// ============================================================================

/// Count exact option matches. Answers matching no option count toward
/// `total_responses` only.
pub fn aggregate_single_choice(answers: &[&Answer], options: &[String]) -> ChoiceStats {
    let total = answers.len();
    let choices = options
        .iter()
        .map(|option| {
            let count = answers
                .iter()
                .filter(|a| a.as_text() == Some(option.as_str()))
                .count();
            OptionCount {
                option: option.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    ChoiceStats {
        total_responses: total,
        choices,
    }
}

/// Count answers selecting each option; percentages are over the number of
/// answers, so they can sum past 100.
pub fn aggregate_multiple_choice(answers: &[&Answer], options: &[String]) -> ChoiceStats {
    let total = answers.len();
    let choices = options
        .iter()
        .map(|option| {
            let count = answers
                .iter()
                .filter(|a| a.as_choices().is_some_and(|c| c.contains(option)))
                .count();
            OptionCount {
                option: option.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    ChoiceStats {
        total_responses: total,
        choices,
    }
}

// ============================================================================
// Rating questions
// ============================================================================

/// Average, extremes and histogram of the answers that coerce to integers.
/// With nothing coercible every figure is zero.
pub fn aggregate_rating(answers: &[&Answer], scale: &RatingScale) -> RatingStats {
    let values: Vec<i64> = answers.iter().filter_map(|a| a.as_rating()).collect();

    let mut distribution: BTreeMap<i64, usize> = scale.values().map(|v| (v, 0)).collect();
    for value in &values {
        if let Some(count) = distribution.get_mut(value) {
            *count += 1;
        }
    }

    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return RatingStats {
            total_responses: 0,
            average: 0.0,
            min: 0,
            max: 0,
            distribution,
        };
    };

    let sum: i64 = values.iter().sum();
    RatingStats {
        total_responses: values.len(),
        average: sum as f64 / values.len() as f64,
        min,
        max,
        distribution,
    }
}

// ============================================================================
// Text questions
// ============================================================================

/// Average length and the most frequent words.
///
/// Answers are sorted before counting so that ties between equally frequent
/// words resolve the same way whatever order the responses arrived in.
pub fn aggregate_text(answers: &[&Answer]) -> TextStats {
    if answers.is_empty() {
        return TextStats {
            total_responses: 0,
            average_length: 0.0,
            common_words: Vec::new(),
        };
    }

    let mut texts: Vec<String> = answers.iter().map(|a| a.to_string()).collect();
    texts.sort();

    let total_chars: usize = texts.iter().map(|t| t.chars().count()).sum();

    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_seen = 0;
    for word in texts.iter().flat_map(|t| t.split_whitespace()) {
        let word = normalize_word(word);
        if word.chars().count() <= MIN_WORD_CHARS {
            continue;
        }
        let entry = counts.entry(word).or_insert_with(|| {
            next_seen += 1;
            (0, next_seen)
        });
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, seen))| (word, count, seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    TextStats {
        total_responses: texts.len(),
        average_length: total_chars as f64 / texts.len() as f64,
        common_words: ranked
            .into_iter()
            .take(COMMON_WORD_LIMIT)
            .map(|(word, count, _)| WordCount { word, count })
            .collect(),
    }
}

fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| c.is_ascii_punctuation() || CJK_PUNCTUATION.contains(c))
        .to_lowercase()
}
