//! Matching Layers
//!
//! Each layer turns raw generated text into a selection from the declared
//! options, or gives up. Layers are tried in a fixed order and the first
//! one that produces a selection wins:
//!
//! - Single choice: `Exact` -> `Substring` -> `TokenOverlap`
//! - Multiple choice: `SubstringScan` -> `DelimitedFragments`
//!
//! Every layer is a pure function of `(raw, options)` so each can be tested
//! on its own.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Delimiters separating selections in a multiple-choice answer
pub const FRAGMENT_DELIMITERS: [char; 6] = [',', '，', '、', ';', '；', '\n'];

/// Single-choice matching layers, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleChoiceLayer {
    /// Trimmed raw text equals an option
    Exact,
    /// An option occurs inside the raw text, or the raw text inside an option
    Substring,
    /// Raw text shares at least one word token with an option
    TokenOverlap,
}

impl SingleChoiceLayer {
    pub const ORDER: [SingleChoiceLayer; 3] = [
        SingleChoiceLayer::Exact,
        SingleChoiceLayer::Substring,
        SingleChoiceLayer::TokenOverlap,
    ];

    /// Run this layer, returning the selected option.
    pub fn apply(self, raw: &str, options: &[String]) -> Option<String> {
        let index = match self {
            SingleChoiceLayer::Exact => match_exact(raw, options),
            SingleChoiceLayer::Substring => match_substring(raw, options),
            SingleChoiceLayer::TokenOverlap => match_token_overlap(raw, options),
        };
        index.map(|i| options[i].clone())
    }
}

/// Multiple-choice matching layers, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipleChoiceLayer {
    /// Every option found verbatim inside the raw text
    SubstringScan,
    /// Split on delimiters, match each fragment against the options
    DelimitedFragments,
}

impl MultipleChoiceLayer {
    pub const ORDER: [MultipleChoiceLayer; 2] = [
        MultipleChoiceLayer::SubstringScan,
        MultipleChoiceLayer::DelimitedFragments,
    ];

    /// Run this layer, returning the selected options in declaration order.
    /// An empty selection means the layer did not match.
    pub fn apply(self, raw: &str, options: &[String]) -> Option<Vec<String>> {
        let indices = match self {
            MultipleChoiceLayer::SubstringScan => scan_substrings(raw, options),
            MultipleChoiceLayer::DelimitedFragments => match_fragments(raw, options),
        };
        if indices.is_empty() {
            None
        } else {
            Some(indices.into_iter().map(|i| options[i].clone()).collect())
        }
    }
}

impl fmt::Display for SingleChoiceLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SingleChoiceLayer::Exact => "exact",
            SingleChoiceLayer::Substring => "substring",
            SingleChoiceLayer::TokenOverlap => "token_overlap",
        };
        f.write_str(name)
    }
}

impl fmt::Display for MultipleChoiceLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MultipleChoiceLayer::SubstringScan => "substring_scan",
            MultipleChoiceLayer::DelimitedFragments => "delimited_fragments",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Single choice
// ============================================================================

/// Index of the option equal to the trimmed raw text.
pub fn match_exact(raw: &str, options: &[String]) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    options.iter().position(|o| o.trim() == raw)
}

/// Index of the longest option contained in the raw text (first declared on
/// ties); failing that, the first option that contains the raw text.
pub fn match_substring(raw: &str, options: &[String]) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, option) in options.iter().enumerate() {
        let option = option.trim();
        if option.is_empty() || !raw.contains(option) {
            continue;
        }
        let len = option.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((index, len));
        }
    }
    if let Some((index, _)) = best {
        return Some(index);
    }

    options.iter().position(|o| o.contains(raw))
}

/// Index of the first declared option sharing at least one word token with
/// the raw text.
pub fn match_token_overlap(raw: &str, options: &[String]) -> Option<usize> {
    let raw_tokens = tokens(raw);
    if raw_tokens.is_empty() {
        return None;
    }
    options
        .iter()
        .position(|o| !tokens(o).is_disjoint(&raw_tokens))
}

/// Lower-cased tokens delimited by whitespace and punctuation.
pub fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

// ============================================================================
// Multiple choice
// ============================================================================

/// Indices of every option occurring in the raw text, in declaration order.
pub fn scan_substrings(raw: &str, options: &[String]) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, o)| !o.trim().is_empty() && raw.contains(o.trim()))
        .map(|(index, _)| index)
        .collect()
}

/// Split the raw text on [`FRAGMENT_DELIMITERS`] and resolve each fragment
/// with the exact and substring single-choice rules. Indices are
/// de-duplicated and returned in declaration order.
pub fn match_fragments(raw: &str, options: &[String]) -> Vec<usize> {
    let selected: BTreeSet<usize> = raw
        .split(FRAGMENT_DELIMITERS.as_slice())
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .filter_map(|fragment| {
            match_exact(fragment, options).or_else(|| match_substring(fragment, options))
        })
        .collect();
    selected.into_iter().collect()
}

// ============================================================================
// Rating
// ============================================================================

fn digit_run_regex() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Fold full-width digits (U+FF10..U+FF19) to ASCII.
fn fold_full_width_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => char::from(b'0' + (c as u32 - 0xFF10) as u8),
            _ => c,
        })
        .collect()
}

/// First contiguous run of digits, ASCII or full-width. Runs too large for
/// `i64` saturate.
pub fn first_digit_run(raw: &str) -> Option<i64> {
    let folded = fold_full_width_digits(raw);
    let run = digit_run_regex().find(&folded)?;
    Some(run.as_str().parse::<i64>().unwrap_or(i64::MAX))
}
