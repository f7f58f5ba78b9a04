//! Activity Log Parsing
//!
//! The activity log is a markdown document. A `### <name>` heading starts a
//! persona's section; inside it, lines starting with `位置：` (location) or
//! `活動：` (activity) are activity lines. Everything else is ignored.

use std::collections::HashMap;

const SECTION_PREFIX: &str = "### ";
const ACTIVITY_PREFIXES: [&str; 2] = ["位置：", "活動："];

/// Parse the log into persona name -> activity lines (most recent last),
/// keeping only the last `keep` lines per persona. Personas whose section
/// has no activity lines are left out.
pub fn parse_activity_log(content: &str, keep: usize) -> HashMap<String, Vec<String>> {
    let mut history: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            let name = name.trim();
            current = (!name.is_empty()).then(|| name.to_string());
            continue;
        }

        let Some(name) = current.as_ref() else {
            continue;
        };
        if ACTIVITY_PREFIXES.iter().any(|p| line.starts_with(p)) {
            history.entry(name.clone()).or_default().push(line.to_string());
        }
    }

    for lines in history.values_mut() {
        if lines.len() > keep {
            lines.drain(..lines.len() - keep);
        }
    }
    history
}
