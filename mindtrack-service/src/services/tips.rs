//! Tip normalization.
//!
//! Turns free-form generator output into exactly [`TIP_COUNT`] short tips.

use super::fallback::{FALLBACK_TIPS, TIP_COUNT};

/// Characters removed from every candidate line.
///
/// The strip is not anchored to the start of the line: hyphenated words
/// such as "screen-free" lose their hyphen too.
const BULLET_CHARS: [char; 3] = ['•', '-', '*'];

const NUMBERING_SEPARATORS: [char; 3] = ['.', ')', ':'];

/// Normalize raw generator text into exactly three non-empty tips.
///
/// Lines are cleaned with [`clean_tip`] and empty ones dropped. Short
/// results are padded from the fallback list (indexed by current length),
/// long ones truncated.
pub fn normalize_tips(raw: &str) -> Vec<String> {
    let candidates: Vec<&str> = if raw.contains('\n') {
        raw.split('\n').collect()
    } else {
        vec![raw]
    };

    let mut tips: Vec<String> = candidates
        .into_iter()
        .map(clean_tip)
        .filter(|tip| !tip.is_empty())
        .take(TIP_COUNT)
        .collect();

    while tips.len() < TIP_COUNT {
        tips.push(FALLBACK_TIPS[tips.len() % FALLBACK_TIPS.len()].to_string());
    }

    tips
}

/// Strip bullet glyphs and a leading `N.`, `N)` or `N:` marker from one line.
pub fn clean_tip(line: &str) -> String {
    let stripped: String = line.chars().filter(|c| !BULLET_CHARS.contains(c)).collect();
    let stripped = stripped.trim();

    let mut chars = stripped.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second))
            if stripped.chars().count() > 2
                && first.is_ascii_digit()
                && NUMBERING_SEPARATORS.contains(&second) =>
        {
            chars.as_str().trim().to_string()
        }
        _ => stripped.to_string(),
    }
}

/// First usable tip in a completion, ignoring an echoed `prompt` prefix.
pub fn first_tip(completion: &str, prompt: &str) -> Option<String> {
    let answer = completion.strip_prefix(prompt).unwrap_or(completion);
    answer
        .lines()
        .map(clean_tip)
        .find(|tip| !tip.is_empty())
}
