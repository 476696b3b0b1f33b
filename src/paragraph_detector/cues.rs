// WHY: English cue words that mark where a new essay paragraph begins
// Matching is case-sensitive and needs a word boundary after the cue

/// Openers of body paragraphs
pub const BODY_CUES: &[&str] = &[
    "First",
    "Firstly",
    "Second",
    "Secondly",
    "Third",
    "Thirdly",
    "Furthermore",
    "Moreover",
    "Additionally",
    "In addition",
    "Next",
    "Similarly",
    "Another",
    "Also",
    "Besides",
    "Lastly",
    "To begin",
    "On the other hand",
];

/// Openers of the conclusion
pub const CONCLUSION_CUES: &[&str] = &[
    "In conclusion",
    "To conclude",
    "In summary",
    "To summarize",
    "To sum up",
    "Overall",
    "Finally",
    "Therefore",
    "Ultimately",
    "In closing",
    "All in all",
    "Thus",
];

/// Generic sentence openers; only count after a long previous line
pub const GENERIC_OPENERS: &[&str] = &[
    "The",
    "This",
    "These",
    "One",
    "Many",
    "Some",
    "Most",
    "People",
    "Students",
    "Society",
    "In today's",
    "Throughout history",
    "When",
];

const CLOSING_QUOTES: [char; 4] = ['"', '\'', '\u{201D}', '\u{2019}'];

pub fn starts_with_any(line: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| starts_with_cue(line, cue))
}

fn starts_with_cue(line: &str, cue: &str) -> bool {
    line.strip_prefix(cue)
        .is_some_and(|rest| rest.chars().next().map_or(true, |next| !next.is_alphanumeric()))
}

pub fn is_body_cue(line: &str) -> bool {
    starts_with_any(line, BODY_CUES)
}

pub fn is_conclusion_cue(line: &str) -> bool {
    starts_with_any(line, CONCLUSION_CUES)
}

pub fn is_generic_opener(line: &str) -> bool {
    starts_with_any(line, GENERIC_OPENERS)
}

/// Line ends in `.`, `!` or `?`, optionally followed by one closing quote
pub fn ends_with_terminal(line: &str) -> bool {
    let line = line.trim_end();
    let line = line.strip_suffix(CLOSING_QUOTES).unwrap_or(line);
    line.ends_with(['.', '!', '?'])
}
