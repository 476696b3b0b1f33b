// WHY: Canonical text shape for every later stage
// Document-level normalization keeps paragraph separators; sentence-level collapsing removes them

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Canonicalize raw submission text.
///
/// Steps, in order: CRLF/CR become LF, comment markers are stripped, trailing
/// blanks are removed from each line, runs of three or more newlines collapse
/// to exactly two, and the result is trimmed. Idempotent.
pub fn normalize_document(text: &str) -> String {
    let unix = text.replace("\r\n", "\n").replace('\r', "\n");
    let uncommented = strip_comment_markers(&unix);

    let mut result = String::with_capacity(uncommented.len());
    let mut pending_newlines = 0usize;

    for (i, line) in uncommented.split('\n').enumerate() {
        if i > 0 {
            pending_newlines += 1;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        // At most one blank line survives between two lines
        for _ in 0..pending_newlines.min(2) {
            result.push('\n');
        }
        pending_newlines = 0;
        result.push_str(line);
    }

    result.trim().to_string()
}

/// Remove `<!-- ... -->` blocks, then any unmatched marker, until none remain
fn strip_comment_markers(text: &str) -> String {
    let mut current = text.to_string();

    // Complete blocks first so a stray closer cannot split a real comment
    while let Some(next) = remove_first_block(&current) {
        current = next;
    }

    loop {
        let next = current.replace(COMMENT_OPEN, "").replace(COMMENT_CLOSE, "");
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn remove_first_block(text: &str) -> Option<String> {
    let open = text.find(COMMENT_OPEN)?;
    let body_start = open + COMMENT_OPEN.len();
    let close = text[body_start..].find(COMMENT_CLOSE)? + body_start;

    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..open]);
    result.push_str(&text[close + COMMENT_CLOSE.len()..]);
    Some(result)
}

/// Collapse every whitespace run (newlines included) into one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    collapse_whitespace_into(text, &mut result);
    result
}

/// Buffer-reusing variant of [`collapse_whitespace`]
pub fn collapse_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    if buffer.ends_with(' ') {
        buffer.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings_unified() {
        assert_eq!(normalize_document("One.\r\nTwo.\rThree."), "One.\nTwo.\nThree.");
    }

    #[test]
    fn test_blank_line_runs_collapse_to_separator() {
        let input = "First block.\n\n\n\nSecond block.\r\n\r\n\r\nThird.";
        assert_eq!(normalize_document(input), "First block.\n\nSecond block.\n\nThird.");
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let input = "Intro.\n   \n\t\n  \nBody.";
        assert_eq!(normalize_document(input), "Intro.\n\nBody.");
    }

    #[test]
    fn test_comment_markers_stripped() {
        assert_eq!(normalize_document("Keep <!-- drop this --> text."), "Keep  text.");
        assert_eq!(normalize_document("Dangling --> marker <!-- here"), "Dangling  marker  here");
        assert_eq!(normalize_document("<!<!-- x -->-- y -->z"), "z");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize_document(""), "");
        assert_eq!(normalize_document(" \n\r\n\t "), "");
    }

    #[test]
    fn test_idempotent_on_messy_input() {
        let input = "  Title line  \r\n\r\n\r\n<!-- note -->Body   text.\n \n\n\nEnd.  ";
        let once = normalize_document(input);
        assert_eq!(normalize_document(&once), once);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Line one\nline\ttwo \r\n end.  "), "Line one line two end.");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_collapse_whitespace_into_reuses_buffer() {
        let mut buffer = String::new();
        collapse_whitespace_into("First\n\nsecond.", &mut buffer);
        assert_eq!(buffer, "First second.");
        collapse_whitespace_into("Other", &mut buffer);
        assert_eq!(buffer, "Other");
    }
}
