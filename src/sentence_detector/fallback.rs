// WHY: Pattern-based rescue splits for paragraphs the quote state machine leaves under-split
// Uses regex-automata meta regexes; rungs are tried in order by the splitter

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

use crate::normalizer::collapse_whitespace;

/// Rung (a) and the whole-text permissive retry: terminal, whitespace, capital
const TERMINAL_CAPITAL: &str = r"[.!?]\s+\p{Lu}";

/// Rung (b): semicolon followed by a transition word or a capital
const SEMICOLON_TRANSITION: &str = r"(?i:;\s+(?:however|therefore|thus|hence|moreover|furthermore|consequently|additionally|nevertheless|nonetheless|meanwhile|instead|otherwise|similarly|likewise|indeed)\b)|;\s+\p{Lu}";

/// Rung (c): terminal, optional closing quote, optional whitespace, capital
const QUOTED_TERMINAL_CAPITAL: &str = r#"[.!?]["'\u{201D}\u{2019}]?\s*\p{Lu}"#;

/// Where a match is cut into two pieces
#[derive(Debug, Clone, Copy)]
enum Cut {
    /// Right before the capital letter that ends the match
    BeforeLastChar,
    /// Right after the first character of the match
    AfterFirstChar,
}

/// Compiled fallback patterns
#[derive(Debug, Clone)]
pub struct FallbackSplitter {
    terminal_capital: Regex,
    semicolon_transition: Regex,
    quoted_terminal_capital: Regex,
}

impl FallbackSplitter {
    pub fn new() -> Result<Self> {
        debug!("Compiling fallback sentence patterns");
        Ok(Self {
            terminal_capital: Regex::new(TERMINAL_CAPITAL)?,
            semicolon_transition: Regex::new(SEMICOLON_TRANSITION)?,
            quoted_terminal_capital: Regex::new(QUOTED_TERMINAL_CAPITAL)?,
        })
    }

    /// Split wherever `.`, `!` or `?` is followed by whitespace and a capital, ignoring quotes
    pub fn split_terminal_capital(&self, text: &str) -> Vec<String> {
        split_with(&self.terminal_capital, text, Cut::BeforeLastChar)
    }

    /// Split sentences longer than `min_chars` after semicolons that introduce a new clause
    pub fn split_semicolons(&self, sentences: &[String], min_chars: usize) -> Vec<String> {
        sentences
            .iter()
            .flat_map(|sentence| {
                if sentence.chars().count() > min_chars {
                    split_with(&self.semicolon_transition, sentence, Cut::AfterFirstChar)
                } else {
                    vec![sentence.clone()]
                }
            })
            .collect()
    }

    /// Split at terminals optionally followed by a closing quote, even without whitespace
    pub fn split_quoted_terminal(&self, text: &str) -> Vec<String> {
        split_with(&self.quoted_terminal_capital, text, Cut::BeforeLastChar)
    }
}

fn split_with(pattern: &Regex, text: &str, cut: Cut) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for mat in pattern.find_iter(text) {
        let matched = &text[mat.start()..mat.end()];
        let position = match cut {
            Cut::BeforeLastChar => mat.end() - matched.chars().last().map_or(0, char::len_utf8),
            Cut::AfterFirstChar => mat.start() + matched.chars().next().map_or(0, char::len_utf8),
        };
        if position <= last {
            continue;
        }
        push_piece(&text[last..position], &mut pieces);
        last = position;
    }
    push_piece(&text[last..], &mut pieces);

    pieces
}

fn push_piece(piece: &str, pieces: &mut Vec<String>) {
    let piece = collapse_whitespace(piece);
    if !piece.is_empty() {
        pieces.push(piece);
    }
}
