// WHY: Quote-aware sentence boundary state machine
// Terminal punctuation inside a quotation never ends a sentence; the closing quote decides instead

use tracing::debug;
#[cfg(feature = "debug-states")]
use tracing::trace;

use crate::normalizer::collapse_whitespace;

/// Number of non-space characters inspected after a terminal for a capital letter
const SENTENCE_START_LOOKAHEAD: usize = 3;

/// Punctuation and quote glyphs driving the state machine
#[derive(Debug, Clone)]
pub struct QuoteRules {
    /// Characters that can end a sentence outside quotations
    pub terminals: Vec<char>,
    /// (opening, closing) pairs that open a quotation anywhere
    pub double_quotes: Vec<(char, char)>,
    /// (opening, closing) pairs that open a quotation only after whitespace or at text start
    pub single_quotes: Vec<(char, char)>,
}

impl Default for QuoteRules {
    fn default() -> Self {
        Self {
            terminals: vec!['.', '!', '?'],
            double_quotes: vec![('"', '"'), ('\u{201C}', '\u{201D}')],
            single_quotes: vec![('\'', '\''), ('\u{2018}', '\u{2019}')],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    Outside,
    /// Inside a quotation, waiting for the given closing glyph
    InsideQuote(char),
}

/// Character-level splitter that tracks whether it is inside a quotation
#[derive(Debug, Clone, Default)]
pub struct QuoteStateMachine {
    rules: QuoteRules,
}

impl QuoteStateMachine {
    pub fn new(rules: QuoteRules) -> Self {
        Self { rules }
    }

    /// Split text into whitespace-collapsed sentences.
    ///
    /// Total: text with no recognizable boundary comes back as one sentence,
    /// and an unterminated quotation runs to the end of the text.
    pub fn detect_sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut sentences = Vec::new();
        let mut buffer = String::with_capacity(text.len().min(512));
        let mut state = QuoteState::Outside;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            buffer.push(ch);
            let mut sentence_ends = false;

            match state {
                QuoteState::Outside => {
                    if let Some(close) = self.opening_quote(&chars, i) {
                        state = self.transition(state, QuoteState::InsideQuote(close), i);
                    } else if self.is_terminal(ch) {
                        sentence_ends = self.terminal_ends_sentence(&chars, i);
                    }
                }
                QuoteState::InsideQuote(close) => {
                    if ch == close && !self.is_apostrophe(&chars, i) {
                        state = self.transition(state, QuoteState::Outside, i);

                        match chars.get(i + 1) {
                            Some('.') => {
                                // The period after the quote belongs to this sentence either way
                                i += 1;
                                buffer.push('.');
                                sentence_ends = i + 1 == chars.len()
                                    || (chars[i + 1].is_whitespace() && self.opens_sentence(&chars, i + 1));
                            }
                            Some(next) if next.is_whitespace() => {
                                sentence_ends = self.capital_follows_whitespace(&chars, i + 1);
                            }
                            Some(_) => {}
                            None => sentence_ends = true,
                        }
                    }
                }
            }

            if sentence_ends {
                emit_sentence(&mut buffer, &mut sentences);
            }
            i += 1;
        }

        emit_sentence(&mut buffer, &mut sentences);

        debug!("Quote state machine produced {} sentences", sentences.len());
        sentences
    }

    #[cfg_attr(not(feature = "debug-states"), allow(unused_variables))]
    fn transition(&self, from: QuoteState, to: QuoteState, position: usize) -> QuoteState {
        #[cfg(feature = "debug-states")]
        trace!(?from, ?to, position, "quote state transition");
        to
    }

    fn is_terminal(&self, ch: char) -> bool {
        self.rules.terminals.contains(&ch)
    }

    /// Closing glyph for a quotation opened at `i`, if one opens there
    fn opening_quote(&self, chars: &[char], i: usize) -> Option<char> {
        let ch = chars[i];
        if let Some(&(_, close)) = self.rules.double_quotes.iter().find(|(open, _)| *open == ch) {
            return Some(close);
        }

        // WHY: an apostrophe mid-word ("student's") must not open a quotation
        let after_space = i == 0 || chars[i - 1].is_whitespace();
        if after_space {
            if let Some(&(_, close)) = self.rules.single_quotes.iter().find(|(open, _)| *open == ch) {
                return Some(close);
            }
        }
        None
    }

    /// A single closing glyph glued to a following letter is an apostrophe ("don't")
    fn is_apostrophe(&self, chars: &[char], i: usize) -> bool {
        let is_single_close = self.rules.single_quotes.iter().any(|&(_, close)| close == chars[i]);
        is_single_close && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric())
    }

    fn terminal_ends_sentence(&self, chars: &[char], i: usize) -> bool {
        match chars.get(i + 1) {
            None => true,
            Some(next) if next.is_whitespace() => self.opens_sentence(chars, i + 1),
            Some(_) => false,
        }
    }

    /// After whitespace starting at `from`, the first letter among the next few
    /// non-space characters is uppercase (opening quotes and brackets may precede it)
    fn opens_sentence(&self, chars: &[char], from: usize) -> bool {
        let start = skip_whitespace(chars, from);
        for &ch in chars[start..].iter().take(SENTENCE_START_LOOKAHEAD) {
            if ch.is_uppercase() {
                return true;
            }
            if ch.is_alphanumeric() {
                return false;
            }
        }
        false
    }

    /// Whitespace starting at `from` followed directly by an uppercase letter
    fn capital_follows_whitespace(&self, chars: &[char], from: usize) -> bool {
        let start = skip_whitespace(chars, from);
        chars.get(start).is_some_and(|ch| ch.is_uppercase())
    }
}

fn skip_whitespace(chars: &[char], from: usize) -> usize {
    let mut j = from;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    j
}

fn emit_sentence(buffer: &mut String, sentences: &mut Vec<String>) {
    let sentence = collapse_whitespace(buffer);
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    buffer.clear();
}
