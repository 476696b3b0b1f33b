// WHY: Abbreviation periods must never look like sentence terminals to the state machine
// Periods are swapped for a private-use placeholder before splitting and restored afterwards

/// Stand-in for a protected period; private-use so it never occurs in essays
pub const PERIOD_PLACEHOLDER: char = '\u{E000}';

/// Titles that precede proper nouns, e.g. "Dr. Smith"
pub const TITLE_ABBREVIATIONS: &[&str] = &["Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr."];

/// Latin shorthand common in student writing
pub const LATIN_ABBREVIATIONS: &[&str] = &["i.e.", "e.g.", "etc."];

/// Degrees
pub const ACADEMIC_ABBREVIATIONS: &[&str] = &["Ph.D.", "M.D.", "B.A.", "M.A."];

/// Country codes and comparisons
pub const OTHER_ABBREVIATIONS: &[&str] = &["U.S.", "U.K.", "vs."];

/// Protects and restores abbreviation periods
#[derive(Debug, Clone)]
pub struct AbbreviationGuard {
    /// Abbreviations as char vectors, longest first so "Ph.D." wins over shorter overlaps
    abbreviations: Vec<Vec<char>>,
}

impl AbbreviationGuard {
    /// Guard for the built-in abbreviation lists
    pub fn new() -> Self {
        let all = TITLE_ABBREVIATIONS
            .iter()
            .chain(LATIN_ABBREVIATIONS)
            .chain(ACADEMIC_ABBREVIATIONS)
            .chain(OTHER_ABBREVIATIONS)
            .copied();
        Self::with_abbreviations(all)
    }

    /// Guard for a custom list of period-bearing abbreviations
    pub fn with_abbreviations<'a, I: IntoIterator<Item = &'a str>>(abbreviations: I) -> Self {
        let mut abbreviations: Vec<Vec<char>> = abbreviations
            .into_iter()
            .filter(|a| a.contains('.'))
            .map(|a| a.chars().collect())
            .collect();
        abbreviations.sort();
        abbreviations.dedup();
        abbreviations.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { abbreviations }
    }

    /// Replace the periods of every abbreviation occurrence with [`PERIOD_PLACEHOLDER`].
    ///
    /// An occurrence must start at a word boundary: "Dr." inside "HumDr." is left alone.
    pub fn protect(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut result = String::with_capacity(text.len());
        let mut i = 0;

        while i < chars.len() {
            let at_word_start = i == 0 || !chars[i - 1].is_alphanumeric();
            let matched = if at_word_start {
                self.abbreviations
                    .iter()
                    .find(|abbr| chars[i..].starts_with(abbr.as_slice()))
            } else {
                None
            };

            match matched {
                Some(abbr) => {
                    for &ch in abbr {
                        result.push(if ch == '.' { PERIOD_PLACEHOLDER } else { ch });
                    }
                    i += abbr.len();
                }
                None => {
                    result.push(chars[i]);
                    i += 1;
                }
            }
        }

        result
    }

    /// Put protected periods back
    pub fn restore(&self, text: &str) -> String {
        text.replace(PERIOD_PLACEHOLDER, ".")
    }
}

impl Default for AbbreviationGuard {
    fn default() -> Self {
        Self::new()
    }
}
