//! Flesch-Kincaid grade level
//!
//! `0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59`
//!
//! Words are whitespace tokens with at least one alphanumeric character once
//! surrounding punctuation is stripped. Text is cut into segments at `.`, `!`
//! and `?`, except a `.` between two digits (`1.5`, `21.3`). Only segments of
//! more than two words count as sentences, so citations like `42 U.S.C. 1395`
//! do not fragment a sentence. Any text with words has at least one sentence.
//! Syllables use a vowel-group heuristic.

/// Segments this short are abbreviation or numbering fragments
const MAX_FRAGMENT_WORDS: usize = 2;

/// Word, sentence and syllable totals for one text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let mut stats = TextStats::default();

        for sentence in segments(text) {
            let mut words_here = 0;
            for token in sentence.split_whitespace() {
                let word = token.trim_matches(|c: char| !c.is_alphanumeric());
                if word.is_empty() {
                    continue;
                }
                words_here += 1;
                stats.syllables += count_syllables(word);
            }
            stats.words += words_here;
            if words_here > MAX_FRAGMENT_WORDS {
                stats.sentences += 1;
            }
        }

        if stats.words > 0 {
            stats.sentences = stats.sentences.max(1);
        }
        stats
    }

    /// Grade level, or `None` when the text has no words or sentences
    pub fn grade(&self) -> Option<f64> {
        if self.words == 0 || self.sentences == 0 {
            return None;
        }
        let words = self.words as f64;
        let grade = 0.39 * (words / self.sentences as f64)
            + 11.8 * (self.syllables as f64 / words)
            - 15.59;
        grade.is_finite().then_some(grade)
    }
}

/// Split at sentence punctuation, keeping decimal points inside numbers
fn segments(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        let ends = match c {
            '!' | '?' => true,
            '.' => {
                let prev_digit = i > 0 && chars[i - 1].1.is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|&(_, n)| n.is_ascii_digit());
                !(prev_digit && next_digit)
            }
            _ => false,
        };
        if ends {
            parts.push(&text[start..pos]);
            start = pos + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Flesch-Kincaid grade of `text`; `None` when it cannot be scored
pub fn flesch_kincaid_grade(text: &str) -> Option<f64> {
    TextStats::of(text).grade()
}

/// Syllables in one word (vowel groups, silent trailing `e` removed,
/// at least one)
pub fn count_syllables(word: &str) -> usize {
    let lower: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if lower.is_empty() {
        // Numbers and symbols read as a single unit
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let n = lower.len();
    if n > 2 && lower[n - 1] == 'e' && !is_vowel(lower[n - 2]) && lower[n - 2] != 'l' {
        groups -= 1;
    }

    groups.max(1)
}
