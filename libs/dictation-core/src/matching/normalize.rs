//! Text normalization into lowercase word tokens.

/// Apostrophe variants folded to ASCII `'`.
const APOSTROPHES: [char; 3] = ['\'', '\u{2018}', '\u{2019}'];

/// Split text into lowercase word tokens.
///
/// Letters, digits and whitespace are kept, apostrophe variants become `'`,
/// and every other character is dropped. Never fails; punctuation-only input
/// yields an empty sequence.
pub fn normalize(text: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(text.len());

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c.is_whitespace() {
            cleaned.push(c);
        } else if APOSTROPHES.contains(&c) {
            cleaned.push('\'');
        }
    }

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Lowercase letters, digits and apostrophes only, for comparing raw words.
pub(crate) fn stripped(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if APOSTROPHES.contains(&c) {
                Some('\'')
            } else {
                None
            }
        })
        .collect()
}
