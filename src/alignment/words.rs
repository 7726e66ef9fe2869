use crate::alignment::offsets::find_chars_from;
use crate::types::Word;

/// Splits text into words, dropping punctuation.
///
/// A hyphen survives only between two word characters (`co-located`);
/// leading, trailing and doubled hyphens become separators like any other
/// punctuation. Casing and duplicates are preserved.
pub fn extract_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let cleaned: String = chars
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            let keep = if c == '-' {
                let prev_is_word = idx > 0 && is_word_char(chars[idx - 1]);
                let next_is_word = chars.get(idx + 1).copied().is_some_and(is_word_char);
                prev_is_word && next_is_word
            } else {
                is_word_char(c) || c.is_whitespace()
            };
            if keep {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds each word in `full_text`, scanning forward and case-insensitively.
///
/// The search for a word starts where the previous located word ended, so a
/// repeated word resolves to its next occurrence. Words that cannot be found
/// are skipped without moving the cursor.
///
/// Only the text after the cursor is lowercased for each search, so a char
/// whose lowercase form is longer (`İ`) does not carry over into the offsets
/// of words located after it.
pub fn locate_words(full_text: &str, words: &[String]) -> Vec<Word> {
    let chars: Vec<char> = full_text.chars().collect();
    let mut located = Vec::with_capacity(words.len());
    let mut cursor = 0usize;

    for word in words {
        let needle = lowercase_chars(word);
        let rest: Vec<char> = chars[cursor.min(chars.len())..]
            .iter()
            .flat_map(|c| c.to_lowercase())
            .collect();
        let Some(pos) = find_chars_from(&rest, &needle, 0) else {
            tracing::debug!(word = word.as_str(), cursor, "grouping: word not found in text");
            continue;
        };
        let start = cursor + pos;
        let end = start + word.chars().count();
        located.push(Word {
            text: word.clone(),
            start,
            end,
        });
        cursor = end;
    }

    located
}

fn lowercase_chars(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}
