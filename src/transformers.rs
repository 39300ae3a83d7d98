//! Text obfuscation functions
//!
//! This module contains the three reversible transforms that can be applied
//! to message text. Each one doubles as its own undo: running it again on
//! its own output restores the text (homoglyphs and transliteration within
//! the limits of their tables).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::random::RandomSource;
use crate::tables;

/// Zero-width space, the marker inserted by [`insert_invisible`]
pub const INVISIBLE_MARKER: char = '\u{200B}';

/// Characters that render as nothing but survive copy and paste
pub const INVISIBLE_CHARS: &[char] = &[
    '\u{200B}', // Zero width space
    '\u{200C}', // Zero width non-joiner
    '\u{200D}', // Zero width joiner
    '\u{2060}', // Word joiner
    '\u{FEFF}', // Zero width no-break space
    '\u{00AD}', // Soft hyphen
    '\u{180E}', // Mongolian vowel separator
];

// ASCII whitespace only: a no-break space stays inside its word.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\x0B\f\r]+|[^ \t\n\x0B\f\r]+").unwrap());

/// Split text into maximal runs of ASCII whitespace and everything else
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

fn is_blank(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

/// Letter in the Unicode sense (general category L*)
///
/// Narrower than `char::is_alphabetic`, which also admits letter numbers
/// such as `Ⅻ` and combining vowel signs.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Cyrillic to ISO 9 Latin, or back again
///
/// Text containing any Cyrillic letter is transliterated letter by letter.
/// Text without Cyrillic is treated as earlier output and mapped back,
/// longest Latin sequences first.
pub fn transliterate(text: &str) -> String {
    if text.chars().any(|c| tables::latin_for(c).is_some()) {
        let mut result = String::with_capacity(text.len());
        for c in text.chars() {
            match tables::latin_for(c) {
                Some(latin) => result.push_str(latin),
                None => result.push(c),
            }
        }
        return result;
    }

    let mut result = text.to_string();
    for &(latin, cyrillic) in tables::reverse_latin_pairs() {
        if result.contains(latin) {
            result = result.replace(latin, &cyrillic.to_string());
        }
    }
    result
}

/// Insert one zero-width marker between two letters of every word
///
/// Words shorter than two characters, or without two adjacent letters, are
/// left alone.
pub fn insert_invisible(text: &str, rng: &mut impl RandomSource) -> String {
    let mut inserted = 0usize;
    let result: String = tokenize(text)
        .map(|token| {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() < 2 || is_blank(token) {
                return token.to_string();
            }

            let slots: Vec<usize> = chars
                .windows(2)
                .enumerate()
                .filter(|(_, pair)| is_letter(pair[0]) && is_letter(pair[1]))
                .map(|(i, _)| i + 1)
                .collect();
            if slots.is_empty() {
                return token.to_string();
            }

            let at = *rng.pick(&slots);
            inserted += 1;
            let mut word = String::with_capacity(token.len() + INVISIBLE_MARKER.len_utf8());
            word.extend(&chars[..at]);
            word.push(INVISIBLE_MARKER);
            word.extend(&chars[at..]);
            word
        })
        .collect();

    debug!("Inserted {} invisible markers", inserted);
    result
}

/// Remove every zero-width marker
pub fn strip_invisible(text: &str) -> String {
    text.replace(INVISIBLE_MARKER, "")
}

/// Strip markers if any are present, otherwise insert them
pub fn obfuscate_invisible(text: &str, rng: &mut impl RandomSource) -> String {
    if text.contains(INVISIBLE_MARKER) {
        strip_invisible(text)
    } else {
        insert_invisible(text, rng)
    }
}

/// Whether text contains any character from [`INVISIBLE_CHARS`]
pub fn contains_invisible_chars(text: &str) -> bool {
    text.chars().any(|c| INVISIBLE_CHARS.contains(&c))
}

/// Number of characters from [`INVISIBLE_CHARS`] in text
pub fn count_invisible_chars(text: &str) -> usize {
    text.chars().filter(|c| INVISIBLE_CHARS.contains(c)).count()
}

/// Whether text contains a known homoglyph
pub fn contains_homoglyphs(text: &str) -> bool {
    text.chars().any(|c| tables::cyrillic_for_homoglyph(c).is_some())
}

/// Map every known homoglyph back to its Cyrillic letter
pub fn reverse_homoglyphs(text: &str) -> String {
    text.chars()
        .map(|c| tables::cyrillic_for_homoglyph(c).unwrap_or(c))
        .collect()
}

/// Swap one Cyrillic letter per word for a look-alike
///
/// Returns the new text and the character offsets that changed. If the text
/// already contains a homoglyph the whole text is reversed instead and no
/// offsets are reported.
pub fn obfuscate_homoglyphs(text: &str, rng: &mut impl RandomSource) -> (String, Vec<usize>) {
    if contains_homoglyphs(text) {
        return (reverse_homoglyphs(text), Vec::new());
    }

    let mut result = String::with_capacity(text.len());
    let mut changed = Vec::new();
    let mut offset = 0usize;

    for token in tokenize(text) {
        let mut chars: Vec<char> = token.chars().collect();
        let letters = chars.iter().filter(|&&c| is_letter(c)).count();

        if !is_blank(token) && letters >= 2 {
            let candidates: Vec<(usize, &'static [char])> = chars
                .iter()
                .enumerate()
                .filter_map(|(i, &c)| tables::homoglyphs_for(c).map(|glyphs| (i, glyphs)))
                .collect();

            if !candidates.is_empty() {
                let (index, glyphs) = *rng.pick(&candidates);
                chars[index] = *rng.pick(glyphs);
                changed.push(offset + index);
            }
        }

        offset += chars.len();
        result.extend(chars);
    }

    debug!("Substituted {} homoglyphs", changed.len());
    (result, changed)
}
