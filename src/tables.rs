//! Static substitution tables
//!
//! Two tables drive the obfuscation transforms: ISO 9 transliteration
//! (Cyrillic to Latin, one to one) and a homoglyph table (Cyrillic to a set
//! of look-alike characters from other scripts). Reverse lookups are built
//! once on first use and live for the rest of the process.

use std::cmp::Reverse;
use std::collections::HashMap;

use once_cell::sync::Lazy;

/// ISO 9 transliteration, in table order.
#[rustfmt::skip]
pub const ISO_9: &[(char, &str)] = &[
    ('А', "A"), ('а', "a"),
    ('Б', "B"), ('б', "b"),
    ('В', "V"), ('в', "v"),
    ('Г', "G"), ('г', "g"),
    ('Д', "D"), ('д', "d"),
    ('Е', "E"), ('е', "e"),
    ('Ё', "Ë"), ('ё', "ë"),
    ('Ж', "Ž"), ('ж', "ž"),
    ('З', "Z"), ('з', "z"),
    ('И', "I"), ('и', "i"),
    ('Й', "J"), ('й', "j"),
    ('К', "K"), ('к', "k"),
    ('Л', "L"), ('л', "l"),
    ('М', "M"), ('м', "m"),
    ('Н', "N"), ('н', "n"),
    ('О', "O"), ('о', "o"),
    ('П', "P"), ('п', "p"),
    ('Р', "R"), ('р', "r"),
    ('С', "S"), ('с', "s"),
    ('Т', "T"), ('т', "t"),
    ('У', "U"), ('у', "u"),
    ('Ф', "F"), ('ф', "f"),
    ('Х', "H"), ('х', "h"),
    ('Ц', "C"), ('ц', "c"),
    ('Ч', "Č"), ('ч', "č"),
    ('Ш', "Š"), ('ш', "š"),
    ('Щ', "Ŝ"), ('щ', "ŝ"),
    // Hard and soft signs collapse to one modifier letter each.
    ('Ъ', "ʺ"), ('ъ', "ʺ"),
    ('Ы', "Y"), ('ы', "y"),
    ('Ь', "ʹ"), ('ь', "ʹ"),
    ('Э', "È"), ('э', "è"),
    ('Ю', "Û"), ('ю', "û"),
    ('Я', "Â"), ('я', "â"),
];

/// Homoglyph candidates per Cyrillic letter, in table order.
pub const HOMOGLYPHS: &[(char, &[char])] = &[
    ('А', &['A', '\u{391}']),
    ('а', &['\u{251}']),
    ('Б', &['\u{182}']),
    ('б', &['\u{10dc}']),
    ('В', &['B', '\u{392}', '\u{2c82}']),
    ('Г', &['\u{393}', '\u{14a5}']),
    ('г', &['\u{1d26}']),
    ('Е', &['E', '\u{395}', '\u{2d39}']),
    ('е', &['\u{4bd}']),
    ('Ё', &['\u{cb}']),
    ('З', &['3']),
    ('з', &['\u{25c}']),
    ('И', &['\u{376}']),
    ('К', &['\u{2c94}', 'K', '\u{39a}', '\u{198}']),
    ('М', &['\u{ff2d}', 'M', '\u{39c}', '\u{3fa}']),
    ('м', &['\u{1d0d}']),
    ('Н', &['\u{157c}', 'H', '\u{397}', '\u{2c8e}']),
    ('О', &['\u{1c5b}', 'O', '\u{555}', '\u{39f}', '\u{2d54}', '\u{2c9e}', '\u{ce6}']),
    ('о', &['\u{585}', '\u{3bf}', 'o', '\u{1d0f}', '\u{be6}', '\u{d20}', '\u{2c9f}']),
    ('П', &['\u{3a0}', '\u{220f}', '\u{2ca0}']),
    ('Р', &['\u{3a1}', 'P', '\u{2ca2}']),
    ('р', &['\u{3c1}']),
    ('С', &['\u{216d}', 'C', '\u{3f9}', '\u{2ca4}', '\u{13df}']),
    ('с', &['\u{1d04}', 'c', '\u{3f2}', '\u{217d}']),
    ('Т', &['T', '\u{3a4}']),
    ('У', &['\u{13a9}']),
    ('у', &['\u{3b3}']),
    ('Ф', &['\u{3a6}', '\u{553}']),
    ('Х', &['\u{2169}', '\u{3a7}', 'X']),
    ('х', &['\u{3c7}']),
    ('я', &['\u{1d19}']),
];

static ISO_9_MAP: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| ISO_9.iter().copied().collect());

/// Latin sequence to Cyrillic letter, longest sequences first.
///
/// Built by inverting [`ISO_9`]; when two letters share a Latin form the
/// later table entry wins (so `ʺ` maps back to `ъ`, `ʹ` to `ь`).
static REVERSE_ISO_9: Lazy<Vec<(&'static str, char)>> = Lazy::new(|| {
    let mut entries: Vec<(&'static str, char)> = Vec::with_capacity(ISO_9.len());
    for &(cyrillic, latin) in ISO_9 {
        match entries.iter_mut().find(|(key, _)| *key == latin) {
            Some(entry) => entry.1 = cyrillic,
            None => entries.push((latin, cyrillic)),
        }
    }
    entries.sort_by_key(|(latin, _)| Reverse(latin.chars().count()));
    entries
});

static HOMOGLYPH_MAP: Lazy<HashMap<char, &'static [char]>> =
    Lazy::new(|| HOMOGLYPHS.iter().copied().collect());

static REVERSE_HOMOGLYPH_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    HOMOGLYPHS
        .iter()
        .flat_map(|&(source, glyphs)| glyphs.iter().map(move |&glyph| (glyph, source)))
        .collect()
});

/// ISO 9 Latin form of a Cyrillic letter
pub fn latin_for(c: char) -> Option<&'static str> {
    ISO_9_MAP.get(&c).copied()
}

/// Reverse transliteration pairs, ordered for longest-match-first replacement
pub fn reverse_latin_pairs() -> &'static [(&'static str, char)] {
    &REVERSE_ISO_9
}

/// Homoglyph candidates for a Cyrillic letter
pub fn homoglyphs_for(c: char) -> Option<&'static [char]> {
    HOMOGLYPH_MAP.get(&c).copied()
}

/// Canonical Cyrillic letter a homoglyph stands in for
pub fn cyrillic_for_homoglyph(c: char) -> Option<char> {
    REVERSE_HOMOGLYPH_MAP.get(&c).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_iso_9_prefers_later_entry() {
        let pairs = reverse_latin_pairs();
        assert!(pairs.contains(&("ʺ", 'ъ')));
        assert!(pairs.contains(&("ʹ", 'ь')));
        assert!(!pairs.contains(&("ʺ", 'Ъ')));
    }

    #[test]
    fn test_reverse_iso_9_sorted_by_length() {
        let lengths: Vec<usize> = reverse_latin_pairs()
            .iter()
            .map(|(latin, _)| latin.chars().count())
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_every_homoglyph_maps_back_to_its_source() {
        for &(source, glyphs) in HOMOGLYPHS {
            for &glyph in glyphs {
                assert_eq!(cyrillic_for_homoglyph(glyph), Some(source), "glyph {:?}", glyph);
            }
        }
    }

    #[test]
    fn test_greek_kappa_is_homoglyph_of_ka() {
        assert_eq!(cyrillic_for_homoglyph('\u{39a}'), Some('К'));
        assert!(homoglyphs_for('К').unwrap().contains(&'\u{39a}'));
    }

    #[test]
    fn test_lowercase_glyphs_are_not_ascii() {
        for source in ['а', 'е', 'р', 'у', 'х'] {
            let glyphs = homoglyphs_for(source).unwrap();
            assert!(glyphs.iter().all(|g| !g.is_ascii()), "{:?}", source);
        }
        for latin in "abdefghijklmnpqrstuvwxyz".chars() {
            assert_eq!(cyrillic_for_homoglyph(latin), None, "{:?}", latin);
        }
    }

    #[test]
    fn test_unmapped_lookups() {
        assert_eq!(latin_for('z'), None);
        assert_eq!(homoglyphs_for('ж'), None);
        assert_eq!(cyrillic_for_homoglyph('ж'), None);
    }
}
