//! Behaviour of the obfuscation modes through the public API

use glyphveil::tables;
use glyphveil::transformers::{self, INVISIBLE_MARKER};
use glyphveil::{
    MessageNode, MessagePart, MessageRole, ObfuscationType, ScriptedRandom, SeededRandom,
    UiMessage,
};
use uuid::Uuid;

#[test]
fn transliteration_round_trips_single_letter_mappings() {
    let original = "Широкая электрификация южных губерний даст мощный толчок";
    let latin = transformers::transliterate(original);
    assert!(!latin.chars().any(|c| tables::latin_for(c).is_some()));
    assert_eq!(transformers::transliterate(&latin), original);
}

#[test]
fn transliteration_of_signs_loses_case() {
    let latin = transformers::transliterate("ОБЪЁМ ДЕНЬ");
    assert_eq!(latin, "OB\u{2ba}\u{cb}M DEN\u{2b9}");
    assert_eq!(transformers::transliterate(&latin), "ОБъЁМ ДЕНь");
}

#[test]
fn invisible_markers_round_trip_exactly() {
    let mut rng = SeededRandom::new(2024);
    for text in ["Привет, мир!", "hello\n\nworld  again", "ab", "x y z ok"] {
        let inserted = transformers::insert_invisible(text, &mut rng);
        assert!(inserted.contains(INVISIBLE_MARKER), "no marker in {:?}", inserted);
        assert_eq!(transformers::strip_invisible(&inserted), text);
    }
}

#[test]
fn invisible_markers_need_two_adjacent_letters() {
    let mut rng = SeededRandom::new(3);
    for text in ["a b c", "1234 5678", "a-b c.d", "  \t "] {
        assert_eq!(transformers::insert_invisible(text, &mut rng), text);
    }
}

#[test]
fn invisible_mode_alternates_between_insert_and_strip() {
    let mut rng = SeededRandom::new(11);
    let mode = ObfuscationType::InvisibleChars;
    let text = "скрытый текст";

    let first = mode.apply(text, &mut rng).text;
    let second = mode.apply(&first, &mut rng).text;
    let third = mode.apply(&second, &mut rng).text;

    assert_ne!(first, text);
    assert_eq!(second, text);
    assert_ne!(third, text);
    assert_eq!(transformers::strip_invisible(&third), text);
}

#[test]
fn homoglyphs_change_one_letter_per_word() {
    let mut rng = SeededRandom::new(8);
    let text = "привет мир";
    let outcome = ObfuscationType::Homoglyphs.apply(text, &mut rng);

    assert_eq!(outcome.changed_indices.len(), 2);
    let before: Vec<char> = text.chars().collect();
    let after: Vec<char> = outcome.text.chars().collect();
    assert_eq!(before.len(), after.len());

    let differing: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
    assert_eq!(differing, outcome.changed_indices);
    assert!(outcome.changed_indices[0] < 6);
    assert!(outcome.changed_indices[1] >= 7);
}

#[test]
fn homoglyph_offsets_follow_word_order() {
    let mut rng = SeededRandom::new(21);
    let outcome = ObfuscationType::Homoglyphs.apply("Мама мыла раму, а кот спал", &mut rng);
    // "а" is a single letter
    assert_eq!(outcome.changed_indices.len(), 5);
    assert!(outcome.changed_indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn homoglyphs_reverse_when_one_is_present() {
    let mut rng = ScriptedRandom::new([]);
    let outcome = ObfuscationType::Homoglyphs.apply("\u{39a}ошка и \u{3a1}ыба", &mut rng);
    assert_eq!(outcome.text, "Кошка и Рыба");
    assert!(outcome.changed_indices.is_empty());
}

#[test]
fn empty_text_is_a_no_op_for_every_mode() {
    let mut rng = ScriptedRandom::new([]);
    for mode in ObfuscationType::ALL {
        let outcome = mode.apply("", &mut rng);
        assert_eq!(outcome.text, "");
        assert!(outcome.changed_indices.is_empty());
    }
}

#[test]
fn adapter_leaves_other_variants_alone() {
    let node = MessageNode {
        id: Uuid::new_v4(),
        messages: vec![
            UiMessage::text(MessageRole::Assistant, "Ответ один"),
            UiMessage::new(
                MessageRole::Assistant,
                vec![
                    MessagePart::text("Ответ два"),
                    MessagePart::Image {
                        url: "data:image/png;base64,AAAA".into(),
                    },
                ],
            ),
            UiMessage::text(MessageRole::Assistant, "Ответ три"),
        ],
        select_index: 1,
    };

    let mut rng = SeededRandom::new(5);
    for mode in ObfuscationType::ALL {
        let result = node.obfuscate(mode, &mut rng).unwrap();
        assert_eq!(result.node.messages[0], node.messages[0]);
        assert_eq!(result.node.messages[2], node.messages[2]);
        assert_eq!(result.node.messages[1].parts[1], node.messages[1].parts[1]);
        assert_ne!(result.node.messages[1].parts[0], node.messages[1].parts[0]);
    }
}

#[test]
fn node_json_round_trips_through_adapter() {
    let node = MessageNode::new(UiMessage::text(MessageRole::User, "Секрет"));
    let json = serde_json::to_string(&node).unwrap();
    let parsed: MessageNode = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, node);

    let result = parsed
        .obfuscate(ObfuscationType::CyrillicToLatin, &mut ScriptedRandom::new([]))
        .unwrap();
    assert_eq!(result.node.messages[0].to_text(), "Sekret");
}
