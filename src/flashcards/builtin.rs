//! Built-in Japanese decks: kana, kanji and vocabulary by JLPT level

use super::catalog::{CatalogError, DeckSource};
use super::models::{Card, Deck};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jlpt {
    N5,
    N4,
    N3,
}

impl Jlpt {
    pub const ALL: [Jlpt; 3] = [Jlpt::N5, Jlpt::N4, Jlpt::N3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Jlpt::N5 => "N5",
            Jlpt::N4 => "N4",
            Jlpt::N3 => "N3",
        }
    }
}

pub struct Kana {
    pub ch: &'static str,
    pub romaji: &'static str,
}

pub struct Kanji {
    pub kanji: &'static str,
    pub onyomi: &'static str,
    pub kunyomi: &'static str,
    pub meaning: &'static str,
    pub jlpt: Jlpt,
}

pub struct Vocab {
    pub word: &'static str,
    pub reading: &'static str,
    pub meaning: &'static str,
    pub jlpt: Jlpt,
}

const fn kana(ch: &'static str, romaji: &'static str) -> Kana {
    Kana { ch, romaji }
}

pub const HIRAGANA: &[Kana] = &[
    kana("あ", "a"),
    kana("い", "i"),
    kana("う", "u"),
    kana("え", "e"),
    kana("お", "o"),
    kana("か", "ka"),
    kana("き", "ki"),
    kana("く", "ku"),
    kana("け", "ke"),
    kana("こ", "ko"),
];

pub const KATAKANA: &[Kana] = &[
    kana("ア", "a"),
    kana("イ", "i"),
    kana("ウ", "u"),
    kana("エ", "e"),
    kana("オ", "o"),
    kana("カ", "ka"),
    kana("キ", "ki"),
    kana("ク", "ku"),
    kana("ケ", "ke"),
    kana("コ", "ko"),
];

pub const KANJI: &[Kanji] = &[
    Kanji { kanji: "日", onyomi: "ニチ, ジツ", kunyomi: "ひ, か", meaning: "day; sun", jlpt: Jlpt::N5 },
    Kanji { kanji: "一", onyomi: "イチ", kunyomi: "ひと-", meaning: "one", jlpt: Jlpt::N5 },
    Kanji { kanji: "人", onyomi: "ジン, ニン", kunyomi: "ひと", meaning: "person", jlpt: Jlpt::N5 },
    Kanji { kanji: "年", onyomi: "ネン", kunyomi: "とし", meaning: "year", jlpt: Jlpt::N5 },
    Kanji { kanji: "学", onyomi: "ガク", kunyomi: "まな-ぶ", meaning: "study", jlpt: Jlpt::N5 },
    Kanji { kanji: "時", onyomi: "ジ", kunyomi: "とき", meaning: "time", jlpt: Jlpt::N5 },
    Kanji { kanji: "電", onyomi: "デン", kunyomi: "", meaning: "electricity", jlpt: Jlpt::N4 },
    Kanji { kanji: "駅", onyomi: "エキ", kunyomi: "", meaning: "station", jlpt: Jlpt::N4 },
    Kanji { kanji: "集", onyomi: "シュウ", kunyomi: "あつ-まる", meaning: "gather", jlpt: Jlpt::N3 },
    Kanji { kanji: "報", onyomi: "ホウ", kunyomi: "むく-いる", meaning: "report; reward", jlpt: Jlpt::N3 },
];

pub const VOCABULARY: &[Vocab] = &[
    Vocab { word: "学校", reading: "がっこう", meaning: "trường học", jlpt: Jlpt::N5 },
    Vocab { word: "先生", reading: "せんせい", meaning: "giáo viên", jlpt: Jlpt::N5 },
    Vocab { word: "電車", reading: "でんしゃ", meaning: "tàu điện", jlpt: Jlpt::N4 },
    Vocab { word: "会議", reading: "かいぎ", meaning: "cuộc họp", jlpt: Jlpt::N3 },
];

/// Kana cards: the character on the front, romaji on the back
pub fn cards_from_kana(items: &[Kana], tag: &str) -> Vec<Card> {
    items
        .iter()
        .map(|k| Card::new(format!("{}:{}", tag, k.ch), k.ch, k.romaji).with_tags([tag]))
        .collect()
}

/// Kanji cards: meaning plus readings on the back, empty readings omitted
pub fn cards_from_kanji<'a>(items: impl IntoIterator<Item = &'a Kanji>, tag_prefix: &str) -> Vec<Card> {
    items
        .into_iter()
        .map(|k| {
            let mut back = k.meaning.to_string();
            if !k.onyomi.is_empty() {
                back.push_str(&format!("｜音: {}", k.onyomi));
            }
            if !k.kunyomi.is_empty() {
                back.push_str(&format!("｜訓: {}", k.kunyomi));
            }
            Card::new(format!("{}:{}", tag_prefix, k.kanji), k.kanji, back)
                .with_tags([tag_prefix, k.jlpt.as_str()])
        })
        .collect()
}

/// Vocabulary cards: word with its reading on the front, meaning on the back
pub fn cards_from_vocab<'a>(items: impl IntoIterator<Item = &'a Vocab>, tag_prefix: &str) -> Vec<Card> {
    items
        .into_iter()
        .map(|v| {
            let front = if v.reading.is_empty() {
                v.word.to_string()
            } else {
                format!("{}（{}）", v.word, v.reading)
            };
            Card::new(format!("{}:{}", tag_prefix, v.word), front, v.meaning)
                .with_tags([tag_prefix, v.jlpt.as_str()])
        })
        .collect()
}

/// The decks that ship with the platform
pub struct BuiltinCatalog {
    decks: Vec<Deck>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut decks = vec![
            Deck::new("kana:hiragana", "Hiragana", cards_from_kana(HIRAGANA, "hiragana")),
            Deck::new("kana:katakana", "Katakana", cards_from_kana(KATAKANA, "katakana")),
        ];

        for level in Jlpt::ALL {
            let lvl = level.as_str();
            decks.push(Deck::new(
                format!("kanji:{}", lvl),
                format!("Kanji {}", lvl),
                cards_from_kanji(
                    KANJI.iter().filter(|k| k.jlpt == level),
                    &format!("kanji-{}", lvl),
                ),
            ));
        }

        for level in Jlpt::ALL {
            let lvl = level.as_str();
            decks.push(Deck::new(
                format!("vocab:{}", lvl),
                format!("Vocabulary {}", lvl),
                cards_from_vocab(
                    VOCABULARY.iter().filter(|v| v.jlpt == level),
                    &format!("vocab-{}", lvl),
                ),
            ));
        }

        Self { decks }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckSource for BuiltinCatalog {
    fn list_decks(&self) -> Result<Vec<Deck>, CatalogError> {
        Ok(self.decks.clone())
    }
}
