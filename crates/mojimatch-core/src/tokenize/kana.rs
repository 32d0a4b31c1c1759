//! Kana to romaji table
//!
//! Uses compile-time perfect hashing (phf) for O(1) lookup. Only hiragana is
//! stored: katakana is folded onto its hiragana counterpart before lookup.
//! Romanization follows what a kana IME expects the user to type.

use phf::phf_map;

/// Offset between a katakana code point and its hiragana counterpart
const KATAKANA_SHIFT: u32 = 0x60;

static ROMAJI: phf::Map<&'static str, &'static str> = phf_map! {
    // Vowels
    "あ" => "a", "い" => "i", "う" => "u", "え" => "e", "お" => "o",

    // Unvoiced rows
    "か" => "ka", "き" => "ki", "く" => "ku", "け" => "ke", "こ" => "ko",
    "さ" => "sa", "し" => "shi", "す" => "su", "せ" => "se", "そ" => "so",
    "た" => "ta", "ち" => "chi", "つ" => "tsu", "て" => "te", "と" => "to",
    "な" => "na", "に" => "ni", "ぬ" => "nu", "ね" => "ne", "の" => "no",
    "は" => "ha", "ひ" => "hi", "ふ" => "fu", "へ" => "he", "ほ" => "ho",
    "ま" => "ma", "み" => "mi", "む" => "mu", "め" => "me", "も" => "mo",
    "や" => "ya", "ゆ" => "yu", "よ" => "yo",
    "ら" => "ra", "り" => "ri", "る" => "ru", "れ" => "re", "ろ" => "ro",
    "わ" => "wa", "ゐ" => "wi", "ゑ" => "we", "を" => "wo",
    "ん" => "n",

    // Voiced rows
    "が" => "ga", "ぎ" => "gi", "ぐ" => "gu", "げ" => "ge", "ご" => "go",
    "ざ" => "za", "じ" => "ji", "ず" => "zu", "ぜ" => "ze", "ぞ" => "zo",
    "だ" => "da", "ぢ" => "di", "づ" => "du", "で" => "de", "ど" => "do",
    "ば" => "ba", "び" => "bi", "ぶ" => "bu", "べ" => "be", "ぼ" => "bo",
    "ぱ" => "pa", "ぴ" => "pi", "ぷ" => "pu", "ぺ" => "pe", "ぽ" => "po",
    "ゔ" => "vu",

    // Small kana (typed with an x prefix)
    "ぁ" => "xa", "ぃ" => "xi", "ぅ" => "xu", "ぇ" => "xe", "ぉ" => "xo",
    "っ" => "xtsu",
    "ゃ" => "xya", "ゅ" => "xyu", "ょ" => "xyo",
    "ゎ" => "xwa", "ゕ" => "xka", "ゖ" => "xke",

    // Prolonged sound mark
    "ー" => "-",

    // Consonant + glide digraphs
    "きゃ" => "kya", "きゅ" => "kyu", "きょ" => "kyo",
    "ぎゃ" => "gya", "ぎゅ" => "gyu", "ぎょ" => "gyo",
    "しゃ" => "sha", "しゅ" => "shu", "しょ" => "sho", "しぇ" => "she",
    "じゃ" => "ja", "じゅ" => "ju", "じょ" => "jo", "じぇ" => "je",
    "ちゃ" => "cha", "ちゅ" => "chu", "ちょ" => "cho", "ちぇ" => "che",
    "ぢゃ" => "dya", "ぢゅ" => "dyu", "ぢょ" => "dyo",
    "にゃ" => "nya", "にゅ" => "nyu", "にょ" => "nyo",
    "ひゃ" => "hya", "ひゅ" => "hyu", "ひょ" => "hyo",
    "びゃ" => "bya", "びゅ" => "byu", "びょ" => "byo",
    "ぴゃ" => "pya", "ぴゅ" => "pyu", "ぴょ" => "pyo",
    "みゃ" => "mya", "みゅ" => "myu", "みょ" => "myo",
    "りゃ" => "rya", "りゅ" => "ryu", "りょ" => "ryo",

    // Extended digraphs (mostly loanwords in katakana)
    "ふぁ" => "fa", "ふぃ" => "fi", "ふぇ" => "fe", "ふぉ" => "fo",
    "ゔぁ" => "va", "ゔぃ" => "vi", "ゔぇ" => "ve", "ゔぉ" => "vo",
    "うぃ" => "wi", "うぇ" => "we", "うぉ" => "wo",
    "てぃ" => "ti", "でぃ" => "di", "とぅ" => "tu", "どぅ" => "du",
    "つぁ" => "tsa", "つぃ" => "tsi", "つぇ" => "tse", "つぉ" => "tso",
    "いぇ" => "ye",
};

/// Map katakana onto hiragana, leaving every other character untouched
#[inline]
fn fold_katakana(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - KATAKANA_SHIFT).unwrap_or(c),
        _ => c,
    }
}

/// Romanization of a single kana character
pub fn romanize(c: char) -> Option<&'static str> {
    let mut buf = [0u8; 4];
    ROMAJI.get(fold_katakana(c).encode_utf8(&mut buf)).copied()
}

/// Romanization of a two-character kana digraph such as `しゃ`
pub fn romanize_pair(first: char, second: char) -> Option<&'static str> {
    let mut buf = [0u8; 8];
    let head = fold_katakana(first).encode_utf8(&mut buf).len();
    let tail = fold_katakana(second).encode_utf8(&mut buf[head..]).len();
    let key = std::str::from_utf8(&buf[..head + tail]).ok()?;
    ROMAJI.get(key).copied()
}
