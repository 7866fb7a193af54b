//! Glyph tables for the IPA subset understood by the transcript parser.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Consonant,
    Vowel,
    Glide,
    CoverSymbol,
    /// Space-modifying glyph. Before a base it is a prefix diacritic, after a base a suffix.
    Modifier,
    /// Prenasalization mark; only ever a prefix of the following base.
    Prenasal,
    CombiningDiacritic,
    Tie,
    Length,
    Tone,
    Stress,
    SyllableBoundary,
    WordBoundary,
    PauseOpen,
    /// `…`, a long pause in a single glyph.
    Ellipsis,
}

const CONSONANTS: &str = "pbtdʈɖcɟkgɡqɢʔmɱnɳɲŋɴʙrʀⱱɾɽɸβfvθðszʃʒʂʐçʝxɣχʁħʕhɦɬɮʋɹɻlɭʎʟʘǀǃǂǁɓɗʄɠʛʍɕʑɺɧʜʢʡɫ";
const VOWELS: &str = "iyɨʉɯuɪʏʊeøɘɵɤoəɛœɜɞʌɔæɐaɶɑɒɚɝ";
const GLIDES: &str = "jwɥɰ";
const COVER_SYMBOLS: &str = "CVGN";
const MODIFIERS: &str = "ʰʱʷʲˠˤⁿˡʼ˞ʴᶣᵊ";
const PRENASALS: &str = "ᵐᵑ";
const LENGTH: &str = "ːˑ";
const TONES: &str = "˥˦˧˨˩¹²³⁴⁵";
const STRESS: &str = "ˈˌ";
const TIES: &str = "\u{0361}\u{035C}";

pub fn token_type(c: char) -> Option<TokenType> {
    if CONSONANTS.contains(c) {
        Some(TokenType::Consonant)
    } else if VOWELS.contains(c) {
        Some(TokenType::Vowel)
    } else if GLIDES.contains(c) {
        Some(TokenType::Glide)
    } else if COVER_SYMBOLS.contains(c) {
        Some(TokenType::CoverSymbol)
    } else if TIES.contains(c) {
        Some(TokenType::Tie)
    } else if ('\u{0300}'..='\u{036F}').contains(&c) {
        Some(TokenType::CombiningDiacritic)
    } else if PRENASALS.contains(c) {
        Some(TokenType::Prenasal)
    } else if MODIFIERS.contains(c) {
        Some(TokenType::Modifier)
    } else if LENGTH.contains(c) {
        Some(TokenType::Length)
    } else if TONES.contains(c) {
        Some(TokenType::Tone)
    } else if STRESS.contains(c) {
        Some(TokenType::Stress)
    } else {
        match c {
            '.' => Some(TokenType::SyllableBoundary),
            ' ' | '\t' => Some(TokenType::WordBoundary),
            '(' => Some(TokenType::PauseOpen),
            '…' => Some(TokenType::Ellipsis),
            _ => None,
        }
    }
}

/// True for glyphs that can stand as (the first part of) a phone's base.
pub fn is_base(c: char) -> bool {
    matches!(
        token_type(c),
        Some(TokenType::Consonant)
            | Some(TokenType::Vowel)
            | Some(TokenType::Glide)
            | Some(TokenType::CoverSymbol)
    )
}

/// Resolves cover symbols to the class they stand in for.
pub fn base_class(c: char) -> Option<TokenType> {
    match token_type(c)? {
        TokenType::CoverSymbol => match c {
            'V' => Some(TokenType::Vowel),
            'G' => Some(TokenType::Glide),
            _ => Some(TokenType::Consonant),
        },
        t @ (TokenType::Consonant | TokenType::Vowel | TokenType::Glide) => Some(t),
        _ => None,
    }
}
