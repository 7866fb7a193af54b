pub mod tokens;

use self::tokens::{base_class, is_base, token_type, TokenType};
use crate::error::{PhonScoreError, PsResult};
use std::fmt;

/// A single transcribed segment: one base glyph (or two joined by a tie bar)
/// plus the diacritics attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phone {
    pub prefix: Option<char>,
    pub base: String,
    pub combining: Vec<char>,
    pub length: String,
    pub suffix: Vec<char>,
    pub tone: Vec<char>,
}

impl Phone {
    pub fn new(base: char) -> Self {
        Self {
            base: base.to_string(),
            ..Default::default()
        }
    }

    /// Full transcription: prefix, base, combining, length, suffix, tone.
    pub fn text(&self) -> String {
        let mut s = String::with_capacity(self.base.len() + 8);
        if let Some(p) = self.prefix {
            s.push(p);
        }
        s.push_str(&self.base);
        s.extend(self.combining.iter());
        s.push_str(&self.length);
        s.extend(self.suffix.iter());
        s.extend(self.tone.iter());
        s
    }

    /// Copy of this phone with only its base glyph(s).
    pub fn stripped(&self) -> Phone {
        Phone {
            base: self.base.clone(),
            ..Default::default()
        }
    }

    pub fn has_diacritics(&self) -> bool {
        self.prefix.is_some()
            || !self.combining.is_empty()
            || !self.length.is_empty()
            || !self.suffix.is_empty()
            || !self.tone.is_empty()
    }

    /// Class of the first base glyph, with cover symbols resolved.
    pub fn base_class(&self) -> Option<TokenType> {
        self.base.chars().next().and_then(base_class)
    }

    pub fn is_consonant(&self) -> bool {
        matches!(
            self.base_class(),
            Some(TokenType::Consonant) | Some(TokenType::Glide)
        )
    }

    pub fn is_vowel(&self) -> bool {
        self.base_class() == Some(TokenType::Vowel)
    }

    pub fn is_glide(&self) -> bool {
        self.base_class() == Some(TokenType::Glide)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpaElement {
    Phone(Phone),
    Stress(char),
    SyllableBoundary,
    WordBoundary,
    /// Pause of 1 to 3 dots, written `(.)` .. `(...)`. `…` reads as `(...)`.
    Pause(u8),
}

impl IpaElement {
    pub fn as_phone(&self) -> Option<&Phone> {
        match self {
            IpaElement::Phone(p) => Some(p),
            _ => None,
        }
    }

    fn is_punctuation(&self) -> bool {
        matches!(
            self,
            IpaElement::Stress(_) | IpaElement::SyllableBoundary | IpaElement::Pause(_)
        )
    }
}

impl fmt::Display for IpaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpaElement::Phone(p) => write!(f, "{}", p),
            IpaElement::Stress(c) => write!(f, "{}", c),
            IpaElement::SyllableBoundary => f.write_str("."),
            IpaElement::WordBoundary => f.write_str(" "),
            IpaElement::Pause(n) => write!(f, "({})", ".".repeat(*n as usize)),
        }
    }
}

/// An ordered IPA transcription. Only its phones take part in alignment and scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    elements: Vec<IpaElement>,
}

impl Transcript {
    pub fn new(elements: Vec<IpaElement>) -> Self {
        Self { elements }
    }

    pub fn from_phones<I: IntoIterator<Item = Phone>>(phones: I) -> Self {
        Self {
            elements: phones.into_iter().map(IpaElement::Phone).collect(),
        }
    }

    pub fn elements(&self) -> &[IpaElement] {
        &self.elements
    }

    /// Audible phones, in order.
    pub fn phones(&self) -> Vec<&Phone> {
        self.elements.iter().filter_map(IpaElement::as_phone).collect()
    }

    pub fn phone_count(&self) -> usize {
        self.elements.iter().filter(|e| e.as_phone().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drops stress marks, syllable boundaries and pauses. Word boundaries are kept.
    pub fn remove_punctuation(&self) -> Transcript {
        Transcript {
            elements: self
                .elements
                .iter()
                .filter(|e| !e.is_punctuation())
                .cloned()
                .collect(),
        }
    }

    pub fn strip_diacritics(&self) -> Transcript {
        Transcript {
            elements: self
                .elements
                .iter()
                .map(|e| match e {
                    IpaElement::Phone(p) => IpaElement::Phone(p.stripped()),
                    other => other.clone(),
                })
                .collect(),
        }
    }

    pub fn parse(input: &str) -> PsResult<Transcript> {
        let chars: Vec<char> = input.chars().collect();
        let mut elements: Vec<IpaElement> = Vec::new();
        let mut current: Option<Phone> = None;
        let mut pending_prefix: Option<(usize, char)> = None;

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let Some(tt) = token_type(c) else {
                return Err(PhonScoreError::transcript(
                    input,
                    i,
                    format!("unknown glyph '{}'", c),
                ));
            };

            if let Some((pos, _)) = pending_prefix {
                match tt {
                    TokenType::Consonant
                    | TokenType::Vowel
                    | TokenType::Glide
                    | TokenType::CoverSymbol => {}
                    TokenType::Modifier | TokenType::Prenasal => {
                        return Err(PhonScoreError::transcript(
                            input,
                            i,
                            "more than one prefix diacritic",
                        ))
                    }
                    _ => {
                        return Err(PhonScoreError::transcript(
                            input,
                            pos,
                            "prefix diacritic has no base glyph",
                        ))
                    }
                }
            }

            match tt {
                TokenType::Consonant
                | TokenType::Vowel
                | TokenType::Glide
                | TokenType::CoverSymbol => {
                    if let Some(p) = current.take() {
                        elements.push(IpaElement::Phone(p));
                    }
                    let mut phone = Phone::new(c);
                    phone.prefix = pending_prefix.take().map(|(_, p)| p);
                    current = Some(phone);
                }
                TokenType::Tie => {
                    let phone = match current.as_mut() {
                        Some(p)
                            if p.base.chars().count() == 1
                                && p.combining.is_empty()
                                && p.length.is_empty()
                                && p.suffix.is_empty()
                                && p.tone.is_empty() =>
                        {
                            p
                        }
                        _ => {
                            return Err(PhonScoreError::transcript(
                                input,
                                i,
                                "tie bar must follow a bare base glyph",
                            ))
                        }
                    };
                    match chars.get(i + 1) {
                        Some(&next) if is_base(next) => {
                            phone.base.push(c);
                            phone.base.push(next);
                            i += 1;
                        }
                        _ => {
                            return Err(PhonScoreError::transcript(
                                input,
                                i,
                                "tie bar must be followed by a base glyph",
                            ))
                        }
                    }
                }
                // Word-initial modifiers are prefixes, later ones belong to the open phone.
                TokenType::Modifier => match current.as_mut() {
                    Some(p) => p.suffix.push(c),
                    None => pending_prefix = Some((i, c)),
                },
                TokenType::Prenasal => pending_prefix = Some((i, c)),
                TokenType::CombiningDiacritic | TokenType::Length | TokenType::Tone => {
                    let Some(p) = current.as_mut() else {
                        return Err(PhonScoreError::transcript(
                            input,
                            i,
                            format!("diacritic '{}' has no base glyph", c),
                        ));
                    };
                    match tt {
                        TokenType::CombiningDiacritic => p.combining.push(c),
                        TokenType::Length => p.length.push(c),
                        _ => p.tone.push(c),
                    }
                }
                TokenType::Stress | TokenType::SyllableBoundary | TokenType::WordBoundary => {
                    if let Some(p) = current.take() {
                        elements.push(IpaElement::Phone(p));
                    }
                    match tt {
                        TokenType::Stress => elements.push(IpaElement::Stress(c)),
                        TokenType::SyllableBoundary => elements.push(IpaElement::SyllableBoundary),
                        _ => {
                            if !matches!(elements.last(), None | Some(IpaElement::WordBoundary)) {
                                elements.push(IpaElement::WordBoundary);
                            }
                        }
                    }
                }
                TokenType::Ellipsis => {
                    if let Some(p) = current.take() {
                        elements.push(IpaElement::Phone(p));
                    }
                    elements.push(IpaElement::Pause(3));
                }
                TokenType::PauseOpen => {
                    if let Some(p) = current.take() {
                        elements.push(IpaElement::Phone(p));
                    }
                    let dots = chars[i + 1..].iter().take_while(|&&d| d == '.').count();
                    let close = i + 1 + dots;
                    if !(1..=3).contains(&dots) || chars.get(close) != Some(&')') {
                        return Err(PhonScoreError::transcript(input, i, "malformed pause"));
                    }
                    elements.push(IpaElement::Pause(dots as u8));
                    i = close;
                }
            }
            i += 1;
        }

        if let Some((pos, _)) = pending_prefix {
            return Err(PhonScoreError::transcript(
                input,
                pos,
                "prefix diacritic has no base glyph",
            ));
        }
        if let Some(p) = current {
            elements.push(IpaElement::Phone(p));
        }
        if matches!(elements.last(), Some(IpaElement::WordBoundary)) {
            elements.pop();
        }

        Ok(Transcript { elements })
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.elements {
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Transcript {
    type Err = PhonScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transcript::parse(s)
    }
}
