use crate::error::{PhonScoreError, PsResult};
use crate::ipa::{Phone, Transcript};
use std::fmt;

/// Decides whether a phone sequence belongs to the class under evaluation.
/// The scorer only ever passes single-phone slices.
pub trait FilterPredicate<P> {
    fn check_filter(&self, phones: &[&P]) -> PsResult<bool>;
}

impl<P, F> FilterPredicate<P> for F
where
    F: Fn(&[&P]) -> PsResult<bool>,
{
    fn check_filter(&self, phones: &[&P]) -> PsResult<bool> {
        self(phones)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneClass {
    Word,
    Consonant,
    Vowel,
    Glide,
}

impl PhoneClass {
    pub fn contains(&self, phone: &Phone) -> bool {
        match self {
            PhoneClass::Word => true,
            PhoneClass::Consonant => phone.is_consonant(),
            PhoneClass::Vowel => phone.is_vowel(),
            PhoneClass::Glide => phone.is_glide(),
        }
    }

    pub fn escape(&self) -> &'static str {
        match self {
            PhoneClass::Word => "\\w",
            PhoneClass::Consonant => "\\c",
            PhoneClass::Vowel => "\\v",
            PhoneClass::Glide => "\\g",
        }
    }
}

impl FilterPredicate<Phone> for PhoneClass {
    fn check_filter(&self, phones: &[&Phone]) -> PsResult<bool> {
        Ok(matches!(phones, [p] if self.contains(p)))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Matcher {
    Class(PhoneClass),
    Any,
    BaseSet { glyphs: Vec<char>, negated: bool },
    Literal(String),
    BaseLiteral(String),
}

impl Matcher {
    fn matches(&self, phone: &Phone) -> bool {
        match self {
            Matcher::Class(class) => class.contains(phone),
            Matcher::Any => true,
            Matcher::BaseSet { glyphs, negated } => {
                let hit = phone.base.chars().next().is_some_and(|c| glyphs.contains(&c));
                hit != *negated
            }
            Matcher::Literal(text) => phone.text() == *text,
            Matcher::BaseLiteral(base) => phone.base == *base,
        }
    }
}

/// Exact-match single phone pattern.
///
/// Alternatives are separated by `|`. Each alternative is one of `\w`, `\c`,
/// `\v`, `\g`, `.`, a base glyph set `[ptk]` / `[^ptk]`, a literal phone
/// (`pʰ`) or a literal base ignoring diacritics (`p*`).
#[derive(Debug, Clone, PartialEq)]
pub struct PatternFilter {
    source: String,
    alternatives: Vec<Matcher>,
}

impl PatternFilter {
    pub fn compile(pattern: &str) -> PsResult<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut alternatives = Vec::new();
        let mut i = 0;
        loop {
            let (matcher, next) = parse_alternative(pattern, &chars, i)?;
            alternatives.push(matcher);
            if next >= chars.len() {
                break;
            }
            i = next + 1;
        }
        Ok(Self {
            source: pattern.to_string(),
            alternatives,
        })
    }

    pub fn for_class(class: PhoneClass) -> Self {
        Self {
            source: class.escape().to_string(),
            alternatives: vec![Matcher::Class(class)],
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, phone: &Phone) -> bool {
        self.alternatives.iter().any(|m| m.matches(phone))
    }
}

impl fmt::Display for PatternFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FilterPredicate<Phone> for PatternFilter {
    fn check_filter(&self, phones: &[&Phone]) -> PsResult<bool> {
        Ok(matches!(phones, [p] if self.matches(p)))
    }
}

fn skip_ws(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Parses one alternative starting at `start`. Returns the matcher and the
/// index of the terminating `|` (or `chars.len()`).
fn parse_alternative(pattern: &str, chars: &[char], start: usize) -> PsResult<(Matcher, usize)> {
    let err = |pos: usize, msg: &str| PhonScoreError::pattern(pattern, pos, msg);

    let i = skip_ws(chars, start);
    let (matcher, end) = match chars.get(i) {
        None | Some('|') => return Err(err(i, "empty alternative")),
        Some('\\') => {
            let class = match chars.get(i + 1) {
                Some('w') => PhoneClass::Word,
                Some('c') => PhoneClass::Consonant,
                Some('v') => PhoneClass::Vowel,
                Some('g') => PhoneClass::Glide,
                Some(_) => return Err(err(i + 1, "unknown phone class escape")),
                None => return Err(err(i, "dangling escape")),
            };
            (Matcher::Class(class), i + 2)
        }
        Some('.') => (Matcher::Any, i + 1),
        Some('[') => {
            let negated = chars.get(i + 1) == Some(&'^');
            let body_start = if negated { i + 2 } else { i + 1 };
            let Some(close) = chars[body_start.min(chars.len())..]
                .iter()
                .position(|&c| c == ']')
                .map(|p| p + body_start)
            else {
                return Err(err(i, "unclosed '['"));
            };
            let glyphs: Vec<char> = chars[body_start..close].to_vec();
            if glyphs.is_empty() {
                return Err(err(i, "empty glyph set"));
            }
            (Matcher::BaseSet { glyphs, negated }, close + 1)
        }
        Some(']') => return Err(err(i, "unbalanced ']'")),
        Some(_) => {
            let end = (i..chars.len())
                .find(|&j| chars[j].is_whitespace() || chars[j] == '|')
                .unwrap_or(chars.len());
            let raw: String = chars[i..end].iter().collect();
            let (text, base_only) = match raw.strip_suffix('*') {
                Some(stripped) => (stripped, true),
                None => (raw.as_str(), false),
            };
            let phone = literal_phone(text).map_err(|msg| err(i, &msg))?;
            let matcher = if base_only {
                Matcher::BaseLiteral(phone.base)
            } else {
                Matcher::Literal(phone.text())
            };
            (matcher, end)
        }
    };

    let next = skip_ws(chars, end);
    match chars.get(next) {
        None | Some('|') => Ok((matcher, next)),
        Some(_) => Err(err(next, "unexpected character after alternative")),
    }
}

fn literal_phone(text: &str) -> Result<Phone, String> {
    let transcript = Transcript::parse(text).map_err(|e| e.to_string())?;
    match transcript.elements() {
        [crate::ipa::IpaElement::Phone(p)] => Ok(p.clone()),
        _ => Err(format!("literal '{}' is not a single phone", text)),
    }
}
