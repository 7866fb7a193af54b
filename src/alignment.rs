use crate::error::{PhonScoreError, PsResult};
use crate::ipa::{IpaElement, Phone, Transcript};
use std::collections::HashSet;
use std::ptr;

/// Direction-aware lookup of the phones aligned to a given phone.
///
/// Lookups are by identity: `phone` must be a reference handed out by the
/// same index (or the group that owns it). An empty vector means the index
/// knows nothing about the phone; a `None` entry is an explicit gap.
pub trait AlignmentIndex<P> {
    fn aligned_from_target<'a>(&'a self, phone: &P) -> Vec<Option<&'a P>>;
    fn aligned_from_actual<'a>(&'a self, phone: &P) -> Vec<Option<&'a P>>;
}

/// One alignment column: target phone index, actual phone index, `None` for a gap.
pub type Column = (Option<usize>, Option<usize>);

/// Phone-by-phone alignment between a target and an actual transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneMap {
    target: Transcript,
    actual: Transcript,
    target_slots: Vec<usize>,
    actual_slots: Vec<usize>,
    columns: Vec<Column>,
}

fn phone_slots(t: &Transcript) -> Vec<usize> {
    t.elements()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| matches!(e, IpaElement::Phone(_)).then_some(i))
        .collect()
}

impl PhoneMap {
    pub fn new(target: Transcript, actual: Transcript, columns: Vec<Column>) -> PsResult<Self> {
        let target_slots = phone_slots(&target);
        let actual_slots = phone_slots(&actual);

        let mut seen_top = HashSet::new();
        let mut seen_bottom = HashSet::new();
        for (col, &(t, a)) in columns.iter().enumerate() {
            if t.is_none() && a.is_none() {
                return Err(PhonScoreError::Alignment(format!(
                    "column {} aligns a gap with a gap",
                    col
                )));
            }
            if let Some(t) = t {
                if t >= target_slots.len() {
                    return Err(PhonScoreError::Alignment(format!(
                        "target index {} out of range (target has {} phones)",
                        t,
                        target_slots.len()
                    )));
                }
                if !seen_top.insert(t) {
                    return Err(PhonScoreError::Alignment(format!(
                        "target index {} aligned more than once",
                        t
                    )));
                }
            }
            if let Some(a) = a {
                if a >= actual_slots.len() {
                    return Err(PhonScoreError::Alignment(format!(
                        "actual index {} out of range (actual has {} phones)",
                        a,
                        actual_slots.len()
                    )));
                }
                if !seen_bottom.insert(a) {
                    return Err(PhonScoreError::Alignment(format!(
                        "actual index {} aligned more than once",
                        a
                    )));
                }
            }
        }

        Ok(Self {
            target,
            actual,
            target_slots,
            actual_slots,
            columns,
        })
    }

    /// Aligns phone `i` with phone `i`; the longer side's tail is aligned to gaps.
    pub fn identity(target: Transcript, actual: Transcript) -> PsResult<Self> {
        let n_top = target.phone_count();
        let n_bottom = actual.phone_count();
        let columns = (0..n_top.max(n_bottom))
            .map(|i| ((i < n_top).then_some(i), (i < n_bottom).then_some(i)))
            .collect();
        Self::new(target, actual, columns)
    }

    /// Parses whitespace separated `t:a` columns, `-` marking a gap (e.g. `0:0 1:- -:1`).
    pub fn from_notation(target: Transcript, actual: Transcript, notation: &str) -> PsResult<Self> {
        let columns = parse_notation(notation)?;
        Self::new(target, actual, columns)
    }

    pub fn to_notation(&self) -> String {
        let side = |i: Option<usize>| i.map_or_else(|| "-".to_string(), |i| i.to_string());
        self.columns
            .iter()
            .map(|&(t, a)| format!("{}:{}", side(t), side(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn target(&self) -> &Transcript {
        &self.target
    }

    pub fn actual(&self) -> &Transcript {
        &self.actual
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn target_phone(&self, i: usize) -> Option<&Phone> {
        let slot = *self.target_slots.get(i)?;
        self.target.elements()[slot].as_phone()
    }

    pub fn actual_phone(&self, i: usize) -> Option<&Phone> {
        let slot = *self.actual_slots.get(i)?;
        self.actual.elements()[slot].as_phone()
    }

    pub fn target_phones(&self) -> Vec<&Phone> {
        self.target.phones()
    }

    pub fn actual_phones(&self) -> Vec<&Phone> {
        self.actual.phones()
    }

    /// Column-wise view of the alignment.
    pub fn aligned_pairs(&self) -> impl Iterator<Item = (Option<&Phone>, Option<&Phone>)> + '_ {
        self.columns.iter().map(move |&(t, a)| {
            (
                t.and_then(|i| self.target_phone(i)),
                a.and_then(|i| self.actual_phone(i)),
            )
        })
    }

    fn target_index_of(&self, phone: &Phone) -> Option<usize> {
        (0..self.target_slots.len())
            .find(|&i| self.target_phone(i).is_some_and(|p| ptr::eq(p, phone)))
    }

    fn actual_index_of(&self, phone: &Phone) -> Option<usize> {
        (0..self.actual_slots.len())
            .find(|&i| self.actual_phone(i).is_some_and(|p| ptr::eq(p, phone)))
    }
}

impl AlignmentIndex<Phone> for PhoneMap {
    fn aligned_from_target<'a>(&'a self, phone: &Phone) -> Vec<Option<&'a Phone>> {
        let Some(idx) = self.target_index_of(phone) else {
            return Vec::new();
        };
        self.columns
            .iter()
            .filter(|(t, _)| *t == Some(idx))
            .map(|&(_, a)| a.and_then(|a| self.actual_phone(a)))
            .collect()
    }

    fn aligned_from_actual<'a>(&'a self, phone: &Phone) -> Vec<Option<&'a Phone>> {
        let Some(idx) = self.actual_index_of(phone) else {
            return Vec::new();
        };
        self.columns
            .iter()
            .filter(|(_, a)| *a == Some(idx))
            .map(|&(t, _)| t.and_then(|t| self.target_phone(t)))
            .collect()
    }
}

fn parse_side(raw: &str, token: &str) -> PsResult<Option<usize>> {
    if raw == "-" {
        return Ok(None);
    }
    raw.parse::<usize>().map(Some).map_err(|_| {
        PhonScoreError::Alignment(format!("invalid index '{}' in column '{}'", raw, token))
    })
}

pub fn parse_notation(notation: &str) -> PsResult<Vec<Column>> {
    notation
        .split_whitespace()
        .map(|token| {
            let (t, a) = token.split_once(':').ok_or_else(|| {
                PhonScoreError::Alignment(format!("column '{}' is not of the form t:a", token))
            })?;
            Ok((parse_side(t, token)?, parse_side(a, token)?))
        })
        .collect()
}
