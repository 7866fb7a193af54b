use super::{AlignedGroup, ScoreResult};
use crate::alignment::AlignmentIndex;
use crate::error::PsResult;
use crate::filter::FilterPredicate;
use crate::ipa::{Phone, Transcript};
use std::slice;

/// Comparable form of a phone. With `ignore_diacritics` the phone is taken
/// as a one-phone transcript with punctuation removed and diacritics stripped.
pub fn normalize(phone: &Phone, ignore_diacritics: bool) -> String {
    if ignore_diacritics {
        Transcript::from_phones([phone.clone()])
            .remove_punctuation()
            .strip_diacritics()
            .to_string()
    } else {
        phone.text()
    }
}

/// Counts correct, substituted, deleted and epenthesized phones of one
/// aligned group, restricted to phones accepted by `filter`.
///
/// Target and actual sides are walked independently: a phone filtered out
/// on one side never changes the tally of the other. Only the first aligned
/// counterpart of a phone is consulted.
pub fn calc_ppc_aligned<G, F>(group: &G, filter: &F, ignore_diacritics: bool) -> PsResult<ScoreResult>
where
    G: AlignedGroup,
    F: FilterPredicate<Phone> + ?Sized,
{
    let mut num_target = 0;
    let mut num_actual = 0;
    let mut num_correct = 0;
    let mut num_substituted = 0;
    let mut num_deleted = 0;
    let mut num_epen = 0;

    let target_phones = group.target_phones().unwrap_or_default();
    let actual_phones = group.actual_phones().unwrap_or_default();
    let alignment = group.phone_alignment();

    // 1. Target side: target, correct, substituted, deleted
    for phone in target_phones {
        if !filter.check_filter(slice::from_ref(&phone))? {
            continue;
        }
        num_target += 1;

        match alignment.aligned_from_target(phone).first() {
            Some(Some(actual_phone)) => {
                let target_str = normalize(phone, ignore_diacritics);
                let actual_str = normalize(actual_phone, ignore_diacritics);
                if target_str == actual_str {
                    num_correct += 1;
                } else {
                    num_substituted += 1;
                }
            }
            Some(None) | None => num_deleted += 1,
        }
    }

    // 2. Actual side: actual, epenthesized
    for phone in actual_phones {
        if !filter.check_filter(slice::from_ref(&phone))? {
            continue;
        }
        num_actual += 1;

        if !matches!(alignment.aligned_from_actual(phone).first(), Some(Some(_))) {
            num_epen += 1;
        }
    }

    Ok(ScoreResult {
        target: num_target,
        actual: num_actual,
        correct: num_correct,
        substituted: num_substituted,
        deleted: num_deleted,
        epen: num_epen,
    })
}
