use phonscore::alignment::{AlignmentIndex, PhoneMap};
use phonscore::error::{PhonScoreError, PsResult};
use phonscore::filter::{PatternFilter, PhoneClass};
use phonscore::ipa::{Phone, Transcript};
use phonscore::scorer::loader::GroupRecord;
use phonscore::scorer::{calc_ppc_aligned, AlignedGroup, ScoreResult};
use rstest::rstest;
use std::ptr;

fn map(target: &str, actual: &str, notation: &str) -> PhoneMap {
    PhoneMap::from_notation(
        Transcript::parse(target).unwrap(),
        Transcript::parse(actual).unwrap(),
        notation,
    )
    .unwrap()
}

fn result(
    target: usize,
    actual: usize,
    correct: usize,
    substituted: usize,
    deleted: usize,
    epen: usize,
) -> ScoreResult {
    ScoreResult {
        target,
        actual,
        correct,
        substituted,
        deleted,
        epen,
    }
}

// --- END-TO-END SCENARIOS ---
#[rstest]
#[case("ba", "ba", "0:0 1:1", result(2, 2, 2, 0, 0, 0))] // Perfect match
#[case("ba", "b", "0:0 1:-", result(2, 1, 1, 0, 1, 0))] // Explicit deletion
#[case("b", "ba", "0:0 -:1", result(1, 2, 1, 0, 0, 1))] // Explicit epenthesis
#[case("b", "ba", "0:0", result(1, 2, 1, 0, 0, 1))] // Unaligned actual phone
#[case("ba", "b", "0:0", result(2, 1, 1, 0, 1, 0))] // Unaligned target phone
#[case("ba", "pa", "0:0 1:1", result(2, 2, 1, 1, 0, 0))] // Substitution
#[case("", "", "", result(0, 0, 0, 0, 0, 0))] // Nothing at all
fn test_match_all_scenarios(
    #[case] target: &str,
    #[case] actual: &str,
    #[case] notation: &str,
    #[case] expected: ScoreResult,
) {
    let group = map(target, actual, notation);
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, false).unwrap();
    assert_eq!(res, expected, "{} / {} [{}]", target, actual, notation);
    assert!(res.is_consistent());
}

// --- DIACRITICS ---
#[rstest]
#[case(false, 0, 1)]
#[case(true, 1, 0)]
fn test_aspiration_toggle(
    #[case] ignore_diacritics: bool,
    #[case] correct: usize,
    #[case] substituted: usize,
) {
    let group = map("pʰ", "p", "0:0");
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, ignore_diacritics).unwrap();
    assert_eq!(res.correct, correct);
    assert_eq!(res.substituted, substituted);
    assert_eq!(res.target, 1);
}

#[rstest]
#[case(false, result(1, 1, 0, 1, 0, 0))]
#[case(true, result(1, 1, 1, 0, 0, 0))]
fn test_prenasalized_stop_scores_as_consonant(
    #[case] ignore_diacritics: bool,
    #[case] expected: ScoreResult,
) {
    let group = map("aᵐba", "aba", "0:0 1:1 2:2");
    let cons = calc_ppc_aligned(&group, &PhoneClass::Consonant, ignore_diacritics).unwrap();
    assert_eq!(cons, expected);

    // The prenasal never leaks onto the preceding vowel.
    let vow = calc_ppc_aligned(&group, &PhoneClass::Vowel, false).unwrap();
    assert_eq!(vow, result(2, 2, 2, 0, 0, 0));
}

#[test]
fn test_stripping_is_exact_and_case_sensitive() {
    // Different bases stay different even with diacritics stripped.
    let group = map("bʷ", "pʷ", "0:0");
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, true).unwrap();
    assert_eq!(res.substituted, 1);
    assert_eq!(res.correct, 0);
}

// --- FILTER ---
#[test]
fn test_consonant_filter_counts_only_consonants() {
    let group = map("ba", "ba", "0:0 1:1");
    let res = calc_ppc_aligned(&group, &PhoneClass::Consonant, false).unwrap();
    assert_eq!(res, result(1, 1, 1, 0, 0, 0));
}

#[test]
fn test_vowel_filter() {
    let group = map("bat", "bet", "0:0 1:1 2:2");
    let filter = PatternFilter::compile("\\v").unwrap();
    let res = calc_ppc_aligned(&group, &filter, true).unwrap();
    assert_eq!(res, result(1, 1, 0, 1, 0, 0));
}

#[test]
fn test_consonant_aligned_to_filtered_vowel_is_substituted_not_skipped() {
    // 't' is realized as a vowel: the vowel is invisible to the consonant
    // tally on the actual side, but the target consonant still has a counterpart.
    let group = map("ta", "aa", "0:0 1:1");
    let res = calc_ppc_aligned(&group, &PhoneClass::Consonant, false).unwrap();
    assert_eq!(res, result(1, 0, 0, 1, 0, 0));
}

#[test]
fn test_sides_are_filtered_independently() {
    // Consonant deleted, vowel epenthesized: the consonant tally sees only the deletion.
    let group = map("ka", "a", "0:- 1:0");
    let res = calc_ppc_aligned(&group, &PhoneClass::Consonant, false).unwrap();
    assert_eq!(res, result(1, 0, 0, 0, 1, 0));

    let res = calc_ppc_aligned(&group, &PhoneClass::Vowel, false).unwrap();
    assert_eq!(res, result(1, 1, 1, 0, 0, 0));
}

#[test]
fn test_stress_and_boundaries_are_not_scored() {
    let group = map("ˈba.na", "ˈba.na", "0:0 1:1 2:2 3:3");
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, true).unwrap();
    assert_eq!(res, result(4, 4, 4, 0, 0, 0));
}

// --- ERRORS ---
#[test]
fn test_filter_errors_propagate_unchanged() {
    let group = map("ba", "ba", "0:0 1:1");
    let failing = |_: &[&Phone]| -> PsResult<bool> {
        Err(PhonScoreError::Pattern {
            pattern: "[".to_string(),
            position: 0,
            message: "unclosed '['".to_string(),
        })
    };
    let err = calc_ppc_aligned(&group, &failing, false).unwrap_err();
    assert!(matches!(err, PhonScoreError::Pattern { ref pattern, .. } if pattern == "["));
}

#[test]
fn test_filter_sees_single_phone() {
    let group = map("bat", "bat", "0:0 1:1 2:2");
    let seen_one = |phones: &[&Phone]| -> PsResult<bool> { Ok(phones.len() == 1) };
    let res = calc_ppc_aligned(&group, &seen_one, false).unwrap();
    assert_eq!(res.target, 3);
    assert_eq!(res.actual, 3);
}

// --- ABSENT SIDES ---
#[test]
fn test_absent_actual_side_scores_as_empty() {
    let group = GroupRecord::parse("r1", "ba", "", "").unwrap();
    assert!(group.actual_phones().is_none());
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, true).unwrap();
    assert_eq!(res, result(2, 0, 0, 0, 2, 0));
}

#[test]
fn test_absent_target_side_scores_as_empty() {
    let group = GroupRecord::parse("r1", "", "ba", "").unwrap();
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, true).unwrap();
    assert_eq!(res, result(0, 2, 0, 0, 0, 2));
}

// --- MULTI-COUNTERPART ALIGNMENTS ---

/// Aligns the single target phone to every actual phone, in order.
struct SplitGroup {
    target: Vec<Phone>,
    actual: Vec<Phone>,
}

impl AlignmentIndex<Phone> for SplitGroup {
    fn aligned_from_target<'a>(&'a self, phone: &Phone) -> Vec<Option<&'a Phone>> {
        if self.target.iter().any(|p| ptr::eq(p, phone)) {
            self.actual.iter().map(Some).collect()
        } else {
            Vec::new()
        }
    }

    fn aligned_from_actual<'a>(&'a self, phone: &Phone) -> Vec<Option<&'a Phone>> {
        if self.actual.iter().any(|p| ptr::eq(p, phone)) {
            self.target.iter().map(Some).collect()
        } else {
            Vec::new()
        }
    }
}

impl AlignedGroup for SplitGroup {
    type Alignment = SplitGroup;

    fn target_phones(&self) -> Option<Vec<&Phone>> {
        Some(self.target.iter().collect())
    }

    fn actual_phones(&self) -> Option<Vec<&Phone>> {
        Some(self.actual.iter().collect())
    }

    fn phone_alignment(&self) -> &SplitGroup {
        self
    }
}

#[rstest]
#[case("t", "ʃ", 1, 0)] // First counterpart matches
#[case("ʃ", "t", 0, 1)] // Only the second would match
fn test_only_first_counterpart_is_used(
    #[case] first: &str,
    #[case] second: &str,
    #[case] correct: usize,
    #[case] substituted: usize,
) {
    let phone = |s: &str| Transcript::parse(s).unwrap().phones()[0].clone();
    let group = SplitGroup {
        target: vec![phone("t")],
        actual: vec![phone(first), phone(second)],
    };
    let res = calc_ppc_aligned(&group, &PhoneClass::Word, false).unwrap();
    assert_eq!(res.correct, correct);
    assert_eq!(res.substituted, substituted);
    assert_eq!(res.epen, 0);
    assert_eq!(res.actual, 2);
}

// --- AGGREGATION ---
#[test]
fn test_results_sum_and_percentages() {
    let a = result(2, 2, 2, 0, 0, 0);
    let b = result(2, 1, 1, 0, 1, 0);
    let total: ScoreResult = [a, b].into_iter().sum();
    assert_eq!(total, result(4, 3, 3, 0, 1, 0));
    assert_eq!(total.percent_correct(), Some(75.0));
    assert_eq!(total.percent_deleted(), Some(25.0));
    assert_eq!(total.percent_epenthesized(), Some(0.0));
    assert_eq!(ScoreResult::default().percent_correct(), None);
}
