use phonscore::alignment::{parse_notation, AlignmentIndex, PhoneMap};
use phonscore::error::PhonScoreError;
use phonscore::ipa::Transcript;
use rstest::rstest;

fn t(s: &str) -> Transcript {
    Transcript::parse(s).unwrap()
}

#[test]
fn test_notation_parsing() {
    let cols = parse_notation("0:0 1:-  -:1").unwrap();
    assert_eq!(cols, vec![(Some(0), Some(0)), (Some(1), None), (None, Some(1))]);
    assert!(parse_notation("").unwrap().is_empty());
}

#[rstest]
#[case("0-0")]
#[case("a:0")]
#[case("0:x")]
fn test_bad_notation(#[case] notation: &str) {
    assert!(matches!(
        parse_notation(notation),
        Err(PhonScoreError::Alignment(_))
    ));
}

#[rstest]
#[case("ba", "b", "0:0 1:1")] // Actual index out of range
#[case("ba", "b", "2:0")] // Target index out of range
#[case("ba", "ba", "0:0 0:1")] // Target index reused
#[case("ba", "ba", "0:0 1:0")] // Actual index reused
#[case("ba", "ba", "-:-")] // Gap against gap
fn test_invalid_maps_are_rejected(
    #[case] target: &str,
    #[case] actual: &str,
    #[case] notation: &str,
) {
    let res = PhoneMap::from_notation(t(target), t(actual), notation);
    assert!(matches!(res, Err(PhonScoreError::Alignment(_))), "{}", notation);
}

#[test]
fn test_identity_pads_with_gaps() {
    let map = PhoneMap::identity(t("bat"), t("ba")).unwrap();
    assert_eq!(map.to_notation(), "0:0 1:1 2:-");

    let map = PhoneMap::identity(t("b"), t("ba")).unwrap();
    assert_eq!(map.to_notation(), "0:0 -:1");
}

#[test]
fn test_lookup_in_both_directions() {
    let map = PhoneMap::from_notation(t("ba"), t("pə"), "0:0 1:-  -:1").unwrap();
    let top = map.target_phones();
    let bottom = map.actual_phones();

    let aligned = map.aligned_from_target(top[0]);
    assert_eq!(aligned.len(), 1);
    assert_eq!(aligned[0].map(|p| p.text()), Some("p".to_string()));

    // Explicit gaps come back as a present-but-empty entry.
    assert_eq!(map.aligned_from_target(top[1]), vec![None]);
    assert_eq!(map.aligned_from_actual(bottom[1]), vec![None]);

    let back = map.aligned_from_actual(bottom[0]);
    assert!(std::ptr::eq(back[0].unwrap(), top[0]));
}

#[test]
fn test_unmentioned_phones_have_no_alignment() {
    let map = PhoneMap::from_notation(t("ba"), t("ba"), "0:0").unwrap();
    assert!(map.aligned_from_target(map.target_phones()[1]).is_empty());
    assert!(map.aligned_from_actual(map.actual_phones()[1]).is_empty());
}

#[test]
fn test_lookup_is_by_identity_not_value() {
    let map = PhoneMap::from_notation(t("b"), t("b"), "0:0").unwrap();
    let lookalike = t("b").phones()[0].clone();
    assert!(map.aligned_from_target(&lookalike).is_empty());
    assert_eq!(map.aligned_from_target(map.target_phones()[0]).len(), 1);
}

#[test]
fn test_indices_skip_punctuation() {
    let map = PhoneMap::from_notation(t("ˈba.na"), t("ba"), "0:0 1:1 2:- 3:-").unwrap();
    assert_eq!(map.target_phone(2).map(|p| p.text()), Some("n".to_string()));
    let pairs: Vec<_> = map
        .aligned_pairs()
        .map(|(a, b)| (a.map(|p| p.text()), b.map(|p| p.text())))
        .collect();
    assert_eq!(pairs[2], (Some("n".to_string()), None));
}
