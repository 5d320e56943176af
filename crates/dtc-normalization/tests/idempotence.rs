use dtc_normalization::{NormalizeMode, normalize};
use proptest::prelude::*;

const SAMPLES: &[&str] = &[
    "علي كريمي",
    "مکانیک دیزل, مکانیک سیبا",
    "آموزش pds , سطح یک",
    "ISO 10002 , ISO 10004",
    "شغل موازی (ارتقا)",
    "  EFI  Injection ,  Level-2 ",
    "می\u{200c}شود،",
    "a , , b",
    "",
];

#[test]
fn samples_are_idempotent() {
    for sample in SAMPLES {
        for mode in [NormalizeMode::Text, NormalizeMode::CourseTitle] {
            let once = normalize(sample, mode);
            assert_eq!(normalize(&once, mode), once, "sample {sample:?} mode {mode:?}");
        }
    }
}

fn cell_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("ي".to_string()),
            Just("ك".to_string()),
            Just("ی".to_string()),
            Just("\u{200c}".to_string()),
            Just("، ".to_string()),
            Just(", ".to_string()),
            Just("&&&".to_string()),
            Just("pds , ".to_string()),
            Just("دیزل".to_string()),
            "[a-zA-Z0-9 ,.()&-]{0,6}",
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in cell_text(), remove in any::<bool>()) {
        let mode = NormalizeMode::from_remove_spaces(remove);
        let once = normalize(&text, mode);
        prop_assert_eq!(normalize(&once, mode), once);
    }

    #[test]
    fn output_is_trimmed_and_collapsed(text in cell_text()) {
        let out = normalize(&text, NormalizeMode::Text);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
    }
}
