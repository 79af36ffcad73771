use regex::Regex;

pub fn normalize_text(raw: &str) -> String {
    let stripped = raw
        .replace('\u{feff}', "")
        .replace('\r', "")
        .replace('\u{00a0}', " ")
        .replace('\u{00ad}', "")
        .replace('\u{000c}', "\n");

    let horizontal_runs = Regex::new(r"[ \t]+").expect("valid horizontal whitespace regex");
    let blank_runs = Regex::new(r"\n{3,}").expect("valid blank run regex");

    let collapsed = horizontal_runs.replace_all(&stripped, " ");
    let collapsed = blank_runs.replace_all(&collapsed, "\n\n");

    collapsed.trim().to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in any::<String>()) {
            let once = normalize_text(&raw);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn normalized_text_has_no_horizontal_runs(raw in any::<String>()) {
            let once = normalize_text(&raw);
            prop_assert!(!once.contains('\t'));
            prop_assert!(!once.contains("  "));
            prop_assert!(!once.contains("\n\n\n"));
        }
    }
}
