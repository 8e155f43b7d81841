//! Property tests for the incremental scan engine.

use std::io::Cursor;

use proptest::prelude::*;

use dirwatcher::scan_reader;

fn line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z ]{0,12}").unwrap()
}

fn full_scan(content: &str, from: usize, marker: &str) -> (Vec<usize>, usize) {
    let mut found = Vec::new();
    let total = scan_reader(Cursor::new(content), from, marker, |n| found.push(n)).unwrap();
    (found, total)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Scanning a prefix and then the grown file reports every
    /// matching line exactly once, same as one scan of the final content.
    #[test]
    fn property_incremental_scan_reports_each_line_once(
        lines in proptest::collection::vec(line(), 0..=20),
        split in 0usize..=20,
    ) {
        let split = split.min(lines.len());
        let prefix: String = lines[..split].iter().map(|l| format!("{l}\n")).collect();
        let full: String = lines.iter().map(|l| format!("{l}\n")).collect();

        let (first, offset) = full_scan(&prefix, 0, "ME");
        let (second, total) = full_scan(&full, offset, "ME");
        let (all, _) = full_scan(&full, 0, "ME");

        let mut combined = first;
        combined.extend(second);
        prop_assert_eq!(combined, all);
        prop_assert_eq!(offset, split);
        prop_assert_eq!(total, lines.len());
    }

    /// PROPERTY: Rescanning unchanged content from the returned offset is silent
    /// and returns the same offset.
    #[test]
    fn property_rescan_is_idempotent(
        lines in proptest::collection::vec(line(), 0..=20),
    ) {
        let content = lines.join("\n");
        let (_, offset) = full_scan(&content, 0, "ME");
        let (again, same) = full_scan(&content, offset, "ME");

        prop_assert!(again.is_empty());
        prop_assert_eq!(same, offset);
    }

    /// PROPERTY: Reported line numbers are 1-based, increasing, at or past the
    /// start offset, and point at lines containing the marker.
    #[test]
    fn property_matches_point_at_marker_lines(
        lines in proptest::collection::vec(line(), 0..=20),
        from in 0usize..=25,
    ) {
        let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let (found, _) = full_scan(&content, from, "ME");

        prop_assert!(found.windows(2).all(|w| w[0] < w[1]));
        for n in found {
            prop_assert!(n > from);
            prop_assert!(lines[n - 1].contains("ME"));
        }
    }

    /// PROPERTY: The scanner never panics on arbitrary bytes.
    #[test]
    fn property_scan_never_panics(
        bytes in proptest::collection::vec(any::<u8>(), 0..=256),
        from in 0usize..=8,
    ) {
        let _ = scan_reader(bytes.as_slice(), from, "ME", |_| {});
    }
}
