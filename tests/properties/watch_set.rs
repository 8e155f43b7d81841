//! Property tests for watch-set reconciliation.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};

use proptest::prelude::*;

use dirwatcher::watcher::{matches_extension, WatchSet};

fn file_name() -> impl Strategy<Value = String> {
    ("[a-e]{1,3}", prop_oneof![Just(".txt"), Just(".log"), Just(".TXT"), Just("")])
        .prop_map(|(stem, ext)| format!("{stem}{ext}"))
}

fn listing() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(file_name(), 0..=10).prop_map(|set| set.into_iter().collect())
}

fn lossy_set<'a>(names: impl IntoIterator<Item = &'a OsStr>) -> BTreeSet<String> {
    names
        .into_iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

fn expected(listing: &[String]) -> BTreeSet<String> {
    listing
        .iter()
        .filter(|name| matches_extension(name, ".txt"))
        .cloned()
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After reconciliation the set holds exactly the matching names,
    /// whatever order the listing arrives in.
    #[test]
    fn property_reconcile_is_set_equality(
        names in listing().prop_shuffle(),
    ) {
        let mut forward = WatchSet::new();
        forward.reconcile(&names, ".txt");

        let mut reversed = WatchSet::new();
        reversed.reconcile(names.iter().rev(), ".txt");

        let forward_names = lossy_set(forward.names());
        let reversed_names = lossy_set(reversed.names());

        prop_assert_eq!(&forward_names, &expected(&names));
        prop_assert_eq!(forward_names, reversed_names);
    }

    /// PROPERTY: Across a sequence of listings, additions and removals are
    /// exactly the set differences and surviving offsets are preserved.
    #[test]
    fn property_reconcile_sequence_tracks_differences(
        listings in proptest::collection::vec(listing(), 1..=6),
        offset in 1usize..100,
    ) {
        let mut set = WatchSet::new();
        let mut previous: BTreeSet<String> = BTreeSet::new();

        for names in &listings {
            let current = expected(names);
            let result = set.reconcile(names, ".txt");

            let added = lossy_set(result.added.iter().map(OsString::as_os_str));
            let removed = lossy_set(result.removed.iter().map(OsString::as_os_str));

            let want_added: BTreeSet<String> = current.difference(&previous).cloned().collect();
            let want_removed: BTreeSet<String> = previous.difference(&current).cloned().collect();
            prop_assert_eq!(&added, &want_added);
            prop_assert_eq!(&removed, &want_removed);

            for name in current.intersection(&previous) {
                prop_assert_eq!(set.next_line(name), Some(offset));
            }
            for name in &added {
                prop_assert_eq!(set.next_line(name), Some(0));
            }

            for name in &current {
                set.set_next_line(name, offset);
            }
            previous = current;
        }
    }
}
