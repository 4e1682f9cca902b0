// tests/property_scan.rs

use std::collections::BTreeSet;

use proptest::prelude::*;
use scanwatch::fs::mock::MockFileSystem;
use scanwatch::watch::Watcher;
use scanwatch_test_utils::RecordingObserver;

const PATHS: [&str; 4] = ["p0", "p1", "p2", "p3"];

#[derive(Debug, Clone, Copy)]
enum Op {
    Touch(usize),
    Remove(usize),
    Scan,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PATHS.len()).prop_map(Op::Touch),
        (0..PATHS.len()).prop_map(Op::Remove),
        Just(Op::Scan),
    ]
}

proptest! {
    // With every path declared on every scan, a scan after the first one
    // notifies exactly when some path was (re)created or modified since the
    // previous scan and still exists now.
    #[test]
    fn notifies_iff_an_existing_path_was_touched(
        initially_present in proptest::collection::vec(any::<bool>(), PATHS.len()),
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let fs = MockFileSystem::new();
        for (i, present) in initially_present.iter().enumerate() {
            if *present {
                fs.touch(PATHS[i]);
            }
        }

        let mut w = Watcher::with_fs(fs.clone());
        // Duplicate entry on purpose: it must never cause a second notification.
        let n = RecordingObserver::new("all", PATHS.iter().chain(&PATHS[..1]).copied());
        w.register(n.clone());

        let mut scans = 0usize;
        let mut touched: BTreeSet<usize> = BTreeSet::new();
        let mut expected_updates = 0usize;

        for op in ops {
            match op {
                Op::Touch(i) => {
                    fs.touch(PATHS[i]);
                    touched.insert(i);
                }
                Op::Remove(i) => {
                    fs.remove(PATHS[i]);
                }
                Op::Scan => {
                    let expected = scans > 0
                        && touched.iter().any(|&i| fs.exists(PATHS[i]));
                    let report = w.scan();
                    scans += 1;
                    touched.clear();

                    prop_assert_eq!(report.changed, expected);
                    prop_assert!(report.notified.len() <= 1);
                    prop_assert!(report.failures.is_empty());
                    if expected {
                        expected_updates += 1;
                    }
                    prop_assert_eq!(n.updates(), expected_updates);
                    prop_assert_eq!(w.index().len(), PATHS.len());
                }
            }
        }
    }

    // Pruning keeps the index equal to the union of the paths declared in
    // the most recent scan.
    #[test]
    fn index_matches_latest_declarations(
        declarations in proptest::collection::vec(
            proptest::collection::vec(0..PATHS.len(), 0..6),
            1..10,
        ),
    ) {
        let fs = MockFileSystem::new();
        for p in PATHS {
            fs.touch(p);
        }
        let mut w = Watcher::with_fs(fs);
        let n = RecordingObserver::new("n", Vec::<String>::new());
        w.register(n.clone());

        for declared in declarations {
            n.set_paths(declared.iter().map(|&i| PATHS[i]));
            let report = w.scan();
            prop_assert!(!report.changed);

            let expected: BTreeSet<&str> = declared.iter().map(|&i| PATHS[i]).collect();
            let actual: BTreeSet<&str> = w
                .index()
                .paths()
                .filter_map(|p| p.to_str())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
