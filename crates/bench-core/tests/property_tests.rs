//! Property-based tests for the ordered app list.

use bench_core::{AppList, AppName};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Remove(String),
}

fn op() -> impl Strategy<Value = Op> {
    let name = prop::sample::select(vec!["sparrow", "crm", "accounts", "toolkit", "hr"]);
    prop_oneof![
        name.clone().prop_map(|n| Op::Insert(n.to_string())),
        name.prop_map(|n| Op::Remove(n.to_string())),
    ]
}

proptest! {
    #[test]
    fn list_never_holds_duplicates(ops in prop::collection::vec(op(), 0..40)) {
        let mut list = AppList::new();
        for op in ops {
            match op {
                Op::Insert(n) => {
                    let was_present = list.contains(&n);
                    let inserted = list.insert(AppName::new(n).unwrap());
                    prop_assert_eq!(inserted, !was_present);
                }
                Op::Remove(n) => {
                    let was_present = list.contains(&n);
                    prop_assert_eq!(list.remove(&n).is_some(), was_present);
                    prop_assert!(!list.contains(&n));
                }
            }
            list.sort_with_primary("sparrow");

            let mut seen = std::collections::HashSet::new();
            for app in &list {
                prop_assert!(seen.insert(app.as_str().to_string()), "duplicate {}", app);
            }
            if list.contains("sparrow") {
                prop_assert_eq!(list.get(0).map(|a| a.as_str()), Some("sparrow"));
            }
        }
    }

    #[test]
    fn derived_names_are_valid_identifiers(repo in "[a-z][a-z0-9-]{0,15}") {
        let source = format!("https://example.com/org/{repo}.git");
        let name = AppName::from_source(&source).unwrap();
        prop_assert_eq!(name.as_str(), repo.replace('-', "_"));
    }
}
