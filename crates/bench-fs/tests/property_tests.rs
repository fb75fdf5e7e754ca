use bench_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_join_never_doubles_separators(root in "/[a-z]{1,8}/?", segment in "[a-z_]{1,12}") {
        let joined = NormalizedPath::new(&root).join(&segment);
        prop_assert!(!joined.as_str().contains("//"));
        prop_assert_eq!(joined.file_name(), Some(segment.as_str()));
    }

    #[test]
    fn test_parent_of_join_is_original(root in "/[a-z]{1,8}", segment in "[a-z_]{1,12}") {
        let base = NormalizedPath::new(&root);
        let joined = base.join(&segment);
        prop_assert_eq!(joined.parent(), Some(base));
    }
}
