use kdeps_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.is_empty());
        prop_assert!(as_str == "/" || !as_str.ends_with('/'));

        // Cleaning is idempotent
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_then_relative_roundtrip(
        base in "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
        rel in "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
    ) {
        let base = NormalizedPath::new(&base);
        let joined = base.join(&rel);

        let back = joined.relative_to(&base);
        prop_assert_eq!(back, Some(NormalizedPath::new(&rel)));
    }

    #[test]
    fn test_join_properties(a in "\\PC*", b in "\\PC*") {
        let p1 = NormalizedPath::new(&a);
        let joined = p1.join(&b);

        prop_assert!(!joined.as_str().contains('\\'));

        if b.is_empty() || b == "." {
            prop_assert_eq!(joined, p1);
        }
    }
}
