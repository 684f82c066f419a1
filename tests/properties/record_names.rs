//! Property tests for the on-disk record naming scheme.

use proptest::prelude::*;

use stylesmith::infrastructure::state::record_file_name;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: record file names contain only portable characters.
    #[test]
    fn property_record_name_is_filesystem_safe(name in "\\PC{1,40}") {
        let file = record_file_name(&name);
        let stem = file.strip_suffix(".toml").expect("toml extension");
        prop_assert!(!stem.is_empty());
        prop_assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '%'));
    }

    /// PROPERTY: distinct job names never map to the same record file.
    #[test]
    fn property_record_name_is_injective(a in "\\PC{1,24}", b in "\\PC{1,24}") {
        prop_assume!(a != b);
        prop_assert_ne!(record_file_name(&a), record_file_name(&b));
    }

    /// PROPERTY: plain identifiers are kept readable.
    #[test]
    fn property_plain_names_unchanged(name in "[A-Za-z0-9_-]{1,32}") {
        prop_assert_eq!(record_file_name(&name), format!("{}.toml", name));
    }
}
