//! # Entry Classifier
//!
//! Splits env entries into secrets and plain variables by key name. Keys whose
//! lowercased form contains any of the indicator substrings are routed to the
//! secrets bucket; everything else becomes a variable. Keys starting with the
//! reserved `AWS_PROFILE` prefix select a local profile and are excluded from
//! syncing entirely.
//!
//! Naming heuristics are imprecise by nature; false positives and negatives
//! are accepted in exchange for a reasonable default split.

use std::collections::BTreeMap;

/// Substrings that mark a key as sensitive, matched case-insensitively.
pub const SECRET_INDICATORS: [&str; 9] = [
    "secret", "key", "token", "bearer", "password", "pass", "pwd", "pword", "hash",
];

/// Keys with this prefix are neither secrets nor variables (case-sensitive).
pub const RESERVED_PREFIX: &str = "AWS_PROFILE";

/// Result of partitioning a set of env entries.
#[derive(Debug, Default, Clone)]
pub struct Classified {
    pub secrets: BTreeMap<String, String>,
    pub variables: BTreeMap<String, String>,
}

/// Partition entries into secrets and variables.
///
/// Every input key lands in exactly one bucket, except reserved-prefix keys
/// which land in neither.
pub fn classify(entries: &BTreeMap<String, String>) -> Classified {
    let mut classified = Classified::default();

    for (key, value) in entries {
        if key.starts_with(RESERVED_PREFIX) {
            continue;
        }

        let lowered = key.to_lowercase();
        if SECRET_INDICATORS
            .iter()
            .any(|indicator| lowered.contains(indicator))
        {
            classified.secrets.insert(key.clone(), value.clone());
        } else {
            classified.variables.insert(key.clone(), value.clone());
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn routes_indicator_keys_to_secrets() {
        let input = entries(&[
            ("DB_PASSWORD", "abc"),
            ("API_TOKEN", "xyz"),
            ("SSH_KEY", "k"),
            ("CONTENT_HASH", "h"),
        ]);
        let classified = classify(&input);
        assert_eq!(classified.secrets.len(), 4);
        assert!(classified.variables.is_empty());
    }

    #[test]
    fn routes_plain_keys_to_variables() {
        let input = entries(&[("REGION", "us-east-1"), ("LOG_LEVEL", "info")]);
        let classified = classify(&input);
        assert!(classified.secrets.is_empty());
        assert_eq!(classified.variables.len(), 2);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let input = entries(&[("db_password", "abc"), ("Api_Token", "xyz")]);
        let classified = classify(&input);
        assert!(classified.secrets.contains_key("db_password"));
        assert!(classified.secrets.contains_key("Api_Token"));
    }

    #[test]
    fn reserved_prefix_is_excluded() {
        let input = entries(&[("AWS_PROFILE", "dev"), ("AWS_PROFILE_NAME", "x")]);
        let classified = classify(&input);
        assert!(classified.secrets.is_empty());
        assert!(classified.variables.is_empty());
    }

    #[test]
    fn reserved_prefix_is_case_sensitive() {
        // Lowercased "aws_profile" is not reserved; it contains no indicator
        // either, so it syncs as a variable.
        let input = entries(&[("aws_profile", "dev")]);
        let classified = classify(&input);
        assert!(classified.variables.contains_key("aws_profile"));
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let input = entries(&[
            ("DB_PASSWORD", "a"),
            ("REGION", "b"),
            ("AWS_PROFILE", "c"),
            ("GH_TOKEN", "d"),
            ("LOG_LEVEL", "e"),
        ]);
        let classified = classify(&input);

        let mut seen = 0;
        for key in input.keys() {
            let in_secrets = classified.secrets.contains_key(key);
            let in_variables = classified.variables.contains_key(key);
            assert!(!(in_secrets && in_variables), "{key} landed in both buckets");
            if in_secrets || in_variables {
                seen += 1;
            } else {
                assert!(key.starts_with(RESERVED_PREFIX), "{key} vanished");
            }
        }
        assert_eq!(seen, classified.secrets.len() + classified.variables.len());
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let classified = classify(&BTreeMap::new());
        assert!(classified.secrets.is_empty());
        assert!(classified.variables.is_empty());
    }
}
