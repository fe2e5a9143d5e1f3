/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Wildcard matching and specificity ordering for control-entry lookup.

/// Sentinel matching any concrete value, with lowest specificity.
pub const WILDCARD: &str = "*";

/// True when `pattern` is the bare sentinel or a prefix pattern (`"dom*"`).
pub(crate) fn is_pattern(pattern: &str) -> bool {
    pattern.ends_with('*')
}

/// Pattern-aware field match. Queries are always concrete; stored fields may
/// be exact values, the bare sentinel, or a prefix pattern.
pub(crate) fn matches(pattern: &str, value: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => value.starts_with(prefix),
        None => pattern == value,
    }
}

/// Specificity rank of one stored entry against a concrete query.
///
/// Ordering is lexicographic over per-field wildness in the fixed precedence
/// uid > domain > interface > operation: an entry that is exact in a higher
/// field always outranks one that is wild there, regardless of lower fields.
/// Entries tied on wildness are ranked by longer (more specific) patterns.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct Specificity {
    fields: [(bool, std::cmp::Reverse<usize>); 4],
}

impl Specificity {
    pub(crate) fn rank(uid: &str, domain: &str, interface_name: &str, operation: &str) -> Self {
        let field = |pattern: &str| (is_pattern(pattern), std::cmp::Reverse(pattern.len()));
        Self {
            fields: [
                field(uid),
                field(domain),
                field(interface_name),
                field(operation),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_pattern, matches, Specificity, WILDCARD};

    #[test]
    fn bare_wildcard_matches_everything() {
        assert!(matches(WILDCARD, "anything"));
        assert!(matches(WILDCARD, ""));
    }

    #[test]
    fn prefix_pattern_matches_by_prefix() {
        assert!(matches("dom*", "dom1"));
        assert!(matches("dom*", "dom"));
        assert!(!matches("dom*", "other1"));
    }

    #[test]
    fn exact_pattern_needs_equality() {
        assert!(matches("domain", "domain"));
        assert!(!matches("domain", "domain1"));
    }

    #[test]
    fn pattern_detection_covers_sentinel_and_prefix() {
        assert!(is_pattern(WILDCARD));
        assert!(is_pattern("interface*"));
        assert!(!is_pattern("interface"));
    }

    #[test]
    fn exact_uid_outranks_wildcard_uid_regardless_of_lower_fields() {
        let exact_uid_wild_rest = Specificity::rank("user", "*", "*", "*");
        let wild_uid_exact_rest = Specificity::rank("*", "domain", "interface", "op");

        assert!(exact_uid_wild_rest < wild_uid_exact_rest);
    }

    #[test]
    fn operation_wildcard_outranks_domain_wildcard() {
        let wild_operation = Specificity::rank("user", "domain", "interface", "*");
        let wild_domain = Specificity::rank("user", "dom*", "interface", "op");

        assert!(wild_operation < wild_domain);
    }

    #[test]
    fn longer_prefix_is_more_specific() {
        let longer = Specificity::rank("user", "domai*", "interface", "op");
        let shorter = Specificity::rank("user", "dom*", "interface", "op");

        assert!(longer < shorter);
    }
}
