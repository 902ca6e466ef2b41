//! Property-based tests for identifier remapping.
//!
//! These tests use proptest to generate random namespaces and request
//! sequences and verify that allocation invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::remap::{IdRemapper, Namespace};
    use proptest::prelude::*;
    use std::collections::HashSet;

    // ============================================================================
    // string namespaces
    // ============================================================================

    proptest! {
        /// Property: distinct requests never receive the same id
        #[test]
        fn allocation_is_injective(
            existing in prop::collection::hash_set("[A-Za-z][A-Za-z0-9_]{0,8}", 0..20),
            requests in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,8}", 1..30),
            document in 1usize..5,
        ) {
            let mut remapper = IdRemapper::new(Namespace::Style, document, existing.iter().cloned());
            let mut assigned = HashSet::new();
            let mut seen = HashSet::new();
            for request in &requests {
                let id = remapper.allocate(request).unwrap();
                if seen.insert(request.clone()) {
                    prop_assert!(assigned.insert(id.clone()), "'{}' assigned twice", id);
                }
            }
        }

        /// Property: a free id is kept unchanged, a taken one is never returned
        #[test]
        fn free_ids_kept_taken_ids_replaced(
            existing in prop::collection::hash_set("[a-z]{1,4}", 0..15),
            request in "[a-z]{1,4}",
        ) {
            let mut remapper = IdRemapper::new(Namespace::Relationship, 1, existing.iter().cloned());
            let id = remapper.allocate(&request).unwrap();
            if existing.contains(&request) {
                prop_assert!(!existing.contains(&id));
                prop_assert!(id.starts_with("doc1_"));
            } else {
                prop_assert_eq!(id, request);
            }
        }

        /// Property: repeating a request within one append returns the same id
        #[test]
        fn allocation_is_idempotent(
            existing in prop::collection::hash_set("[a-z]{1,3}", 0..10),
            request in "[a-z]{1,3}",
        ) {
            let mut remapper = IdRemapper::new(Namespace::Style, 3, existing.iter().cloned());
            let first = remapper.allocate(&request).unwrap();
            let second = remapper.allocate(&request).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    // ============================================================================
    // numeric namespaces
    // ============================================================================

    proptest! {
        /// Property: numeric allocation never hands out a reserved id
        #[test]
        fn numeric_allocation_avoids_existing(
            existing in prop::collection::hash_set(0u32..50, 0..20),
            requests in prop::collection::vec(0u32..50, 1..20),
        ) {
            let mut remapper = IdRemapper::new(Namespace::AbstractNum, 1, existing.iter().copied());
            let mut assigned = HashSet::new();
            for request in &requests {
                let id = remapper.allocate(request).unwrap();
                prop_assert!(!existing.contains(&id));
                assigned.insert(id);
            }
            let distinct: HashSet<_> = requests.iter().collect();
            prop_assert_eq!(assigned.len(), distinct.len());
        }
    }
}
