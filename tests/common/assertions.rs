//! Assertion utilities for testing.
//!
//! This module provides helper functions for asserting the pipeline's
//! bucketing and partitioning properties.

/// Assert that every bucket index is within `[0, n_colors - 1]`.
///
/// # Panics
///
/// Panics if any index is out of range.
pub fn assert_buckets_in_range(buckets: &[usize], n_colors: usize) {
    for (i, &bucket) in buckets.iter().enumerate() {
        assert!(
            bucket < n_colors,
            "Bucket out of range at row {}: bucket = {}, n_colors = {}",
            i,
            bucket,
            n_colors
        );
    }
}

/// Assert that bucket indices never decrease along the sort order.
///
/// # Panics
///
/// Panics if a later row has a smaller bucket than an earlier one.
pub fn assert_buckets_monotonic(buckets: &[usize]) {
    for (i, pair) in buckets.windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "Buckets not monotonic at rows {}..{}: {} > {}",
            i,
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

/// Assert that a partition covers its source exactly once.
///
/// # Panics
///
/// Panics if the two partition sizes do not add up to the source size.
pub fn assert_partition_complete(non_null: usize, null: usize, total: usize) {
    assert_eq!(
        non_null + null,
        total,
        "Partition incomplete: {} + {} != {}",
        non_null,
        null,
        total
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_buckets_in_range() {
        assert_buckets_in_range(&[0, 1, 2, 7], 8);
        // This would fail: assert_buckets_in_range(&[8], 8);
    }

    #[test]
    fn test_assert_buckets_monotonic() {
        assert_buckets_monotonic(&[0, 0, 1, 3, 3, 7]);
        // This would fail: assert_buckets_monotonic(&[1, 0]);
    }

    #[test]
    fn test_assert_partition_complete() {
        assert_partition_complete(4, 2, 6);
        // This would fail: assert_partition_complete(4, 2, 7);
    }
}
