// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Label assertions
//!
//! Inclusion and equality checks over completion labels, mirroring how
//! the reference corpus verifies results.

/// Assert that every expected label appears in `labels`.
///
/// # Panics
///
/// Panics listing the missing labels and the full label set.
pub fn assert_labels_include(labels: &[String], expected: &[&str]) {
    let missing: Vec<&&str> = expected
        .iter()
        .filter(|e| !labels.iter().any(|l| l == *e))
        .collect();
    assert!(
        missing.is_empty(),
        "missing labels {missing:?} in {labels:?}"
    );
}

/// Assert that `labels` is exactly `expected`, in order.
pub fn assert_labels_exact(labels: &[String], expected: &[&str]) {
    let got: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
    assert_eq!(got, expected, "labels differ");
}
