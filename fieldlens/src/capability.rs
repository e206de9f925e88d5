//! Field capability classification.
//!
//! Pure predicates that decide which summary kinds are computable for a field
//! within its explore, and resolve the companion aggregate the summarizers
//! need. Hosts call these before submitting a request; submitting a kind the
//! field cannot support is rejected by the summarizers with
//! [`SummaryError::Unsupported`](crate::error::SummaryError::Unsupported).

use crate::model::{Explore, Field, FieldCategory};

/// Short label identifying a plain count measure.
const COUNT_LABEL: &str = "Count";

/// Finds the count measure usable alongside the given field.
///
/// Scans the explore's measures for one labeled `Count` whose view label
/// matches the field's. View-label equality is the grouping-compatibility
/// rule: a count measure only produces meaningful frequencies for a
/// dimension originating from the same view.
pub fn companion_count_field<'a>(explore: &'a Explore, field: &Field) -> Option<&'a Field> {
    explore
        .measures
        .iter()
        .find(|measure| measure.label_short == COUNT_LABEL && measure.view_label == field.view_label)
}

/// Whether a top-values summary is computable for the field.
///
/// Requires a dimension with a companion count measure in the same view.
pub fn can_compute_top_values(explore: &Explore, field: &Field) -> bool {
    field.category == FieldCategory::Dimension && companion_count_field(explore, field).is_some()
}

/// Whether a distribution summary is computable for the field.
///
/// Requires a numeric dimension.
pub fn can_compute_distribution(field: &Field) -> bool {
    field.is_numeric() && field.category == FieldCategory::Dimension
}
