//! Metadata descriptors for semantic models, explores, and fields.
//!
//! These types describe the queryable surface of a semantic data model as
//! supplied by the host's metadata service. They are read-only inputs: the
//! summarizers consume them to classify fields and address queries, and never
//! mutate them.

use serde::{Deserialize, Serialize};

/// Whether a field is groupable or aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    /// A groupable, non-aggregated field.
    Dimension,
    /// An aggregated field (count, sum, average, ...).
    Measure,
}

/// One field within an explore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Fully scoped field name, e.g. `orders.status`.
    pub name: String,
    /// Short display label, e.g. `Status` or `Count`.
    pub label_short: String,
    /// Label of the view the field originates from within the explore.
    ///
    /// Fields sharing a view label share grouping provenance; a count
    /// measure is only usable alongside a dimension from the same view.
    pub view_label: String,
    /// Dimension or measure.
    pub category: FieldCategory,
    /// The field's data type, e.g. `number` or `string`.
    #[serde(rename = "type")]
    pub field_type: String,
}

impl Field {
    /// Creates a field with the given name and category.
    ///
    /// The short label defaults to the segment after the last `.` in the
    /// name; view label and type default to empty and `string`.
    pub fn new(name: impl Into<String>, category: FieldCategory) -> Self {
        let name = name.into();
        let label_short = name
            .rsplit('.')
            .next()
            .unwrap_or(name.as_str())
            .to_string();
        Self {
            name,
            label_short,
            view_label: String::new(),
            category,
            field_type: "string".to_string(),
        }
    }

    /// Creates a dimension field.
    pub fn dimension(name: impl Into<String>) -> Self {
        Self::new(name, FieldCategory::Dimension)
    }

    /// Creates a measure field.
    pub fn measure(name: impl Into<String>) -> Self {
        Self::new(name, FieldCategory::Measure)
    }

    /// Sets the short display label.
    pub fn with_label_short(mut self, label: impl Into<String>) -> Self {
        self.label_short = label.into();
        self
    }

    /// Sets the originating view label.
    pub fn with_view_label(mut self, label: impl Into<String>) -> Self {
        self.view_label = label.into();
        self
    }

    /// Sets the field data type.
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    /// Whether the field holds numeric values.
    pub fn is_numeric(&self) -> bool {
        self.field_type == "number"
    }
}

/// A queryable view within a semantic model, exposing dimensions and measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explore {
    /// Explore name, used as the query's target view.
    pub name: String,
    /// Name of the model the explore belongs to.
    pub model_name: String,
    /// Groupable fields exposed by the explore.
    pub dimensions: Vec<Field>,
    /// Aggregated fields exposed by the explore.
    pub measures: Vec<Field>,
}

impl Explore {
    /// Creates an empty explore in the given model.
    pub fn new(name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_name: model_name.into(),
            dimensions: Vec::new(),
            measures: Vec::new(),
        }
    }

    /// Adds a dimension field.
    pub fn with_dimension(mut self, field: Field) -> Self {
        self.dimensions.push(field);
        self
    }

    /// Adds a measure field.
    pub fn with_measure(mut self, field: Field) -> Self {
        self.measures.push(field);
        self
    }
}
