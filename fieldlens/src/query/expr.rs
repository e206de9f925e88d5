//! Expression tree for derived query dimensions.
//!
//! Derived categorical fields (the histogram's bin dimension) are described
//! as explicit expression values and only serialized to the query language's
//! textual syntax at the executor boundary. Building the tree in the host
//! language keeps the combinator logic testable and avoids ad-hoc string
//! concatenation.

/// A server-side expression over model fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a model field.
    Field(String),
    /// Numeric literal.
    Number(f64),
    /// `lhs <= rhs` comparison.
    LessOrEqual(Box<Expr>, Box<Expr>),
    /// Yields `value` when `test` holds, null otherwise.
    Guarded {
        /// The condition.
        test: Box<Expr>,
        /// Value produced when the condition holds.
        value: Box<Expr>,
    },
    /// Yields the first non-null operand; earlier operands win.
    FirstNonNull(Vec<Expr>),
}

impl Expr {
    /// A field reference.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// A numeric literal.
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// `self <= rhs`.
    pub fn less_or_equal(self, rhs: Expr) -> Self {
        Self::LessOrEqual(Box::new(self), Box::new(rhs))
    }

    /// `value` when `test` holds, null otherwise.
    pub fn guarded(test: Expr, value: Expr) -> Self {
        Self::Guarded {
            test: Box::new(test),
            value: Box::new(value),
        }
    }

    /// First non-null of the operands, in order.
    pub fn first_non_null(operands: Vec<Expr>) -> Self {
        Self::FirstNonNull(operands)
    }

    /// Serializes the tree to the query language's textual syntax.
    pub fn render(&self) -> String {
        match self {
            Self::Field(name) => format!("${{{name}}}"),
            Self::Number(value) => value.to_string(),
            Self::LessOrEqual(lhs, rhs) => format!("{} <= {}", lhs.render(), rhs.render()),
            Self::Guarded { test, value } => {
                format!("if({}, {}, null)", test.render(), value.render())
            }
            Self::FirstNonNull(operands) => {
                let rendered: Vec<String> = operands.iter().map(Expr::render).collect();
                format!("coalesce({})", rendered.join(", "))
            }
        }
    }
}

/// Builds the bin-assignment expression for a histogram dimension.
///
/// For each bin index `i` (ascending), tests `field <= upper_bounds[i]` and
/// yields `i`; the first satisfied test wins, so a value on a shared
/// boundary lands in the lower bin.
pub fn bin_assignment_expr(field: &str, upper_bounds: &[f64]) -> Expr {
    let operands = upper_bounds
        .iter()
        .enumerate()
        .map(|(index, bound)| {
            Expr::guarded(
                Expr::field(field).less_or_equal(Expr::number(*bound)),
                Expr::number(index as f64),
            )
        })
        .collect();
    Expr::first_non_null(operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_field_and_literal() {
        assert_eq!(Expr::field("orders.price").render(), "${orders.price}");
        assert_eq!(Expr::number(12.0).render(), "12");
        assert_eq!(Expr::number(12.5).render(), "12.5");
    }

    #[test]
    fn test_render_comparison_and_guard() {
        let expr = Expr::guarded(
            Expr::field("orders.price").less_or_equal(Expr::number(10.0)),
            Expr::number(0.0),
        );
        assert_eq!(expr.render(), "if(${orders.price} <= 10, 0, null)");
    }

    #[test]
    fn test_bin_assignment_ascending_first_match() {
        let expr = bin_assignment_expr("orders.price", &[11.0, 12.0, 13.0]);
        assert_eq!(
            expr.render(),
            "coalesce(\
             if(${orders.price} <= 11, 0, null), \
             if(${orders.price} <= 12, 1, null), \
             if(${orders.price} <= 13, 2, null))"
        );
    }

    #[test]
    fn test_bin_assignment_operand_order_matches_bounds() {
        let bounds: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let expr = bin_assignment_expr("orders.price", &bounds);

        if let Expr::FirstNonNull(operands) = expr {
            assert_eq!(operands.len(), 20);
            for (index, operand) in operands.iter().enumerate() {
                match operand {
                    Expr::Guarded { test, value } => {
                        assert_eq!(**value, Expr::Number(index as f64));
                        match &**test {
                            Expr::LessOrEqual(_, bound) => {
                                assert_eq!(**bound, Expr::Number(bounds[index]));
                            }
                            other => panic!("expected comparison, got {other:?}"),
                        }
                    }
                    other => panic!("expected guarded operand, got {other:?}"),
                }
            }
        } else {
            panic!("expected a first-non-null combinator");
        }
    }

    proptest! {
        #[test]
        fn prop_bin_assignment_preserves_bound_order(
            bounds in proptest::collection::vec(-1.0e6_f64..1.0e6, 1..64),
        ) {
            let expr = bin_assignment_expr("orders.price", &bounds);

            let Expr::FirstNonNull(operands) = expr else {
                panic!("expected a first-non-null combinator");
            };
            prop_assert_eq!(operands.len(), bounds.len());
            // Operand i tests bounds[i] and yields i, so the combinator's
            // left-to-right evaluation makes the lowest matching bin win.
            for (index, operand) in operands.iter().enumerate() {
                let Expr::Guarded { test, value } = operand else {
                    panic!("expected a guarded operand");
                };
                prop_assert_eq!(&**value, &Expr::Number(index as f64));
                let Expr::LessOrEqual(_, bound) = &**test else {
                    panic!("expected a comparison test");
                };
                prop_assert_eq!(&**bound, &Expr::Number(bounds[index]));
            }
        }
    }
}
