use crate::{EmptyTablePolicy, LinkageError, RelabelOptions};
use num_traits::Float;

/// Number of leading columns holding child identifiers.
pub(crate) const IDENTIFIER_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableValidator<'a, T> {
    table: &'a [Vec<T>],
    options: &'a RelabelOptions,
}

impl<'a, T: Float> TableValidator<'a, T> {
    pub(crate) fn new(table: &'a [Vec<T>], options: &'a RelabelOptions) -> Self {
        Self { table, options }
    }

    pub(crate) fn validate_table(&self) -> Result<(), LinkageError> {
        if self.table.is_empty() {
            return match self.options.empty_table {
                EmptyTablePolicy::Error => Err(LinkageError::EmptyTable),
                EmptyTablePolicy::Passthrough => Ok(()),
            };
        }
        let width_0th = self.table[0].len();
        if width_0th < IDENTIFIER_COLUMNS {
            return Err(LinkageError::InvalidShape(format!(
                "rows need at least {IDENTIFIER_COLUMNS} identifier columns, 0th row has {width_0th}"
            )));
        }
        for (n, row) in self.table.iter().enumerate() {
            let width_nth = row.len();
            if width_nth != width_0th {
                return Err(LinkageError::InvalidShape(format!(
                    "0th row has {width_0th} columns, but {n}th has {width_nth}"
                )));
            }
            self.validate_identifiers(n, row)?;
            if self.options.require_finite {
                self.validate_finite(n, row)?;
            }
        }
        Ok(())
    }

    fn validate_identifiers(&self, n: usize, row: &[T]) -> Result<(), LinkageError> {
        for (column, &value) in row.iter().take(IDENTIFIER_COLUMNS).enumerate() {
            if !value.is_finite() {
                return Err(LinkageError::NonFiniteValue(format!(
                    "{n}th row has a non-finite identifier in column {column}"
                )));
            }
            if !is_identifier(value) {
                return Err(LinkageError::InvalidIdentifier(format!(
                    "{n}th row column {column} is not a non-negative integer"
                )));
            }
            if value + T::one() == value {
                return Err(LinkageError::InvalidIdentifier(format!(
                    "{n}th row column {column} is too large to be followed by a fresh identifier"
                )));
            }
        }
        Ok(())
    }

    fn validate_finite(&self, n: usize, row: &[T]) -> Result<(), LinkageError> {
        if row.iter().any(|value| !value.is_finite()) {
            return Err(LinkageError::NonFiniteValue(format!(
                "{n}th row contains non-finite element(s)"
            )));
        }
        Ok(())
    }
}

pub(crate) fn is_identifier<T: Float>(value: T) -> bool {
    value.is_finite() && value >= T::zero() && value.fract() == T::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(table: &[Vec<f64>], options: &RelabelOptions) -> Result<(), LinkageError> {
        TableValidator::new(table, options).validate_table()
    }

    #[test]
    fn accepts_well_formed_table() {
        let table = vec![vec![0.0, 1.0, 0.5, 2.0], vec![2.0, 3.0, 0.7, 3.0]];
        assert_eq!(Ok(()), validate(&table, &RelabelOptions::default()));
    }

    #[test]
    fn empty_table_follows_policy() {
        let table: Vec<Vec<f64>> = Vec::new();
        assert_eq!(Err(LinkageError::EmptyTable), validate(&table, &RelabelOptions::default()));

        let passthrough = RelabelOptions::builder()
            .empty_table(EmptyTablePolicy::Passthrough)
            .build();
        assert_eq!(Ok(()), validate(&table, &passthrough));
    }

    #[test]
    fn narrow_rows() {
        let table = vec![vec![0.0]];
        let result = validate(&table, &RelabelOptions::default());
        assert!(matches!(result, Err(LinkageError::InvalidShape(..))));
    }

    #[test]
    fn ragged_rows() {
        let table = vec![vec![0.0, 1.0, 0.5, 2.0], vec![2.0, 3.0, 0.7]];
        let result = validate(&table, &RelabelOptions::default());
        assert!(matches!(result, Err(LinkageError::InvalidShape(..))));
    }

    #[test]
    fn fractional_and_negative_identifiers() {
        let options = RelabelOptions::default();
        let fractional = vec![vec![0.5, 1.0, 0.5, 2.0]];
        assert!(matches!(validate(&fractional, &options), Err(LinkageError::InvalidIdentifier(..))));
        let negative = vec![vec![0.0, -1.0, 0.5, 2.0]];
        assert!(matches!(validate(&negative, &options), Err(LinkageError::InvalidIdentifier(..))));
    }

    #[test]
    fn non_finite_values() {
        let lenient = RelabelOptions::builder().require_finite(false).build();
        let bad_distance = vec![vec![0.0, 1.0, f64::NAN, 2.0]];
        assert!(matches!(
            validate(&bad_distance, &RelabelOptions::default()),
            Err(LinkageError::NonFiniteValue(..))
        ));
        assert_eq!(Ok(()), validate(&bad_distance, &lenient));

        let bad_identifier = vec![vec![f64::INFINITY, 1.0, 0.5, 2.0]];
        assert!(matches!(validate(&bad_identifier, &lenient), Err(LinkageError::NonFiniteValue(..))));
    }

    #[test]
    fn identifiers_beyond_float_precision() {
        let options = RelabelOptions::default();
        let f64_limit = 2.0_f64.powi(53);
        let table = vec![vec![f64_limit, 0.0, 0.5, 2.0]];
        assert!(matches!(validate(&table, &options), Err(LinkageError::InvalidIdentifier(..))));
        let table = vec![vec![f64_limit - 1.0, 0.0, 0.5, 2.0]];
        assert_eq!(Ok(()), validate(&table, &options));

        let f32_limit = 2.0_f32.powi(24);
        let table = vec![vec![0.0, f32_limit, 0.5, 2.0]];
        let result = TableValidator::new(&table, &options).validate_table();
        assert!(matches!(result, Err(LinkageError::InvalidIdentifier(..))));
    }
}
