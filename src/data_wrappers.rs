use num_traits::Float;
use crate::validation::is_identifier;
use crate::LinkageError;

/// Minimum number of columns in a matrix row holding a full merge record.
const LINKAGE_ROW_COLUMNS: usize = 4;

/// One merge step of agglomerative clustering: the two children joined, the merge distance and
/// the number of original items in the resulting cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkageRow<T> {
    pub a: usize,
    pub b: usize,
    pub distance: T,
    pub size: usize,
}

impl<T: Float> LinkageRow<T> {
    pub fn new(a: usize, b: usize, distance: T, size: usize) -> Self {
        LinkageRow { a, b, distance, size }
    }

    /// Parses a row of a numeric linkage matrix laid out as `[a, b, distance, size, ..]`.
    /// Columns after the fourth are ignored.
    ///
    /// # Returns
    /// * The typed row, or an error if the row is too short, an identifier is not a non-negative
    ///   integer or the size is not a positive integer.
    pub fn from_slice(row: &[T]) -> Result<Self, LinkageError> {
        if row.len() < LINKAGE_ROW_COLUMNS {
            return Err(LinkageError::InvalidShape(format!(
                "a linkage row needs {LINKAGE_ROW_COLUMNS} columns, found {}", row.len()
            )));
        }
        let a = to_index(row[0]).ok_or_else(|| LinkageError::InvalidIdentifier(
            String::from("column 0 is not a non-negative integer")))?;
        let b = to_index(row[1]).ok_or_else(|| LinkageError::InvalidIdentifier(
            String::from("column 1 is not a non-negative integer")))?;
        let size = to_index(row[3])
            .filter(|&size| size > 0)
            .ok_or_else(|| LinkageError::InvalidShape(
                String::from("column 3 (cluster size) is not a positive integer")))?;
        Ok(LinkageRow { a, b, distance: row[2], size })
    }

    /// Converts the row back into the `[a, b, distance, size]` matrix layout.
    pub fn to_vec(&self) -> Vec<T> {
        vec![from_index(self.a), from_index(self.b), self.distance, from_index(self.size)]
    }
}

fn to_index<T: Float>(value: T) -> Option<usize> {
    if is_identifier(value) { value.to_usize() } else { None }
}

fn from_index<T: Float>(index: usize) -> T {
    T::from(index).unwrap_or(T::infinity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matrix_row() {
        let row = LinkageRow::from_slice(&[2.0, 3.0, 0.7, 3.0]).unwrap();
        assert_eq!(LinkageRow::new(2, 3, 0.7, 3), row);
        assert_eq!(vec![2.0, 3.0, 0.7, 3.0], row.to_vec());
    }

    #[test]
    fn ignores_trailing_columns() {
        let row = LinkageRow::from_slice(&[2.0_f32, 3.0, 0.7, 3.0, 42.0]).unwrap();
        assert_eq!(LinkageRow::new(2, 3, 0.7, 3), row);
    }

    #[test]
    fn rejects_short_rows() {
        let result = LinkageRow::from_slice(&[2.0, 3.0, 0.7]);
        assert!(matches!(result, Err(LinkageError::InvalidShape(..))));
    }

    #[test]
    fn rejects_bad_identifiers_and_sizes() {
        assert!(matches!(
            LinkageRow::from_slice(&[2.5, 3.0, 0.7, 3.0]),
            Err(LinkageError::InvalidIdentifier(..))
        ));
        assert!(matches!(
            LinkageRow::from_slice(&[2.0, -3.0, 0.7, 3.0]),
            Err(LinkageError::InvalidIdentifier(..))
        ));
        assert!(matches!(
            LinkageRow::from_slice(&[2.0, 3.0, 0.7, 0.0]),
            Err(LinkageError::InvalidShape(..))
        ));
    }
}
