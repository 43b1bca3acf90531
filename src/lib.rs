//! Data shaping helpers for visualising hierarchical clustering and decision trees. Generic over
//! floating point numeric types.
//!
//! The main piece is the linkage relabeller. Some agglomerative clustering implementations emit
//! linkage tables in which a merged cluster reuses the identifier of one of its members, so the
//! same integer can name an original item in one row and a cluster in a later one. Dendrogram
//! renderers expect every cluster to carry a fresh identifier that is larger than anything seen
//! before it. The relabeller walks the table in merge order and, whenever a child identifier was
//! already used by an earlier merge, replaces it with one more than the largest identifier seen so
//! far. Distance, size and any further columns pass through untouched.
//!
//! The [`layout`] module holds the second helper: a pre-order layout of a binary decision tree
//! onto a 2-D canvas, with drawing left to an external [`Canvas`].
//!
//! # Examples
//! ```
//!use treeviz::Relabeler;
//!
//!let table: Vec<Vec<f64>> = vec![
//!    vec![0.0, 1.0, 0.5, 2.0],
//!    vec![2.0, 3.0, 0.7, 3.0],
//!    vec![0.0, 4.0, 1.0, 4.0],
//!];
//!let relabeler = Relabeler::default(&table);
//!let result = relabeler.relabel().unwrap();
//!assert_eq!(result[2], vec![5.0, 4.0, 1.0, 4.0]);
//! ```
//!
//! # References
//! * [SciPy linkage matrix format](https://docs.scipy.org/doc/scipy/reference/generated/scipy.cluster.hierarchy.linkage.html)

use std::fmt::Debug;
use num_traits::Float;
use tracing::{debug, instrument};
use crate::seen_ids::SeenIdentifiers;
use crate::validation::TableValidator;

pub use crate::data_wrappers::LinkageRow;
pub use crate::decision_tree::DecisionTree;
pub use crate::error::LinkageError;
pub use crate::layout::{BoxKind, Canvas, Connector, LayoutItem, LayoutParams, LayoutParamsBuilder, PlacedBox,
    TreeLayout};
pub use crate::options::{CollisionPolicy, EmptyTablePolicy, RelabelOptions, RelabelOptionsBuilder};

mod data_wrappers;
mod decision_tree;
mod error;
pub mod layout;
mod options;
mod seen_ids;
mod validation;

/// Rewrites the child identifiers of a linkage table into the running index convention expected
/// by dendrogram renderers. Generic over floating point numeric types.
pub struct Relabeler<'a, T> {
    table: &'a [Vec<T>],
    options: RelabelOptions,
}

impl<'a, T: Float + Debug> Relabeler<'a, T> {

    /// Creates a relabeller using custom options.
    ///
    /// # Parameters
    /// * `table` - a reference to the linkage table, one row per merge in merge order. Every row
    ///             must have the same width, with the two child identifiers in the first two
    ///             columns. Identifiers must be non-negative integers.
    /// * `options` - the relabelling options.
    ///
    /// # Returns
    /// * The relabeller instance.
    ///
    /// # Examples
    /// ```
    ///use treeviz::{EmptyTablePolicy, Relabeler, RelabelOptions};
    ///
    ///let table: Vec<Vec<f32>> = Vec::new();
    ///let options = RelabelOptions::builder()
    ///    .empty_table(EmptyTablePolicy::Passthrough)
    ///    .build();
    ///let relabeler = Relabeler::new(&table, options);
    ///assert!(relabeler.relabel().unwrap().is_empty());
    /// ```
    pub fn new(table: &'a [Vec<T>], options: RelabelOptions) -> Self {
        Relabeler { table, options }
    }

    /// Creates a relabeller using the default options: empty tables are an error, double
    /// collisions are resolved sequentially and every value must be finite.
    ///
    /// # Parameters
    /// * `table` - a reference to the linkage table.
    ///
    /// # Returns
    /// * The relabeller instance.
    pub fn default(table: &'a [Vec<T>]) -> Self {
        Relabeler::new(table, RelabelOptions::default())
    }

    /// Relabels the table passed to the constructor. The input is not modified.
    ///
    /// # Returns
    /// * A result that, if successful, contains a new table of the same shape in which every
    ///   child identifier that was already used by an earlier merge has been replaced. An error
    ///   is returned if the table is empty (unless the empty table policy is passthrough), if the
    ///   rows are narrower than two columns or of differing widths, if an identifier is not a
    ///   non-negative integer or too large for `T` to represent its successor, if a value is not
    ///   finite when finiteness is required, or if a replacement identifier cannot be represented.
    ///
    /// # Examples
    /// ```
    ///use treeviz::Relabeler;
    ///
    ///let table: Vec<Vec<f64>> = vec![
    ///    vec![0.0, 1.0, 0.2, 2.0],
    ///    vec![0.0, 1.0, 0.4, 4.0],
    ///];
    ///let result = Relabeler::default(&table).relabel().unwrap();
    ///assert_eq!(result, vec![vec![0.0, 1.0, 0.2, 2.0], vec![2.0, 3.0, 0.4, 4.0]]);
    /// ```
    #[instrument(level = "debug", skip_all, fields(rows = self.table.len()))]
    pub fn relabel(&self) -> Result<Vec<Vec<T>>, LinkageError> {
        TableValidator::new(self.table, &self.options).validate_table()?;
        let pairs = self.table.iter().map(|row| (row[0], row[1]));
        let relabelled = relabel_identifiers(pairs, self.options.collisions, float_successor)?;

        let output = self.table.iter().zip(relabelled)
            .map(|(row, (a, b))| {
                let mut new_row = row.clone();
                new_row[0] = a;
                new_row[1] = b;
                new_row
            })
            .collect();
        Ok(output)
    }
}

/// Relabels a linkage table using the default options.
/// Shorthand for `Relabeler::default(table).relabel()`.
pub fn relabel<T: Float + Debug>(table: &[Vec<T>]) -> Result<Vec<Vec<T>>, LinkageError> {
    Relabeler::default(table).relabel()
}

/// Relabels typed linkage rows with the same semantics as [`Relabeler::relabel`].
///
/// # Returns
/// * A result that, if successful, contains the relabelled rows. Distances and sizes are carried
///   over unchanged. An error is returned for an empty input (unless the empty table policy is
///   passthrough), for a cluster size of 0, for a non-finite distance when finiteness is required,
///   or if a replacement identifier would exceed `usize::MAX`.
#[instrument(level = "debug", skip_all, fields(rows = rows.len()))]
pub fn relabel_rows<T: Float + Debug>(
    rows: &[LinkageRow<T>],
    options: &RelabelOptions
) -> Result<Vec<LinkageRow<T>>, LinkageError> {
    if rows.is_empty() && options.empty_table == EmptyTablePolicy::Error {
        return Err(LinkageError::EmptyTable);
    }
    if options.require_finite {
        if let Some(n) = rows.iter().position(|row| !row.distance.is_finite()) {
            return Err(LinkageError::NonFiniteValue(
                format!("{n}th row has a non-finite distance")));
        }
    }
    if let Some(n) = rows.iter().position(|row| row.size == 0) {
        return Err(LinkageError::InvalidShape(
            format!("{n}th row has a cluster size of 0")));
    }
    let pairs = rows.iter().map(|row| (row.a, row.b));
    let relabelled = relabel_identifiers(pairs, options.collisions, |id: usize| id.checked_add(1))?;

    Ok(rows.iter().zip(relabelled)
        .map(|(row, (a, b))| LinkageRow { a, b, ..*row })
        .collect())
}

fn relabel_identifiers<I, P, N>(
    pairs: P,
    collisions: CollisionPolicy,
    successor: N
) -> Result<Vec<(I, I)>, LinkageError>
where
    I: Copy + PartialOrd + Debug,
    P: ExactSizeIterator<Item = (I, I)>,
    N: Fn(I) -> Option<I>,
{
    let mut seen = SeenIdentifiers::with_capacity(2 * pairs.len());
    let mut relabelled = Vec::with_capacity(pairs.len());

    for (row, (a, b)) in pairs.enumerate() {
        let earlier_max = seen.max();
        let running_max = |x: I, y: I| {
            let row_max = larger(x, y);
            earlier_max.map_or(row_max, |m| larger(m, row_max))
        };
        let fresh = |max: I| successor(max).ok_or_else(|| LinkageError::IdentifierOverflow(
            format!("{row}th row needs an identifier above {max:?}")));

        let new_a = if seen.contains(a) { fresh(running_max(a, b))? } else { a };
        let new_b = if seen.contains(b) {
            match collisions {
                CollisionPolicy::Sequential => fresh(running_max(new_a, b))?,
                CollisionPolicy::SharedSnapshot => fresh(running_max(a, b))?,
            }
        } else {
            b
        };

        if new_a != a {
            debug!(row, column = 0, old = ?a, new = ?new_a, "rewrote reused identifier");
        }
        if new_b != b {
            debug!(row, column = 1, old = ?b, new = ?new_b, "rewrote reused identifier");
        }
        seen.insert(new_a);
        seen.insert(new_b);
        relabelled.push((new_a, new_b));
    }
    Ok(relabelled)
}

// Floats stop being able to count past 2^53 (2^24 for f32), where `x + 1 == x`
fn float_successor<T: Float>(value: T) -> Option<T> {
    let next = value + T::one();
    if next > value { Some(next) } else { None }
}

fn larger<I: PartialOrd>(x: I, y: I) -> I {
    if y > x { y } else { x }
}
