// Defaults for options
const EMPTY_TABLE_DEFAULT: EmptyTablePolicy = EmptyTablePolicy::Error;
const COLLISIONS_DEFAULT: CollisionPolicy = CollisionPolicy::Sequential;
const REQUIRE_FINITE_DEFAULT: bool = true;

/// What to do when asked to relabel a table with no rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmptyTablePolicy {
    /// Fail with `LinkageError::EmptyTable`.
    Error,
    /// Return an empty table.
    Passthrough,
}

/// How a replacement identifier is computed when both children of one merge collide with
/// identifiers used by earlier merges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The running maximum for the second column is taken after the first column has been
    /// rewritten, so a double collision yields `a = M + 1` and `b = M + 2`. This reproduces the
    /// output of the widely circulated `dendrogram_convert` helper.
    Sequential,
    /// Both columns use the maximum taken before the row was touched, so a double collision
    /// yields `a == b == M + 1`.
    SharedSnapshot,
}

/// Options controlling how a linkage table is validated and relabelled.
/// Only use if you need non default behaviour. Otherwise use `Relabeler::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelabelOptions {
    pub(crate) empty_table: EmptyTablePolicy,
    pub(crate) collisions: CollisionPolicy,
    pub(crate) require_finite: bool,
}

/// Builder object to set custom relabelling options.
pub struct RelabelOptionsBuilder {
    empty_table: Option<EmptyTablePolicy>,
    collisions: Option<CollisionPolicy>,
    require_finite: Option<bool>,
}

impl Default for RelabelOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RelabelOptions {
    /// Enters the builder pattern, allowing custom options to be set using various setter
    /// methods.
    ///
    /// # Returns
    /// * the options builder
    pub fn builder() -> RelabelOptionsBuilder {
        RelabelOptionsBuilder {
            empty_table: None,
            collisions: None,
            require_finite: None,
        }
    }
}

impl RelabelOptionsBuilder {

    /// Sets the behaviour for tables with zero rows. Defaults to `EmptyTablePolicy::Error`.
    ///
    /// # Parameters
    /// * empty_table - the empty table policy
    ///
    /// # Returns
    /// * the options builder
    pub fn empty_table(mut self, empty_table: EmptyTablePolicy) -> RelabelOptionsBuilder {
        self.empty_table = Some(empty_table);
        self
    }

    /// Sets how replacement identifiers are computed when both children of a merge collide.
    /// Defaults to `CollisionPolicy::Sequential`.
    ///
    /// # Parameters
    /// * collisions - the collision policy
    ///
    /// # Returns
    /// * the options builder
    pub fn collisions(mut self, collisions: CollisionPolicy) -> RelabelOptionsBuilder {
        self.collisions = Some(collisions);
        self
    }

    /// Sets whether NaN or infinite values anywhere in the table are rejected.
    /// Identifier columns are always required to be finite. Defaults to true.
    ///
    /// # Parameters
    /// * require_finite - whether to reject non-finite values in every column
    ///
    /// # Returns
    /// * the options builder
    pub fn require_finite(mut self, require_finite: bool) -> RelabelOptionsBuilder {
        self.require_finite = Some(require_finite);
        self
    }

    /// Finishes the building of the options. A call to this method is required to exit the
    /// builder pattern.
    ///
    /// # Returns
    /// * The completed relabelling options.
    pub fn build(self) -> RelabelOptions {
        RelabelOptions {
            empty_table: self.empty_table.unwrap_or(EMPTY_TABLE_DEFAULT),
            collisions: self.collisions.unwrap_or(COLLISIONS_DEFAULT),
            require_finite: self.require_finite.unwrap_or(REQUIRE_FINITE_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RelabelOptions::default();
        assert_eq!(EmptyTablePolicy::Error, options.empty_table);
        assert_eq!(CollisionPolicy::Sequential, options.collisions);
        assert!(options.require_finite);
    }

    #[test]
    fn builder_overrides() {
        let options = RelabelOptions::builder()
            .empty_table(EmptyTablePolicy::Passthrough)
            .collisions(CollisionPolicy::SharedSnapshot)
            .require_finite(false)
            .build();
        assert_eq!(EmptyTablePolicy::Passthrough, options.empty_table);
        assert_eq!(CollisionPolicy::SharedSnapshot, options.collisions);
        assert!(!options.require_finite);
    }
}
