use std::cmp::Ordering;

/// Running record of the identifiers used by the merges processed so far, kept sorted so
/// membership is a binary search, together with their maximum.
pub(crate) struct SeenIdentifiers<I> {
    sorted: Vec<I>,
}

impl<I: Copy + PartialOrd> SeenIdentifiers<I> {

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        SeenIdentifiers { sorted: Vec::with_capacity(capacity) }
    }

    pub(crate) fn contains(&self, id: I) -> bool {
        self.search(id).is_ok()
    }

    pub(crate) fn insert(&mut self, id: I) {
        if let Err(position) = self.search(id) {
            self.sorted.insert(position, id);
        }
    }

    pub(crate) fn max(&self) -> Option<I> {
        self.sorted.last().copied()
    }

    fn search(&self, id: I) -> Result<usize, usize> {
        // Identifiers are validated as finite before they get here
        self.sorted.binary_search_by(|probe| probe.partial_cmp(&id).unwrap_or(Ordering::Less))
    }
}
