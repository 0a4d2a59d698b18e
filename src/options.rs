use serde::{Deserialize, Serialize};

/// Tree construction settings.
///
/// The hash function is not part of the record: it is the `A: Algorithm<T>`
/// type parameter of the tree, instantiated through `Default` on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Reorder leaves ascending by their bytes before building.
    pub sort_leaves: bool,

    /// Hash each pair in ascending byte order instead of scan order.
    /// Required for proofs checked with `proof::verify`.
    pub sort_pairs: bool,
}

impl Options {
    /// Creates a new construction config.
    pub fn new(sort_leaves: bool, sort_pairs: bool) -> Options {
        Options {
            sort_leaves,
            sort_pairs,
        }
    }

    /// Both leaves and pairs sorted, the layout `proof::verify` expects.
    pub fn sorted() -> Options {
        Options::new(true, true)
    }

    /// Sets leaf sorting.
    pub fn with_sort_leaves(mut self, sort_leaves: bool) -> Options {
        self.sort_leaves = sort_leaves;
        self
    }

    /// Sets pair sorting.
    pub fn with_sort_pairs(mut self, sort_pairs: bool) -> Options {
        self.sort_pairs = sort_pairs;
        self
    }
}
