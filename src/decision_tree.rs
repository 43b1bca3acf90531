/// A binary decision tree. Internal nodes split on `X[feature] <= threshold`, sending samples
/// that satisfy the test to the left child. Leaves carry the predicted class label.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionTree<L, T> {
    Leaf(L),
    Node {
        feature: usize,
        threshold: T,
        left: Box<DecisionTree<L, T>>,
        right: Box<DecisionTree<L, T>>,
    },
}

impl<L, T> DecisionTree<L, T> {

    pub fn leaf(label: L) -> Self {
        DecisionTree::Leaf(label)
    }

    pub fn node(feature: usize, threshold: T, left: Self, right: Self) -> Self {
        DecisionTree::Node { feature, threshold, left: Box::new(left), right: Box::new(right) }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DecisionTree::Leaf(_))
    }

    /// Number of split levels below this node. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 0,
            DecisionTree::Node { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 1,
            DecisionTree::Node { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}
