//! Pre-order layout of a binary decision tree onto a 2-D canvas.
//!
//! The root is centred at the top. Each child sits one level below its parent and is shifted
//! horizontally by an offset that shrinks geometrically with depth, so subtrees fan out without
//! needing to know their width in advance. Drawing is left to a [`Canvas`] implementation; this
//! module only computes where the boxes and connectors go and what the boxes say.

use std::fmt::Display;
use num_traits::Float;
use tracing::{instrument, warn};
use crate::DecisionTree;

// Defaults for parameters
const ROOT_X_DEFAULT: f64 = 0.5;
const ROOT_Y_DEFAULT: f64 = 1.0;
const INITIAL_OFFSET_DEFAULT: f64 = 0.25;
const LEVEL_HEIGHT_DEFAULT: f64 = 10.0;
const SHRINK_DEFAULT: f64 = 0.6;
const THRESHOLD_PRECISION_DEFAULT: usize = 2;
// Connectors leave the parent this fraction of a level below its centre
const CONNECTOR_DROP_FRACTION: f64 = 0.1;

// Valid bounds of parameters
const SHRINK_MINIMUM: f64 = f64::EPSILON;
const SHRINK_MAXIMUM: f64 = 1.0;

/// Geometry used when laying out a decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub(crate) root_x: f64,
    pub(crate) root_y: f64,
    pub(crate) initial_offset: f64,
    pub(crate) level_height: f64,
    pub(crate) shrink: f64,
    pub(crate) connector_drop: f64,
    pub(crate) threshold_precision: usize,
}

/// Builder object to set custom layout parameters.
pub struct LayoutParamsBuilder {
    root_x: Option<f64>,
    root_y: Option<f64>,
    initial_offset: Option<f64>,
    level_height: Option<f64>,
    shrink: Option<f64>,
    connector_drop: Option<f64>,
    threshold_precision: Option<usize>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LayoutParams {
    /// Enters the builder pattern.
    ///
    /// # Returns
    /// * the layout parameter builder
    pub fn builder() -> LayoutParamsBuilder {
        LayoutParamsBuilder {
            root_x: None,
            root_y: None,
            initial_offset: None,
            level_height: None,
            shrink: None,
            connector_drop: None,
            threshold_precision: None,
        }
    }
}

impl LayoutParamsBuilder {

    /// Sets the position of the root box. Defaults to (0.5, 1.0).
    pub fn root(mut self, x: f64, y: f64) -> LayoutParamsBuilder {
        self.root_x = Some(validate_finite(x, ROOT_X_DEFAULT, "root_x"));
        self.root_y = Some(validate_finite(y, ROOT_Y_DEFAULT, "root_y"));
        self
    }

    /// Sets the horizontal distance between the root and each of its children. Deeper levels
    /// use this offset multiplied by the shrink factor once per level. Defaults to 0.25.
    pub fn initial_offset(mut self, initial_offset: f64) -> LayoutParamsBuilder {
        let finite = validate_finite(initial_offset, INITIAL_OFFSET_DEFAULT, "initial_offset");
        self.initial_offset = Some(validate_left_bound(finite, 0.0, "initial_offset"));
        self
    }

    /// Sets the vertical distance between a parent and its children. Defaults to 10.
    pub fn level_height(mut self, level_height: f64) -> LayoutParamsBuilder {
        let finite = validate_finite(level_height, LEVEL_HEIGHT_DEFAULT, "level_height");
        self.level_height = Some(validate_left_bound(finite, 0.0, "level_height"));
        self
    }

    /// Sets the factor the horizontal offset is multiplied by at each level. Must lie in (0, 1].
    /// Defaults to 0.6.
    pub fn shrink(mut self, shrink: f64) -> LayoutParamsBuilder {
        let finite = validate_finite(shrink, SHRINK_DEFAULT, "shrink");
        let above = validate_left_bound(finite, SHRINK_MINIMUM, "shrink");
        self.shrink = Some(validate_right_bound(above, SHRINK_MAXIMUM, "shrink"));
        self
    }

    /// Sets how far below the parent centre connectors start. Defaults to a tenth of the level
    /// height.
    pub fn connector_drop(mut self, connector_drop: f64) -> LayoutParamsBuilder {
        let finite = validate_finite(connector_drop, 0.0, "connector_drop");
        self.connector_drop = Some(validate_left_bound(finite, 0.0, "connector_drop"));
        self
    }

    /// Sets the number of decimal places thresholds are printed with. Defaults to 2.
    pub fn threshold_precision(mut self, threshold_precision: usize) -> LayoutParamsBuilder {
        self.threshold_precision = Some(threshold_precision);
        self
    }

    /// Finishes the building of the layout parameters.
    ///
    /// # Returns
    /// * The completed layout parameters.
    pub fn build(self) -> LayoutParams {
        let level_height = self.level_height.unwrap_or(LEVEL_HEIGHT_DEFAULT);
        LayoutParams {
            root_x: self.root_x.unwrap_or(ROOT_X_DEFAULT),
            root_y: self.root_y.unwrap_or(ROOT_Y_DEFAULT),
            initial_offset: self.initial_offset.unwrap_or(INITIAL_OFFSET_DEFAULT),
            level_height,
            shrink: self.shrink.unwrap_or(SHRINK_DEFAULT),
            connector_drop: self.connector_drop.unwrap_or(level_height * CONNECTOR_DROP_FRACTION),
            threshold_precision: self.threshold_precision.unwrap_or(THRESHOLD_PRECISION_DEFAULT),
        }
    }
}

fn validate_finite(input_param: f64, default: f64, param: &str) -> f64 {
    if input_param.is_finite() {
        input_param
    } else {
        warn!(param, value = input_param, fallback = default, "parameter must be finite, using default");
        default
    }
}

fn validate_left_bound(input_param: f64, left_bound: f64, param: &str) -> f64 {
    if input_param < left_bound {
        warn!(param, value = input_param, bound = left_bound, "parameter below lower bound, clamped");
        left_bound
    } else {
        input_param
    }
}

fn validate_right_bound(input_param: f64, right_bound: f64, param: &str) -> f64 {
    if input_param > right_bound {
        warn!(param, value = input_param, bound = right_bound, "parameter above upper bound, clamped");
        right_bound
    } else {
        input_param
    }
}

/// Whether a box shows a split test or a class label.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoxKind {
    Split,
    Leaf,
}

/// A labelled box centred on `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub kind: BoxKind,
    pub depth: usize,
}

/// A line segment joining a parent box to one of its children. `depth` is the child's depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub depth: usize,
}

/// One drawing instruction, in the order a renderer should replay them.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Box(PlacedBox),
    Connector(Connector),
}

/// The drawing surface a layout is replayed onto.
pub trait Canvas {
    fn draw_box(&mut self, placed: &PlacedBox);
    fn draw_connector(&mut self, connector: &Connector);
}

/// A decision tree laid out in pre-order: each box is followed, for each child in turn, by the
/// connector to that child and then the child's own subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    items: Vec<LayoutItem>,
}

impl TreeLayout {

    /// Lays out a decision tree.
    ///
    /// # Parameters
    /// * `tree` - the tree to lay out.
    /// * `params` - the layout geometry.
    ///
    /// # Returns
    /// * The layout, ready to be rendered.
    ///
    /// # Examples
    /// ```
    ///use treeviz::{DecisionTree, LayoutParams, TreeLayout};
    ///
    ///let tree = DecisionTree::node(2, 0.8, DecisionTree::leaf("a"), DecisionTree::leaf("b"));
    ///let layout = TreeLayout::compute(&tree, &LayoutParams::default());
    ///let labels: Vec<_> = layout.boxes().map(|placed| placed.text.as_str()).collect();
    ///assert_eq!(labels, vec!["X[2] <= 0.80", "Class: a", "Class: b"]);
    /// ```
    #[instrument(level = "debug", skip_all, fields(depth = tree.depth()))]
    pub fn compute<L: Display, T: Float>(tree: &DecisionTree<L, T>, params: &LayoutParams) -> Self {
        let mut items = Vec::new();
        place(tree, params.root_x, params.root_y, 0, params.initial_offset, params, &mut items);
        TreeLayout { items }
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    pub fn boxes(&self) -> impl Iterator<Item = &PlacedBox> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Box(placed) => Some(placed),
            LayoutItem::Connector(_) => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Box(_) => None,
            LayoutItem::Connector(connector) => Some(connector),
        })
    }

    /// Replays the layout onto a canvas in pre-order.
    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        for item in &self.items {
            match item {
                LayoutItem::Box(placed) => canvas.draw_box(placed),
                LayoutItem::Connector(connector) => canvas.draw_connector(connector),
            }
        }
    }
}

fn place<L: Display, T: Float>(
    tree: &DecisionTree<L, T>,
    x: f64,
    y: f64,
    depth: usize,
    dx: f64,
    params: &LayoutParams,
    items: &mut Vec<LayoutItem>
) {
    match tree {
        DecisionTree::Leaf(label) => {
            items.push(LayoutItem::Box(PlacedBox {
                x, y, text: format!("Class: {label}"), kind: BoxKind::Leaf, depth }));
        }
        DecisionTree::Node { feature, threshold, left, right } => {
            let threshold = threshold.to_f64().unwrap_or(f64::NAN);
            let precision = params.threshold_precision;
            items.push(LayoutItem::Box(PlacedBox {
                x, y,
                text: format!("X[{feature}] <= {threshold:.precision$}"),
                kind: BoxKind::Split,
                depth,
            }));

            let child_y = y - params.level_height;
            for (child, child_x) in [(left, x - dx), (right, x + dx)] {
                items.push(LayoutItem::Connector(Connector {
                    from: (x, y - params.connector_drop),
                    to: (child_x, child_y),
                    depth: depth + 1,
                }));
                place(child, child_x, child_y, depth + 1, dx * params.shrink, params, items);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lone_leaf() {
        let tree: DecisionTree<i32, f64> = DecisionTree::leaf(1);
        let layout = TreeLayout::compute(&tree, &LayoutParams::default());
        assert_eq!(layout.items(), &[LayoutItem::Box(PlacedBox {
            x: 0.5, y: 1.0, text: String::from("Class: 1"), kind: BoxKind::Leaf, depth: 0 })]);
        assert_eq!(0, layout.connectors().count());
    }

    #[test]
    fn offsets_shrink_per_level() {
        let tree = DecisionTree::node(
            0, 1.0,
            DecisionTree::node(1, 2.0, DecisionTree::leaf(0), DecisionTree::leaf(1)),
            DecisionTree::leaf(2),
        );
        let layout = TreeLayout::compute(&tree, &LayoutParams::default());
        let boxes: Vec<_> = layout.boxes().collect();
        assert_eq!(5, boxes.len());

        // Pre-order: root, left split, its two leaves, right leaf
        assert!(approx_eq(0.25, boxes[1].x) && approx_eq(-9.0, boxes[1].y));
        assert!(approx_eq(0.25 - 0.15, boxes[2].x) && approx_eq(-19.0, boxes[2].y));
        assert!(approx_eq(0.25 + 0.15, boxes[3].x));
        assert!(approx_eq(0.75, boxes[4].x) && approx_eq(-9.0, boxes[4].y));
        assert_eq!(vec![0, 1, 2, 2, 1], boxes.iter().map(|b| b.depth).collect::<Vec<_>>());
    }

    #[test]
    fn connectors_leave_below_parent() {
        let tree = DecisionTree::node(4, 0.125, DecisionTree::leaf("a"), DecisionTree::leaf("b"));
        let layout = TreeLayout::compute(&tree, &LayoutParams::default());
        let connectors: Vec<_> = layout.connectors().collect();
        assert_eq!(2, connectors.len());
        assert!(approx_eq(0.5, connectors[0].from.0) && approx_eq(0.0, connectors[0].from.1));
        assert!(approx_eq(0.25, connectors[0].to.0) && approx_eq(-9.0, connectors[0].to.1));
        assert!(approx_eq(0.75, connectors[1].to.0));
    }

    #[test]
    fn threshold_formatting() {
        let tree = DecisionTree::node(4, 0.1234_f32, DecisionTree::leaf("a"), DecisionTree::leaf("b"));
        let default = TreeLayout::compute(&tree, &LayoutParams::default());
        assert_eq!("X[4] <= 0.12", default.boxes().next().unwrap().text);

        let params = LayoutParams::builder().threshold_precision(3).build();
        let precise = TreeLayout::compute(&tree, &params);
        assert_eq!("X[4] <= 0.123", precise.boxes().next().unwrap().text);
    }

    #[test]
    fn builder_clamps_out_of_range_values() {
        let params = LayoutParams::builder()
            .shrink(1.5)
            .level_height(-2.0)
            .initial_offset(f64::NAN)
            .build();
        assert_eq!(1.0, params.shrink);
        assert_eq!(0.0, params.level_height);
        assert_eq!(INITIAL_OFFSET_DEFAULT, params.initial_offset);
        assert_eq!(0.0, params.connector_drop);
    }

    #[test]
    fn connector_drop_follows_level_height() {
        let params = LayoutParams::builder().level_height(4.0).build();
        assert!(approx_eq(0.4, params.connector_drop));
        let explicit = LayoutParams::builder().level_height(4.0).connector_drop(1.0).build();
        assert_eq!(1.0, explicit.connector_drop);
    }
}
