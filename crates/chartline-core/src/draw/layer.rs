//! Layer-based z-ordering for SVG output.
//!
//! Drawables do not emit SVG directly into the document. They push nodes into
//! a [`LayeredOutput`] tagged with a [`RenderLayer`]; the exporter flattens the
//! output so that box fills never cover arrows and labels are always on top.
//!
//! ```
//! # use chartline_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Hold")));
//! output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
//!
//! // Content renders before Text regardless of insertion order
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use std::collections::BTreeMap;

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Boxes and panels
    Content,
    /// Connector lines and arrowheads
    Arrow,
    /// Box captions, arrow labels and free annotations
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the given layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`, keeping its layer assignment.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes collected on `layer`.
    pub fn count_in(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Within a
    /// layer, nodes keep their insertion order.
    pub fn render(self) -> Vec<SvgNode> {
        let mut by_layer: BTreeMap<RenderLayer, Vec<SvgNode>> = BTreeMap::new();
        for (layer, node) in self.items {
            by_layer.entry(layer).or_default().push(node);
        }

        by_layer
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
