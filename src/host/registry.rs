use std::collections::BTreeMap;

use crate::foundation::core::{BBox, Point, TargetId};
use crate::host::defaults::attr_default;
use crate::host::value::PropValue;
use crate::host::{MeasurementProvider, Property, PropertyAccessor};
use crate::transform::AffineTransform;
use crate::values::geometry::{Geometry, GeometryMeasure};
use crate::values::path::PathArray;
use crate::values::points::PointArray;
use crate::values::viewbox::ViewBox;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    Group,
    Svg,
    Text,
}

impl NodeKind {
    fn geometry_attr(self) -> Option<&'static str> {
        match self {
            Self::Polyline | Self::Polygon => Some("points"),
            Self::Path => Some("d"),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    attrs: BTreeMap<String, PropValue>,
    styles: BTreeMap<String, PropValue>,
    geometry: Option<Geometry>,
    transform: AffineTransform,
    viewbox: Option<ViewBox>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        let geometry = match kind {
            NodeKind::Line => Some(Geometry::Points(PointArray::new(vec![
                Point::ORIGIN,
                Point::ORIGIN,
            ]))),
            NodeKind::Polyline | NodeKind::Polygon => Some(Geometry::Points(PointArray::default())),
            NodeKind::Path => Some(Geometry::Path(PathArray::default())),
            _ => None,
        };
        Self {
            kind,
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            geometry,
            transform: AffineTransform::IDENTITY,
            viewbox: None,
        }
    }

    fn num(&self, name: &str) -> f64 {
        self.attrs
            .get(name)
            .and_then(PropValue::as_f64)
            .unwrap_or(0.0)
    }

    fn set_num(&mut self, name: &str, v: f64) {
        self.attrs.insert(name.to_owned(), PropValue::Number(v));
    }

    /// Horizontal and vertical radius for round shapes.
    fn radii(&self) -> Option<(f64, f64)> {
        match self.kind {
            NodeKind::Circle => Some((self.num("r"), self.num("r"))),
            NodeKind::Ellipse => Some((self.num("rx"), self.num("ry"))),
            _ => None,
        }
    }

    fn bbox<M: GeometryMeasure + ?Sized>(&self, measure: &M) -> BBox {
        if let Some(g) = &self.geometry {
            return g.bbox(measure);
        }
        if let Some((rx, ry)) = self.radii() {
            return BBox::new(
                self.num("cx") - rx,
                self.num("cy") - ry,
                rx * 2.0,
                ry * 2.0,
            );
        }
        BBox::new(
            self.num("x"),
            self.num("y"),
            self.num("width"),
            self.num("height"),
        )
    }

    /// Replace geometry, keeping the node's own kind of geometry.
    fn plot(&mut self, value: &PropValue) {
        let Some(incoming) = value
            .to_geometry()
            .or_else(|| self.parse_geometry(&value.to_string()))
        else {
            return;
        };
        self.geometry = Some(match &self.geometry {
            Some(current) => current.coerce_like(incoming),
            None => incoming,
        });
    }

    fn parse_geometry(&self, s: &str) -> Option<Geometry> {
        match self.kind {
            NodeKind::Path => Some(Geometry::Path(PathArray::parse(s))),
            NodeKind::Line | NodeKind::Polyline | NodeKind::Polygon => {
                Some(Geometry::Points(PointArray::parse(s)))
            }
            _ => None,
        }
    }
}

/// In-memory host: an id-indexed table of nodes.
///
/// Bounds ignore transforms, matching what a renderer reports for `getBBox`.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: BTreeMap<TargetId, Node>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: NodeKind) -> TargetId {
        self.next_id += 1;
        let id = TargetId(self.next_id);
        self.nodes.insert(id, Node::new(kind));
        tracing::trace!(id = id.0, ?kind, "node inserted");
        id
    }

    pub fn remove(&mut self, id: TargetId) -> bool {
        self.nodes.remove(&id).is_some()
    }

    pub fn kind(&self, id: TargetId) -> Option<NodeKind> {
        self.nodes.get(&id).map(|n| n.kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn rect(&mut self, width: f64, height: f64) -> TargetId {
        let id = self.insert(NodeKind::Rect);
        self.with_node(id, |n| {
            n.set_num("width", width);
            n.set_num("height", height);
        });
        id
    }

    pub fn circle(&mut self, diameter: f64) -> TargetId {
        let id = self.insert(NodeKind::Circle);
        self.with_node(id, |n| n.set_num("r", diameter / 2.0));
        id
    }

    pub fn ellipse(&mut self, width: f64, height: f64) -> TargetId {
        let id = self.insert(NodeKind::Ellipse);
        self.with_node(id, |n| {
            n.set_num("rx", width / 2.0);
            n.set_num("ry", height / 2.0);
        });
        id
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> TargetId {
        let id = self.insert(NodeKind::Line);
        self.with_node(id, |n| {
            n.geometry = Some(Geometry::Points(PointArray::new(vec![
                Point::new(x1, y1),
                Point::new(x2, y2),
            ])));
        });
        id
    }

    pub fn polyline(&mut self, points: impl Into<PointArray>) -> TargetId {
        self.with_geometry(NodeKind::Polyline, Geometry::Points(points.into()))
    }

    pub fn polygon(&mut self, points: impl Into<PointArray>) -> TargetId {
        self.with_geometry(NodeKind::Polygon, Geometry::Points(points.into()))
    }

    pub fn path(&mut self, d: impl Into<PathArray>) -> TargetId {
        self.with_geometry(NodeKind::Path, Geometry::Path(d.into()))
    }

    pub fn group(&mut self) -> TargetId {
        self.insert(NodeKind::Group)
    }

    pub fn svg(&mut self, width: f64, height: f64) -> TargetId {
        let id = self.insert(NodeKind::Svg);
        self.with_node(id, |n| {
            n.set_num("width", width);
            n.set_num("height", height);
        });
        id
    }

    fn with_geometry(&mut self, kind: NodeKind, geometry: Geometry) -> TargetId {
        let id = self.insert(kind);
        self.with_node(id, |n| n.geometry = Some(geometry));
        id
    }

    fn with_node(&mut self, id: TargetId, f: impl FnOnce(&mut Node)) {
        if let Some(n) = self.nodes.get_mut(&id) {
            f(n);
        }
    }

    fn set_edge(&mut self, id: TargetId, axis: Axis, edge: f64, centered: bool) {
        let Some(mut node) = self.nodes.remove(&id) else {
            return;
        };
        let b = node.bbox(&*self);
        let target = if centered {
            edge - axis.pick(b.width, b.height) / 2.0
        } else {
            edge
        };
        if let Some(g) = node.geometry.as_mut() {
            match axis {
                Axis::X => g.move_to(target, b.y, &*self),
                Axis::Y => g.move_to(b.x, target, &*self),
            }
        } else if let Some((rx, ry)) = node.radii() {
            node.set_num(axis.pick("cx", "cy"), target + axis.pick(rx, ry));
        } else {
            node.set_num(axis.pick("x", "y"), target);
        }
        self.nodes.insert(id, node);
    }

    fn set_extent(&mut self, id: TargetId, axis: Axis, len: f64) {
        let Some(mut node) = self.nodes.remove(&id) else {
            return;
        };
        let b = node.bbox(&*self);
        if let Some(g) = node.geometry.as_mut() {
            match axis {
                Axis::X => g.size(len, b.height, &*self),
                Axis::Y => g.size(b.width, len, &*self),
            }
        } else if node.kind == NodeKind::Circle {
            node.set_num("r", len / 2.0);
        } else if node.kind == NodeKind::Ellipse {
            node.set_num(axis.pick("rx", "ry"), len / 2.0);
        } else {
            node.set_num(axis.pick("width", "height"), len);
        }
        self.nodes.insert(id, node);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn pick<T>(self, x: T, y: T) -> T {
        match self {
            Self::X => x,
            Self::Y => y,
        }
    }
}

impl GeometryMeasure for Registry {}

impl MeasurementProvider for Registry {
    fn bbox(&self, target: TargetId) -> BBox {
        self.nodes
            .get(&target)
            .map(|n| n.bbox(self))
            .unwrap_or_default()
    }
}

impl PropertyAccessor for Registry {
    fn get(&self, target: TargetId, property: &Property) -> Option<PropValue> {
        let node = self.nodes.get(&target)?;
        match property {
            Property::Attr(name) => {
                if node.kind.geometry_attr() == Some(name.as_str()) {
                    return node.geometry.clone().map(PropValue::from);
                }
                match name.as_str() {
                    "transform" => Some(PropValue::Transform(node.transform)),
                    "viewBox" => node.viewbox.map(PropValue::ViewBox),
                    _ => node
                        .attrs
                        .get(name)
                        .cloned()
                        .or_else(|| attr_default(name)),
                }
            }
            Property::Style(name) => node.styles.get(name).cloned(),
            Property::X => Some(PropValue::Number(node.bbox(self).x)),
            Property::Y => Some(PropValue::Number(node.bbox(self).y)),
            Property::Cx => Some(PropValue::Number(node.bbox(self).cx())),
            Property::Cy => Some(PropValue::Number(node.bbox(self).cy())),
            Property::Width => Some(PropValue::Number(node.bbox(self).width)),
            Property::Height => Some(PropValue::Number(node.bbox(self).height)),
            Property::Plot => node.geometry.clone().map(PropValue::from),
            Property::Transform => Some(PropValue::Transform(node.transform)),
            Property::ViewBox => node.viewbox.map(PropValue::ViewBox),
        }
    }

    fn set(&mut self, target: TargetId, property: &Property, value: PropValue) {
        if !self.nodes.contains_key(&target) {
            tracing::debug!(id = target.0, %property, "set on unknown node ignored");
            return;
        }
        let number = || value.as_f64().unwrap_or(0.0);
        match property {
            Property::X => self.set_edge(target, Axis::X, number(), false),
            Property::Y => self.set_edge(target, Axis::Y, number(), false),
            Property::Cx => self.set_edge(target, Axis::X, number(), true),
            Property::Cy => self.set_edge(target, Axis::Y, number(), true),
            Property::Width => self.set_extent(target, Axis::X, number()),
            Property::Height => self.set_extent(target, Axis::Y, number()),
            Property::Plot => self.with_node(target, |n| n.plot(&value)),
            Property::Transform => self.with_node(target, |n| {
                n.transform = match &value {
                    PropValue::Transform(m) => *m,
                    other => AffineTransform::parse(&other.to_string()),
                }
            }),
            Property::ViewBox => self.with_node(target, |n| {
                n.viewbox = Some(match &value {
                    PropValue::ViewBox(v) => *v,
                    other => ViewBox::parse(&other.to_string()),
                })
            }),
            Property::Style(name) => self.with_node(target, |n| {
                n.styles.insert(name.clone(), value.clone());
            }),
            Property::Attr(name) => self.with_node(target, |n| {
                if n.kind.geometry_attr() == Some(name.as_str()) {
                    n.plot(&value);
                    return;
                }
                match name.as_str() {
                    "transform" => {
                        n.transform = match &value {
                            PropValue::Transform(m) => *m,
                            other => AffineTransform::parse(&other.to_string()),
                        }
                    }
                    "viewBox" => n.viewbox = Some(ViewBox::parse(&value.to_string())),
                    _ => {
                        n.attrs.insert(name.clone(), value.clone());
                    }
                }
            }),
        }
    }

    fn contains(&self, target: TargetId) -> bool {
        self.nodes.contains_key(&target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/registry.rs"]
mod tests;
