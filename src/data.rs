use crate::properties::{ScalarProperty, VectorProperty};

/// How values between two consecutive control points are produced at playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Interpolation {
    /// Linear interpolation between consecutive control points.
    #[default]
    Linear,
    /// Hold the last value until the next control point is reached.
    Hold,
    /// Hold the next value until the next control point is reached.
    Ahead,
    /// Switch from the last to the next value halfway between the two.
    Step,
}

/// A single `(time, value)` control point of a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphPoint {
    pub time: f64,
    pub value: f64,
}

/// Time-indexed scalar series interpolating between control points.
///
/// Control points are kept in insertion order; the encoder emits them sorted
/// by time without touching the original.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Graph {
    pub name: String,
    pub points: Vec<GraphPoint>,
    pub interpolation: Interpolation,
}

impl Graph {
    pub fn new(name: impl Into<String>, points: Vec<GraphPoint>) -> Self {
        Self {
            name: name.into(),
            points,
            interpolation: Interpolation::default(),
        }
    }

    /// Builds a graph from raw `(time, value)` rows.
    pub fn from_rows(name: impl Into<String>, rows: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(
            name,
            rows.into_iter()
                .map(|(time, value)| GraphPoint { time, value })
                .collect(),
        )
    }

    /// Control points as a time-sorted copy. Sort is stable, so points sharing
    /// a time value keep their insertion order.
    pub fn sorted_points(&self) -> Vec<GraphPoint> {
        let mut points = self.points.clone();
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        points
    }

    /// Table identity: graphs deduplicate on name and control points, not on
    /// interpolation mode.
    pub(crate) fn same_data(&self, other: &Graph) -> bool {
        self.name == other.name && self.points == other.points
    }
}

/// A single `(time, x, y, z)` control point of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathPoint {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Time-indexed 3D vector series, the four-column analogue of [`Graph`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Path {
    pub name: String,
    pub points: Vec<PathPoint>,
    pub interpolation: Interpolation,
}

impl Path {
    pub fn new(name: impl Into<String>, points: Vec<PathPoint>) -> Self {
        Self {
            name: name.into(),
            points,
            interpolation: Interpolation::default(),
        }
    }

    /// Builds a path from raw `(time, x, y, z)` rows.
    pub fn from_rows(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = (f64, f64, f64, f64)>,
    ) -> Self {
        Self::new(
            name,
            rows.into_iter()
                .map(|(time, x, y, z)| PathPoint { time, x, y, z })
                .collect(),
        )
    }

    pub fn sorted_points(&self) -> Vec<PathPoint> {
        let mut points = self.points.clone();
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        points
    }

    pub(crate) fn same_data(&self, other: &Path) -> bool {
        self.name == other.name && self.points == other.points
    }
}

/// A template string together with the data it may reference.
///
/// The attached graphs and paths are addressable from the template either
/// positionally (`%(graphs[0])`) or by their unique name (`%(energy)`).
/// Attachments are encoded into the scene tables like any other property, in
/// declaration order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Text {
    pub content: String,
    pub graphs: Vec<ScalarProperty>,
    pub paths: Vec<VectorProperty>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            graphs: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn with_graph(mut self, graph: impl Into<ScalarProperty>) -> Self {
        self.graphs.push(graph.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<VectorProperty>) -> Self {
        self.paths.push(path.into());
        self
    }
}

/// Either a plain string or a data-driven template.
///
/// Plain strings pass through encoding untouched; only templates are
/// interpreted and rewritten.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TextLike {
    Plain(String),
    Template(Text),
}

impl From<&str> for TextLike {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

impl From<String> for TextLike {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<Text> for TextLike {
    fn from(value: Text) -> Self {
        Self::Template(value)
    }
}
