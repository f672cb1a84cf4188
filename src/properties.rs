use crate::data::{Graph, Path};

/// Plain 3D vector used for constant vector properties and camera poses.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// Normalized RGBA color. Channels live in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Scalar property: a fixed value or a [`Graph`] evaluated at playback time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScalarProperty {
    Constant(f64),
    Data(Graph),
}

impl From<f64> for ScalarProperty {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<Graph> for ScalarProperty {
    fn from(graph: Graph) -> Self {
        Self::Data(graph)
    }
}

/// Vector property: a fixed vector or a [`Path`] evaluated at playback time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VectorProperty {
    Constant(Vec3),
    Data(Path),
}

impl From<Vec3> for VectorProperty {
    fn from(value: Vec3) -> Self {
        Self::Constant(value)
    }
}

impl From<(f64, f64, f64)> for VectorProperty {
    fn from(value: (f64, f64, f64)) -> Self {
        Self::Constant(value.into())
    }
}

impl From<Path> for VectorProperty {
    fn from(path: Path) -> Self {
        Self::Data(path)
    }
}

/// Color property.
///
/// `Named` colors are resolved through the color table strictly before
/// encoding; names never appear on the wire. `Scalar` and `Data` are mapped
/// through the scene colormap at playback and therefore fold into the
/// colormap domain during encoding.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorProperty {
    Named(String),
    Constant(Color),
    Scalar(f64),
    Data(Graph),
}

impl Default for ColorProperty {
    fn default() -> Self {
        Self::Named("black".to_owned())
    }
}

impl From<&str> for ColorProperty {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<Color> for ColorProperty {
    fn from(color: Color) -> Self {
        Self::Constant(color)
    }
}

impl From<f64> for ColorProperty {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Graph> for ColorProperty {
    fn from(graph: Graph) -> Self {
        Self::Data(graph)
    }
}
