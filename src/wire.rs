//! Wire message schema consumed by the external viewer.
//!
//! This mirrors the externally specified tagged-field schema: optional fields
//! carry presence bits and every property message populates exactly one
//! variant of its oneof. Unknown fields are skipped on decode, which is what
//! lets newer scene files degrade into [`Unknown`](crate::objects::Body::Unknown)
//! placeholders instead of failing.

/// Top-level scene message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Scene {
    #[prost(message, optional, tag = "1")]
    pub meta: Option<SceneMeta>,
    #[prost(message, optional, tag = "2")]
    pub camera: Option<Camera>,
    #[prost(message, optional, tag = "3")]
    pub colormap: Option<ColorMap>,
    #[prost(message, repeated, tag = "4")]
    pub graphs: Vec<Graph>,
    #[prost(message, repeated, tag = "5")]
    pub paths: Vec<Path>,
    #[prost(message, repeated, tag = "6")]
    pub animatibles: Vec<Animatible>,
    #[prost(string, repeated, tag = "7")]
    pub hidden_groups: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SceneMeta {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, optional, tag = "2")]
    pub author: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub date: Option<::prost_types::Timestamp>,
    #[prost(string, optional, tag = "4")]
    pub description: Option<String>,
    #[prost(double, tag = "5")]
    pub start_time: f64,
    #[prost(double, tag = "6")]
    pub end_time: f64,
    #[prost(double, tag = "7")]
    pub speed_ratio: f64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Vector {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Color {
    #[prost(double, tag = "1")]
    pub r: f64,
    #[prost(double, tag = "2")]
    pub g: f64,
    #[prost(double, tag = "3")]
    pub b: f64,
    #[prost(double, tag = "4")]
    pub a: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Interpolation {
    Linear = 0,
    Hold = 1,
    Ahead = 2,
    Step = 3,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GraphPoint {
    #[prost(double, tag = "1")]
    pub time: f64,
    #[prost(double, tag = "2")]
    pub value: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Graph {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint32, tag = "2")]
    pub id: u32,
    #[prost(enumeration = "Interpolation", tag = "3")]
    pub interpolation: i32,
    #[prost(message, repeated, tag = "4")]
    pub points: Vec<GraphPoint>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PathPoint {
    #[prost(double, tag = "1")]
    pub time: f64,
    #[prost(message, optional, tag = "2")]
    pub position: Option<Vector>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Path {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint32, tag = "2")]
    pub id: u32,
    #[prost(enumeration = "Interpolation", tag = "3")]
    pub interpolation: i32,
    #[prost(message, repeated, tag = "4")]
    pub points: Vec<PathPoint>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ColorStop {
    #[prost(double, tag = "1")]
    pub value: f64,
    #[prost(message, optional, tag = "2")]
    pub color: Option<Color>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ColorMap {
    #[prost(message, repeated, tag = "1")]
    pub stops: Vec<ColorStop>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ScalarProperty {
    #[prost(oneof = "scalar_property::Value", tags = "1, 2")]
    pub value: Option<scalar_property::Value>,
}

pub mod scalar_property {
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(double, tag = "1")]
        ConstValue(f64),
        #[prost(uint32, tag = "2")]
        GraphId(u32),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct VectorProperty {
    #[prost(oneof = "vector_property::Value", tags = "1, 2")]
    pub value: Option<vector_property::Value>,
}

pub mod vector_property {
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        ConstValue(super::Vector),
        #[prost(uint32, tag = "2")]
        PathId(u32),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ColorProperty {
    #[prost(oneof = "color_property::Value", tags = "1, 2, 3")]
    pub value: Option<color_property::Value>,
}

pub mod color_property {
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        ConstValue(super::Color),
        #[prost(double, tag = "2")]
        ScalarValue(f64),
        #[prost(uint32, tag = "3")]
        GraphId(u32),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Camera {
    #[prost(message, optional, tag = "1")]
    pub position: Option<Vector>,
    #[prost(message, optional, tag = "2")]
    pub target: Option<Vector>,
}

/// Common animatable envelope. The body oneof starts at tag 16 to leave room
/// for shared metadata fields; a tag outside the known set decodes as `None`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Animatible {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, repeated, tag = "2")]
    pub groups: Vec<String>,
    #[prost(string, optional, tag = "3")]
    pub description: Option<String>,
    #[prost(oneof = "animatible::Body", tags = "16, 17, 18, 19, 20")]
    pub body: Option<animatible::Body>,
}

pub mod animatible {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "16")]
        Sphere(super::Sphere),
        #[prost(message, tag = "17")]
        Line(super::Line),
        #[prost(message, tag = "18")]
        Prism(super::Prism),
        #[prost(message, tag = "19")]
        Tube(super::Tube),
        #[prost(message, tag = "20")]
        Overlay(super::Overlay),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Sphere {
    #[prost(message, optional, tag = "1")]
    pub position: Option<VectorProperty>,
    #[prost(message, optional, tag = "2")]
    pub radius: Option<ScalarProperty>,
    #[prost(message, optional, tag = "3")]
    pub color: Option<ColorProperty>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Tube {
    #[prost(uint32, tag = "1")]
    pub path_id: u32,
    #[prost(bool, tag = "2")]
    pub is_growing: bool,
    #[prost(message, optional, tag = "3")]
    pub radius: Option<ScalarProperty>,
    #[prost(message, optional, tag = "4")]
    pub color: Option<ColorProperty>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Line {
    #[prost(message, optional, tag = "1")]
    pub start: Option<VectorProperty>,
    #[prost(message, optional, tag = "2")]
    pub end: Option<VectorProperty>,
    #[prost(message, optional, tag = "3")]
    pub line_width: Option<ScalarProperty>,
    #[prost(message, optional, tag = "4")]
    pub color: Option<ColorProperty>,
    #[prost(bool, tag = "5")]
    pub point_forward: bool,
    #[prost(bool, tag = "6")]
    pub point_backward: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Prism {
    #[prost(message, optional, tag = "1")]
    pub position: Option<VectorProperty>,
    #[prost(message, optional, tag = "2")]
    pub normal: Option<VectorProperty>,
    #[prost(message, optional, tag = "3")]
    pub rotation: Option<ScalarProperty>,
    #[prost(message, optional, tag = "4")]
    pub radius: Option<ScalarProperty>,
    #[prost(message, optional, tag = "5")]
    pub height: Option<ScalarProperty>,
    #[prost(uint32, tag = "6")]
    pub n_vertices: u32,
    #[prost(message, optional, tag = "7")]
    pub color: Option<ColorProperty>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TextPosition {
    Center = 0,
    Top = 1,
    Bottom = 2,
    Left = 3,
    Right = 4,
    UpperRight = 5,
    UpperLeft = 6,
    LowerRight = 7,
    LowerLeft = 8,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Overlay {
    #[prost(string, tag = "1")]
    pub text: String,
    #[prost(enumeration = "TextPosition", tag = "2")]
    pub position: i32,
    #[prost(message, optional, tag = "3")]
    pub font_size: Option<ScalarProperty>,
    #[prost(bool, tag = "4")]
    pub bold: bool,
    #[prost(bool, tag = "5")]
    pub italic: bool,
}

impl From<crate::properties::Color> for Color {
    fn from(c: crate::properties::Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl From<Color> for crate::properties::Color {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl From<crate::properties::Vec3> for Vector {
    fn from(v: crate::properties::Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector> for crate::properties::Vec3 {
    fn from(v: Vector) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<crate::data::Interpolation> for Interpolation {
    fn from(i: crate::data::Interpolation) -> Self {
        match i {
            crate::data::Interpolation::Linear => Self::Linear,
            crate::data::Interpolation::Hold => Self::Hold,
            crate::data::Interpolation::Ahead => Self::Ahead,
            crate::data::Interpolation::Step => Self::Step,
        }
    }
}

impl From<crate::objects::TextPosition> for TextPosition {
    fn from(p: crate::objects::TextPosition) -> Self {
        match p {
            crate::objects::TextPosition::Center => Self::Center,
            crate::objects::TextPosition::Top => Self::Top,
            crate::objects::TextPosition::Bottom => Self::Bottom,
            crate::objects::TextPosition::Left => Self::Left,
            crate::objects::TextPosition::Right => Self::Right,
            crate::objects::TextPosition::UpperRight => Self::UpperRight,
            crate::objects::TextPosition::UpperLeft => Self::UpperLeft,
            crate::objects::TextPosition::LowerRight => Self::LowerRight,
            crate::objects::TextPosition::LowerLeft => Self::LowerLeft,
        }
    }
}

impl From<TextPosition> for crate::objects::TextPosition {
    fn from(p: TextPosition) -> Self {
        match p {
            TextPosition::Center => Self::Center,
            TextPosition::Top => Self::Top,
            TextPosition::Bottom => Self::Bottom,
            TextPosition::Left => Self::Left,
            TextPosition::Right => Self::Right,
            TextPosition::UpperRight => Self::UpperRight,
            TextPosition::UpperLeft => Self::UpperLeft,
            TextPosition::LowerRight => Self::LowerRight,
            TextPosition::LowerLeft => Self::LowerLeft,
        }
    }
}

impl From<Interpolation> for crate::data::Interpolation {
    fn from(i: Interpolation) -> Self {
        match i {
            Interpolation::Linear => Self::Linear,
            Interpolation::Hold => Self::Hold,
            Interpolation::Ahead => Self::Ahead,
            Interpolation::Step => Self::Step,
        }
    }
}
