use std::str::FromStr;

use crate::data::TextLike;
use crate::error::{ScenewireError, ScenewireResult};
use crate::properties::{ColorProperty, ScalarProperty, VectorProperty};

/// A renderable scene object: shared metadata plus a typed body.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animatable {
    /// Display name. Unnamed objects get `"<TypeName> <n>"` assigned during
    /// encoding, numbered per type in encounter order.
    pub name: Option<String>,
    /// Group tags; viewers can toggle whole groups.
    pub groups: Vec<String>,
    /// Rich description shown while the object is highlighted.
    pub description: Option<TextLike>,
    pub body: Body,
}

impl Animatable {
    pub fn new(body: impl Into<Body>) -> Self {
        Self {
            name: None,
            groups: Vec::new(),
            description: None,
            body: body.into(),
        }
    }

    pub fn named(name: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(body)
        }
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<TextLike>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Body {
    Sphere(Sphere),
    Tube(Tube),
    Line(Line),
    Prism(Prism),
    Overlay(Overlay),
    /// Placeholder for a variant this library does not know. Produced by the
    /// decoder when it meets an unrecognized type tag; only the common
    /// metadata survives.
    Unknown,
}

impl Body {
    pub fn type_name(&self) -> &'static str {
        match self {
            Body::Sphere(_) => "Sphere",
            Body::Tube(_) => "Tube",
            Body::Line(_) => "Line",
            Body::Prism(_) => "Prism",
            Body::Overlay(_) => "Overlay",
            Body::Unknown => "Unknown",
        }
    }
}

macro_rules! body_from {
    ($ty:ident) => {
        impl From<$ty> for Body {
            fn from(value: $ty) -> Self {
                Body::$ty(value)
            }
        }
    };
}

body_from!(Sphere);
body_from!(Tube);
body_from!(Line);
body_from!(Prism);
body_from!(Overlay);

/// Sphere at a fixed or path-driven position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sphere {
    /// Center; the origin when absent.
    pub position: Option<VectorProperty>,
    pub radius: ScalarProperty,
    pub color: ColorProperty,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: None,
            radius: ScalarProperty::Constant(1.0),
            color: ColorProperty::default(),
        }
    }
}

/// Tube following a path through space, optionally growing with time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tube {
    pub path: crate::data::Path,
    /// Whether the tube extends over time as its path progresses.
    pub is_growing: bool,
    /// Radius along the tube; a graph is matched against the path by time.
    pub radius: ScalarProperty,
    pub color: ColorProperty,
}

impl Tube {
    pub fn new(path: impl Into<crate::data::Path>) -> Self {
        Self {
            path: path.into(),
            is_growing: true,
            radius: ScalarProperty::Constant(1.0),
            color: ColorProperty::default(),
        }
    }
}

/// Straight animated line, optionally arrow-tipped.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// Start position; the origin when absent.
    pub start: Option<VectorProperty>,
    /// End position; the origin when absent.
    pub end: Option<VectorProperty>,
    pub line_width: ScalarProperty,
    pub color: ColorProperty,
    /// Arrow head at the end position.
    pub point_forward: bool,
    /// Arrow head at the start position.
    pub point_backward: bool,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            line_width: ScalarProperty::Constant(1.0),
            color: ColorProperty::default(),
            point_forward: false,
            point_backward: false,
        }
    }
}

/// Regular prism standing on a base polygon.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Prism {
    pub position: Option<VectorProperty>,
    /// Base plane normal; straight up when absent.
    pub normal: Option<VectorProperty>,
    /// Rotation around the normal, in radians.
    pub rotation: ScalarProperty,
    pub radius: ScalarProperty,
    pub height: ScalarProperty,
    /// Vertex count of the base polygon.
    pub n_vertices: u32,
    pub color: ColorProperty,
}

impl Default for Prism {
    fn default() -> Self {
        Self {
            position: None,
            normal: None,
            rotation: ScalarProperty::Constant(0.0),
            radius: ScalarProperty::Constant(1.0),
            height: ScalarProperty::Constant(1.0),
            n_vertices: 3,
            color: ColorProperty::default(),
        }
    }
}

/// Screen-space text overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Overlay {
    pub text: TextLike,
    pub position: TextPosition,
    pub font_size: ScalarProperty,
    pub bold: bool,
    pub italic: bool,
}

impl Overlay {
    pub fn new(text: impl Into<TextLike>) -> Self {
        Self {
            text: text.into(),
            position: TextPosition::default(),
            font_size: ScalarProperty::Constant(16.0),
            bold: false,
            italic: false,
        }
    }
}

/// Anchor of an [`Overlay`] on the screen surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    UpperRight,
    UpperLeft,
    LowerRight,
    #[default]
    LowerLeft,
}

impl FromStr for TextPosition {
    type Err = ScenewireError;

    fn from_str(s: &str) -> ScenewireResult<Self> {
        match s {
            "center" | "c" => Ok(Self::Center),
            "top" | "t" => Ok(Self::Top),
            "bottom" | "b" => Ok(Self::Bottom),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "upper right" | "ur" => Ok(Self::UpperRight),
            "upper left" | "ul" => Ok(Self::UpperLeft),
            "lower right" | "lr" => Ok(Self::LowerRight),
            "lower left" | "ll" => Ok(Self::LowerLeft),
            other => Err(ScenewireError::validation(format!(
                "'{other}' is not a valid text position"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_position_accepts_long_and_short_forms() {
        assert_eq!(
            "upper right".parse::<TextPosition>().unwrap(),
            TextPosition::UpperRight
        );
        assert_eq!("ll".parse::<TextPosition>().unwrap(), TextPosition::LowerLeft);
        assert!("middle".parse::<TextPosition>().is_err());
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let sphere = Sphere::default();
        assert_eq!(sphere.radius, ScalarProperty::Constant(1.0));
        assert_eq!(sphere.color, ColorProperty::Named("black".into()));

        let overlay = Overlay::new("hi");
        assert_eq!(overlay.position, TextPosition::LowerLeft);
        assert_eq!(overlay.font_size, ScalarProperty::Constant(16.0));
    }
}
