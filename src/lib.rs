#![forbid(unsafe_code)]

//! Bidirectional mapping between in-memory animated 3D event scenes and
//! their serialized wire form.
//!
//! A [`Scene`] owns deduplicated [`Graph`]/[`Path`] data tables and a list of
//! [`Animatable`] objects whose properties are either constants or references
//! into those tables. [`encode_scene`] flattens a scene into wire bytes,
//! interning shared data and resolving text templates along the way;
//! [`decode_scene`] reads the bytes back, turning unrecognized object types
//! into [`Body::Unknown`] placeholders instead of failing. Catalogue files
//! bundle several encoded scenes into one zip archive.

pub mod catalogue;
pub mod color;
pub mod colormap;
pub mod data;
pub mod decode;
pub mod encode;
pub mod error;
pub mod objects;
pub mod properties;
pub mod scene;
pub mod wire;

mod template;

pub use catalogue::{CatalogueReader, CatalogueWriter, open_scene, save_scene};
pub use colormap::{Colormap, ColormapRange, ColormapStop};
pub use data::{Graph, GraphPoint, Interpolation, Path, PathPoint, Text, TextLike};
pub use decode::decode_scene;
pub use encode::{encode_scene, scene_to_wire};
pub use error::{ReferenceError, ScenewireError, ScenewireResult};
pub use objects::{Animatable, Body, Line, Overlay, Prism, Sphere, TextPosition, Tube};
pub use properties::{Color, ColorProperty, ScalarProperty, Vec3, VectorProperty};
pub use scene::{Camera, Scene};
