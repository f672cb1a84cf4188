//! Wire-to-scene translation.
//!
//! Decoding is lenient where the format allows it: absent properties fall
//! back to documented defaults, dangling table references become empty
//! series, and animatables with an unrecognized body keep their metadata as
//! [`Body::Unknown`] placeholders.

use std::collections::BTreeMap;

use prost::Message as _;

use crate::colormap::{Colormap, ColormapStop};
use crate::data::{Graph, GraphPoint, Path, PathPoint, TextLike};
use crate::error::{ScenewireError, ScenewireResult};
use crate::objects::{Animatable, Body, Line, Overlay, Prism, Sphere, Tube};
use crate::properties::{Color, ColorProperty, ScalarProperty, VectorProperty};
use crate::scene::{Camera, Scene};
use crate::wire;

fn interpolation(raw: i32) -> crate::data::Interpolation {
    wire::Interpolation::try_from(raw)
        .unwrap_or(wire::Interpolation::Linear)
        .into()
}

fn decode_graph(graph: &wire::Graph) -> Graph {
    Graph {
        name: graph.name.clone(),
        points: graph
            .points
            .iter()
            .map(|p| GraphPoint {
                time: p.time,
                value: p.value,
            })
            .collect(),
        interpolation: interpolation(graph.interpolation),
    }
}

fn decode_path(path: &wire::Path) -> Path {
    Path {
        name: path.name.clone(),
        points: path
            .points
            .iter()
            .map(|p| {
                let position = p.position.unwrap_or_default();
                PathPoint {
                    time: p.time,
                    x: position.x,
                    y: position.y,
                    z: position.z,
                }
            })
            .collect(),
        interpolation: interpolation(path.interpolation),
    }
}

/// Table lookup for reference-valued properties. A dangling id yields an
/// empty default series rather than an error; the file is still usable.
fn graph_by_id(id: u32, graphs: &BTreeMap<u32, Graph>) -> Graph {
    graphs.get(&id).cloned().unwrap_or_default()
}

fn path_by_id(id: u32, paths: &BTreeMap<u32, Path>) -> Path {
    paths.get(&id).cloned().unwrap_or_default()
}

fn decode_scalar(
    prop: Option<&wire::ScalarProperty>,
    default: f64,
    graphs: &BTreeMap<u32, Graph>,
) -> ScalarProperty {
    match prop.and_then(|p| p.value) {
        Some(wire::scalar_property::Value::ConstValue(v)) => ScalarProperty::Constant(v),
        Some(wire::scalar_property::Value::GraphId(id)) => {
            ScalarProperty::Data(graph_by_id(id, graphs))
        }
        None => ScalarProperty::Constant(default),
    }
}

fn decode_vector(
    prop: Option<&wire::VectorProperty>,
    paths: &BTreeMap<u32, Path>,
) -> Option<VectorProperty> {
    match prop.and_then(|p| p.value) {
        Some(wire::vector_property::Value::ConstValue(v)) => {
            Some(VectorProperty::Constant(v.into()))
        }
        Some(wire::vector_property::Value::PathId(id)) => {
            Some(VectorProperty::Data(path_by_id(id, paths)))
        }
        None => None,
    }
}

fn decode_color(prop: Option<&wire::ColorProperty>, graphs: &BTreeMap<u32, Graph>) -> ColorProperty {
    match prop.and_then(|p| p.value) {
        Some(wire::color_property::Value::ConstValue(c)) => ColorProperty::Constant(c.into()),
        Some(wire::color_property::Value::ScalarValue(v)) => ColorProperty::Scalar(v),
        Some(wire::color_property::Value::GraphId(id)) => {
            ColorProperty::Data(graph_by_id(id, graphs))
        }
        None => ColorProperty::Constant(Color::WHITE),
    }
}

fn decode_body(
    body: Option<&wire::animatible::Body>,
    graphs: &BTreeMap<u32, Graph>,
    paths: &BTreeMap<u32, Path>,
) -> Body {
    match body {
        Some(wire::animatible::Body::Sphere(sphere)) => Body::Sphere(Sphere {
            position: decode_vector(sphere.position.as_ref(), paths),
            radius: decode_scalar(sphere.radius.as_ref(), 1.0, graphs),
            color: decode_color(sphere.color.as_ref(), graphs),
        }),
        Some(wire::animatible::Body::Tube(tube)) => Body::Tube(Tube {
            path: path_by_id(tube.path_id, paths),
            is_growing: tube.is_growing,
            radius: decode_scalar(tube.radius.as_ref(), 1.0, graphs),
            color: decode_color(tube.color.as_ref(), graphs),
        }),
        Some(wire::animatible::Body::Line(line)) => Body::Line(Line {
            start: decode_vector(line.start.as_ref(), paths),
            end: decode_vector(line.end.as_ref(), paths),
            line_width: decode_scalar(line.line_width.as_ref(), 1.0, graphs),
            color: decode_color(line.color.as_ref(), graphs),
            point_forward: line.point_forward,
            point_backward: line.point_backward,
        }),
        Some(wire::animatible::Body::Prism(prism)) => Body::Prism(Prism {
            position: decode_vector(prism.position.as_ref(), paths),
            normal: decode_vector(prism.normal.as_ref(), paths),
            rotation: decode_scalar(prism.rotation.as_ref(), 0.0, graphs),
            radius: decode_scalar(prism.radius.as_ref(), 1.0, graphs),
            height: decode_scalar(prism.height.as_ref(), 1.0, graphs),
            n_vertices: prism.n_vertices,
            color: decode_color(prism.color.as_ref(), graphs),
        }),
        Some(wire::animatible::Body::Overlay(overlay)) => Body::Overlay(Overlay {
            text: TextLike::Plain(overlay.text.clone()),
            position: wire::TextPosition::try_from(overlay.position)
                .unwrap_or(wire::TextPosition::LowerLeft)
                .into(),
            font_size: decode_scalar(overlay.font_size.as_ref(), 16.0, graphs),
            bold: overlay.bold,
            italic: overlay.italic,
        }),
        None => Body::Unknown,
    }
}

fn decode_animatable(
    animatible: &wire::Animatible,
    graphs: &BTreeMap<u32, Graph>,
    paths: &BTreeMap<u32, Path>,
) -> Animatable {
    Animatable {
        name: (!animatible.name.is_empty()).then(|| animatible.name.clone()),
        groups: animatible.groups.clone(),
        description: animatible
            .description
            .as_ref()
            .map(|text| TextLike::Plain(text.clone())),
        body: decode_body(animatible.body.as_ref(), graphs, paths),
    }
}

fn decode_colormap(colormap: &wire::ColorMap) -> Option<Colormap> {
    if colormap.stops.is_empty() {
        return None;
    }
    Some(Colormap::Stops(
        colormap
            .stops
            .iter()
            .map(|stop| ColormapStop {
                value: stop.value,
                color: stop.color.map(Into::into).unwrap_or_default(),
            })
            .collect(),
    ))
}

/// Decodes serialized wire bytes back into a [`Scene`].
///
/// The result carries the flattened tables as scene-owned data; reference
/// properties hold clones of the rows they pointed at.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_scene(bytes: &[u8]) -> ScenewireResult<Scene> {
    let wire = wire::Scene::decode(bytes)?;
    let meta = wire
        .meta
        .ok_or_else(|| ScenewireError::structural("scene is missing its meta block"))?;

    let graphs: BTreeMap<u32, Graph> = wire
        .graphs
        .iter()
        .map(|g| (g.id, decode_graph(g)))
        .collect();
    let paths: BTreeMap<u32, Path> = wire.paths.iter().map(|p| (p.id, decode_path(p))).collect();

    let animatables = wire
        .animatibles
        .iter()
        .map(|a| decode_animatable(a, &graphs, &paths))
        .collect();

    tracing::debug!(
        graphs = graphs.len(),
        paths = paths.len(),
        scene = %meta.name,
        "scene decoded"
    );
    Ok(Scene {
        name: meta.name,
        author: meta.author,
        date: meta
            .date
            .and_then(|ts| chrono::DateTime::from_timestamp(ts.seconds, ts.nanos as u32)),
        description: meta.description,
        start_time: Some(meta.start_time),
        end_time: Some(meta.end_time),
        speed_ratio: meta.speed_ratio,
        graphs: graphs.into_values().collect(),
        paths: paths.into_values().collect(),
        animatables,
        hidden_groups: wire.hidden_groups,
        camera: wire.camera.map(|camera| Camera {
            position: camera.position.map(Into::into),
            target: camera.target.map(Into::into),
        }),
        colormap: wire.colormap.as_ref().and_then(decode_colormap),
        colormap_range: None,
    })
}
