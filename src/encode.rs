//! Scene-to-wire translation.
//!
//! Encoding walks the animatables once, interning every data-driven property
//! into shared graph/path tables and accumulating the colormap domain as it
//! goes. The caller's [`Scene`] is never mutated; all bookkeeping lives in an
//! [`EncodeState`] seeded from the scene's own tables.

use std::collections::BTreeMap;

use prost::Message as _;

use crate::color::lookup_color;
use crate::colormap::{Colormap, DomainAccumulator, build_colormap};
use crate::data::{Graph, Path, Text, TextLike};
use crate::error::ScenewireResult;
use crate::objects::{Animatable, Body, Line, Overlay, Prism, Sphere, Tube};
use crate::properties::{ColorProperty, ScalarProperty, VectorProperty};
use crate::scene::Scene;
use crate::template;
use crate::wire;

/// Deduplicated graph/path tables under construction.
///
/// Seeded from the scene-owned tables so that explicit entries keep their
/// positions; properties referencing equal data reuse the existing row.
#[derive(Default)]
struct TableBuilder {
    graphs: Vec<Graph>,
    paths: Vec<Path>,
}

impl TableBuilder {
    fn seeded(scene: &Scene) -> Self {
        Self {
            graphs: scene.graphs.clone(),
            paths: scene.paths.clone(),
        }
    }

    /// Returns the table id for `graph`, appending it when no existing row
    /// carries the same name and control points. Unnamed data is baptized
    /// with `hint` first so equal anonymous series attached to different
    /// objects stay distinct rows.
    fn intern_graph(&mut self, graph: &Graph, hint: &str) -> u32 {
        let mut graph = graph.clone();
        if graph.name.is_empty() {
            graph.name = hint.to_owned();
        }
        if let Some(id) = self.graphs.iter().position(|g| g.same_data(&graph)) {
            return id as u32;
        }
        self.graphs.push(graph);
        (self.graphs.len() - 1) as u32
    }

    fn intern_path(&mut self, path: &Path, hint: &str) -> u32 {
        let mut path = path.clone();
        if path.name.is_empty() {
            path.name = hint.to_owned();
        }
        if let Some(id) = self.paths.iter().position(|p| p.same_data(&path)) {
            return id as u32;
        }
        self.paths.push(path);
        (self.paths.len() - 1) as u32
    }
}

struct EncodeState {
    tables: TableBuilder,
    domain: DomainAccumulator,
}

fn scalar_value(
    prop: &ScalarProperty,
    hint: &str,
    state: &mut EncodeState,
) -> wire::scalar_property::Value {
    match prop {
        ScalarProperty::Constant(v) => wire::scalar_property::Value::ConstValue(*v),
        ScalarProperty::Data(graph) => {
            wire::scalar_property::Value::GraphId(state.tables.intern_graph(graph, hint))
        }
    }
}

fn vector_value(
    prop: &VectorProperty,
    hint: &str,
    state: &mut EncodeState,
) -> wire::vector_property::Value {
    match prop {
        VectorProperty::Constant(v) => wire::vector_property::Value::ConstValue((*v).into()),
        VectorProperty::Data(path) => {
            wire::vector_property::Value::PathId(state.tables.intern_path(path, hint))
        }
    }
}

fn encode_scalar(
    prop: &ScalarProperty,
    hint: &str,
    state: &mut EncodeState,
) -> wire::ScalarProperty {
    wire::ScalarProperty {
        value: Some(scalar_value(prop, hint, state)),
    }
}

fn encode_vector(
    prop: &VectorProperty,
    hint: &str,
    state: &mut EncodeState,
) -> wire::VectorProperty {
    wire::VectorProperty {
        value: Some(vector_value(prop, hint, state)),
    }
}

/// Encodes a color property, folding scalar-mapped usages into the colormap
/// domain. The fold happens on every use, including ones whose graph
/// deduplicates onto an existing table row.
fn encode_color(
    prop: &ColorProperty,
    hint: &str,
    state: &mut EncodeState,
) -> ScenewireResult<wire::ColorProperty> {
    let value = match prop {
        ColorProperty::Named(name) => {
            wire::color_property::Value::ConstValue(lookup_color(name)?.into())
        }
        ColorProperty::Constant(color) => wire::color_property::Value::ConstValue((*color).into()),
        ColorProperty::Scalar(v) => {
            state.domain.fold(*v);
            wire::color_property::Value::ScalarValue(*v)
        }
        ColorProperty::Data(graph) => {
            state.domain.fold_graph(graph);
            wire::color_property::Value::GraphId(state.tables.intern_graph(graph, hint))
        }
    };
    Ok(wire::ColorProperty { value: Some(value) })
}

fn encode_text(
    text: &TextLike,
    object_name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<String> {
    match text {
        TextLike::Plain(plain) => Ok(plain.clone()),
        TextLike::Template(template) => encode_template(template, object_name, state),
    }
}

/// Encodes a template's attachments into the tables, then rewrites the
/// template content into canonical positional references.
fn encode_template(
    text: &Text,
    object_name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<String> {
    let graphs: Vec<(String, wire::scalar_property::Value)> = text
        .graphs
        .iter()
        .enumerate()
        .map(|(i, prop)| {
            let local_name = match prop {
                ScalarProperty::Data(graph) => graph.name.clone(),
                ScalarProperty::Constant(_) => String::new(),
            };
            let hint = format!(".{object_name}_graph{i}");
            (local_name, scalar_value(prop, &hint, state))
        })
        .collect();
    let paths: Vec<(String, wire::vector_property::Value)> = text
        .paths
        .iter()
        .enumerate()
        .map(|(i, prop)| {
            let local_name = match prop {
                VectorProperty::Data(path) => path.name.clone(),
                VectorProperty::Constant(_) => String::new(),
            };
            let hint = format!(".{object_name}_path{i}");
            (local_name, vector_value(prop, &hint, state))
        })
        .collect();

    Ok(template::resolve_template(&text.content, &graphs, &paths)?)
}

fn encode_sphere(
    sphere: &Sphere,
    name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<wire::Sphere> {
    Ok(wire::Sphere {
        position: sphere
            .position
            .as_ref()
            .map(|p| encode_vector(p, &format!(".{name}_position"), state)),
        radius: Some(encode_scalar(
            &sphere.radius,
            &format!(".{name}_radius"),
            state,
        )),
        color: Some(encode_color(
            &sphere.color,
            &format!(".{name}_color"),
            state,
        )?),
    })
}

fn encode_tube(tube: &Tube, name: &str, state: &mut EncodeState) -> ScenewireResult<wire::Tube> {
    Ok(wire::Tube {
        path_id: state
            .tables
            .intern_path(&tube.path, &format!(".{name}_path")),
        is_growing: tube.is_growing,
        radius: Some(encode_scalar(
            &tube.radius,
            &format!(".{name}_radius"),
            state,
        )),
        color: Some(encode_color(&tube.color, &format!(".{name}_color"), state)?),
    })
}

fn encode_line(line: &Line, name: &str, state: &mut EncodeState) -> ScenewireResult<wire::Line> {
    Ok(wire::Line {
        start: line
            .start
            .as_ref()
            .map(|p| encode_vector(p, &format!(".{name}_start"), state)),
        end: line
            .end
            .as_ref()
            .map(|p| encode_vector(p, &format!(".{name}_end"), state)),
        line_width: Some(encode_scalar(
            &line.line_width,
            &format!(".{name}_lineWidth"),
            state,
        )),
        color: Some(encode_color(&line.color, &format!(".{name}_color"), state)?),
        point_forward: line.point_forward,
        point_backward: line.point_backward,
    })
}

fn encode_prism(
    prism: &Prism,
    name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<wire::Prism> {
    Ok(wire::Prism {
        position: prism
            .position
            .as_ref()
            .map(|p| encode_vector(p, &format!(".{name}_position"), state)),
        normal: prism
            .normal
            .as_ref()
            .map(|p| encode_vector(p, &format!(".{name}_normal"), state)),
        rotation: Some(encode_scalar(
            &prism.rotation,
            &format!(".{name}_rotation"),
            state,
        )),
        radius: Some(encode_scalar(
            &prism.radius,
            &format!(".{name}_radius"),
            state,
        )),
        height: Some(encode_scalar(
            &prism.height,
            &format!(".{name}_height"),
            state,
        )),
        n_vertices: prism.n_vertices,
        color: Some(encode_color(
            &prism.color,
            &format!(".{name}_color"),
            state,
        )?),
    })
}

fn encode_overlay(
    overlay: &Overlay,
    name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<wire::Overlay> {
    Ok(wire::Overlay {
        text: encode_text(&overlay.text, name, state)?,
        position: wire::TextPosition::from(overlay.position) as i32,
        font_size: Some(encode_scalar(
            &overlay.font_size,
            &format!(".{name}_fontSize"),
            state,
        )),
        bold: overlay.bold,
        italic: overlay.italic,
    })
}

fn encode_animatable(
    animatable: &Animatable,
    display_name: &str,
    state: &mut EncodeState,
) -> ScenewireResult<wire::Animatible> {
    let description = animatable
        .description
        .as_ref()
        .map(|text| encode_text(text, display_name, state))
        .transpose()?;
    let body = match &animatable.body {
        Body::Sphere(sphere) => Some(wire::animatible::Body::Sphere(encode_sphere(
            sphere,
            display_name,
            state,
        )?)),
        Body::Tube(tube) => Some(wire::animatible::Body::Tube(encode_tube(
            tube,
            display_name,
            state,
        )?)),
        Body::Line(line) => Some(wire::animatible::Body::Line(encode_line(
            line,
            display_name,
            state,
        )?)),
        Body::Prism(prism) => Some(wire::animatible::Body::Prism(encode_prism(
            prism,
            display_name,
            state,
        )?)),
        Body::Overlay(overlay) => Some(wire::animatible::Body::Overlay(encode_overlay(
            overlay,
            display_name,
            state,
        )?)),
        // Carries only the shared metadata; the body stays absent so a newer
        // consumer is free to ignore it and an equal one round-trips it.
        Body::Unknown => None,
    };
    Ok(wire::Animatible {
        name: display_name.to_owned(),
        groups: animatable.groups.clone(),
        description,
        body,
    })
}

/// Display names for every animatable, in order. Explicit names pass through;
/// unnamed objects get `"<TypeName> <n>"` with a counter per body type.
fn assign_names(animatables: &[Animatable]) -> Vec<String> {
    let mut counters: BTreeMap<&'static str, u32> = BTreeMap::new();
    animatables
        .iter()
        .map(|animatable| match &animatable.name {
            Some(name) => name.clone(),
            None => {
                let type_name = animatable.body.type_name();
                let counter = counters.entry(type_name).or_insert(0);
                *counter += 1;
                format!("{type_name} {counter}")
            }
        })
        .collect()
}

fn derived_window(graphs: &[wire::Graph], paths: &[wire::Path]) -> (f64, f64) {
    let firsts = graphs
        .iter()
        .filter_map(|g| g.points.first().map(|p| p.time))
        .chain(paths.iter().filter_map(|p| p.points.first().map(|p| p.time)));
    let lasts = graphs
        .iter()
        .filter_map(|g| g.points.last().map(|p| p.time))
        .chain(paths.iter().filter_map(|p| p.points.last().map(|p| p.time)));

    let start = firsts.fold(f64::INFINITY, f64::min);
    let end = lasts.fold(f64::NEG_INFINITY, f64::max);
    if start > end {
        (0.0, 0.0)
    } else {
        (start, end)
    }
}

fn timestamp(date: chrono::DateTime<chrono::Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: date.timestamp(),
        nanos: date.timestamp_subsec_nanos() as i32,
    }
}

/// Translates `scene` into its wire form.
///
/// Ordering matters: display names are assigned first, then the animatables
/// are encoded (growing the tables and the colormap domain), then the
/// colormap is built against the final domain and the tables are emitted with
/// their points time-sorted.
#[tracing::instrument(skip(scene), fields(scene = %scene.name))]
pub fn scene_to_wire(scene: &Scene) -> ScenewireResult<wire::Scene> {
    scene.validate()?;

    let mut state = EncodeState {
        tables: TableBuilder::seeded(scene),
        domain: DomainAccumulator::default(),
    };

    let names = assign_names(&scene.animatables);
    let mut animatibles = Vec::with_capacity(scene.animatables.len());
    for (animatable, name) in scene.animatables.iter().zip(&names) {
        animatibles.push(encode_animatable(animatable, name, &mut state)?);
    }

    let domain = match scene.colormap_range {
        Some(range) => (range.min(), range.max()),
        None => state.domain.resolve(),
    };
    let default_colormap = Colormap::named("viridis");
    let colormap = build_colormap(
        scene.colormap.as_ref().unwrap_or(&default_colormap),
        domain,
    )?;

    let graphs: Vec<wire::Graph> = state
        .tables
        .graphs
        .iter()
        .enumerate()
        .map(|(id, graph)| wire::Graph {
            name: graph.name.clone(),
            id: id as u32,
            interpolation: wire::Interpolation::from(graph.interpolation) as i32,
            points: graph
                .sorted_points()
                .into_iter()
                .map(|p| wire::GraphPoint {
                    time: p.time,
                    value: p.value,
                })
                .collect(),
        })
        .collect();
    let paths: Vec<wire::Path> = state
        .tables
        .paths
        .iter()
        .enumerate()
        .map(|(id, path)| wire::Path {
            name: path.name.clone(),
            id: id as u32,
            interpolation: wire::Interpolation::from(path.interpolation) as i32,
            points: path
                .sorted_points()
                .into_iter()
                .map(|p| wire::PathPoint {
                    time: p.time,
                    position: Some(wire::Vector {
                        x: p.x,
                        y: p.y,
                        z: p.z,
                    }),
                })
                .collect(),
        })
        .collect();

    let (derived_start, derived_end) = derived_window(&graphs, &paths);
    let meta = wire::SceneMeta {
        name: scene.name.clone(),
        author: scene.author.clone(),
        date: scene.date.map(timestamp),
        description: scene.description.clone(),
        start_time: scene.start_time.unwrap_or(derived_start),
        end_time: scene.end_time.unwrap_or(derived_end),
        speed_ratio: scene.speed_ratio,
    };
    let camera = scene.camera.map(|camera| wire::Camera {
        position: camera.position.map(Into::into),
        target: camera.target.map(Into::into),
    });

    tracing::debug!(
        graphs = graphs.len(),
        paths = paths.len(),
        animatibles = animatibles.len(),
        "scene encoded"
    );
    Ok(wire::Scene {
        meta: Some(meta),
        camera,
        colormap: Some(colormap),
        graphs,
        paths,
        animatibles,
        hidden_groups: scene.hidden_groups.clone(),
    })
}

/// Encodes `scene` into its serialized wire bytes.
pub fn encode_scene(scene: &Scene) -> ScenewireResult<Vec<u8>> {
    Ok(scene_to_wire(scene)?.encode_to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Vec3;

    fn orbit() -> Path {
        Path::from_rows("orbit", [(0.0, 1.0, 0.0, 0.0), (1.0, 0.0, 1.0, 0.0)])
    }

    #[test]
    fn unnamed_objects_are_numbered_per_type() {
        let mut scene = Scene::new("naming");
        scene.animatables.push(Animatable::new(Sphere::default()));
        scene
            .animatables
            .push(Animatable::named("probe", Sphere::default()));
        scene.animatables.push(Animatable::new(Sphere::default()));
        scene.animatables.push(Animatable::new(Line::default()));

        let wire = scene_to_wire(&scene).unwrap();
        let names: Vec<_> = wire.animatibles.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Sphere 1", "probe", "Sphere 2", "Line 1"]);
    }

    #[test]
    fn shared_graph_becomes_a_single_table_entry() {
        let radius = Graph::from_rows("shared", [(0.0, 1.0), (1.0, 2.0)]);
        let mut scene = Scene::new("dedup");
        for _ in 0..2 {
            scene.animatables.push(Animatable::new(Sphere {
                radius: ScalarProperty::Data(radius.clone()),
                ..Sphere::default()
            }));
        }

        let wire = scene_to_wire(&scene).unwrap();
        assert_eq!(wire.graphs.len(), 1);
        for animatible in &wire.animatibles {
            let Some(wire::animatible::Body::Sphere(sphere)) = &animatible.body else {
                panic!("expected sphere body");
            };
            assert_eq!(
                sphere.radius.unwrap().value,
                Some(wire::scalar_property::Value::GraphId(0))
            );
        }
    }

    #[test]
    fn anonymous_data_gets_object_scoped_names() {
        let mut scene = Scene::new("hints");
        scene.animatables.push(Animatable::new(Sphere {
            radius: ScalarProperty::Data(Graph::from_rows("", [(0.0, 1.0)])),
            ..Sphere::default()
        }));

        let wire = scene_to_wire(&scene).unwrap();
        assert_eq!(wire.graphs[0].name, ".Sphere 1_radius");
    }

    #[test]
    fn encoding_leaves_the_scene_untouched() {
        let mut scene = Scene::new("pure");
        scene.animatables.push(Animatable::new(Tube {
            color: ColorProperty::Data(Graph::from_rows("heat", [(0.0, 0.5)])),
            ..Tube::new(orbit())
        }));
        let before = scene.clone();

        scene_to_wire(&scene).unwrap();
        assert_eq!(scene, before);
    }

    #[test]
    fn time_window_spans_the_sorted_tables() {
        let mut scene = Scene::new("window");
        scene
            .graphs
            .push(Graph::from_rows("g", [(4.0, 0.0), (-1.0, 0.0)]));
        scene.paths.push(orbit());

        let wire = scene_to_wire(&scene).unwrap();
        let meta = wire.meta.unwrap();
        assert_eq!(meta.start_time, -1.0);
        assert_eq!(meta.end_time, 4.0);
    }

    #[test]
    fn empty_scene_window_defaults_to_zero() {
        let wire = scene_to_wire(&Scene::new("empty")).unwrap();
        let meta = wire.meta.unwrap();
        assert_eq!(meta.start_time, 0.0);
        assert_eq!(meta.end_time, 0.0);
        assert_eq!(meta.speed_ratio, 1.0);
    }

    #[test]
    fn colormap_domain_follows_scalar_usages() {
        let mut scene = Scene::new("domain");
        scene.animatables.push(Animatable::new(Sphere {
            color: ColorProperty::Scalar(-3.0),
            ..Sphere::default()
        }));
        scene.animatables.push(Animatable::new(Sphere {
            color: ColorProperty::Data(Graph::from_rows("heat", [(0.0, 2.0), (1.0, 8.0)])),
            ..Sphere::default()
        }));

        let wire = scene_to_wire(&scene).unwrap();
        let stops = wire.colormap.unwrap().stops;
        assert_eq!(stops.first().unwrap().value, -3.0);
        assert_eq!(stops.last().unwrap().value, 8.0);
    }

    #[test]
    fn template_references_are_rewritten_to_table_ids() {
        let energy = Graph::from_rows("energy", [(0.0, 10.0), (1.0, 20.0)]);
        let mut scene = Scene::new("template");
        scene.animatables.push(Animatable::new(Overlay::new(
            Text::new("E = %(energy)0.1f GeV").with_graph(energy),
        )));

        let wire = scene_to_wire(&scene).unwrap();
        let Some(wire::animatible::Body::Overlay(overlay)) = &wire.animatibles[0].body else {
            panic!("expected overlay body");
        };
        assert_eq!(overlay.text, "E = %(graphs[0])0.1f GeV");
        assert_eq!(wire.graphs.len(), 1);
    }

    #[test]
    fn constant_template_references_collapse_to_text() {
        let mut scene = Scene::new("template");
        let text = Text::new("pos %(paths[0].x), val %(graphs[0])d")
            .with_graph(ScalarProperty::Constant(2.5))
            .with_path(VectorProperty::Constant(Vec3 {
                x: 1.5,
                y: 0.0,
                z: 0.0,
            }));
        scene
            .animatables
            .push(Animatable::new(Overlay::new(text)));

        let wire = scene_to_wire(&scene).unwrap();
        let Some(wire::animatible::Body::Overlay(overlay)) = &wire.animatibles[0].body else {
            panic!("expected overlay body");
        };
        assert_eq!(overlay.text, "pos 1.5, val 2");
        assert!(wire.graphs.is_empty());
        assert!(wire.paths.is_empty());
    }
}
