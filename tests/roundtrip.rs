use chrono::TimeZone as _;

use scenewire::{
    Animatable, Camera, ColorProperty, Graph, Path, Scene, ScalarProperty, Sphere, Text, Tube,
    Vec3, decode_scene, encode_scene, open_scene, save_scene, scene_to_wire,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn rich_scene() -> Scene {
    let mut scene = Scene::new("collision-042");
    scene.author = Some("test rig".into());
    scene.date = Some(chrono::Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap());
    scene.description = Some("two tracks and a counter".into());
    scene.hidden_groups = vec!["debug".into()];
    scene.camera = Some(Camera {
        position: Some(Vec3 {
            x: 0.0,
            y: 0.0,
            z: 10.0,
        }),
        target: None,
    });
    scene
        .graphs
        .push(Graph::from_rows("beam", [(0.0, 0.0), (2.0, 4.0)]));

    scene.animatables.push(Animatable::new(Sphere {
        // Values 0 and 1 pin the inferred colormap domain.
        color: ColorProperty::Data(Graph::from_rows("heat", [(0.0, 0.0), (2.0, 1.0)])),
        ..Sphere::default()
    }));
    scene.animatables.push(
        Animatable::named(
            "track",
            Tube::new(Path::from_rows(
                "trk",
                [(0.0, 0.0, 0.0, 0.0), (1.0, 1.0, 1.0, 0.0)],
            )),
        )
        .with_description(Text::new("p = %(momentum)0.2f GeV").with_graph(Graph::from_rows(
            "momentum",
            [(0.0, 3.0), (1.0, 2.5)],
        ))),
    );
    scene
}

#[test]
fn encode_decode_encode_is_a_fixpoint() {
    init_tracing();
    let scene = rich_scene();
    let bytes = encode_scene(&scene).unwrap();
    let decoded = decode_scene(&bytes).unwrap();
    let again = encode_scene(&decoded).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn decoding_recovers_names_tables_and_templates() {
    let bytes = encode_scene(&rich_scene()).unwrap();
    let decoded = decode_scene(&bytes).unwrap();

    assert_eq!(decoded.name, "collision-042");
    assert_eq!(decoded.author.as_deref(), Some("test rig"));
    assert_eq!(decoded.start_time, Some(0.0));
    assert_eq!(decoded.end_time, Some(2.0));

    let names: Vec<_> = decoded
        .animatables
        .iter()
        .map(|a| a.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["Sphere 1", "track"]);

    // Template attachments were interned and the content rewritten to a
    // positional reference before serialization.
    let description = match &decoded.animatables[1].description {
        Some(scenewire::TextLike::Plain(text)) => text.as_str(),
        other => panic!("unexpected description {other:?}"),
    };
    assert!(description.starts_with("p = %(graphs["));
    assert!(description.ends_with(")0.2f GeV"));

    let graph_names: Vec<_> = decoded.graphs.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(graph_names, vec!["beam", "heat", "momentum"]);
}

#[test]
fn shared_data_is_interned_once_across_objects() {
    let radius = Graph::from_rows("shared", [(0.0, 1.0), (1.0, 3.0)]);
    let mut scene = Scene::new("dedup");
    for _ in 0..3 {
        scene.animatables.push(Animatable::new(Sphere {
            radius: ScalarProperty::Data(radius.clone()),
            ..Sphere::default()
        }));
    }

    let wire = scene_to_wire(&scene).unwrap();
    assert_eq!(wire.graphs.len(), 1);
    assert_eq!(wire.animatibles.len(), 3);
}

#[test]
fn inferred_colormap_domain_ends_exactly_at_the_data_maximum() {
    let mut scene = Scene::new("clamp");
    scene.animatables.push(Animatable::new(Sphere {
        // A span whose rescale arithmetic would drift off the endpoint.
        color: ColorProperty::Data(Graph::from_rows("heat", [(0.0, 0.1), (1.0, 0.73)])),
        ..Sphere::default()
    }));

    let wire = scene_to_wire(&scene).unwrap();
    let stops = wire.colormap.unwrap().stops;
    assert_eq!(stops.last().unwrap().value, 0.73);
    assert!(stops.first().unwrap().value >= 0.1);
}

#[test]
fn single_scene_files_roundtrip_on_disk() {
    let path = std::env::temp_dir().join(format!("scenewire-roundtrip-{}.zip", std::process::id()));
    save_scene(&path, &rich_scene()).unwrap();
    let loaded = open_scene(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.name, "collision-042");
    assert_eq!(loaded.animatables.len(), 2);
}
