//! Scenes written by a newer producer may carry object types this library
//! does not know. They must decode as placeholders, not errors.

use prost::Message as _;

use scenewire::{Body, decode_scene, encode_scene, wire};

/// Serialized animatible whose body field uses a tag outside the known set.
/// Field 16 (sphere) encodes with key `0x82 0x01`; rewriting the key to
/// `0xAA 0x01` turns it into field 21.
fn unknown_animatible_bytes() -> Vec<u8> {
    let known = wire::Animatible {
        name: "mystery".into(),
        groups: vec!["exotic".into()],
        description: Some("from the future".into()),
        body: Some(wire::animatible::Body::Sphere(wire::Sphere::default())),
    };
    let mut bytes = known.encode_to_vec();
    let pos = bytes
        .windows(2)
        .position(|w| w == [0x82, 0x01])
        .expect("sphere body key");
    bytes[pos] = 0xAA;
    bytes
}

fn scene_with_unknown_object() -> Vec<u8> {
    let scene = wire::Scene {
        meta: Some(wire::SceneMeta {
            name: "future".into(),
            speed_ratio: 1.0,
            ..Default::default()
        }),
        animatibles: vec![wire::Animatible {
            name: "known".into(),
            body: Some(wire::animatible::Body::Sphere(wire::Sphere::default())),
            ..Default::default()
        }],
        ..Default::default()
    };
    let mut bytes = scene.encode_to_vec();

    // Append a second animatibles entry (field 6, length-delimited) holding
    // the unknown-bodied object.
    let entry = unknown_animatible_bytes();
    assert!(entry.len() < 128);
    bytes.push(0x32);
    bytes.push(entry.len() as u8);
    bytes.extend_from_slice(&entry);
    bytes
}

#[test]
fn unknown_object_type_decodes_as_placeholder() {
    let scene = decode_scene(&scene_with_unknown_object()).unwrap();
    assert_eq!(scene.animatables.len(), 2);

    let known = &scene.animatables[0];
    assert_eq!(known.name.as_deref(), Some("known"));
    assert!(matches!(known.body, Body::Sphere(_)));

    let unknown = &scene.animatables[1];
    assert_eq!(unknown.name.as_deref(), Some("mystery"));
    assert_eq!(unknown.groups, vec!["exotic".to_string()]);
    assert!(matches!(
        &unknown.description,
        Some(scenewire::TextLike::Plain(text)) if text == "from the future"
    ));
    assert_eq!(unknown.body, Body::Unknown);
}

#[test]
fn placeholder_survives_re_encoding_with_metadata_intact() {
    let scene = decode_scene(&scene_with_unknown_object()).unwrap();
    let bytes = encode_scene(&scene).unwrap();
    let again = decode_scene(&bytes).unwrap();

    let unknown = &again.animatables[1];
    assert_eq!(unknown.name.as_deref(), Some("mystery"));
    assert_eq!(unknown.groups, vec!["exotic".to_string()]);
    assert_eq!(unknown.body, Body::Unknown);
}
