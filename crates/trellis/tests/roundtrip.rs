use serde_json::Value;
use trellis::*;

const BOX: &str = include_str!("fixtures/box.gltf");

/// Compare numbers by value: `1`, `1.0` and `1e0` are the same number.
fn normalize(value: Value) -> Value {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, normalize(v))).collect()),
        other => other,
    }
}

fn json(text: &str) -> Value {
    normalize(serde_json::from_str(text).unwrap())
}

fn write(root: &Root) -> String {
    to_string(root, &WriteOptions::new()).unwrap()
}

#[test]
fn test_box_round_trip() {
    let root = from_str_with(BOX, &ReadOptions::new().validated()).unwrap();
    assert_eq!(json(&write(&root)), json(BOX));
}

#[test]
fn test_reparse_is_stable() {
    let first = write(&from_str(BOX).unwrap());
    let second = write(&from_str(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_box_navigation() {
    let root = from_str(BOX).unwrap();
    let scene = root.default_scene().unwrap();
    assert_eq!(scene.name.as_deref(), Some("Scene"));

    let armature = scene.nodes[0].get(&root).unwrap();
    let lid = armature.children[0].get(&root).unwrap();
    assert_eq!(lid.name.as_deref(), Some("Box"));
    assert_eq!(lid.base.extras.as_ref().unwrap()["tag"], "lid");

    let mesh = lid.mesh.unwrap().get(&root).unwrap();
    let primitive = &mesh.primitives[0];
    assert_eq!(primitive.mode, Mode::Triangles);
    let texcoords = primitive.attribute(&Semantic::TexCoords(0)).unwrap();
    assert_eq!(texcoords.get(&root).unwrap().element_type, ElementType::Vec2);

    let material = primitive.material.unwrap().get(&root).unwrap();
    let texture = material
        .pbr_metallic_roughness
        .base_color_texture
        .as_ref()
        .unwrap()
        .index
        .get(&root)
        .unwrap();
    let image = texture.source.unwrap().get(&root).unwrap();
    assert_eq!(image.uri.as_deref(), Some("box.png"));

    let joint = root.get(root.skins[0].joints[1]).unwrap();
    assert_eq!(joint.transform().w_axis.y, 2.0);
}

#[test]
fn test_extension_preserved_verbatim() {
    let root = from_str(
        r#"{"asset":{"version":"2.0"},"nodes":[{"extensions":{"foo":{"bar":1}}}]}"#,
    )
    .unwrap();
    insta::assert_snapshot!(write(&root), @r#"{"asset":{"version":"2.0"},"nodes":[{"extensions":{"foo":{"bar":1}}}]}"#);
}

#[test]
fn test_defaults_omitted() {
    let root = from_str(
        r#"{
            "asset": {"version": "2.0"},
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "mode": 4}]}],
            "accessors": [{"byteOffset": 0, "normalized": false, "componentType": 5126, "count": 3, "type": "VEC3"}],
            "nodes": [{"scale": [1, 1, 1], "rotation": [0, 0, 0, 1], "children": []}],
            "samplers": [{"wrapS": 10497, "wrapT": 10497}],
            "materials": [{"alphaMode": "OPAQUE", "alphaCutoff": 0.5, "doubleSided": false, "pbrMetallicRoughness": {"metallicFactor": 1}}]
        }"#,
    )
    .unwrap();
    insta::assert_snapshot!(write(&root), @r#"{"asset":{"version":"2.0"},"nodes":[{}],"meshes":[{"primitives":[{"attributes":{"POSITION":0}}]}],"accessors":[{"componentType":5126,"count":3,"type":"VEC3"}],"materials":[{}],"samplers":[{}]}"#);
}

#[test]
fn test_non_default_mode_written() {
    let root = from_str(
        r#"{"asset":{"version":"2.0"},"meshes":[{"primitives":[{"attributes":{"POSITION":0},"mode":1}]}]}"#,
    )
    .unwrap();
    assert!(write(&root).contains(r#""mode":1"#));
}

#[test]
fn test_reference_at_boundary() {
    let text = r#"{"asset":{"version":"2.0"},"meshes":[{"primitives":[{"attributes":{}}]},{"primitives":[{"attributes":{}}]}],
        "nodes":[{"mesh":1},{"mesh":2}]}"#;
    let root = from_str(text).unwrap();

    assert!(root.nodes[0].mesh.unwrap().get(&root).is_ok());
    assert_eq!(
        root.nodes[1].mesh.unwrap().get(&root).unwrap_err(),
        ReferenceError::OutOfRange {
            kind: EntityKind::Mesh,
            index: 2,
            len: 2
        }
    );
    assert_eq!(validate_references(&root).len(), 1);
}

#[test]
fn test_count_range_errors() {
    fn accessor(count: &str) -> String {
        format!(
            r#"{{"asset":{{"version":"2.0"}},"accessors":[{{"componentType":5126,"count":{},"type":"SCALAR"}}]}}"#,
            count
        )
    }

    let err = from_str(&accessor("-1")).unwrap_err();
    match err {
        Error::Parse(err) => {
            assert_eq!(err.context(), Some(("accessor", "count")));
            assert!(matches!(err.root_cause(), ParseError::OutOfRange { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(from_str(&accessor("4294967296")).is_err());
    assert_eq!(from_str(&accessor("4294967295")).unwrap().accessors[0].count, u32::MAX);
}

#[test]
fn test_unknown_keys_round_trip() {
    let text = r#"{"asset":{"version":"2.0","vendor":"x"},"buffers":[{"byteLength":4,"futureField":[1,2]}],"topLevel":true}"#;
    let root = from_str(text).unwrap();
    assert_eq!(json(&write(&root)), json(text));
}

#[test]
fn test_opaque_numbers_round_trip_verbatim() {
    let text = r#"{"asset":{"version":"2.0"},"nodes":[{"extras":{"v":1e400,"id":123456789012345678901234567890}}]}"#;
    let root = from_str(text).unwrap();
    insta::assert_snapshot!(write(&root), @r#"{"asset":{"version":"2.0"},"nodes":[{"extras":{"v":1e400,"id":123456789012345678901234567890}}]}"#);
}

#[test]
fn test_out_of_range_float_rejected() {
    let text = r#"{"asset":{"version":"2.0"},"cameras":[{"type":"perspective","perspective":{"yfov":1,"znear":0.1,"zfar":1e39}}]}"#;
    match from_str(text).unwrap_err() {
        Error::Parse(err) => {
            assert_eq!(err.context(), Some(("perspective", "zfar")));
            assert!(matches!(err.root_cause(), ParseError::OutOfRange { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_clone_between_documents() {
    let source = from_str(BOX).unwrap();
    let mut target = from_str(r#"{"asset":{"version":"2.0"},"nodes":[{"name":"Existing"}]}"#).unwrap();

    let mut cloner = GraphCloner::new(&source, &mut target);
    let scene = cloner.clone_entity(source.reference::<Scene>(0)).unwrap();
    cloner
        .clone_entity(source.reference::<Animation>(0))
        .unwrap();
    target.scene = Some(scene);

    assert_eq!(target.nodes.len(), 5);
    assert_eq!(target.nodes[0].name.as_deref(), Some("Existing"));
    assert!(validate_references(&target).is_empty());
    assert_eq!(
        target.extensions_used,
        vec!["KHR_materials_emissive_strength"]
    );

    let reparsed = from_str_with(&write(&target), &ReadOptions::new().validated()).unwrap();
    assert_eq!(reparsed.skins.len(), 1);
    assert_eq!(reparsed.animations[0].samplers[0].interpolation, Interpolation::Step);
    assert_eq!(
        reparsed.animations[0].channels[0].target.node.map(|n| n.index()),
        Some(2)
    );
}

#[test]
fn test_pretty_output_parses() {
    let root = from_str(BOX).unwrap();
    let mut out = Vec::new();
    to_writer(&mut out, &root, &WriteOptions::new().pretty()).unwrap();
    let reparsed = from_slice(&out).unwrap();
    assert_eq!(reparsed.accessors.len(), root.accessors.len());
}
