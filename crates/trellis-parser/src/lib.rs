//! Parser for glTF 2.0 JSON documents.
//!
//! The lexer is built on `nom`; on top of it sits a pull reader that each
//! schema type drives itself, dispatching on property names. References are
//! stored as typed indices and never resolved while parsing, so arrays may
//! appear in any order.

mod de;
mod lexer;
mod reader;

pub use reader::MAX_DEPTH;

use trellis_core::{ParseError, Root};

use reader::JsonReader;

/// Parse a glTF document from JSON text.
///
/// # Example
///
/// ```ignore
/// use trellis_parser::parse_root;
///
/// let root = parse_root(r#"{"asset": {"version": "2.0"}}"#)?;
/// assert_eq!(root.asset.version, "2.0");
/// ```
pub fn parse_root(source: &str) -> Result<Root, ParseError> {
    let mut reader = JsonReader::new(source);
    let root = de::read_root(&mut reader)?;
    reader.finish()?;

    log::debug!(
        "parsed glTF {}: {} nodes, {} meshes, {} accessors, {} materials, {} animations",
        root.asset.version,
        root.nodes.len(),
        root.meshes.len(),
        root.accessors.len(),
        root.materials.len(),
        root.animations.len(),
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Mesh, Semantic};

    const TRIANGLE: &str = r#"{
        "asset": {"version": "2.0", "generator": "hand"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 1}, "indices": 0}]}],
        "buffers": [{"byteLength": 44}],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 6, "target": 34963},
            {"buffer": 0, "byteOffset": 8, "byteLength": 36, "target": 34962}
        ],
        "accessors": [
            {"bufferView": 0, "componentType": 5123, "count": 3, "type": "SCALAR"},
            {"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3",
             "max": [1, 1, 0], "min": [0, 0, 0]}
        ]
    }"#;

    #[test]
    fn test_parse_triangle() {
        let root = parse_root(TRIANGLE).unwrap();
        assert_eq!(root.asset.generator.as_deref(), Some("hand"));
        assert_eq!(root.default_scene().map(|s| s.nodes.len()), Some(1));

        let mesh_id = root.nodes[0].mesh.unwrap();
        let mesh: &Mesh = mesh_id.get(&root).unwrap();
        let position = mesh.primitives[0].attribute(&Semantic::Position).unwrap();
        assert_eq!(position.get(&root).unwrap().count, 3);
        assert_eq!(position.root(), root.id());
    }

    #[test]
    fn test_array_order_does_not_matter() {
        let root = parse_root(
            r#"{"nodes": [{"mesh": 0}], "meshes": [{"primitives": [{"attributes": {}}]}], "asset": {"version": "2.0"}}"#,
        )
        .unwrap();
        assert!(root.nodes[0].mesh.unwrap().get(&root).is_ok());
    }

    #[test]
    fn test_unknown_root_keys_preserved() {
        let root = parse_root(r#"{"asset": {"version": "2.0"}, "vendorData": {"a": [1]}}"#).unwrap();
        assert_eq!(
            root.base.unrecognized["vendorData"],
            serde_json::json!({"a": [1]})
        );
    }

    #[test]
    fn test_opaque_numbers_kept_exactly() {
        let root = parse_root(
            r#"{"asset": {"version": "2.0"}, "nodes": [{"extras": {"v": 1e400, "id": 123456789012345678901234567890}}]}"#,
        )
        .unwrap();
        let extras = root.nodes[0].base.extras.as_ref().unwrap();
        assert_eq!(extras["v"].to_string(), "1e400");
        assert_eq!(extras["id"].to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_error_context_from_nested_entity() {
        let err = parse_root(
            r#"{"asset": {"version": "2.0"}, "accessors": [{"componentType": 5126, "count": -1, "type": "VEC3"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.context(), Some(("accessor", "count")));
    }

    #[test]
    fn test_trailing_characters() {
        let err = parse_root(r#"{"asset": {"version": "2.0"}} []"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TrailingCharacters { line: 1, column: 31 }
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            parse_root("[]"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }
}
