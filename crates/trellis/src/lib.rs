//! trellis: a schema-driven glTF 2.0 codec.
//!
//! Parse a document into a [`Root`], navigate it through typed [`Id`]
//! references, copy entity graphs between roots with the graph cloner, and
//! write it back out. Serialization omits fields equal to their schema
//! defaults and preserves every extension, extras value and unrecognized
//! key read from the source.
//!
//! # Quick Start
//!
//! ```ignore
//! use trellis::{from_str, to_string, ReadOptions, WriteOptions};
//!
//! let root = trellis::from_str_with(&text, &ReadOptions::new().validated())?;
//! for (id, mesh) in root.iter::<trellis::Mesh>() {
//!     println!("{:?}: {} primitives", id, mesh.primitives.len());
//! }
//! let out = to_string(&root, &WriteOptions::new())?;
//! ```

mod options;

use std::io::{Read, Write};

pub use options::{ReadOptions, WriteOptions};
pub use trellis_core::*;
pub use trellis_graph::{clone_into, validate_references, CloneEntity, GraphCloner};
pub use trellis_parser::parse_root;

/// Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a document with default options.
pub fn from_str(text: &str) -> Result<Root> {
    from_str_with(text, &ReadOptions::default())
}

pub fn from_str_with(text: &str, options: &ReadOptions) -> Result<Root> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root = parse_root(text)?;
    check_required_extensions(&root, options)?;
    if options.validate_references {
        if let Some(err) = validate_references(&root).into_iter().next() {
            return Err(err.into());
        }
    }
    Ok(root)
}

/// Parse a document from bytes. A leading UTF-8 byte order mark is ignored.
pub fn from_slice(bytes: &[u8]) -> Result<Root> {
    from_slice_with(bytes, &ReadOptions::default())
}

pub fn from_slice_with(bytes: &[u8], options: &ReadOptions) -> Result<Root> {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
    from_str_with(text, options)
}

/// Read a complete document from `reader`.
///
/// The stream is read to the end before parsing starts, since the parser
/// borrows strings from the source text. Peak memory is therefore the size
/// of the input plus the parsed graph.
pub fn from_reader<R: Read>(reader: R) -> Result<Root> {
    from_reader_with(reader, &ReadOptions::default())
}

pub fn from_reader_with<R: Read>(mut reader: R, options: &ReadOptions) -> Result<Root> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice_with(&bytes, options)
}

fn check_required_extensions(root: &Root, options: &ReadOptions) -> Result<()> {
    for name in &root.extensions_required {
        if options.supports(name) {
            continue;
        }
        if options.check_required_extensions {
            return Err(Error::UnsupportedExtension(name.clone()));
        }
        log::warn!("document requires unsupported extension {}", name);
    }
    Ok(())
}

/// Serialize a document to a JSON string.
pub fn to_string(root: &Root, options: &WriteOptions) -> Result<String> {
    let text = if options.pretty {
        serde_json::to_string_pretty(root)?
    } else {
        serde_json::to_string(root)?
    };
    Ok(text)
}

pub fn to_vec(root: &Root, options: &WriteOptions) -> Result<Vec<u8>> {
    let bytes = if options.pretty {
        serde_json::to_vec_pretty(root)?
    } else {
        serde_json::to_vec(root)?
    };
    Ok(bytes)
}

pub fn to_writer<W: Write>(writer: W, root: &Root, options: &WriteOptions) -> Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(writer, root)?;
    } else {
        serde_json::to_writer(writer, root)?;
    }
    Ok(())
}
