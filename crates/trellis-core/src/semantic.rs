//! Vertex attribute semantic names.
//!
//! Indexed semantics are spelled `<KIND>_<set>` (`TEXCOORD_0`, `JOINTS_1`).
//! Names come from document content, so malformed ones are reported with
//! `None` rather than an error and are kept verbatim as [`Semantic::Other`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::schema::ElementType;

/// Separator between a semantic kind and its set index.
pub const SET_SEPARATOR: char = '_';

/// Families of attributes that come in numbered sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    TexCoord,
    Color,
    Joints,
    Weights,
}

impl SetKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SetKind::TexCoord => "TEXCOORD",
            SetKind::Color => "COLOR",
            SetKind::Joints => "JOINTS",
            SetKind::Weights => "WEIGHTS",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "TEXCOORD" => Some(SetKind::TexCoord),
            "COLOR" => Some(SetKind::Color),
            "JOINTS" => Some(SetKind::Joints),
            "WEIGHTS" => Some(SetKind::Weights),
            _ => None,
        }
    }

    /// Canonical name for set `set` of this kind.
    pub fn name(self, set: u32) -> String {
        indexed_name(self.prefix(), set)
    }
}

/// Format `<prefix>_<set>`.
pub fn indexed_name(prefix: &str, set: u32) -> String {
    format!("{prefix}{SET_SEPARATOR}{set}")
}

/// Split an indexed name into its prefix and set index.
///
/// Exactly two segments are required and the second must be a plain
/// decimal integer without leading zeros.
pub fn parse_indexed(name: &str) -> Option<(&str, u32)> {
    let mut segments = name.split(SET_SEPARATOR);
    let prefix = segments.next()?;
    let digits = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let set = digits.parse().ok()?;
    Some((prefix, set))
}

/// The set index of an indexed name, if it has one.
pub fn parse_set_index(name: &str) -> Option<u32> {
    parse_indexed(name).map(|(_, set)| set)
}

/// A vertex attribute semantic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position,
    Normal,
    Tangent,
    TexCoords(u32),
    Colors(u32),
    Joints(u32),
    Weights(u32),
    /// Application-specific (`_TEMPERATURE`) or malformed names.
    Other(String),
}

impl Semantic {
    pub fn set(kind: SetKind, set: u32) -> Self {
        match kind {
            SetKind::TexCoord => Semantic::TexCoords(set),
            SetKind::Color => Semantic::Colors(set),
            SetKind::Joints => Semantic::Joints(set),
            SetKind::Weights => Semantic::Weights(set),
        }
    }

    /// Element types allowed for accessors bound to this semantic.
    ///
    /// Advisory only; the parser does not enforce it.
    pub fn expected_types(&self) -> &'static [ElementType] {
        match self {
            Semantic::Position | Semantic::Normal => &[ElementType::Vec3],
            Semantic::Tangent | Semantic::Joints(_) | Semantic::Weights(_) => &[ElementType::Vec4],
            Semantic::TexCoords(_) => &[ElementType::Vec2],
            Semantic::Colors(_) => &[ElementType::Vec3, ElementType::Vec4],
            Semantic::Other(_) => &[],
        }
    }
}

impl FromStr for Semantic {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "POSITION" => Semantic::Position,
            "NORMAL" => Semantic::Normal,
            "TANGENT" => Semantic::Tangent,
            _ => match parse_indexed(name)
                .and_then(|(prefix, set)| SetKind::from_prefix(prefix).map(|kind| (kind, set)))
            {
                Some((kind, set)) => Semantic::set(kind, set),
                None => Semantic::Other(name.to_string()),
            },
        })
    }
}

impl From<&str> for Semantic {
    fn from(name: &str) -> Self {
        match name.parse() {
            Ok(semantic) => semantic,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantic::Position => f.write_str("POSITION"),
            Semantic::Normal => f.write_str("NORMAL"),
            Semantic::Tangent => f.write_str("TANGENT"),
            Semantic::TexCoords(set) => f.write_str(&SetKind::TexCoord.name(*set)),
            Semantic::Colors(set) => f.write_str(&SetKind::Color.name(*set)),
            Semantic::Joints(set) => f.write_str(&SetKind::Joints.name(*set)),
            Semantic::Weights(set) => f.write_str(&SetKind::Weights.name(*set)),
            Semantic::Other(name) => f.write_str(name),
        }
    }
}

impl Serialize for Semantic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_name_round_trip() {
        assert_eq!(parse_set_index(&indexed_name("TEXCOORD", 3)), Some(3));
        assert_eq!(SetKind::Joints.name(0), "JOINTS_0");
    }

    #[test]
    fn test_malformed_names() {
        assert_eq!(parse_set_index("TEXCOORD"), None);
        assert_eq!(parse_set_index("TEXCOORD_x"), None);
        assert_eq!(parse_set_index("TEXCOORD_"), None);
        assert_eq!(parse_set_index("TEXCOORD_+1"), None);
        assert_eq!(parse_set_index("TEXCOORD_-1"), None);
        assert_eq!(parse_set_index("A_1_2"), None);
        assert_eq!(parse_set_index("TEXCOORD_99999999999"), None);
        assert_eq!(parse_set_index("TEXCOORD_01"), None);
        assert_eq!(parse_set_index("COLOR_00"), None);
        assert_eq!(parse_set_index("TEXCOORD_0"), Some(0));
        assert_eq!(parse_set_index("TEXCOORD_10"), Some(10));
    }

    #[test]
    fn test_semantic_parse() {
        assert_eq!(Semantic::from("POSITION"), Semantic::Position);
        assert_eq!(Semantic::from("COLOR_1"), Semantic::Colors(1));
        assert_eq!(Semantic::from("WEIGHTS_0"), Semantic::Weights(0));
        assert_eq!(
            Semantic::from("_TEMPERATURE"),
            Semantic::Other("_TEMPERATURE".to_string())
        );
        assert_eq!(
            Semantic::from("TEXCOORD_x"),
            Semantic::Other("TEXCOORD_x".to_string())
        );
        assert_eq!(
            Semantic::from("TEXCOORD_01").to_string(),
            "TEXCOORD_01"
        );
    }

    #[test]
    fn test_semantic_display() {
        assert_eq!(Semantic::TexCoords(2).to_string(), "TEXCOORD_2");
        assert_eq!(Semantic::Tangent.to_string(), "TANGENT");
    }

    proptest! {
        #[test]
        fn prop_indexed_name_parses_back(set in any::<u32>()) {
            for kind in [SetKind::TexCoord, SetKind::Color, SetKind::Joints, SetKind::Weights] {
                let name = kind.name(set);
                prop_assert_eq!(parse_indexed(&name), Some((kind.prefix(), set)));
                prop_assert_eq!(Semantic::from(name.as_str()), Semantic::set(kind, set));
            }
        }

        #[test]
        fn prop_semantic_display_round_trips(name in "[A-Z_]{1,12}(_[0-9]{1,3})?") {
            let semantic = Semantic::from(name.as_str());
            prop_assert_eq!(Semantic::from(semantic.to_string().as_str()), semantic);
        }
    }
}
