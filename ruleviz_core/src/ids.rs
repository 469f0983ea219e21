use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("element id `{0}` has too few `-` separated segments")]
    TooFewSegments(String),
    #[error("element id `{id}` does not start with `{expected}-`")]
    WrongPrefix { id: String, expected: &'static str },
    #[error("`{0}` is not a valid node number")]
    BadNumber(String),
    #[error("`{0}` is not a node id of the form <group>-<index>")]
    BadNodeId(String),
    #[error("unknown role `{0}`")]
    UnknownRole(String),
}

/// Identifies a linked source/target span pair: sentence number plus node
/// number within that sentence. Written `"<group>-<index>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub group: u32,
    pub index: u32,
}

impl NodeId {
    pub const fn new(group: u32, index: u32) -> Self {
        Self { group, index }
    }

    /// Key of this node's rule in the `desc` table.
    pub fn rule_key(&self, role: Role) -> String {
        format!("{self}-{role}")
    }

    fn from_segments(group: &str, index: &str) -> Result<Self, IdError> {
        Ok(Self {
            group: parse_number(group)?,
            index: parse_number(index)?,
        })
    }
}

fn parse_number(segment: &str) -> Result<u32, IdError> {
    segment
        .parse()
        .map_err(|_| IdError::BadNumber(segment.to_string()))
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.group, self.index)
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((group, index)) if !index.contains('-') => Self::from_segments(group, index),
            _ => Err(IdError::BadNodeId(s.to_string())),
        }
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(value: NodeId) -> Self {
        value.to_string()
    }
}

/// Which side of the alignment a span belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Role {
    #[strum(to_string = "src")]
    #[serde(rename = "src")]
    Source,
    #[strum(to_string = "trg")]
    #[serde(rename = "trg")]
    Target,
}

impl Role {
    /// Role segment of a text span id. Anything but `src` is placed like a
    /// target span.
    pub fn from_segment(segment: &str) -> Self {
        if segment == "src" {
            Role::Source
        } else {
            Role::Target
        }
    }
}

/// Id of a single word span: `text-<group>-<index>-<position>-<role>`.
///
/// `position` is opaque; sheets use the word's index within its parent span
/// but hand-written pages may put anything there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextSpanId {
    pub node: NodeId,
    pub position: String,
    pub role: Role,
}

impl TextSpanId {
    pub const PREFIX: &'static str = "text";

    pub fn new(node: NodeId, position: usize, role: Role) -> Self {
        Self {
            node,
            position: position.to_string(),
            role,
        }
    }
}

impl fmt::Display for TextSpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            Self::PREFIX,
            self.node,
            self.position,
            self.role
        )
    }
}

impl FromStr for TextSpanId {
    type Err = IdError;

    /// Segments past the role are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('-').collect();
        if segments.len() < 5 {
            return Err(IdError::TooFewSegments(s.to_string()));
        }
        if segments[0] != Self::PREFIX {
            return Err(IdError::WrongPrefix {
                id: s.to_string(),
                expected: Self::PREFIX,
            });
        }
        Ok(Self {
            node: NodeId::from_segments(segments[1], segments[2])?,
            position: segments[3].to_string(),
            role: Role::from_segment(segments[4]),
        })
    }
}

impl TryFrom<String> for TextSpanId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TextSpanId> for String {
    fn from(value: TextSpanId) -> Self {
        value.to_string()
    }
}

/// Id of the wrapper around everything a node covers on one side:
/// `range-<group>-<index>-<role>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeId {
    pub node: NodeId,
    pub role: Role,
}

impl RangeId {
    pub const PREFIX: &'static str = "range";

    pub const fn new(node: NodeId, role: Role) -> Self {
        Self { node, role }
    }
}

impl fmt::Display for RangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", Self::PREFIX, self.node, self.role)
    }
}

impl FromStr for RangeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('-').collect();
        if segments.len() < 4 {
            return Err(IdError::TooFewSegments(s.to_string()));
        }
        if segments[0] != Self::PREFIX {
            return Err(IdError::WrongPrefix {
                id: s.to_string(),
                expected: Self::PREFIX,
            });
        }
        Ok(Self {
            node: NodeId::from_segments(segments[1], segments[2])?,
            role: segments[3]
                .parse()
                .map_err(|_| IdError::UnknownRole(segments[3].to_string()))?,
        })
    }
}

/// Any element the highlighter styles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementId {
    Text(TextSpanId),
    Range(RangeId),
}

impl ElementId {
    pub fn node(&self) -> NodeId {
        match self {
            ElementId::Text(span) => span.node,
            ElementId::Range(range) => range.node,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Text(span) => span.fmt(f),
            ElementId::Range(range) => range.fmt(f),
        }
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = s.split('-').next().unwrap_or_default();
        match prefix {
            TextSpanId::PREFIX => s.parse().map(ElementId::Text),
            RangeId::PREFIX => s.parse().map(ElementId::Range),
            _ => Err(IdError::WrongPrefix {
                id: s.to_string(),
                expected: TextSpanId::PREFIX,
            }),
        }
    }
}
