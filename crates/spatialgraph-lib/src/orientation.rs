use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::NodeId;

/// Policy mapping stored edge endpoints to traversal direction.
///
/// The numeric codes match the legacy SQL surface, where orientation was passed
/// as `1` (direct), `2` (reversed) or `3` (undirected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Edges are traversed from start node to end node, as stored.
    #[default]
    Direct,
    /// Start and end node are swapped before insertion.
    Reversed,
    /// Edges are inserted once and may be traversed in either direction.
    Undirect,
}

impl Orientation {
    /// Legacy integer code for this orientation.
    pub fn code(self) -> i64 {
        match self {
            Orientation::Direct => 1,
            Orientation::Reversed => 2,
            Orientation::Undirect => 3,
        }
    }

    /// Map a stored `(start, end)` pair to the `(source, target)` pair that is
    /// inserted into the graph. Weight is never touched by this mapping.
    pub fn orient(self, start: NodeId, end: NodeId) -> (NodeId, NodeId) {
        match self {
            Orientation::Direct | Orientation::Undirect => (start, end),
            Orientation::Reversed => (end, start),
        }
    }

    /// Whether graphs built with this orientation may traverse edges backwards.
    pub fn is_undirected(self) -> bool {
        matches!(self, Orientation::Undirect)
    }
}

impl TryFrom<i64> for Orientation {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Orientation::Direct),
            2 => Ok(Orientation::Reversed),
            3 => Ok(Orientation::Undirect),
            other => Err(Error::InvalidOrientation {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "direct" | "directed" => Ok(Orientation::Direct),
            "2" | "reversed" | "direct_reversed" | "reverse" => Ok(Orientation::Reversed),
            "3" | "undirect" | "undirected" => Ok(Orientation::Undirect),
            _ => Err(Error::InvalidOrientation {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Orientation::Direct => "direct",
            Orientation::Reversed => "reversed",
            Orientation::Undirect => "undirect",
        };
        f.write_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_swaps_endpoints() {
        assert_eq!(Orientation::Direct.orient(1, 2), (1, 2));
        assert_eq!(Orientation::Undirect.orient(1, 2), (1, 2));
        assert_eq!(Orientation::Reversed.orient(1, 2), (2, 1));
    }

    #[test]
    fn legacy_codes_round_trip() {
        for orientation in [
            Orientation::Direct,
            Orientation::Reversed,
            Orientation::Undirect,
        ] {
            assert_eq!(Orientation::try_from(orientation.code()).unwrap(), orientation);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in [0, 4, -1] {
            let err = Orientation::try_from(code).unwrap_err();
            assert!(matches!(err, Error::InvalidOrientation { ref value } if value == &code.to_string()));
        }
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("UNDIRECTED".parse::<Orientation>().unwrap(), Orientation::Undirect);
        assert_eq!(" reversed ".parse::<Orientation>().unwrap(), Orientation::Reversed);
        assert_eq!("direct".parse::<Orientation>().unwrap(), Orientation::Direct);
    }
}
