//! Strongly typed identifier wrappers.
//!
//! Link, segment and agent ids are plain integers in every input file and get
//! zero-cost newtypes.  Node ids are different: the network file names only
//! the two end nodes of each link, so interior segment endpoints receive a
//! synthesized `<link>:<seq>` id.  [`NodeId`] makes that distinction a tagged
//! variant instead of a string that has to be sniffed for `':'`.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identifier of a link (a chain of segments between two major nodes).
    pub struct LinkId(u32);
}

typed_id! {
    /// Identifier of one geometric road segment.  Unique across the network.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Identifier of a driver.  Expected to be contiguous `1..=N`.
    pub struct AgentId(u32);
}

// ── NodeId ────────────────────────────────────────────────────────────────────

/// Identifier of a network node in the source (MITSIM) id space.
///
/// Ordering places all natural ids before synthetic ones, then sorts
/// numerically, which keeps `BTreeMap<NodeId, _>` output stable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeId {
    /// An id that appears verbatim in the network file.
    Natural(u64),
    /// A segment endpoint with no id of its own, numbered per link from 1.
    Synthetic { link: LinkId, seq: u16 },
}

impl NodeId {
    /// Largest sequence number a synthetic id may carry.  Bounded so that
    /// [`flatten`](Self::flatten) stays collision free.
    pub const MAX_SEQUENCE: u16 = 999;

    /// Build a synthetic id, rejecting sequences outside `1..=MAX_SEQUENCE`.
    pub fn synthetic(link: LinkId, seq: u32) -> Result<NodeId, CoreError> {
        if seq == 0 || seq > u32::from(Self::MAX_SEQUENCE) {
            return Err(CoreError::SequenceOutOfRange { link: link.0, seq });
        }
        Ok(NodeId::Synthetic { link, seq: seq as u16 })
    }

    #[inline]
    pub fn is_synthetic(self) -> bool {
        matches!(self, NodeId::Synthetic { .. })
    }

    /// Natural id value, or `None` for synthetic ids.
    #[inline]
    pub fn natural(self) -> Option<u64> {
        match self {
            NodeId::Natural(n) => Some(n),
            NodeId::Synthetic { .. } => None,
        }
    }

    /// Single-integer form understood by the Sim Mobility visualizer:
    /// natural ids pass through, synthetic ids become `link * 1000 + seq`.
    pub fn flatten(self) -> u64 {
        match self {
            NodeId::Natural(n) => n,
            NodeId::Synthetic { link, seq } => u64::from(link.0) * 1000 + u64::from(seq),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Natural(n) => write!(f, "{n}"),
            NodeId::Synthetic { link, seq } => write!(f, "{}:{}", link.0, seq),
        }
    }
}

impl FromStr for NodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidNodeId(s.to_owned());
        let s = s.trim();
        match s.split_once(':') {
            None => s.parse::<u64>().map(NodeId::Natural).map_err(|_| invalid()),
            Some((link, seq)) => {
                let link = link.parse::<u32>().map_err(|_| invalid())?;
                let seq = seq.parse::<u32>().map_err(|_| invalid())?;
                NodeId::synthetic(LinkId(link), seq)
            }
        }
    }
}

impl From<u64> for NodeId {
    #[inline]
    fn from(n: u64) -> NodeId {
        NodeId::Natural(n)
    }
}
