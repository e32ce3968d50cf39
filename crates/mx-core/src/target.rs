//! Nodes in the target (Sim Mobility) id space.

/// A Sim Mobility node: integer id and integer coordinates.
///
/// Coordinates start at `(0, 0)` ("not translated yet") and are filled in
/// by the remap file's `<id> = (<x>,<y>)` lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetNode {
    pub id: u64,
    pub x:  i64,
    pub y:  i64,
}

impl TargetNode {
    /// A target node with no coordinates yet.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self { id, x: 0, y: 0 }
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl std::fmt::Display for TargetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
