//! Per-direction centering of a quantity on the grid.

use serde::{Deserialize, Serialize};

/// Where a quantity's samples sit along one direction.
///
/// Primal samples coincide with cell boundaries (nodes); a box of cells
/// `l..=u` carries primal samples `l..=u+1`. Dual samples sit at cell centres
/// and share the cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Centering {
    Primal,
    Dual,
}

impl Centering {
    #[inline]
    pub fn is_primal(self) -> bool {
        matches!(self, Centering::Primal)
    }

    /// Mask of primal directions, for cell → data box conversion.
    pub fn primal_mask<const D: usize>(centering: &[Centering; D]) -> [bool; D] {
        centering.map(Centering::is_primal)
    }
}

impl std::fmt::Display for Centering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Centering::Primal => f.write_str("primal"),
            Centering::Dual => f.write_str("dual"),
        }
    }
}
