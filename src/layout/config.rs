//! Layout configuration: interpolation order and the ghost width it implies.

use serde::{Deserialize, Serialize};

use crate::amr_error::{AmrFieldError, Result};

/// Grid layout settings shared by every field of a patch.
///
/// Deserializable so it can sit in a simulation input file next to the
/// hierarchy description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Particle-to-grid interpolation order, `1..=3`.
    pub interp_order: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { interp_order: 1 }
    }
}

impl LayoutConfig {
    /// # Errors
    /// `InvalidInterpOrder` outside of `1..=3`.
    pub fn new(interp_order: u8) -> Result<Self> {
        let cfg = Self { interp_order };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if (1..=3).contains(&self.interp_order) {
            Ok(())
        } else {
            Err(AmrFieldError::InvalidInterpOrder(self.interp_order))
        }
    }

    /// Ghost layer width, in cells, on each side of a patch.
    #[inline]
    pub fn ghost_width(&self) -> i32 {
        (i32::from(self.interp_order) + 1) / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_width_per_order() {
        let widths: Vec<_> = (1..=3)
            .map(|o| LayoutConfig::new(o).unwrap().ghost_width())
            .collect();
        assert_eq!(widths, vec![2, 2, 3]);
    }

    #[test]
    fn rejects_unsupported_order() {
        assert_eq!(LayoutConfig::new(0), Err(AmrFieldError::InvalidInterpOrder(0)));
        assert_eq!(LayoutConfig::new(4), Err(AmrFieldError::InvalidInterpOrder(4)));
    }

    #[test]
    fn json_defaults() {
        let cfg: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LayoutConfig::default());
        let cfg: LayoutConfig = serde_json::from_str(r#"{"interp_order":3}"#).unwrap();
        assert_eq!(cfg.ghost_width(), 3);
        let back = serde_json::to_string(&cfg).unwrap();
        assert_eq!(back, r#"{"interp_order":3}"#);
    }
}
