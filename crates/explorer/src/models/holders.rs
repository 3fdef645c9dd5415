use serde::{Deserialize, Serialize};

/// Upper bound of a share, in percent.
pub const MAX_SHARE_PERCENTAGE: f64 = 100.0;

/// One entry of a holder distribution.
///
/// For token contracts this is a holder and its share of total supply. For
/// ordinary accounts the same shape carries the largest counterpart flows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderShare {
    /// Holder address, or a display label for synthetic entries
    pub holder_address: String,

    /// Share in percent, within `[0, 100]`
    pub share_percentage: f64,
}

impl HolderShare {
    pub fn new(holder_address: impl Into<String>, share_percentage: f64) -> Self {
        Self {
            holder_address: holder_address.into(),
            share_percentage,
        }
    }

    /// Whether the share is a finite number within `[0, 100]`.
    pub fn is_valid(&self) -> bool {
        self.share_percentage.is_finite()
            && (0.0..=MAX_SHARE_PERCENTAGE).contains(&self.share_percentage)
    }
}
