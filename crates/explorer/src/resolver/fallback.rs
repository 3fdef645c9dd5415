//! Placeholder data for identifiers no provider could describe.
//!
//! Placeholders are derived from slices of the address, never from
//! randomness, so the same identifier always renders the same way and the
//! entries are obviously synthetic.

use crate::identifier::AccountIdentifier;
use crate::models::{DescriptiveRecord, HolderShare};

/// Shares of the placeholder entries: strictly decreasing, summing to 100.
pub const PLACEHOLDER_SHARES: [f64; 5] = [45.0, 25.0, 15.0, 10.0, 5.0];

/// Number of leading address characters used in placeholder labels.
const LABEL_PREFIX_LEN: usize = 10;

/// Placeholder distribution for an identifier: `<first 10 chars>...1` to `...5`.
pub fn placeholder_holders(identifier: &AccountIdentifier) -> Vec<HolderShare> {
    let prefix = identifier.prefix(LABEL_PREFIX_LEN);

    PLACEHOLDER_SHARES
        .iter()
        .enumerate()
        .map(|(i, share)| HolderShare::new(format!("{}...{}", prefix, i + 1), *share))
        .collect()
}

/// Minimal account record used when no provider supplied any data.
pub fn fallback_record(identifier: &AccountIdentifier) -> DescriptiveRecord {
    DescriptiveRecord::account(identifier.clone(), None, Vec::new())
        .with_placeholder_holders(placeholder_holders(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;

    const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    fn wallet() -> AccountIdentifier {
        AccountIdentifier::parse(WALLET).unwrap()
    }

    #[test]
    fn test_shares_strictly_decreasing_and_bounded() {
        let holders = placeholder_holders(&wallet());

        assert_eq!(holders.len(), PLACEHOLDER_SHARES.len());
        for pair in holders.windows(2) {
            assert!(pair[0].share_percentage > pair[1].share_percentage);
        }
        let total: f64 = holders.iter().map(|h| h.share_percentage).sum();
        assert!(total <= 100.0);
        assert!(holders.iter().all(HolderShare::is_valid));
    }

    #[test]
    fn test_labels_derive_from_address() {
        let holders = placeholder_holders(&wallet());
        assert_eq!(holders[0].holder_address, "9WzDXwBbmk...1");
        assert_eq!(holders[4].holder_address, "9WzDXwBbmk...5");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(placeholder_holders(&wallet()), placeholder_holders(&wallet()));
    }

    #[test]
    fn test_fallback_record_shape() {
        let record = fallback_record(&wallet());

        assert_eq!(record.address.as_str(), WALLET);
        assert_eq!(record.kind, EntityKind::Account);
        assert!(record.metrics.is_empty());
        assert!(record.synthetic);
        assert!(record.is_fallback());
    }
}
