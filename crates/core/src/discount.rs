//! Order discount table.
//!
//! A fixed lookup from customer tier, order total and coupon code to a
//! discount fraction. No handler applies it yet.

use rust_decimal::Decimal;

/// Coupon that raises a large premium order from 15% to 20%.
pub const PREMIUM_COUPON: &str = "DISCOUNT20";

/// Coupon that raises a guest order over the threshold from 5% to 10%.
pub const GUEST_COUPON: &str = "DISCOUNT10";

/// Customer tier used to pick a discount row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerTier {
    Premium,
    Guest,
    Other,
}

impl CustomerTier {
    /// Map a tier label to a tier. Matching is exact: `"Premium"` is `Other`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "premium" => Self::Premium,
            "guest" => Self::Guest,
            _ => Self::Other,
        }
    }
}

/// Discount fraction for an order.
///
/// | Tier    | Total  | Coupon       | Rate |
/// |---------|--------|--------------|------|
/// | premium | > 100  | `DISCOUNT20` | 0.20 |
/// | premium | > 100  | other        | 0.15 |
/// | premium | <= 100 | any          | 0.10 |
/// | guest   | > 50   | `DISCOUNT10` | 0.10 |
/// | guest   | > 50   | other        | 0.05 |
/// | other   |        |              | 0    |
#[must_use]
pub fn discount_rate(tier: CustomerTier, order_total: Decimal, coupon: &str) -> Decimal {
    match tier {
        CustomerTier::Premium if order_total > Decimal::ONE_HUNDRED => {
            if coupon == PREMIUM_COUPON {
                Decimal::new(20, 2)
            } else {
                Decimal::new(15, 2)
            }
        }
        CustomerTier::Premium => Decimal::new(10, 2),
        CustomerTier::Guest if order_total > Decimal::new(50, 0) => {
            if coupon == GUEST_COUPON {
                Decimal::new(10, 2)
            } else {
                Decimal::new(5, 2)
            }
        }
        CustomerTier::Guest | CustomerTier::Other => Decimal::ZERO,
    }
}
