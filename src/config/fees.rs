//! Fee-rate configuration for checkout pricing.
//!
//! The pricing engine is parameterized by these rates rather than hardcoding
//! them at every call site; the canonical values match what the flow has
//! always charged and can be overridden by the `[fees]` section of
//! catalog.toml.

use serde::Deserialize;

/// Fee rates applied by the pricing engine at checkout.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeeConfig {
    /// Sales-tax rate applied to the order subtotal
    pub tax_rate: f64,
    /// Processing-fee rate for card payments, applied to subtotal + shipping + tax
    pub card_fee_rate: f64,
    /// Flat processing fee in dollars for non-card payment methods
    pub flat_processing_fee: f64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.08,
            card_fee_rate: 0.05,
            flat_processing_fee: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_rates() {
        let fees = FeeConfig::default();
        assert_eq!(fees.tax_rate, 0.08);
        assert_eq!(fees.card_fee_rate, 0.05);
        assert_eq!(fees.flat_processing_fee, 5.0);
    }
}
