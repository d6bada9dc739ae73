//! Checkout pricing engine.
//!
//! Pure functions only: given the same boxes, shipping, method, and fee
//! rates, the output is byte-identical. Every screen that shows a price goes
//! through these functions, so the numbers can never disagree between the box
//! editor, the review screen, and checkout. Rounding is applied once per
//! derived figure, after full-precision summation, never per line.

use crate::config::fees::FeeConfig;
use crate::core::gift_box::GiftBox;
use serde::{Deserialize, Serialize};

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card; percentage processing fee
    Card,
    /// Bank transfer; flat processing fee
    BankTransfer,
}

/// Tax, processing fee, and grand total for one order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Sales tax on the subtotal
    pub tax: f64,
    /// Payment-method-dependent surcharge
    pub processing_fee: f64,
    /// Subtotal + tax + shipping + processing fee
    pub total: f64,
}

/// Rounds a dollar amount to cents.
#[must_use]
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Full-precision box total: base price + gift lines + add-ons.
fn box_total_raw(gift_box: &GiftBox) -> f64 {
    let lines: f64 = gift_box
        .gift_lines
        .iter()
        .map(|line| line.unit_price * f64::from(line.quantity))
        .sum();
    gift_box.base_price + lines + gift_box.personalization.add_ons_cost
}

/// Total cost of one box, rounded to cents.
#[must_use]
pub fn compute_box_total(gift_box: &GiftBox) -> f64 {
    round2(box_total_raw(gift_box))
}

/// Order subtotal over all selected boxes, rounded once after summation.
///
/// Invariant under reordering of the box list.
#[must_use]
pub fn compute_order_subtotal(boxes: &[GiftBox]) -> f64 {
    round2(boxes.iter().map(box_total_raw).sum())
}

/// Tax, processing fee, and grand total for a subtotal and shipping cost.
///
/// Card payments pay a percentage of subtotal + shipping + tax; every other
/// method pays the flat fee.
#[must_use]
pub fn compute_fees(
    subtotal: f64,
    shipping: f64,
    method: PaymentMethod,
    fees: &FeeConfig,
) -> FeeBreakdown {
    let tax = round2(subtotal * fees.tax_rate);
    let processing_fee = match method {
        PaymentMethod::Card => round2((subtotal + shipping + tax) * fees.card_fee_rate),
        PaymentMethod::BankTransfer => fees.flat_processing_fee,
    };
    let total = round2(subtotal + tax + shipping + processing_fee);

    FeeBreakdown {
        tax,
        processing_fee,
        total,
    }
}
