//! Core business logic - framework-agnostic cart state and pricing.
//!
//! Everything in this module is synchronous, in-memory, and owned by one
//! [`session::CartSession`] per browsing flow. Screens call the session's
//! mutation API; derived values (recipient status, box totals, order totals)
//! are recomputed eagerly before each mutation returns, so no caller ever
//! observes stale derived state.

/// Recipient-to-box assignment matrix
pub mod assignment;
/// Read-only gift catalog lookup
pub mod catalog;
/// Saved preference records (shipping and customization defaults)
pub mod defaults;
/// Step-transition gates between flow screens
pub mod gates;
/// Gift-box aggregate: gift lines and personalization
pub mod gift_box;
/// Checkout pricing engine
pub mod pricing;
/// Recipient registry with duplicate detection
pub mod recipient;
/// Cart session owning the whole order composition
pub mod session;
