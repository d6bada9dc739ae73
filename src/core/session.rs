//! Cart session owning the whole order composition.
//!
//! One `CartSession` is created when the user enters the gifting flow and
//! torn down at checkout completion or explicit reset. Every screen mutates
//! the order through this API and nothing else; there is no other copy of
//! the cart anywhere. All mutations are synchronous and all-or-nothing, and
//! derived state (recipient status, totals) is recomputed before a mutation
//! returns, so navigating backward and forward through the flow can never
//! observe stale or half-updated state.

use crate::config::fees::FeeConfig;
use crate::core::assignment::AssignmentMatrix;
use crate::core::catalog::GiftCatalog;
use crate::core::gates::{self, FlowStep, GateOutcome};
use crate::core::gift_box::{GiftBox, PersonalizationUpdate};
use crate::core::pricing::{self, PaymentMethod};
use crate::core::recipient::{
    DigitalImportRow, ImportRow, Recipient, RecipientInput, RecipientPatch, RecipientRegistry,
    RecipientStatus,
};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The final pricing record handed to the external payment collaborator.
///
/// The core computes amounts and fee lines; it never performs payment
/// processing itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    /// Selected payment method
    pub method: PaymentMethod,
    /// Order subtotal over all boxes
    pub subtotal: f64,
    /// Sales tax
    pub tax: f64,
    /// Shipping cost
    pub shipping: f64,
    /// Payment-method-dependent surcharge
    pub processing_fee: f64,
    /// Grand total
    pub total: f64,
}

/// All order-composition state for one browsing session.
#[derive(Debug, Clone)]
pub struct CartSession {
    catalog: GiftCatalog,
    fees: FeeConfig,
    boxes: Vec<GiftBox>,
    recipients: RecipientRegistry,
    assignments: AssignmentMatrix,
    payment_method: Option<PaymentMethod>,
    shipping_cost: f64,
    next_box_id: u64,
}

impl CartSession {
    /// Creates a fresh session over injected catalog data and fee rates.
    #[must_use]
    pub fn new(catalog: GiftCatalog, fees: FeeConfig) -> Self {
        Self {
            catalog,
            fees,
            boxes: Vec::new(),
            recipients: RecipientRegistry::new(),
            assignments: AssignmentMatrix::new(),
            payment_method: None,
            shipping_cost: 0.0,
            next_box_id: 0,
        }
    }

    // --- boxes ---

    /// Adds a box from a catalog preset. Returns the new box id, or `None`
    /// when the preset id does not resolve (defensive no-op).
    pub fn select_box(&mut self, preset_id: &str) -> Option<u64> {
        let Some(preset) = self.catalog.preset(preset_id) else {
            warn!("Box selection ignored: preset '{preset_id}' not in catalog");
            return None;
        };

        self.next_box_id += 1;
        let gift_box = GiftBox::from_preset(self.next_box_id, preset);
        info!("Selected box '{}' as #{}", gift_box.name, gift_box.id);
        self.boxes.push(gift_box);
        Some(self.next_box_id)
    }

    /// Adds a box built from scratch. Returns the new box id.
    pub fn add_custom_box(
        &mut self,
        name: impl Into<String>,
        base_price: f64,
        size: Option<String>,
        theme: Option<String>,
        capacity: Option<u32>,
    ) -> u64 {
        self.next_box_id += 1;
        self.boxes.push(GiftBox::custom(
            self.next_box_id,
            name,
            base_price,
            size,
            theme,
            capacity,
        ));
        self.next_box_id
    }

    /// Removes a box and, in the same operation, every assignment that
    /// references it. Returns whether a box was removed.
    pub fn remove_box(&mut self, box_id: u64) -> bool {
        let before = self.boxes.len();
        self.boxes.retain(|gift_box| gift_box.id != box_id);
        let removed = before != self.boxes.len();

        if removed {
            self.assignments.remove_box(box_id);
            self.refresh_statuses();
            info!("Removed box #{box_id} and its assignments");
        } else {
            warn!("Box removal ignored: box {box_id} not in cart");
        }
        removed
    }

    /// Adds, updates, or removes a gift line on a box, resolving price and
    /// name through the catalog.
    ///
    /// A quantity of zero removes the line. Unresolvable box or gift ids are
    /// defensive no-ops. A capacity-exceeding call fails with
    /// [`crate::errors::Error::CapacityExceeded`] and changes nothing.
    pub fn add_or_update_gift(&mut self, box_id: u64, gift_id: &str, quantity: u32) -> Result<()> {
        let Some(item) = self.catalog.lookup(gift_id) else {
            warn!("Gift line ignored: gift '{gift_id}' not in catalog");
            return Ok(());
        };
        let Some(gift_box) = self.boxes.iter_mut().find(|b| b.id == box_id) else {
            warn!("Gift line ignored: box {box_id} not in cart");
            return Ok(());
        };

        gift_box.apply_gift_line(item, quantity)
    }

    /// Replaces one or more personalization axes on a box; the add-on cost is
    /// refolded immediately. An unresolvable box id is a defensive no-op.
    pub fn set_personalization(&mut self, box_id: u64, update: PersonalizationUpdate) {
        match self.boxes.iter_mut().find(|b| b.id == box_id) {
            Some(gift_box) => gift_box.set_personalization(update),
            None => warn!("Personalization ignored: box {box_id} not in cart"),
        }
    }

    /// All boxes in selection order.
    #[must_use]
    pub fn boxes(&self) -> &[GiftBox] {
        &self.boxes
    }

    /// Looks up one box by id.
    #[must_use]
    pub fn gift_box(&self, box_id: u64) -> Option<&GiftBox> {
        self.boxes.iter().find(|gift_box| gift_box.id == box_id)
    }

    // --- recipients ---

    /// Adds a manually entered recipient. Requires non-empty name and email.
    pub fn add_recipient(&mut self, input: RecipientInput) -> Result<u64> {
        let id = self.recipients.add(input)?;
        self.refresh_statuses();
        Ok(id)
    }

    /// Applies a field patch to a recipient; validation is deferred to the
    /// step-transition gate.
    pub fn edit_recipient(&mut self, id: u64, patch: RecipientPatch) {
        self.recipients.edit(id, patch);
        self.refresh_statuses();
    }

    /// Removes a recipient and, in the same operation, every assignment that
    /// references them. Returns whether a recipient was removed.
    pub fn remove_recipient(&mut self, id: u64) -> bool {
        let removed = self.recipients.remove(id);
        if removed {
            self.assignments.remove_recipient(id);
            self.refresh_statuses();
        } else {
            warn!("Recipient removal ignored: recipient {id} not in registry");
        }
        removed
    }

    /// Imports standard-shape rows. Returns the new recipient ids.
    pub fn bulk_import(&mut self, rows: Vec<ImportRow>) -> Vec<u64> {
        let ids = self.recipients.bulk_import(rows);
        self.refresh_statuses();
        info!("Imported {} recipients", ids.len());
        ids
    }

    /// Imports digital-gift rows. Returns the new recipient ids.
    pub fn bulk_import_digital(&mut self, rows: Vec<DigitalImportRow>) -> Vec<u64> {
        let ids = self.recipients.bulk_import_digital(rows);
        self.refresh_statuses();
        info!("Imported {} digital-gift recipients", ids.len());
        ids
    }

    /// Sets whether a recipient counts toward gates and bulk assignment.
    pub fn toggle_inclusion(&mut self, id: u64, included: bool) {
        self.recipients.toggle_inclusion(id, included);
    }

    /// The recipient registry, read-only.
    #[must_use]
    pub fn recipients(&self) -> &RecipientRegistry {
        &self.recipients
    }

    // --- assignments ---

    /// Links a recipient to a box. Idempotent; unresolvable ids are defensive
    /// no-ops so the matrix can never reference a dead entity.
    pub fn assign(&mut self, box_id: u64, recipient_id: u64) {
        if self.gift_box(box_id).is_none() {
            warn!("Assignment ignored: box {box_id} not in cart");
            return;
        }
        if self.recipients.get(recipient_id).is_none() {
            warn!("Assignment ignored: recipient {recipient_id} not in registry");
            return;
        }

        self.assignments.assign(box_id, recipient_id);
        self.refresh_statuses();
    }

    /// Unlinks a recipient from a box. Idempotent.
    pub fn unassign(&mut self, box_id: u64, recipient_id: u64) {
        self.assignments.unassign(box_id, recipient_id);
        self.refresh_statuses();
    }

    /// Overwrites a box's assignment set with every currently-included
    /// recipient, in registry order. Calling it twice reproduces the same set.
    pub fn assign_all(&mut self, box_id: u64) {
        if self.gift_box(box_id).is_none() {
            warn!("Assign-all ignored: box {box_id} not in cart");
            return;
        }

        let included = self.recipients.included_ids();
        self.assignments.assign_all(box_id, &included);
        self.refresh_statuses();
    }

    /// Recipients assigned to a box, in assignment-insertion order. A pure
    /// projection of the matrix; boxes keep no recipient list of their own.
    #[must_use]
    pub fn assigned_recipients(&self, box_id: u64) -> Vec<&Recipient> {
        self.assignments
            .assigned_recipients(box_id)
            .into_iter()
            .filter_map(|recipient_id| self.recipients.get(recipient_id))
            .collect()
    }

    /// The assignment matrix, read-only.
    #[must_use]
    pub fn assignments(&self) -> &AssignmentMatrix {
        &self.assignments
    }

    // --- checkout ---

    /// Selects the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// The selected payment method, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Sets the shipping cost for the order.
    pub fn set_shipping_cost(&mut self, amount: f64) {
        self.shipping_cost = amount;
    }

    /// The current shipping cost.
    #[must_use]
    pub fn shipping_cost(&self) -> f64 {
        self.shipping_cost
    }

    /// Order subtotal over all selected boxes.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        pricing::compute_order_subtotal(&self.boxes)
    }

    /// The final pricing record for the payment hand-off, or `None` until a
    /// payment method has been selected.
    #[must_use]
    pub fn checkout_summary(&self) -> Option<CheckoutSummary> {
        let method = self.payment_method?;
        let subtotal = self.subtotal();
        let fees = pricing::compute_fees(subtotal, self.shipping_cost, method, &self.fees);

        Some(CheckoutSummary {
            method,
            subtotal,
            tax: fees.tax,
            shipping: self.shipping_cost,
            processing_fee: fees.processing_fee,
            total: fees.total,
        })
    }

    /// Runs the transition gate for one flow step. Read-only: a blocked check
    /// mutates nothing.
    #[must_use]
    pub fn check_gate(&self, step: FlowStep) -> GateOutcome {
        gates::check_gate(self, step)
    }

    /// Tears the session down to its initial state, keeping the injected
    /// catalog and fee rates.
    pub fn reset(&mut self) {
        self.boxes.clear();
        self.recipients.clear();
        self.assignments.clear();
        self.payment_method = None;
        self.shipping_cost = 0.0;
        self.next_box_id = 0;
        info!("Cart session reset");
    }

    /// Rederives every recipient's status from the canonical rule:
    /// confirmed iff the address is non-empty and at least one assignment
    /// exists. Runs eagerly inside every mutation that can change either
    /// input, so statuses are never stale after a mutation returns.
    fn refresh_statuses(&mut self) {
        let assignments = &self.assignments;
        for recipient in self.recipients.iter_mut() {
            let confirmed = recipient.has_address() && assignments.is_assigned(recipient.id);
            recipient.status = if confirmed {
                RecipientStatus::Confirmed
            } else {
                RecipientStatus::Pending
            };
        }
    }
}
