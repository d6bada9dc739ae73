//! Step-transition gates between flow screens.
//!
//! Each screen defines its own predicate over the cart session; a check
//! either advances or blocks with exactly one message per unmet condition.
//! Gates never mutate anything and are independent of each other: a step does
//! not re-validate conditions an earlier step already guaranteed, while the
//! session's own invariants hold at all times regardless of navigation
//! direction.

use crate::core::recipient::RecipientStatus;
use crate::core::session::CartSession;

/// The screens whose forward transitions are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// Picking one or more boxes
    BoxSelection,
    /// Entering and assigning recipients
    Recipients,
    /// Choosing how to pay
    Payment,
}

/// Result of running a gate: advance, or stay with the reasons why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every condition for this step is met
    Advance,
    /// One message per unmet condition
    Blocked(Vec<String>),
}

impl GateOutcome {
    /// Whether the transition may proceed.
    #[must_use]
    pub fn is_advance(&self) -> bool {
        matches!(self, Self::Advance)
    }

    fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self::Advance
        } else {
            Self::Blocked(reasons)
        }
    }
}

/// Runs the gate for one flow step against the current session state.
#[must_use]
pub fn check_gate(session: &CartSession, step: FlowStep) -> GateOutcome {
    match step {
        FlowStep::BoxSelection => check_box_selection(session),
        FlowStep::Recipients => check_recipients(session),
        FlowStep::Payment => check_payment(session),
    }
}

fn check_box_selection(session: &CartSession) -> GateOutcome {
    let mut reasons = Vec::new();
    if session.boxes().is_empty() {
        reasons.push("Select at least one box to continue".to_string());
    }
    GateOutcome::from_reasons(reasons)
}

fn check_recipients(session: &CartSession) -> GateOutcome {
    let mut reasons = Vec::new();

    let included: Vec<_> = session
        .recipients()
        .iter()
        .filter(|recipient| recipient.included)
        .collect();

    if included.is_empty() {
        reasons.push("Add at least one recipient to continue".to_string());
    }
    if !included
        .iter()
        .any(|recipient| recipient.status == RecipientStatus::Confirmed)
    {
        reasons.push(
            "At least one included recipient needs a shipping address and an assigned box"
                .to_string(),
        );
    }

    GateOutcome::from_reasons(reasons)
}

fn check_payment(session: &CartSession) -> GateOutcome {
    let mut reasons = Vec::new();
    if session.payment_method().is_none() {
        reasons.push("Select a payment method to continue".to_string());
    }
    GateOutcome::from_reasons(reasons)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::pricing::PaymentMethod;
    use crate::test_utils::{addressed_input, test_session};

    #[test]
    fn test_box_selection_gate() {
        let mut session = test_session();
        assert_eq!(
            session.check_gate(FlowStep::BoxSelection),
            GateOutcome::Blocked(vec!["Select at least one box to continue".to_string()])
        );

        session.select_box("holiday-classic").unwrap();
        assert!(session.check_gate(FlowStep::BoxSelection).is_advance());
    }

    #[test]
    fn test_recipients_gate_reports_each_unmet_condition_once() -> crate::errors::Result<()> {
        let mut session = test_session();
        let box_id = session.select_box("holiday-classic").unwrap();

        // Empty registry: both conditions unmet, one message each
        match session.check_gate(FlowStep::Recipients) {
            GateOutcome::Blocked(reasons) => assert_eq!(reasons.len(), 2),
            GateOutcome::Advance => panic!("gate should block on an empty registry"),
        }

        // Addressed but unassigned: only the readiness condition blocks
        let id = session.add_recipient(addressed_input("Jane Doe", "jane@x.com"))?;
        match session.check_gate(FlowStep::Recipients) {
            GateOutcome::Blocked(reasons) => assert_eq!(reasons.len(), 1),
            GateOutcome::Advance => panic!("gate should block with nobody assigned"),
        }

        session.assign(box_id, id);
        assert!(session.check_gate(FlowStep::Recipients).is_advance());

        // Excluding the only confirmed recipient blocks again
        session.toggle_inclusion(id, false);
        assert!(!session.check_gate(FlowStep::Recipients).is_advance());

        Ok(())
    }

    #[test]
    fn test_payment_gate() {
        let mut session = test_session();
        assert!(!session.check_gate(FlowStep::Payment).is_advance());

        session.set_payment_method(PaymentMethod::BankTransfer);
        assert!(session.check_gate(FlowStep::Payment).is_advance());
    }

    #[test]
    fn test_blocked_gate_mutates_nothing() -> crate::errors::Result<()> {
        let mut session = test_session();
        session.add_recipient(addressed_input("Jane Doe", "jane@x.com"))?;

        let before = format!("{session:?}");
        let _ = session.check_gate(FlowStep::Recipients);
        assert_eq!(before, format!("{session:?}"));

        Ok(())
    }
}
