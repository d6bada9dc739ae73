//! Recipient-to-box assignment matrix.
//!
//! The matrix is the single source of truth for "who gets which box": boxes
//! keep no recipient list of their own, and every per-box view is a pure
//! projection of this relation in assignment-insertion order. Individual
//! toggles are idempotent; the bulk operation deterministically overwrites a
//! box's whole set.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One recipient-to-box link. Unique per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The assigned box
    pub box_id: u64,
    /// The receiving recipient
    pub recipient_id: u64,
}

/// The many-to-many relation between recipients and boxes.
#[derive(Debug, Clone, Default)]
pub struct AssignmentMatrix {
    assignments: Vec<Assignment>,
}

impl AssignmentMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Links a recipient to a box. Idempotent: re-assigning an existing pair
    /// changes nothing. Returns whether a new link was created.
    pub fn assign(&mut self, box_id: u64, recipient_id: u64) -> bool {
        if self.contains(box_id, recipient_id) {
            return false;
        }
        self.assignments.push(Assignment {
            box_id,
            recipient_id,
        });
        true
    }

    /// Removes a recipient-to-box link. Idempotent. Returns whether a link
    /// was removed.
    pub fn unassign(&mut self, box_id: u64, recipient_id: u64) -> bool {
        let before = self.assignments.len();
        self.assignments
            .retain(|a| !(a.box_id == box_id && a.recipient_id == recipient_id));
        before != self.assignments.len()
    }

    /// Overwrites a box's assignment set with exactly the given recipients.
    ///
    /// This is deterministic: whatever was previously assigned to the box is
    /// discarded, so calling it twice in a row reproduces the same full set.
    pub fn assign_all(&mut self, box_id: u64, recipient_ids: &[u64]) {
        self.assignments.retain(|a| a.box_id != box_id);
        self.assignments.extend(
            recipient_ids
                .iter()
                .map(|&recipient_id| Assignment {
                    box_id,
                    recipient_id,
                }),
        );
        debug!(
            "Box {box_id} assignment set overwritten with {} recipients",
            recipient_ids.len()
        );
    }

    /// Whether a specific pair exists.
    #[must_use]
    pub fn contains(&self, box_id: u64, recipient_id: u64) -> bool {
        self.assignments
            .iter()
            .any(|a| a.box_id == box_id && a.recipient_id == recipient_id)
    }

    /// Recipient ids assigned to a box, in assignment-insertion order.
    #[must_use]
    pub fn assigned_recipients(&self, box_id: u64) -> Vec<u64> {
        self.assignments
            .iter()
            .filter(|a| a.box_id == box_id)
            .map(|a| a.recipient_id)
            .collect()
    }

    /// Number of boxes assigned to a recipient.
    #[must_use]
    pub fn assignment_count(&self, recipient_id: u64) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.recipient_id == recipient_id)
            .count()
    }

    /// Whether a recipient has at least one assignment.
    #[must_use]
    pub fn is_assigned(&self, recipient_id: u64) -> bool {
        self.assignments
            .iter()
            .any(|a| a.recipient_id == recipient_id)
    }

    /// Cascade: drops every assignment referencing a removed box.
    pub fn remove_box(&mut self, box_id: u64) {
        self.assignments.retain(|a| a.box_id != box_id);
    }

    /// Cascade: drops every assignment referencing a removed recipient.
    pub fn remove_recipient(&mut self, recipient_id: u64) {
        self.assignments.retain(|a| a.recipient_id != recipient_id);
    }

    /// All assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Total number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the matrix has no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Drops every assignment.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_is_idempotent() {
        let mut matrix = AssignmentMatrix::new();

        assert!(matrix.assign(1, 10));
        assert!(!matrix.assign(1, 10));

        // Calling twice produces the same matrix as calling once
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.assigned_recipients(1), vec![10]);
    }

    #[test]
    fn test_unassign_is_idempotent() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(1, 10);

        assert!(matrix.unassign(1, 10));
        assert!(!matrix.unassign(1, 10));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_projection_preserves_insertion_order() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(1, 30);
        matrix.assign(2, 10);
        matrix.assign(1, 10);
        matrix.assign(1, 20);

        assert_eq!(matrix.assigned_recipients(1), vec![30, 10, 20]);
        assert_eq!(matrix.assigned_recipients(2), vec![10]);
    }

    #[test]
    fn test_assign_all_overwrites_not_unions() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(1, 99);

        matrix.assign_all(1, &[10, 20, 30]);
        assert_eq!(matrix.assigned_recipients(1), vec![10, 20, 30]);

        // Unassign one, then assign-all again: the full set comes back
        matrix.unassign(1, 20);
        matrix.assign_all(1, &[10, 20, 30]);
        assert_eq!(matrix.assigned_recipients(1), vec![10, 20, 30]);
    }

    #[test]
    fn test_assign_all_leaves_other_boxes_alone() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(2, 10);

        matrix.assign_all(1, &[10, 20]);
        assert_eq!(matrix.assigned_recipients(2), vec![10]);
    }

    #[test]
    fn test_cascades_drop_every_reference() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(1, 10);
        matrix.assign(1, 20);
        matrix.assign(2, 10);

        matrix.remove_box(1);
        assert!(matrix.assigned_recipients(1).is_empty());
        assert_eq!(matrix.assigned_recipients(2), vec![10]);

        matrix.remove_recipient(10);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_assignment_count_per_recipient() {
        let mut matrix = AssignmentMatrix::new();
        matrix.assign(1, 10);
        matrix.assign(2, 10);
        matrix.assign(3, 20);

        assert_eq!(matrix.assignment_count(10), 2);
        assert_eq!(matrix.assignment_count(20), 1);
        assert!(matrix.is_assigned(20));
        assert!(!matrix.is_assigned(30));
    }
}
