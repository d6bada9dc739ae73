//! Recipient registry with duplicate detection.
//!
//! Recipients enter the registry manually, through bulk import, or as
//! pre-existing contacts. Duplicates are flagged, never rejected: the flag is
//! advisory and the existing entry is left untouched. Shipping readiness
//! (`status`) is derived from the address and the assignment matrix; the
//! registry stores the value but only the session recomputes it.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a recipient entered the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientSource {
    /// Entered by hand on the recipients screen
    Manual,
    /// Imported from an uploaded sheet
    Bulk,
    /// Carried over from a previous campaign
    Auto,
}

/// Derived shipping-readiness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientStatus {
    /// Missing an address, an assignment, or both
    Pending,
    /// Addressed and assigned to at least one box
    Confirmed,
}

/// A person eligible to receive one or more boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Registry-local identifier
    pub id: u64,
    /// Full name
    pub name: String,
    /// Email address; duplicates across the registry are flagged
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Shipping address; empty means not yet addressed
    pub address: String,
    /// Free-form grouping tag (e.g., a department or company)
    pub tag: String,
    /// How this recipient entered the registry
    pub source: RecipientSource,
    /// Whether this recipient counts toward gates and bulk assignment
    pub included: bool,
    /// Advisory flag: another entry shares this name or email
    pub is_duplicate: bool,
    /// Derived shipping readiness; never set by callers
    pub status: RecipientStatus,
}

impl Recipient {
    /// Whether a shipping address has been captured.
    #[must_use]
    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

/// Input for a manual recipient add.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipientInput {
    /// Full name (required)
    pub name: String,
    /// Email address (required)
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Shipping address
    pub address: String,
    /// Free-form grouping tag
    pub tag: String,
}

/// A partial recipient edit; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipientPatch {
    /// Replace the name
    pub name: Option<String>,
    /// Replace the email
    pub email: Option<String>,
    /// Replace the phone number
    pub phone: Option<String>,
    /// Replace the address
    pub address: Option<String>,
    /// Replace the tag
    pub tag: Option<String>,
}

/// One parsed row of a standard bulk-import sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    #[serde(default)]
    pub phone: String,
    /// Shipping address
    #[serde(default)]
    pub address: String,
    /// Free-form grouping tag
    #[serde(default)]
    pub tag: String,
}

/// One parsed row of a digital-gift import sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct DigitalImportRow {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Company, mapped to the grouping tag
    #[serde(default)]
    pub company: String,
    /// Optional shipping address; digital gifts may not need one
    #[serde(default)]
    pub address: Option<String>,
}

/// All recipients of the campaign, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecipientRegistry {
    recipients: Vec<Recipient>,
    next_id: u64,
}

impl RecipientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manually entered recipient.
    ///
    /// Requires a non-empty name and email. The new entry is flagged as a
    /// duplicate when any existing entry shares the email or the name
    /// (case-insensitively); it is still inserted either way.
    pub fn add(&mut self, input: RecipientInput) -> Result<u64> {
        if input.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name".to_string(),
                message: "Recipient name cannot be empty".to_string(),
            });
        }
        if input.email.trim().is_empty() {
            return Err(Error::Validation {
                field: "email".to_string(),
                message: "Recipient email cannot be empty".to_string(),
            });
        }

        Ok(self.insert(input, RecipientSource::Manual))
    }

    /// Imports standard-shape rows; every row becomes a recipient.
    ///
    /// Required-field validation is deferred to the step-transition gate, so
    /// incomplete rows import as pending entries the user can fix in place.
    pub fn bulk_import(&mut self, rows: Vec<ImportRow>) -> Vec<u64> {
        let ids = rows
            .into_iter()
            .map(|row| {
                self.insert(
                    RecipientInput {
                        name: row.name,
                        email: row.email,
                        phone: row.phone,
                        address: row.address,
                        tag: row.tag,
                    },
                    RecipientSource::Bulk,
                )
            })
            .collect::<Vec<_>>();
        debug!("Bulk import inserted {} recipients", ids.len());
        ids
    }

    /// Imports digital-gift rows, mapping them onto the standard shape.
    pub fn bulk_import_digital(&mut self, rows: Vec<DigitalImportRow>) -> Vec<u64> {
        let rows = rows
            .into_iter()
            .map(|row| ImportRow {
                name: format!("{} {}", row.first_name.trim(), row.last_name.trim())
                    .trim()
                    .to_string(),
                email: row.email,
                phone: String::new(),
                address: row.address.unwrap_or_default(),
                tag: row.company,
            })
            .collect();
        self.bulk_import(rows)
    }

    fn insert(&mut self, input: RecipientInput, source: RecipientSource) -> u64 {
        let is_duplicate = self.matches_existing(&input.name, &input.email);

        self.next_id += 1;
        let id = self.next_id;
        self.recipients.push(Recipient {
            id,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            address: input.address,
            tag: input.tag,
            source,
            included: true,
            is_duplicate,
            status: RecipientStatus::Pending,
        });
        id
    }

    /// Whether any existing entry shares the given name or email,
    /// case-insensitively. Empty fields never match.
    fn matches_existing(&self, name: &str, email: &str) -> bool {
        let name = name.trim();
        let email = email.trim();
        self.recipients.iter().any(|existing| {
            (!email.is_empty() && existing.email.eq_ignore_ascii_case(email))
                || (!name.is_empty() && existing.name.eq_ignore_ascii_case(name))
        })
    }

    /// Applies a field patch to a recipient.
    ///
    /// No validation happens here; required fields are checked by the
    /// step-transition gate. An unknown id is a logged no-op.
    pub fn edit(&mut self, id: u64, patch: RecipientPatch) {
        let Some(recipient) = self.recipients.iter_mut().find(|r| r.id == id) else {
            warn!("Edit ignored: recipient {id} not found");
            return;
        };

        if let Some(name) = patch.name {
            recipient.name = name;
        }
        if let Some(email) = patch.email {
            recipient.email = email;
        }
        if let Some(phone) = patch.phone {
            recipient.phone = phone;
        }
        if let Some(address) = patch.address {
            recipient.address = address;
        }
        if let Some(tag) = patch.tag {
            recipient.tag = tag;
        }
    }

    /// Removes a recipient. Returns whether an entry was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|recipient| recipient.id != id);
        before != self.recipients.len()
    }

    /// Sets whether a recipient counts toward gates and bulk assignment.
    ///
    /// Inclusion is independent of the derived status.
    pub fn toggle_inclusion(&mut self, id: u64, included: bool) {
        match self.recipients.iter_mut().find(|r| r.id == id) {
            Some(recipient) => recipient.included = included,
            None => warn!("Inclusion toggle ignored: recipient {id} not found"),
        }
    }

    /// Looks up a recipient by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Recipient> {
        self.recipients.iter().find(|recipient| recipient.id == id)
    }

    /// All recipients in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Recipient> {
        self.recipients.iter_mut()
    }

    /// Ids of all currently included recipients, in insertion order.
    #[must_use]
    pub fn included_ids(&self) -> Vec<u64> {
        self.recipients
            .iter()
            .filter(|recipient| recipient.included)
            .map(|recipient| recipient.id)
            .collect()
    }

    /// Number of recipients in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Drops every recipient.
    pub fn clear(&mut self) {
        self.recipients.clear();
    }
}
