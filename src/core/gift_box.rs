//! Gift-box aggregate: gift lines and personalization.
//!
//! A `GiftBox` is one selected box in the cart: a base price, an ordered list
//! of gift lines resolved from the catalog, and per-axis personalization
//! selections whose combined cost is refolded on every change. Boxes created
//! through the build-your-own packaging flow carry a capacity ceiling on the
//! total gift-line quantity; plain catalog selections carry none.

use crate::core::catalog::{BoxPreset, GiftItem};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a box entered the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    /// Selected from the preset catalog
    Preset,
    /// Built from scratch
    Custom,
}

/// One priced gift inside a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftLine {
    /// Catalog identifier of the gift
    pub gift_id: String,
    /// Display name captured at add time
    pub name: String,
    /// Unit price captured at add time
    pub unit_price: f64,
    /// Quantity ordered; a line never exists at zero
    pub quantity: u32,
}

/// An independently priced customization choice for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOption {
    /// Display name of the option (e.g., "Satin Red")
    pub name: String,
    /// Price delta in dollars; free defaults are 0.0
    pub price: f64,
}

impl PricedOption {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Per-axis personalization selections and their derived combined cost.
///
/// Axes are replaced, never cleared: "no upgrade" is a zero-priced option.
/// `add_ons_cost` is recomputed by a single fold over the selected axes every
/// time any one axis changes, never only at an explicit save step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personalization {
    /// Ribbon color choice
    pub ribbon_color: Option<PricedOption>,
    /// Ribbon style choice
    pub ribbon_style: Option<PricedOption>,
    /// Card or tag style choice
    pub card_style: Option<PricedOption>,
    /// Packaging type choice
    pub packaging: Option<PricedOption>,
    /// Free-text gift message; carries no price
    pub message: Option<String>,
    /// Derived: sum of all selected option prices
    pub add_ons_cost: f64,
}

impl Personalization {
    /// All currently selected options across the axes.
    #[must_use]
    pub fn selected_add_ons(&self) -> Vec<&PricedOption> {
        [
            self.ribbon_color.as_ref(),
            self.ribbon_style.as_ref(),
            self.card_style.as_ref(),
            self.packaging.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Refolds `add_ons_cost` from the selected axes.
    fn refold_cost(&mut self) {
        self.add_ons_cost = self
            .selected_add_ons()
            .iter()
            .map(|option| option.price)
            .sum();
    }
}

/// A partial personalization change; `None` axes are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationUpdate {
    /// Replace the ribbon color selection
    pub ribbon_color: Option<PricedOption>,
    /// Replace the ribbon style selection
    pub ribbon_style: Option<PricedOption>,
    /// Replace the card or tag style selection
    pub card_style: Option<PricedOption>,
    /// Replace the packaging selection
    pub packaging: Option<PricedOption>,
    /// Replace the gift message
    pub message: Option<String>,
}

/// One selected box and everything priced inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftBox {
    /// Cart-local identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Preset or custom origin
    pub kind: BoxKind,
    /// Physical size label
    pub size: Option<String>,
    /// Visual theme
    pub theme: Option<String>,
    /// Price before gift lines and add-ons
    pub base_price: f64,
    /// Ordered gift lines; a quantity of zero removes a line
    pub gift_lines: Vec<GiftLine>,
    /// Personalization selections and their derived cost
    pub personalization: Personalization,
    /// Maximum total gift-line quantity, if this box is capacity-bound
    pub capacity: Option<u32>,
}

impl GiftBox {
    /// Creates a box from a catalog preset.
    #[must_use]
    pub fn from_preset(id: u64, preset: &BoxPreset) -> Self {
        Self {
            id,
            name: preset.name.clone(),
            kind: BoxKind::Preset,
            size: preset.size.clone(),
            theme: preset.theme.clone(),
            base_price: preset.base_price,
            gift_lines: Vec::new(),
            personalization: Personalization::default(),
            capacity: preset.capacity,
        }
    }

    /// Creates a box built from scratch.
    #[must_use]
    pub fn custom(
        id: u64,
        name: impl Into<String>,
        base_price: f64,
        size: Option<String>,
        theme: Option<String>,
        capacity: Option<u32>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: BoxKind::Custom,
            size,
            theme,
            base_price,
            gift_lines: Vec::new(),
            personalization: Personalization::default(),
            capacity,
        }
    }

    /// Total quantity across all gift lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.gift_lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds, updates, or removes one gift line.
    ///
    /// A `quantity` of zero removes the line entirely. For capacity-bound
    /// boxes the call is rejected with [`Error::CapacityExceeded`] when the
    /// resulting total quantity would exceed the ceiling; a rejected call
    /// changes nothing.
    pub fn apply_gift_line(&mut self, item: &GiftItem, quantity: u32) -> Result<()> {
        let existing = self
            .gift_lines
            .iter()
            .position(|line| line.gift_id == item.id);

        if quantity == 0 {
            if let Some(index) = existing {
                self.gift_lines.remove(index);
            }
            return Ok(());
        }

        // All-or-nothing: check the would-be total before touching any line
        if let Some(capacity) = self.capacity {
            let current_line_quantity = existing.map_or(0, |index| self.gift_lines[index].quantity);
            let attempted = self.total_quantity() - current_line_quantity + quantity;
            if attempted > capacity {
                return Err(Error::CapacityExceeded {
                    capacity,
                    attempted,
                });
            }
        }

        if let Some(index) = existing {
            self.gift_lines[index].quantity = quantity;
        } else {
            self.gift_lines.push(GiftLine {
                gift_id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity,
            });
        }

        Ok(())
    }

    /// Replaces one or more personalization axes and refolds the add-on cost.
    pub fn set_personalization(&mut self, update: PersonalizationUpdate) {
        let personalization = &mut self.personalization;

        if let Some(option) = update.ribbon_color {
            personalization.ribbon_color = Some(option);
        }
        if let Some(option) = update.ribbon_style {
            personalization.ribbon_style = Some(option);
        }
        if let Some(option) = update.card_style {
            personalization.card_style = Some(option);
        }
        if let Some(option) = update.packaging {
            personalization.packaging = Some(option);
        }
        if let Some(message) = update.message {
            personalization.message = Some(message);
        }

        personalization.refold_cost();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_catalog, sample_gift};

    #[test]
    fn test_apply_gift_line_upserts() -> Result<()> {
        let mut gift_box = GiftBox::custom(1, "Test Box", 20.0, None, None, None);
        let cocoa = sample_gift("cocoa-trio");

        gift_box.apply_gift_line(&cocoa, 2)?;
        assert_eq!(gift_box.gift_lines.len(), 1);
        assert_eq!(gift_box.gift_lines[0].quantity, 2);
        assert_eq!(gift_box.gift_lines[0].unit_price, 18.5);

        // Updating the same gift replaces the quantity, not appends a line
        gift_box.apply_gift_line(&cocoa, 4)?;
        assert_eq!(gift_box.gift_lines.len(), 1);
        assert_eq!(gift_box.gift_lines[0].quantity, 4);

        Ok(())
    }

    #[test]
    fn test_zero_quantity_removes_line() -> Result<()> {
        let mut gift_box = GiftBox::custom(1, "Test Box", 20.0, None, None, None);
        let cocoa = sample_gift("cocoa-trio");

        gift_box.apply_gift_line(&cocoa, 3)?;
        gift_box.apply_gift_line(&cocoa, 0)?;

        // The line is gone, not stored at zero
        assert!(gift_box.gift_lines.is_empty());

        Ok(())
    }

    #[test]
    fn test_capacity_rejection_is_all_or_nothing() -> Result<()> {
        let catalog = sample_catalog();
        let preset = catalog.preset("build-your-own-small").unwrap();
        let mut gift_box = GiftBox::from_preset(1, preset);
        let cocoa = sample_gift("cocoa-trio");
        let socks = sample_gift("wool-socks");

        // Two lines at 3 + 2 fill the capacity of 5 exactly
        gift_box.apply_gift_line(&cocoa, 3)?;
        gift_box.apply_gift_line(&socks, 2)?;
        assert_eq!(gift_box.total_quantity(), 5);

        // One more on either line is rejected and nothing changes
        let result = gift_box.apply_gift_line(&cocoa, 4);
        assert!(matches!(
            result.unwrap_err(),
            Error::CapacityExceeded {
                capacity: 5,
                attempted: 6
            }
        ));
        assert_eq!(gift_box.total_quantity(), 5);
        assert_eq!(gift_box.gift_lines[0].quantity, 3);

        Ok(())
    }

    #[test]
    fn test_replacing_line_within_capacity_is_allowed() -> Result<()> {
        let catalog = sample_catalog();
        let preset = catalog.preset("build-your-own-small").unwrap();
        let mut gift_box = GiftBox::from_preset(1, preset);
        let cocoa = sample_gift("cocoa-trio");

        gift_box.apply_gift_line(&cocoa, 5)?;
        // Same line back down to 2 must not be counted against itself
        gift_box.apply_gift_line(&cocoa, 2)?;
        assert_eq!(gift_box.total_quantity(), 2);

        Ok(())
    }

    #[test]
    fn test_preset_box_has_no_ceiling() -> Result<()> {
        let catalog = sample_catalog();
        let preset = catalog.preset("holiday-classic").unwrap();
        let mut gift_box = GiftBox::from_preset(1, preset);
        let cocoa = sample_gift("cocoa-trio");

        gift_box.apply_gift_line(&cocoa, 100)?;
        assert_eq!(gift_box.total_quantity(), 100);

        Ok(())
    }

    #[test]
    fn test_add_ons_cost_refolds_on_every_change() {
        let mut gift_box = GiftBox::custom(1, "Test Box", 20.0, None, None, None);

        gift_box.set_personalization(PersonalizationUpdate {
            ribbon_color: Some(PricedOption::new("Satin Red", 2.5)),
            ..Default::default()
        });
        assert_eq!(gift_box.personalization.add_ons_cost, 2.5);

        gift_box.set_personalization(PersonalizationUpdate {
            packaging: Some(PricedOption::new("Premium Crate", 6.0)),
            ..Default::default()
        });
        // Cost is the fold over all selected axes, not just the last change
        assert_eq!(gift_box.personalization.add_ons_cost, 8.5);

        // Replacing an axis swaps its contribution
        gift_box.set_personalization(PersonalizationUpdate {
            ribbon_color: Some(PricedOption::new("Standard", 0.0)),
            ..Default::default()
        });
        assert_eq!(gift_box.personalization.add_ons_cost, 6.0);
    }

    #[test]
    fn test_untouched_axes_are_preserved() {
        let mut gift_box = GiftBox::custom(1, "Test Box", 20.0, None, None, None);

        gift_box.set_personalization(PersonalizationUpdate {
            card_style: Some(PricedOption::new("Letterpress", 3.0)),
            message: Some("Happy holidays!".to_string()),
            ..Default::default()
        });
        gift_box.set_personalization(PersonalizationUpdate {
            ribbon_style: Some(PricedOption::new("Double Bow", 1.5)),
            ..Default::default()
        });

        let personalization = &gift_box.personalization;
        assert_eq!(personalization.card_style.as_ref().unwrap().name, "Letterpress");
        assert_eq!(personalization.message.as_deref(), Some("Happy holidays!"));
        assert_eq!(personalization.add_ons_cost, 4.5);
    }
}
