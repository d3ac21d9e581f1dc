//! Vendor catalog configuration.
//!
//! Vendors impose lead times, fixed pickup days, and minimum-order-quantity
//! case rounding. Like the formulation table this is init-only process state,
//! loaded from a JSON document at startup.

use std::collections::HashMap;
use std::path::Path;

use chrono::Weekday;
use serde::Deserialize;

/// A supplier the purchase-order generator can order from.
#[derive(Debug, Clone)]
pub struct Vendor {
    pub name: String,
    /// Destination for sent purchase orders. A vendor without a contact
    /// cannot receive POs; persistence validates this up front.
    pub contact_email: Option<String>,
    /// Days before the cook date the ingredients must be on hand.
    pub lead_time_days: u32,
    /// Scheduled weekly pickup day.
    pub pickup_weekday: Weekday,
    /// Default case size in pounds; order quantities round up to a multiple.
    pub moq_increment_lbs: f64,
    /// Per-ingredient case-size overrides, keyed by exact ingredient name.
    pub ingredient_moq_lbs: HashMap<String, f64>,
}

impl Vendor {
    /// The MOQ case increment for an ingredient, falling back to the
    /// vendor-wide default.
    #[must_use]
    pub fn moq_for(&self, ingredient_name: &str) -> f64 {
        self.ingredient_moq_lbs
            .get(ingredient_name)
            .copied()
            .unwrap_or(self.moq_increment_lbs)
    }
}

/// On-disk shape of one vendor entry.
#[derive(Debug, Deserialize)]
struct VendorEntry {
    name: String,
    #[serde(default)]
    contact_email: Option<String>,
    lead_time_days: u32,
    /// Weekday name, e.g. "monday" or "mon".
    pickup_weekday: String,
    moq_increment_lbs: f64,
    #[serde(default)]
    ingredient_moq_lbs: HashMap<String, f64>,
}

/// On-disk shape of the vendors document.
#[derive(Debug, Deserialize)]
struct VendorFile {
    vendors: Vec<VendorEntry>,
}

/// Errors loading the vendor table.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("failed to read vendors file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse vendors file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("vendor {vendor}: invalid pickup weekday {value:?}")]
    InvalidWeekday { vendor: String, value: String },

    #[error("duplicate vendor name: {0}")]
    DuplicateVendor(String),

    #[error("vendors file contains no vendors")]
    Empty,
}

/// Keyed lookup of vendors. The first vendor listed is the primary supplier
/// used when a purchase order does not name one.
#[derive(Debug, Clone)]
pub struct VendorTable {
    vendors: HashMap<String, Vendor>,
    primary: String,
}

impl VendorTable {
    /// Load the table from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `VendorError` if the file cannot be read or parsed, is empty,
    /// names a duplicate vendor, or contains an unparseable pickup weekday.
    pub fn load(path: &Path) -> Result<Self, VendorError> {
        let display_path = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| VendorError::Io {
            path: display_path.clone(),
            source,
        })?;
        let file: VendorFile =
            serde_json::from_str(&raw).map_err(|source| VendorError::Parse {
                path: display_path,
                source,
            })?;

        Self::from_entries(file.vendors)
    }

    fn from_entries(entries: Vec<VendorEntry>) -> Result<Self, VendorError> {
        let Some(first) = entries.first() else {
            return Err(VendorError::Empty);
        };
        let primary = first.name.clone();

        let mut vendors = HashMap::with_capacity(entries.len());
        for entry in entries {
            let pickup_weekday =
                entry
                    .pickup_weekday
                    .parse::<Weekday>()
                    .map_err(|_| VendorError::InvalidWeekday {
                        vendor: entry.name.clone(),
                        value: entry.pickup_weekday.clone(),
                    })?;
            let vendor = Vendor {
                name: entry.name.clone(),
                contact_email: entry.contact_email,
                lead_time_days: entry.lead_time_days,
                pickup_weekday,
                moq_increment_lbs: entry.moq_increment_lbs,
                ingredient_moq_lbs: entry.ingredient_moq_lbs,
            };
            if vendors.insert(entry.name.clone(), vendor).is_some() {
                return Err(VendorError::DuplicateVendor(entry.name));
            }
        }

        Ok(Self { vendors, primary })
    }

    /// Build a table from in-memory vendors (used by tests and seeds).
    ///
    /// # Errors
    ///
    /// Returns `VendorError::Empty` if the list is empty, or
    /// `VendorError::DuplicateVendor` on a repeated name.
    pub fn from_vendors(list: Vec<Vendor>) -> Result<Self, VendorError> {
        let Some(first) = list.first() else {
            return Err(VendorError::Empty);
        };
        let primary = first.name.clone();

        let mut vendors = HashMap::with_capacity(list.len());
        for vendor in list {
            let name = vendor.name.clone();
            if vendors.insert(name.clone(), vendor).is_some() {
                return Err(VendorError::DuplicateVendor(name));
            }
        }

        Ok(Self { vendors, primary })
    }

    /// Look up a vendor by name, or the primary supplier when `None`.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> Option<&Vendor> {
        match name {
            Some(n) => self.vendors.get(n),
            None => self.vendors.get(&self.primary),
        }
    }

    /// The primary supplier's name.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        &self.primary
    }
}
