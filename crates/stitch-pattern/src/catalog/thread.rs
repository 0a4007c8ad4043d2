//! Thread records and catalog entries.

use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_lab, Lab, Rgb};

/// A catalog record as supplied by the catalog source.
///
/// `lab` is optional; when absent it is computed from `rgb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadRecord {
    /// Unique identifier, e.g. `dmc_310`
    pub id: String,
    /// Brand name, e.g. `DMC`
    pub brand: String,
    /// Brand-specific color code, e.g. `310`
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Thread color
    pub rgb: Rgb,
    /// Precomputed CIELAB coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<Lab>,
}

/// An embroidery thread in the catalog.
///
/// Immutable once loaded. The Lab coordinates are either the catalog's own
/// or derived from the RGB value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thread {
    id: String,
    brand: String,
    code: String,
    name: String,
    rgb: Rgb,
    lab: Lab,
}

impl Thread {
    /// Create a thread, deriving Lab from RGB.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        rgb: Rgb,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            code: code.into(),
            name: name.into(),
            rgb,
            lab: rgb_to_lab(rgb),
        }
    }

    /// Unique identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Brand name.
    #[inline]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Brand-specific code.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Thread color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Thread color in CIELAB.
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }
}

impl From<ThreadRecord> for Thread {
    fn from(record: ThreadRecord) -> Self {
        let lab = record.lab.unwrap_or_else(|| rgb_to_lab(record.rgb));
        Self {
            id: record.id,
            brand: record.brand,
            code: record.code,
            name: record.name,
            rgb: record.rgb,
            lab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_lab_is_derived() {
        let record = ThreadRecord {
            id: "dmc_blanc".to_string(),
            brand: "DMC".to_string(),
            code: "BLANC".to_string(),
            name: "White".to_string(),
            rgb: Rgb::new(255, 255, 255),
            lab: None,
        };
        let thread = Thread::from(record);
        assert!((thread.lab().l - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_record_lab_is_kept() {
        let record = ThreadRecord {
            id: "x".to_string(),
            brand: "DMC".to_string(),
            code: "1".to_string(),
            name: String::new(),
            rgb: Rgb::new(10, 10, 10),
            lab: Some(Lab::new(1.0, 2.0, 3.0)),
        };
        assert_eq!(Thread::from(record).lab(), Lab::new(1.0, 2.0, 3.0));
    }
}
