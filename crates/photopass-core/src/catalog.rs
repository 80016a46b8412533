//! Static catalog of document photo requirements.
//!
//! Each entry is keyed by `(country code, document type key)` and carries the
//! physical print size, the permitted head-height range, the background color
//! the photo must be normalized to, and the ordered list of rules the oracle
//! scores against.
//!
//! The catalog is immutable `static` data: it can be shared by any number of
//! concurrent sessions without locking. A missing entry is always an error;
//! there is no fallback size, because a wrong aspect ratio silently produces
//! a non-compliant document.
//!
//! # Key normalization
//!
//! - Country codes match ASCII case-insensitively (`"gb"` == `"GB"`).
//! - Document type keys are trimmed, lower-cased, and runs of whitespace or
//!   `-` collapse to a single `_` (`"Passport Visa"` == `"passport_visa"`).

use serde::Serialize;
use thiserror::Error;

/// Error returned by [`lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No requirements exist for this country/document pair.
    #[error("no photo requirements for country '{country}' and document type '{document_type}'")]
    NotFound {
        country: String,
        document_type: String,
    },
}

/// Inclusive head-height range as a percentage of photo height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

impl PercentRange {
    /// True if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Physical, geometric and compositional rules for one document type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRequirements {
    /// Display name of the document type.
    pub name: &'static str,
    /// Physical print width in millimetres. Only the ratio to height matters.
    pub width_mm: u32,
    /// Physical print height in millimetres.
    pub height_mm: u32,
    /// Permitted head height, percent of photo height.
    pub head_height_percent: PercentRange,
    /// Background color description handed to the oracle.
    pub background_color: &'static str,
    /// Ordered compliance rules handed to the oracle.
    pub rules: &'static [&'static str],
}

impl DocumentRequirements {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm as f64 / self.height_mm as f64
    }

    /// Output pixel dimensions for a fixed `base_width`.
    ///
    /// Height is `base_width * height / width`, truncated to whole pixels
    /// the way a canvas truncates a fractional height. Both axes are at
    /// least 1.
    pub fn output_dimensions(&self, base_width: u32) -> (u32, u32) {
        let width = base_width.max(1);
        let height = u64::from(width) * u64::from(self.height_mm) / u64::from(self.width_mm.max(1));
        (width, u32::try_from(height).unwrap_or(u32::MAX).max(1))
    }
}

/// One document type offered for a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentType {
    /// Normalized lookup key (e.g. `passport`, `visa`, `passport_visa`).
    pub key: &'static str,
    pub requirements: DocumentRequirements,
}

/// A country and the document types the catalog knows for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    pub name: &'static str,
    document_types: &'static [DocumentType],
}

impl Country {
    pub fn document_types(&self) -> impl Iterator<Item = &'static DocumentType> {
        self.document_types.iter()
    }
}

const US_RULES: &[&str] = &[
    "Neutral facial expression with both eyes open.",
    "Face camera directly with full face in view.",
    "No shadows on face or in background.",
    "No glasses.",
    "No head coverings, except for religious reasons.",
];

const GB_RULES: &[&str] = &[
    "Neutral expression and mouth closed.",
    "Nothing covering the face.",
    "No shadows on the face or behind you.",
    "No red-eye.",
];

const CA_PASSPORT_RULES: &[&str] = &[
    "Neutral facial expression (eyes open and clearly visible, mouth closed).",
    "No smiling or frowning.",
    "Uniform lighting and no shadows, glare or flash reflections.",
    "Face and shoulders centered and squared to the camera.",
];

const CA_VISA_RULES: &[&str] = &[
    "Neutral facial expression, mouth closed.",
    "The face must be square to the camera with a neutral expression, neither frowning nor smiling, with the mouth closed.",
    "No shadows on the face or in the background.",
];

const AU_RULES: &[&str] = &[
    "Good quality, colour, glossy prints, less than six months old.",
    "No shadows on the face or background.",
    "Neutral expression with the mouth closed.",
    "Eyes open, no hair across the eyes.",
];

const CN_PASSPORT_RULES: &[&str] = &[
    "Recent photo taken within 6 months.",
    "Neutral expression, eyes open, mouth closed.",
    "Ears must be visible.",
    "No eyeglasses.",
];

const CN_VISA_RULES: &[&str] = &[
    "The photo must be in color.",
    "Head should be centered.",
    "No jewelry that obstructs the face.",
];

const IN_RULES: &[&str] = &[
    "Photo should be in color.",
    "Front view, full face, eyes open.",
    "Head should be in the center of the frame.",
    "No shadows on the face or in the background.",
];

const DE_RULES: &[&str] = &[
    "The face must be evenly illuminated.",
    "The head must be centered in the photo.",
    "A neutral facial expression is required.",
    "The mouth must be closed.",
];

const JP_RULES: &[&str] = &[
    "No shadows on face or background.",
    "The applicant should be facing forward.",
    "The photo must have been taken within the last 6 months.",
    "Plain background with no patterns.",
];

const fn requirements(
    name: &'static str,
    width_mm: u32,
    height_mm: u32,
    head: (f64, f64),
    background_color: &'static str,
    rules: &'static [&'static str],
) -> DocumentRequirements {
    DocumentRequirements {
        name,
        width_mm,
        height_mm,
        head_height_percent: PercentRange {
            min: head.0,
            max: head.1,
        },
        background_color,
        rules,
    }
}

static COUNTRIES: &[Country] = &[
    Country {
        code: "US",
        name: "United States",
        document_types: &[DocumentType {
            key: "passport_visa",
            requirements: requirements(
                "Passport & Visa Photo (2x2 inch)",
                51,
                51,
                (50.0, 69.0),
                "white or off-white",
                US_RULES,
            ),
        }],
    },
    Country {
        code: "GB",
        name: "United Kingdom",
        document_types: &[DocumentType {
            key: "passport",
            requirements: requirements(
                "Passport Photo (35x45 mm)",
                35,
                45,
                (63.0, 75.0),
                "light grey or cream",
                GB_RULES,
            ),
        }],
    },
    Country {
        code: "CA",
        name: "Canada",
        document_types: &[
            DocumentType {
                key: "passport",
                requirements: requirements(
                    "Passport Photo (50x70 mm)",
                    50,
                    70,
                    (44.0, 51.0),
                    "plain white or light-coloured",
                    CA_PASSPORT_RULES,
                ),
            },
            DocumentType {
                key: "visa",
                requirements: requirements(
                    "Visa Photo (35x45 mm)",
                    35,
                    45,
                    (68.0, 78.0),
                    "plain white",
                    CA_VISA_RULES,
                ),
            },
        ],
    },
    Country {
        code: "AU",
        name: "Australia",
        document_types: &[DocumentType {
            key: "passport",
            requirements: requirements(
                "Passport Photo (35x45 mm)",
                35,
                45,
                (71.0, 80.0),
                "plain, light coloured background (e.g. white, cream or pale grey)",
                AU_RULES,
            ),
        }],
    },
    Country {
        code: "CN",
        name: "China",
        document_types: &[
            DocumentType {
                key: "passport",
                requirements: requirements(
                    "Passport Photo (33x48 mm)",
                    33,
                    48,
                    (58.0, 75.0),
                    "white",
                    CN_PASSPORT_RULES,
                ),
            },
            DocumentType {
                key: "visa",
                requirements: requirements(
                    "Visa Photo (33x48 mm)",
                    33,
                    48,
                    (58.0, 75.0),
                    "white",
                    CN_VISA_RULES,
                ),
            },
        ],
    },
    Country {
        code: "IN",
        name: "India",
        document_types: &[DocumentType {
            key: "passport_visa",
            requirements: requirements(
                "Passport & Visa Photo (2x2 inch)",
                51,
                51,
                (60.0, 70.0),
                "plain white",
                IN_RULES,
            ),
        }],
    },
    Country {
        code: "DE",
        name: "Germany",
        document_types: &[DocumentType {
            key: "passport_visa",
            requirements: requirements(
                "Passport & Visa Photo (35x45 mm)",
                35,
                45,
                (71.0, 80.0),
                "light grey",
                DE_RULES,
            ),
        }],
    },
    Country {
        code: "JP",
        name: "Japan",
        document_types: &[DocumentType {
            key: "passport_visa",
            requirements: requirements(
                "Passport & Visa Photo (35x45 mm)",
                35,
                45,
                (71.0, 80.0),
                "white or light blue",
                JP_RULES,
            ),
        }],
    },
];

/// All countries in the catalog, in display order.
pub fn countries() -> &'static [Country] {
    COUNTRIES
}

/// Look up the requirements for a country and document type.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when either the country or the document
/// type is unknown.
pub fn lookup(
    country_code: &str,
    document_type: &str,
) -> Result<&'static DocumentRequirements, CatalogError> {
    let key = normalize_key(document_type);
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(country_code.trim()))
        .and_then(|c| c.document_types.iter().find(|d| d.key == key))
        .map(|d| &d.requirements)
        .ok_or_else(|| CatalogError::NotFound {
            country: country_code.to_string(),
            document_type: document_type.to_string(),
        })
}

/// Normalize a document type key: trim, lower-case, and collapse runs of
/// whitespace or `-` into `_`.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !key.is_empty() {
            key.push('_');
        }
        pending_sep = false;
        key.extend(ch.to_lowercase());
    }
    key
}
