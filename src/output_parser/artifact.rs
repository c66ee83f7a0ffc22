//! Structured design artifacts: color palettes and typography pairings.
//!
//! The model is asked for a bare JSON object holding a fixed-size list.
//! Parsing runs in three steps:
//!
//! 1. [`parse_payload`] peels one outer fence and decodes the JSON;
//! 2. a [`ShapeContract`] checks item count and required keys, producing
//!    messages that point at the offending item;
//! 3. serde deserializes the list into typed structs.

use super::error::{truncate, ParseError};
use super::extract::strip_outer_fence;
use crate::error::{CouncilError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The twelve color roles every palette must define.
pub const REQUIRED_COLORS: [&str; 12] = [
    "bg_primary",
    "bg_secondary",
    "bg_tertiary",
    "text_primary",
    "text_secondary",
    "text_tertiary",
    "accent_primary",
    "accent_secondary",
    "border_default",
    "border_focus",
    "success",
    "error",
];

/// Number of options generated per request.
pub const OPTIONS_PER_REQUEST: usize = 4;

/// A named set of UI colors, keyed by role (`bg_primary`, `error`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    #[serde(default)]
    pub weights: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// A display/body (and optional mono) font combination from Google Fonts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyPairing {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub display: FontSpec,
    pub body: FontSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mono: Option<FontSpec>,
    #[serde(default)]
    pub google_fonts_url: String,
}

/// Keys required inside an object-valued field of each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedKeys {
    /// The field holding the nested object (`"colors"`, `"display"`).
    pub parent: &'static str,
    pub keys: &'static [&'static str],
    /// Noun used in messages: `Some("color")` renders
    /// "Palette 3 (Name) missing color 'error'", `None` renders
    /// "Typography option 2 display missing 'family'".
    pub noun: Option<&'static str>,
}

/// Structural expectations for a list-of-options payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeContract {
    /// Used in error messages: "Invalid palette response: …".
    pub artifact: &'static str,
    /// Top-level key holding the list.
    pub collection_key: &'static str,
    /// Singular label for items in messages ("Palette", "Typography option").
    pub item_label: &'static str,
    /// Plural label for the count message ("palettes", "typography options").
    pub plural_label: &'static str,
    pub expected_items: usize,
    /// Keys every item must carry, checked in order.
    pub required_keys: &'static [&'static str],
    pub nested: &'static [NestedKeys],
}

impl ShapeContract {
    /// Four palettes, each with a name and the twelve [`REQUIRED_COLORS`].
    pub const PALETTES: ShapeContract = ShapeContract {
        artifact: "palette",
        collection_key: "palettes",
        item_label: "Palette",
        plural_label: "palettes",
        expected_items: OPTIONS_PER_REQUEST,
        required_keys: &["name", "colors"],
        nested: &[NestedKeys {
            parent: "colors",
            keys: &REQUIRED_COLORS,
            noun: Some("color"),
        }],
    };

    /// Four pairings, each with a name and display/body families.
    pub const TYPOGRAPHY: ShapeContract = ShapeContract {
        artifact: "typography",
        collection_key: "typography",
        item_label: "Typography option",
        plural_label: "typography options",
        expected_items: OPTIONS_PER_REQUEST,
        required_keys: &["name", "display", "body"],
        nested: &[
            NestedKeys {
                parent: "display",
                keys: &["family"],
                noun: None,
            },
            NestedKeys {
                parent: "body",
                keys: &["family"],
                noun: None,
            },
        ],
    };

    /// Every way `payload` breaks the contract, in item order then key order.
    ///
    /// A missing collection or a non-list collection is reported alone.
    pub fn violations(&self, payload: &Value) -> Vec<String> {
        let Some(collection) = payload.get(self.collection_key) else {
            return vec![format!("Response missing '{}' key", self.collection_key)];
        };
        let Some(items) = collection.as_array() else {
            return vec![format!(
                "Expected {} {}, got non-list",
                self.expected_items, self.plural_label
            )];
        };

        let mut violations = Vec::new();
        if items.len() != self.expected_items {
            violations.push(format!(
                "Expected {} {}, got {}",
                self.expected_items,
                self.plural_label,
                items.len()
            ));
        }
        for (index, item) in items.iter().enumerate() {
            self.check_item(index + 1, item, &mut violations);
        }
        violations
    }

    /// The first violation, if any.
    pub fn first_violation(&self, payload: &Value) -> Option<String> {
        self.violations(payload).into_iter().next()
    }

    fn check_item(&self, position: usize, item: &Value, out: &mut Vec<String>) {
        let label = self.item_label;
        let Some(fields) = item.as_object() else {
            out.push(format!("{} {} is not an object", label, position));
            return;
        };

        for key in self.required_keys {
            if !fields.contains_key(*key) {
                out.push(format!("{} {} missing '{}'", label, position, key));
            }
        }

        let name = fields.get("name").and_then(Value::as_str).unwrap_or("unnamed");
        for nested in self.nested {
            let Some(parent) = fields.get(nested.parent) else {
                continue;
            };
            let inner = parent.as_object();
            for key in nested.keys {
                if inner.is_some_and(|map| map.contains_key(*key)) {
                    continue;
                }
                out.push(match nested.noun {
                    Some(noun) => format!(
                        "{} {} ({}) missing {} '{}'",
                        label, position, name, noun, key
                    ),
                    None => format!(
                        "{} {} {} missing '{}'",
                        label, position, nested.parent, key
                    ),
                });
            }
        }
    }
}

/// Decode a JSON payload, tolerating one surrounding markdown fence.
pub fn parse_payload(text: &str, artifact: &'static str) -> std::result::Result<Value, ParseError> {
    let body = strip_outer_fence(text);
    if body.is_empty() {
        return Err(ParseError::EmptyResponse { artifact });
    }
    serde_json::from_str(body).map_err(|e| ParseError::InvalidPayload {
        artifact,
        reason: e.to_string(),
        text: truncate(body, 200),
    })
}

/// Decode, validate against `contract`, then deserialize the item list.
pub fn parse_artifacts<T: DeserializeOwned>(text: &str, contract: &ShapeContract) -> Result<Vec<T>> {
    let mut payload = parse_payload(text, contract.artifact)?;

    if let Some(reason) = contract.first_violation(&payload) {
        return Err(CouncilError::Validation {
            artifact: contract.artifact,
            reason,
        });
    }

    let items = payload
        .get_mut(contract.collection_key)
        .map(Value::take)
        .unwrap_or_default();
    Vec::<T>::deserialize(&items).map_err(|e| {
        CouncilError::Parse(ParseError::DeserializationFailed {
            reason: e.to_string(),
            raw_json: truncate(&items.to_string(), 500),
        })
    })
}

/// Parse the palette generator's answer.
pub fn parse_palettes(text: &str) -> Result<Vec<Palette>> {
    parse_artifacts(text, &ShapeContract::PALETTES)
}

/// Parse the typography generator's answer.
pub fn parse_typography(text: &str) -> Result<Vec<TypographyPairing>> {
    parse_artifacts(text, &ShapeContract::TYPOGRAPHY)
}
