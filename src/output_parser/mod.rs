//! # Response Extractor
//!
//! Turns raw API envelopes and free-form model text into typed values.
//! Handles missing envelope levels, markdown fences, labelled sections and
//! fixed-shape JSON payloads without another model call.
//!
//! ## Functions Available
//!
//! | Function | Use Case |
//! |----------|----------|
//! | [`extract()`] | Envelope → [`ParsedResult`](crate::types::ParsedResult) |
//! | [`extract_code_blocks`] | Every fenced block with its language |
//! | [`extract_reasoning`] | Body of a reasoning/explanation section |
//! | [`extract_imports`] | `import` lines |
//! | [`parse_structured_output`] | Components, styles, utilities, imports |
//! | [`estimate_lines_of_code`] | Line count across fenced blocks |
//! | [`parse_payload`] | Fence-tolerant JSON decoding |
//! | [`parse_palettes`] | Validated [`Palette`] list |
//! | [`parse_typography`] | Validated [`TypographyPairing`] list |

pub mod artifact;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod sections;

pub use artifact::{
    parse_artifacts, parse_palettes, parse_payload, parse_typography, FontSpec, NestedKeys,
    Palette, ShapeContract, TypographyPairing, REQUIRED_COLORS,
};
pub use envelope::extract;
pub use error::ParseError;
pub use extract::{estimate_lines_of_code, extract_code_blocks, strip_outer_fence};
pub use sections::{
    extract_imports, extract_reasoning, extract_utilities, parse_structured_output,
    structure_text,
};
