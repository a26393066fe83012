//! # dna-manifest
//!
//! Document model for application manifests ("DNA"): named code modules
//! (zomes), their capability groups, their function declarations with ordered
//! typed inputs and outputs, and their embedded code.
//!
//! ## Overview
//!
//! - **Document model**: [`Dna`] and its nested [`dna::Zome`],
//!   [`dna::Capability`] and [`dna::FnDeclaration`] types.
//! - **Codec**: lossless JSON (and YAML) parsing and serialization; missing
//!   optional fields take documented defaults, unknown fields are ignored.
//! - **Queries**: ordered name listings per level
//!   (zomes -> capabilities -> functions -> parameters).
//! - **C boundary**: the [`ffi`] module exposes the same contract through an
//!   opaque handle with explicit release functions for every returned string
//!   and list.
//!
//! ## Quick Start
//!
//! ```rust
//! use dna_manifest::Dna;
//!
//! let name = String::from("My App");
//!
//! let mut dna = Dna::new();
//! dna.name = name.clone();
//!
//! let json = dna.to_json()?;
//!
//! let dna2 = Dna::from_json_str(&json)?;
//! assert_eq!(name, dna2.name);
//! # Ok::<(), dna_manifest::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dna`] | Document model, codec and structural queries |
//! | [`ffi`] | C-compatible handle API and ownership protocol |
//! | [`error`] | Crate-level error combining DNA failures with manifest file access |

pub mod dna;
pub mod ffi;

pub use dna::{
    Capability, Dna, DnaError, DnaField, FnDeclaration, FnParameter, ManifestFormat, Zome,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
