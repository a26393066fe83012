//! DNA document model: the manifest of an application's zomes.
//!
//! # DNA Document Layer
//!
//! A DNA describes named code modules ("zomes"). Each zome groups function
//! names into capabilities, declares function signatures with ordered typed
//! inputs and outputs, and carries its code as opaque base64 text.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Root [`Dna`] type, scalar accessors and lookups |
//! | [`zome`] | [`Zome`] structure |
//! | [`capabilities`] | Capabilities, function declarations and parameters |
//! | [`entry_types`] | Entry type definitions and their link declarations |
//! | [`bridges`] | Dependencies on other DNAs |
//! | [`wasm`] | Zome code payload |
//! | [`codec`] | JSON / YAML parsing and serialization |
//! | [`query`] | Ordered name listings at each nesting level |
//! | [`error`] | DNA-specific error types |
//!
//! ## Example
//!
//! ```rust
//! use dna_manifest::dna::{Dna, DnaField};
//!
//! let mut dna = Dna::from_json_str(r#"{
//!     "name": "blog",
//!     "zomes": {
//!         "posts": {
//!             "capabilities": {"hc_public": {"functions": ["create_post"]}},
//!             "fn_declarations": [
//!                 {"name": "create_post", "inputs": [{"name": "content", "type": "string"}]}
//!             ]
//!         }
//!     }
//! }"#)?;
//!
//! assert_eq!(dna.zome_names(), vec!["posts"]);
//! assert_eq!(dna.parameter_names("posts", "create_post")?, vec!["content"]);
//!
//! dna.set_field(DnaField::Version, "0.1.0");
//! let json = dna.to_json()?;
//! assert_eq!(Dna::from_json_str(&json)?, dna);
//! # Ok::<(), dna_manifest::dna::DnaError>(())
//! ```

pub mod bridges;
pub mod capabilities;
pub mod codec;
pub mod document;
pub mod entry_types;
pub mod error;
pub mod query;
pub mod wasm;
pub mod zome;

pub use bridges::{Bridge, BridgePresence};
pub use capabilities::{Capability, FnDeclaration, FnParameter};
pub use codec::ManifestFormat;
pub use document::{Dna, DnaField, DNA_SPEC_VERSION};
pub use entry_types::{EntryTypeDef, LinkedFrom, LinksTo, Sharing};
pub use error::{DnaError, DnaErrorKind};
pub use wasm::DnaWasm;
pub use zome::Zome;
