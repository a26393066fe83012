//! The top-level DNA document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use super::bridges::Bridge;
use super::capabilities::{Capability, FnDeclaration};
use super::entry_types::EntryTypeDef;
use super::error::DnaError;
use super::wasm::DnaWasm;
use super::zome::{empty_object, Zome};

/// Schema generation written into fresh documents and assumed when absent.
pub const DNA_SPEC_VERSION: &str = "2.0";

fn default_spec_version() -> String {
    DNA_SPEC_VERSION.to_string()
}

/// Represents the top-level DNA object.
///
/// Every field is optional on input; `{}` is a complete document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dna {
    /// The top-level "name" of the application.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// The semantic version of the application.
    #[serde(default)]
    pub version: String,

    /// A unique identifier to distinguish the application.
    #[serde(default)]
    pub uuid: String,

    /// Which generation of the DNA schema this document follows.
    #[serde(default = "default_spec_version")]
    pub dna_spec_version: String,

    /// Arbitrary application properties, passed through without interpretation.
    #[serde(default = "empty_object")]
    pub properties: serde_json::Value,

    /// Zomes keyed by name, in declared order.
    #[serde(default)]
    pub zomes: IndexMap<String, Zome>,
}

impl Default for Dna {
    /// All-defaults document, as produced by parsing `{}`.
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: String::new(),
            uuid: String::new(),
            dna_spec_version: default_spec_version(),
            properties: empty_object(),
            zomes: IndexMap::new(),
        }
    }
}

/// Scalar fields reachable through [`Dna::field`] and [`Dna::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnaField {
    Name,
    Description,
    Version,
    Uuid,
    DnaSpecVersion,
}

impl DnaField {
    pub const ALL: [DnaField; 5] = [
        DnaField::Name,
        DnaField::Description,
        DnaField::Version,
        DnaField::Uuid,
        DnaField::DnaSpecVersion,
    ];

    /// Key used for this field in the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Version => "version",
            Self::Uuid => "uuid",
            Self::DnaSpecVersion => "dna_spec_version",
        }
    }
}

impl fmt::Display for DnaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnaField {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DnaField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DnaError::UnknownField(s.to_string()))
    }
}

impl Dna {
    /// Create a fresh document: default scalars, a random v4 uuid and no zomes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dna_manifest::Dna;
    ///
    /// let dna = Dna::new();
    /// assert_eq!("", dna.name);
    /// assert_eq!("2.0", dna.dna_spec_version);
    /// ```
    pub fn new() -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    pub fn field(&self, field: DnaField) -> &str {
        match field {
            DnaField::Name => &self.name,
            DnaField::Description => &self.description,
            DnaField::Version => &self.version,
            DnaField::Uuid => &self.uuid,
            DnaField::DnaSpecVersion => &self.dna_spec_version,
        }
    }

    /// Replace a scalar field. Any text is accepted, including the empty string.
    pub fn set_field(&mut self, field: DnaField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DnaField::Name => self.name = value,
            DnaField::Description => self.description = value,
            DnaField::Version => self.version = value,
            DnaField::Uuid => self.uuid = value,
            DnaField::DnaSpecVersion => self.dna_spec_version = value,
        }
    }

    /// Insert or replace a zome. A replaced zome keeps its position.
    pub fn add_zome(&mut self, name: impl Into<String>, zome: Zome) -> Option<Zome> {
        self.zomes.insert(name.into(), zome)
    }

    /// Return a Zome
    pub fn get_zome(&self, zome_name: &str) -> Option<&Zome> {
        self.zomes.get(zome_name)
    }

    /// Like [`Dna::get_zome`], but an absent zome is an error.
    pub fn zome(&self, zome_name: &str) -> Result<&Zome, DnaError> {
        self.get_zome(zome_name)
            .ok_or_else(|| DnaError::zome_not_found(zome_name))
    }

    /// Return a Zome's Capability from a Zome and a Capability name.
    pub fn get_capability<'a>(
        &'a self,
        zome: &'a Zome,
        capability_name: &str,
    ) -> Option<&'a Capability> {
        zome.capabilities.get(capability_name)
    }

    /// Return a Function declaration from a Zome
    pub fn get_function<'a>(
        &'a self,
        zome: &'a Zome,
        function_name: &str,
    ) -> Option<&'a FnDeclaration> {
        zome.fn_declaration(function_name)
    }

    /// Return a Zome Function declaration from a Zome name and Function name.
    pub fn get_function_with_zome_name(
        &self,
        zome_name: &str,
        fn_name: &str,
    ) -> Result<&FnDeclaration, DnaError> {
        let zome = self.zome(zome_name)?;
        self.get_function(zome, fn_name)
            .ok_or_else(|| DnaError::ZomeFunctionNotFound {
                zome: zome_name.to_string(),
                function: fn_name.to_string(),
            })
    }

    /// Return a Zome's Capability from a Zome name and Capability name.
    pub fn get_capability_with_zome_name(
        &self,
        zome_name: &str,
        cap_name: &str,
    ) -> Result<&Capability, DnaError> {
        let zome = self.zome(zome_name)?;
        self.get_capability(zome, cap_name)
            .ok_or_else(|| DnaError::CapabilityNotFound {
                zome: zome_name.to_string(),
                capability: cap_name.to_string(),
            })
    }

    /// Find a Zome and return its code payload.
    pub fn get_wasm_from_zome_name(&self, zome_name: &str) -> Option<&DnaWasm> {
        self.get_zome(zome_name).map(|zome| &zome.code)
    }

    /// Name of the first zome (in declared order) defining `entry_type_name`.
    pub fn get_zome_name_for_app_entry_type(&self, entry_type_name: &str) -> Option<&str> {
        self.zomes
            .iter()
            .find(|(_, zome)| zome.entry_types.contains_key(entry_type_name))
            .map(|(zome_name, _)| zome_name.as_str())
    }

    /// Definition of an entry type, searched across zomes in declared order.
    pub fn get_entry_type_def(&self, entry_type_name: &str) -> Option<&EntryTypeDef> {
        self.zomes
            .values()
            .find_map(|zome| zome.entry_types.get(entry_type_name))
    }

    /// Required bridges of every zome, zome by zome.
    pub fn get_required_bridges(&self) -> Vec<&Bridge> {
        self.zomes
            .values()
            .flat_map(|zome| zome.get_required_bridges())
            .collect()
    }

    /// Lowercase hex SHA-256 of the compact JSON serialization.
    ///
    /// Two documents that serialize identically (same field values, same
    /// declared order) share a hash.
    pub fn content_hash(&self) -> Result<String, DnaError> {
        let canonical = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect())
    }
}
