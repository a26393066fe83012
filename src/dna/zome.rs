//! An individual zome: one code module of a DNA.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::bridges::Bridge;
use super::capabilities::{Capability, FnDeclaration};
use super::entry_types::EntryTypeDef;
use super::wasm::DnaWasm;

/// serde helper, provides a default empty object
pub(crate) fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Represents an individual "zome".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zome {
    #[serde(default)]
    pub description: String,

    /// Zome configuration, passed through without interpretation.
    #[serde(default = "empty_object")]
    pub config: serde_json::Value,

    /// Entry type definitions keyed by entry type name, in declared order.
    #[serde(default)]
    pub entry_types: IndexMap<String, EntryTypeDef>,

    /// Capabilities keyed by name, in declared order.
    #[serde(default)]
    pub capabilities: IndexMap<String, Capability>,

    /// Function signatures in declared order.
    #[serde(default)]
    pub fn_declarations: Vec<FnDeclaration>,

    #[serde(default)]
    pub code: DnaWasm,

    /// Other DNAs this zome calls into.
    #[serde(default)]
    pub bridges: Vec<Bridge>,
}

impl Default for Zome {
    fn default() -> Self {
        Self {
            description: String::new(),
            config: empty_object(),
            entry_types: IndexMap::new(),
            capabilities: IndexMap::new(),
            fn_declarations: Vec::new(),
            code: DnaWasm::new(),
            bridges: Vec::new(),
        }
    }
}

impl Zome {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Insert or replace a capability. A replaced capability keeps its position.
    pub fn with_capability(mut self, name: impl Into<String>, capability: Capability) -> Self {
        self.capabilities.insert(name.into(), capability);
        self
    }

    /// Insert or replace an entry type definition.
    pub fn with_entry_type(mut self, name: impl Into<String>, entry_type: EntryTypeDef) -> Self {
        self.entry_types.insert(name.into(), entry_type);
        self
    }

    pub fn with_bridge(mut self, bridge: Bridge) -> Self {
        self.bridges.push(bridge);
        self
    }

    pub fn with_fn_declaration(mut self, declaration: FnDeclaration) -> Self {
        self.fn_declarations.push(declaration);
        self
    }

    pub fn with_code(mut self, code: DnaWasm) -> Self {
        self.code = code;
        self
    }

    pub fn get_required_bridges(&self) -> Vec<&Bridge> {
        self.bridges
            .iter()
            .filter(|bridge| bridge.is_required())
            .collect()
    }

    /// First declaration named `function_name`.
    pub fn fn_declaration(&self, function_name: &str) -> Option<&FnDeclaration> {
        self.fn_declarations
            .iter()
            .find(|decl| decl.name == function_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::bridges::BridgePresence;
    use crate::dna::entry_types::Sharing;
    use serde_json::json;

    #[test]
    fn build_and_compare() {
        let fixture: Zome = serde_json::from_str(
            r#"{
                "description": "test",
                "config": {
                    "error_handling": "throw-errors"
                },
                "entry_types": {
                    "post": {
                        "description": "blog post",
                        "sharing": "public"
                    }
                },
                "capabilities": {
                    "hc_public": {
                        "functions": ["test"]
                    }
                },
                "fn_declarations": [
                    {
                        "name": "test",
                        "inputs": [],
                        "outputs": []
                    }
                ],
                "code": {
                    "code": "AAECAw=="
                },
                "bridges": [
                    {"presence": "optional", "handle": "DPKI"}
                ]
            }"#,
        )
        .unwrap();

        let mut zome = Zome::new("test")
            .with_entry_type("post", EntryTypeDef::new("blog post", Sharing::Public))
            .with_bridge(Bridge::new(BridgePresence::Optional, "DPKI"))
            .with_capability("hc_public", Capability::new(["test"]))
            .with_fn_declaration(FnDeclaration::new("test"))
            .with_code(DnaWasm::from_bytes(&[0, 1, 2, 3]));
        zome.config = json!({"error_handling": "throw-errors"});

        assert_eq!(fixture, zome);
    }

    #[test]
    fn empty_zome_gets_defaults() {
        let zome: Zome = serde_json::from_str("{}").unwrap();
        assert_eq!(zome, Zome::default());
        assert_eq!(zome.config, json!({}));
    }

    #[test]
    fn fn_declaration_lookup_prefers_first_match() {
        let zome = Zome::default()
            .with_fn_declaration(FnDeclaration::new("dup").with_input("first", "u8"))
            .with_fn_declaration(FnDeclaration::new("dup").with_input("second", "u8"));
        let decl = zome.fn_declaration("dup").unwrap();
        assert_eq!(decl.inputs[0].name, "first");
        assert!(zome.fn_declaration("absent").is_none());
    }

    #[test]
    fn capability_keys_keep_declared_order() {
        let zome: Zome = serde_json::from_str(
            r#"{"capabilities": {"zeta": {}, "alpha": {}, "mid": {}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = zome.capabilities.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn required_bridges_skip_optional_ones() {
        let zome = Zome::default()
            .with_bridge(Bridge::new(BridgePresence::Required, "Vault"))
            .with_bridge(Bridge::new(BridgePresence::Optional, "DPKI"))
            .with_bridge(Bridge::new(BridgePresence::Required, "Blog"));
        let handles: Vec<&str> = zome
            .get_required_bridges()
            .into_iter()
            .map(|bridge| bridge.handle.as_str())
            .collect();
        assert_eq!(handles, vec!["Vault", "Blog"]);
    }

    #[test]
    fn serializes_fields_in_manifest_order() {
        let json = serde_json::to_string(&Zome::default()).unwrap();
        assert_eq!(
            json,
            r#"{"description":"","config":{},"entry_types":{},"capabilities":{},"fn_declarations":[],"code":{"code":""},"bridges":[]}"#
        );
    }
}
