//! Zome code payload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::error::DnaError;

/// Executable code of a zome, stored as the base64 text found in the manifest.
///
/// The text is carried verbatim; parsing a manifest never decodes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnaWasm {
    #[serde(default)]
    pub code: String,
}

impl DnaWasm {
    pub fn new() -> Self {
        Default::default()
    }

    /// Encode raw module bytes into the manifest representation.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            code: STANDARD.encode(bytes),
        }
    }

    /// Decode the payload for a consumer that needs the module bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DnaError> {
        STANDARD
            .decode(self.code.as_bytes())
            .map_err(|e| DnaError::InvalidCode(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let wasm = DnaWasm {
            code: "AAECAw==".to_string(),
        };
        assert_eq!(wasm.to_bytes().unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(DnaWasm::from_bytes(&[0, 1, 2, 3]), wasm);
    }

    #[test]
    fn undecodable_payload_is_reported_not_rejected_on_parse() {
        let wasm: DnaWasm = serde_json::from_str(r#"{"code": "not base64!"}"#).unwrap();
        assert_eq!(wasm.code, "not base64!");
        assert!(matches!(wasm.to_bytes(), Err(DnaError::InvalidCode(_))));
    }
}
