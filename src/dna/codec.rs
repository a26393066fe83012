//! Conversion between manifest text and the in-memory [`Dna`].
//!
//! `zomes`, `entry_types` and `capabilities` have exactly one accepted shape: a keyed object
//! whose keys are the names. The older list-of-named-objects layout is not
//! sniffed; it is reported as a schema mismatch.

use serde_json::error::Category;
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;

use super::document::Dna;
use super::error::DnaError;

const KEYED_SHAPE_HINT: &str = "`zomes`, `entry_types` and `capabilities` are keyed objects, \
     e.g. {\"zomes\": {\"<zome_name>\": {...}}}";

/// Textual encodings a manifest can be read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManifestFormat {
    #[default]
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Map a file extension (or format name) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

fn schema_mismatch(reason: String) -> DnaError {
    let keyed_shape = reason.contains("expected a map");
    let err = DnaError::SchemaMismatch { reason, hint: None };
    if keyed_shape {
        err.with_hint(KEYED_SHAPE_HINT)
    } else {
        err
    }
}

fn from_json_error(err: serde_json::Error) -> DnaError {
    match err.classify() {
        Category::Data => schema_mismatch(err.to_string()),
        Category::Syntax | Category::Eof | Category::Io => DnaError::Malformed {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
            hint: None,
        },
    }
}

fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, DnaError> {
    value.as_object().ok_or_else(|| DnaError::SchemaMismatch {
        reason: format!("{} must be an object, found {}", what, type_name(value)),
        hint: None,
    })
}

fn expect_keyed<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, DnaError> {
    expect_object(value, what).map_err(|e| e.with_hint(KEYED_SHAPE_HINT))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Serde accepts a list wherever a struct is expected; every record in a
/// manifest must be an object, so that shape is rejected up front.
fn check_shape(value: &Value) -> Result<(), DnaError> {
    let root = expect_object(value, "the document")?;
    let Some(zomes) = root.get("zomes") else {
        return Ok(());
    };
    for (zome_name, zome) in expect_keyed(zomes, "`zomes`")? {
        let zome = expect_object(zome, &format!("zome '{}'", zome_name))?;
        if let Some(entry_types) = zome.get("entry_types") {
            let what = format!("`entry_types` of zome '{}'", zome_name);
            for (type_name, entry_type) in expect_keyed(entry_types, &what)? {
                expect_object(entry_type, &format!("entry type '{}'", type_name))?;
            }
        }
        if let Some(Value::Array(bridges)) = zome.get("bridges") {
            for bridge in bridges {
                expect_object(bridge, &format!("a bridge of zome '{}'", zome_name))?;
            }
        }
        if let Some(capabilities) = zome.get("capabilities") {
            let what = format!("`capabilities` of zome '{}'", zome_name);
            for (cap_name, capability) in expect_keyed(capabilities, &what)? {
                expect_object(capability, &format!("capability '{}'", cap_name))?;
            }
        }
        if let Some(Value::Array(declarations)) = zome.get("fn_declarations") {
            for declaration in declarations {
                let what = format!("a function declaration of zome '{}'", zome_name);
                let declaration = expect_object(declaration, &what)?;
                for key in ["inputs", "outputs"] {
                    if let Some(Value::Array(params)) = declaration.get(key) {
                        for param in params {
                            expect_object(param, "a function parameter")?;
                        }
                    }
                }
            }
        }
        if let Some(code) = zome.get("code") {
            expect_object(code, &format!("`code` of zome '{}'", zome_name))?;
        }
    }
    Ok(())
}

/// Mirror a JSON value as YAML. Numbers outside the i64/u64 range become
/// floats, since YAML scalars cannot carry arbitrary precision.
fn to_yaml_value(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_yaml::Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                serde_yaml::Value::Number(u.into())
            } else {
                serde_yaml::Value::Number(n.as_f64().unwrap_or(f64::NAN).into())
            }
        }
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Array(items) => serde_yaml::Value::Sequence(items.iter().map(to_yaml_value).collect()),
        Value::Object(map) => serde_yaml::Value::Mapping(
            map.iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), to_yaml_value(v)))
                .collect(),
        ),
    }
}

fn from_value(value: Value) -> Result<Dna, DnaError> {
    check_shape(&value)?;
    serde_json::from_value(value).map_err(|e| schema_mismatch(e.to_string()))
}

impl Dna {
    /// Create a new in-memory dna struct from a json string.
    ///
    /// # Examples
    ///
    /// ```
    /// use dna_manifest::Dna;
    ///
    /// let dna = Dna::from_json_str(r#"{
    ///     "name": "MyTestApp"
    /// }"#).unwrap();
    ///
    /// assert_eq!("MyTestApp", dna.name);
    /// assert_eq!("2.0", dna.dna_spec_version);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, DnaError> {
        let value: Value = serde_json::from_str(text).map_err(from_json_error)?;
        let dna = from_value(value)?;
        tracing::debug!("Parsed JSON DNA '{}' with {} zome(s)", dna.name, dna.zomes.len());
        Ok(dna)
    }

    /// Create a new in-memory dna struct from a YAML document.
    ///
    /// Unlike JSON input, a repeated key anywhere in the document (including
    /// a repeated zome or capability name) is rejected as
    /// [`DnaError::Malformed`] rather than resolved last-write-wins.
    pub fn from_yaml_str(text: &str) -> Result<Self, DnaError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| DnaError::Malformed {
                line: e.location().map(|l| l.line()).unwrap_or(0),
                column: e.location().map(|l| l.column()).unwrap_or(0),
                reason: e.to_string(),
                hint: None,
            })?;
        if value.is_null() {
            return Err(DnaError::Malformed {
                line: 0,
                column: 0,
                reason: "empty document".to_string(),
                hint: Some("an empty manifest is written as `{}`".to_string()),
            });
        }
        let value = serde_json::to_value(&value).map_err(|e| schema_mismatch(e.to_string()))?;
        let dna = from_value(value)?;
        tracing::debug!("Parsed YAML DNA '{}' with {} zome(s)", dna.name, dna.zomes.len());
        Ok(dna)
    }

    pub fn from_str_with_format(text: &str, format: ManifestFormat) -> Result<Self, DnaError> {
        match format {
            ManifestFormat::Json => Self::from_json_str(text),
            ManifestFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    /// Generate a compact json string from an in-memory dna struct.
    pub fn to_json(&self) -> Result<String, DnaError> {
        serde_json::to_string(self).map_err(|e| DnaError::Internal(e.to_string()))
    }

    /// Generate a pretty-printed json string from an in-memory dna struct.
    pub fn to_json_pretty(&self) -> Result<String, DnaError> {
        serde_json::to_string_pretty(self).map_err(|e| DnaError::Internal(e.to_string()))
    }

    /// Generate a YAML document. JSON numbers beyond 64-bit range are written
    /// as floats; use [`Dna::to_json`] for an exact copy.
    pub fn to_yaml(&self) -> Result<String, DnaError> {
        let value = serde_json::to_value(self).map_err(|e| DnaError::Internal(e.to_string()))?;
        serde_yaml::to_string(&to_yaml_value(&value)).map_err(|e| DnaError::Internal(e.to_string()))
    }

    pub fn to_string_with_format(&self, format: ManifestFormat) -> Result<String, DnaError> {
        match format {
            ManifestFormat::Json => self.to_json_pretty(),
            ManifestFormat::Yaml => self.to_yaml(),
        }
    }
}

impl FromStr for Dna {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}
