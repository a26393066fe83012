//! Read-only structural queries: zomes -> capabilities -> functions -> parameters.
//!
//! Only the zome level is strict. Below it every query is total: an unknown
//! function or capability inside a known zome yields an empty list.

use super::capabilities::FnParameter;
use super::document::Dna;
use super::error::DnaError;

fn parameter_names(params: &[FnParameter]) -> Vec<&str> {
    params.iter().map(|p| p.name.as_str()).collect()
}

impl Dna {
    /// Every zome name, in declared order.
    pub fn zome_names(&self) -> Vec<&str> {
        self.zomes.keys().map(String::as_str).collect()
    }

    /// Capability names of `zome_name`, in declared order.
    pub fn capability_names(&self, zome_name: &str) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome.capabilities.keys().map(String::as_str).collect())
    }

    /// Entry type names of `zome_name`, in declared order.
    pub fn entry_type_names(&self, zome_name: &str) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome.entry_types.keys().map(String::as_str).collect())
    }

    /// Function names of `zome_name` in declaration order (not capability order).
    pub fn function_names(&self, zome_name: &str) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome
            .fn_declarations
            .iter()
            .map(|decl| decl.name.as_str())
            .collect())
    }

    /// Input names of `fn_name` in `zome_name`.
    ///
    /// An unknown function yields an empty list, the same as a function with
    /// no inputs. Use [`Dna::function_names`] to tell the two apart.
    pub fn parameter_names(&self, zome_name: &str, fn_name: &str) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome
            .fn_declaration(fn_name)
            .map(|decl| parameter_names(&decl.inputs))
            .unwrap_or_default())
    }

    pub fn output_names(&self, zome_name: &str, fn_name: &str) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome
            .fn_declaration(fn_name)
            .map(|decl| parameter_names(&decl.outputs))
            .unwrap_or_default())
    }

    /// Function names listed by capability `cap_name` of `zome_name`.
    pub fn capability_function_names(
        &self,
        zome_name: &str,
        cap_name: &str,
    ) -> Result<Vec<&str>, DnaError> {
        let zome = self.zome(zome_name)?;
        Ok(zome
            .capabilities
            .get(cap_name)
            .map(|cap| cap.functions.iter().map(String::as_str).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Dna {
        Dna::from_json_str(
            r#"{
                "zomes": {
                    "zome1": {
                        "entry_types": {"post": {}, "comment": {}},
                        "capabilities": {
                            "hc_public": {"functions": ["test", "public_test_fn"]},
                            "test_trait2": {"functions": ["ghost"]}
                        },
                        "fn_declarations": [
                            {
                                "name": "public_test_fn",
                                "inputs": [{"name": "param1", "type": "i32"}],
                                "outputs": [{"name": "result", "type": "i32"}]
                            },
                            {"name": "test", "inputs": [], "outputs": []}
                        ]
                    },
                    "zome2": {}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn lists_each_level_in_order() {
        let dna = fixture();
        assert_eq!(dna.zome_names(), vec!["zome1", "zome2"]);
        assert_eq!(
            dna.capability_names("zome1").unwrap(),
            vec!["hc_public", "test_trait2"]
        );
        assert_eq!(
            dna.function_names("zome1").unwrap(),
            vec!["public_test_fn", "test"]
        );
        assert_eq!(
            dna.entry_type_names("zome1").unwrap(),
            vec!["post", "comment"]
        );
        assert!(dna.entry_type_names("zome2").unwrap().is_empty());
        assert_eq!(
            dna.parameter_names("zome1", "public_test_fn").unwrap(),
            vec!["param1"]
        );
        assert_eq!(
            dna.output_names("zome1", "public_test_fn").unwrap(),
            vec!["result"]
        );
        assert_eq!(
            dna.capability_function_names("zome1", "hc_public").unwrap(),
            vec!["test", "public_test_fn"]
        );
    }

    #[test]
    fn below_zome_level_is_total() {
        let dna = fixture();
        assert!(dna.parameter_names("zome1", "test").unwrap().is_empty());
        assert!(dna.parameter_names("zome1", "ghost").unwrap().is_empty());
        assert!(dna.output_names("zome1", "ghost").unwrap().is_empty());
        assert!(dna
            .capability_function_names("zome1", "no_such_trait")
            .unwrap()
            .is_empty());
        assert!(dna.capability_names("zome2").unwrap().is_empty());
        assert!(dna.function_names("zome2").unwrap().is_empty());
    }

    #[test]
    fn unknown_zome_is_not_found() {
        let dna = fixture();
        let expected = DnaError::zome_not_found("zome3");
        assert_eq!(dna.capability_names("zome3").unwrap_err(), expected);
        assert_eq!(dna.function_names("zome3").unwrap_err(), expected);
        assert_eq!(dna.entry_type_names("zome3").unwrap_err(), expected);
        assert_eq!(dna.parameter_names("zome3", "test").unwrap_err(), expected);
        assert_eq!(
            dna.capability_function_names("zome3", "hc_public").unwrap_err(),
            expected
        );
    }

    #[test]
    fn empty_document_lists_nothing() {
        let dna = Dna::new();
        assert!(dna.zome_names().is_empty());
    }
}
