//! DNA error types

/// Coarse classification of a [`DnaError`], used by callers that only need
/// to branch on the category (the C boundary maps these onto status codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnaErrorKind {
    /// Input text is not a well-formed structured document.
    Malformed,
    /// A field is present but has an incompatible shape.
    SchemaMismatch,
    /// A query referenced a zome (or a strictly required item) that does not exist.
    NotFound,
    /// The caller passed an argument the model cannot interpret.
    InvalidInput,
    Internal,
}

/// DNA error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DnaError {
    #[error("Malformed manifest at line {line}, column {column}: {reason}{}", format_hint(.hint))]
    Malformed {
        line: usize,
        column: usize,
        reason: String,
        hint: Option<String>,
    },

    #[error("Schema mismatch: {reason}{}", format_hint(.hint))]
    SchemaMismatch {
        reason: String,
        hint: Option<String>,
    },

    #[error("Zome '{zome}' not found{}", format_hint(.hint))]
    ZomeNotFound { zome: String, hint: Option<String> },

    #[error("Zome function '{function}' not found in zome '{zome}'")]
    ZomeFunctionNotFound { zome: String, function: String },

    #[error("Capability '{capability}' not found in zome '{zome}'")]
    CapabilityNotFound { zome: String, capability: String },

    #[error("Unknown DNA field '{0}'")]
    UnknownField(String),

    #[error("Invalid zome code payload: {0}")]
    InvalidCode(String),

    #[error("Internal DNA error: {0}")]
    Internal(String),
}

fn format_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n Hint: {}", h))
        .unwrap_or_default()
}

impl DnaError {
    pub fn zome_not_found(zome: impl Into<String>) -> Self {
        DnaError::ZomeNotFound {
            zome: zome.into(),
            hint: None,
        }
    }

    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            DnaError::Malformed { ref mut hint, .. } => *hint = hint_val,
            DnaError::SchemaMismatch { ref mut hint, .. } => *hint = hint_val,
            DnaError::ZomeNotFound { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    pub fn kind(&self) -> DnaErrorKind {
        match self {
            DnaError::Malformed { .. } => DnaErrorKind::Malformed,
            DnaError::SchemaMismatch { .. } => DnaErrorKind::SchemaMismatch,
            DnaError::ZomeNotFound { .. }
            | DnaError::ZomeFunctionNotFound { .. }
            | DnaError::CapabilityNotFound { .. } => DnaErrorKind::NotFound,
            DnaError::UnknownField(_) | DnaError::InvalidCode(_) => DnaErrorKind::InvalidInput,
            DnaError::Internal(_) => DnaErrorKind::Internal,
        }
    }

    /// True for both parse failure categories.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind(),
            DnaErrorKind::Malformed | DnaErrorKind::SchemaMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_is_rendered_after_message() {
        let err = DnaError::zome_not_found("zome9").with_hint("call zome_names() first");
        let rendered = err.to_string();
        assert!(rendered.starts_with("Zome 'zome9' not found"));
        assert!(rendered.ends_with("Hint: call zome_names() first"));
    }

    #[test]
    fn with_hint_ignores_variants_without_hint() {
        let err = DnaError::UnknownField("colour".into()).with_hint("ignored");
        assert_eq!(err, DnaError::UnknownField("colour".into()));
        assert_eq!(err.kind(), DnaErrorKind::InvalidInput);
    }

    #[test]
    fn lookup_failures_share_not_found_kind() {
        let errors = [
            DnaError::zome_not_found("z"),
            DnaError::ZomeFunctionNotFound {
                zome: "z".into(),
                function: "f".into(),
            },
            DnaError::CapabilityNotFound {
                zome: "z".into(),
                capability: "c".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.kind(), DnaErrorKind::NotFound);
            assert!(!err.is_parse_error());
        }
    }
}
