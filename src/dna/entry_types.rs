//! Entry type definitions declared by a zome.

use serde::{Deserialize, Serialize};

/// Who may see entries of a type once committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sharing {
    #[default]
    Public,
    Private,
    Encrypted,
}

impl Sharing {
    /// Whether entries of this kind are published to the network.
    pub fn can_publish(self) -> bool {
        match self {
            Sharing::Public | Sharing::Encrypted => true,
            Sharing::Private => false,
        }
    }
}

/// An outgoing link definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksTo {
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub tag: String,
    #[serde(rename = "type", default)]
    pub link_type: String,
}

/// An incoming link definition, seen from the linked entry type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedFrom {
    #[serde(default)]
    pub base_type: String,
    #[serde(default)]
    pub tag: String,
    #[serde(rename = "type", default)]
    pub link_type: String,
}

/// Represents a zome "entry_types" value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTypeDef {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub sharing: Sharing,

    #[serde(default)]
    pub links_to: Vec<LinksTo>,

    #[serde(default)]
    pub linked_from: Vec<LinkedFrom>,
}

impl EntryTypeDef {
    pub fn new(description: impl Into<String>, sharing: Sharing) -> Self {
        Self {
            description: description.into(),
            sharing,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_compare() {
        let fixture: EntryTypeDef = serde_json::from_str(
            r#"{
                "description": "test",
                "sharing": "private",
                "links_to": [
                    {
                        "target_type": "test",
                        "tag": "test",
                        "type": "test"
                    }
                ],
                "linked_from": [
                    {
                        "base_type": "HcSysAgentKeyHash",
                        "tag": "authored_posts",
                        "type": "test"
                    }
                ]
            }"#,
        )
        .unwrap();

        let mut entry = EntryTypeDef::new("test", Sharing::Private);
        entry.links_to.push(LinksTo {
            target_type: "test".into(),
            tag: "test".into(),
            link_type: "test".into(),
        });
        entry.linked_from.push(LinkedFrom {
            base_type: "HcSysAgentKeyHash".into(),
            tag: "authored_posts".into(),
            link_type: "test".into(),
        });

        assert_eq!(fixture, entry);
    }

    #[test]
    fn defaults_to_public_and_empty_links() {
        let entry: EntryTypeDef = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.sharing, Sharing::Public);
        assert!(entry.links_to.is_empty());
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"description":"","sharing":"public","links_to":[],"linked_from":[]}"#
        );
    }

    #[test]
    fn sharing_controls_publication() {
        assert!(Sharing::Public.can_publish());
        assert!(Sharing::Encrypted.can_publish());
        assert!(!Sharing::Private.can_publish());
        assert!(serde_json::from_str::<Sharing>(r#""secret""#).is_err());
    }
}
