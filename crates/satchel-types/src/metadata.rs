//! Open-ended metadata carried by item stacks.
//!
//! Item types are externally defined content, so metadata is a string-keyed
//! bag of loosely typed values rather than a fixed schema. Consumers
//! validate the keys they care about lazily via the typed accessors below.
//!
//! Two keys are owned by the trade system itself: [`ORIGINAL_SLOT`] traces
//! an offer back to the slot it came from, and [`TRADE_OWNER`] tags
//! projected slots with the offering side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Metadata key recording the inventory slot an offer item came from.
pub const ORIGINAL_SLOT: &str = "originalSlot";

/// Metadata key tagging a projected slot with the side that offered it.
pub const TRADE_OWNER: &str = "tradeOwner";

/// Metadata key linking a left-inventory slot to a container inventory id.
pub const CONTAINER: &str = "container";

/// A string-keyed metadata bag attached to an item stack.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A single metadata value: string, number, boolean, or nested mapping.
///
/// Untagged on the wire -- the JSON value shape selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum MetadataValue {
    /// A boolean flag.
    Flag(bool),
    /// An arbitrary-precision JSON number.
    Number(#[ts(type = "number")] serde_json::Number),
    /// A plain string.
    Text(String),
    /// A nested string-keyed mapping.
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Return the value as a slot index, if it is a non-negative number
    /// that fits in `u32`.
    pub fn as_slot_index(&self) -> Option<u32> {
        match self {
            Self::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            _ => None,
        }
    }

    /// Return the value as a string slice, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Return the value as a boolean, if it is a flag.
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::Number(serde_json::Number::from(value))
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Read the `originalSlot` key from a metadata bag.
pub fn original_slot(metadata: &Metadata) -> Option<u32> {
    metadata.get(ORIGINAL_SLOT).and_then(MetadataValue::as_slot_index)
}

/// Read the `tradeOwner` key from a metadata bag.
pub fn trade_owner(metadata: &Metadata) -> Option<&str> {
    metadata.get(TRADE_OWNER).and_then(MetadataValue::as_text)
}

/// Read the `container` key from a metadata bag.
pub fn container_link(metadata: &Metadata) -> Option<&str> {
    metadata.get(CONTAINER).and_then(MetadataValue::as_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_roundtrip_preserves_shapes() {
        let mut meta = Metadata::new();
        meta.insert("durability".to_owned(), MetadataValue::from(85_u32));
        meta.insert("rarity".to_owned(), MetadataValue::from("legendary"));
        meta.insert("broken".to_owned(), MetadataValue::from(false));

        let json = serde_json::to_string(&meta).unwrap_or_default();
        let restored: Metadata = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(restored, meta);
    }

    #[test]
    fn nested_map_deserializes() {
        let json = r#"{"ingredients":{"iron":5,"copper":12}}"#;
        let meta: Metadata = serde_json::from_str(json).unwrap_or_default();
        assert!(
            matches!(meta.get("ingredients"), Some(MetadataValue::Map(m)) if m.len() == 2)
        );
    }

    #[test]
    fn original_slot_reads_number() {
        let mut meta = Metadata::new();
        meta.insert(ORIGINAL_SLOT.to_owned(), MetadataValue::from(7_u32));
        assert_eq!(original_slot(&meta), Some(7));
    }

    #[test]
    fn original_slot_rejects_non_numbers() {
        let mut meta = Metadata::new();
        meta.insert(ORIGINAL_SLOT.to_owned(), MetadataValue::from("7"));
        assert_eq!(original_slot(&meta), None);
    }

    #[test]
    fn trade_owner_reads_text() {
        let mut meta = Metadata::new();
        meta.insert(TRADE_OWNER.to_owned(), MetadataValue::from("player"));
        assert_eq!(trade_owner(&meta), Some("player"));
    }

    #[test]
    fn missing_keys_read_as_none() {
        let meta = Metadata::new();
        assert_eq!(original_slot(&meta), None);
        assert_eq!(trade_owner(&meta), None);
        assert_eq!(container_link(&meta), None);
    }
}
