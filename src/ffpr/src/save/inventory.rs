//! Item list extraction for both the normal and key-item inventories.
//!
//! The two lists share one shape: a target envelope whose entries are
//! `{"contentId": N, "count": N}` rows. Rows past the fixed capacity
//! are dropped on load; on store only occupied rows are written.

use serde_json::Value;

use super::keys;
use crate::document::{json_type, Document, DocumentError};
use crate::models::{Inventory, Row};

pub(crate) fn load(
    user_data: &Document,
    key: &str,
    capacity: usize,
) -> Result<Inventory, DocumentError> {
    let mut inventory = Inventory::new(capacity);
    let target = user_data.unwrap_target(key)?;
    let raw = target.as_array().ok_or(DocumentError::TypeMismatch {
        key: key.to_string(),
        expected: "array",
        actual: json_type(&target),
    })?;
    for (index, value) in raw.iter().take(capacity).enumerate() {
        let entry = Document::from_value(value, key)?;
        inventory.set(
            index,
            Row {
                item_id: entry.get_int(keys::CONTENT_ID)?,
                count: entry.get_int(keys::COUNT)?,
            },
        );
    }
    Ok(inventory)
}

pub(crate) fn store(
    user_data: &mut Document,
    key: &str,
    inventory: &Inventory,
) -> Result<(), DocumentError> {
    let mut entries = Vec::new();
    for row in inventory.occupied() {
        let mut entry = Document::new();
        entry.set(keys::CONTENT_ID, Value::from(row.item_id));
        entry.set(keys::COUNT, Value::from(row.count));
        entries.push(Value::String(entry.to_json()?));
    }
    user_data.set_target(key, Value::Array(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_data(entries: &str) -> Document {
        let list = serde_json::to_string(&format!(r#"{{"target":[{entries}]}}"#)).unwrap();
        Document::parse_str(&format!(r#"{{"normalOwnedItemList":{list}}}"#)).unwrap()
    }

    #[test]
    fn test_load_reads_rows_in_order() {
        let doc = user_data(
            r#""{\"contentId\":23,\"count\":4}","{\"contentId\":91,\"count\":1}""#,
        );
        let inventory = load(&doc, keys::NORMAL_OWNED_ITEM_LIST, 256).unwrap();
        assert_eq!(inventory.get(0), Some(Row { item_id: 23, count: 4 }));
        assert_eq!(inventory.get(1), Some(Row { item_id: 91, count: 1 }));
        assert_eq!(inventory.get(2), Some(Row::default()));
    }

    #[test]
    fn test_store_writes_only_occupied_rows() {
        let mut doc = user_data(r#""{\"contentId\":23,\"count\":4}""#);
        let mut inventory = load(&doc, keys::NORMAL_OWNED_ITEM_LIST, 256).unwrap();
        inventory.set(1, Row { item_id: 7, count: 2 });
        inventory.set(5, Row { item_id: 0, count: 0 });
        store(&mut doc, keys::NORMAL_OWNED_ITEM_LIST, &inventory).unwrap();

        let reread = load(&doc, keys::NORMAL_OWNED_ITEM_LIST, 256).unwrap();
        assert_eq!(reread.occupied().count(), 2);
        assert_eq!(reread.get(1), Some(Row { item_id: 7, count: 2 }));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let list = serde_json::to_string(r#"{"values":[]}"#).unwrap();
        let doc =
            Document::parse_str(&format!(r#"{{"normalOwnedItemList":{list}}}"#)).unwrap();
        assert!(matches!(
            load(&doc, keys::NORMAL_OWNED_ITEM_LIST, 256),
            Err(DocumentError::TargetMissing { .. })
        ));
    }
}
