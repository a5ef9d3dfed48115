//! Category records handed in by the category registry.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A user-visible category: registry id plus display name.
///
/// Both fields are validated non-blank once, at construction or
/// deserialization, so detectors can rely on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "RawCategory")]
pub struct CategoryRecord {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct RawCategory {
    id: String,
    name: String,
}

impl TryFrom<RawCategory> for CategoryRecord {
    type Error = CoreError;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        CategoryRecord::new(raw.id, raw.name)
    }
}

impl CategoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into().trim().to_string();
        let name = name.into().trim().to_string();
        if id.is_empty() {
            return Err(CoreError::InvalidCategory { field: "id" });
        }
        if name.is_empty() {
            return Err(CoreError::InvalidCategory { field: "name" });
        }
        Ok(Self { id, name })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a JSON array of `{ "id", "name" }` objects, rejecting blank fields.
pub fn load_categories_json(json: &str) -> Result<Vec<CategoryRecord>, CoreError> {
    let records: Vec<CategoryRecord> = serde_json::from_str(json)?;
    tracing::debug!(count = records.len(), "loaded category records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let c = CategoryRecord::new(" pets ", "Mascotas ").unwrap();
        assert_eq!(c.id(), "pets");
        assert_eq!(c.name(), "Mascotas");
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(
            CategoryRecord::new("", "Mascotas"),
            Err(CoreError::InvalidCategory { field: "id" })
        ));
        assert!(matches!(
            CategoryRecord::new("pets", "   "),
            Err(CoreError::InvalidCategory { field: "name" })
        ));
    }

    #[test]
    fn test_load_json() {
        let cats = load_categories_json(
            r#"[{"id":"pets","name":"Mascotas"},{"id":"gym","name":"Gimnasio"}]"#,
        )
        .unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[1].name(), "Gimnasio");
    }

    #[test]
    fn test_load_json_rejects_blank_name() {
        let err = load_categories_json(r#"[{"id":"pets","name":""}]"#).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
