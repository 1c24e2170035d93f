//! Self-describing export document handed to sharing tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Workout;

/// `{ "version", "exportDate", "workouts" }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub workouts: Vec<Workout>,
}

impl ExportDocument {
    pub fn new(version: impl Into<String>, workouts: Vec<Workout>) -> Self {
        Self {
            version: version.into(),
            export_date: Utc::now(),
            workouts,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::EntityId;

    #[test]
    fn test_field_names() {
        let doc = ExportDocument::new(
            "1.0.0",
            vec![Workout::new(EntityId::parse("w1").unwrap(), "Push")],
        );
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(value["version"], "1.0.0");
        assert!(value["exportDate"].is_string());
        assert_eq!(value["workouts"][0]["name"], "Push");
        assert!(value.get("export_date").is_none());
    }
}
