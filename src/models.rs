use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::time_status::ClassSchedule;

pub const DEFAULT_INTENSITY: &str = "High";
pub const DEFAULT_DIFFICULTY: &str = "All Levels";
pub const DEFAULT_CATEGORY: &str = "HIIT & Boxing";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DifficultyLevel {
    pub difficulty_level_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[schema(value_type = String, format = "date-time", example = "2026-02-08T18:00:00Z")]
    pub start_datetime: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub difficulty_levels: Vec<DifficultyLevel>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub equipment_requirements: Option<String>,
    #[serde(default)]
    pub instructor: Option<Instructor>,
}

impl ClassRecord {
    pub fn schedule(&self) -> ClassSchedule {
        ClassSchedule {
            start_instant: self.start_datetime,
            duration_minutes: self.duration_minutes,
        }
    }

    pub fn instructor_name(&self) -> Option<&str> {
        self.instructor.as_ref().map(|i| i.name.as_str())
    }

    pub fn intensity_label(&self) -> &str {
        self.intensity.as_deref().unwrap_or(DEFAULT_INTENSITY)
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn difficulty_label(&self) -> &str {
        self.difficulty_levels
            .first()
            .map(|level| level.difficulty_level_label.as_str())
            .or(self.difficulty_level.as_deref())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    /// Equipment items from the comma separated requirement string.
    /// An empty list means no equipment is needed.
    pub fn equipment(&self) -> Vec<String> {
        self.equipment_requirements
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Non-blank description lines, one per paragraph.
    pub fn paragraphs(&self) -> Vec<String> {
        self.description
            .as_deref()
            .unwrap_or("")
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body returned by the remote class source: `{"data": {"classes": [...]}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ClassesEnvelope {
    #[serde(default)]
    pub data: Option<ClassesData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClassesData {
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
}

impl ClassesEnvelope {
    pub fn into_classes(self) -> Vec<ClassRecord> {
        self.data.map(|d| d.classes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json() -> serde_json::Value {
        serde_json::json!({
            "id": "c-1",
            "title": "Morning Flow",
            "description": "Line one\n\nLine two\n \nLine three",
            "start_datetime": "2026-02-08T10:00:00+01:00",
            "duration_minutes": 45,
            "equipment_requirements": "Mat, Dumbbells ,,  Band",
            "instructor": {"name": "Ada Lovelace"}
        })
    }

    #[test]
    fn test_deserialize_with_offset() {
        let record: ClassRecord = serde_json::from_value(record_json()).unwrap();
        assert_eq!(
            record.start_datetime,
            "2026-02-08T09:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(record.instructor_name(), Some("Ada Lovelace"));
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_schedule() {
        let record: ClassRecord = serde_json::from_value(record_json()).unwrap();
        let schedule = record.schedule();
        assert_eq!(schedule.start_instant, record.start_datetime);
        assert_eq!(schedule.duration_minutes, 45);
    }

    #[test]
    fn test_display_defaults() {
        let record: ClassRecord = serde_json::from_value(record_json()).unwrap();
        assert_eq!(record.intensity_label(), "High");
        assert_eq!(record.category_label(), "HIIT & Boxing");
        assert_eq!(record.difficulty_label(), "All Levels");
    }

    #[test]
    fn test_difficulty_prefers_levels_list() {
        let mut record: ClassRecord = serde_json::from_value(record_json()).unwrap();
        record.difficulty_level = Some("Intermediate".to_string());
        assert_eq!(record.difficulty_label(), "Intermediate");
        record.difficulty_levels = vec![DifficultyLevel {
            difficulty_level_label: "Advanced".to_string(),
        }];
        assert_eq!(record.difficulty_label(), "Advanced");
    }

    #[test]
    fn test_equipment_and_paragraphs() {
        let record: ClassRecord = serde_json::from_value(record_json()).unwrap();
        assert_eq!(record.equipment(), vec!["Mat", "Dumbbells", "Band"]);
        assert_eq!(
            record.paragraphs(),
            vec!["Line one", "Line two", "Line three"]
        );
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: ClassesEnvelope = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(envelope.into_classes().is_empty());
    }
}
