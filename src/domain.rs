use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown category id {0}")]
pub struct UnknownCategory(pub u8);

/// Closed catalog of activity categories. Stored on disk as its numeric id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Category {
    Consumed,
    Burned,
}

impl Category {
    pub fn id(self) -> u8 {
        match self {
            Category::Consumed => 1,
            Category::Burned => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Consumed => "Food",
            Category::Burned => "Exercise",
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Category::Consumed),
            2 => Some(Category::Burned),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Category::Consumed => Category::Burned,
            Category::Burned => Category::Consumed,
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = UnknownCategory;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Category::from_id(id).ok_or(UnknownCategory(id))
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.id()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("calories must be a non-negative number, got {0}")]
pub struct InvalidCalories(pub f64);

pub fn check_calories(value: f64) -> Result<f64, InvalidCalories> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidCalories(value))
    }
}

/// Serde adapter for calorie amounts. Reading accepts any JSON number and
/// rejects negatives; whole amounts are written back as integers.
pub mod calorie_amount {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::check_calories;

    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        check_calories(value).map_err(de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub category: Category,
    pub name: String,
    #[serde(with = "calorie_amount")]
    pub calories: f64,
}

impl Activity {
    pub fn from_draft(id: String, draft: ActivityDraft) -> Self {
        Self {
            id,
            category: draft.category,
            name: draft.name,
            calories: draft.calories,
        }
    }

    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            category: self.category,
            name: self.name.clone(),
            calories: self.calories,
        }
    }
}

pub fn new_activity_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("activity name cannot be empty")]
    EmptyName,
    #[error("calories must be greater than zero")]
    ZeroCalories,
    #[error("calories must be a non-negative number")]
    InvalidCalories,
}

/// Activity data as entered in a form, before it is given an id.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityDraft {
    pub category: Category,
    pub name: String,
    pub calories: f64,
}

impl ActivityDraft {
    pub fn new(category: Category, name: impl Into<String>, calories: f64) -> Self {
        Self {
            category,
            name: name.into(),
            calories,
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        check_calories(self.calories).map_err(|_| DraftError::InvalidCalories)?;
        if self.calories == 0.0 {
            return Err(DraftError::ZeroCalories);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_round_trip() {
        for category in [Category::Consumed, Category::Burned] {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert_eq!(Category::from_id(0), None);
        assert_eq!(Category::try_from(3u8), Err(UnknownCategory(3)));
    }

    #[test]
    fn test_category_serializes_as_number() {
        let activity = Activity {
            id: "a".to_string(),
            category: Category::Burned,
            name: "Run".to_string(),
            calories: 300.0,
        };
        let json = serde_json::to_string(&activity).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a","category":2,"name":"Run","calories":300}"#
        );
    }

    #[test]
    fn test_fractional_calories_survive_serde() {
        let raw = r#"{"id":"a","category":1,"name":"Soup","calories":150.5}"#;
        let activity: Activity = serde_json::from_str(raw).unwrap();
        assert_eq!(activity.calories, 150.5);
        assert_eq!(serde_json::to_string(&activity).unwrap(), raw);

        let whole: Activity =
            serde_json::from_str(r#"{"id":"b","category":1,"name":"Tea","calories":10.0}"#)
                .unwrap();
        assert_eq!(whole.calories, 10.0);
    }

    #[test]
    fn test_negative_or_non_numeric_calories_are_rejected() {
        for raw in [
            r#"{"id":"a","category":1,"name":"x","calories":-1}"#,
            r#"{"id":"a","category":1,"name":"x","calories":-0.5}"#,
            r#"{"id":"a","category":1,"name":"x","calories":"150"}"#,
            r#"{"id":"a","category":1,"name":"x","calories":null}"#,
        ] {
            assert!(serde_json::from_str::<Activity>(raw).is_err(), "{}", raw);
        }
        assert!(check_calories(f64::NAN).is_err());
        assert!(check_calories(f64::INFINITY).is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected_on_deserialize() {
        let raw = r#"{"id":"a","category":7,"name":"Run","calories":300}"#;
        assert!(serde_json::from_str::<Activity>(raw).is_err());
    }

    #[test]
    fn test_draft_validation() {
        assert!(ActivityDraft::new(Category::Consumed, "Eggs", 150.0)
            .validate()
            .is_ok());
        assert!(ActivityDraft::new(Category::Consumed, "Soup", 0.5)
            .validate()
            .is_ok());
        assert_eq!(
            ActivityDraft::new(Category::Consumed, "   ", 150.0).validate(),
            Err(DraftError::EmptyName)
        );
        assert_eq!(
            ActivityDraft::new(Category::Burned, "Swim", 0.0).validate(),
            Err(DraftError::ZeroCalories)
        );
        assert_eq!(
            ActivityDraft::new(Category::Burned, "Swim", -20.0).validate(),
            Err(DraftError::InvalidCalories)
        );
        assert_eq!(
            ActivityDraft::new(Category::Burned, "Swim", f64::NAN).validate(),
            Err(DraftError::InvalidCalories)
        );
    }

    #[test]
    fn test_new_activity_ids_differ() {
        assert_ne!(new_activity_id(), new_activity_id());
    }
}
