use serde::Serialize;

use crate::domain::{Activity, Category};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CalorieSummary {
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub is_empty_activities: bool,
}

impl CalorieSummary {
    pub fn from_activities(activities: &[Activity]) -> Self {
        Self {
            calories_consumed: calories_for(activities, Category::Consumed),
            calories_burned: calories_for(activities, Category::Burned),
            is_empty_activities: activities.is_empty(),
        }
    }

    pub fn net_calories(&self) -> f64 {
        self.calories_consumed - self.calories_burned
    }
}

pub fn calories_for(activities: &[Activity], category: Category) -> f64 {
    activities
        .iter()
        .filter(|activity| activity.category == category)
        .map(|activity| activity.calories)
        .sum()
}

/// Renders an amount with at most two decimals and no trailing zeros.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Label for a raw category id, or an empty string when the id is not in the catalog.
pub fn category_name(id: u8) -> &'static str {
    Category::from_id(id).map(Category::label).unwrap_or("")
}
