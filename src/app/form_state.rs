use thiserror::Error;

use crate::domain::{Activity, ActivityDraft, Category, DraftError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FormField {
    Category,
    Name,
    Calories,
}

impl FormField {
    const ORDER: [FormField; 3] = [FormField::Category, FormField::Name, FormField::Calories];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(super) enum FormError {
    #[error("calories must be a number")]
    InvalidCalories,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct FormState {
    pub category: Category,
    pub name: String,
    pub calories: String,
    pub field: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            category: Category::Consumed,
            name: String::new(),
            calories: String::new(),
            field: FormField::Category,
        }
    }
}

impl FormState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn load(&mut self, activity: &Activity) {
        self.category = activity.category;
        self.name = activity.name.clone();
        self.calories = activity.calories.to_string();
        self.field = FormField::Name;
    }

    pub fn next_field(&mut self) {
        let order = FormField::ORDER;
        self.field = order[super::ui_helpers::wrap_next_index(self.field.position(), order.len())];
    }

    pub fn prev_field(&mut self) {
        let order = FormField::ORDER;
        self.field = order[super::ui_helpers::wrap_prev_index(self.field.position(), order.len())];
    }

    pub fn toggle_category(&mut self) {
        self.category = self.category.toggled();
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Category => {
                if c == ' ' {
                    self.toggle_category();
                }
            }
            FormField::Name => self.name.push(c),
            FormField::Calories => {
                let accepted =
                    c.is_ascii_digit() || (c == '.' && !self.calories.contains('.'));
                if accepted && self.calories.len() < 9 {
                    self.calories.push(c);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        match self.field {
            FormField::Category => {}
            FormField::Name => {
                self.name.pop();
            }
            FormField::Calories => {
                self.calories.pop();
            }
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.to_draft().is_ok()
    }

    pub fn to_draft(&self) -> Result<ActivityDraft, FormError> {
        let calories = if self.calories.is_empty() {
            0.0
        } else {
            self.calories
                .parse::<f64>()
                .map_err(|_| FormError::InvalidCalories)?
        };
        let draft = ActivityDraft::new(self.category, self.name.trim(), calories);
        draft.validate()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_fields_cycle() {
        let mut form = FormState::default();
        assert_eq!(form.field, FormField::Category);
        form.next_field();
        assert_eq!(form.field, FormField::Name);
        form.next_field();
        form.next_field();
        assert_eq!(form.field, FormField::Category);
        form.prev_field();
        assert_eq!(form.field, FormField::Calories);
    }

    #[test]
    fn test_calories_accept_digits_and_one_point() {
        let mut form = FormState {
            field: FormField::Calories,
            ..FormState::default()
        };
        typed(&mut form, "1a5-0.5.2");
        assert_eq!(form.calories, "150.52");
        form.pop_char();
        assert_eq!(form.calories, "150.5");
    }

    #[test]
    fn test_space_toggles_category() {
        let mut form = FormState::default();
        form.push_char(' ');
        assert_eq!(form.category, Category::Burned);
        form.push_char('x');
        assert_eq!(form.category, Category::Burned);
    }

    #[test]
    fn test_draft_requires_name_and_calories() {
        let mut form = FormState::default();
        assert_eq!(form.to_draft(), Err(FormError::Draft(DraftError::EmptyName)));

        form.field = FormField::Name;
        typed(&mut form, " Eggs ");
        assert_eq!(
            form.to_draft(),
            Err(FormError::Draft(DraftError::ZeroCalories))
        );

        form.field = FormField::Calories;
        typed(&mut form, "150");
        assert!(form.is_submittable());
        assert_eq!(
            form.to_draft().unwrap(),
            ActivityDraft::new(Category::Consumed, "Eggs", 150.0)
        );

        typed(&mut form, ".5");
        assert_eq!(form.to_draft().map(|draft| draft.calories), Ok(150.5));
    }

    #[test]
    fn test_lone_point_is_rejected() {
        let form = FormState {
            name: "Feast".to_string(),
            calories: ".".to_string(),
            ..FormState::default()
        };
        assert_eq!(form.to_draft(), Err(FormError::InvalidCalories));
    }

    #[test]
    fn test_load_then_clear() {
        let mut form = FormState::default();
        form.load(&Activity {
            id: "a1".to_string(),
            category: Category::Burned,
            name: "Swim".to_string(),
            calories: 280.5,
        });
        assert_eq!(form.category, Category::Burned);
        assert_eq!(form.name, "Swim");
        assert_eq!(form.calories, "280.5");

        form.clear();
        assert_eq!(form, FormState::default());
    }
}
