use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::CanteenError;

record_id!(
    /// Type-safe identifier for Meals.
    MealId,
    "meal"
);

/// Represents a meal on the weekly menu.
///
/// # Store
/// Managed by a [`ResourceActor`](canteen_store::ResourceActor); see
/// [`meal_actor`](crate::meal_actor) for the entity implementation.
/// Only caterers add or remove meals (see [`MealCatalog`](crate::catalog::MealCatalog)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub day: Weekday,
    pub name: String,
    pub price: f64,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A meal as shown to one role: the price is left out for roles that may not
/// see prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealView {
    pub id: MealId,
    pub day: Weekday,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl MealView {
    pub fn new(meal: Meal, show_prices: bool) -> Self {
        Self {
            id: meal.id,
            day: meal.day,
            name: meal.name,
            price: show_prices.then_some(meal.price),
            keywords: meal.keywords,
            image: meal.image,
        }
    }
}

/// Payload for adding a meal to the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub day: Weekday,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl MealCreate {
    pub fn new(day: Weekday, name: impl Into<String>, price: f64) -> Self {
        Self {
            day,
            name: name.into(),
            price,
            keywords: Vec::new(),
            image: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the payload and fills in defaults.
    ///
    /// Meals are served on working days only. Blank keywords are dropped;
    /// when none remain they are derived from the name.
    pub fn normalized(mut self) -> Result<Self, CanteenError> {
        if matches!(self.day, Weekday::Sat | Weekday::Sun) {
            return Err(CanteenError::validation(format!(
                "meals are served Monday to Friday, not {}",
                self.day
            )));
        }
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(CanteenError::validation("meal name is required"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CanteenError::validation(format!(
                "meal price must be a non-negative amount, got {}",
                self.price
            )));
        }

        self.keywords = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if self.keywords.is_empty() {
            self.keywords = derive_keywords(&self.name);
        }
        Ok(self)
    }
}

/// The lower-cased name followed by each of its words.
fn derive_keywords(name: &str) -> Vec<String> {
    let full = name.to_lowercase();
    let mut keywords = vec![full.clone()];
    for word in full.split_whitespace() {
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_keywords_are_derived_from_the_name() {
        let meal = MealCreate::new(Weekday::Tue, "  Jollof Rice ", 40.0)
            .normalized()
            .unwrap();
        assert_eq!(meal.name, "Jollof Rice");
        assert_eq!(meal.keywords, vec!["jollof rice", "jollof", "rice"]);
    }

    #[test]
    fn test_supplied_keywords_are_cleaned() {
        let meal = MealCreate::new(Weekday::Mon, "Banku", 35.0)
            .with_keywords(["  Tilapia", "", "BANKU "])
            .normalized()
            .unwrap();
        assert_eq!(meal.keywords, vec!["tilapia", "banku"]);
    }

    #[test]
    fn test_hidden_price_is_left_out_of_the_view() {
        let meal = Meal {
            id: MealId(4),
            day: Weekday::Thu,
            name: "Fufu".into(),
            price: 45.0,
            keywords: vec!["fufu".into()],
            image: None,
        };
        let hidden = MealView::new(meal.clone(), false);
        assert_eq!(hidden.price, None);
        let json = serde_json::to_value(&hidden).unwrap();
        assert!(json.get("price").is_none());
        assert_eq!(json["name"], "Fufu");

        assert_eq!(MealView::new(meal, true).price, Some(45.0));
    }

    #[test]
    fn test_weekend_meals_are_rejected() {
        let err = MealCreate::new(Weekday::Sat, "Waakye", 30.0)
            .normalized()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_negative_or_missing_price_is_rejected() {
        for price in [-1.0, f64::NAN] {
            let err = MealCreate::new(Weekday::Wed, "Fufu", price)
                .normalized()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }
}
