//! Raw form input.
//!
//! The form hands over whatever the user typed. Numeric fields may arrive as
//! JSON numbers or as strings; anything missing, unparseable, negative or
//! non-finite becomes zero rather than an error.

use serde::Deserialize;

use crate::trip::{Expenses, Party, TripDraft};

/// Largest amount a single form field can carry, in cents.
///
/// Low enough that five categories, and a budget minus their sum, stay within
/// `i64`.
pub const MAX_AMOUNT_CENTS: i64 = i64::MAX / 8;

/// A single numeric form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// A JSON number.
    Number(f64),
    /// Text as typed into the field.
    Text(String),
}

impl FormValue {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (value.is_finite() && value >= 0.0).then_some(value)
    }

    /// The value as an amount in cents, rounded to the nearest cent and capped
    /// at `MAX_AMOUNT_CENTS`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_cents(&self) -> Option<i64> {
        // `as` saturates, so the cap is applied on the integer side.
        self.as_f64()
            .map(|v| ((v * 100.0).round() as i64).min(MAX_AMOUNT_CENTS))
    }

    /// The value as a whole count; fractions are truncated.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_count(&self) -> Option<u32> {
        self.as_f64()
            .map(f64::trunc)
            .filter(|v| *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    }
}

/// The trip form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripForm {
    /// Location text. May have been filled in by the map search.
    pub location: Option<String>,
    /// First day of the trip.
    pub start_date: Option<String>,
    /// Last day of the trip.
    pub end_date: Option<String>,
    /// Planned budget.
    pub budget: Option<FormValue>,
    /// Food spending.
    pub food: Option<FormValue>,
    /// Travel spending.
    pub travel: Option<FormValue>,
    /// Accommodation spending.
    pub stay: Option<FormValue>,
    /// Shopping spending.
    #[serde(alias = "shop")]
    pub shopping: Option<FormValue>,
    /// Miscellaneous spending.
    pub misc: Option<FormValue>,
    /// Currency code or symbol.
    pub currency: Option<String>,
    /// Number of travellers.
    pub total_persons: Option<FormValue>,
    /// Number of male travellers.
    pub male: Option<FormValue>,
    /// Number of female travellers.
    pub female: Option<FormValue>,
}

fn cents(value: Option<&FormValue>) -> i64 {
    value.and_then(FormValue::to_cents).unwrap_or(0)
}

fn count(value: Option<&FormValue>) -> u32 {
    value.and_then(FormValue::to_count).unwrap_or(0)
}

impl TripForm {
    /// Normalize the form into a draft.
    #[must_use]
    pub fn into_draft(self) -> TripDraft {
        TripDraft {
            location: self.location.unwrap_or_default().trim().to_string(),
            start_date: self.start_date.unwrap_or_default().trim().to_string(),
            end_date: self.end_date.unwrap_or_default().trim().to_string(),
            budget_cents: cents(self.budget.as_ref()),
            expenses: Expenses {
                food_cents: cents(self.food.as_ref()),
                travel_cents: cents(self.travel.as_ref()),
                stay_cents: cents(self.stay.as_ref()),
                shopping_cents: cents(self.shopping.as_ref()),
                misc_cents: cents(self.misc.as_ref()),
            },
            currency: self.currency.unwrap_or_default().trim().to_string(),
            party: Party {
                total_persons: count(self.total_persons.as_ref()),
                male: count(self.male.as_ref()),
                female: count(self.female.as_ref()),
            },
        }
    }
}
