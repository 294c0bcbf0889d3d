//! Budget outcome of a submitted trip.

use std::fmt;

use serde::Serialize;

use crate::trip::TripDraft;

/// Whether spending stayed within the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount_cents", rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Budget left over (zero included).
    Remaining(i64),
    /// Spending exceeded the budget by this much.
    OverBudget(i64),
}

/// What the user sees after submitting a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    /// Currency code or symbol used for display.
    pub currency: String,
    /// Planned budget in cents.
    pub budget_cents: i64,
    /// Sum of all categories in cents.
    pub total_spent_cents: i64,
    /// Budget minus spending in cents.
    pub balance_cents: i64,
    /// Remaining or over budget.
    pub status: BudgetStatus,
    /// Inclusive trip length in days.
    pub days: i64,
}

impl BudgetSummary {
    /// Compute the summary for a draft.
    #[must_use]
    pub fn for_draft(draft: &TripDraft) -> Self {
        let total_spent_cents = draft.expenses.total_cents();
        let balance_cents = draft.budget_cents.saturating_sub(total_spent_cents);
        let status = if balance_cents >= 0 {
            BudgetStatus::Remaining(balance_cents)
        } else {
            BudgetStatus::OverBudget(balance_cents.saturating_abs())
        };

        Self {
            currency: draft.currency.clone(),
            budget_cents: draft.budget_cents,
            total_spent_cents,
            balance_cents,
            status,
            days: draft.days(),
        }
    }

    /// Whether spending exceeded the budget.
    #[must_use]
    pub const fn is_over_budget(&self) -> bool {
        matches!(self.status, BudgetStatus::OverBudget(_))
    }
}

impl fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = &self.currency;
        writeln!(
            f,
            "Total Spent: {cur}{}",
            format_cents(self.total_spent_cents)
        )?;
        match self.status {
            BudgetStatus::Remaining(amount) => {
                writeln!(f, "Remaining: {cur}{}", format_cents(amount))?;
            }
            BudgetStatus::OverBudget(amount) => {
                writeln!(f, "Over Budget by {cur}{}", format_cents(amount))?;
            }
        }
        write!(f, "Total Trip Days: {}", self.days)
    }
}

/// Format cents as a decimal string with two places, e.g. `-12.05`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
