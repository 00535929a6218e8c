//! Domain models for Coach

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ========== Transactions ==========

/// How expense amounts are signed in an import file
///
/// Stored transactions always use `ExpensesNegative`: negative = expense,
/// positive = income. Files using the opposite convention are negated on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// Expenses are negative, income positive (bank-statement style)
    #[default]
    ExpensesNegative,
    /// Expenses are positive (spending-log style)
    ExpensesPositive,
}

impl SignConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpensesNegative => "expenses_negative",
            Self::ExpensesPositive => "expenses_positive",
        }
    }

    /// Convert an amount from this convention into the stored convention
    pub fn to_stored(&self, amount: f64) -> f64 {
        match self {
            Self::ExpensesNegative => amount,
            Self::ExpensesPositive => -amount,
        }
    }
}

impl std::str::FromStr for SignConvention {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "expenses_negative" | "negative" => Ok(Self::ExpensesNegative),
            "expenses_positive" | "positive" => Ok(Self::ExpensesPositive),
            _ => Err(format!(
                "Unknown sign convention: {} (valid: expenses_negative, expenses_positive)",
                s
            )),
        }
    }
}

impl std::fmt::Display for SignConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Label exactly as it appeared in the import file
    pub raw_name: String,
    /// Normalised name shown in reports and used for budgets
    pub display_name: String,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Negative = expense, positive = income
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount: f64,
    /// Display name of the category
    pub category: String,
    pub raw_category: String,
    pub description: String,
    /// Hash for deduplication
    pub import_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Spend magnitude (0 for income)
    pub fn spent(&self) -> f64 {
        if self.is_expense() {
            -self.amount
        } else {
            0.0
        }
    }
}

/// A new transaction to be imported (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    /// Already in the stored convention (negative = expense)
    pub amount: f64,
    pub raw_category: String,
    pub import_hash: String,
    /// Original import row as JSON
    pub original_data: Option<String>,
}

// ========== Budgets ==========

/// A monthly spending limit for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_name: String,
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount_limit: f64,
}

/// Budget create/update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    /// Category display name (e.g. "Restaurant")
    pub category_name: String,
    pub year: i32,
    pub month: u32,
    pub amount_limit: f64,
}

/// Budget classification for one category in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NearLimit => "near_limit",
            Self::OverBudget => "over_budget",
        }
    }

    /// Human wording used inside sentences ("... spending is near limit")
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::NearLimit => "near limit",
            Self::OverBudget => "over budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budget evaluation result for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetInsight {
    pub category_name: String,
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub spent: f64,
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount_limit: f64,
    pub status: BudgetStatus,
    pub message: String,
}

impl BudgetInsight {
    /// Budget left before hitting the limit (negative when over)
    pub fn remaining(&self) -> f64 {
        self.amount_limit - self.spent
    }
}

// ========== Report Models ==========

/// Spend total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_name: String,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_spent: f64,
}

/// Monthly summary report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_spent: f64,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_income: f64,
    /// Sorted by total_spent, largest first
    pub by_category: Vec<CategoryTotal>,
}

/// Total spend for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_spent: f64,
    pub by_category: Vec<CategoryTotal>,
}

/// Largest signed change in total spend between adjacent months
///
/// `delta` is negative when spend fell between every pair of months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiggestJump {
    pub from_year: i32,
    pub from_month: u32,
    pub to_year: i32,
    pub to_month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub delta: f64,
}

/// Largest month-over-month change within a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryJump {
    pub category_name: String,
    pub from_year: i32,
    pub from_month: u32,
    pub to_year: i32,
    pub to_month: u32,
    /// Signed change (positive = spend increase)
    #[serde(serialize_with = "crate::money::serialize")]
    pub absolute_change: f64,
    #[serde(serialize_with = "crate::money::serialize_opt")]
    pub percentage_change: Option<f64>,
}

/// Spending trajectory over the months present in the data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    /// Strictly increasing by (year, month)
    pub months: Vec<MonthTotal>,
    pub biggest_jump: Option<BiggestJump>,
    pub category_jump: Option<CategoryJump>,
}

// ========== Goals ==========

/// Savings goal status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "crate::money::serialize")]
    pub target_amount: f64,
    #[serde(serialize_with = "crate::money::serialize")]
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub status: GoalStatus,
}

/// Goal creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
}

/// Progress toward a savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "crate::money::serialize")]
    pub target_amount: f64,
    #[serde(serialize_with = "crate::money::serialize")]
    pub current_amount: f64,
    pub percent_complete: f64,
    pub months_left: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub monthly_needed: f64,
    pub status: GoalStatus,
    pub message: String,
}

// ========== Recommendations ==========

/// A suggested spending adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendRecommendation {
    /// Where to cut back
    pub category_from: String,
    /// Where to reallocate, if anywhere
    pub category_to: Option<String>,
    #[serde(serialize_with = "crate::money::serialize")]
    pub amount: f64,
    /// Why this was flagged
    pub reason: String,
    /// What the user should do
    pub action: String,
}

/// Recommendations report for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsReport {
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "crate::money::serialize")]
    pub total_spent: f64,
    pub spend_recommendations: Vec<SpendRecommendation>,
    pub goal_highlight: Option<String>,
    pub budget_insights: Vec<BudgetInsight>,
}

// ========== Import ==========

/// Result of a CSV import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    /// Rows parsed from the file
    pub parsed: usize,
    /// New transactions stored
    pub inserted: usize,
    /// Rows already present (same import hash)
    pub duplicates: usize,
    /// Categories created during this import
    pub categories_created: usize,
}
