use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A research plan as returned by `GET /api/research-plans`, including the
/// joined student and advisor names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchPlan {
    pub id: i64,
    pub student_id: i64,
    pub advisor_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub progress: Decimal,
    pub student_name: Option<String>,
    pub advisor_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl ResearchPlan {
    /// Progress with two decimals, the way the column stores it
    pub fn progress_display(&self) -> String {
        format!("{:.2}", self.progress)
    }
}
