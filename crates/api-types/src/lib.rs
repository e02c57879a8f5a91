//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Query string of `GET /api/problems/{problem_id}/similarity`.
///
/// Absent fields fall back to the server's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReportQuery {
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub exclude_same_user: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityPairResponse {
    pub submission_id_a: String,
    pub submission_id_b: String,
    pub user_a: String,
    pub user_b: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSubmissionResponse {
    pub submission_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReportResponse {
    pub problem_id: String,
    pub threshold: f64,
    pub total_submissions: usize,
    pub skipped: usize,
    pub skipped_submissions: Vec<SkippedSubmissionResponse>,
    pub compared_pairs: usize,
    pub suspicious_pairs: Vec<SimilarityPairResponse>,
}
