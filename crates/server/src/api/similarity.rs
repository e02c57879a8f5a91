//! 代码查重 API 路由。
//!
//! 为教师仪表盘生成某道题目的提交相似度报告。

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use logicode_api_types::{
    SimilarityPairResponse, SimilarityReportQuery, SimilarityReportResponse,
    SkippedSubmissionResponse,
};
use logicode_core::domain::{ProblemId, Submission};
use logicode_core::similarity::{ReportOptions, SimilarityEngine, SimilarityReport};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;

/// 创建查重 API 路由。
pub fn create_similarity_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/problems/{problem_id}/similarity",
        get(get_similarity_report),
    )
}

/// 生成题目的相似度报告。
async fn get_similarity_report(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
    query: Result<Query<SimilarityReportQuery>, QueryRejection>,
) -> Result<Json<SimilarityReportResponse>, ApiError> {
    let Query(query) = query?;
    let problem_id = ProblemId::from_str(&problem_id).map_err(|e| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_PROBLEM_ID",
            format!("invalid problem id '{problem_id}': {e}"),
        )
    })?;
    let options = state
        .similarity
        .report_options(query.threshold, query.exclude_same_user)?;

    let report_id = Uuid::new_v4();
    let span = info_span!("similarity_report", %report_id, %problem_id);

    let response = generate_for_problem(&state, problem_id, options)
        .instrument(span)
        .await?;
    Ok(Json(response))
}

async fn generate_for_problem(
    state: &AppState,
    problem_id: ProblemId,
    options: ReportOptions,
) -> Result<SimilarityReportResponse, ApiError> {
    if state.problems.find_by_id(problem_id).await?.is_none() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "PROBLEM_NOT_FOUND",
            format!("problem not found: {problem_id}"),
        ));
    }

    let submissions = state.submissions.list_by_problem_id(problem_id).await?;
    info!(count = submissions.len(), "loaded submissions");

    let report = run_report(problem_id, submissions, options, state.similarity.timeout()).await?;
    Ok(to_response(report))
}

/// 在阻塞线程池中生成报告，超时后通知引擎停止。
async fn run_report(
    problem_id: ProblemId,
    submissions: Vec<Submission>,
    options: ReportOptions,
    timeout: Duration,
) -> Result<SimilarityReport, ApiError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let engine = SimilarityEngine::new(options).with_cancellation(cancel.clone());
    let span = tracing::Span::current();
    let task = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        engine.generate(problem_id, &submissions)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_err)) => Err(anyhow::Error::new(join_err)
            .context("similarity report task failed")
            .into()),
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            warn!(timeout_secs = timeout.as_secs_f64(), "similarity report timed out");
            Err(ApiError::new(
                StatusCode::GATEWAY_TIMEOUT,
                "REPORT_TIMEOUT",
                format!("similarity report exceeded {}s", timeout.as_secs_f64()),
            ))
        }
    }
}

fn to_response(report: SimilarityReport) -> SimilarityReportResponse {
    SimilarityReportResponse {
        problem_id: report.problem_id.to_string(),
        threshold: report.threshold.value(),
        total_submissions: report.total_submissions,
        skipped: report.skipped_count(),
        skipped_submissions: report
            .skipped
            .iter()
            .map(|skipped| SkippedSubmissionResponse {
                submission_id: skipped.submission_id.to_string(),
                reason: skipped.reason.as_str().to_string(),
            })
            .collect(),
        compared_pairs: report.compared_pairs,
        suspicious_pairs: report
            .suspicious_pairs
            .into_iter()
            .map(|pair| SimilarityPairResponse {
                submission_id_a: pair.submission_id_a.to_string(),
                submission_id_b: pair.submission_id_b.to_string(),
                user_a: pair.user_a.to_string(),
                user_b: pair.user_b.to_string(),
                similarity: pair.similarity,
            })
            .collect(),
    }
}
