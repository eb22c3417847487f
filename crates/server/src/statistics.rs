//! Statistics API endpoints.

use api_types::stats::{BreakdownResponse, CategoryTotalView, StatsQuery, TrendPoint, TrendQuery};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{Datelike, Utc};

use crate::{
    expense::view_category,
    server::{AuthUser, ServerState},
};

/// Handle requests for a per-category breakdown.
pub async fn breakdown(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Query(query): Query<StatsQuery>,
) -> Json<BreakdownResponse> {
    let filter = engine::ExpenseFilter {
        category: None,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let report = state.engine.category_breakdown(user.id, &filter).await;

    Json(BreakdownResponse {
        total_cents: report.total.cents(),
        breakdown: report
            .breakdown
            .into_iter()
            .map(|slice| CategoryTotalView {
                category: view_category(slice.category),
                total_cents: slice.total.cents(),
                count: slice.count,
            })
            .collect(),
    })
}

/// Handle requests for the monthly trend of one calendar year.
pub async fn trends(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    Query(query): Query<TrendQuery>,
) -> Json<Vec<TrendPoint>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let months = state.engine.monthly_trend(user.id, year).await;

    Json(
        months
            .into_iter()
            .map(|month| TrendPoint {
                month: month.month,
                total_cents: month.total.cents(),
                count: month.count,
            })
            .collect(),
    )
}
