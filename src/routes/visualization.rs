use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Local;

use crate::{
    error::AppError,
    models::entry::VisualizationQuery,
    services::{entries::EntryService, month::MonthRange, render},
    AppState,
};

/// GET /visualization?year=YYYY&month=M — defaults to the current month
pub async fn month_view(
    State(state): State<AppState>,
    Query(params): Query<VisualizationQuery>,
) -> Result<Html<String>, AppError> {
    let range = MonthRange::from_query(
        params.year.as_deref(),
        params.month.as_deref(),
        Local::now().date_naive(),
    )?;

    let mut conn = state.db.acquire().await?;
    let entries =
        EntryService::list_by_date_range(&mut conn, range.start_date, range.end_date).await?;

    Ok(Html(render::visualization_page(&range, &entries)))
}
