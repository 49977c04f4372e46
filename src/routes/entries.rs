use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::{
    error::AppError,
    models::entry::{EntriesQuery, EntryForm},
    services::{entries::EntryService, render},
    AppState,
};

/// GET /entries?sort=id|date — most recent entries, one page
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<EntriesQuery>,
) -> Result<Html<String>, AppError> {
    let order = params.order();
    let mut conn = state.db.acquire().await?;
    let entries =
        EntryService::list(&mut conn, order, Some(state.config.entries_page_size)).await?;
    Ok(Html(render::entries_page(&entries, order)))
}

/// GET /edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let mut conn = state.db.acquire().await?;
    let entry = EntryService::get(&mut conn, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(render::edit_entry_page(&entry)))
}

/// POST /edit/{id} — full replace; unchecked boxes become false
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<EntryForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let fields = form.into_fields(None, &state.config.default_health)?;

    let mut conn = state.db.acquire().await?;
    if !EntryService::update(&mut conn, id, &fields).await? {
        tracing::debug!(id, "edit of unknown entry ignored");
    }

    Ok(Redirect::to("/entries"))
}

/// POST /delete/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let mut conn = state.db.acquire().await?;
    if !EntryService::delete(&mut conn, id).await? {
        tracing::debug!(id, "delete of unknown entry ignored");
    }

    Ok(Redirect::to("/entries"))
}
