use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Local;

use crate::{
    error::AppError,
    models::entry::EntryForm,
    services::{entries::EntryService, render},
    AppState,
};

/// GET / — blank entry form dated today
pub async fn new_entry_form(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    Html(render::new_entry_page(today, &state.config.default_health))
}

/// POST /submit — create an entry, then send the browser back to a blank form
pub async fn submit_entry(
    State(state): State<AppState>,
    form: Result<Form<EntryForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let fields = form.into_fields(
        Some(Local::now().date_naive()),
        &state.config.default_health,
    )?;

    let mut conn = state.db.acquire().await?;
    EntryService::create(&mut conn, &fields).await?;

    Ok(Redirect::to("/"))
}
