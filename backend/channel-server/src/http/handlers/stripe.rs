//! Handlers binding the Stripe channel actions to the HTTP surface.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use domain_types::session::{SessionId, StripeSessionState};
use serde::Deserialize;

use crate::{
    channels::{render_log, ChannelSnapshot, StripeForm},
    error::HttpError,
    http::{extract::CurrentUser, state::AppState},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MountQuery {
    /// Set on the success URL the gateway redirects back to.
    pub success: Option<bool>,
}

/// `GET /stripe` — the original always starts a fresh session here.
pub async fn index(CurrentUser(_user): CurrentUser) -> Redirect {
    Redirect::to(&format!("/stripe/{}", SessionId::generate()))
}

pub async fn new_session(CurrentUser(_user): CurrentUser) -> Redirect {
    Redirect::to(&format!("/stripe/{}", SessionId::generate()))
}

pub async fn mount(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<MountQuery>,
) -> Result<Json<ChannelSnapshot<StripeSessionState>>, HttpError> {
    let channel = state.stripe_channel();
    let session_state = channel
        .mount(&user, &SessionId::from(id), query.success.unwrap_or(false))
        .await?;
    Ok(Json(snapshot(session_state)))
}

pub async fn pay(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<StripeForm>>,
) -> Result<Json<ChannelSnapshot<StripeSessionState>>, HttpError> {
    let channel = state.stripe_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id), false).await?;
    apply_form(form, &mut session_state);

    channel.pay(&user, &mut session_state).await?;

    Ok(Json(snapshot(session_state)))
}

pub async fn save(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<StripeForm>>,
) -> Result<Json<ChannelSnapshot<StripeSessionState>>, HttpError> {
    let channel = state.stripe_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id), false).await?;
    apply_form(form, &mut session_state);

    channel.save(&user, &mut session_state, "", false).await?;

    Ok(Json(snapshot(session_state)))
}

pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<StripeForm>>,
) -> Result<Json<ChannelSnapshot<StripeSessionState>>, HttpError> {
    let channel = state.stripe_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id), false).await?;
    apply_form(form, &mut session_state);

    channel.clear(&user, &mut session_state).await?;

    Ok(Json(snapshot(session_state)))
}

fn apply_form(form: Option<Json<StripeForm>>, state: &mut StripeSessionState) {
    if let Some(Json(form)) = form {
        form.apply(state);
    }
}

fn snapshot(state: StripeSessionState) -> ChannelSnapshot<StripeSessionState> {
    ChannelSnapshot {
        log: render_log(&state.log),
        paid: None,
        state,
    }
}
