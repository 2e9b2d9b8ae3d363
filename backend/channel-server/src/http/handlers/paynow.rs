//! Handlers binding the Paynow channel actions to the HTTP surface.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use domain_types::session::{PaynowSessionState, SessionId};

use crate::{
    channels::{render_log, ChannelSnapshot, PaynowChannel, PaynowForm},
    error::HttpError,
    http::{extract::CurrentUser, state::AppState},
};

/// `GET /paynow` — no id in the URL: continue the user's active session, or
/// start a fresh one.
pub async fn index(State(_state): State<AppState>, CurrentUser(user): CurrentUser) -> Redirect {
    let id = user.active_session_id.unwrap_or_else(SessionId::generate);
    Redirect::to(&format!("/paynow/{id}"))
}

/// `POST /paynow/new-session` — navigate to a fresh session, discarding the
/// previous one's in-memory state (its persisted snapshot survives).
pub async fn new_session(CurrentUser(_user): CurrentUser) -> Redirect {
    Redirect::to(&format!("/paynow/{}", SessionId::generate()))
}

pub async fn mount(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let session_state = channel.mount(&user, &SessionId::from(id)).await?;
    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn pay(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    channel.pay(&user, &mut session_state).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn save(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    channel.save(&user, &mut session_state, "", false).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn check(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    channel.check(&mut session_state).await;
    channel.save(&user, &mut session_state, "", true).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    channel.clear(&user, &mut session_state).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn live(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    channel.live(&user, &mut session_state).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

pub async fn dismiss_poll_url(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Option<Json<PaynowForm>>,
) -> Result<Json<ChannelSnapshot<PaynowSessionState>>, HttpError> {
    let channel = state.paynow_channel();
    let mut session_state = channel.mount(&user, &SessionId::from(id)).await?;
    apply_form(form, &mut session_state);

    session_state.poll_url = None;
    channel.save(&user, &mut session_state, "", true).await?;

    Ok(Json(snapshot(&channel, session_state).await))
}

fn apply_form(form: Option<Json<PaynowForm>>, state: &mut PaynowSessionState) {
    if let Some(Json(form)) = form {
        form.apply(state);
    }
}

/// The paid flag mirrors the view's computed property: probed only while a
/// poll URL is held.
async fn snapshot(
    channel: &PaynowChannel,
    state: PaynowSessionState,
) -> ChannelSnapshot<PaynowSessionState> {
    let paid = match state.poll_url {
        Some(_) => Some(channel.paid(&state).await),
        None => None,
    };
    ChannelSnapshot {
        log: render_log(&state.log),
        paid,
        state,
    }
}
