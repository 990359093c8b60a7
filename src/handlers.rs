use crate::dashboard;
use crate::models::{Channel, StatusResponse};
use crate::state::AppState;
use crate::ui::render_page;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = dashboard::load(&state).await;
    Html(render_page(&view))
}

pub async fn refresh(State(state): State<AppState>) -> Html<String> {
    let view = dashboard::refresh(&state).await;
    Html(render_page(&view))
}

pub async fn get_summaries(State(state): State<AppState>) -> Json<Vec<Channel>> {
    let channels = state.channels.lock().await;
    Json(channels.clone())
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let channels = state.channels.lock().await;
    Json(StatusResponse {
        busy: state.is_busy(),
        channels: channels.len(),
        videos: channels.iter().map(|channel| channel.videos.len()).sum(),
    })
}
