use crate::errors::RefreshError;
use crate::state::AppState;
use crate::ui::{
    render_rejection, render_summaries, PageView, LOAD_ERROR_HTML, REFRESH_ERROR_ALERT,
    REFRESH_ERROR_HTML,
};
use tracing::{error, info, warn};

/// Fetches the current summaries and renders them. On failure the content
/// region gets a static error message and the stored channels stay as they
/// were.
pub async fn load(state: &AppState) -> PageView {
    let content = match state.client.fetch_summaries().await {
        Ok(channels) => {
            info!(channels = channels.len(), "loaded summaries");
            let content = render_summaries(&channels);
            *state.channels.lock().await = channels;
            content
        }
        Err(err) => {
            error!("error loading summaries: {err}");
            LOAD_ERROR_HTML.to_string()
        }
    };

    PageView {
        content,
        busy: state.is_busy(),
        alert: None,
    }
}

/// Asks the backend to recompute summaries. The busy flag is held only for
/// the duration of the backend call; failures come back as an error panel
/// plus an alert, without touching the stored channels.
pub async fn refresh(state: &AppState) -> PageView {
    let outcome = {
        let _guard = state.begin_refresh();
        state.client.refresh().await
    };

    let (content, alert) = match outcome {
        Ok(channels) => {
            let videos: usize = channels.iter().map(|channel| channel.videos.len()).sum();
            info!(channels = channels.len(), videos, "refresh completed");
            let content = render_summaries(&channels);
            *state.channels.lock().await = channels;
            (content, None)
        }
        Err(RefreshError::Rejected { status, message }) => {
            warn!(%status, "backend rejected refresh: {message}");
            (render_rejection(&message), Some(message))
        }
        Err(err @ (RefreshError::Transport(_) | RefreshError::Unreadable { .. })) => {
            error!("error refreshing summaries: {err}");
            (
                REFRESH_ERROR_HTML.to_string(),
                Some(REFRESH_ERROR_ALERT.to_string()),
            )
        }
    };

    PageView {
        content,
        busy: state.is_busy(),
        alert,
    }
}
