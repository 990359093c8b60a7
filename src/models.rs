use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_name: String,
    pub channel_url: String,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// One video as produced by the backend. Only the first five fields are
/// rendered; the rest are passed through untouched by the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub video_url: String,
    pub published_at: String,
    #[serde(default)]
    pub has_transcript: bool,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub busy: bool,
    pub channels: usize,
    pub videos: usize,
}
