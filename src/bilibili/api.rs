use serde::Deserialize;

use crate::error::BilibiliError;

/// Common `{code, message, data}` wrapper of Bilibili web API responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning a non-zero code into an error
    pub fn into_data(self, endpoint: &'static str) -> Result<T, BilibiliError> {
        if self.code != 0 {
            return Err(BilibiliError::Api {
                endpoint,
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or(BilibiliError::Api {
            endpoint,
            code: self.code,
            message: "missing data".to_string(),
        })
    }
}

/// Payload of `x/web-interface/view`
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pages: Vec<VideoPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoPage {
    pub cid: u64,
    #[serde(default)]
    pub part: String,
}

/// Payload of `x/v2/dm/view`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DmView {
    #[serde(default)]
    pub subtitle: Option<SubtitleInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleInfo {
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleTrack {
    #[serde(default)]
    pub lan: String,
    #[serde(default)]
    pub subtitle_url: String,
}

impl DmView {
    /// Pick the Chinese track (or the first one) and normalise its URL
    pub fn subtitle_url(&self) -> Result<String, BilibiliError> {
        let tracks = self
            .subtitle
            .as_ref()
            .map(|s| s.subtitles.as_slice())
            .unwrap_or(&[]);

        let track = tracks
            .iter()
            .find(|t| t.lan.contains("zh"))
            .or_else(|| tracks.first())
            .ok_or(BilibiliError::NoSubtitles)?;

        let url = &track.subtitle_url;
        if url.is_empty() {
            return Err(BilibiliError::EmptySubtitleUrl);
        }
        if url.starts_with("//") {
            return Ok(format!("https:{}", url));
        }
        Ok(url.clone())
    }
}
