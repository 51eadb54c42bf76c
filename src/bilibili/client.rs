use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::api::{ApiEnvelope, DmView, VideoInfo};
use crate::error::BilibiliError;
use crate::io::parse_subtitle_json;
use crate::models::SubtitleLine;

const VIEW_URL: &str = "https://api.bilibili.com/x/web-interface/view";
const DM_VIEW_URL: &str = "https://api.bilibili.com/x/v2/dm/view";
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
const BILIBILI_REFERER: &str = "https://www.bilibili.com/";

static BVID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BV[0-9A-Za-z]{10}").expect("BV id pattern is valid"));

/// Extract a BV id from a bare id or a video URL
pub fn parse_bvid(input: &str) -> Result<String, BilibiliError> {
    BVID.find(input.trim())
        .map(|m| m.as_str().to_string())
        .ok_or(BilibiliError::MissingBvid)
}

/// Configuration for the Bilibili client
#[derive(Debug, Clone)]
pub struct BilibiliConfig {
    /// Raw `Cookie` header value (from BILIBILI_COOKIE env var)
    pub cookie: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for BilibiliConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            timeout: Duration::from_secs(20),
        }
    }
}

impl BilibiliConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let cookie = std::env::var("BILIBILI_COOKIE")
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Self {
            cookie,
            ..Default::default()
        }
    }
}

/// A lesson's subtitle track together with its video metadata
#[derive(Debug, Clone)]
pub struct FetchedLesson {
    pub bvid: String,
    pub title: String,
    pub cid: u64,
    pub lines: Vec<SubtitleLine>,
}

/// Bilibili web API client
pub struct BilibiliClient {
    client: Client,
}

impl BilibiliClient {
    pub fn new(config: BilibiliConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static(BILIBILI_REFERER));
        if let Some(cookie) = &config.cookie {
            let mut value = HeaderValue::from_str(cookie).context("Invalid cookie header value")?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Bilibili API error: {} - {}", status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    /// Fetch title and pages of a video
    pub async fn get_video_info(&self, bvid: &str) -> Result<VideoInfo> {
        let envelope: ApiEnvelope<VideoInfo> =
            self.get_json(VIEW_URL, &[("bvid", bvid.to_string())]).await?;
        Ok(envelope.into_data("view")?)
    }

    /// Resolve the subtitle track URL for a video page
    pub async fn get_subtitle_url(&self, cid: u64) -> Result<String> {
        let envelope: ApiEnvelope<DmView> = self
            .get_json(
                DM_VIEW_URL,
                &[("oid", cid.to_string()), ("type", "1".to_string())],
            )
            .await?;
        let view = envelope.into_data("dm/view")?;
        Ok(view.subtitle_url()?)
    }

    /// Download and validate a subtitle track
    pub async fn fetch_subtitle_body(&self, subtitle_url: &str) -> Result<Vec<SubtitleLine>> {
        let body = self
            .client
            .get(subtitle_url)
            .send()
            .await
            .with_context(|| format!("Failed to download subtitle from {}", subtitle_url))?
            .text()
            .await
            .context("Failed to read subtitle body")?;
        parse_subtitle_json(&body)
    }

    /// Resolve a video and download its first page's subtitle track
    pub async fn fetch_lesson(&self, bvid: &str) -> Result<FetchedLesson> {
        info!("Fetching video info for {}", bvid);
        let info = self.get_video_info(bvid).await?;
        let title = info.title.unwrap_or_else(|| bvid.to_string());
        let page = info.pages.first().ok_or(BilibiliError::NoPages)?;
        debug!("Using page {:?} (cid {})", page.part, page.cid);

        let subtitle_url = self.get_subtitle_url(page.cid).await?;
        debug!("Subtitle URL: {}", subtitle_url);

        let lines = self.fetch_subtitle_body(&subtitle_url).await?;
        if lines.is_empty() {
            return Err(BilibiliError::EmptyBody.into());
        }
        info!("Fetched {} subtitle lines for {:?}", lines.len(), title);

        Ok(FetchedLesson {
            bvid: bvid.to_string(),
            title,
            cid: page.cid,
            lines,
        })
    }
}
