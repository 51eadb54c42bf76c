use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::pipeline::Artifacts;

/// Paths of the files written for one lesson
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactPaths {
    pub raw: PathBuf,
    pub speaker_labeled: PathBuf,
    pub dialogue_verbatim_enhanced: PathBuf,
    pub dialogue_verbatim_smooth: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_plan: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_note: Option<PathBuf>,
}

/// Machine-readable summary printed after a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub bvid: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<u64>,
    pub files: ArtifactPaths,
}

impl RunReport {
    /// Single `RESULT_JSON:` line for downstream tooling
    pub fn to_result_line(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("Failed to serialize run report")?;
        Ok(format!("RESULT_JSON:{}", json))
    }
}

/// Directory receiving a lesson's artifacts: `{root}/bili_temp/{bvid}`
pub fn lesson_dir(root: &Path, bvid: &str) -> PathBuf {
    root.join("bili_temp").join(bvid)
}

/// Write all artifacts into `dir`, creating it if needed
pub fn write_artifacts(dir: &Path, bvid: &str, artifacts: &Artifacts) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;

    let path = |suffix: &str| dir.join(format!("{}_{}.txt", bvid, suffix));

    let paths = ArtifactPaths {
        raw: write_text(&path("transcript_dmview"), &artifacts.raw)?,
        speaker_labeled: write_text(&path("transcript_speaker_labeled"), &artifacts.speaker_labeled)?,
        dialogue_verbatim_enhanced: write_text(
            &path("dialogue_verbatim_enhanced"),
            &artifacts.dialogue_verbatim,
        )?,
        dialogue_verbatim_smooth: write_text(
            &path("dialogue_verbatim_smooth"),
            &artifacts.dialogue_smooth,
        )?,
        lesson_plan: artifacts
            .lesson_plan
            .as_deref()
            .map(|text| write_text(&path("lesson_plan"), text))
            .transpose()?,
        observation_note: artifacts
            .observation_note
            .as_deref()
            .map(|text| write_text(&path("observation_note"), text))
            .transpose()?,
    };

    Ok(paths)
}

fn write_text(path: &Path, text: &str) -> Result<PathBuf> {
    info!("Writing {:?}", path);
    std::fs::write(path, text).with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(path.to_path_buf())
}
