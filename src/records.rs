//! Episode record construction.
//!
//! Reads the delimiter-separated episode CSV, joins each row with its
//! transcript via the [`TranscriptIndex`], and produces the ordered record
//! sequence the emitter serializes. Row order in the CSV is preserved.
//!
//! The missing-CSV case is the single fatal error in the whole pipeline;
//! everything row-level is skip-and-continue.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::models::{EpisodeRecord, TranscriptIndex};
use crate::transcripts;

/// One raw CSV row. Every field defaults to empty so a sparse or short row
/// still deserializes; unknown columns are ignored.
#[derive(Debug, Default, Deserialize)]
struct CsvRow {
    #[serde(default)]
    episode_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    publish_date: String,
    #[serde(default)]
    mp3_link: String,
}

pub fn build_records(config: &Config, index: &TranscriptIndex) -> Result<Vec<EpisodeRecord>> {
    let csv_path = &config.input.csv_path;
    if !csv_path.exists() {
        bail!("episode CSV not found: {}", csv_path.display());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.input.delimiter as u8)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    let mut records = Vec::new();

    for row in reader.deserialize::<CsvRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                eprintln!("warning: skipping unreadable CSV row: {err}");
                continue;
            }
        };

        // Rows without a parseable id are dropped entirely.
        let Some(id) = parse_episode_id(&row.episode_id) else {
            continue;
        };

        let audio = resolve_audio_url(
            row.mp3_link.trim(),
            &config.audio.gateway,
            &config.audio.ipfs_root,
        );

        let content = index
            .get(&id)
            .map(|path| transcripts::load_transcript(path))
            .unwrap_or_default();

        records.push(EpisodeRecord {
            id,
            title: row.title,
            date: row.publish_date,
            audio,
            search_text: content.full_text.to_lowercase(),
            segments: content.segments,
        });
    }

    Ok(records)
}

/// Parse an episode id the lenient way: float first, then truncate.
/// `"12.0"` → 12; empty, non-numeric, and non-finite values are rejected.
pub fn parse_episode_id(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value as i64)
}

/// Three-way audio URL rule: a link containing `http` passes through
/// verbatim; a bare non-empty value becomes a gateway URL built from its
/// final path segment; an empty value stays empty.
pub fn resolve_audio_url(link: &str, gateway: &str, ipfs_root: &str) -> String {
    if link.contains("http") {
        link.to_string()
    } else if !link.is_empty() {
        let name = link.rsplit('/').next().unwrap_or(link);
        format!("{gateway}/{ipfs_root}/{name}")
    } else {
        String::new()
    }
}
