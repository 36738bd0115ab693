//! Data file emission.
//!
//! Serializes the record sequence once, measures it against the configured
//! size threshold, and writes either a single `data.js` or a series of
//! `data_part<N>.js` files. Every emitted file participates in the
//! `window.db` contract with the consuming page: the single file assigns the
//! array, chunk files append to it, so loading all files in order
//! reconstructs the full sequence.
//!
//! Chunk boundaries are estimated from the one pre-chunk measurement and are
//! not re-measured per chunk; actual per-file size may deviate from the
//! threshold. That approximation is part of the contract.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::models::EpisodeRecord;

/// Global variable the generated files assign to or extend. External
/// contract with the consuming page; do not rename casually.
pub const DB_VAR: &str = "window.db";

/// How the record sequence will be laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPlan {
    /// Whole sequence fits under the threshold; one `data.js`.
    Single,
    /// `chunks` files of `items_per_chunk` records each (last may be short).
    Parts {
        chunks: usize,
        items_per_chunk: usize,
    },
}

/// Decide the layout from the serialized byte size.
pub fn chunk_plan(total_bytes: u64, chunk_size_bytes: u64, total_records: usize) -> ChunkPlan {
    if total_bytes < chunk_size_bytes {
        return ChunkPlan::Single;
    }
    let chunks = total_bytes.div_ceil(chunk_size_bytes) as usize;
    let items_per_chunk = total_records.div_ceil(chunks).max(1);
    ChunkPlan::Parts {
        chunks,
        items_per_chunk,
    }
}

/// Serialize the records and report the byte size and resulting plan
/// without writing anything. Used by `build --dry-run`.
pub fn plan(records: &[EpisodeRecord], config: &Config) -> Result<(u64, ChunkPlan)> {
    let json = serde_json::to_string(records)?;
    let total_bytes = json.len() as u64;
    Ok((
        total_bytes,
        chunk_plan(total_bytes, config.output.chunk_size_bytes, records.len()),
    ))
}

/// Write the data file(s) and return the generated file names in load order.
pub fn write_data_files(records: &[EpisodeRecord], config: &Config) -> Result<Vec<String>> {
    let json = serde_json::to_string(records)?;
    let total_bytes = json.len() as u64;
    println!(
        "total data size: {:.2} MB",
        total_bytes as f64 / (1024.0 * 1024.0)
    );

    let out_dir = &config.output.dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut files = Vec::new();

    match chunk_plan(total_bytes, config.output.chunk_size_bytes, records.len()) {
        ChunkPlan::Single => {
            let name = "data.js".to_string();
            let body = format!("{DB_VAR} = {json};");
            write_file(&out_dir.join(&name), &body)?;
            println!("saved single {name}");
            files.push(name);
        }
        ChunkPlan::Parts {
            chunks,
            items_per_chunk,
        } => {
            println!("data exceeds threshold, splitting into {chunks} parts");
            for i in 0..chunks {
                let start = (i * items_per_chunk).min(records.len());
                let end = (start + items_per_chunk).min(records.len());
                let chunk_json = serde_json::to_string(&records[start..end])?;
                let name = format!("data_part{i}.js");
                let body = format!("{DB_VAR} = ({DB_VAR} || []).concat({chunk_json});");
                write_file(&out_dir.join(&name), &body)?;
                println!("  -> created {name}");
                files.push(name);
            }
        }
    }

    Ok(files)
}

fn write_file(path: &Path, body: &str) -> Result<()> {
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    fn record(id: i64) -> EpisodeRecord {
        EpisodeRecord {
            id,
            title: format!("Episode {id}"),
            date: "2021-01-01".to_string(),
            audio: String::new(),
            search_text: "some text".to_string(),
            segments: vec![Segment {
                start: 0,
                text: "some text".to_string(),
            }],
        }
    }

    #[test]
    fn under_threshold_is_single() {
        assert_eq!(chunk_plan(100, 1000, 5), ChunkPlan::Single);
    }

    #[test]
    fn at_threshold_splits() {
        assert_eq!(
            chunk_plan(1000, 1000, 10),
            ChunkPlan::Parts {
                chunks: 1,
                items_per_chunk: 10
            }
        );
        assert_eq!(
            chunk_plan(4500, 1000, 10),
            ChunkPlan::Parts {
                chunks: 5,
                items_per_chunk: 2
            }
        );
    }

    #[test]
    fn single_file_holds_every_record() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.dir = tmp.path().to_path_buf();

        let records: Vec<EpisodeRecord> = (1..=3).map(record).collect();
        let files = write_data_files(&records, &config).unwrap();
        assert_eq!(files, vec!["data.js"]);

        let body = std::fs::read_to_string(tmp.path().join("data.js")).unwrap();
        let payload = body
            .strip_prefix("window.db = ")
            .and_then(|s| s.strip_suffix(';'))
            .unwrap();
        let parsed: Vec<EpisodeRecord> = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn chunked_files_concat_to_full_sequence() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.dir = tmp.path().to_path_buf();
        config.output.chunk_size_bytes = 64;

        let records: Vec<EpisodeRecord> = (1..=20).map(record).collect();
        let files = write_data_files(&records, &config).unwrap();
        assert!(files.len() > 1);
        assert_eq!(files[0], "data_part0.js");

        let mut reassembled = Vec::new();
        for name in &files {
            let body = std::fs::read_to_string(tmp.path().join(name)).unwrap();
            let payload = body
                .strip_prefix("window.db = (window.db || []).concat(")
                .and_then(|s| s.strip_suffix(");"))
                .unwrap();
            let parsed: Vec<EpisodeRecord> = serde_json::from_str(payload).unwrap();
            reassembled.extend(parsed);
        }
        assert_eq!(reassembled, records);
    }

    #[test]
    fn segment_wire_format_uses_short_keys() {
        let json = serde_json::to_string(&record(1)).unwrap();
        assert!(json.contains(r#""s":0"#));
        assert!(json.contains(r#""t":"some text""#));
        assert!(!json.contains(r#""start""#));
    }
}
