//! Transcript discovery and parsing.
//!
//! Walks the scan root for files named `<integer-id>.<ext>` and builds the
//! [`TranscriptIndex`]. Transcript parsing is best-effort throughout: a
//! malformed or unreadable document is treated as an absent transcript, never
//! as a build failure.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::{Segment, TranscriptContent, TranscriptDoc, TranscriptIndex};

/// Recursively enumerate transcript files under the configured scan root.
///
/// When the same id appears in multiple directories the last-visited file
/// wins; traversal order is not guaranteed, so duplicate ids are a caller
/// error with non-crashing resolution.
pub fn scan_transcripts(config: &Config) -> Result<TranscriptIndex> {
    let root = &config.input.scan_root;

    let mut excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    excludes.extend(config.input.exclude_globs.clone());
    let exclude_set = build_globset(&excludes)?;

    let mut index = TranscriptIndex::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude_set.is_match(relative.to_string_lossy().as_ref()) {
            continue;
        }

        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == config.input.transcript_ext);
        if !matches_ext {
            continue;
        }

        if let Some(id) = stem_id(path) {
            index.insert(id, path.to_path_buf());
        }
    }

    Ok(index)
}

/// Parse the file stem as an episode id. `42.json` → 42; `12.5.json` and
/// `notes.json` fail and the file is skipped.
fn stem_id(path: &Path) -> Option<i64> {
    path.file_stem()?.to_str()?.parse().ok()
}

/// Read and parse one transcript document.
///
/// Any I/O or parse failure yields empty content — the episode record then
/// proceeds with no search text and no segments.
pub fn load_transcript(path: &Path) -> TranscriptContent {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return TranscriptContent::default(),
    };
    let doc: TranscriptDoc = match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(_) => return TranscriptContent::default(),
    };
    content_from_doc(doc)
}

/// A present `text` field wins, even when empty; otherwise full text is
/// derived by joining segment texts with single spaces.
fn content_from_doc(doc: TranscriptDoc) -> TranscriptContent {
    let segments: Vec<Segment> = doc
        .segments
        .unwrap_or_default()
        .into_iter()
        .map(|seg| Segment {
            start: seg.start as i64,
            text: seg.text,
        })
        .collect();

    let full_text = match doc.text {
        Some(text) => text,
        None => segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    };

    TranscriptContent {
        full_text,
        segments,
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::path::PathBuf;

    fn doc(text: Option<&str>, segments: Option<Vec<(f64, &str)>>) -> TranscriptDoc {
        TranscriptDoc {
            text: text.map(|t| t.to_string()),
            segments: segments.map(|segs| {
                segs.into_iter()
                    .map(|(start, text)| crate::models::RawSegment {
                        start,
                        text: text.to_string(),
                    })
                    .collect()
            }),
        }
    }

    #[test]
    fn text_field_takes_precedence() {
        let content = doc(Some("Full text."), Some(vec![(0.0, "ignored")]));
        let content = content_from_doc(content);
        assert_eq!(content.full_text, "Full text.");
        assert_eq!(content.segments.len(), 1);
    }

    #[test]
    fn segments_joined_when_text_absent() {
        let content = content_from_doc(doc(None, Some(vec![(0.0, "Hello"), (5.9, "World")])));
        assert_eq!(content.full_text, "Hello World");
        assert_eq!(content.segments[1].start, 5);
    }

    #[test]
    fn empty_doc_yields_empty_content() {
        let content = content_from_doc(doc(None, None));
        assert_eq!(content.full_text, "");
        assert!(content.segments.is_empty());
    }

    #[test]
    fn start_times_truncate_toward_zero() {
        let content = content_from_doc(doc(None, Some(vec![(12.87, "late")])));
        assert_eq!(content.segments[0].start, 12);
    }

    #[test]
    fn stem_id_parses_integer_names_only() {
        assert_eq!(stem_id(&PathBuf::from("a/b/42.json")), Some(42));
        assert_eq!(stem_id(&PathBuf::from("007.json")), Some(7));
        assert_eq!(stem_id(&PathBuf::from("12.5.json")), None);
        assert_eq!(stem_id(&PathBuf::from("notes.json")), None);
    }

    #[test]
    fn malformed_document_treated_as_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("9.json");
        fs::write(&path, "{not json at all").unwrap();
        let content = load_transcript(&path);
        assert_eq!(content.full_text, "");
        assert!(content.segments.is_empty());
    }

    #[test]
    fn scan_finds_nested_ids_and_skips_non_numeric() {
        let tmp = tempfile::TempDir::new().unwrap();
        let nested = tmp.path().join("season2");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("1.json"), "{}").unwrap();
        fs::write(nested.join("2.json"), "{}").unwrap();
        fs::write(nested.join("readme.json"), "{}").unwrap();
        fs::write(nested.join("3.txt"), "").unwrap();

        let mut config = Config::default();
        config.input.scan_root = tmp.path().to_path_buf();

        let index = scan_transcripts(&config).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains_key(&1));
        assert_eq!(index[&2], nested.join("2.json"));
    }

    #[test]
    fn scan_honors_exclude_globs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let skipped = tmp.path().join("node_modules");
        fs::create_dir_all(&skipped).unwrap();
        fs::write(skipped.join("5.json"), "{}").unwrap();
        fs::write(tmp.path().join("6.json"), "{}").unwrap();

        let mut config = Config::default();
        config.input.scan_root = tmp.path().to_path_buf();

        let index = scan_transcripts(&config).unwrap();
        assert!(!index.contains_key(&5));
        assert!(index.contains_key(&6));
    }
}
