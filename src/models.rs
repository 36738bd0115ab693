//! Core data types flowing through the build pipeline.
//!
//! An [`EpisodeRecord`] is the output unit: one CSV row joined with its
//! transcript (when one exists). Transcript documents are parsed into
//! [`TranscriptDoc`] with explicit `Option` fields, since real transcript
//! JSON carries `text`, `segments`, both, or neither.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Mapping from episode id to the transcript file that serves it.
/// Built once per run and discarded afterwards.
pub type TranscriptIndex = HashMap<i64, PathBuf>;

/// One episode as it appears in the generated data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub audio: String,
    /// Lower-cased full transcript text; empty when no transcript exists.
    pub search_text: String,
    pub segments: Vec<Segment>,
}

/// A time-coded transcript fragment.
///
/// Serialized with short key names (`s`, `t`) — that is the wire format the
/// consuming page expects, and it keeps the emitted files small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "s")]
    pub start: i64,
    #[serde(rename = "t")]
    pub text: String,
}

/// Raw transcript document as found on disk. Both fields are optional;
/// extra fields (language, model metadata, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct TranscriptDoc {
    pub text: Option<String>,
    pub segments: Option<Vec<RawSegment>>,
}

/// One segment as written by the transcriber (fractional start seconds).
#[derive(Debug, Deserialize)]
pub struct RawSegment {
    pub start: f64,
    pub text: String,
}

/// Parsed transcript content attached to a record during the join.
#[derive(Debug, Clone, Default)]
pub struct TranscriptContent {
    pub full_text: String,
    pub segments: Vec<Segment>,
}
