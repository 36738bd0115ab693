use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Delimiter-separated episode metadata file.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// Field delimiter. The source data uses `~` because titles contain commas.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Root directory to walk when discovering transcript files.
    #[serde(default = "default_scan_root")]
    pub scan_root: PathBuf,
    /// Extension of transcript documents (`<episode-id>.<ext>`).
    #[serde(default = "default_transcript_ext")]
    pub transcript_ext: String,
    /// Extra glob patterns to skip during the transcript walk.
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("episodes (1).csv")
}
fn default_delimiter() -> char {
    '~'
}
fn default_scan_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_transcript_ext() -> String {
    "json".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            delimiter: default_delimiter(),
            scan_root: default_scan_root(),
            transcript_ext: default_transcript_ext(),
            exclude_globs: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    /// Gateway prefix for content-addressed audio links.
    #[serde(default = "default_gateway")]
    pub gateway: String,
    /// Content-addressed root used when the CSV holds a bare filename.
    #[serde(default = "default_ipfs_root")]
    pub ipfs_root: String,
}

fn default_gateway() -> String {
    "https://ipfs.io/ipfs".to_string()
}
fn default_ipfs_root() -> String {
    "QmYoi9yujdACiLyxXpVLGJJjR374KktXv4um798b1FZd6A".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
            ipfs_root: default_ipfs_root(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory the data files are written to and the HTML targets live in.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Size threshold (bytes) above which the data is split into parts.
    #[serde(default = "default_chunk_size_bytes")]
    pub chunk_size_bytes: u64,
    /// Consumer documents to patch with the generated script tags.
    #[serde(default = "default_html_targets")]
    pub html_targets: Vec<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_chunk_size_bytes() -> u64 {
    15 * 1024 * 1024
}
fn default_html_targets() -> Vec<String> {
    vec!["index.html".to_string(), "transcript.html".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            chunk_size_bytes: default_chunk_size_bytes(),
            html_targets: default_html_targets(),
        }
    }
}

/// Load configuration from `path`, or fall back to defaults when the file
/// does not exist (the tool is fully usable config-less).
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if !config.input.delimiter.is_ascii() {
        anyhow::bail!("input.delimiter must be a single ASCII character");
    }
    if config.input.delimiter == ',' {
        anyhow::bail!("input.delimiter must not be ','; the source format exists to avoid commas");
    }
    if config.input.transcript_ext.is_empty() {
        anyhow::bail!("input.transcript_ext must not be empty");
    }
    if config.output.chunk_size_bytes == 0 {
        anyhow::bail!("output.chunk_size_bytes must be > 0");
    }
    Ok(())
}
