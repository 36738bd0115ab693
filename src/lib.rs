//! # Podpack
//!
//! Static data builder for podcast archive sites.
//!
//! Podpack is a one-shot batch pipeline: it reads a delimiter-separated
//! episode CSV, joins each row with a per-episode JSON transcript found on
//! disk, serializes the result to JavaScript data files (splitting into
//! size-bounded parts when needed), and patches the site's HTML pages to
//! load them.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌─────────────┐   ┌────────────────┐
//! │ Transcript │──▶│   Record    │──▶│    Emitter     │
//! │  Indexer   │   │   Builder   │   │ data.js / part │
//! └────────────┘   └─────────────┘   └───────┬────────┘
//!                                            │
//!                                            ▼
//!                                   ┌────────────────┐
//!                                   │  HTML patcher  │
//!                                   └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! podpack init                  # scaffold podpack.toml
//! podpack transcripts           # verify transcript discovery
//! podpack build --dry-run       # measure without writing
//! podpack build                 # emit data files and patch HTML
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`transcripts`] | Transcript discovery and parsing |
//! | [`records`] | CSV parsing and transcript join |
//! | [`emit`] | Data file serialization and chunking |
//! | [`html`] | Consumer HTML patching |
//!
//! ## External contract
//!
//! Every generated file feeds a single global array, `window.db`. The
//! single-file form assigns it; chunk files append with
//! `window.db = (window.db || []).concat(...)`, so loading all parts in
//! order reconstructs the full record sequence. The consuming page relies
//! on exactly this shape.

pub mod config;
pub mod emit;
pub mod html;
pub mod models;
pub mod records;
pub mod transcripts;
