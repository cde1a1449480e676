//! # single-hpp-release
//!
//! Release automation for a header-only C++ library.
//!
//! ## Overview
//!
//! `single-hpp-release` turns the library sources into one versioned header,
//! brings the companion starter project up to date, checks that it still
//! builds and, when a version is set and pushing is enabled, commits the
//! starter project, refreshes the docs and opens the announcement drafts.
//!
//! ## Stages
//!
//! 1. Assemble the single header (external concatenation tool + banner)
//! 2. Update the starter project (reset, copy, rewrite references)
//! 3. Verify the starter project builds, and decide whether to publish
//! 4. Publish (commit and push, regenerate docs, open release pages)
//!
//! ## Usage
//!
//! ```bash
//! # Dry run with the version from the config file
//! single-hpp-release --no-push
//!
//! # Release v.8.0.0
//! single-hpp-release --tag v.8.0.0 --last-tag v.7.0.0
//! ```
//!
//! ## Configuration
//!
//! Configuration can be specified in `.config/single-hpp-release.toml` in
//! the directory the tool is run from, or `~/.config/single-hpp-release.toml`
//! for user-wide settings. Relative paths are resolved against the current
//! directory.

/// Single header creation from the library sources
pub mod assembler;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and default settings management
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// In-place text replacement for files
pub mod files;

/// Stage sequencing and the result of a run
pub mod pipeline;

/// Sanity checks on the starter project before anything runs
pub mod preflight;

/// Commit, docs regeneration and release announcements
pub mod publisher;

/// External process execution
pub mod runner;

/// Starter project synchronisation
pub mod starter;

/// Starter project build check and publish gate
pub mod verifier;
