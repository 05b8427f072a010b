//! # Claude Usageline
//!
//! A small statusline utility for Claude Code sessions. It reads one JSON
//! status payload from stdin and prints one to three ANSI-colored lines:
//! context-window fill with the remaining token budget, rolling five-hour and
//! seven-day rate-limit utilization, and optional extra-usage spend.
//!
//! ## Overview
//!
//! Rate-limit data comes from the Claude OAuth usage endpoint and is cached
//! on disk for 60 seconds; when a refresh fails the last known snapshot is
//! shown instead. Rendering never fails the host UI: every internal error
//! collapses to a single fallback line and exit code 0.

/// File-backed TTL cache for the last usage snapshot
pub mod cache;

/// Command-line argument parsing
pub mod cli;

/// Bar rendering, style tokens, and ANSI-aware line layout
pub mod display;

/// Data models for the stdin status payload
pub mod models;

/// Local settings source (always-thinking flag, effort level)
pub mod settings;

/// Online usage limits retrieved from the Claude OAuth API
pub mod usage_api;

/// Utility functions for paths, stdin, and number formatting
pub mod utils;
