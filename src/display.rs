use chrono::Local;
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::StatusInput;
use crate::settings::Settings;
use crate::usage_api::{ExtraUsage, UsageSnapshot, UsageWindow};
use crate::utils::{format_cents, format_grouped};

/// Emitted alone when there is nothing to render.
pub const FALLBACK_TEXT: &str = "Claude";

/// Visible column where the right-hand content (model name, effort label) starts.
const RIGHT_COLUMN: usize = 34;

static ANSI_RE: Lazy<Regex> = Lazy::new(|| Regex::new("\u{1b}\\[[0-9;]*m").unwrap());

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Process-wide color switch, set once at startup from --no-color / NO_COLOR.
pub fn set_colors(enabled: bool) {
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

/// Style tokens mapped once to concrete escape sequences, keeping renderer
/// logic independent of the terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Nominal,
    Warning,
    Alert,
    Dim,
    Accent,
}

impl Style {
    pub fn paint(self, text: &str) -> String {
        if !colors_enabled() {
            return text.to_string();
        }
        match self {
            Style::Nominal => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Alert => text.red().bold().to_string(),
            Style::Dim => text.dimmed().to_string(),
            Style::Accent => text.bright_white().bold().to_string(),
        }
    }
}

/// Clamp to the displayable [0, 100] range; non-finite values render as 0.
pub fn clamp_percent(percent: f64) -> f64 {
    if !percent.is_finite() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

fn bar_tier(percent: f64) -> Style {
    if percent >= 75.0 {
        Style::Alert
    } else if percent >= 50.0 {
        Style::Warning
    } else {
        Style::Nominal
    }
}

fn bar_cells(percent: f64, width: usize) -> (usize, usize) {
    let pct = clamp_percent(percent);
    let filled = ((pct * width as f64 / 100.0).round() as usize).min(width);
    (filled, width - filled)
}

/// Fixed-width usage bar: filled solid glyphs in the tier color, the rest
/// hollow and dimmed.
pub fn render_bar(percent: f64, width: usize) -> String {
    let pct = clamp_percent(percent);
    let (filled, empty) = bar_cells(pct, width);
    let mut bar = String::new();
    if filled > 0 {
        bar.push_str(&bar_tier(pct).paint(&"█".repeat(filled)));
    }
    if empty > 0 {
        bar.push_str(&Style::Dim.paint(&"░".repeat(empty)));
    }
    bar
}

/// Character count after stripping ANSI SGR sequences. Column math must use
/// rendered width, not byte length.
pub fn visible_len(text: &str) -> usize {
    ANSI_RE.replace_all(text, "").chars().count()
}

/// Pad with spaces up to `target` visible columns. Wider text passes through
/// untouched; nothing is ever truncated.
pub fn pad_column(text: &str, target: usize) -> String {
    let vis = visible_len(text);
    if vis < target {
        format!("{}{}", text, " ".repeat(target - vis))
    } else {
        text.to_string()
    }
}

/// Place `right` at the fixed target column, keeping at least a one-space gap
/// when `left` already reaches it.
pub fn join_columns(left: &str, right: &str, target: usize) -> String {
    if visible_len(left) < target {
        format!("{}{}", pad_column(left, target), right)
    } else {
        format!("{left} {right}")
    }
}

fn context_line(input: &StatusInput, settings: &Settings, bar_width: usize) -> String {
    let pct = input.percent_used();
    let left = format!(
        "{} {}% · {} left",
        render_bar(pct as f64, bar_width),
        pct,
        format_grouped(input.tokens_remaining())
    );
    let mut right = Style::Accent.paint(input.model.display_name.trim());
    if let Some(label) = settings.effort_label() {
        right.push_str(" · ");
        right.push_str(&Style::Dim.paint(label));
    }
    join_columns(&left, &right, RIGHT_COLUMN)
}

fn window_line(
    window: &UsageWindow,
    label: &str,
    reset_fmt: &str,
    bar_width: usize,
) -> Option<String> {
    let pct = clamp_percent(window.utilization?);
    let mut line = format!(
        "{} {}% · {}",
        render_bar(pct, bar_width),
        pct.round() as u32,
        Style::Dim.paint(label)
    );
    if let Some(reset) = window.resets_at {
        // Month abbreviations are shown lowercase; time-only formats pass through
        let when = reset
            .with_timezone(&Local)
            .format(reset_fmt)
            .to_string()
            .to_lowercase();
        line.push_str(" · ");
        line.push_str(&Style::Dim.paint(&format!("resets {when}")));
    }
    Some(line)
}

fn extra_segment(extra: &ExtraUsage, bar_width: usize) -> Option<String> {
    if !extra.is_enabled {
        return None;
    }
    let used = extra.used_credits_cents?;
    let limit = extra.monthly_limit_cents?;
    let spend = Style::Dim.paint(&format!("{}/{} extra", format_cents(used), format_cents(limit)));
    match extra.utilization {
        Some(pct) => Some(format!("{} {}", render_bar(clamp_percent(pct), bar_width), spend)),
        None => Some(spend),
    }
}

fn weekly_line(snapshot: &UsageSnapshot, bar_width: usize) -> Option<String> {
    let base = window_line(&snapshot.seven_day, "7d", "%b %-d, %H:%M", bar_width);
    let extra = snapshot
        .extra_usage
        .as_ref()
        .and_then(|e| extra_segment(e, bar_width));
    match (base, extra) {
        (Some(mut line), Some(seg)) => {
            line.push_str(" · ");
            line.push_str(&seg);
            Some(line)
        }
        (Some(line), None) => Some(line),
        (None, Some(seg)) => Some(seg),
        (None, None) => None,
    }
}

/// The 1–3 output lines for one invocation. A payload without a model display
/// name renders as the bare fallback label; a missing snapshot just means
/// fewer lines, never an error.
pub fn render_status(
    input: &StatusInput,
    usage: Option<&UsageSnapshot>,
    settings: &Settings,
    bar_width: usize,
) -> Vec<String> {
    if input.model.display_name.trim().is_empty() {
        return vec![FALLBACK_TEXT.to_string()];
    }
    let mut lines = vec![context_line(input, settings, bar_width)];
    if let Some(snapshot) = usage {
        if let Some(line) = window_line(&snapshot.five_hour, "5h", "%H:%M", bar_width) {
            lines.push(line);
        }
        if let Some(line) = weekly_line(snapshot, bar_width) {
            lines.push(line);
        }
    }
    lines
}
