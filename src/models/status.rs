use serde::Deserialize;

/// Context window size Claude Code assumes when the payload carries none.
pub const DEFAULT_CONTEXT_WINDOW: u64 = 200_000;

#[derive(Deserialize, Debug, Default)]
pub struct ModelInfo {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CurrentUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
}

#[derive(Deserialize, Debug, Default)]
pub struct ContextWindow {
    #[serde(default)]
    pub context_window_size: u64,
    #[serde(default)]
    pub current_usage: CurrentUsage,
}

/// One JSON status payload as piped by Claude Code per statusline tick.
/// Every field may be absent; unknown fields are ignored.
#[derive(Deserialize, Debug, Default)]
pub struct StatusInput {
    #[serde(default)]
    pub model: ModelInfo,
    #[serde(default)]
    pub context_window: ContextWindow,
}

impl StatusInput {
    /// Configured window size, with the 200k default when zero or absent.
    pub fn window_size(&self) -> u64 {
        match self.context_window.context_window_size {
            0 => DEFAULT_CONTEXT_WINDOW,
            n => n,
        }
    }

    /// Total tokens currently occupying the window (input + cache writes + cache reads).
    /// Saturating: an absurd payload must degrade, not panic.
    pub fn current_total(&self) -> u64 {
        let u = &self.context_window.current_usage;
        u.input_tokens
            .saturating_add(u.cache_creation_input_tokens)
            .saturating_add(u.cache_read_input_tokens)
    }

    /// Window fill as a rounded whole percentage. Not clamped here; the bar
    /// renderer clamps for display.
    pub fn percent_used(&self) -> u32 {
        (self.current_total() as f64 / self.window_size() as f64 * 100.0).round() as u32
    }

    pub fn tokens_remaining(&self) -> u64 {
        self.window_size().saturating_sub(self.current_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_defaults() {
        let input: StatusInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.model.display_name, "");
        assert_eq!(input.window_size(), DEFAULT_CONTEXT_WINDOW);
        assert_eq!(input.current_total(), 0);
        assert_eq!(input.percent_used(), 0);
        assert_eq!(input.tokens_remaining(), DEFAULT_CONTEXT_WINDOW);
    }

    #[test]
    fn half_full_window() {
        let input: StatusInput = serde_json::from_str(
            r#"{
                "model": {"display_name": "Claude Sonnet"},
                "context_window": {
                    "context_window_size": 200000,
                    "current_usage": {
                        "input_tokens": 60000,
                        "cache_creation_input_tokens": 15000,
                        "cache_read_input_tokens": 25000
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(input.current_total(), 100_000);
        assert_eq!(input.percent_used(), 50);
        assert_eq!(input.tokens_remaining(), 100_000);
    }

    #[test]
    fn zero_window_size_falls_back_to_default() {
        let input: StatusInput = serde_json::from_str(
            r#"{"context_window": {"context_window_size": 0, "current_usage": {"input_tokens": 50000}}}"#,
        )
        .unwrap();
        assert_eq!(input.window_size(), 200_000);
        assert_eq!(input.percent_used(), 25);
    }

    #[test]
    fn overfull_window_does_not_underflow() {
        let input: StatusInput = serde_json::from_str(
            r#"{"context_window": {"context_window_size": 1000, "current_usage": {"input_tokens": 1500}}}"#,
        )
        .unwrap();
        assert_eq!(input.percent_used(), 150);
        assert_eq!(input.tokens_remaining(), 0);
    }

    #[test]
    fn huge_token_counts_saturate_instead_of_overflowing() {
        let input: StatusInput = serde_json::from_str(&format!(
            r#"{{"context_window": {{"current_usage": {{
                "input_tokens": {max},
                "cache_creation_input_tokens": {max},
                "cache_read_input_tokens": 7
            }}}}}}"#,
            max = u64::MAX
        ))
        .unwrap();
        assert_eq!(input.current_total(), u64::MAX);
        assert_eq!(input.tokens_remaining(), 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input: StatusInput = serde_json::from_str(
            r#"{"session_id": "abc", "model": {"id": "claude-x", "display_name": "Claude"}}"#,
        )
        .unwrap();
        assert_eq!(input.model.display_name, "Claude");
    }
}
