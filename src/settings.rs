use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Display-only label for the configured reasoning intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    High,
    Medium,
    Low,
}

impl EffortLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EffortLevel::High => "high",
            EffortLevel::Medium => "medium",
            EffortLevel::Low => "low",
        }
    }
}

/// Read-only slice of the Claude settings file. Missing file or unparsable
/// content degrades to defaults; settings never fail a render.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub always_thinking_enabled: bool,
    pub model: Option<String>,
    pub effort_level: Option<EffortLevel>,
}

impl Settings {
    /// Effort label for the right-hand column. An explicit level always
    /// shows; the always-thinking flag alone implies "medium" unless an
    /// explicit model id is configured.
    pub fn effort_label(&self) -> Option<&'static str> {
        if let Some(effort) = self.effort_level {
            return Some(effort.as_str());
        }
        if self.always_thinking_enabled && self.model.is_none() {
            return Some(EffortLevel::Medium.as_str());
        }
        None
    }
}

/// First parsable settings.json under the Claude config paths.
/// CLAUDE_SETTINGS_FILE overrides the search.
pub fn load(claude_paths: &[PathBuf]) -> Settings {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(p) = std::env::var("CLAUDE_SETTINGS_FILE") {
        if !p.trim().is_empty() {
            candidates.push(PathBuf::from(p));
        }
    }
    for base in claude_paths {
        candidates.push(base.join("settings.json"));
    }
    for path in candidates {
        if let Some(settings) = load_file(&path) {
            return settings;
        }
    }
    Settings::default()
}

fn load_file(path: &Path) -> Option<Settings> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_settings(&content).ok()
}

fn parse_settings(content: &str) -> anyhow::Result<Settings> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_effort_wins() {
        let s =
            parse_settings(r#"{"alwaysThinkingEnabled": true, "effortLevel": "high"}"#).unwrap();
        assert_eq!(s.effort_label(), Some("high"));
    }

    #[test]
    fn effort_is_read_from_the_effort_level_key() {
        // The settings file spells the key "effortLevel"; any other spelling
        // must be ignored rather than silently picked up.
        let s = parse_settings(r#"{"effortLevel": "low"}"#).unwrap();
        assert_eq!(s.effort_level, Some(EffortLevel::Low));

        let s = parse_settings(r#"{"effort": "low"}"#).unwrap();
        assert_eq!(s.effort_level, None);
    }

    #[test]
    fn flag_without_level_or_model_defaults_to_medium() {
        let s = parse_settings(r#"{"alwaysThinkingEnabled": true}"#).unwrap();
        assert_eq!(s.effort_label(), Some("medium"));
    }

    #[test]
    fn explicit_model_suppresses_the_default() {
        let s =
            parse_settings(r#"{"alwaysThinkingEnabled": true, "model": "claude-opus-4"}"#).unwrap();
        assert_eq!(s.effort_label(), None);
    }

    #[test]
    fn no_flag_means_no_label() {
        let s = parse_settings("{}").unwrap();
        assert_eq!(s.effort_label(), None);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let s = parse_settings(r#"{"statusLine": {"type": "command"}, "effortLevel": "low"}"#)
            .unwrap();
        assert_eq!(s.effort_label(), Some("low"));
    }

    #[test]
    fn missing_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load(&[dir.path().to_path_buf()]);
        assert_eq!(s.effort_label(), None);
        assert!(!s.always_thinking_enabled);
    }

    #[test]
    fn settings_file_in_config_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"alwaysThinkingEnabled": true, "effortLevel": "low"}"#,
        )
        .unwrap();
        let s = load(&[dir.path().to_path_buf()]);
        assert_eq!(s.effort_label(), Some("low"));
    }
}
