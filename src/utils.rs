use std::io::Read;
use std::path::PathBuf;

/// Resolve the Claude config directories that hold credentials and settings.
/// An explicit override (CLI flag or CLAUDE_CONFIG_DIR) wins; otherwise
/// ~/.claude is preferred, then the XDG config dir.
pub fn claude_paths(override_env: Option<&str>) -> Vec<PathBuf> {
    let mut paths = vec![];
    if let Some(list) = override_env {
        for p in list.split(',') {
            let p = p.trim();
            if p.is_empty() {
                continue;
            }
            let pb = PathBuf::from(p);
            if pb.is_dir() {
                paths.push(pb);
            }
        }
        if !paths.is_empty() {
            return paths;
        }
    }
    let basedirs = directories::BaseDirs::new();
    let home = basedirs
        .as_ref()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"));
    let xdg_config = basedirs
        .as_ref()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| home.join(".config"));
    for base in [home.join(".claude"), xdg_config.join("claude")] {
        if base.is_dir() {
            paths.push(base);
        }
    }
    paths
}

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Thousands-grouped token count, e.g. 100000 -> "100,000".
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar amount from minor units, e.g. 1234 cents -> "$12.34".
pub fn format_cents(cents: f64) -> String {
    format!("${:.2}", cents / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(100_000), "100,000");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0.0), "$0.00");
        assert_eq!(format_cents(1234.0), "$12.34");
        assert_eq!(format_cents(5000.0), "$50.00");
    }
}
