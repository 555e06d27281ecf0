// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "EVENTS_FEEDS_PATH";

/// Load the syndication feed list from an explicit path. Supports TOML or
/// JSON formats.
pub fn load_feeds_from(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading feeds from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load the feed list using env var + fallbacks:
/// 1) $EVENTS_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
///
/// No file at all means no syndication feeds, which is a valid degraded
/// configuration, not an error.
pub fn load_feeds_default() -> Result<Vec<String>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("EVENTS_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("feeds");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feeds format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<String>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn dedup_trim_and_formats_work() {
        let toml = r#"feeds = [" https://a.test/rss ", "", "https://b.test/rss", "https://b.test/rss"]"#;
        let json = r#"["https://c.test/rss", "  https://b.test/rss  ", ""]"#;
        let toml_out = parse_toml(toml).unwrap();
        assert_eq!(
            toml_out,
            vec!["https://a.test/rss".to_string(), "https://b.test/rss".to_string()]
        );
        let json_out = parse_json(json).unwrap();
        assert_eq!(
            json_out,
            vec!["https://b.test/rss".to_string(), "https://c.test/rss".to_string()]
        );
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD in a temp dir so a real config/ in the repo can't
        // interfere.
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_PATH);

        // No files in the temp CWD means an empty list.
        let v = load_feeds_default().unwrap();
        assert!(v.is_empty());

        // Env wins over the fallback chain.
        let p_json = tmp.path().join("feeds.json");
        fs::write(&p_json, r#"["https://x.test/rss"]"#).unwrap();
        env::set_var(ENV_PATH, p_json.display().to_string());
        let v2 = load_feeds_default().unwrap();
        assert_eq!(v2, vec!["https://x.test/rss".to_string()]);
        env::remove_var(ENV_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
