//! Golden JSON snapshots.
//!
//! Values are rendered as pretty JSON with sorted object keys and a trailing
//! newline so goldens diff cleanly. Set `BA_UPDATE_SNAPSHOTS=1` to rewrite
//! goldens instead of comparing against them.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that switches snapshot calls to rewriting their golden.
pub const UPDATE_SNAPSHOTS_ENV: &str = "BA_UPDATE_SNAPSHOTS";

/// Whether a snapshot call compares against its golden or rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Fail when the rendered value differs from the golden.
    Verify,
    /// Overwrite the golden with the rendered value.
    Update,
}

impl SnapshotMode {
    /// Read the mode from [`UPDATE_SNAPSHOTS_ENV`].
    pub fn from_env() -> Self {
        match std::env::var(UPDATE_SNAPSHOTS_ENV) {
            Ok(raw) if is_truthy(&raw) => SnapshotMode::Update,
            _ => SnapshotMode::Verify,
        }
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Compare `value` with the golden at `path`, honouring [`UPDATE_SNAPSHOTS_ENV`].
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    check_json_snapshot(path.as_ref(), value, SnapshotMode::from_env())
}

/// Compare or rewrite the golden at `path` according to `mode`.
pub fn check_json_snapshot<T: Serialize>(path: &Path, value: &T, mode: SnapshotMode) -> Result<()> {
    let actual = canonical_json(value)?;
    if mode == SnapshotMode::Update {
        return write_text(path, &actual);
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "no golden at {} (set {UPDATE_SNAPSHOTS_ENV}=1 to record it)",
            path.display()
        )
    })?;
    if let Some((line, want, got)) = first_difference(&expected, &actual) {
        anyhow::bail!(
            "golden {} differs at line {line}: expected `{want}`, got `{got}` \
             (set {UPDATE_SNAPSHOTS_ENV}=1 to accept)",
            path.display()
        );
    }
    Ok(())
}

/// Write `value` in canonical form, creating parent directories.
pub fn write_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    write_text(path.as_ref(), &canonical_json(value)?)
}

/// Render `value` as pretty JSON with sorted object keys and a trailing newline.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let mut value = serde_json::to_value(value).context("snapshot value is not serialisable")?;
    sort_keys(&mut value);
    let mut text = serde_json::to_string_pretty(&value).context("failed to render snapshot")?;
    text.push('\n');
    Ok(text)
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// First line (1-based) where the two texts disagree. Line endings and a
/// missing final newline are not differences.
fn first_difference(expected: &str, actual: &str) -> Option<(usize, String, String)> {
    let mut expected = expected.lines();
    let mut actual = actual.lines();
    let mut line = 1;
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return None,
            (want, got) if want == got => line += 1,
            (want, got) => {
                return Some((
                    line,
                    want.unwrap_or("<end of file>").to_string(),
                    got.unwrap_or("<end of file>").to_string(),
                ))
            }
        }
    }
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_nested_keys() {
        let text = canonical_json(&json!({ "b": 1, "a": [{ "d": 2, "c": 3 }] })).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.find("\"c\"").unwrap() < text.find("\"d\"").unwrap());
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn first_difference_reports_the_changed_line() {
        assert_eq!(first_difference("a\nb\n", "a\r\nb"), None);
        assert_eq!(
            first_difference("a\nb\n", "a\nc\n"),
            Some((2, "b".to_string(), "c".to_string()))
        );
        assert_eq!(
            first_difference("a\n", "a\nb\n"),
            Some((2, "<end of file>".to_string(), "b".to_string()))
        );
    }

    #[test]
    fn verify_mode_detects_drift_and_update_mode_rewrites() {
        let path = std::env::temp_dir()
            .join(format!("ba-golden-{}", std::process::id()))
            .join("vitals.json");

        let missing = check_json_snapshot(&path, &json!({ "health": 100 }), SnapshotMode::Verify);
        assert!(missing.unwrap_err().to_string().contains("no golden"));

        check_json_snapshot(&path, &json!({ "health": 100 }), SnapshotMode::Update).unwrap();
        check_json_snapshot(&path, &json!({ "health": 100 }), SnapshotMode::Verify).unwrap();
        let drift = check_json_snapshot(&path, &json!({ "health": 0 }), SnapshotMode::Verify)
            .unwrap_err()
            .to_string();
        assert!(drift.contains("line 2"), "unexpected error: {drift}");

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn truthy_values_enable_updates() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" YES "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
