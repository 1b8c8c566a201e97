//! Shared rendering and prompting helpers

use ansflow_core::dto::ActionResult;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use serde_json::Value as JsonValue;

/// Colorize a backend status string for display
pub fn colorize_status(status: &str) -> ColoredString {
    match status {
        "success" | "active" | "authenticated" | "deployed" | "healthy" => status.green(),
        "running" | "building" => status.cyan(),
        "pending" | "draft" | "created" | "restarting" | "needs_auth" => status.yellow(),
        "failed" | "error" | "offline" | "dead" | "timeout" => status.red(),
        _ => status.dimmed(),
    }
}

pub fn fmt_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn fmt_opt_time(time: Option<&DateTime<Utc>>) -> String {
    time.map(fmt_time).unwrap_or_else(|| "-".to_string())
}

pub fn print_success(message: &str) {
    println!("{}", format!("✓ {}", message).green().bold());
}

pub fn print_empty(kind: &str) {
    println!("{}", format!("No {} entries found.", kind).yellow());
}

pub fn print_header(kind: &str, count: usize) {
    println!("{}", format!("Found {} {}(s):", count, kind).bold());
    println!();
}

/// Label shown above numbers generated client side
pub fn print_simulated_label() {
    println!(
        "{}",
        "⚠ simulated data: the analytics backend returned nothing usable"
            .yellow()
            .bold()
    );
}

/// Report the outcome of an action endpoint
pub fn print_action(action: &str, result: &ActionResult) {
    if result.is_failure() {
        println!("{}", format!("✗ {} failed", action).red().bold());
    } else {
        print_success(&format!("{} requested", action));
    }
    if let Some(message) = &result.message {
        println!("  {}", message.dimmed());
    }
    if let Some(status) = &result.status {
        println!("  Status: {}", colorize_status(status));
    }
}

/// Ask before a destructive action; `assume_yes` skips the prompt
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(inquire::Confirm::new(prompt).with_default(false).prompt()?)
}

/// Parse a JSON argument (`--config '{"key": 1}'`)
pub fn parse_json(s: &str) -> std::result::Result<JsonValue, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
}

/// Parse a single key=value pair
pub fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Collect key=value parameters into a JSON object
pub fn params_to_json(params: Vec<(String, String)>) -> JsonValue {
    JsonValue::Object(
        params
            .into_iter()
            .map(|(k, v)| (k, JsonValue::String(v)))
            .collect(),
    )
}

/// Read a text argument, `@path` reads the file instead
pub fn read_text_arg(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e)),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("branch=main").unwrap(),
            ("branch".to_string(), "main".to_string())
        );
        assert_eq!(
            parse_key_val("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("branch").is_err());
    }

    #[test]
    fn test_params_to_json() {
        let params = vec![("branch".to_string(), "main".to_string())];
        assert_eq!(params_to_json(params), json!({"branch": "main"}));
        assert_eq!(params_to_json(Vec::new()), json!({}));
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_json(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert!(parse_json("{a: 1}").unwrap_err().starts_with("invalid JSON"));
    }

    #[test]
    fn test_read_text_arg() {
        let dir = std::env::temp_dir().join(format!("ansflow-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("inventory.ini");
        std::fs::write(&file, "[web]\nweb1").unwrap();

        assert_eq!(read_text_arg("inline").unwrap(), "inline");
        assert_eq!(
            read_text_arg(&format!("@{}", file.display())).unwrap(),
            "[web]\nweb1"
        );
        assert!(read_text_arg("@/nonexistent/inventory.ini").is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
