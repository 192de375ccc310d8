//! Terminal rendering for the CLI.
//!
//! In `--json` mode only machine-readable documents reach stdout; all
//! decoration is suppressed and errors are written to stderr as
//! `{"error": ...}`.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use updates_core::{HttpResponse, ResponseHeaders};
use updates_manifest::ManifestDocument;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn success(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Verbose-only diagnostics on stderr.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// A `[name]` group heading inside a header block.
    pub fn section(&self, name: &str) {
        if !self.json {
            println!("\n{}", style(format!("[{}]", name)).cyan());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print an endpoint response.
    ///
    /// JSON mode prints the body alone. Otherwise the status, a header
    /// table, a summary of the manifest (or the error message) and the
    /// pretty-printed body are shown.
    pub fn response(&self, response: &HttpResponse) {
        let body = response.json_body::<Value>().ok();

        if self.json {
            match &body {
                Some(value) => self.json(value),
                None => println!("{}", String::from_utf8_lossy(&response.body)),
            }
            return;
        }

        self.header("Manifest response");
        println!("  {}", status_badge(response.status));
        for row in header_rows(&response.headers) {
            println!("  {}", style(row).dim());
        }

        println!();
        if response.is_success() {
            if let Ok(manifest) = response.json_body::<ManifestDocument>() {
                for (key, value) in manifest_summary(&manifest) {
                    self.kv(key, &value);
                }
            }
        } else if let Some(message) = body.as_ref().and_then(error_message) {
            println!("  {}", style(message).red().bold());
        }

        println!();
        match &body {
            Some(value) => self.json(value),
            None => println!("{}", String::from_utf8_lossy(&response.body)),
        }
    }

    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored HTTP status; 520 is labelled as the manifest error envelope.
pub fn status_badge(status: u16) -> String {
    match status {
        200..=299 => style(format!("{} OK", status)).green().to_string(),
        520 => style(format!("{} manifest error", status)).red().to_string(),
        300..=499 => style(status).yellow().to_string(),
        _ => style(status).red().to_string(),
    }
}

/// Header lines with names padded to a common column.
pub fn header_rows(headers: &ResponseHeaders) -> Vec<String> {
    let width = headers.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    headers
        .iter()
        .map(|(name, value)| format!("{:<width$}  {}", name, value, width = width))
        .collect()
}

/// The fields worth reading at a glance.
pub fn manifest_summary(manifest: &ManifestDocument) -> Vec<(&'static str, String)> {
    vec![
        ("id", manifest.id.clone()),
        ("createdAt", manifest.created_at.clone()),
        (
            "runtimeVersion",
            manifest
                .runtime_version
                .clone()
                .unwrap_or_else(|| "(none)".to_string()),
        ),
        ("launchAsset", manifest.launch_asset.url.clone()),
        ("assets", manifest.assets.len().to_string()),
    ]
}

/// Message of an `{"error": ...}` envelope.
pub fn error_message(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}
