// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Each command builds one [`Report`] and emits it once, as labelled lines
//! on stderr or a single JSON object on stdout under `--json`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Outcome of a command: accept/reject headline plus ordered fields.
#[derive(Debug, Clone)]
pub struct Report {
    accepted: bool,
    headline: String,
    fields: Vec<(&'static str, Value)>,
}

impl Report {
    pub fn accepted(headline: impl Into<String>) -> Self {
        Self {
            accepted: true,
            headline: headline.into(),
            fields: Vec::new(),
        }
    }

    pub fn rejected(headline: impl Into<String>) -> Self {
        Self {
            accepted: false,
            headline: headline.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// The JSON form: `{"ok": bool, <fields>...}`.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("ok".into(), Value::Bool(self.accepted));
        for (key, value) in &self.fields {
            obj.insert((*key).into(), value.clone());
        }
        Value::Object(obj)
    }

    pub fn emit(&self) {
        if is_json() {
            let json = self.to_json();
            match serde_json::to_string_pretty(&json) {
                Ok(s) => println!("{s}"),
                Err(_) => println!("{json}"),
            }
            return;
        }
        if self.accepted {
            eprintln!("{}", self.headline.green());
        } else {
            eprintln!("{}", self.headline.red());
        }
        for (key, value) in &self.fields {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            eprintln!("  {} {text}", format!("{key}:").bold());
        }
    }
}

/// Spinner for network calls; hidden in JSON mode.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn fail_with_hint(error: &str, hint: &str) -> anyhow::Error {
    anyhow::anyhow!("{}\n{} {}", error.red(), "hint:".bold(), hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_form_carries_verdict_and_fields() {
        let report = Report::rejected("proof rejected")
            .field("code", "REPLAY_DETECTED")
            .field("status", 401);
        let json = report.to_json();
        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "REPLAY_DETECTED");
        assert_eq!(json["status"], 401);
        assert!(json.get("proof rejected").is_none());
    }
}
