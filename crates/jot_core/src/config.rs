//! Configuration loading from environment variables.
//!
//! Every reader takes a variable lookup so tests can feed a fixed table
//! instead of mutating the process environment.

use crate::constants::{
    DEFAULT_AUTO_SAVE_IDLE_MS, DEFAULT_AUTO_SAVE_VOLUME_STEP, DEFAULT_FOCUS_OUT_GRACE_MS,
    DEFAULT_INPUT_DEBOUNCE_MS, DEFAULT_RECOVERY_SETTLE_MS, DEFAULT_WINDOW_LABEL,
    RECOVERY_DIR_NAME, WINDOW_LABEL_ENV,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Runtime configuration for one Jot window.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub recovery_dir: String,
    pub window_label: String,
    pub input_debounce_ms: u64,
    pub auto_save_idle_ms: u64,
    pub auto_save_volume_step: usize,
    pub focus_out_grace_ms: u64,
    pub recovery_settle_ms: u64,
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Home directory from `HOME`, then `USERPROFILE`, then `HOMEDRIVE` + `HOMEPATH`.
fn home_dir(lookup: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    non_blank(lookup("HOME"))
        .or_else(|| non_blank(lookup("USERPROFILE")))
        .or_else(|| {
            let drive = non_blank(lookup("HOMEDRIVE"))?;
            let path = non_blank(lookup("HOMEPATH"))?;
            Some(format!("{}{}", drive, path))
        })
        .map(PathBuf::from)
}

/// Where recovery snapshots live.
///
/// An explicit `~/...` override is expanded against `home`; without an
/// override the directory sits under `<home>/.cache`, falling back to the
/// working directory when no home is known.
fn recovery_dir(raw: Option<String>, home: Option<&Path>) -> String {
    if let Some(raw) = raw {
        if let (Some(rest), Some(home)) = (raw.strip_prefix("~/"), home) {
            return home.join(rest).to_string_lossy().to_string();
        }
        return raw;
    }
    let base = home
        .map(Path::to_path_buf)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".cache")
        .join(RECOVERY_DIR_NAME)
        .to_string_lossy()
        .to_string()
}

/// Parse a boolean-like flag value.
///
/// `1`, `true`, `yes` and `on` are truthy; `0`, `false`, `no`, `off` and the
/// empty string are falsy. Case and surrounding whitespace are ignored.
///
/// # Returns
/// `None` for anything else.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn flag_in(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> bool {
    lookup(name)
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Read a boolean flag such as `JOT_HOST_TRACE` from the environment.
/// Missing or unrecognized values count as off.
pub fn env_flag_enabled(name: &str) -> bool {
    flag_in(&process_env, name)
}

fn number_in<T: FromStr>(lookup: &dyn Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    lookup(name)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}

impl Config {
    /// Load configuration from `JOT_*` environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when variables are missing
    /// or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let home = home_dir(lookup);
        let window_label = lookup(WINDOW_LABEL_ENV)
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| DEFAULT_WINDOW_LABEL.to_string());
        Self {
            recovery_dir: recovery_dir(lookup("JOT_RECOVERY_DIR"), home.as_deref()),
            window_label,
            input_debounce_ms: number_in(lookup, "JOT_INPUT_DEBOUNCE_MS", DEFAULT_INPUT_DEBOUNCE_MS),
            auto_save_idle_ms: number_in(lookup, "JOT_AUTO_SAVE_IDLE_MS", DEFAULT_AUTO_SAVE_IDLE_MS),
            auto_save_volume_step: number_in(
                lookup,
                "JOT_AUTO_SAVE_VOLUME_STEP",
                DEFAULT_AUTO_SAVE_VOLUME_STEP,
            ),
            focus_out_grace_ms: number_in(
                lookup,
                "JOT_FOCUS_OUT_GRACE_MS",
                DEFAULT_FOCUS_OUT_GRACE_MS,
            ),
            recovery_settle_ms: number_in(
                lookup,
                "JOT_RECOVERY_SETTLE_MS",
                DEFAULT_RECOVERY_SETTLE_MS,
            ),
        }
    }
}
