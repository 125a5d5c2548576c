//! Shared constants used across Jot crates.

/// Product name shown in window titles and dialogs.
pub const APP_NAME: &str = "Jot";

/// Display name for a document that has never been saved.
pub const UNTITLED_NAME: &str = "Untitled";

/// Label of the first window; later windows get generated labels.
pub const DEFAULT_WINDOW_LABEL: &str = "main";

/// Delay between the last keystroke and modification detection.
pub const DEFAULT_INPUT_DEBOUNCE_MS: u64 = 100;

/// Idle time after the last keystroke before a recovery snapshot is written.
pub const DEFAULT_AUTO_SAVE_IDLE_MS: u64 = 1_500;

/// Code-point step at which growing content forces an immediate snapshot.
pub const DEFAULT_AUTO_SAVE_VOLUME_STEP: usize = 100;

/// How long the editor must stay unfocused before a snapshot is forced.
pub const DEFAULT_FOCUS_OUT_GRACE_MS: u64 = 500;

/// Delay after startup before the recovery check runs, so the UI can mount.
pub const DEFAULT_RECOVERY_SETTLE_MS: u64 = 300;

/// Directory name (under the user cache dir) that holds recovery files.
pub const RECOVERY_DIR_NAME: &str = "jot";

/// Environment variable used to hand a window label to a spawned window.
pub const WINDOW_LABEL_ENV: &str = "JOT_WINDOW_LABEL";

/// Environment flag that logs how long each host command took.
pub const HOST_TRACE_ENV: &str = "JOT_HOST_TRACE";
