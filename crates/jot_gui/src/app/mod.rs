//! egui shell that hosts the editor session in a native window.

mod input;

use crate::backend::desktop::{DesktopHost, ExitGate, NativeMessageBox, QuitSignal};
use crate::backend::{spawn_host_worker, ConfirmationChain, Host};
use crate::session::{EditorSession, SessionTimings};
use eframe::egui;
use jot_core::{Config, HostError, RecoveryStore};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [320.0, 200.0];

const TEXT_EDITOR_ID: &str = "jot_text_editor";
const HOST_POLL_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Native egui application shell.
///
/// Owns the [`EditorSession`] and feeds it frame ticks, text edits, focus and
/// visibility changes, shortcuts and window-close requests. Host calls run on
/// the worker thread, so `update` never blocks on dialogs or file I/O.
pub(crate) struct JotApp {
    session: EditorSession,
    quit_signal: QuitSignal,
    exit_gate: ExitGate,
    editor_focused: bool,
    window_focused: bool,
    window_visible: bool,
}

impl JotApp {
    /// Start the host worker and the session for the window behind `cc`.
    ///
    /// # Errors
    /// Returns [`HostError::Io`] when the worker runtime or thread cannot be
    /// started.
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self, HostError> {
        let store = RecoveryStore::new(&config.recovery_dir, &config.window_label);
        debug!(path = %store.path().display(), "recovery store ready");
        let host = DesktopHost::new(cc.egui_ctx.clone(), store);
        let quit_signal = host.quit_signal();
        let exit_gate = host.exit_gate();

        let host: Arc<dyn Host> = Arc::new(host);
        let chain = ConfirmationChain::for_host(Arc::clone(&host), Arc::new(NativeMessageBox));
        let worker = spawn_host_worker(host, chain)?;

        let mut session = EditorSession::new(worker, SessionTimings::from_config(&config));
        session.start(Instant::now());

        Ok(Self {
            session,
            quit_signal,
            exit_gate,
            editor_focused: false,
            window_focused: true,
            window_visible: true,
        })
    }

    /// Turn a native close into a `quit-requested` signal unless the host
    /// already approved the exit.
    fn intercept_close(&mut self, ctx: &egui::Context) {
        if !ctx.input(|input| input.viewport().close_requested()) {
            return;
        }
        if self.exit_gate.is_open() {
            info!("window closing");
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        self.quit_signal.emit();
        ctx.request_repaint_after(HOST_POLL_INTERVAL);
    }

    fn track_window_state(&mut self, ctx: &egui::Context, now: Instant) {
        let (focused, minimized) =
            ctx.input(|input| (input.viewport().focused, input.viewport().minimized));
        if let Some(focused) = focused {
            if focused != self.window_focused {
                self.window_focused = focused;
                self.session.on_window_focus_changed(focused, now);
            }
        }
        if let Some(minimized) = minimized {
            let visible = !minimized;
            if visible != self.window_visible {
                self.window_visible = visible;
                self.session.on_visibility_changed(visible, now);
            }
        }
    }

    fn render_editor(&mut self, ctx: &egui::Context, now: Instant) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let editor = egui::TextEdit::multiline(self.session.text_mut())
                        .id(egui::Id::new(TEXT_EDITOR_ID))
                        .font(egui::TextStyle::Monospace)
                        .frame(false)
                        .lock_focus(true)
                        .desired_width(f32::INFINITY);
                    let response = ui.add_sized(ui.available_size(), editor);

                    if response.changed() {
                        self.session.on_input(now);
                    }
                    let focused = response.has_focus();
                    if focused != self.editor_focused {
                        self.editor_focused = focused;
                        self.session.on_editor_focus_changed(focused, now);
                    }
                    if self.session.take_focus_request() {
                        response.request_focus();
                    }
                });
        });
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let mut repaint_after = if self.session.awaiting_host() {
            HOST_POLL_INTERVAL
        } else {
            IDLE_REPAINT_INTERVAL
        };
        if let Some(deadline) = self.session.next_deadline() {
            repaint_after = repaint_after.min(deadline.saturating_duration_since(now));
        }
        ctx.request_repaint_after(repaint_after);
    }
}

impl eframe::App for JotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.intercept_close(ctx);
        self.track_window_state(ctx, now);

        let chords = ctx.input_mut(|state| input::take_shortcuts(&mut state.events));
        for chord in chords {
            self.session.handle_shortcut(chord, now);
        }

        self.session.tick(now);
        self.render_editor(ctx, now);
        self.schedule_repaint(ctx, now);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(
            modified = self.session.is_modified(),
            quit_state = ?self.session.quit_state(),
            "jot window exiting"
        );
    }
}
