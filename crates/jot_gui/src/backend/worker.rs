//! Background worker thread that executes host commands.

use crate::backend::{ConfirmRequest, ConfirmationChain, Host, HostCmd, HostEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use jot_core::config::env_flag_enabled;
use jot_core::constants::HOST_TRACE_ENV;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

const WORKER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
const HOST_WORKER_THREADS: usize = 2;

/// Handle for sending commands to, and receiving events from, the host worker.
///
/// Dropping the handle closes the command channel, which stops the worker and
/// drops its quit-request subscription.
pub struct HostHandle {
    pub cmd_tx: Sender<HostCmd>,
    pub evt_rx: Receiver<HostEvent>,
}

async fn forward_quit_requests(mut quit_rx: broadcast::Receiver<()>, evt_tx: Sender<HostEvent>) {
    loop {
        match quit_rx.recv().await {
            // Lagged receivers still owe exactly one quit request; extras coalesce.
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                if evt_tx.send(HostEvent::QuitRequested).is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    debug!("quit-request subscription closed");
}

/// Run one command against the host and build its completion event.
pub(crate) async fn execute(host: &dyn Host, chain: &ConfirmationChain, cmd: HostCmd) -> HostEvent {
    match cmd {
        HostCmd::UpdateTitle {
            id,
            filename,
            is_modified,
        } => HostEvent::TitleUpdated {
            id,
            result: host.update_title(filename, is_modified).await,
        },
        HostCmd::NewFile { id } => HostEvent::NewFileOpened {
            id,
            result: host.new_file().await,
        },
        HostCmd::OpenFile {
            id,
            has_unsaved_changes,
        } => HostEvent::FileOpened {
            id,
            result: host.open_file_with_confirmation(has_unsaved_changes).await,
        },
        HostCmd::SaveFile {
            id,
            file_path,
            content,
        } => HostEvent::FileSaved {
            id,
            result: host.save_file(file_path, content).await,
        },
        HostCmd::SaveAsFile { id, content } => HostEvent::FileSaved {
            id,
            result: host.save_as_file(content).await,
        },
        HostCmd::ClearDocument {
            id,
            has_unsaved_changes,
        } => HostEvent::ClearAnswered {
            id,
            result: host
                .clear_document_with_confirmation(has_unsaved_changes)
                .await,
        },
        HostCmd::AutoSaveDraft { id, content } => HostEvent::DraftSaved {
            id,
            result: host.auto_save_draft(content).await,
        },
        HostCmd::GetRecoveryContent { id } => HostEvent::RecoveryLoaded {
            id,
            result: host.get_recovery_content().await,
        },
        HostCmd::ClearRecoveryFile { id } => HostEvent::RecoveryCleared {
            id,
            result: host.clear_recovery_file().await,
        },
        HostCmd::ConfirmRecovery { id } => HostEvent::RecoveryAnswered {
            id,
            accepted: chain.confirm(&ConfirmRequest::recovery()).await,
        },
        HostCmd::HandleQuitRequest {
            id,
            has_unsaved_changes,
        } => HostEvent::QuitAnswered {
            id,
            result: host.handle_quit_request(has_unsaved_changes).await,
        },
        HostCmd::ExitApp { id } => HostEvent::ExitIssued {
            id,
            result: host.exit_app().await,
        },
    }
}

async fn run_command(
    host: &dyn Host,
    chain: &ConfirmationChain,
    cmd: HostCmd,
    trace_enabled: bool,
    evt_tx: &Sender<HostEvent>,
) {
    let name = cmd.name();
    let id = cmd.id();
    let started = Instant::now();
    let event = execute(host, chain, cmd).await;
    if trace_enabled {
        info!(
            target: "jot_gui::host_trace",
            command = name,
            request = %id,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "host command settled"
        );
    }
    let _ = evt_tx.send(event);
}

/// Spawn the worker thread that performs host calls off the UI thread.
///
/// Each command runs as its own task on a small tokio runtime, so a modal
/// dialog behind one command never delays another; completions are sent back
/// as [`HostEvent`] values that the UI polls each frame. Commands that touch
/// the recovery snapshot share one sequential lane instead, so an older
/// snapshot can never land after a newer one.
///
/// # Returns
/// A [`HostHandle`] containing the command sender and event receiver.
///
/// # Errors
/// Returns an error if the runtime cannot be built or the thread cannot be
/// spawned.
pub fn spawn_host_worker(host: Arc<dyn Host>, chain: ConfirmationChain) -> io::Result<HostHandle> {
    let (cmd_tx, cmd_rx) = unbounded::<HostCmd>();
    let (evt_tx, evt_rx) = unbounded();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(HOST_WORKER_THREADS)
        .thread_name("jot-host-task")
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("jot-host-worker".to_string())
        .spawn(move || {
            let trace_enabled = env_flag_enabled(HOST_TRACE_ENV);
            debug!(
                confirm_tiers = chain.tier_count(),
                trace_enabled, "host worker started"
            );
            let chain = Arc::new(chain);
            runtime.spawn(forward_quit_requests(
                host.subscribe_quit_requests(),
                evt_tx.clone(),
            ));

            let (snapshot_tx, mut snapshot_rx) = mpsc::unbounded_channel::<HostCmd>();
            {
                let host = Arc::clone(&host);
                let chain = Arc::clone(&chain);
                let evt_tx = evt_tx.clone();
                runtime.spawn(async move {
                    while let Some(cmd) = snapshot_rx.recv().await {
                        run_command(host.as_ref(), chain.as_ref(), cmd, trace_enabled, &evt_tx)
                            .await;
                    }
                });
            }

            for cmd in cmd_rx.iter() {
                if cmd.touches_recovery_file() {
                    if let Err(err) = snapshot_tx.send(cmd) {
                        warn!(command = err.0.name(), "recovery lane closed; command dropped");
                    }
                    continue;
                }
                let host = Arc::clone(&host);
                let chain = Arc::clone(&chain);
                let evt_tx = evt_tx.clone();
                runtime.spawn(async move {
                    run_command(host.as_ref(), chain.as_ref(), cmd, trace_enabled, &evt_tx).await;
                });
            }

            drop(snapshot_tx);
            runtime.shutdown_timeout(WORKER_SHUTDOWN_TIMEOUT);
            info!("host worker stopped");
        })?;

    Ok(HostHandle { cmd_tx, evt_rx })
}
