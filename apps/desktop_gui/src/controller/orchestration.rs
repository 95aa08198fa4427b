//! Command orchestration helpers from UI actions to backend command queue.

use std::path::PathBuf;

use client_core::AnalyzeError;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::AppState;

/// Queues `cmd`, writing a user-facing reason into `status` when it cannot be queued.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend command processor disconnected; restart the app".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

/// Starts a submission and hands it to the backend. A submission that cannot be
/// queued is completed as a failure right away so the loading state never sticks.
pub fn submit_claim(state: &mut AppState, cmd_tx: &Sender<BackendCommand>) -> bool {
    let Some(ticket) = state.submission.begin_submission() else {
        return false;
    };
    let id = ticket.id;
    let cmd = BackendCommand::Analyze {
        id,
        request: ticket.request,
    };
    if dispatch_backend_command(cmd_tx, cmd, &mut state.status) {
        state.status = "Analyzing claim...".to_string();
        true
    } else {
        let reason = state.status.clone();
        state
            .submission
            .complete_submission(id, Err(AnalyzeError::Connect(reason)));
        false
    }
}

pub fn request_image_encoding(
    state: &mut AppState,
    cmd_tx: &Sender<BackendCommand>,
    path: PathBuf,
) -> bool {
    let queued = dispatch_backend_command(
        cmd_tx,
        BackendCommand::EncodeImage { path },
        &mut state.status,
    );
    if queued {
        state.status = "Reading image...".to_string();
    }
    queued
}
