//! Backend commands queued from UI to backend worker.

use shared::{domain::SubmissionId, protocol::AnalysisRequest};
use std::path::PathBuf;

#[derive(Debug)]
pub enum BackendCommand {
    Analyze {
        id: SubmissionId,
        request: AnalysisRequest,
    },
    EncodeImage {
        path: PathBuf,
    },
    ProbeService,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Analyze { .. } => "analyze",
            BackendCommand::EncodeImage { .. } => "encode_image",
            BackendCommand::ProbeService => "probe_service",
        }
    }
}
