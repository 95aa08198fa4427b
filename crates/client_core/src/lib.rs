//! Claim-submission lifecycle for the Veritas analysis service: the HTTP
//! client, failure classification, submission state, and result rendering.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod image;
pub mod render;

pub use client::{bounded_wait, AnalysisClient, ClaimAnalyzer};
pub use config::{load_settings, Settings, SettingsError};
pub use controller::{
    SubmissionController, SubmissionOutcome, SubmissionState, SubmissionTicket,
    IMAGE_PLACEHOLDER_TEXT, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
pub use error::AnalyzeError;
pub use image::{encode_image_file, EncodedImage};
pub use render::{render_text_report, ResultView, Severity};
