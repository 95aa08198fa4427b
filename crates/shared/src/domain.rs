use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(SubmissionId);

impl SubmissionId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Client behaviour profile.
///
/// `Basic` sends images, never times out, renders non-2xx bodies as results and
/// reports failures through a blocking alert. `Hardened` drops images from the
/// request body, bounds the wait, treats non-2xx as failures and keeps the last
/// failure in an inline error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientVariant {
    Basic,
    #[default]
    Hardened,
}

impl ClientVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientVariant::Basic => "basic",
            ClientVariant::Hardened => "hardened",
        }
    }

    pub fn supports_images(self) -> bool {
        self == ClientVariant::Basic
    }

    pub fn enforces_timeout(self) -> bool {
        self == ClientVariant::Hardened
    }

    pub fn rejects_error_status(self) -> bool {
        self == ClientVariant::Hardened
    }
}

impl fmt::Display for ClientVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown client variant '{0}' (expected 'basic' or 'hardened')")]
pub struct UnknownVariant(pub String);

impl FromStr for ClientVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "a" => Ok(ClientVariant::Basic),
            "hardened" | "b" => Ok(ClientVariant::Hardened),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}
