use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const GENRES: &[&str] = &[
    "Self-help",
    "Business",
    "Productivity",
    "Finance",
    "Health",
    "Technology/AI",
    "Education",
];

pub const TONES: &[&str] = &["Neutral", "Motivational", "Professional", "Friendly"];

/// What the user asked the backend to write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub genre: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tone: String,
    pub audience: String,
}

/// Opaque job identifier handed out by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

impl GenerationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

/// Delays driving the poll loop and the demo simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub poll_interval: Duration,
    pub simulation_step: Duration,
    pub simulation_settle: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(default_poll_interval_ms()),
            simulation_step: Duration::from_millis(default_simulation_step_ms()),
            simulation_settle: Duration::from_millis(default_simulation_settle_ms()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A short-lived message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            at: Local::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_simulation_step_ms")]
    pub simulation_step_ms: u64,
    #[serde(default = "default_simulation_settle_ms")]
    pub simulation_settle_ms: u64,
}

const fn default_timeout() -> u64 {
    30
}

const fn default_poll_interval_ms() -> u64 {
    2000
}

const fn default_simulation_step_ms() -> u64 {
    2000
}

const fn default_simulation_settle_ms() -> u64 {
    1000
}

impl AppConfig {
    pub const fn timing(&self) -> Timing {
        Timing {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            simulation_step: Duration::from_millis(self.simulation_step_ms),
            simulation_settle: Duration::from_millis(self.simulation_settle_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: default_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            simulation_step_ms: default_simulation_step_ms(),
            simulation_settle_ms: default_simulation_settle_ms(),
        }
    }
}
