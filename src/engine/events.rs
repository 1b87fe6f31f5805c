use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Append-only session event log, kept beside the config file so it never
/// collides with a user directory.
pub const EVENTS_LOG: &str = "events.jsonl";

/// Type of session events that can be logged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventType {
    ProfileAdded,
    ProfileRemoved,
    LoggedIn,
    LoggedOut,
    Renamed,
    PasswordChanged,
}

/// Session event stored as JSONL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub user_name: String,
    pub event_type: SessionEventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl SessionEvent {
    pub fn new(
        user_name: impl Into<String>,
        event_type: SessionEventType,
        details: serde_json::Value,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            user_name: user_name.into(),
            event_type,
            timestamp: Utc::now(),
            details,
        }
    }
}

/// Wraps the event log path inside the workspace config directory.
#[derive(Debug, Clone)]
pub struct SessionLog {
    events_path: PathBuf,
}

impl SessionLog {
    pub fn for_config_dir(config_dir: &Path) -> Self {
        Self {
            events_path: config_dir.join(EVENTS_LOG),
        }
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }

    pub fn append_event(&self, event: &SessionEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)
            .with_context(|| format!("Failed opening event log {:?}", self.events_path))?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<SessionEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: SessionEvent = serde_json::from_str(line)
                .with_context(|| format!("Malformed event in {:?}", self.events_path))?;
            events.push(event);
        }
        Ok(events)
    }
}
