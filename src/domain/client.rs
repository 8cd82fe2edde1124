use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Status lane a client sits in on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lane {
    Backlog,
    InProgress,
    Complete,
}

impl Lane {
    /// All lanes in board order
    pub const ALL: [Lane; 3] = [Lane::Backlog, Lane::InProgress, Lane::Complete];

    /// Returns the wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Position of the lane in board order, used when sorting by status
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Backlog => 0,
            Self::InProgress => 1,
            Self::Complete => 2,
        }
    }
}

impl FromStr for Lane {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Self::Backlog),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            other => Err(crate::error::BoardError::InvalidLane(other.to_string())),
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client tracked on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "status")]
    pub lane: Lane,
    pub priority: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client placed at the given lane and priority
    pub fn new(id: i64, name: String, lane: Lane, priority: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            lane,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description
    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
        self.updated_at = Utc::now();
    }
}
