//! Core domain types for the Eunoia companion.
//!
//! This module defines the fundamental types used throughout the system:
//! - Cycle configuration and derived cycle facts
//! - Daily log entries (symptoms, mood, flow, notes)
//! - User profile and preferences
//! - Education topics and articles
//! - Chat wire types mirroring the backend contract

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

// ============================================================================
// Cycle Types
// ============================================================================

/// User-reported cycle parameters
///
/// This is the only cycle state that gets persisted. Everything derived from
/// it (current day, days until next period) is recomputed on demand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleConfig {
    pub last_period_start: NaiveDate,
    pub cycle_length: i64,
    pub period_duration: i64,
}

impl CycleConfig {
    /// Build a config assuming the last period started `period_duration`
    /// days before `today` (the first-run assumption)
    pub fn assumed_from(today: NaiveDate, cycle_length: i64, period_duration: i64) -> Self {
        Self {
            last_period_start: today - Duration::days(period_duration),
            cycle_length,
            period_duration,
        }
    }
}

/// Tunable constants behind the fertile-window estimate
///
/// These are medical approximations, not facts, so they live in configuration
/// rather than in the arithmetic.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePolicy {
    pub luteal_phase_days: i64,
    pub fertile_days_before: i64,
    pub fertile_days_after: i64,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self {
            luteal_phase_days: 14,
            fertile_days_before: 5,
            fertile_days_after: 1,
        }
    }
}

// ============================================================================
// Daily Log Types
// ============================================================================

/// Menstrual flow intensity levels
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowIntensity {
    Light,
    Medium,
    Heavy,
}

impl FlowIntensity {
    pub fn label(&self) -> &'static str {
        match self {
            FlowIntensity::Light => "Light",
            FlowIntensity::Medium => "Medium",
            FlowIntensity::Heavy => "Heavy",
        }
    }
}

impl std::str::FromStr for FlowIntensity {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(FlowIntensity::Light),
            "medium" => Ok(FlowIntensity::Medium),
            "heavy" => Ok(FlowIntensity::Heavy),
            other => Err(crate::Error::InvalidConfig(format!(
                "Unknown flow intensity '{}' (expected light, medium or heavy)",
                other
            ))),
        }
    }
}

/// One day's tracked entry
///
/// Entries are keyed by date; saving a second entry for the same date
/// replaces the first.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LogEntry {
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub flow: Option<FlowIntensity>,
    #[serde(default)]
    pub notes: String,
}

impl LogEntry {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.mood.is_none() && self.flow.is_none() && self.notes.is_empty()
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Local user identity
///
/// The id stands in for the external identity provider's opaque uid and
/// scopes every per-user key in the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: String,
}

impl Profile {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            display_name: display_name.into(),
        }
    }
}

// ============================================================================
// Education Types
// ============================================================================

/// A browsable education topic
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EducationTopic {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: String,
}

/// Full article content for a topic
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub sections: Vec<ArticleSection>,
}

/// One heading/body section within an article
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleSection {
    pub heading: String,
    pub body: String,
}

// ============================================================================
// Chat Wire Types
// ============================================================================

/// Message author, as the backend spells it
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a conversation
///
/// Timestamps arrive as ISO-8601 strings without a timezone and are kept as
/// sent; parsing happens at display time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: String,
}

/// Conversation listing entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub message_count: u32,
}

/// A conversation with its messages
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    pub messages: Vec<ChatMessage>,
}

/// Reply to a sent chat message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// A quick check-in mood and its supportive message
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickMood {
    pub emoji: String,
    pub message: String,
}

/// The complete built-in content catalog
#[derive(Clone, Debug)]
pub struct Catalog {
    pub symptoms: Vec<String>,
    pub tracker_moods: Vec<String>,
    pub quick_moods: Vec<QuickMood>,
    pub flow_levels: Vec<FlowIntensity>,
    pub avatars: Vec<String>,
    pub topics: Vec<EducationTopic>,
    pub articles: HashMap<u32, Article>,
}
