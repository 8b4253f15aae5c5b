//! Conversation turns and their plain-text export.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Coach,
    User,
}

impl Speaker {
    fn label(&self) -> &'static str {
        match self {
            Speaker::Coach => "COACH",
            Speaker::User => "USER",
        }
    }
}

/// One utterance in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub message: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl ConversationTurn {
    pub fn coach(message: impl Into<String>) -> Self {
        Self::at(Speaker::Coach, message, Timestamp::now())
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::at(Speaker::User, message, Timestamp::now())
    }

    pub fn at(speaker: Speaker, message: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            speaker,
            message: message.into(),
            timestamp,
            audio_url: None,
        }
    }
}

/// Renders turns as `[HH:MM:SS] SPEAKER: message`, separated by blank lines.
pub fn render_transcript(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| {
            format!(
                "[{}] {}: {}",
                turn.timestamp.time_of_day(),
                turn.speaker.label(),
                turn.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Download name for a transcript, e.g. `qa-session-Sarah Chen-2024-05-01.txt`.
pub fn transcript_filename(applicant_name: &str, date: &Timestamp) -> String {
    format!("qa-session-{}-{}.txt", applicant_name, date.date())
}
