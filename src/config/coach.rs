//! Coach speech simulation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
pub struct CoachConfig {
    /// Simulated time to synthesize a coach line
    #[serde(default = "default_synthesis_delay")]
    pub synthesis_delay_ms: u64,

    /// Simulated time to transcribe a recording
    #[serde(default = "default_transcription_delay")]
    pub transcription_delay_ms: u64,

    /// Idle time after which a session may be evicted
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Upper bound on sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl CoachConfig {
    pub fn synthesis_delay(&self) -> Duration {
        Duration::from_millis(self.synthesis_delay_ms)
    }

    pub fn transcription_delay(&self) -> Duration {
        Duration::from_millis(self.transcription_delay_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.synthesis_delay_ms > MAX_DELAY_MS || self.transcription_delay_ms > MAX_DELAY_MS {
            return Err(ValidationError::SpeechDelayTooLong {
                max_ms: MAX_DELAY_MS,
            });
        }
        if self.session_ttl_secs == 0 || self.max_sessions == 0 {
            return Err(ValidationError::InvalidSessionRetention);
        }
        Ok(())
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            synthesis_delay_ms: default_synthesis_delay(),
            transcription_delay_ms: default_transcription_delay(),
            session_ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_synthesis_delay() -> u64 {
    2000
}

fn default_transcription_delay() -> u64 {
    1500
}

fn default_session_ttl() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}
