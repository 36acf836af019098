use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation record.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling and transport parameters fixed when a backend is constructed.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub max_retries: u32,
    #[serde(default)]
    pub streaming: bool,
}

impl GenerationParams {
    /// Deterministic settings used for the primary backend.
    pub fn primary() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 1024,
            top_p: 0.9,
            timeout: Duration::from_secs(120),
            max_retries: 10,
            streaming: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            temperature: 0.2,
            timeout: Duration::from_secs(60),
            max_retries: 5,
            ..Self::primary()
        }
    }

    /// Settings applied to a backend selected at runtime by an operator.
    pub fn switch() -> Self {
        Self {
            max_retries: 3,
            ..Self::fallback()
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::primary()
    }
}

/// Identifies a backend and the parameters it is (or will be) built with.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BackendHandle {
    pub identifier: String,
    pub parameters: GenerationParams,
}

impl BackendHandle {
    pub fn new(identifier: impl Into<String>, parameters: GenerationParams) -> Self {
        Self {
            identifier: identifier.into(),
            parameters,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("timeout must be a non-negative number of seconds"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
