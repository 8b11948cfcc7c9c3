//! Inbound request envelope as delivered by the voice platform.
//!
//! Only the fields the skill reads are modelled; anything else in the JSON
//! (`context`, session attributes, user ids) is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";
pub const GET_WEATHER_INTENT: &str = "GetWeatherIntent";

pub const CITY_SLOT: &str = "City";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    pub request: Request,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// SessionEndedRequest only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// SessionEndedRequest only; absent unless the session ended on an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionEndedError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEndedError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl RequestEnvelope {
    pub fn request_type(&self) -> &str {
        &self.request.request_type
    }

    /// Intent name, only for IntentRequests.
    pub fn intent_name(&self) -> Option<&str> {
        if self.request_type() != INTENT_REQUEST {
            return None;
        }
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    pub fn is_intent(&self, name: &str) -> bool {
        self.intent_name() == Some(name)
    }

    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()?
            .slots
            .get(name)?
            .value
            .as_deref()
    }

    pub fn new(request_type: &str) -> Self {
        let now = Utc::now();
        Self {
            version: default_version(),
            session: None,
            request: Request {
                request_type: request_type.to_string(),
                request_id: format!("informer.request.{}", now.timestamp_millis()),
                timestamp: Some(now),
                locale: Some("en-US".to_string()),
                intent: None,
                reason: None,
                error: None,
            },
        }
    }

    pub fn launch() -> Self {
        Self::new(LAUNCH_REQUEST)
    }

    pub fn intent(name: &str) -> Self {
        let mut envelope = Self::new(INTENT_REQUEST);
        envelope.request.intent = Some(Intent {
            name: name.to_string(),
            slots: HashMap::new(),
        });
        envelope
    }

    /// Attach a slot value. No-op unless the envelope carries an intent.
    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        if let Some(intent) = self.request.intent.as_mut() {
            intent.slots.insert(
                name.to_string(),
                Slot {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                },
            );
        }
        self
    }

    pub fn session_ended(reason: &str) -> Self {
        let mut envelope = Self::new(SESSION_ENDED_REQUEST);
        envelope.request.reason = Some(reason.to_string());
        envelope
    }
}
