use serde::{Deserialize, Serialize};

/// What the skill says back for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub end_session: bool,
}

impl Response {
    /// A response with no speech at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            speech: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    pub fn end_session(mut self) -> Self {
        self.end_session = true;
        self
    }

    pub fn keeps_session_open(&self) -> bool {
        !self.end_session
    }

    pub fn speech_text(&self) -> &str {
        self.speech.as_deref().unwrap_or_default()
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        ResponseEnvelope::from(self)
    }
}

/// Platform JSON for a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }
}

fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

impl From<Response> for ResponseEnvelope {
    fn from(r: Response) -> Self {
        // Explicit end wins; a reprompt means we're waiting on the user.
        let should_end_session = if r.end_session {
            Some(true)
        } else if r.reprompt.is_some() {
            Some(false)
        } else {
            None
        };

        ResponseEnvelope {
            version: "1.0".to_string(),
            response: ResponseBody {
                output_speech: r.speech.as_deref().map(OutputSpeech::ssml),
                reprompt: r.reprompt.as_deref().map(|text| Reprompt {
                    output_speech: OutputSpeech::ssml(text),
                }),
                should_end_session,
            },
        }
    }
}
