//! Handlers that answer with fixed text.

use async_trait::async_trait;

use crate::{
    RequestEnvelope, Response,
    envelope::{
        CANCEL_INTENT, FALLBACK_INTENT, HELP_INTENT, LAUNCH_REQUEST, SESSION_ENDED_REQUEST,
        STOP_INTENT,
    },
    error::SkillError,
};

use super::{ErrorHandler, RequestHandler};

pub const WELCOME: &str = "Welcome to Weather Informer!";
pub const WELCOME_REPROMPT: &str =
    "You can ask if it’s going to rain today or ask for the weather forecast for a specific city.";
pub const HELP: &str = "You can say hello to me! How can I help?";
pub const GOODBYE: &str = "Goodbye!";
pub const FALLBACK: &str = "I'm sorry, I didn't understand that. You can ask for the weather in U.S. cities like Atlanta or Charleston.";
pub const FALLBACK_REPROMPT: &str = "Try asking about the weather for a city.";
pub const TROUBLE: &str = "Sorry, I had trouble doing what you asked. Please try again.";

#[derive(Debug, Default)]
pub struct LaunchRequestHandler;

#[async_trait]
impl RequestHandler for LaunchRequestHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == LAUNCH_REQUEST
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        Ok(Response::speak(WELCOME).reprompt(WELCOME_REPROMPT))
    }
}

#[derive(Debug, Default)]
pub struct HelpIntentHandler;

#[async_trait]
impl RequestHandler for HelpIntentHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(HELP_INTENT)
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        Ok(Response::speak(HELP).reprompt(HELP))
    }
}

#[derive(Debug, Default)]
pub struct CancelAndStopIntentHandler;

#[async_trait]
impl RequestHandler for CancelAndStopIntentHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(CANCEL_INTENT) || envelope.is_intent(STOP_INTENT)
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        Ok(Response::speak(GOODBYE))
    }
}

/// Fires when an utterance maps to none of the skill's intents.
#[derive(Debug, Default)]
pub struct FallbackIntentHandler;

#[async_trait]
impl RequestHandler for FallbackIntentHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(FALLBACK_INTENT)
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        Ok(Response::speak(FALLBACK).reprompt(FALLBACK_REPROMPT))
    }
}

#[derive(Debug, Default)]
pub struct SessionEndedRequestHandler;

#[async_trait]
impl RequestHandler for SessionEndedRequestHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == SESSION_ENDED_REQUEST
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        let request = &envelope.request;
        let (error_type, error_message) = request
            .error
            .as_ref()
            .map(|e| (e.error_type.as_str(), e.message.as_str()))
            .unwrap_or_default();

        tracing::info!(
            request_id = %request.request_id,
            reason = request.reason.as_deref().unwrap_or("unknown"),
            error_type,
            error_message,
            "Session ended"
        );

        Ok(Response::empty())
    }
}

/// Catch-all: logs the fault and apologises.
#[derive(Debug, Default)]
pub struct GenericErrorHandler;

impl ErrorHandler for GenericErrorHandler {
    fn handle(&self, envelope: &RequestEnvelope, error: &SkillError) -> Response {
        tracing::error!(
            request_type = envelope.request_type(),
            intent = envelope.intent_name().unwrap_or("-"),
            "Error handled: {}",
            error
        );

        Response::speak(TROUBLE).reprompt(TROUBLE)
    }
}
