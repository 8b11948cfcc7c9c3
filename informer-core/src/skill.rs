//! Request routing: an ordered handler list plus a catch-all error handler.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;

use crate::{
    Config, RequestEnvelope, Response,
    error::{SkillError, WeatherError},
    handler::{
        CancelAndStopIntentHandler, ErrorHandler, FallbackIntentHandler, GenericErrorHandler,
        GetWeatherIntentHandler, HelpIntentHandler, LaunchRequestHandler, RequestHandler,
        SessionEndedRequestHandler,
    },
    provider::{WeatherSource, source_from_config},
    response::ResponseEnvelope,
};

#[derive(Debug)]
pub struct Skill {
    handlers: Vec<Box<dyn RequestHandler>>,
    error_handler: Box<dyn ErrorHandler>,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::default()
    }

    /// The Weather Informer skill, wired against the given weather source.
    pub fn weather_informer(config: Arc<Config>, source: Arc<dyn WeatherSource>) -> Self {
        Self::builder()
            .add_request_handler(LaunchRequestHandler)
            .add_request_handler(HelpIntentHandler)
            .add_request_handler(CancelAndStopIntentHandler)
            .add_request_handler(FallbackIntentHandler)
            .add_request_handler(SessionEndedRequestHandler)
            .add_request_handler(GetWeatherIntentHandler::new(config, source))
            .with_error_handler(GenericErrorHandler)
            .build()
    }

    /// Same as [`Skill::weather_informer`], backed by Open-Meteo as configured.
    pub fn from_config(config: Arc<Config>) -> Result<Self, WeatherError> {
        let source = source_from_config(&config)?;
        Ok(Self::weather_informer(config, source))
    }

    /// Run one request through the first matching handler. Never fails: a
    /// handler that returns `Err` or panics is answered by the error handler.
    pub async fn invoke(&self, envelope: &RequestEnvelope) -> Response {
        let result = match self.handlers.iter().find(|h| h.can_handle(envelope)) {
            Some(handler) => {
                tracing::debug!(
                    request_type = envelope.request_type(),
                    intent = envelope.intent_name().unwrap_or("-"),
                    "Dispatching to {:?}",
                    handler
                );
                AssertUnwindSafe(handler.handle(envelope))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| {
                        Err(SkillError::UnhandledFault(anyhow::anyhow!(
                            "Handler panicked: {}",
                            panic_message(payload.as_ref())
                        )))
                    })
            }
            None => Err(SkillError::NoMatchingHandler {
                request_type: envelope.request_type().to_string(),
                intent: envelope.intent_name().map(str::to_string),
            }),
        };

        result.unwrap_or_else(|e| self.error_handler.handle(envelope, &e))
    }

    pub async fn invoke_envelope(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        self.invoke(envelope).await.into_envelope()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

pub struct SkillBuilder {
    handlers: Vec<Box<dyn RequestHandler>>,
    error_handler: Box<dyn ErrorHandler>,
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            error_handler: Box::new(GenericErrorHandler),
        }
    }
}

impl SkillBuilder {
    /// Handlers are tried in the order they are added.
    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    pub fn build(self) -> Skill {
        Skill {
            handlers: self.handlers,
            error_handler: self.error_handler,
        }
    }
}
