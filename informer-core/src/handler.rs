use crate::{RequestEnvelope, Response, error::SkillError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod canned;
pub mod weather;

pub use canned::{
    CancelAndStopIntentHandler, FallbackIntentHandler, GenericErrorHandler, HelpIntentHandler,
    LaunchRequestHandler, SessionEndedRequestHandler,
};
pub use weather::GetWeatherIntentHandler;

/// One entry in the router's priority list.
#[async_trait]
pub trait RequestHandler: Send + Sync + Debug {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool;

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<Response, SkillError>;
}

/// Turns a fault that escaped routing or a handler into a response.
pub trait ErrorHandler: Send + Sync + Debug {
    fn handle(&self, envelope: &RequestEnvelope, error: &SkillError) -> Response;
}
