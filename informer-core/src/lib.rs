//! Core library for the Weather Informer voice skill.
//!
//! This crate defines:
//! - The inbound request envelope and the outbound response format
//! - Request handlers and the router that picks one per request
//! - The weather source abstraction and its Open-Meteo implementation
//! - Configuration (supported cities, endpoints)
//!
//! It is used by `informer-cli`, but can be embedded in any host that receives
//! platform events, e.g. an HTTPS endpoint or a serverless function.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod model;
pub mod provider;
pub mod response;
pub mod skill;

pub use config::Config;
pub use envelope::RequestEnvelope;
pub use error::{SkillError, WeatherError};
pub use model::{Coordinates, WeatherSnapshot};
pub use provider::{OpenMeteo, WeatherSource};
pub use response::{Response, ResponseEnvelope};
pub use skill::Skill;
