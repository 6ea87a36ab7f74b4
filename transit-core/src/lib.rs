//! Core library for the transit route bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather probe and the static route catalog
//! - Abstraction over completion providers
//! - The request pipeline turning a user query into a reply
//!
//! It is used by `transit-bot`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod tool;
pub mod weather;

pub use config::Config;
pub use error::CompletionError;
pub use model::{CompletionResponse, RouteOption, RouteRecommendation, ToolCall, WeatherCondition};
pub use pipeline::RequestPipeline;
pub use provider::{CompletionProvider, ProviderId};
pub use weather::WeatherProbe;
