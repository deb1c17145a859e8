pub mod clients;
pub mod configuration;
pub mod domain;
pub mod fixture;
pub mod http_client;
pub mod reporting;
pub mod telemetry;

pub use fixture::{AuthFixture, FixtureError, FixtureState};
