pub mod configuration;
pub mod domain;
pub mod mail_client;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod telemetry;
