//! Relays alert messages as SMS through Twilio.
//!
//! The crate is a thin path from request to provider call: [`config`] loads
//! the Twilio credentials once at startup, [`twilio`] performs a single
//! outbound send, and [`handlers`] exposes the `POST /send_alert` endpoint.
//! Two binaries consume it: `alert-api` (the HTTP server) and `send-sms`
//! (a one-shot command-line sender).

pub mod config;
pub mod error;
pub mod handlers;
pub mod twilio;
pub mod types;
