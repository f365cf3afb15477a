//! Rule-based veteran profile classification and personalization.
//!
//! Free-form customer text (plus optional form fields) is classified into a
//! [`profile::VeteranProfile`], which then drives content personalization,
//! benefits automation, and per-session experience bundles.

pub mod automation;
pub mod config;
pub mod content;
pub mod error;
pub mod intake;
pub mod personalization;
pub mod profile;
pub mod telemetry;
pub mod vocabulary;

mod text;
