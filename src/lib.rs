//! HVAC Assist - Conversational Service Intake Webhook
//!
//! This crate fulfils a chat agent's intents for an HVAC service intake flow:
//! it asks for the service, property type, name and phone number, threads the
//! answers through conversation contexts, and saves the finished intake to a
//! spreadsheet under a fresh reference number.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
