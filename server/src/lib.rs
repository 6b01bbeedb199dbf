//! Event registration backend.
//!
//! Organizers publish upcoming events; individuals and companies register
//! as participants. The rules that decide what may be stored live in
//! [`validation`]; everything else is the HTTP and persistence shell around them.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;
