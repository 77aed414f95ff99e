//! Bus trip search server.
//!
//! A web application that answers: "which buses run between these two
//! stops, at the times, class, seats and price I want?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod filter;
pub mod locations;
pub mod web;
