//! Event Planner Bot Library
//!
//! Configuration for the event planner Telegram bot.
//!
//! This crate provides:
//! - Loading the bot configuration from environment variables
//! - Merging a local `.env` file without overriding the environment
//! - Environment snapshots for loading without global state
//! - Diagnostics for misconfigured variables

pub mod config;
