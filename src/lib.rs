//! Monitoring and control client for a remote prediction-market trading bot.
//!
//! The library holds the synchronization core: a typed gateway to the
//! service, a status poller, start/stop control, a settings draft session,
//! an opportunity feed and the display helpers the console renders with.

pub mod chart;
pub mod config;
pub mod control;
pub mod domain;
pub mod feed;
pub mod format;
pub mod gateway;
pub mod poller;
pub mod report;
pub mod settings;
