//! Prayer alarm scheduling core
//!
//! Persists per-prayer notification preferences across restarts and
//! schedules per-prayer trigger notifications, guaranteeing at most one
//! active trigger per alarm slot. The settings UI, prayer-time math and
//! the OS notification subsystem are external; the latter plugs in via
//! [`notify::NotificationGateway`].

pub mod adhan;
pub mod config;
pub mod error;
pub mod media;
pub mod notify;
pub mod services;
