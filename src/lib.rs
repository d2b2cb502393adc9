//! Community bot for the Deakin Data Science Club Discord server.
//!
//! Posts role-gated club announcements on `!signup` and `!introduction`, and
//! answers liveness probes over HTTP for the hosting platform.

pub mod application;
pub mod domain;
pub mod infrastructure;
