//! Service layer for delivering tasks.
//!
//! This module contains:
//! - Receiver discovery and transport (`hosts`)
//! - Fan-out delivery with per-receiver isolation (`Delivery`)
//! - Permission-gated fetch and relay (`PermissionedFetcher`, `relay_file`)

mod delivery;
mod hosts;
mod permission;

pub use delivery::{Delivery, DeliveryReport, Signal, SignalSink};
pub use hosts::{ConfiguredHosts, Host, HostSource, HttpHost};
pub use permission::{PermissionedFetcher, relay_file};
