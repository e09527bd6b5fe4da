// src/lib.rs

//! Judge companion library: parse competitive-programming problem pages into
//! tasks and deliver them to local receivers.

pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod services;
pub mod utils;
