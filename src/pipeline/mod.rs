//! Pipeline entry points.
//!
//! - `run_parse` / `deliver_tasks`: Parse a judge page and send the tasks out
//! - `run_relay`: Permission-gated fetch of an external file
//! - `run_list` / `run_choices`: Inspect the parser registry

mod list;
mod parse;
mod relay;

pub use list::{ParserSummary, run_choices, run_list};
pub use parse::{ParseOutcome, deliver_tasks, run_parse};
pub use relay::run_relay;
