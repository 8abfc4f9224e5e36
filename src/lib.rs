//! twbridge - translate task actions into Timewarrior commands
//!
//! This library holds the layer between a front end that knows only about
//! buttons, text fields and a selected row, and the `timew` command line:
//! - Validation of user-entered dates and times
//! - Parsing `timew export` into an immutable snapshot of tracked intervals
//! - Mapping a selected display row to the tracker's `@id`
//! - Building the argument vector for each action
//! - Reading today's events from icalBuddy as task sources
//!
//! Process execution goes through the [`exec::Executor`] trait and modal
//! questions through [`dispatch::Prompter`], so front ends decide how both
//! are carried out.
//!
//! # Example
//!
//! ```no_run
//! use twbridge::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod builder;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod models;
pub mod resolve;
pub mod snapshot;
pub mod utils;
pub mod validate;
