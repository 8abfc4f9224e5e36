// Core data models for the translation layer

pub mod task;
pub mod calendar;
pub mod action;

pub use task::*;
pub use calendar::*;
pub use action::*;
