//! Route modules.

pub mod contact;
pub mod forms;
