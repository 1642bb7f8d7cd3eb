//! # hce-cli: HCE Forms Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: check a JSON or YAML payload against a form's rules
//! - `catalog`: print the contact form option lists
//! - `config`: print the effective configuration from the environment
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; handlers delegate to the
//!   domain crates and contain no validation logic of their own.
//! - Handlers return an exit code: 0 on success, 1 when the input is
//!   invalid. Operational errors propagate and exit with 2.

pub mod catalog;
pub mod config;
pub mod validate;
