//! # hce-core: Foundational Types for the HCE Forms Core
//!
//! Defines the primitives shared by every other crate in the workspace:
//! field names and values, form instance identifiers, UTC timestamps, and
//! the top-level error hierarchy. Depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `FieldName` and `FormId` are
//!    newtypes. A form field is never addressed by a bare `&str` past the
//!    crate boundary.
//!
//! 2. **Two value shapes only.** A field holds either text or a boolean
//!    flag (`FieldValue`). Choice fields are text constrained by a catalog.
//!
//! 3. **Absent means empty.** Looking up a missing text field yields `""`
//!    and a missing flag yields `false`, so validation never has to special
//!    case fields the client did not send.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hce-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod identity;
pub mod temporal;

pub use error::HceError;
pub use field::{FieldKind, FieldName, FieldValue, FieldValues};
pub use identity::FormId;
pub use temporal::Timestamp;
