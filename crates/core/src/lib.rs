//! Domain rules shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O. It holds validation helpers,
//! constants mirrored by database `CHECK` constraints, and the signature
//! primitives used by the payment flow.

pub mod books;
pub mod contact;
pub mod error;
pub mod list_field;
pub mod payments;
pub mod roles;
pub mod signature;
pub mod types;
pub mod uploads;
