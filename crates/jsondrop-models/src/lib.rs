//! Record types stored by the jsondrop demo.
//!
//! The store itself accepts any serializable value; these types are what
//! the command-line demo seeds and lists.

pub mod number;
pub mod user;

pub use number::{FlexNumber, ParseNumberError};
pub use user::{demo_users, Address, User};
