//! Immutable, validated scalar types.

pub mod email;

pub use email::Email;
