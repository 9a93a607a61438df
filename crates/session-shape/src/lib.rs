//! Shapes of the user, session and token records handed around by the
//! authentication layer

#![warn(unused_crate_dependencies)]

pub mod errors;
pub mod id;
pub mod random;
pub mod session;
pub mod time;
pub mod token;
pub mod uac;

pub use random::{random_string, random_string_def_len};
