//! Shared items related to user account control

mod role;
mod user;

pub use role::UserRole;
pub use user::User;
