pub mod identity;

pub use identity::{CurrentUser, MaybeUser, USERNAME_HEADER};
