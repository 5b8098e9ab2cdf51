// Domain entities
pub mod attachment;
pub mod checkin;
pub mod config;
pub mod user_profile;

pub use attachment::*;
pub use checkin::*;
pub use config::*;
pub use user_profile::*;
