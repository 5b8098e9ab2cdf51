pub mod activity_queries;
pub mod badge_queries;
pub mod user_queries;
