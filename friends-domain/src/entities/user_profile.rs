// User profile entity

use chrono::{DateTime, Utc};

use crate::value_objects::profile_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifetimeTotals {
    pub beers: u64,
    pub checkins: u64,
    pub badges: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub display_name: String,
    pub username: String,
    pub avatar: String,
    pub joined: DateTime<Utc>,
    pub totals: LifetimeTotals,
}

impl UserProfile {
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.username)
    }

    pub fn profile_url(&self) -> String {
        profile_link(&self.username)
    }
}
