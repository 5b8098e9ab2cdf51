// Checkin entity
// One item of a checkins response, validated once at the API boundary

use chrono::{DateTime, Utc};

use crate::value_objects::{checkin_permalink, DEFAULT_BEER_THUMB};

#[derive(Debug, Clone, PartialEq)]
pub struct Drinker {
    pub display_name: String,
    pub username: String,
}

impl Drinker {
    /// `"{display name} ({username})"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.username)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub name: String,
    pub style: String,
    pub abv: f64,
    pub label: Option<String>,
}

impl Beer {
    /// `"{name} ({style} - {abv}%)"`
    pub fn description(&self) -> String {
        format!("{} ({} - {}%)", self.name, self.style, self.abv)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brewery {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    /// Carries the level suffix as delivered, e.g. `Beer Foodie (Level 44)`.
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckinRecord {
    pub id: u64,
    pub user: Drinker,
    pub beer: Beer,
    pub brewery: Brewery,
    pub venue: Option<Venue>,
    pub created_at: DateTime<Utc>,
    pub badges: Vec<Badge>,
    pub media_thumbnail: Option<String>,
}

impl CheckinRecord {
    pub fn permalink(&self) -> String {
        checkin_permalink(&self.user.username, self.id)
    }

    pub fn created_epoch(&self) -> i64 {
        self.created_at.timestamp()
    }

    /// Beer label, then the first photo, then the placeholder image.
    pub fn beer_thumbnail(&self) -> &str {
        self.beer
            .label
            .as_deref()
            .or(self.media_thumbnail.as_deref())
            .unwrap_or(DEFAULT_BEER_THUMB)
    }

    pub fn badge_events(&self) -> impl Iterator<Item = BadgeEvent<'_>> {
        self.badges
            .iter()
            .map(move |badge| BadgeEvent { checkin: self, badge })
    }
}

/// A badge paired with the checkin that earned it.
#[derive(Debug, Clone, Copy)]
pub struct BadgeEvent<'a> {
    pub checkin: &'a CheckinRecord,
    pub badge: &'a Badge,
}
