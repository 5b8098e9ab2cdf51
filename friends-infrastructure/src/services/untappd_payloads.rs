// Untappd v4 wire payloads
// Deserialized once here and converted into domain records; nothing past
// this module touches raw JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::parse_untappd_timestamp;
use friends_domain::{
    ApiError, Badge, Beer, Brewery, CheckinRecord, Drinker, LifetimeTotals, UserProfile, Venue,
};

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub code: u16,
    #[serde(default)]
    pub error_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub meta: Meta,
    #[serde(default)]
    pub response: Value,
}

#[derive(Debug, Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct CheckinsResponse {
    pub checkins: ItemList<CheckinPayload>,
}

#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    #[serde(default, deserialize_with = "object_or_empty")]
    pub user: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CheckinPayload {
    pub checkin_id: u64,
    pub created_at: String,
    pub user: UserRef,
    pub beer: BeerPayload,
    pub brewery: BreweryPayload,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub venue: Option<VenuePayload>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub badges: Option<ItemList<BadgePayload>>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub media: Option<ItemList<MediaPayload>>,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
}

#[derive(Debug, Deserialize)]
pub struct BeerPayload {
    pub beer_name: String,
    #[serde(default)]
    pub beer_style: String,
    #[serde(default)]
    pub beer_abv: f64,
    #[serde(default)]
    pub beer_label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BreweryPayload {
    pub brewery_name: String,
}

#[derive(Debug, Deserialize)]
pub struct VenuePayload {
    pub venue_name: String,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub venue_icon: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct BadgePayload {
    pub badge_name: String,
    pub badge_image: ImageSet,
}

#[derive(Debug, Deserialize)]
pub struct MediaPayload {
    pub photo: PhotoPayload,
}

#[derive(Debug, Deserialize)]
pub struct PhotoPayload {
    #[serde(default)]
    pub photo_img_sm: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    pub sm: String,
    pub md: String,
    pub lg: String,
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub user_avatar: String,
    pub date_joined: String,
    pub stats: StatsPayload,
}

#[derive(Debug, Deserialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub total_beers: u64,
    #[serde(default)]
    pub total_checkins: u64,
    #[serde(default)]
    pub total_badges: u64,
}

/// Untappd sends `[]` instead of `null` for absent objects.
fn object_or_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn display_name(first_name: &str, user_name: &str) -> String {
    non_empty(first_name).unwrap_or_else(|| user_name.to_string())
}

/// Decodes the `{meta, response}` envelope, mapping Untappd error codes.
pub fn decode_envelope(status: u16, body: &str) -> Result<Value, ApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if status == 404 => return Err(ApiError::NotFound(format!("status {}", status))),
        Err(_) if !(200..300).contains(&status) => {
            return Err(ApiError::Unavailable(format!("status {}", status)))
        }
        Err(err) => return Err(ApiError::Malformed(err.to_string())),
    };

    let detail = envelope
        .meta
        .error_detail
        .clone()
        .unwrap_or_else(|| format!("status {}", envelope.meta.code));
    match envelope.meta.code {
        200 => Ok(envelope.response),
        404 => Err(ApiError::NotFound(detail)),
        _ => Err(ApiError::Unavailable(detail)),
    }
}

pub fn decode_checkins(response: Value) -> Result<Vec<CheckinRecord>, ApiError> {
    let parsed: CheckinsResponse =
        serde_json::from_value(response).map_err(|err| ApiError::Malformed(err.to_string()))?;
    parsed
        .checkins
        .items
        .into_iter()
        .map(CheckinRecord::try_from_payload)
        .collect()
}

pub fn decode_user(response: Value, username: &str) -> Result<UserProfile, ApiError> {
    let parsed: UserInfoResponse =
        serde_json::from_value(response).map_err(|err| ApiError::Malformed(err.to_string()))?;
    let user = parsed
        .user
        .ok_or_else(|| ApiError::NotFound(format!("user {}", username)))?;
    UserProfile::try_from_payload(user)
}

trait FromPayload<P>: Sized {
    fn try_from_payload(payload: P) -> Result<Self, ApiError>;
}

impl FromPayload<CheckinPayload> for CheckinRecord {
    fn try_from_payload(payload: CheckinPayload) -> Result<Self, ApiError> {
        let created_at = parse_untappd_timestamp(&payload.created_at)
            .map_err(|err| ApiError::Malformed(err.to_string()))?;
        let badges = payload
            .badges
            .map(|list| list.items)
            .unwrap_or_default()
            .into_iter()
            .map(|badge| Badge {
                name: badge.badge_name,
                icon: badge.badge_image.sm,
            })
            .collect();
        let media_thumbnail = payload
            .media
            .and_then(|list| list.items.into_iter().next())
            .and_then(|media| non_empty(&media.photo.photo_img_sm));

        Ok(CheckinRecord {
            id: payload.checkin_id,
            user: Drinker {
                display_name: display_name(&payload.user.first_name, &payload.user.user_name),
                username: payload.user.user_name,
            },
            beer: Beer {
                name: payload.beer.beer_name,
                style: payload.beer.beer_style,
                abv: payload.beer.beer_abv,
                label: payload.beer.beer_label.as_deref().and_then(non_empty),
            },
            brewery: Brewery {
                name: payload.brewery.brewery_name,
            },
            venue: payload.venue.map(|venue| Venue {
                name: venue.venue_name,
                icon: venue.venue_icon.and_then(|icon| non_empty(&icon.sm)),
            }),
            created_at,
            badges,
            media_thumbnail,
        })
    }
}

impl FromPayload<UserPayload> for UserProfile {
    fn try_from_payload(payload: UserPayload) -> Result<Self, ApiError> {
        let joined = parse_untappd_timestamp(&payload.date_joined)
            .map_err(|err| ApiError::Malformed(err.to_string()))?;
        Ok(UserProfile {
            display_name: display_name(&payload.first_name, &payload.user_name),
            username: payload.user_name,
            avatar: payload.user_avatar,
            joined,
            totals: LifetimeTotals {
                beers: payload.stats.total_beers,
                checkins: payload.stats.total_checkins,
                badges: payload.stats.total_badges,
            },
        })
    }
}
