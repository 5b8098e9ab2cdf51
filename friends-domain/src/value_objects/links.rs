// Untappd web links and static assets

pub const UNTAPPD_WEB_BASE: &str = "https://untappd.com";
pub const DEFAULT_BEER_THUMB: &str =
    "https://untappd.akamaized.net/site/assets/images/temp/badge-beer-default.png";

pub fn checkin_permalink(username: &str, checkin_id: u64) -> String {
    format!("{}/user/{}/checkin/{}", UNTAPPD_WEB_BASE, username, checkin_id)
}

pub fn profile_link(username: &str) -> String {
    format!("{}/user/{}", UNTAPPD_WEB_BASE, username)
}
