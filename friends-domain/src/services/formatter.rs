// Activity formatter
// Turns validated Untappd records into chat attachments. Pure: the current
// time is an input, nothing here reads a clock or performs I/O.

use crate::entities::{
    AttachmentField, BadgeEvent, CheckinRecord, DisplayAttachment, Drinker, FieldValue,
    UserProfile,
};
use crate::services::relative_time;
use crate::utils::format_calendar_date;

#[derive(Debug, Clone, Copy)]
pub struct ActivityFormatter {
    now: i64,
    max_count: usize,
}

impl ActivityFormatter {
    pub fn new(now: i64, max_count: usize) -> Self {
        Self { now, max_count }
    }

    /// One attachment per checkin, in the order the API returned them.
    pub fn format_recent_checkins(&self, checkins: &[CheckinRecord]) -> Vec<DisplayAttachment> {
        self.bounded(checkins)
            .iter()
            .map(|checkin| self.checkin_attachment(checkin, Some(&checkin.user)))
            .collect()
    }

    /// One attachment per badge, checkin order first, then award order.
    pub fn format_badge_events(&self, checkins: &[CheckinRecord]) -> Vec<DisplayAttachment> {
        self.bounded(checkins)
            .iter()
            .flat_map(CheckinRecord::badge_events)
            .map(|event| self.badge_attachment(&event))
            .collect()
    }

    /// Profile card followed by the user's checkins without the drinker in
    /// the title.
    pub fn format_user_summary(
        &self,
        profile: &UserProfile,
        checkins: &[CheckinRecord],
    ) -> Vec<DisplayAttachment> {
        let checkins = self.bounded(checkins);
        let mut attachments = Vec::with_capacity(1 + checkins.len());
        attachments.push(profile_attachment(profile));
        attachments.extend(
            checkins
                .iter()
                .map(|checkin| self.checkin_attachment(checkin, None)),
        );
        attachments
    }

    fn bounded<'a>(&self, checkins: &'a [CheckinRecord]) -> &'a [CheckinRecord] {
        &checkins[..checkins.len().min(self.max_count)]
    }

    fn checkin_attachment(
        &self,
        checkin: &CheckinRecord,
        drinker: Option<&Drinker>,
    ) -> DisplayAttachment {
        let when = relative_time(checkin.created_epoch(), self.now);
        let subject = drinker
            .map(|user| format!("{} was drinking ", user.label()))
            .unwrap_or_default();

        let title = format!("{}{} by {}", subject, checkin.beer.name, checkin.brewery.name);
        let mut fallback = format!(
            "{}{} by {}",
            subject,
            checkin.beer.description(),
            checkin.brewery.name
        );
        if let Some(venue) = &checkin.venue {
            fallback.push_str(&format!(" at {}", venue.name));
        }
        fallback.push_str(&format!(" - {}", when));

        let footer_icon = checkin
            .badges
            .first()
            .map(|badge| badge.icon.as_str())
            .or_else(|| checkin.venue.as_ref().and_then(|venue| venue.icon.as_deref()));

        DisplayAttachment::new(title, checkin.permalink(), fallback)
            .with_thumb_url(checkin.beer_thumbnail())
            .with_footer(checkin_footer(checkin), footer_icon)
            .with_ts(checkin.created_epoch())
    }

    fn badge_attachment(&self, event: &BadgeEvent<'_>) -> DisplayAttachment {
        let checkin = event.checkin;
        let when = relative_time(checkin.created_epoch(), self.now);
        let author_name = match &checkin.venue {
            Some(venue) => format!("{} at {}", when, venue.name),
            None => when.clone(),
        };

        let title = format!(
            "{} earned the {} Badge",
            checkin.user.label(),
            event.badge.name
        );
        let mut fallback = format!("{} after drinking a {}", title, checkin.beer.name);
        if let Some(venue) = &checkin.venue {
            fallback.push_str(&format!(" at {}", venue.name));
        }
        fallback.push_str(&format!(" - {}", when));

        DisplayAttachment::new(title, checkin.permalink(), fallback)
            .with_author_name(author_name)
            .with_thumb_url(&event.badge.icon)
            .with_footer(
                Some(checkin.beer.name.clone()),
                Some(checkin.beer_thumbnail()),
            )
    }
}

fn checkin_footer(checkin: &CheckinRecord) -> Option<String> {
    let mut segments = Vec::new();
    if let Some(venue) = &checkin.venue {
        segments.push(venue.name.clone());
    }
    if let Some(first) = checkin.badges.first() {
        let mut earned = format!("Earned the {} badge", first.name);
        if checkin.badges.len() > 1 {
            earned.push_str(&format!(" and {} more", checkin.badges.len() - 1));
        }
        segments.push(earned);
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" • "))
    }
}

fn profile_attachment(profile: &UserProfile) -> DisplayAttachment {
    let totals = profile.totals;
    let fallback = format!(
        "{}: {} beers, {} checkins, {} badges",
        profile.label(),
        totals.beers,
        totals.checkins,
        totals.badges
    );
    let fields = vec![
        AttachmentField::short(
            "Joined",
            FieldValue::Text(format_calendar_date(&profile.joined)),
        ),
        AttachmentField::short("Beers", FieldValue::Count(totals.beers)),
        AttachmentField::short("Checkins", FieldValue::Count(totals.checkins)),
        AttachmentField::short("Badges", FieldValue::Count(totals.badges)),
    ];

    DisplayAttachment::new(profile.label(), profile.profile_url(), fallback)
        .with_thumb_url(&profile.avatar)
        .with_fields(fields)
}
