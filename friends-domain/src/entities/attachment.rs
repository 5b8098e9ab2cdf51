// Chat message entities
// Field names follow the Slack attachment schema

use serde::Serialize;
use serde_json::{json, Value};

pub const ATTACHMENT_COLOR: &str = "#7CD197";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: FieldValue,
    pub short: bool,
}

impl AttachmentField {
    pub fn short(title: &str, value: FieldValue) -> Self {
        Self {
            title: title.to_string(),
            value,
            short: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayAttachment {
    pub color: String,
    pub fallback: String,
    pub title: String,
    pub title_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl DisplayAttachment {
    pub fn new(title: String, title_link: String, fallback: String) -> Self {
        Self {
            color: ATTACHMENT_COLOR.to_string(),
            fallback,
            title,
            title_link,
            author_name: None,
            thumb_url: None,
            footer: None,
            footer_icon: None,
            fields: Vec::new(),
            ts: None,
        }
    }

    pub fn with_author_name(mut self, author_name: String) -> Self {
        self.author_name = Some(author_name);
        self
    }

    pub fn with_thumb_url(mut self, thumb_url: &str) -> Self {
        self.thumb_url = Some(thumb_url.to_string());
        self
    }

    pub fn with_footer(mut self, footer: Option<String>, footer_icon: Option<&str>) -> Self {
        self.footer = footer.filter(|text| !text.is_empty());
        self.footer_icon = footer_icon.map(ToString::to_string);
        self
    }

    pub fn with_fields(mut self, fields: Vec<AttachmentField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }
}

/// One structured chat payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub attachments: Vec<DisplayAttachment>,
    pub unfurl_links: bool,
}

impl ChatMessage {
    pub fn new(attachments: Vec<DisplayAttachment>) -> Self {
        Self {
            attachments,
            unfurl_links: false,
        }
    }

    /// Fallback text of every attachment, one per line.
    pub fn to_plain_text(&self) -> String {
        self.attachments
            .iter()
            .map(|attachment| attachment.fallback.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Message(ChatMessage),
    Text(String),
}

impl ChatReply {
    pub fn is_message(&self) -> bool {
        matches!(self, ChatReply::Message(_))
    }

    pub fn to_plain_text(&self) -> String {
        match self {
            ChatReply::Message(message) => message.to_plain_text(),
            ChatReply::Text(text) => text.clone(),
        }
    }

    /// JSON body accepted by Slack webhooks and slash-command responses.
    pub fn payload(&self) -> Value {
        match self {
            ChatReply::Message(message) => json!(message),
            ChatReply::Text(text) => json!({ "text": text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_members_are_omitted_from_json() {
        let attachment = DisplayAttachment::new(
            "Hopry by Yazoo Brewing Company".to_string(),
            "https://untappd.com/user/someone/checkin/1".to_string(),
            "Hopry".to_string(),
        )
        .with_footer(Some(String::new()), None);
        let value = serde_json::to_value(&attachment).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 4);
        assert_eq!(object["color"], "#7CD197");
        assert!(!object.contains_key("footer"));
        assert!(!object.contains_key("fields"));
    }

    #[test]
    fn field_values_keep_their_json_type() {
        let fields = vec![
            AttachmentField::short("Joined", FieldValue::Text("Mar 30, 2018".to_string())),
            AttachmentField::short("Beers", FieldValue::Count(699)),
        ];
        let value = serde_json::to_value(&fields).expect("serialize");
        assert_eq!(
            value,
            json!([
                {"title": "Joined", "value": "Mar 30, 2018", "short": true},
                {"title": "Beers", "value": 699, "short": true},
            ])
        );
    }

    #[test]
    fn payload_disables_link_unfurling() {
        let reply = ChatReply::Message(ChatMessage::new(Vec::new()));
        assert_eq!(reply.payload(), json!({"attachments": [], "unfurl_links": false}));
        let reply = ChatReply::Text("nothing here".to_string());
        assert_eq!(reply.payload(), json!({"text": "nothing here"}));
    }
}
