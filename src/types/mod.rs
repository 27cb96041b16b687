//! Message records as delivered by the chat server.
//!
//! These are owned by the message store; the preview and settings code only
//! reads them. Field names follow the server's JSON (`msg`, `ts`, `u`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message that can be replied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned message id.
    #[serde(alias = "_id")]
    pub id: String,
    /// Message body. Empty for attachment-only messages.
    #[serde(rename = "msg", default)]
    pub text: String,
    /// Attachments in server order. Only the first one is shown in previews.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// When the message was sent.
    #[serde(rename = "ts")]
    pub sent_at: DateTime<Utc>,
    /// Who sent it.
    #[serde(rename = "u")]
    pub author: Author,
}

impl Message {
    /// The attachment consulted for previews, if any.
    pub fn first_attachment(&self) -> Option<&Attachment> {
        self.attachments.first()
    }
}

/// File, image or video attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Caption supplied by the sender.
    #[serde(default)]
    pub description: Option<String>,
    /// Server path or absolute URL of an image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Server path or absolute URL of a video.
    #[serde(default)]
    pub video_url: Option<String>,
}

impl Attachment {
    /// Caption, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Image URL, treating an empty string as absent.
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    /// Video URL, treating an empty string as absent.
    pub fn video_url(&self) -> Option<&str> {
        non_empty(self.video_url.as_deref())
    }
}

/// Sender of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Real name, when the server knows one.
    #[serde(rename = "name", default)]
    pub display_name: Option<String>,
    /// Unique username.
    #[serde(rename = "username")]
    pub handle: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
