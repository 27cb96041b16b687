//! Reply preview: the one-line summary shown above the composer while
//! replying to a message.
//!
//! [`resolve_description`] and [`resolve_preview`] are pure functions of the
//! message and the [`PreviewContext`]. [`memo::MemoizedReplyPreview`] adds the
//! re-render suppression rule on top of them.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;

use crate::state::Credentials;
use crate::types::Message;

pub mod memo;
pub mod signer;

pub use memo::{props_equal, MemoizedReplyPreview, PreviewProps};
pub use signer::{AttachmentUrlSigner, QueryTokenSigner};

/// Label shown for a caption-less image attachment.
pub const IMAGE_LABEL: &str = "Image";

/// Label shown for a caption-less video attachment.
pub const VIDEO_LABEL: &str = "Video";

/// Time format used when the configured one cannot be rendered.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Errors raised while building a preview.
///
/// None of these reach the user: the resolver degrades to "no thumbnail" or
/// the default time format.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The attachment or server URL could not be parsed.
    #[error("invalid attachment url {url:?}: {source}")]
    InvalidUrl {
        /// The URL as it was being parsed.
        url: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },
    /// The configured time format contains an unsupported specifier.
    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),
}

/// Session and display settings the preview depends on.
#[derive(Debug, Clone, Copy)]
pub struct PreviewContext<'a> {
    /// Base URL of the chat server, e.g. `https://chat.example.com`.
    pub base_url: &'a str,
    /// Logged-in user; `None` suppresses thumbnails.
    pub credentials: Option<&'a Credentials>,
    /// strftime-style format for the message time.
    pub time_format: &'a str,
    /// Show the author's real name instead of the username.
    pub use_real_name: bool,
    /// Zone the send time is shown in. `None` uses the device's local zone.
    pub utc_offset: Option<FixedOffset>,
}

/// Everything the preview surface displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyPreview {
    /// Author label.
    pub author: String,
    /// Formatted send time.
    pub time: String,
    /// One-line description of the message.
    pub description: String,
    /// Authenticated thumbnail URL for image attachments.
    pub thumbnail: Option<String>,
}

/// Describe a message in one line.
///
/// Text wins. Otherwise the first attachment's caption is used, falling
/// back to [`IMAGE_LABEL`] or [`VIDEO_LABEL`]. A message with neither text
/// nor attachments resolves to an empty string.
pub fn resolve_description(message: &Message) -> String {
    if !message.text.is_empty() {
        return message.text.clone();
    }

    let Some(attachment) = message.first_attachment() else {
        return String::new();
    };

    match (
        attachment.description(),
        attachment.image_url(),
        attachment.video_url(),
    ) {
        (Some(description), _, _) => description.to_owned(),
        (None, Some(_), _) => IMAGE_LABEL.to_owned(),
        (None, None, Some(_)) => VIDEO_LABEL.to_owned(),
        (None, None, None) => attachment.description.clone().unwrap_or_default(),
    }
}

/// Authenticated thumbnail URL for the first attachment's image, if any.
///
/// Returns `None` when there is no image, nobody is logged in, or the URL
/// cannot be signed.
pub fn resolve_thumbnail(
    message: &Message,
    ctx: &PreviewContext<'_>,
    signer: &dyn AttachmentUrlSigner,
) -> Option<String> {
    let image_url = message.first_attachment()?.image_url()?;
    let credentials = ctx.credentials?;

    match signer.sign(
        image_url,
        &credentials.user_id,
        &credentials.token,
        ctx.base_url,
    ) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!(message_id = %message.id, error = %e, "skipping thumbnail");
            None
        }
    }
}

/// Build the full preview for a message.
pub fn resolve_preview(
    message: &Message,
    ctx: &PreviewContext<'_>,
    signer: &dyn AttachmentUrlSigner,
) -> ReplyPreview {
    tracing::trace!(message_id = %message.id, "resolving reply preview");

    ReplyPreview {
        author: author_label(message, ctx.use_real_name),
        time: format_time(message, ctx.time_format, ctx.utc_offset),
        description: resolve_description(message),
        thumbnail: resolve_thumbnail(message, ctx, signer),
    }
}

/// Real name when requested and known, otherwise the username.
pub fn author_label(message: &Message, use_real_name: bool) -> String {
    let author = &message.author;
    match author.display_name.as_deref() {
        Some(name) if use_real_name && !name.is_empty() => name.to_owned(),
        _ => author.handle.clone(),
    }
}

/// Format the send time in `offset`, or in local time when `None`.
///
/// Falls back to [`DEFAULT_TIME_FORMAT`] when `format` cannot be rendered.
pub fn format_time(message: &Message, format: &str, offset: Option<FixedOffset>) -> String {
    let sent_at = shown_at(message, offset);
    match try_format_time(&sent_at, format) {
        Ok(time) => time,
        Err(e) => {
            tracing::debug!(error = %e, "using default time format");
            sent_at.format(DEFAULT_TIME_FORMAT).to_string()
        }
    }
}

fn shown_at(message: &Message, offset: Option<FixedOffset>) -> DateTime<FixedOffset> {
    match offset {
        Some(offset) => message.sent_at.with_timezone(&offset),
        None => {
            let local = message.sent_at.with_timezone(&Local);
            local.with_timezone(local.offset())
        }
    }
}

fn try_format_time(sent_at: &DateTime<FixedOffset>, format: &str) -> Result<String, PreviewError> {
    let mut out = String::new();
    write!(out, "{}", sent_at.format(format))
        .map_err(|_| PreviewError::InvalidTimeFormat(format.to_owned()))?;
    Ok(out)
}
