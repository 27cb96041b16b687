//! Description and thumbnail resolution.

use chrono::{FixedOffset, TimeZone, Utc};

use chatview::preview::{
    resolve_description, resolve_preview, resolve_thumbnail, AttachmentUrlSigner,
    PreviewContext, PreviewError, QueryTokenSigner, IMAGE_LABEL, VIDEO_LABEL,
};
use chatview::state::Credentials;
use chatview::types::{Attachment, Author, Message};

fn message(text: &str, attachments: Vec<Attachment>) -> Message {
    Message {
        id: "msg-1".to_owned(),
        text: text.to_owned(),
        attachments,
        sent_at: Utc
            .with_ymd_and_hms(2024, 5, 17, 14, 42, 0)
            .single()
            .expect("valid date"),
        author: Author {
            display_name: Some("Grace Hopper".to_owned()),
            handle: "grace".to_owned(),
        },
    }
}

fn image(url: &str) -> Attachment {
    Attachment {
        description: Some(String::new()),
        image_url: Some(url.to_owned()),
        ..Attachment::default()
    }
}

fn credentials() -> Credentials {
    Credentials {
        user_id: "u1".to_owned(),
        token: "secret".to_owned(),
    }
}

fn ctx(credentials: Option<&Credentials>) -> PreviewContext<'_> {
    PreviewContext {
        base_url: "https://chat.example.com",
        credentials,
        time_format: "%H:%M",
        use_real_name: true,
        utc_offset: FixedOffset::east_opt(0),
    }
}

/// Signer that fails every call.
struct BrokenSigner;

impl AttachmentUrlSigner for BrokenSigner {
    fn sign(&self, raw: &str, _: &str, _: &str, _: &str) -> Result<String, PreviewError> {
        Err(PreviewError::InvalidUrl {
            url: raw.to_owned(),
            source: url::ParseError::EmptyHost,
        })
    }
}

#[test]
fn text_wins_regardless_of_attachments() {
    let with_image = message("hello there", vec![image("http://x")]);
    assert_eq!(resolve_description(&with_image), "hello there");

    let plain = message("  ", Vec::new());
    assert_eq!(resolve_description(&plain), "  ");
}

#[test]
fn captionless_image_is_labelled() {
    let msg = message("", vec![image("http://x")]);
    assert_eq!(resolve_description(&msg), IMAGE_LABEL);
}

#[test]
fn captionless_video_is_labelled() {
    let video = Attachment {
        description: Some(String::new()),
        video_url: Some("http://x".to_owned()),
        ..Attachment::default()
    };
    let msg = message("", vec![video]);
    assert_eq!(resolve_description(&msg), VIDEO_LABEL);
}

#[test]
fn image_label_beats_video_label() {
    let both = Attachment {
        image_url: Some("http://x/i.png".to_owned()),
        video_url: Some("http://x/v.mp4".to_owned()),
        ..Attachment::default()
    };
    assert_eq!(resolve_description(&message("", vec![both])), IMAGE_LABEL);
}

#[test]
fn caption_is_used() {
    let captioned = Attachment {
        description: Some("caption".to_owned()),
        ..Attachment::default()
    };
    assert_eq!(resolve_description(&message("", vec![captioned])), "caption");
}

#[test]
fn only_first_attachment_is_consulted() {
    let first = Attachment::default();
    let second = Attachment {
        description: Some("ignored".to_owned()),
        ..Attachment::default()
    };
    assert_eq!(resolve_description(&message("", vec![first, second])), "");
}

#[test]
fn empty_message_resolves_to_empty_without_thumbnail() {
    let msg = message("", Vec::new());
    let creds = credentials();
    assert_eq!(resolve_description(&msg), "");
    assert_eq!(resolve_thumbnail(&msg, &ctx(Some(&creds)), &QueryTokenSigner), None);
}

#[test]
fn image_attachment_gets_signed_thumbnail() {
    let msg = message("look", vec![image("/file-upload/abc/cat.png")]);
    let creds = credentials();
    let thumb = resolve_thumbnail(&msg, &ctx(Some(&creds)), &QueryTokenSigner);
    assert_eq!(
        thumb.as_deref(),
        Some("https://chat.example.com/file-upload/abc/cat.png?rc_uid=u1&rc_token=secret")
    );
}

#[test]
fn video_attachment_has_no_thumbnail() {
    let video = Attachment {
        video_url: Some("/file-upload/v.mp4".to_owned()),
        ..Attachment::default()
    };
    let creds = credentials();
    let msg = message("", vec![video]);
    assert_eq!(resolve_thumbnail(&msg, &ctx(Some(&creds)), &QueryTokenSigner), None);
}

#[test]
fn no_thumbnail_when_logged_out() {
    let msg = message("", vec![image("/file-upload/cat.png")]);
    assert_eq!(resolve_thumbnail(&msg, &ctx(None), &QueryTokenSigner), None);
}

#[test]
fn signer_failure_drops_thumbnail() {
    let msg = message("", vec![image("/file-upload/cat.png")]);
    let creds = credentials();
    assert_eq!(resolve_thumbnail(&msg, &ctx(Some(&creds)), &BrokenSigner), None);
}

#[test]
fn full_preview_has_header_and_body() {
    let msg = message("", vec![image("/file-upload/cat.png")]);
    let creds = credentials();
    let preview = resolve_preview(&msg, &ctx(Some(&creds)), &QueryTokenSigner);

    assert_eq!(preview.author, "Grace Hopper");
    assert_eq!(preview.time, "14:42");
    assert_eq!(preview.description, IMAGE_LABEL);
    assert!(preview.thumbnail.is_some());
}

#[test]
fn header_time_follows_context_offset() {
    let msg = message("hello", Vec::new());
    let ctx = PreviewContext {
        utc_offset: FixedOffset::east_opt(5 * 3600 + 1800),
        ..ctx(None)
    };
    let preview = resolve_preview(&msg, &ctx, &QueryTokenSigner);

    assert_eq!(preview.time, "20:12");
}
