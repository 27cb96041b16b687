//! Re-render suppression for the reply preview.
//!
//! The preview recomputes only when the replying flag, the theme or the
//! message id changes. Edits to the same message (attachment captions,
//! text) and changes to the surrounding context are ignored until one of
//! those three keys moves.

use crate::types::Message;

use super::{resolve_preview, AttachmentUrlSigner, PreviewContext, ReplyPreview};

/// Inputs the preview surface is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct PreviewProps<'a> {
    /// Whether the composer is in reply mode.
    pub replying: bool,
    /// Active theme identifier.
    pub theme_id: &'a str,
    /// Message being replied to.
    pub message: &'a Message,
}

/// `true` when `next` would render the same as `prev`.
pub fn props_equal(prev: &PreviewProps<'_>, next: &PreviewProps<'_>) -> bool {
    PreviewKey::from(prev) == PreviewKey::from(next)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviewKey {
    replying: bool,
    theme_id: String,
    message_id: String,
}

impl From<&PreviewProps<'_>> for PreviewKey {
    fn from(props: &PreviewProps<'_>) -> Self {
        Self {
            replying: props.replying,
            theme_id: props.theme_id.to_owned(),
            message_id: props.message.id.clone(),
        }
    }
}

/// Caches the last rendered preview and its key.
pub struct MemoizedReplyPreview<S> {
    signer: S,
    last: Option<(PreviewKey, Option<ReplyPreview>)>,
    recomputes: u64,
}

impl<S: AttachmentUrlSigner> MemoizedReplyPreview<S> {
    /// Create an empty cache that signs thumbnails with `signer`.
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            last: None,
            recomputes: 0,
        }
    }

    /// Render `props`, reusing the previous output when [`props_equal`] holds.
    ///
    /// Returns `None` while not replying.
    pub fn render(
        &mut self,
        props: &PreviewProps<'_>,
        ctx: &PreviewContext<'_>,
    ) -> Option<&ReplyPreview> {
        let key = PreviewKey::from(props);
        let stale = self.last.as_ref().map_or(true, |(prev, _)| *prev != key);

        if stale {
            let output = props
                .replying
                .then(|| resolve_preview(props.message, ctx, &self.signer));
            self.recomputes = self.recomputes.saturating_add(1);
            tracing::trace!(
                message_id = %key.message_id,
                recomputes = self.recomputes,
                "reply preview recomputed"
            );
            self.last = Some((key, output));
        }

        self.last.as_ref().and_then(|(_, output)| output.as_ref())
    }

    /// How many times the preview has been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Forget the cached output so the next render recomputes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
