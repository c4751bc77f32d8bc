//! Comment thread operations

use super::HandlerContext;
use crate::core::{Comment, Identity, TicketId};
use crate::error::Result;
use crate::storage::CommentRepository;
use serde::Deserialize;
use tracing::info;

/// Body of a new comment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub body: Option<String>,
}

impl CreateCommentRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// Comments on a visible ticket, oldest first
pub fn list_comments(
    ctx: &HandlerContext,
    identity: &Identity,
    ticket: &TicketId,
) -> Result<Vec<Comment>> {
    ctx.visible_ticket(identity, ticket)?;
    ctx.storage.load_comments(ticket)
}

/// Post a comment authored by `identity` on a visible ticket
pub fn post_comment(
    ctx: &HandlerContext,
    identity: &Identity,
    ticket: &TicketId,
    request: CreateCommentRequest,
) -> Result<Comment> {
    ctx.visible_ticket(identity, ticket)?;

    let comment = Comment::new(*ticket, identity.id, request.body.as_deref().unwrap_or_default())?;
    ctx.storage.append_comment(&comment)?;

    info!(
        "Comment {} posted on ticket {} by {}",
        comment.id.short(),
        ticket.short(),
        identity.id.short()
    );
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::TestDesk;

    #[test]
    fn test_post_and_list() {
        let desk = TestDesk::new();
        let client = TestDesk::client();
        let agent = TestDesk::agent();
        let ticket = desk.create_ticket(&client, "Slow VPN");

        post_comment(&desk.ctx, &client, &ticket.id, CreateCommentRequest::new("Since Monday")).unwrap();
        post_comment(&desk.ctx, &agent, &ticket.id, CreateCommentRequest::new("  Looking  ")).unwrap();

        let thread = list_comments(&desk.ctx, &client, &ticket.id).unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].author, client.id);
        assert_eq!(thread[0].body, "Since Monday");
        assert_eq!(thread[1].author, agent.id);
        assert_eq!(thread[1].body, "Looking");
        assert!(thread[0].created_at <= thread[1].created_at);
    }

    #[test]
    fn test_empty_body_rejected() {
        let desk = TestDesk::new();
        let client = TestDesk::client();
        let ticket = desk.create_ticket(&client, "Mouse");

        for request in [CreateCommentRequest::new("   "), CreateCommentRequest::default()] {
            let err = post_comment(&desk.ctx, &client, &ticket.id, request).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(list_comments(&desk.ctx, &client, &ticket.id).unwrap().is_empty());
    }

    #[test]
    fn test_thread_requires_visibility() {
        let desk = TestDesk::new();
        let ticket = desk.create_ticket(&TestDesk::client(), "Private");
        let stranger = TestDesk::client();

        let err = list_comments(&desk.ctx, &stranger, &ticket.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = post_comment(&desk.ctx, &stranger, &ticket.id, CreateCommentRequest::new("hi"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
