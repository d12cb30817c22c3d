//! Helpers layered over the poise invocation context.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use poise::{CreateReply, ReplyHandle, serenity_prelude as serenity};
use serenity::{ReactionType, UserId};
use tracing::debug;

use crate::{
    Context,
    views::{
        Access, Confirmation, ExitPolicy, InvocationTransport, ListPageSource, Paginator,
        SessionEnd, confirmation,
    },
};

pub const TOKEN_PLACEHOLDER: &str = "[Token Hidden for privacy reasons]";

pub const DEFAULT_PER_PAGE: usize = 8;

/// Replaces every occurrence of `token` in `content`.
pub fn redact(content: &str, token: &str) -> String {
    if token.is_empty() {
        return content.to_string();
    }
    content.replace(token, TOKEN_PLACEHOLDER)
}

pub fn redact_reply(mut reply: CreateReply, token: &str) -> CreateReply {
    reply.content = reply.content.map(|content| redact(&content, token));
    reply
}

#[derive(Debug, Clone, Copy)]
pub struct ConfirmOptions {
    pub timeout: Duration,
    pub delete_after: bool,
    /// Who may answer. Defaults to the invoking author.
    pub author: Option<UserId>,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            timeout: confirmation::DEFAULT_TIMEOUT,
            delete_after: true,
            author: None,
        }
    }
}

pub trait ContextExt<'a> {
    /// Sends `reply` as a reply to the invocation with the bot token scrubbed from its text.
    fn send_redacted(
        self,
        reply: CreateReply,
    ) -> impl Future<Output = Result<ReplyHandle<'a>, serenity::Error>> + Send;

    fn say_redacted(
        self,
        text: impl Into<String> + Send,
    ) -> impl Future<Output = Result<ReplyHandle<'a>, serenity::Error>> + Send;

    /// Asks a yes/no question. `None` means it timed out.
    fn confirm(
        self,
        prompt: impl Into<String> + Send,
        options: ConfirmOptions,
    ) -> impl Future<Output = Result<Option<bool>, serenity::Error>> + Send;

    /// Pages through `entries`, `per_page` at a time, for the author and the bot owners.
    fn paginate<T>(
        self,
        entries: Vec<T>,
        per_page: usize,
    ) -> impl Future<Output = Result<SessionEnd, serenity::Error>> + Send
    where
        T: Display + Send + Sync + 'static;

    fn tick(self) -> impl Future<Output = ()> + Send;

    fn cross(self) -> impl Future<Output = ()> + Send;
}

impl<'a> ContextExt<'a> for Context<'a> {
    async fn send_redacted(self, reply: CreateReply) -> Result<ReplyHandle<'a>, serenity::Error> {
        let reply = redact_reply(reply, &self.data().config.token).reply(true);
        self.send(reply).await
    }

    async fn say_redacted(
        self,
        text: impl Into<String> + Send,
    ) -> Result<ReplyHandle<'a>, serenity::Error> {
        self.send_redacted(CreateReply::default().content(text)).await
    }

    async fn confirm(
        self,
        prompt: impl Into<String> + Send,
        options: ConfirmOptions,
    ) -> Result<Option<bool>, serenity::Error> {
        let author = options.author.unwrap_or(self.author().id);
        Confirmation::new(prompt, author)
            .timeout(options.timeout)
            .delete_after(options.delete_after)
            .ask(&InvocationTransport::new(self))
            .await
    }

    async fn paginate<T>(self, entries: Vec<T>, per_page: usize) -> Result<SessionEnd, serenity::Error>
    where
        T: Display + Send + Sync + 'static,
    {
        let access = Access::Invocation {
            author: self.author().id,
            owners: self.framework().options().owners.clone(),
        };
        Paginator::new(ListPageSource::new(entries, per_page), access)
            .exit_policy(ExitPolicy::Disable)
            .start(&InvocationTransport::new(self))
            .await
    }

    async fn tick(self) {
        react(self, '✅').await;
    }

    async fn cross(self) {
        react(self, '❌').await;
    }
}

async fn react(ctx: Context<'_>, emoji: char) {
    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(why) = prefix.msg.react(ctx.http(), ReactionType::from(emoji)).await {
            debug!("Failed to react to invocation: {why}");
        }
    }
}
