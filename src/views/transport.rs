use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::{
    ComponentInteraction, ComponentInteractionCollector, CreateInteractionResponse,
    CreateInteractionResponseMessage, Message, UserId,
};

use super::render::Render;
use crate::{Context, context::redact_reply};

/// An interaction as seen by a view: which control was pressed and by whom.
pub trait ViewInteraction: Send + Sync {
    fn custom_id(&self) -> &str;

    fn user_id(&self) -> UserId;
}

impl ViewInteraction for ComponentInteraction {
    fn custom_id(&self) -> &str {
        &self.data.custom_id
    }

    fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// Platform primitives a view session needs.
///
/// `Handle` is the durable handle to the sent message. Interactions carry their own
/// short-lived response handle, used by [`Transport::update`].
#[serenity::async_trait]
pub trait Transport: Send + Sync {
    type Handle: Send + Sync;
    type Interaction: ViewInteraction;

    async fn send(&self, render: &Render) -> Result<Self::Handle, serenity::Error>;

    /// Waits for the next interaction on `message`. `None` means the timeout elapsed.
    async fn next_interaction(
        &self,
        message: &Self::Handle,
        timeout: Duration,
    ) -> Option<Self::Interaction>;

    /// Answers `interaction` by replacing the message it came from.
    async fn update(
        &self,
        interaction: &Self::Interaction,
        render: &Render,
    ) -> Result<(), serenity::Error>;

    async fn edit(&self, message: &Self::Handle, render: &Render) -> Result<(), serenity::Error>;

    async fn delete(&self, message: &Self::Handle) -> Result<(), serenity::Error>;

    /// Answers `interaction` without changing anything.
    async fn acknowledge(&self, interaction: &Self::Interaction) -> Result<(), serenity::Error>;

    /// Answers `interaction` with a notice only its author can see.
    async fn deny(
        &self,
        interaction: &Self::Interaction,
        notice: &str,
    ) -> Result<(), serenity::Error>;
}

/// Drives views as replies to a command invocation.
pub struct InvocationTransport<'a> {
    ctx: Context<'a>,
    ephemeral: bool,
}

impl<'a> InvocationTransport<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self {
            ctx,
            ephemeral: false,
        }
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

#[serenity::async_trait]
impl Transport for InvocationTransport<'_> {
    type Handle = Message;
    type Interaction = ComponentInteraction;

    async fn send(&self, render: &Render) -> Result<Message, serenity::Error> {
        let reply = redact_reply(render.to_reply(), &self.ctx.data().config.token)
            .ephemeral(self.ephemeral)
            .reply(true);
        let handle = self.ctx.send(reply).await?;
        handle.into_message().await
    }

    async fn next_interaction(
        &self,
        message: &Message,
        timeout: Duration,
    ) -> Option<ComponentInteraction> {
        ComponentInteractionCollector::new(self.ctx)
            .message_id(message.id)
            .timeout(timeout)
            .await
    }

    async fn update(
        &self,
        interaction: &ComponentInteraction,
        render: &Render,
    ) -> Result<(), serenity::Error> {
        interaction
            .create_response(
                self.ctx.http(),
                CreateInteractionResponse::UpdateMessage(render.to_update()),
            )
            .await
    }

    async fn edit(&self, message: &Message, render: &Render) -> Result<(), serenity::Error> {
        message
            .channel_id
            .edit_message(self.ctx.http(), message.id, render.to_edit())
            .await
            .map(|_| ())
    }

    async fn delete(&self, message: &Message) -> Result<(), serenity::Error> {
        message.delete(self.ctx.http()).await
    }

    async fn acknowledge(&self, interaction: &ComponentInteraction) -> Result<(), serenity::Error> {
        interaction.defer(self.ctx.http()).await
    }

    async fn deny(
        &self,
        interaction: &ComponentInteraction,
        notice: &str,
    ) -> Result<(), serenity::Error> {
        let response = CreateInteractionResponseMessage::new()
            .content(notice)
            .ephemeral(true);
        interaction
            .create_response(self.ctx.http(), CreateInteractionResponse::Message(response))
            .await
    }
}
