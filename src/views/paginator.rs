//! Button-driven pagination over a [`PageSource`].
//!
//! A [`Paginator`] owns its state and is consumed by [`Paginator::start`], which sends the
//! first page and then serves interactions until the user stops it, the timeout elapses, or
//! the message can no longer be edited.

use std::collections::HashSet;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::UserId;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{
    button::{ButtonRole, ButtonSet},
    render::{Control, Page, Render},
    source::PageSource,
    transport::{Transport, ViewInteraction},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Private notice shown to anyone pressing a paginator they may not control.
pub const DENIED_NOTICE: &str = "Sorry, you can't use this interaction as it is not started by you.";

pub type Formatter = Box<dyn Fn(Page) -> Page + Send + Sync>;

/// What happens to the message when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    Delete,
    /// Remove every control, keep the content.
    Clear,
    #[default]
    Disable,
}

/// Who may drive a paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Exactly one user.
    Bound(UserId),
    /// The invoking author plus the bot owners.
    Invocation {
        author: UserId,
        owners: HashSet<UserId>,
    },
}

impl Access {
    pub fn permits(&self, user: UserId) -> bool {
        match self {
            Access::Bound(owner) => *owner == user,
            Access::Invocation { author, owners } => *author == user || owners.contains(&user),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorState {
    pub current_page: usize,
    pub max_pages: usize,
    /// Set while a session is running.
    pub timeout_deadline: Option<Instant>,
    pub stopped: bool,
}

/// Outcome of a single navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    Unchanged,
    Stopped,
}

/// How a paginator session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Only one page, sent without controls.
    Static,
    Stopped,
    TimedOut,
    /// The message could be edited neither through the interaction nor directly.
    Abandoned,
}

pub struct Paginator<S> {
    source: S,
    formatter: Formatter,
    buttons: ButtonSet,
    state: PaginatorState,
    access: Access,
    exit: ExitPolicy,
    timeout: Duration,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, access: Access) -> Self {
        let max_pages = source.page_count().max(1);
        Self {
            source,
            formatter: Box::new(|page| page),
            buttons: ButtonSet::default(),
            state: PaginatorState {
                current_page: 0,
                max_pages,
                timeout_deadline: None,
                stopped: false,
            },
            access,
            exit: ExitPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_buttons(mut self, buttons: ButtonSet) -> Self {
        self.buttons = buttons;
        self
    }

    /// Transforms every page before the indicator is attached.
    pub fn with_formatter(mut self, formatter: impl Fn(Page) -> Page + Send + Sync + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn exit_policy(mut self, exit: ExitPolicy) -> Self {
        self.exit = exit;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &PaginatorState {
        &self.state
    }

    pub fn is_interactive(&self) -> bool {
        self.state.max_pages > 1
    }

    pub fn page_indicator(&self) -> String {
        format!("Page {}/{}", self.state.current_page + 1, self.state.max_pages)
    }

    pub fn check(&self, user: UserId) -> bool {
        self.access.permits(user)
    }

    /// Applies a button press to the state. Out of range moves are clamped and a stopped
    /// paginator never changes again.
    pub fn navigate(&mut self, role: ButtonRole) -> Navigation {
        if self.state.stopped {
            return Navigation::Unchanged;
        }

        let last = self.state.max_pages - 1;
        let current = self.state.current_page;
        let target = match role {
            ButtonRole::First => 0,
            ButtonRole::Prev => current.saturating_sub(1),
            ButtonRole::Next => (current + 1).min(last),
            ButtonRole::Last => last,
            ButtonRole::Page => current,
            ButtonRole::Stop => {
                self.state.stopped = true;
                return Navigation::Stopped;
            }
        };

        if target == current {
            Navigation::Unchanged
        } else {
            self.state.current_page = target;
            Navigation::Moved
        }
    }

    pub fn render(&self) -> Render {
        let page = (self.formatter)(self.source.get_page(self.state.current_page));
        let controls = if self.is_interactive() {
            self.controls()
        } else {
            Vec::new()
        };
        Render::new(page.with_indicator(&self.page_indicator()), controls)
    }

    fn controls(&self) -> Vec<Control> {
        let current = self.state.current_page;
        let last = self.state.max_pages - 1;

        let mut laid_out = Vec::new();
        let mut positioned = Vec::new();

        for role in ButtonRole::ALL {
            let Some(button) = self.buttons.get(role) else {
                continue;
            };
            if matches!(role, ButtonRole::First | ButtonRole::Last) && self.state.max_pages <= 2 {
                continue;
            }

            let (label, disabled) = match role {
                ButtonRole::First | ButtonRole::Prev => (button.label.clone(), current == 0),
                ButtonRole::Next | ButtonRole::Last => (button.label.clone(), current == last),
                ButtonRole::Stop => (button.label.clone(), false),
                ButtonRole::Page => (Some(self.page_indicator()), true),
            };
            let control = Control {
                custom_id: role.custom_id(),
                label,
                emoji: button.emoji.clone(),
                style: button.style,
                disabled,
            };

            match button.position {
                Some(position) => positioned.push((position, control)),
                None => laid_out.push(control),
            }
        }

        for (position, control) in positioned {
            let index = position.min(laid_out.len());
            laid_out.insert(index, control);
        }
        laid_out
    }

    fn refresh_deadline(&mut self) {
        self.state.timeout_deadline = Some(Instant::now() + self.timeout);
    }

    fn remaining(&self) -> Duration {
        self.state
            .timeout_deadline
            .map_or(self.timeout, |deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Sends the first page and serves interactions until the session ends.
    ///
    /// Only the initial send can fail; everything after it is logged and absorbed so the
    /// invoking command is never failed by a menu it already delivered.
    pub async fn start<T: Transport>(mut self, transport: &T) -> Result<SessionEnd, serenity::Error> {
        let message = transport.send(&self.render()).await?;
        if !self.is_interactive() {
            return Ok(SessionEnd::Static);
        }

        self.refresh_deadline();
        loop {
            let Some(interaction) = transport.next_interaction(&message, self.remaining()).await
            else {
                self.state.stopped = true;
                self.finish(transport, &message).await;
                return Ok(SessionEnd::TimedOut);
            };

            if !self.check(interaction.user_id()) {
                debug!(user = %interaction.user_id(), "rejected paginator interaction");
                if let Err(why) = transport.deny(&interaction, DENIED_NOTICE).await {
                    debug!("Failed to deliver paginator denial: {why}");
                }
                continue;
            }

            let Some(role) = ButtonRole::from_custom_id(interaction.custom_id()) else {
                continue;
            };
            self.refresh_deadline();

            if self.navigate(role) == Navigation::Stopped {
                if let Err(why) = transport.acknowledge(&interaction).await {
                    debug!("Failed to acknowledge stop: {why}");
                }
                self.finish(transport, &message).await;
                return Ok(SessionEnd::Stopped);
            }

            let render = self.render();
            if let Err(why) = transport.update(&interaction, &render).await {
                debug!("Interaction update failed, editing the message instead: {why}");
                if let Err(why) = transport.edit(&message, &render).await {
                    warn!("Paginator message could not be edited, ending session: {why}");
                    return Ok(SessionEnd::Abandoned);
                }
            }
        }
    }

    async fn finish<T: Transport>(&self, transport: &T, message: &T::Handle) {
        let result = match self.exit {
            ExitPolicy::Delete => transport.delete(message).await,
            ExitPolicy::Clear => transport.edit(message, &self.render().without_controls()).await,
            ExitPolicy::Disable => transport.edit(message, &self.render().disabled()).await,
        };
        if let Err(why) = result {
            warn!("Failed to close paginator ({:?}): {why}", self.exit);
        }
    }
}
