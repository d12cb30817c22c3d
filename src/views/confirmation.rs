use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::{ButtonStyle, UserId};
use tokio::time::Instant;
use tracing::debug;

use super::{
    render::{Control, Page, Render},
    transport::{Transport, ViewInteraction},
};

pub const CONFIRM_ID: &str = "confirm:yes";
pub const CANCEL_ID: &str = "confirm:no";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const NOT_FOR_YOU: &str = "This confirmation dialog is not for you.";

/// Terminal once `resolved` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmationState {
    pub result: Option<bool>,
    pub resolved: bool,
}

impl ConfirmationState {
    /// Records the outcome. Returns `false` if the state was already resolved.
    pub fn resolve(&mut self, result: Option<bool>) -> bool {
        if self.resolved {
            return false;
        }
        self.result = result;
        self.resolved = true;
        true
    }
}

/// A yes/no prompt bound to a single user.
#[derive(Debug, Clone)]
pub struct Confirmation {
    prompt: String,
    author: UserId,
    timeout: Duration,
    delete_after: bool,
    state: ConfirmationState,
}

impl Confirmation {
    pub fn new(prompt: impl Into<String>, author: UserId) -> Self {
        Self {
            prompt: prompt.into(),
            author,
            timeout: DEFAULT_TIMEOUT,
            delete_after: true,
            state: ConfirmationState::default(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the prompt is deleted once answered.
    pub fn delete_after(mut self, delete_after: bool) -> Self {
        self.delete_after = delete_after;
        self
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn render(&self) -> Render {
        let button = |custom_id: &str, label: &str, style| Control {
            custom_id: custom_id.to_string(),
            label: Some(label.to_string()),
            emoji: None,
            style,
            disabled: self.state.resolved,
        };
        Render::new(
            Page::Text(self.prompt.clone()),
            vec![
                button(CONFIRM_ID, "Confirm", ButtonStyle::Success),
                button(CANCEL_ID, "Cancel", ButtonStyle::Danger),
            ],
        )
    }

    /// Maps a pressed control to a decision and resolves the prompt with it.
    pub fn press(&mut self, custom_id: &str) -> Option<bool> {
        let decision = match custom_id {
            CONFIRM_ID => true,
            CANCEL_ID => false,
            _ => return None,
        };
        self.state.resolve(Some(decision)).then_some(decision)
    }

    /// Sends the prompt and waits for the author's answer. `None` means nobody answered in time.
    pub async fn ask<T: Transport>(mut self, transport: &T) -> Result<Option<bool>, serenity::Error> {
        let message = transport.send(&self.render()).await?;
        let deadline = Instant::now() + self.timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let Some(interaction) = transport.next_interaction(&message, remaining).await else {
                self.state.resolve(None);
                if let Err(why) = transport.edit(&message, &self.render()).await {
                    debug!("Failed to disable expired confirmation: {why}");
                }
                return Ok(None);
            };

            if interaction.user_id() != self.author {
                if let Err(why) = transport.deny(&interaction, NOT_FOR_YOU).await {
                    debug!("Failed to deliver confirmation denial: {why}");
                }
                continue;
            }

            let Some(decision) = self.press(interaction.custom_id()) else {
                continue;
            };

            if self.delete_after {
                if let Err(why) = transport.acknowledge(&interaction).await {
                    debug!("Failed to acknowledge confirmation: {why}");
                }
                if let Err(why) = transport.delete(&message).await {
                    debug!("Failed to delete confirmation: {why}");
                }
            } else if let Err(why) = transport.update(&interaction, &self.render()).await {
                debug!("Failed to disable answered confirmation: {why}");
            }
            return Ok(Some(decision));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_resolves_once() {
        let mut confirmation = Confirmation::new("Sure?", UserId::new(1));
        assert_eq!(confirmation.press(CANCEL_ID), Some(false));
        assert_eq!(confirmation.press(CONFIRM_ID), None);
        assert_eq!(
            confirmation.state(),
            ConfirmationState {
                result: Some(false),
                resolved: true
            }
        );
    }

    #[test]
    fn test_unknown_control_does_not_resolve() {
        let mut confirmation = Confirmation::new("Sure?", UserId::new(1));
        assert_eq!(confirmation.press("paginator:stop"), None);
        assert!(!confirmation.state().resolved);
    }

    #[test]
    fn test_controls_disable_when_resolved() {
        let mut confirmation = Confirmation::new("Sure?", UserId::new(1));
        let render = confirmation.render();
        assert_eq!(render.controls.len(), 2);
        assert_eq!(render.controls[0].style, ButtonStyle::Success);
        assert_eq!(render.controls[1].style, ButtonStyle::Danger);
        assert!(render.controls.iter().all(|c| !c.disabled));

        confirmation.press(CONFIRM_ID);
        assert!(confirmation.render().controls.iter().all(|c| c.disabled));
    }

    #[test]
    fn test_state_resolution_is_terminal() {
        let mut state = ConfirmationState::default();
        assert!(state.resolve(None));
        assert!(!state.resolve(Some(true)));
        assert_eq!(state.result, None);
    }
}
