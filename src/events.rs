use poise::serenity_prelude as serenity;
use serenity::{ComponentInteraction, Context, EventHandler, Interaction, Ready, async_trait};
use tracing::{error, info};

use crate::commands::support::panels::{self, CUSTOM_ID_PREFIX};
use crate::config::SupportConfig;

/// Gateway events outside the command framework: the persistent support buttons.
pub struct Handler {
    pub support: Option<SupportConfig>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected to {} guilds", ready.user.name, ready.guilds.len());
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Component(component) = interaction {
            if is_support_button(&component.data.custom_id) {
                self.support_component_interaction(&ctx, &component).await;
            }
        }
    }
}

impl Handler {
    /// Support buttons only work when the support server is configured.
    async fn support_component_interaction(&self, ctx: &Context, component: &ComponentInteraction) {
        let Some(support) = &self.support else {
            return;
        };
        if let Err(e) = panels::handle_interaction(ctx, component, support).await {
            error!("Error handling support interaction: {}", e);
        }
    }
}

fn is_support_button(custom_id: &str) -> bool {
    custom_id
        .strip_prefix(CUSTOM_ID_PREFIX)
        .is_some_and(|rest| rest.starts_with(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_support_button() {
        assert!(is_support_button("support:verify"));
        assert!(!is_support_button("paginator:first"));
        assert!(!is_support_button("supportive"));
    }
}
