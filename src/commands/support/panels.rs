use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::{
    ButtonStyle, Colour, ComponentInteraction, CreateActionRow, CreateButton, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, RoleId, Timestamp,
};
use tracing::{debug, info};

use super::support_config;
use crate::{CommandResult, Context, Error, config::SupportConfig};

pub const CUSTOM_ID_PREFIX: &str = "support";

/// Accounts younger than this are kicked instead of verified.
pub const MIN_ACCOUNT_AGE_SECS: i64 = 3 * 24 * 60 * 60;

const VERIFY_DELAY: Duration = Duration::from_millis(1500);

/// What a persistent support button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportAction {
    Updates,
    Announcements,
    Tester,
    CheckRoles,
    Verify,
}

impl SupportAction {
    pub const ALL: [SupportAction; 5] = [
        SupportAction::Updates,
        SupportAction::Announcements,
        SupportAction::Tester,
        SupportAction::CheckRoles,
        SupportAction::Verify,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SupportAction::Updates => "updates",
            SupportAction::Announcements => "announcements",
            SupportAction::Tester => "tester",
            SupportAction::CheckRoles => "roles",
            SupportAction::Verify => "verify",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SupportAction::Updates => "Metro Updates",
            SupportAction::Announcements => "Server Announcements",
            SupportAction::Tester => "Tester",
            SupportAction::CheckRoles => "Check my roles",
            SupportAction::Verify => "Verify",
        }
    }

    pub fn custom_id(self) -> String {
        format!("{CUSTOM_ID_PREFIX}:{}", self.key())
    }

    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let key = custom_id.strip_prefix(CUSTOM_ID_PREFIX)?.strip_prefix(':')?;
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    /// The self-assignable role behind a toggle button.
    pub fn role(self, support: &SupportConfig) -> Option<RoleId> {
        match self {
            SupportAction::Updates => Some(support.updates_role),
            SupportAction::Announcements => Some(support.announcements_role),
            SupportAction::Tester => Some(support.tester_role),
            SupportAction::CheckRoles | SupportAction::Verify => None,
        }
    }

    fn button(self) -> CreateButton {
        let style = match self {
            SupportAction::CheckRoles | SupportAction::Verify => ButtonStyle::Success,
            _ => ButtonStyle::Primary,
        };
        CreateButton::new(self.custom_id()).label(self.label()).style(style)
    }
}

fn panel(title: &str, description: &str, actions: &[SupportAction]) -> CreateMessage {
    let buttons = actions.iter().map(|action| action.button()).collect();
    CreateMessage::new()
        .embed(CreateEmbed::new().title(title).description(description))
        .components(vec![CreateActionRow::Buttons(buttons)])
}

/// The self-role, role check and verification panels, in posting order.
pub fn panel_messages() -> Vec<CreateMessage> {
    const SELF_ROLES: &str = "Click on a button to add/remove that role.";
    vec![
        panel(
            "Self-Roles",
            SELF_ROLES,
            &[SupportAction::Updates, SupportAction::Announcements],
        ),
        panel("Self-Roles", SELF_ROLES, &[SupportAction::Tester]),
        panel(
            "Check your roles",
            "Click below to see the roles you have",
            &[SupportAction::CheckRoles],
        ),
        panel(
            "Welcome to Metro Support Server!",
            "Please click the **Verify** button below to gain access to the server. \
             This checks your account creation date to detect spam. \
             If you have any issues/questions please contact a support member.",
            &[SupportAction::Verify],
        ),
    ]
}

/// Post the support server panels in this channel
#[poise::command(prefix_command, owners_only, hide_in_help, guild_only, category = "Support")]
pub async fn support_roles(ctx: Context<'_>) -> CommandResult {
    support_config(ctx)?;

    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(why) = prefix.msg.delete(ctx).await {
            debug!("Could not delete support_roles invocation: {why}");
        }
    }

    for message in panel_messages() {
        ctx.channel_id().send_message(ctx, message).await?;
    }
    Ok(())
}

/// Reply text and colour after toggling a role.
pub fn toggle_outcome(label: &str, had_role: bool) -> (String, Colour) {
    if had_role {
        (format!("Removed **{label}** from your roles."), Colour::RED)
    } else {
        (format!("Added **{label}** to your roles."), Colour::DARK_GREEN)
    }
}

pub fn roles_overview(updates: bool, announcements: bool, tester: bool) -> String {
    let mark = |has: bool| if has { '✅' } else { '❌' };
    format!(
        "**Metro Updates:** {} \n**Announcements:** {}\n\n**Tester:** {}",
        mark(updates),
        mark(announcements),
        mark(tester)
    )
}

pub fn is_too_new(created_unix: i64, now_unix: i64) -> bool {
    created_unix > now_unix - MIN_ACCOUNT_AGE_SECS
}

async fn reply(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    message: CreateInteractionResponseMessage,
) -> Result<(), Error> {
    interaction
        .create_response(ctx, CreateInteractionResponse::Message(message.ephemeral(true)))
        .await?;
    Ok(())
}

/// Handles a press on one of the persistent support buttons.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    support: &SupportConfig,
) -> Result<(), Error> {
    let Some(action) = SupportAction::from_custom_id(&interaction.data.custom_id) else {
        debug!("Unknown support button: {}", interaction.data.custom_id);
        return Ok(());
    };
    if interaction.guild_id != Some(support.guild_id) {
        debug!("Support button pressed outside the support server");
        return Ok(());
    }
    let Some(member) = interaction.member.as_ref() else {
        return Ok(());
    };
    let has = |role: RoleId| member.roles.contains(&role);

    match action {
        SupportAction::Updates | SupportAction::Announcements | SupportAction::Tester => {
            let Some(role) = action.role(support) else {
                return Ok(());
            };
            let had_role = has(role);
            if had_role {
                member.remove_role(&ctx.http, role).await?;
            } else {
                member.add_role(&ctx.http, role).await?;
            }
            info!(user = %member.user.id, %role, added = !had_role, "Support role toggled");

            let (text, colour) = toggle_outcome(action.label(), had_role);
            let embed = CreateEmbed::new().description(text).colour(colour);
            reply(ctx, interaction, CreateInteractionResponseMessage::new().embed(embed)).await
        }
        SupportAction::CheckRoles => {
            let embed = CreateEmbed::new().title("Your Roles:").description(roles_overview(
                has(support.updates_role),
                has(support.announcements_role),
                has(support.tester_role),
            ));
            reply(ctx, interaction, CreateInteractionResponseMessage::new().embed(embed)).await
        }
        SupportAction::Verify => verify(ctx, interaction, support).await,
    }
}

async fn verify(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    support: &SupportConfig,
) -> Result<(), Error> {
    reply(
        ctx,
        interaction,
        CreateInteractionResponseMessage::new().content("✅ Verifying..."),
    )
    .await?;
    tokio::time::sleep(VERIFY_DELAY).await;

    let user = &interaction.user;
    if is_too_new(user.created_at().unix_timestamp(), Timestamp::now().unix_timestamp()) {
        const REASON: &str = "Kicked for being too new! (Account was created in the last 3 days)";
        let notice = CreateMessage::new()
            .content("You were kicked for being too new! (Account was created in the last 3 days)");
        if let Err(why) = user.direct_message(ctx, notice).await {
            debug!("Could not DM {}: {why}", user.id);
        }
        support
            .guild_id
            .kick_with_reason(&ctx.http, user.id, REASON)
            .await?;
        info!(user = %user.id, "Kicked new account");
    } else {
        ctx.http
            .remove_member_role(
                support.guild_id,
                user.id,
                support.unverified_role,
                Some("Verified through the support panel"),
            )
            .await?;
        let notice = CreateMessage::new().content("✅ You were verified in Metro Support Server!");
        if let Err(why) = user.direct_message(ctx, notice).await {
            debug!("Could not DM {}: {why}", user.id);
        }
        info!(user = %user.id, "Verified member");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_ids_round_trip() {
        for action in SupportAction::ALL {
            assert_eq!(SupportAction::from_custom_id(&action.custom_id()), Some(action));
        }
        assert_eq!(SupportAction::from_custom_id("support:nothing"), None);
        assert_eq!(SupportAction::from_custom_id("paginator:first"), None);
        assert_eq!(SupportAction::from_custom_id("supportroles"), None);
    }

    #[test]
    fn test_only_toggles_have_roles() {
        let support = SupportConfig {
            guild_id: serenity::GuildId::new(1),
            updates_role: RoleId::new(2),
            announcements_role: RoleId::new(3),
            tester_role: RoleId::new(4),
            unverified_role: RoleId::new(5),
            bot_requests_channel: serenity::ChannelId::new(6),
        };
        assert_eq!(SupportAction::Tester.role(&support), Some(RoleId::new(4)));
        assert_eq!(SupportAction::Verify.role(&support), None);
    }

    #[test]
    fn test_toggle_outcome() {
        assert_eq!(
            toggle_outcome("Tester", true),
            ("Removed **Tester** from your roles.".to_string(), Colour::RED)
        );
        assert_eq!(toggle_outcome("Tester", false).1, Colour::DARK_GREEN);
    }

    #[test]
    fn test_roles_overview() {
        assert_eq!(
            roles_overview(true, false, true),
            "**Metro Updates:** ✅ \n**Announcements:** ❌\n\n**Tester:** ✅"
        );
    }

    #[test]
    fn test_is_too_new() {
        let now = 1_700_000_000;
        assert!(is_too_new(now - 60, now));
        assert!(!is_too_new(now - MIN_ACCOUNT_AGE_SECS - 1, now));
    }

    #[test]
    fn test_four_panels() {
        assert_eq!(panel_messages().len(), 4);
    }
}
