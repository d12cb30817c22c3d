//! Moderator notes about members.

pub mod note;
/// A member's view of their own notes.
pub mod notes;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use serenity::{GuildId, User};

use crate::{
    CommandResult, Context,
    error::MetroError,
    utils::{database::Note, text::discord_timestamp},
    views::{Access, EmbedPage, ExitPolicy, InvocationTransport, Page, Paginator},
};

/// Notes shown on one page.
pub const NOTES_PER_PAGE: usize = 10;

/// One embed page per `NOTES_PER_PAGE` notes.
pub fn note_pages(name: &str, notes: &[Note]) -> Vec<Page> {
    let total = notes.len();
    let footer = if total == 1 {
        "1 note.".to_string()
    } else {
        format!("{total} notes.")
    };

    notes
        .chunks(NOTES_PER_PAGE)
        .map(|chunk| {
            chunk
                .iter()
                .fold(
                    EmbedPage::new().title(format!("{name}'s notes")).footer(footer.clone()),
                    |page, note| {
                        page.field(
                            format!("Note #{}", note.id),
                            format!(
                                "From <@{}> {} \n> {}",
                                note.author_id,
                                discord_timestamp(note.added_time.timestamp(), 'R'),
                                note.text
                            ),
                            false,
                        )
                    },
                )
                .into()
        })
        .collect()
}

/// Pages through the notes about `user`.
async fn show_notes(ctx: Context<'_>, guild_id: GuildId, user: &User) -> CommandResult {
    let notes = ctx.data().db.notes_for(guild_id, user.id).map_err(MetroError::from)?;
    if notes.is_empty() {
        return Err(MetroError::bad_argument(format!(
            "No notes were found for this member. Use `{}note add <member> <note>` to add a note.",
            ctx.prefix()
        ))
        .into());
    }

    let access = Access::Invocation {
        author: ctx.author().id,
        owners: ctx.framework().options().owners.clone(),
    };
    Paginator::new(note_pages(&user.name, &notes), access)
        .exit_policy(ExitPolicy::Disable)
        .start(&InvocationTransport::new(ctx))
        .await?;
    Ok(())
}

/// Stores a note taken now.
fn take_note(ctx: Context<'_>, guild_id: GuildId, user: &User, text: &str) -> Result<i64, MetroError> {
    Ok(ctx
        .data()
        .db
        .add_note(guild_id, user.id, ctx.author().id, text, Utc::now())?)
}
