use std::collections::BTreeMap;

use crate::{
    CommandResult, Context, Data, Error,
    error::MetroError,
    views::{Access, EmbedPage, ExitPolicy, InvocationTransport, Page, Paginator},
};

pub const HELP_COLOUR: u32 = 15428885;

const NO_CATEGORY: &str = "No Category";

type Command = poise::Command<Data, Error>;

/// Show help about all commands or one command
#[poise::command(prefix_command, slash_command, category = "General")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    #[rest]
    command: Option<String>,
) -> CommandResult {
    let pages = help_pages(
        &ctx.framework().options().commands,
        command.as_deref(),
        ctx.prefix(),
    )?;

    let access = Access::Invocation {
        author: ctx.author().id,
        owners: ctx.framework().options().owners.clone(),
    };
    Paginator::new(pages, access)
        .with_formatter(help_embed)
        .exit_policy(ExitPolicy::Delete)
        .start(&InvocationTransport::new(ctx))
        .await?;

    Ok(())
}

/// Wraps a text page into the help embed.
pub fn help_embed(page: Page) -> Page {
    match page {
        Page::Text(text) => EmbedPage::new().description(text).colour(HELP_COLOUR).into(),
        embed => embed,
    }
}

/// One page per category, or a single page describing `query`.
pub fn help_pages(
    commands: &[Command],
    query: Option<&str>,
    prefix: &str,
) -> Result<Vec<Page>, MetroError> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        None => Ok(category_pages(commands, prefix)),
        Some(query) => {
            let (path, command) = find_command(commands, query).ok_or_else(|| {
                MetroError::bad_argument(format!("No command called \"{query}\" found."))
            })?;
            Ok(vec![command_page(command, &path, prefix)])
        }
    }
}

/// Resolves "group sub" paths by name or alias, returning the canonical path with the command.
pub fn find_command<'a>(commands: &'a [Command], query: &str) -> Option<(String, &'a Command)> {
    let mut words = query.split_whitespace();
    let mut found = lookup(commands, words.next()?)?;
    let mut path = found.name.clone();
    for word in words {
        found = lookup(&found.subcommands, word)?;
        path.push(' ');
        path.push_str(&found.name);
    }
    Some((path, found))
}

fn lookup<'a>(commands: &'a [Command], name: &str) -> Option<&'a Command> {
    let name = name.to_lowercase();
    commands
        .iter()
        .find(|c| c.name == name || c.aliases.iter().any(|alias| *alias == name))
}

fn category_pages(commands: &[Command], prefix: &str) -> Vec<Page> {
    let mut categories: BTreeMap<&str, Vec<&Command>> = BTreeMap::new();
    for command in commands.iter().filter(|c| !c.hide_in_help) {
        categories
            .entry(command.category.as_deref().unwrap_or(NO_CATEGORY))
            .or_default()
            .push(command);
    }

    categories
        .into_iter()
        .map(|(category, commands)| {
            let lines = commands
                .iter()
                .map(|c| format!("`{prefix}{}`: {}", c.name, short_doc(c)))
                .collect::<Vec<_>>()
                .join("\n");
            Page::Text(format!(
                "__**{category}:**__\n{lines}\n\nType `{prefix}help [command]` for more info on a command."
            ))
        })
        .collect()
}

fn command_page(command: &Command, path: &str, prefix: &str) -> Page {
    let mut text = format!("**{}**\n", signature(command, path, prefix));

    if !command.aliases.is_empty() {
        text.push_str(&format!("Aliases: {}\n", command.aliases.join(", ")));
    }

    let help = command
        .help_text
        .as_deref()
        .or(command.description.as_deref())
        .unwrap_or("No help found...");
    text.push('\n');
    text.push_str(help);

    let subcommands: Vec<_> = command
        .subcommands
        .iter()
        .filter(|c| !c.hide_in_help)
        .map(|c| format!("`{:<15}:` {}", c.name, short_doc(c)))
        .collect();
    if !subcommands.is_empty() {
        text.push_str("\n\n**Commands**\n");
        text.push_str(&subcommands.join("\n"));
    }

    Page::Text(text)
}

fn signature(command: &Command, path: &str, prefix: &str) -> String {
    let mut signature = format!("{prefix}{path}");
    for parameter in &command.parameters {
        if parameter.required {
            signature.push_str(&format!(" <{}>", parameter.name));
        } else {
            signature.push_str(&format!(" [{}]", parameter.name));
        }
    }
    signature
}

fn short_doc(command: &Command) -> String {
    let doc = command.description.as_deref().unwrap_or_default();
    if doc.chars().count() < 58 {
        doc.to_string()
    } else {
        format!("{}...", doc.chars().take(58).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;
    use assert_matches::assert_matches;

    fn text(page: &Page) -> &str {
        match page {
            Page::Text(text) => text,
            Page::Embed(_) => panic!("help pages are built as text"),
        }
    }

    #[test]
    fn test_one_page_per_category() {
        let all = commands::all();
        let pages = help_pages(&all, None, "m.").unwrap();

        let mut categories: Vec<_> = all
            .iter()
            .filter(|c| !c.hide_in_help)
            .map(|c| c.category.clone().unwrap_or_default())
            .collect();
        categories.sort();
        categories.dedup();
        assert_eq!(pages.len(), categories.len());
        assert!(pages.iter().any(|p| text(p).contains("`m.ping`")));
        assert!(!pages.iter().any(|p| text(p).contains("`m.register`")));
    }

    #[test]
    fn test_subcommand_page() {
        let all = commands::all();
        let pages = help_pages(&all, Some("role add"), "m.").unwrap();
        assert_eq!(pages.len(), 1);
        assert!(text(&pages[0]).starts_with("**m.role add <member> <role>**"));
    }

    #[test]
    fn test_group_page_lists_subcommands() {
        let all = commands::all();
        let pages = help_pages(&all, Some("note"), "m.").unwrap();
        let page = text(&pages[0]);
        assert!(page.contains("**Commands**"));
        assert!(page.contains("`add"));
    }

    #[test]
    fn test_unknown_command() {
        let all = commands::all();
        assert_matches!(
            help_pages(&all, Some("teleport"), "m."),
            Err(MetroError::BadArgument(message)) if message.contains("teleport")
        );
    }

    #[test]
    fn test_help_embed_colour() {
        let Page::Embed(embed) = help_embed(Page::Text("body".into())) else {
            panic!("expected an embed");
        };
        assert_eq!(embed.colour, Some(HELP_COLOUR));
        assert_eq!(embed.description.as_deref(), Some("body"));
    }
}
