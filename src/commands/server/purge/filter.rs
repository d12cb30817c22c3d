//! Which messages a purge removes.

use std::collections::HashMap;
use std::sync::LazyLock;

use poise::serenity_prelude as serenity;
use regex::Regex;
use serenity::{Message, MessageId, UserId};

/// Most messages a single purge may look at.
pub const MAX_SEARCH: u64 = 2000;

const DEFAULT_CUSTOM_SEARCH: u64 = 100;

static CUSTOM_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a?:[a-zA-Z0-9_]+:([0-9]+)>").expect("custom emoji pattern"));

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?([0-9]+)>$").expect("user mention pattern"));

/// The parts of a message the filters look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFacts {
    pub author_id: UserId,
    pub author_name: String,
    pub author_bot: bool,
    pub webhook: bool,
    pub pinned: bool,
    pub content: String,
    pub embeds: usize,
    pub attachments: usize,
    pub reactions: usize,
}

impl From<&Message> for MessageFacts {
    fn from(message: &Message) -> Self {
        Self {
            author_id: message.author.id,
            author_name: message
                .author
                .global_name
                .clone()
                .unwrap_or_else(|| message.author.name.clone()),
            author_bot: message.author.bot,
            webhook: message.webhook_id.is_some(),
            pinned: message.pinned,
            content: message.content.clone(),
            embeds: message.embeds.len(),
            attachments: message.attachments.len(),
            reactions: message.reactions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    NotPinned,
    All,
    Embeds,
    Files,
    /// Embeds or attachments.
    Images,
    User(UserId),
    Contains(String),
    /// Non-webhook bot messages, plus anything starting with `prefix`.
    Bots { prefix: Option<String> },
    Emoji,
    Custom(Box<CustomFilter>),
}

impl Filter {
    pub fn matches(&self, message: &MessageFacts) -> bool {
        match self {
            Filter::NotPinned => !message.pinned,
            Filter::All => true,
            Filter::Embeds => message.embeds > 0,
            Filter::Files => message.attachments > 0,
            Filter::Images => message.embeds > 0 || message.attachments > 0,
            Filter::User(user) => message.author_id == *user,
            Filter::Contains(text) => message.content.contains(text.as_str()),
            Filter::Bots { prefix } => {
                (!message.webhook && message.author_bot)
                    || prefix.as_deref().is_some_and(|p| message.content.starts_with(p))
            }
            Filter::Emoji => CUSTOM_EMOJI.is_match(&message.content),
            Filter::Custom(custom) => custom.matches(message),
        }
    }
}

/// The command-line style filter of `purge custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFilter {
    pub users: Vec<UserId>,
    pub contains: Vec<String>,
    pub starts: Vec<String>,
    pub ends: Vec<String>,
    pub search: Option<u64>,
    pub after: Option<MessageId>,
    pub before: Option<MessageId>,
    pub bot: bool,
    pub embeds: bool,
    pub files: bool,
    pub emoji: bool,
    pub reactions: bool,
    pub or: bool,
    pub not: bool,
}

impl CustomFilter {
    /// Parses `--option value...` and `--flag` arguments. Quoted values may contain spaces.
    pub fn parse(args: &str) -> Result<Self, String> {
        let words = split_args(args)?;
        let mut filter = CustomFilter::default();
        let mut i = 0;

        while i < words.len() {
            let option = words[i].as_str();
            i += 1;

            // Every value up to the next option.
            let mut values = Vec::new();
            while i < words.len() && !words[i].starts_with("--") {
                values.push(words[i].clone());
                i += 1;
            }

            let takes_values = matches!(
                option,
                "--user" | "--contains" | "--starts" | "--ends" | "--search" | "--after" | "--before"
            );
            if takes_values && values.is_empty() {
                return Err(format!("argument {option}: expected at least one argument"));
            }
            if !takes_values && !values.is_empty() {
                return Err(format!("unrecognized arguments: {}", values.join(" ")));
            }

            match option {
                "--user" => {
                    for value in &values {
                        filter.users.push(parse_user(value)?);
                    }
                }
                "--contains" => filter.contains.extend(values),
                "--starts" => filter.starts.extend(values),
                "--ends" => filter.ends.extend(values),
                "--search" => filter.search = Some(parse_single(option, &values)?),
                "--after" => filter.after = Some(MessageId::new(parse_id(option, &values)?)),
                "--before" => filter.before = Some(MessageId::new(parse_id(option, &values)?)),
                "--bot" => filter.bot = true,
                "--embeds" => filter.embeds = true,
                "--files" => filter.files = true,
                "--emoji" => filter.emoji = true,
                "--reactions" => filter.reactions = true,
                "--or" => filter.or = true,
                "--not" => filter.not = true,
                other => return Err(format!("unrecognized arguments: {other}")),
            }
        }

        Ok(filter)
    }

    /// Messages to search: 100 by default, everything up to the cap when `--after` is given.
    pub fn search_limit(&self) -> u64 {
        let search = match (self.search, self.after) {
            (Some(search), _) => search,
            (None, Some(_)) => MAX_SEARCH,
            (None, None) => DEFAULT_CUSTOM_SEARCH,
        };
        search.min(MAX_SEARCH)
    }

    /// All given checks must hold, or any with `--or`; `--not` inverts the outcome.
    /// No checks at all matches every message (or none with `--or`).
    pub fn matches(&self, message: &MessageFacts) -> bool {
        let mut checks: Vec<bool> = Vec::new();
        if self.bot {
            checks.push(message.author_bot);
        }
        if self.embeds {
            checks.push(message.embeds > 0);
        }
        if self.files {
            checks.push(message.attachments > 0);
        }
        if self.reactions {
            checks.push(message.reactions > 0);
        }
        if self.emoji {
            checks.push(CUSTOM_EMOJI.is_match(&message.content));
        }
        if !self.users.is_empty() {
            checks.push(self.users.contains(&message.author_id));
        }
        if !self.contains.is_empty() {
            checks.push(self.contains.iter().any(|s| message.content.contains(s.as_str())));
        }
        if !self.starts.is_empty() {
            checks.push(self.starts.iter().any(|s| message.content.starts_with(s.as_str())));
        }
        if !self.ends.is_empty() {
            checks.push(self.ends.iter().any(|s| message.content.ends_with(s.as_str())));
        }

        let result = if self.or {
            checks.iter().any(|c| *c)
        } else {
            checks.iter().all(|c| *c)
        };
        result != self.not
    }
}

fn parse_single(option: &str, values: &[String]) -> Result<u64, String> {
    match values {
        [value] => value
            .parse()
            .map_err(|_| format!("argument {option}: invalid int value: '{value}'")),
        _ => Err(format!("unrecognized arguments: {}", values[1..].join(" "))),
    }
}

fn parse_id(option: &str, values: &[String]) -> Result<u64, String> {
    match parse_single(option, values)? {
        0 => Err(format!("argument {option}: invalid id: '0'")),
        id => Ok(id),
    }
}

/// A user mention or a raw id.
fn parse_user(value: &str) -> Result<UserId, String> {
    let digits = MENTION
        .captures(value)
        .and_then(|c| c.get(1))
        .map_or(value, |m| m.as_str());
    match digits.parse::<u64>() {
        Ok(id) if id != 0 => Ok(UserId::new(id)),
        _ => Err(format!("Member \"{value}\" not found.")),
    }
}

/// Splits on whitespace, keeping single or double quoted runs together.
fn split_args(args: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in args.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("No closing quotation".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Longest summary sent as is; anything longer collapses to a single count.
pub const SUMMARY_LIMIT: usize = 2000;

/// "3 messages were removed." followed by a count per author, most first.
pub fn removal_summary(removed: &[MessageFacts]) -> String {
    let total = removed.len();
    let mut lines = vec![if total == 1 {
        "1 message was removed.".to_string()
    } else {
        format!("{total} messages were removed.")
    }];

    if total > 0 {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for message in removed {
            *counts.entry(message.author_name.as_str()).or_default() += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        lines.push(String::new());
        lines.extend(counts.into_iter().map(|(name, count)| format!("**{name}**: {count}")));
    }

    let summary = lines.join("\n");
    if summary.chars().count() > SUMMARY_LIMIT {
        format!("Successfully removed {total} messages.")
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn by(id: u64, name: &str, content: &str) -> MessageFacts {
        MessageFacts {
            author_id: UserId::new(id),
            author_name: name.to_string(),
            author_bot: false,
            webhook: false,
            pinned: false,
            content: content.to_string(),
            embeds: 0,
            attachments: 0,
            reactions: 0,
        }
    }

    #[fixture]
    fn bot_message() -> MessageFacts {
        MessageFacts {
            author_bot: true,
            ..by(9, "robot", "beep")
        }
    }

    #[rstest]
    fn test_bots_filter(bot_message: MessageFacts) {
        let filter = Filter::Bots { prefix: Some("!".into()) };
        assert!(filter.matches(&bot_message));
        assert!(filter.matches(&by(1, "human", "!play song")));
        assert!(!filter.matches(&by(1, "human", "hello")));

        let webhook = MessageFacts { webhook: true, ..bot_message };
        assert!(!Filter::Bots { prefix: None }.matches(&webhook));
    }

    #[test]
    fn test_simple_filters() {
        let pinned = MessageFacts { pinned: true, ..by(1, "a", "x") };
        assert!(!Filter::NotPinned.matches(&pinned));
        assert!(Filter::All.matches(&pinned));

        let with_file = MessageFacts { attachments: 1, ..by(1, "a", "x") };
        assert!(Filter::Files.matches(&with_file));
        assert!(Filter::Images.matches(&with_file));
        assert!(!Filter::Embeds.matches(&with_file));

        assert!(Filter::Emoji.matches(&by(1, "a", "nice <:pog:123456>")));
        assert!(Filter::Emoji.matches(&by(1, "a", "<a:dance:42>")));
        assert!(!Filter::Emoji.matches(&by(1, "a", ":pog:")));
        assert!(Filter::User(UserId::new(1)).matches(&by(1, "a", "x")));
    }

    #[test]
    fn test_parse_custom() {
        let filter =
            CustomFilter::parse(r#"--user <@!12> 34 --contains "two words" spam --bot --or"#).unwrap();
        assert_eq!(filter.users, vec![UserId::new(12), UserId::new(34)]);
        assert_eq!(filter.contains, vec!["two words".to_string(), "spam".to_string()]);
        assert!(filter.bot);
        assert!(filter.or);
        assert_eq!(filter.search_limit(), 100);
    }

    #[test]
    fn test_parse_custom_errors() {
        assert_matches!(CustomFilter::parse("--user"), Err(e) if e.contains("expected at least one"));
        assert_matches!(CustomFilter::parse("--search ten"), Err(e) if e.contains("invalid int"));
        assert_matches!(CustomFilter::parse("--bogus"), Err(e) if e.contains("--bogus"));
        assert_matches!(CustomFilter::parse("--bot yes"), Err(e) if e.contains("yes"));
        assert_matches!(CustomFilter::parse("--contains \"open"), Err(_));
        assert_matches!(CustomFilter::parse("--user nobody"), Err(e) if e.contains("nobody"));
    }

    #[test]
    fn test_search_limit() {
        assert_eq!(CustomFilter::parse("--after 5").unwrap().search_limit(), MAX_SEARCH);
        assert_eq!(CustomFilter::parse("--search 5000").unwrap().search_limit(), MAX_SEARCH);
        assert_eq!(CustomFilter::parse("--search 7 --after 5").unwrap().search_limit(), 7);
    }

    #[test]
    fn test_custom_combinators() {
        let message = by(1, "a", "hello world");

        let all = CustomFilter::parse("--starts hello --ends moon").unwrap();
        assert!(!all.matches(&message));

        let any = CustomFilter::parse("--starts hello --ends moon --or").unwrap();
        assert!(any.matches(&message));

        let none = CustomFilter::parse("--starts hello --not").unwrap();
        assert!(!none.matches(&message));

        assert!(CustomFilter::default().matches(&message));
        assert!(!CustomFilter::parse("--or").unwrap().matches(&message));
    }

    #[test]
    fn test_removal_summary() {
        let removed = vec![by(1, "ann", "a"), by(2, "bob", "b"), by(2, "bob", "c")];
        assert_eq!(
            removal_summary(&removed),
            "3 messages were removed.\n\n**bob**: 2\n**ann**: 1"
        );
        assert_eq!(removal_summary(&removed[..1]), "1 message was removed.\n\n**ann**: 1");
        assert_eq!(removal_summary(&[]), "0 messages were removed.");
    }

    #[test]
    fn test_removal_summary_with_many_authors() {
        let removed: Vec<_> = (1..=60)
            .map(|id| by(id, &format!("{}{id}", "spammer".repeat(5)), "spam"))
            .collect();
        assert_eq!(removal_summary(&removed), "Successfully removed 60 messages.");
        assert!(removal_summary(&removed[..10]).contains("**spammerspammerspammerspammerspammer1**: 1"));
    }
}
