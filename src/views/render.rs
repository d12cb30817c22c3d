use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseMessage, EditMessage, ReactionType,
};

/// Platform limit on buttons per action row.
pub const BUTTONS_PER_ROW: usize = 5;

/// One unit of displayed content.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Text(String),
    Embed(EmbedPage),
}

impl Default for Page {
    fn default() -> Self {
        Page::Text(String::new())
    }
}

impl From<String> for Page {
    fn from(text: String) -> Self {
        Page::Text(text)
    }
}

impl From<EmbedPage> for Page {
    fn from(embed: EmbedPage) -> Self {
        Page::Embed(embed)
    }
}

impl Page {
    /// Attaches a page indicator: appended after a blank line for text (or replacing empty
    /// text), joined into the footer for embeds.
    pub fn with_indicator(self, indicator: &str) -> Page {
        match self {
            Page::Text(text) if text.is_empty() => Page::Text(indicator.to_string()),
            Page::Text(text) => Page::Text(format!("{text}\n\n{indicator}")),
            Page::Embed(mut embed) => {
                embed.footer = Some(match embed.footer.take() {
                    Some(footer) if !footer.is_empty() => format!("{footer} - {indicator}"),
                    _ => indicator.to_string(),
                });
                Page::Embed(embed)
            }
        }
    }
}

/// Structured embed content kept as plain data so it can be compared and inspected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedPage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub colour: Option<u32>,
    pub footer: Option<String>,
    pub fields: Vec<(String, String, bool)>,
}

impl EmbedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push((name.into(), value.into(), inline));
        self
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new();
        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(colour) = self.colour {
            embed = embed.colour(Colour::new(colour));
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        embed.fields(self.fields.clone())
    }
}

/// Render-time state of one button.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub custom_id: String,
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: ButtonStyle,
    pub disabled: bool,
}

impl Control {
    pub fn to_button(&self) -> CreateButton {
        let mut button = CreateButton::new(&self.custom_id)
            .style(self.style)
            .disabled(self.disabled);
        if let Some(emoji) = &self.emoji {
            button = button.emoji(ReactionType::Unicode(emoji.clone()));
        }
        if let Some(label) = &self.label {
            button = button.label(label);
        }
        button
    }
}

/// The full visible state of a view: content plus controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub page: Page,
    pub controls: Vec<Control>,
}

impl Render {
    pub fn new(page: Page, controls: Vec<Control>) -> Self {
        Self { page, controls }
    }

    /// Same content, every control disabled.
    pub fn disabled(&self) -> Render {
        let controls = self
            .controls
            .iter()
            .cloned()
            .map(|control| Control {
                disabled: true,
                ..control
            })
            .collect();
        Render::new(self.page.clone(), controls)
    }

    /// Same content, no controls at all.
    pub fn without_controls(&self) -> Render {
        Render::new(self.page.clone(), Vec::new())
    }

    pub fn action_rows(&self) -> Vec<CreateActionRow> {
        self.controls
            .chunks(BUTTONS_PER_ROW)
            .map(|row| CreateActionRow::Buttons(row.iter().map(Control::to_button).collect()))
            .collect()
    }

    fn parts(&self) -> (String, Vec<CreateEmbed>) {
        match &self.page {
            Page::Text(text) => (text.clone(), Vec::new()),
            Page::Embed(embed) => (String::new(), vec![embed.to_embed()]),
        }
    }

    pub fn to_reply(&self) -> CreateReply {
        let (content, embeds) = self.parts();
        let mut reply = CreateReply::default().components(self.action_rows());
        if !content.is_empty() {
            reply = reply.content(content);
        }
        for embed in embeds {
            reply = reply.embed(embed);
        }
        reply
    }

    pub fn to_update(&self) -> CreateInteractionResponseMessage {
        let (content, embeds) = self.parts();
        CreateInteractionResponseMessage::new()
            .content(content)
            .embeds(embeds)
            .components(self.action_rows())
    }

    pub fn to_edit(&self) -> EditMessage {
        let (content, embeds) = self.parts();
        EditMessage::new()
            .content(content)
            .embeds(embeds)
            .components(self.action_rows())
    }
}
