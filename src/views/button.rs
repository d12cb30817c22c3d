use poise::serenity_prelude as serenity;
use serenity::ButtonStyle;

use super::ViewError;

/// Prefix of every custom id emitted by a paginator.
pub const CUSTOM_ID_PREFIX: &str = "paginator";

/// The semantic role of a paginator button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    First,
    Prev,
    Next,
    Last,
    Stop,
    /// Disabled button showing `Page n/max`.
    Page,
}

impl ButtonRole {
    /// Every role, in default layout order.
    pub const ALL: [ButtonRole; 6] = [
        ButtonRole::First,
        ButtonRole::Prev,
        ButtonRole::Next,
        ButtonRole::Last,
        ButtonRole::Stop,
        ButtonRole::Page,
    ];

    /// The key used for this role in custom button maps.
    pub fn key(self) -> &'static str {
        match self {
            ButtonRole::First => "first",
            ButtonRole::Prev => "left",
            ButtonRole::Next => "right",
            ButtonRole::Last => "last",
            ButtonRole::Stop => "stop",
            ButtonRole::Page => "page",
        }
    }

    /// Resolves a custom button map key.
    pub fn from_key(key: &str) -> Result<Self, ViewError> {
        Self::ALL
            .into_iter()
            .find(|role| role.key() == key)
            .ok_or_else(|| ViewError::UnknownButtonKey(key.to_string()))
    }

    pub fn custom_id(self) -> String {
        format!("{CUSTOM_ID_PREFIX}:{}", self.key())
    }

    /// Correlates an interaction's custom id back to a role.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let key = custom_id.strip_prefix(CUSTOM_ID_PREFIX)?.strip_prefix(':')?;
        Self::from_key(key).ok()
    }

    fn slot(self) -> usize {
        match self {
            ButtonRole::First => 0,
            ButtonRole::Prev => 1,
            ButtonRole::Next => 2,
            ButtonRole::Last => 3,
            ButtonRole::Stop => 4,
            ButtonRole::Page => 5,
        }
    }
}

/// Display settings for one paginator button.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatorButton {
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: ButtonStyle,
    /// Index the button is moved to after layout, if any.
    pub position: Option<usize>,
}

impl PaginatorButton {
    /// Builds a button, rejecting one that would render blank.
    pub fn new(
        label: Option<&str>,
        emoji: Option<&str>,
        style: ButtonStyle,
    ) -> Result<Self, ViewError> {
        let label = label.filter(|l| !l.is_empty()).map(str::to_string);
        let emoji = emoji.filter(|e| !e.is_empty()).map(str::to_string);

        if label.is_none() && emoji.is_none() {
            return Err(ViewError::MissingLabel);
        }

        Ok(Self {
            label,
            emoji,
            style,
            position: None,
        })
    }

    fn emoji_only(emoji: &str) -> Self {
        Self {
            label: None,
            emoji: Some(emoji.to_string()),
            style: ButtonStyle::Secondary,
            position: None,
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

/// Fixed table mapping each [`ButtonRole`] to the button shown for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSet {
    slots: [Option<PaginatorButton>; 6],
}

impl Default for ButtonSet {
    fn default() -> Self {
        Self {
            slots: [
                Some(PaginatorButton::emoji_only("⏮️")),
                Some(PaginatorButton::emoji_only("◀️")),
                Some(PaginatorButton::emoji_only("▶️")),
                Some(PaginatorButton::emoji_only("⏭️")),
                Some(PaginatorButton::emoji_only("⏹️")),
                None,
            ],
        }
    }
}

impl ButtonSet {
    /// Starts from the default set and replaces the entries named in `overrides`.
    /// A `None` value removes that button.
    pub fn with_overrides<I, K>(overrides: I) -> Result<Self, ViewError>
    where
        I: IntoIterator<Item = (K, Option<PaginatorButton>)>,
        K: AsRef<str>,
    {
        let mut set = Self::default();
        for (key, button) in overrides {
            let role = ButtonRole::from_key(key.as_ref())?;
            set.set(role, button);
        }
        Ok(set)
    }

    pub fn get(&self, role: ButtonRole) -> Option<&PaginatorButton> {
        self.slots[role.slot()].as_ref()
    }

    pub fn set(&mut self, role: ButtonRole, button: Option<PaginatorButton>) {
        self.slots[role.slot()] = button;
    }
}
