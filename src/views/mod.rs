//! Interactive message views: button-driven pagination and yes/no confirmation prompts.
//!
//! The state machines in this module are transport agnostic. They render into a [`Render`]
//! and talk to the platform through the [`Transport`] trait, which the bot implements on top
//! of a poise invocation and the tests implement with a scripted fake.

use thiserror::Error;

/// Navigation button roles, specs and the fixed role-to-button table.
pub mod button;
/// The yes/no confirmation prompt.
pub mod confirmation;
/// The paginator state machine and session driver.
pub mod paginator;
/// Page content and the rendered representation of a view.
pub mod render;
/// Lazily indexed page sources.
pub mod source;
/// The seam between view sessions and the chat platform.
pub mod transport;

pub use button::{ButtonRole, ButtonSet, PaginatorButton};
pub use confirmation::{Confirmation, ConfirmationState};
pub use paginator::{Access, ExitPolicy, Navigation, Paginator, PaginatorState, SessionEnd};
pub use render::{Control, EmbedPage, Page, Render};
pub use source::{ListPageSource, PageSource};
pub use transport::{InvocationTransport, Transport, ViewInteraction};

/// Errors raised while constructing a view. These are caller mistakes and are never coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A button was built without anything to display.
    #[error("A label or emoji must be provided.")]
    MissingLabel,

    /// A custom button map used a key that does not name a paginator button.
    #[error("Unknown button key '{0}', buttons keys must be in: `first, left, right, last, stop, page`")]
    UnknownButtonKey(String),
}
