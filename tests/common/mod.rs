//! Shared helpers for the integration tests.

use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use std::time::Duration;

use metro::views::{Render, Transport, ViewInteraction};
use poise::serenity_prelude as serenity;
use serenity::UserId;

static INIT: Once = Once::new();

/// Routes view logs to the test writer. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("metro=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A button press as the fake platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Press {
    pub custom_id: String,
    pub user: UserId,
}

impl Press {
    pub fn new(custom_id: impl Into<String>, user: UserId) -> Self {
        Self {
            custom_id: custom_id.into(),
            user,
        }
    }
}

impl ViewInteraction for Press {
    fn custom_id(&self) -> &str {
        &self.custom_id
    }

    fn user_id(&self) -> UserId {
        self.user
    }
}

/// Everything a view asked the platform to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send(Render),
    Update(Render),
    Edit(Render),
    Delete,
    Acknowledge,
    Deny(String),
}

/// A transport that replays scripted presses and records every call.
///
/// When the script runs out, or reaches a `None` entry, the wait reports a timeout.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Option<Press>>>,
    calls: Mutex<Vec<Call>>,
    waits: Mutex<Vec<Duration>>,
    pub fail_update: bool,
    pub fail_edit: bool,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Press>) -> Self {
        init_tracing();
        Self {
            script: Mutex::new(script.into_iter().map(Some).collect()),
            ..Default::default()
        }
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn failing_edits(mut self) -> Self {
        self.fail_edit = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    /// The content of the last render that reached the message by any route.
    pub fn last_render(&self) -> Option<Render> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Call::Send(render) | Call::Update(render) | Call::Edit(render) => Some(render),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[serenity::async_trait]
impl Transport for ScriptedTransport {
    type Handle = u64;
    type Interaction = Press;

    async fn send(&self, render: &Render) -> Result<u64, serenity::Error> {
        self.record(Call::Send(render.clone()));
        Ok(1)
    }

    async fn next_interaction(&self, _message: &u64, timeout: Duration) -> Option<Press> {
        self.waits.lock().unwrap().push(timeout);
        self.script.lock().unwrap().pop_front().flatten()
    }

    async fn update(&self, _interaction: &Press, render: &Render) -> Result<(), serenity::Error> {
        if self.fail_update {
            return Err(serenity::Error::Other("update refused"));
        }
        self.record(Call::Update(render.clone()));
        Ok(())
    }

    async fn edit(&self, _message: &u64, render: &Render) -> Result<(), serenity::Error> {
        if self.fail_edit {
            return Err(serenity::Error::Other("edit refused"));
        }
        self.record(Call::Edit(render.clone()));
        Ok(())
    }

    async fn delete(&self, _message: &u64) -> Result<(), serenity::Error> {
        self.record(Call::Delete);
        Ok(())
    }

    async fn acknowledge(&self, _interaction: &Press) -> Result<(), serenity::Error> {
        self.record(Call::Acknowledge);
        Ok(())
    }

    async fn deny(&self, _interaction: &Press, notice: &str) -> Result<(), serenity::Error> {
        self.record(Call::Deny(notice.to_string()));
        Ok(())
    }
}
