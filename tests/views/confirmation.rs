use std::time::Duration;

use assert_matches::assert_matches;
use metro::views::{
    Confirmation, Page,
    confirmation::{CANCEL_ID, CONFIRM_ID, NOT_FOR_YOU},
};
use poise::serenity_prelude::UserId;
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::{Call, Press, ScriptedTransport};

const AUTHOR: UserId = UserId::new(7);
const STRANGER: UserId = UserId::new(8);

#[test_case(CONFIRM_ID, true ; "confirmed")]
#[test_case(CANCEL_ID, false ; "cancelled")]
#[tokio::test(start_paused = true)]
async fn test_answer_deletes_prompt(custom_id: &str, expected: bool) {
    let transport = ScriptedTransport::new([Press::new(custom_id, AUTHOR)]);

    let answer = Confirmation::new("Wipe everything?", AUTHOR)
        .ask(&transport)
        .await
        .unwrap();

    assert_eq!(answer, Some(expected));
    let calls = transport.calls();
    assert_matches!(&calls[0], Call::Send(render) if render.page == Page::Text("Wipe everything?".into()));
    assert_eq!(calls[1..], [Call::Acknowledge, Call::Delete]);
}

#[tokio::test(start_paused = true)]
async fn test_answer_kept_when_not_deleting() {
    let transport = ScriptedTransport::new([Press::new(CONFIRM_ID, AUTHOR)]);

    let answer = Confirmation::new("Sure?", AUTHOR)
        .delete_after(false)
        .ask(&transport)
        .await
        .unwrap();

    assert_eq!(answer, Some(true));
    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_matches!(&calls[1], Call::Update(render) if render.controls.iter().all(|c| c.disabled));
}

#[test]
fn test_only_author_can_answer() {
    let transport = ScriptedTransport::new([
        Press::new(CONFIRM_ID, STRANGER),
        Press::new(CANCEL_ID, AUTHOR),
    ]);

    let answer = tokio_test::block_on(Confirmation::new("Sure?", AUTHOR).ask(&transport)).unwrap();

    assert_eq!(answer, Some(false));
    assert_eq!(transport.calls()[1], Call::Deny(NOT_FOR_YOU.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_disables_prompt() {
    let transport = ScriptedTransport::new([Press::new("paginator:right", AUTHOR)]);

    let answer = Confirmation::new("Sure?", AUTHOR)
        .timeout(Duration::from_secs(30))
        .ask(&transport)
        .await
        .unwrap();

    assert_eq!(answer, None);
    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_matches!(&calls[1], Call::Edit(render) if render.controls.iter().all(|c| c.disabled));
    assert_eq!(transport.waits(), vec![Duration::from_secs(30); 2]);
}
