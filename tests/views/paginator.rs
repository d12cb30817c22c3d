use std::collections::HashSet;
use std::time::Duration;

use assert_matches::assert_matches;
use metro::views::{
    Access, ButtonRole, EmbedPage, ExitPolicy, ListPageSource, Page, Paginator, Render,
    SessionEnd, paginator::DENIED_NOTICE,
};
use poise::serenity_prelude::UserId;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use crate::common::{Call, Press, ScriptedTransport};

const AUTHOR: UserId = UserId::new(10);
const OWNER: UserId = UserId::new(20);
const STRANGER: UserId = UserId::new(30);

fn access() -> Access {
    Access::Invocation {
        author: AUTHOR,
        owners: HashSet::from([OWNER]),
    }
}

#[fixture]
fn numbers() -> Paginator<ListPageSource<usize>> {
    Paginator::new(ListPageSource::new((1..=23).collect(), 4), access())
}

fn press(role: ButtonRole, user: UserId) -> Press {
    Press::new(role.custom_id(), user)
}

fn text(render: &Render) -> &str {
    match &render.page {
        Page::Text(text) => text,
        Page::Embed(_) => panic!("expected a text page"),
    }
}

fn page_texts(calls: &[Call]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            Call::Send(render) | Call::Update(render) | Call::Edit(render) => {
                Some(text(render).to_string())
            }
            _ => None,
        })
        .collect()
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_walk_through_pages(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([
        press(ButtonRole::Next, AUTHOR),
        press(ButtonRole::Next, AUTHOR),
        press(ButtonRole::Last, AUTHOR),
        press(ButtonRole::Prev, OWNER),
        press(ButtonRole::First, AUTHOR),
    ]);

    let end = numbers.start(&transport).await.unwrap();
    assert_eq!(end, SessionEnd::TimedOut);

    assert_eq!(
        page_texts(&transport.calls()),
        vec![
            "1\n2\n3\n4\n\nPage 1/6",
            "5\n6\n7\n8\n\nPage 2/6",
            "9\n10\n11\n12\n\nPage 3/6",
            "21\n22\n23\n\nPage 6/6",
            "17\n18\n19\n20\n\nPage 5/6",
            "1\n2\n3\n4\n\nPage 1/6",
            "1\n2\n3\n4\n\nPage 1/6",
        ]
    );

    // The timeout closes with the default policy: every control disabled.
    let closing = transport.last_render().unwrap();
    assert_matches!(transport.calls().last(), Some(Call::Edit(_)));
    assert!(!closing.controls.is_empty());
    assert!(closing.controls.iter().all(|control| control.disabled));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_strangers_are_denied(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([press(ButtonRole::Next, STRANGER)]);

    numbers.start(&transport).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls[1], Call::Deny(DENIED_NOTICE.to_string()));
    assert!(!calls.iter().any(|call| matches!(call, Call::Update(_))));
    assert_eq!(text(&transport.last_render().unwrap()), "1\n2\n3\n4\n\nPage 1/6");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_stop_with_delete(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([
        press(ButtonRole::Next, AUTHOR),
        press(ButtonRole::Stop, AUTHOR),
        press(ButtonRole::Next, AUTHOR),
    ]);

    let end = numbers
        .exit_policy(ExitPolicy::Delete)
        .start(&transport)
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Stopped);
    let calls = transport.calls();
    assert_eq!(calls.len(), 4);
    assert_matches!(calls[1], Call::Update(_));
    assert_eq!(calls[2..], [Call::Acknowledge, Call::Delete]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_stop_with_clear_keeps_content(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([press(ButtonRole::Stop, AUTHOR)]);

    let end = numbers
        .exit_policy(ExitPolicy::Clear)
        .start(&transport)
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Stopped);
    let closing = transport.last_render().unwrap();
    assert!(closing.controls.is_empty());
    assert_eq!(text(&closing), "1\n2\n3\n4\n\nPage 1/6");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_update_failure_falls_back_to_edit(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([press(ButtonRole::Next, AUTHOR)]).failing_updates();

    let end = numbers.start(&transport).await.unwrap();

    assert_eq!(end, SessionEnd::TimedOut);
    let calls = transport.calls();
    assert_matches!(&calls[1], Call::Edit(render) if text(render) == "5\n6\n7\n8\n\nPage 2/6");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_double_failure_abandons(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([
        press(ButtonRole::Next, AUTHOR),
        press(ButtonRole::Next, AUTHOR),
    ])
    .failing_updates()
    .failing_edits();

    let end = numbers.start(&transport).await.unwrap();

    assert_eq!(end, SessionEnd::Abandoned);
    assert_eq!(transport.calls().len(), 1);
    assert_eq!(transport.waits().len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_foreign_controls_are_ignored(numbers: Paginator<ListPageSource<usize>>) {
    let transport = ScriptedTransport::new([Press::new("confirm:yes", AUTHOR)]);

    numbers.start(&transport).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_matches!(calls[1], Call::Edit(_));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_refreshed_on_each_press() {
    let transport = ScriptedTransport::new([
        press(ButtonRole::Next, AUTHOR),
        press(ButtonRole::Next, AUTHOR),
    ]);

    Paginator::new(ListPageSource::new((1..=23).collect::<Vec<usize>>(), 4), access())
        .timeout(Duration::from_secs(5))
        .start(&transport)
        .await
        .unwrap();

    assert_eq!(transport.waits(), vec![Duration::from_secs(5); 3]);
}

#[tokio::test(start_paused = true)]
async fn test_single_page_is_static() {
    let transport = ScriptedTransport::new([press(ButtonRole::Next, AUTHOR)]);

    let end = Paginator::new(ListPageSource::new(vec!["a", "b", "c"], 4), access())
        .start(&transport)
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Static);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_matches!(&calls[0], Call::Send(render) if render.controls.is_empty());
    assert_eq!(text(&transport.last_render().unwrap()), "a\nb\nc\n\nPage 1/1");
    assert!(transport.waits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_empty_source_sends_one_page() {
    let transport = ScriptedTransport::new([]);

    let end = Paginator::new(ListPageSource::<String>::new(Vec::new(), 10), access())
        .start(&transport)
        .await
        .unwrap();

    assert_eq!(end, SessionEnd::Static);
    assert_eq!(text(&transport.last_render().unwrap()), "Page 1/1");
}

#[tokio::test(start_paused = true)]
async fn test_embed_pages_carry_indicator_in_footer() {
    let pages: Vec<Page> = vec![
        EmbedPage::new().title("One").footer("2 notes.").into(),
        EmbedPage::new().title("Two").into(),
    ];
    let transport = ScriptedTransport::new([press(ButtonRole::Next, AUTHOR)]);

    Paginator::new(pages, Access::Bound(AUTHOR))
        .start(&transport)
        .await
        .unwrap();

    let footers: Vec<Option<String>> = transport
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::Send(render) | Call::Update(render) => match &render.page {
                Page::Embed(embed) => Some(embed.footer.clone()),
                Page::Text(_) => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(
        footers,
        vec![
            Some("2 notes. - Page 1/2".to_string()),
            Some("Page 2/2".to_string()),
        ]
    );
}
