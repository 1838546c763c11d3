//! Typed command dispatch integration tests
//! Run with: cargo test --test command_dispatch_test

mod common;

use common::{Harness, RecordingBot, GROUP, MEMBER};

#[tokio::test]
async fn time_command_searches_by_country() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(GROUP, ".time kenya").await;

    let reply = h.bot.last();
    assert!(reply.text.starts_with("🔍 *Time Results for \"kenya\"*"));
    assert!(reply.text.contains("🇰🇪 *Kenya* (GMT+3)"));
    assert!(reply.quoted.is_some());
}

#[tokio::test]
async fn aliases_and_case_resolve_to_the_same_command() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(GROUP, ".CLOCK all").await;
    h.text(GROUP, ".timezone Atlantis").await;

    let texts = h.bot.texts();
    assert!(texts[0].starts_with("🕒 *World Time - All Countries*"));
    assert!(texts[1].starts_with("❌ No country found matching \"atlantis\""));
}

#[tokio::test]
async fn gmt_and_local_time_reply() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(MEMBER, ".utc").await;
    h.text(MEMBER, ".now").await;

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|(chat, _)| chat == MEMBER));
    assert!(sent[0].1.text.starts_with("🌐 *GMT/UTC Time*"));
    assert!(sent[1].1.text.starts_with("📱 *Your Local Time*"));
}

#[tokio::test]
async fn plain_text_triggers_nothing() {
    let h = Harness::new(RecordingBot::new(false));
    h.text(GROUP, "time").await;
    h.text(GROUP, "").await;
    assert!(h.bot.sent().is_empty());
}
