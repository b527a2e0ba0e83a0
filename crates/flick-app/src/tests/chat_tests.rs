use super::*;
use crate::profiles::UserProfile;

const HOUR: u64 = 60 * 60 * 1000;

fn emma() -> UserProfile {
    UserProfile::new("1", "Emma", 24)
}

#[test]
fn sending_appends_and_moves_the_preview() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);

    store.send_message("1", "hey there", 2_000).unwrap();
    store.send_message("1", "how was the hike?", 3_000).unwrap();

    let entry = store.get("1").unwrap();
    assert_eq!(entry.messages.len(), 2);
    assert!(entry.messages.iter().all(|m| m.from_me && m.read));
    assert_eq!(entry.preview(), ("how was the hike?", 3_000));
}

#[test]
fn blank_messages_are_rejected() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);

    assert_eq!(store.send_message("1", "   ", 2_000), Err(SendError::EmptyMessage));
    assert!(store.get("1").unwrap().messages.is_empty());
}

#[test]
fn messaging_a_stranger_is_an_error() {
    let mut store = MatchStore::new();
    assert_eq!(store.send_message("9", "hi", 0), Err(SendError::UnknownMatch));
    assert_eq!(store.receive_message("9", "hi", 0), Err(SendError::UnknownMatch));
}

#[test]
fn sent_text_is_trimmed() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);
    store.send_message("1", "  hi  ", 2_000).unwrap();
    assert_eq!(store.get("1").unwrap().preview().0, "hi");
}

#[test]
fn incoming_messages_stay_unread_until_opened() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);

    store.receive_message("1", "hi!", 2_000).unwrap();
    store.receive_message("1", "you there?", 3_000).unwrap();
    assert_eq!(store.unread_total(), 2);

    store.mark_read("1");
    assert_eq!(store.unread_total(), 0);
    assert!(store.get("1").unwrap().messages.iter().all(|m| m.read));
}

#[test]
fn preview_before_any_message_points_at_the_match() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);
    assert_eq!(store.get("1").unwrap().preview(), (NEW_MATCH_PREVIEW, 1_000));
}

#[test]
fn duplicate_matches_keep_the_first_conversation() {
    let mut store = MatchStore::new();
    assert!(store.add_match(emma(), 1_000));
    store.send_message("1", "hey", 2_000).unwrap();

    assert!(!store.add_match(emma(), 9_000));
    let entry = store.get("1").unwrap();
    assert_eq!(entry.matched_at_ms, 1_000);
    assert_eq!(entry.messages.len(), 1);
}

#[test]
fn matches_iterate_in_match_order() {
    let mut store = MatchStore::new();
    store.add_match(UserProfile::new("4", "Zoe", 28), 1_000);
    store.add_match(UserProfile::new("2", "Sofia", 26), 2_000);
    store.add_match(emma(), 3_000);

    let names: Vec<&str> = store.iter().map(|e| e.profile.name.as_str()).collect();
    assert_eq!(names, ["Zoe", "Sofia", "Emma"]);
}

#[test]
fn unread_totals_sum_across_conversations() {
    let mut store = MatchStore::new();
    store.add_match(emma(), 1_000);
    store.add_match(UserProfile::new("2", "Sofia", 26), 1_000);
    store.receive_message("1", "hi", 2_000).unwrap();
    store.receive_message("2", "hello", 2_000).unwrap();
    store.receive_message("2", "!!", 3_000).unwrap();

    assert_eq!(store.unread_total(), 3);
}

#[test]
fn relative_time_buckets() {
    let now = 10 * 24 * HOUR;
    assert_eq!(format_relative(now, now - 59 * 60 * 1000), "Just now");
    assert_eq!(format_relative(now, now - 3 * HOUR), "3h ago");
    assert_eq!(format_relative(now, now - 30 * HOUR), "Yesterday");
    assert_eq!(format_relative(now, now - 72 * HOUR), "3 days ago");
}

#[test]
fn timestamps_from_the_future_read_just_now() {
    assert_eq!(format_relative(1_000, 2_000), "Just now");
}

#[test]
fn demo_history_has_one_unread_thread() {
    let now = 10 * 24 * HOUR;
    let store = demo_history(now);

    assert_eq!(store.len(), 2);
    assert_eq!(store.unread_total(), 1);

    let (text, at) = store.get("1").unwrap().preview();
    assert_eq!(text, "thanks! that was the ridge loop last weekend");
    assert_eq!(format_relative(now, at), "Just now");

    assert_eq!(store.get("2").unwrap().preview().0, NEW_MATCH_PREVIEW);
    assert_eq!(
        format_relative(now, store.get("2").unwrap().matched_at_ms),
        "Yesterday"
    );
}
