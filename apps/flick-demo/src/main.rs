//! Headless scripted tour of the Flick app.
//!
//! Drives the whole shell without a window: signs up over the simulated
//! phone flow, replays synthetic pointer traces through the discovery deck,
//! resolves match modals and prints the resulting conversations.
//!
//! ```bash
//! cargo run --package flick-demo
//! ```

use anyhow::ensure;
use flick_app::{
    demo_history, format_relative, share_policy, AppShell, AppStage, AuthMode, Tab, UserProfile,
    GENDER_OPTIONS, VERIFICATION_CODE,
};
use flick_geometry::{Point, Rect};
use flick_gesture::PointerEvent;
use flick_runtime::{Clock, StdClock, Timeline};
use log::info;

const FRAME_NANOS: u64 = 16_666_667;
const VIEWPORT_WIDTH: f32 = 400.0;
const CARD_BOUNDS: Rect = Rect::new(0.0, 80.0, 400.0, 560.0);

/// Pretend the app has been installed for a few days so the seeded
/// conversation timestamps land in different relative-time buckets.
const DEMO_EPOCH_MS: u64 = 3 * 24 * 60 * 60 * 1000;

fn wall_ms(now_nanos: u64) -> u64 {
    DEMO_EPOCH_MS + now_nanos / 1_000_000
}

fn advance_millis(shell: &mut AppShell, now_nanos: &mut u64, millis: u64) {
    let target = *now_nanos + millis * 1_000_000;
    while *now_nanos < target {
        *now_nanos += FRAME_NANOS;
        shell.advance_frame(*now_nanos);
    }
}

fn remaining(shell: &AppShell) -> usize {
    shell.session().map_or(0, |s| s.remaining())
}

fn current_name(shell: &AppShell) -> String {
    shell
        .session()
        .and_then(|s| s.current_profile())
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "nobody".to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Flick: scripted swipe tour ===");
    println!();

    let clock = StdClock;
    let started = clock.now();

    let timeline = Timeline::new();
    // Deterministic stand-in for the stock 30% chance policy: verified
    // profiles always like back, unverified ones never do.
    let mut shell = AppShell::with_policy(
        timeline.handle(),
        share_policy(|profile: &UserProfile| profile.verified),
    );
    let mut now_nanos: u64 = 0;

    // ---------- Existing conversations ----------
    *shell.matches_mut() = demo_history(wall_ms(now_nanos));
    ensure!(
        shell.unread_badge().as_deref() == Some("1"),
        "seed history should leave one unread message"
    );
    println!("✓ Seeded {} conversations, badge {:?}", shell.matches().len(), shell.unread_badge());

    // ---------- Phone signup, wrong code first ----------
    println!();
    println!("--- Signup over the phone flow ---");
    shell.open_auth();
    ensure!(shell.stage() == AppStage::Auth, "welcome button should open auth");

    shell.auth().use_phone();
    shell.auth().set_phone("+1 555 0100");
    shell.auth().submit();
    advance_millis(&mut shell, &mut now_nanos, 1600);
    ensure!(shell.auth().mode() == AuthMode::Verify, "phone number should reach verify");
    println!("✓ Code sent");

    shell.auth().set_code("000000");
    shell.auth().submit();
    advance_millis(&mut shell, &mut now_nanos, 1600);
    match shell.auth().error() {
        Some(error) => println!("✓ Bad code rejected: {error}"),
        None => anyhow::bail!("a wrong code should surface an error"),
    }

    shell.auth().set_code(VERIFICATION_CODE);
    shell.auth().submit();
    advance_millis(&mut shell, &mut now_nanos, 1600);
    ensure!(shell.auth().mode() == AuthMode::Signup, "right code should reach signup");

    shell.auth().set_name("Sam");
    shell.auth().set_birth_date("1999-04-12");
    shell.auth().set_gender(GENDER_OPTIONS[2]);
    for interest in ["Travel", "Music", "Coffee"] {
        shell.auth().toggle_interest(interest);
    }
    shell.auth().submit();
    advance_millis(&mut shell, &mut now_nanos, 1600);
    ensure!(shell.stage() == AppStage::Home, "signup should land on the home feed");
    println!("✓ Signed up as Sam, {} profiles in the feed", remaining(&shell));

    // ---------- A committed right swipe ----------
    println!();
    println!("--- Swiping ---");
    shell.tap_card_photo(Point::new(350.0, 200.0), CARD_BOUNDS);
    shell.tap_card_photo(Point::new(350.0, 200.0), CARD_BOUNDS);
    ensure!(shell.card_photo_index() == 2, "two taps should reach Emma's third photo");
    println!("✓ Browsed to photo {} before deciding", shell.card_photo_index() + 1);

    let t0 = now_nanos / 1_000_000;
    shell.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
    shell.handle_pointer(PointerEvent::moved(280.0, 395.0, t0 + 80));
    if let Some(session) = shell.session() {
        let transform = session.deck().card_transform(VIEWPORT_WIDTH);
        let opacity = session.deck().card_opacity(VIEWPORT_WIDTH);
        println!(
            "  mid-drag: translate {:.0}px, rotate {:.1} deg, opacity {:.2}",
            transform.translate_x, transform.rotation_degrees, opacity
        );
    }
    shell.handle_pointer(PointerEvent::moved(360.0, 390.0, t0 + 160));
    shell.handle_pointer(PointerEvent::up(360.0, 390.0, t0 + 160));
    advance_millis(&mut shell, &mut now_nanos, 350);

    let modal = shell.match_modal();
    ensure!(
        modal.as_ref().map(|p| p.name.as_str()) == Some("Emma"),
        "Emma is verified and should have matched"
    );
    println!("✓ Swiped right on Emma, it's a match");

    shell.message_match(wall_ms(now_nanos));
    ensure!(shell.tab() == Tab::Messages, "messaging a match should open Messages");
    ensure!(
        shell.matches().len() == 2,
        "the existing Emma thread should be reused"
    );
    shell.send_message("1", "that ridge loop, this weekend?", wall_ms(now_nanos))?;
    println!("✓ Messaged Emma");

    // ---------- A timid drag springs back ----------
    shell.set_tab(Tab::Discover);
    let t1 = now_nanos / 1_000_000;
    shell.handle_pointer(PointerEvent::down(200.0, 400.0, t1));
    shell.handle_pointer(PointerEvent::moved(230.0, 400.0, t1 + 200));
    shell.handle_pointer(PointerEvent::up(230.0, 400.0, t1 + 200));
    advance_millis(&mut shell, &mut now_nanos, 350);
    ensure!(remaining(&shell) == 5, "a 30px drag should not commit");
    ensure!(current_name(&shell) == "Sofia", "Sofia should still be on top");
    println!("✓ Timid drag sprang back on {}", current_name(&shell));

    // ---------- A fast flick commits on velocity alone ----------
    let t2 = now_nanos / 1_000_000;
    shell.handle_pointer(PointerEvent::down(200.0, 400.0, t2));
    shell.handle_pointer(PointerEvent::moved(140.0, 400.0, t2 + 40));
    shell.handle_pointer(PointerEvent::up(140.0, 400.0, t2 + 40));
    advance_millis(&mut shell, &mut now_nanos, 350);
    ensure!(
        shell.session().is_some_and(|s| s.is_passed("2")),
        "a fast left flick should pass Sofia"
    );
    println!("✓ Fast flick passed on Sofia");

    // ---------- The action buttons finish the feed ----------
    shell.like(); // Maya, unverified: no modal
    advance_millis(&mut shell, &mut now_nanos, 350);
    ensure!(shell.match_modal().is_none(), "Maya is unverified, no match");

    shell.like(); // Zoe
    advance_millis(&mut shell, &mut now_nanos, 350);
    shell.keep_swiping(wall_ms(now_nanos));

    shell.super_like(); // Luna, unverified
    advance_millis(&mut shell, &mut now_nanos, 350);

    shell.like(); // Aria
    advance_millis(&mut shell, &mut now_nanos, 350);
    shell.keep_swiping(wall_ms(now_nanos));

    let session_done = shell.session().is_some_and(|s| s.is_exhausted());
    ensure!(session_done, "six decisions should exhaust the feed");
    ensure!(
        shell.session().is_some_and(|s| s.liked_count() == 5 && s.passed_count() == 1),
        "five likes and one pass expected"
    );
    println!("✓ Feed exhausted: 5 likes, 1 pass, {} matches", shell.matches().len());
    ensure!(shell.matches().len() == 4, "Emma, Sofia, Zoe and Aria");

    // ---------- Conversations ----------
    println!();
    println!("--- Conversations ---");
    shell.open_conversation("1");
    ensure!(shell.unread_badge().is_none(), "opening the thread clears the badge");
    let now = wall_ms(now_nanos);
    for entry in shell.matches().iter() {
        let (text, at) = entry.preview();
        println!("  {:<6} {:<12} {}", entry.profile.name, format_relative(now, at), text);
    }

    shell.logout();
    ensure!(shell.stage() == AppStage::Welcome, "logout should land on welcome");
    ensure!(shell.matches().len() == 4, "conversations survive the logout");
    info!("tour finished with {} conversations", shell.matches().len());

    println!();
    println!("✓ Tour complete in {} ms of wall time", clock.elapsed_millis(started));
    Ok(())
}
