use super::*;
use flick_runtime::Timeline;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn flow_with_events() -> (Timeline, AuthFlow, Rc<RefCell<Vec<AuthEvent>>>) {
    let timeline = Timeline::new();
    let flow = AuthFlow::new(timeline.handle());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    flow.set_on_event(move |event| sink.borrow_mut().push(event.clone()));
    (timeline, flow, events)
}

fn advance_millis(timeline: &Timeline, now: &mut u64, millis: u64) {
    let target = *now + millis * 1_000_000;
    while *now < target {
        *now += FRAME_NANOS;
        timeline.drain_frame_callbacks(*now);
    }
}

fn pick_interests(flow: &AuthFlow, count: usize) {
    for interest in AVAILABLE_INTERESTS.iter().take(count) {
        flow.toggle_interest(interest);
    }
}

#[test]
fn sign_in_succeeds_after_the_simulated_latency() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.set_email("alex@example.com");
    flow.set_password("hunter2");
    flow.submit();
    assert!(flow.is_submitting());

    advance_millis(&timeline, &mut now, 1000);
    assert!(events.borrow().is_empty(), "resolved before the latency");

    advance_millis(&timeline, &mut now, 700);
    assert!(!flow.is_submitting());
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    match &events[0] {
        AuthEvent::Success(account) => {
            assert_eq!(account.name, "Alex");
            assert_eq!(account.email.as_deref(), Some("alex@example.com"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn empty_sign_in_fails_with_missing_fields() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.submit();
    assert_eq!(flow.error(), None, "errors only surface after the latency");

    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(flow.error(), Some(AuthError::MissingFields));
    assert_eq!(
        events.borrow().as_slice(),
        [AuthEvent::Failed(AuthError::MissingFields)]
    );
}

#[test]
fn cancelling_a_submission_swallows_the_result() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.set_email("alex@example.com");
    flow.set_password("hunter2");
    flow.submit();
    advance_millis(&timeline, &mut now, 500);
    flow.cancel_submission();
    assert!(!flow.is_submitting());

    advance_millis(&timeline, &mut now, 3000);
    assert!(events.borrow().is_empty());
}

#[test]
fn phone_verify_signup_chain_ends_authenticated() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.use_phone();
    flow.set_phone("+1 555 0100");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(flow.mode(), AuthMode::Verify);
    assert!(events.borrow().is_empty());

    flow.set_code(VERIFICATION_CODE);
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(flow.mode(), AuthMode::Signup);
    assert!(events.borrow().is_empty());

    flow.set_name("Sam");
    flow.set_birth_date("1999-04-12");
    flow.set_gender("Non-binary");
    pick_interests(&flow, 3);
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    match &events[0] {
        AuthEvent::Success(account) => {
            assert_eq!(account.name, "Sam");
            assert_eq!(account.email, None);
            assert_eq!(account.birth_date.as_deref(), Some("1999-04-12"));
            assert_eq!(account.interests.len(), 3);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn wrong_code_is_rejected_and_stays_on_verify() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.use_phone();
    flow.set_phone("+1 555 0100");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);

    flow.set_code("654321");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);

    assert_eq!(flow.mode(), AuthMode::Verify);
    assert_eq!(flow.error(), Some(AuthError::WrongCode));
    assert_eq!(
        events.borrow().as_slice(),
        [AuthEvent::Failed(AuthError::WrongCode)]
    );
}

#[test]
fn signup_needs_three_interests() {
    let (timeline, flow, _events) = flow_with_events();
    let mut now = 0;

    flow.use_phone();
    flow.set_phone("+1 555 0100");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    flow.set_code(VERIFICATION_CODE);
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);

    flow.set_name("Sam");
    flow.set_birth_date("1999-04-12");
    flow.set_gender("Woman");
    pick_interests(&flow, 2);
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);

    assert_eq!(flow.error(), Some(AuthError::TooFewInterests));
    assert_eq!(flow.mode(), AuthMode::Signup);
}

#[test]
fn editing_a_field_clears_the_error() {
    let (timeline, flow, _events) = flow_with_events();
    let mut now = 0;

    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(flow.error(), Some(AuthError::MissingFields));

    flow.set_email("alex@example.com");
    assert_eq!(flow.error(), None);
}

#[test]
fn resend_returns_to_the_phone_screen() {
    let (timeline, flow, _events) = flow_with_events();
    let mut now = 0;

    flow.use_phone();
    flow.set_phone("+1 555 0100");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(flow.mode(), AuthMode::Verify);

    flow.resend_code();
    assert_eq!(flow.mode(), AuthMode::Phone);
}

#[test]
fn double_submit_resolves_once() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.set_email("alex@example.com");
    flow.set_password("hunter2");
    flow.submit();
    advance_millis(&timeline, &mut now, 500);
    flow.submit();

    advance_millis(&timeline, &mut now, 3000);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn toggling_an_interest_twice_removes_it() {
    let (_timeline, flow, _events) = flow_with_events();

    flow.toggle_interest("Coffee");
    flow.toggle_interest("Hiking");
    flow.toggle_interest("Coffee");
    assert_eq!(flow.interests(), ["Hiking"]);
}

#[test]
fn reset_blanks_the_flow_but_keeps_the_observer() {
    let (timeline, flow, events) = flow_with_events();
    let mut now = 0;

    flow.use_phone();
    flow.set_phone("+1 555 0100");
    flow.reset();
    assert_eq!(flow.mode(), AuthMode::SignIn);

    flow.set_email("alex@example.com");
    flow.set_password("hunter2");
    flow.submit();
    advance_millis(&timeline, &mut now, 1700);
    assert_eq!(events.borrow().len(), 1, "observer lost in the reset");
}
