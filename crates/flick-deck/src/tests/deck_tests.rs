use crate::card::Card;
use crate::deck::SwipeDeck;
use crate::observers::DeckObservers;
use flick_gesture::{ExitDirection, PointerEvent, SwipeConfig};
use flick_runtime::Timeline;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

#[derive(Clone, Debug, PartialEq)]
struct TestCard {
    id: String,
}

impl TestCard {
    fn new(id: &str) -> Self {
        Self { id: id.to_owned() }
    }
}

impl Card for TestCard {
    fn id(&self) -> &str {
        &self.id
    }
}

fn three_cards() -> Vec<TestCard> {
    vec![TestCard::new("a"), TestCard::new("b"), TestCard::new("c")]
}

fn advance_millis(timeline: &Timeline, now: &mut u64, millis: u64) {
    let target = *now + millis * 1_000_000;
    while *now < target {
        *now += FRAME_NANOS;
        timeline.drain_frame_callbacks(*now);
    }
}

fn recording_observers(
    rights: &Rc<RefCell<Vec<String>>>,
    lefts: &Rc<RefCell<Vec<String>>>,
    empties: &Rc<Cell<u32>>,
) -> DeckObservers<TestCard> {
    let rights = Rc::clone(rights);
    let lefts = Rc::clone(lefts);
    let empties = Rc::clone(empties);
    DeckObservers::new()
        .on_swipe_right(move |card: &TestCard| rights.borrow_mut().push(card.id.clone()))
        .on_swipe_left(move |card: &TestCard| lefts.borrow_mut().push(card.id.clone()))
        .on_stack_empty(move || empties.set(empties.get() + 1))
}

#[test]
fn long_drag_commits_right_and_advances_after_the_animation() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    deck.handle_pointer(PointerEvent::moved(150.0, 0.0, 300));
    deck.handle_pointer(PointerEvent::up(150.0, 0.0, 300));

    // The observer fires at commit time, before the deck advances.
    assert_eq!(*rights.borrow(), vec!["a"]);
    assert_eq!(deck.current_index(), 0);
    assert!(deck.is_animating());
    assert_eq!(deck.exit_direction(), Some(ExitDirection::Right));

    advance_millis(&timeline, &mut now, 350);

    assert!(!deck.is_animating());
    assert_eq!(deck.current_index(), 1);
    assert_eq!(deck.current_card().unwrap().id(), "b");
    assert!(lefts.borrow().is_empty());
    assert_eq!(empties.get(), 0);
}

#[test]
fn short_slow_release_springs_back() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    deck.handle_pointer(PointerEvent::moved(30.0, 0.0, 300));
    deck.handle_pointer(PointerEvent::up(30.0, 0.0, 300));

    assert!(!deck.is_animating());
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.drag_delta(), (0.0, 0.0));
    assert!(rights.borrow().is_empty());
    assert!(lefts.borrow().is_empty());

    advance_millis(&timeline, &mut now, 350);
    assert_eq!(deck.current_index(), 0);
}

#[test]
fn fast_flick_commits_on_velocity_alone() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    // 60 px in 40 ms: under the distance threshold, well over the
    // velocity threshold.
    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    deck.handle_pointer(PointerEvent::moved(-60.0, 0.0, 40));
    deck.handle_pointer(PointerEvent::up(-60.0, 0.0, 40));

    assert_eq!(*lefts.borrow(), vec!["a"]);
    assert_eq!(deck.exit_direction(), Some(ExitDirection::Left));

    advance_millis(&timeline, &mut now, 350);
    assert_eq!(deck.current_index(), 1);
    assert!(rights.borrow().is_empty());
}

#[test]
fn commits_while_animating_are_dropped() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    assert!(deck.is_animating());

    // Both a repeat commit and the opposite direction are ignored while
    // the first exit is in flight.
    deck.commit_exit(ExitDirection::Right);
    deck.commit_exit(ExitDirection::Left);

    assert_eq!(*rights.borrow(), vec!["a"]);
    assert!(lefts.borrow().is_empty());

    advance_millis(&timeline, &mut now, 350);

    assert_eq!(deck.current_index(), 1);
    assert_eq!(*rights.borrow(), vec!["a"]);
}

#[test]
fn pointer_down_during_exit_starts_no_gesture() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));

    assert!(!deck.is_dragging());

    deck.handle_pointer(PointerEvent::moved(200.0, 0.0, 100));
    deck.handle_pointer(PointerEvent::up(200.0, 0.0, 100));

    advance_millis(&timeline, &mut now, 350);

    // Only the programmatic commit advanced the deck.
    assert_eq!(deck.current_index(), 1);
    assert!(!deck.is_animating());
}

#[test]
fn programmatic_commit_mid_drag_abandons_the_gesture() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    deck.handle_pointer(PointerEvent::moved(150.0, 0.0, 100));
    deck.commit_exit(ExitDirection::Right);

    assert!(!deck.is_dragging());
    assert_eq!(deck.drag_delta(), (0.0, 0.0));

    // The release that would have committed the same card again.
    deck.handle_pointer(PointerEvent::up(150.0, 0.0, 120));

    advance_millis(&timeline, &mut now, 350);

    assert_eq!(*rights.borrow(), vec!["a"]);
    assert_eq!(deck.current_index(), 1);
}

#[test]
fn observer_runs_before_the_deck_advances() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let deck_for_observer = deck.clone();
    let checked = Rc::new(Cell::new(false));
    let checked_clone = Rc::clone(&checked);

    deck.set_observers(DeckObservers::new().on_swipe_right(move |card: &TestCard| {
        assert_eq!(card.id(), "a");
        assert_eq!(deck_for_observer.current_index(), 0);
        assert!(deck_for_observer.is_animating());
        checked_clone.set(true);
    }));

    deck.commit_exit(ExitDirection::Right);
    assert!(checked.get());
}

#[test]
fn stack_empty_fires_exactly_once() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), vec![TestCard::new("solo")]);
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Left);
    advance_millis(&timeline, &mut now, 350);

    assert!(deck.is_exhausted());
    assert_eq!(empties.get(), 1);

    // Spurious input and further frames must not refire the edge.
    deck.handle_pointer(PointerEvent::up(0.0, 0.0, 999));
    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 1_000));
    deck.commit_exit(ExitDirection::Left);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(empties.get(), 1);
    assert_eq!(*lefts.borrow(), vec!["solo"]);
}

#[test]
fn emptying_a_three_card_deck_notifies_once_at_the_end() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    for _ in 0..3 {
        deck.commit_exit(ExitDirection::Right);
        advance_millis(&timeline, &mut now, 350);
    }

    assert_eq!(*rights.borrow(), vec!["a", "b", "c"]);
    assert_eq!(empties.get(), 1);
    assert!(deck.is_exhausted());
    assert!(deck.current_card().is_none());
}

#[test]
fn appending_cards_rearms_the_empty_notification() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), vec![TestCard::new("a")]);
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);
    assert_eq!(empties.get(), 1);

    deck.append_cards(vec![TestCard::new("d")]);
    assert!(!deck.is_exhausted());
    assert_eq!(deck.current_card().unwrap().id(), "d");

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(empties.get(), 2);
    assert_eq!(*rights.borrow(), vec!["a", "d"]);
}

#[test]
fn appending_nothing_does_not_rearm() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), vec![TestCard::new("a")]);
    let empties = Rc::new(Cell::new(0));
    let empties_clone = Rc::clone(&empties);
    deck.set_observers(DeckObservers::new().on_stack_empty(move || {
        empties_clone.set(empties_clone.get() + 1);
    }));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);
    deck.append_cards(Vec::new());

    assert!(deck.is_exhausted());
    assert_eq!(empties.get(), 1);
}

#[test]
fn empty_handler_can_refill_the_deck() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), vec![TestCard::new("a")]);
    let deck_for_handler = deck.clone();
    let empties = Rc::new(Cell::new(0));
    let empties_clone = Rc::clone(&empties);
    deck.set_observers(DeckObservers::new().on_stack_empty(move || {
        empties_clone.set(empties_clone.get() + 1);
        if empties_clone.get() == 1 {
            deck_for_handler.append_cards(vec![TestCard::new("refill")]);
        }
    }));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(empties.get(), 1);
    assert!(!deck.is_exhausted());
    assert_eq!(deck.current_card().unwrap().id(), "refill");

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(empties.get(), 2);
    assert!(deck.is_exhausted());
}

#[test]
fn cancel_exit_keeps_the_current_card() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let rights = Rc::new(RefCell::new(Vec::new()));
    let lefts = Rc::new(RefCell::new(Vec::new()));
    let empties = Rc::new(Cell::new(0));
    deck.set_observers(recording_observers(&rights, &lefts, &empties));
    let mut now = 0;

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 100);
    assert!(deck.is_animating());
    assert!(deck.exit_progress().unwrap() > 0.0);

    deck.cancel_exit();

    assert!(!deck.is_animating());
    assert_eq!(deck.exit_progress(), None);
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.current_card().unwrap().id(), "a");

    // A stale frame callback must not advance the cancelled exit.
    advance_millis(&timeline, &mut now, 500);
    assert_eq!(deck.current_index(), 0);
    assert_eq!(empties.get(), 0);

    // The commit-time observer already fired and is not retracted; a new
    // commit fires it again for the same card.
    assert_eq!(*rights.borrow(), vec!["a"]);
    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);
    assert_eq!(*rights.borrow(), vec!["a", "a"]);
    assert_eq!(deck.current_index(), 1);
}

#[test]
fn cancel_without_exit_is_a_no_op() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());

    deck.cancel_exit();
    assert_eq!(deck.current_index(), 0);
    assert!(!deck.is_animating());
}

#[test]
fn exit_progress_follows_frame_time() {
    let timeline = Timeline::new();
    let config = SwipeConfig::new().with_exit_animation_millis(100);
    let deck = SwipeDeck::with_config(timeline.handle(), three_cards(), config);

    deck.commit_exit(ExitDirection::Right);

    timeline.drain_frame_callbacks(16_666_667);
    assert_eq!(deck.exit_progress(), Some(0.0));

    timeline.drain_frame_callbacks(66_666_667);
    let halfway = deck.exit_progress().unwrap();
    assert!((halfway - 0.5).abs() < 1e-3, "progress was {halfway}");

    timeline.drain_frame_callbacks(116_666_667);
    assert_eq!(deck.exit_progress(), None);
    assert_eq!(deck.current_index(), 1);
}

#[test]
fn live_drag_feeds_transform_and_opacity() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());

    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    deck.handle_pointer(PointerEvent::moved(100.0, -20.0, 50));

    assert_eq!(deck.drag_delta(), (100.0, -20.0));
    let transform = deck.card_transform(400.0);
    assert_eq!(transform.translate_x, 100.0);
    assert_eq!(transform.translate_y, -20.0);
    assert_eq!(transform.rotation_degrees, 7.5);
    assert_eq!(deck.card_opacity(400.0), 0.5);

    deck.handle_pointer(PointerEvent::moved(0.0, 0.0, 100));
    assert_eq!(deck.card_opacity(400.0), 1.0);

    deck.handle_pointer(PointerEvent::up(0.0, 0.0, 120));
    assert!(!deck.is_animating());
    assert_eq!(deck.current_index(), 0);
}

#[test]
fn deck_created_empty_is_exhausted_and_silent() {
    let timeline = Timeline::new();
    let deck: SwipeDeck<TestCard> = SwipeDeck::new(timeline.handle(), Vec::new());
    let empties = Rc::new(Cell::new(0));
    let empties_clone = Rc::clone(&empties);
    deck.set_observers(DeckObservers::new().on_stack_empty(move || {
        empties_clone.set(empties_clone.get() + 1);
    }));
    let mut now = 0;

    assert!(deck.is_exhausted());
    assert!(deck.current_card().is_none());

    deck.handle_pointer(PointerEvent::down(0.0, 0.0, 0));
    assert!(!deck.is_dragging());

    deck.commit_exit(ExitDirection::Right);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(deck.current_index(), 0);
    assert_eq!(empties.get(), 0);
}

#[test]
fn remaining_counts_down_as_cards_exit() {
    let timeline = Timeline::new();
    let deck = SwipeDeck::new(timeline.handle(), three_cards());
    let mut now = 0;

    assert_eq!(deck.remaining(), 3);
    assert_eq!(deck.next_card().unwrap().id(), "b");

    deck.commit_exit(ExitDirection::Left);
    advance_millis(&timeline, &mut now, 350);

    assert_eq!(deck.remaining(), 2);
    assert_eq!(deck.next_card().unwrap().id(), "c");
}
