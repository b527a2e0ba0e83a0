use crate::card::Card;
use crate::exit::ExitAnimation;
use crate::observers::DeckObservers;
use flick_gesture::classifier::{self, ExitTransform};
use flick_gesture::{
    ExitDirection, PointerEvent, PointerEventKind, SwipeConfig, SwipeTracker, TouchPoint,
};
use flick_runtime::{FrameClock, TimelineHandle};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct DeckInner<C: Card> {
    cards: Vec<Rc<C>>,
    /// Position of the top card. Only ever moves forward, one committed
    /// exit at a time.
    current_index: usize,
    /// The in-flight exit, if any. Its presence is what blocks new commits
    /// and new gesture starts.
    exit: Option<ExitAnimation>,
    /// Bumped on every commit and cancel; frame callbacks popped before a
    /// cancel check this before driving the exit they were scheduled for.
    exit_epoch: u64,
    /// Set once the empty notification has fired for the current exhaustion.
    empty_notified: bool,
    drag_dx: f32,
    drag_dy: f32,
    tracker: SwipeTracker,
    config: SwipeConfig,
    observers: DeckObservers<C>,
}

impl<C: Card> DeckInner<C> {
    fn is_exhausted(&self) -> bool {
        self.current_index >= self.cards.len()
    }
}

/// Controller for a finite stack of swipeable cards.
///
/// Raw pointer events go through [`handle_pointer`](Self::handle_pointer);
/// a release either commits the top card through an exit animation or lets
/// it spring back. At most one exit is in flight at a time: commits and
/// gesture starts arriving while a card is exiting are dropped, and the
/// matching swipe observer fires exactly once per committed card, before
/// the deck advances.
pub struct SwipeDeck<C: Card> {
    inner: Rc<RefCell<DeckInner<C>>>,
    frame_clock: FrameClock,
}

impl<C: Card + 'static> SwipeDeck<C> {
    pub fn new(timeline: TimelineHandle, cards: impl IntoIterator<Item = C>) -> Self {
        Self::with_config(timeline, cards, SwipeConfig::default())
    }

    pub fn with_config(
        timeline: TimelineHandle,
        cards: impl IntoIterator<Item = C>,
        config: SwipeConfig,
    ) -> Self {
        let inner = DeckInner {
            cards: cards.into_iter().map(Rc::new).collect(),
            current_index: 0,
            exit: None,
            exit_epoch: 0,
            empty_notified: false,
            drag_dx: 0.0,
            drag_dy: 0.0,
            tracker: SwipeTracker::with_threshold(config.swipe_distance_threshold),
            config,
            observers: DeckObservers::default(),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            frame_clock: FrameClock::new(timeline),
        }
    }

    pub fn set_observers(&self, observers: DeckObservers<C>) {
        self.inner.borrow_mut().observers = observers;
    }

    /// Feeds one pointer event into the deck. Down starts a drag on the top
    /// card, Move updates it, Up releases it. The release is classified
    /// from the last Move; the Up payload itself is not inspected.
    pub fn handle_pointer(&self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.point),
            PointerEventKind::Move => self.pointer_move(event.point),
            PointerEventKind::Up => self.pointer_up(),
        }
    }

    fn pointer_down(&self, point: TouchPoint) {
        let mut inner = self.inner.borrow_mut();
        if inner.exit.is_some() {
            debug!("pointer down ignored, exit in flight");
            return;
        }
        if inner.is_exhausted() {
            debug!("pointer down ignored, deck exhausted");
            return;
        }
        inner.drag_dx = 0.0;
        inner.drag_dy = 0.0;
        inner.tracker.begin(point);
    }

    fn pointer_move(&self, point: TouchPoint) {
        let mut inner = self.inner.borrow_mut();
        inner.tracker.update(point);
        inner.drag_dx = inner.tracker.delta_x();
        inner.drag_dy = inner.tracker.delta_y();
    }

    fn pointer_up(&self) {
        let (result, delta_x, blocked, config) = {
            let mut inner = self.inner.borrow_mut();
            let delta_x = inner.tracker.delta_x();
            let result = inner.tracker.finish();
            inner.drag_dx = 0.0;
            inner.drag_dy = 0.0;
            let blocked = inner.exit.is_some() || inner.is_exhausted();
            (result, delta_x, blocked, inner.config)
        };

        let Some(result) = result else {
            return;
        };
        if blocked {
            debug!("gesture end dropped, commit already in flight");
            return;
        }

        if classifier::should_commit(
            delta_x,
            result.velocity,
            config.commit_distance_threshold,
            config.commit_velocity_threshold,
        ) {
            self.commit_exit(classifier::commit_direction(delta_x));
        } else {
            debug!("release below commit thresholds, card springs back");
        }
    }

    /// Commits the top card through `direction`. The matching swipe
    /// observer fires immediately and exactly once; the deck advances only
    /// when the exit animation completes. Dropped silently while another
    /// exit is in flight or once the deck is exhausted, so discrete action
    /// buttons can call this without their own guards.
    pub fn commit_exit(&self, direction: ExitDirection) {
        let (card, callback, epoch) = {
            let mut inner = self.inner.borrow_mut();
            if inner.exit.is_some() {
                debug!("commit dropped, exit already in flight");
                return;
            }
            let Some(card) = inner.cards.get(inner.current_index).cloned() else {
                debug!("commit dropped, deck exhausted");
                return;
            };

            inner.exit_epoch += 1;
            let epoch = inner.exit_epoch;
            inner.exit = Some(ExitAnimation::new(
                direction,
                inner.config.exit_animation_millis,
            ));
            // A commit mid-drag abandons the gesture; the card is already
            // spoken for.
            inner.tracker.reset();
            inner.drag_dx = 0.0;
            inner.drag_dy = 0.0;

            let callback = match direction {
                ExitDirection::Left => inner.observers.on_swipe_left.clone(),
                ExitDirection::Right => inner.observers.on_swipe_right.clone(),
            };
            (card, callback, epoch)
        };

        info!("card {} exiting {:?}", card.id(), direction);
        if let Some(callback) = callback {
            callback(&card);
        }

        schedule_exit_frame(Rc::downgrade(&self.inner), self.frame_clock.clone(), epoch);
    }

    /// Cancels an in-flight exit. The deck stays on the current card and
    /// accepts input again; the swipe observer that already fired at commit
    /// time is not retracted.
    pub fn cancel_exit(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(exit) = inner.exit.take() {
            inner.exit_epoch += 1;
            info!("exit cancelled at progress {:.2}", exit.progress());
        }
    }

    /// Adds cards to the bottom of the stack. Appending past an exhausted
    /// deck re-arms the empty notification for the next exhaustion.
    pub fn append_cards(&self, cards: impl IntoIterator<Item = C>) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.cards.len();
        inner.cards.extend(cards.into_iter().map(Rc::new));
        if inner.cards.len() > before {
            inner.empty_notified = false;
        }
    }

    pub fn current_card(&self) -> Option<Rc<C>> {
        let inner = self.inner.borrow();
        inner.cards.get(inner.current_index).cloned()
    }

    /// The card under the top one, for under-stack previews only.
    pub fn next_card(&self) -> Option<Rc<C>> {
        let inner = self.inner.borrow();
        inner.cards.get(inner.current_index + 1).cloned()
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().current_index
    }

    pub fn remaining(&self) -> usize {
        let inner = self.inner.borrow();
        inner.cards.len().saturating_sub(inner.current_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.borrow().is_exhausted()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().exit.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().tracker.is_tracking()
    }

    pub fn exit_direction(&self) -> Option<ExitDirection> {
        self.inner.borrow().exit.as_ref().map(|exit| exit.direction())
    }

    pub fn exit_progress(&self) -> Option<f32> {
        self.inner.borrow().exit.as_ref().map(|exit| exit.progress())
    }

    /// Live drag offset of the top card, zero when nothing is dragging.
    pub fn drag_delta(&self) -> (f32, f32) {
        let inner = self.inner.borrow();
        (inner.drag_dx, inner.drag_dy)
    }

    /// Transform the render layer should apply to the top card for the
    /// current drag offset.
    pub fn card_transform(&self, viewport_width: f32) -> ExitTransform {
        let inner = self.inner.borrow();
        classifier::exit_transform(
            inner.drag_dx,
            inner.drag_dy,
            viewport_width,
            inner.config.max_rotation_degrees,
        )
    }

    /// Opacity the render layer should apply to the top card for the
    /// current drag offset.
    pub fn card_opacity(&self, viewport_width: f32) -> f32 {
        classifier::live_opacity(self.inner.borrow().drag_dx, viewport_width)
    }
}

impl<C: Card> Clone for SwipeDeck<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            frame_clock: self.frame_clock.clone(),
        }
    }
}

/// Drives the in-flight exit one frame forward, re-arming itself until the
/// animation completes. Stale callbacks (the exit they were scheduled for
/// was cancelled or replaced) check the epoch and bow out.
fn schedule_exit_frame<C: Card + 'static>(
    deck: Weak<RefCell<DeckInner<C>>>,
    frame_clock: FrameClock,
    epoch: u64,
) {
    let deck_for_closure = deck.clone();
    let clock_for_closure = frame_clock.clone();

    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        let Some(inner_rc) = deck_for_closure.upgrade() else {
            return;
        };

        let completed = {
            let inner = inner_rc.borrow();
            if inner.exit_epoch != epoch {
                return;
            }
            let Some(exit) = inner.exit.as_ref() else {
                return;
            };
            exit.drive(frame_time_nanos)
        };

        if completed {
            finish_exit(&inner_rc);
        } else {
            schedule_exit_frame(deck_for_closure.clone(), clock_for_closure.clone(), epoch);
        }
    });

    // Keep the callback alive inside the exit it belongs to.
    if let Some(inner_rc) = deck.upgrade() {
        let mut inner = inner_rc.borrow_mut();
        if inner.exit_epoch == epoch {
            if let Some(exit) = inner.exit.as_mut() {
                exit.set_registration(registration);
            }
        }
    }
}

/// Clears the completed exit, advances the deck, and fires the empty
/// notification when this exit consumed the last card.
fn finish_exit<C: Card + 'static>(inner_rc: &Rc<RefCell<DeckInner<C>>>) {
    let (exited_id, on_stack_empty) = {
        let mut inner = inner_rc.borrow_mut();
        if inner.exit.take().is_none() {
            return;
        }

        let exited_id = inner
            .cards
            .get(inner.current_index)
            .map(|card| card.id().to_owned());
        inner.current_index += 1;

        let on_stack_empty = if inner.is_exhausted() && !inner.empty_notified {
            inner.empty_notified = true;
            inner.observers.on_stack_empty.clone()
        } else {
            None
        };
        (exited_id, on_stack_empty)
    };

    if let Some(id) = exited_id {
        debug!("card {id} left the deck");
    }
    if let Some(on_stack_empty) = on_stack_empty {
        info!("deck exhausted");
        on_stack_empty();
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
