use std::cell::RefCell;
use std::rc::Rc;

use flick_deck::{DeckObservers, SwipeDeck};
use flick_geometry::{Point, Rect};
use flick_gesture::{ExitDirection, PointerEvent};
use flick_runtime::TimelineHandle;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::matching::SharedPolicy;
use crate::pager::PhotoPager;
use crate::profiles::UserProfile;

#[derive(Default)]
struct SessionState {
    liked: FxHashSet<String>,
    passed: FxHashSet<String>,
    pending_match: Option<UserProfile>,
    // Pager for the top card's photos, keyed by the card it belongs to.
    card_pager: Option<(String, PhotoPager)>,
}

/// One discovery run: a deck of candidates wired to the like/pass record
/// and the match policy.
///
/// Every committed right swipe lands in `liked` and consults the policy
/// once; a hit parks the profile as the pending match until the modal is
/// resolved. Left swipes land in `passed`. Profiles already decided on are
/// filtered out before they ever reach the deck.
pub struct DiscoverSession {
    deck: SwipeDeck<UserProfile>,
    state: Rc<RefCell<SessionState>>,
}

impl DiscoverSession {
    pub fn new(timeline: TimelineHandle, profiles: Vec<UserProfile>, policy: SharedPolicy) -> Self {
        Self::with_history(
            timeline,
            profiles,
            policy,
            FxHashSet::default(),
            FxHashSet::default(),
        )
    }

    /// Starts a session that skips everything already liked or passed.
    pub fn with_history(
        timeline: TimelineHandle,
        profiles: Vec<UserProfile>,
        policy: SharedPolicy,
        liked: FxHashSet<String>,
        passed: FxHashSet<String>,
    ) -> Self {
        let fresh: Vec<UserProfile> = profiles
            .into_iter()
            .filter(|profile| !liked.contains(&profile.id) && !passed.contains(&profile.id))
            .collect();
        debug!("discovery feed holds {} profiles", fresh.len());

        let state = Rc::new(RefCell::new(SessionState {
            liked,
            passed,
            pending_match: None,
            card_pager: None,
        }));
        let deck = SwipeDeck::new(timeline, fresh);

        let right_state = Rc::clone(&state);
        let left_state = Rc::clone(&state);
        deck.set_observers(
            DeckObservers::new()
                .on_swipe_right(move |profile: &UserProfile| {
                    let mut state = right_state.borrow_mut();
                    state.liked.insert(profile.id.clone());
                    if policy.borrow_mut().decide_match(profile) {
                        info!("{} likes you back", profile.name);
                        state.pending_match = Some(profile.clone());
                    }
                })
                .on_swipe_left(move |profile: &UserProfile| {
                    left_state.borrow_mut().passed.insert(profile.id.clone());
                })
                .on_stack_empty(|| info!("discovery feed exhausted")),
        );

        Self { deck, state }
    }

    pub fn handle_pointer(&self, event: PointerEvent) {
        self.deck.handle_pointer(event);
    }

    /// The pass button. Same exit the deck uses for a committed left swipe.
    pub fn pass(&self) {
        self.deck.commit_exit(ExitDirection::Left);
    }

    /// The like button.
    pub fn like(&self) {
        self.deck.commit_exit(ExitDirection::Right);
    }

    /// A super like is just a like to the deck; the policy never sees the
    /// difference.
    pub fn super_like(&self) {
        self.like();
    }

    pub fn current_profile(&self) -> Option<Rc<UserProfile>> {
        self.deck.current_card()
    }

    /// Pages through the top card's photos. The pager belongs to the card,
    /// so a new card always opens on its first photo. Discovery photos
    /// clamp at the ends.
    pub fn photo_tap(&self, point: Point, bounds: Rect) {
        let Some(card) = self.deck.current_card() else {
            return;
        };
        let mut state = self.state.borrow_mut();
        let stale = !matches!(&state.card_pager, Some((id, _)) if *id == card.id);
        if stale {
            state.card_pager = Some((card.id.clone(), PhotoPager::clamped(card.photos.len())));
        }
        if let Some((_, pager)) = &mut state.card_pager {
            pager.tap(point, bounds);
        }
    }

    /// Which of the top card's photos is showing.
    pub fn photo_index(&self) -> usize {
        let Some(card) = self.deck.current_card() else {
            return 0;
        };
        match &self.state.borrow().card_pager {
            Some((id, pager)) if *id == card.id => pager.index(),
            _ => 0,
        }
    }

    /// Peeks at the profile waiting behind the match modal.
    pub fn pending_match(&self) -> Option<UserProfile> {
        self.state.borrow().pending_match.clone()
    }

    /// Takes the pending match, closing the modal.
    pub fn take_pending_match(&self) -> Option<UserProfile> {
        self.state.borrow_mut().pending_match.take()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.state.borrow().liked.contains(id)
    }

    pub fn is_passed(&self, id: &str) -> bool {
        self.state.borrow().passed.contains(id)
    }

    pub fn liked_count(&self) -> usize {
        self.state.borrow().liked.len()
    }

    pub fn passed_count(&self) -> usize {
        self.state.borrow().passed.len()
    }

    pub fn remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.deck.is_exhausted()
    }

    /// Deck access for live drag transforms and animation state.
    pub fn deck(&self) -> &SwipeDeck<UserProfile> {
        &self.deck
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
