use std::cell::RefCell;
use std::rc::Rc;

use flick_geometry::{Point, Rect};
use flick_gesture::PointerEvent;
use flick_runtime::TimelineHandle;
use log::{debug, info, trace};

use crate::auth::{Account, AuthError, AuthEvent, AuthFlow, MIN_INTERESTS};
use crate::chat::{MatchStore, SendError};
use crate::matching::{share_policy, ChancePolicy, SharedPolicy};
use crate::pager::PhotoPager;
use crate::profiles::{mock_profiles, own_profile, OwnProfile, UserProfile};
use crate::session::DiscoverSession;

/// Share of right swipes the stock policy answers with a match.
const MATCH_CHANCE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStage {
    Welcome,
    Auth,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Discover,
    Matches,
    Messages,
    Profile,
}

/// Label for a tab badge. Nothing at zero, capped past nine.
pub fn badge_text(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

/// The whole app, headless: welcome gate, auth flow, discovery session,
/// chat store and profile editor behind one driving surface.
///
/// Hosts own the [`Timeline`](flick_runtime::Timeline) and call
/// [`advance_frame`](AppShell::advance_frame) once per frame; everything
/// else is discrete input.
pub struct AppShell {
    timeline: TimelineHandle,
    auth: AuthFlow,
    auth_events: Rc<RefCell<Vec<AuthEvent>>>,
    policy: SharedPolicy,
    session: Option<DiscoverSession>,
    matches: MatchStore,
    own_profile: OwnProfile,
    profile_pager: PhotoPager,
    account: Option<Account>,
    stage: AppStage,
    tab: Tab,
}

impl AppShell {
    pub fn new(timeline: TimelineHandle) -> Self {
        Self::with_policy(timeline, share_policy(ChancePolicy::new(MATCH_CHANCE)))
    }

    /// Builds the shell around an injected match policy. The policy is kept
    /// for every session this shell creates, including after a logout.
    pub fn with_policy(timeline: TimelineHandle, policy: SharedPolicy) -> Self {
        let auth = AuthFlow::new(timeline.clone());
        let auth_events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&auth_events);
        auth.set_on_event(move |event| sink.borrow_mut().push(event.clone()));
        let own_profile = own_profile();
        let profile_pager = PhotoPager::wrapping(own_profile.photos.len());
        Self {
            timeline,
            auth,
            auth_events,
            policy,
            session: None,
            matches: MatchStore::new(),
            own_profile,
            profile_pager,
            account: None,
            stage: AppStage::Welcome,
            tab: Tab::Discover,
        }
    }

    /// Drives one frame: runs due timers and exit animations, then applies
    /// whatever the auth flow resolved to.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.timeline.drain_frame_callbacks(frame_time_nanos);
        self.apply_auth_events();
    }

    fn apply_auth_events(&mut self) {
        let events: Vec<AuthEvent> = self.auth_events.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                AuthEvent::Success(account) => self.finish_sign_in(account),
                AuthEvent::Failed(error) => debug!("sign-in attempt failed: {error}"),
            }
        }
    }

    fn finish_sign_in(&mut self, account: Account) {
        if self.stage != AppStage::Auth {
            debug!("auth success outside the auth stage is ignored");
            return;
        }
        self.own_profile.name = account.name.clone();
        if !account.interests.is_empty() {
            self.own_profile.interests = account.interests.clone();
        }
        let session = DiscoverSession::new(
            self.timeline.clone(),
            mock_profiles(),
            Rc::clone(&self.policy),
        );
        debug!("home feed ready with {} profiles", session.remaining());
        self.session = Some(session);
        self.account = Some(account);
        self.stage = AppStage::Home;
        self.tab = Tab::Discover;
    }

    pub fn stage(&self) -> AppStage {
        self.stage
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switches bottom-nav tabs. Only meaningful once signed in.
    pub fn set_tab(&mut self, tab: Tab) {
        if self.stage != AppStage::Home {
            trace!("tab change outside the home stage is ignored");
            return;
        }
        self.tab = tab;
    }

    /// "Get started" on the welcome screen.
    pub fn open_auth(&mut self) {
        if self.stage != AppStage::Welcome {
            debug!("auth can only open from the welcome screen");
            return;
        }
        self.stage = AppStage::Auth;
    }

    pub fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn session(&self) -> Option<&DiscoverSession> {
        self.session.as_ref()
    }

    /// Routes a pointer event to the discovery deck. Events land nowhere
    /// unless the Discover tab is showing.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.stage != AppStage::Home || self.tab != Tab::Discover {
            trace!("pointer outside the discover tab is ignored");
            return;
        }
        if let Some(session) = &self.session {
            session.handle_pointer(event);
        }
    }

    /// Pages the top card's photos from a tap on the Discover tab.
    pub fn tap_card_photo(&mut self, point: Point, bounds: Rect) {
        if self.stage != AppStage::Home || self.tab != Tab::Discover {
            trace!("photo tap outside the discover tab is ignored");
            return;
        }
        if let Some(session) = &self.session {
            session.photo_tap(point, bounds);
        }
    }

    pub fn card_photo_index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.photo_index())
    }

    pub fn pass(&mut self) {
        if let Some(session) = &self.session {
            session.pass();
        }
    }

    pub fn like(&mut self) {
        if let Some(session) = &self.session {
            session.like();
        }
    }

    pub fn super_like(&mut self) {
        if let Some(session) = &self.session {
            session.super_like();
        }
    }

    /// The profile behind the "it's a match" modal, if one is waiting.
    pub fn match_modal(&self) -> Option<UserProfile> {
        self.session.as_ref().and_then(|s| s.pending_match())
    }

    /// "Send a message" on the match modal: records the match and jumps to
    /// the conversation list.
    pub fn message_match(&mut self, now_ms: u64) {
        if let Some(profile) = self.take_pending_match() {
            self.matches.add_match(profile, now_ms);
            self.tab = Tab::Messages;
        }
    }

    /// "Keep swiping" on the match modal: records the match and stays put.
    pub fn keep_swiping(&mut self, now_ms: u64) {
        if let Some(profile) = self.take_pending_match() {
            self.matches.add_match(profile, now_ms);
        }
    }

    fn take_pending_match(&mut self) -> Option<UserProfile> {
        self.session.as_ref().and_then(|s| s.take_pending_match())
    }

    pub fn matches(&self) -> &MatchStore {
        &self.matches
    }

    pub fn matches_mut(&mut self) -> &mut MatchStore {
        &mut self.matches
    }

    pub fn send_message(&mut self, to: &str, text: &str, now_ms: u64) -> Result<(), SendError> {
        self.matches.send_message(to, text, now_ms)
    }

    /// Opens one conversation: clears its unread state and shows Messages.
    pub fn open_conversation(&mut self, id: &str) {
        if self.stage != AppStage::Home {
            return;
        }
        self.matches.mark_read(id);
        self.tab = Tab::Messages;
    }

    /// Badge over the Messages tab, capped at "9+".
    pub fn unread_badge(&self) -> Option<String> {
        badge_text(self.matches.unread_total())
    }

    pub fn own_profile(&self) -> &OwnProfile {
        &self.own_profile
    }

    /// Pages through the signed-in user's own photos. Unlike discovery
    /// cards this pager wraps past either end.
    pub fn tap_profile_photo(&mut self, point: Point, bounds: Rect) {
        if self.stage != AppStage::Home || self.tab != Tab::Profile {
            trace!("photo tap outside the profile tab is ignored");
            return;
        }
        self.profile_pager.tap(point, bounds);
    }

    pub fn profile_photo_index(&self) -> usize {
        self.profile_pager.index()
    }

    /// Renames the profile. Blank names are rejected, same as signup.
    pub fn rename_profile(&mut self, name: &str) -> Result<(), AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingFields);
        }
        self.own_profile.name = name.to_string();
        Ok(())
    }

    pub fn set_profile_bio(&mut self, bio: &str) {
        self.own_profile.bio = bio.trim().to_string();
    }

    /// Adds or removes a profile interest. Removal stops at the signup
    /// minimum so the profile never drops below it.
    pub fn toggle_profile_interest(&mut self, interest: &str) -> Result<(), AuthError> {
        let interests = &mut self.own_profile.interests;
        if let Some(position) = interests.iter().position(|i| i == interest) {
            if interests.len() <= MIN_INTERESTS {
                return Err(AuthError::TooFewInterests);
            }
            interests.remove(position);
        } else {
            interests.push(interest.to_string());
        }
        Ok(())
    }

    /// Drops the session and account and returns to the welcome screen.
    /// Conversations stay; the next sign-in starts a fresh feed.
    pub fn logout(&mut self) {
        info!("signed out");
        self.account = None;
        self.session = None;
        self.auth.reset();
        self.profile_pager = PhotoPager::wrapping(self.own_profile.photos.len());
        self.stage = AppStage::Welcome;
        self.tab = Tab::Discover;
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
