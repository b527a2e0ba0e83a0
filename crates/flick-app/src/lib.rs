//! Headless application state for the Flick demo.
//!
//! This is the collaborator layer around the swipe deck: mock profiles, the
//! injected match policy, the simulated sign-in flow, the in-memory chat
//! store, and the shell that strings them together. No rendering, no real
//! network, no persistence.

mod auth;
mod chat;
mod matching;
mod pager;
mod profiles;
mod session;
mod shell;

pub use auth::{
    Account, AuthError, AuthEvent, AuthFlow, AuthMode, AUTH_LATENCY_MILLIS, AVAILABLE_INTERESTS,
    GENDER_OPTIONS, MIN_INTERESTS, VERIFICATION_CODE,
};
pub use chat::{demo_history, format_relative, ChatMessage, MatchEntry, MatchStore, SendError};
pub use matching::{share_policy, ChancePolicy, MatchPolicy, SharedPolicy};
pub use pager::PhotoPager;
pub use profiles::{mock_profiles, own_profile, OwnProfile, UserProfile};
pub use session::DiscoverSession;
pub use shell::{badge_text, AppShell, AppStage, Tab};
