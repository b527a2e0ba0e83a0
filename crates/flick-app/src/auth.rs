use std::cell::RefCell;
use std::rc::Rc;

use flick_runtime::{Delay, TimelineHandle};
use log::{debug, info};

/// Simulated round trip applied to every auth submission.
pub const AUTH_LATENCY_MILLIS: u64 = 1500;

/// The one code the verify step accepts.
pub const VERIFICATION_CODE: &str = "123456";

/// How many interests a signup has to pick.
pub const MIN_INTERESTS: usize = 3;

pub const AVAILABLE_INTERESTS: [&str; 18] = [
    "Travel",
    "Photography",
    "Music",
    "Movies",
    "Sports",
    "Fitness",
    "Cooking",
    "Art",
    "Reading",
    "Dancing",
    "Gaming",
    "Hiking",
    "Yoga",
    "Coffee",
    "Wine",
    "Dogs",
    "Cats",
    "Fashion",
];

pub const GENDER_OPTIONS: [&str; 3] = ["Woman", "Man", "Non-binary"];

/// Which auth screen is showing. Phone, Verify and Signup chain into each
/// other; SignIn completes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Phone,
    Verify,
    Signup,
}

/// What a successful submission hands back. Email sign-ins carry the email,
/// phone signups carry the profile fields collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub name: String,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingFields,
    MissingPhone,
    WrongCode,
    TooFewInterests,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingFields => write!(f, "fill in every required field"),
            AuthError::MissingPhone => write!(f, "enter a phone number first"),
            AuthError::WrongCode => write!(f, "that code does not match, try {VERIFICATION_CODE}"),
            AuthError::TooFewInterests => {
                write!(f, "pick at least {MIN_INTERESTS} interests")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Terminal outcome of a submission. Step advances (phone accepted, code
/// accepted) change [`AuthFlow::mode`] without emitting an event.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    Success(Account),
    Failed(AuthError),
}

struct AuthInner {
    mode: AuthMode,
    email: String,
    password: String,
    phone: String,
    code: String,
    name: String,
    birth_date: String,
    gender: Option<String>,
    interests: Vec<String>,
    error: Option<AuthError>,
    submitting: bool,
    on_event: Option<Rc<dyn Fn(&AuthEvent)>>,
}

impl Default for AuthInner {
    fn default() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            phone: String::new(),
            code: String::new(),
            name: String::new(),
            birth_date: String::new(),
            gender: None,
            interests: Vec::new(),
            error: None,
            submitting: false,
            on_event: None,
        }
    }
}

/// Simulated sign-in flow. Every submit waits out [`AUTH_LATENCY_MILLIS`]
/// of frame time before validating, exactly like a round trip would, so
/// the latency is cancellable and testable.
///
/// Validation is string checks only. There is no real account anywhere.
pub struct AuthFlow {
    inner: Rc<RefCell<AuthInner>>,
    delay: Delay,
}

impl AuthFlow {
    pub fn new(timeline: TimelineHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AuthInner::default())),
            delay: Delay::new(timeline),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.inner.borrow().mode
    }

    pub fn error(&self) -> Option<AuthError> {
        self.inner.borrow().error
    }

    /// True between a submit and its resolution.
    pub fn is_submitting(&self) -> bool {
        self.inner.borrow().submitting
    }

    pub fn interests(&self) -> Vec<String> {
        self.inner.borrow().interests.clone()
    }

    pub fn set_on_event(&self, callback: impl Fn(&AuthEvent) + 'static) {
        self.inner.borrow_mut().on_event = Some(Rc::new(callback));
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.email = email.into();
        state.error = None;
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.password = password.into();
        state.error = None;
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.phone = phone.into();
        state.error = None;
    }

    pub fn set_code(&self, code: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.code = code.into();
        state.error = None;
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.name = name.into();
        state.error = None;
    }

    pub fn set_birth_date(&self, birth_date: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.birth_date = birth_date.into();
        state.error = None;
    }

    pub fn set_gender(&self, gender: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.gender = Some(gender.into());
        state.error = None;
    }

    /// Adds the interest, or removes it if already picked.
    pub fn toggle_interest(&self, interest: &str) {
        let mut state = self.inner.borrow_mut();
        if let Some(position) = state.interests.iter().position(|i| i == interest) {
            state.interests.remove(position);
        } else {
            state.interests.push(interest.to_string());
        }
        state.error = None;
    }

    /// "Continue with phone" link on the sign-in screen.
    pub fn use_phone(&self) {
        self.switch_mode(AuthMode::Phone);
    }

    /// "Back to email" link on the phone screen.
    pub fn use_email(&self) {
        self.switch_mode(AuthMode::SignIn);
    }

    /// "Resend code" goes back to the phone screen for a fresh number.
    pub fn resend_code(&self) {
        self.switch_mode(AuthMode::Phone);
    }

    fn switch_mode(&self, mode: AuthMode) {
        let mut state = self.inner.borrow_mut();
        state.mode = mode;
        state.error = None;
    }

    /// Submits the current screen. The outcome lands after the simulated
    /// latency: either the mode advances, or an [`AuthEvent`] fires.
    pub fn submit(&self) {
        {
            let mut state = self.inner.borrow_mut();
            if state.submitting {
                debug!("submission already in flight");
                return;
            }
            state.submitting = true;
            state.error = None;
        }
        let weak = Rc::downgrade(&self.inner);
        self.delay.start(AUTH_LATENCY_MILLIS, move || {
            if let Some(inner) = weak.upgrade() {
                resolve_submission(&inner);
            }
        });
    }

    /// Abandons an in-flight submission. Nothing fires.
    pub fn cancel_submission(&self) {
        self.delay.cancel();
        self.inner.borrow_mut().submitting = false;
    }

    /// Back to a blank sign-in screen. The observer survives.
    pub fn reset(&self) {
        self.delay.cancel();
        let mut state = self.inner.borrow_mut();
        let on_event = state.on_event.take();
        *state = AuthInner::default();
        state.on_event = on_event;
    }
}

/// Validates the screen that was submitted. Runs once the latency elapses,
/// with the observer invoked after the state borrow is released.
fn resolve_submission(inner: &Rc<RefCell<AuthInner>>) {
    let (event, observer) = {
        let mut state = inner.borrow_mut();
        state.submitting = false;
        let event = match state.mode {
            AuthMode::SignIn => {
                if state.email.is_empty() || state.password.is_empty() {
                    Some(AuthEvent::Failed(AuthError::MissingFields))
                } else {
                    Some(AuthEvent::Success(Account {
                        name: "Alex".to_string(),
                        email: Some(state.email.clone()),
                        birth_date: None,
                        gender: None,
                        interests: Vec::new(),
                    }))
                }
            }
            AuthMode::Phone => {
                if state.phone.is_empty() {
                    Some(AuthEvent::Failed(AuthError::MissingPhone))
                } else {
                    state.mode = AuthMode::Verify;
                    debug!("code sent, waiting on verification");
                    None
                }
            }
            AuthMode::Verify => {
                if state.code != VERIFICATION_CODE {
                    Some(AuthEvent::Failed(AuthError::WrongCode))
                } else {
                    state.mode = AuthMode::Signup;
                    debug!("code accepted, collecting the profile");
                    None
                }
            }
            AuthMode::Signup => {
                if state.name.is_empty() || state.birth_date.is_empty() || state.gender.is_none() {
                    Some(AuthEvent::Failed(AuthError::MissingFields))
                } else if state.interests.len() < MIN_INTERESTS {
                    Some(AuthEvent::Failed(AuthError::TooFewInterests))
                } else {
                    Some(AuthEvent::Success(Account {
                        name: state.name.clone(),
                        email: None,
                        birth_date: Some(state.birth_date.clone()),
                        gender: state.gender.clone(),
                        interests: state.interests.clone(),
                    }))
                }
            }
        };
        if let Some(AuthEvent::Failed(error)) = &event {
            state.error = Some(*error);
        }
        (event, state.on_event.clone())
    };

    let Some(event) = event else { return };
    match &event {
        AuthEvent::Success(account) => info!("authenticated as {}", account.name),
        AuthEvent::Failed(error) => debug!("auth attempt failed: {error}"),
    }
    if let Some(observer) = observer {
        observer(&event);
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
