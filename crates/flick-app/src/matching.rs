use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::profiles::UserProfile;

/// Decides whether a liked profile likes back.
///
/// The session consults the policy once per right swipe, so a policy may
/// keep mutable state (an RNG, a quota, a script) between calls.
pub trait MatchPolicy {
    fn decide_match(&mut self, profile: &UserProfile) -> bool;
}

impl<F> MatchPolicy for F
where
    F: FnMut(&UserProfile) -> bool,
{
    fn decide_match(&mut self, profile: &UserProfile) -> bool {
        self(profile)
    }
}

/// A policy shared between the shell and the sessions it rebuilds.
pub type SharedPolicy = Rc<RefCell<Box<dyn MatchPolicy>>>;

pub fn share_policy(policy: impl MatchPolicy + 'static) -> SharedPolicy {
    Rc::new(RefCell::new(Box::new(policy) as Box<dyn MatchPolicy>))
}

/// Likes back with a fixed probability. Stand-in for a real backend.
pub struct ChancePolicy {
    chance: f32,
    rng: StdRng,
}

impl ChancePolicy {
    pub fn new(chance: f32) -> Self {
        Self {
            chance,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests and scripted runs.
    pub fn with_seed(chance: f32, seed: u64) -> Self {
        Self {
            chance,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MatchPolicy for ChancePolicy {
    fn decide_match(&mut self, _profile: &UserProfile) -> bool {
        self.rng.gen::<f32>() < self.chance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_profile() -> UserProfile {
        UserProfile::new("1", "Emma", 24)
    }

    #[test]
    fn chance_extremes_always_and_never_match() {
        let profile = any_profile();
        let mut always = ChancePolicy::with_seed(1.0, 7);
        let mut never = ChancePolicy::with_seed(0.0, 7);
        for _ in 0..32 {
            assert!(always.decide_match(&profile));
            assert!(!never.decide_match(&profile));
        }
    }

    #[test]
    fn same_seed_replays_the_same_decisions() {
        let profile = any_profile();
        let mut first = ChancePolicy::with_seed(0.5, 42);
        let mut second = ChancePolicy::with_seed(0.5, 42);
        let a: Vec<bool> = (0..16).map(|_| first.decide_match(&profile)).collect();
        let b: Vec<bool> = (0..16).map(|_| second.decide_match(&profile)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn closures_are_policies() {
        let mut calls = 0u32;
        let mut policy = |profile: &UserProfile| {
            calls += 1;
            profile.verified
        };
        assert!(!policy.decide_match(&any_profile()));
        assert!(policy.decide_match(&any_profile().verified()));
        assert_eq!(calls, 2);
    }
}
