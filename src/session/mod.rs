//! Session state machine.
//!
//! A session is either unauthenticated, in onboarding with a pending location,
//! or active with a member record. Transitions are synchronous and pure: each
//! successful event mutates the in-memory state and hands back the single
//! [`Effect`] the caller must persist. Rejected events leave the state as it was.

mod controller;

pub use controller::SessionController;

use serde::{Deserialize, Serialize};

use crate::advice::AdviceRequest;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    validate_hobby_selections, HobbyConfig, Location, Member, ProfilePatch, SkillLevel,
};

/// Screen selected by the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum View {
    Auth,
    Onboarding,
    Feed,
    Group,
    Profile,
    Search,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Auth => "AUTH",
            View::Onboarding => "ONBOARDING",
            View::Feed => "FEED",
            View::Group => "GROUP",
            View::Profile => "PROFILE",
            View::Search => "SEARCH",
        }
    }

    /// Views that can only be shown for an active member.
    pub fn requires_member(&self) -> bool {
        !matches!(self, View::Auth | View::Onboarding)
    }
}

/// Values a new member is assembled from at the end of onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingDefaults {
    pub base_identity: Member,
    /// Used when the stashed login location cannot be read back
    pub default_location: Location,
}

impl OnboardingDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_identity: Member::template(),
            default_location: config.default_location.clone(),
        }
    }
}

impl Default for OnboardingDefaults {
    fn default() -> Self {
        Self {
            base_identity: Member::template(),
            default_location: Location::fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub member: Member,
    pub view: View,
    /// Hobby the feed is currently scoped to
    pub feed_hobby: Option<String>,
}

impl ActiveSession {
    fn new(member: Member) -> Self {
        let feed_hobby = member.hobbies.first().map(|h| h.hobby_id.clone());
        Self {
            member,
            view: View::Feed,
            feed_hobby,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    OnboardingInProgress { pending_location: Location },
    Active(ActiveSession),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "Unauthenticated",
            SessionState::OnboardingInProgress { .. } => "OnboardingInProgress",
            SessionState::Active(_) => "Active",
        }
    }
}

/// Persistence write requested by a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StashLocation(Location),
    SaveMember { member: Member, discard_stash: bool },
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    defaults: OnboardingDefaults,
}

impl Session {
    pub fn new(defaults: OnboardingDefaults) -> Self {
        Self {
            state: SessionState::Unauthenticated,
            defaults,
        }
    }

    /// Start from a previously persisted member, skipping onboarding.
    ///
    /// A record without hobbies never completed onboarding and is ignored.
    pub fn hydrate(defaults: OnboardingDefaults, persisted: Option<Member>) -> Self {
        let mut session = Self::new(defaults);

        match persisted {
            Some(member) if member.hobbies.is_empty() => {
                tracing::warn!(member_id = %member.id, "Ignoring persisted member without hobbies");
            }
            Some(member) => {
                tracing::info!(member_id = %member.id, "Session hydrated from persisted member");
                session.state = SessionState::Active(ActiveSession::new(member));
            }
            None => tracing::debug!("No persisted member, starting unauthenticated"),
        }

        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn defaults(&self) -> &OnboardingDefaults {
        &self.defaults
    }

    pub fn view(&self) -> View {
        match &self.state {
            SessionState::Unauthenticated => View::Auth,
            SessionState::OnboardingInProgress { .. } => View::Onboarding,
            SessionState::Active(active) => active.view,
        }
    }

    pub fn member(&self) -> Option<&Member> {
        match &self.state {
            SessionState::Active(active) => Some(&active.member),
            _ => None,
        }
    }

    pub fn feed_hobby(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(active) => active.feed_hobby.as_deref(),
            _ => None,
        }
    }

    fn active_mut(&mut self, event: &'static str) -> Result<&mut ActiveSession, AppError> {
        let from = self.state.name();
        match &mut self.state {
            SessionState::Active(active) => Ok(active),
            _ => Err(rejected(from, event)),
        }
    }

    pub fn login(&mut self, location: Location) -> Result<Effect, AppError> {
        if !matches!(self.state, SessionState::Unauthenticated) {
            return Err(rejected(self.state.name(), "Login"));
        }

        tracing::info!(state = %location.state, city = %location.city, "Login, entering onboarding");
        self.state = SessionState::OnboardingInProgress {
            pending_location: location.clone(),
        };

        Ok(Effect::StashLocation(location))
    }

    /// Finish onboarding with the chosen hobbies.
    ///
    /// `stashed` is the location read back from storage; when it is missing the
    /// configured default location is used instead.
    pub fn complete_onboarding(
        &mut self,
        selections: Vec<HobbyConfig>,
        stashed: Option<Location>,
    ) -> Result<Effect, AppError> {
        if !matches!(self.state, SessionState::OnboardingInProgress { .. }) {
            return Err(rejected(self.state.name(), "CompleteOnboarding"));
        }
        validate_hobby_selections(&selections)?;

        let location = stashed.unwrap_or_else(|| {
            tracing::warn!("Stashed location missing, using default location");
            self.defaults.default_location.clone()
        });

        let member = Member {
            hobbies: selections,
            state: Some(location.state),
            city: Some(location.city),
            ..self.defaults.base_identity.clone()
        };

        tracing::info!(
            member_id = %member.id,
            hobbies = member.hobbies.len(),
            "Onboarding completed"
        );
        self.state = SessionState::Active(ActiveSession::new(member.clone()));

        Ok(Effect::SaveMember {
            member,
            discard_stash: true,
        })
    }

    pub fn update_profile(&mut self, patch: &ProfilePatch) -> Result<Effect, AppError> {
        let active = self.active_mut("UpdateProfile")?;

        active.member = patch.apply(&active.member);
        tracing::info!(member_id = %active.member.id, "Profile updated");

        Ok(Effect::SaveMember {
            member: active.member.clone(),
            discard_stash: false,
        })
    }

    pub fn navigate(&mut self, view: View) -> Result<(), AppError> {
        if !view.requires_member() {
            return Err(rejected(self.state.name(), "Navigate"));
        }

        let active = self.active_mut("Navigate")?;
        tracing::debug!(from = active.view.as_str(), to = view.as_str(), "Navigate");
        active.view = view;
        Ok(())
    }

    /// Scope the feed to one of the member's hobbies.
    pub fn select_feed_hobby(&mut self, hobby_id: &str) -> Result<(), AppError> {
        let active = self.active_mut("SelectFeedHobby")?;

        if !active.member.has_hobby(hobby_id) {
            return Err(AppError::InvalidArgument(format!(
                "Member has no hobby {}",
                hobby_id
            )));
        }
        active.feed_hobby = Some(hobby_id.to_string());
        Ok(())
    }

    /// Advice request for the hobby the feed is scoped to, at the member's level for it.
    pub fn mentor_request(&self, prompt: &str) -> Result<AdviceRequest, AppError> {
        let active = match &self.state {
            SessionState::Active(active) => active,
            other => return Err(rejected(other.name(), "MentorRequest")),
        };

        let topic = active.feed_hobby.as_deref().ok_or_else(|| {
            AppError::InvalidArgument("No feed hobby selected".to_string())
        })?;
        let level = active
            .member
            .hobbies
            .iter()
            .find(|h| h.hobby_id == topic)
            .map(|h| h.level)
            .unwrap_or(SkillLevel::Beginner);

        Ok(AdviceRequest::new(topic, level, prompt))
    }
}

fn rejected(from: &'static str, event: &'static str) -> AppError {
    tracing::warn!(state = from, event, "Rejected session event");
    AppError::InvalidTransition { from, event }
}
