//! Drives the session state machine and writes its effects through the gateway.

use super::{Effect, OnboardingDefaults, Session, View};
use crate::advice::{ask_mentor, AdviceService};
use crate::db::KeyValueStore;
use crate::errors::AppError;
use crate::models::{HobbyConfig, Location, Member, ProfilePatch};
use crate::persistence::PersistenceGateway;

pub struct SessionController<S> {
    session: Session,
    gateway: PersistenceGateway<S>,
}

impl<S: KeyValueStore> SessionController<S> {
    /// Create the session for this process, hydrating from storage when a member was persisted.
    pub async fn start(gateway: PersistenceGateway<S>, defaults: OnboardingDefaults) -> Self {
        let persisted = gateway.load_member().await;
        Self {
            session: Session::hydrate(defaults, persisted),
            gateway,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    pub async fn login(&mut self, location: Location) -> Result<(), AppError> {
        let effect = self.session.login(location)?;
        self.apply(effect).await;
        Ok(())
    }

    pub async fn complete_onboarding(
        &mut self,
        selections: Vec<HobbyConfig>,
    ) -> Result<&Member, AppError> {
        let stashed = self.gateway.load_stashed_location().await;
        let effect = self.session.complete_onboarding(selections, stashed)?;
        self.apply(effect).await;
        self.active_member()
    }

    pub async fn update_profile(&mut self, patch: &ProfilePatch) -> Result<&Member, AppError> {
        let effect = self.session.update_profile(patch)?;
        self.apply(effect).await;
        self.active_member()
    }

    pub fn navigate(&mut self, view: View) -> Result<(), AppError> {
        self.session.navigate(view)
    }

    pub fn select_feed_hobby(&mut self, hobby_id: &str) -> Result<(), AppError> {
        self.session.select_feed_hobby(hobby_id)
    }

    /// Mentor advice for the current feed hobby; the service is asked at most once.
    pub async fn mentor_advice<A: AdviceService + ?Sized>(
        &self,
        service: &A,
        prompt: &str,
    ) -> Result<String, AppError> {
        let request = self.session.mentor_request(prompt)?;
        Ok(ask_mentor(service, &request).await)
    }

    fn active_member(&self) -> Result<&Member, AppError> {
        self.session.member().ok_or(AppError::InvalidTransition {
            from: self.session.state().name(),
            event: "ReadMember",
        })
    }

    /// Persist one effect. Failures are contained by the gateway, the
    /// in-memory transition is never rolled back.
    async fn apply(&self, effect: Effect) {
        match effect {
            Effect::StashLocation(location) => self.gateway.stash_location(&location).await,
            Effect::SaveMember {
                member,
                discard_stash,
            } => {
                self.gateway.save_member(&member).await;
                if discard_stash {
                    self.gateway.clear_stashed_location().await;
                }
            }
        }
    }
}
