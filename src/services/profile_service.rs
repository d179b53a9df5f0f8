use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::database::models::{Profile, UserSummary};
use crate::database::DocumentStore;
use crate::engine::gate::authorize_profile;
use crate::engine::sections::{self, SectionEntry, SectionKind};
use crate::engine::{CoreError, CoreResult, ProfileUpdate, Resource};

/// A profile together with its owner's display name and avatar
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: Option<UserSummary>,
}

fn section_resource(kind: SectionKind) -> Resource {
    match kind {
        SectionKind::Experience => Resource::Experience,
        SectionKind::Education => Resource::Education,
    }
}

pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn populate(&self, profile: Profile) -> CoreResult<ProfileView> {
        let user = self.store.load_user(profile.owner).await?;
        Ok(ProfileView {
            user: user.as_ref().map(UserSummary::from),
            profile,
        })
    }

    async fn own_profile(&self, caller: Uuid) -> CoreResult<Profile> {
        let profile = self
            .store
            .load_profile(caller)
            .await?
            .ok_or(CoreError::NotFound(Resource::Profile))?;
        authorize_profile(caller, &profile).into_result()?;
        Ok(profile)
    }

    /// Create the caller's profile or merge into the existing one
    pub async fn upsert_profile(&self, caller: Uuid, update: ProfileUpdate) -> CoreResult<Profile> {
        let profile = match self.store.load_profile(caller).await? {
            Some(mut existing) => {
                authorize_profile(caller, &existing).into_result()?;
                update.apply_to(&mut existing);
                existing
            }
            None => update.into_new_profile(caller),
        };

        self.store.save_profile(&profile).await?;
        info!("Saved profile {} for user {}", profile.id, caller);
        Ok(profile)
    }

    pub async fn my_profile(&self, caller: Uuid) -> CoreResult<ProfileView> {
        let profile = self.own_profile(caller).await?;
        self.populate(profile).await
    }

    pub async fn list_profiles(&self) -> CoreResult<Vec<ProfileView>> {
        let profiles = self.store.list_profiles().await?;
        try_join_all(profiles.into_iter().map(|p| self.populate(p))).await
    }

    pub async fn profile_by_owner(&self, owner: Uuid) -> CoreResult<ProfileView> {
        let profile = self
            .store
            .load_profile(owner)
            .await?
            .ok_or(CoreError::NotFound(Resource::Profile))?;
        self.populate(profile).await
    }

    /// Remove the caller's posts, profile and account, in that order
    pub async fn delete_account(&self, caller: Uuid) -> CoreResult<()> {
        let posts = self.store.delete_posts_by_owner(caller).await?;
        self.store.delete_profile(caller).await?;
        if !self.store.delete_user(caller).await? {
            return Err(CoreError::NotFound(Resource::User));
        }

        info!("Deleted account {} ({} posts)", caller, posts);
        Ok(())
    }

    pub async fn add_section(&self, caller: Uuid, entry: SectionEntry) -> CoreResult<Profile> {
        let profile = self.own_profile(caller).await?;
        let (kind, entry_id) = (entry.kind(), entry.id());
        let profile = sections::add_entry(profile, entry);

        self.store.save_profile(&profile).await?;
        info!("Added {:?} entry {} to profile {}", kind, entry_id, profile.id);
        Ok(profile)
    }

    pub async fn remove_section(&self, caller: Uuid, kind: SectionKind, entry_id: Uuid) -> CoreResult<Profile> {
        let profile = self.own_profile(caller).await?;
        let profile = sections::remove_entry(profile, kind, entry_id)
            .ok_or(CoreError::NotFound(section_resource(kind)))?;

        self.store.save_profile(&profile).await?;
        info!("Removed {:?} entry {} from profile {}", kind, entry_id, profile.id);
        Ok(profile)
    }
}
