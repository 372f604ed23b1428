use super::{ProfileId, UserProfile};
use crate::cache::EphemeralCache;
use crate::config::DirectoryConfig;
use crate::core::Result;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Profile handle owned by callers; the directory only observes it.
pub type SharedProfile = Rc<RefCell<UserProfile>>;

/// Lookup of live profiles by identity.
///
/// Profiles are keyed by their [`ProfileId`]. Registering a profile does not
/// extend its life: when the last [`SharedProfile`] held elsewhere is dropped,
/// the profile disappears from the directory.
#[derive(Debug)]
pub struct ProfileDirectory {
    cache: EphemeralCache<ProfileId, RefCell<UserProfile>>,
    config: DirectoryConfig,
    adds_since_sweep: usize,
}

impl ProfileDirectory {
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            cache: EphemeralCache::with_capacity(config.initial_capacity),
            config,
            adds_since_sweep: 0,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Registers a profile under its id and returns the id
    pub fn add_to_cache(&mut self, profile: &SharedProfile) -> Result<ProfileId> {
        let id = profile.borrow().id();
        self.cache.add(id, profile)?;
        debug!(profile_id = %id, "profile registered");

        self.adds_since_sweep += 1;
        if let Some(every) = self.config.auto_sweep_every {
            if self.adds_since_sweep >= every {
                self.sweep();
            }
        }

        Ok(id)
    }

    pub fn get_from_cache(&self, id: ProfileId) -> Result<Option<SharedProfile>> {
        Ok(self.cache.get(&id)?)
    }

    /// First live profile whose username matches.
    ///
    /// Profiles that are mutably borrowed at the time of the call are skipped.
    pub fn find_by_username(&self, username: &str) -> Option<SharedProfile> {
        self.cache.values().into_iter().find(|profile| {
            profile
                .try_borrow()
                .is_ok_and(|p| p.username() == Some(username))
        })
    }

    /// Drops the directory's entry for `id`; absent ids are ignored
    pub fn evict(&mut self, id: ProfileId) -> Result<Option<SharedProfile>> {
        let evicted = self.cache.remove(&id)?;
        if evicted.is_some() {
            debug!(profile_id = %id, "profile evicted");
        }
        Ok(evicted)
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.cache.contains_key(&id)
    }

    /// Number of live profiles
    pub fn live_count(&self) -> usize {
        self.cache.size()
    }

    pub fn ids(&self) -> Vec<ProfileId> {
        let mut ids = self.cache.keys();
        ids.sort();
        ids
    }

    /// Purges entries for profiles that have been dropped
    pub fn sweep(&mut self) -> usize {
        let purged = self.cache.sweep();
        self.adds_since_sweep = 0;
        trace!(purged, remaining = self.cache.tracked(), "directory swept");
        purged
    }

    pub(crate) fn tracked(&self) -> usize {
        self.cache.tracked()
    }
}

impl Default for ProfileDirectory {
    fn default() -> Self {
        Self::new()
    }
}
