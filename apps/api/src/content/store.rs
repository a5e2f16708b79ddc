//! Content store — the single owner of all portfolio entity collections.
//!
//! Each collection is an ordered `Vec` (vec order IS the display order)
//! plus a monotonic id counter. Every entity gets its id from that counter
//! at insertion; callers address updates and deletes by id only. Mutations
//! are synchronous and total: a miss is reported as `NotFound`, never
//! raised. The one exception is `reorder`, which rejects anything that is
//! not an exact permutation of the current id set.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::content::snapshot::SnapshotDocument;
use crate::errors::AppError;
use crate::models::content::{
    Certification, Education, Entity, Experience, Profile, Project, Skill,
};

/// Outcome of an id-addressed mutation. `NotFound` is absorbed as a no-op
/// by the interactive path; programmatic callers can still observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
}

impl MutationOutcome {
    pub fn applied(self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// An ordered, id-addressed entity collection.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    next_id: i64,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a collection from seed data, normalizing ids the same way an
    /// import does.
    pub fn seeded(items: Vec<T>) -> Self {
        let mut collection = Self::new();
        collection.replace(items);
        collection
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn claim_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends `item` with a freshly assigned id. Any caller-supplied id is
    /// ignored — the counter is the only id authority.
    pub fn add(&mut self, mut item: T) -> i64 {
        let id = self.claim_id();
        item.set_id(id);
        self.items.push(item);
        id
    }

    /// Prepends `item` with a freshly assigned id. Used by certifications,
    /// which display most-recent-first.
    pub fn add_front(&mut self, mut item: T) -> i64 {
        let id = self.claim_id();
        item.set_id(id);
        self.items.insert(0, item);
        id
    }

    /// Replaces the entity matching `id` in place, preserving its id and
    /// position. A miss leaves the collection untouched.
    pub fn update(&mut self, id: i64, mut item: T) -> MutationOutcome {
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                item.set_id(id);
                *slot = item;
                MutationOutcome::Applied
            }
            None => MutationOutcome::NotFound,
        }
    }

    /// Removes the entity matching `id`. Idempotent on absence.
    pub fn remove(&mut self, id: i64) -> MutationOutcome {
        let before = self.items.len();
        self.items.retain(|existing| existing.id() != id);
        if self.items.len() < before {
            MutationOutcome::Applied
        } else {
            MutationOutcome::NotFound
        }
    }

    /// Applies a caller-supplied display order. `ids` must be an exact
    /// permutation of the current id set; any added, missing, or duplicated
    /// id fails validation and leaves the collection untouched.
    pub fn reorder(&mut self, ids: &[i64]) -> Result<(), AppError> {
        if ids.len() != self.items.len() {
            return Err(AppError::Validation(format!(
                "reorder expects {} ids, got {}",
                self.items.len(),
                ids.len()
            )));
        }

        let current: HashSet<i64> = self.items.iter().map(Entity::id).collect();
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                return Err(AppError::Validation(format!(
                    "reorder contains duplicate id {id}"
                )));
            }
            if !current.contains(&id) {
                return Err(AppError::Validation(format!(
                    "reorder references unknown id {id}"
                )));
            }
        }

        let mut by_id: HashMap<i64, T> = self
            .items
            .drain(..)
            .map(|item| (item.id(), item))
            .collect();
        self.items = ids
            .iter()
            .map(|id| by_id.remove(id).expect("validated permutation"))
            .collect();
        Ok(())
    }

    /// Wholesale replacement — the import path. The incoming order is kept
    /// verbatim; ids are normalized so the unique-id invariant holds even
    /// for documents with missing or colliding ids (older backups carried
    /// skills without ids at all).
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.next_id = self
            .items
            .iter()
            .map(Entity::id)
            .filter(|&id| id > 0)
            .max()
            .unwrap_or(0)
            + 1;

        let mut seen = HashSet::with_capacity(self.items.len());
        let mut next_id = self.next_id;
        for item in &mut self.items {
            if item.id() <= 0 || !seen.insert(item.id()) {
                item.set_id(next_id);
                seen.insert(next_id);
                next_id += 1;
            }
        }
        self.next_id = next_id;
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only projection of the full store, served to the presentation
/// client and used to ground the chat assistant.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentView {
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

/// In-memory source of truth for all portfolio content. Lives behind a
/// single `RwLock` in `AppState`; handlers never hold the lock across an
/// await. State lasts for the process lifetime only — a restart reverts
/// to the built-in defaults.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pub profile: Profile,
    pub skills: Collection<Skill>,
    pub experiences: Collection<Experience>,
    pub educations: Collection<Education>,
    pub projects: Collection<Project>,
    pub certifications: Collection<Certification>,
}

impl ContentStore {
    /// Wholesale profile replacement.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn view(&self) -> ContentView {
        ContentView {
            profile: self.profile.clone(),
            skills: self.skills.items().to_vec(),
            experiences: self.experiences.items().to_vec(),
            educations: self.educations.items().to_vec(),
            projects: self.projects.items().to_vec(),
            certifications: self.certifications.items().to_vec(),
        }
    }

    /// Applies a parsed snapshot document. Per-field replace: every field
    /// present replaces that entire collection, every field absent leaves
    /// it unchanged. Imported skill levels are clamped to 0–100.
    pub fn import(&mut self, document: SnapshotDocument) {
        if let Some(profile) = document.profile {
            self.profile = profile;
        }
        if let Some(mut skills) = document.skills {
            for skill in &mut skills {
                skill.level = skill.level.min(100);
            }
            self.skills.replace(skills);
        }
        if let Some(experiences) = document.experiences {
            self.experiences.replace(experiences);
        }
        if let Some(educations) = document.educations {
            self.educations.replace(educations);
        }
        if let Some(projects) = document.projects {
            self.projects.replace(projects);
        }
        if let Some(certifications) = document.certifications {
            self.certifications.replace(certifications);
        }
        debug!(
            "Imported snapshot: {} skills, {} experiences, {} educations, {} projects, {} certifications",
            self.skills.len(),
            self.experiences.len(),
            self.educations.len(),
            self.projects.len(),
            self.certifications.len()
        );
    }
}
