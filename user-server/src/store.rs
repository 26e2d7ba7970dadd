//! In-memory user store
//!
//! Holds the id → user map and the id counter behind a single lock so that id
//! assignment and every read-modify-write happen atomically.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::{NewUser, User, UserPatch};

/// First id handed out by a freshly seeded store
pub const INITIAL_NEXT_ID: u64 = 3;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User with ID {0} not found")]
    NotFound(u64),

    #[error("Seed user {id} is not below the initial counter {next_id}")]
    SeedConflict { id: u64, next_id: u64 },

    #[error("Seed contains user {0} more than once")]
    DuplicateSeed(u64),
}

pub type Result<T> = std::result::Result<T, StoreError>;

struct Inner {
    users: HashMap<u64, User>,
    next_id: u64,
}

/// Process-wide user store
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    /// Build a store from seed records and an explicit initial counter.
    ///
    /// Every seed id must be unique and strictly below `next_id`.
    pub fn new(seed: Vec<User>, next_id: u64) -> Result<Self> {
        let mut users = HashMap::with_capacity(seed.len());
        for user in seed {
            if user.id >= next_id {
                return Err(StoreError::SeedConflict {
                    id: user.id,
                    next_id,
                });
            }
            let id = user.id;
            if users.insert(id, user).is_some() {
                return Err(StoreError::DuplicateSeed(id));
            }
        }

        Ok(Self {
            inner: RwLock::new(Inner { users, next_id }),
        })
    }

    /// Store with the two default records (Alice, Bob) and counter at 3
    pub fn seeded() -> Self {
        let users = default_seed()
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Self {
            inner: RwLock::new(Inner {
                users,
                next_id: INITIAL_NEXT_ID,
            }),
        }
    }

    /// Insert a new user under the next counter value
    pub async fn create(&self, new_user: NewUser) -> User {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
        };
        inner.users.insert(id, user.clone());

        user
    }

    /// All users, ordered by id
    pub async fn list(&self) -> Vec<User> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub async fn get(&self, id: u64) -> Result<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn contains(&self, id: u64) -> bool {
        self.inner.read().await.users.contains_key(&id)
    }

    /// Overwrite the fields present in `patch`; the id never changes
    pub async fn update(&self, id: u64, patch: UserPatch) -> Result<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }

        Ok(user.clone())
    }

    /// Remove a user. Its id is not reissued.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.inner
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }

    /// Id the next create will receive
    pub async fn next_id(&self) -> u64 {
        self.inner.read().await.next_id
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn default_seed() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn carol() -> NewUser {
        NewUser {
            name: "Carol".to_string(),
            email: "carol@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = UserStore::seeded();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.next_id().await, INITIAL_NEXT_ID);
        assert_eq!(store.get(1).await.unwrap().name, "Alice");
        assert_eq!(store.get(2).await.unwrap().email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_create_assigns_counter_value() {
        let store = UserStore::seeded();

        let user = store.create(carol()).await;
        assert_eq!(user.id, 3);
        assert_eq!(store.next_id().await, 4);
        assert_eq!(store.get(3).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = UserStore::seeded();
        store.create(carol()).await;

        let ids: Vec<u64> = store.list().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_only_touches_present_fields() {
        let store = UserStore::seeded();

        let user = store
            .update(
                1,
                UserPatch {
                    name: Some("Alicia".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");

        let user = store
            .update(
                1,
                UserPatch {
                    name: None,
                    email: Some("a@new.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "a@new.com");
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = UserStore::seeded();

        assert!(matches!(store.get(99).await, Err(StoreError::NotFound(99))));
        assert!(matches!(
            store.update(99, UserPatch::default()).await,
            Err(StoreError::NotFound(99))
        ));
        assert!(matches!(store.delete(99).await, Err(StoreError::NotFound(99))));
        assert!(!store.contains(99).await);
    }

    #[tokio::test]
    async fn test_deleted_id_is_never_reissued() {
        let store = UserStore::seeded();

        let first = store.create(carol()).await;
        store.delete(first.id).await.unwrap();
        assert!(store.get(first.id).await.is_err());

        let second = store.create(carol()).await;
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_counter_is_not_derived_from_seed() {
        let seed = vec![User {
            id: 1,
            name: "Only".to_string(),
            email: "only@example.com".to_string(),
        }];
        let store = UserStore::new(seed, 10).unwrap();

        assert_eq!(store.create(carol()).await.id, 10);
    }

    #[test]
    fn test_seed_must_stay_below_counter() {
        let seed = vec![User {
            id: 5,
            name: "Late".to_string(),
            email: "late@example.com".to_string(),
        }];

        assert!(matches!(
            UserStore::new(seed, 3),
            Err(StoreError::SeedConflict { id: 5, next_id: 3 })
        ));
    }

    #[test]
    fn test_duplicate_seed_rejected() {
        let seed = default_seed()
            .into_iter()
            .chain(default_seed())
            .collect::<Vec<_>>();

        assert!(matches!(
            UserStore::new(seed, INITIAL_NEXT_ID),
            Err(StoreError::DuplicateSeed(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(UserStore::seeded());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(carol()).await.id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 50);
        assert_eq!(store.len().await, 52);
        assert_eq!(store.next_id().await, INITIAL_NEXT_ID + 50);
    }
}
