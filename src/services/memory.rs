//! In-memory binding of the `UserService` collaborator.
//!
//! Backs the binary and the integration tests. This is not a persistence
//! design: records live in a concurrent map and vanish with the process.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use jiff::Timestamp;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, PageRequest, SortField, UpdateUser, User};
use crate::services::UserService;

/// Map-backed user store with sequential id assignment.
///
/// Email uniqueness is enforced through a secondary `emails` index; a writer
/// must claim the email there before the record becomes visible, so two
/// racing writers can never both succeed with the same address.
pub struct InMemoryUserService {
    users: DashMap<i64, User>,
    emails: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Atomically claims `email` for `owner`.
    ///
    /// Idempotent for the current owner; fails with `Duplicate` when any
    /// other user holds the address.
    fn claim_email(&self, email: &str, owner: i64) -> AppResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(entry) if *entry.get() != owner => Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            }),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(())
            }
        }
    }

    /// Releases `email` if it is still claimed by `owner`.
    fn release_email(&self, email: &str, owner: i64) {
        self.emails.remove_if(email, |_, claimed| *claimed == owner);
    }
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn find_all(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        match page.sort_by {
            SortField::Id => users.sort_by_key(|u| u.id),
            SortField::Name => users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
            SortField::Email => users.sort_by(|a, b| a.email.cmp(&b.email).then(a.id.cmp(&b.id))),
            SortField::CreatedAt => {
                users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            }
        }
        Ok(users
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.claim_email(&new_user.email, id)?;
        let now = Timestamp::now();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UpdateUser) -> AppResult<User> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        let user = entry.value_mut();
        if let Some(email) = changes.email {
            if email != user.email {
                self.claim_email(&email, id)?;
                self.release_email(&user.email, id);
                user.email = email;
            }
        }
        if let Some(name) = changes.name {
            user.name = name;
        }
        user.updated_at = Timestamp::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if let Some((_, user)) = self.users.remove(&id) {
            self.release_email(&user.email, id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let svc = InMemoryUserService::new();
        let a = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        let b = svc.create(new_user("Brian", "brian@example.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let svc = InMemoryUserService::new();
        svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        let err = svc
            .create(new_user("Other", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing() {
        let svc = InMemoryUserService::new();
        assert!(svc.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_partial_changes() {
        let svc = InMemoryUserService::new();
        let created = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        let updated = svc
            .update(
                created.id,
                UpdateUser {
                    name: Some("Ada Lovelace".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let svc = InMemoryUserService::new();
        let err = svc.update(9, UpdateUser::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_rejects_email_taken_by_another_user() {
        let svc = InMemoryUserService::new();
        svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        let brian = svc.create(new_user("Brian", "brian@example.com")).await.unwrap();
        let err = svc
            .update(
                brian.id,
                UpdateUser {
                    name: None,
                    email: Some("ada@example.com".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_allowed() {
        let svc = InMemoryUserService::new();
        let ada = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        let updated = svc
            .update(
                ada.id,
                UpdateUser {
                    name: Some("Ada L".to_string()),
                    email: Some("ada@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = InMemoryUserService::new();
        let ada = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        svc.delete(ada.id).await.unwrap();
        svc.delete(ada.id).await.unwrap();
        assert!(svc.find_by_id(ada.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_releases_the_email_for_reuse() {
        let svc = InMemoryUserService::new();
        let ada = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        svc.delete(ada.id).await.unwrap();
        let again = svc.create(new_user("Ada II", "ada@example.com")).await.unwrap();
        assert_ne!(again.id, ada.id);
    }

    #[tokio::test]
    async fn update_releases_the_previous_email() {
        let svc = InMemoryUserService::new();
        let ada = svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        svc.update(
            ada.id,
            UpdateUser {
                name: None,
                email: Some("lovelace@example.com".to_string()),
            },
        )
        .await
        .unwrap();
        // the old address is free again
        svc.create(new_user("Brian", "ada@example.com")).await.unwrap();
        // the new one is not
        let err = svc
            .create(new_user("Carol", "lovelace@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_one_email_store_a_single_record() {
        let svc = std::sync::Arc::new(InMemoryUserService::new());
        let barrier = std::sync::Arc::new(tokio::sync::Barrier::new(8));
        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = std::sync::Arc::clone(&svc);
            let barrier = std::sync::Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                svc.create(NewUser {
                    name: format!("Racer{i}"),
                    email: "shared@example.com".to_string(),
                })
                .await
            }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);

        let page = PageRequest {
            page_no: 0,
            page_size: 100,
            sort_by: SortField::Id,
        };
        let matching = svc
            .find_all(&page)
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.email == "shared@example.com")
            .count();
        assert_eq!(matching, 1);
    }

    #[tokio::test]
    async fn find_all_sorts_ascending_by_name() {
        let svc = InMemoryUserService::new();
        svc.create(new_user("Carol", "carol@example.com")).await.unwrap();
        svc.create(new_user("Ada", "ada@example.com")).await.unwrap();
        svc.create(new_user("Brian", "brian@example.com")).await.unwrap();

        let page = PageRequest {
            page_no: 0,
            page_size: 10,
            sort_by: SortField::Name,
        };
        let names: Vec<String> = svc
            .find_all(&page)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Brian", "Carol"]);
    }

    #[tokio::test]
    async fn find_all_slices_pages_without_overlap() {
        let svc = InMemoryUserService::new();
        for i in 0..5 {
            svc.create(new_user(&format!("User{i}"), &format!("u{i}@example.com")))
                .await
                .unwrap();
        }
        let first = svc
            .find_all(&PageRequest {
                page_no: 0,
                page_size: 2,
                sort_by: SortField::Id,
            })
            .await
            .unwrap();
        let second = svc
            .find_all(&PageRequest {
                page_no: 1,
                page_size: 2,
                sort_by: SortField::Id,
            })
            .await
            .unwrap();
        let ids: Vec<i64> = first.iter().chain(second.iter()).map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    proptest! {
        #[test]
        fn pages_are_bounded_and_sorted(count in 0usize..40, page_no in 0u32..6, page_size in 1u32..20) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let svc = InMemoryUserService::new();
                for i in 0..count {
                    svc.create(NewUser {
                        name: format!("User{i}"),
                        email: format!("u{i}@example.com"),
                    })
                    .await
                    .unwrap();
                }
                let page = PageRequest { page_no, page_size, sort_by: SortField::Id };
                let users = svc.find_all(&page).await.unwrap();

                prop_assert!(users.len() <= page_size as usize);
                prop_assert!(users.windows(2).all(|w| w[0].id < w[1].id));
                if page.offset() >= count {
                    prop_assert!(users.is_empty());
                }
                Ok(())
            })?;
        }
    }
}
