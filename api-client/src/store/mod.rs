//! Хранилища состояния для UI поверх ресурсных клиентов.
//!
//! Каждое хранилище — дешёвый `Clone`-хэндл на общее состояние. Локальные
//! изменения применяются только после успешного ответа сервера. Блокировка
//! никогда не удерживается через `.await`, поэтому параллельные операции
//! не упорядочиваются и не дедуплицируются.

mod auth;
mod posts;
mod users;

pub use auth::{AuthPhase, AuthState, AuthStore, SessionUser};
pub use posts::{PostsState, PostsStore};
pub use users::{UsersState, UsersStore};

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug)]
pub(crate) struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Shared<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub(crate) fn snapshot(&self) -> T {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Заменяет элемент с тем же id; если его нет, коллекция не меняется.
pub(crate) fn replace_by_id<T>(items: &mut [T], id: i64, updated: T, id_of: impl Fn(&T) -> i64) {
    if let Some(item) = items.iter_mut().find(|item| id_of(item) == id) {
        *item = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_by_id_swaps_matching_item() {
        let mut items = vec![(1, "a"), (2, "b"), (3, "c")];
        replace_by_id(&mut items, 2, (2, "B"), |item| item.0);
        assert_eq!(items, vec![(1, "a"), (2, "B"), (3, "c")]);
    }

    #[test]
    fn replace_by_id_ignores_unknown_id() {
        let mut items = vec![(1, "a")];
        replace_by_id(&mut items, 9, (9, "z"), |item| item.0);
        assert_eq!(items, vec![(1, "a")]);
    }

    #[test]
    fn clones_share_state() {
        let shared = Shared::new(0_u32);
        let other = shared.clone();
        other.update(|value| *value += 5);
        assert_eq!(shared.snapshot(), 5);
    }
}
