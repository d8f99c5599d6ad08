use super::{Shared, replace_by_id};
use crate::error::{ApiError, ApiResult};
use crate::http_client::ApiClient;
use crate::models::{NewUser, User, UserUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Снимок состояния списка пользователей.
pub struct UsersState {
    /// Пользователи в порядке сервера; новые добавляются в конец.
    pub users: Vec<User>,
    /// Выполняется загрузка или создание.
    pub loading: bool,
    /// Текст последней ошибки.
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
/// Список пользователей для UI.
///
/// Ошибки всех операций попадают в `error`; загрузка списка ошибку
/// дальше не пробрасывает, остальные операции пробрасывают.
pub struct UsersStore {
    client: ApiClient,
    state: Shared<UsersState>,
}

impl UsersStore {
    /// Хранилище без начальной загрузки.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Shared::new(UsersState::default()),
        }
    }

    /// Создаёт хранилище и один раз загружает список.
    pub async fn mount(client: ApiClient) -> Self {
        let store = Self::new(client);
        store.fetch_users().await;
        store
    }

    /// Снимок текущего состояния.
    pub fn state(&self) -> UsersState {
        self.state.snapshot()
    }

    fn fail(&self, err: &ApiError) {
        let message = err.to_string();
        self.state.update(|state| state.error = Some(message));
    }

    /// Перезагружает список. Ошибка сохраняется в `error`.
    pub async fn fetch_users(&self) {
        self.state.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = self.client.users().list().await;

        self.state.update(|state| {
            match result {
                Ok(users) => state.users = users,
                Err(err) => state.error = Some(err.to_string()),
            }
            state.loading = false;
        });
    }

    /// Создаёт пользователя и добавляет его в конец списка.
    pub async fn create_user(&self, user: NewUser) -> ApiResult<User> {
        self.state.update(|state| state.loading = true);

        let result = self.client.users().create(&user).await;

        self.state.update(|state| {
            match &result {
                Ok(created) => state.users.push(created.clone()),
                Err(err) => state.error = Some(err.to_string()),
            }
            state.loading = false;
        });
        result
    }

    /// Обновляет пользователя; локально заменяется только уже известный.
    pub async fn update_user(&self, id: i64, update: UserUpdate) -> ApiResult<User> {
        match self.client.users().update(id, &update).await {
            Ok(updated) => {
                self.state.update(|state| {
                    replace_by_id(&mut state.users, id, updated.clone(), |user| user.id);
                });
                Ok(updated)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Удаляет пользователя на сервере и из списка.
    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        match self.client.users().delete(id).await {
            Ok(()) => {
                self.state
                    .update(|state| state.users.retain(|user| user.id != id));
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }
}
