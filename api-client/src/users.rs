use reqwest::Method;

use crate::error::ApiResult;
use crate::http_client::ApiClient;
use crate::models::{NewUser, User, UserUpdate};

#[derive(Debug, Clone)]
/// Эндпоинты `/api/users`.
pub struct UsersApi {
    http: ApiClient,
}

impl ApiClient {
    /// Клиент эндпоинтов пользователей.
    pub fn users(&self) -> UsersApi {
        UsersApi { http: self.clone() }
    }
}

impl UsersApi {
    /// Список пользователей в порядке сервера.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.http.get_json("/api/users").await
    }

    /// Пользователь по идентификатору.
    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.http.get_json(&format!("/api/users/{id}")).await
    }

    /// Создаёт пользователя.
    pub async fn create(&self, user: &NewUser) -> ApiResult<User> {
        self.http.send_json(Method::POST, "/api/users", user).await
    }

    /// Частично обновляет пользователя.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> ApiResult<User> {
        self.http
            .send_json(Method::PUT, &format!("/api/users/{id}"), update)
            .await
    }

    /// Удаляет пользователя.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/api/users/{id}"))
            .await
    }
}
