use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель пользователя. Пароль в ответах не возвращается.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Email.
    pub email: String,
    /// Логин.
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
/// Данные для создания пользователя.
pub struct NewUser {
    /// Email.
    pub email: String,
    /// Логин.
    pub username: String,
    /// Пароль (только для записи).
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Частичное обновление пользователя: отправляются только заданные поля.
pub struct UserUpdate {
    /// Новый email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Новый логин.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Идентификатор автора.
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
/// Данные для создания поста.
pub struct NewPost {
    /// Заголовок.
    pub title: String,
    /// Содержимое.
    pub content: String,
    /// Идентификатор автора.
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Частичное обновление поста: отправляются только заданные поля.
pub struct PostUpdate {
    /// Новый заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Новое содержимое.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Ответ после успешной регистрации или входа.
pub struct AuthResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Тип токена, сервер отдаёт `bearer`.
    pub token_type: String,
    /// Идентификатор пользователя.
    pub user_id: i64,
}

impl AuthResponse {
    /// Проверяет, что сервер выдал bearer-токен.
    pub fn is_bearer(&self) -> bool {
        self.token_type.eq_ignore_ascii_case("bearer")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
}
