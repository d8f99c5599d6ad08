//! Клиентская библиотека для REST API пользователей и постов.
//!
//! Состоит из трёх слоёв:
//! - [`ApiClient`] — HTTP-клиент (`reqwest`) с базовым URL и подстановкой
//!   bearer-токена из [`TokenStore`] в каждый запрос;
//! - ресурсные клиенты [`AuthApi`], [`UsersApi`], [`PostsApi`] — по одной
//!   функции на эндпоинт, ошибки пробрасываются без изменений;
//! - хранилища состояния [`AuthStore`], [`UsersStore`], [`PostsStore`] —
//!   локальный кэш последнего ответа сервера, флаги загрузки и ошибки для UI.
#![warn(missing_docs)]

mod auth;
mod error;
mod http_client;
mod models;
mod posts;
mod settings;
mod storage;
mod store;
mod users;

pub use auth::AuthApi;
pub use error::{ApiError, ApiResult};
pub use http_client::ApiClient;
pub use models::{AuthResponse, NewPost, NewUser, Post, PostUpdate, User, UserUpdate};
pub use posts::PostsApi;
pub use settings::{API_URL_ENV, ApiSettings, DEFAULT_API_URL};
pub use storage::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};
pub use store::{
    AuthPhase, AuthState, AuthStore, PostsState, PostsStore, SessionUser, UsersState, UsersStore,
};
pub use users::UsersApi;
