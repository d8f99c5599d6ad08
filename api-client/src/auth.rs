use reqwest::Method;

use crate::error::ApiResult;
use crate::http_client::ApiClient;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

#[derive(Debug, Clone)]
/// Эндпоинты `/api/auth`.
///
/// Валидация email, пароля и логина выполняется только на сервере.
pub struct AuthApi {
    http: ApiClient,
}

impl ApiClient {
    /// Клиент эндпоинтов аутентификации.
    pub fn auth(&self) -> AuthApi {
        AuthApi { http: self.clone() }
    }
}

impl AuthApi {
    /// Выполняет вход по email и паролю.
    ///
    /// Токен не сохраняется: это решает вызывающая сторона.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let payload = LoginRequest { email, password };
        self.http
            .send_json(Method::POST, "/api/auth/login", &payload)
            .await
    }

    /// Регистрирует пользователя.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        let payload = RegisterRequest {
            email,
            username,
            password,
        };
        self.http
            .send_json(Method::POST, "/api/auth/register", &payload)
            .await
    }

    /// Сообщает серверу о выходе и удаляет локальный токен.
    ///
    /// Если запрос не удался, ошибка возвращается, а токен остаётся.
    pub async fn logout(&self) -> ApiResult<()> {
        self.http.send_empty(Method::POST, "/api/auth/logout").await?;
        self.http.tokens().clear()
    }

    /// Возвращает текущего пользователя по bearer-токену.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.http.get_json("/api/auth/me").await
    }
}
