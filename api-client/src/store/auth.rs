use tracing::{debug, warn};

use super::Shared;
use crate::error::{ApiError, ApiResult};
use crate::http_client::ApiClient;
use crate::models::{AuthResponse, User};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Частичные данные пользователя текущей сессии.
pub struct SessionUser {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Email, если известен.
    pub email: Option<String>,
    /// Логин, если известен.
    pub username: Option<String>,
}

impl From<User> for SessionUser {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: Some(value.email),
            username: Some(value.username),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Фаза аутентификации.
pub enum AuthPhase {
    /// Сессии нет.
    Unauthenticated,
    /// Идёт вход.
    Authenticating,
    /// Сессия активна.
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Снимок состояния сессии.
pub struct AuthState {
    /// Сессия активна.
    pub is_authenticated: bool,
    /// Пользователь сессии.
    pub user: Option<SessionUser>,
    /// Копия access token.
    pub token: Option<String>,
    /// Выполняется запрос входа/регистрации.
    pub loading: bool,
}

impl AuthState {
    /// Текущая фаза.
    pub fn phase(&self) -> AuthPhase {
        if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.loading {
            AuthPhase::Authenticating
        } else {
            AuthPhase::Unauthenticated
        }
    }

    fn authenticated(user: SessionUser, token: String, loading: bool) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            token: Some(token),
            loading,
        }
    }
}

#[derive(Debug, Clone)]
/// Состояние аутентификации для UI.
pub struct AuthStore {
    client: ApiClient,
    state: Shared<AuthState>,
}

impl AuthStore {
    /// Создаёт хранилище в состоянии «не аутентифицирован».
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Shared::new(AuthState::default()),
        }
    }

    /// Снимок текущего состояния.
    pub fn state(&self) -> AuthState {
        self.state.snapshot()
    }

    /// Вход. При успехе токен сохраняется в хранилище и сессия становится
    /// активной. При ошибке сохранённый токен и сессия не меняются.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.state.update(|state| state.loading = true);

        let result = match self.client.auth().login(email, password).await {
            Ok(auth) => self
                .client
                .tokens()
                .set(&auth.access_token)
                .map(|()| auth),
            Err(err) => Err(err),
        };

        self.state.update(|state| {
            state.loading = false;
            if let Ok(auth) = &result {
                let user = SessionUser {
                    id: auth.user_id,
                    email: Some(email.to_string()),
                    username: None,
                };
                *state = AuthState::authenticated(user, auth.access_token.clone(), false);
            }
        });

        result
    }

    /// Регистрация. Токен не сохраняется и сессия не открывается.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        self.state.update(|state| state.loading = true);
        let result = self.client.auth().register(email, username, password).await;
        self.state.update(|state| state.loading = false);
        result
    }

    /// Выход. Локальный токен и сессия сбрасываются всегда, даже если
    /// уведомление сервера не прошло; ошибка сети при этом возвращается.
    pub async fn logout(&self) -> ApiResult<()> {
        let notified = self.client.auth().logout().await;
        match &notified {
            Ok(()) => {}
            Err(err @ ApiError::Storage(_)) => {
                warn!(error = %err, "token storage failed during logout");
            }
            Err(err) => warn!(error = %err, "logout notification failed"),
        }

        let cleared = self.client.tokens().clear();
        self.state.update(|state| {
            *state = AuthState {
                loading: state.loading,
                ..AuthState::default()
            };
        });

        notified.and(cleared)
    }

    /// Восстанавливает сессию по сохранённому токену.
    ///
    /// Ошибка проверки (в том числе нечитаемый токен) удаляет токен из
    /// хранилища и больше никак не проявляется: уже активная сессия в
    /// памяти не сбрасывается.
    pub async fn check_auth(&self) {
        let token = match self.client.tokens().get() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "stored token is unreadable, dropping it");
                self.drop_stored_token();
                return;
            }
        };

        match self.client.auth().current_user().await {
            Ok(user) => self.state.update(|state| {
                *state = AuthState::authenticated(user.into(), token, state.loading);
            }),
            Err(err) => {
                debug!(error = %err, "stored token rejected, dropping it");
                self.drop_stored_token();
            }
        }
    }

    fn drop_stored_token(&self) {
        if let Err(err) = self.client.tokens().clear() {
            warn!(error = %err, "failed to clear stored token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_flags() {
        let mut state = AuthState::default();
        assert_eq!(state.phase(), AuthPhase::Unauthenticated);

        state.loading = true;
        assert_eq!(state.phase(), AuthPhase::Authenticating);

        state.is_authenticated = true;
        assert_eq!(state.phase(), AuthPhase::Authenticated);
    }

    #[test]
    fn session_user_from_full_user() {
        let user = User {
            id: 3,
            email: "a@example.com".to_string(),
            username: "alice".to_string(),
        };
        let session = SessionUser::from(user);
        assert_eq!(session.id, 3);
        assert_eq!(session.username.as_deref(), Some("alice"));
    }
}
