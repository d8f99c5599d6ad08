use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `api-client`.
pub enum ApiError {
    /// Ошибка HTTP-транспорта (`reqwest`): ответ не получен.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер отклонил авторизацию (401/403).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден (404).
    #[error("not found")]
    NotFound,

    /// Любой другой неуспешный HTTP-статус.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// Код HTTP-ответа.
        status: u16,
        /// Сообщение сервера или описание статуса.
        message: String,
    },

    /// Тело ответа не удалось разобрать в ожидаемую модель.
    #[error("decode error: {0}")]
    Decode(String),

    /// Ошибка хранилища токена.
    #[error("token storage error: {0}")]
    Storage(String),
}

/// Результат операций `api-client`.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }

    /// HTTP-статус, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::Rejected { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) | Self::Storage(_) => None,
        }
    }
}
