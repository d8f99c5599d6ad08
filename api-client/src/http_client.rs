use std::fmt;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::settings::ApiSettings;
use crate::storage::TokenStore;

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    #[serde(default)]
    detail: Value,
}

/// `detail` бывает строкой или списком ошибок валидации (`loc` + `msg`).
fn render_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_validation_item).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        other => Some(other.to_string()),
    }
}

fn render_validation_item(item: &Value) -> String {
    let Some(msg) = item.get("msg").and_then(Value::as_str) else {
        return item.to_string();
    };
    let loc: Vec<String> = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|part| match part {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if loc.is_empty() {
        msg.to_string()
    } else {
        format!("{}: {msg}", loc.join("."))
    }
}

#[derive(Clone)]
/// HTTP-клиент REST API с подстановкой bearer-токена из хранилища.
pub struct ApiClient {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Создаёт клиент с базовым URL из настроек и заголовком
    /// `Content-Type: application/json` по умолчанию.
    pub fn new(settings: &ApiSettings, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            client,
            tokens,
        })
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Хранилище токена, которым пользуется клиент.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Собирает запрос; токен из хранилища читается перед каждым запросом.
    ///
    /// Нечитаемый токен — ошибка: запрос не уходит анонимно.
    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path);
        let token = self.tokens.get()?;
        debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let request = self.client.request(method, url);
        Ok(match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn decode_error(response: Response) -> ApiError {
        let status = response.status();

        let message = match response.text().await {
            Ok(text) => match serde_json::from_str::<ErrorResponseDto>(&text) {
                Ok(body) => render_detail(&body.detail),
                Err(_) if !text.trim().is_empty() => Some(text),
                Err(_) => None,
            },
            Err(_) => None,
        };
        ApiError::from_http_status(status, message)
    }

    async fn execute(request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    /// GET с разбором JSON-ответа.
    pub(crate) async fn get_json<TRes>(&self, path: &str) -> ApiResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = Self::execute(self.request(Method::GET, path)?).await?;
        response
            .json::<TRes>()
            .await
            .map_err(ApiError::from_reqwest)
    }

    /// универсальный helper для отправки запросов с json-payload
    pub(crate) async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> ApiResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let response = Self::execute(self.request(method, path)?.json(body)).await?;
        response
            .json::<TRes>()
            .await
            .map_err(ApiError::from_reqwest)
    }

    /// Запрос без тела; содержимое ответа игнорируется.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        Self::execute(self.request(method, path)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiSettings::new(base_url), Arc::new(MemoryTokenStore::new()))
            .expect("client must build")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("http://localhost:8000/");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8000/api/posts");
    }

    #[test]
    fn endpoint_joins_path_without_leading_slash() {
        let client = client("http://localhost:8000");
        assert_eq!(
            client.endpoint("api/users/3"),
            "http://localhost:8000/api/users/3"
        );
    }

    #[test]
    fn request_attaches_bearer_when_token_present() {
        let client = client("http://localhost:8000");
        client.tokens().set("secret").expect("set token");

        let request = client
            .request(Method::GET, "/api/auth/me")
            .expect("token must be readable")
            .build()
            .expect("request must build");
        let header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(header, Some("Bearer secret"));
    }

    #[test]
    fn request_without_token_is_anonymous() {
        let client = client("http://localhost:8000");
        let request = client
            .request(Method::GET, "/api/posts")
            .expect("token must be readable")
            .build()
            .expect("request must build");
        assert!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .is_none()
        );
    }

    #[test]
    fn string_detail_is_used_as_is() {
        let detail = serde_json::json!("Invalid credentials");
        assert_eq!(render_detail(&detail).as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn validation_detail_lists_locations() {
        let detail = serde_json::json!([
            {"loc": ["body", "title"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "user_id"], "msg": "value is not a valid integer"}
        ]);
        assert_eq!(
            render_detail(&detail).as_deref(),
            Some("body.title: field required; body.user_id: value is not a valid integer")
        );
    }

    #[test]
    fn missing_detail_yields_nothing() {
        assert!(render_detail(&Value::Null).is_none());
        assert!(render_detail(&serde_json::json!([])).is_none());
    }
}
