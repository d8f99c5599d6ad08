/// Переменная окружения с базовым URL API.
pub const API_URL_ENV: &str = "API_URL";
/// Базовый URL по умолчанию.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Настройки HTTP-клиента.
pub struct ApiSettings {
    /// Базовый URL сервера, например `http://localhost:8000`.
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiSettings {
    /// Создаёт настройки с явным базовым URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Читает настройки из окружения (`API_URL`).
    pub fn from_env() -> Self {
        let raw = std::env::var(API_URL_ENV).ok();
        Self::from_raw(raw)
    }

    fn from_raw(raw: Option<String>) -> Self {
        match raw.map(|value| value.trim().to_string()) {
            Some(value) if !value.is_empty() => Self::new(value),
            _ => Self::default(),
        }
    }
}

fn normalize_base_url(server: String) -> String {
    let server = server.trim().to_string();
    let lower = server.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_falls_back_to_default() {
        assert_eq!(ApiSettings::from_raw(None).base_url, DEFAULT_API_URL);
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let settings = ApiSettings::from_raw(Some("   ".to_string()));
        assert_eq!(settings.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn keeps_scheme() {
        let settings = ApiSettings::new("https://api.example.com");
        assert_eq!(settings.base_url, "https://api.example.com");
    }

    #[test]
    fn keeps_uppercase_scheme() {
        let settings = ApiSettings::new("HTTPS://api.example.com");
        assert_eq!(settings.base_url, "HTTPS://api.example.com");
    }

    #[test]
    fn adds_http_scheme() {
        let settings = ApiSettings::from_raw(Some(" 127.0.0.1:9000 ".to_string()));
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
    }
}
