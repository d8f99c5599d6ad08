//! Хранилища bearer-токена.
//!
//! Токен — единственное долговременное состояние клиента. Он лежит под
//! фиксированным ключом [`TOKEN_KEY`]; HTTP-слой получает хранилище явно,
//! через [`TokenStore`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{ApiError, ApiResult};

/// Ключ, под которым хранится access token.
pub const TOKEN_KEY: &str = "access_token";

/// Хранилище токена: чтение, запись, удаление.
pub trait TokenStore: Send + Sync {
    /// Возвращает сохранённый токен, если он есть.
    ///
    /// Отсутствие токена — `Ok(None)`; токен, который не удалось прочитать,
    /// — ошибка.
    fn get(&self) -> ApiResult<Option<String>>;

    /// Сохраняет токен, заменяя предыдущий.
    fn set(&self, token: &str) -> ApiResult<()>;

    /// Удаляет токен. Отсутствие токена ошибкой не считается.
    fn clear(&self) -> ApiResult<()>;
}

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[derive(Debug, Default)]
/// Токен в памяти процесса.
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с заранее сохранённым токеном.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(parse_token(&token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> ApiResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = parse_token(token);
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Токен в файле на диске.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Хранилище с произвольным путём к файлу.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Хранилище в каталоге `dir`, файл `.access_token`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!(".{TOKEN_KEY}")))
    }

    /// Путь к файлу токена.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> ApiResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(parse_token(&raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ApiError::Storage(format!("failed to read token: {err}"))),
        }
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        fs::write(&self.path, token.trim())
            .map_err(|err| ApiError::Storage(format!("failed to save token: {err}")))
    }

    fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApiError::Storage(format!("failed to clear token: {err}"))),
        }
    }
}
