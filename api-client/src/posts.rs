use reqwest::Method;

use crate::error::ApiResult;
use crate::http_client::ApiClient;
use crate::models::{NewPost, Post, PostUpdate};

#[derive(Debug, Clone)]
/// Эндпоинты `/api/posts`.
pub struct PostsApi {
    http: ApiClient,
}

impl ApiClient {
    /// Клиент эндпоинтов постов.
    pub fn posts(&self) -> PostsApi {
        PostsApi { http: self.clone() }
    }
}

impl PostsApi {
    /// Все посты в порядке сервера.
    pub async fn list(&self) -> ApiResult<Vec<Post>> {
        self.http.get_json("/api/posts").await
    }

    /// Пост по идентификатору.
    pub async fn get(&self, id: i64) -> ApiResult<Post> {
        self.http.get_json(&format!("/api/posts/{id}")).await
    }

    /// Посты указанного автора.
    pub async fn list_by_user(&self, user_id: i64) -> ApiResult<Vec<Post>> {
        self.http
            .get_json(&format!("/api/posts/user/{user_id}"))
            .await
    }

    /// Создаёт пост.
    pub async fn create(&self, post: &NewPost) -> ApiResult<Post> {
        self.http.send_json(Method::POST, "/api/posts", post).await
    }

    /// Частично обновляет пост.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> ApiResult<Post> {
        self.http
            .send_json(Method::PUT, &format!("/api/posts/{id}"), update)
            .await
    }

    /// Удаляет пост.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.http
            .send_empty(Method::DELETE, &format!("/api/posts/{id}"))
            .await
    }
}
