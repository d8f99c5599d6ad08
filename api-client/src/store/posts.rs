use super::{Shared, replace_by_id};
use crate::error::ApiResult;
use crate::http_client::ApiClient;
use crate::models::{NewPost, Post, PostUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Снимок состояния ленты постов.
pub struct PostsState {
    /// Посты; новые добавляются в начало.
    pub posts: Vec<Post>,
    /// Выполняется загрузка.
    pub loading: bool,
}

#[derive(Debug, Clone)]
/// Лента постов для UI. Все ошибки пробрасываются вызывающему.
pub struct PostsStore {
    client: ApiClient,
    state: Shared<PostsState>,
}

impl PostsStore {
    /// Пустая лента; загрузка запускается явно.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Shared::new(PostsState::default()),
        }
    }

    /// Снимок текущего состояния.
    pub fn state(&self) -> PostsState {
        self.state.snapshot()
    }

    /// Загружает все посты, заменяя локальный список.
    pub async fn fetch_posts(&self) -> ApiResult<()> {
        self.state.update(|state| state.loading = true);

        let result = self.client.posts().list().await;

        self.state.update(|state| {
            if let Ok(posts) = &result {
                state.posts = posts.clone();
            }
            state.loading = false;
        });
        result.map(|_| ())
    }

    /// Посты автора. Локальный список не меняется.
    pub async fn fetch_posts_by_user(&self, user_id: i64) -> ApiResult<Vec<Post>> {
        self.state.update(|state| state.loading = true);
        let result = self.client.posts().list_by_user(user_id).await;
        self.state.update(|state| state.loading = false);
        result
    }

    /// Создаёт пост и ставит его в начало ленты.
    pub async fn create_post(&self, title: &str, content: &str, user_id: i64) -> ApiResult<Post> {
        let new_post = NewPost {
            title: title.to_string(),
            content: content.to_string(),
            user_id,
        };
        let created = self.client.posts().create(&new_post).await?;

        self.state
            .update(|state| state.posts.insert(0, created.clone()));
        Ok(created)
    }

    /// Обновляет пост; локально заменяется только уже известный.
    pub async fn update_post(&self, id: i64, update: PostUpdate) -> ApiResult<Post> {
        let updated = self.client.posts().update(id, &update).await?;

        self.state.update(|state| {
            replace_by_id(&mut state.posts, id, updated.clone(), |post| post.id);
        });
        Ok(updated)
    }

    /// Удаляет пост на сервере и из ленты.
    pub async fn delete_post(&self, id: i64) -> ApiResult<()> {
        self.client.posts().delete(id).await?;

        self.state
            .update(|state| state.posts.retain(|post| post.id != id));
        Ok(())
    }
}
