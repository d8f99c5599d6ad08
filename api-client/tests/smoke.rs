use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use api_client::{
    ApiClient, ApiError, ApiSettings, AuthStore, MemoryTokenStore, PostUpdate, PostsStore,
    TokenStore,
};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running backend and database"]
async fn live_smoke_flow() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let client =
        ApiClient::new(&ApiSettings::from_env(), tokens.clone()).expect("client must build");
    let auth = AuthStore::new(client.clone());
    let posts = PostsStore::new(client.clone());

    let suffix = unique_suffix();
    let username = format!("user_{suffix}");
    let email = format!("user_{suffix}@example.com");
    let password = "password123";

    let registered = auth
        .register(&email, &username, password)
        .await
        .expect("register must succeed");
    assert!(!registered.access_token.is_empty());

    let login = auth
        .login(&email, password)
        .await
        .expect("login must succeed");
    assert_eq!(
        tokens.get().expect("token must be readable").as_deref(),
        Some(login.access_token.as_str())
    );

    let created = posts
        .create_post("smoke title", "smoke content", login.user_id)
        .await
        .expect("create_post must succeed");
    assert_eq!(posts.state().posts[0].id, created.id);

    let fetched = client
        .posts()
        .get(created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched, created);

    let updated = posts
        .update_post(
            created.id,
            PostUpdate {
                title: Some("smoke title updated".to_string()),
                ..PostUpdate::default()
            },
        )
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.title, "smoke title updated");

    posts
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");

    let after_delete = client.posts().get(created.id).await;
    assert!(matches!(after_delete, Err(ApiError::NotFound)));

    auth.logout().await.expect("logout must succeed");
    assert!(tokens.get().expect("token must be readable").is_none());
}
