use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_client::{
    ApiClient, ApiError, ApiSettings, AuthState, AuthStore, FileTokenStore, NewUser, PostUpdate,
    PostsStore, UserUpdate, UsersStore,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

mod logging;

use logging::{init_logging, log_level_from_env};

#[derive(Debug, Parser)]
#[command(name = "api-cli", version, about = "CLI клиент для API пользователей и постов")]
struct Cli {
    /// Адрес сервера (по умолчанию `API_URL` или http://localhost:8000).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Каталог, в котором хранится файл токена `.access_token`.
    #[arg(long, global = true, default_value = ".")]
    token_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя (токен не сохраняется).
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя, токен сохраняется в файл.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: токен удаляется даже при ошибке сети.
    Logout,
    /// Текущий пользователь по сохранённому токену.
    Me,
    /// Проверка сохранённой сессии; недействительный токен удаляется.
    Check,
    /// Операции с пользователями.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Операции с постами.
    #[command(subcommand)]
    Posts(PostsCommand),
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    /// Список пользователей.
    List,
    /// Пользователь по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание пользователя.
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Частичное обновление: отправляются только указанные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Удаление пользователя.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum PostsCommand {
    /// Список постов.
    List,
    /// Пост по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Посты автора.
    ByUser {
        #[arg(long)]
        user_id: i64,
    },
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        user_id: i64,
    },
    /// Частичное обновление: отправляются только указанные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&log_level_from_env())?;

    let cli = Cli::parse();

    let settings = resolve_settings(cli.server);
    let tokens = FileTokenStore::in_dir(&cli.token_dir);
    debug!(base_url = %settings.base_url, token_file = %tokens.path().display(), "cli configured");

    let client = ApiClient::new(&settings, Arc::new(tokens))
        .map_err(map_client_error)
        .context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::Register {
            email,
            username,
            password,
        } => {
            let auth = AuthStore::new(client)
                .register(&email, &username, &password)
                .await
                .map_err(map_client_error)?;
            print_json("Регистрация успешна", &auth)?;
        }
        Command::Login { email, password } => {
            let store = AuthStore::new(client);
            store
                .login(&email, &password)
                .await
                .map_err(map_client_error)?;
            print_session("Вход выполнен", &store.state())?;
        }
        Command::Logout => {
            let store = AuthStore::new(client);
            store.logout().await.map_err(map_client_error)?;
            println!("Выход выполнен");
        }
        Command::Me => {
            let user = client
                .auth()
                .current_user()
                .await
                .map_err(map_client_error)?;
            print_json("Текущий пользователь", &user)?;
        }
        Command::Check => {
            let had_token = !matches!(client.tokens().get(), Ok(None));
            let store = AuthStore::new(client);
            store.check_auth().await;
            let state = store.state();
            if state.is_authenticated {
                print_session("Сессия активна", &state)?;
            } else if had_token {
                println!("Токен недействителен и удалён");
            } else {
                println!("Токен не найден: выполните `api-cli login ...`");
            }
        }
        Command::Users(command) => run_users(client, command).await?,
        Command::Posts(command) => run_posts(client, command).await?,
    }

    Ok(())
}

async fn run_users(client: ApiClient, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => {
            let store = UsersStore::mount(client).await;
            let state = store.state();
            if let Some(error) = state.error {
                anyhow::bail!("не удалось загрузить пользователей: {error}");
            }
            print_json(&format!("Пользователей: {}", state.users.len()), &state.users)?;
        }
        UsersCommand::Get { id } => {
            let user = client.users().get(id).await.map_err(map_client_error)?;
            print_json("Пользователь", &user)?;
        }
        UsersCommand::Create {
            email,
            username,
            password,
        } => {
            let user = UsersStore::new(client)
                .create_user(NewUser {
                    email,
                    username,
                    password,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Пользователь создан", &user)?;
        }
        UsersCommand::Update {
            id,
            email,
            username,
        } => {
            let user = UsersStore::new(client)
                .update_user(id, UserUpdate { email, username })
                .await
                .map_err(map_client_error)?;
            print_json("Пользователь обновлён", &user)?;
        }
        UsersCommand::Delete { id } => {
            UsersStore::new(client)
                .delete_user(id)
                .await
                .map_err(map_client_error)?;
            println!("Пользователь удалён: id={id}");
        }
    }
    Ok(())
}

async fn run_posts(client: ApiClient, command: PostsCommand) -> Result<()> {
    let store = PostsStore::new(client.clone());
    match command {
        PostsCommand::List => {
            store.fetch_posts().await.map_err(map_client_error)?;
            let posts = store.state().posts;
            print_json(&format!("Постов: {}", posts.len()), &posts)?;
        }
        PostsCommand::Get { id } => {
            let post = client.posts().get(id).await.map_err(map_client_error)?;
            print_json("Пост", &post)?;
        }
        PostsCommand::ByUser { user_id } => {
            let posts = store
                .fetch_posts_by_user(user_id)
                .await
                .map_err(map_client_error)?;
            print_json(&format!("Постов автора {user_id}: {}", posts.len()), &posts)?;
        }
        PostsCommand::Create {
            title,
            content,
            user_id,
        } => {
            let post = store
                .create_post(&title, &content, user_id)
                .await
                .map_err(map_client_error)?;
            print_json("Пост создан", &post)?;
        }
        PostsCommand::Update { id, title, content } => {
            let post = store
                .update_post(id, PostUpdate { title, content })
                .await
                .map_err(map_client_error)?;
            print_json("Пост обновлён", &post)?;
        }
        PostsCommand::Delete { id } => {
            store.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }
    Ok(())
}

fn resolve_settings(server: Option<String>) -> ApiSettings {
    match server {
        Some(server) if !server.trim().is_empty() => ApiSettings::new(server),
        _ => ApiSettings::from_env(),
    }
}

fn map_client_error(err: ApiError) -> anyhow::Error {
    let message = match err {
        ApiError::Unauthorized => {
            "требуется авторизация: выполните `api-cli login ...`".to_string()
        }
        ApiError::NotFound => "ресурс не найден".to_string(),
        ApiError::Rejected { status, message } => {
            format!("сервер отклонил запрос ({status}): {message}")
        }
        ApiError::Http(err) => format!("ошибка HTTP: {err}"),
        ApiError::Decode(message) => format!("некорректный ответ сервера: {message}"),
        ApiError::Storage(message) => format!("ошибка хранилища токена: {message}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: Serialize + ?Sized>(title: &str, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{title}");
    println!("{body}");
    Ok(())
}

fn print_session(title: &str, state: &AuthState) -> Result<()> {
    println!("{title}");
    if let Some(user) = &state.user {
        println!("user:");
        println!("  id: {}", user.id);
        if let Some(email) = &user.email {
            println!("  email: {email}");
        }
        if let Some(username) = &user.username {
            println!("  username: {username}");
        }
    }
    if let Some(token) = &state.token {
        println!("token: {token}");
    }
    Ok(())
}
