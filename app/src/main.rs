//! Essential Todos binary
//!
//! Mounts the todo list view against the configured API, prints the list,
//! toggles the first todo and prints the list again.

use anyhow::Context as _;
use essential_todos::{create_store, selectors, Config, HttpTodosApi, Services, TodoListView, TracingLogger};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| "essential_todos=info,essential_todos_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(api_url = %config.api_url, "Starting Essential Todos");

    let services = Services::new(Arc::new(HttpTodosApi::new(&config.api_url)), Arc::new(TracingLogger));
    let store = create_store(services);

    // Re-render on every state change
    let mut changes = store.subscribe();
    let watcher = store.clone();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let screen = TodoListView::current(&watcher).await;
            tracing::debug!(revision = *changes.borrow(), ?screen, "State changed");
        }
    });

    let mut view = TodoListView::new();
    println!("{}", TodoListView::current(&store).await);

    if let Some(mut handle) = view.mount(&store).await? {
        handle
            .wait_with_timeout(config.load_timeout())
            .await
            .with_context(|| format!("todos did not load within {}s", config.load_timeout))?;
    }
    println!("{}", TodoListView::current(&store).await);

    let first = store.state(|s| selectors::get_todos(s).first().cloned()).await;
    if let Some(todo) = first {
        println!(">>> Clicking \"{}\"\n", todo.title);
        view.click(&store, &todo.id).await?;
        println!("{}", TodoListView::current(&store).await);
    }

    Ok(())
}
