use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes;
use crate::session_registry::actor::SessionRegistryActor;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn create_web_server(config: Config, listener: TcpListener) -> std::io::Result<()> {
    let catalog = Catalog::load_or_built_in(&config.game.words_file_path);
    let registry = Arc::new(SessionRegistryActor::spawn(config.game.clone(), catalog));

    let router = routes::create_router(&config).with_state(registry);

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
