use tokio::net::TcpListener;

use wordrush::config::Config;
use wordrush::{metrics, startup};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    std_logger::Config::logfmt().init();
    metrics::register_metrics();

    let config = Config::get()?;
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address).await?;

    startup::create_web_server(config, listener).await?;
    Ok(())
}
