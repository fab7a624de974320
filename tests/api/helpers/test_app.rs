use std::net::SocketAddr;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tokio::net::TcpListener;
use wordrush::config::Config;

use super::test_player::TestPlayer;

// Set TEST_LOG to see the server logs while running the tests
static LOGGER: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        std_logger::Config::logfmt().init();
    }
});

pub const WORDS_FILE_PATH: &str = "tests/fixtures/single_word.tsv";
pub const DEFAULT_ROUND_DURATION_SECONDS: u8 = 60;

pub struct TestApp {
    pub base_address: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with_round_duration(DEFAULT_ROUND_DURATION_SECONDS).await
    }

    pub async fn spawn_app_with_round_duration(round_duration_seconds: u8) -> TestApp {
        Lazy::force(&LOGGER);

        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to random port.");
        let address = listener.local_addr().unwrap();
        std::env::set_var("ENVIRONMENT", "dev");
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game.round_duration_seconds = round_duration_seconds;
            config.game.inactivity_timeout_seconds = 2;
            config.game.words_file_path = WORDS_FILE_PATH.to_string();
            config
        };

        let _ = tokio::spawn(wordrush::startup::create_web_server(config, listener));

        TestApp {
            base_address: format!("localhost:{}", address.port()),
        }
    }

    pub async fn create_session(&self) -> String {
        let response = reqwest::Client::new()
            .post(format!("http://{}/session", self.base_address))
            .send()
            .await
            .expect("Failed to execute CreateSession request.");
        assert!(response.status().is_success());

        let session_created_response: SessionCreatedResponse = response
            .json()
            .await
            .expect("Failed to parse SessionCreatedResponse.");
        assert!(!session_created_response.id.is_empty());

        session_created_response.id
    }

    pub async fn connect_player(&self, session_id: &str) -> TestPlayer {
        let (websocket, _) = tokio_tungstenite::connect_async(format!(
            "ws://{}/session/{session_id}/ws",
            self.base_address
        ))
        .await
        .expect("WebSocket could not be created.");

        TestPlayer::new(websocket)
    }
}

#[derive(Deserialize)]
struct SessionCreatedResponse {
    id: String,
}
