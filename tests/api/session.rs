use std::time::Duration;

use tokio::time;

use crate::helpers::test_app::{TestApp, DEFAULT_ROUND_DURATION_SECONDS};
use crate::helpers::test_player::TestPlayer;

async fn connect_new_player(app: &TestApp) -> TestPlayer {
    let session_id = app.create_session().await;
    let mut player = app.connect_player(&session_id).await;

    let state = player.receive_round_state().await.unwrap();
    assert_eq!(state.state, "Idle");
    player
}

#[tokio::test]
async fn create_session_works() {
    let app = TestApp::spawn_app().await;

    let session_id = app.create_session().await;

    assert_eq!(session_id.len(), 5);
}

#[tokio::test]
async fn connected_player_receives_the_idle_round() {
    let app = TestApp::spawn_app().await;
    let session_id = app.create_session().await;

    let mut player = app.connect_player(&session_id).await;

    let state = player.receive_round_state().await.unwrap();
    assert_eq!(state.state, "Idle");
    assert_eq!(state.score, 0);
    assert_eq!(state.remaining_seconds, DEFAULT_ROUND_DURATION_SECONDS);
    assert_eq!(state.term, "apple");
    assert_eq!(state.translation, "りんご");
    assert_eq!(state.input, "");
    assert!(!state.is_missed);
    assert_eq!(state.rank_message, None);
}

#[tokio::test]
async fn connecting_to_a_non_existing_session_fails() {
    let app = TestApp::spawn_app().await;

    let mut player = app.connect_player("nope1").await;

    assert_eq!(
        player.receive_round_state().await.unwrap_err(),
        "SESSION_DOES_NOT_EXIST"
    );
}

#[tokio::test]
async fn second_player_cannot_connect_to_the_same_session() {
    let app = TestApp::spawn_app().await;
    let session_id = app.create_session().await;
    let mut player = app.connect_player(&session_id).await;
    let _ = player.receive_round_state().await.unwrap();

    let mut intruder = app.connect_player(&session_id).await;

    assert_eq!(
        intruder.receive_round_state().await.unwrap_err(),
        "PLAYER_ALREADY_CONNECTED"
    );
}

#[tokio::test]
async fn player_can_reconnect_after_closing_the_connection() {
    let app = TestApp::spawn_app().await;
    let session_id = app.create_session().await;
    let mut player = app.connect_player(&session_id).await;
    let _ = player.receive_round_state().await.unwrap();
    let _ = player.type_text("り").await;
    player.close().await;

    // The disconnection reaches the session asynchronously
    for _ in 0..20 {
        let mut player = app.connect_player(&session_id).await;
        match player.receive_round_state().await {
            Ok(state) => {
                assert_eq!(state.state, "Running");
                assert_eq!(state.input, "り");
                return;
            }
            Err(error) => assert_eq!(error, "PLAYER_ALREADY_CONNECTED"),
        }
        time::sleep(Duration::from_millis(50)).await;
    }
    panic!("The player could not reconnect.");
}

#[tokio::test]
async fn typing_the_translation_scores_and_draws_a_new_word() {
    let app = TestApp::spawn_app().await;
    let mut player = connect_new_player(&app).await;

    let state = player.type_text("り").await;
    assert_eq!(state.state, "Running");
    assert!(!state.is_missed);
    assert_eq!(state.score, 0);

    let state = player.type_text("りん").await;
    assert!(!state.is_missed);
    assert_eq!(state.score, 0);

    player.send_input("りんご").await;
    let state = player.receive_round_state_where(|state| state.score == 1).await;
    assert_eq!(state.input, "");
    assert!(!state.is_missed);
    assert_eq!(state.term, "apple");
}

#[tokio::test]
async fn input_without_common_prefix_is_flagged_as_a_miss() {
    let app = TestApp::spawn_app().await;
    let mut player = connect_new_player(&app).await;

    let state = player.type_text("x").await;
    assert!(state.is_missed);

    let state = player.type_text("").await;
    assert!(!state.is_missed);
    assert_eq!(state.state, "Running");
}

#[tokio::test]
async fn round_ends_when_the_countdown_reaches_zero_and_can_be_reset() {
    let app = TestApp::spawn_app_with_round_duration(2).await;
    let mut player = connect_new_player(&app).await;
    player.send_input("りんご").await;

    let state = player
        .receive_round_state_where(|state| state.state == "Ended")
        .await;
    assert_eq!(state.remaining_seconds, 0);
    assert_eq!(state.score, 1);
    assert_eq!(
        state.rank_message.as_deref(),
        Some("Thanks for playing! Try again and beat your score!")
    );

    let state = player.request_reset().await;
    assert_eq!(state.remaining_seconds, 2);
    assert_eq!(state.score, 0);
    assert_eq!(state.input, "");
    assert!(!state.is_missed);
    assert_eq!(state.rank_message, None);
}

#[tokio::test]
async fn unprocessable_message_does_not_close_the_connection() {
    let app = TestApp::spawn_app().await;
    let mut player = connect_new_player(&app).await;

    player.send_raw_text(r#"{"type":"pause"}"#).await;
    assert_eq!(
        player.receive_round_state().await.unwrap_err(),
        "UNPROCESSABLE_MESSAGE"
    );

    let state = player.type_text("り").await;
    assert_eq!(state.state, "Running");
}
