use parley_core::ServerMessage;
use parley_server::{HubError, JoinError};

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_name_conflict() {
    init_tracing();

    let hub = create_test_hub();

    let mut ali = TestClient::connect(&hub).await.expect("Failed to connect Ali");
    let mut azzo = TestClient::connect(&hub).await.expect("Failed to connect B");

    ali.join("Ali").await.expect("Ali failed to join");
    assert_eq!(
        ali.recv().await.expect("Expected peer-list"),
        ServerMessage::PeerList(vec![ali.info("Ali")])
    );

    // Same name from another session is refused and changes nothing.
    let err = azzo.join("Ali").await.unwrap_err();
    assert_eq!(err, HubError::Join(JoinError::NameTaken("Ali".to_owned())));
    assert!(matches!(
        azzo.recv().await.expect("Expected join-error"),
        ServerMessage::JoinError { .. }
    ));
    ali.expect_silence().await.expect("Ali must not hear about a rejected join");
    assert_eq!(hub.roster().await.unwrap(), vec![ali.info("Ali")]);

    // The rejected session is still connected and can retry.
    azzo.join("Azzo").await.expect("Azzo failed to join");
    assert_eq!(
        azzo.recv().await.expect("Expected peer-list"),
        ServerMessage::PeerList(vec![ali.info("Ali"), azzo.info("Azzo")])
    );
    assert_eq!(
        ali.recv().await.expect("Expected peer-joined"),
        ServerMessage::PeerJoined(azzo.info("Azzo"))
    );

    // The joiner never hears about its own join as an incremental notice.
    azzo.expect_silence().await.expect("Unexpected frame for Azzo");

    let ali_id = ali.disconnect().await.expect("Hub is down");
    assert_eq!(
        azzo.recv().await.expect("Expected peer-left"),
        ServerMessage::PeerLeft { identity: ali_id }
    );
    assert_eq!(hub.roster().await.unwrap(), vec![azzo.info("Azzo")]);
}

#[tokio::test]
async fn test_join_error_message_names_the_conflict() {
    init_tracing();

    let hub = create_test_hub();

    let _ali = TestClient::joined(&hub, "Ali").await.expect("Ali failed to join");
    let mut other = TestClient::connect(&hub).await.expect("Failed to connect");

    let _ = other.join("Ali").await;

    let ServerMessage::JoinError { message } = other.recv().await.expect("Expected join-error")
    else {
        panic!("Expected join-error");
    };
    assert!(message.contains("Ali"), "message was: {message}");
}

#[tokio::test]
async fn test_second_join_from_member_is_refused() {
    init_tracing();

    let hub = create_test_hub();

    let mut ali = TestClient::joined(&hub, "Ali").await.expect("Ali failed to join");

    let err = ali.join("Other").await.unwrap_err();
    assert_eq!(
        err,
        HubError::Join(JoinError::AlreadyJoined("Ali".to_owned()))
    );
    assert!(matches!(
        ali.recv().await.expect("Expected join-error"),
        ServerMessage::JoinError { .. }
    ));
    assert_eq!(hub.roster().await.unwrap(), vec![ali.info("Ali")]);
}
