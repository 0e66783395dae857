use parley_core::ServerMessage;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_disconnect_triggers_peer_left() {
    init_tracing();

    let hub = create_test_hub();

    let ali = TestClient::joined(&hub, "Ali").await.expect("Ali failed to join");
    let mut azzo = TestClient::joined(&hub, "Azzo").await.expect("Azzo failed to join");
    let azzo_info = azzo.info("Azzo");

    let ali_id = ali.disconnect().await.expect("Hub is down");

    let msg = azzo.recv().await.expect("Expected peer-left");
    assert_eq!(msg, ServerMessage::PeerLeft { identity: ali_id });

    let roster = hub.roster().await.expect("Hub is down");
    assert_eq!(roster, vec![azzo_info]);
}

#[tokio::test]
async fn test_repeated_leave_is_a_no_op() {
    init_tracing();

    let hub = create_test_hub();

    let ali = TestClient::joined(&hub, "Ali").await.expect("Ali failed to join");
    let mut azzo = TestClient::joined(&hub, "Azzo").await.expect("Azzo failed to join");

    let ali_id = ali.disconnect().await.expect("Hub is down");
    assert!(matches!(
        azzo.recv().await.expect("Expected peer-left"),
        ServerMessage::PeerLeft { .. }
    ));

    hub.leave(ali_id).await.expect("Hub is down");

    azzo.expect_silence().await.expect("Second leave must not notify");
    assert_eq!(hub.stats().await.expect("Hub is down").sessions, 1);
}
