use parley_core::ServerMessage;
use serde_json::json;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestClient;

const CANDIDATES: usize = 50;

#[tokio::test]
async fn test_signal_ordering() {
    init_tracing();

    let hub = create_test_hub();

    let ali = TestClient::joined(&hub, "Ali").await.expect("Ali failed to join");
    let mut bo = TestClient::joined(&hub, "Bo").await.expect("Bo failed to join");

    ali.signal(bo.identity, json!({ "type": "offer", "sdp": "v=0" }))
        .await
        .expect("Hub is down");
    for index in 0..CANDIDATES {
        ali.signal(
            bo.identity,
            json!({ "candidate": { "candidate": format!("candidate:{index}"), "sdpMLineIndex": 0 } }),
        )
        .await
        .expect("Hub is down");
    }

    let ServerMessage::Signal { data, .. } = bo.recv().await.expect("Expected offer") else {
        panic!("Expected signal");
    };
    assert_eq!(data.0["type"], "offer");

    for index in 0..CANDIDATES {
        let ServerMessage::Signal { from, data } = bo.recv().await.expect("Expected candidate")
        else {
            panic!("Expected signal");
        };
        assert_eq!(from, ali.identity);
        assert_eq!(
            data.0["candidate"]["candidate"],
            format!("candidate:{index}"),
            "Candidates must arrive in send order"
        );
    }
}
