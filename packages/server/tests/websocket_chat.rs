//! WebSocket integration tests.
//!
//! Connect, broadcast and disconnect behaviour over a real socket.

mod fixtures;

use std::time::Duration;

use fixtures::{TestServer, assert_no_event, next_event, send_event, send_raw};
use hiroba_server::{
    domain::DISPLAY_NAMES,
    infrastructure::dto::websocket::{
        ClientEvent, PartialUser, ReceiveMessagePayload, SendMessagePayload, ServerEvent,
    },
};

const SENT_AT: &str = "2024-05-01T12:34:56.789Z";

fn send_message(content: &str, claimed_id: &str) -> ClientEvent {
    ClientEvent::SendMessage(SendMessagePayload {
        content: content.to_string(),
        timestamp: SENT_AT.to_string(),
        user: Some(PartialUser {
            id: Some(claimed_id.to_string()),
        }),
        extra: Default::default(),
    })
}

async fn next_message(ws: &mut fixtures::WsClient) -> ReceiveMessagePayload {
    match next_event(ws).await {
        ServerEvent::ReceiveMessage(payload) => payload,
        other => panic!("expected receive_message, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_assigns_distinct_ids() {
    // テスト項目: 接続ごとに異なる ID が connect イベントで通知される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (_ws1, id1) = server.connect().await;
    let (_ws2, id2) = server.connect().await;

    // then (期待する結果):
    assert!(!id1.is_empty());
    assert_ne!(id1, id2);
    assert_eq!(server.presence_count().await, 2);
}

#[tokio::test]
async fn test_message_is_broadcast_to_everyone_including_sender() {
    // テスト項目: メッセージは送信者を含む全員に、送信者のプロフィール付きで届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws_x, id_x) = server.connect().await;
    let (mut ws_y, _) = server.connect().await;
    let (mut ws_z, _) = server.connect().await;

    // when (操作):
    send_event(&mut ws_x, &send_message("hi", &id_x)).await;

    // then (期待する結果):
    let mut names = Vec::new();
    for ws in [&mut ws_x, &mut ws_y, &mut ws_z] {
        let payload = next_message(ws).await;
        assert_eq!(payload.content, "hi");
        assert_eq!(payload.timestamp, SENT_AT);
        assert_eq!(payload.user.id, id_x);
        assert_eq!(
            payload.user.avatar,
            format!("https://robohash.org/{id_x}?set=set4")
        );
        assert!(DISPLAY_NAMES.contains(&payload.user.name.as_str()));
        names.push(payload.user.name);
    }
    // 全員が同じプロフィールを受け取る
    assert!(names.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_client_supplied_user_is_ignored() {
    // テスト項目: クライアントが別人の ID を名乗っても、レジストリのプロフィールが使われる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws_a, id_a) = server.connect().await;
    let (mut ws_b, id_b) = server.connect().await;

    // when (操作): A が B を名乗って送信
    send_event(&mut ws_a, &send_message("spoof", &id_b)).await;

    // then (期待する結果):
    assert_eq!(next_message(&mut ws_a).await.user.id, id_a);
    assert_eq!(next_message(&mut ws_b).await.user.id, id_a);
}

#[tokio::test]
async fn test_disconnect_removes_presence() {
    // テスト項目: 切断した接続はレジストリから削除され、以降のメッセージは届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws_a, id_a) = server.connect().await;
    let (mut ws_b, _) = server.connect().await;
    server.wait_for_presence_count(2).await;

    // when (操作):
    ws_b.close(None).await.expect("Failed to close");
    server.wait_for_presence_count(1).await;
    send_event(&mut ws_a, &send_message("bye", &id_a)).await;

    // then (期待する結果):
    assert_eq!(next_message(&mut ws_a).await.content, "bye");
}

#[tokio::test]
async fn test_reconnect_gets_new_identity() {
    // テスト項目: 再接続すると新しい ID と新しいプロフィールが割り当てられる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws, old_id) = server.connect().await;
    ws.close(None).await.expect("Failed to close");
    server.wait_for_presence_count(0).await;

    // when (操作):
    let (mut ws, new_id) = server.connect().await;
    send_event(&mut ws, &send_message("back", &old_id)).await;

    // then (期待する結果):
    assert_ne!(old_id, new_id);
    let payload = next_message(&mut ws).await;
    assert_eq!(payload.user.id, new_id);
    assert_eq!(
        payload.user.avatar,
        format!("https://robohash.org/{new_id}?set=set4")
    );
}

#[tokio::test]
async fn test_malformed_frames_are_dropped() {
    // テスト項目: 不正なフレームは配信されず、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws_a, id_a) = server.connect().await;
    let (mut ws_b, _) = server.connect().await;

    // when (操作):
    send_raw(&mut ws_a, "not json").await;
    send_raw(&mut ws_a, r#"{"event":"send_message","data":{"content":"no time"}}"#).await;
    send_raw(
        &mut ws_a,
        r#"{"event":"send_message","data":{"content":"bad","timestamp":"soon"}}"#,
    )
    .await;

    // then (期待する結果):
    assert_no_event(&mut ws_b, Duration::from_millis(200)).await;

    send_event(&mut ws_a, &send_message("valid", &id_a)).await;
    assert_eq!(next_message(&mut ws_b).await.content, "valid");
    assert_eq!(next_message(&mut ws_a).await.content, "valid");
}
