use std::sync::atomic::{AtomicBool, Ordering};

use message_board::{
    auth::AppState,
    client::{ApiClient, ChargeWorkflow, ClientError, Controls},
    routes::create_router,
    store::Store,
};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = create_router(AppState::new(Store::default()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

#[derive(Default)]
struct Toggle(AtomicBool);

impl Controls for Toggle {
    fn set_enabled(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn authorize_then_me() {
    let base_url = spawn_server().await;
    let mut client = ApiClient::new(&base_url);

    let user = client.authorize("Vasya").await.unwrap();
    assert_eq!(user.name, "Vasya");
    assert_eq!(client.token(), Some(user.token.as_str()));
    assert_eq!(client.me().await.unwrap(), user);
}

#[tokio::test]
async fn errors_are_mapped_from_status() {
    let base_url = spawn_server().await;

    let anonymous = ApiClient::new(&base_url);
    assert!(matches!(
        anonymous.me().await,
        Err(ClientError::Unauthenticated)
    ));

    let mut client = ApiClient::new(&base_url);
    match client.authorize("12").await {
        Err(ClientError::Validation { field, message }) => {
            assert_eq!(field, "name");
            assert_eq!(message, "too short");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    client.authorize("Vasya").await.unwrap();
    assert!(matches!(
        client.get_message(1).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn message_crud() {
    let base_url = spawn_server().await;
    let mut vasya = ApiClient::new(&base_url);
    vasya.authorize("Vasya").await.unwrap();
    let mut petya = ApiClient::new(&base_url);
    petya.authorize("Petya").await.unwrap();

    let created = vasya.create_message(Some("S"), "T").await.unwrap();
    assert_eq!(created.author, "Vasya");
    assert_eq!(created.charge, 0);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(petya.get_message(created.id).await.unwrap(), created);

    let updated = vasya
        .update_message(created.id, None, "new text")
        .await
        .unwrap();
    assert_eq!(updated.subject, None);
    assert_eq!(updated.text, "new text");

    assert!(matches!(
        petya.update_message(created.id, None, "mine").await,
        Err(ClientError::Forbidden)
    ));
    assert!(matches!(
        petya.delete_message(created.id).await,
        Err(ClientError::Forbidden)
    ));

    vasya.delete_message(created.id).await.unwrap();
    assert!(matches!(
        vasya.get_message(created.id).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn list_is_newest_first() {
    let base_url = spawn_server().await;
    let mut client = ApiClient::new(&base_url);
    client.authorize("Vasya").await.unwrap();

    let first = client.create_message(None, "one").await.unwrap();
    let second = client.create_message(None, "two").await.unwrap();
    let third = client.create_message(None, "three").await.unwrap();

    let ids: Vec<u64> = client
        .list_messages()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn workflow_discharges_and_deletes_over_http() {
    let base_url = spawn_server().await;
    let mut client = ApiClient::new(&base_url);
    client.authorize("Vasya").await.unwrap();
    let controls = Toggle::default();

    let mut message = client.create_message(Some("S"), "T").await.unwrap();
    let workflow = ChargeWorkflow::new(&client, &controls);

    assert_eq!(workflow.set_charge(&mut message, 5).await.unwrap(), 5);
    assert_eq!(client.get_message(message.id).await.unwrap().charge, 5);
    assert!(matches!(
        client.delete_message(message.id).await,
        Err(ClientError::Locked { charge: 5 })
    ));

    assert_eq!(workflow.set_charge(&mut message, 42).await.unwrap(), 10);

    workflow.delete(&mut message).await.unwrap();
    assert_eq!(message.charge, 0);
    assert!(controls.0.load(Ordering::SeqCst));
    assert!(matches!(
        client.get_message(message.id).await,
        Err(ClientError::NotFound)
    ));
}
