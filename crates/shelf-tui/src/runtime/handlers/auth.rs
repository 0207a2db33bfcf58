//! Account handlers: login and registration.

use shelf_core::ApiClient;

use crate::events::{ApiEvent, UiEvent};

pub async fn login(client: ApiClient, username: String, password: String) -> UiEvent {
    let result = client.login(&username, &password).await;
    UiEvent::Api(ApiEvent::LoginFinished { result })
}

pub async fn register(client: ApiClient, username: String, password: String) -> UiEvent {
    let result = client.register(&username, &password).await;
    UiEvent::Api(ApiEvent::RegisterFinished { result })
}
