//! Search and saved-article handlers.

use shelf_core::{ApiClient, ArticleId};

use crate::common::RequestId;
use crate::events::{ApiEvent, UiEvent};

pub async fn search(client: ApiClient, req: RequestId, query: String) -> UiEvent {
    let result = client.search(&query).await;
    UiEvent::Api(ApiEvent::SearchFinished { req, result })
}

pub async fn save_article(client: ApiClient, title: String, url: String) -> UiEvent {
    let result = client.save_article(&title, &url).await;
    UiEvent::Api(ApiEvent::ArticleSaved { title, result })
}

pub async fn list_articles(client: ApiClient, req: RequestId) -> UiEvent {
    let result = client.list_articles().await;
    UiEvent::Api(ApiEvent::SavedLoaded { req, result })
}

pub async fn generate_tags(client: ApiClient, id: ArticleId) -> UiEvent {
    let result = client.generate_tags(&id).await;
    UiEvent::Api(ApiEvent::TagsGenerated { id, result })
}

pub async fn replace_tags(client: ApiClient, id: ArticleId, names: Vec<String>) -> UiEvent {
    let result = client.replace_tags(&id, &names).await;
    UiEvent::Api(ApiEvent::TagsReplaced { id, result })
}

pub async fn delete_article(client: ApiClient, id: ArticleId) -> UiEvent {
    let result = client.delete_article(&id).await;
    UiEvent::Api(ApiEvent::ArticleDeleted { id, result })
}

#[cfg(test)]
mod tests {
    use shelf_core::api::ApiErrorKind;

    use super::*;
    use crate::common::LatestOnly;

    #[tokio::test]
    async fn test_unreachable_backend_yields_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9")
            .unwrap()
            .with_token(Some("t".to_string()));
        let req = LatestOnly::default().begin();
        let event = list_articles(client, req).await;
        match event {
            UiEvent::Api(ApiEvent::SavedLoaded { result: Err(err), .. }) => {
                assert_eq!(err.kind, ApiErrorKind::Transport);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
