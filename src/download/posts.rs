//! Paged posts fetching.

use tokio::time::sleep;

use crate::api::{ParentzoneApi, Post};
use crate::config::Config;
use crate::error::Error;
use crate::output::{clear_console, print_info};

/// Everything collected from the posts feed.
#[derive(Debug, Default)]
pub struct PostsFetch {
    /// Posts in request order.
    pub posts: Vec<Post>,
    /// Number of pages that came back successfully.
    pub pages: u32,
    /// Why paging stopped early, if it did. `posts` is still usable.
    pub stopped_by: Option<Error>,
}

/// Page through the posts feed until an empty page or an error.
pub async fn fetch_all_posts(api: &ParentzoneApi, config: &Config) -> PostsFetch {
    let mut fetch = PostsFetch::default();
    let mut cursor: Option<String> = None;
    let mut iteration = 1u32;

    loop {
        clear_console(config.options.clear_console);
        print_info(&format!(
            "Fetching posts, iteration {}: {} posts so far.",
            iteration,
            fetch.posts.len()
        ));

        let page = match api
            .get_posts_page(&config.api.post_type_ids, cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("Paging stopped after {} pages: {}", fetch.pages, e);
                fetch.stopped_by = Some(e);
                break;
            }
        };

        fetch.pages += 1;
        if page.posts.is_empty() {
            break;
        }

        fetch.posts.extend(page.posts);
        cursor = page.cursor.filter(|c| !c.is_empty());

        sleep(config.options.page_delay()).await;
        iteration += 1;
    }

    fetch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ItemId;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.api.base_url = server.uri();
        config.options.page_delay_ms = 0;
        config.options.clear_console = false;
        config
    }

    fn page(ids: &[u64], cursor: &str) -> ResponseTemplate {
        let posts: Vec<_> = ids.iter().map(|id| serde_json::json!({"id": id})).collect();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "posts": posts,
            "cursor": cursor
        }))
    }

    fn ids(fetch: &PostsFetch) -> Vec<ItemId> {
        fetch.posts.iter().filter_map(|p| p.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param_is_missing("cursor"))
            .respond_with(page(&[1, 2], "c1"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param("cursor", "c1"))
            .respond_with(page(&[3], "c2"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param("cursor", "c2"))
            .respond_with(page(&[], ""))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let fetch = fetch_all_posts(&api, &config).await;

        assert!(fetch.stopped_by.is_none());
        assert_eq!(fetch.pages, 3);
        assert_eq!(
            ids(&fetch),
            vec![ItemId::Number(1), ItemId::Number(2), ItemId::Number(3)]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_returns_partial() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param_is_missing("cursor"))
            .respond_with(page(&[1], "c1"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param("cursor", "c1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let fetch = fetch_all_posts(&api, &config).await;

        assert_eq!(ids(&fetch), vec![ItemId::Number(1)]);
        assert!(matches!(fetch.stopped_by, Some(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn test_first_page_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let fetch = fetch_all_posts(&api, &config).await;

        assert!(fetch.posts.is_empty());
        assert_eq!(fetch.pages, 0);
        assert!(matches!(fetch.stopped_by, Some(Error::Api(_))));
    }

    #[tokio::test]
    async fn test_unparseable_page_returns_partial() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param_is_missing("cursor"))
            .respond_with(page(&[1], "c1"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param("cursor", "c1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("{}é not json", "a".repeat(499))),
            )
            .mount(&server)
            .await;

        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let fetch = fetch_all_posts(&api, &config).await;

        assert_eq!(ids(&fetch), vec![ItemId::Number(1)]);
        assert!(matches!(fetch.stopped_by, Some(Error::Api(_))));
    }
}
