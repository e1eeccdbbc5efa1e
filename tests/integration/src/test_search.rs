//! Search integration tests.

#[cfg(test)]
mod tests {
    use opensearch_auth::ParameterMap;
    use opensearch_client::{ClientConfig, ClientError, SearchClient, SearchRequest, SortField};

    use crate::{search_client, test_config};

    #[tokio::test]
    #[ignore = "requires running service"]
    async fn test_should_search_with_valid_signature() {
        let client = search_client();
        let request = SearchRequest::builder().query("default:'test'").hits(5).build();

        let response = client.search(&request).await.expect("search should succeed");

        assert!(response.is_ok(), "service reported errors: {:?}", response.errors);
        assert!(response.result.num <= 5);
    }

    #[tokio::test]
    #[ignore = "requires running service"]
    async fn test_should_page_and_sort() {
        let client = search_client();
        let request = SearchRequest::builder()
            .query("default:'test'")
            .start(5)
            .hits(5)
            .sort_fields(vec![SortField::desc("RANK")])
            .build();

        let response = client.search(&request).await.expect("search should succeed");

        assert!(response.is_ok(), "service reported errors: {:?}", response.errors);
    }

    #[tokio::test]
    #[ignore = "requires running service"]
    async fn test_should_send_raw_parameter_map() {
        let client = search_client();
        let mut params = ParameterMap::new();
        params.insert(
            "query".to_owned(),
            "config=start:0,hit:1,format:fulljson&&query=default:'test'".to_owned(),
        );

        let response = client.search(&params).await.expect("search should succeed");

        assert!(response.is_ok(), "service reported errors: {:?}", response.errors);
    }

    #[tokio::test]
    #[ignore = "requires running service"]
    async fn test_should_reject_wrong_secret() {
        let config = ClientConfig {
            access_key_secret: "definitely-wrong".to_owned(),
            ..test_config()
        };
        let client = SearchClient::new(&config).expect("client should build");
        let request = SearchRequest::builder().query("default:'test'").build();

        let result = client.search(&request).await;

        match result {
            Err(ClientError::Status(status)) => assert!(status.is_client_error()),
            Ok(response) => assert!(!response.is_ok()),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
