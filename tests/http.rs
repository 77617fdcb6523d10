use mockito::Matcher;

use browsify::{
    Browse, CategoriesOptions, CategoryOptions, Dispatcher, Error, HttpDispatcher, Market, Pagination,
    Query, Token,
};

const CATEGORIES: &str = r#"{
    "categories": {
        "href": "https://api.spotify.com/v1/browse/categories?offset=0&limit=5",
        "items": [
            {"href": "https://api.spotify.com/v1/browse/categories/toplists", "icons": [], "id": "toplists", "name": "Top Lists"}
        ],
        "limit": 5,
        "next": null,
        "offset": 0,
        "previous": null,
        "total": 1
    }
}"#;

#[tokio::test]
async fn sends_bearer_token_and_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/browse/categories")
        .match_header("authorization", "Bearer abc")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "SE".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATEGORIES)
        .create_async()
        .await;

    let browse = Browse::new(HttpDispatcher::with_base(
        format!("{}/v1", server.url()),
        Token::bearer("abc"),
    ));
    let page = browse
        .categories(
            CategoriesOptions::default()
                .country(Market::SE)
                .page(Pagination::new(5, 0)),
        )
        .await
        .unwrap();

    assert_eq!(page.items[0].id, "toplists");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    let body = r#"{"error":{"status":401,"message":"The access token expired"}}"#;
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/browse/categories")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(body)
        .create_async()
        .await;

    let dispatcher = HttpDispatcher::with_base(format!("{}/v1/", server.url()), Token::bearer("stale"));
    let error = dispatcher
        .get_raw("browse/categories", &Query::new())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        Error::Http {
            status: 401,
            body: body.to_string()
        }
    );
    assert_eq!(error.message().as_deref(), Some("The access token expired"));
    mock.assert_async().await;
}

#[tokio::test]
async fn escaped_category_id_keeps_the_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v1/browse/categories/hip%20hop%3Fx$".into()))
        .match_query(Matcher::UrlEncoded("country".into(), "US".into()))
        .with_status(200)
        .with_body(r#"{"href":"h","icons":[],"id":"hip hop?x","name":"Hip Hop"}"#)
        .create_async()
        .await;

    let browse = Browse::new(HttpDispatcher::with_base(
        format!("{}/v1", server.url()),
        Token::bearer("abc"),
    ));
    let category = browse
        .category("hip hop?x", CategoryOptions::default().country(Market::US))
        .await
        .unwrap();

    assert_eq!(category.id, "hip hop?x");
    mock.assert_async().await;
}
