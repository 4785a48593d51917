use raspberry_awards::{FetchError, MovieQuery, MovieService, MovieSource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_server() -> (MockServer, MovieService) {
    let server = MockServer::start().await;
    let service = MovieService::new(format!("{}/api/movies", server.uri()));
    (server, service)
}

fn page_body() -> serde_json::Value {
    json!({
        "content": [
            {"id": 1, "year": 1980, "title": "Can't Stop the Music",
             "studios": ["Associated Film Distribution"],
             "producers": ["Allan Carr"], "winner": true},
            {"id": 2, "year": 1980, "title": "Cruising",
             "studios": ["Lorimar Productions", "United Artists"],
             "producers": ["Jerry Weintraub"], "winner": false}
        ],
        "pageable": {"pageNumber": 0, "pageSize": 15},
        "totalPages": 14,
        "totalElements": 206,
        "first": true,
        "last": false,
        "number": 0,
        "size": 15
    })
}

/// Raw query string of every request the server has seen
async fn received_queries(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.query().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn fetch_movies_should_send_only_page_and_size_without_filters() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = service.fetch_movies(MovieQuery::new(0, 15)).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages, 14);
    assert_eq!(page.total_elements, 206);
    assert_eq!(received_queries(&server).await, vec!["page=0&size=15"]);
}

#[tokio::test]
async fn fetch_movies_should_append_year_and_winner_when_set() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(query_param("year", "1986"))
        .and(query_param("winner", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let query = MovieQuery::new(2, 10)
        .with_year(Some(1986))
        .with_winner(Some(true));
    service.fetch_movies(query).await.unwrap();

    assert_eq!(
        received_queries(&server).await,
        vec!["page=2&size=10&year=1986&winner=true"]
    );
}

#[tokio::test]
async fn fetch_movies_should_send_winner_false_without_year() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
        .mount(&server)
        .await;

    let query = MovieQuery::new(0, 15).with_winner(Some(false));
    service.fetch_movies(query).await.unwrap();

    assert_eq!(
        received_queries(&server).await,
        vec!["page=0&size=15&winner=false"]
    );
}

#[tokio::test]
async fn fetch_movies_should_treat_null_content_as_empty() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": null,
            "totalPages": 0,
            "totalElements": 0
        })))
        .mount(&server)
        .await;

    let page = service.fetch_movies(MovieQuery::default()).await.unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn fetch_winners_by_year_should_use_fixed_page_and_return_array_as_is() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(query_param("winner", "true"))
        .and(query_param("year", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 101, "year": 2000, "title": "Battlefield Earth"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let winners = service.fetch_winners_by_year(2000).await.unwrap();

    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].title, "Battlefield Earth");
    assert_eq!(
        received_queries(&server).await,
        vec!["page=9&size=99&winner=true&year=2000"]
    );
}

#[tokio::test]
async fn dashboard_endpoints_should_hit_their_paths_without_query() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/yearsWithMultipleWinners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "years": [{"year": 1986, "winnerCount": 2}, {"year": 1990, "winnerCount": 2}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movies/studiosWithWinCount"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "studios": [
                {"name": "Columbia Pictures", "winCount": 7},
                {"name": "Paramount Pictures", "winCount": 6}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movies/maxMinWinIntervalForProducers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "min": [{"producer": "Joel Silver", "interval": 1,
                     "previousWin": 1990, "followingWin": 1991}],
            "max": [{"producer": "Matthew Vaughn", "interval": 13,
                     "previousWin": 2002, "followingWin": 2015}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let years = service.fetch_years_with_multiple_winners().await.unwrap();
    let studios = service.fetch_studio_win_counts().await.unwrap();
    let intervals = service.fetch_producer_intervals().await.unwrap();

    assert_eq!(years.years.len(), 2);
    assert_eq!(years.years[0].winner_count, 2);
    assert_eq!(studios.studios[0].name, "Columbia Pictures");
    assert_eq!(intervals.min[0].producer, "Joel Silver");
    assert_eq!(intervals.max[0].interval, 13);
    assert!(received_queries(&server).await.iter().all(String::is_empty));
}

#[tokio::test]
async fn server_error_should_become_status_error() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/studiosWithWinCount"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = service.fetch_studio_win_counts().await.unwrap_err();

    match error {
        FetchError::Status { status, ref url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/movies/studiosWithWinCount"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_should_become_decode_error() {
    let (server, service) = start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = service.fetch_movies(MovieQuery::default()).await.unwrap_err();

    assert!(matches!(error, FetchError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_should_become_transport_error() {
    let server = MockServer::start().await;
    let base_url = format!("{}/api/movies", server.uri());
    drop(server);
    let service = MovieService::new(base_url);

    let error = service
        .fetch_years_with_multiple_winners()
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Transport { .. }));
}
