use autorest_date_test_service::core::retry::RetryPolicy;
use autorest_date_test_service::{
    AutoRestDateTestService, AutoRestDateTestServiceConfiguration, ClientError,
};
use chrono::NaiveDate;
use httpmock::prelude::*;

fn service_for(server: &MockServer) -> AutoRestDateTestService {
    let config = AutoRestDateTestServiceConfiguration::new(server.base_url())
        .with_retry_policy(RetryPolicy::default().with_backoff_factor(0.0));
    AutoRestDateTestService::new(config).unwrap()
}

fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
}

fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap()
}

#[tokio::test]
async fn test_get_null() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/null").header("accept", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("null");
    });

    let result = service_for(&server).date_model.get_null().await.unwrap();

    api_mock.assert();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_get_invalid_date_is_deserialization_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/invaliddate");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("\"201O-18-90\"");
    });

    let err = service_for(&server)
        .date_model
        .get_invalid_date()
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, ClientError::Deserialization(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_get_overflow_date_is_deserialization_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/overflowdate");
        then.status(200).body("\"10000000000-12-31\"");
    });

    let err = service_for(&server)
        .date_model
        .get_overflow_date()
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, ClientError::Deserialization(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_get_underflow_date_is_deserialization_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/underflowdate");
        then.status(200).body("\"0000-00-00\"");
    });

    let err = service_for(&server)
        .date_model
        .get_underflow_date()
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, ClientError::Deserialization(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_put_and_get_max_date() {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/date/max")
            .header("content-type", "application/json; charset=utf-8")
            .body("\"9999-12-31\"");
        then.status(200);
    });
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/date/max");
        then.status(200).body("\"9999-12-31\"");
    });

    let service = service_for(&server);
    service.date_model.put_max_date(max_date()).await.unwrap();
    let fetched = service.date_model.get_max_date().await.unwrap();

    put_mock.assert();
    get_mock.assert();
    assert_eq!(fetched, Some(max_date()));
}

#[tokio::test]
async fn test_put_and_get_min_date() {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT).path("/date/min").body("\"0001-01-01\"");
        then.status(200);
    });
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/date/min");
        then.status(200).body("\"0001-01-01\"");
    });

    let service = service_for(&server);
    service.date_model.put_min_date(min_date()).await.unwrap();
    let fetched = service.date_model.get_min_date().await.unwrap();

    put_mock.assert();
    get_mock.assert();
    assert_eq!(fetched, Some(min_date()));
}

#[tokio::test]
async fn test_put_out_of_range_date_sends_nothing() {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT).path("/date/max");
        then.status(200);
    });

    let too_far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
    let err = service_for(&server)
        .date_model
        .put_max_date(too_far)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Serialization(_)), "got {:?}", err);
    assert_eq!(put_mock.hits(), 0);
}

#[tokio::test]
async fn test_error_status_is_http_operation_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(PUT).path("/date/max");
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"status": 400, "message": "expected 9999-12-31"}));
    });

    let err = service_for(&server)
        .date_model
        .put_max_date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
        .await
        .unwrap_err();

    api_mock.assert();
    match err {
        ClientError::HttpOperation(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.message, "expected 9999-12-31");
            assert_eq!(e.error.unwrap().status, Some(400));
        }
        other => panic!("expected HttpOperationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_success_status_is_rejected() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/min");
        then.status(204);
    });

    let err = service_for(&server).date_model.get_min_date().await.unwrap_err();

    api_mock.assert();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_retries_exhausted_surface_last_status() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/date/null");
        then.status(500).body("upstream exploded");
    });

    let config = AutoRestDateTestServiceConfiguration::new(server.base_url()).with_retry_policy(
        RetryPolicy::default()
            .with_max_retries(2)
            .with_backoff_factor(0.0),
    );
    let service = AutoRestDateTestService::new(config).unwrap();

    let err = service.date_model.get_null().await.unwrap_err();

    api_mock.assert_hits(3);
    match err {
        ClientError::HttpOperation(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.body, "upstream exploded");
            assert_eq!(
                e.message,
                "Operation returned an invalid status code 'Internal Server Error'"
            );
        }
        other => panic!("expected HttpOperationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/date/max");
        then.status(200).body("\"9999-12-31\"");
    });

    let config = AutoRestDateTestServiceConfiguration::new(server.url("/api/v1/"));
    let service = AutoRestDateTestService::new(config).unwrap();

    let fetched = service.date_model.get_max_date().await.unwrap();

    api_mock.assert();
    assert_eq!(fetched, Some(max_date()));
}
