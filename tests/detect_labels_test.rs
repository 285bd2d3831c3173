use anyhow::Result;
use base64::Engine;
use httpmock::prelude::*;
use seefood::domain::ports::LabelDetector;
use seefood::{GoogleVisionClient, ImageSource, SeeFoodError, Settings};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

const ACCESS_TOKEN: &str = "ya29.test-token";

fn settings(server: &MockServer, credentials_dir: &Path) -> Settings {
    Settings {
        credentials_dir: credentials_dir.to_path_buf(),
        vision_endpoint: server.base_url(),
        ..Settings::default()
    }
}

fn write_authorized_user(dir: &Path, server: &MockServer) {
    let creds = json!({
        "type": "authorized_user",
        "client_id": "client-123.apps.googleusercontent.com",
        "client_secret": "shh",
        "refresh_token": "1//refresh",
        "token_uri": server.url("/token"),
    });
    std::fs::write(dir.join("credentials.json"), creds.to_string()).unwrap();
}

fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/token")
            .body_contains("grant_type=refresh_token")
            .body_contains("refresh_token=1%2F%2Frefresh");
        then.status(200).json_body(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }));
    })
}

fn write_image(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("lunch.jpg");
    std::fs::write(&path, b"fake jpeg bytes").unwrap();
    path
}

#[tokio::test]
async fn test_detect_labels_from_local_file() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);
    let image = write_image(creds_dir.path());

    let token_mock = mock_token(&server);
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"fake jpeg bytes");
    let annotate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/images:annotate")
            .header("authorization", format!("Bearer {}", ACCESS_TOKEN))
            .body_contains("LABEL_DETECTION")
            .body_contains(encoded.as_str());
        then.status(200).json_body(json!({
            "responses": [{
                "labelAnnotations": [
                    {"mid": "/m/02wbm", "description": "Food", "score": 0.9},
                    {"mid": "/m/01b9xk", "description": "Hot dog", "score": 0.95},
                    {"mid": "/m/01j3zr", "description": "Bun", "score": 0.7}
                ]
            }]
        }));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let labels = client.detect(&ImageSource::Local(image)).await?;

    token_mock.assert();
    annotate_mock.assert();

    let descriptions: Vec<&str> = labels.iter().map(|l| l.description()).collect();
    assert_eq!(descriptions, vec!["Food", "Hot dog", "Bun"]);
    assert_eq!(labels[1].score(), 0.95);
    Ok(())
}

#[tokio::test]
async fn test_detect_with_service_account() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;

    let mut key: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/service_account.json"))?;
    key["token_uri"] = json!(server.url("/token"));
    std::fs::write(creds_dir.path().join("key.json"), key.to_string())?;

    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/token")
            .body_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer")
            .body_contains("assertion=");
        then.status(200).json_body(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }));
    });
    let annotate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/images:annotate")
            .header("authorization", format!("Bearer {}", ACCESS_TOKEN));
        then.status(200).json_body(json!({
            "responses": [{
                "labelAnnotations": [{"description": "Sausage", "score": 0.8}]
            }]
        }));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let labels = client.detect_image(b"bytes").await?;

    token_mock.assert();
    annotate_mock.assert();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].description(), "Sausage");
    Ok(())
}

#[tokio::test]
async fn test_per_image_error_returns_empty_list() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);
    mock_token(&server);

    let annotate_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(200).json_body(json!({
            "responses": [{
                "error": {"code": 3, "message": "Bad image data."}
            }]
        }));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let labels = client.detect_image(b"not an image").await?;

    annotate_mock.assert();
    assert!(labels.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_service_error_propagates() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);
    mock_token(&server);

    server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(403).json_body(json!({
            "error": {
                "code": 403,
                "message": "Cloud Vision API has not been used in project 42",
                "status": "PERMISSION_DENIED"
            }
        }));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let err = client.detect_image(b"bytes").await.unwrap_err();

    match err {
        SeeFoodError::ServiceError { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Cloud Vision API has not been used in project 42");
        }
        other => panic!("expected ServiceError, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_token_failure_is_auth_error() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);

    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(400)
            .json_body(json!({"error": "invalid_grant", "error_description": "Bad Request"}));
    });
    let annotate_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(200).json_body(json!({"responses": []}));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let err = client.detect_image(b"bytes").await.unwrap_err();

    assert!(matches!(err, SeeFoodError::AuthError { .. }));
    annotate_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_token_body_stops_before_annotate() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);

    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"access_token\":");
    });
    let annotate_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(200).json_body(json!({"responses": []}));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let err = client.detect_image(b"bytes").await.unwrap_err();

    assert!(matches!(err, SeeFoodError::HttpError(_)));
    annotate_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_is_not_found() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    std::fs::write(creds_dir.path().join("README.md"), "no keys here")?;

    let annotate_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/images:annotate");
        then.status(200).json_body(json!({"responses": []}));
    });

    let client = GoogleVisionClient::new(&settings(&server, creds_dir.path()));
    let err = client.detect_image(b"bytes").await.unwrap_err();

    assert!(matches!(err, SeeFoodError::CredentialsNotFound { .. }));
    annotate_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_detect_remote_image_with_max_results() -> Result<()> {
    let server = MockServer::start();
    let creds_dir = TempDir::new()?;
    write_authorized_user(creds_dir.path(), &server);
    mock_token(&server);

    let image_mock = server.mock(|when, then| {
        when.method(GET).path("/images/dog.jpg");
        then.status(200).body("remote jpeg bytes");
    });
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"remote jpeg bytes");
    let annotate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/images:annotate")
            .body_contains(encoded.as_str())
            .body_contains("\"maxResults\":5");
        then.status(200).json_body(json!({
            "responses": [{"labelAnnotations": [{"description": "Dog", "score": 0.99}]}]
        }));
    });

    let config = Settings {
        max_results: Some(5),
        ..settings(&server, creds_dir.path())
    };
    let client = GoogleVisionClient::new(&config);
    let labels = client
        .detect(&ImageSource::parse(&server.url("/images/dog.jpg")))
        .await?;

    image_mock.assert();
    annotate_mock.assert();
    assert_eq!(labels[0].description(), "Dog");
    Ok(())
}
