//! Login flow against a mock Joovi API: form validation, credential
//! submission, token storage scope and the navigation signal.

mod common;

use anyhow::{bail, Result};
use common::{
    can_bind_localhost, closed_port_url, controller, requests, token_body, Areas, ACCESS_TOKEN,
    REFRESH_TOKEN,
};
use joovi::auth::{
    AuthError, AuthState, ErrorKind, Field, HttpSubmitter, Navigation, StorageScope, TokenPair,
};
use secrecy::ExposeSecret;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn login_without_remember_me_stores_session_tokens() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "StrongPass123!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("StrongPass123!");

    let state = controller.submit().await;
    if !matches!(
        state,
        AuthState::Authenticated {
            scope: StorageScope::Session
        }
    ) {
        bail!("expected session authentication, got {state:?}");
    }

    assert_eq!(controller.take_navigation(), Some(Navigation::Profile));
    assert_eq!(Navigation::Profile.path(), "/profile");
    assert_eq!(
        areas.session_value()?,
        Some(json!({ "access_token": ACCESS_TOKEN, "refresh_token": REFRESH_TOKEN }))
    );
    assert_eq!(areas.persistent_value()?, None);
    Ok(())
}

#[tokio::test]
async fn login_with_remember_me_stores_persistent_tokens() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(json!({
            "email": "remember@example.com",
            "password": "PersistentPass123!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("remember@example.com");
    controller.set_login_password("PersistentPass123!");
    controller.set_remember_me(true);

    let state = controller.submit().await;
    assert!(matches!(
        state,
        AuthState::Authenticated {
            scope: StorageScope::Persistent
        }
    ));
    assert_eq!(controller.take_navigation(), Some(Navigation::Profile));
    assert!(areas.persistent_value()?.is_some());
    assert_eq!(areas.session_value()?, None);
    Ok(())
}

#[tokio::test]
async fn login_replaces_pair_from_other_scope() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    areas
        .store()
        .save(&TokenPair::new("old-access", "old-refresh"), StorageScope::Persistent)?;

    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("StrongPass123!");
    controller.submit().await;

    assert!(controller.state().is_authenticated());
    assert_eq!(areas.persistent_value()?, None);
    assert_eq!(
        areas.store().load()?,
        Some(TokenPair::new(ACCESS_TOKEN, REFRESH_TOKEN))
    );
    Ok(())
}

#[tokio::test]
async fn email_is_sent_trimmed() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": " StrongPass123! "
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("  user@example.com ");
    controller.set_login_password(" StrongPass123! ");

    assert!(controller.submit().await.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn empty_form_shows_errors_without_a_request() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;

    let Some(errors) = controller.submit().await.field_errors() else {
        bail!("expected field errors");
    };
    assert_eq!(errors.get(Field::Email), Some("Email is required"));
    assert_eq!(errors.get(Field::Password), Some("Password is required"));

    assert!(requests(&server).await.is_empty());
    assert_eq!(controller.take_navigation(), None);
    assert!(areas.store().load()?.is_none());
    Ok(())
}

#[tokio::test]
async fn rejected_credentials_fail_and_wipe_password() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("  Invalid credentials\n"))
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("WrongPass123!");

    let state = controller.submit().await;
    match state.error() {
        Some(AuthError::Http { status, message }) => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => bail!("expected HTTP error, got {other:?}"),
    }

    assert_eq!(controller.login_form().password.expose_secret(), "");
    assert_eq!(controller.take_navigation(), None);
    assert!(areas.store().load()?.is_none());

    // the form is editable again and a retry goes out
    controller.set_login_password("WrongPass123!");
    assert!(matches!(controller.state(), AuthState::Idle));
    controller.submit().await;
    assert_eq!(requests(&server).await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "nope" })))
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), TIMEOUT, &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("StrongPass123!");

    let state = controller.submit().await;
    assert!(matches!(state.error(), Some(AuthError::Parse(_))));
    assert!(areas.store().load()?.is_none());
    Ok(())
}

#[tokio::test]
async fn slow_server_times_out() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let areas = Areas::new()?;
    let mut controller = controller(&server.uri(), Duration::from_millis(200), &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("StrongPass123!");

    let state = controller.submit().await;
    let Some(err) = state.error() else {
        bail!("expected a failure, got {state:?}");
    };
    assert!(matches!(err, AuthError::Timeout(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let areas = Areas::new()?;
    let mut controller = controller(&closed_port_url()?, TIMEOUT, &areas)?;
    controller.set_login_email("user@example.com");
    controller.set_login_password("StrongPass123!");

    let state = controller.submit().await;
    assert!(matches!(state.error(), Some(AuthError::Network(_))));
    Ok(())
}

#[tokio::test]
async fn health_probe() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let submitter = HttpSubmitter::new(&server.uri(), TIMEOUT)?;
    submitter.health().await?;

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;

    let submitter = HttpSubmitter::new(&down.uri(), TIMEOUT)?;
    match submitter.health().await {
        Err(AuthError::Http { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Request failed.");
        }
        other => bail!("expected HTTP 503, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn requests_carry_the_user_agent() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    HttpSubmitter::new(&server.uri(), TIMEOUT)?.health().await?;

    let received = requests(&server).await;
    let Some(request) = received.first() else {
        bail!("no request recorded");
    };
    let agent = request
        .headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert_eq!(agent, joovi::APP_USER_AGENT);
    Ok(())
}
