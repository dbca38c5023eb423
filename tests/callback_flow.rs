mod support;

use hub_web::{
    app_lib::AppError,
    features::auth::{
        callback::{CallbackPhase, CallbackProcessor},
        error::AuthError,
        handoff::HandoffStore,
        navigation::{LoginErrorKind, NavState, Navigation, paths},
        route_guard::{AuthState, CheckOutcome, RouteGuard, VerifyPolicy},
    },
};
use std::time::Duration;
use support::{FakeSessionApi, user};

#[tokio::test(start_paused = true)]
async fn exchange_runs_once_across_rerenders() {
    let api = FakeSessionApi::new().exchange_takes(Duration::from_millis(50));
    let processor = CallbackProcessor::new(api.clone(), HandoffStore::new());
    let fragment = "#session_id=abc123";

    let (first, second, third) = tokio::join!(
        processor.process(fragment),
        processor.process(fragment),
        processor.process(fragment),
    );
    let later = processor.process(fragment).await;

    let started: Vec<_> = [first, second, third, later].into_iter().flatten().collect();
    assert_eq!(started.len(), 1);
    assert_eq!(api.exchange_calls(), 1);
    assert!(matches!(processor.phase(), CallbackPhase::Done(_)));
}

#[tokio::test]
async fn successful_exchange_lands_on_dashboard_with_handoff() {
    let signed_in = user("u1", "a@b.com");
    let api = FakeSessionApi::new().exchange_returns(Ok(signed_in.clone()));
    let handoff = HandoffStore::new();
    let processor = CallbackProcessor::new(api.clone(), handoff.clone());

    let navigation = processor
        .process("https://hub.example/#state=xyz&session_id=abc123")
        .await
        .expect("first call runs the exchange");

    assert_eq!(navigation, Navigation::landing(signed_in.clone()));
    assert_eq!(navigation.target, paths::DASHBOARD);
    assert!(navigation.replace);
    assert_eq!(navigation.state, NavState::User(signed_in.clone()));
    assert_eq!(api.exchanged_tokens(), vec!["abc123".to_string()]);
    assert_eq!(api.who_am_i_calls(), 0);

    let record = handoff.take().expect("handoff published");
    assert_eq!(record.user.id, "u1");
    assert!(record.just_authenticated);
}

#[tokio::test]
async fn missing_token_redirects_to_login_without_network() {
    let api = FakeSessionApi::new();
    let handoff = HandoffStore::new();
    let processor = CallbackProcessor::new(api.clone(), handoff.clone());

    let navigation = processor.process("#access_token=nope").await.unwrap();

    assert_eq!(navigation.target, paths::LOGIN);
    assert!(navigation.replace);
    assert_eq!(navigation.state, NavState::None);
    assert_eq!(api.network_calls(), 0);
    assert!(!handoff.has_pending());
}

#[tokio::test]
async fn failed_exchange_redirects_to_login_with_error_marker() {
    let api = FakeSessionApi::new().exchange_returns(Err(AuthError::ExchangeFailed(
        AppError::Http {
            status: 401,
            message: "Invalid session".to_string(),
        },
    )));
    let handoff = HandoffStore::new();
    let processor = CallbackProcessor::new(api.clone(), handoff.clone());

    let navigation = processor.process("#session_id=expired").await.unwrap();

    assert_eq!(
        navigation,
        Navigation::login_with_error(LoginErrorKind::ExchangeFailed)
    );
    assert_eq!(navigation.target, paths::LOGIN);
    assert_eq!(api.exchange_calls(), 1);
    assert!(handoff.take().is_none());
    assert!(!handoff.take_just_authenticated());
}

#[tokio::test(start_paused = true)]
async fn callback_handoff_satisfies_first_guard_without_verification() {
    let api = FakeSessionApi::new().exchange_returns(Ok(user("u1", "a@b.com")));
    let handoff = HandoffStore::new();
    let processor = CallbackProcessor::new(api.clone(), handoff.clone());
    processor.process("#session_id=abc123").await.unwrap();

    let guard = RouteGuard::new(api.clone(), handoff.clone(), VerifyPolicy::default());
    let outcome = guard.check().await;

    let CheckOutcome::Resolved(AuthState::Authenticated(resolved)) = outcome else {
        panic!("expected an authenticated guard, got {outcome:?}");
    };
    assert_eq!(resolved.id, "u1");
    assert_eq!(api.who_am_i_calls(), 0);
    assert!(!handoff.has_pending());
}
