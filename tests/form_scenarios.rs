//! Registration Form Scenario Tests
//!
//! End-to-end behaviour of a mounted form:
//! - Failed submit reveals every outstanding error, no navigation
//! - Valid submit loads for the simulated latency, then redirects by role
//! - Password / confirmation interplay
//! - Teardown during loading never reaches the navigator

use std::sync::Arc;
use std::time::Duration;

use regform::app::{Route, Router};
use regform::form::validator::{PASSWORDS_DO_NOT_MATCH, PASSWORD_TOO_SHORT};
use regform::form::{
    Destination, Field, FormError, RecordingNavigator, RegistrationForm, SubmitOutcome, View,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn fill_valid(form: &RegistrationForm, role: &str) {
    form.handle_change("fullName", "Jane Doe").unwrap();
    form.handle_change("email", "jane@example.com").unwrap();
    form.handle_change("password", "password1").unwrap();
    form.handle_change("confirmPassword", "password1").unwrap();
    form.handle_change("phone", "+1 555-123-4567").unwrap();
    form.handle_change("role", role).unwrap();
    form.handle_change("terms", true).unwrap();
}

fn mount() -> (Arc<RecordingNavigator>, RegistrationForm) {
    let nav = Arc::new(RecordingNavigator::new());
    let form = RegistrationForm::mount(nav.clone());
    (nav, form)
}

// =============================================================================
// Blocked Submit
// =============================================================================

/// Empty form: submit is blocked and every failing field becomes visible.
#[tokio::test(start_paused = true)]
async fn test_empty_submit_reveals_all_errors() {
    let (nav, mut form) = mount();
    assert!(!form.snapshot().unwrap().is_valid());

    let outcome = form.handle_submit().unwrap();
    assert_eq!(outcome, SubmitOutcome::Blocked { failing: 6 });

    let state = form.snapshot().unwrap();
    assert!(!state.is_loading());
    for field in Field::ALL {
        assert!(state.touched().is_touched(field));
    }

    let view = form.render().unwrap();
    let shown: Vec<Field> = view
        .as_form()
        .unwrap()
        .visible_errors()
        .into_iter()
        .map(|(field, _)| field)
        .collect();
    // confirmPassword matches the (empty) password, so it has nothing to show
    assert_eq!(
        shown,
        vec![
            Field::FullName,
            Field::Email,
            Field::Password,
            Field::Phone,
            Field::Role,
            Field::Terms
        ]
    );

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(nav.redirect_count(), 0);
}

/// A blocked form stays editable and can be submitted again once fixed.
#[tokio::test(start_paused = true)]
async fn test_blocked_then_fixed() {
    let (nav, mut form) = mount();
    form.handle_change("fullName", "Jane Doe").unwrap();
    assert!(matches!(form.handle_submit().unwrap(), SubmitOutcome::Blocked { .. }));

    fill_valid(&form, "user");
    assert!(form.handle_submit().unwrap().is_accepted());
    assert!(form.settle().await);
    assert_eq!(nav.visited(), vec!["/user"]);
}

// =============================================================================
// Accepted Submit
// =============================================================================

/// Valid user registration redirects to /user after 2000 ms.
#[tokio::test(start_paused = true)]
async fn test_user_redirect_after_delay() {
    let (nav, mut form) = mount();
    fill_valid(&form, "user");
    assert!(form.snapshot().unwrap().errors().is_empty());

    let outcome = form.handle_submit().unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Accepted { destination: Destination::User, .. }
    ));

    let view = form.render().unwrap();
    let form_view = view.as_form().unwrap();
    assert!(form_view.is_loading);
    assert!(form_view.submit_disabled);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert!(form.snapshot().unwrap().is_loading());
    assert_eq!(nav.redirect_count(), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let state = form.snapshot().unwrap();
    assert!(!state.is_loading());
    assert!(state.is_submitted());
    assert_eq!(nav.visited(), vec!["/user"]);
}

/// Valid admin registration redirects to /admin.
#[tokio::test(start_paused = true)]
async fn test_admin_redirect() {
    let (nav, mut form) = mount();
    fill_valid(&form, "admin");

    form.handle_submit().unwrap();
    assert!(form.settle().await);

    assert_eq!(nav.visited(), vec!["/admin"]);
    assert!(matches!(form.render().unwrap(), View::Success { .. }));
}

/// Fields are disabled while loading; the captured role decides the route.
#[tokio::test(start_paused = true)]
async fn test_edits_rejected_while_loading() {
    let (nav, mut form) = mount();
    fill_valid(&form, "admin");
    form.handle_submit().unwrap();

    let err = form.handle_change("role", "user").unwrap_err();
    assert_eq!(err, FormError::SubmissionInFlight);

    form.settle().await;
    assert_eq!(nav.visited(), vec!["/admin"]);
}

/// Submitting twice during loading yields a single redirect.
#[tokio::test(start_paused = true)]
async fn test_double_submit_single_redirect() {
    let (nav, mut form) = mount();
    fill_valid(&form, "user");

    assert!(form.handle_submit().unwrap().is_accepted());
    assert_eq!(form.handle_submit().unwrap(), SubmitOutcome::Ignored);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(nav.redirect_count(), 1);
}

/// The router receives the redirect and resolves the landing page.
#[tokio::test(start_paused = true)]
async fn test_router_lands_on_role_page() {
    let router = Arc::new(Router::new());
    let mut form = RegistrationForm::mount(router.clone());
    fill_valid(&form, "admin");

    form.handle_submit().unwrap();
    form.settle().await;

    assert_eq!(router.current_route(), Route::Admin);
    assert_eq!(router.history(), vec!["/admin"]);
}

// =============================================================================
// Password Rules
// =============================================================================

/// Equal short passwords: length error only, form invalid.
#[test]
fn test_short_matching_passwords() {
    let (_nav, form) = mount();
    form.handle_change("password", "short").unwrap();
    form.handle_change("confirmPassword", "short").unwrap();

    let state = form.snapshot().unwrap();
    assert_eq!(state.errors().get(Field::Password), Some(PASSWORD_TOO_SHORT));
    assert!(!state.errors().contains(Field::ConfirmPassword));
    assert!(!state.is_valid());
}

/// Different passwords: mismatch reported even though password is valid.
#[test]
fn test_mismatched_passwords() {
    let (_nav, form) = mount();
    form.handle_change("password", "password1").unwrap();
    form.handle_change("confirmPassword", "password2").unwrap();

    let state = form.snapshot().unwrap();
    assert!(!state.errors().contains(Field::Password));
    assert_eq!(
        state.errors().get(Field::ConfirmPassword),
        Some(PASSWORDS_DO_NOT_MATCH)
    );
}

/// Blur reveals an existing error without changing the error map.
#[test]
fn test_blur_reveals_error() {
    let (_nav, form) = mount();
    form.handle_change("email", "not-an-email").unwrap();
    let before = form.snapshot().unwrap().errors().clone();

    let view = form.render().unwrap();
    assert_eq!(view.as_form().unwrap().field(Field::Email).unwrap().error, None);

    form.handle_blur("email").unwrap();

    let view = form.render().unwrap();
    assert_eq!(
        view.as_form().unwrap().field(Field::Email).unwrap().error,
        Some("Email is not valid")
    );
    assert_eq!(form.snapshot().unwrap().errors(), &before);
}

// =============================================================================
// Cancellation
// =============================================================================

/// Unmounting during loading: the navigator is never invoked.
#[tokio::test(start_paused = true)]
async fn test_unmount_during_loading() {
    let (nav, mut form) = mount();
    fill_valid(&form, "user");
    form.handle_submit().unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(form.is_submission_pending());
    form.unmount();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(nav.redirect_count(), 0);
}

/// Dropping the form without an explicit unmount is a teardown too.
#[tokio::test(start_paused = true)]
async fn test_drop_during_loading() {
    let (nav, mut form) = mount();
    fill_valid(&form, "admin");
    form.handle_submit().unwrap();
    drop(form);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(nav.redirect_count(), 0);
}

/// Without a runtime the valid form cannot schedule and stays idle.
#[test]
fn test_submit_without_runtime() {
    let (nav, mut form) = mount();
    fill_valid(&form, "user");

    assert_eq!(form.handle_submit().unwrap_err(), FormError::SchedulerUnavailable);
    assert!(!form.snapshot().unwrap().is_loading());
    assert_eq!(nav.redirect_count(), 0);
}
