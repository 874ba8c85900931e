mod common;

use std::sync::Arc;

use shop_client::application::session_store::SessionStore;
use shop_client::application::{
    LoginPage, Outcome, ProfilePage, RegisterPage, RegistrationForm, Route,
};
use shop_client::domain::ports::KeyValueStore;
use shop_client::{ClientError, MemoryStore};

use common::{start, Stub, TestEnv};

fn login_page(env: &TestEnv) -> LoginPage<MemoryStore> {
    LoginPage::new(env.backends.users.clone(), Arc::clone(&env.store))
}

fn register_page(env: &TestEnv) -> RegisterPage<MemoryStore> {
    RegisterPage::new(env.backends.users.clone(), Arc::clone(&env.store))
}

fn profile_page(env: &TestEnv) -> ProfilePage<MemoryStore> {
    ProfilePage::new(env.backends.users.clone(), Arc::clone(&env.store))
}

fn form(username: &str, password: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

#[actix_web::test]
async fn login_stores_session_and_cookie() {
    let env = start(Stub::default()).await;
    let page = login_page(&env);

    assert_eq!(page.open().unwrap(), Outcome::Done(()));
    let route = page.submit("alice", "secret").await.unwrap();

    assert_eq!(route, Route::Profile);
    assert_eq!(env.store.get("token").unwrap().as_deref(), Some("tok-alice"));
    assert_eq!(env.store.get("userId").unwrap().as_deref(), Some("u-alice"));
    assert_eq!(env.store.get("username").unwrap().as_deref(), Some("alice"));
    assert_eq!(env.store.get("userRole").unwrap().as_deref(), Some("user"));

    let cookie = SessionStore::new(Arc::clone(&env.store))
        .auth_cookie()
        .unwrap()
        .unwrap();
    assert_eq!(cookie.value, "tok-alice");
    assert_eq!(cookie.max_age, 86_400);
}

#[actix_web::test]
async fn signed_in_user_skips_login_form() {
    let env = start(Stub::default()).await;
    env.store.set("token", "tok-alice").unwrap();

    assert_eq!(
        login_page(&env).open().unwrap(),
        Outcome::Redirect(Route::Profile)
    );
    assert_eq!(
        register_page(&env).open().unwrap(),
        Outcome::Redirect(Route::Profile)
    );
}

#[actix_web::test]
async fn login_requires_both_fields() {
    let env = start(Stub::default()).await;

    let err = login_page(&env).submit("alice", "").await.unwrap_err();

    assert_eq!(err.to_string(), "Fill all fields");
    assert!(env.requests().is_empty());
}

#[actix_web::test]
async fn wrong_password_shows_generic_message() {
    let env = start(Stub::default()).await;

    let err = login_page(&env).submit("alice", "nope").await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected(_)));
    assert_eq!(err.to_string(), "Invalid username or password");
    assert_eq!(env.store.get("token").unwrap(), None);
}

#[actix_web::test]
async fn login_error_field_is_shown() {
    let env = start(Stub::default()).await;

    let err = login_page(&env).submit("alice", "locked").await.unwrap_err();

    assert_eq!(err.to_string(), "Account locked");
}

#[actix_web::test]
async fn register_signs_the_user_in() {
    let env = start(Stub::default()).await;

    let route = register_page(&env).submit(&form("bob", "secret")).await.unwrap();

    assert_eq!(route, Route::Profile);
    assert_eq!(env.store.get("token").unwrap().as_deref(), Some("tok-bob"));
    let sent = env.requests_to("POST", "/api/users/register").pop().unwrap();
    assert_eq!(sent.body["username"], "bob");
    assert_eq!(sent.body["password"], "secret");
}

#[actix_web::test]
async fn register_validates_before_sending() {
    let env = start(Stub::default()).await;
    let mut mismatched = form("bob", "secret1");
    mismatched.confirm_password = "secret2".to_string();

    let err = register_page(&env).submit(&mismatched).await.unwrap_err();

    assert_eq!(err.to_string(), "Passwords are not same");
    assert!(env.requests().is_empty());
}

#[actix_web::test]
async fn register_reports_taken_username() {
    let env = start(Stub::default()).await;

    let err = register_page(&env)
        .submit(&form("taken", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Username already exists");
}

#[actix_web::test]
async fn register_prefers_server_error_field() {
    let env = start(Stub::default()).await;

    let err = register_page(&env)
        .submit(&form("banned", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Username not allowed");
}

#[actix_web::test]
async fn register_failure_includes_status() {
    let env = start(Stub::default()).await;

    let err = register_page(&env)
        .submit(&form("broken", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Registration failed (500)");
}

#[actix_web::test]
async fn profile_without_session_redirects_to_login() {
    let env = start(Stub::default()).await;

    let outcome = profile_page(&env).load().await.unwrap();

    assert_eq!(outcome, Outcome::Redirect(Route::Login));
    assert!(env.requests().is_empty());
}

#[actix_web::test]
async fn profile_is_refreshed_from_user_service() {
    let env = start(Stub::default()).await;
    login_page(&env).submit("alice", "secret").await.unwrap();

    let outcome = profile_page(&env).load().await.unwrap();

    let Outcome::Done(profile) = outcome else {
        panic!("expected a profile");
    };
    assert_eq!(profile.user_id, "u-alice");
    assert_eq!(profile.username, "alice-remote");
    assert_eq!(profile.error, None);
    let sent = env.requests_to("GET", "/api/users/u-alice").pop().unwrap();
    assert_eq!(sent.authorization.as_deref(), Some("Bearer tok-alice"));
}

#[actix_web::test]
async fn rejected_profile_token_signs_out() {
    let stub = Stub {
        rejected_tokens: vec!["tok-alice".to_string()],
        ..Stub::default()
    };
    let env = start(stub).await;
    login_page(&env).submit("alice", "secret").await.unwrap();

    let outcome = profile_page(&env).load().await.unwrap();

    assert_eq!(outcome, Outcome::Redirect(Route::Login));
    assert_eq!(env.store.get("token").unwrap(), None);
    assert_eq!(env.store.get("userId").unwrap(), None);
}

#[actix_web::test]
async fn logout_clears_session() {
    let env = start(Stub::default()).await;
    login_page(&env).submit("alice", "secret").await.unwrap();
    env.store.set("cart", "[]").unwrap();

    let route = profile_page(&env).logout().unwrap();

    assert_eq!(route, Route::Login);
    for key in ["token", "userId", "username", "userRole", "cookie.auth_token"] {
        assert_eq!(env.store.get(key).unwrap(), None, "{} should be cleared", key);
    }
    assert_eq!(env.store.get("cart").unwrap().as_deref(), Some("[]"));
}
