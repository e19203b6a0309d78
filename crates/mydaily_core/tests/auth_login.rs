use mydaily_core::{
    AuthError, AuthService, PasswordScheme, RepoError, SqliteStore, User, UserRepository,
};
use std::sync::Arc;

fn service_with_user(email: &str, password: &str) -> AuthService<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    store
        .insert_user(&User {
            email: email.to_string(),
            password: password.to_string(),
        })
        .unwrap();
    AuthService::new(store)
}

#[test]
fn login_with_matching_plain_password_returns_email_only() {
    let service = service_with_user("ana@example.com", "hunter2");

    let user = service.login("ana@example.com", "hunter2").unwrap();
    assert_eq!(user.email, "ana@example.com");

    let body = serde_json::to_value(&user).unwrap();
    assert_eq!(body, serde_json::json!({"email": "ana@example.com"}));
}

#[test]
fn login_with_unknown_email_is_not_found() {
    let service = service_with_user("ana@example.com", "hunter2");

    let err = service.login("bob@example.com", "hunter2").unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));

    let err = service.login("", "").unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[test]
fn login_email_match_is_exact() {
    let service = service_with_user("ana@example.com", "hunter2");
    let err = service.login("ANA@example.com", "hunter2").unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[test]
fn login_with_wrong_password_is_invalid_credential() {
    let service = service_with_user("ana@example.com", "hunter2");

    let err = service.login("ana@example.com", "hunter3").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential));
    assert_eq!(err.error_code(), "invalid_credential");
}

#[test]
fn registered_argon2_users_can_log_in() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let service = AuthService::new(Arc::clone(&store));

    service
        .register_user(" ana@example.com ", "hunter2", PasswordScheme::Argon2)
        .unwrap();

    let stored = store.find_user_by_email("ana@example.com").unwrap().unwrap();
    assert!(stored.password.starts_with("$argon2"));
    assert_ne!(stored.password, "hunter2");

    assert!(service.login("ana@example.com", "hunter2").is_ok());
    assert!(matches!(
        service.login("ana@example.com", "nope").unwrap_err(),
        AuthError::InvalidCredential
    ));
}

#[test]
fn register_rejects_duplicates_and_empty_input() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let service = AuthService::new(store);

    service
        .register_user("ana@example.com", "pw", PasswordScheme::Plain)
        .unwrap();
    let duplicate = service
        .register_user("ana@example.com", "pw2", PasswordScheme::Plain)
        .unwrap_err();
    assert!(matches!(
        duplicate,
        AuthError::Repo(RepoError::DuplicateEmail(_))
    ));

    assert!(matches!(
        service
            .register_user("  ", "pw", PasswordScheme::Plain)
            .unwrap_err(),
        AuthError::InvalidInput(_)
    ));
    assert!(matches!(
        service
            .register_user("b@example.com", "", PasswordScheme::Plain)
            .unwrap_err(),
        AuthError::InvalidInput(_)
    ));
}

#[test]
fn malformed_stored_hash_is_a_hash_error() {
    let service = service_with_user("ana@example.com", "$argon2id$!");
    let err = service.login("ana@example.com", "x").unwrap_err();
    assert!(matches!(err, AuthError::PasswordHash(_)));
}
