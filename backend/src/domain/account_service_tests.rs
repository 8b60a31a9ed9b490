//! Tests for registration and login.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockSessionTokenIssuer, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, SessionToken};

fn stored_admin() -> User {
    User::new(
        UserProfile {
            id: UserId::random(),
            full_name: "Admin User".to_owned(),
            email: "admin@test.com".to_owned(),
            user_name: "admin".to_owned(),
            role: Role::Admin,
        },
        PasswordHash::new("hashed:admin123"),
    )
}

fn fake_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(PasswordHash::new(format!("hashed:{password}"))));
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(hash.as_str() == format!("hashed:{password}")));
    hasher
}

fn fake_tokens() -> MockSessionTokenIssuer {
    let mut tokens = MockSessionTokenIssuer::new();
    tokens
        .expect_issue()
        .returning(|user| Ok(SessionToken::new(format!("token-{}", user.id))));
    tokens
}

fn service(
    users: MockUserRepository,
) -> AccountService<MockUserRepository, MockPasswordHasher, MockSessionTokenIssuer> {
    AccountService::new(
        Arc::new(users),
        Arc::new(fake_hasher()),
        Arc::new(fake_tokens()),
    )
}

fn registration() -> Registration {
    Registration::try_from_parts("Ann Lee", "Ann@Example.com", "ann", "s3cret").expect("valid")
}

#[rstest]
#[tokio::test]
async fn register_creates_employee_with_hashed_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_exists_with()
        .with(eq("ann@example.com"), eq("ann"))
        .times(1)
        .returning(|_, _| Ok(false));
    users
        .expect_insert()
        .withf(|user| {
            user.role() == Role::Employee && user.password_hash().as_str() == "hashed:s3cret"
        })
        .times(1)
        .returning(|_| Ok(()));

    let profile = service(users)
        .register(&registration())
        .await
        .expect("registered");

    assert_eq!(profile.email, "ann@example.com");
    assert_eq!(profile.full_name, "Ann Lee");
    assert_eq!(profile.role, Role::Employee);
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_identity_before_hashing() {
    let mut users = MockUserRepository::new();
    users.expect_exists_with().returning(|_, _| Ok(true));
    users.expect_insert().never();

    let err = service(users)
        .register(&registration())
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "User already exists");
}

#[rstest]
#[tokio::test]
async fn register_race_lost_at_store_is_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_exists_with().returning(|_, _| Ok(false));
    users
        .expect_insert()
        .returning(|_| Err(UserPersistenceError::duplicate("email")));

    let err = service(users)
        .register(&registration())
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn login_returns_token_and_profile() {
    let admin = stored_admin();
    let expected = admin.profile().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("admin@test.com"))
        .returning(move |_| Ok(Some(admin.clone())));

    let creds = LoginCredentials::try_from_parts("ADMIN@test.com", "admin123").expect("valid");
    let outcome = service(users).login(&creds).await.expect("logged in");

    assert_eq!(outcome.user, expected);
    assert_eq!(
        outcome.token.as_str(),
        format!("token-{}", expected.id).as_str()
    );
}

#[rstest]
#[case("admin@test.com", "wrong")]
#[case("nobody@test.com", "admin123")]
#[tokio::test]
async fn login_failures_are_indistinguishable(#[case] email: &str, #[case] password: &str) {
    let admin = stored_admin();
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(move |email| {
        Ok((email == admin.email()).then(|| admin.clone()))
    });

    let creds = LoginCredentials::try_from_parts(email, password).expect("valid");
    let err = service(users).login(&creds).await.expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), "Invalid credentials");
}

#[rstest]
#[tokio::test]
async fn unreachable_store_is_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Err(UserPersistenceError::connection("pool timed out")));

    let creds = LoginCredentials::try_from_parts("admin@test.com", "admin123").expect("valid");
    let err = service(users).login(&creds).await.expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
