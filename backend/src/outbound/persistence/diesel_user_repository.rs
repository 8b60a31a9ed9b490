//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, Role, User, UserId, UserProfile};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, violated_unique_constraint};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserPersistenceError {
    match violated_unique_constraint(&error) {
        Some("users_email_key") => return UserPersistenceError::duplicate("email"),
        Some("users_user_name_key") => return UserPersistenceError::duplicate("userName"),
        _ => {}
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(
        UserProfile {
            id: UserId::from_uuid(row.id),
            full_name: row.full_name,
            email: row.email,
            user_name: row.user_name,
            role,
        },
        PasswordHash::new(row.password_hash),
    ))
}

pub(super) fn user_to_row(user: &User) -> NewUserRow<'_> {
    let profile = user.profile();
    NewUserRow {
        id: *profile.id.as_uuid(),
        full_name: &profile.full_name,
        email: &profile.email,
        user_name: &profile.user_name,
        password_hash: user.password_hash().as_str(),
        role: profile.role.as_str(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }

    async fn exists_with(
        &self,
        email: &str,
        user_name: &str,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email).or(users::user_name.eq(user_name))),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_error)
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        diesel::insert_into(users::table)
            .values(&user_to_row(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            full_name: "Admin User".to_owned(),
            email: "admin@test.com".to_owned(),
            user_name: "admin".to_owned(),
            password_hash: "$2b$04$hash".to_owned(),
            role: role.to_owned(),
        }
    }

    #[rstest]
    fn rows_round_trip_through_insert_shape() {
        let user = row_to_user(row("admin")).expect("valid row");
        let insert = user_to_row(&user);
        assert_eq!(insert.role, "admin");
        assert_eq!(insert.email, "admin@test.com");
        assert_eq!(insert.password_hash, "$2b$04$hash");
    }

    #[rstest]
    fn unknown_roles_are_query_errors() {
        let err = row_to_user(row("owner")).expect_err("invalid role");
        assert_eq!(err, UserPersistenceError::query("unknown role: owner"));
    }
}
