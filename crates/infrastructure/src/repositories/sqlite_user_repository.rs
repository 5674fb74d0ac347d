use crate::database::{run_blocking, users, SqlitePool, StoreOp};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use domain::{DomainError, User, UserRepository};
use tracing::warn;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: String,
    name: String,
    email: String,
    image: Option<String>,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    id: String,
    name: String,
    email: String,
    image: Option<String>,
    created_at: NaiveDateTime,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::new(model.id, model.name, model.email, model.image)
    }
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        NewUserModel {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let id = id.to_string();
        let result = run_blocking(&self.pool, StoreOp::Read, move |conn| {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_string();
        let result = run_blocking(&self.pool, StoreOp::Read, move |conn| {
            users::table
                .filter(users::email.eq(email))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let new_user = NewUserModel::from(user);
        let id = user.id.clone();

        // A concurrent registration can pass the service's email check.
        let result = run_blocking(&self.pool, StoreOp::Write, move |conn| {
            let inserted = diesel::insert_into(users::table)
                .values(&new_user)
                .execute(conn);
            match inserted {
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info))
                    if info.message().contains("users.email") =>
                {
                    return Ok(Err(new_user.email));
                }
                other => other?,
            };

            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .map(Ok)
        })
        .await?;

        match result {
            Ok(model) => Ok(model.into()),
            Err(email) => {
                warn!(email = %email, "Email already registered");
                Err(DomainError::EmailAlreadyExists(email))
            }
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let total = run_blocking(&self.pool, StoreOp::Read, |conn| {
            users::table.count().get_result::<i64>(conn)
        })
        .await?;

        Ok(total.max(0) as u64)
    }
}
