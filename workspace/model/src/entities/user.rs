use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{NaiveDateTime, Utc};
use rand_core::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use thiserror::Error;
use tracing::{debug, instrument};

/// Prefix stored in `password` for accounts created without a password.
/// Such accounts can never log in with a password.
const UNUSABLE_PASSWORD_PREFIX: &str = "!";

/// Represents an account of the system.
/// The email is the login identity and is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string, or an unusable marker.
    pub password: String,
    pub name: String,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    #[sea_orm(default_value = "false")]
    pub is_staff: bool,
    #[sea_orm(default_value = "false")]
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cat::Entity")]
    Cat,
    #[sea_orm(has_many = "super::ability::Entity")]
    Ability,
    #[sea_orm(has_one = "super::auth_token::Entity")]
    AuthToken,
}

impl Related<super::cat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cat.def()
    }
}

impl Related<super::ability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ability.def()
    }
}

impl Related<super::auth_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Errors raised by the user manager functions.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User must have email address.")]
    MissingEmail,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<argon2::password_hash::Error> for UserError {
    fn from(error: argon2::password_hash::Error) -> Self {
        UserError::PasswordHash(error.to_string())
    }
}

/// Normalize an email address by lowercasing the domain part.
/// The local part is case sensitive and kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Hash a raw password into an argon2 PHC string.
pub fn hash_password(raw: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(raw.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn password_or_unusable(password: Option<&str>) -> Result<String, UserError> {
    match password {
        Some(raw) => hash_password(raw),
        None => Ok(UNUSABLE_PASSWORD_PREFIX.to_string()),
    }
}

impl Model {
    /// Check a raw password against the stored hash.
    pub fn check_password(&self, raw: &str) -> bool {
        if self.password.starts_with(UNUSABLE_PASSWORD_PREFIX) {
            return false;
        }
        match PasswordHash::new(&self.password) {
            Ok(parsed) => Argon2::default()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn has_usable_password(&self) -> bool {
        !self.password.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

/// Create, save and return a new user.
#[instrument(skip(db, password))]
pub async fn create_user<C>(
    db: &C,
    email: &str,
    password: Option<&str>,
    name: &str,
) -> Result<Model, UserError>
where
    C: ConnectionTrait,
{
    if email.trim().is_empty() {
        return Err(UserError::MissingEmail);
    }

    let email = normalize_email(email);
    debug!("Creating user with email: {}", email);

    let user = ActiveModel {
        email: Set(email),
        password: Set(password_or_unusable(password)?),
        name: Set(name.to_string()),
        is_active: Set(true),
        is_staff: Set(false),
        is_superuser: Set(false),
        date_joined: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(user.insert(db).await?)
}

/// Create, save and return a new superuser.
#[instrument(skip(db, password))]
pub async fn create_superuser<C>(db: &C, email: &str, password: &str) -> Result<Model, UserError>
where
    C: ConnectionTrait,
{
    let user = create_user(db, email, Some(password), "").await?;

    let mut active: ActiveModel = user.into();
    active.is_staff = Set(true);
    active.is_superuser = Set(true);
    Ok(active.update(db).await?)
}

/// Look a user up by its login identity.
pub async fn find_by_email<C>(db: &C, email: &str) -> Result<Option<Model>, DbErr>
where
    C: ConnectionTrait,
{
    Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
}
