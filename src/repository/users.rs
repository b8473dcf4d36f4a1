use model::entities::{auth_token, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, instrument, warn};

use crate::error::ApiError;
use crate::serializers::users::{CreateUserRequest, TokenRequest, UpdateUserRequest};

const DUPLICATE_EMAIL: &str = "user with this email already exists.";
const BAD_CREDENTIALS: &str = "Unable to authenticate with provided credentials.";

async fn ensure_email_free(
    db: &DatabaseConnection,
    email: &str,
    except_id: Option<i32>,
) -> Result<(), ApiError> {
    let mut query = user::Entity::find().filter(user::Column::Email.eq(user::normalize_email(email)));
    if let Some(id) = except_id {
        query = query.filter(user::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(ApiError::field("email", DUPLICATE_EMAIL));
    }
    Ok(())
}

/// Register a new account with a hashed password.
#[instrument(skip(db, request), fields(email = %request.email))]
pub async fn register(db: &DatabaseConnection, request: CreateUserRequest) -> Result<user::Model, ApiError> {
    ensure_email_free(db, &request.email, None).await?;
    let created = user::create_user(db, &request.email, Some(&request.password), &request.name).await?;
    info!("Registered user {}", created.id);
    Ok(created)
}

/// Exchange credentials for the user's API token, creating it on first use.
#[instrument(skip(db, request), fields(email = %request.email))]
pub async fn obtain_token(db: &DatabaseConnection, request: TokenRequest) -> Result<auth_token::Model, ApiError> {
    let account = user::find_by_email(db, &request.email).await?;

    let account = match account {
        Some(account) if account.is_active && account.check_password(&request.password) => account,
        _ => {
            warn!("Rejected credentials");
            return Err(ApiError::field("non_field_errors", BAD_CREDENTIALS));
        }
    };

    let token = auth_token::get_or_create_for_user(db, account.id).await?;
    debug!("Issued token for user {}", account.id);
    Ok(token)
}

pub async fn get(db: &DatabaseConnection, user_id: i32) -> Result<user::Model, ApiError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User inactive or deleted.".to_string()))
}

/// Update the caller's profile. A new password is stored hashed.
#[instrument(skip(db, request))]
pub async fn update(
    db: &DatabaseConnection,
    user_id: i32,
    request: UpdateUserRequest,
) -> Result<user::Model, ApiError> {
    let existing = get(db, user_id).await?;
    let mut active: user::ActiveModel = existing.clone().into();

    if let Some(email) = request.email {
        ensure_email_free(db, &email, Some(user_id)).await?;
        active.email = Set(user::normalize_email(&email));
    }
    if let Some(password) = request.password {
        active.password = Set(user::hash_password(&password)?);
    }
    if let Some(name) = request.name {
        active.name = Set(name);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    let updated = active.update(db).await?;
    debug!("Updated profile of user {}", user_id);
    Ok(updated)
}
