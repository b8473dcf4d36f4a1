use model::entities::{ability, cat_ability};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::serializers::abilities::UpdateAbilityRequest;

async fn find_owned(
    db: &DatabaseConnection,
    owner_id: i32,
    ability_id: i32,
) -> Result<ability::Model, ApiError> {
    ability::Entity::find_by_id(ability_id)
        .filter(ability::Column::UserId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(ApiError::not_found)
}

/// List the owner's abilities ordered by name descending.
///
/// With `assigned_only` set, only abilities linked to at least one cat are
/// returned, each once.
#[instrument(skip(db))]
pub async fn list(
    db: &DatabaseConnection,
    owner_id: i32,
    assigned_only: bool,
) -> Result<Vec<ability::Model>, ApiError> {
    let mut query = ability::Entity::find().filter(ability::Column::UserId.eq(owner_id));
    if assigned_only {
        query = query.filter(
            ability::Column::Id.in_subquery(
                Query::select()
                    .column(cat_ability::Column::AbilityId)
                    .from(cat_ability::Entity)
                    .to_owned(),
            ),
        );
    }

    let abilities = query
        .order_by_desc(ability::Column::Name)
        .order_by_desc(ability::Column::Id)
        .all(db)
        .await?;
    debug!("Found {} abilities for user {}", abilities.len(), owner_id);
    Ok(abilities)
}

#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    owner_id: i32,
    ability_id: i32,
    request: UpdateAbilityRequest,
) -> Result<ability::Model, ApiError> {
    let existing = find_owned(db, owner_id, ability_id).await?;

    let Some(name) = request.name else {
        return Ok(existing);
    };
    let mut active: ability::ActiveModel = existing.into();
    active.name = Set(name);
    Ok(active.update(db).await?)
}

/// Delete the owner's ability. Join rows go with it through the foreign key.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, owner_id: i32, ability_id: i32) -> Result<(), ApiError> {
    let existing = find_owned(db, owner_id, ability_id).await?;
    ability::Entity::delete_by_id(existing.id).exec(db).await?;
    debug!("Deleted ability {}", ability_id);
    Ok(())
}
