use model::entities::{cat_fighting_style, fighting_style};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::serializers::fighting_styles::{parse_code, UpdateFightingStyleRequest};

async fn find(db: &DatabaseConnection, style_id: i32) -> Result<fighting_style::Model, ApiError> {
    fighting_style::Entity::find_by_id(style_id)
        .one(db)
        .await?
        .ok_or_else(ApiError::not_found)
}

/// List all fighting styles ordered by name descending. Fighting styles are
/// shared between users.
#[instrument(skip(db))]
pub async fn list(
    db: &DatabaseConnection,
    assigned_only: bool,
) -> Result<Vec<fighting_style::Model>, ApiError> {
    let mut query = fighting_style::Entity::find();
    if assigned_only {
        query = query.filter(
            fighting_style::Column::Id.in_subquery(
                Query::select()
                    .column(cat_fighting_style::Column::FightingStyleId)
                    .from(cat_fighting_style::Entity)
                    .to_owned(),
            ),
        );
    }

    let styles = query
        .order_by_desc(fighting_style::Column::Name)
        .order_by_desc(fighting_style::Column::Id)
        .all(db)
        .await?;
    debug!("Found {} fighting styles", styles.len());
    Ok(styles)
}

#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    style_id: i32,
    request: UpdateFightingStyleRequest,
) -> Result<fighting_style::Model, ApiError> {
    let code = match &request.name {
        Some(name) => Some(parse_code("name", name)?),
        None => None,
    };
    let existing = find(db, style_id).await?;

    let mut active: fighting_style::ActiveModel = existing.clone().into();
    if let Some(code) = code {
        active.name = Set(code.code().to_string());
    }
    if let Some(ground_allowed) = request.ground_allowed {
        active.ground_allowed = Set(ground_allowed);
    }
    if !active.is_changed() {
        return Ok(existing);
    }
    Ok(active.update(db).await?)
}

#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, style_id: i32) -> Result<(), ApiError> {
    let existing = find(db, style_id).await?;
    fighting_style::Entity::delete_by_id(existing.id).exec(db).await?;
    debug!("Deleted fighting style {}", style_id);
    Ok(())
}
