use model::entities::{ability, cat, cat_ability, cat_fighting_style, fighting_style};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, instrument, trace};

use super::filters::CatFilter;
use crate::error::ApiError;
use crate::serializers::cats::{
    AbilityInput, CatRecord, CreateCatRequest, FightingStyleInput, UpdateCatRequest,
};
use crate::serializers::fighting_styles::parse_code;
use model::entities::fighting_style::FightingStyleCode;

/// Fighting style inputs checked before anything is written.
type StyleSpec = (FightingStyleCode, Option<bool>);

fn resolve_style_inputs(inputs: &[FightingStyleInput]) -> Result<Vec<StyleSpec>, ApiError> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let field = format!("fighting_styles[{}].name", index);
            Ok((parse_code(&field, &input.name)?, input.ground_allowed))
        })
        .collect()
}

/// Load the caller's cat or fail with not found.
async fn find_owned<C>(db: &C, owner_id: i32, cat_id: i32) -> Result<cat::Model, ApiError>
where
    C: ConnectionTrait,
{
    cat::Entity::find_by_id(cat_id)
        .filter(cat::Column::UserId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(ApiError::not_found)
}

async fn load_record<C>(db: &C, cat: cat::Model) -> Result<CatRecord, ApiError>
where
    C: ConnectionTrait,
{
    let abilities = cat
        .find_related(ability::Entity)
        .order_by_asc(ability::Column::Id)
        .all(db)
        .await?;
    let fighting_styles = cat
        .find_related(fighting_style::Entity)
        .order_by_asc(fighting_style::Column::Id)
        .all(db)
        .await?;

    Ok(CatRecord {
        cat,
        abilities,
        fighting_styles,
    })
}

/// Resolve ability names for the owner and link them to the cat.
async fn attach_abilities<C>(
    db: &C,
    owner_id: i32,
    cat_id: i32,
    inputs: &[AbilityInput],
) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    let mut linked = Vec::with_capacity(inputs.len());
    for input in inputs {
        let ability = ability::get_or_create(db, owner_id, &input.name).await?;
        // The same name may appear twice in one payload
        if linked.contains(&ability.id) {
            continue;
        }
        cat_ability::Entity::insert(cat_ability::ActiveModel {
            cat_id: Set(cat_id),
            ability_id: Set(ability.id),
        })
        .exec_without_returning(db)
        .await?;
        linked.push(ability.id);
    }
    trace!("Linked {} abilities to cat {}", linked.len(), cat_id);
    Ok(())
}

/// Resolve fighting styles globally and link them to the cat.
async fn attach_fighting_styles<C>(db: &C, cat_id: i32, styles: &[StyleSpec]) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    let mut linked = Vec::with_capacity(styles.len());
    for (code, ground_allowed) in styles {
        let style = fighting_style::get_or_create(db, *code, *ground_allowed).await?;
        if linked.contains(&style.id) {
            continue;
        }
        cat_fighting_style::Entity::insert(cat_fighting_style::ActiveModel {
            cat_id: Set(cat_id),
            fighting_style_id: Set(style.id),
        })
        .exec_without_returning(db)
        .await?;
        linked.push(style.id);
    }
    trace!("Linked {} fighting styles to cat {}", linked.len(), cat_id);
    Ok(())
}

async fn clear_abilities<C: ConnectionTrait>(db: &C, cat_id: i32) -> Result<(), ApiError> {
    cat_ability::Entity::delete_many()
        .filter(cat_ability::Column::CatId.eq(cat_id))
        .exec(db)
        .await?;
    Ok(())
}

async fn clear_fighting_styles<C: ConnectionTrait>(db: &C, cat_id: i32) -> Result<(), ApiError> {
    cat_fighting_style::Entity::delete_many()
        .filter(cat_fighting_style::Column::CatId.eq(cat_id))
        .exec(db)
        .await?;
    Ok(())
}

/// List the owner's cats, newest first.
///
/// Each filter keeps cats linked to at least one of the given IDs. Matching
/// goes through a subquery so a cat linked to several IDs appears once.
#[instrument(skip(db))]
pub async fn list(
    db: &DatabaseConnection,
    owner_id: i32,
    filter: &CatFilter,
) -> Result<Vec<CatRecord>, ApiError> {
    let mut query = cat::Entity::find().filter(cat::Column::UserId.eq(owner_id));

    if let Some(ids) = &filter.abilities {
        query = query.filter(
            cat::Column::Id.in_subquery(
                Query::select()
                    .column(cat_ability::Column::CatId)
                    .from(cat_ability::Entity)
                    .and_where(cat_ability::Column::AbilityId.is_in(ids.iter().copied()))
                    .to_owned(),
            ),
        );
    }
    if let Some(ids) = &filter.fighting_styles {
        query = query.filter(
            cat::Column::Id.in_subquery(
                Query::select()
                    .column(cat_fighting_style::Column::CatId)
                    .from(cat_fighting_style::Entity)
                    .and_where(cat_fighting_style::Column::FightingStyleId.is_in(ids.iter().copied()))
                    .to_owned(),
            ),
        );
    }

    let cats = query.order_by_desc(cat::Column::Id).all(db).await?;
    let abilities = cats
        .load_many_to_many(ability::Entity, cat_ability::Entity, db)
        .await?;
    let fighting_styles = cats
        .load_many_to_many(fighting_style::Entity, cat_fighting_style::Entity, db)
        .await?;

    debug!("Found {} cats for user {}", cats.len(), owner_id);
    Ok(cats
        .into_iter()
        .zip(abilities)
        .zip(fighting_styles)
        .map(|((cat, mut abilities), mut fighting_styles)| {
            abilities.sort_by_key(|a| a.id);
            fighting_styles.sort_by_key(|s| s.id);
            CatRecord {
                cat,
                abilities,
                fighting_styles,
            }
        })
        .collect())
}

#[instrument(skip(db))]
pub async fn get(db: &DatabaseConnection, owner_id: i32, cat_id: i32) -> Result<CatRecord, ApiError> {
    let cat = find_owned(db, owner_id, cat_id).await?;
    load_record(db, cat).await
}

/// Create a cat owned by `owner_id` together with its nested relations.
#[instrument(skip(db, request), fields(name = %request.name))]
pub async fn create(
    db: &DatabaseConnection,
    owner_id: i32,
    request: CreateCatRequest,
) -> Result<CatRecord, ApiError> {
    let styles = match &request.fighting_styles {
        Some(inputs) => Some(resolve_style_inputs(inputs)?),
        None => None,
    };

    let txn = db.begin().await?;
    let cat = cat::ActiveModel {
        user_id: Set(owner_id),
        name: Set(request.name),
        description: Set(request.description),
        weight: Set(request.weight),
        color: Set(request.color),
        dangerous: Set(request.dangerous),
        image: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(inputs) = &request.abilities {
        attach_abilities(&txn, owner_id, cat.id, inputs).await?;
    }
    if let Some(styles) = &styles {
        attach_fighting_styles(&txn, cat.id, styles).await?;
    }

    let record = load_record(&txn, cat).await?;
    txn.commit().await?;

    debug!("Created cat {} for user {}", record.cat.id, owner_id);
    Ok(record)
}

/// Apply the given fields to the caller's cat.
///
/// A present association list replaces the whole set; an absent one leaves it
/// untouched.
#[instrument(skip(db, request))]
pub async fn update(
    db: &DatabaseConnection,
    owner_id: i32,
    cat_id: i32,
    request: UpdateCatRequest,
) -> Result<CatRecord, ApiError> {
    let styles = match &request.fighting_styles {
        Some(inputs) => Some(resolve_style_inputs(inputs)?),
        None => None,
    };

    let txn = db.begin().await?;
    let existing = find_owned(&txn, owner_id, cat_id).await?;

    let mut active: cat::ActiveModel = existing.clone().into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    if let Some(weight) = request.weight {
        active.weight = Set(weight);
    }
    if let Some(color) = request.color {
        active.color = Set(color);
    }
    if let Some(dangerous) = request.dangerous {
        active.dangerous = Set(dangerous);
    }
    let cat = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };

    if let Some(inputs) = &request.abilities {
        clear_abilities(&txn, cat.id).await?;
        attach_abilities(&txn, owner_id, cat.id, inputs).await?;
    }
    if let Some(styles) = &styles {
        clear_fighting_styles(&txn, cat.id).await?;
        attach_fighting_styles(&txn, cat.id, styles).await?;
    }

    let record = load_record(&txn, cat).await?;
    txn.commit().await?;

    debug!("Updated cat {}", cat_id);
    Ok(record)
}

/// Delete the caller's cat and its association rows. Linked abilities and
/// fighting styles are kept.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, owner_id: i32, cat_id: i32) -> Result<(), ApiError> {
    let txn = db.begin().await?;
    let cat = find_owned(&txn, owner_id, cat_id).await?;

    clear_abilities(&txn, cat.id).await?;
    clear_fighting_styles(&txn, cat.id).await?;
    cat::Entity::delete_by_id(cat.id).exec(&txn).await?;
    txn.commit().await?;

    debug!("Deleted cat {}", cat_id);
    Ok(())
}

/// Check the caller owns the cat before anything is written for it.
pub async fn ensure_owned(db: &DatabaseConnection, owner_id: i32, cat_id: i32) -> Result<cat::Model, ApiError> {
    find_owned(db, owner_id, cat_id).await
}

/// Store the media path of the cat's image.
#[instrument(skip(db))]
pub async fn set_image(
    db: &DatabaseConnection,
    owner_id: i32,
    cat_id: i32,
    path: String,
) -> Result<cat::Model, ApiError> {
    let existing = find_owned(db, owner_id, cat_id).await?;
    let mut active: cat::ActiveModel = existing.into();
    active.image = Set(Some(path));
    Ok(active.update(db).await?)
}
