use super::cat;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, trace, warn};

/// The fixed set of fighting style codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FightingStyleCode {
    Boxing,
    Kickboxing,
    MuayThai,
    Wrestling,
    BrazilianJiuJitsu,
}

impl FightingStyleCode {
    pub const ALL: [FightingStyleCode; 5] = [
        FightingStyleCode::Boxing,
        FightingStyleCode::Kickboxing,
        FightingStyleCode::MuayThai,
        FightingStyleCode::Wrestling,
        FightingStyleCode::BrazilianJiuJitsu,
    ];

    /// Short code stored in the database.
    pub fn code(&self) -> &'static str {
        match self {
            FightingStyleCode::Boxing => "BX",
            FightingStyleCode::Kickboxing => "KB",
            FightingStyleCode::MuayThai => "MT",
            FightingStyleCode::Wrestling => "WR",
            FightingStyleCode::BrazilianJiuJitsu => "BJJ",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FightingStyleCode::Boxing => "Boks",
            FightingStyleCode::Kickboxing => "Kickboxing",
            FightingStyleCode::MuayThai => "Muay Thai",
            FightingStyleCode::Wrestling => "Wrestling",
            FightingStyleCode::BrazilianJiuJitsu => "Brazilian Jiu-Jitsu",
        }
    }

    /// Comma separated list of valid codes, for error messages.
    pub fn valid_codes() -> String {
        Self::ALL
            .iter()
            .map(|code| code.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FightingStyleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string is not one of the fighting style codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFightingStyle(pub String);

impl fmt::Display for InvalidFightingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" is not a valid choice. Valid choices: {}",
            self.0,
            FightingStyleCode::valid_codes()
        )
    }
}

impl std::error::Error for InvalidFightingStyle {}

impl FromStr for FightingStyleCode {
    type Err = InvalidFightingStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == s)
            .ok_or_else(|| InvalidFightingStyle(s.to_string()))
    }
}

/// A fighting style shared by every user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fighting_styles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// One of the [`FightingStyleCode`] codes.
    pub name: String,
    #[sea_orm(default_value = "false")]
    pub ground_allowed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cat_fighting_style::Entity")]
    CatFightingStyle,
}

impl Related<cat::Entity> for Entity {
    fn to() -> RelationDef {
        super::cat_fighting_style::Relation::Cat.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cat_fighting_style::Relation::FightingStyle.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// The column is a plain string, so membership in the code set is checked on every save.
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(name) | ActiveValue::Unchanged(name) = &self.name {
            if let Err(e) = name.parse::<FightingStyleCode>() {
                warn!("Rejected fighting style save: {}", e);
                return Err(DbErr::Custom(e.to_string()));
            }
        }
        Ok(self)
    }
}

impl Model {
    pub fn code(&self) -> Result<FightingStyleCode, InvalidFightingStyle> {
        self.name.parse()
    }
}

/// Return a fighting style with this code, creating it when missing.
///
/// When `ground_allowed` is given it is part of the match, otherwise any row
/// with the code is reused and new rows get the default.
#[instrument(skip(db))]
pub async fn get_or_create<C>(
    db: &C,
    code: FightingStyleCode,
    ground_allowed: Option<bool>,
) -> Result<Model, DbErr>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find().filter(Column::Name.eq(code.code()));
    if let Some(ground_allowed) = ground_allowed {
        query = query.filter(Column::GroundAllowed.eq(ground_allowed));
    }

    if let Some(existing) = query.one(db).await? {
        trace!("Reusing fighting style {} ({})", existing.id, existing.name);
        return Ok(existing);
    }

    debug!("Creating fighting style {}", code);
    ActiveModel {
        name: Set(code.code().to_string()),
        ground_allowed: Set(ground_allowed.unwrap_or(false)),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("BX".parse::<FightingStyleCode>(), Ok(FightingStyleCode::Boxing));
        assert_eq!("BJJ".parse::<FightingStyleCode>(), Ok(FightingStyleCode::BrazilianJiuJitsu));
        assert!("bx".parse::<FightingStyleCode>().is_err());
        assert!("Karate".parse::<FightingStyleCode>().is_err());
    }

    #[test]
    fn test_codes_round_trip_through_display() {
        for code in FightingStyleCode::ALL {
            assert_eq!(code.to_string().parse::<FightingStyleCode>(), Ok(code));
        }
    }

    #[test]
    fn test_invalid_message_lists_choices() {
        let err = "KR".parse::<FightingStyleCode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"KR\" is not a valid choice. Valid choices: BX, KB, MT, WR, BJJ"
        );
    }
}
