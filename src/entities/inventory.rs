use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

/// Stock level of one product in one country
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    /// ISO 3166-1 alpha-2 code, e.g. "US"
    #[sea_orm(column_type = "String(StringLen::N(2))")]
    pub country_code: String,
    #[sea_orm(default_value = 0)]
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

/// Checks the shape of a two-letter uppercase country code
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Row-level rules shared by single inserts and bulk seeding
pub fn check_row(country_code: &str, quantity: i32) -> Result<(), DbErr> {
    if !is_valid_country_code(country_code) {
        return Err(DbErr::Custom(format!(
            "Validation error: invalid country code '{}'",
            country_code
        )));
    }
    if quantity < 0 {
        return Err(DbErr::Custom(format!(
            "Validation error: quantity cannot be negative ({})",
            quantity
        )));
    }
    Ok(())
}

impl ActiveModel {
    /// Builds an unsaved stock row
    pub fn stock(product_id: i32, country_code: &str, quantity: i32) -> Self {
        Self {
            id: ActiveValue::NotSet,
            product_id: ActiveValue::Set(product_id),
            country_code: ActiveValue::Set(country_code.to_string()),
            quantity: ActiveValue::Set(quantity),
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if let ActiveValue::NotSet = active_model.quantity {
            active_model.quantity = ActiveValue::Set(0);
        }

        if let (ActiveValue::Set(code), ActiveValue::Set(quantity)) =
            (&active_model.country_code, &active_model.quantity)
        {
            check_row(code, *quantity)?;
        }

        Ok(active_model)
    }
}
