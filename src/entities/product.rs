use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 255;

/// Catalog item; always belongs to exactly one category
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name
    pub name: String,

    /// Short marketing description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Unit price, two decimal places
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    /// Owning category
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(name) = &self.name {
            let len = name.chars().count();
            if len == 0 || len > MAX_NAME_LEN {
                return Err(DbErr::Custom(format!(
                    "Validation error: product name must be between 1 and {} characters",
                    MAX_NAME_LEN
                )));
            }
        }

        if let ActiveValue::Set(price) = &self.price {
            if price.is_sign_negative() {
                return Err(DbErr::Custom(
                    "Validation error: price cannot be negative".to_string(),
                ));
            }
        }

        Ok(self)
    }
}
