//! `SeaORM` Entity for simulations table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "simulations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    #[sea_orm(column_type = "Double")]
    pub principal: f64,
    pub investor_profile: String,
    #[sea_orm(column_type = "Double")]
    pub benchmark_rate: f64,
    #[sea_orm(column_type = "Text")]
    pub analysis_text: String,
    pub bank_label: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
