//! Migration to create the append-only simulations log

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Simulations::Table)
                    .if_not_exists()
                    .col(pk_auto(Simulations::Id))
                    .col(
                        timestamp_with_time_zone(Simulations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(double(Simulations::Principal))
                    .col(string_len(Simulations::InvestorProfile, 32))
                    .col(double(Simulations::BenchmarkRate))
                    .col(text(Simulations::AnalysisText))
                    .to_owned(),
            )
            .await?;

        // Admin view reads newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_simulations_created_at")
                    .table(Simulations::Table)
                    .col(Simulations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Simulations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Simulations {
    Table,
    Id,
    CreatedAt,
    Principal,
    InvestorProfile,
    BenchmarkRate,
    AnalysisText,
}
