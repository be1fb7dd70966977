use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Second schema version: the dashboard lets the user name the bank offering the notes
        manager
            .alter_table(
                Table::alter()
                    .table(Simulations::Table)
                    .add_column(string_null(Simulations::BankLabel))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Simulations::Table)
                    .drop_column(Simulations::BankLabel)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Simulations {
    Table,
    BankLabel,
}
