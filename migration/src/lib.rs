pub use sea_orm_migration::prelude::*;

mod m20251020_000001_create_simulations;
mod m20251104_000001_add_bank_label_to_simulations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_simulations::Migration),
            Box::new(m20251104_000001_add_bank_label_to_simulations::Migration),
        ]
    }
}
