use sea_orm_migration::prelude::*;

mod m001_create_olympic_schema;
mod m002_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_olympic_schema::Migration),
            Box::new(m002_create_sessions::Migration),
        ]
    }
}
