//! Migration to create items table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Items::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Items::Description).text().null())
                    .col(ColumnDef::new(Items::PublicationDate).date().null())
                    .col(ColumnDef::new(Items::ExternalId).string_len(128).null())
                    .col(ColumnDef::new(Items::ExternalUrl).string_len(512).null())
                    .col(ColumnDef::new(Items::ImageUrl).string_len(512).null())
                    .col(ColumnDef::new(Items::Details).json().not_null())
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Items::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing indexes: one per sort key, both led by the discriminator
        manager
            .create_index(
                Index::create()
                    .name("idx_items_kind_id")
                    .table(Items::Table)
                    .col(Items::Kind)
                    .col(Items::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_kind_title_id")
                    .table(Items::Table)
                    .col(Items::Kind)
                    .col(Items::Title)
                    .col(Items::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Kind,
    Title,
    Description,
    PublicationDate,
    ExternalId,
    ExternalUrl,
    ImageUrl,
    Details,
    CreatedAt,
    UpdatedAt,
}
