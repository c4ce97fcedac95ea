//! Migration to create authors, genres and their link tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Authors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Authors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Authors::Name)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genres::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Genres::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemAuthors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItemAuthors::ItemId).integer().not_null())
                    .col(ColumnDef::new(ItemAuthors::AuthorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ItemAuthors::ItemId)
                            .col(ItemAuthors::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_authors_item")
                            .from(ItemAuthors::Table, ItemAuthors::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_authors_author")
                            .from(ItemAuthors::Table, ItemAuthors::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItemGenres::ItemId).integer().not_null())
                    .col(ColumnDef::new(ItemGenres::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ItemGenres::ItemId)
                            .col(ItemGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_genres_item")
                            .from(ItemGenres::Table, ItemGenres::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_genres_genre")
                            .from(ItemGenres::Table, ItemGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemGenres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemAuthors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Authors {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ItemAuthors {
    Table,
    ItemId,
    AuthorId,
}

#[derive(Iden)]
enum ItemGenres {
    Table,
    ItemId,
    GenreId,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
}
