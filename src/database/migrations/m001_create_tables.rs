use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create samples table
        manager
            .create_table(
                Table::create()
                    .table(Samples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Samples::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Samples::Name).string().not_null())
                    .col(ColumnDef::new(Samples::Description).string())
                    .col(
                        ColumnDef::new(Samples::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Samples::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Samples::CreatedBy).string())
                    .col(ColumnDef::new(Samples::UpdatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Samples::UpdatedBy).string())
                    .index(
                        Index::create()
                            .name("idx_samples_name")
                            .table(Samples::Table)
                            .col(Samples::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tags table
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(ColumnDef::new(Tags::Description).string())
                    .index(
                        Index::create()
                            .name("idx_tags_name")
                            .table(Tags::Table)
                            .col(Tags::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create features table
        manager
            .create_table(
                Table::create()
                    .table(Features::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Features::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Features::Name).string().not_null())
                    .col(ColumnDef::new(Features::Description).string())
                    .col(ColumnDef::new(Features::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Features::UpdatedAt).timestamp().not_null())
                    .index(
                        Index::create()
                            .name("idx_features_name")
                            .table(Features::Table)
                            .col(Features::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create repositories table
        manager
            .create_table(
                Table::create()
                    .table(Repositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repositories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repositories::Name).string().not_null())
                    .col(ColumnDef::new(Repositories::Description).string())
                    .col(
                        ColumnDef::new(Repositories::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Repositories::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .index(
                        Index::create()
                            .name("idx_repositories_name")
                            .table(Repositories::Table)
                            .col(Repositories::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create apps table
        manager
            .create_table(
                Table::create()
                    .table(Apps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Apps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Apps::Name).string().not_null())
                    .col(ColumnDef::new(Apps::Description).string())
                    .col(ColumnDef::new(Apps::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Apps::UpdatedAt).timestamp().not_null())
                    .index(
                        Index::create()
                            .name("idx_apps_name")
                            .table(Apps::Table)
                            .col(Apps::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sample_tags join table
        manager
            .create_table(
                Table::create()
                    .table(SampleTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SampleTags::SampleId).integer().not_null())
                    .col(ColumnDef::new(SampleTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SampleTags::SampleId)
                            .col(SampleTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_tags_sample_id")
                            .from(SampleTags::Table, SampleTags::SampleId)
                            .to(Samples::Table, Samples::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_tags_tag_id")
                            .from(SampleTags::Table, SampleTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create feature_tags join table
        manager
            .create_table(
                Table::create()
                    .table(FeatureTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeatureTags::FeatureId).integer().not_null())
                    .col(ColumnDef::new(FeatureTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(FeatureTags::FeatureId)
                            .col(FeatureTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feature_tags_feature_id")
                            .from(FeatureTags::Table, FeatureTags::FeatureId)
                            .to(Features::Table, Features::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feature_tags_tag_id")
                            .from(FeatureTags::Table, FeatureTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create repository_tags join table
        manager
            .create_table(
                Table::create()
                    .table(RepositoryTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepositoryTags::RepositoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepositoryTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(RepositoryTags::RepositoryId)
                            .col(RepositoryTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repository_tags_repository_id")
                            .from(RepositoryTags::Table, RepositoryTags::RepositoryId)
                            .to(Repositories::Table, Repositories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repository_tags_tag_id")
                            .from(RepositoryTags::Table, RepositoryTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create app_tags join table
        manager
            .create_table(
                Table::create()
                    .table(AppTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AppTags::AppId).integer().not_null())
                    .col(ColumnDef::new(AppTags::TagId).integer().not_null())
                    .primary_key(Index::create().col(AppTags::AppId).col(AppTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_tags_app_id")
                            .from(AppTags::Table, AppTags::AppId)
                            .to(Apps::Table, Apps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_tags_tag_id")
                            .from(AppTags::Table, AppTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepositoryTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeatureTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SampleTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Apps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Repositories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Features::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Samples::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Samples {
    Table,
    Id,
    Name,
    Description,
    Active,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum Features {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Repositories {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Apps {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SampleTags {
    Table,
    SampleId,
    TagId,
}

#[derive(Iden)]
enum FeatureTags {
    Table,
    FeatureId,
    TagId,
}

#[derive(Iden)]
enum RepositoryTags {
    Table,
    RepositoryId,
    TagId,
}

#[derive(Iden)]
enum AppTags {
    Table,
    AppId,
    TagId,
}
