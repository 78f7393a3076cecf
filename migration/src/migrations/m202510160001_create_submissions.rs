use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510160001_create_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("submissions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("student_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("roll_number")).string().not_null())
                    .col(ColumnDef::new(Alias::new("file_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("original_text")).text().not_null())
                    .col(ColumnDef::new(Alias::new("marks")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("max_marks")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("feedback")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("submitted_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(ColumnDef::new(Alias::new("evaluated_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("evaluated_by")).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_submitted_at")
                    .table(Alias::new("submissions"))
                    .col(Alias::new("submitted_at"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("submissions")).to_owned())
            .await
    }
}
