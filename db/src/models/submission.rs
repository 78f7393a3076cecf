//! Uploaded assignment submissions.
//!
//! A submission is created once per upload and is either *pending* (no marks,
//! feedback or evaluation time) or *evaluated* (all three present). The only
//! mutation is [`Model::record_evaluation`], which succeeds at most once per row.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Func, LikeExpr, SimpleExpr};
use sea_orm::{Condition, FromQueryResult, PaginatorTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub student_name: String,
    pub roll_number: String,
    pub file_name: String,
    #[sea_orm(column_type = "Text")]
    pub original_text: String,

    pub marks: Option<i64>,
    pub max_marks: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,

    pub submitted_at: DateTime<Utc>,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub evaluated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Aggregate figures over all submissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionStats {
    pub total_submissions: u64,
    pub evaluated_submissions: u64,
    pub pending_submissions: u64,
    /// `avg(marks) / avg(max_marks) * 100` over evaluated rows, two decimals.
    pub average_percentage: f64,
}

#[derive(Debug, FromQueryResult)]
struct MarkAverages {
    avg_marks: Option<f64>,
    avg_max_marks: Option<f64>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        student_name: &str,
        roll_number: &str,
        file_name: &str,
        original_text: &str,
    ) -> Result<Model, DbErr> {
        Self::create_at(
            db,
            student_name,
            roll_number,
            file_name,
            original_text,
            Utc::now(),
        )
        .await
    }

    /// Same as [`Model::create`] with an explicit submission time.
    pub async fn create_at(
        db: &DbConn,
        student_name: &str,
        roll_number: &str,
        file_name: &str,
        original_text: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let submission = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            student_name: Set(student_name.to_owned()),
            roll_number: Set(roll_number.to_owned()),
            file_name: Set(file_name.to_owned()),
            original_text: Set(original_text.to_owned()),
            marks: Set(None),
            max_marks: Set(None),
            feedback: Set(None),
            submitted_at: Set(submitted_at),
            evaluated_at: Set(None),
            evaluated_by: Set(None),
        };

        submission.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated_at.is_some()
    }

    /// Newest first, optionally filtered by a case-insensitive substring of the
    /// student name, roll number or file name. `%` and `_` in the query match
    /// themselves, not any text.
    pub async fn search(
        db: &DbConn,
        query: Option<&str>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        let mut select = Entity::find();

        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", escape_like(q));
            select = select.filter(
                Condition::any()
                    .add(Column::StudentName.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Column::RollNumber.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Column::FileName.like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        select
            .order_by_desc(Column::SubmittedAt)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
    }

    pub async fn all_newest_first(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }

    /// Stores the grading result if the submission is still pending.
    ///
    /// Returns the updated row, or `None` when no pending submission with this id
    /// exists (never created, or already evaluated).
    pub async fn record_evaluation(
        db: &DbConn,
        id: &str,
        marks: i64,
        max_marks: i64,
        feedback: &str,
        evaluated_by: &str,
    ) -> Result<Option<Model>, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::Marks, Expr::value(marks))
            .col_expr(Column::MaxMarks, Expr::value(max_marks))
            .col_expr(Column::Feedback, Expr::value(feedback.to_owned()))
            .col_expr(Column::EvaluatedAt, Expr::value(Utc::now()))
            .col_expr(Column::EvaluatedBy, Expr::value(evaluated_by.to_owned()))
            .filter(Column::Id.eq(id))
            .filter(Column::EvaluatedAt.is_null())
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Self::find_by_id(db, id).await
    }

    pub async fn statistics(db: &DbConn) -> Result<SubmissionStats, DbErr> {
        let total = Entity::find().count(db).await?;
        let evaluated = Entity::find()
            .filter(Column::Marks.is_not_null())
            .count(db)
            .await?;

        let averages = Entity::find()
            .select_only()
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(Column::Marks))),
                "avg_marks",
            )
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(Column::MaxMarks))),
                "avg_max_marks",
            )
            .filter(Column::Marks.is_not_null())
            .into_model::<MarkAverages>()
            .one(db)
            .await?;

        let average_percentage = match averages {
            Some(MarkAverages {
                avg_marks: Some(marks),
                avg_max_marks: Some(max),
            }) if max > 0.0 => round2(marks / max * 100.0),
            _ => 0.0,
        };

        Ok(SubmissionStats {
            total_submissions: total,
            evaluated_submissions: evaluated,
            pending_submissions: total.saturating_sub(evaluated),
            average_percentage,
        })
    }
}

/// Escapes `LIKE` metacharacters so the query is matched literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
