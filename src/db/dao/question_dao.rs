use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{DaoLayerError, DaoResult};
use crate::db::entities::prelude::Question;
use crate::db::entities::question;

const MAX_PAGE_SIZE: u64 = 50;

/// Explicit filter shape for the question listing: each list is an
/// OR-of-equality over its values, lists are ANDed together, and an empty
/// list means no restriction. The free-text term matches text, answer, or
/// explanation.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub subjects: Vec<String>,
    pub modules: Vec<String>,
    pub topics: Vec<String>,
    pub sub_topics: Vec<String>,
    pub question_types: Vec<String>,
    pub search: Option<String>,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub explanation: Option<String>,
    pub subject: String,
    pub module_name: String,
    pub topic: String,
    pub sub_topic: Option<String>,
    pub micro_topic: Option<String>,
    pub difficulty_level: String,
    pub question_type: String,
    pub nature_of_question: Option<String>,
}

/// Per-field patch for the edit operation; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub answer: Option<String>,
    pub explanation: Option<String>,
    pub subject: Option<String>,
    pub module_name: Option<String>,
    pub topic: Option<String>,
    pub sub_topic: Option<String>,
    pub micro_topic: Option<String>,
    pub difficulty_level: Option<String>,
    pub question_type: Option<String>,
    pub nature_of_question: Option<String>,
    pub faculty_approved: Option<bool>,
}

#[derive(Clone)]
pub struct QuestionDao {
    db: DatabaseConnection,
}

impl QuestionDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn create(&self, data: NewQuestion) -> DaoResult<question::Model> {
        active_from_new(data)
            .insert(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn create_many(&self, rows: Vec<NewQuestion>) -> DaoResult<u64> {
        if rows.is_empty() {
            return Ok(0);
        }
        let count = rows.len() as u64;
        Question::insert_many(rows.into_iter().map(active_from_new))
            .exec_without_returning(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(count)
    }

    pub async fn find_by_id(&self, id: i64) -> DaoResult<Option<question::Model>> {
        Question::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn find_by_ids(&self, ids: &[i64]) -> DaoResult<Vec<question::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Question::find()
            .filter(question::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn update(&self, id: i64, patch: QuestionPatch) -> DaoResult<question::Model> {
        let model = self
            .find_by_id(id)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: std::any::type_name::<Question>(),
                id: id.to_string(),
            })?;

        let mut active: question::ActiveModel = model.into();
        apply_patch(&mut active, patch);
        active.updated_at = Set(chrono::Utc::now().fixed_offset());
        active.update(&self.db).await.map_err(DaoLayerError::Db)
    }

    pub async fn delete(&self, id: i64) -> DaoResult<()> {
        let result = Question::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: std::any::type_name::<Question>(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Filtered page plus the total match count for page computation.
    pub async fn search(
        &self,
        filter: &QuestionFilter,
    ) -> DaoResult<(Vec<question::Model>, u64)> {
        let page = filter.page;
        let page_size = filter.page_size;
        if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(DaoLayerError::InvalidPagination { page, page_size });
        }

        let select = filtered_select(filter);

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;

        let data = select
            .order_by_desc(question::Column::Id)
            .limit(page_size)
            .offset(page.saturating_sub(1).saturating_mul(page_size))
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;

        Ok((data, total))
    }
}

fn filtered_select(filter: &QuestionFilter) -> Select<Question> {
    let mut select = Question::find();

    for (column, values) in [
        (question::Column::Subject, &filter.subjects),
        (question::Column::ModuleName, &filter.modules),
        (question::Column::Topic, &filter.topics),
        (question::Column::SubTopic, &filter.sub_topics),
        (question::Column::QuestionType, &filter.question_types),
    ] {
        if !values.is_empty() {
            select = select.filter(any_of(column, values));
        }
    }

    if let Some(term) = filter.search.as_deref() {
        let term = term.trim();
        if term.len() > 1 {
            let pattern = format!("%{}%", escape_like(term));
            let like = |column: question::Column| {
                Expr::col(column).like(LikeExpr::new(&pattern).escape('\\'))
            };
            select = select.filter(
                Condition::any()
                    .add(like(question::Column::Text))
                    .add(like(question::Column::Answer))
                    .add(like(question::Column::Explanation)),
            );
        }
    }

    select
}

fn any_of(column: question::Column, values: &[String]) -> Condition {
    values.iter().fold(Condition::any(), |condition, value| {
        condition.add(column.eq(value.clone()))
    })
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn active_from_new(data: NewQuestion) -> question::ActiveModel {
    let now = chrono::Utc::now().fixed_offset();
    question::ActiveModel {
        text: Set(data.text),
        answer: Set(data.answer),
        explanation: Set(data.explanation),
        subject: Set(data.subject),
        module_name: Set(data.module_name),
        topic: Set(data.topic),
        sub_topic: Set(data.sub_topic),
        micro_topic: Set(data.micro_topic),
        difficulty_level: Set(data.difficulty_level),
        question_type: Set(data.question_type),
        nature_of_question: Set(data.nature_of_question),
        faculty_approved: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn apply_patch(active: &mut question::ActiveModel, patch: QuestionPatch) {
    if let Some(text) = patch.text {
        active.text = Set(text);
    }
    if let Some(answer) = patch.answer {
        active.answer = Set(answer);
    }
    if let Some(explanation) = patch.explanation {
        active.explanation = Set(Some(explanation));
    }
    if let Some(subject) = patch.subject {
        active.subject = Set(subject);
    }
    if let Some(module_name) = patch.module_name {
        active.module_name = Set(module_name);
    }
    if let Some(topic) = patch.topic {
        active.topic = Set(topic);
    }
    if let Some(sub_topic) = patch.sub_topic {
        active.sub_topic = Set(Some(sub_topic));
    }
    if let Some(micro_topic) = patch.micro_topic {
        active.micro_topic = Set(Some(micro_topic));
    }
    if let Some(difficulty_level) = patch.difficulty_level {
        active.difficulty_level = Set(difficulty_level);
    }
    if let Some(question_type) = patch.question_type {
        active.question_type = Set(question_type);
    }
    if let Some(nature_of_question) = patch.nature_of_question {
        active.nature_of_question = Set(Some(nature_of_question));
    }
    if let Some(faculty_approved) = patch.faculty_approved {
        active.faculty_approved = Set(faculty_approved);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use crate::db::entities::question;

    use super::{QuestionDao, QuestionFilter, escape_like};
    use crate::db::dao::DaoLayerError;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn question_model(id: i64, subject: &str) -> question::Model {
        let now = ts();
        question::Model {
            id,
            text: format!("Question {id}"),
            answer: "Answer".to_string(),
            explanation: None,
            subject: subject.to_string(),
            module_name: "Module_1".to_string(),
            topic: "Topic".to_string(),
            sub_topic: None,
            micro_topic: None,
            difficulty_level: "Medium".to_string(),
            question_type: "Objective".to_string(),
            nature_of_question: None,
            faculty_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn filter(page: u64, page_size: u64) -> QuestionFilter {
        QuestionFilter {
            page,
            page_size,
            ..QuestionFilter::default()
        }
    }

    #[tokio::test]
    async fn search_rejects_invalid_pagination_before_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = QuestionDao::new(&db);

        let err = dao
            .search(&filter(0, 10))
            .await
            .expect_err("page 0 should fail");
        assert!(matches!(err, DaoLayerError::InvalidPagination { .. }));

        let log = db.into_transaction_log();
        assert!(log.is_empty(), "no statement may reach the database");
    }

    #[tokio::test]
    async fn delete_reports_not_found_for_unknown_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = QuestionDao::new(&db);

        let err = dao.delete(404).await.expect_err("delete should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id, .. } if id == "404"));
    }

    #[tokio::test]
    async fn find_by_ids_short_circuits_on_empty_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = QuestionDao::new(&db);

        let rows = dao.find_by_ids(&[]).await.expect("query should succeed");
        assert!(rows.is_empty());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn update_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("lookup failed".to_string())])
            .into_connection();
        let dao = QuestionDao::new(&db);

        let err = dao
            .update(1, super::QuestionPatch::default())
            .await
            .expect_err("update should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("50%_done\\"), "50\\%\\_done\\\\");
    }

    #[test]
    fn empty_filter_lists_add_no_clauses() {
        let select = super::filtered_select(&filter(1, 10));
        let sql = sea_orm::QueryTrait::build(&select, DatabaseBackend::Postgres).to_string();
        assert!(!sql.contains("WHERE"), "unexpected clause in: {sql}");
    }

    #[test]
    fn subject_list_becomes_or_of_equality() {
        let mut f = filter(1, 10);
        f.subjects = vec!["History".to_string(), "Economics".to_string()];
        let select = super::filtered_select(&f);
        let sql = sea_orm::QueryTrait::build(&select, DatabaseBackend::Postgres).to_string();
        assert!(sql.contains("OR"), "missing OR in: {sql}");
        assert!(sql.contains("History"));
        assert!(sql.contains("Economics"));
    }

    #[test]
    fn short_search_terms_are_ignored() {
        let mut f = filter(1, 10);
        f.search = Some("a".to_string());
        let select = super::filtered_select(&f);
        let sql = sea_orm::QueryTrait::build(&select, DatabaseBackend::Postgres).to_string();
        assert!(!sql.contains("LIKE"), "unexpected LIKE in: {sql}");
    }

    #[test]
    fn search_term_matches_text_answer_and_explanation() {
        let mut f = filter(1, 10);
        f.search = Some("gdp".to_string());
        let select = super::filtered_select(&f);
        let sql = sea_orm::QueryTrait::build(&select, DatabaseBackend::Postgres).to_string();
        assert_eq!(sql.matches("LIKE").count(), 3, "three LIKE arms in: {sql}");
    }

    #[tokio::test]
    async fn search_returns_page_and_total() {
        let count_row: std::collections::BTreeMap<&str, sea_orm::sea_query::Value> =
            [("num_items", sea_orm::sea_query::Value::BigInt(Some(2)))]
                .into_iter()
                .collect();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([vec![
                question_model(2, "History"),
                question_model(1, "History"),
            ]])
            .into_connection();
        let dao = QuestionDao::new(&db);

        let mut f = filter(1, 10);
        f.subjects = vec!["History".to_string()];
        let (rows, total) = dao.search(&f).await.expect("search should succeed");

        assert_eq!(total, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
    }
}
