use crate::{
    db::dao::{DaoLayerError, NewQuestion, QuestionDao, QuestionFilter, QuestionPatch},
    db::entities::question,
    error::AppError,
};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 50;

#[derive(Debug)]
pub struct QuestionPage {
    pub questions: Vec<question::Model>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Clone)]
pub struct QuestionService {
    question_dao: QuestionDao,
}

impl QuestionService {
    pub fn new(question_dao: QuestionDao) -> Self {
        Self { question_dao }
    }

    /// Runs the filtered listing with request paging clamped into range
    /// rather than rejected.
    pub async fn search(&self, mut filter: QuestionFilter) -> Result<QuestionPage, AppError> {
        filter.page = filter.page.max(1);
        filter.page_size = match filter.page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };

        let (questions, total) = self.question_dao.search(&filter).await?;
        let total_pages = total.div_ceil(filter.page_size);

        Ok(QuestionPage {
            questions,
            page: filter.page,
            page_size: filter.page_size,
            total,
            total_pages,
        })
    }

    pub async fn create(&self, data: NewQuestion) -> Result<question::Model, AppError> {
        validate_new(&data)?;
        Ok(self.question_dao.create(data).await?)
    }

    pub async fn create_many(&self, rows: Vec<NewQuestion>) -> Result<u64, AppError> {
        if rows.is_empty() {
            return Err(AppError::bad_request("Questions are required"));
        }
        for row in &rows {
            validate_new(row)?;
        }
        Ok(self.question_dao.create_many(rows).await?)
    }

    pub async fn get(&self, id: i64) -> Result<question::Model, AppError> {
        self.question_dao
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))
    }

    pub async fn update(&self, id: i64, patch: QuestionPatch) -> Result<question::Model, AppError> {
        self.question_dao.update(id, patch).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Question not found"),
            other => other.into(),
        })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.question_dao.delete(id).await.map_err(|err| match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Question not found"),
            other => other.into(),
        })
    }
}

fn validate_new(data: &NewQuestion) -> Result<(), AppError> {
    let required = [
        (data.text.as_str(), "Question text is required"),
        (data.answer.as_str(), "Answer is required"),
        (data.subject.as_str(), "Subject is required"),
        (data.module_name.as_str(), "Module name is required"),
        (data.topic.as_str(), "Topic is required"),
        (data.difficulty_level.as_str(), "Difficulty level is required"),
        (data.question_type.as_str(), "Question type is required"),
    ];
    for (value, message) in required {
        if value.trim().is_empty() {
            return Err(AppError::bad_request(message));
        }
    }
    Ok(())
}
