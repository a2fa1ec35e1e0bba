use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::{
    db::dao::{CartDao, DraftMeta, QuestionDao},
    db::entities::question,
    error::AppError,
};

/// Draft save request after body deserialization.
#[derive(Debug, Clone, Default)]
pub struct SaveDraftInput {
    pub user_id: Option<Uuid>,
    pub test_name: String,
    pub batch: Option<String>,
    pub date: Option<String>,
    pub question_ids: Vec<i64>,
    pub existing_test_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DraftSummary {
    pub test_id: String,
    pub test_name: Option<String>,
    pub batch: Option<String>,
    pub test_date: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub question_count: u64,
}

#[derive(Clone)]
pub struct CartService {
    cart_dao: CartDao,
    question_dao: QuestionDao,
}

impl CartService {
    pub fn new(cart_dao: CartDao, question_dao: QuestionDao) -> Self {
        Self {
            cart_dao,
            question_dao,
        }
    }

    /// Saves a named draft. An existing (test_id, user) cart has its items
    /// replaced wholesale; otherwise a new cart is created under a fresh
    /// test id. Returns the test id the draft lives under.
    pub async fn save_draft(&self, input: SaveDraftInput) -> Result<String, AppError> {
        let user_id = input
            .user_id
            .ok_or_else(|| AppError::bad_request("User ID is required"))?;

        let test_name = input.test_name.trim();
        if test_name.is_empty() {
            return Err(AppError::bad_request("Test name is required"));
        }

        if input.question_ids.is_empty() {
            return Err(AppError::bad_request("Question IDs are required"));
        }

        let existing_test_id = input
            .existing_test_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(existing) = existing_test_id {
            if let Some(cart) = self
                .cart_dao
                .find_by_test_id(existing, Some(user_id))
                .await?
            {
                self.cart_dao
                    .replace_items(cart.id, &input.question_ids)
                    .await?;
                return Ok(existing.to_string());
            }
        }

        let test_id = existing_test_id
            .map(str::to_string)
            .unwrap_or_else(generate_test_id);
        let meta = DraftMeta {
            test_name: Some(test_name.to_string()),
            batch: input.batch.clone(),
            test_date: input.date.clone(),
        };
        self.cart_dao
            .create_draft(&test_id, Some(user_id), meta, &input.question_ids)
            .await?;
        Ok(test_id)
    }

    /// Returns whether the question was newly added; duplicates are a no-op.
    pub async fn add_question(
        &self,
        test_id: &str,
        question_id: i64,
        user_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let test_id = require_test_id(test_id)?;
        let cart = self.cart_dao.ensure_cart(test_id, user_id).await?;
        Ok(self.cart_dao.add_item(cart.id, question_id).await?)
    }

    /// Returns false for an unknown cart or a question not in it; neither is
    /// an error.
    pub async fn remove_question(
        &self,
        test_id: &str,
        question_id: i64,
        user_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let test_id = require_test_id(test_id)?;
        let Some(cart) = self.cart_dao.find_by_test_id(test_id, user_id).await? else {
            return Ok(false);
        };
        Ok(self.cart_dao.remove_item(cart.id, question_id).await?)
    }

    pub async fn cart_questions(
        &self,
        test_id: &str,
        user_id: Option<Uuid>,
    ) -> Result<Vec<question::Model>, AppError> {
        let test_id = require_test_id(test_id)?;
        let Some(cart) = self.cart_dao.find_by_test_id(test_id, user_id).await? else {
            return Ok(Vec::new());
        };
        let ids = self.cart_dao.question_ids(cart.id).await?;
        Ok(self.question_dao.find_by_ids(&ids).await?)
    }

    /// Cart questions resolved by test id alone, for callers that do not act
    /// on behalf of a user (export).
    pub async fn questions_for_test(
        &self,
        test_id: &str,
    ) -> Result<Option<Vec<question::Model>>, AppError> {
        let test_id = require_test_id(test_id)?;
        let Some(cart) = self.cart_dao.find_by_test_id_any_user(test_id).await? else {
            return Ok(None);
        };
        let ids = self.cart_dao.question_ids(cart.id).await?;
        Ok(Some(self.question_dao.find_by_ids(&ids).await?))
    }

    pub async fn list_drafts(&self) -> Result<Vec<DraftSummary>, AppError> {
        let carts = self.cart_dao.list_carts().await?;
        let mut drafts = Vec::with_capacity(carts.len());
        for cart in carts {
            let question_count = self.cart_dao.count_items(cart.id).await?;
            drafts.push(DraftSummary {
                test_id: cart.test_id,
                test_name: cart.test_name,
                batch: cart.batch,
                test_date: cart.test_date,
                created_at: cart.created_at,
                question_count,
            });
        }
        Ok(drafts)
    }
}

fn require_test_id(test_id: &str) -> Result<&str, AppError> {
    let trimmed = test_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Test ID is required"));
    }
    Ok(trimmed)
}

fn generate_test_id() -> String {
    format!("test_{}", Uuid::new_v4().simple())
}
