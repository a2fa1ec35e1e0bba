use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::{Cart, CartItem};
use crate::db::entities::{cart, cart_item};

/// Optional draft metadata stored on the cart row.
#[derive(Debug, Clone, Default)]
pub struct DraftMeta {
    pub test_name: Option<String>,
    pub batch: Option<String>,
    pub test_date: Option<String>,
}

#[derive(Clone)]
pub struct CartDao {
    db: DatabaseConnection,
}

impl DaoBase for CartDao {
    type Entity = Cart;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[derive(Clone)]
struct CartItemDao {
    db: DatabaseConnection,
}

impl DaoBase for CartItemDao {
    type Entity = CartItem;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl CartDao {
    fn item_dao(&self) -> CartItemDao {
        CartItemDao::new(&self.db)
    }

    pub async fn find_by_test_id(
        &self,
        test_id: &str,
        user_id: Option<Uuid>,
    ) -> DaoResult<Option<cart::Model>> {
        let test_id = test_id.to_string();
        self.find(1, 1, None, move |query| {
            let query = query.filter(cart::Column::TestId.eq(test_id));
            match user_id {
                Some(user_id) => query.filter(cart::Column::UserId.eq(user_id)),
                None => query.filter(cart::Column::UserId.is_null()),
            }
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    /// Test-id-only lookup for callers that do not act on behalf of a user
    /// (export, draft listing).
    pub async fn find_by_test_id_any_user(
        &self,
        test_id: &str,
    ) -> DaoResult<Option<cart::Model>> {
        let test_id = test_id.to_string();
        self.find(1, 1, None, move |query| {
            query.filter(cart::Column::TestId.eq(test_id))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    /// Finds the cart for (test_id, user-if-known), creating an empty one when
    /// missing. The lookup-then-insert keeps the pair unique.
    pub async fn ensure_cart(
        &self,
        test_id: &str,
        user_id: Option<Uuid>,
    ) -> DaoResult<cart::Model> {
        if let Some(existing) = self.find_by_test_id(test_id, user_id).await? {
            return Ok(existing);
        }

        let model = cart::ActiveModel {
            test_id: Set(test_id.to_string()),
            user_id: Set(user_id),
            test_name: Set(None),
            batch: Set(None),
            test_date: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Inserts a new cart row together with its items in one transaction.
    pub async fn create_draft(
        &self,
        test_id: &str,
        user_id: Option<Uuid>,
        meta: DraftMeta,
        question_ids: &[i64],
    ) -> DaoResult<cart::Model> {
        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;

        let cart = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            test_id: Set(test_id.to_string()),
            user_id: Set(user_id),
            test_name: Set(meta.test_name),
            batch: Set(meta.batch),
            test_date: Set(meta.test_date),
        };
        let cart = cart.insert(&txn).await.map_err(DaoLayerError::Db)?;

        let items = item_models(cart.id, question_ids);
        if !items.is_empty() {
            CartItem::insert_many(items)
                .exec_without_returning(&txn)
                .await
                .map_err(DaoLayerError::Db)?;
        }

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok(cart)
    }

    /// Replace-all merge: drops every item of the cart and inserts the new
    /// set, both inside one transaction so concurrent saves serialize instead
    /// of interleaving.
    pub async fn replace_items(&self, cart_id: Uuid, question_ids: &[i64]) -> DaoResult<()> {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;

        CartItem::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(&txn)
            .await
            .map_err(DaoLayerError::Db)?;

        let items = item_models(cart_id, question_ids);
        if !items.is_empty() {
            CartItem::insert_many(items)
                .exec_without_returning(&txn)
                .await
                .map_err(DaoLayerError::Db)?;
        }

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok(())
    }

    /// Duplicate adds are a no-op; returns whether a row was inserted.
    pub async fn add_item(&self, cart_id: Uuid, question_id: i64) -> DaoResult<bool> {
        if self.find_item(cart_id, question_id).await?.is_some() {
            return Ok(false);
        }

        let model = cart_item::ActiveModel {
            cart_id: Set(cart_id),
            question_id: Set(question_id),
            ..Default::default()
        };
        self.item_dao().create(model).await?;
        Ok(true)
    }

    /// Returns whether a row was actually deleted; a missing item is not an
    /// error.
    pub async fn remove_item(&self, cart_id: Uuid, question_id: i64) -> DaoResult<bool> {
        let result = CartItem::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .filter(cart_item::Column::QuestionId.eq(question_id))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected > 0)
    }

    pub async fn find_item(
        &self,
        cart_id: Uuid,
        question_id: i64,
    ) -> DaoResult<Option<cart_item::Model>> {
        self.item_dao()
            .find(1, 1, None, move |query| {
                query
                    .filter(cart_item::Column::CartId.eq(cart_id))
                    .filter(cart_item::Column::QuestionId.eq(question_id))
            })
            .await
            .map(|response| response.data.into_iter().next())
    }

    pub async fn question_ids(&self, cart_id: Uuid) -> DaoResult<Vec<i64>> {
        let mut pager = self.item_dao().find_iter(None, None, move |query| {
            query.filter(cart_item::Column::CartId.eq(cart_id))
        });
        let mut ids = Vec::new();
        while let Some(response) = pager.next_page().await? {
            ids.extend(response.data.into_iter().map(|item| item.question_id));
        }
        Ok(ids)
    }

    pub async fn count_items(&self, cart_id: Uuid) -> DaoResult<u64> {
        CartItem::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn list_carts(&self) -> DaoResult<Vec<cart::Model>> {
        let mut pager = self.find_iter(None, None, |query| query);
        let mut carts = Vec::new();
        while let Some(mut response) = pager.next_page().await? {
            carts.append(&mut response.data);
        }
        Ok(carts)
    }
}

fn item_models(cart_id: Uuid, question_ids: &[i64]) -> Vec<cart_item::ActiveModel> {
    let now = Utc::now().fixed_offset();
    question_ids
        .iter()
        .map(|question_id| cart_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            cart_id: Set(cart_id),
            question_id: Set(*question_id),
        })
        .collect()
}
