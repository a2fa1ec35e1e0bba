use sea_orm::DatabaseConnection;

use super::{CartDao, DaoBase, QuestionDao, RefreshTokenDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn refresh_token(&self) -> RefreshTokenDao {
        DaoBase::new(&self.db)
    }

    pub fn cart(&self) -> CartDao {
        DaoBase::new(&self.db)
    }

    pub fn question(&self) -> QuestionDao {
        QuestionDao::new(&self.db)
    }
}
