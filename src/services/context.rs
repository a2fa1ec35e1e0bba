use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::JwtKeys,
    db::dao::DaoContext,
    services::{
        auth_service::AuthService, cart_service::CartService, question_service::QuestionService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn auth(&self, jwt: &JwtKeys) -> AuthService {
        AuthService::new(self.daos.user(), self.daos.refresh_token(), jwt.clone())
    }

    pub fn cart(&self) -> CartService {
        CartService::new(self.daos.cart(), self.daos.question())
    }

    pub fn question(&self) -> QuestionService {
        QuestionService::new(self.daos.question())
    }
}
