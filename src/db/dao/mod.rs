pub mod base;
pub mod base_traits;
pub mod cart_dao;
mod context;
pub mod error;
pub mod question_dao;
pub mod refresh_token_dao;
pub mod user_dao;

pub use base::{DaoBase, DaoPager, PaginatedResponse};
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use cart_dao::{CartDao, DraftMeta};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use question_dao::{NewQuestion, QuestionDao, QuestionFilter, QuestionPatch};
pub use refresh_token_dao::RefreshTokenDao;
pub use user_dao::UserDao;
