pub mod auth_service;
pub mod cart_service;
mod context;
pub mod export_service;
pub mod question_service;

pub use auth_service::AuthService;
pub use cart_service::{CartService, DraftSummary, SaveDraftInput};
pub use context::ServiceContext;
pub use question_service::{QuestionPage, QuestionService};
