use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub text: String,
    pub answer: String,
    pub explanation: Option<String>,
    #[sea_orm(indexed)]
    pub subject: String,
    #[sea_orm(indexed)]
    pub module_name: String,
    #[sea_orm(indexed)]
    pub topic: String,
    pub sub_topic: Option<String>,
    pub micro_topic: Option<String>,
    pub difficulty_level: String,
    pub question_type: String,
    pub nature_of_question: Option<String>,
    #[sea_orm(default_value = false)]
    pub faculty_approved: bool,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub updated_at: DateTimeWithTimeZone,
}

impl ActiveModelBehavior for ActiveModel {}
