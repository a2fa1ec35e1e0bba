#[allow(unused_imports)]
pub mod prelude {
    pub use super::cart::Entity as Cart;
    pub use super::cart_item::Entity as CartItem;
    pub use super::question::Entity as Question;
    pub use super::refresh_token::Entity as RefreshToken;
    pub use super::user::Entity as User;
}

pub mod cart;
pub mod cart_item;
pub mod question;
pub mod refresh_token;
pub mod user;
