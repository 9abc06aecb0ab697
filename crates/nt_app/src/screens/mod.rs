pub mod detail;
pub mod favorites;
pub mod list;
pub mod login;

pub use detail::DetailController;
pub use favorites::FavoritesController;
pub use list::{ListController, ListState};
pub use login::LoginController;
