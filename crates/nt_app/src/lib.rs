pub mod app;
pub mod navigator;
pub mod screens;

pub use app::App;
pub use navigator::{Navigator, Route};
pub use screens::*;

pub mod prelude {
    pub use super::{App, Navigator, Route};
    pub use super::screens::*;
    pub use nt_core::{ArticleRecord, Error, Result};
}
