pub mod analytics;
pub mod category;
pub mod page;
pub mod product;
pub mod sale;
pub mod user;

pub use analytics::*;
pub use category::*;
pub use page::*;
pub use product::*;
pub use sale::*;
pub use user::*;
