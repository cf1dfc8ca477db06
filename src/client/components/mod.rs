pub mod navbar;
pub mod page;
pub mod stat_card;
pub mod title;

pub use navbar::Navbar;
pub use page::Page;
pub use stat_card::StatCard;
pub use title::TitleButton;
