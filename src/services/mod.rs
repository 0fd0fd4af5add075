pub mod catalog;
pub mod seeding;

pub use catalog::ProductCatalogService;
pub use seeding::Seeder;
