pub mod category;
pub mod inventory;
pub mod product;

pub use category::{Entity as Category, Model as CategoryModel};
pub use inventory::{Entity as Inventory, Model as InventoryModel};
pub use product::{Entity as Product, Model as ProductModel};
