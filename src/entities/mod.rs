/// Catalog entities
pub mod brand;
pub mod category;
pub mod color;
pub mod gender;
pub mod product;
pub mod product_image;
pub mod product_variant;
pub mod size;

// Re-export entities
pub use brand::{Entity as Brand, Model as BrandModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use color::{Entity as Color, Model as ColorModel};
pub use gender::{Entity as Gender, Model as GenderModel};
pub use product::{Entity as Product, Model as ProductModel};
pub use product_image::{Entity as ProductImage, Model as ProductImageModel};
pub use product_variant::{Entity as ProductVariant, Model as ProductVariantModel};
pub use size::{Entity as Size, Model as SizeModel};
