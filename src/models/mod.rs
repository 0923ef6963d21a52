pub mod department;
pub mod product;
