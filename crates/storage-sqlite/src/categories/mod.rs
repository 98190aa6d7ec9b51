mod model;
mod repository;

pub use model::CategoryDb;
pub use repository::CategoryRepository;
