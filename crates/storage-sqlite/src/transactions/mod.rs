mod model;
mod repository;

pub use model::TransactionDb;
pub use repository::TransactionRepository;
