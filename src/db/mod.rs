pub mod repository;

pub use repository::init_schema;
