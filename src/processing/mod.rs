pub mod coordinates;
pub mod extent;
pub mod schema;
pub mod style;
