pub mod gateway;
pub mod rows;
pub mod store;
