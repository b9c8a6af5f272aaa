// handlers/protected/admin/mod.rs - Administrative endpoints

pub mod drop_table;

pub use drop_table::get as drop_table_get;
