pub mod records;
pub mod selection;
