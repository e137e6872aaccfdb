pub mod bucket;
pub mod rating;
pub mod zip_code;
