pub mod listing;
pub mod season;
pub mod storage;
