pub mod calendar;
pub mod storage;
pub mod store;
