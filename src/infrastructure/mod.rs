pub mod persistence;
pub mod storage;
