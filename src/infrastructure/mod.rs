pub mod provider;
pub mod queue;
pub mod storage;
