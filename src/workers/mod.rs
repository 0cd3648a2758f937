pub mod pipeline_worker;
pub mod sweeper;
