pub mod clickhouse;

pub use clickhouse::ClickhouseRepo;
