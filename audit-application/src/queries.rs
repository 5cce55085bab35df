pub mod alert_queries;
