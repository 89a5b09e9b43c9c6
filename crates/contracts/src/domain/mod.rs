pub mod scheduled_query;
