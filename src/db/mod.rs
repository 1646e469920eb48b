pub mod hotel_queries;
