pub mod http_provider;
pub mod mock_provider;
pub mod pricing_provider;
