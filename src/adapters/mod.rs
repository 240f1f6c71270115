pub mod http_audit;
pub mod http_lookup;
pub mod identity;
pub mod mock_lookup;
