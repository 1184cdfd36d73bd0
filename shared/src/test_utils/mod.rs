pub mod http_test_utils;
pub mod mock_activity_store;
pub mod mock_user_store;
pub mod test_logging;
