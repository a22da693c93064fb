/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_query_reader;
mod mock_scan_repository;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_query_reader::MockQueryReader;
pub use mock_scan_repository::MockScanRepository;
