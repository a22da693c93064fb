/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod convert_request;
mod convert_response;
mod scan_request;

pub use convert_request::ConvertRequest;
pub use convert_response::ConvertResponse;
pub use scan_request::{ScanRequest, ScanResponse, ScanType};
