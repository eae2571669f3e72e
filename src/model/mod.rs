pub mod global_error;
pub mod notification;

pub use global_error::{AppError, ErrorCode, ErrorResponse};
pub use notification::{HealthResponse, Notification, NotifyRequest, OrderNotifyRequest, PaymentNotifyRequest, RelayResponse};
