//! DeviceService: device CRUD over the repository, plus request validation.

mod device;
mod validation;
pub use device::DeviceService;
pub use validation::{FieldError, RequestValidator, Validate};
