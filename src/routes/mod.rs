mod common;
mod device;

pub use common::common_routes;
pub use device::device_routes;
