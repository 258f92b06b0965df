pub mod device_info;
pub mod health;
pub mod sample;
pub mod state;

pub use device_info::DeviceInfo;
pub use health::DeviceHealth;
pub use sample::{PolarPoint, Quality, RawSample, ScreenPoint};
pub use state::ConnectionState;
