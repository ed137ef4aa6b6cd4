//! Capture-device discovery via the external listing tool

mod enumerator;

pub use enumerator::{DeviceEnumerator, DeviceList, DeviceSelection};
