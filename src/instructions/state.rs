//! Fetch-on-demand view of the current device's instructions.

use crate::dataset::{DeviceDataset, DeviceRecord};
use crate::resolver::ManufacturerResolver;

use super::query::lookup_for_current_device;

type SuccessCallback<'a> = Box<dyn FnMut(&DeviceRecord) + 'a>;
type NotFoundCallback<'a> = Box<dyn FnMut() + 'a>;

/// Instructions for the current device, refreshed with [`fetch`](Self::fetch).
///
/// # Example
/// ```rust
/// use dontkillmyapp::{DeviceDataset, DeviceInstructions, ManufacturerResolver};
///
/// let resolver = ManufacturerResolver::default().with_override("samsung");
/// let mut state = DeviceInstructions::new(DeviceDataset::embedded(), &resolver);
/// state.fetch();
/// assert_eq!(state.manufacturer_name(), Some("Samsung"));
/// assert!(state.has_instructions());
/// ```
pub struct DeviceInstructions<'a> {
    dataset: &'a DeviceDataset,
    resolver: &'a ManufacturerResolver,
    device_data: Option<&'a DeviceRecord>,
    fetched: bool,
    on_success: Option<SuccessCallback<'a>>,
    on_not_found: Option<NotFoundCallback<'a>>,
}

impl<'a> DeviceInstructions<'a> {
    pub fn new(dataset: &'a DeviceDataset, resolver: &'a ManufacturerResolver) -> Self {
        Self {
            dataset,
            resolver,
            device_data: None,
            fetched: false,
            on_success: None,
            on_not_found: None,
        }
    }

    /// Called with the record after each successful fetch.
    pub fn on_success(mut self, callback: impl FnMut(&DeviceRecord) + 'a) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called after each fetch that finds no record.
    pub fn on_not_found(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_not_found = Some(Box::new(callback));
        self
    }

    /// Resolve the manufacturer again and refresh the record.
    pub fn fetch(&mut self) -> Option<&'a DeviceRecord> {
        self.device_data = lookup_for_current_device(self.dataset, self.resolver);
        self.fetched = true;

        match self.device_data {
            Some(record) => {
                if let Some(callback) = self.on_success.as_mut() {
                    callback(record);
                }
            }
            None => {
                if let Some(callback) = self.on_not_found.as_mut() {
                    callback();
                }
            }
        }

        self.device_data
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn device_data(&self) -> Option<&'a DeviceRecord> {
        self.device_data
    }

    /// Whether end-user instructions exist for the device.
    pub fn has_instructions(&self) -> bool {
        self.device_data.is_some_and(DeviceRecord::has_instructions)
    }

    pub fn manufacturer_name(&self) -> Option<&'a str> {
        self.device_data.map(|record| record.name.as_str())
    }
}
