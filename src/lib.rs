// Copyright 2025 ModerRAS
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Don't Kill My App
//!
//! Manufacturer-specific instructions for keeping Android apps running in the
//! background.
//!
//! Many Android vendors ship battery "optimizations" that kill background
//! services. This library detects the device manufacturer, looks it up in a
//! bundled snapshot of the [dontkillmyapp.com](https://dontkillmyapp.com)
//! dataset and returns the matching instructions with your app's name filled
//! in.
//!
//! ## Example
//!
//! ```rust
//! use dontkillmyapp::{
//!     background_instructions, DeviceDataset, InstructionOptions, ManufacturerResolver,
//! };
//! use dontkillmyapp::platform::FixedPlatform;
//!
//! let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("Xiaomi"));
//! let options = InstructionOptions::new().with_app_name("Step Counter");
//!
//! let result = background_instructions(DeviceDataset::embedded(), &resolver, &options);
//! assert!(result.found);
//! assert_eq!(result.manufacturer_name.as_deref(), Some("Xiaomi"));
//! assert!(result.instructions_html.unwrap().contains("Step Counter"));
//! ```
//!
//! ## Testing other manufacturers
//!
//! ```rust
//! use dontkillmyapp::{lookup_for_current_device, DeviceDataset, ManufacturerResolver};
//!
//! let resolver = ManufacturerResolver::default();
//! resolver.set_override(Some("Samsung"));
//! assert!(resolver.is_override_active());
//!
//! let record = lookup_for_current_device(DeviceDataset::embedded(), &resolver).unwrap();
//! assert_eq!(record.name, "Samsung");
//! ```

pub mod adb;
pub mod config;
pub mod dataset;
pub mod instructions;
pub mod platform;
pub mod presentation;
pub mod resolver;

pub use config::AppSettings;
pub use dataset::{DatasetError, DeviceDataset, DeviceRecord};
pub use instructions::{
    background_instructions, lookup_for_current_device, substitute_app_name,
    BackgroundInstructions, DeviceInstructions, InstructionOptions, DEFAULT_APP_NAME,
};
pub use presentation::{InstructionPanel, PanelContent};
pub use resolver::{normalize_manufacturer, ManufacturerResolver};
