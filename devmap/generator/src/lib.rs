// Licensed under the Apache-2.0 license

//! JSON device list to peripheral table code generator.
//!
//! This crate reads a JSON list of memory-mapped devices and generates the
//! `soc.devmap` Ada package: an enumeration of peripheral identifiers and a
//! constant table giving each peripheral its address, size, MPU subregion
//! mask, interrupt lines and read-only flag.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use devmap_generator::{generate_devmap_from_file, GeneratorConfig, OutputMode};
//!
//! let config = GeneratorConfig::new(OutputMode::Ada);
//! let code = generate_devmap_from_file(Path::new("devmap.json"), &config).unwrap();
//! print!("{code}");
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Output modes, templates and generator options
//! - [`types`]: Devices as read from the input
//! - [`load`]: JSON loading
//! - [`encode`]: Field encoders (literals, identifiers, interrupt slots)
//! - [`output`]: The encoded table and its code generation
//! - [`util`]: Lookahead iteration and padding helpers

pub mod config;
pub mod encode;
pub mod error;
pub mod load;
pub mod output;
pub mod types;
pub mod util;

mod codegen;

pub use codegen::{generate_devmap, generate_devmap_from_file, generate_devmap_from_str};
pub use config::{GeneratorConfig, OutputMode};
pub use error::{DevmapError, DevmapResult};
pub use output::DeviceTable;
pub use types::{Device, DeviceRecord};
