// Licensed under the Apache-2.0 license

//! Entry points for device map generation.
//!
//! A run is strictly sequential: load the device list, encode every block
//! device, emit the body, then wrap it in the header and footer of the
//! selected mode. The whole document is built in memory, so an error in any
//! step leaves nothing half written.


use std::fmt::Write;
use std::path::Path;

use log::debug;

use crate::config::GeneratorConfig;
use crate::error::DevmapResult;
use crate::load::{load_devices, load_devices_from_file};
use crate::output::DeviceTable;
use crate::types::Device;

/// Generates a device map document from a JSON device list file.
pub fn generate_devmap_from_file(path: &Path, config: &GeneratorConfig) -> DevmapResult<String> {
    let devices = load_devices_from_file(path)?;
    generate_devmap(&devices, config)
}

/// Generates a device map document from JSON text.
pub fn generate_devmap_from_str(data: &str, config: &GeneratorConfig) -> DevmapResult<String> {
    let devices = load_devices(data)?;
    generate_devmap(&devices, config)
}

/// Generates a device map document from already loaded devices.
pub fn generate_devmap(devices: &[Device], config: &GeneratorConfig) -> DevmapResult<String> {
    let table = DeviceTable::from_devices(devices, config)?;
    debug!(
        "Generating {} table with {} of {} devices",
        config.mode,
        table.devices.len(),
        devices.len()
    );
    Ok(assemble(&table, config))
}

fn assemble(table: &DeviceTable, config: &GeneratorConfig) -> String {
    let template = config.mode.template();
    let mut output = String::new();
    writeln!(output, "{}", template.header).unwrap();
    output.push_str(&table.generate_code(config.mode));
    writeln!(output, "{}", template.footer).unwrap();
    output
}
