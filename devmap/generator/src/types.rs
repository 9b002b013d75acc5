// Licensed under the Apache-2.0 license

//! Device records as they appear in the input document.

use serde::Deserialize;
use serde_json::Value;

/// Device kind that gets a table entry. Every other kind is skipped.
pub const BLOCK_KIND: &str = "block";

/// One entry of the input device list, in document order.
#[derive(Clone, Debug)]
pub enum Device {
    /// A register block that gets an enumeration value and a table entry.
    Block(DeviceRecord),
    /// Any other kind of device. Only its kind and name are kept, for logs.
    Skipped { kind: String, name: Option<String> },
}

impl Device {
    pub fn as_block(&self) -> Option<&DeviceRecord> {
        match self {
            Device::Block(record) => Some(record),
            Device::Skipped { .. } => None,
        }
    }
}

/// Fields of a block device.
///
/// Only `name` is required at load time. The remaining fields are checked
/// when the device is encoded, so that the error names the device.
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    /// Base address, `0` or a `0x` literal.
    pub address: Option<String>,
    /// Region size, `0` or a `0x` literal.
    pub size: Option<String>,
    /// MPU subregion mask, `0` or a `0b` literal.
    pub memory_subregion_mask: Option<String>,
    pub read_only: Option<bool>,
    pub irqs: Option<Vec<IrqRecord>>,
}

impl DeviceRecord {
    pub fn irqs(&self) -> &[IrqRecord] {
        self.irqs.as_deref().unwrap_or_default()
    }
}

/// An interrupt line used by a device.
#[derive(Clone, Debug, Deserialize)]
pub struct IrqRecord {
    /// Interrupt number, as a JSON integer or a decimal string.
    pub value: Value,
}
