// Licensed under the Apache-2.0 license

//! The encoded device table and the code that prints it.
//!
//! ## Code Generation Flow
//!
//! ```text
//! Device[]       → filter block devices → EncodedDevice[] → DeviceTable
//!                                                            ├── t_periph_id enumeration
//!                                                            └── periphs table aggregate
//! ```
//!
//! ## Generated Code Structure
//!
//! ```text
//!    type t_periph_id is (
//!       NO_PERIPH
//!      ,USART1
//!      ,USART2
//!    );
//!
//!
//!    periphs : constant array (...) of t_periph_info := (
//!     USART1           => ( "USART1          ", 16#40011000#, ... )
//!    ,USART2           => ( "USART2          ", 16#40004400#, ... )
//! ```
//!
//! The closing `);` of the table aggregate belongs to the footer template.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use log::{debug, warn};

use crate::config::{GeneratorConfig, OutputMode, NAME_WIDTH, NO_PERIPH};
use crate::encode::{encode_device, EncodedDevice};
use crate::error::{DevmapError, DevmapResult};
use crate::types::Device;
use crate::util::Lookahead;

/// Block devices of one document, encoded and in document order.
#[derive(Clone, Debug, Default)]
pub struct DeviceTable {
    pub devices: Vec<EncodedDevice>,
}

impl DeviceTable {
    /// Filters out non-block devices and encodes the rest.
    ///
    /// Fails on the first device that cannot be encoded, or when two devices
    /// map to the same identifier.
    pub fn from_devices(devices: &[Device], config: &GeneratorConfig) -> DevmapResult<Self> {
        let mut identifiers = HashSet::new();
        let mut padded_names: HashMap<String, String> = HashMap::new();
        let mut encoded = Vec::new();

        for device in devices {
            let device = match device {
                Device::Block(record) => encode_device(record, config)?,
                Device::Skipped { kind, name } => {
                    debug!(
                        "Skipping {} device {}",
                        kind,
                        name.as_deref().unwrap_or("<unnamed>")
                    );
                    continue;
                }
            };
            if !identifiers.insert(device.identifier.clone()) {
                return Err(DevmapError::DuplicateIdentifier(device.identifier));
            }
            if let Some(other) = padded_names.get(&device.padded_name) {
                warn!(
                    "{} and {} share the table name \"{}\"",
                    other, device.identifier, device.padded_name
                );
            } else {
                padded_names.insert(device.padded_name.clone(), device.identifier.clone());
            }
            encoded.push(device);
        }

        Ok(Self { devices: encoded })
    }

    /// Number of values in the generated identifier enumeration, sentinel
    /// included.
    pub fn enumeration_len(&self) -> usize {
        self.devices.len() + 1
    }

    /// Generates the body that goes between the header and footer templates.
    pub fn generate_code(&self, mode: OutputMode) -> String {
        let mut output = String::new();
        match mode {
            OutputMode::Ada => {
                self.generate_ada_enumeration(&mut output);
                self.generate_ada_table(&mut output);
            }
        }
        output
    }

    fn generate_ada_enumeration(&self, output: &mut String) {
        writeln!(output, "   type t_periph_id is (").unwrap();
        writeln!(output, "      {NO_PERIPH}").unwrap();
        for device in &self.devices {
            writeln!(output, "     ,{}", device.identifier).unwrap();
        }
        writeln!(output, "   );\n\n").unwrap();
    }

    fn generate_ada_table(&self, output: &mut String) {
        writeln!(
            output,
            "   periphs : constant array (t_periph_id range t_periph_id'succ (t_periph_id'first) .. t_periph_id'last) of t_periph_info := ("
        )
        .unwrap();

        // The separator of an entry is written once the next one is known to
        // exist, so it ends up as the prefix of the following line.
        if !self.devices.is_empty() {
            output.push_str("    ");
        }
        for (device, has_more) in self.devices.iter().lookahead() {
            // The choice must name the enumeration value, so only the name
            // string is cut to the column width.
            writeln!(
                output,
                "{key:<width$} => ( \"{name}\", {addr}, {size}, {subregions}, ( {irqs} ), {ro})",
                key = device.identifier,
                width = NAME_WIDTH,
                name = device.padded_name,
                addr = device.address,
                size = device.size,
                subregions = device.subregions,
                irqs = device.interrupts.join(", "),
                ro = if device.read_only { "True" } else { "False" },
            )
            .unwrap();
            if has_more {
                output.push_str("   ,");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load_devices;

    fn table(json: &str) -> DeviceTable {
        let devices = load_devices(json).unwrap();
        DeviceTable::from_devices(&devices, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_single_entry() {
        let table = table(
            r#"[{ "type": "block", "name": "usart1", "address": "0x40011000", "size": "0x400",
                  "memory_subregion_mask": "0", "read_only": false,
                  "irqs": [ { "value": 53 } ] }]"#,
        );
        let code = table.generate_code(OutputMode::Ada);
        assert_eq!(
            code,
            concat!(
                "   type t_periph_id is (\n",
                "      NO_PERIPH\n",
                "     ,USART1\n",
                "   );\n\n\n",
                "   periphs : constant array (t_periph_id range t_periph_id'succ (t_periph_id'first) .. t_periph_id'last) of t_periph_info := (\n",
                "    USART1           => ( \"USART1          \", 16#40011000#, 16#400#, 0, ( t_interrupt'val(53), INT_NONE, INT_NONE, INT_NONE ), False)\n",
            )
        );
    }

    #[test]
    fn test_separators_skip_trailing_non_block() {
        let table = table(
            r#"[
                { "type": "block", "name": "a", "address": "0x1000", "size": "0x100",
                  "memory_subregion_mask": "0", "read_only": true },
                { "type": "other", "name": "b" },
                { "type": "block", "name": "c", "address": "0x2000", "size": "0x100",
                  "memory_subregion_mask": "0b11000000", "read_only": false },
                { "type": "clock", "name": "d" }
            ]"#,
        );
        assert_eq!(table.enumeration_len(), 3);
        let code = table.generate_code(OutputMode::Ada);
        assert!(code.contains("      NO_PERIPH\n     ,A\n     ,C\n   );"));
        assert!(!code.contains(",B"));
        let rows: Vec<_> = code.lines().skip_while(|l| !l.contains("periphs")).skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("    A                => "));
        assert!(rows[1].starts_with("   ,C                => "));
        assert!(rows[1].ends_with("2#11000000#, ( INT_NONE, INT_NONE, INT_NONE, INT_NONE ), False)"));
        assert!(!code.ends_with(","));
    }

    #[test]
    fn test_empty_table() {
        let table = table("[]");
        assert_eq!(table.enumeration_len(), 1);
        let code = table.generate_code(OutputMode::Ada);
        assert!(code.contains("   type t_periph_id is (\n      NO_PERIPH\n   );"));
        assert!(code.ends_with("of t_periph_info := (\n"));
    }

    #[test]
    fn test_duplicate_identifier() {
        let devices = load_devices(
            r#"[
                { "type": "block", "name": "usart-1", "address": "0", "size": "0",
                  "memory_subregion_mask": "0", "read_only": true },
                { "type": "block", "name": "USART_1", "address": "0", "size": "0",
                  "memory_subregion_mask": "0", "read_only": true }
            ]"#,
        )
        .unwrap();
        match DeviceTable::from_devices(&devices, &GeneratorConfig::default()) {
            Err(DevmapError::DuplicateIdentifier(id)) => assert_eq!(id, "USART_1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_shared_padded_name_is_allowed() {
        let table = table(
            r#"[
                { "type": "block", "name": "crypto-processor-in", "address": "0", "size": "0",
                  "memory_subregion_mask": "0", "read_only": true },
                { "type": "block", "name": "crypto-processor-out", "address": "0", "size": "0",
                  "memory_subregion_mask": "0", "read_only": true }
            ]"#,
        );
        assert_eq!(table.devices[0].padded_name, table.devices[1].padded_name);
        assert_ne!(table.devices[0].identifier, table.devices[1].identifier);
    }
}
