// Licensed under the Apache-2.0 license

//! Loading the JSON device list.

use std::path::Path;

use log::info;
use serde_json::Value;

use crate::error::{DevmapError, DevmapResult};
use crate::types::{Device, BLOCK_KIND};

/// Reads and parses a device list file.
pub fn load_devices_from_file(path: &Path) -> DevmapResult<Vec<Device>> {
    let data = std::fs::read_to_string(path).map_err(|source| DevmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let devices = load_devices(&data)?;
    info!("Loaded {} devices from {}", devices.len(), path.display());
    Ok(devices)
}

/// Parses a device list. The returned devices are in document order.
///
/// Only block devices are read past their `type`. Other devices keep their
/// kind and name, if the name is a string, and nothing else is checked.
pub fn load_devices(data: &str) -> DevmapResult<Vec<Device>> {
    let document: Value =
        serde_json::from_str(data).map_err(|e| DevmapError::MalformedInput(e.to_string()))?;
    let Value::Array(entries) = document else {
        return Err(DevmapError::MalformedInput(
            "top-level value is not an array".into(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let Some(object) = entry.as_object() else {
                return Err(DevmapError::MalformedInput(format!(
                    "entry {i} is not an object"
                )));
            };
            let Some(kind) = object.get("type").and_then(Value::as_str) else {
                return Err(DevmapError::MalformedInput(format!(
                    "entry {i} has no string `type`"
                )));
            };
            if kind != BLOCK_KIND {
                return Ok(Device::Skipped {
                    kind: kind.to_string(),
                    name: object.get("name").and_then(Value::as_str).map(str::to_string),
                });
            }
            serde_json::from_value(entry)
                .map(Device::Block)
                .map_err(|e| DevmapError::MalformedInput(format!("entry {i}: {e}")))
        })
        .collect()
}
