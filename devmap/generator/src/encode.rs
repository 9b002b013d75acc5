// Licensed under the Apache-2.0 license

//! Field encoders: turn raw device fields into Ada literal syntax.
//!
//! - [`ada_literal`] rewrites `0x`/`0b` strings into Ada based literals
//! - [`sanitize_identifier`] turns a device name into an Ada identifier
//! - [`encode_interrupts`] fills the fixed interrupt slots
//! - [`encode_device`] applies all of the above to one block device

use log::warn;
use serde_json::Value;

use crate::config::{GeneratorConfig, INTERRUPT_SLOTS, INT_NONE, NAME_WIDTH, NO_PERIPH};
use crate::error::{DevmapError, DevmapResult};
use crate::types::{DeviceRecord, IrqRecord};
use crate::util::pad_to_width;

/// Base of a prefixed numeric literal in the input document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiteralBase {
    /// `0x` prefix, emitted as `16#...#`.
    Hex,
    /// `0b` prefix, emitted as `2#...#`.
    Binary,
}

impl LiteralBase {
    fn prefix(self) -> &'static str {
        match self {
            LiteralBase::Hex => "0x",
            LiteralBase::Binary => "0b",
        }
    }

    fn radix(self) -> u32 {
        match self {
            LiteralBase::Hex => 16,
            LiteralBase::Binary => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiteralError {
    /// Not `0` and not a well-formed literal of the requested base.
    Invalid,
    /// Well-formed, but wider than the destination.
    OutOfRange,
}

/// Rewrites a numeric literal into Ada based-literal syntax.
///
/// `"0"` passes through unchanged. The value must fit in `bits` bits.
///
/// # Examples
/// ```
/// use devmap_generator::encode::{ada_literal, LiteralBase};
/// assert_eq!(ada_literal("0x1000", LiteralBase::Hex, 32).unwrap(), "16#1000#");
/// assert_eq!(ada_literal("0b1100", LiteralBase::Binary, 8).unwrap(), "2#1100#");
/// assert_eq!(ada_literal("0", LiteralBase::Hex, 32).unwrap(), "0");
/// ```
pub fn ada_literal(value: &str, base: LiteralBase, bits: u32) -> Result<String, LiteralError> {
    if value == "0" {
        return Ok(value.to_string());
    }
    let digits = value
        .strip_prefix(base.prefix())
        .ok_or(LiteralError::Invalid)?;
    if !is_based_numeral(digits, base.radix()) {
        return Err(LiteralError::Invalid);
    }

    let plain: String = digits.chars().filter(|&c| c != '_').collect();
    let parsed = u64::from_str_radix(&plain, base.radix()).map_err(|_| LiteralError::OutOfRange)?;
    if bits < u64::BITS && parsed >> bits != 0 {
        return Err(LiteralError::OutOfRange);
    }

    Ok(format!("{}#{}#", base.radix(), digits))
}

/// Digits of the given radix, with single underscores allowed between digits.
fn is_based_numeral(digits: &str, radix: u32) -> bool {
    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c == '_' || c.is_digit(radix))
}

const ADA_RESERVED_WORDS: &[&str] = &[
    "abort", "abs", "abstract", "accept", "access", "aliased", "all", "and", "array", "at",
    "begin", "body", "case", "constant", "declare", "delay", "delta", "digits", "do", "else",
    "elsif", "end", "entry", "exception", "exit", "for", "function", "generic", "goto", "if",
    "in", "interface", "is", "limited", "loop", "mod", "new", "not", "null", "of", "or",
    "others", "out", "overriding", "package", "pragma", "private", "procedure", "protected",
    "raise", "range", "record", "rem", "renames", "requeue", "return", "reverse", "select",
    "separate", "some", "subtype", "synchronized", "tagged", "task", "terminate", "then", "type",
    "until", "use", "when", "while", "with", "xor",
];

/// Converts a device name into an Ada identifier.
///
/// The name is uppercased and every `-` becomes `_`. The result must be a
/// legal Ada identifier and must not shadow the [`NO_PERIPH`] sentinel.
///
/// # Examples
/// ```
/// use devmap_generator::encode::sanitize_identifier;
/// assert_eq!(sanitize_identifier("usart-1").unwrap(), "USART_1");
/// assert!(sanitize_identifier("1wire").is_err());
/// ```
pub fn sanitize_identifier(name: &str) -> DevmapResult<String> {
    let id = name.to_uppercase().replace('-', "_");
    let invalid = |reason: &'static str| {
        Err(DevmapError::InvalidIdentifier {
            name: id.clone(),
            reason,
        })
    };

    match id.chars().next() {
        None => return invalid("empty name"),
        Some(c) if !c.is_ascii_alphabetic() => return invalid("must start with a letter"),
        _ => {}
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return invalid("only letters, digits and underscores are allowed");
    }
    if id.contains("__") {
        return invalid("consecutive underscores");
    }
    if id.ends_with('_') {
        return invalid("trailing underscore");
    }
    if ADA_RESERVED_WORDS.contains(&id.to_ascii_lowercase().as_str()) {
        return invalid("reserved word");
    }
    if id == NO_PERIPH {
        return invalid("reserved for the no-peripheral sentinel");
    }
    Ok(id)
}

/// Fills the interrupt slots of a table entry.
///
/// Listed interrupts come first, in order, and the remaining slots get
/// [`INT_NONE`]. More than [`INTERRUPT_SLOTS`] interrupts is an error.
pub fn encode_interrupts(
    device: &str,
    irqs: &[IrqRecord],
) -> DevmapResult<[String; INTERRUPT_SLOTS]> {
    if irqs.len() > INTERRUPT_SLOTS {
        return Err(DevmapError::TooManyInterrupts {
            device: device.to_string(),
            count: irqs.len(),
            max: INTERRUPT_SLOTS,
        });
    }
    let lines = irqs
        .iter()
        .map(|irq| interrupt_line(device, &irq.value))
        .collect::<DevmapResult<Vec<_>>>()?;

    Ok(std::array::from_fn(|i| match lines.get(i) {
        Some(line) => format!("t_interrupt'val({line})"),
        None => INT_NONE.to_string(),
    }))
}

fn interrupt_line(device: &str, value: &Value) -> DevmapResult<u32> {
    let line = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    };
    line.ok_or_else(|| DevmapError::InvalidInterrupt {
        device: device.to_string(),
        value: value.to_string(),
    })
}

/// A block device with every field rendered as Ada source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedDevice {
    /// Sanitized identifier, used as the enumeration value.
    pub identifier: String,
    /// Identifier padded or truncated to [`NAME_WIDTH`] characters.
    pub padded_name: String,
    pub address: String,
    pub size: String,
    pub subregions: String,
    pub interrupts: [String; INTERRUPT_SLOTS],
    pub read_only: bool,
}

/// Encodes one block device.
pub fn encode_device(device: &DeviceRecord, config: &GeneratorConfig) -> DevmapResult<EncodedDevice> {
    let identifier = sanitize_identifier(&device.name)?;
    if identifier.len() > NAME_WIDTH {
        if config.strict_names {
            return Err(DevmapError::IdentifierTooLong {
                name: identifier,
                width: NAME_WIDTH,
            });
        }
        warn!(
            "Identifier {} is longer than {} characters, its name is truncated",
            identifier, NAME_WIDTH
        );
    }
    let padded_name = pad_to_width(&identifier, NAME_WIDTH);

    let address = literal_field(device, "address", &device.address, LiteralBase::Hex, 32)?;
    let size = literal_field(device, "size", &device.size, LiteralBase::Hex, 32)?;
    let subregions = literal_field(
        device,
        "memory_subregion_mask",
        &device.memory_subregion_mask,
        LiteralBase::Binary,
        8,
    )?;
    let interrupts = encode_interrupts(&device.name, device.irqs())?;
    let read_only = device.read_only.ok_or_else(|| missing(device, "read_only"))?;

    Ok(EncodedDevice {
        identifier,
        padded_name,
        address,
        size,
        subregions,
        interrupts,
        read_only,
    })
}

fn literal_field(
    device: &DeviceRecord,
    field: &'static str,
    value: &Option<String>,
    base: LiteralBase,
    bits: u32,
) -> DevmapResult<String> {
    let value = value.as_deref().ok_or_else(|| missing(device, field))?;
    ada_literal(value, base, bits).map_err(|e| match e {
        LiteralError::Invalid => DevmapError::InvalidNumericLiteral {
            device: device.name.clone(),
            field,
            value: value.to_string(),
        },
        LiteralError::OutOfRange => DevmapError::LiteralOutOfRange {
            device: device.name.clone(),
            field,
            value: value.to_string(),
            bits,
        },
    })
}

fn missing(device: &DeviceRecord, field: &'static str) -> DevmapError {
    DevmapError::MissingField {
        device: device.name.clone(),
        field,
    }
}
