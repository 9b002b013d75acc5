// Licensed under the Apache-2.0 license

//! Output modes and generator options.
//!
//! [`OutputMode`] is the closed set of target formats the generator can emit.
//! Each mode owns a static [`Template`] holding the fixed text that surrounds
//! the generated body. [`GeneratorConfig`] carries the options that change how
//! device names are checked.

use std::fmt;
use std::str::FromStr;

/// Width of the name column in the peripheral table.
pub const NAME_WIDTH: usize = 16;

/// Number of interrupt slots in each table entry.
pub const INTERRUPT_SLOTS: usize = 4;

/// Enumeration value standing for "no peripheral".
pub const NO_PERIPH: &str = "NO_PERIPH";

/// Interrupt slot value standing for "no interrupt".
pub const INT_NONE: &str = "INT_NONE";

/// Fixed text placed before and after the generated body.
#[derive(Clone, Copy, Debug)]
pub struct Template {
    pub header: &'static str,
    pub footer: &'static str,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OutputMode {
    /// Ada package specification `soc.devmap`.
    Ada,
}

impl OutputMode {
    /// Every supported mode, in the order they are listed in usage text.
    pub const ALL: &'static [OutputMode] = &[OutputMode::Ada];

    /// Name of the mode on the command line.
    pub fn name(self) -> &'static str {
        match self {
            OutputMode::Ada => "ADA",
        }
    }

    pub fn template(self) -> &'static Template {
        match self {
            OutputMode::Ada => &ADA_TEMPLATE,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    /// Mode names are matched exactly, `ada` is not `ADA`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| {
                let supported: Vec<_> = OutputMode::ALL.iter().map(|m| m.name()).collect();
                format!(
                    "unsupported mode: {s} (supported: {})",
                    supported.join(", ")
                )
            })
    }
}

/// Options for a single generator run.
///
/// # Example
///
/// ```
/// use devmap_generator::config::{GeneratorConfig, OutputMode};
///
/// let config = GeneratorConfig::new(OutputMode::Ada).strict_names(true);
/// assert!(config.strict_names);
/// ```
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub mode: OutputMode,

    /// Reject identifiers wider than [`NAME_WIDTH`] instead of truncating
    /// them in the name column.
    pub strict_names: bool,
}

impl GeneratorConfig {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            strict_names: false,
        }
    }

    pub fn strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(OutputMode::Ada)
    }
}

static ADA_TEMPLATE: Template = Template {
    header: ADA_HEADER,
    footer: ADA_FOOTER,
};

const ADA_HEADER: &str = r#"
-- @file devmap.ads
--
-- Copyright 2018 The wookey project team <wookey@ssi.gouv.fr>
--   - Ryad     Benadjila
--   - Arnauld  Michelizza
--   - Mathieu  Renard
--   - Philippe Thierry
--   - Philippe Trebuchet
--
-- Licensed under the Apache License, Version 2.0 (the "License");
-- you may not use this file except in compliance with the License.
-- You may obtain a copy of the License at
--
--     http://www.apache.org/licenses/LICENSE-2.0
--
--     Unless required by applicable law or agreed to in writing, software
--     distributed under the License is distributed on an "AS IS" BASIS,
--     WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
--     See the License for the specific language governing permissions and
--     limitations under the License.
--
-- This file has been generated by tools/devmap.py
--
--

with soc.interrupts; use soc.interrupts;
with soc.dma;

package soc.devmap
   with spark_mode => on
is

   type t_interrupt_range is range 1 .. 4;
   type t_interrupt_list is array (t_interrupt_range)
      of soc.interrupts.t_interrupt;

   -- Structure defining the STM32 device map
   -- This table is based on doc STMicro RM0090 Reference manual memory map
   -- Only devices that may be registered in userspace are defined here

   type t_periph_info is record
      name             : string (1 .. 16);
      addr             : system_address;
      size             : unsigned_32;
      subregions       : unsigned_8;
      interrupt_list   : t_interrupt_list;
      ro               : boolean;
   end record;

   -- STM32F4 devices map
   -- This structure define all available devices and associated informations.
   -- This informations are separated in two parts:
   --   - physical information (IRQ lines, RCC references, physical address...)
   --   - security information (required permissions, usage restriction...)
"#;

const ADA_FOOTER: &str = r#");

   function find_periph
     (addr     : system_address;
      size     : unsigned_32)
      return t_periph_id;

   function find_dma_periph
     (id       : soc.dma.t_dma_periph_index;
      stream   : soc.dma.t_stream_index)
      return t_periph_id
         with
            post => find_dma_periph'result /= NO_PERIPH;


end soc.devmap;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("ADA".parse::<OutputMode>(), Ok(OutputMode::Ada));
        assert!("ada".parse::<OutputMode>().is_err());
        let err = "C".parse::<OutputMode>().unwrap_err();
        assert_eq!(err, "unsupported mode: C (supported: ADA)");
    }

    #[test]
    fn test_ada_template() {
        let template = OutputMode::Ada.template();
        assert!(template.header.starts_with("\n-- @file devmap.ads\n"));
        assert!(template.header.contains("name             : string (1 .. 16);"));
        assert!(template
            .header
            .contains("\n-- This file has been generated by tools/devmap.py\n"));
        assert!(template.footer.starts_with(");\n"));
        assert!(template.footer.ends_with("end soc.devmap;\n"));
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::default();
        assert_eq!(config.mode, OutputMode::Ada);
        assert!(!config.strict_names);
        assert!(config.strict_names(true).strict_names);
    }
}
