// Licensed under the Apache-2.0 license

//! Signal naming and literal formatting helpers.
//!
//! Every generated signal name is built here so that synthesis tools and
//! templates agree on the conventions:
//!
//! | Signal                      | Name                        |
//! |-----------------------------|-----------------------------|
//! | hardware port of a field    | `hw_<reg>__<field>`         |
//! | per-register wire           | `reg_<reg>__<suffix>`       |
//! | per-interrupt wire          | `intr_<field>_<suffix>`     |

/// Suffix of the per-register write strobe.
pub const SELECT_SUFFIX: &str = "select";

/// Name of the hardware port exported for a field.
///
/// # Examples
/// ```
/// use rtlgen_generator::util::hw_port_name;
/// assert_eq!(hw_port_name("CTRL", "EN"), "hw_CTRL__EN");
/// ```
pub fn hw_port_name(reg: &str, field: &str) -> String {
    format!("hw_{reg}__{field}")
}

/// Prefix shared by the wires of one register.
pub fn register_prefix(reg: &str) -> String {
    format!("reg_{reg}__")
}

/// Name of one of the wires of a register.
///
/// # Examples
/// ```
/// use rtlgen_generator::util::register_signal;
/// assert_eq!(register_signal("CTRL", "data_in"), "reg_CTRL__data_in");
/// ```
pub fn register_signal(reg: &str, suffix: &str) -> String {
    format!("{}{suffix}", register_prefix(reg))
}

/// Prefix shared by the wires of one interrupt.
pub fn interrupt_prefix(intr: &str) -> String {
    format!("intr_{intr}_")
}

pub fn interrupt_signal(intr: &str, suffix: &str) -> String {
    format!("{}{suffix}", interrupt_prefix(intr))
}

/// Returns true for names usable as HDL identifiers: a letter or
/// underscore followed by letters, digits or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Formats a register offset for labels: `0x` and eight hex digits.
///
/// # Examples
/// ```
/// use rtlgen_generator::util::hex_offset;
/// assert_eq!(hex_offset(0x14), "0x00000014");
/// ```
pub fn hex_offset(offset: u64) -> String {
    format!("0x{offset:08x}")
}

/// Formats a sized hex literal with underscores every 4 digits.
///
/// # Examples
/// ```
/// use rtlgen_generator::util::sized_hex;
/// assert_eq!(sized_hex(8, 0x5), "8'h5");
/// assert_eq!(sized_hex(64, 0x12345678), "64'h1234_5678");
/// ```
pub fn sized_hex(width: u32, val: u64) -> String {
    let mut x = String::new();
    for (i, c) in format!("{val:x}").chars().rev().enumerate() {
        if i % 4 == 0 && i != 0 {
            x.push('_');
        }
        x.push(c);
    }
    format!("{width}'h{}", x.chars().rev().collect::<String>())
}

/// Mask with the lowest `width` bits set.
pub fn low_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
