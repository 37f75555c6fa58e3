// Licensed under the Apache-2.0 license

//! Signal-level nodes: bit ranges, ports, declarations and assignments.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use strum::VariantNames;
use strum_macros::{Display, EnumString, EnumVariantNames};

/// Inclusive bit bounds. Bounds are signed so that degenerate ranges such as
/// `[-1:0]` (a zero-width vector) can be expressed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range {
    high: i64,
    low: i64,
}

impl Range {
    pub const fn new(high: i64, low: i64) -> Self {
        Self { high, low }
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn width(&self) -> i64 {
        self.high - self.low + 1
    }

    pub fn shift(&self, amount: i64) -> Self {
        Self::new(self.high + amount, self.low + amount)
    }

    /// Same width, moved so that the low bound is zero.
    pub fn shift_to_zero(&self) -> Self {
        self.shift(-self.low)
    }

    /// The bounds without brackets: `7` or `15:0`.
    pub fn bounds(&self) -> String {
        if self.high == self.low {
            self.high.to_string()
        } else {
            format!("{}:{}", self.high, self.low)
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.bounds())
    }
}

/// Bit width of an optional range; a missing range is a single bit.
pub fn range_width(range: Option<&Range>) -> i64 {
    range.map_or(1, Range::width)
}

#[derive(Clone, Copy, Debug, Display, EnumString, EnumVariantNames, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
    Inout,
}

impl PortDirection {
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Validation(format!(
                "Unknown direction '{s}'. Expected values: {}",
                Self::VARIANTS.join(", ")
            ))
        })
    }
}

#[derive(Clone, Copy, Debug, Display, EnumString, EnumVariantNames, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum SignalKind {
    Reg,
    Logic,
    Wire,
}

impl SignalKind {
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Validation(format!(
                "Unknown declaration type '{s}'. Expected values: {}",
                Self::VARIANTS.join(", ")
            ))
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Port {
    name: String,
    direction: PortDirection,
    range: Option<Range>,
}

impl Port {
    /// Builds a port from a textual direction, which must be one of
    /// `input`, `output` or `inout`.
    pub fn new(name: &str, direction: &str, range: Option<Range>) -> Result<Self> {
        Ok(Self::with_direction(
            name,
            PortDirection::parse(direction)?,
            range,
        ))
    }

    pub fn with_direction(name: &str, direction: PortDirection, range: Option<Range>) -> Self {
        Self {
            name: name.to_string(),
            direction,
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignalDeclaration {
    name: String,
    kind: SignalKind,
    range: Option<Range>,
}

impl SignalDeclaration {
    /// Builds a declaration from a textual kind, which must be one of
    /// `reg`, `logic` or `wire`.
    pub fn new(name: &str, kind: &str, range: Option<Range>) -> Result<Self> {
        Ok(Self::with_kind(name, SignalKind::parse(kind)?, range))
    }

    pub fn with_kind(name: &str, kind: SignalKind, range: Option<Range>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    lhs: String,
    rhs: String,
    lhs_range: Option<Range>,
    rhs_range: Option<Range>,
    continuous: bool,
}

impl Assignment {
    /// Fails when both sides have different bit widths.
    pub fn new(
        lhs: &str,
        rhs: &str,
        lhs_range: Option<Range>,
        rhs_range: Option<Range>,
        continuous: bool,
    ) -> Result<Self> {
        let lhs_width = range_width(lhs_range.as_ref());
        let rhs_width = range_width(rhs_range.as_ref());
        if lhs_width != rhs_width {
            return Err(Error::Validation(format!(
                "Width mismatch in assignment {lhs} = {rhs}: {lhs_width} != {rhs_width}"
            )));
        }
        Ok(Self {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            lhs_range,
            rhs_range,
            continuous,
        })
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    pub fn lhs_range(&self) -> Option<&Range> {
        self.lhs_range.as_ref()
    }

    pub fn rhs_range(&self) -> Option<&Range> {
        self.rhs_range.as_ref()
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }
}
