// Licensed under the Apache-2.0 license

//! Model documents and their elaboration.
//!
//! A model document is a JSON or TOML file describing address maps,
//! register files, registers and fields. Addresses and bit positions may be
//! left out; elaboration fills them in (compact placement) and reports the
//! corresponding warnings when they are enabled.
//!
//! ```text
//! {
//!   "addrmaps": [{
//!     "name": "ctrl_regs",
//!     "children": [
//!       { "type": "reg", "name": "CTRL", "offset": 0,
//!         "fields": [ { "name": "EN", "lsb": 0, "reset": 0 },
//!                     { "name": "IRQ", "lsb": 1, "intr": true } ] }
//!     ]
//!   }]
//! }
//! ```

use crate::diag::{DiagnosticSink, SourceRef};
use crate::error::{ModelError, ModelResult};
use crate::model::{
    implements_storage, AccessType, AddrMap, Component, Field, RegFile, Register, RegisterModel,
};
use crate::warnings::WarningSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

//=============================================================================
// Document types
//=============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub addrmaps: Vec<AddrMapDesc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentDesc {
    Addrmap(AddrMapDesc),
    Regfile(AddrMapDesc),
    Reg(RegDesc),
}

/// Address map or register file description.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddrMapDesc {
    pub name: String,
    pub offset: Option<u64>,
    pub desc: Option<String>,
    #[serde(default)]
    pub children: Vec<ComponentDesc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegDesc {
    pub name: String,
    pub offset: Option<u64>,
    #[serde(default = "default_regwidth")]
    pub regwidth: u32,
    pub desc: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDesc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDesc {
    pub name: String,
    pub lsb: Option<u32>,
    pub msb: Option<u32>,
    pub width: Option<u32>,
    #[serde(default)]
    pub sw: AccessType,
    #[serde(default)]
    pub hw: AccessType,
    pub reset: Option<u64>,
    pub reset_mask: Option<u64>,
    #[serde(default)]
    pub intr: bool,
    #[serde(default = "default_ispresent")]
    pub ispresent: bool,
    pub desc: Option<String>,
}

fn default_regwidth() -> u32 {
    32
}

fn default_ispresent() -> bool {
    true
}

impl ModelDocument {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

//=============================================================================
// Elaboration
//=============================================================================

/// Turns document descriptions into the elaborated model.
pub struct Elaborator<'s> {
    warnings: WarningSet,
    sink: &'s mut dyn DiagnosticSink,
    file: Option<PathBuf>,
}

impl<'s> Elaborator<'s> {
    pub fn new(warnings: WarningSet, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            warnings,
            sink,
            file: None,
        }
    }

    /// Attach a file name to the diagnostics reported from now on.
    pub fn set_file(&mut self, file: Option<PathBuf>) {
        self.file = file;
    }

    pub fn elaborate(&mut self, doc: &ModelDocument) -> ModelResult<Vec<AddrMap>> {
        doc.addrmaps
            .iter()
            .map(|desc| {
                let offset = desc.offset.unwrap_or(0);
                let children = self.elaborate_children(&desc.name, &desc.children)?;
                Ok(AddrMap {
                    name: desc.name.clone(),
                    offset,
                    children,
                    desc: desc.desc.clone(),
                })
            })
            .collect()
    }

    fn src_ref(&self, path: &str) -> SourceRef {
        SourceRef {
            file: self.file.clone(),
            path: Some(path.to_string()),
        }
    }

    fn warn(&mut self, path: &str, message: &str) {
        let src_ref = self.src_ref(path);
        self.sink.warning(message, Some(&src_ref));
    }

    fn elaborate_children(
        &mut self,
        prefix: &str,
        children: &[ComponentDesc],
    ) -> ModelResult<Vec<Component>> {
        let mut result: Vec<Component> = Vec::with_capacity(children.len());
        let mut next_offset = 0u64;
        for child in children {
            let (name, explicit_offset) = match child {
                ComponentDesc::Addrmap(desc) | ComponentDesc::Regfile(desc) => {
                    (&desc.name, desc.offset)
                }
                ComponentDesc::Reg(desc) => (&desc.name, desc.offset),
            };
            let path = format!("{prefix}.{name}");
            let mut component = match child {
                ComponentDesc::Addrmap(desc) => Component::AddrMap(AddrMap {
                    name: desc.name.clone(),
                    offset: 0,
                    children: self.elaborate_children(&path, &desc.children)?,
                    desc: desc.desc.clone(),
                }),
                ComponentDesc::Regfile(desc) => Component::RegFile(RegFile {
                    name: desc.name.clone(),
                    offset: 0,
                    children: self.elaborate_children(&path, &desc.children)?,
                    desc: desc.desc.clone(),
                }),
                ComponentDesc::Reg(desc) => Component::Reg(self.elaborate_reg(&path, desc)?),
            };

            let offset = match explicit_offset {
                Some(offset) => offset,
                None => {
                    let align = alignment(&component);
                    let offset = next_offset
                        .div_ceil(align)
                        .checked_mul(align)
                        .ok_or_else(|| elaboration_error(&path, "address out of range"))?;
                    if self.warnings.implicit_addr {
                        self.warn(
                            &path,
                            &format!("'{name}' has no explicit address; placed at 0x{offset:x}"),
                        );
                    }
                    offset
                }
            };
            match &mut component {
                Component::AddrMap(addrmap) => addrmap.offset = offset,
                Component::RegFile(regfile) => regfile.offset = offset,
                Component::Reg(reg) => reg.offset = offset,
            }
            let end = offset
                .checked_add(size(&component))
                .ok_or_else(|| elaboration_error(&path, "address out of range"))?;
            next_offset = next_offset.max(end);
            result.push(component);
        }
        Ok(result)
    }

    fn elaborate_reg(&mut self, path: &str, desc: &RegDesc) -> ModelResult<Register> {
        if !matches!(desc.regwidth, 8 | 16 | 32 | 64) {
            return Err(elaboration_error(
                path,
                format!("unsupported register width {}", desc.regwidth),
            ));
        }

        let mut fields = Vec::with_capacity(desc.fields.len());
        let mut used: u128 = 0;
        let mut next_bit = 0u32;
        for field in &desc.fields {
            let field_path = format!("{path}.{}", field.name);
            let low = match field.lsb {
                Some(lsb) => lsb,
                None => {
                    if self.warnings.implicit_field_pos {
                        self.warn(
                            &field_path,
                            &format!(
                                "field '{}' has no explicit bit position; placed at bit {next_bit}",
                                field.name
                            ),
                        );
                    }
                    next_bit
                }
            };
            let high = match (field.msb, field.width) {
                (_, Some(0)) => {
                    return Err(elaboration_error(&field_path, "field width must not be 0"));
                }
                (Some(msb), Some(width)) if low.checked_add(width - 1) != Some(msb) => {
                    return Err(elaboration_error(
                        &field_path,
                        format!("msb {msb} does not match lsb {low} and width {width}"),
                    ));
                }
                (Some(msb), _) => msb,
                (None, width) => low.checked_add(width.unwrap_or(1) - 1).ok_or_else(|| {
                    elaboration_error(&field_path, format!("field at bit {low} is out of range"))
                })?,
            };
            if high < low {
                return Err(elaboration_error(
                    &field_path,
                    format!("msb {high} is below lsb {low}"),
                ));
            }
            if high >= desc.regwidth {
                return Err(elaboration_error(
                    &field_path,
                    format!(
                        "bits [{high}:{low}] exceed the {}-bit register",
                        desc.regwidth
                    ),
                ));
            }
            let mask = ((1u128 << (high - low + 1)) - 1) << low;
            if used & mask != 0 {
                return Err(elaboration_error(
                    &field_path,
                    format!("bits [{high}:{low}] overlap another field"),
                ));
            }
            used |= mask;
            next_bit = high + 1;

            let width = high - low + 1;
            for (property, value) in [("reset", field.reset), ("reset_mask", field.reset_mask)] {
                if let Some(value) = value.filter(|value| !fits(*value, width)) {
                    return Err(elaboration_error(
                        &field_path,
                        format!("{property} 0x{value:x} does not fit in {width} bits"),
                    ));
                }
            }

            let elaborated = Field {
                name: field.name.clone(),
                high,
                low,
                sw: field.sw,
                hw: field.hw,
                reset: field.reset,
                reset_mask: field.reset_mask,
                intr: field.intr,
                ispresent: field.ispresent,
                desc: field.desc.clone(),
            };
            if self.warnings.missing_reset
                && elaborated.reset.is_none()
                && implements_storage(&elaborated)
            {
                self.warn(
                    &field_path,
                    &format!("field '{}' implements storage but has no reset", field.name),
                );
            }
            fields.push(elaborated);
        }

        Ok(Register {
            name: desc.name.clone(),
            offset: 0,
            width: desc.regwidth,
            fields,
            desc: desc.desc.clone(),
        })
    }
}

fn elaboration_error(path: &str, message: impl Into<String>) -> ModelError {
    ModelError::Elaboration {
        path: path.to_string(),
        message: message.into(),
    }
}

fn fits(value: u64, width: u32) -> bool {
    width >= 64 || value >> width == 0
}

/// Byte size occupied by a component.
fn size(component: &Component) -> u64 {
    match component {
        Component::Reg(reg) => u64::from(reg.width / 8),
        Component::AddrMap(AddrMap { children, .. })
        | Component::RegFile(RegFile { children, .. }) => children
            .iter()
            .map(|c| c.offset() + size(c))
            .max()
            .unwrap_or(0),
    }
}

/// Placement alignment: the widest register (in bytes) inside the component.
fn alignment(component: &Component) -> u64 {
    match component {
        Component::Reg(reg) => u64::from(reg.width / 8),
        Component::AddrMap(AddrMap { children, .. })
        | Component::RegFile(RegFile { children, .. }) => {
            children.iter().map(alignment).max().unwrap_or(1)
        }
    }
}

//=============================================================================
// Loading
//=============================================================================

/// Loads model documents from disk and elaborates them into one model.
#[derive(Clone, Debug, Default)]
pub struct ModelLoader {
    pub include_dirs: Vec<PathBuf>,
    pub warnings: WarningSet,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    pub fn warnings(mut self, warnings: WarningSet) -> Self {
        self.warnings = warnings;
        self
    }

    /// Locate a source document: as given first, then in each include
    /// directory in order.
    pub fn resolve(&self, file: &Path) -> ModelResult<PathBuf> {
        if file.exists() {
            return Ok(file.to_path_buf());
        }
        if file.is_relative() {
            for dir in &self.include_dirs {
                let candidate = dir.join(file);
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }
        Err(ModelError::NotFound(file.to_path_buf()))
    }

    pub fn read_document(&self, path: &Path) -> ModelResult<ModelDocument> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ModelDocument::from_json_str(&text).map_err(|source| ModelError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Some("toml") => ModelDocument::from_toml_str(&text).map_err(|source| ModelError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load every source in order; their address maps are concatenated.
    pub fn load<P: AsRef<Path>>(
        &self,
        sources: &[P],
        sink: &mut dyn DiagnosticSink,
    ) -> ModelResult<RegisterModel> {
        let mut model = RegisterModel::default();
        for source in sources {
            let path = self.resolve(source.as_ref())?;
            sink.info(&format!("loading register model '{}'", path.display()));
            let doc = self.read_document(&path)?;
            let mut elaborator = Elaborator::new(self.warnings, sink);
            elaborator.set_file(Some(path));
            model.roots.extend(elaborator.elaborate(&doc)?);
        }
        Ok(model)
    }
}

impl RegisterModel {
    /// Like [`RegisterModel::top`], but reports why nothing was found.
    pub fn require_top(&self, name: Option<&str>) -> ModelResult<&AddrMap> {
        self.top(name).ok_or_else(|| match name {
            Some(name) => elaboration_error(name, "top-level address map not found"),
            None => elaboration_error("<root>", "no address map defined"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{CollectingSink, Severity};

    fn elaborate(
        json: &str,
        warnings: WarningSet,
        sink: &mut CollectingSink,
    ) -> ModelResult<Vec<AddrMap>> {
        let doc = ModelDocument::from_json_str(json).unwrap();
        Elaborator::new(warnings, sink).elaborate(&doc)
    }

    fn reg(component: &Component) -> &Register {
        match component {
            Component::Reg(reg) => reg,
            other => panic!("expected a register, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_layout() {
        let mut sink = CollectingSink::new();
        let maps = elaborate(
            r#"{ "addrmaps": [ { "name": "top", "children": [
                { "type": "reg", "name": "CTRL", "offset": 16, "fields": [
                    { "name": "EN", "lsb": 0, "reset": 0, "hw": "r" },
                    { "name": "MODE", "lsb": 1, "msb": 3, "sw": "r", "hw": "w" },
                    { "name": "IRQ", "lsb": 4, "intr": true, "ispresent": false }
                ] } ] } ] }"#,
            WarningSet::all(),
            &mut sink,
        )
        .unwrap();
        let ctrl = reg(&maps[0].children[0]);
        assert_eq!(ctrl.offset, 0x10);
        assert_eq!(ctrl.width, 32);
        assert_eq!((ctrl.fields[1].high, ctrl.fields[1].low), (3, 1));
        assert_eq!(ctrl.fields[1].hw, AccessType::W);
        assert!(ctrl.fields[2].intr && !ctrl.fields[2].ispresent);
        // MODE is not software writable, IRQ is an interrupt: neither needs a reset.
        assert_eq!(sink.count(Severity::Warning), 0);
    }

    #[test]
    fn test_implicit_placement_and_warnings() {
        let mut sink = CollectingSink::new();
        let maps = elaborate(
            r#"{ "addrmaps": [ { "name": "top", "children": [
                { "type": "reg", "name": "A", "regwidth": 16,
                  "fields": [ { "name": "x", "width": 4 }, { "name": "y" } ] },
                { "type": "reg", "name": "B", "fields": [ { "name": "z", "reset": 1 } ] },
                { "type": "regfile", "name": "RF", "children": [
                    { "type": "reg", "name": "C", "offset": 0 } ] }
            ] } ] }"#,
            WarningSet::all(),
            &mut sink,
        )
        .unwrap();
        let children = &maps[0].children;
        assert_eq!(children[0].offset(), 0x0);
        assert_eq!(children[1].offset(), 0x4);
        assert_eq!(children[2].offset(), 0x8);
        let a = reg(&children[0]);
        assert_eq!((a.fields[0].high, a.fields[0].low), (3, 0));
        assert_eq!((a.fields[1].high, a.fields[1].low), (4, 4));

        // 3 implicit addresses, 3 implicit field positions, 2 missing resets
        let warnings = sink.messages(Severity::Warning);
        assert_eq!(warnings.len(), 8, "{warnings:?}");
        assert_eq!(
            sink.diagnostics[0].src_ref.as_ref().unwrap().path.as_deref(),
            Some("top.A.x")
        );
    }

    #[test]
    fn test_warnings_disabled() {
        let mut sink = CollectingSink::new();
        elaborate(
            r#"{ "addrmaps": [ { "name": "top", "children": [
                { "type": "reg", "name": "A", "fields": [ { "name": "x" } ] } ] } ] }"#,
            WarningSet::none(),
            &mut sink,
        )
        .unwrap();
        assert!(sink.diagnostics.is_empty());
    }

    #[test]
    fn test_elaboration_errors() {
        let cases = [
            (
                r#"{ "type": "reg", "name": "A", "regwidth": 24 }"#,
                "unsupported register width",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 30, "width": 4 } ] }"#,
                "exceed",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 0, "width": 4 }, { "name": "y", "lsb": 3 } ] }"#,
                "overlap",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 4, "msb": 2 } ] }"#,
                "below",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 0, "msb": 2, "width": 2 } ] }"#,
                "does not match",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 4294967295 } ] }"#,
                "exceed",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 4294967295, "width": 2 } ] }"#,
                "out of range",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 2, "msb": 4294967295, "width": 4294967295 } ] }"#,
                "does not match",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 0, "width": 4, "reset": 511 } ] }"#,
                "reset 0x1ff does not fit in 4 bits",
            ),
            (
                r#"{ "type": "reg", "name": "A", "fields": [
                    { "name": "x", "lsb": 0, "width": 4, "reset": 0, "reset_mask": 16 } ] }"#,
                "reset_mask 0x10 does not fit in 4 bits",
            ),
            (
                r#"{ "type": "reg", "name": "A", "offset": 18446744073709551615 }"#,
                "address out of range",
            ),
        ];
        for (reg, expected) in cases {
            let json =
                format!(r#"{{ "addrmaps": [ {{ "name": "top", "children": [ {reg} ] }} ] }}"#);
            let mut sink = CollectingSink::new();
            let err = elaborate(&json, WarningSet::none(), &mut sink).unwrap_err();
            assert!(matches!(err, ModelError::Elaboration { .. }), "{err}");
            assert!(err.to_string().contains(expected), "{err}");
        }
    }

    #[test]
    fn test_toml_document() {
        let doc = ModelDocument::from_toml_str(
            r#"
[[addrmaps]]
name = "top"

[[addrmaps.children]]
type = "reg"
name = "STATUS"
offset = 8

[[addrmaps.children.fields]]
name = "READY"
lsb = 0
sw = "r"
hw = "w"
"#,
        )
        .unwrap();
        let mut sink = CollectingSink::new();
        let maps = Elaborator::new(WarningSet::none(), &mut sink)
            .elaborate(&doc)
            .unwrap();
        let status = reg(&maps[0].children[0]);
        assert_eq!(status.offset, 8);
        assert_eq!(status.fields[0].sw, AccessType::R);
    }

    #[test]
    fn test_require_top() {
        let model = RegisterModel::default();
        assert!(model
            .require_top(None)
            .unwrap_err()
            .to_string()
            .contains("no address map"));
    }
}
