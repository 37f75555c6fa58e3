// Licensed under the Apache-2.0 license

//! SystemVerilog rendering of every node kind.
//!
//! The generated design talks APB on the bus side. The interface module
//! turns APB transfers into a simple word-addressed bus (`bus_write`,
//! `bus_read`, `bus_word_addr`, `bus_wdata`, `bus_rdata`) which the backend
//! decodes into per-register select strobes.

use crate::template::{TemplateError, TemplateValues, Values};
use crate::util::{interrupt_signal, low_mask, register_signal, sized_hex, SELECT_SUFFIX};
use serde_json::Value;
use std::fmt::Write;

type Result = std::result::Result<String, TemplateError>;

/// Bit width of the word address taken from the 32-bit APB address.
const WORD_ADDR_WIDTH: u32 = 30;

const INDENT: &str = "    ";

fn vector(width: u64) -> String {
    if width <= 1 {
        String::new()
    } else {
        format!("[{}:0] ", width - 1)
    }
}

fn port_list(out: &mut String, ports: &[String]) -> std::fmt::Result {
    let last = ports.len().saturating_sub(1);
    for (i, port) in ports.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        writeln!(out, "{INDENT}{port}{sep}")?;
    }
    Ok(())
}

fn rendered_ports(v: &Values, key: &str) -> std::result::Result<Vec<String>, TemplateError> {
    Ok(v.array(key)?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{INDENT}//{}", "=".repeat(58))?;
    writeln!(out, "{INDENT}// {title}")?;
    writeln!(out, "{INDENT}//{}", "=".repeat(58))
}

pub fn range(values: &TemplateValues) -> Result {
    let v = Values::new("range", values);
    Ok(format!("[{}]", v.str("bounds")?))
}

pub fn port(values: &TemplateValues) -> Result {
    let v = Values::new("port", values);
    let range = v.opt_str("range");
    let range = if range.is_empty() {
        String::new()
    } else {
        format!("{range} ")
    };
    Ok(format!(
        "{} logic {range}{}",
        v.str("direction")?,
        v.str("name")?
    ))
}

pub fn signal_declaration(values: &TemplateValues) -> Result {
    let v = Values::new("signal_declaration", values);
    let range = v.opt_str("range");
    let range = if range.is_empty() {
        String::new()
    } else {
        format!("{range} ")
    };
    Ok(format!("{INDENT}{} {range}{};", v.str("kind")?, v.str("name")?))
}

pub fn assignment(values: &TemplateValues) -> Result {
    let v = Values::new("assignment", values);
    let keyword = if v.bool("continuous")? { "assign " } else { "" };
    Ok(format!(
        "{INDENT}{keyword}{}{} = {}{};",
        v.str("lhs")?,
        v.opt_str("lhs_range"),
        v.str("rhs")?,
        v.opt_str("rhs_range")
    ))
}

pub fn field_instance(values: &TemplateValues) -> Result {
    let v = Values::new("field_instance", values);
    let root = v.str("module_root_name")?;
    let reg = v.str("register")?;
    let field = v.str("field")?;
    let range = v.str("range")?;
    let width = v.u64("width")?;
    // A zero mask resets the whole field to its value.
    let mask = match v.u64("reset_mask")? {
        0 => low_mask(u32::try_from(width).unwrap_or(u32::MAX)),
        mask => mask,
    };
    let mut out = String::new();
    writeln!(out, "{INDENT}{root}_field #(")?;
    writeln!(out, "{INDENT}{INDENT}.WIDTH({width}),")?;
    writeln!(out, "{INDENT}{INDENT}.RESET_MASK({}),", sized_hex(64, mask))?;
    writeln!(out, "{INDENT}{INDENT}.RESET_VALUE({})", sized_hex(64, v.u64("reset_value")?))?;
    writeln!(out, "{INDENT}) u_{reg}__{field} (")?;
    writeln!(out, "{INDENT}{INDENT}.clk(pclk),")?;
    writeln!(out, "{INDENT}{INDENT}.rst_n(presetn),")?;
    writeln!(
        out,
        "{INDENT}{INDENT}.we({} & bus_write),",
        register_signal(reg, SELECT_SUFFIX)
    )?;
    writeln!(out, "{INDENT}{INDENT}.d({}{range}),", register_signal(reg, "data_in"))?;
    writeln!(out, "{INDENT}{INDENT}.q({}{range})", register_signal(reg, "data_out"))?;
    write!(out, "{INDENT});")?;
    Ok(out)
}

pub fn field_bypass(values: &TemplateValues) -> Result {
    let v = Values::new("field_bypass", values);
    let reg = v.str("register")?;
    let field = v.str("field")?;
    let width = v.u64("width")?;
    let status = interrupt_signal(field, "status");
    let status = if width > 1 {
        format!("{width}'({status})")
    } else {
        status
    };
    let mut out = String::new();
    writeln!(
        out,
        "{INDENT}assign {}{} = {status};",
        register_signal(reg, "data_out"),
        v.str("range")?
    )?;
    write!(
        out,
        "{INDENT}assign {} = {} & bus_write & {}[{}];",
        interrupt_signal(field, "clear"),
        register_signal(reg, SELECT_SUFFIX),
        register_signal(reg, "data_in"),
        v.u64("low")?
    )?;
    Ok(out)
}

pub fn interrupt_instance(values: &TemplateValues) -> Result {
    let v = Values::new("interrupt_instance", values);
    let root = v.str("module_root_name")?;
    let name = v.str("name")?;
    let mut out = String::new();
    writeln!(out, "{INDENT}assign {} = 1'b1;", interrupt_signal(name, "enable"))?;
    writeln!(
        out,
        "{INDENT}assign {} = {};",
        interrupt_signal(name, "set"),
        interrupt_signal(name, "event")
    )?;
    writeln!(out, "{INDENT}{root}_intr u_intr_{name} (")?;
    writeln!(out, "{INDENT}{INDENT}.clk(pclk),")?;
    writeln!(out, "{INDENT}{INDENT}.rst_n(presetn),")?;
    for (i, suffix) in ["enable", "set", "clear", "status"].iter().enumerate() {
        let sep = if i == 3 { "" } else { "," };
        writeln!(
            out,
            "{INDENT}{INDENT}.{suffix}({}){sep}",
            interrupt_signal(name, suffix)
        )?;
    }
    write!(out, "{INDENT});")?;
    Ok(out)
}

pub fn logical_group(values: &TemplateValues) -> Result {
    let v = Values::new("logical_group", values);
    let description = v.str("description")?;
    let content = v.opt_str("content");
    let mut out = String::new();
    if v.u64("level")? <= 1 {
        section(&mut out, description)?;
    } else {
        writeln!(out, "{INDENT}// {description}")?;
    }
    out.push_str(content);
    Ok(out.trim_end().to_string())
}

fn decode_selects(out: &mut String, entries: &[Value]) -> std::result::Result<(), TemplateError> {
    let mut signals: Vec<&str> = Vec::new();
    for entry in entries {
        if let Some(signal) = entry.get("signal").and_then(Value::as_str) {
            if !signals.contains(&signal) {
                signals.push(signal);
            }
        }
    }
    writeln!(out, "{INDENT}always_comb begin")?;
    for signal in &signals {
        writeln!(out, "{INDENT}{INDENT}{signal} = 1'b0;")?;
    }
    for entry in entries {
        let address = entry.get("address").and_then(Value::as_u64);
        let signal = entry.get("signal").and_then(Value::as_str);
        if let (Some(address), Some(signal)) = (address, signal) {
            let word = format!("{WORD_ADDR_WIDTH}'d{address}");
            writeln!(out, "{INDENT}{INDENT}if (bus_word_addr == {word}) {signal} = 1'b1;")?;
        }
    }
    writeln!(out, "{INDENT}end")?;
    Ok(())
}

pub fn select_decoder(values: &TemplateValues) -> Result {
    let v = Values::new("select_decoder", values);
    let mut out = String::new();
    section(&mut out, "Select decoder")?;
    decode_selects(&mut out, v.array("address_map")?)?;
    Ok(out.trim_end().to_string())
}

pub fn write_select_decoder(values: &TemplateValues) -> Result {
    let v = Values::new("write_select_decoder", values);
    let entries = v.array("address_map")?;
    let mut out = String::new();
    section(&mut out, "Write select decoder")?;
    decode_selects(&mut out, entries)?;

    let mut prefixes: Vec<&str> = Vec::new();
    for entry in entries {
        let prefix = entry
            .get("signal")
            .and_then(Value::as_str)
            .and_then(|s| s.strip_suffix(SELECT_SUFFIX));
        if let Some(prefix) = prefix {
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
    }
    writeln!(out)?;
    for prefix in &prefixes {
        writeln!(out, "{INDENT}assign {prefix}data_in = bus_wdata;")?;
    }
    writeln!(out)?;
    writeln!(out, "{INDENT}always_comb begin")?;
    writeln!(out, "{INDENT}{INDENT}bus_rdata = '0;")?;
    for prefix in &prefixes {
        writeln!(
            out,
            "{INDENT}{INDENT}if ({prefix}{SELECT_SUFFIX}) bus_rdata = {prefix}data_out;"
        )?;
    }
    writeln!(out, "{INDENT}end")?;
    Ok(out.trim_end().to_string())
}

pub fn top_module(values: &TemplateValues) -> Result {
    let v = Values::new("top_module", values);
    let dw = vector(v.u64("data_width")?);
    let mut ports = vec![
        "input logic pclk".to_string(),
        "input logic presetn".to_string(),
        "input logic psel".to_string(),
        "input logic penable".to_string(),
        "input logic pwrite".to_string(),
        "input logic [31:0] paddr".to_string(),
        format!("input logic {dw}pwdata"),
        format!("output logic {dw}prdata"),
        "output logic pready".to_string(),
        "output logic pslverr".to_string(),
    ];
    ports.extend(rendered_ports(&v, "hw_ports")?);
    ports.extend(rendered_ports(&v, "interrupt_ports")?);

    let mut out = String::new();
    writeln!(out, "module {} (", v.str("module_name")?)?;
    port_list(&mut out, &ports)?;
    writeln!(out, ");")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}logic bus_write;")?;
    writeln!(out, "{INDENT}logic bus_read;")?;
    writeln!(out, "{INDENT}logic {}bus_word_addr;", vector(WORD_ADDR_WIDTH.into()))?;
    writeln!(out, "{INDENT}logic {dw}bus_wdata;")?;
    writeln!(out, "{INDENT}logic {dw}bus_rdata;")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}{} u_if (.*);", v.str("interface_module")?)?;
    writeln!(out)?;
    writeln!(out, "{INDENT}{} u_backend (.*);", v.str("backend_module")?)?;
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}

pub fn backend_module(values: &TemplateValues) -> Result {
    let v = Values::new("backend_module", values);
    let dw = vector(v.u64("data_width")?);
    let mut ports = vec![
        "input logic pclk".to_string(),
        "input logic presetn".to_string(),
        "input logic bus_write".to_string(),
        "input logic bus_read".to_string(),
        format!("input logic {}bus_word_addr", vector(WORD_ADDR_WIDTH.into())),
        format!("input logic {dw}bus_wdata"),
        format!("output logic {dw}bus_rdata"),
    ];
    ports.extend(rendered_ports(&v, "hw_ports")?);
    ports.extend(rendered_ports(&v, "interrupt_ports")?);

    let mut out = String::new();
    writeln!(out, "module {} (", v.str("module_name")?)?;
    port_list(&mut out, &ports)?;
    writeln!(out, ");")?;
    for key in ["signal_declarations", "write_select_decoder", "instantiation"] {
        let body = v.opt_str(key);
        if !body.is_empty() {
            writeln!(out)?;
            writeln!(out, "{body}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}

pub fn interface_module(values: &TemplateValues) -> Result {
    let v = Values::new("interface_module", values);
    let interface = v.str("interface")?;
    if interface != "apb" {
        return Err(v.invalid("interface", interface));
    }
    let dw = vector(v.u64("data_width")?);
    let addr = vector(WORD_ADDR_WIDTH.into());
    let ports = vec![
        "input logic psel".to_string(),
        "input logic penable".to_string(),
        "input logic pwrite".to_string(),
        "input logic [31:0] paddr".to_string(),
        format!("input logic {dw}pwdata"),
        format!("output logic {dw}prdata"),
        "output logic pready".to_string(),
        "output logic pslverr".to_string(),
        "output logic bus_write".to_string(),
        "output logic bus_read".to_string(),
        format!("output logic {addr}bus_word_addr"),
        format!("output logic {dw}bus_wdata"),
        format!("input logic {dw}bus_rdata"),
    ];

    let mut out = String::new();
    writeln!(out, "module {} (", v.str("module_name")?)?;
    port_list(&mut out, &ports)?;
    writeln!(out, ");")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}assign bus_write = psel & penable & pwrite;")?;
    writeln!(out, "{INDENT}assign bus_read = psel & penable & ~pwrite;")?;
    writeln!(out, "{INDENT}assign bus_word_addr = paddr[31:2];")?;
    writeln!(out, "{INDENT}assign bus_wdata = pwdata;")?;
    writeln!(out, "{INDENT}assign prdata = bus_rdata;")?;
    writeln!(out, "{INDENT}assign pready = 1'b1;")?;
    writeln!(out, "{INDENT}assign pslverr = 1'b0;")?;
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}

pub fn field_module(values: &TemplateValues) -> Result {
    let v = Values::new("field_module", values);
    let mut out = String::new();
    writeln!(out, "module {} #(", v.str("module_name")?)?;
    writeln!(out, "{INDENT}parameter int unsigned WIDTH = 1,")?;
    writeln!(out, "{INDENT}parameter logic [63:0] RESET_MASK = '0,")?;
    writeln!(out, "{INDENT}parameter logic [63:0] RESET_VALUE = '0")?;
    writeln!(out, ") (")?;
    port_list(
        &mut out,
        &[
            "input logic clk".to_string(),
            "input logic rst_n".to_string(),
            "input logic we".to_string(),
            "input logic [WIDTH-1:0] d".to_string(),
            "output logic [WIDTH-1:0] q".to_string(),
        ],
    )?;
    writeln!(out, ");")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}localparam logic [WIDTH-1:0] MASK = RESET_MASK[WIDTH-1:0];")?;
    writeln!(out, "{INDENT}localparam logic [WIDTH-1:0] VALUE = RESET_VALUE[WIDTH-1:0];")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}always_ff @(posedge clk or negedge rst_n) begin")?;
    writeln!(out, "{INDENT}{INDENT}if (!rst_n) begin")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}q <= (q & ~MASK) | (VALUE & MASK);")?;
    writeln!(out, "{INDENT}{INDENT}end else if (we) begin")?;
    writeln!(out, "{INDENT}{INDENT}{INDENT}q <= d;")?;
    writeln!(out, "{INDENT}{INDENT}end")?;
    writeln!(out, "{INDENT}end")?;
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}

pub fn interrupt_module(values: &TemplateValues) -> Result {
    let v = Values::new("interrupt_module", values);
    let mut out = String::new();
    writeln!(out, "module {} (", v.str("module_name")?)?;
    port_list(
        &mut out,
        &[
            "input logic clk".to_string(),
            "input logic rst_n".to_string(),
            "input logic enable".to_string(),
            "input logic set".to_string(),
            "input logic clear".to_string(),
            "output logic status".to_string(),
        ],
    )?;
    writeln!(out, ");")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}logic pending;")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}always_ff @(posedge clk or negedge rst_n) begin")?;
    writeln!(out, "{INDENT}{INDENT}if (!rst_n) pending <= 1'b0;")?;
    writeln!(out, "{INDENT}{INDENT}else if (set) pending <= 1'b1;")?;
    writeln!(out, "{INDENT}{INDENT}else if (clear) pending <= 1'b0;")?;
    writeln!(out, "{INDENT}end")?;
    writeln!(out)?;
    writeln!(out, "{INDENT}assign status = pending & enable;")?;
    writeln!(out)?;
    writeln!(out, "endmodule")?;
    Ok(out)
}

pub fn generic_layout(values: &TemplateValues) -> Result {
    let v = Values::new("generic_layout", values);
    let parts: Vec<&str> = [v.opt_str("header"), v.opt_str("content"), v.opt_str("footer")]
        .into_iter()
        .map(str::trim_end)
        .filter(|part| !part.is_empty())
        .collect();
    let mut out = parts.join("\n\n");
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> TemplateValues {
        let mut values = TemplateValues::new();
        values.insert("module_root_name".into(), json!("regs"));
        values.insert("data_width".into(), json!(32));
        for (key, value) in pairs {
            values.insert(key.to_string(), value.clone());
        }
        values
    }

    #[test]
    fn test_port_and_declaration() {
        assert_eq!(
            port(&values(&[
                ("name", json!("hw_CTRL__MODE")),
                ("direction", json!("output")),
                ("range", json!("[2:0]")),
            ]))
            .unwrap(),
            "output logic [2:0] hw_CTRL__MODE"
        );
        assert_eq!(
            signal_declaration(&values(&[
                ("name", json!("reg_CTRL__select")),
                ("kind", json!("logic")),
                ("range", json!("")),
            ]))
            .unwrap(),
            "    logic reg_CTRL__select;"
        );
        assert_eq!(
            range(&values(&[("bounds", json!("15:0"))])).unwrap(),
            "[15:0]"
        );
    }

    #[test]
    fn test_assignment() {
        let text = assignment(&values(&[
            ("lhs", json!("hw_CTRL__MODE")),
            ("rhs", json!("reg_CTRL__data_out")),
            ("lhs_range", json!("[2:0]")),
            ("rhs_range", json!("[3:1]")),
            ("continuous", json!(true)),
        ]))
        .unwrap();
        assert_eq!(text, "    assign hw_CTRL__MODE[2:0] = reg_CTRL__data_out[3:1];");
    }

    #[test]
    fn test_field_instance() {
        let text = field_instance(&values(&[
            ("register", json!("CTRL")),
            ("field", json!("MODE")),
            ("range", json!("[3:1]")),
            ("width", json!(3)),
            ("reset_mask", json!(7)),
            ("reset_value", json!(5)),
        ]))
        .unwrap();
        assert!(text.starts_with("    regs_field #("));
        assert!(text.contains(".RESET_MASK(64'h7)"));
        assert!(text.contains(".we(reg_CTRL__select & bus_write)"));
        assert!(text.contains(".q(reg_CTRL__data_out[3:1])"));
        assert!(text.ends_with("    );"));

        let text = field_instance(&values(&[
            ("register", json!("CTRL")),
            ("field", json!("MODE")),
            ("range", json!("[3:1]")),
            ("width", json!(3)),
            ("reset_mask", json!(0)),
            ("reset_value", json!(2)),
        ]))
        .unwrap();
        assert!(text.contains(".RESET_MASK(64'h7)"));
        assert!(text.contains(".RESET_VALUE(64'h2)"));
    }

    #[test]
    fn test_interrupt_instance() {
        let text = interrupt_instance(&values(&[("name", json!("IRQ"))])).unwrap();
        assert!(text.starts_with(
            "    assign intr_IRQ_enable = 1'b1;\n    assign intr_IRQ_set = intr_IRQ_event;\n"
        ));
        assert!(text.contains("    regs_intr u_intr_IRQ (\n"));
        assert!(text.contains(".status(intr_IRQ_status)\n"));
    }

    #[test]
    fn test_module_port_lists() {
        let text = backend_module(&values(&[
            ("module_name", json!("regs_backend")),
            ("hw_ports", json!(["output logic hw_CTRL__EN"])),
            ("interrupt_ports", json!(["input logic intr_IRQ_event"])),
        ]))
        .unwrap();
        assert!(text.contains("    output logic hw_CTRL__EN,\n    input logic intr_IRQ_event\n);"));
    }

    #[test]
    fn test_write_select_decoder() {
        let text = write_select_decoder(&values(&[(
            "address_map",
            json!([
                { "address": 0, "signal": "reg_CTRL__select" },
                { "address": 1, "signal": "reg_STATUS__select" }
            ]),
        )]))
        .unwrap();
        assert!(text.contains("if (bus_word_addr == 30'd1) reg_STATUS__select = 1'b1;"));
        assert!(text.contains("assign reg_CTRL__data_in = bus_wdata;"));
        assert!(text.contains("if (reg_STATUS__select) bus_rdata = reg_STATUS__data_out;"));
    }

    #[test]
    fn test_interface_module() {
        let text = interface_module(&values(&[
            ("module_name", json!("regs_apb_if")),
            ("interface", json!("apb")),
        ]))
        .unwrap();
        assert!(text.starts_with("module regs_apb_if ("));
        assert!(text.contains("assign bus_word_addr = paddr[31:2];"));

        let err = interface_module(&values(&[
            ("module_name", json!("regs_axi_if")),
            ("interface", json!("axi")),
        ]))
        .unwrap_err();
        assert!(matches!(err, TemplateError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_value() {
        let err = top_module(&values(&[])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingValue {
                template: "top_module".into(),
                key: "hw_ports".into()
            }
        );
    }

    #[test]
    fn test_generic_layout() {
        let text = generic_layout(&values(&[
            ("header", json!("// header")),
            ("footer", Value::Null),
            ("content", json!("module a;\nendmodule\n")),
        ]))
        .unwrap();
        assert_eq!(text, "// header\n\nmodule a;\nendmodule\n");
    }
}
