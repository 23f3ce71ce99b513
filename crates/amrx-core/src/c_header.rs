//! C Header Export — constant arrays for the firmware target
//!
//! Serializes integer sample/LUT arrays as C header files: an include
//! guard, a `_SIZE` define and the array declaration with eight values per
//! line. The element type is a configuration option: waveform samples are
//! exported as `uint16_t`, LUT values as `int32_t`.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::c_header::{format_c_header, CArrayType};
//!
//! let header = format_c_header("sin_lut", &[0, 75, 128, 75, 0, -75, -128, -75, 0], CArrayType::Int32);
//! assert!(header.starts_with("#ifndef SIN_LUT_H"));
//! assert!(header.contains("#define SIN_LUT_SIZE 9"));
//! assert!(header.contains("int32_t sin_lut[9]"));
//! ```

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// C element type of an exported array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CArrayType {
    /// `uint16_t` — quantized waveform samples.
    Uint16,
    /// `int32_t` — oscillator LUT values.
    Int32,
}

impl CArrayType {
    /// The C type name.
    pub fn c_name(&self) -> &'static str {
        match self {
            Self::Uint16 => "uint16_t",
            Self::Int32 => "int32_t",
        }
    }
}

/// Format an integer array as C header file content.
pub fn format_c_header<T: Display>(array_name: &str, values: &[T], ty: CArrayType) -> String {
    let guard = format!("{}_H", array_name.to_uppercase());
    let mut out = String::new();

    out.push_str(&format!("#ifndef {guard}\n"));
    out.push_str(&format!("#define {guard}\n\n"));
    out.push_str("#include <stdint.h>\n\n");
    out.push_str(&format!(
        "#define {}_SIZE {}\n\n",
        array_name.to_uppercase(),
        values.len()
    ));
    out.push_str(&format!(
        "{} {}[{}] = {{\n",
        ty.c_name(),
        array_name,
        values.len()
    ));
    for row in values.chunks(8) {
        out.push_str("    ");
        for value in row {
            out.push_str(&format!("{value},"));
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out.push_str("};\n\n");
    out.push_str(&format!("#endif //{guard}\n"));
    out
}

/// Write an integer array to `path` as a C header.
pub fn write_c_header<T: Display, P: AsRef<Path>>(
    path: P,
    array_name: &str,
    values: &[T],
    ty: CArrayType,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(format_c_header(array_name, values, ty).as_bytes())?;
    writer.flush()
}
