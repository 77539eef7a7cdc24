use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Uppercase hex dump, 16 bytes per line, each line prefixed with a 4-digit
/// offset: `0000 AB CD ...`. Lines are joined with `\n`; no trailing newline.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3 + (bytes.len() / BYTES_PER_LINE + 1) * 6);
    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if line > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:04X}", line * BYTES_PER_LINE);
        for byte in chunk {
            let _ = write!(out, " {:02X}", byte);
        }
    }
    out
}
