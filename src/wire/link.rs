use std::io::{self, BufRead, Write};

/// Reads one line with its terminator removed. `None` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
	let mut line = String::new();
	if reader.read_line(&mut line)? == 0 {
		return Ok(None);
	}
	if line.ends_with('\n') {
		line.pop();
		if line.ends_with('\r') {
			line.pop();
		}
	}
	Ok(Some(line))
}

pub fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
	writer.write_all(line.as_bytes())?;
	writer.write_all(b"\n")?;
	writer.flush()
}
