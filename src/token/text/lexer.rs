use std::io::{self, BufRead};

use crate::token::{Result, TokenError};

/// Splits export text into token lines.
///
/// Input is pulled one physical line at a time. A token line ends at the
/// first `\n` or `\r` after its first field, so a lone `\r` splits a
/// physical line into two token lines.
pub struct LineLexer<R> {
	input: R,
	buf: String,
	pos: usize,
	line: usize,
}

impl<R: BufRead> LineLexer<R> {
	pub fn new(input: R) -> Self {
		Self {
			input,
			buf: String::new(),
			pos: 0,
			line: 0,
		}
	}

	/// One-based number of the physical line read most recently.
	pub fn line(&self) -> usize {
		self.line
	}

	/// Fill `fields` with the next non-empty token line.
	///
	/// Returns `false` (with `fields` empty) once input is exhausted.
	pub fn next_line(&mut self, fields: &mut Vec<String>) -> Result<bool> {
		fields.clear();
		loop {
			if self.pos >= self.buf.len() && !self.fill()? {
				return Ok(!fields.is_empty());
			}
			let (consumed, ended) = scan(&self.buf[self.pos..], self.line, fields)?;
			self.pos += consumed;
			if ended {
				return Ok(true);
			}
		}
	}

	fn fill(&mut self) -> Result<bool> {
		self.buf.clear();
		self.pos = 0;
		let read = self.input.read_line(&mut self.buf).map_err(|err| match err.kind() {
			io::ErrorKind::InvalidData => TokenError::MalformedField {
				line: self.line + 1,
				token: String::new(),
				index: 0,
				text: err.to_string(),
			},
			_ => TokenError::Io(err),
		})?;
		if read == 0 {
			return Ok(false);
		}
		self.line += 1;
		Ok(true)
	}
}

fn is_line_break(ch: char) -> bool {
	ch == '\n' || ch == '\r'
}

fn is_separator(ch: char) -> bool {
	ch == ',' || ch.is_whitespace()
}

/// Scan `text` for fields. Returns the bytes consumed and whether a token
/// line was completed; running out of `text` leaves the line open.
fn scan(text: &str, line: usize, fields: &mut Vec<String>) -> Result<(usize, bool)> {
	let mut chars = text.char_indices().peekable();
	loop {
		let (at, first) = loop {
			match chars.next() {
				None => return Ok((text.len(), false)),
				Some((at, ch)) if is_line_break(ch) => {
					if !fields.is_empty() {
						return Ok((at + ch.len_utf8(), true));
					}
				}
				Some((_, ch)) if is_separator(ch) => {}
				Some(found) => break found,
			}
		};

		if first == '"' {
			let body = at + 1;
			loop {
				match chars.next() {
					Some((end, '"')) => {
						fields.push(text[body..end].to_owned());
						break;
					}
					Some((_, ch)) if !is_line_break(ch) => {}
					_ => return Err(TokenError::UnterminatedLiteral { line }),
				}
			}
		} else if first == '/' && text[at + 1..].starts_with('/') {
			fields.push("//".to_owned());
			let rest = &text[at + 2..];
			let len = rest.find(is_line_break).unwrap_or(rest.len());
			let body = &rest[..len];
			let body = body.strip_prefix(' ').unwrap_or(body);
			if !body.is_empty() {
				fields.push(body.to_owned());
			}
			let terminator = rest[len..].chars().next().map_or(0, char::len_utf8);
			return Ok((at + 2 + len + terminator, true));
		} else {
			let end = loop {
				match chars.peek() {
					Some(&(end, ch)) if is_separator(ch) => break end,
					Some(_) => {
						chars.next();
					}
					None => break text.len(),
				}
			};
			fields.push(text[at..end].to_owned());
		}
	}
}
