use std::io::{self, BufRead, Write};

use crate::util::error::{Error, Result};

const PROMPT: &str = "Enter filename to get sector mapping: ";

pub fn read_filename<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    output.write_all(PROMPT.as_bytes()).map_err(Error::Input)?;
    output.flush().map_err(Error::Input)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(Error::Input)? == 0 {
        return Err(Error::Input(io::Error::new(io::ErrorKind::UnexpectedEof, "no filename given")));
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_line_ending() {
        let mut output = Vec::new();
        let name = read_filename(&mut Cursor::new("notes.txt\n"), &mut output).unwrap();
        assert_eq!(name, "notes.txt");
        assert_eq!(output, PROMPT.as_bytes());

        let name = read_filename(&mut Cursor::new("a b.txt\r\nrest\n"), &mut Vec::new()).unwrap();
        assert_eq!(name, "a b.txt");
    }

    #[test]
    fn keeps_last_line_without_newline() {
        let name = read_filename(&mut Cursor::new("last"), &mut Vec::new()).unwrap();
        assert_eq!(name, "last");
    }

    #[test]
    fn eof_is_an_error() {
        match read_filename(&mut Cursor::new(""), &mut Vec::new()) {
            Err(Error::Input(err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
