//! Line input for the interactive commands.

use std::io::BufRead;

/// Reads one line from `stdin`, trimmed. `None` on EOF or a read error.
///
/// ```rust
/// use std::io::Cursor;
/// # use nightdealer_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(b"place 4\n".to_vec());
/// assert_eq!(read_stdin_line(&mut input), Some("place 4".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
