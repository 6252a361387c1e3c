use std::io::{self, BufRead, Write};

/// Prints `msg` and reads one trimmed line from stdin. `None` on end of input.
pub fn line(msg: &str) -> Option<String> {
    print!("{}", msg);
    let _ = io::stdout().flush();

    let mut buf = String::new();
    match io::stdin().lock().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Like [`line`] but `None` for empty input as well.
pub fn text(msg: &str) -> Option<String> {
    line(msg).filter(|s| !s.is_empty())
}

pub fn number<T: std::str::FromStr>(msg: &str) -> Option<T> {
    let input = line(msg)?;
    match input.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            crate::warning!("Invalid input.");
            None
        }
    }
}

/// Asks for a 1-based index into a list of `count` entries; 0 cancels.
/// Returns the 0-based index.
pub fn choice(msg: &str, count: usize) -> Option<usize> {
    let n: usize = number(msg)?;
    if n == 0 || n > count {
        return None;
    }
    Some(n - 1)
}

/// Yes/no question, defaulting to no.
pub fn confirm(msg: &str) -> bool {
    matches!(
        line(&format!("{} [y/N]: ", msg)).as_deref(),
        Some("y") | Some("Y") | Some("yes")
    )
}
