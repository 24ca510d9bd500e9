//! Line-oriented prompting over any reader/writer pair, plus money formatting.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line, without its terminator.
    /// `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read a value, re-prompting with `retry` until a line parses.
    /// `None` at end of input.
    pub fn read_number<T: FromStr>(&mut self, prompt: &str, retry: &str) -> io::Result<Option<T>> {
        let mut prompt = prompt;
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if let Ok(value) = line.trim().parse() {
                return Ok(Some(value));
            }
            prompt = retry;
        }
    }
}

/// `#,##0.00`: thousands separators, two decimals, half-away-from-zero.
pub fn fmt_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}{grouped}.{frac}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn money_formatting() {
        assert_eq!(fmt_money(0.0), "0.00");
        assert_eq!(fmt_money(9.5), "9.50");
        assert_eq!(fmt_money(999.999), "1,000.00");
        assert_eq!(fmt_money(9_480.0), "9,480.00");
        assert_eq!(fmt_money(1_234_567.891), "1,234,567.89");
        assert_eq!(fmt_money(-2_500.5), "-2,500.50");
        assert_eq!(fmt_money(-0.001), "0.00");
    }

    #[test]
    fn read_line_strips_terminator() {
        let mut c = console("AAPL\r\nnext\n");
        assert_eq!(c.read_line("? ").unwrap().as_deref(), Some("AAPL"));
        assert_eq!(c.read_line("? ").unwrap().as_deref(), Some("next"));
        assert_eq!(c.read_line("? ").unwrap(), None);
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "? ? ? ");
    }

    #[test]
    fn read_number_reprompts_until_valid() {
        let mut c = console("abc\n\n 42 \n");
        assert_eq!(c.read_number::<i64>("n: ", "again: ").unwrap(), Some(42));
        assert_eq!(
            String::from_utf8(c.into_output()).unwrap(),
            "n: again: again: "
        );
    }

    #[test]
    fn read_number_eof() {
        let mut c = console("x\n");
        assert_eq!(c.read_number::<f64>("n: ", "n: ").unwrap(), None);
    }
}
