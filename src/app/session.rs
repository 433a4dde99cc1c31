use crate::core::calculator::{Calculator, Key};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Line-driven keypad session.
///
/// Every non-blank character of a line is pressed as a key (`0`-`9`, `+`,
/// `=`, `C`). A line starting with `:` replaces the display with the rest of
/// the line, like typing into the entry field. `q` or `quit` ends the session.
/// The display is echoed after each line; evaluation failures print
/// `<error_title>: Invalid expression` and keep the display.
pub fn run_keypad_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    calculator: &mut Calculator,
    error_title: &str,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == "q" || trimmed == "quit" {
            break;
        }

        if let Some(typed) = trimmed.strip_prefix(':') {
            calculator.set_display(typed.trim());
        } else {
            for ch in trimmed.chars().filter(|c| !c.is_whitespace()) {
                let label = ch.to_string();
                let Some(key) = Key::from_label(&label) else {
                    writeln!(output, "{}: unknown key '{}'", error_title, ch)?;
                    continue;
                };

                if let Err(e) = calculator.press(key) {
                    writeln!(output, "{}: {}", error_title, e.user_friendly_message())?;
                }
            }
        }

        writeln!(output, "{}", calculator.display())?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (String, Calculator) {
        let mut calc = Calculator::new();
        let mut out = Vec::new();
        run_keypad_session(Cursor::new(script), &mut out, &mut calc, "Error").unwrap();
        (String::from_utf8(out).unwrap(), calc)
    }

    #[test]
    fn test_keys_build_and_evaluate() {
        let (out, calc) = run("12+3\n=\n");
        assert_eq!(out, "12 + 3\n15\n");
        assert_eq!(calc.display(), "15");
    }

    #[test]
    fn test_error_keeps_display() {
        let (out, calc) = run("4+=\n");
        assert_eq!(out, "Error: Invalid expression\n4 + \n");
        assert_eq!(calc.display(), "4 + ");
    }

    #[test]
    fn test_typed_line_and_clear() {
        let (out, _) = run(":2 ** 10\n=\nC\n");
        assert_eq!(out, "2 ** 10\n1024\n\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let (out, calc) = run("7\nquit\n8\n");
        assert_eq!(out, "7\n");
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_unknown_key_is_reported() {
        let (out, calc) = run("5x\n");
        assert_eq!(out, "Error: unknown key 'x'\n5\n");
        assert_eq!(calc.display(), "5");
    }
}
