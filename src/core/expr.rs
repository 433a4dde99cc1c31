//! Restricted arithmetic evaluator used by the calculator display.
//!
//! Only numeric literals, parentheses and the operators `+ - * / // % **`
//! are accepted. Integer arithmetic stays integral and is overflow-checked,
//! `/` always yields a float, and `//` / `%` round toward negative infinity.

use crate::utils::error::{AppError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(n) => n as f64,
            Value::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Value::Int(n) => n == 0,
            Value::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            // 大數改用指數表示，確保顯示結果能再被解析
            Value::Float(x) if x.abs() >= 1e16 => {
                let formatted = format!("{:e}", x);
                match formatted.split_once('e') {
                    Some((mantissa, exp)) if !exp.starts_with('-') => {
                        write!(f, "{}e+{}", mantissa, exp)
                    }
                    _ => write!(f, "{}", formatted),
                }
            }
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(Value),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some((pos, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '*' => {
                if chars.peek().map(|&(_, c)| c) == Some('*') {
                    chars.next();
                    Token::DoubleStar
                } else {
                    Token::Star
                }
            }
            '/' => {
                if chars.peek().map(|&(_, c)| c) == Some('/') {
                    chars.next();
                    Token::DoubleSlash
                } else {
                    Token::Slash
                }
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        literal.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if let Some(&(_, marker @ ('e' | 'E'))) = chars.peek() {
                    literal.push(marker);
                    chars.next();
                    if let Some(&(_, sign @ ('+' | '-'))) = chars.peek() {
                        literal.push(sign);
                        chars.next();
                    }
                    while let Some(&(_, digit)) = chars.peek() {
                        if !digit.is_ascii_digit() {
                            break;
                        }
                        literal.push(digit);
                        chars.next();
                    }
                }
                Token::Number(parse_literal(&literal, pos)?)
            }
            other => {
                return Err(AppError::eval(
                    pos,
                    format!("unexpected character '{}'", other),
                ))
            }
        };
        tokens.push((token, pos));
    }

    Ok(tokens)
}

fn parse_literal(literal: &str, pos: usize) -> Result<Value> {
    if literal.contains(['.', 'e', 'E']) {
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(AppError::eval(pos, format!("malformed number '{}'", literal)));
        }
        literal
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| AppError::eval(pos, format!("malformed number '{}': {}", literal, e)))
    } else {
        literal
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| AppError::eval(pos, format!("integer literal '{}' is too large", literal)))
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    index: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.index).map(|&(t, _)| t)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.index)
            .map(|&(_, p)| p)
            .unwrap_or(self.end)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.index).copied();
        self.index += 1;
        next
    }

    fn expression(&mut self) -> Result<Value> {
        let mut lhs = self.term()?;
        while let Some(token @ (Token::Plus | Token::Minus)) = self.peek() {
            let pos = self.position();
            self.advance();
            let rhs = self.term()?;
            lhs = apply(token, lhs, rhs, pos)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Value> {
        let mut lhs = self.unary()?;
        while let Some(
            token @ (Token::Star | Token::Slash | Token::DoubleSlash | Token::Percent),
        ) = self.peek()
        {
            let pos = self.position();
            self.advance();
            let rhs = self.unary()?;
            lhs = apply(token, lhs, rhs, pos)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Value> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            Some(Token::Minus) => {
                let pos = self.position();
                self.advance();
                let operand = self.unary()?;
                apply(Token::Minus, Value::Int(0), operand, pos)
            }
            _ => self.power(),
        }
    }

    // `**` is right-associative and its exponent may carry a sign.
    fn power(&mut self) -> Result<Value> {
        let base = self.atom()?;
        if self.peek() == Some(Token::DoubleStar) {
            let pos = self.position();
            self.advance();
            let exponent = self.unary()?;
            return apply(Token::DoubleStar, base, exponent, pos);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Value> {
        let pos = self.position();
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => {
                let value = self.expression()?;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((_, p)) => Err(AppError::eval(p, "expected ')'")),
                    None => Err(AppError::eval(self.end, "missing closing ')'")),
                }
            }
            Some((token, p)) => Err(AppError::eval(p, format!("unexpected token {:?}", token))),
            None => Err(AppError::eval(pos, "unexpected end of expression")),
        }
    }
}

fn overflow(pos: usize) -> AppError {
    AppError::eval(pos, "numeric overflow")
}

fn finite(value: f64, pos: usize) -> Result<Value> {
    if value.is_finite() {
        Ok(Value::Float(value))
    } else {
        Err(overflow(pos))
    }
}

fn apply(op: Token, lhs: Value, rhs: Value, pos: usize) -> Result<Value> {
    if matches!(op, Token::Slash | Token::DoubleSlash | Token::Percent) && rhs.is_zero() {
        return Err(AppError::eval(pos, "division by zero"));
    }

    match (op, lhs, rhs) {
        (Token::Plus, Value::Int(a), Value::Int(b)) => {
            a.checked_add(b).map(Value::Int).ok_or_else(|| overflow(pos))
        }
        (Token::Minus, Value::Int(a), Value::Int(b)) => {
            a.checked_sub(b).map(Value::Int).ok_or_else(|| overflow(pos))
        }
        (Token::Star, Value::Int(a), Value::Int(b)) => {
            a.checked_mul(b).map(Value::Int).ok_or_else(|| overflow(pos))
        }
        (Token::DoubleSlash, Value::Int(a), Value::Int(b)) => {
            let quotient = a.checked_div(b).ok_or_else(|| overflow(pos))?;
            if a % b != 0 && ((a < 0) != (b < 0)) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        // 除以 -1 的餘數恆為 0，避免 i64::MIN % -1 溢位
        (Token::Percent, Value::Int(_), Value::Int(-1)) => Ok(Value::Int(0)),
        (Token::Percent, Value::Int(a), Value::Int(b)) => {
            let rem = a.checked_rem(b).ok_or_else(|| overflow(pos))?;
            if rem != 0 && ((rem < 0) != (b < 0)) {
                Ok(Value::Int(rem + b))
            } else {
                Ok(Value::Int(rem))
            }
        }
        (Token::DoubleStar, Value::Int(a), Value::Int(b)) if b >= 0 => u32::try_from(b)
            .ok()
            .and_then(|exp| a.checked_pow(exp))
            .map(Value::Int)
            .ok_or_else(|| overflow(pos)),
        (op, lhs, rhs) => {
            let (a, b) = (lhs.as_f64(), rhs.as_f64());
            match op {
                Token::Plus => finite(a + b, pos),
                Token::Minus => finite(a - b, pos),
                Token::Star => finite(a * b, pos),
                Token::Slash => finite(a / b, pos),
                Token::DoubleSlash => finite((a / b).floor(), pos),
                Token::Percent => {
                    let rem = a % b;
                    if rem != 0.0 && ((rem < 0.0) != (b < 0.0)) {
                        finite(rem + b, pos)
                    } else {
                        finite(rem, pos)
                    }
                }
                Token::DoubleStar => {
                    if a == 0.0 && b < 0.0 {
                        return Err(AppError::eval(pos, "zero cannot be raised to a negative power"));
                    }
                    if a < 0.0 && b.fract() != 0.0 {
                        return Err(AppError::eval(pos, "fractional power of a negative number"));
                    }
                    finite(a.powf(b), pos)
                }
                _ => Err(AppError::eval(pos, format!("{:?} is not an operator", op))),
            }
        }
    }
}

/// Evaluates `input` and returns the numeric result.
pub fn evaluate(input: &str) -> Result<Value> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(AppError::eval(0, "empty expression"));
    }

    let mut parser = Parser {
        tokens,
        index: 0,
        end: input.chars().count(),
    };
    let value = parser.expression()?;

    if let Some((token, pos)) = parser.tokens.get(parser.index) {
        return Err(AppError::eval(
            *pos,
            format!("unexpected trailing {:?}", token),
        ));
    }

    tracing::debug!(expression = input, result = %value, "evaluated expression");
    Ok(value)
}
