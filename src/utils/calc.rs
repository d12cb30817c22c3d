//! A small recursive-descent calculator.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | 'x' | '/') factor)*
//! factor := atom ('^' factor)?
//! atom   := '-'? (number ('k' | 'm')? | 'pi' | 'e' | name '(' expr ')' | '(' expr ')')
//! ```

use thiserror::Error;
use thousands::Separable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    #[error("Unknown function or constant `{0}`")]
    UnknownName(String),

    #[error("Invalid number `{0}`")]
    InvalidNumber(String),

    #[error("The result is not a finite number")]
    NotFinite,

    #[error("The formula is nested too deeply")]
    TooDeep,
}

/// Deepest nesting of parentheses, function calls, unary minus and powers.
pub const MAX_DEPTH: usize = 100;

/// Evaluates `formula`, ignoring case. Whitespace separates tokens and is otherwise skipped.
pub fn evaluate(formula: &str) -> Result<f64, CalcError> {
    let mut parser = Parser {
        chars: formula.chars().flat_map(char::to_lowercase).collect(),
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if let Some(c) = parser.peek() {
        return Err(CalcError::UnexpectedChar(c));
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Formats an answer with thousands separators, dropping the fraction of whole numbers.
pub fn format_answer(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).separate_with_commas()
    } else {
        value.separate_with_commas()
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// The next character, without skipping whitespace.
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// The next non-whitespace character.
    fn peek(&mut self) -> Option<char> {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.current()
    }

    fn nested<T>(&mut self, parse: fn(&mut Self) -> Result<T, CalcError>) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') || self.eat('x') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if self.eat('^') {
            let exponent = self.nested(Self::factor)?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        if self.eat('-') {
            return Ok(-self.nested(Self::atom)?);
        }

        match self.peek() {
            None => Err(CalcError::UnexpectedEnd),
            Some('(') => {
                self.pos += 1;
                let value = self.nested(Self::expr)?;
                self.close()?;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() => self.name(),
            Some(c) => Err(CalcError::UnexpectedChar(c)),
        }
    }

    fn close(&mut self) -> Result<(), CalcError> {
        match self.peek() {
            Some(')') => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(CalcError::UnexpectedChar(c)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        while matches!(self.current(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = literal
            .parse()
            .map_err(|_| CalcError::InvalidNumber(literal.clone()))?;

        let multiplier = match self.current() {
            Some('k') => 1e3,
            Some('m') => 1e6,
            _ => 1.0,
        };
        if multiplier != 1.0 {
            self.pos += 1;
        }
        Ok(value * multiplier)
    }

    fn name(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        while matches!(self.current(), Some(c) if c.is_alphabetic()) {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();

        match name.as_str() {
            "pi" => return Ok(std::f64::consts::PI),
            "e" => return Ok(std::f64::consts::E),
            _ => {}
        }

        let function: fn(f64) -> f64 = match name.as_str() {
            "sqrt" => f64::sqrt,
            "log" => f64::log10,
            "sin" => f64::sin,
            "cos" => f64::cos,
            "tan" => f64::tan,
            "arcsin" => f64::asin,
            "arccos" => f64::acos,
            "arctan" => f64::atan,
            "sinh" => f64::sinh,
            "cosh" => f64::cosh,
            "tanh" => f64::tanh,
            "arcsinh" => f64::asinh,
            "arccosh" => f64::acosh,
            "arctanh" => f64::atanh,
            "abs" => f64::abs,
            "trunc" => f64::trunc,
            "round" => f64::round,
            "sgn" => sign,
            _ => return Err(CalcError::UnknownName(name)),
        };

        if !self.eat('(') {
            return match self.peek() {
                Some(c) => Err(CalcError::UnexpectedChar(c)),
                None => Err(CalcError::UnexpectedEnd),
            };
        }
        let argument = self.nested(Self::expr)?;
        self.close()?;
        Ok(function(argument))
    }
}

fn sign(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value.signum() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case("1 + 2 * 3", 7.0 ; "precedence")]
    #[test_case("(1 + 2) x 3", 9.0 ; "parentheses and x")]
    #[test_case("2 ^ 3 ^ 2", 512.0 ; "right associative power")]
    #[test_case("-2 ^ 2", 4.0 ; "unary minus binds to the atom")]
    #[test_case("10 - -3", 13.0 ; "double minus")]
    #[test_case("5k / 2", 2500.0 ; "thousands suffix")]
    #[test_case("1.5M", 1_500_000.0 ; "millions suffix")]
    #[test_case("sqrt(16) + abs(-4)", 8.0 ; "functions")]
    #[test_case("log(1000)", 3.0 ; "log is base ten")]
    #[test_case("sgn(-0.5) + trunc(2.7)", 1.0 ; "sign and trunc")]
    #[test_case("ROUND(2.5)", 3.0 ; "case insensitive")]
    #[test_case("pi x 2", std::f64::consts::PI * 2.0 ; "pi times")]
    #[test_case("e x 3", std::f64::consts::E * 3.0 ; "e times")]
    #[test_case("sqrt (9) x 2", 6.0 ; "space before call")]
    fn test_evaluate(formula: &str, expected: f64) {
        let value = evaluate(formula).unwrap();
        assert!((value - expected).abs() < 1e-9, "{formula} = {value}");
    }

    #[test]
    fn test_constants() {
        assert!((evaluate("pi").unwrap() - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(evaluate("2e"), Err(CalcError::UnexpectedChar('e')));
    }

    #[test]
    fn test_errors() {
        assert_matches!(evaluate("1 +"), Err(CalcError::UnexpectedEnd));
        assert_matches!(evaluate("(1 + 2"), Err(CalcError::UnexpectedEnd));
        assert_matches!(evaluate("foo(2)"), Err(CalcError::UnknownName(name)) if name == "foo");
        assert_matches!(evaluate("1 / 0"), Err(CalcError::NotFinite));
        assert_matches!(evaluate("1..2"), Err(CalcError::InvalidNumber(_)));
        assert_matches!(evaluate("3 $ 4"), Err(CalcError::UnexpectedChar('$')));
    }

    #[test]
    fn test_whitespace_separates_tokens() {
        assert_matches!(evaluate("1 2"), Err(CalcError::UnexpectedChar('2')));
        assert_matches!(evaluate("s qrt(4)"), Err(CalcError::UnknownName(name)) if name == "s");
    }

    #[test]
    fn test_nesting_is_capped() {
        let parens = format!("{}1", "(".repeat(1990));
        assert_eq!(evaluate(&parens), Err(CalcError::TooDeep));

        let minus = format!("{}1", "-".repeat(1990));
        assert_eq!(evaluate(&minus), Err(CalcError::TooDeep));

        let powers = format!("{}2", "2^".repeat(995));
        assert_eq!(evaluate(&powers), Err(CalcError::TooDeep));

        let calls = format!("{}1{}", "abs(".repeat(400), ")".repeat(400));
        assert_eq!(evaluate(&calls), Err(CalcError::TooDeep));
    }

    #[test]
    fn test_nesting_below_cap() {
        let depth = MAX_DEPTH - 1;
        let formula = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(evaluate(&formula), Ok(7.0));
    }

    #[test]
    fn test_format_answer() {
        assert_eq!(format_answer(1_234_567.0), "1,234,567");
        assert_eq!(format_answer(1234.5), "1,234.5");
        assert_eq!(format_answer(-3.0), "-3");
    }
}
