//! Immediate-mode four-function calculator state.

use crate::key::{Key, Operator};

/// Completed calculations kept for the history view.
const HISTORY_LIMIT: usize = 100;

/// Immediate-mode calculator state.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    pending_operand: Option<f64>,
    pending_operator: Option<Operator>,
    awaiting_operand: bool,
    history: Vec<String>,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_operand: false,
            history: Vec::new(),
        }
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Completed calculations, oldest first, as `a op b = result`.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The pending `operand operator` pair, e.g. `"2 +"`, if any.
    pub fn pending(&self) -> Option<String> {
        match (self.pending_operand, self.pending_operator) {
            (Some(a), Some(op)) => Some(format!("{} {op}", format_number(a))),
            _ => None,
        }
    }

    /// Apply one key press.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.enter_digit(d),
            Key::Decimal => self.enter_decimal(),
            Key::Op(op) => self.enter_operator(op),
            Key::Equals => self.equals(),
            Key::Clear => {
                self.display = "0".to_string();
                self.pending_operand = None;
                self.pending_operator = None;
                self.awaiting_operand = false;
            },
            Key::ClearEntry => {
                self.display = "0".to_string();
                self.awaiting_operand = false;
            },
            Key::Percent => {
                self.display = format_number(self.value() / 100.0);
            },
        }
    }

    /// Apply a sequence of key presses.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    fn enter_digit(&mut self, d: u8) {
        let digit = char::from(b'0' + d.min(9));
        if self.awaiting_operand || self.display == "0" {
            self.display = digit.to_string();
            self.awaiting_operand = false;
        } else {
            self.display.push(digit);
        }
    }

    fn enter_decimal(&mut self) {
        if self.awaiting_operand {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn enter_operator(&mut self, op: Operator) {
        // A second operator in a row only replaces the first.
        if !self.awaiting_operand {
            self.resolve();
        }
        self.pending_operand = Some(self.value());
        self.pending_operator = Some(op);
        self.awaiting_operand = true;
    }

    fn equals(&mut self) {
        if let Some(entry) = self.resolve() {
            log::debug!("calc: {entry}");
            self.history.push(entry);
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }
    }

    /// Evaluate the pending operation against the display, if there is one.
    /// Returns the history line for it.
    fn resolve(&mut self) -> Option<String> {
        let a = self.pending_operand.take()?;
        let Some(op) = self.pending_operator.take() else {
            return None;
        };
        let b = self.value();
        let result = format_number(op.apply(a, b));
        let entry = format!(
            "{} {op} {} = {result}",
            format_number(a),
            format_number(b)
        );
        self.display = result;
        self.awaiting_operand = true;
        Some(entry)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a number the way the display shows it: integers without a
/// fraction, no negative zero, `Infinity`/`NaN` spelled out. Magnitudes
/// from `1e21` up and below `1e-6` switch to exponent form (`1e+21`,
/// `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::parse_keys;

    fn run(input: &str) -> Calculator {
        let mut calc = Calculator::new();
        calc.press_all(parse_keys(input).unwrap());
        calc
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(Calculator::new().display(), "0");
    }

    #[test]
    fn simple_addition() {
        let calc = run("2 + 3 =");
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.history(), ["2 + 3 = 5"]);
    }

    #[test]
    fn divide_by_zero_yields_zero() {
        let calc = run("4 ÷ 0 =");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.history(), ["4 ÷ 0 = 0"]);
    }

    #[test]
    fn chain_is_left_to_right() {
        assert_eq!(run("1 + 2 + 3 =").display(), "6");
        assert_eq!(run("2 + 3 × 4 =").display(), "20");
    }

    #[test]
    fn intermediate_result_shown_on_operator() {
        let calc = run("1 + 2 +");
        assert_eq!(calc.display(), "3");
        assert_eq!(calc.pending().as_deref(), Some("3 +"));
    }

    #[test]
    fn repeated_operator_replaces() {
        let calc = run("5 + × 2 =");
        assert_eq!(calc.display(), "10");
    }

    #[test]
    fn multi_digit_and_decimal_entry() {
        assert_eq!(run("12.5").display(), "12.5");
        assert_eq!(run("1..2").display(), "1.2");
        assert_eq!(run("007").display(), "7");
        assert_eq!(run("0.1 + 0.2 =").display(), "0.30000000000000004");
    }

    #[test]
    fn decimal_after_operator_starts_fresh() {
        let calc = run("5 + . 5 =");
        assert_eq!(calc.display(), "5.5");
    }

    #[test]
    fn digit_after_result_starts_new_number() {
        let calc = run("2 + 3 = 7");
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn result_feeds_next_operation() {
        let calc = run("2 + 3 = × 2 =");
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.history().len(), 2);
    }

    #[test]
    fn equals_without_pending_is_noop() {
        let calc = run("9 =");
        assert_eq!(calc.display(), "9");
        assert!(calc.history().is_empty());
    }

    #[test]
    fn no_negative_zero() {
        assert_eq!(run("0 − 0 =").display(), "0");
        assert_eq!(run("0 × 5 − 0 =").display(), "0");
        assert_eq!(run("3 − 5 =").display(), "-2");
    }

    #[test]
    fn clear_and_clear_entry() {
        let calc = run("7 + 8 CE 2 =");
        assert_eq!(calc.display(), "9");
        let calc = run("7 + 8 C 2 =");
        assert_eq!(calc.display(), "2");
        assert!(calc.pending().is_none());
    }

    #[test]
    fn percent_divides_display() {
        assert_eq!(run("50%").display(), "0.5");
        assert_eq!(run("200 × 10% =").display(), "20");
    }

    #[test]
    fn history_is_bounded() {
        let mut calc = Calculator::new();
        for _ in 0..(HISTORY_LIMIT + 5) {
            calc.press_all(parse_keys("1+1=").unwrap());
        }
        assert_eq!(calc.history().len(), HISTORY_LIMIT);
        calc.clear_history();
        assert!(calc.history().is_empty());
    }

    #[test]
    fn format_number_cases() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn format_number_switches_to_exponent_at_the_edges() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(-2e25), "-2e+25");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(123.0), "123");
    }

    #[test]
    fn huge_product_uses_exponent_form() {
        let calc = run("99999999999*99999999999*99999999999=");
        assert!(calc.display().contains("e+"), "got {}", calc.display());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn typed_integer_is_displayed(n in 1u32..1_000_000) {
                let calc = run(&n.to_string());
                prop_assert_eq!(calc.display(), n.to_string());
            }

            #[test]
            fn addition_matches_integer_sum(a in 0u32..100_000, b in 0u32..100_000) {
                let calc = run(&format!("{a}+{b}="));
                prop_assert_eq!(calc.display(), (u64::from(a) + u64::from(b)).to_string());
            }
        }
    }
}
