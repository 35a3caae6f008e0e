pub const ERROR_TEXT: &str = "Error";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

/// Four-function calculator state machine. Every operation is total; the only
/// failure surface is the `"Error"` display text after a non-finite result.
pub struct Calculator {
    display: String,
    previous: Option<f64>,
    operator: Option<Operator>,
    awaiting_new_entry: bool,
    last_operand: Option<f64>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            operator: None,
            awaiting_new_entry: false,
            last_operand: None,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// The operand most recently consumed by an operator press; equals falls
    /// back to it when no fresh digits followed the operator.
    pub fn last_operand(&self) -> Option<f64> {
        self.last_operand
    }

    /// Parsed display value, or `None` while the display shows `"Error"`
    /// (or a transient non-numeric fragment like a bare `-`).
    pub fn value(&self) -> Option<f64> {
        self.display.parse().ok()
    }

    pub fn input(&mut self, ch: char) {
        if !ch.is_ascii_digit() && ch != '.' {
            return;
        }

        if self.awaiting_new_entry {
            self.display = if ch == '.' {
                "0.".to_string()
            } else {
                ch.to_string()
            };
            self.awaiting_new_entry = false;
            return;
        }

        if ch == '.' {
            // one decimal point per operand
            if !self.display.contains('.') {
                self.display.push('.');
            }
            return;
        }

        if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.previous = None;
        self.operator = None;
        self.awaiting_new_entry = false;
        self.last_operand = None;
    }

    pub fn backspace(&mut self) {
        if self.awaiting_new_entry {
            return;
        }
        self.display.pop();
        if self.display.is_empty() {
            self.display.push('0');
        }
    }

    pub fn negate(&mut self) {
        let Some(value) = self.value() else {
            return;
        };
        self.display = format_number(-value);
    }

    /// Percent is relative to the previous operand under a pending `+`/`-`
    /// (100 + 25% reads as "plus a quarter of 100"); multiply/divide and the
    /// bare case use the simple hundredth.
    pub fn percent(&mut self) {
        let Some(value) = self.value() else {
            return;
        };
        let result = match (self.previous, self.operator) {
            (Some(previous), Some(Operator::Add | Operator::Subtract)) => {
                previous * value / 100.0
            }
            _ => value / 100.0,
        };
        self.display = format_number(result);
    }

    /// Chained-equals protocol: a second operator pressed before fresh digits
    /// resolves the pending operation immediately and shows the running total.
    pub fn apply_operator(&mut self, op: Operator) {
        let Some(input) = self.value() else {
            return;
        };

        match self.previous {
            None => self.previous = Some(input),
            Some(previous) if !self.awaiting_new_entry => {
                let pending = self.operator.unwrap_or(op);
                let result = evaluate(previous, input, pending);
                self.previous = Some(result);
                self.display = format_number(result);
            }
            Some(_) => {}
        }

        self.operator = Some(op);
        self.awaiting_new_entry = true;
        self.last_operand = Some(input);
    }

    /// Resolves the pending operation and hands the computed value back for
    /// narration. No-op (returns `None`) without a full pending expression.
    /// Pressing equals straight after an operator reuses the last entered
    /// operand, so `5 + 3 + =` resolves to 8 + 3 = 11.
    pub fn equals(&mut self) -> Option<f64> {
        let (Some(previous), Some(op)) = (self.previous, self.operator) else {
            return None;
        };
        let input = if self.awaiting_new_entry {
            self.last_operand.or_else(|| self.value())?
        } else {
            self.value()?
        };

        let result = evaluate(previous, input, op);
        self.display = format_number(result);
        self.previous = None;
        self.operator = None;
        self.awaiting_new_entry = true;
        Some(result)
    }
}

fn evaluate(previous: f64, next: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => previous + next,
        Operator::Subtract => previous - next,
        Operator::Multiply => previous * next,
        Operator::Divide => {
            if next == 0.0 {
                f64::NAN
            } else {
                previous / next
            }
        }
    }
}

/// Rounds to 12 decimal digits to shed binary floating-point noise, then
/// reformats through f64's shortest-decimal Display so rounding never leaves
/// trailing zeros behind.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_TEXT.to_string();
    }
    let rounded: f64 = format!("{value:.12}").parse().unwrap_or(value);
    if rounded == 0.0 {
        // collapse -0
        return "0".to_string();
    }
    rounded.to_string()
}
