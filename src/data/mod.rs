#![allow(dead_code)]

pub mod themes;

use crate::engine::Operator;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonId {
    Digit(u8),
    Point,
    Op(Operator),
    Equals,
    Clear,
    Negate,
    Percent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleClass {
    Digit,
    Operator,
    Function,
    Equals,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub id: ButtonId,
    pub label: &'static str,
    pub style: StyleClass,
}

impl ButtonSpec {
    const fn new(id: ButtonId, label: &'static str, style: StyleClass) -> Self {
        Self { id, label, style }
    }
}

/// Canonical button table in pad order: function row, then three digit rows
/// with the operator column on the right, then the bottom `0 . =` row.
pub const BUTTONS: [ButtonSpec; 19] = [
    ButtonSpec::new(ButtonId::Clear, "C", StyleClass::Function),
    ButtonSpec::new(ButtonId::Negate, "+/-", StyleClass::Function),
    ButtonSpec::new(ButtonId::Percent, "%", StyleClass::Function),
    ButtonSpec::new(ButtonId::Op(Operator::Divide), "/", StyleClass::Operator),
    ButtonSpec::new(ButtonId::Digit(7), "7", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(8), "8", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(9), "9", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Op(Operator::Multiply), "*", StyleClass::Operator),
    ButtonSpec::new(ButtonId::Digit(4), "4", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(5), "5", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(6), "6", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Op(Operator::Subtract), "-", StyleClass::Operator),
    ButtonSpec::new(ButtonId::Digit(1), "1", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(2), "2", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Digit(3), "3", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Op(Operator::Add), "+", StyleClass::Operator),
    ButtonSpec::new(ButtonId::Digit(0), "0", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Point, ".", StyleClass::Digit),
    ButtonSpec::new(ButtonId::Equals, "=", StyleClass::Equals),
];

/// Roman digit labels; 0 takes N for nulla.
pub fn roman_label(digit: u8) -> &'static str {
    match digit {
        0 => "N",
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        5 => "V",
        6 => "VI",
        7 => "VII",
        8 => "VIII",
        9 => "IX",
        _ => "?",
    }
}

pub fn binary_label(digit: u8) -> &'static str {
    match digit {
        0 => "0000",
        1 => "0001",
        2 => "0010",
        3 => "0011",
        4 => "0100",
        5 => "0101",
        6 => "0110",
        7 => "0111",
        8 => "1000",
        9 => "1001",
        _ => "????",
    }
}
