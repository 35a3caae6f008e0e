use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::data::ButtonId;
use crate::engine::Operator;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptCommand {
    Press(ButtonId),
    Backspace,
    SelectAlignment(usize),
}

/// Replays a keystroke script through the normal input path, one command per
/// step. Lines starting with `#` and whitespace are skipped.
pub struct ScriptedInput {
    commands: Vec<ScriptCommand>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut text = String::new();
        for line in reader.lines() {
            let line = line?;
            text.push_str(&line);
            text.push('\n');
        }
        Ok(Self::from_script(&text))
    }

    pub fn from_script(text: &str) -> Self {
        let mut commands = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            for ch in trimmed.chars() {
                if ch.is_whitespace() {
                    continue;
                }
                if let Some(command) = char_to_command(ch) {
                    commands.push(command);
                } else {
                    eprintln!("Warning: unknown key in script: {ch}");
                }
            }
        }
        Self { commands, cursor: 0 }
    }

    pub fn next_command(&mut self) -> Option<ScriptCommand> {
        let command = self.commands.get(self.cursor).copied();
        if command.is_some() {
            self.cursor += 1;
        }
        command
    }
}

fn char_to_command(c: char) -> Option<ScriptCommand> {
    match c {
        '0'..='9' => Some(ScriptCommand::Press(ButtonId::Digit(
            c as u8 - b'0',
        ))),
        '.' => Some(ScriptCommand::Press(ButtonId::Point)),
        '+' => Some(ScriptCommand::Press(ButtonId::Op(Operator::Add))),
        '-' => Some(ScriptCommand::Press(ButtonId::Op(Operator::Subtract))),
        '*' => Some(ScriptCommand::Press(ButtonId::Op(Operator::Multiply))),
        '/' => Some(ScriptCommand::Press(ButtonId::Op(Operator::Divide))),
        '=' => Some(ScriptCommand::Press(ButtonId::Equals)),
        '%' => Some(ScriptCommand::Press(ButtonId::Percent)),
        'c' => Some(ScriptCommand::Press(ButtonId::Clear)),
        'n' => Some(ScriptCommand::Press(ButtonId::Negate)),
        'b' => Some(ScriptCommand::Backspace),
        // A..I select the nine alignment presets in picker order
        'A'..='I' => Some(ScriptCommand::SelectAlignment(c as usize - 'A' as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_calculator_key_set() {
        let mut script = ScriptedInput::from_script("# demo\n5+3=\nC 50%\n");
        let mut commands = Vec::new();
        while let Some(command) = script.next_command() {
            commands.push(command);
        }
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Press(ButtonId::Digit(5)),
                ScriptCommand::Press(ButtonId::Op(Operator::Add)),
                ScriptCommand::Press(ButtonId::Digit(3)),
                ScriptCommand::Press(ButtonId::Equals),
                ScriptCommand::SelectAlignment(2),
                ScriptCommand::Press(ButtonId::Digit(5)),
                ScriptCommand::Press(ButtonId::Digit(0)),
                ScriptCommand::Press(ButtonId::Percent),
            ]
        );
    }

    #[test]
    fn skips_unknown_characters() {
        let mut script = ScriptedInput::from_script("5?7");
        assert_eq!(
            script.next_command(),
            Some(ScriptCommand::Press(ButtonId::Digit(5)))
        );
        assert_eq!(
            script.next_command(),
            Some(ScriptCommand::Press(ButtonId::Digit(7)))
        );
        assert_eq!(script.next_command(), None);
    }

    #[test]
    fn exhausted_script_keeps_returning_none() {
        let mut script = ScriptedInput::from_script("");
        assert_eq!(script.next_command(), None);
        assert_eq!(script.next_command(), None);
    }
}
