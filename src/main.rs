mod data;
mod engine;
mod personality;
mod render;
mod scripted_input;

use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::*;
use smallvec::SmallVec;

use data::ButtonId;
use data::themes::ThemeBook;
use engine::{Calculator, Operator, format_number};
use personality::{ALIGNMENTS, Alignment, RenderButton, derive_presentation, narrate};
use render::ChatEntry;
use scripted_input::{ScriptCommand, ScriptedInput};

const CHAT_MAX_ENTRIES: usize = 10;
const NARRATION_DELAY_FRAMES: u64 = 45;
const SCRIPT_STEP_FRAMES: u64 = 20;

struct PendingNarration {
    due_frame: u64,
    text: String,
}

struct CalcBotState {
    calc: Calculator,
    alignment: Alignment,
    pad: Vec<RenderButton>,
    themes: ThemeBook,
    chat: Vec<ChatEntry>,
    pending: SmallVec<[PendingNarration; 4]>,
    rng: RandomNumberGenerator,
    script: Option<ScriptedInput>,
    frame: u64,
}

impl CalcBotState {
    fn new(script: Option<ScriptedInput>) -> Self {
        let alignment = Alignment::default();
        let mut rng = RandomNumberGenerator::new();
        let pad = derive_presentation(alignment, &mut rng);
        let mut state = Self {
            calc: Calculator::new(),
            alignment,
            pad,
            themes: ThemeBook::load(),
            chat: Vec::new(),
            pending: SmallVec::new(),
            rng,
            script,
            frame: 0,
        };
        state.push_chat(ChatEntry::bot(alignment.greeting()));
        state
    }

    fn push_chat(&mut self, entry: ChatEntry) {
        self.chat.insert(0, entry);
        self.chat.truncate(CHAT_MAX_ENTRIES);
    }

    fn press(&mut self, button: ButtonId) {
        match button {
            ButtonId::Digit(d) => self.calc.input((b'0' + d) as char),
            ButtonId::Point => self.calc.input('.'),
            ButtonId::Clear => self.calc.clear(),
            ButtonId::Negate => self.calc.negate(),
            ButtonId::Percent => self.calc.percent(),
            ButtonId::Op(op) => self.calc.apply_operator(op),
            ButtonId::Equals => self.handle_equals(),
        }
        self.respin_pad();
    }

    fn backspace(&mut self) {
        self.calc.backspace();
        self.respin_pad();
    }

    // every press re-derives the pad; lawful alignments come back unchanged
    fn respin_pad(&mut self) {
        self.pad = derive_presentation(self.alignment, &mut self.rng);
    }

    // mirrors the operand equals() will actually consume
    fn expression_line(&self) -> Option<String> {
        let previous = self.calc.previous()?;
        let op = self.calc.pending_operator()?;
        let operand = if self.calc.awaiting_new_entry() {
            format_number(self.calc.last_operand()?)
        } else {
            self.calc.display().to_string()
        };
        Some(format!("{} {} {}", format_number(previous), op.symbol(), operand))
    }

    fn handle_equals(&mut self) {
        let expression = self.expression_line();
        let Some(value) = self.calc.equals() else {
            return;
        };
        if let Some(expression) = expression {
            self.push_chat(ChatEntry::user(format!("{expression} =")));
        }
        let narration = narrate(self.alignment, value, &mut self.rng);
        self.pending.push(PendingNarration {
            due_frame: self.frame + NARRATION_DELAY_FRAMES,
            text: narration.text,
        });
    }

    fn select_alignment(&mut self, idx: usize) {
        let Some(&alignment) = ALIGNMENTS.get(idx) else {
            return;
        };
        if alignment == self.alignment {
            return;
        }
        self.alignment = alignment;
        // presentation resets; calculator state deliberately survives
        self.respin_pad();
        self.push_chat(ChatEntry::bot(format!(
            "[{}] {}",
            alignment.name(),
            alignment.greeting()
        )));
    }

    fn deliver_due_narrations(&mut self) {
        let frame = self.frame;
        let mut due: Vec<String> = Vec::new();
        self.pending.retain(|pending| {
            if pending.due_frame <= frame {
                due.push(pending.text.clone());
                false
            } else {
                true
            }
        });
        for text in due {
            self.push_chat(ChatEntry::bot(text));
        }
    }

    fn handle_input(&mut self, ctx: &mut BTerm) {
        if self.script.is_some() {
            self.step_script();
            return;
        }

        if let Some(key) = ctx.key {
            if let Some(action) = key_action(key, ctx.shift) {
                self.apply(action);
            }
        }

        if ctx.left_click {
            let mouse = ctx.mouse_point();
            if let Some(idx) = render::button_at(self.pad.len(), mouse) {
                let button = self.pad[idx].id;
                self.press(button);
            } else if let Some(idx) = render::alignment_at(mouse) {
                self.select_alignment(idx);
            }
        }
    }

    fn step_script(&mut self) {
        if self.frame % SCRIPT_STEP_FRAMES != 0 {
            return;
        }
        let command = self.script.as_mut().and_then(ScriptedInput::next_command);
        match command {
            Some(ScriptCommand::Press(button)) => self.press(button),
            Some(ScriptCommand::Backspace) => self.backspace(),
            Some(ScriptCommand::SelectAlignment(idx)) => self.select_alignment(idx),
            None => self.script = None,
        }
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Press(button) => self.press(button),
            InputAction::Backspace => self.backspace(),
            InputAction::SelectAlignment(idx) => self.select_alignment(idx),
        }
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        let palette = self.themes.palette(self.alignment.key());
        let header = format!("CalcBot · {}", self.alignment.name());
        ctx.print_color_centered(1, palette.accent, RGB::named(BLACK), &header);

        render::draw_alignment_picker(ctx, self.alignment, palette);
        render::draw_display(ctx, &self.calc, palette);
        render::draw_buttons(ctx, &self.pad, palette);
        render::draw_chat(ctx, &self.chat, palette);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InputAction {
    Press(ButtonId),
    Backspace,
    SelectAlignment(usize),
}

fn key_action(key: VirtualKeyCode, shift: bool) -> Option<InputAction> {
    use VirtualKeyCode as K;

    let digit = |d: u8| Some(InputAction::Press(ButtonId::Digit(d)));
    let press = |id: ButtonId| Some(InputAction::Press(id));

    match key {
        K::Key0 | K::Numpad0 => digit(0),
        K::Key1 | K::Numpad1 => digit(1),
        K::Key2 | K::Numpad2 => digit(2),
        K::Key3 | K::Numpad3 => digit(3),
        K::Key4 | K::Numpad4 => digit(4),
        K::Key5 if shift => press(ButtonId::Percent),
        K::Key5 | K::Numpad5 => digit(5),
        K::Key6 | K::Numpad6 => digit(6),
        K::Key7 | K::Numpad7 => digit(7),
        K::Key8 if shift => press(ButtonId::Op(Operator::Multiply)),
        K::Key8 | K::Numpad8 => digit(8),
        K::Key9 | K::Numpad9 => digit(9),
        K::Period | K::NumpadDecimal => press(ButtonId::Point),
        K::Equals if shift => press(ButtonId::Op(Operator::Add)),
        K::Equals => press(ButtonId::Equals),
        K::NumpadAdd => press(ButtonId::Op(Operator::Add)),
        K::Minus | K::NumpadSubtract => press(ButtonId::Op(Operator::Subtract)),
        K::NumpadMultiply => press(ButtonId::Op(Operator::Multiply)),
        K::Slash | K::NumpadDivide => press(ButtonId::Op(Operator::Divide)),
        K::Return | K::NumpadEnter => press(ButtonId::Equals),
        K::Escape => press(ButtonId::Clear),
        K::Back => Some(InputAction::Backspace),
        K::N => press(ButtonId::Negate),
        K::P => press(ButtonId::Percent),
        K::F1 => Some(InputAction::SelectAlignment(0)),
        K::F2 => Some(InputAction::SelectAlignment(1)),
        K::F3 => Some(InputAction::SelectAlignment(2)),
        K::F4 => Some(InputAction::SelectAlignment(3)),
        K::F5 => Some(InputAction::SelectAlignment(4)),
        K::F6 => Some(InputAction::SelectAlignment(5)),
        K::F7 => Some(InputAction::SelectAlignment(6)),
        K::F8 => Some(InputAction::SelectAlignment(7)),
        K::F9 => Some(InputAction::SelectAlignment(8)),
        _ => None,
    }
}

impl GameState for CalcBotState {
    fn tick(&mut self, ctx: &mut BTerm) {
        self.handle_input(ctx);
        self.frame = self.frame.wrapping_add(1);
        self.deliver_due_narrations();
        ctx.cls();
        self.draw_scene(ctx);
    }
}

fn main() -> BError {
    let script = std::env::args()
        .nth(1)
        .map(ScriptedInput::from_file)
        .transpose()?;

    let context = BTermBuilder::simple80x50()
        .with_title("CalcBot · Know Your Alignment")
        .build()?;
    let state = CalcBotState::new(script);
    main_loop(context, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_drives_a_chained_calculation() {
        let mut state =
            CalcBotState::new(Some(ScriptedInput::from_script("5+3+=")));
        for _ in 0..5 {
            state.step_script();
            state.frame += SCRIPT_STEP_FRAMES;
        }
        assert_eq!(state.calc.display(), "11");
        // user bubble lands immediately; bot narration is still pending
        assert_eq!(state.pending.len(), 1);
        assert!(state.chat.iter().any(|entry| entry.text == "8 + 3 ="));
    }

    #[test]
    fn narration_arrives_after_the_delay() {
        let mut state = CalcBotState::new(None);
        state.press(ButtonId::Digit(2));
        state.press(ButtonId::Op(Operator::Multiply));
        state.press(ButtonId::Digit(3));
        state.press(ButtonId::Equals);
        assert_eq!(state.pending.len(), 1);

        state.deliver_due_narrations();
        assert_eq!(state.pending.len(), 1, "must not deliver early");

        state.frame += NARRATION_DELAY_FRAMES;
        state.deliver_due_narrations();
        assert!(state.pending.is_empty());
        let bot_lines: Vec<&ChatEntry> = state
            .chat
            .iter()
            .filter(|entry| entry.sender == render::Sender::Bot)
            .collect();
        assert!(bot_lines.iter().any(|entry| entry.text.contains('6')));
    }

    #[test]
    fn equals_without_expression_emits_nothing() {
        let mut state = CalcBotState::new(None);
        state.press(ButtonId::Digit(9));
        state.press(ButtonId::Equals);
        assert!(state.pending.is_empty());
        assert_eq!(state.calc.display(), "9");
    }

    #[test]
    fn alignment_change_keeps_calculator_state() {
        let mut state = CalcBotState::new(None);
        state.press(ButtonId::Digit(4));
        state.press(ButtonId::Digit(2));
        state.select_alignment(8);
        assert_eq!(state.alignment, ALIGNMENTS[8]);
        assert_eq!(state.calc.display(), "42");
        assert!(state.chat[0].text.contains("Chaotic Evil"));
    }

    #[test]
    fn selecting_the_current_alignment_is_a_noop() {
        let mut state = CalcBotState::new(None);
        let chat_len = state.chat.len();
        state.select_alignment(0);
        assert_eq!(state.chat.len(), chat_len);
    }

    #[test]
    fn chat_ring_is_bounded() {
        let mut state = CalcBotState::new(None);
        for i in 0..CHAT_MAX_ENTRIES + 5 {
            state.push_chat(ChatEntry::bot(format!("line {i}")));
        }
        assert_eq!(state.chat.len(), CHAT_MAX_ENTRIES);
        assert_eq!(state.chat[0].text, format!("line {}", CHAT_MAX_ENTRIES + 4));
    }

    #[test]
    fn shift_digit_keys_reach_the_symbol_buttons() {
        assert_eq!(
            key_action(VirtualKeyCode::Key8, true),
            Some(InputAction::Press(ButtonId::Op(Operator::Multiply)))
        );
        assert_eq!(
            key_action(VirtualKeyCode::Key8, false),
            Some(InputAction::Press(ButtonId::Digit(8)))
        );
        assert_eq!(
            key_action(VirtualKeyCode::Equals, true),
            Some(InputAction::Press(ButtonId::Op(Operator::Add)))
        );
        assert_eq!(
            key_action(VirtualKeyCode::Equals, false),
            Some(InputAction::Press(ButtonId::Equals))
        );
    }
}
