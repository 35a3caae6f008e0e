#![allow(dead_code)]

use bracket_random::prelude::RandomNumberGenerator;

use crate::data::{BUTTONS, ButtonId, ButtonSpec, StyleClass, binary_label, roman_label};
use crate::engine::format_number;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lawful {
    Lawful,
    Neutral,
    Chaotic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Good {
    Good,
    Neutral,
    Evil,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub lawful: Lawful,
    pub good: Good,
}

/// Grid order matches the picker: good row first, then neutral, then evil.
pub const ALIGNMENTS: [Alignment; 9] = [
    Alignment { lawful: Lawful::Lawful, good: Good::Good },
    Alignment { lawful: Lawful::Neutral, good: Good::Good },
    Alignment { lawful: Lawful::Chaotic, good: Good::Good },
    Alignment { lawful: Lawful::Lawful, good: Good::Neutral },
    Alignment { lawful: Lawful::Neutral, good: Good::Neutral },
    Alignment { lawful: Lawful::Chaotic, good: Good::Neutral },
    Alignment { lawful: Lawful::Lawful, good: Good::Evil },
    Alignment { lawful: Lawful::Neutral, good: Good::Evil },
    Alignment { lawful: Lawful::Chaotic, good: Good::Evil },
];

impl Default for Alignment {
    fn default() -> Self {
        ALIGNMENTS[0]
    }
}

impl Alignment {
    pub fn name(&self) -> &'static str {
        match (self.lawful, self.good) {
            (Lawful::Lawful, Good::Good) => "Lawful Good",
            (Lawful::Neutral, Good::Good) => "Neutral Good",
            (Lawful::Chaotic, Good::Good) => "Chaotic Good",
            (Lawful::Lawful, Good::Neutral) => "Lawful Neutral",
            (Lawful::Neutral, Good::Neutral) => "True Neutral",
            (Lawful::Chaotic, Good::Neutral) => "Chaotic Neutral",
            (Lawful::Lawful, Good::Evil) => "Lawful Evil",
            (Lawful::Neutral, Good::Evil) => "Neutral Evil",
            (Lawful::Chaotic, Good::Evil) => "Chaotic Evil",
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match (self.lawful, self.good) {
            (Lawful::Lawful, Good::Good) => "LG",
            (Lawful::Neutral, Good::Good) => "NG",
            (Lawful::Chaotic, Good::Good) => "CG",
            (Lawful::Lawful, Good::Neutral) => "LN",
            (Lawful::Neutral, Good::Neutral) => "TN",
            (Lawful::Chaotic, Good::Neutral) => "CN",
            (Lawful::Lawful, Good::Evil) => "LE",
            (Lawful::Neutral, Good::Evil) => "NE",
            (Lawful::Chaotic, Good::Evil) => "CE",
        }
    }

    /// Theme-table key, matching the palette JSON.
    pub fn key(&self) -> &'static str {
        match (self.lawful, self.good) {
            (Lawful::Lawful, Good::Good) => "lawfulGood",
            (Lawful::Neutral, Good::Good) => "neutralGood",
            (Lawful::Chaotic, Good::Good) => "chaoticGood",
            (Lawful::Lawful, Good::Neutral) => "lawfulNeutral",
            (Lawful::Neutral, Good::Neutral) => "trueNeutral",
            (Lawful::Chaotic, Good::Neutral) => "chaoticNeutral",
            (Lawful::Lawful, Good::Evil) => "lawfulEvil",
            (Lawful::Neutral, Good::Evil) => "neutralEvil",
            (Lawful::Chaotic, Good::Evil) => "chaoticEvil",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match (self.lawful, self.good) {
            (Lawful::Lawful, Good::Good) => "I shall serve your sums with honor.",
            (Lawful::Neutral, Good::Good) => "Glad to be your calculator today.",
            (Lawful::Chaotic, Good::Good) => {
                "Let's break some rules and still get the right answers."
            }
            (Lawful::Lawful, Good::Neutral) => "State your figures. I will process them.",
            (Lawful::Neutral, Good::Neutral) => "I am ready. Numbers in, numbers out.",
            (Lawful::Chaotic, Good::Neutral) => "Buttons may wander. So do I.",
            (Lawful::Lawful, Good::Evil) => "Every calculation has a price.",
            (Lawful::Neutral, Good::Evil) => "Your numbers are safe with me. Mostly.",
            (Lawful::Chaotic, Good::Evil) => "LET THE DIGITS SCREAM.",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LabelScheme {
    Canonical,
    Roman,
    Binary,
}

/// A button as the presentation layer should draw it: canonical id for
/// dispatch, derived label, style class for coloring.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderButton {
    pub id: ButtonId,
    pub label: String,
    pub style: StyleClass,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NarratedResult {
    pub value: f64,
    pub text: String,
}

/// Derives the button list for one presentation spin. Pure given the injected
/// RNG: lawful alignments always yield the canonical pad; chaotic ones shuffle
/// and re-pick the digit label scheme every spin; neutral does so half the
/// time. Called once per button press, so the pad can scramble mid-session.
pub fn derive_presentation(
    alignment: Alignment,
    rng: &mut RandomNumberGenerator,
) -> Vec<RenderButton> {
    let volatile = match alignment.lawful {
        Lawful::Lawful => false,
        Lawful::Neutral => rng.range(0, 2) == 0,
        Lawful::Chaotic => true,
    };

    let scheme = if volatile {
        match rng.range(0, 3) {
            0 => LabelScheme::Roman,
            1 => LabelScheme::Binary,
            _ => LabelScheme::Canonical,
        }
    } else {
        LabelScheme::Canonical
    };

    let mut pad: Vec<ButtonSpec> = BUTTONS.to_vec();
    if volatile {
        shuffle(&mut pad, rng);
    }

    pad.into_iter()
        .map(|spec| RenderButton {
            id: spec.id,
            label: scheme_label(spec, scheme),
            style: spec.style,
        })
        .collect()
}

fn scheme_label(spec: ButtonSpec, scheme: LabelScheme) -> String {
    match (spec.id, scheme) {
        (ButtonId::Digit(d), LabelScheme::Roman) => roman_label(d).to_string(),
        (ButtonId::Digit(d), LabelScheme::Binary) => binary_label(d).to_string(),
        _ => spec.label.to_string(),
    }
}

fn shuffle(pad: &mut [ButtonSpec], rng: &mut RandomNumberGenerator) {
    for i in (1..pad.len()).rev() {
        let j = rng.range(0, i as i32 + 1) as usize;
        pad.swap(i, j);
    }
}

pub const FALLBACK_LINE: &str = "The answer is {result}.";

/// Three candidate lines per alignment cell; `{result}` interpolates the
/// value formatted exactly as the calculator display shows it.
static NARRATION_TABLE: [(Lawful, Good, [&str; 3]); 9] = [
    (
        Lawful::Lawful,
        Good::Good,
        [
            "It is my honor to report that the answer is {result}.",
            "Truth and arithmetic agree: {result}.",
            "By every honest measure, the result is {result}.",
        ],
    ),
    (
        Lawful::Neutral,
        Good::Good,
        [
            "Happy to help! It comes to {result}.",
            "Good news: that works out to {result}.",
            "Here you go, friend: {result}.",
        ],
    ),
    (
        Lawful::Chaotic,
        Good::Good,
        [
            "Ha! {result}! Math is a wild ride, isn't it?",
            "Boom -- {result}. Don't ask how, we got there.",
            "{result}! I skipped a few rules but the answer's right.",
        ],
    ),
    (
        Lawful::Lawful,
        Good::Neutral,
        [
            "Per procedure, the result is {result}.",
            "Calculation complete. Output: {result}.",
            "The ledger records {result}. Next entry, please.",
        ],
    ),
    (
        Lawful::Neutral,
        Good::Neutral,
        [
            "The answer is {result}.",
            "It equals {result}. Nothing more, nothing less.",
            "{result}. Balance is maintained.",
        ],
    ),
    (
        Lawful::Chaotic,
        Good::Neutral,
        [
            "Could be {result}. Probably is. Who's to say?",
            "The dice of fate landed on {result}.",
            "{result}, unless the universe changes its mind.",
        ],
    ),
    (
        Lawful::Lawful,
        Good::Evil,
        [
            "The contract stipulates {result}. Read the fine print.",
            "As agreed: {result}. Payment is due.",
            "{result}, exactly as the terms demand. No appeals.",
        ],
    ),
    (
        Lawful::Neutral,
        Good::Evil,
        [
            "{result}. Not that it will help you.",
            "You get {result}. I get something far more valuable.",
            "The answer is {result}. Use it selfishly.",
        ],
    ),
    (
        Lawful::Chaotic,
        Good::Evil,
        [
            "{result}! Scrawled in something best left unnamed.",
            "{result} -- and the decimal points screamed.",
            "The abyss coughs up {result}. Take it and run.",
        ],
    ),
];

static FALLBACK_LINES: [&str; 1] = [FALLBACK_LINE];

fn templates_for(alignment: Alignment) -> &'static [&'static str] {
    NARRATION_TABLE
        .iter()
        .find(|(lawful, good, _)| *lawful == alignment.lawful && *good == alignment.good)
        .map(|(_, _, lines)| &lines[..])
        .unwrap_or(&FALLBACK_LINES)
}

fn render_line(line: &str, value: f64) -> String {
    line.replace("{result}", &format_number(value))
}

/// Picks one narration line for an equals result, uniformly among the
/// alignment's candidates.
pub fn narrate(
    alignment: Alignment,
    value: f64,
    rng: &mut RandomNumberGenerator,
) -> NarratedResult {
    let lines = templates_for(alignment);
    let idx = rng.range(0, lines.len() as i32) as usize;
    NarratedResult {
        value,
        text: render_line(lines[idx], value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_ids() -> Vec<ButtonId> {
        BUTTONS.iter().map(|spec| spec.id).collect()
    }

    fn canonical_labels() -> Vec<String> {
        BUTTONS.iter().map(|spec| spec.label.to_string()).collect()
    }

    #[test]
    fn lawful_pad_is_stable_across_spins() {
        let mut rng = RandomNumberGenerator::seeded(7);
        let alignment = Alignment { lawful: Lawful::Lawful, good: Good::Good };
        for _ in 0..10 {
            let pad = derive_presentation(alignment, &mut rng);
            let ids: Vec<ButtonId> = pad.iter().map(|b| b.id).collect();
            let labels: Vec<String> = pad.iter().map(|b| b.label.clone()).collect();
            assert_eq!(ids, canonical_ids());
            assert_eq!(labels, canonical_labels());
        }
    }

    #[test]
    fn chaotic_pad_scrambles_every_spin() {
        let mut rng = RandomNumberGenerator::seeded(99);
        let alignment = Alignment { lawful: Lawful::Chaotic, good: Good::Evil };
        let mut saw_alternate_labels = false;
        for _ in 0..16 {
            let pad = derive_presentation(alignment, &mut rng);
            let ids: Vec<ButtonId> = pad.iter().map(|b| b.id).collect();
            assert_ne!(ids, canonical_ids());
            // same ids, different order
            let mut sorted_debug: Vec<String> =
                ids.iter().map(|id| format!("{id:?}")).collect();
            sorted_debug.sort();
            let mut canonical_debug: Vec<String> =
                canonical_ids().iter().map(|id| format!("{id:?}")).collect();
            canonical_debug.sort();
            assert_eq!(sorted_debug, canonical_debug);

            let labels: Vec<&str> = pad.iter().map(|b| b.label.as_str()).collect();
            if labels.iter().any(|l| l.len() == 4 || *l == "IX" || *l == "VII") {
                saw_alternate_labels = true;
            }
        }
        assert!(saw_alternate_labels);
    }

    #[test]
    fn non_digit_buttons_keep_canonical_labels_under_all_schemes() {
        for scheme in [LabelScheme::Canonical, LabelScheme::Roman, LabelScheme::Binary] {
            for spec in BUTTONS.iter().filter(|s| !matches!(s.id, ButtonId::Digit(_))) {
                assert_eq!(scheme_label(*spec, scheme), spec.label);
            }
        }
    }

    #[test]
    fn digit_labels_follow_the_scheme() {
        let seven = BUTTONS
            .iter()
            .copied()
            .find(|s| s.id == ButtonId::Digit(7))
            .expect("7 button");
        assert_eq!(scheme_label(seven, LabelScheme::Canonical), "7");
        assert_eq!(scheme_label(seven, LabelScheme::Roman), "VII");
        assert_eq!(scheme_label(seven, LabelScheme::Binary), "0111");
    }

    #[test]
    fn lawful_good_narration_stays_in_its_table() {
        let alignment = Alignment { lawful: Lawful::Lawful, good: Good::Good };
        let lines = templates_for(alignment);
        let mut rng = RandomNumberGenerator::seeded(3);
        for _ in 0..20 {
            let narrated = narrate(alignment, 8.0, &mut rng);
            assert!(narrated.text.contains(&format_number(8.0)));
            assert!(
                lines
                    .iter()
                    .any(|line| render_line(line, 8.0) == narrated.text),
                "unexpected narration {:?}",
                narrated.text
            );
        }
    }

    #[test]
    fn every_alignment_has_three_lines_with_result_slot() {
        for alignment in ALIGNMENTS {
            let lines = templates_for(alignment);
            assert_eq!(lines.len(), 3, "{}", alignment.name());
            for line in lines {
                assert!(line.contains("{result}"), "{line}");
            }
        }
    }

    #[test]
    fn fallback_line_interpolates_plainly() {
        assert_eq!(render_line(FALLBACK_LINE, 7.0), "The answer is 7.");
    }

    #[test]
    fn error_results_narrate_the_error_marker() {
        let mut rng = RandomNumberGenerator::seeded(11);
        let narrated = narrate(Alignment::default(), f64::NAN, &mut rng);
        assert!(narrated.value.is_nan());
        assert!(narrated.text.contains("Error"));
    }

    #[test]
    fn alignment_keys_match_the_theme_table() {
        let book = crate::data::themes::ThemeBook::load();
        for alignment in ALIGNMENTS {
            // a miss would silently fall back; assert the real palette loads
            let palette = book.palette(alignment.key());
            let fallback = crate::data::themes::Palette::default();
            let distinct = palette.primary != fallback.primary
                || palette.accent != fallback.accent;
            assert!(distinct, "{} fell back", alignment.key());
        }
    }
}
