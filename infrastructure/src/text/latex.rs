//! LaTeX shorthand cleanup.
//!
//! Models and web pages often write units and arithmetic in inline LaTeX
//! (`25^\circ\mathrm{C}`, `3 \times 4`). In a plain-text terminal those read
//! badly, so [`LatexShorthandTransform`] rewrites a fixed set of commands to
//! their Unicode or plain-text equivalents. Rules run in order; each sees
//! the output of the previous one.

use regex::Regex;
use relay_application::ports::text_transform::TextTransform;

/// `(pattern, replacement)` pairs, applied top to bottom.
const RULES: &[(&str, &str)] = &[
    (r"(\d+)\s*(?:\\,)?\s*\^?\s*\{?\\circ\}?\s*\\mathrm\{C\}", "${1}°C"),
    (r"(\d+)\s*(?:\\,)?\s*\^?\s*\{?\\circ\}?\s*\\mathrm\{F\}", "${1}°F"),
    (r"(\d+)\s*(?:\\,)?\s*\^?\s*\{?\\circ\}?", "${1}°"),
    (r"\\times", "×"),
    (r"\\div", "÷"),
    (r"\\pm", "±"),
    (r"\\sqrt\{([^}]+)\}", "√(${1})"),
    (r"\\frac\{([^}]+)\}\{([^}]+)\}", "${1}/${2}"),
    (r"\\mathrm\{([^}]+)\}", "${1}"),
    (r"\\text(?:bf)?\{([^}]+)\}", "${1}"),
    (r"\\left\(", "("),
    (r"\\right\)", ")"),
    (r"\\,", " "),
    (r"\\%", "%"),
];

/// [`TextTransform`] that replaces common LaTeX shorthand with readable text.
#[derive(Debug, Clone)]
pub struct LatexShorthandTransform {
    rules: Vec<(Regex, &'static str)>,
}

impl LatexShorthandTransform {
    pub fn new() -> Result<Self, regex::Error> {
        let rules = RULES
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, *replacement)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }
}

impl TextTransform for LatexShorthandTransform {
    fn apply(&self, text: &str) -> String {
        if !text.contains('\\') {
            return text.to_string();
        }
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (regex, replacement)| {
                regex.replace_all(&acc, *replacement).into_owned()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str) -> String {
        LatexShorthandTransform::new().unwrap().apply(text)
    }

    #[test]
    fn test_temperatures() {
        assert_eq!(apply(r"It is 25^\circ\mathrm{C} today"), "It is 25°C today");
        assert_eq!(apply(r"77\,^\circ\mathrm{F}"), "77°F");
        assert_eq!(apply(r"a 90^{\circ} angle"), "a 90° angle");
    }

    #[test]
    fn test_operators() {
        assert_eq!(apply(r"3 \times 4 \div 2 \pm 1"), "3 × 4 ÷ 2 ± 1");
    }

    #[test]
    fn test_grouped_commands() {
        assert_eq!(apply(r"\sqrt{2}"), "√(2)");
        assert_eq!(apply(r"\frac{1}{3} cup"), "1/3 cup");
        assert_eq!(apply(r"5 \mathrm{km}"), "5 km");
        assert_eq!(apply(r"\textbf{Note}: \text{done}"), "Note: done");
        assert_eq!(apply(r"\left(x + y\right)"), "(x + y)");
    }

    #[test]
    fn test_spacing_and_percent() {
        assert_eq!(apply(r"10\,000 or 50\%"), "10 000 or 50%");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "Commas, percents 5% and carets ^ stay as they are.";
        assert_eq!(apply(text), text);
    }
}
