use crossterm::event::KeyCode;

/// A field whose value is picked from a fixed list with Left/Right.
///
/// A value that is not in the list (a project created elsewhere with a custom
/// status, say) is kept as-is until the user moves off it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceInputState {
    options: &'static [&'static str],
    pub value: String,
}

impl ChoiceInputState {
    pub fn new(options: &'static [&'static str], value: impl Into<String>) -> Self {
        Self {
            options,
            value: value.into(),
        }
    }

    fn position(&self) -> Option<usize> {
        self.options.iter().position(|option| *option == self.value)
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let i = match self.position() {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        };
        self.value = self.options[i].to_string();
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let i = match self.position() {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        };
        self.value = self.options[i].to_string();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Right | KeyCode::Char(' ') => self.next(),
            KeyCode::Left => self.previous(),
            _ => {}
        }
    }

    pub fn get_display_string(&self) -> String {
        format!("< {} >", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [&str; 3] = ["s", "m", "l"];

    #[test]
    fn cycles_in_both_directions() {
        let mut choice = ChoiceInputState::new(&SIZES, "m");

        choice.handle_input(KeyCode::Right);
        assert_eq!(choice.value, "l");
        choice.handle_input(KeyCode::Right);
        assert_eq!(choice.value, "s");
        choice.handle_input(KeyCode::Left);
        assert_eq!(choice.value, "l");
    }

    #[test]
    fn unknown_value_is_kept_until_moved() {
        let mut choice = ChoiceInputState::new(&SIZES, "xl");
        assert_eq!(choice.get_display_string(), "< xl >");

        choice.next();
        assert_eq!(choice.value, "s");
    }
}
