// Focus management for the job form

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    #[default]
    Folder,
    Preset,
    SizeCap,
}

impl FormFocus {
    const ORDER: [FormFocus; 3] = [FormFocus::Folder, FormFocus::Preset, FormFocus::SizeCap];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether typed characters go into a text field
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::SizeCap)
    }
}
