/// Which subset of the task list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    /// Check whether a task with the given completion flag passes the filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Cycle to the next filter (All -> Active -> Completed -> All)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn all() -> &'static [FilterMode] {
        &[FilterMode::All, FilterMode::Active, FilterMode::Completed]
    }
}

/// Language used for breakdown prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    Ar,
    Sv,
    Pt,
}

impl Locale {
    /// Parse a stored locale code like "es"
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "ar" => Some(Self::Ar),
            "sv" => Some(Self::Sv),
            "pt" => Some(Self::Pt),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Ar => "ar",
            Self::Sv => "sv",
            Self::Pt => "pt",
        }
    }

    /// Native display name for the selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::Ar => "العربية",
            Self::Sv => "Svenska",
            Self::Pt => "Português",
        }
    }

    /// English name of the language, as written into breakdown prompts
    pub fn language_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::Ar => "Arabic",
            Self::Sv => "Swedish",
            Self::Pt => "Portuguese",
        }
    }

    pub fn all() -> &'static [Locale] {
        &[
            Locale::En,
            Locale::Es,
            Locale::Fr,
            Locale::Ar,
            Locale::Sv,
            Locale::Pt,
        ]
    }
}

/// Accent palette for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Sunset,
    Ocean,
    Forest,
    Dream,
}

impl Theme {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "sunset" => Some(Self::Sunset),
            "ocean" => Some(Self::Ocean),
            "forest" => Some(Self::Forest),
            "dream" => Some(Self::Dream),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Dream => "dream",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunset => "Sunset",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Dream => "Dream",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Sunset, Theme::Ocean, Theme::Forest, Theme::Dream]
    }
}

/// Kind of toast shown after a task event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Completing a task
    Success,
    /// Unchecking, deleting an unfinished task, or missing a due date
    Roast,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    Dragging,
    LocaleSelector,
    ThemeSelector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        assert!(FilterMode::All.matches(true));
        assert!(FilterMode::All.matches(false));
        assert!(FilterMode::Active.matches(false));
        assert!(!FilterMode::Active.matches(true));
        assert!(FilterMode::Completed.matches(true));
        assert!(!FilterMode::Completed.matches(false));
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(FilterMode::All.next(), FilterMode::Active);
        assert_eq!(FilterMode::Active.next(), FilterMode::Completed);
        assert_eq!(FilterMode::Completed.next(), FilterMode::All);
    }

    #[test]
    fn test_locale_from_code() {
        assert_eq!(Locale::from_code("es"), Some(Locale::Es));
        assert_eq!(Locale::from_code("SV"), Some(Locale::Sv));
        assert_eq!(Locale::from_code("de"), None);
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
    }

    #[test]
    fn test_theme_from_id() {
        assert_eq!(Theme::from_id("ocean"), Some(Theme::Ocean));
        assert_eq!(Theme::from_id("neon"), None);
        assert_eq!(Theme::default(), Theme::Sunset);
    }
}
