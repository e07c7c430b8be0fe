/// Categories offered by the add-expense form.
///
/// Records coming back from the backend carry their category as free text, so
/// this enum only constrains what the client submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Food,
    Travel,
    Shopping,
    Bills,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup of a known name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "travel" => Some(Self::Travel),
            "shopping" => Some(Self::Shopping),
            "bills" | "bill" => Some(Self::Bills),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Like `from_name`, but anything unrecognized lands in `Other`.
    pub fn parse(s: &str) -> Self {
        Self::from_name(s).unwrap_or(Self::Other)
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Travel,
            Self::Shopping,
            Self::Bills,
            Self::Other,
        ]
    }

    /// Step through `all()` in either direction, wrapping at the ends.
    pub fn cycle(&self, delta: i32) -> Self {
        let all = Self::all();
        let len = all.len() as i32;
        let idx = all.iter().position(|c| c == self).unwrap_or(0) as i32;
        all[(idx + delta).rem_euclid(len) as usize]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
