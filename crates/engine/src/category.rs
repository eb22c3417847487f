//! Fixed spending category set.

/// Category attached to every expense.
///
/// The set is closed; free-form categories are not accepted anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Bills,
    Shopping,
    Healthcare,
    Education,
    Other,
}

impl Category {
    /// Returns the canonical category label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}
