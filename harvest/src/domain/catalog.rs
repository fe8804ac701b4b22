use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A closed list of selectable values, in display order.
pub trait CatalogValue: IntoEnumIterator + Copy + PartialEq {
    fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// The value after `self`, wrapping around to the first.
    fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|v| *v == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// The value before `self`, wrapping around to the last.
    fn previous(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|v| *v == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Field plots. The label is what gets written to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum Plot {
    #[default]
    #[strum(serialize = "P40 CEBOLLINO")]
    P40,
    #[strum(serialize = "P41 CEBOLLINO")]
    P41,
    #[strum(serialize = "P42 CEBOLLINO")]
    P42,
    #[strum(serialize = "P43 CEBOLLINO")]
    P43,
    #[strum(serialize = "P44 CEBOLLINO")]
    P44,
    #[strum(serialize = "P45 HABANERO")]
    P45,
    #[strum(serialize = "P46 CEBOLLINO")]
    P46,
    #[strum(serialize = "P47 CEBOLLINO")]
    P47,
    #[strum(serialize = "P48 ESTRAGON")]
    P48,
    #[strum(serialize = "P49 CEBOLLINO")]
    P49,
    #[strum(serialize = "P50 CEBOLLINO")]
    P50,
    #[strum(serialize = "P51 CEBOLLINO")]
    P51,
    #[strum(serialize = "P52 ESTRAGON")]
    P52,
    #[strum(serialize = "P53 ESTRAGON")]
    P53,
    #[strum(serialize = "P54 CEBOLLINO")]
    P54,
    #[strum(serialize = "P55 CEBOLLINO")]
    P55,
    #[strum(serialize = "P56 CEBOLLINO")]
    P56,
    #[strum(serialize = "P57 CEBOLLINO")]
    P57,
    #[strum(serialize = "P58 CEBOLLINO")]
    P58,
    #[strum(serialize = "P59 CEBOLLINO")]
    P59,
    #[strum(serialize = "P60 CEBOLLINO")]
    P60,
    #[strum(serialize = "P61 CEBOLLINO")]
    P61,
    #[strum(serialize = "P62 CEBOLLINO")]
    P62,
    #[strum(serialize = "P63 CEBOLLINO")]
    P63,
}

impl CatalogValue for Plot {}

/// Whether an entry is a raw harvest weighing or a finished product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum Kind {
    #[default]
    #[strum(serialize = "BRUT")]
    Raw,
    #[strum(serialize = "FINI (MONOJO)")]
    FinishedUnit,
    #[strum(serialize = "FINI (GRAMMAGE)")]
    FinishedWeight,
}

impl Kind {
    pub fn is_raw(self) -> bool {
        self == Kind::Raw
    }
}

impl CatalogValue for Kind {}

/// Harvest pass number for a plot within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum Cut {
    #[default]
    #[strum(serialize = "COUPE 1")]
    First,
    #[strum(serialize = "COUPE 2")]
    Second,
    #[strum(serialize = "COUPE 3")]
    Third,
    #[strum(serialize = "COUPE 4")]
    Fourth,
    #[strum(serialize = "COUPE 5")]
    Fifth,
    #[strum(serialize = "COUPE 6")]
    Sixth,
    #[strum(serialize = "COUPE 7")]
    Seventh,
}

impl Cut {
    pub fn number(self) -> u8 {
        match self {
            Cut::First => 1,
            Cut::Second => 2,
            Cut::Third => 3,
            Cut::Fourth => 4,
            Cut::Fifth => 5,
            Cut::Sixth => 6,
            Cut::Seventh => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::iter().find(|cut| cut.number() == number)
    }
}

impl CatalogValue for Cut {}
