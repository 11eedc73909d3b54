//! Weekday enumeration and positional weekdays (`BYDAY` entries such as `-1SU`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week, Monday-first to match ISO-8601 week numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Index 0..6 with Monday as 0, independent of any `WKST`.
    pub const fn num_from_monday(self) -> u8 {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
            Weekday::Sat => 5,
            Weekday::Sun => 6,
        }
    }

    /// Index relative to a week starting on `wkst`, in `0..6`.
    pub fn num_from(self, wkst: Weekday) -> u8 {
        (self.num_from_monday() + 7 - wkst.num_from_monday()) % 7
    }

    pub const fn from_num_from_monday(n: u8) -> Weekday {
        Weekday::ALL[(n % 7) as usize]
    }

    pub fn from_chrono(w: chrono::Weekday) -> Weekday {
        use chrono::Weekday as C;
        match w {
            C::Mon => Weekday::Mon,
            C::Tue => Weekday::Tue,
            C::Wed => Weekday::Wed,
            C::Thu => Weekday::Thu,
            C::Fri => Weekday::Fri,
            C::Sat => Weekday::Sat,
            C::Sun => Weekday::Sun,
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        use chrono::Weekday as C;
        match self {
            Weekday::Mon => C::Mon,
            Weekday::Tue => C::Tue,
            Weekday::Wed => C::Wed,
            Weekday::Thu => C::Thu,
            Weekday::Fri => C::Fri,
            Weekday::Sat => C::Sat,
            Weekday::Sun => C::Sun,
        }
    }

    /// Two-letter RFC 5545 token (`MO`, `TU`, ...).
    pub const fn token(self) -> &'static str {
        match self {
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
            Weekday::Sun => "SU",
        }
    }

    pub fn from_token(token: &str) -> Option<Weekday> {
        match token {
            "MO" => Some(Weekday::Mon),
            "TU" => Some(Weekday::Tue),
            "WE" => Some(Weekday::Wed),
            "TH" => Some(Weekday::Thu),
            "FR" => Some(Weekday::Fri),
            "SA" => Some(Weekday::Sat),
            "SU" => Some(Weekday::Sun),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A `BYDAY` entry: a weekday, optionally qualified by an ordinal (`2TU`, `-1FR`).
///
/// `n == 0` means "every occurrence of this weekday in the enclosing period".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NWeekday {
    pub weekday: Weekday,
    pub n: i16,
}

impl NWeekday {
    pub const fn plain(weekday: Weekday) -> NWeekday {
        NWeekday { weekday, n: 0 }
    }

    pub const fn nth(weekday: Weekday, n: i16) -> NWeekday {
        NWeekday { weekday, n }
    }

    pub const fn is_positional(self) -> bool {
        self.n != 0
    }
}

impl fmt::Display for NWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.n == 0 {
            write!(f, "{}", self.weekday)
        } else {
            write!(f, "{}{}", self.n, self.weekday)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_from_monday_is_zero_based() {
        assert_eq!(Weekday::Mon.num_from_monday(), 0);
        assert_eq!(Weekday::Sun.num_from_monday(), 6);
    }

    #[test]
    fn num_from_respects_wkst() {
        assert_eq!(Weekday::Mon.num_from(Weekday::Sun), 1);
        assert_eq!(Weekday::Sun.num_from(Weekday::Sun), 0);
        assert_eq!(Weekday::Sat.num_from(Weekday::Sun), 6);
    }

    #[test]
    fn token_round_trips() {
        for wd in Weekday::ALL {
            assert_eq!(Weekday::from_token(wd.token()), Some(wd));
        }
    }

    #[test]
    fn nweekday_display() {
        assert_eq!(NWeekday::plain(Weekday::Tue).to_string(), "TU");
        assert_eq!(NWeekday::nth(Weekday::Thu, -1).to_string(), "-1TH");
        assert_eq!(NWeekday::nth(Weekday::Tue, 2).to_string(), "2TU");
    }

    #[test]
    fn nweekday_serde_round_trips_through_json() {
        let original = NWeekday::nth(Weekday::Fri, -2);
        let json = serde_json::to_string(&original).unwrap();
        let back: NWeekday = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
