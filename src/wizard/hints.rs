use chrono::{Datelike, NaiveDate};

const NAMES: [&str; 10] = [
    "Aarav Kumar",
    "Vivaan Singh",
    "Aditya Sharma",
    "Vihaan Gupta",
    "Arjun Patel",
    "Ananya Devi",
    "Diya Kumari",
    "Saanvi Sharma",
    "Aadhya Singh",
    "Kavya Patel",
];

const MAX_SUGGESTIONS: usize = 3;

/// A recurring festival, by month and day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Festival {
    pub month: u32,
    pub day: u32,
    pub name: &'static str,
}

pub const FESTIVALS: [Festival; 5] = [
    Festival { month: 1, day: 26, name: "Republic Day" },
    Festival { month: 3, day: 14, name: "Holi" },
    Festival { month: 8, day: 15, name: "Independence Day" },
    Festival { month: 10, day: 2, name: "Gandhi Jayanti" },
    Festival { month: 11, day: 1, name: "Diwali" },
];

/// Up to three known names containing `input`, ignoring case
pub fn name_suggestions(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    NAMES
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// The next `count` festivals on or after `today`, wrapping into next year
pub fn upcoming_festivals(today: NaiveDate, count: usize) -> Vec<Festival> {
    let key = (today.month(), today.day());
    let start = FESTIVALS
        .iter()
        .position(|f| (f.month, f.day) >= key)
        .unwrap_or(0);
    FESTIVALS
        .iter()
        .cycle()
        .skip(start)
        .take(count.min(FESTIVALS.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_are_capped_and_case_insensitive() {
        assert_eq!(
            name_suggestions("SHARMA"),
            vec!["Aditya Sharma", "Saanvi Sharma"]
        );
        assert_eq!(name_suggestions("a").len(), 3);
        assert!(name_suggestions("  ").is_empty());
        assert!(name_suggestions("zz").is_empty());
    }

    #[test]
    fn festivals_follow_today() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let names: Vec<_> = upcoming_festivals(today, 2).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Independence Day", "Gandhi Jayanti"]);
    }

    #[test]
    fn festivals_wrap_at_year_end() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let names: Vec<_> = upcoming_festivals(today, 2).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Republic Day", "Holi"]);

        let today = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let names: Vec<_> = upcoming_festivals(today, 2).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Diwali", "Republic Day"]);
    }
}
