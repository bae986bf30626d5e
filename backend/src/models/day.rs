use serde::Serialize;

pub const DAY_COUNT: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct ValentineDay {
    pub number: u8,
    pub name: &'static str,
    pub date: &'static str,
    pub quote: &'static str,
    pub route: &'static str,
}

pub static VALENTINE_WEEK: [ValentineDay; DAY_COUNT] = [
    ValentineDay {
        number: 1,
        name: "Rose Day",
        date: "February 7",
        quote: "Every rose I give you carries a little piece of my heart.",
        route: "/day1",
    },
    ValentineDay {
        number: 2,
        name: "Propose Day",
        date: "February 8",
        quote: "Of all the questions I could ask, this is the one that matters.",
        route: "/day2",
    },
    ValentineDay {
        number: 3,
        name: "Chocolate Day",
        date: "February 9",
        quote: "Life is sweeter with you, and so is chocolate.",
        route: "/day3",
    },
    ValentineDay {
        number: 4,
        name: "Teddy Day",
        date: "February 10",
        quote: "Something soft to hold until I can hold you.",
        route: "/day4",
    },
    ValentineDay {
        number: 5,
        name: "Promise Day",
        date: "February 11",
        quote: "I promise to choose you, today and every day after.",
        route: "/day5",
    },
    ValentineDay {
        number: 6,
        name: "Hug Day",
        date: "February 12",
        quote: "A hug says everything words cannot.",
        route: "/day6",
    },
    ValentineDay {
        number: 7,
        name: "Kiss Day",
        date: "February 13",
        quote: "Sealed with a kiss, kept forever.",
        route: "/day7",
    },
    ValentineDay {
        number: 8,
        name: "Valentine's Day",
        date: "February 14",
        quote: "Every day with you is Valentine's Day.",
        route: "/day8",
    },
];

/// Name for a 1-based day number. Out-of-range numbers yield an empty string.
pub fn day_name(day_number: u8) -> &'static str {
    usize::from(day_number)
        .checked_sub(1)
        .and_then(|i| VALENTINE_WEEK.get(i))
        .map(|d| d.name)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered() {
        for (i, day) in VALENTINE_WEEK.iter().enumerate() {
            assert_eq!(day.number as usize, i + 1);
            assert_eq!(day.route, format!("/day{}", i + 1));
        }
    }

    #[test]
    fn test_day_name_out_of_range() {
        assert_eq!(day_name(0), "");
        assert_eq!(day_name(9), "");
        assert_eq!(day_name(2), "Propose Day");
    }
}
