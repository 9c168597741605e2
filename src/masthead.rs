const ROMAN_NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Front page header: dates and the volume line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Masthead {
    pub(crate) long_date: String,
    pub(crate) header_date: String,
    pub(crate) volume: String,
}

impl Masthead {
    pub(crate) fn new(date: chrono::NaiveDate, volume: u32, issue: u32) -> Self {
        let header_date = date.format("%A, %B %-d, %Y").to_string();

        Self {
            long_date: header_date.to_uppercase(),
            header_date,
            volume: format!("VOL. {} {}", roman_numeral(volume), issue),
        }
    }

    /// Masthead for today. The volume is random in 1..=999 unless given, the
    /// issue number always random in 100..=999.
    pub(crate) fn for_today(volume: Option<u32>) -> anyhow::Result<Self> {
        let volume = match volume {
            Some(volume) => volume,
            None => random_in(1, 999)?,
        };
        let issue = random_in(100, 999)?;

        Ok(Self::new(chrono::Local::now().date_naive(), volume, issue))
    }
}

pub(crate) fn roman_numeral(mut num: u32) -> String {
    let mut result = String::new();

    for (value, numeral) in ROMAN_NUMERALS {
        while num >= value {
            result.push_str(numeral);
            num -= value;
        }
    }

    result
}

fn random_in(low: u32, high: u32) -> anyhow::Result<u32> {
    uniform_in(low, high, || {
        getrandom::u32().map_err(|e| anyhow::anyhow!("Failed to generate a random number: {e}"))
    })
}

/// Maps draws from `next` onto `low..=high` without modulo bias, redrawing
/// values from the incomplete top bucket.
fn uniform_in(
    low: u32,
    high: u32,
    mut next: impl FnMut() -> anyhow::Result<u32>,
) -> anyhow::Result<u32> {
    let span = high - low + 1;
    let zone = u32::MAX - (u32::MAX % span);

    loop {
        let random = next()?;
        if random < zone {
            return Ok(low + random % span);
        }
    }
}
