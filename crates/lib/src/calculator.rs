//! Equidistributed salary estimate: a nation's money divided evenly across its population.
//!
//! The amount is an average of a continuously redistributed total, not an accrual,
//! so daily/hourly/yearly figures are the same average on a different period.

/// Default total: 8 trillion Rand.
pub const DEFAULT_TOTAL_MONEY: f64 = 8_000_000_000_000.0;

/// Default population: 61 million.
pub const DEFAULT_POPULATION: f64 = 61_000_000.0;

/// Current South African monthly wages the estimate is compared against.
pub const CURRENT_WAGES: [(&str, f64); 4] = [
    ("Current Top 5%", 134_000.0),
    ("Current Top 10%", 78_000.0),
    ("Average Salary", 23_122.0),
    ("Median Salary", 3_300.0),
];

const DAYS_PER_MONTH: f64 = 30.0;
const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("population must be a positive number (got {0})")]
    Population(f64),
    #[error("total money must be a non-negative number (got {0})")]
    Total(f64),
    #[error("could not read number: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryEstimate {
    pub total_money: f64,
    pub population: f64,
    pub monthly: f64,
}

impl SalaryEstimate {
    pub fn daily(&self) -> f64 {
        self.monthly / DAYS_PER_MONTH
    }

    pub fn hourly(&self) -> f64 {
        self.daily() / HOURS_PER_DAY
    }

    pub fn yearly(&self) -> f64 {
        self.monthly * 12.0
    }

    /// Each current wage as a whole percentage of the monthly estimate.
    pub fn comparison(&self) -> Vec<(&'static str, f64, i64)> {
        CURRENT_WAGES
            .iter()
            .map(|&(label, wage)| {
                let pct = if self.monthly > 0.0 {
                    (wage / self.monthly * 100.0).round() as i64
                } else {
                    0
                };
                (label, wage, pct)
            })
            .collect()
    }

    /// Markdown summary used as the `/calculator` reply.
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "**Equidistributed Salary Calculator**\n\n\
             | Input | Value |\n\
             |-------|-------|\n\
             | Total money | {} |\n\
             | Population | {:.1}M |\n\n\
             | Period | Average per person |\n\
             |--------|--------------------|\n\
             | Month | {} |\n\
             | Day | {} |\n\
             | Hour | {} |\n\
             | Year | {} |\n\n\
             This is a continuously redistributed amount, not a salary that adds up over time.",
            format_rand(self.total_money),
            self.population / 1_000_000.0,
            format_rand(self.monthly),
            format_rand(self.daily()),
            format_rand(self.hourly()),
            format_rand(self.yearly()),
        );
        if self.monthly > 0.0 {
            out.push_str(
                "\n\n| Compared with | Monthly | % of equidistributed |\n\
                 |---------------|---------|----------------------|\n",
            );
            for (label, wage, pct) in self.comparison() {
                out.push_str(&format!("| {} | {} | {}% |\n", label, format_rand(wage), pct));
            }
        }
        out
    }
}

pub fn estimate(total_money: f64, population: f64) -> Result<SalaryEstimate, CalculatorError> {
    if !population.is_finite() || population <= 0.0 {
        return Err(CalculatorError::Population(population));
    }
    if !total_money.is_finite() || total_money < 0.0 {
        return Err(CalculatorError::Total(total_money));
    }
    Ok(SalaryEstimate {
        total_money,
        population,
        monthly: total_money / population,
    })
}

/// Parse `/calculator [total] [population]` arguments; missing values use the defaults.
/// Accepts plain numbers with optional `_`/`,` separators and a `t`/`b`/`m` suffix (trillion/billion/million).
pub fn estimate_from_args(args: &[&str]) -> Result<SalaryEstimate, CalculatorError> {
    let total = args.first().map(|s| parse_amount(s)).transpose()?;
    let population = args.get(1).map(|s| parse_amount(s)).transpose()?;
    estimate(
        total.unwrap_or(DEFAULT_TOTAL_MONEY),
        population.unwrap_or(DEFAULT_POPULATION),
    )
}

fn parse_amount(s: &str) -> Result<f64, CalculatorError> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(['R', 'r'])
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, scale) = match lower.chars().last() {
        Some('t') => (&lower[..lower.len() - 1], 1e12),
        Some('b') => (&lower[..lower.len() - 1], 1e9),
        Some('m') => (&lower[..lower.len() - 1], 1e6),
        _ => (lower.as_str(), 1.0),
    };
    digits
        .parse::<f64>()
        .map(|v| v * scale)
        .map_err(|_| CalculatorError::Parse(s.to_string()))
}

/// Whole Rand with thousands separators, e.g. `R131,148`.
pub fn format_rand(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u128;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('R');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
