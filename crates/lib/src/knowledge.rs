//! Pre-written summaries shown by `/card <name>` without contacting the model.

pub const MONEY_POOL: &str = "8 trillion Rand";
pub const POPULATION: &str = "61 million people";
pub const MONTHLY_SALARY: &str = "R135,000 per person";

pub const IMPORT_COSTS: &str = "$8.6 billion annually";
pub const EXPORT_REVENUE: &str = "$103.7 billion annually";
pub const PROFIT: &str = "$95.1 billion annually";
pub const NATIONAL_DEBT: &str = "$272 billion";
pub const DEBT_CLEARANCE_YEARS: &str = "2.86";

pub const FREE_PRODUCTS: &str = "In the Equidistributed Salary model, locally produced goods and services can effectively become free. Here's how it works:

When a nation's money (let's say 10 trillion Rand) is pooled and distributed equally, monetary transactions between citizens become circular. If you pay 10 Rand for coffee from another citizen, and they return that 10 Rand to the national pool, the total remains unchanged at 10 trillion Rand.

This circular flow makes monetary transactions between citizens essentially redundant. For locally produced items with zero import costs, there's no economic reason to charge money. It's simpler for these goods and services to be free. The entire supply and production chain operates with zero overhead, making any transaction that doesn't involve imports effectively cost-free (0 Rand).";

pub const ENTERPRISE_DEFINITION: &str =
    "A percentage commitment from employees to support business operations";
pub const ENTERPRISE_EXAMPLE: &str = "If an inhabitant received 100,000 Xn per month in Equidistributed Salary, and a mass manufacturing startup required a 5% Enterprise Contribution commitment from its new workforce of 10,000 people, that would amount to 5,000 Xn per person. 10,000 x 5,000 Xn equals 50,000,000 Xn per month.";
pub const ENTERPRISE_BENEFIT: &str =
    "Enables businesses to cover initial costs while maintaining the equidistribution model";

pub const EDUCATION_OVERVIEW: &str = "In EDS from a South African viewpoint, we could have free online education from Preschool through to University, Masters, Doctorates and beyond, free and mobile-first, so all someone needs is a phone or access to a web-browser.";
pub const EDUCATION_ACCESSIBILITY: &str = "In EDS, theoretically and eventually, if you can't study at an institute, you study at a resort, hotel or anywhere else, for free, from the ease of your phone.";
pub const EDUCATION_NATIONAL_INTEREST: &str = "National Interest could steer education. For example, in emerging markets, such as Magnetically Generated Energy and Lab Grown Diamonds, we could highlight the need to fill jobs in these expanding industries, motivating people to study these fields, and have access to it nation-wide, fully featured and interactive, and for free.";
pub const EDUCATION_BENEFITS: &str = "Accelerating education in absence of unemployment, hastening towards a 100% Nation Education and facilitating people remobilising and repurposing in Market Shift, Demand Shift, Business Closure or Job Loss, easier, quicker and more broadly accessible than ever before.";

pub fn salary_card() -> String {
    format!(
        "**South African Salary Calculation**\n\n\
         Money pool: {MONEY_POOL}\n\
         Population: {POPULATION}\n\n\
         Monthly average salary: **{MONTHLY_SALARY}** per person\n\n\
         This is higher than the current top 5% of earners (R134,000 per month)!\n\n\
         _Note: The contract will be continuously redistributing, possibly every second or millisecond, \
         so the amount is more of an average._"
    )
}

pub fn debt_card() -> String {
    format!(
        "**South Africa's National Debt Clearance**\n\n\
         Annual import costs: {IMPORT_COSTS}\n\
         Annual export revenue: {EXPORT_REVENUE}\n\
         Annual profit: {PROFIT}\n\n\
         National debt: {NATIONAL_DEBT}\n\n\
         Debt clearance time: **{DEBT_CLEARANCE_YEARS} years**"
    )
}

pub fn free_card() -> String {
    format!("**How Products Become Free**\n\n{FREE_PRODUCTS}")
}

pub fn enterprise_card() -> String {
    format!(
        "**Enterprise Contribution**\n\n{ENTERPRISE_DEFINITION}\n\n\
         **Example:**\n{ENTERPRISE_EXAMPLE}\n\n\
         **Benefit:**\n{ENTERPRISE_BENEFIT}"
    )
}

pub fn education_card() -> String {
    format!(
        "**Education in EDS**\n\n{EDUCATION_OVERVIEW}\n\n{EDUCATION_ACCESSIBILITY}\n\n\
         **National Interest Steering:**\n{EDUCATION_NATIONAL_INTEREST}\n\n\
         **Benefits:**\n{EDUCATION_BENEFITS}\n\n\
         This system would expand educational institutes and facilities while making education \
         accessible to everyone through mobile-first technology."
    )
}
