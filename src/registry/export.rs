use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};

use crate::error::AppError;
use crate::models::Member;

pub const CSV_COLUMNS: [&str; 8] = [
    "Name",
    "Email",
    "Phone",
    "Year",
    "Department",
    "Interests",
    "Newsletter",
    "Join Date",
];

/// Download name carrying the current date, e.g. `members-2026-08-06.csv`.
pub fn export_filename() -> String {
    format!("members-{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Renders the member list with a header row and every field quoted.
pub fn to_csv(members: &[Member]) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(&mut buffer);

        writer.write_record(CSV_COLUMNS)?;
        for member in members {
            writer.write_record([
                format!("{} {}", member.first_name, member.last_name),
                member.email.clone(),
                member.phone.clone().unwrap_or_default(),
                member.year.clone(),
                member.department.clone(),
                member.interests.clone(),
                if member.newsletter { "Yes" } else { "No" }.to_string(),
                member.join_date.clone(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}
