use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const MEMBER_STATUS_ACTIVE: &str = "active";

/// A community member as stored in the snapshot store and the remote
/// registry document. Field names on the wire are camelCase, matching the
/// registry document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub year: String,
    pub department: String,
    pub interests: String,
    pub motivation: String,
    #[serde(default)]
    pub newsletter: bool,
    pub join_date: String,
    pub status: String,
}

/// Raw signup form payload. Year, department and interests arrive as a
/// fixed choice plus an optional free-text companion; when the choice is
/// "Other" the companion text replaces it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub year: String,
    #[serde(default)]
    pub year_other: Option<String>,
    pub department: String,
    #[serde(default)]
    pub department_other: Option<String>,
    pub interests: String,
    #[serde(default)]
    pub interests_other: Option<String>,
    pub motivation: String,
    #[serde(default)]
    pub newsletter: bool,
}

impl MemberSignup {
    /// Returns the first validation problem, if any. Matches the form
    /// contract: all fields but phone are required, email and phone must
    /// look plausible.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("motivation", &self.motivation),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        let choices = [
            ("year", &self.year, &self.year_other),
            ("department", &self.department, &self.department_other),
            ("interests", &self.interests, &self.interests_other),
        ];
        for (field, choice, other) in choices {
            if choice.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
            let other_text = other.as_deref().map(str::trim).unwrap_or_default();
            if choice == "Other" && other_text.is_empty() {
                return Err(format!("{field} needs a value when 'Other' is selected"));
            }
        }
        if !email_is_valid(self.email.trim()) {
            return Err("email address is malformed".to_string());
        }
        if let Some(phone) = &self.phone {
            let phone = phone.trim();
            if !phone.is_empty() && !phone_is_valid(phone) {
                return Err("phone number is malformed".to_string());
            }
        }
        Ok(())
    }

    pub fn resolved_year(&self) -> String {
        resolve_choice(&self.year, self.year_other.as_deref())
    }

    pub fn resolved_department(&self) -> String {
        resolve_choice(&self.department, self.department_other.as_deref())
    }

    pub fn resolved_interests(&self) -> String {
        resolve_choice(&self.interests, self.interests_other.as_deref())
    }

    /// The raw field set, as the form would post it to the relay endpoint.
    pub fn raw_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("firstName".to_string(), self.first_name.clone()),
            ("lastName".to_string(), self.last_name.clone()),
            ("email".to_string(), self.email.clone()),
            ("year".to_string(), self.year.clone()),
            ("department".to_string(), self.department.clone()),
            ("interests".to_string(), self.interests.clone()),
            ("motivation".to_string(), self.motivation.clone()),
        ];
        if let Some(phone) = &self.phone {
            fields.push(("phone".to_string(), phone.clone()));
        }
        if let Some(other) = &self.year_other {
            fields.push(("yearOther".to_string(), other.clone()));
        }
        if let Some(other) = &self.department_other {
            fields.push(("departmentOther".to_string(), other.clone()));
        }
        if let Some(other) = &self.interests_other {
            fields.push(("interestsOther".to_string(), other.clone()));
        }
        if self.newsletter {
            fields.push(("newsletter".to_string(), "on".to_string()));
        }
        fields
    }

    /// Builds the stored member record. The caller assigns the id.
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
            year: self.resolved_year(),
            department: self.resolved_department(),
            interests: self.resolved_interests(),
            motivation: self.motivation.trim().to_string(),
            newsletter: self.newsletter,
            join_date: Utc::now().to_rfc3339(),
            status: MEMBER_STATUS_ACTIVE.to_string(),
        }
    }
}

fn resolve_choice(choice: &str, other: Option<&str>) -> String {
    match other {
        Some(text) if choice == "Other" && !text.trim().is_empty() => text.trim().to_string(),
        _ => choice.trim().to_string(),
    }
}

fn email_is_valid(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn phone_is_valid(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && (7..=15).contains(&digits)
}

/// Exact-match projection criteria for the admin member list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MemberFilter {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        self.year.as_deref().is_none_or(|y| member.year == y)
            && self
                .department
                .as_deref()
                .is_none_or(|d| member.department == d)
    }
}
