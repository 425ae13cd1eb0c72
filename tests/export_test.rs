use chrono::Utc;
use clubhub::models::Member;
use clubhub::registry::export;

fn member(id: i64, first: &str, last: &str, phone: Option<&str>, newsletter: bool) -> Member {
    Member {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.edu", first.to_lowercase()),
        phone: phone.map(String::from),
        year: "3rd Year".to_string(),
        department: "CSE".to_string(),
        interests: "AI".to_string(),
        motivation: "Learning".to_string(),
        newsletter,
        join_date: "2026-08-01T10:00:00+00:00".to_string(),
        status: "active".to_string(),
    }
}

#[test]
fn export_has_header_plus_one_row_per_member() {
    let members = vec![
        member(1, "Ada", "Lovelace", None, true),
        member(2, "Grace", "Hopper", Some("+1 555 0100"), false),
        member(3, "Alan", "Turing", None, true),
    ];

    let csv = String::from_utf8(export::to_csv(&members).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), members.len() + 1);
    assert_eq!(
        lines[0],
        r#""Name","Email","Phone","Year","Department","Interests","Newsletter","Join Date""#
    );
}

#[test]
fn every_field_is_quoted_and_matches_the_record() {
    let members = vec![member(1, "Ada", "Lovelace", Some("+44 20 7946 0958"), true)];

    let csv = String::from_utf8(export::to_csv(&members).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[1],
        r#""Ada Lovelace","ada@example.edu","+44 20 7946 0958","3rd Year","CSE","AI","Yes","2026-08-01T10:00:00+00:00""#
    );
}

#[test]
fn missing_phone_exports_as_empty_field() {
    let members = vec![member(1, "Ada", "Lovelace", None, false)];

    let csv = String::from_utf8(export::to_csv(&members).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[1],
        r#""Ada Lovelace","ada@example.edu","","3rd Year","CSE","AI","No","2026-08-01T10:00:00+00:00""#
    );
}

#[test]
fn empty_registry_exports_header_only() {
    let csv = String::from_utf8(export::to_csv(&[]).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn filename_carries_the_current_date() {
    let filename = export::export_filename();
    assert_eq!(
        filename,
        format!("members-{}.csv", Utc::now().format("%Y-%m-%d"))
    );
}
