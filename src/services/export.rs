// src/services/export.rs
//
// Exportação do quadro de funcionários em CSV.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::worker::Worker;

pub const WORKER_COLUMNS: [&str; 12] = [
    "id",
    "firstName",
    "lastName",
    "position",
    "phoneNumber",
    "address",
    "city",
    "state",
    "zipCode",
    "email",
    "dateOfBirth",
    "startDate",
];

fn should_neutralize(value: &str) -> bool {
    matches!(value.trim_start().chars().next(), Some('=' | '+' | '-' | '@'))
}

// Planilhas executam células que começam com operador; o apóstrofo desarma
fn neutralize_formula(value: &str) -> String {
    if should_neutralize(value) {
        format!("'{value}")
    } else {
        value.to_string()
    }
}

pub fn csv_escape(value: &str) -> String {
    let safe = neutralize_formula(value);
    if safe.contains(',') || safe.contains('"') || safe.contains('\n') || safe.contains('\r') {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}

// Mesma ordem de WORKER_COLUMNS. O passcode nunca sai.
fn worker_cells(worker: &Worker) -> [String; 12] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let date = |value: &Option<chrono::NaiveDate>| {
        value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    };

    [
        worker.id.to_string(),
        worker.first_name.clone(),
        worker.last_name.clone(),
        text(&worker.position),
        text(&worker.phone_number),
        text(&worker.address),
        text(&worker.city),
        text(&worker.state),
        text(&worker.zip_code),
        worker.email.clone(),
        date(&worker.date_of_birth),
        date(&worker.start_date),
    ]
}

/// Exatamente os funcionários selecionados, na ordem do quadro.
/// Ids desconhecidos ou repetidos não geram linhas extras.
pub fn select_workers<'a>(roster: &'a [Worker], selected: &[Uuid]) -> Vec<&'a Worker> {
    let selected: HashSet<&Uuid> = selected.iter().collect();
    roster.iter().filter(|worker| selected.contains(&worker.id)).collect()
}

pub fn workers_to_csv(workers: &[&Worker]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(workers.len() + 1);
    lines.push(WORKER_COLUMNS.join(","));

    for worker in workers {
        let line = worker_cells(worker)
            .iter()
            .map(|cell| csv_escape(cell))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn worker(first: &str) -> Worker {
        Worker {
            id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: "Silva".into(),
            position: Some("Barista".into()),
            phone_number: None,
            address: Some("Rua A, 10".into()),
            city: Some("Recife".into()),
            state: Some("PE".into()),
            zip_code: None,
            email: format!("{}@x.com", first.to_lowercase()),
            passcode_hash: "$2b$12$hash-secreto".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 2, 1),
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn export_contains_exactly_the_selected_rows() {
        let roster = vec![worker("Ana"), worker("Bia"), worker("Caio"), worker("Duda")];
        let picked = [roster[3].id, roster[1].id, roster[1].id, Uuid::new_v4()];

        let rows = select_workers(&roster, &picked);
        let csv = workers_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], WORKER_COLUMNS.join(","));
        // Ordem do quadro, não da seleção
        assert!(lines[1].starts_with(&roster[1].id.to_string()));
        assert!(lines[2].starts_with(&roster[3].id.to_string()));
    }

    #[test]
    fn empty_selection_exports_only_the_header() {
        let roster = vec![worker("Ana")];
        let csv = workers_to_csv(&select_workers(&roster, &[]));
        assert_eq!(csv, WORKER_COLUMNS.join(","));
    }

    #[test]
    fn passcode_never_leaves_the_server() {
        let roster = vec![worker("Ana")];
        let csv = workers_to_csv(&select_workers(&roster, &[roster[0].id]));
        assert!(!csv.contains("hash-secreto"));
    }

    #[test]
    fn cells_are_quoted_and_dates_formatted() {
        let roster = vec![worker("Ana")];
        let csv = workers_to_csv(&select_workers(&roster, &[roster[0].id]));
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains("\"Rua A, 10\""));
        assert!(row.contains("1990-02-01"));
        assert_eq!(csv_escape("diz \"oi\""), "\"diz \"\"oi\"\"\"");
    }

    #[test]
    fn formulas_are_neutralized() {
        assert_eq!(csv_escape("=SUM(A1:A2)"), "'=SUM(A1:A2)");
        assert_eq!(csv_escape("  @cmd"), "'  @cmd");
        assert_eq!(csv_escape("-5"), "'-5");
        assert_eq!(csv_escape("Barista"), "Barista");
    }
}
