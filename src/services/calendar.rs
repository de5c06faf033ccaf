// src/services/calendar.rs
//
// Projeção semanal do calendário. Só funções puras sobre datas e turnos.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        schedule::{DayHeader, ScheduleRow, Shift},
        worker::Worker,
    },
};

/// Os sete dias (segunda a domingo) da semana ISO que contém `date`.
/// Domingo pertence à semana que começou na segunda anterior.
/// Semanas que passam dos limites do calendário são `InvalidDateRange`.
pub fn week_of(date: NaiveDate) -> Result<[NaiveDate; 7], AppError> {
    let monday = date
        .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .ok_or(AppError::InvalidDateRange)?;

    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate().skip(1) {
        *day = monday
            .checked_add_days(Days::new(offset as u64))
            .ok_or(AppError::InvalidDateRange)?;
    }
    Ok(days)
}

pub fn day_headers(days: &[NaiveDate; 7]) -> Vec<DayHeader> {
    days.iter()
        .map(|date| DayHeader {
            date: *date,
            weekday: date.format("%A").to_string(),
        })
        .collect()
}

/// Texto da célula do funcionário no dia, ou vazio se não houver turno.
pub fn shift_label(shifts: &[Shift], worker_id: Uuid, date: NaiveDate) -> String {
    shifts
        .iter()
        .find(|shift| shift.worker_id == worker_id && shift.shift_date == date)
        .map(Shift::label)
        .unwrap_or_default()
}

/// Uma linha por funcionário (na ordem recebida), uma célula por dia.
pub fn week_grid(days: &[NaiveDate; 7], workers: &[Worker], shifts: &[Shift]) -> Vec<ScheduleRow> {
    let by_cell: HashMap<(Uuid, NaiveDate), &Shift> = shifts
        .iter()
        .map(|shift| ((shift.worker_id, shift.shift_date), shift))
        .collect();

    workers
        .iter()
        .map(|worker| ScheduleRow {
            worker_id: worker.id,
            worker_name: worker.full_name(),
            cells: days
                .iter()
                .map(|date| {
                    by_cell
                        .get(&(worker.id, *date))
                        .map(|shift| shift.label())
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, Utc, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift(worker_id: Uuid, on: NaiveDate, start: NaiveTime, end: NaiveTime) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
            worker_id,
            title: "João Silva".into(),
            shift_date: on,
            start_time: start,
            end_time: end,
            created_at: Utc::now(),
        }
    }

    fn worker(first: &str, last: &str) -> Worker {
        Worker {
            id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: last.into(),
            position: None,
            phone_number: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            email: format!("{}@x.com", first.to_lowercase()),
            passcode_hash: String::new(),
            date_of_birth: None,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn every_day_of_a_week_maps_to_the_same_monday() {
        // 2024-06-03 é segunda-feira
        let expected = week_of(date(2024, 6, 3)).unwrap();
        for day in 3..=9 {
            let week = week_of(date(2024, 6, day)).unwrap();
            assert_eq!(week, expected);
        }
        assert_eq!(expected[0].weekday(), Weekday::Mon);
        assert_eq!(expected[6], date(2024, 6, 9));
        assert_eq!(expected[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn sunday_belongs_to_the_week_that_just_ended() {
        let week = week_of(date(2024, 6, 9)).unwrap();
        assert_eq!(week[0], date(2024, 6, 3));
        assert!(week.contains(&date(2024, 6, 9)));
    }

    #[test]
    fn weeks_cross_month_and_year_boundaries() {
        let week = week_of(date(2025, 1, 1)).unwrap();
        assert_eq!(week[0], date(2024, 12, 30));
        assert_eq!(week[6], date(2025, 1, 5));
        assert!(week.windows(2).all(|pair| pair[1] - pair[0] == Duration::days(1)));
    }

    #[test]
    fn weeks_at_the_edges_of_the_calendar_do_not_panic() {
        for edge in [NaiveDate::MIN, NaiveDate::MAX] {
            match week_of(edge) {
                Ok(week) => assert!(week.contains(&edge)),
                Err(err) => assert!(matches!(err, AppError::InvalidDateRange)),
            }
        }

        // Só uma segunda no início e um domingo no fim cabem inteiros
        if NaiveDate::MIN.weekday() != Weekday::Mon {
            assert!(week_of(NaiveDate::MIN).is_err());
        }
        if NaiveDate::MAX.weekday() != Weekday::Sun {
            assert!(week_of(NaiveDate::MAX).is_err());
        }
    }

    #[test]
    fn overnight_shift_on_the_last_date_does_not_panic() {
        let s = shift(Uuid::new_v4(), NaiveDate::MAX, time(22, 0), time(6, 0));
        assert_eq!(s.end().date(), NaiveDate::MAX);
    }

    #[test]
    fn headers_name_the_weekdays_in_order() {
        let headers = day_headers(&week_of(date(2024, 6, 5)).unwrap());
        let names: Vec<&str> = headers.iter().map(|h| h.weekday.as_str()).collect();
        assert_eq!(
            names,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn label_is_start_and_end_or_empty() {
        let worker_id = Uuid::new_v4();
        let shifts = vec![shift(worker_id, date(2024, 6, 4), time(9, 0), time(17, 0))];

        assert_eq!(shift_label(&shifts, worker_id, date(2024, 6, 4)), "09:00 - 17:00");
        assert_eq!(shift_label(&shifts, worker_id, date(2024, 6, 5)), "");
        assert_eq!(shift_label(&shifts, Uuid::new_v4(), date(2024, 6, 4)), "");
    }

    #[test]
    fn overnight_shift_ends_the_next_day() {
        let s = shift(Uuid::new_v4(), date(2024, 6, 4), time(22, 0), time(6, 0));
        assert_eq!(s.end().date(), date(2024, 6, 5));
        assert_eq!(s.label(), "22:00 - 06:00");
    }

    #[test]
    fn grid_has_one_row_per_worker_and_seven_cells() {
        let ana = worker("Ana", "Souza");
        let joao = worker("João", "Silva");
        let days = week_of(date(2024, 6, 5)).unwrap();
        let shifts = vec![
            shift(ana.id, date(2024, 6, 3), time(8, 0), time(12, 0)),
            shift(joao.id, date(2024, 6, 9), time(14, 30), time(22, 0)),
            // Fora da semana: não aparece
            shift(joao.id, date(2024, 6, 10), time(9, 0), time(17, 0)),
        ];

        let rows = week_grid(&days, &[ana.clone(), joao.clone()], &shifts);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].worker_name, "Ana Souza");
        assert_eq!(rows[0].cells[0], "08:00 - 12:00");
        assert!(rows[0].cells[1..].iter().all(String::is_empty));
        assert_eq!(rows[1].cells[6], "14:30 - 22:00");
        assert_eq!(rows[1].cells.iter().filter(|c| !c.is_empty()).count(), 1);
    }
}
