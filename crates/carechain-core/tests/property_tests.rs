//! Property tests for analytics, queries and exports.

use chrono::NaiveDate;
use proptest::prelude::*;

use carechain_core::analytics::{percentage, AnalyticsInput, AppointmentStats, PlatformAnalytics};
use carechain_core::export::AnalyticsReport;
use carechain_core::models::{Appointment, Doctor, Urgency};
use carechain_core::query::{CategoryFilter, ListQuery, SortKey};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn urgency_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("emergency".to_string()),
        Just("Urgent".to_string()),
        Just("normal".to_string()),
        Just(String::new()),
        "[a-z]{3,8}",
    ]
}

fn appointment_strategy() -> impl Strategy<Value = Appointment> {
    (
        1u64..1000,
        0u32..60,
        any::<bool>(),
        urgency_strategy(),
        prop_oneof![Just("pending"), Just("Scheduled"), Just("cancelled")],
    )
        .prop_map(|(id, day_offset, is_open, urgency, status)| {
            let date = today() - chrono::Duration::days(i64::from(day_offset));
            let mut appointment = Appointment::new(id, 1, 1, date.format("%Y-%m-%d").to_string());
            appointment.is_open = is_open;
            appointment.urgency = urgency;
            appointment.status = status.to_string();
            appointment
        })
}

/// Appointments with distinct ids.
fn appointments_strategy() -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec(appointment_strategy(), 0..40).prop_map(|mut items| {
        for (i, a) in items.iter_mut().enumerate() {
            a.id = i as u64 + 1;
        }
        items
    })
}

fn doctor_strategy() -> impl Strategy<Value = Doctor> {
    (0u64..200, 0u64..200, any::<bool>()).prop_map(|(appointments, successes, approved)| {
        let mut doctor = Doctor::new(1, "Dr. Bailey", "0xb");
        doctor.appointment_count = appointments;
        doctor.successful_treatment_count = successes.min(appointments);
        if approved {
            doctor.status = "approved".to_string();
        }
        doctor
    })
}

proptest! {
    #[test]
    fn completion_rate_matches_closed_share(appointments in appointments_strategy()) {
        let stats = AppointmentStats::compute(&appointments, today());
        let closed = appointments.iter().filter(|a| !a.is_open).count() as u64;

        prop_assert_eq!(stats.total, appointments.len());
        prop_assert_eq!(stats.open + stats.completed, stats.total);
        prop_assert_eq!(stats.completion_rate, percentage(closed, appointments.len() as u64));
        prop_assert!(stats.completion_rate <= 100);
        if appointments.is_empty() {
            prop_assert_eq!(stats.completion_rate, 0);
        }
    }

    #[test]
    fn success_rate_is_bounded(doctor in doctor_strategy()) {
        let rate = doctor.success_rate();
        prop_assert!(rate <= 100);
        if doctor.appointment_count == 0 {
            prop_assert_eq!(rate, 0);
        }
    }

    #[test]
    fn completed_then_all_restores_list(appointments in appointments_strategy()) {
        let completed = ListQuery::new().status("completed").apply(&appointments, today());
        prop_assert!(completed.iter().all(|a| !a.is_open));

        let again = ListQuery::new().status("completed").apply(&completed, today());
        prop_assert_eq!(&again, &completed);

        let all = ListQuery::new().status("all").apply(&appointments, today());
        prop_assert_eq!(&all, &appointments);
    }

    #[test]
    fn id_search_finds_exactly_one(appointments in appointments_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!appointments.is_empty());
        let target = &appointments[pick.index(appointments.len())];

        let found = ListQuery::new()
            .search(target.id.to_string())
            .apply(&appointments, today());
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(found[0].id, target.id);

        let hashed = ListQuery::new()
            .search(format!("#{}", target.id))
            .apply(&appointments, today());
        prop_assert_eq!(hashed.len(), 1);
    }

    #[test]
    fn urgency_sort_orders_by_rank(appointments in appointments_strategy()) {
        let sorted = ListQuery::new().sort(SortKey::Urgency).apply(&appointments, today());
        prop_assert_eq!(sorted.len(), appointments.len());
        let ranks: Vec<u8> = sorted.iter().map(|a| a.urgency().rank()).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

        // Stable: equal ranks keep their input order
        for rank in 0..=3u8 {
            let input: Vec<u64> = appointments.iter().filter(|a| a.urgency().rank() == rank).map(|a| a.id).collect();
            let output: Vec<u64> = sorted.iter().filter(|a| a.urgency().rank() == rank).map(|a| a.id).collect();
            prop_assert_eq!(input, output);
        }
    }

    #[test]
    fn export_overview_counts_match(
        doctors in prop::collection::vec(doctor_strategy(), 0..15),
        appointments in appointments_strategy(),
    ) {
        let analytics = PlatformAnalytics::compute(AnalyticsInput {
            doctors: &doctors,
            patients: &[],
            medicines: &[],
            appointments: &appointments,
            today: today(),
            top_doctor_count: 5,
            low_stock_threshold: 10,
        });
        prop_assert!(analytics.top_doctors.len() <= 5);

        let json = AnalyticsReport::new(analytics).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(value["overview"]["totalDoctors"].as_u64(), Some(doctors.len() as u64));
        prop_assert_eq!(value["overview"]["totalAppointments"].as_u64(), Some(appointments.len() as u64));
        prop_assert!(value["generatedAt"].is_string());
    }
}

#[test]
fn test_category_filter_parse() {
    assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse(" Emergency "),
        CategoryFilter::Only("emergency".to_string())
    );
    assert_eq!(Urgency::parse("EMERGENCY").rank(), 0);
}
