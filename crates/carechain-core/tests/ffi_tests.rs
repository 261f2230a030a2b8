//! Tests for the exported FFI surface.

use carechain_core::{
    open_core, open_core_in_memory, CareChainError, FfiAppointmentRequest, FfiListQuery,
    FfiMedicalRecord, FfiMedicineInput,
};

fn any_query() -> FfiListQuery {
    FfiListQuery {
        search: String::new(),
        status: String::new(),
        urgency: String::new(),
        date: String::new(),
        sort: None,
    }
}

#[test]
fn test_full_flow() {
    let core = open_core_in_memory().unwrap();
    core.set_admin("0xadmin".to_string()).unwrap();

    let doctor_id = core
        .register_doctor(
            "0xdoc".to_string(),
            "Dr. Miranda Bailey".to_string(),
            Some(r#"{"specialization":"General Surgery"}"#.to_string()),
        )
        .unwrap();
    let patient_id = core
        .register_patient("0xpat".to_string(), "Izzie Stevens".to_string(), None)
        .unwrap();

    let request = FfiAppointmentRequest {
        doctor_id,
        patient_id,
        appointment_date: "2026-10-17".to_string(),
        time_from: "10:00".to_string(),
        time_to: "10:30".to_string(),
        condition: "Follow-up".to_string(),
        message: String::new(),
        urgency: "Urgent".to_string(),
    };

    // Pending doctors take no bookings
    assert!(matches!(
        core.book_appointment(request.clone()),
        Err(CareChainError::Rejected(_))
    ));
    core.approve_doctor(doctor_id).unwrap();
    let appointment_id = core.book_appointment(request).unwrap();

    let rows = core.list_appointments(any_query()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].doctor_name, "Dr. Miranda Bailey");
    assert_eq!(rows[0].appointment.time_range, "10:00 - 10:30");
    assert_eq!(rows[0].appointment.urgency, "urgent");

    let appointments = core.complete_appointment(doctor_id, appointment_id).unwrap();
    assert_eq!(appointments[0].status, "completed");
    assert!(!appointments[0].is_open);

    let history = core
        .add_medical_record(
            patient_id,
            FfiMedicalRecord {
                date: "2026-10-17".to_string(),
                diagnosis: "Sprain".to_string(),
                treatment: "Rest".to_string(),
                prescription: None,
                notes: None,
                doctor_id: Some(doctor_id),
            },
        )
        .unwrap();
    assert_eq!(history, vec!["2026-10-17: Sprain".to_string()]);

    core.add_medicine(FfiMedicineInput {
        name: "Ibuprofen".to_string(),
        description: "NSAID".to_string(),
        price: 3.25,
        quantity: 40,
    })
    .unwrap();

    let overview = core.admin_overview().unwrap();
    assert_eq!(overview.total_doctors, 1);
    assert_eq!(overview.total_medicines, 1);
    assert_eq!(overview.completion_rate, 100);
    assert_eq!(overview.success_rate, 100);
    assert_eq!(overview.low_stock_medicines, 0);

    assert_eq!(core.user_type("0xADMIN".to_string()).unwrap().user_type, "admin");
    assert_eq!(core.user_type("0xdoc".to_string()).unwrap().user_type, "doctor");
    assert_eq!(core.user_type("0xnone".to_string()).unwrap().user_type, "unregistered");

    let notifications = core.notifications("0xpat".to_string()).unwrap();
    assert!(notifications.iter().any(|n| n.category_type == "record"));

    let json = core.export_analytics_json().unwrap();
    assert!(json.contains("\"generatedAt\""));

    let csv = core.export_appointments_csv(any_query()).unwrap();
    assert!(csv.starts_with("id,date,time,doctor,patient,condition,urgency,status"));
}

#[test]
fn test_invalid_input() {
    let core = open_core_in_memory().unwrap();

    let bad_profile = core.register_doctor("0x1".to_string(), "Dr. X".to_string(), Some("[1]".to_string()));
    assert!(matches!(bad_profile, Err(CareChainError::InvalidInput(_))));

    let bad_price = core.add_medicine(FfiMedicineInput {
        name: "Saline".to_string(),
        description: String::new(),
        price: -1.0,
        quantity: 1,
    });
    assert!(matches!(bad_price, Err(CareChainError::InvalidInput(_))));

    let bad_sort = core.list_appointments(FfiListQuery {
        sort: Some("alphabetical".to_string()),
        ..any_query()
    });
    assert!(matches!(bad_sort, Err(CareChainError::InvalidInput(_))));

    assert!(matches!(
        core.approve_doctor(99),
        Err(CareChainError::NotFound(_))
    ));

    assert!(matches!(
        open_core("notification_refresh_secs = 0".to_string()),
        Err(CareChainError::InvalidInput(_))
    ));
}

#[test]
fn test_restock_clears_low_stock() {
    let core = open_core_in_memory().unwrap();
    let id = core
        .add_medicine(FfiMedicineInput {
            name: "Amoxicillin".to_string(),
            description: "500mg capsules".to_string(),
            price: 8.0,
            quantity: 3,
        })
        .unwrap();
    assert_eq!(core.admin_overview().unwrap().low_stock_medicines, 1);

    core.restock_medicine(id, 50).unwrap();
    assert_eq!(core.admin_overview().unwrap().low_stock_medicines, 0);

    assert!(matches!(
        core.restock_medicine(id + 1, 5),
        Err(CareChainError::NotFound(_))
    ));
}

#[test]
fn test_profile_url() {
    let core = open_core(r#"ipfs_gateway = "https://gateway.example.org/ipfs/""#.to_string()).unwrap();
    assert_eq!(
        core.profile_url("ipfs://bafyabc".to_string()).unwrap(),
        "https://gateway.example.org/ipfs/bafyabc"
    );
    assert!(matches!(
        core.profile_url("   ".to_string()),
        Err(CareChainError::StorageError(_))
    ));
}
