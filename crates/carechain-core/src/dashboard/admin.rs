//! Admin overview: every registry plus platform analytics.

use tracing::{debug, warn};

use super::{join_fetch, Dashboard, Loaded};
use crate::analytics::{AnalyticsInput, PlatformAnalytics};
use crate::contract::ContractResult;
use crate::export::AnalyticsReport;
use crate::models::{Appointment, ContractInfo, Doctor, Medicine, Patient};

/// The four entity lists, fetched as one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub medicines: Vec<Medicine>,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    /// Missing if the info call failed; the rest of the screen still loads
    pub info: Option<ContractInfo>,
    pub registry: Registry,
    pub analytics: PlatformAnalytics,
}

impl AdminOverview {
    /// Snapshot of the analytics currently on screen.
    pub fn analytics_report(&self) -> AnalyticsReport {
        AnalyticsReport::new(self.analytics.clone())
    }
}

impl<'a> Dashboard<'a> {
    /// Fetch all four lists concurrently. Any failure fails the batch.
    pub fn fetch_registry(&self) -> ContractResult<Registry> {
        let contract = self.contract;
        std::thread::scope(|s| {
            let doctors = s.spawn(move || contract.get_all_doctors());
            let patients = s.spawn(move || contract.get_all_patients());
            let medicines = s.spawn(move || contract.get_all_medicines());
            let appointments = s.spawn(move || contract.get_all_appointments());

            Ok(Registry {
                doctors: join_fetch(doctors)?,
                patients: join_fetch(patients)?,
                medicines: join_fetch(medicines)?,
                appointments: join_fetch(appointments)?,
            })
        })
    }

    pub fn compute_analytics(&self, registry: &Registry) -> PlatformAnalytics {
        PlatformAnalytics::compute(AnalyticsInput {
            doctors: &registry.doctors,
            patients: &registry.patients,
            medicines: &registry.medicines,
            appointments: &registry.appointments,
            today: self.today(),
            top_doctor_count: self.config.top_doctor_count,
            low_stock_threshold: self.config.low_stock_threshold,
        })
    }

    pub fn load_admin_overview(&self) -> Loaded<AdminOverview> {
        let registry = match self.fetch_registry() {
            Ok(registry) => registry,
            Err(e) => {
                return Loaded::fallback(AdminOverview::default(), "Failed to load dashboard data", e)
            }
        };

        let registry = Registry {
            doctors: registry
                .doctors
                .into_iter()
                .map(|d| self.enrich_doctor(d))
                .collect(),
            patients: registry
                .patients
                .into_iter()
                .map(|p| self.enrich_patient(p))
                .collect(),
            ..registry
        };

        let info = match self.contract.get_contract_info() {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "Contract info unavailable");
                None
            }
        };

        let analytics = self.compute_analytics(&registry);
        debug!(
            doctors = registry.doctors.len(),
            patients = registry.patients.len(),
            appointments = registry.appointments.len(),
            "Admin overview loaded"
        );

        Loaded::ok(AdminOverview {
            info,
            registry,
            analytics,
        })
    }

    /// Approve a pending doctor, then re-fetch the doctor list.
    pub fn approve_doctor(&self, doctor_id: u64) -> ContractResult<Vec<Doctor>> {
        self.contract.approve_doctor(doctor_id)?;
        let doctors = self.contract.get_all_doctors()?;
        Ok(doctors.into_iter().map(|d| self.enrich_doctor(d)).collect())
    }
}
