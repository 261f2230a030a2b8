//! Appointment list screen.

use super::{Dashboard, Loaded};
use crate::export::AppointmentReport;
use crate::query::{join_appointments, AppointmentRow, ListQuery};

impl<'a> Dashboard<'a> {
    /// All appointments with names attached, filtered and sorted by `query`.
    pub fn load_appointment_rows(&self, query: &ListQuery) -> Loaded<Vec<AppointmentRow>> {
        match self.fetch_registry() {
            Ok(registry) => {
                let rows = join_appointments(
                    &registry.appointments,
                    &registry.doctors,
                    &registry.patients,
                );
                Loaded::ok(query.apply(&rows, self.today()))
            }
            Err(e) => Loaded::fallback(Vec::new(), "Failed to load appointments", e),
        }
    }

    /// Export exactly the rows the query currently shows.
    pub fn appointment_report(&self, query: &ListQuery) -> Loaded<AppointmentReport> {
        let rows = self.load_appointment_rows(query);
        Loaded {
            data: AppointmentReport::new(rows.data, self.today()),
            notice: rows.notice,
        }
    }
}
