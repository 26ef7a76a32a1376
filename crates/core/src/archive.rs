// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Archive and unarchive scheduling for premises and bedspaces.
//!
//! ## Blocking dates
//!
//! An archive end date must not fall before anything that still needs the
//! bedspace:
//!
//! - a booking's departure date (`existingBookings`)
//! - its departure date plus turnaround working days (`existingTurnaround`)
//! - a void bedspace's end date (`existingVoid`)
//!
//! Cancelled bookings and voids are ignored. When the latest blocking date is
//! after the requested end date the request fails with a conflict carrying
//! the entity id and the day after the blocker, the first date that would be
//! accepted.
//!
//! ## Scheduled changes
//!
//! An archive with a future end date, or an unarchive with a future restart
//! date, is scheduled. Cancelling it restores the previous dates and marks
//! the domain event that recorded it as cancelled.

use crate::conflicts::{holds_bedspace, last_unavailable_date};
use crate::error::CoreError;
use crate::ports::WorkingDayCalendar;
use crate::premises::PremisesService;
use cas3_domain::{
    Bedspace, Booking, Premises, PremisesCascade, PremisesStatus, SCHEDULING_WINDOW_DAYS, User,
    ValidationErrors, VoidBedspace, WindowViolation, check_window, day_after,
    recompute_premises_status,
};
use cas3_events::{DomainEventBuilder, EventDetails, EventType, StoredDomainEvent};
use time::Date;
use tracing::info;
use uuid::Uuid;

/// The latest date something still needs a bedspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Blocker {
    pub code: &'static str,
    pub date: Date,
}

/// Finds the latest blocking date among `bookings` and `voids`.
///
/// Cancelled bookings, non-arrivals and cancelled voids never block.
///
/// On equal dates the first kind found wins, in the order bookings,
/// turnarounds, voids.
pub(crate) fn latest_blocker(
    calendar: &dyn WorkingDayCalendar,
    bookings: &[Booking],
    voids: &[VoidBedspace],
) -> Option<Blocker> {
    let live_bookings = bookings.iter().filter(|booking| holds_bedspace(booking));

    let candidates = live_bookings
        .clone()
        .map(|booking| Blocker {
            code: "existingBookings",
            date: booking.departure_date,
        })
        .chain(live_bookings.map(|booking| Blocker {
            code: "existingTurnaround",
            date: last_unavailable_date(calendar, booking),
        }))
        .chain(
            voids
                .iter()
                .filter(|void_bedspace| !void_bedspace.is_cancelled())
                .map(|void_bedspace| Blocker {
                    code: "existingVoid",
                    date: void_bedspace.end_date,
                }),
        );

    candidates.fold(None, |latest: Option<Blocker>, candidate| match latest {
        Some(current) if current.date >= candidate.date => Some(current),
        _ => Some(candidate),
    })
}

fn window_error(
    errors: &mut ValidationErrors,
    path: &str,
    date: Date,
    today: Date,
    past_code: &str,
    future_code: &str,
) {
    match check_window(date, today, SCHEDULING_WINDOW_DAYS) {
        Some(WindowViolation::InThePast) => errors.add(path, past_code),
        Some(WindowViolation::InTheFuture) => errors.add(path, future_code),
        None => {}
    }
}

/// The most recent event of `event_type` that has not been cancelled.
fn latest_pending(events: Vec<StoredDomainEvent>, event_type: EventType) -> Option<StoredDomainEvent> {
    events
        .into_iter()
        .filter(|stored| stored.event.event_type == event_type && !stored.is_cancelled())
        .max_by_key(|stored| stored.event.occurred_at)
}

impl PremisesService {
    fn bedspace_or_field_error(
        &self,
        premises_id: Uuid,
        bedspace_id: Uuid,
    ) -> Result<Bedspace, CoreError> {
        self.find_bedspace_in(premises_id, bedspace_id)?
            .ok_or_else(|| CoreError::field("$.bedspaceId", "doesNotExist"))
    }

    fn mark_latest_cancelled(
        &self,
        events: Vec<StoredDomainEvent>,
        event_type: EventType,
    ) -> Result<(), CoreError> {
        if let Some(stored) = latest_pending(events, event_type) {
            self.ports
                .domain_events
                .mark_cancelled(stored.event.id, self.now())?;
            info!(event_id = %stored.event.id, event_type = %event_type, "Marked scheduled change cancelled");
        }
        Ok(())
    }

    /// Sets the end date of one bedspace.
    ///
    /// If every bedspace in the premises then has an end date, the premises
    /// is archived at the latest of them.
    ///
    /// # Arguments
    ///
    /// * `user` - The user archiving the bedspace
    /// * `premises` - The premises the bedspace belongs to
    /// * `bedspace_id` - The bedspace to archive
    /// * `end_date` - The first day the bedspace is archived
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an out-of-window date or when a
    /// booking or void still needs the bedspace, or a fatal error on storage
    /// or publish failure.
    pub fn archive_bedspace(
        &self,
        user: &User,
        premises: &Premises,
        bedspace_id: Uuid,
        end_date: Date,
    ) -> Result<Bedspace, CoreError> {
        let mut bedspace: Bedspace = self.bedspace_or_field_error(premises.id, bedspace_id)?;

        let mut errors: ValidationErrors = ValidationErrors::new();
        window_error(
            &mut errors,
            "$.endDate",
            end_date,
            self.today(),
            "invalidEndDateInThePast",
            "invalidEndDateInTheFuture",
        );
        if end_date < bedspace.start_date {
            errors.add("$.endDate", "endDateBeforeBedspaceStartDate");
        }
        errors.into_result()?;

        let bookings: Vec<Booking> = self.ports.bookings.find_by_bedspace(bedspace_id)?;
        let voids: Vec<VoidBedspace> = self.ports.void_bedspaces.find_by_bedspace(bedspace_id)?;
        if let Some(blocker) = latest_blocker(self.ports.calendar.as_ref(), &bookings, &voids)
            .filter(|blocker| blocker.date > end_date)
        {
            return Err(CoreError::Validation(ValidationErrors::conflict(
                "$.endDate",
                blocker.code,
                bedspace.id,
                day_after(blocker.date),
            )));
        }

        let previous_end_date: Option<Date> = bedspace.end_date;
        bedspace.end_date = Some(end_date);
        self.ports.bedspaces.save(&bedspace)?;
        info!(bedspace_id = %bedspace.id, end_date = %end_date, "Archived bedspace");

        self.publisher.publish(&DomainEventBuilder::new(self.now()).bedspace_archived(
            &bedspace,
            end_date,
            previous_end_date,
            user,
        ))?;

        self.cascade_premises_status(user, premises.id)?;

        Ok(bedspace)
    }

    /// Archives a premises and every bedspace still online after `end_date`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the premises is already archived,
    /// the date is out of window, a bedspace starts after the date, or
    /// bookings or voids still need the premises. Returns a fatal error on
    /// storage or publish failure.
    pub fn archive_premises(
        &self,
        user: &User,
        premises: &Premises,
        end_date: Date,
    ) -> Result<Premises, CoreError> {
        if premises.is_archived() {
            return Err(CoreError::field("$.premisesId", "premisesAlreadyArchived"));
        }

        let bedspaces: Vec<Bedspace> = self.ports.bedspaces.find_by_premises(premises.id)?;

        let mut errors: ValidationErrors = ValidationErrors::new();
        window_error(
            &mut errors,
            "$.endDate",
            end_date,
            self.today(),
            "invalidEndDateInThePast",
            "invalidEndDateInTheFuture",
        );
        if bedspaces
            .iter()
            .any(|bedspace| bedspace.start_date > end_date)
        {
            errors.add("$.endDate", "existingUpcomingBedspace");
        }
        errors.into_result()?;

        let bookings: Vec<Booking> = self.ports.bookings.find_by_premises(premises.id)?;
        let voids: Vec<VoidBedspace> = self.ports.void_bedspaces.find_by_premises(premises.id)?;
        if let Some(blocker) = latest_blocker(self.ports.calendar.as_ref(), &bookings, &voids)
            .filter(|blocker| blocker.date > end_date)
        {
            return Err(CoreError::Validation(ValidationErrors::conflict(
                "$.endDate",
                blocker.code,
                premises.id,
                day_after(blocker.date),
            )));
        }

        if bookings.iter().any(|booking| booking.status.is_live()) {
            return Err(CoreError::field("$.endDate", "existingBookings"));
        }

        let builder: DomainEventBuilder = DomainEventBuilder::new(self.now());

        for mut bedspace in bedspaces
            .into_iter()
            .filter(|bedspace| bedspace.end_date.is_none_or(|end| end > end_date))
        {
            let previous_end_date: Option<Date> = bedspace.end_date;
            bedspace.end_date = Some(end_date);
            self.ports.bedspaces.save(&bedspace)?;
            self.publisher.publish(&builder.bedspace_archived(
                &bedspace,
                end_date,
                previous_end_date,
                user,
            ))?;
        }

        let mut premises: Premises = premises.clone();
        let previous_end_date: Option<Date> = premises.end_date;
        premises.archive(end_date);
        self.ports.premises.save(&premises)?;
        info!(premises_id = %premises.id, end_date = %end_date, "Archived premises");

        self.publisher.publish(&builder.premises_archived(
            &premises,
            end_date,
            previous_end_date,
            user,
        ))?;

        Ok(premises)
    }

    /// Brings an archived premises back online, together with the bedspaces
    /// that were archived with it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the premises is not archived as of
    /// today, the restart date is out of window or not after the last end
    /// date. A scheduled archive is withdrawn with
    /// `cancel_scheduled_archive_premises` instead. Storage or publish
    /// failures are fatal.
    pub fn unarchive_premises(
        &self,
        user: &User,
        premises: &Premises,
        restart_date: Date,
    ) -> Result<Premises, CoreError> {
        if !premises.is_archived_as_of(self.today()) {
            return Err(CoreError::field("$.premisesId", "premisesNotArchived"));
        }

        let mut errors: ValidationErrors = ValidationErrors::new();
        window_error(
            &mut errors,
            "$.restartDate",
            restart_date,
            self.today(),
            "invalidRestartDateInThePast",
            "invalidRestartDateInTheFuture",
        );
        errors.into_result()?;

        if let Some(end_date) = premises.end_date.filter(|end| restart_date <= *end) {
            return Err(CoreError::Validation(ValidationErrors::conflict(
                "$.restartDate",
                "beforeLastPremisesArchivedDate",
                premises.id,
                day_after(end_date),
            )));
        }

        let builder: DomainEventBuilder = DomainEventBuilder::new(self.now());
        let mut premises: Premises = premises.clone();
        let previous_start_date: Date = premises.start_date;
        let previous_end_date: Option<Date> = premises.end_date;
        premises.unarchive(restart_date);
        self.ports.premises.save(&premises)?;
        info!(premises_id = %premises.id, restart_date = %restart_date, "Unarchived premises");

        self.publisher.publish(&builder.premises_unarchived(
            &premises,
            previous_start_date,
            previous_end_date,
            restart_date,
            user,
        ))?;

        for mut bedspace in self
            .ports
            .bedspaces
            .find_by_premises(premises.id)?
            .into_iter()
            .filter(|bedspace| bedspace.end_date.is_some() && bedspace.end_date == previous_end_date)
        {
            let bedspace_start_date: Date = bedspace.start_date;
            let bedspace_end_date: Option<Date> = bedspace.end_date;
            bedspace.start_date = restart_date;
            bedspace.end_date = None;
            self.ports.bedspaces.save(&bedspace)?;
            self.publisher.publish(&builder.bedspace_unarchived(
                &bedspace,
                bedspace_start_date,
                bedspace_end_date,
                restart_date,
                user,
            ))?;
        }

        Ok(premises)
    }

    /// Brings an archived bedspace back online from `restart_date`.
    ///
    /// An archived premises is unarchived with it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the bedspace is not archived or the
    /// restart date is out of window or not after its end date, or a fatal
    /// error on storage or publish failure.
    pub fn unarchive_bedspace(
        &self,
        user: &User,
        premises: &Premises,
        bedspace_id: Uuid,
        restart_date: Date,
    ) -> Result<Bedspace, CoreError> {
        let mut bedspace: Bedspace = self.bedspace_or_field_error(premises.id, bedspace_id)?;

        if !bedspace.is_archived(self.today()) {
            return Err(CoreError::field("$.bedspaceId", "bedspaceNotArchived"));
        }

        let mut errors: ValidationErrors = ValidationErrors::new();
        window_error(
            &mut errors,
            "$.restartDate",
            restart_date,
            self.today(),
            "invalidRestartDateInThePast",
            "invalidRestartDateInTheFuture",
        );
        errors.into_result()?;

        if let Some(end_date) = bedspace.end_date.filter(|end| restart_date <= *end) {
            return Err(CoreError::Validation(ValidationErrors::conflict(
                "$.restartDate",
                "beforeLastBedspaceArchivedDate",
                bedspace.id,
                day_after(end_date),
            )));
        }

        let previous_start_date: Date = bedspace.start_date;
        let previous_end_date: Option<Date> = bedspace.end_date;
        bedspace.start_date = restart_date;
        bedspace.end_date = None;
        self.ports.bedspaces.save(&bedspace)?;
        info!(bedspace_id = %bedspace.id, restart_date = %restart_date, "Unarchived bedspace");

        self.publisher.publish(&DomainEventBuilder::new(self.now()).bedspace_unarchived(
            &bedspace,
            previous_start_date,
            previous_end_date,
            restart_date,
            user,
        ))?;

        self.cascade_premises_status(user, premises.id)?;

        Ok(bedspace)
    }

    /// Cancels a bedspace archive that has not yet taken effect.
    ///
    /// A premises scheduled to archive with it goes back to active.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if no archive is scheduled or it has
    /// already taken effect, or a fatal error on storage failure.
    pub fn cancel_archive_bedspace(
        &self,
        premises: &Premises,
        bedspace_id: Uuid,
    ) -> Result<Bedspace, CoreError> {
        let mut bedspace: Bedspace = self.bedspace_or_field_error(premises.id, bedspace_id)?;

        match bedspace.end_date {
            None => return Err(CoreError::field("$.bedspaceId", "bedspaceNotScheduledToArchive")),
            Some(end_date) if end_date <= self.today() => {
                return Err(CoreError::field("$.bedspaceId", "bedspaceAlreadyArchived"));
            }
            Some(_) => {}
        }

        bedspace.end_date = None;
        self.ports.bedspaces.save(&bedspace)?;
        self.mark_latest_cancelled(
            self.ports.domain_events.find_by_bedspace(bedspace.id)?,
            EventType::BedspaceArchived,
        )?;
        info!(bedspace_id = %bedspace.id, "Cancelled scheduled bedspace archive");

        let mut premises: Premises = self.find_premises(premises.id)?;
        if premises.is_archived() && !premises.is_archived_as_of(self.today()) {
            premises.status = PremisesStatus::Active;
            premises.end_date = None;
            self.ports.premises.save(&premises)?;
            self.mark_latest_cancelled(
                self.ports.domain_events.find_by_premises(premises.id)?,
                EventType::PremisesArchived,
            )?;
            info!(premises_id = %premises.id, "Cancelled scheduled premises archive with its bedspace");
        }

        Ok(bedspace)
    }

    /// Cancels a premises archive that has not yet taken effect, together
    /// with the bedspace archives scheduled with it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown premises,
    /// `CoreError::Validation` if no archive is scheduled or it has already
    /// taken effect, or a fatal error on storage failure.
    pub fn cancel_scheduled_archive_premises(&self, premises_id: Uuid) -> Result<Premises, CoreError> {
        let mut premises: Premises = self.find_premises(premises_id)?;

        let end_date: Date = match premises.end_date {
            Some(end_date) if premises.is_archived() => end_date,
            _ => return Err(CoreError::field("$.premisesId", "premisesNotScheduledToArchive")),
        };
        if end_date <= self.today() {
            return Err(CoreError::field("$.premisesId", "premisesAlreadyArchived"));
        }

        premises.status = PremisesStatus::Active;
        premises.end_date = None;
        self.ports.premises.save(&premises)?;
        self.mark_latest_cancelled(
            self.ports.domain_events.find_by_premises(premises.id)?,
            EventType::PremisesArchived,
        )?;
        info!(premises_id = %premises.id, "Cancelled scheduled premises archive");

        for mut bedspace in self
            .ports
            .bedspaces
            .find_by_premises(premises.id)?
            .into_iter()
            .filter(|bedspace| bedspace.end_date == Some(end_date))
        {
            bedspace.end_date = None;
            self.ports.bedspaces.save(&bedspace)?;
            self.mark_latest_cancelled(
                self.ports.domain_events.find_by_bedspace(bedspace.id)?,
                EventType::BedspaceArchived,
            )?;
        }

        Ok(premises)
    }

    /// Cancels a bedspace unarchive that has not yet taken effect, restoring
    /// the start and end dates recorded when it was scheduled.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown bedspace,
    /// `CoreError::Validation` if the bedspace is already online or no
    /// unarchive is pending, or a fatal error on storage or publish failure.
    pub fn cancel_unarchive_bedspace(
        &self,
        user: &User,
        bedspace_id: Uuid,
    ) -> Result<Bedspace, CoreError> {
        let mut bedspace: Bedspace = self
            .ports
            .bedspaces
            .find_by_id(bedspace_id)?
            .ok_or_else(|| CoreError::not_found("Bedspace", bedspace_id))?;

        if bedspace.start_date <= self.today() {
            return Err(CoreError::field("$.bedspaceId", "bedspaceAlreadyOnline"));
        }

        let pending: Option<StoredDomainEvent> = latest_pending(
            self.ports.domain_events.find_by_bedspace(bedspace.id)?,
            EventType::BedspaceUnarchived,
        );
        let Some((event_id, details)) = pending.and_then(|stored| match stored.event.details {
            EventDetails::BedspaceUnarchive(details)
                if details.new_start_date == bedspace.start_date =>
            {
                Some((stored.event.id, details))
            }
            _ => None,
        }) else {
            return Err(CoreError::field(
                "$.bedspaceId",
                "bedspaceNotScheduledToUnarchive",
            ));
        };

        bedspace.start_date = details.previous_start_date;
        bedspace.end_date = details.previous_end_date;
        self.ports.bedspaces.save(&bedspace)?;
        self.ports.domain_events.mark_cancelled(event_id, self.now())?;
        info!(bedspace_id = %bedspace.id, "Cancelled scheduled bedspace unarchive");

        self.restore_premises_archive(user, bedspace.premises_id)?;

        Ok(bedspace)
    }

    /// Re-archives a premises whose bedspaces are all archived again.
    ///
    /// If the premises came back online through a still-pending unarchive, that
    /// unarchive is undone and its event cancelled instead of recording a new
    /// archive.
    fn restore_premises_archive(&self, user: &User, premises_id: Uuid) -> Result<(), CoreError> {
        let mut premises: Premises = self.find_premises(premises_id)?;
        let bedspaces: Vec<Bedspace> = self.ports.bedspaces.find_by_premises(premises_id)?;

        let PremisesCascade::Archive { end_date } = recompute_premises_status(&premises, &bedspaces)
        else {
            return Ok(());
        };

        let pending: Option<StoredDomainEvent> = latest_pending(
            self.ports.domain_events.find_by_premises(premises_id)?,
            EventType::PremisesUnarchived,
        );
        let restored = pending.and_then(|stored| match stored.event.details {
            EventDetails::PremisesUnarchive(details)
                if !premises.is_archived() && details.new_start_date == premises.start_date =>
            {
                Some((stored.event.id, details))
            }
            _ => None,
        });

        match restored {
            Some((event_id, details)) => {
                premises.start_date = details.previous_start_date;
                premises.archive(end_date);
                self.ports.premises.save(&premises)?;
                self.ports.domain_events.mark_cancelled(event_id, self.now())?;
                info!(premises_id = %premises.id, "Cancelled scheduled premises unarchive with its bedspace");
            }
            None => {
                self.cascade_premises_status(user, premises_id)?;
            }
        }

        Ok(())
    }

    /// Cancels a premises unarchive that has not yet taken effect, together
    /// with the bedspace unarchives scheduled with it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown premises,
    /// `CoreError::Validation` if the premises is already online or no
    /// unarchive is pending, or a fatal error on storage failure.
    pub fn cancel_scheduled_unarchive_premises(
        &self,
        premises_id: Uuid,
    ) -> Result<Premises, CoreError> {
        let mut premises: Premises = self.find_premises(premises_id)?;

        if premises.start_date <= self.today() {
            return Err(CoreError::field("$.premisesId", "premisesAlreadyOnline"));
        }

        let pending: Option<StoredDomainEvent> = latest_pending(
            self.ports.domain_events.find_by_premises(premises.id)?,
            EventType::PremisesUnarchived,
        );
        let Some((event_id, details)) = pending.and_then(|stored| match stored.event.details {
            EventDetails::PremisesUnarchive(details)
                if !premises.is_archived() && details.new_start_date == premises.start_date =>
            {
                Some((stored.event.id, details))
            }
            _ => None,
        }) else {
            return Err(CoreError::field(
                "$.premisesId",
                "premisesNotScheduledToUnarchive",
            ));
        };

        let restart_date: Date = premises.start_date;
        premises.start_date = details.previous_start_date;
        match details.previous_end_date {
            Some(end_date) => premises.archive(end_date),
            None => premises.end_date = None,
        }
        self.ports.premises.save(&premises)?;
        self.ports.domain_events.mark_cancelled(event_id, self.now())?;
        info!(premises_id = %premises.id, "Cancelled scheduled premises unarchive");

        for mut bedspace in self
            .ports
            .bedspaces
            .find_by_premises(premises.id)?
            .into_iter()
            .filter(|bedspace| bedspace.end_date.is_none() && bedspace.start_date == restart_date)
        {
            let pending: Option<StoredDomainEvent> = latest_pending(
                self.ports.domain_events.find_by_bedspace(bedspace.id)?,
                EventType::BedspaceUnarchived,
            );
            if let Some(stored) = pending {
                if let EventDetails::BedspaceUnarchive(details) = &stored.event.details {
                    bedspace.start_date = details.previous_start_date;
                    bedspace.end_date = details.previous_end_date;
                    self.ports.bedspaces.save(&bedspace)?;
                    self.ports
                        .domain_events
                        .mark_cancelled(stored.event.id, self.now())?;
                }
            }
        }

        Ok(premises)
    }
}
