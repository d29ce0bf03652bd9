//! Reschedule planning
//!
//! Computes the symmetric difference between a booking's current slots and
//! a requested slot set, validating every precondition before any mutation.
//! The repository applies the resulting plan atomically; a rejected plan
//! leaves every slot untouched.

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::slot::SlotStatus,
};

/// Minimal view of a slot needed for planning
#[derive(Debug, Clone, Copy)]
pub struct SlotRef {
    pub id: i32,
    pub date: NaiveDate,
    pub status: SlotStatus,
    pub booking_id: Option<i32>,
}

/// The atomic set of slot transitions a reschedule performs
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReschedulePlan {
    /// Currently-linked slots to release back to AVAILABLE
    pub to_release: Vec<i32>,
    /// Currently-linked slots in the past; left booked as history
    pub historical: Vec<i32>,
    /// Slots to newly claim (all verified AVAILABLE at planning time)
    pub to_claim: Vec<i32>,
    /// Slots present in both sets; untouched
    pub kept: Vec<i32>,
}

impl ReschedulePlan {
    /// True when slot membership does not change
    pub fn is_membership_noop(&self) -> bool {
        self.to_release.is_empty() && self.historical.is_empty() && self.to_claim.is_empty()
    }
}

/// Plan a reschedule for `booking_id` from `current` slots to the `target`
/// slot set.
///
/// Rules:
/// - a target slot dated before `today` is rejected (`PastDate`);
/// - a target slot linked to a different booking is rejected (`SlotConflict`);
/// - a target slot under maintenance is rejected (`SlotUnavailable`);
/// - dropped slots are released unless their date is already past, in which
///   case they stay linked as history.
pub fn plan(
    booking_id: i32,
    current: &[SlotRef],
    target: &[SlotRef],
    today: NaiveDate,
) -> AppResult<ReschedulePlan> {
    if target.is_empty() {
        return Err(AppError::Validation(
            "a booking must keep at least one slot".to_string(),
        ));
    }

    let mut plan = ReschedulePlan::default();

    for slot in target {
        if current.iter().any(|c| c.id == slot.id) {
            plan.kept.push(slot.id);
            continue;
        }
        if slot.date < today {
            return Err(AppError::PastDate(format!(
                "slot {} is on {} which is in the past",
                slot.id, slot.date
            )));
        }
        match slot.status {
            SlotStatus::Available => plan.to_claim.push(slot.id),
            SlotStatus::Booked => {
                // Linked to this booking would have matched `current` above
                if slot.booking_id == Some(booking_id) {
                    plan.kept.push(slot.id);
                } else {
                    return Err(AppError::SlotConflict(format!(
                        "slot {} is claimed by another booking",
                        slot.id
                    )));
                }
            }
            SlotStatus::Maintenance => {
                return Err(AppError::SlotUnavailable(format!(
                    "slot {} is under maintenance",
                    slot.id
                )));
            }
        }
    }

    for slot in current {
        if target.iter().any(|t| t.id == slot.id) {
            continue;
        }
        if slot.date < today {
            plan.historical.push(slot.id);
        } else {
            plan.to_release.push(slot.id);
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn owned(id: i32, date: NaiveDate) -> SlotRef {
        SlotRef { id, date, status: SlotStatus::Booked, booking_id: Some(7) }
    }

    fn free(id: i32, date: NaiveDate) -> SlotRef {
        SlotRef { id, date, status: SlotStatus::Available, booking_id: None }
    }

    #[test]
    fn test_swap_one_slot() {
        let d = today();
        let current = [owned(1, d), owned(2, d)];
        let target = [owned(1, d), free(3, d)];
        let plan = plan(7, &current, &target, d).unwrap();
        assert_eq!(plan.kept, vec![1]);
        assert_eq!(plan.to_claim, vec![3]);
        assert_eq!(plan.to_release, vec![2]);
        assert!(plan.historical.is_empty());
    }

    #[test]
    fn test_same_set_is_noop() {
        let d = today();
        let current = [owned(1, d), owned(2, d)];
        let plan = plan(7, &current, &current, d).unwrap();
        assert!(plan.is_membership_noop());
        assert_eq!(plan.kept.len(), 2);
    }

    #[test]
    fn test_claim_of_foreign_slot_rejected() {
        let d = today();
        let current = [owned(1, d)];
        let foreign = SlotRef { id: 5, date: d, status: SlotStatus::Booked, booking_id: Some(99) };
        let err = plan(7, &current, &[owned(1, d), foreign], d).unwrap_err();
        assert!(matches!(err, AppError::SlotConflict(_)));
    }

    #[test]
    fn test_claim_of_maintenance_slot_rejected() {
        let d = today();
        let blocked = SlotRef { id: 5, date: d, status: SlotStatus::Maintenance, booking_id: None };
        let err = plan(7, &[owned(1, d)], &[blocked], d).unwrap_err();
        assert!(matches!(err, AppError::SlotUnavailable(_)));
    }

    #[test]
    fn test_past_target_rejected() {
        let yesterday = today().pred_opt().unwrap();
        let err = plan(7, &[owned(1, today())], &[free(3, yesterday)], today()).unwrap_err();
        assert!(matches!(err, AppError::PastDate(_)));
    }

    #[test]
    fn test_past_release_kept_as_history() {
        let yesterday = today().pred_opt().unwrap();
        let current = [owned(1, yesterday), owned(2, today())];
        let plan = plan(7, &current, &[free(3, today())], today()).unwrap();
        assert_eq!(plan.historical, vec![1]);
        assert_eq!(plan.to_release, vec![2]);
        assert_eq!(plan.to_claim, vec![3]);
    }

    #[test]
    fn test_empty_target_rejected() {
        let err = plan(7, &[owned(1, today())], &[], today()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
