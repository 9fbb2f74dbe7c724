//! Unit tests for hd-facility.

#[cfg(test)]
mod room_tests {
    use hd_core::{GuestId, RoomId};

    use crate::{RoomError, RoomInventory, RoomState};

    #[test]
    fn starts_all_clean() {
        let inv = RoomInventory::new(3);
        let c = inv.counts();
        assert_eq!((c.clean, c.dirty, c.occupied), (3, 0, 0));
        assert_eq!(inv.first_clean(), Some(RoomId(0)));
        assert!(inv.is_conserved());
    }

    #[test]
    fn full_cycle() {
        let mut inv = RoomInventory::new(2);
        let g = GuestId(5);
        inv.assign(RoomId(0), g).unwrap();
        assert_eq!(inv.state(RoomId(0)).unwrap(), RoomState::Occupied);
        assert_eq!(inv.get(RoomId(0)).unwrap().occupant, Some(g));
        assert_eq!(inv.first_clean(), Some(RoomId(1)));

        inv.check_out(RoomId(0), g).unwrap();
        assert_eq!(inv.state(RoomId(0)).unwrap(), RoomState::VacantDirty);
        assert_eq!(inv.get(RoomId(0)).unwrap().occupant, None);

        inv.finish_cleaning(RoomId(0)).unwrap();
        assert_eq!(inv.state(RoomId(0)).unwrap(), RoomState::VacantClean);
        assert_eq!(inv.first_clean(), Some(RoomId(0)));
        assert!(inv.is_conserved());
    }

    #[test]
    fn lowest_id_wins() {
        let mut inv = RoomInventory::new(4);
        assert_eq!(inv.assign_first_clean(GuestId(0)).unwrap(), Some(RoomId(0)));
        assert_eq!(inv.assign_first_clean(GuestId(1)).unwrap(), Some(RoomId(1)));
        inv.check_out(RoomId(0), GuestId(0)).unwrap();
        inv.finish_cleaning(RoomId(0)).unwrap();
        assert_eq!(inv.assign_first_clean(GuestId(2)).unwrap(), Some(RoomId(0)));
    }

    #[test]
    fn none_when_full() {
        let mut inv = RoomInventory::new(1);
        inv.assign_first_clean(GuestId(0)).unwrap();
        assert_eq!(inv.assign_first_clean(GuestId(1)).unwrap(), None);
        assert_eq!(inv.occupied_count(), 1);
    }

    #[test]
    fn double_assignment_rejected() {
        let mut inv = RoomInventory::new(1);
        inv.assign(RoomId(0), GuestId(0)).unwrap();
        let err = inv.assign(RoomId(0), GuestId(1)).unwrap_err();
        assert_eq!(
            err,
            RoomError::IllegalTransition {
                room: RoomId(0),
                from: RoomState::Occupied,
                to:   RoomState::Occupied,
            }
        );
        assert_eq!(inv.get(RoomId(0)).unwrap().occupant, Some(GuestId(0)));
    }

    #[test]
    fn cleaning_a_clean_room_rejected() {
        let mut inv = RoomInventory::new(1);
        assert!(matches!(
            inv.finish_cleaning(RoomId(0)),
            Err(RoomError::IllegalTransition { from: RoomState::VacantClean, .. })
        ));
    }

    #[test]
    fn wrong_occupant_checkout_rejected() {
        let mut inv = RoomInventory::new(1);
        inv.assign(RoomId(0), GuestId(0)).unwrap();
        assert!(matches!(
            inv.check_out(RoomId(0), GuestId(9)),
            Err(RoomError::OccupantMismatch { occupant: Some(GuestId(0)), .. })
        ));
        assert_eq!(inv.counts().occupied, 1);
    }

    #[test]
    fn unknown_room() {
        let mut inv = RoomInventory::new(1);
        assert_eq!(inv.assign(RoomId(3), GuestId(0)), Err(RoomError::UnknownRoom(RoomId(3))));
    }
}

#[cfg(test)]
mod resource_tests {
    use hd_core::{CapacityProfile, GuestId, SimTime};

    use crate::{Admission, ResourceError, ResourcePool};

    fn pool(capacity: u32) -> ResourcePool<GuestId> {
        ResourcePool::new("front_desk", CapacityProfile::constant(capacity))
    }

    #[test]
    fn starts_until_full_then_queues() {
        let mut p = pool(2);
        let t = SimTime(1.0);
        assert_eq!(p.request_service(t, GuestId(0)).unwrap(), Admission::Started);
        assert_eq!(p.request_service(t, GuestId(1)).unwrap(), Admission::Started);
        assert_eq!(p.request_service(t, GuestId(2)).unwrap(), Admission::Queued { position: 1 });
        assert_eq!(p.request_service(t, GuestId(3)).unwrap(), Admission::Queued { position: 2 });
        assert_eq!(p.busy(), 2);
        assert_eq!(p.queue_len(), 2);
    }

    #[test]
    fn completion_frees_server_fifo() {
        let mut p = pool(1);
        p.request_service(SimTime(0.0), GuestId(0)).unwrap();
        p.request_service(SimTime(0.1), GuestId(1)).unwrap();
        p.request_service(SimTime(0.2), GuestId(2)).unwrap();

        let span = p.on_completion(SimTime(0.5), GuestId(0)).unwrap();
        assert_eq!(span.start, SimTime(0.0));
        assert_eq!(span.end, SimTime(0.5));
        assert_eq!(p.start_ready(SimTime(0.5)), vec![GuestId(1)]);
        assert_eq!(p.queue_len(), 1);
        assert_eq!(p.in_service().collect::<Vec<_>>(), vec![(GuestId(1), SimTime(0.5))]);
    }

    #[test]
    fn unknown_completion_is_error() {
        let mut p = pool(1);
        assert!(matches!(
            p.on_completion(SimTime(1.0), GuestId(4)),
            Err(ResourceError::UnknownCompletion { pool: "front_desk", .. })
        ));
    }

    #[test]
    fn duplicate_request_is_error() {
        let mut p = pool(1);
        p.request_service(SimTime(0.0), GuestId(0)).unwrap();
        assert!(p.request_service(SimTime(0.0), GuestId(0)).is_err());
    }

    #[test]
    fn zero_capacity_hours_hold_the_queue() {
        // Open 9–17 only.
        let cap = CapacityProfile::from_shifts(&[(9, 17, 1)], 0);
        let mut p: ResourcePool<GuestId> = ResourcePool::new("housekeeping", cap);
        assert!(matches!(p.request_service(SimTime(3.0), GuestId(0)).unwrap(), Admission::Queued { .. }));
        assert!(p.start_ready(SimTime(8.0)).is_empty());
        assert_eq!(p.start_ready(SimTime(9.0)), vec![GuestId(0)]);
    }

    #[test]
    fn capacity_drop_does_not_preempt() {
        // Two servers until 12:00, one after.
        let cap = CapacityProfile::from_shifts(&[(0, 12, 2)], 1);
        let mut p: ResourcePool<GuestId> = ResourcePool::new("front_desk", cap);
        p.request_service(SimTime(11.5), GuestId(0)).unwrap();
        p.request_service(SimTime(11.5), GuestId(1)).unwrap();
        p.request_service(SimTime(11.6), GuestId(2)).unwrap();

        // At 12:00 both keep running, nobody new starts.
        assert!(p.start_ready(SimTime(12.0)).is_empty());
        assert_eq!(p.busy(), 2);

        // One finishes: still at capacity 1, so no start.
        p.on_completion(SimTime(12.2), GuestId(0)).unwrap();
        assert!(p.start_ready(SimTime(12.2)).is_empty());
        p.on_completion(SimTime(12.3), GuestId(1)).unwrap();
        assert_eq!(p.start_ready(SimTime(12.3)), vec![GuestId(2)]);
    }

    #[test]
    fn new_request_waits_behind_queue() {
        let cap = CapacityProfile::from_shifts(&[(9, 17, 1)], 0);
        let mut p: ResourcePool<GuestId> = ResourcePool::new("front_desk", cap);
        p.request_service(SimTime(8.0), GuestId(0)).unwrap();
        // Server is free at 9:00 but guest 0 came first.
        assert_eq!(p.request_service(SimTime(9.0), GuestId(1)).unwrap(), Admission::Queued { position: 2 });
        assert_eq!(p.start_ready(SimTime(9.0)), vec![GuestId(0)]);
    }
}

#[cfg(test)]
mod guest_tests {
    use hd_core::{GuestId, RoomId, SimTime};

    use crate::{GuestError, GuestPhase, GuestStore};

    #[test]
    fn ids_dense_in_admission_order() {
        let mut s = GuestStore::new();
        assert_eq!(s.admit(SimTime(1.0), 2, false), GuestId(0));
        assert_eq!(s.admit(SimTime(2.0), 1, true), GuestId(1));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(GuestId(1)).unwrap().nights, 1);
        assert_eq!(s.get(GuestId(7)).unwrap_err(), GuestError::UnknownGuest(GuestId(7)));
    }

    #[test]
    fn standard_path_phases() {
        let mut s = GuestStore::new();
        let id = s.admit(SimTime(10.0), 1, false);
        for to in [
            GuestPhase::AwaitingStandardCheckin,
            GuestPhase::InFrontDeskQueue,
            GuestPhase::InService,
            GuestPhase::AwaitingRoom,
            GuestPhase::CheckedIn,
            GuestPhase::CheckedOut,
        ] {
            s.advance(id, to).unwrap();
        }
        assert_eq!(s.get(id).unwrap().phase, GuestPhase::CheckedOut);
    }

    #[test]
    fn illegal_phase_rejected() {
        let mut s = GuestStore::new();
        let id = s.admit(SimTime(0.0), 1, false);
        let err = s.advance(id, GuestPhase::CheckedOut).unwrap_err();
        assert_eq!(
            err,
            GuestError::IllegalPhase { guest: id, from: GuestPhase::Arrived, to: GuestPhase::CheckedOut }
        );
        assert_eq!(s.get(id).unwrap().phase, GuestPhase::Arrived);
    }

    #[test]
    fn wait_breakdown() {
        let mut s = GuestStore::new();
        let id = s.admit(SimTime(10.0), 1, false);
        let g = s.get_mut(id).unwrap();
        g.wait_start = SimTime(15.0);
        g.desk_queue_entry = Some(SimTime(15.0));
        g.front_desk_start = Some(SimTime(15.25));
        g.front_desk_end = Some(SimTime(15.5));
        g.checkin_time = Some(SimTime(16.0));
        g.room = Some(RoomId(0));

        let g = s.get(id).unwrap();
        assert_eq!(g.wait_hours(), Some(1.0));
        assert_eq!(g.desk_wait_hours(), Some(0.25));
        assert_eq!(g.room_wait_hours(), Some(0.5));
        assert_eq!(g.total_hours_to_room(), Some(6.0));
    }
}
