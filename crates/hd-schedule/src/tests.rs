//! Unit tests for hd-schedule.

#[cfg(test)]
mod event_queue_tests {
    use hd_core::{GuestId, RoomId, SimTime};

    use crate::{EventKind, EventQueue, ScheduleError};

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(10.0), EventKind::Arrival).unwrap();
        q.schedule(SimTime(5.0), EventKind::HourBoundary).unwrap();
        q.schedule(SimTime(20.0), EventKind::CheckinOpens).unwrap();

        let first = q.advance().unwrap();
        assert_eq!(first.time, SimTime(5.0));
        assert_eq!(q.now(), SimTime(5.0));
        assert_eq!(q.advance().unwrap().time, SimTime(10.0));
        assert_eq!(q.advance().unwrap().time, SimTime(20.0));
        assert!(q.advance().is_none());
        assert!(q.is_empty());
        assert_eq!(q.now(), SimTime(20.0), "empty advance leaves the clock alone");
    }

    #[test]
    fn equal_times_dispatch_in_insertion_order() {
        let mut q = EventQueue::new();
        let kinds = [
            EventKind::CleaningComplete(RoomId(3)),
            EventKind::Arrival,
            EventKind::FrontDeskServiceComplete(GuestId(9)),
            EventKind::CheckOut(GuestId(1)),
            EventKind::HourBoundary,
        ];
        for k in kinds {
            q.schedule(SimTime(7.0), k).unwrap();
        }
        let popped: Vec<EventKind> = std::iter::from_fn(|| q.advance()).map(|e| e.kind).collect();
        assert_eq!(popped, kinds);
    }

    #[test]
    fn sequence_is_monotonic() {
        let mut q = EventQueue::new();
        let a = q.schedule(SimTime(3.0), EventKind::Arrival).unwrap();
        let b = q.schedule(SimTime(1.0), EventKind::Arrival).unwrap();
        assert!(b.seq > a.seq);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn scheduling_in_the_past_is_rejected() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(4.0), EventKind::Arrival).unwrap();
        q.advance().unwrap();
        let err = q.schedule(SimTime(3.5), EventKind::Arrival).unwrap_err();
        assert!(matches!(err, ScheduleError::OrderingViolation { .. }));
        // Exactly `now` is fine.
        q.schedule(SimTime(4.0), EventKind::Arrival).unwrap();
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let mut q = EventQueue::new();
        assert!(matches!(
            q.schedule(SimTime(f64::INFINITY), EventKind::Arrival),
            Err(ScheduleError::NonFiniteTime(_))
        ));
        assert!(q.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut q = EventQueue::new();
        assert_eq!(q.peek_time(), None);
        q.schedule(SimTime(2.0), EventKind::RoomRetry).unwrap();
        assert_eq!(q.peek_time(), Some(SimTime(2.0)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.now(), SimTime::ZERO);
    }

    #[test]
    fn display_names_kind_and_payload() {
        let mut q = EventQueue::new();
        let e = q.schedule(SimTime(26.5), EventKind::CheckOut(GuestId(4))).unwrap();
        assert_eq!(e.to_string(), "#0 @ D1 02:30 (26.5000 h): checkout GuestId(4)");
    }
}

#[cfg(test)]
mod loader_tests {
    use std::fmt::Write;
    use std::io::Cursor;

    use hd_core::HotelConfig;

    use crate::{load_profiles_reader, ScheduleError};

    fn full_csv() -> String {
        let mut s = String::from("hour,arrival_intensity,front_desk,housekeeping\n");
        for h in 0..24 {
            let intensity = if (14..18).contains(&h) { 3.0 } else { 1.0 };
            let desk = if (12..20).contains(&h) { 6 } else { 2 };
            let hk = if (9..17).contains(&h) { 12 } else { 0 };
            writeln!(s, "{h},{intensity},{desk},{hk}").unwrap();
        }
        s
    }

    #[test]
    fn loads_all_hours() {
        let table = load_profiles_reader(Cursor::new(full_csv()), false).unwrap();
        assert_eq!(table.front_desk.at_slot(13), 6);
        assert_eq!(table.front_desk.at_slot(21), 2);
        assert_eq!(table.housekeeping.at_slot(9), 12);
        assert_eq!(table.arrival.at_slot(15), 3.0);
    }

    #[test]
    fn normalize_scales_intensity() {
        let table = load_profiles_reader(Cursor::new(full_csv()), true).unwrap();
        assert!((table.arrival.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rows_in_any_order() {
        let csv = full_csv();
        let mut lines: Vec<&str> = csv.lines().collect();
        let header = lines.remove(0);
        lines.reverse();
        let shuffled = format!("{header}\n{}\n", lines.join("\n"));
        let a = load_profiles_reader(Cursor::new(csv.clone()), false).unwrap();
        let b = load_profiles_reader(Cursor::new(shuffled), false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_hour_is_error() {
        let csv: String = full_csv().lines().take(24).map(|l| format!("{l}\n")).collect();
        let err = load_profiles_reader(Cursor::new(csv), false).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(msg) if msg.contains("hour 23")));
    }

    #[test]
    fn duplicate_hour_is_error() {
        let csv = format!("{}5,1.0,1,1\n", full_csv());
        assert!(load_profiles_reader(Cursor::new(csv), false).is_err());
    }

    #[test]
    fn negative_capacity_is_parse_error() {
        let csv = full_csv().replace("\n3,1,2,0\n", "\n3,1,-2,0\n");
        assert!(matches!(
            load_profiles_reader(Cursor::new(csv), false),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn negative_intensity_is_profile_error() {
        let csv = full_csv().replace("\n3,1,2,0\n", "\n3,-1,2,0\n");
        assert!(matches!(
            load_profiles_reader(Cursor::new(csv), false),
            Err(ScheduleError::Profile(_))
        ));
    }

    #[test]
    fn apply_overwrites_config_profiles() {
        let table = load_profiles_reader(Cursor::new(full_csv()), true).unwrap();
        let mut cfg = HotelConfig::default();
        table.apply_to(&mut cfg);
        assert_eq!(cfg.front_desk_staffing, table.front_desk);
        cfg.validate().unwrap();
    }
}
