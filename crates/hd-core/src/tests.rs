//! Unit tests for hd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GuestId, RoomId};

    #[test]
    fn index_roundtrip() {
        let id = RoomId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(RoomId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RoomId(0) < RoomId(1));
        assert!(GuestId(100) > GuestId(99));
    }

    #[test]
    fn display() {
        assert_eq!(GuestId(7).to_string(), "GuestId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn day_and_hour() {
        let t = SimTime::at(2, 15.5);
        assert_eq!(t.hours(), 63.5);
        assert_eq!(t.day(), 2);
        assert_eq!(t.hour_of_day(), 15.5);
        assert_eq!(t.hour_slot(), 15);
    }

    #[test]
    fn next_hour_boundary_is_strictly_later() {
        assert_eq!(SimTime(3.0).next_hour_boundary(), SimTime(4.0));
        assert_eq!(SimTime(3.25).next_hour_boundary(), SimTime(4.0));
    }

    #[test]
    fn ordering_is_total() {
        let mut v = vec![SimTime(5.0), SimTime(1.5), SimTime(3.0)];
        v.sort();
        assert_eq!(v, vec![SimTime(1.5), SimTime(3.0), SimTime(5.0)]);
        assert_eq!(SimTime(2.0) - SimTime(0.5), 1.5);
        assert_eq!(SimTime(2.0) + 0.5, SimTime(2.5));
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::at(3, 14.5).to_string(), "D3 14:30");
        assert_eq!(SimTime::ZERO.to_string(), "D0 00:00");
    }
}

#[cfg(test)]
mod profile {
    use crate::{CapacityProfile, IntensityProfile, ProfileError, SimTime};

    #[test]
    fn shifts_cover_expected_hours() {
        let p = CapacityProfile::from_shifts(&[(9, 17, 12)], 0);
        assert_eq!(p.at_slot(8), 0);
        assert_eq!(p.at_slot(9), 12);
        assert_eq!(p.at_slot(16), 12);
        assert_eq!(p.at_slot(17), 0);
    }

    #[test]
    fn overnight_shift_wraps() {
        let p = CapacityProfile::from_shifts(&[(22, 6, 1)], 4);
        assert_eq!(p.at_slot(23), 1);
        assert_eq!(p.at_slot(0), 1);
        assert_eq!(p.at_slot(5), 1);
        assert_eq!(p.at_slot(6), 4);
        assert_eq!(p.at_slot(21), 4);
    }

    #[test]
    fn lookup_wraps_across_days() {
        let p = CapacityProfile::from_shifts(&[(9, 17, 12)], 0);
        assert_eq!(p.at(SimTime::at(5, 10.0)), 12);
        assert_eq!(p.at(SimTime(24.0 * 5.0 + 3.0)), 0);
    }

    #[test]
    fn capacity_hours_integrates_segments() {
        let p = CapacityProfile::from_shifts(&[(9, 17, 12)], 0);
        // One full day: 8 h * 12 cleaners.
        assert_eq!(p.capacity_hours(SimTime(0.0), SimTime(24.0)), 96.0);
        // Partial segments at both ends: 8.5 → 9.5 covers half an idle hour
        // and half a staffed one.
        assert!((p.capacity_hours(SimTime(8.5), SimTime(9.5)) - 6.0).abs() < 1e-12);
        assert_eq!(p.capacity_hours(SimTime(5.0), SimTime(5.0)), 0.0);
    }

    #[test]
    fn capacity_from_vec_checks_length() {
        assert_eq!(
            CapacityProfile::try_from(vec![1; 23]),
            Err(ProfileError::WrongLength(23))
        );
        assert!(CapacityProfile::try_from(vec![1; 24]).is_ok());
    }

    #[test]
    fn intensity_rejects_negative_and_nan() {
        let mut slots = [1.0; 24];
        slots[5] = -0.5;
        assert!(matches!(
            IntensityProfile::new(slots),
            Err(ProfileError::InvalidValue { hour: 5, .. })
        ));
        slots[5] = f64::NAN;
        assert!(IntensityProfile::new(slots).is_err());
    }

    #[test]
    fn normalized_sums_to_one() {
        let mut w = [1.0; 24];
        w[14] = 25.0;
        let p = IntensityProfile::normalized(w).unwrap();
        assert!((p.sum() - 1.0).abs() < 1e-12);
        assert_eq!(p.max(), p.at_slot(14));
    }

    #[test]
    fn normalized_all_zero_stays_zero() {
        let p = IntensityProfile::normalized([0.0; 24]).unwrap();
        assert_eq!(p.sum(), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, DurationSpec, HotelConfig, RoomRetryPolicy};

    #[test]
    fn default_is_valid() {
        HotelConfig::default().validate().unwrap();
    }

    #[test]
    fn default_reference_staffing() {
        let cfg = HotelConfig::default();
        assert_eq!(cfg.front_desk_staffing.at_slot(3), 2);
        assert_eq!(cfg.front_desk_staffing.at_slot(10), 3);
        assert_eq!(cfg.front_desk_staffing.at_slot(15), 6);
        assert_eq!(cfg.front_desk_staffing.at_slot(22), 3);
        assert_eq!(cfg.housekeeping_staffing.at_slot(12), 12);
        assert_eq!(cfg.housekeeping_staffing.at_slot(18), 0);
        assert!((cfg.arrival_profile.sum() - 1.0).abs() < 1e-12);
    }

    fn field_of(cfg: &HotelConfig) -> &'static str {
        cfg.validate().unwrap_err().field()
    }

    #[test]
    fn zero_rooms_rejected() {
        let cfg = HotelConfig { room_count: 0, ..HotelConfig::default() };
        assert_eq!(field_of(&cfg), "room_count");
    }

    #[test]
    fn warmup_must_fit_in_horizon() {
        let cfg = HotelConfig { horizon_hours: 24.0, warmup_hours: 24.0, ..HotelConfig::default() };
        assert_eq!(field_of(&cfg), "warmup_hours");
    }

    #[test]
    fn non_positive_duration_rejected() {
        let cfg = HotelConfig {
            cleaning: DurationSpec::Fixed { minutes: 0.0 },
            ..HotelConfig::default()
        };
        assert_eq!(field_of(&cfg), "cleaning");

        let cfg = HotelConfig {
            front_desk_service: DurationSpec::Triangular { min: 5.0, mode: 3.0, max: 10.0 },
            ..HotelConfig::default()
        };
        assert_eq!(field_of(&cfg), "front_desk_service");
    }

    #[test]
    fn hours_out_of_range_rejected() {
        let cfg = HotelConfig { checkin_hour: 24.0, ..HotelConfig::default() };
        assert_eq!(field_of(&cfg), "checkin_hour");
        let cfg = HotelConfig { checkout_hour: -1.0, ..HotelConfig::default() };
        assert_eq!(field_of(&cfg), "checkout_hour");
    }

    #[test]
    fn fraction_and_retry_checked() {
        let cfg = HotelConfig { early_checkin_fraction: 1.5, ..HotelConfig::default() };
        assert_eq!(field_of(&cfg), "early_checkin_fraction");
        let cfg = HotelConfig {
            room_retry: RoomRetryPolicy::Periodic { interval_hours: 0.0 },
            ..HotelConfig::default()
        };
        assert_eq!(field_of(&cfg), "room_retry");
    }

    #[test]
    fn error_message_names_field() {
        let err = ConfigError::Invalid { field: "room_count", reason: "must be > 0".into() };
        assert_eq!(err.to_string(), "invalid `room_count`: must be > 0");
    }

    #[test]
    fn duration_means() {
        assert_eq!(DurationSpec::Triangular { min: 3.0, mode: 6.0, max: 9.0 }.mean_minutes(), 6.0);
        assert_eq!(DurationSpec::LogNormal { mean: 35.0, sigma: 0.5 }.mean_minutes(), 35.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_partial_config_uses_defaults() {
        let cfg: HotelConfig = serde_json::from_str(
            r#"{ "room_count": 50, "cleaning": { "kind": "fixed", "minutes": 30.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.room_count, 50);
        assert_eq!(cfg.cleaning, DurationSpec::Fixed { minutes: 30.0 });
        assert_eq!(cfg.seed, HotelConfig::default().seed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_short_profile_rejected() {
        let result: Result<HotelConfig, _> =
            serde_json::from_str(r#"{ "front_desk_staffing": [1, 2, 3] }"#);
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{Stream, StreamRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = StreamRng::new(12345, Stream::Arrivals);
        let mut r2 = StreamRng::new(12345, Stream::Arrivals);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn streams_differ() {
        let mut a = StreamRng::new(1, Stream::FrontDesk);
        let mut b = StreamRng::new(1, Stream::Cleaning);
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_ne!(x, y, "named streams should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = StreamRng::new(0, Stream::GuestMix);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
