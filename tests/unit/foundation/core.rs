use super::*;

#[test]
fn logical_size_to_device_scales_and_rounds() {
    let size = LogicalSize::new(300.0, 150.0);
    assert_eq!(size.to_device(2.0), (600, 300));
    assert_eq!(LogicalSize::new(10.4, 10.6).to_device(1.0), (10, 11));
}

#[test]
fn logical_size_rejects_garbage() {
    let size = LogicalSize::new(f64::NAN, -5.0);
    assert_eq!(size.width, 0.0);
    assert_eq!(size.height, 0.0);
    assert_eq!(LogicalSize::new(1e9, 1.0).to_device(1.0).0, u16::MAX);
}

#[test]
fn rgba_from_hex_variants() {
    assert_eq!(Rgba8::from_hex("#000").unwrap(), Rgba8::BLACK);
    assert_eq!(
        Rgba8::from_hex("#ff3366").unwrap(),
        Rgba8::new(0xff, 0x33, 0x66, 255)
    );
    assert_eq!(
        Rgba8::from_hex("#10203040").unwrap(),
        Rgba8::new(0x10, 0x20, 0x30, 0x40)
    );
    assert!(Rgba8::from_hex("000").is_err());
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzz").is_err());
}

#[test]
fn calendar_days_roundtrip_known_dates() {
    assert_eq!(
        CalendarDate::from_days(0),
        CalendarDate {
            year: 1970,
            month: 1,
            day: 1
        }
    );
    let leap = CalendarDate {
        year: 2024,
        month: 2,
        day: 29,
    };
    assert_eq!(CalendarDate::from_days(leap.to_days()), leap);
    assert_eq!(
        CalendarDate::from_days(-1),
        CalendarDate {
            year: 1969,
            month: 12,
            day: 31
        }
    );
}

#[test]
fn calendar_date_parse_and_display() {
    let d: CalendarDate = "2026-10-16".parse().unwrap();
    assert_eq!(d.to_string(), "2026-10-16");
    assert!("2026-02-30".parse::<CalendarDate>().is_err());
    assert!("2026-13-01".parse::<CalendarDate>().is_err());
    assert!("yesterday".parse::<CalendarDate>().is_err());
}

#[test]
fn timestamp_display_is_utc() {
    // 2021-01-01T00:00:00Z plus 1h 2m 3s.
    let ts = Timestamp(1_609_459_200_000 + 3_723_000);
    assert_eq!(ts.to_string(), "2021-01-01 01:02:03 UTC");
    assert_eq!(ts.date().to_string(), "2021-01-01");
}
