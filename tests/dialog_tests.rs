//! State machine tests
//!
//! Drives the login and booking conversations without any transport or store.

use chrono::NaiveDate;
use nuga_booking_bot::core::dialog::{
    ASK_CLIENT_NAME, ASK_CLIENT_PHONE, ASK_DATE, ASK_LOGIN_PHONE, ASK_PASSWORD, ASK_TIME,
    BookingDraft, BookingStep, Dialog, Effect, Keyboard, LoginStep, Reply, TIME_SLOTS,
    Transition, date_options, time_options,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn only_reply(transition: &Transition) -> &Reply {
    match transition.effects.as_slice() {
        [Effect::Reply(reply)] => reply,
        other => panic!("expected a single reply, got {other:?}"),
    }
}

/// Feeds every input in order and returns the last transition.
fn run(mut transition: Transition, inputs: &[&str]) -> Transition {
    for input in inputs {
        let dialog = transition.next.expect("conversation ended early");
        transition = dialog.step(input);
    }
    transition
}

#[test]
fn test_login_asks_for_phone_then_password() {
    let start = Dialog::begin_login();
    assert_eq!(start.next, Some(Dialog::Login(LoginStep::AwaitingPhone)));
    assert_eq!(only_reply(&start).text, ASK_LOGIN_PHONE);

    let after_phone = run(start, &["  +7 900 000 00 00 "]);
    assert_eq!(
        after_phone.next,
        Some(Dialog::Login(LoginStep::AwaitingPassword {
            phone: "+7 900 000 00 00".to_owned()
        }))
    );
    assert_eq!(only_reply(&after_phone).text, ASK_PASSWORD);
}

#[test]
fn test_login_ends_with_trimmed_credentials() {
    let done = run(Dialog::begin_login(), &["79000000000", " secret \n"]);

    assert_eq!(done.next, None);
    assert_eq!(
        done.effects,
        vec![Effect::Authenticate {
            phone: "79000000000".to_owned(),
            password: "secret".to_owned()
        }]
    );
}

#[test]
fn test_login_accepts_empty_phone() {
    let after_phone = run(Dialog::begin_login(), &["   "]);

    assert_eq!(
        after_phone.next,
        Some(Dialog::Login(LoginStep::AwaitingPassword {
            phone: String::new()
        }))
    );
}

#[test]
fn test_booking_collects_fields_in_order() {
    let today = day(2026, 10, 17);
    let start = Dialog::begin_booking(today);
    assert_eq!(only_reply(&start).text, ASK_CLIENT_NAME);

    let after_name = run(start.clone(), &[" Anna "]);
    assert_eq!(only_reply(&after_name).text, ASK_CLIENT_PHONE);
    assert_eq!(
        after_name.next,
        Some(Dialog::Booking {
            opened_on: today,
            step: BookingStep::AwaitingPhone {
                name: "Anna".to_owned()
            }
        })
    );

    let after_phone = run(start.clone(), &["Anna", "89001234567"]);
    let reply = only_reply(&after_phone);
    assert_eq!(reply.text, ASK_DATE);
    assert_eq!(reply.keyboard, Keyboard::Options(date_options(today)));

    let after_date = run(start, &["Anna", "89001234567", "2026-10-18"]);
    let reply = only_reply(&after_date);
    assert_eq!(reply.text, ASK_TIME);
    assert_eq!(reply.keyboard, Keyboard::Options(time_options()));
}

#[test]
fn test_booking_finishes_with_draft() {
    let done = run(
        Dialog::begin_booking(day(2026, 10, 17)),
        &["Anna", "89001234567", "2026-10-19", "10:40"],
    );

    assert_eq!(done.next, None);
    let expected = BookingDraft {
        name: "Anna".to_owned(),
        phone: "89001234567".to_owned(),
        date: "2026-10-19".to_owned(),
        time: "10:40".to_owned(),
    };
    assert_eq!(done.effects, vec![Effect::RecordBooking(expected.clone())]);
    assert_eq!(expected.datetime(), "2026-10-19 10:40");
}

#[test]
fn test_booking_keeps_free_typed_date_and_time() {
    let done = run(
        Dialog::begin_booking(day(2026, 10, 17)),
        &["Anna", "123", "next friday", "around noon"],
    );

    match done.effects.as_slice() {
        [Effect::RecordBooking(draft)] => {
            assert_eq!(draft.datetime(), "next friday around noon");
        }
        other => panic!("expected a booking, got {other:?}"),
    }
}

#[test]
fn test_date_options_are_seven_consecutive_days() {
    let options = date_options(day(2026, 12, 28));

    assert_eq!(
        options,
        vec![
            "2026-12-28",
            "2026-12-29",
            "2026-12-30",
            "2026-12-31",
            "2027-01-01",
            "2027-01-02",
            "2027-01-03",
        ]
    );
}

#[test]
fn test_date_options_cross_leap_day() {
    let options = date_options(day(2028, 2, 27));

    assert_eq!(options.len(), 7);
    assert_eq!(options[2], "2028-02-29");
    assert_eq!(options[3], "2028-03-01");
}

#[test]
fn test_dates_count_from_the_day_the_booking_opened() {
    let opened_on = day(2026, 10, 17);
    let after_phone = run(Dialog::begin_booking(opened_on), &["Anna", "123"]);

    match &only_reply(&after_phone).keyboard {
        Keyboard::Options(options) => assert_eq!(options[0], "2026-10-17"),
        other => panic!("expected options, got {other:?}"),
    }
}

#[test]
fn test_time_options_are_fixed_slots() {
    assert_eq!(
        time_options(),
        vec![
            "8:00", "8:40", "9:20", "10:00", "10:40", "11:20", "12:00", "12:40", "13:20", "14:00",
            "14:40",
        ]
    );
    assert_eq!(TIME_SLOTS.len(), 11);
}

#[test]
fn test_confirmation_echoes_all_fields() {
    let draft = BookingDraft {
        name: "Anna".to_owned(),
        phone: "89001234567".to_owned(),
        date: "2026-10-19".to_owned(),
        time: "9:20".to_owned(),
    };

    let text = draft.confirmation();
    assert!(text.contains("Name: Anna"));
    assert!(text.contains("Phone: 89001234567"));
    assert!(text.contains("Date and time: 2026-10-19 9:20"));
}
