//! Login and booking conversations as explicit state machines.
//!
//! Nothing in here talks to Telegram or to the database. A step consumes one
//! text input and yields the next state together with the effects the caller
//! has to carry out (replies to send, credentials to check, a booking to store).

use chrono::{Days, NaiveDate};

/// Appointment slots offered once a date has been picked, 40 minutes apart.
pub const TIME_SLOTS: [&str; 11] = [
    "8:00", "8:40", "9:20", "10:00", "10:40", "11:20", "12:00", "12:40", "13:20", "14:00", "14:40",
];

/// Number of consecutive calendar days offered as appointment dates.
pub const DATE_OPTION_COUNT: u64 = 7;

/// Maximum number of bookings printed by `/list`.
pub const LIST_LIMIT: u32 = 20;

pub const WELCOME_TEXT: &str = "Hi! I register clients in the Nuga Best CRM.\n\
You need to log in first: use /login.\n\
Commands available after login:\n\
/new - add a client\n\
/list - show recent clients\n\
/cancel - cancel the current input\n\
/help - show this help";

pub const HELP_TEXT: &str = "Available commands:\n\
/login - log in\n\
/new - add a client\n\
/list - show recent clients\n\
/cancel - cancel the current input\n\
/help - show this help";

pub const ASK_LOGIN_PHONE: &str = "Enter your phone number:";
pub const ASK_PASSWORD: &str = "Enter your password:";
pub const LOGIN_SUCCEEDED: &str = "✅ Logged in! You can now use the client commands.";
pub const LOGIN_FAILED: &str = "❌ Invalid phone or password. Try again with /login.";
pub const LOGIN_REQUIRED: &str = "Log in first with /login";
pub const ASK_CLIENT_NAME: &str = "Enter the client's name:";
pub const ASK_CLIENT_PHONE: &str = "Enter the client's phone number:";
pub const ASK_DATE: &str = "Choose the appointment date:";
pub const ASK_TIME: &str = "Choose the appointment time:";
pub const CANCELLED: &str = "Input cancelled.";
pub const NO_RECORDS: &str = "No records.";
pub const LIST_HEADER: &str = "Latest client bookings:";

/// Telegram user behind a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(pub u64);

/// One conversation is one participant in one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub chat_id: i64,
    pub participant: ParticipantId,
}

/// What a participant sent, after the transport has routed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Help,
    Login,
    NewBooking,
    ListBookings,
    Cancel,
    Text(String),
}

/// Suggested replies attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Keyboard {
    #[default]
    Unchanged,
    /// One-shot list of suggestions; the participant may still type anything.
    Options(Vec<String>),
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            keyboard: Keyboard::Unchanged,
        }
    }

    pub fn with_options(text: impl Into<String>, options: Vec<String>) -> Self {
        Reply {
            text: text.into(),
            keyboard: Keyboard::Options(options),
        }
    }

    pub fn removing_keyboard(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            keyboard: Keyboard::Remove,
        }
    }
}

/// Fields collected by a finished booking conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
}

impl BookingDraft {
    /// Date and time joined by a single space, exactly as typed or picked.
    pub fn datetime(&self) -> String {
        format!("{} {}", self.date, self.time)
    }

    pub fn confirmation(&self) -> String {
        format!(
            "✅ Client booked!\nName: {}\nPhone: {}\nDate and time: {}",
            self.name,
            self.phone,
            self.datetime()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    AwaitingPhone,
    AwaitingPassword { phone: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStep {
    AwaitingName,
    AwaitingPhone {
        name: String,
    },
    AwaitingDate {
        name: String,
        phone: String,
    },
    AwaitingTime {
        name: String,
        phone: String,
        date: String,
    },
}

/// A conversation in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Login(LoginStep),
    Booking {
        /// Day the booking was started; the offered dates count from here.
        opened_on: NaiveDate,
        step: BookingStep,
    },
}

/// Work the caller must perform after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    /// Check the credentials and, on a match, open a session for the phone.
    Authenticate { phone: String, password: String },
    /// Persist the booking and confirm it, or report the store failure.
    RecordBooking(BookingDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// `None` once the conversation has ended.
    pub next: Option<Dialog>,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn ask(next: Dialog, reply: Reply) -> Self {
        Transition {
            next: Some(next),
            effects: vec![Effect::Reply(reply)],
        }
    }

    fn finish(effect: Effect) -> Self {
        Transition {
            next: None,
            effects: vec![effect],
        }
    }
}

impl Dialog {
    pub fn begin_login() -> Transition {
        Transition::ask(
            Dialog::Login(LoginStep::AwaitingPhone),
            Reply::text(ASK_LOGIN_PHONE),
        )
    }

    /// Callers must check the session before opening a booking conversation.
    pub fn begin_booking(today: NaiveDate) -> Transition {
        Transition::ask(
            Dialog::Booking {
                opened_on: today,
                step: BookingStep::AwaitingName,
            },
            Reply::text(ASK_CLIENT_NAME),
        )
    }

    /// Feeds one text message into the conversation.
    pub fn step(self, text: &str) -> Transition {
        match self {
            Dialog::Login(step) => login_step(step, text),
            Dialog::Booking { opened_on, step } => booking_step(opened_on, step, text),
        }
    }
}

fn login_step(step: LoginStep, text: &str) -> Transition {
    match step {
        LoginStep::AwaitingPhone => Transition::ask(
            Dialog::Login(LoginStep::AwaitingPassword {
                phone: text.trim().to_owned(),
            }),
            Reply::text(ASK_PASSWORD),
        ),
        LoginStep::AwaitingPassword { phone } => Transition::finish(Effect::Authenticate {
            phone,
            password: text.trim().to_owned(),
        }),
    }
}

fn booking_step(opened_on: NaiveDate, step: BookingStep, text: &str) -> Transition {
    let booking = |step| Dialog::Booking { opened_on, step };

    match step {
        BookingStep::AwaitingName => Transition::ask(
            booking(BookingStep::AwaitingPhone {
                name: text.trim().to_owned(),
            }),
            Reply::text(ASK_CLIENT_PHONE),
        ),
        BookingStep::AwaitingPhone { name } => Transition::ask(
            booking(BookingStep::AwaitingDate {
                name,
                phone: text.trim().to_owned(),
            }),
            Reply::with_options(ASK_DATE, date_options(opened_on)),
        ),
        // Date and time are stored as received, picked from the keyboard or not.
        BookingStep::AwaitingDate { name, phone } => Transition::ask(
            booking(BookingStep::AwaitingTime {
                name,
                phone,
                date: text.to_owned(),
            }),
            Reply::with_options(ASK_TIME, time_options()),
        ),
        BookingStep::AwaitingTime { name, phone, date } => {
            Transition::finish(Effect::RecordBooking(BookingDraft {
                name,
                phone,
                date,
                time: text.to_owned(),
            }))
        }
    }
}

/// `today` and the six following days as `YYYY-MM-DD`.
pub fn date_options(today: NaiveDate) -> Vec<String> {
    (0..DATE_OPTION_COUNT)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect()
}

pub fn time_options() -> Vec<String> {
    TIME_SLOTS.iter().map(|slot| slot.to_string()).collect()
}
