//! Outcome of a scenario run

use std::fmt;

use reqwest::StatusCode;

/// The five steps of the scenario, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    LoginPage,
    Login,
    FetchRecord,
    UpdateRecord,
    VerifyRecord,
}

impl Step {
    /// 1-based position in the run
    pub fn number(self) -> usize {
        match self {
            Step::LoginPage => 1,
            Step::Login => 2,
            Step::FetchRecord => 3,
            Step::UpdateRecord => 4,
            Step::VerifyRecord => 5,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::LoginPage => "login page",
            Step::Login => "login",
            Step::FetchRecord => "fetch record",
            Step::UpdateRecord => "update record",
            Step::VerifyRecord => "verify record",
        };
        f.write_str(name)
    }
}

/// Why a run that reached the service did not pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Login was required and the credentials callback was not 2xx
    LoginRejected { status: StatusCode },
    /// A checkpoint answered with something other than 200
    UnexpectedStatus { step: Step, status: StatusCode },
    /// The update was accepted but the record reads back a different year
    YearMismatch { expected: i64, observed: Option<i64> },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::LoginRejected { status } => {
                write!(f, "login rejected with status {}", status)
            }
            Failure::UnexpectedStatus { step, status } => {
                write!(f, "{} returned status {}, expected 200", step, status)
            }
            Failure::YearMismatch { expected, observed } => write!(
                f,
                "year is still {}, expected {}",
                display_year(*observed),
                expected
            ),
        }
    }
}

/// Result of one run against the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub record_id: u64,
    pub passed: bool,
    pub steps_run: usize,
    /// Whether the credentials callback answered 2xx, once it has run
    pub login_accepted: Option<bool>,
    pub previous_year: Option<i64>,
    pub expected_year: Option<i64>,
    pub observed_year: Option<i64>,
    pub failure: Option<Failure>,
}

impl ScenarioReport {
    pub(crate) fn new(record_id: u64) -> Self {
        Self {
            record_id,
            passed: false,
            steps_run: 0,
            login_accepted: None,
            previous_year: None,
            expected_year: None,
            observed_year: None,
            failure: None,
        }
    }

    pub(crate) fn fail(mut self, failure: Failure) -> Self {
        self.passed = false;
        self.failure = Some(failure);
        self
    }

    pub(crate) fn pass(mut self) -> Self {
        self.passed = true;
        self.failure = None;
        self
    }
}

/// Render a possibly missing year the way the report prints it
pub(crate) fn display_year(year: Option<i64>) -> String {
    match year {
        Some(year) => year.to_string(),
        None => "none".to_string(),
    }
}
