//! Line-oriented command session over a [`Ledger`].
//!
//! A session reads one command per line (`admit`, `release`, `list`,
//! `report`), applies it to the ledger and writes a console message for each.
//! Ledger rejections (full, duplicate, not found) are reported and the session
//! carries on. Malformed input stops the session with an error naming the line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::{InputError, LedgerError};
use crate::core::ledger::{IncomeReport, Ledger, Occupancy, Receipt};
use crate::core::tariff::Category;
use crate::core::vehicle::{Plate, Vehicle};
use crate::io::clock::Clock;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Admit {
        plate: Plate,
        category: Category,
        discount_card: Option<String>,
    },
    Release {
        plate: Plate,
    },
    List,
    Report,
}

/// Parse a single input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "admit" => {
            let plate = required(&mut words, "admit", "plate")?;
            let category = required(&mut words, "admit", "category")?;
            let discount_card = words.next().map(str::to_string);
            reject_extra(&mut words, "admit")?;
            Command::Admit {
                plate: Plate::new(plate)?,
                category: category.parse()?,
                discount_card,
            }
        }
        "release" => {
            let plate = required(&mut words, "release", "plate")?;
            reject_extra(&mut words, "release")?;
            Command::Release {
                plate: Plate::new(plate)?,
            }
        }
        "list" => {
            reject_extra(&mut words, "list")?;
            Command::List
        }
        "report" => {
            reject_extra(&mut words, "report")?;
            Command::Report
        }
        _ => return Err(InputError::UnknownCommand(name.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, InputError> {
    words
        .next()
        .ok_or(InputError::MissingArgument { command, argument })
}

fn reject_extra<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(), InputError> {
    match words.next() {
        Some(extra) => Err(InputError::UnexpectedArgument {
            command,
            argument: extra.to_string(),
        }),
        None => Ok(()),
    }
}

/// What happened when a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Admitted(Plate),
    Released(Receipt),
    Rejected(LedgerError),
    Occupants(Occupancy),
    Income(IncomeReport),
}

#[derive(Serialize)]
struct OccupantsView<'a> {
    total: usize,
    plates: &'a [Plate],
}

impl Outcome {
    /// Console text for this outcome, without a trailing newline.
    ///
    /// With `json`, occupant listings and income reports are emitted as JSON
    /// objects; the other outcomes are always plain text.
    pub fn render(&self, json: bool) -> Result<String> {
        let text = match self {
            Outcome::Admitted(plate) => format!("Welcome to the parking lot! - PLATE:{plate} -"),
            Outcome::Released(receipt) => format!(
                "{}: your fee is ${}. Come back soon",
                receipt.plate, receipt.fee
            ),
            Outcome::Rejected(LedgerError::Full { .. }) => {
                "Sorry, the check-in failed (parking is full)".to_string()
            }
            Outcome::Rejected(LedgerError::Duplicate { .. }) => {
                "Sorry, the check-in failed (vehicle already inside)".to_string()
            }
            Outcome::Rejected(LedgerError::NotFound { plate }) => {
                format!("Sorry, the check-out failed ({plate} is not parked)")
            }
            Outcome::Rejected(err @ LedgerError::IncomeOverflow { .. }) => {
                format!("Sorry, the check-out failed ({err})")
            }
            Outcome::Occupants(occupancy) if json => {
                let plates: &[Plate] = match occupancy {
                    Occupancy::Empty => &[],
                    Occupancy::Parked(plates) => plates,
                };
                serde_json::to_string(&OccupantsView {
                    total: plates.len(),
                    plates,
                })
                .context("serialize occupants")?
            }
            Outcome::Occupants(Occupancy::Empty) => {
                "There are no vehicles in the parking lot".to_string()
            }
            Outcome::Occupants(Occupancy::Parked(plates)) => {
                let mut text = format!("Total vehicles: {}", plates.len());
                for plate in plates {
                    text.push('\n');
                    text.push_str(plate.as_str());
                }
                text
            }
            Outcome::Income(report) if json => {
                serde_json::to_string(report).context("serialize income report")?
            }
            Outcome::Income(report) => format!(
                "{} vehicles have checked out and have earnings of ${}",
                report.vehicles_checked_out, report.total_earnings
            ),
        };
        Ok(text)
    }
}

/// Counters collected over a scripted run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub rejected: usize,
}

/// A ledger bound to a clock and an output mode.
pub struct Session<C: Clock> {
    ledger: Ledger,
    clock: C,
    json: bool,
}

impl<C: Clock> Session<C> {
    pub fn new(ledger: Ledger, clock: C, json: bool) -> Self {
        Self {
            ledger,
            clock,
            json,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply a command to the ledger. Admitted vehicles are stamped with the
    /// clock's current time.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Admit {
                plate,
                category,
                discount_card,
            } => {
                let vehicle = Vehicle {
                    plate: plate.clone(),
                    category,
                    check_in: self.clock.now(),
                    discount_card,
                };
                match self.ledger.admit(vehicle) {
                    Ok(()) => Outcome::Admitted(plate),
                    Err(err) => Outcome::Rejected(err),
                }
            }
            Command::Release { plate } => {
                match self.ledger.release(plate.as_str(), self.clock.now()) {
                    Ok(receipt) => Outcome::Released(receipt),
                    Err(err) => Outcome::Rejected(err),
                }
            }
            Command::List => Outcome::Occupants(self.ledger.occupants()),
            Command::Report => Outcome::Income(self.ledger.income()),
        }
    }

    /// Execute a command and write its rendered outcome as one line.
    pub fn execute_and_print<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Outcome> {
        let outcome = self.execute(command);
        writeln!(out, "{}", outcome.render(self.json)?).context("write outcome")?;
        Ok(outcome)
    }

    /// Run every command in `input`, writing one message per command to `out`.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<SessionSummary> {
        info!(capacity = self.ledger.capacity(), "session started");
        let mut summary = SessionSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line.with_context(|| format!("read line {line_no}"))?;
            let Some(command) =
                parse_command(&line).with_context(|| format!("line {line_no}: {}", line.trim()))?
            else {
                continue;
            };

            debug!(line_no, ?command, "executing command");
            let outcome = self.execute_and_print(command, out)?;
            summary.commands += 1;
            if matches!(outcome, Outcome::Rejected(_)) {
                summary.rejected += 1;
            }
        }

        info!(
            commands = summary.commands,
            rejected = summary.rejected,
            "session finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;

    fn session(capacity: usize) -> Session<FixedClock> {
        Session::new(
            Ledger::new(capacity).expect("ledger"),
            FixedClock::new(),
            false,
        )
    }

    fn plate(raw: &str) -> Plate {
        Plate::new(raw).expect("plate")
    }

    #[test]
    fn parse_admit_with_discount_card() {
        let command = parse_command("admit AA111AA car DISCOUNT_CARD_001").expect("parse");
        assert_eq!(
            command,
            Some(Command::Admit {
                plate: plate("AA111AA"),
                category: Category::Car,
                discount_card: Some("DISCOUNT_CARD_001".to_string()),
            })
        );
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        assert_eq!(parse_command("   ").expect("parse"), None);
        assert_eq!(parse_command("# seed vehicles").expect("parse"), None);
    }

    #[test]
    fn parse_is_case_insensitive_for_command_names() {
        assert_eq!(parse_command("LIST").expect("parse"), Some(Command::List));
    }

    #[test]
    fn parse_reports_input_errors() {
        assert_eq!(
            parse_command("release"),
            Err(InputError::MissingArgument {
                command: "release",
                argument: "plate",
            })
        );
        assert_eq!(
            parse_command("admit AA111AA truck"),
            Err(InputError::UnknownCategory("truck".to_string()))
        );
        assert_eq!(
            parse_command("report now"),
            Err(InputError::UnexpectedArgument {
                command: "report",
                argument: "now".to_string(),
            })
        );
        assert_eq!(
            parse_command("park AA111AA"),
            Err(InputError::UnknownCommand("park".to_string()))
        );
    }

    #[test]
    fn release_uses_clock_time() {
        let mut session = session(5);
        session.execute(Command::Admit {
            plate: plate("AA111AA"),
            category: Category::Car,
            discount_card: None,
        });
        session.clock().advance_minutes(136);

        let outcome = session.execute(Command::Release {
            plate: plate("AA111AA"),
        });
        match outcome {
            Outcome::Released(receipt) => {
                assert_eq!(receipt.parked_minutes, 136);
                assert_eq!(receipt.fee, 30);
            }
            other => panic!("expected release, got {other:?}"),
        }
    }

    #[test]
    fn rejections_render_console_messages() {
        let full = Outcome::Rejected(LedgerError::Full { capacity: 1 });
        assert_eq!(
            full.render(false).expect("render"),
            "Sorry, the check-in failed (parking is full)"
        );
        let missing = Outcome::Rejected(LedgerError::NotFound {
            plate: "ZZ1".to_string(),
        });
        assert_eq!(
            missing.render(true).expect("render"),
            "Sorry, the check-out failed (ZZ1 is not parked)"
        );
        let overflow = Outcome::Rejected(LedgerError::IncomeOverflow {
            plate: "A1".to_string(),
            fee: 20,
        });
        assert_eq!(
            overflow.render(false).expect("render"),
            "Sorry, the check-out failed (total earnings would overflow charging 20 for A1)"
        );
    }

    #[test]
    fn json_rendering_for_listing_and_report() {
        let empty = Outcome::Occupants(Occupancy::Empty);
        assert_eq!(
            empty.render(true).expect("render"),
            r#"{"total":0,"plates":[]}"#
        );

        let parked = Outcome::Occupants(Occupancy::Parked(vec![plate("A1"), plate("B2")]));
        assert_eq!(
            parked.render(true).expect("render"),
            r#"{"total":2,"plates":["A1","B2"]}"#
        );

        let income = Outcome::Income(IncomeReport {
            vehicles_checked_out: 2,
            total_earnings: 42,
        });
        assert_eq!(
            income.render(true).expect("render"),
            r#"{"vehicles_checked_out":2,"total_earnings":42}"#
        );
    }

    #[test]
    fn run_script_reports_and_continues_past_rejections() {
        let mut session = session(1);
        let script = "\
admit AA111AA car
admit B222BBB moto
release ZZ999ZZ
list
release AA111AA
list
report
";
        let mut out = Vec::new();
        let summary = session
            .run_script(script.as_bytes(), &mut out)
            .expect("run script");

        assert_eq!(
            summary,
            SessionSummary {
                commands: 7,
                rejected: 2,
            }
        );
        let out = String::from_utf8(out).expect("utf8");
        let expected = "\
Welcome to the parking lot! - PLATE:AA111AA -
Sorry, the check-in failed (parking is full)
Sorry, the check-out failed (ZZ999ZZ is not parked)
Total vehicles: 1
AA111AA
AA111AA: your fee is $20. Come back soon
There are no vehicles in the parking lot
1 vehicles have checked out and have earnings of $20
";
        assert_eq!(out, expected);
    }

    #[test]
    fn run_script_stops_on_input_error_with_line_number() {
        let mut session = session(2);
        let script = "admit AA111AA car\n\nadmit B222BBB plane\nlist\n";
        let mut out = Vec::new();
        let err = session
            .run_script(script.as_bytes(), &mut out)
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("unknown vehicle category 'plane'"), "{message}");
        assert_eq!(session.ledger().len(), 1);
    }
}
