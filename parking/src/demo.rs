//! Embedded sample run: seeds vehicles, checks two out, prints the results.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::tariff::Category;
use crate::core::vehicle::Plate;
use crate::io::clock::Clock;
use crate::session::{Command, Session};

/// Sample fleet: plate, category, discount card.
const SAMPLE_VEHICLES: [(&str, Category, Option<&str>); 21] = [
    ("AA111AA", Category::Car, Some("DISCOUNT_CARD_001")),
    ("B222BBB", Category::Moto, None),
    ("CC333CC", Category::MiniBus, None),
    ("DD444DD", Category::Bus, Some("DISCOUNT_CARD_002")),
    ("AA111BB", Category::Car, Some("DISCOUNT_CARD_003")),
    ("B222CCC", Category::Moto, Some("DISCOUNT_CARD_004")),
    ("CC333DD", Category::MiniBus, None),
    ("DD444EE", Category::Bus, Some("DISCOUNT_CARD_005")),
    ("AA111CC", Category::Car, None),
    ("B222DDD", Category::Moto, None),
    ("CC333EE", Category::MiniBus, None),
    ("DD444GG", Category::Bus, Some("DISCOUNT_CARD_006")),
    ("AA111DD", Category::Car, Some("DISCOUNT_CARD_007")),
    ("B222EEE", Category::Moto, None),
    ("CC333FF", Category::MiniBus, None),
    ("CC334FF", Category::MiniBus, None),
    ("CC335FF", Category::MiniBus, None),
    ("CC336FF", Category::MiniBus, None),
    ("CC337FF", Category::MiniBus, None),
    ("CC338FF", Category::MiniBus, None),
    ("CC339FF", Category::MiniBus, None),
];

/// Positions in [`SAMPLE_VEHICLES`] checked out by the demo.
const RELEASED: [usize; 2] = [0, 2];

/// Run the sample scenario against `session`, writing console output to `out`.
pub fn run_demo<C: Clock, W: Write>(session: &mut Session<C>, out: &mut W) -> Result<()> {
    info!(
        vehicles = SAMPLE_VEHICLES.len(),
        capacity = session.ledger().capacity(),
        "running demo"
    );

    heading(out, "CHECK IN")?;
    for (plate, category, card) in SAMPLE_VEHICLES {
        let command = Command::Admit {
            plate: Plate::new(plate)?,
            category,
            discount_card: card.map(str::to_string),
        };
        session.execute_and_print(command, out)?;
    }

    heading(out, "CHECK OUT")?;
    for index in RELEASED {
        let (plate, _, _) = SAMPLE_VEHICLES[index];
        let command = Command::Release {
            plate: Plate::new(plate)?,
        };
        session.execute_and_print(command, out)?;
    }

    heading(out, "VEHICLES IN THE PARKING")?;
    session.execute_and_print(Command::List, out)?;

    heading(out, "NUMBER OF RETIRED VEHICLES AND EARNINGS")?;
    session.execute_and_print(Command::Report, out)?;
    Ok(())
}

fn heading<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "\n<< {title} >>").context("write heading")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::{IncomeReport, Ledger};
    use crate::test_support::FixedClock;

    #[test]
    fn demo_fills_lot_and_collects_two_fees() {
        let mut session = Session::new(Ledger::new(20).expect("ledger"), FixedClock::new(), false);
        let mut out = Vec::new();
        run_demo(&mut session, &mut out).expect("demo");

        let out = String::from_utf8(out).expect("utf8");
        assert_eq!(
            out.matches("Sorry, the check-in failed (parking is full)")
                .count(),
            1
        );
        // Car with card: 20 - 3. Minibus: 25.
        assert!(out.contains("AA111AA: your fee is $17. Come back soon"));
        assert!(out.contains("CC333CC: your fee is $25. Come back soon"));
        assert!(out.contains("Total vehicles: 18"));
        assert!(out.contains("2 vehicles have checked out and have earnings of $42"));

        assert_eq!(
            session.ledger().income(),
            IncomeReport {
                vehicles_checked_out: 2,
                total_earnings: 42,
            }
        );
        assert!(!session.ledger().contains("CC339FF"));
    }
}
