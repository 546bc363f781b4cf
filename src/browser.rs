//! Pages through a trip table five rows at a time.

use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::output::write_rows;
use crate::prompt::Console;
use crate::table::TripTable;

pub const PAGE_SIZE: usize = 5;

const FIRST_QUESTION: &str = "\nWould you like to see a sample of the raw data? Type yes or no:\n";
const MORE_QUESTION: &str = "\nWould you like to see more raw data? Type yes or no:\n";

/// Shows successive windows of `table` in row order while the user answers yes.
///
/// Stops on any other answer or once every row has been shown. Returns the
/// number of rows shown.
pub fn browse<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
) -> io::Result<usize> {
    let mut pages = table.trips().chunks(PAGE_SIZE);
    let mut shown = 0;
    let mut question = FIRST_QUESTION;

    while console.confirm(question)? {
        if let Some(page) = pages.next() {
            write_rows(console.output(), shown, page)?;
            shown += page.len();
            question = MORE_QUESTION;
        }
        if shown == table.len() {
            writeln!(console.output(), "\nNo more rows to show.")?;
            break;
        }
    }

    debug!(shown, total = table.len(), "Raw data browsing finished");
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use crate::table::fixtures::{table, trip};
    use std::io::Cursor;

    fn twelve_rows() -> TripTable {
        let trips = (0..12)
            .map(|i| trip(5, i, &format!("S{i}"), "E", 60.0))
            .collect();
        table(Schema::default(), trips)
    }

    fn run(t: &TripTable, script: &str) -> (usize, String) {
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let shown = browse(&mut console, t).unwrap();
        (shown, String::from_utf8(console.into_output()).unwrap())
    }

    /// Row numbers printed in the first CSV column, header lines skipped.
    fn printed_rows(text: &str) -> Vec<usize> {
        text.lines()
            .filter_map(|line| line.split(',').next()?.parse().ok())
            .collect()
    }

    #[test]
    fn test_always_yes_walks_to_the_end() {
        let t = twelve_rows();

        let (shown, text) = run(&t, "yes\nyes\nyes\nyes\nyes\n");

        assert_eq!(shown, 12);
        assert_eq!(printed_rows(&text), (0..12).collect::<Vec<_>>());
        assert_eq!(text.matches("Row,Start Time").count(), 3);
        // stops asking once the table is exhausted
        assert_eq!(text.matches("see more raw data").count(), 2);
        assert!(text.contains("No more rows to show."));
    }

    #[test]
    fn test_windows_start_at_zero_and_advance_by_five() {
        let t = twelve_rows();

        let (shown, text) = run(&t, "yes\nyes\nno\n");

        assert_eq!(shown, 10);
        assert_eq!(printed_rows(&text), (0..10).collect::<Vec<_>>());
        assert!(!text.contains("No more rows"));
    }

    #[test]
    fn test_declining_shows_nothing() {
        let (shown, text) = run(&twelve_rows(), "no\n");

        assert_eq!(shown, 0);
        assert!(printed_rows(&text).is_empty());
    }

    #[test]
    fn test_end_of_input_stops() {
        let (shown, _) = run(&twelve_rows(), "yes\n");
        assert_eq!(shown, 5);
    }

    #[test]
    fn test_empty_table() {
        let t = table(Schema::default(), vec![]);

        let (shown, text) = run(&t, "yes\n");

        assert_eq!(shown, 0);
        assert!(text.contains("No more rows to show."));
    }
}
