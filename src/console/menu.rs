//! Interactive numbered menu.
//!
//! Reads choices and item ids line by line and dispatches to [`Session`]
//! operations. Every error except a broken output stream is reported and
//! the loop continues; end of input exits like choosing "Exit".

use std::io::{BufRead, Write};

use tracing::debug;

use super::Session;
use crate::error::ShelfError;

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    ListItems,
    SearchById,
    SearchByName,
    GenerateBarcode,
    ItemDetails,
    PrintBarcode,
    ShowQr,
    CreateLabel,
    PrintLabel,
    BulkLabels,
    Exit,
}

impl Choice {
    pub const ALL: [Choice; 11] = [
        Choice::ListItems,
        Choice::SearchById,
        Choice::SearchByName,
        Choice::GenerateBarcode,
        Choice::ItemDetails,
        Choice::PrintBarcode,
        Choice::ShowQr,
        Choice::CreateLabel,
        Choice::PrintLabel,
        Choice::BulkLabels,
        Choice::Exit,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Choice::ListItems => "List All Items",
            Choice::SearchById => "Search Item by ID",
            Choice::SearchByName => "Search Item by Name",
            Choice::GenerateBarcode => "Generate Barcode for Item",
            Choice::ItemDetails => "Display Item Details",
            Choice::PrintBarcode => "Print Barcode for Item",
            Choice::ShowQr => "Show QR Code for Item",
            Choice::CreateLabel => "Create Label for Item",
            Choice::PrintLabel => "Print Label for Item",
            Choice::BulkLabels => "Create Labels in Bulk",
            Choice::Exit => "Exit",
        }
    }

    /// Parse a 1-based menu number.
    pub fn from_input(input: &str) -> Option<Choice> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

/// Menu loop over arbitrary input and output streams.
pub struct Menu<'s, 'c, R, W> {
    session: &'s mut Session<'c>,
    input: R,
    out: W,
}

impl<'s, 'c, R: BufRead, W: Write> Menu<'s, 'c, R, W> {
    pub fn new(session: &'s mut Session<'c>, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// Run until "Exit" or end of input.
    pub fn run(&mut self) -> Result<(), ShelfError> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt(&format!("Enter your choice (1-{}): ", Choice::ALL.len()))?
            else {
                break;
            };

            let Some(choice) = Choice::from_input(&line) else {
                writeln!(self.out, "\nInvalid choice. Please try again.")?;
                continue;
            };
            if choice == Choice::Exit {
                break;
            }

            debug!(?choice, "menu choice");
            match self.dispatch(choice) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e @ ShelfError::Io(_)) => return Err(e),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => writeln!(self.out, "\n{}", user_message(&e))?,
            }
        }

        writeln!(self.out, "\nExiting warehouse barcode manager. Goodbye!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), ShelfError> {
        writeln!(self.out, "\n{}", "=".repeat(60))?;
        writeln!(self.out, "WAREHOUSE BARCODE MANAGEMENT SYSTEM")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        for (i, choice) in Choice::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, choice.title())?;
        }
        writeln!(self.out, "{}", "=".repeat(60))?;
        Ok(())
    }

    /// Print `message` and read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, ShelfError> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run one choice. `Ok(false)` means input ended mid-prompt.
    fn dispatch(&mut self, choice: Choice) -> Result<bool, ShelfError> {
        match choice {
            Choice::ListItems => self.session.list_items(&mut self.out)?,
            Choice::SearchByName => {
                let Some(query) = self.prompt("\nEnter Item Name (or part of it): ")? else {
                    return Ok(false);
                };
                self.session.search_by_name(&query, &mut self.out)?;
            }
            Choice::BulkLabels => {
                let categories = self.session.catalog().categories().join(", ");
                writeln!(self.out, "\nCategories: {}", categories)?;
                let Some(category) = self.prompt("\nCategory (blank for all items): ")? else {
                    return Ok(false);
                };
                let category = (!category.is_empty()).then_some(category);
                self.session.make_labels(category.as_deref(), &mut self.out)?;
            }
            Choice::Exit => return Ok(false),
            _ => {
                let Some(item_id) = self.prompt("\nEnter Item ID: ")? else {
                    return Ok(false);
                };
                let out = &mut self.out;
                match choice {
                    Choice::SearchById | Choice::ItemDetails => {
                        self.session.item_details(&item_id, out)?
                    }
                    Choice::GenerateBarcode => self.session.show_barcode(&item_id, out)?,
                    Choice::PrintBarcode => self.session.print_barcode(&item_id, false, out)?,
                    Choice::ShowQr => self.session.show_qr(&item_id, out)?,
                    Choice::CreateLabel => self.session.make_label(&item_id, true, out)?,
                    Choice::PrintLabel => self.session.print_label(&item_id, false, out)?,
                    _ => {}
                }
            }
        }
        Ok(true)
    }
}

/// Message shown to the user for a non-fatal error.
pub fn user_message(error: &ShelfError) -> String {
    match error {
        ShelfError::NotFound(what) => {
            let mut msg = what.clone();
            if let Some(first) = msg.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            msg
        }
        ShelfError::Render(reason) => format!("Preview unavailable: {}", reason),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::OutputDirs;
    use crate::font::FontSource;
    use crate::label::Compositor;
    use crate::platform::Unix;

    const CSV: &str = "\
item_id,name,category,quantity,unit_price,barcode,expiry_date
A001,Widget,Tools,10,4.99,012345678905,
A002,Snowman,Seasonal,1,3.00,SNOW\u{2603},
";

    fn run_menu(input: &str) -> String {
        run_menu_in(input, |_| {})
    }

    fn run_menu_in<F: FnOnce(&std::path::Path)>(input: &str, prepare: F) -> String {
        let catalog = Catalog::from_csv(CSV).unwrap();
        let dir = tempfile::tempdir().unwrap();
        prepare(dir.path());
        let compositor = Compositor::with_fonts(OutputDirs::under(dir.path()), &[FontSource::Builtin]);
        let mut session = Session::new(&catalog, compositor, Box::new(Unix::headless()));

        let mut out = Vec::new();
        Menu::new(&mut session, input.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_choice_from_input() {
        assert_eq!(Choice::from_input("1"), Some(Choice::ListItems));
        assert_eq!(Choice::from_input(" 11 "), Some(Choice::Exit));
        assert_eq!(Choice::from_input("0"), None);
        assert_eq!(Choice::from_input("12"), None);
        assert_eq!(Choice::from_input("x"), None);
    }

    #[test]
    fn test_exit() {
        let text = run_menu("11\n");
        assert!(text.contains("Goodbye"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let text = run_menu("");
        assert!(text.contains("Goodbye"));
    }

    #[test]
    fn test_invalid_choice_continues() {
        let text = run_menu("42\n1\n11\n");
        assert!(text.contains("Invalid choice"));
        assert!(text.contains("Widget"));
    }

    #[test]
    fn test_not_found_returns_to_menu() {
        let text = run_menu("2\nzz9\n5\na001\n11\n");
        assert!(text.contains("No item found with ID: ZZ9"));
        assert!(text.contains("ITEM DETAILS: Widget"));
    }

    #[test]
    fn test_encoding_failure_is_reported() {
        let text = run_menu("4\nA002\n11\n");
        assert!(text.contains("not scannable"));
        assert!(text.contains("Encoding error"));
        assert!(text.contains("Goodbye"));
    }

    #[test]
    fn test_bulk_labels_from_menu() {
        let text = run_menu("10\n\n11\n");
        assert!(text.contains("1 of 2 labels generated (1 failed)"));
    }

    #[test]
    fn test_unwritable_label_dir_keeps_session_alive() {
        let text = run_menu_in("8\nA001\n1\n11\n", |root| {
            std::fs::write(root.join("labels"), b"in the way").unwrap();
        });
        assert!(text.contains("Encoding error: cannot create directory"));
        assert!(text.contains("A001       Widget"));
        assert!(text.contains("Goodbye"));
    }
}
