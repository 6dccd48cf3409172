//! Interactive text menu
//!
//! Reads commands line by line and prints results. All number parsing
//! happens here; the registry only ever sees finite amounts.
use crate::auction_system::{AuctionSystem, ITEM_NOT_FOUND};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

pub const BANNER: &str = r"
    +----------------------------------------------------+
    |      Online Auction System                         |
    +----------------------------------------------------+
";

const MENU: &str = "
1. Register User
2. Add Auction Item
3. Place Bid
4. View Item Status
5. List All Items
6. Exit";

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'s, R, W> {
    system: &'s mut AuctionSystem,
    input: R,
    output: W,
    json: bool,
}

impl<'s, R, W> Shell<'s, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(system: &'s mut AuctionSystem, input: R, output: W) -> Self {
        Self {
            system,
            input,
            output,
            json: false,
        }
    }

    /// Print item status as JSON
    pub fn json(self, json: bool) -> Self {
        Self { json, ..self }
    }

    pub fn print_banner(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;
        Ok(())
    }

    /// Run until the user picks "Exit" or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let choice = match self.prompt("Enter your choice (1-6): ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };
            debug!(%choice, "menu choice");

            let flow = match choice.trim() {
                "1" => self.register_user()?,
                "2" => self.add_item()?,
                "3" => self.place_bid()?,
                "4" => self.item_status()?,
                "5" => self.list_items()?,
                "6" => {
                    writeln!(self.output, "Thank you for using the Online Auction System!")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.output, "Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    /// Print `text`, then read one line without its terminator; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self
            .input
            .read_line(&mut line)
            .context("failed to read input")?
            == 0
        {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn register_user(&mut self) -> Result<Flow> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(Flow::Exit);
        };
        if self.system.register_user(&username) {
            writeln!(self.output, "User {username} registered successfully!")?;
        } else {
            writeln!(self.output, "Username already exists!")?;
        }
        Ok(Flow::Continue)
    }

    fn add_item(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter item name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("Enter starting price: $")? else {
            return Ok(Flow::Exit);
        };
        let Some(starting_price) = parse_number(&price) else {
            writeln!(self.output, "Invalid price or duration!")?;
            return Ok(Flow::Continue);
        };
        let Some(duration) = self.prompt("Enter auction duration (hours): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(duration_hours) = parse_number(&duration) else {
            writeln!(self.output, "Invalid price or duration!")?;
            return Ok(Flow::Continue);
        };

        let item_id = self.system.add_item(&name, starting_price, duration_hours);
        writeln!(self.output, "Item added with ID: {item_id}")?;
        Ok(Flow::Continue)
    }

    fn place_bid(&mut self) -> Result<Flow> {
        let Some(item_id) = self.prompt("Enter item ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(username) = self.prompt("Enter your username: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Enter bid amount: $")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = parse_number(&amount) else {
            writeln!(self.output, "Invalid bid amount!")?;
            return Ok(Flow::Continue);
        };

        match self.system.try_place_bid(&item_id, &username, amount) {
            Ok(()) => writeln!(self.output, "Bid placed successfully!")?,
            Err(reason) => {
                writeln!(
                    self.output,
                    "Bid failed! Check item ID, username, or bid amount."
                )?;
                writeln!(self.output, "Reason: {reason}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn item_status(&mut self) -> Result<Flow> {
        let Some(item_id) = self.prompt("Enter item ID: ")? else {
            return Ok(Flow::Exit);
        };
        match self.system.get_item_status(&item_id) {
            None => writeln!(self.output, "{ITEM_NOT_FOUND}")?,
            Some(status) if self.json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&status)?)?
            }
            Some(status) => writeln!(self.output, "{status}")?,
        }
        Ok(Flow::Continue)
    }

    fn list_items(&mut self) -> Result<Flow> {
        if self.system.is_empty() {
            writeln!(self.output, "No items available!")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nAvailable Items:")?;
        for item_id in self.system.get_all_items() {
            if let Some(item) = self.system.item(&item_id) {
                writeln!(self.output, "ID: {} - {}", item_id, item.name())?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Parse a user-typed number, rejecting NaN and infinities
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
