use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::{DEFAULT_EXPORT_FILE, OutputFormat};
use crate::application::Summary;
use crate::domain::{Clock, Ledger, format_amount, parse_amount};
use crate::io::export_csv;

/// Settings for an interactive session, usually taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub default_export_file: String,
    pub format: OutputFormat,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_export_file: DEFAULT_EXPORT_FILE.to_string(),
            format: OutputFormat::Table,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddTransaction,
    DisplayTransactions,
    TotalIncome,
    TotalExpenses,
    SaveCsv,
    Summary,
    Exit,
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::AddTransaction,
            "2" => MenuChoice::DisplayTransactions,
            "3" => MenuChoice::TotalIncome,
            "4" => MenuChoice::TotalExpenses,
            "5" => MenuChoice::SaveCsv,
            "6" => MenuChoice::Summary,
            "7" => MenuChoice::Exit,
            other => match other.to_lowercase().as_str() {
                "q" | "quit" | "exit" => MenuChoice::Exit,
                _ => MenuChoice::Invalid(other.to_string()),
            },
        }
    }
}

const MENU: &str = "\n--- Personal Budget Tracker ---
1. Add Transaction
2. Display Transactions
3. Show total Income
4. Show total Expenses
5. Save Transactions to CSV file
6. Show Summary
7. Exit Program";

enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end over a ledger.
///
/// Reads one answer per line from `input` and writes prompts and results to
/// `output`. End of input ends the session the same way as choosing Exit.
pub struct Session<'a, C: Clock, R: BufRead, W: Write> {
    ledger: &'a mut Ledger<C>,
    input: R,
    output: W,
    settings: SessionSettings,
}

impl<'a, C: Clock, R: BufRead, W: Write> Session<'a, C, R, W> {
    pub fn new(
        ledger: &'a mut Ledger<C>,
        input: R,
        output: W,
        settings: SessionSettings,
    ) -> Self {
        Self {
            ledger,
            input,
            output,
            settings,
        }
    }

    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(answer) = self.prompt("Choose option: ")? else {
                return self.exit();
            };

            let flow = match MenuChoice::parse(&answer) {
                MenuChoice::AddTransaction => self.add_transaction()?,
                MenuChoice::DisplayTransactions => self.display_transactions()?,
                MenuChoice::TotalIncome => {
                    let total = self.ledger.total_income();
                    writeln!(self.output, "Total Income: {}", format_amount(total))?;
                    Flow::Continue
                }
                MenuChoice::TotalExpenses => {
                    let total = self.ledger.total_expense();
                    writeln!(self.output, "Total Expenses: {}", format_amount(total))?;
                    Flow::Continue
                }
                MenuChoice::SaveCsv => self.save_csv()?,
                MenuChoice::Summary => self.show_summary()?,
                MenuChoice::Exit => Flow::Exit,
                MenuChoice::Invalid(choice) => {
                    tracing::debug!(%choice, "unrecognized menu choice");
                    writeln!(self.output, "Invalid choice, try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return self.exit();
            }
        }
    }

    fn exit(mut self) -> Result<()> {
        writeln!(self.output, "Exiting...")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// Print `text` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_transaction(&mut self) -> Result<Flow> {
        let Some(amount_text) = self.prompt("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match parse_amount(&amount_text) {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!(input = %amount_text, error = %e, "rejected amount");
                writeln!(self.output, "Invalid amount: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(kind) = self.prompt("Enter type (income/expense): ")? else {
            return Ok(Flow::Exit);
        };

        match self.ledger.try_append(amount, category, kind) {
            Ok(transaction) => {
                let id = transaction.id;
                writeln!(self.output, "Transaction added! (ID {id})")?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected transaction");
                writeln!(self.output, "Transaction rejected: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn display_transactions(&mut self) -> Result<Flow> {
        match self.settings.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.ledger.transactions())
                    .context("Failed to serialize transactions")?;
                writeln!(self.output, "{json}")?;
            }
            OutputFormat::Table => {
                if self.ledger.is_empty() {
                    writeln!(self.output, "No transactions recorded.")?;
                    return Ok(Flow::Continue);
                }

                writeln!(self.output, "ID\tAmount\tCategory\tDate\tType")?;
                for transaction in self.ledger.transactions() {
                    writeln!(
                        self.output,
                        "{}\t{}\t{}\t{}\t{}",
                        transaction.id,
                        format_amount(transaction.amount),
                        transaction.category,
                        transaction.date_string(),
                        transaction.kind
                    )?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn save_csv(&mut self) -> Result<Flow> {
        let text = format!(
            "Enter filename (default {}): ",
            self.settings.default_export_file
        );
        let Some(answer) = self.prompt(&text)? else {
            return Ok(Flow::Exit);
        };
        let path = if answer.is_empty() {
            self.settings.default_export_file.clone()
        } else {
            answer
        };

        match export_csv(&*self.ledger, &path) {
            Ok(count) => writeln!(self.output, "Saved {count} transactions to {path}")?,
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                writeln!(self.output, "Error saving transactions: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_summary(&mut self) -> Result<Flow> {
        let summary = Summary::from_ledger(&*self.ledger);

        match self.settings.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&summary)
                    .context("Failed to serialize summary")?;
                writeln!(self.output, "{json}")?;
            }
            OutputFormat::Table => {
                writeln!(self.output, "Transactions:   {}", summary.transaction_count)?;
                writeln!(
                    self.output,
                    "Total Income:   {}",
                    format_amount(summary.total_income)
                )?;
                writeln!(
                    self.output,
                    "Total Expenses: {}",
                    format_amount(summary.total_expense)
                )?;
                writeln!(self.output, "Net:            {}", format_amount(summary.net))?;
                writeln!(
                    self.output,
                    "Other:          {}",
                    format_amount(summary.other_total)
                )?;
            }
        }
        Ok(Flow::Continue)
    }
}
