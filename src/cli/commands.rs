use chrono::{Datelike, Local, NaiveDate};

use crate::{
    currency::format_amount,
    errors::TrackerError,
    ledger::{Category, Transaction},
    report::SummaryService,
};

use super::context::ShellContext;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

pub type CommandResult = Result<(), TrackerError>;

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "income",
        "Record an income transaction",
        "income <amount> <description> [/t tag,tag] [/d YYYY-MM-DD]",
        cmd_income,
    ));
    registry.register(CommandEntry::new(
        "expense",
        "Record an expense transaction",
        "expense <amount> <description> /c <category> [/t tag,tag] [/d YYYY-MM-DD]",
        cmd_expense,
    ));
    registry.register(CommandEntry::new(
        "list",
        "List transactions, optionally for one month",
        "list [month year]",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Delete a transaction or an inclusive index range",
        "delete <start> [end]",
        cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "setbudget",
        "Set the budget for a month",
        "setbudget <month> <year> <amount>",
        cmd_setbudget,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show the financial summary for a month",
        "summary [month year]",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "help",
        "Show available commands",
        "help",
        cmd_help,
    ));
    registry.register(CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit));
}

/// Positional arguments plus the `/c`, `/t`, and `/d` options.
struct ParsedArgs {
    positional: Vec<String>,
    category: Option<Category>,
    tags: Vec<String>,
    date: Option<NaiveDate>,
}

impl ParsedArgs {
    fn parse(args: &[&str]) -> Result<Self, TrackerError> {
        let mut parsed = Self {
            positional: Vec::new(),
            category: None,
            tags: Vec::new(),
            date: None,
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match *arg {
                "/c" => {
                    let value = option_value(iter.next(), "/c")?;
                    parsed.category = Some(value.parse()?);
                }
                "/t" => {
                    let value = option_value(iter.next(), "/t")?;
                    parsed.tags = value
                        .split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(String::from)
                        .collect();
                }
                "/d" => {
                    let value = option_value(iter.next(), "/d")?;
                    parsed.date = Some(parse_date(value)?);
                }
                other => parsed.positional.push(other.to_string()),
            }
        }
        Ok(parsed)
    }

    fn amount_and_description(&self) -> Result<(f64, String), TrackerError> {
        let raw = self.positional.first().ok_or_else(|| {
            TrackerError::InvalidInput("an amount is required".into())
        })?;
        let amount = parse_amount(raw)?;
        let description = self.positional[1..].join(" ");
        if description.is_empty() {
            return Err(TrackerError::InvalidInput("a description is required".into()));
        }
        Ok((amount, description))
    }

    fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn option_value<'a>(value: Option<&&'a str>, option: &str) -> Result<&'a str, TrackerError> {
    value
        .copied()
        .ok_or_else(|| TrackerError::InvalidInput(format!("{} requires a value", option)))
}

fn parse_amount(raw: &str) -> Result<f64, TrackerError> {
    let amount: f64 = raw
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid amount", raw)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(TrackerError::InvalidInput(
            "amount must be a non-negative number".into(),
        ));
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid date (YYYY-MM-DD)", raw)))
}

fn parse_month(raw: &str) -> Result<u32, TrackerError> {
    let month: u32 = raw
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid month", raw)))?;
    if !(1..=12).contains(&month) {
        return Err(TrackerError::InvalidInput(format!(
            "month {} is out of range",
            month
        )));
    }
    Ok(month)
}

fn parse_year(raw: &str) -> Result<i32, TrackerError> {
    raw.parse()
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid year", raw)))
}

/// Resolves an optional `[month year]` argument pair, defaulting to today.
fn parse_month_year(args: &[&str]) -> Result<(u32, i32), TrackerError> {
    match args {
        [] => {
            let today = Local::now().date_naive();
            Ok((today.month(), today.year()))
        }
        [month, year] => Ok((parse_month(month)?, parse_year(year)?)),
        _ => Err(TrackerError::InvalidInput(
            "expected either no arguments or `<month> <year>`".into(),
        )),
    }
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let (amount, description) = parsed.amount_and_description()?;
    let date = parsed.date_or_today();
    let txn = Transaction::income(amount, description, parsed.tags, date);
    let rendered = txn.to_string();
    context.store.add(txn);
    context.persist()?;
    output::success(format!("Recorded: {}", rendered));
    Ok(())
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let (amount, description) = parsed.amount_and_description()?;
    let category = parsed.category.ok_or_else(|| {
        TrackerError::InvalidInput("an expense needs a category, e.g. `/c food`".into())
    })?;
    let date = parsed.date_or_today();
    let txn = Transaction::expense(amount, description, category, parsed.tags, date);
    let rendered = txn.to_string();
    context.store.add(txn);
    context.persist()?;
    output::success(format!("Recorded: {}", rendered));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.store.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    let mut lines = Vec::new();
    if args.is_empty() {
        for (index, txn) in context.store.transactions().iter().enumerate() {
            lines.push(format!("{}. {} ({})", index + 1, txn, txn.date));
        }
    } else {
        let (month, year) = parse_month_year(args)?;
        for txn in context.store.monthly_transactions(month, year) {
            lines.push(format!("{}. {} ({})", lines.len() + 1, txn, txn.date));
        }
        if lines.is_empty() {
            output::info("No transactions for that month.");
            return Ok(());
        }
    }
    output::report(lines.join("\n"));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (start, end) = match args {
        [start] => {
            let index = parse_index(start)?;
            (index, index)
        }
        [start, end] => (parse_index(start)?, parse_index(end)?),
        _ => {
            return Err(TrackerError::InvalidInput(
                "expected `delete <start> [end]`".into(),
            ))
        }
    };
    let deleted = context.store.delete_range(start, end)?;
    context.persist()?;
    let mut message = String::from("Deleted transactions:");
    for txn in &deleted {
        message.push_str(&format!("\n- {}", txn));
    }
    output::info(message);
    Ok(())
}

fn parse_index(raw: &str) -> Result<usize, TrackerError> {
    raw.parse()
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid index", raw)))
}

fn cmd_setbudget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [month, year, amount] = args else {
        return Err(TrackerError::InvalidInput(
            "expected `setbudget <month> <year> <amount>`".into(),
        ));
    };
    let month = parse_month(month)?;
    let year = parse_year(year)?;
    let amount = parse_amount(amount)?;
    context.budgets.set_budget(month, year, amount);
    context.persist()?;
    output::success(format!(
        "Budget for {}/{} set to {}.",
        month,
        year,
        format_amount(amount, &context.config.currency_symbol)
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (month, year) = parse_month_year(args)?;
    let summary = SummaryService::monthly_summary(
        &context.store,
        &context.budgets,
        month,
        year,
        &context.config.currency_symbol,
    )?;
    output::report(summary);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut lines = Vec::new();
    for entry in context.registry().list() {
        lines.push(format!("{:<10} {}", entry.name, entry.description));
        lines.push(format!("           usage: {}", entry.usage));
    }
    output::report(lines.join("\n"));
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    output::info("Goodbye.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_args_split_options_from_positionals() {
        let parsed =
            ParsedArgs::parse(&["50", "Groceries", "/c", "food", "/t", "weekly,family"]).unwrap();
        assert_eq!(parsed.positional, vec!["50", "Groceries"]);
        assert_eq!(parsed.category, Some(Category::Food));
        assert_eq!(parsed.tags, vec!["weekly", "family"]);
    }

    #[test]
    fn amount_rejects_negative_and_garbage() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
    }

    #[test]
    fn month_rejects_out_of_range() {
        assert!(parse_month("0").is_err());
        assert!(parse_month("13").is_err());
        assert_eq!(parse_month("8").unwrap(), 8);
    }

    #[test]
    fn month_year_defaults_to_today() {
        let (month, year) = parse_month_year(&[]).unwrap();
        let today = Local::now().date_naive();
        assert_eq!((month, year), (today.month(), today.year()));
    }
}
