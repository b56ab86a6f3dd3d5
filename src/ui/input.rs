//! Line-oriented command input.
//!
//! Each line typed at the prompt maps to one [`Event`]:
//!
//! | Line                         | Event                          |
//! |------------------------------|--------------------------------|
//! | `go plugins`, `#plugins`     | `Navigate`                     |
//! | `/idea`, `/`                 | `QueryChanged`, `ClearQuery`   |
//! | `clear`                      | `ClearQuery`                   |
//! | `pick 2`                     | `SelectItem(1)`                |
//! | `days 30`                    | `SetExpiryInDays`              |
//! | `expiry 2027-01-01`          | `SetExpiryDate`                |
//! | `type subscription`          | `SetLicenseType`               |
//! | `users 5`                    | `SetUserCount`                 |
//! | `generate`                   | `Submit`                       |
//! | `close`                      | `DismissOverlay`               |
//! | `copy`                       | `CopyResult`                   |
//! | `identity Alice \| Bob`      | `SaveIdentity`                 |
//! | `identity`                   | `EditIdentity`                 |
//! | `forget`                     | `ClearIdentity`                |
//! | `theme`                      | `ToggleTheme`                  |
//! | `reload`                     | `ReloadCatalog`                |
//! | `quit`, `q`, `exit`          | `Quit`                         |

use crate::app::Event;
use crate::domain::{CatalogError, LicenseType, Result};

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for unknown commands and malformed
/// arguments.
///
/// # Example
///
/// ```rust
/// use catalog_browser::app::Event;
/// use catalog_browser::ui::parse_command;
///
/// assert_eq!(parse_command("pick 2")?, Some(Event::SelectItem(1)));
/// assert_eq!(parse_command("/idea")?, Some(Event::QueryChanged("idea".to_string())));
/// # Ok::<(), catalog_browser::domain::CatalogError>(())
/// ```
pub fn parse_command(line: &str) -> Result<Option<Event>> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);

    if let Some(query) = line.strip_prefix('/') {
        return Ok(Some(if query.trim().is_empty() {
            Event::ClearQuery
        } else {
            Event::QueryChanged(query.to_string())
        }));
    }

    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('#') {
        return Ok(Some(Event::Navigate(line.to_string())));
    }

    let (command, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, arg)| (command, arg.trim()));

    let event = match (command.to_ascii_lowercase().as_str(), arg) {
        ("go", page) => Event::Navigate(required(page, "go <page>")?.to_string()),
        ("clear", "") => Event::ClearQuery,
        ("pick", n) => {
            let position: usize = number(n, "pick <position>")?;
            if position == 0 {
                return Err(CatalogError::Validation("positions start at 1".to_string()));
            }
            Event::SelectItem(position - 1)
        }
        ("days", n) => {
            let days: i64 = number(n, "days <count>")?;
            if days <= 0 {
                return Err(CatalogError::Validation("days must be at least 1".to_string()));
            }
            Event::SetExpiryInDays(days)
        }
        ("expiry", date) => Event::SetExpiryDate(required(date, "expiry YYYY-MM-DD")?.to_string()),
        ("type", kind) => Event::SetLicenseType(required(kind, "type perpetual|subscription")?.parse::<LicenseType>()?),
        ("users", n) => Event::SetUserCount(number(n, "users <count>")?),
        ("generate", "") => Event::Submit,
        ("close", "") => Event::DismissOverlay,
        ("copy", "") => Event::CopyResult,
        ("identity", "") => Event::EditIdentity,
        ("identity", names) => {
            let (licensee, assignee) = names.split_once('|').ok_or_else(|| {
                CatalogError::Validation("usage: identity <licensee> | <assignee>".to_string())
            })?;
            Event::SaveIdentity {
                licensee_name: licensee.trim().to_string(),
                assignee_name: assignee.trim().to_string(),
            }
        }
        ("forget", "") => Event::ClearIdentity,
        ("theme", "") => Event::ToggleTheme,
        ("reload", "") => Event::ReloadCatalog,
        ("quit" | "q" | "exit", "") => Event::Quit,
        _ => return Err(CatalogError::Validation(format!("Unknown command: {line}"))),
    };
    Ok(Some(event))
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(CatalogError::Validation(format!("usage: {usage}")))
    } else {
        Ok(arg)
    }
}

fn number<T: std::str::FromStr>(arg: &str, usage: &str) -> Result<T> {
    required(arg, usage)?
        .parse()
        .map_err(|_| CatalogError::Validation(format!("not a number: {arg} (usage: {usage})")))
}
