//! Generation request inputs: identity, parameters and the outgoing request.

use crate::domain::error::{CatalogError, Result};
use crate::domain::Item;
use chrono::{Duration, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Wire format of expiry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Licensee and assignee names, persisted by the preference store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub licensee_name: String,
    pub assignee_name: String,
}

impl Identity {
    #[must_use]
    pub fn new(licensee_name: impl Into<String>, assignee_name: impl Into<String>) -> Self {
        Self {
            licensee_name: licensee_name.into(),
            assignee_name: assignee_name.into(),
        }
    }

    /// Both names are present (ignoring surrounding whitespace).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.licensee_name.trim().is_empty() && !self.assignee_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    #[default]
    Perpetual,
    Subscription,
}

impl LicenseType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perpetual => "perpetual",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LicenseType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perpetual" => Ok(Self::Perpetual),
            "subscription" => Ok(Self::Subscription),
            other => Err(CatalogError::Validation(format!("unknown license type: {other}"))),
        }
    }
}

/// Parameters entered in the parameter view for the selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParameters {
    pub expiry_date: NaiveDate,
    pub license_type: LicenseType,
    pub user_count: NonZeroU32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self::starting(Local::now().date_naive())
    }
}

impl GenerationParameters {
    /// Defaults relative to `today`: expiry one year later, perpetual, one user.
    #[must_use]
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            expiry_date: default_expiry(today),
            license_type: LicenseType::default(),
            user_count: NonZeroU32::MIN,
        }
    }

    /// Quick-pick: expiry `days` after `today`. The offset must be positive.
    pub fn set_expiry_after(&mut self, today: NaiveDate, days: i64) -> Result<()> {
        if days <= 0 {
            return Err(CatalogError::Validation(format!(
                "expiry offset must be at least one day, got {days}"
            )));
        }
        let date = Duration::try_days(days)
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or_else(|| CatalogError::Validation(format!("expiry offset out of range: {days} days")))?;
        self.expiry_date = date;
        Ok(())
    }

    /// Direct edit. Only `YYYY-MM-DD` is accepted.
    pub fn set_expiry_date(&mut self, input: &str) -> Result<()> {
        self.expiry_date = parse_date(input)?;
        Ok(())
    }

    pub fn set_user_count(&mut self, count: u32) -> Result<()> {
        self.user_count = NonZeroU32::new(count)
            .ok_or_else(|| CatalogError::Validation("user count must be positive".to_string()))?;
        Ok(())
    }

    #[must_use]
    pub fn expiry_string(&self) -> String {
        self.expiry_date.format(DATE_FORMAT).to_string()
    }
}

fn default_expiry(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX)
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let well_formed = trimmed.len() == 10
        && trimmed
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(CatalogError::Validation(format!("expected YYYY-MM-DD, got {trimmed:?}")));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| CatalogError::Validation(format!("invalid date {trimmed:?}: {e}")))
}

/// The request handed to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Omitted for items that carry no code.
    pub item_code: Option<String>,
    pub licensee_name: String,
    pub assignee_name: String,
    pub expiry_date: String,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(item: &Item, identity: &Identity, parameters: &GenerationParameters) -> Self {
        Self {
            item_code: item.code.clone(),
            licensee_name: identity.licensee_name.trim().to_string(),
            assignee_name: identity.assignee_name.trim().to_string(),
            expiry_date: parameters.expiry_string(),
        }
    }

    /// URL query pairs, in wire order. `productCode` is omitted when absent.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(code) = self.item_code.as_deref() {
            pairs.push(("productCode", code));
        }
        pairs.push(("licenseeName", self.licensee_name.as_str()));
        pairs.push(("assigneeName", self.assignee_name.as_str()));
        pairs.push(("expiryDate", self.expiry_date.as_str()));
        pairs
    }
}
