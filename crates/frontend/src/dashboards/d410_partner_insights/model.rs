//! Page state of the insights dashboards, free of any DOM access.

use chrono::NaiveDate;
use contracts::dashboards::d410_partner_insights::{
    DateRangeMode, DetailRequest, InsightsFilter, InsightsRow,
};

use super::table::DetailsAction;

/// One edit of the filter form. Each variant writes exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Partners(Vec<String>),
    PartnerGroup(String),
    DateRange(DateRangeMode),
    SelectedDateRange(NaiveDate, NaiveDate),
}

impl FilterChange {
    pub fn apply_to(self, filter: &mut InsightsFilter) {
        match self {
            FilterChange::Partners(partners) => filter.partners = partners,
            FilterChange::PartnerGroup(group) => filter.partner_group = group,
            FilterChange::DateRange(mode) => filter.date_range = mode,
            FilterChange::SelectedDateRange(from, to) => filter.selected_date_range = (from, to),
        }
    }
}

/// An insights request to send, tagged with its sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filters: InsightsFilter,
}

/// Filters, latest request and the rows currently on screen.
///
/// Every issued request gets a larger sequence number; only the completion
/// of the latest one is applied, so a slow early response never overwrites
/// a newer result. The busy flag belongs to the latest request.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsController {
    filters: InsightsFilter,
    latest_seq: u64,
    busy: bool,
    rows: Vec<InsightsRow>,
    error: Option<String>,
}

impl InsightsController {
    pub fn new(filters: InsightsFilter) -> Self {
        Self {
            filters,
            latest_seq: 0,
            busy: false,
            rows: Vec::new(),
            error: None,
        }
    }

    pub fn filters(&self) -> &InsightsFilter {
        &self.filters
    }

    pub fn rows(&self) -> &[InsightsRow] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Starts a request for the current filters
    pub fn issue(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.busy = true;
        FetchTicket {
            seq: self.latest_seq,
            filters: self.filters.clone(),
        }
    }

    /// Writes one filter field and starts the request for it
    pub fn apply(&mut self, change: FilterChange) -> FetchTicket {
        change.apply_to(&mut self.filters);
        self.issue()
    }

    /// Applies the outcome of request `seq`. Returns false when a newer
    /// request superseded it and the outcome was dropped.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<InsightsRow>, String>) -> bool {
        if seq != self.latest_seq {
            return false;
        }

        self.busy = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        true
    }
}

/// Request behind a clicked Details button
pub fn detail_request(action: &DetailsAction, filters: &InsightsFilter) -> DetailRequest {
    DetailRequest {
        partner_code: action.partner_code.clone(),
        doctype: action.doctype.clone(),
        details: action.details,
        filters: filters.clone(),
    }
}

/// Numbers detail requests so only the latest click opens the dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailSequence {
    latest: u64,
}

impl DetailSequence {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Content of the open details modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailDialog {
    pub title: String,
    pub markup: String,
}

impl DetailDialog {
    pub fn new(doctype: &str, markup: String) -> Self {
        Self {
            title: format!("{} Details", doctype),
            markup,
        }
    }
}
