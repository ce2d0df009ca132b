mod detail_dialog;
mod filter_form;
mod insights_table;
mod link_search;
mod page;

pub use page::PartnerInsightsPage;
