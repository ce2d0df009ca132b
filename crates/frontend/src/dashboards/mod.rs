pub mod d410_partner_insights;

pub use d410_partner_insights::ui::PartnerInsightsPage;
