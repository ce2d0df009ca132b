pub mod d410_partner_insights;
